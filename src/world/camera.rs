//! Side-on follow camera.

use bevy::prelude::*;

use super::builder::LevelGeometry;
use crate::combat::CameraShake;
use crate::player::Player;

/// Camera distance along +X from the player.
const CAMERA_DISTANCE: f32 = 12.0;
const CAMERA_HEIGHT: f32 = 2.0;
const FOLLOW_SHARPNESS: f32 = 6.0;

/// Unshaken camera position, eased toward the player each frame.
#[derive(Component)]
pub struct FollowCamera {
    anchor: Vec3,
}

pub fn spawn_camera(commands: &mut Commands, target: Vec3) {
    let anchor = target + Vec3::new(CAMERA_DISTANCE, CAMERA_HEIGHT, 0.0);
    commands.spawn((
        FollowCamera { anchor },
        LevelGeometry,
        Camera3d::default(),
        Transform::from_translation(anchor).looking_at(target, Vec3::Y),
    ));
}

/// Track the player along the depth axis and add dash shake on top.
pub fn follow_player(
    time: Res<Time>,
    shake: Res<CameraShake>,
    player_query: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut camera_query: Query<(&mut Transform, &mut FollowCamera)>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let Ok((mut camera, mut follow)) = camera_query.get_single_mut() else {
        return;
    };

    let focus = player.translation + Vec3::Y * CAMERA_HEIGHT;
    let desired = Vec3::new(player.translation.x + CAMERA_DISTANCE, focus.y, focus.z);
    let blend = 1.0 - (-FOLLOW_SHARPNESS * time.delta_secs()).exp();
    follow.anchor = follow.anchor.lerp(desired, blend);
    let base = follow.anchor;

    let jitter = Vec2::new(rand::random::<f32>() - 0.5, rand::random::<f32>() - 0.5);
    let offset = shake.offset(time.elapsed_secs(), jitter);

    // Shake is in screen space: camera right is -Z when looking down -X
    camera.translation = base + Vec3::new(0.0, offset.y, -offset.x);
    camera.look_at(Vec3::new(player.translation.x, focus.y, base.z), Vec3::Y);
}
