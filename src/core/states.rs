//! Game state definitions that control the overall flow of the game.
//!
//! The simulation only advances in `InGame`; `Paused` keeps the world
//! visible but freezes every fixed-step system and pending continuation.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` while data files are read
/// - Enter `InGame` once tuning, enemy and level data are available
/// - `Paused` freezes gameplay, toggled with Escape
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
}
