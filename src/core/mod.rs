//! Core game module - states, events, the continuation scheduler, and data loading.
//!
//! Everything the player and enemy modules share lives here so neither
//! depends on the other directly.

mod data;
mod events;
mod plugin;
mod schedule;
mod states;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

pub use data::{load_ron, DataLoadError};
pub use events::*;
pub use plugin::{CorePlugin, SimActor, SimSet};
pub use schedule::{Scheduler, Task, TaskDue, Wait};
pub use states::*;
