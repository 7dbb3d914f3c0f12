pub use glam::DVec2;

mod config;
pub use config::*;
mod body;
pub use body::*;
mod physics_utils;
pub use physics_utils::*;
mod trajectory;
pub use trajectory::*;
mod simulation;
pub use simulation::*;
mod aim_sweep;
pub use aim_sweep::*;

pub(crate) fn default<T: Default>() -> T {
    T::default()
}
