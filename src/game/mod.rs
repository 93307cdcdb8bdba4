//! Core simulation for the lattice snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Drivers feed it elapsed time and heading requests and read back tick reports.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod lattice;
pub mod placeable;
pub mod position;
pub mod power_up;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use clock::SimulationClock;
pub use config::{DelayRange, PowerUpConfig, SimConfig, StartLayout};
pub use engine::Simulation;
pub use error::{ConfigError, SimError};
pub use lattice::Lattice;
pub use placeable::{Food, Placeable, PowerUpItem};
pub use position::{Action, Direction, Position};
pub use power_up::{PowerUpController, PowerUpPhase, TimerEvent};
pub use snake::Snake;
pub use state::{EndReason, GamePhase, SimTickResult, TickReport};
