//! Lattice Snake - a snake simulation on an N-dimensional grid
//!
//! This library provides:
//! - Core simulation (game module): lattice, snake, food, power-up and clock
//! - Terminal rendering and input mapping for 2-D play (render, input modules)
//! - Session metrics (metrics module)
//! - Drivers: interactive terminal play and a headless autopilot demo (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
