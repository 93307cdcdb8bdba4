pub mod demo;
pub mod human;

pub use demo::{Autopilot, DemoMode, DemoSummary};
pub use human::HumanMode;
