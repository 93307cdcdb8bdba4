//! Headless demo run steered by a simple edge-following autopilot
//!
//! The autopilot keeps the snake circling the inside of the lattice: it turns
//! to the next heading in a fixed cycle one cell before reaching a wall, and
//! every `turn_every` turns regardless. Each tick is logged through `tracing`.

use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

use crate::game::{Direction, EndReason, GamePhase, SimConfig, SimTickResult, Simulation};

/// Heading policy for unattended runs
#[derive(Debug, Clone)]
pub struct Autopilot<const D: usize> {
    cycle: Vec<Direction<D>>,
    turn_every: u32,
}

impl<const D: usize> Autopilot<D> {
    /// `turn_every` of zero disables the periodic turn
    pub fn new(turn_every: u32) -> Self {
        // +x, +y, ..., -x, -y, ...: consecutive entries never reverse each other
        let positive = (0..D).filter_map(|axis| Direction::along(axis, true));
        let negative = (0..D).filter_map(|axis| Direction::along(axis, false));
        Self {
            cycle: positive.chain(negative).collect(),
            turn_every,
        }
    }

    /// Heading following `heading` in the turn cycle
    pub fn next_heading(&self, heading: Direction<D>) -> Direction<D> {
        let index = self
            .cycle
            .iter()
            .position(|&d| d == heading)
            .unwrap_or(0);
        self.cycle[(index + 1) % self.cycle.len()]
    }

    /// Heading to request before `turn`, if any
    pub fn choose<R>(&self, sim: &Simulation<D, R>, turn: u32) -> Option<Direction<D>> {
        let heading = sim.heading();
        let axis = heading.axis();
        let coord = sim.head().get(axis);
        let extent = sim.lattice().dimensions()[axis];

        let near_wall = if heading.sign() > 0 {
            coord >= extent - 2
        } else {
            coord <= 1
        };
        let periodic = self.turn_every > 0 && turn % self.turn_every == 0;

        (near_wall || periodic).then(|| self.next_heading(heading))
    }
}

/// Outcome of a demo run
#[derive(Debug, Clone, PartialEq)]
pub struct DemoSummary {
    pub turns: u32,
    pub score: u32,
    pub length: usize,
    pub end_reason: Option<EndReason>,
    pub power_ups_collected: u32,
}

/// Runs a simulation without a terminal, one tick per turn
pub struct DemoMode<const D: usize> {
    sim: Simulation<D>,
    autopilot: Autopilot<D>,
    max_turns: u32,
    delay: Duration,
}

impl<const D: usize> DemoMode<D> {
    pub fn new(config: &SimConfig, max_turns: u32, delay: Duration) -> Result<Self> {
        let sim = Simulation::new(config).context("Invalid game configuration")?;
        Ok(Self {
            sim,
            autopilot: Autopilot::new(15),
            max_turns,
            delay,
        })
    }

    pub async fn run(&mut self) -> Result<DemoSummary> {
        self.sim.start().context("Failed to start demo run")?;
        info!(
            dimensions = ?self.sim.lattice().dimensions(),
            head = %self.sim.head(),
            food = %self.sim.food(),
            max_turns = self.max_turns,
            "demo started"
        );

        let mut turns = 0;
        let mut power_ups_collected = 0;

        while turns < self.max_turns && self.sim.phase() == GamePhase::Running {
            turns += 1;
            if let Some(heading) = self.autopilot.choose(&self.sim, turns) {
                self.sim.set_heading(heading);
            }

            let result = self.play_turn();

            if result.ate_food() {
                info!(
                    turn = turns,
                    food = %self.sim.food(),
                    length = self.sim.body().len(),
                    "food eaten"
                );
            }
            if result.collected_power_up() {
                power_ups_collected += 1;
                info!(turn = turns, interval = self.sim.tick_interval(), "speed boost");
            }
            if result.is_game_over() {
                info!(
                    turn = turns,
                    reason = ?self.sim.end_reason(),
                    head = %self.sim.head(),
                    "game over"
                );
            } else {
                info!(
                    turn = turns,
                    head = %self.sim.head(),
                    length = self.sim.body().len(),
                    heading = %self.sim.heading(),
                    food = %self.sim.food(),
                    power_up = ?self.sim.power_up().map(|p| p.to_string()),
                    "tick"
                );
            }

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        let summary = DemoSummary {
            turns,
            score: self.sim.score(),
            length: self.sim.body().len(),
            end_reason: self.sim.end_reason(),
            power_ups_collected,
        };
        if turns >= self.max_turns && summary.end_reason.is_none() {
            info!(max_turns = self.max_turns, "reached max turns");
        }
        info!(?summary, "demo finished");
        Ok(summary)
    }

    /// Feed the current interval until a tick lands or the run ends.
    ///
    /// A boost expiring inside `update` restores the longer base interval
    /// before the time is banked, so that call alone falls short of a tick.
    fn play_turn(&mut self) -> SimTickResult {
        loop {
            let result = self.sim.update(self.sim.tick_interval());
            if result.ticked() || self.sim.phase() != GamePhase::Running {
                return result;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, PowerUpConfig};

    #[test]
    fn test_cycle_never_reverses() {
        let autopilot = Autopilot::<3>::new(15);
        for heading in Direction::<3>::all() {
            let next = autopilot.next_heading(heading);
            assert_ne!(next, heading);
            assert!(!heading.is_opposite(next));
        }

        let autopilot = Autopilot::<2>::new(15);
        assert_eq!(autopilot.next_heading(Direction::RIGHT), Direction::DOWN);
        assert_eq!(autopilot.next_heading(Direction::DOWN), Direction::LEFT);
        assert_eq!(autopilot.next_heading(Direction::LEFT), Direction::UP);
        assert_eq!(autopilot.next_heading(Direction::UP), Direction::RIGHT);
    }

    #[test]
    fn test_turns_before_wall() {
        let config = SimConfig {
            start_position: Some(vec![17, 10]),
            seed: Some(2),
            ..SimConfig::default()
        };
        let mut sim = Simulation::<2>::new(&config).unwrap();
        sim.start().unwrap();
        let autopilot = Autopilot::new(0);

        assert_eq!(autopilot.choose(&sim, 1), None);
        sim.update(sim.tick_interval());
        assert_eq!(sim.head(), Position::new([18, 10]));
        assert_eq!(autopilot.choose(&sim, 2), Some(Direction::DOWN));
    }

    #[test]
    fn test_periodic_turn() {
        let mut sim = Simulation::<2>::new(&SimConfig {
            seed: Some(2),
            ..SimConfig::default()
        })
        .unwrap();
        sim.start().unwrap();
        let autopilot = Autopilot::new(15);

        assert_eq!(autopilot.choose(&sim, 14), None);
        assert_eq!(autopilot.choose(&sim, 15), Some(Direction::DOWN));
    }

    #[test]
    fn test_every_turn_ticks_across_boost_expiry() {
        let config = SimConfig {
            dimensions: vec![200, 3],
            seed: Some(9),
            power_up: PowerUpConfig {
                initial_spawn_delay: 100.0,
                boost_duration: 1.0,
                ..PowerUpConfig::default()
            },
            ..SimConfig::default()
        };
        let mut demo = DemoMode::<2>::new(&config, 20, Duration::ZERO).unwrap();
        demo.sim.start().unwrap();
        demo.sim.place_power_up(Position::new([101, 1]));

        let first = demo.play_turn();
        assert!(first.collected_power_up());
        assert!(demo.sim.boost_active());

        for turn in 2..=20 {
            assert!(demo.play_turn().ticked(), "turn {turn} did not tick");
        }
        assert!(!demo.sim.boost_active());
        assert_eq!(demo.sim.steps(), 20);
        assert_eq!(demo.sim.head(), Position::new([120, 1]));
    }

    #[tokio::test]
    async fn test_demo_survives_max_turns() {
        let config = SimConfig {
            seed: Some(21),
            ..SimConfig::default()
        };
        let mut demo = DemoMode::<2>::new(&config, 100, Duration::ZERO).unwrap();
        let summary = demo.run().await.unwrap();

        assert!(summary.turns <= 100);
        assert!(summary.length >= 3);
        if summary.turns < 100 {
            assert!(summary.end_reason.is_some());
        }
    }

    #[tokio::test]
    async fn test_demo_three_dimensional() {
        let config = SimConfig {
            seed: Some(4),
            ..SimConfig::new_3d(10, 10, 10)
        };
        let mut demo = DemoMode::<3>::new(&config, 50, Duration::ZERO).unwrap();
        let summary = demo.run().await.unwrap();
        assert!(summary.turns >= 1);
    }
}
