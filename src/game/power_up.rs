use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, warn};

use super::config::PowerUpConfig;
use super::error::SimError;
use super::lattice::Lattice;
use super::placeable::{Placeable, PowerUpItem};
use super::position::Position;

/// Where the power-up cycle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpPhase {
    /// Not running: before the first start, after a run ends, or disabled
    Idle,
    /// Counting down to the next spawn attempt
    Waiting,
    /// An item is on the board
    ItemActive,
    /// A collected item is speeding up the ticks
    Boosted,
}

/// Timer transitions reported by [`PowerUpController::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent<const D: usize> {
    Spawned(Position<D>),
    BoostExpired,
}

/// Spawn countdown, item state and boost countdown.
///
/// Timers run on elapsed time, independent of the movement tick. Only one
/// item and one boost exist at a time; the spawn countdown is paused while
/// either is present.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUpController<const D: usize> {
    config: PowerUpConfig,
    item: PowerUpItem<D>,
    running: bool,
    spawn_timer: f64,
    boost_active: bool,
    boost_timer: f64,
}

impl<const D: usize> PowerUpController<D> {
    pub fn new(config: PowerUpConfig) -> Self {
        Self {
            spawn_timer: config.initial_spawn_delay,
            config,
            item: PowerUpItem::default(),
            running: false,
            boost_active: false,
            boost_timer: 0.0,
        }
    }

    pub fn config(&self) -> &PowerUpConfig {
        &self.config
    }

    /// Clear item and boost and start the initial spawn countdown
    pub fn reset(&mut self) {
        self.item.deactivate();
        self.boost_active = false;
        self.boost_timer = 0.0;
        self.spawn_timer = self.config.initial_spawn_delay;
        self.running = self.config.enabled;
    }

    /// Clear item and boost and stop all timers
    pub fn halt(&mut self) {
        self.item.deactivate();
        self.boost_active = false;
        self.boost_timer = 0.0;
        self.running = false;
    }

    pub fn phase(&self) -> PowerUpPhase {
        if !self.running {
            PowerUpPhase::Idle
        } else if self.boost_active {
            PowerUpPhase::Boosted
        } else if self.item.is_active() {
            PowerUpPhase::ItemActive
        } else {
            PowerUpPhase::Waiting
        }
    }

    /// Run the spawn and boost countdowns for `dt` seconds.
    ///
    /// `excluded` is only evaluated when a spawn is due.
    pub fn advance<R, F>(
        &mut self,
        dt: f64,
        rng: &mut R,
        lattice: &Lattice<D>,
        excluded: F,
    ) -> Option<TimerEvent<D>>
    where
        R: Rng + ?Sized,
        F: FnOnce() -> HashSet<Position<D>>,
    {
        if !self.running {
            return None;
        }

        if !self.item.is_active() && !self.boost_active {
            self.spawn_timer -= dt;
            if self.spawn_timer <= 0.0 {
                let spawned = self.item.spawn(lattice, rng, &excluded());
                // Consulted only once this item is collected or gone
                self.spawn_timer = self.config.respawn_delay.sample(rng);
                return match spawned {
                    Ok(pos) => {
                        debug!(%pos, next_attempt = self.spawn_timer, "power-up spawned");
                        Some(TimerEvent::Spawned(pos))
                    }
                    Err(SimError::BoardFull { volume }) => {
                        warn!(volume, "no free cell for power-up, skipping spawn");
                        None
                    }
                    Err(err) => {
                        warn!(%err, "power-up spawn failed");
                        None
                    }
                };
            }
        }

        if self.boost_active {
            self.boost_timer -= dt;
            if self.boost_timer <= 0.0 {
                self.boost_active = false;
                self.boost_timer = 0.0;
                self.spawn_timer = self.config.post_boost_delay.sample(rng);
                debug!(next_attempt = self.spawn_timer, "speed boost expired");
                return Some(TimerEvent::BoostExpired);
            }
        }

        None
    }

    /// Collect the item if `head` is on it, starting the boost
    pub fn try_collect(&mut self, head: Position<D>) -> bool {
        if !self.item.is_at(head) {
            return false;
        }
        self.item.deactivate();
        self.boost_active = true;
        self.boost_timer = self.config.boost_duration;
        debug!(%head, duration = self.boost_timer, "power-up collected");
        true
    }

    /// Factor the tick interval is scaled by right now
    pub fn speed_multiplier(&self) -> f64 {
        if self.boost_active {
            self.config.speed_multiplier
        } else {
            1.0
        }
    }

    pub fn effective_interval(&self, base_interval: f64) -> f64 {
        base_interval * self.speed_multiplier()
    }

    pub fn item_position(&self) -> Option<Position<D>> {
        self.item.position()
    }

    pub fn item_active(&self) -> bool {
        self.item.is_active()
    }

    pub fn boost_active(&self) -> bool {
        self.boost_active
    }

    /// Seconds of boost left, zero when not boosted
    pub fn boost_remaining(&self) -> f64 {
        self.boost_timer
    }

    /// Seconds until the next spawn attempt; frozen while an item or boost is present
    pub fn spawn_timer(&self) -> f64 {
        self.spawn_timer
    }

    #[cfg(test)]
    pub(crate) fn place_item(&mut self, pos: Position<D>) {
        self.item.place(pos);
    }
}
