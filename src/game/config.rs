use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::lattice::Lattice;
use super::position::{Direction, Position};

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Lattice extent per axis; its length is the dimension of the board
    pub dimensions: Vec<i32>,
    /// Head cell at (re)start. Centred on the lattice when absent.
    pub start_position: Option<Vec<i32>>,
    /// Initial length of the snake
    pub start_length: usize,
    /// Initial heading as a unit vector, e.g. `[1, 0]`
    pub start_heading: Vec<i32>,
    /// Seconds between ticks without a boost
    pub base_interval: f64,
    /// Seed for the sampler; drawn from entropy when absent
    pub seed: Option<u64>,
    pub power_up: PowerUpConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dimensions: vec![20, 20],
            start_position: None,
            start_length: 3,
            start_heading: vec![1, 0],
            base_interval: 0.2,
            seed: None,
            power_up: PowerUpConfig::default(),
        }
    }
}

/// Resolved, validated starting layout for a `D`-dimensional run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StartLayout<const D: usize> {
    pub lattice: Lattice<D>,
    pub head: Position<D>,
    pub heading: Direction<D>,
    pub length: usize,
}

impl SimConfig {
    /// Create a 2-D configuration with custom grid size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            dimensions: vec![width, height],
            ..Default::default()
        }
    }

    /// Create a 3-D configuration, heading along +x
    pub fn new_3d(width: i32, height: i32, depth: i32) -> Self {
        Self {
            dimensions: vec![width, height, depth],
            start_heading: vec![1, 0, 0],
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    /// Validate configuration parameters for a `D`-dimensional lattice
    pub fn validate<const D: usize>(&self) -> Result<(), ConfigError> {
        self.layout::<D>().map(|_| ())
    }

    /// Check every construction-time constraint and resolve the start layout
    pub fn layout<const D: usize>(&self) -> Result<StartLayout<D>, ConfigError> {
        let dimensions: [i32; D] = self.dimensions.as_slice().try_into().map_err(|_| {
            ConfigError::DimensionCount {
                expected: D,
                actual: self.dimensions.len(),
            }
        })?;
        let lattice = Lattice::new(dimensions)?;

        if self.start_length == 0 {
            return Err(ConfigError::ZeroStartLength);
        }
        if self.start_length as u64 >= lattice.volume() {
            return Err(ConfigError::StartLengthTooLarge {
                length: self.start_length,
                volume: lattice.volume(),
            });
        }

        let heading = Direction::from_vector(&self.start_heading)
            .ok_or_else(|| ConfigError::InvalidHeading(self.start_heading.clone()))?;

        let head = match &self.start_position {
            Some(coords) => {
                Position::from_slice(coords).ok_or(ConfigError::StartPositionShape {
                    expected: D,
                    actual: coords.len(),
                })?
            }
            None => default_start(&lattice, heading, self.start_length),
        };

        for index in 0..self.start_length {
            let position = head.moved_by(heading, -(index as i32));
            if !lattice.in_bounds(position) {
                return Err(ConfigError::SegmentOutOfBounds {
                    index,
                    position: position.to_string(),
                });
            }
        }

        finite("base_interval", self.base_interval)?;
        if self.base_interval <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "base_interval",
                value: self.base_interval,
            });
        }
        self.power_up.validate()?;

        Ok(StartLayout {
            lattice,
            head,
            heading,
            length: self.start_length,
        })
    }
}

/// Lattice centre, pushed along the heading axis so the trailing segments fit
fn default_start<const D: usize>(
    lattice: &Lattice<D>,
    heading: Direction<D>,
    length: usize,
) -> Position<D> {
    let mut coords = lattice.center().coords();
    let reach = i32::try_from(length).map_or(i32::MAX, |length| length - 1);
    let axis = heading.axis();
    coords[axis] = if heading.sign() > 0 {
        coords[axis].max(reach)
    } else {
        coords[axis].min(lattice.dimensions()[axis] - 1 - reach)
    };
    Position::new(coords)
}

/// Inclusive range of seconds a timer is redrawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min: f64,
    pub max: f64,
}

impl DelayRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..=self.max)
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        finite(name, self.min)?;
        finite(name, self.max)?;
        if self.min < 0.0 {
            return Err(ConfigError::Negative {
                name,
                value: self.min,
            });
        }
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                name,
                lo: self.min,
                hi: self.max,
            });
        }
        Ok(())
    }
}

/// Reject NaN and infinities before any ordered comparison
fn finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { name, value })
    }
}

/// Power-up spawning and speed boost tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    /// Whether power-ups appear at all
    pub enabled: bool,
    /// Seconds before the first spawn after a (re)start
    pub initial_spawn_delay: f64,
    /// Countdown drawn after each spawn, consulted once the item is gone
    pub respawn_delay: DelayRange,
    /// Countdown drawn when a boost runs out
    pub post_boost_delay: DelayRange,
    /// Seconds a boost lasts
    pub boost_duration: f64,
    /// Factor applied to the tick interval while boosted
    pub speed_multiplier: f64,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_spawn_delay: 5.0,
            respawn_delay: DelayRange::new(10.0, 20.0),
            post_boost_delay: DelayRange::new(5.0, 10.0),
            boost_duration: 5.0,
            speed_multiplier: 0.5,
        }
    }
}

impl PowerUpConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite("initial_spawn_delay", self.initial_spawn_delay)?;
        finite("boost_duration", self.boost_duration)?;
        if self.initial_spawn_delay < 0.0 {
            return Err(ConfigError::Negative {
                name: "initial_spawn_delay",
                value: self.initial_spawn_delay,
            });
        }
        self.respawn_delay.validate("respawn_delay")?;
        self.post_boost_delay.validate("post_boost_delay")?;
        if self.boost_duration <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "boost_duration",
                value: self.boost_duration,
            });
        }
        if !(self.speed_multiplier > 0.0 && self.speed_multiplier <= 1.0) {
            return Err(ConfigError::SpeedMultiplier(self.speed_multiplier));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.dimensions, vec![20, 20]);
        assert_eq!(config.start_length, 3);
        assert_eq!(config.power_up.initial_spawn_delay, 5.0);
        assert_eq!(config.power_up.speed_multiplier, 0.5);
        assert!(config.validate::<2>().is_ok());
    }

    #[test]
    fn test_default_layout_is_centred() {
        let layout = SimConfig::default().layout::<2>().unwrap();
        assert_eq!(layout.head, Position::new([10, 10]));
        assert_eq!(layout.heading, Direction::RIGHT);

        let layout = SimConfig::new_3d(10, 10, 10).layout::<3>().unwrap();
        assert_eq!(layout.head, Position::new([5, 5, 5]));
    }

    #[test]
    fn test_default_start_pushed_to_fit() {
        let config = SimConfig {
            dimensions: vec![4, 3],
            start_length: 3,
            ..Default::default()
        };
        assert_eq!(config.layout::<2>().unwrap().head, Position::new([2, 1]));

        let config = SimConfig {
            dimensions: vec![6, 3],
            start_length: 5,
            start_heading: vec![-1, 0],
            ..Default::default()
        };
        assert_eq!(config.layout::<2>().unwrap().head, Position::new([1, 1]));
    }

    #[test]
    fn test_dimension_errors() {
        let config = SimConfig::new(10, 10);
        assert_eq!(
            config.validate::<3>(),
            Err(ConfigError::DimensionCount {
                expected: 3,
                actual: 2
            })
        );
        assert!(matches!(
            SimConfig::new(0, 10).validate::<2>(),
            Err(ConfigError::NonPositiveDimension { axis: 0, value: 0 })
        ));
    }

    #[test]
    fn test_start_errors() {
        let config = SimConfig {
            start_length: 0,
            ..Default::default()
        };
        assert_eq!(config.validate::<2>(), Err(ConfigError::ZeroStartLength));

        let config = SimConfig {
            start_position: Some(vec![1, 5]),
            ..Default::default()
        };
        assert!(matches!(
            config.validate::<2>(),
            Err(ConfigError::SegmentOutOfBounds { index: 2, .. })
        ));

        let config = SimConfig {
            start_heading: vec![1, 1],
            ..Default::default()
        };
        assert!(matches!(
            config.validate::<2>(),
            Err(ConfigError::InvalidHeading(_))
        ));

        let config = SimConfig {
            dimensions: vec![3, 1],
            start_length: 3,
            ..Default::default()
        };
        assert!(matches!(
            config.validate::<2>(),
            Err(ConfigError::StartLengthTooLarge { .. })
        ));
    }

    #[test]
    fn test_timing_errors() {
        let mut config = SimConfig {
            base_interval: 0.0,
            ..Default::default()
        };
        assert!(config.validate::<2>().is_err());

        config.base_interval = 0.1;
        config.power_up.speed_multiplier = 1.5;
        assert_eq!(
            config.validate::<2>(),
            Err(ConfigError::SpeedMultiplier(1.5))
        );

        config.power_up = PowerUpConfig {
            respawn_delay: DelayRange::new(20.0, 10.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate::<2>(),
            Err(ConfigError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_non_finite_timings_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let config = SimConfig {
                base_interval: bad,
                ..Default::default()
            };
            assert!(matches!(
                config.validate::<2>(),
                Err(ConfigError::NonFinite { name: "base_interval", .. })
            ));

            let power_ups = [
                (
                    "initial_spawn_delay",
                    PowerUpConfig {
                        initial_spawn_delay: bad,
                        ..Default::default()
                    },
                ),
                (
                    "boost_duration",
                    PowerUpConfig {
                        boost_duration: bad,
                        ..Default::default()
                    },
                ),
                (
                    "respawn_delay",
                    PowerUpConfig {
                        respawn_delay: DelayRange::new(10.0, bad),
                        ..Default::default()
                    },
                ),
                (
                    "post_boost_delay",
                    PowerUpConfig {
                        post_boost_delay: DelayRange::new(bad, 10.0),
                        ..Default::default()
                    },
                ),
            ];
            for (field, power_up) in power_ups {
                let config = SimConfig {
                    power_up,
                    ..Default::default()
                };
                match config.validate::<2>() {
                    Err(ConfigError::NonFinite { name, .. }) => assert_eq!(name, field),
                    other => panic!("{field} = {bad} should be rejected, got {other:?}"),
                }
            }

            let config = SimConfig {
                power_up: PowerUpConfig {
                    speed_multiplier: bad,
                    ..Default::default()
                },
                ..Default::default()
            };
            assert!(config.validate::<2>().is_err());
        }
    }

    #[test]
    fn test_oversized_lattice_rejected() {
        let config = SimConfig::new_3d(i32::MAX, i32::MAX, i32::MAX);
        assert!(matches!(
            config.validate::<3>(),
            Err(ConfigError::LatticeTooLarge(_))
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimConfig =
            serde_json::from_str(r#"{"dimensions": [8, 6, 4], "start_heading": [0, 0, 1]}"#)
                .unwrap();
        assert_eq!(config.dimension_count(), 3);
        assert_eq!(config.start_length, 3);
        assert_eq!(config.power_up, PowerUpConfig::default());
        assert!(config.validate::<3>().is_ok());
    }
}
