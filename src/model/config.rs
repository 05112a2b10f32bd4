//! # Pipeline Configuration
//!
//! Pool sizes and timings for a [`MiningSystem`](crate::lifecycle::MiningSystem).
//! The binary always runs with [`PipelineConfig::default()`], which carries the
//! compile-time constants below; tests substitute fixed delays and cycle limits.

use super::error::ConfigError;
use super::Role;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of explorer workers.
pub const NUM_EXPLORERS: usize = 2;
/// Number of extractor workers.
pub const NUM_EXTRACTORS: usize = 3;
/// Number of transporter workers.
pub const NUM_TRANSPORTERS: usize = 3;

/// Duration of one unit of simulated work.
///
/// `Uniform` bounds are inclusive and sampled at millisecond granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Delay {
    Fixed(Duration),
    Uniform { min: Duration, max: Duration },
}

impl Delay {
    pub fn fixed_secs(secs: u64) -> Self {
        Delay::Fixed(Duration::from_secs(secs))
    }

    pub fn uniform_secs(min: u64, max: u64) -> Self {
        Delay::Uniform {
            min: Duration::from_secs(min),
            max: Duration::from_secs(max),
        }
    }

    /// Draws the next duration.
    pub fn sample(&self) -> Duration {
        match *self {
            Delay::Fixed(duration) => duration,
            Delay::Uniform { min, max } => {
                // Bounds past u64::MAX milliseconds saturate instead of wrapping.
                let low = u64::try_from(min.as_millis()).unwrap_or(u64::MAX);
                let high = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
                Duration::from_millis(rand::rng().random_range(low..=high))
            }
        }
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        match *self {
            Delay::Uniform { min, max } if min > max => {
                Err(ConfigError::InvalidDelay { name, min, max })
            }
            _ => Ok(()),
        }
    }
}

/// Inclusive range of quantities an extraction can yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldRange {
    pub min: u32,
    pub max: u32,
}

impl YieldRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, quantity: u32) -> bool {
        (self.min..=self.max).contains(&quantity)
    }

    pub fn sample(&self) -> u32 {
        rand::rng().random_range(self.min..=self.max)
    }
}

impl Default for YieldRange {
    fn default() -> Self {
        Self::new(1, 6)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub explorers: usize,
    pub extractors: usize,
    pub transporters: usize,
    /// Time an explorer spends before finding a target.
    pub explore_delay: Delay,
    /// Time an extractor spends on one discovery.
    pub extraction_delay: Delay,
    /// Time a transporter spends on one extraction. Never randomized.
    pub transport_time: Duration,
    pub yield_range: YieldRange,
    /// Stops each explorer after this many discoveries. `None` runs forever.
    pub explorer_cycles: Option<u32>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            explorers: NUM_EXPLORERS,
            extractors: NUM_EXTRACTORS,
            transporters: NUM_TRANSPORTERS,
            explore_delay: Delay::uniform_secs(2, 4),
            extraction_delay: Delay::uniform_secs(2, 5),
            transport_time: Duration::from_secs(4),
            yield_range: YieldRange::default(),
            explorer_cycles: None,
        }
    }
}

impl PipelineConfig {
    /// Number of workers configured for `role`.
    pub fn pool_size(&self, role: Role) -> usize {
        match role {
            Role::Explorer => self.explorers,
            Role::Extractor => self.extractors,
            Role::Transporter => self.transporters,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for role in [Role::Explorer, Role::Extractor, Role::Transporter] {
            if self.pool_size(role) == 0 {
                return Err(ConfigError::EmptyPool(role));
            }
        }
        self.explore_delay.validate("explore_delay")?;
        self.extraction_delay.validate("extraction_delay")?;
        if self.yield_range.min > self.yield_range.max {
            return Err(ConfigError::InvalidYieldRange {
                min: self.yield_range.min,
                max: self.yield_range.max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_huge_uniform_bounds_saturate() {
        let ceiling = Duration::from_millis(u64::MAX);
        let pinned = Delay::Uniform {
            min: Duration::MAX,
            max: Duration::MAX,
        };
        assert_eq!(pinned.sample(), ceiling);

        let open = Delay::Uniform {
            min: Duration::from_secs(1),
            max: Duration::MAX,
        };
        for _ in 0..100 {
            let sampled = open.sample();
            assert!(sampled >= Duration::from_secs(1) && sampled <= ceiling);
        }
    }

    #[test]
    fn test_default_config_uses_constants() {
        let config = PipelineConfig::default();
        assert_eq!(config.pool_size(Role::Explorer), 2);
        assert_eq!(config.pool_size(Role::Extractor), 3);
        assert_eq!(config.pool_size(Role::Transporter), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_pool_is_rejected() {
        let config = PipelineConfig {
            transporters: 0,
            ..PipelineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyPool(Role::Transporter))
        );
    }

    #[test]
    fn test_inverted_ranges_are_rejected() {
        let config = PipelineConfig {
            extraction_delay: Delay::uniform_secs(5, 2),
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDelay {
                name: "extraction_delay",
                ..
            })
        ));

        let config = PipelineConfig {
            yield_range: YieldRange::new(6, 1),
            ..PipelineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidYieldRange { min: 6, max: 1 })
        ));
    }

    #[test]
    fn test_samples_stay_in_bounds() {
        let delay = Delay::uniform_secs(2, 4);
        let range = YieldRange::default();
        for _ in 0..200 {
            let d = delay.sample();
            assert!(d >= Duration::from_secs(2) && d <= Duration::from_secs(4));
            assert!(range.contains(range.sample()));
        }
        assert_eq!(Delay::fixed_secs(4).sample(), Duration::from_secs(4));
    }
}
