//! Engine configuration.
//!
//! Defaults reproduce the reference growth dynamics: 1000 cells, 432 ticks
//! per second, random concept vectors, and the 0.8 / 0.4–0.6 / 0.3
//! resonance bands.

use crate::error::{HolocellError, Result};
use crate::memory::MAX_CELLS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default evolution frequency in ticks per second.
pub const DEFAULT_FREQUENCY_HZ: f64 = 432.0;

/// How a concept string becomes a hypervector on inject and query.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConceptEncoding {
    /// A fresh random vector every time. A query can never hit the
    /// injected cell exactly; it only finds whatever resonates best.
    #[default]
    Random,
    /// Hash-seeded vector: the same concept always maps to the same bits.
    Hashed { seed: u64 },
}

/// Resonance bands and rates driving one tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthRules {
    /// Above this a cell bundles its best match and gains energy.
    pub high_resonance: f64,
    /// Exclusive lower edge of the synthesis band.
    pub synthesis_low: f64,
    /// Exclusive upper edge of the synthesis band.
    pub synthesis_high: f64,
    /// Below this a cell pays the competition penalty.
    pub competition_threshold: f64,
    pub bundle_bonus: f64,
    pub competition_penalty: f64,
    /// Spatial radius for diffusion neighbors.
    pub neighbor_radius: f64,
    pub max_neighbors: usize,
}

impl Default for GrowthRules {
    fn default() -> Self {
        Self {
            high_resonance: 0.8,
            synthesis_low: 0.4,
            synthesis_high: 0.6,
            competition_threshold: 0.3,
            bundle_bonus: 0.1,
            competition_penalty: 0.05,
            neighbor_radius: 20.0,
            max_neighbors: 5,
        }
    }
}

impl GrowthRules {
    fn validate(&self) -> Result<()> {
        let bands = [
            self.competition_threshold,
            self.synthesis_low,
            self.synthesis_high,
            self.high_resonance,
        ];
        if bands.iter().any(|b| !(0.0..=1.0).contains(b)) {
            return Err(invalid("resonance thresholds must lie in [0, 1]"));
        }
        if !(self.competition_threshold <= self.synthesis_low
            && self.synthesis_low < self.synthesis_high
            && self.synthesis_high <= self.high_resonance)
        {
            return Err(invalid(
                "thresholds must satisfy competition <= synthesis_low < synthesis_high <= high",
            ));
        }
        if !(self.bundle_bonus >= 0.0 && self.competition_penalty >= 0.0) {
            return Err(invalid("energy rates must be non-negative"));
        }
        if !(self.neighbor_radius >= 0.0 && self.neighbor_radius.is_finite()) {
            return Err(invalid("neighbor_radius must be finite and non-negative"));
        }
        Ok(())
    }
}

/// Evolution engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Population bound.
    pub max_cells: usize,
    /// Target tick rate.
    pub frequency_hz: f64,
    /// Seed for the engine's random source; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub concept_encoding: ConceptEncoding,
    pub rules: GrowthRules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_cells: MAX_CELLS,
            frequency_hz: DEFAULT_FREQUENCY_HZ,
            seed: None,
            concept_encoding: ConceptEncoding::Random,
            rules: GrowthRules::default(),
        }
    }
}

impl EngineConfig {
    /// Default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Target wall-clock time per tick.
    ///
    /// Saturates at [`Duration::MAX`] for frequencies [`validate`](Self::validate)
    /// would reject.
    pub fn tick_period(&self) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.frequency_hz).unwrap_or(Duration::MAX)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_cells == 0 {
            return Err(invalid("max_cells must be at least 1"));
        }
        if !(self.frequency_hz.is_finite() && self.frequency_hz > 0.0) {
            return Err(invalid("frequency_hz must be finite and positive"));
        }
        if Duration::try_from_secs_f64(1.0 / self.frequency_hz).is_err() {
            return Err(invalid("frequency_hz too small for a representable tick period"));
        }
        self.rules.validate()
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max_cells={} frequency={}Hz period={:.3}ms",
            self.max_cells,
            self.frequency_hz,
            self.tick_period().as_secs_f64() * 1000.0
        )?;
        match self.seed {
            Some(seed) => write!(f, " seed={}", seed)?,
            None => write!(f, " seed=entropy")?,
        }
        match self.concept_encoding {
            ConceptEncoding::Random => write!(f, " encoding=random"),
            ConceptEncoding::Hashed { seed } => write!(f, " encoding=hashed({})", seed),
        }
    }
}

fn invalid(msg: &str) -> HolocellError {
    HolocellError::InvalidConfig(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_cells, 1000);
        let period = config.tick_period().as_secs_f64() * 1000.0;
        assert!((period - 2.3148).abs() < 1e-3, "got {}", period);
    }

    #[test]
    fn test_display() {
        let text = EngineConfig::seeded(7).to_string();
        assert_eq!(
            text,
            "max_cells=1000 frequency=432Hz period=2.315ms seed=7 encoding=random"
        );
    }

    #[test]
    fn test_from_json_partial() {
        let config = EngineConfig::from_json(
            r#"{"max_cells": 50, "concept_encoding": {"kind": "hashed", "seed": 3}}"#,
        )
        .unwrap();
        assert_eq!(config.max_cells, 50);
        assert_eq!(config.frequency_hz, DEFAULT_FREQUENCY_HZ);
        assert_eq!(config.concept_encoding, ConceptEncoding::Hashed { seed: 3 });
        assert_eq!(config.rules, GrowthRules::default());
    }

    #[test]
    fn test_from_json_malformed() {
        let err = EngineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, HolocellError::ConfigParse(_)));
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = EngineConfig::from_json(r#"{"max_cells": 0}"#).unwrap_err();
        assert!(matches!(err, HolocellError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_bad_frequency() {
        let mut config = EngineConfig::default();
        config.frequency_hz = 0.0;
        assert!(config.validate().is_err());
        config.frequency_hz = f64::INFINITY;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unrepresentable_frequency() {
        let err = EngineConfig::from_json(r#"{"frequency_hz": 1e-30}"#).unwrap_err();
        assert!(matches!(err, HolocellError::InvalidConfig(_)));

        let config = EngineConfig {
            frequency_hz: 1e-30,
            ..EngineConfig::default()
        };
        assert_eq!(config.tick_period(), Duration::MAX);
        assert!(config.to_string().starts_with("max_cells=1000"));
    }

    #[test]
    fn test_rejects_misordered_bands() {
        let mut config = EngineConfig::default();
        config.rules.synthesis_low = 0.7;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.rules.high_resonance = 1.5;
        assert!(config.validate().is_err());
    }
}
