//! Named presets for batch runs
//!
//! Unknown preset names fall back to the documented default (and log a
//! warning) instead of failing, so a batch launched with a typo still runs.
//! Interactive callers that prefer strictness should check
//! [`MarketPreset::parse`] and friends, which return `None` on unknown names.

use super::{Config, MarketConfig};
use serde::{Deserialize, Serialize};

/// Clearing-price regimes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketPreset {
    Balanced,
    Hot,
    Cold,
    Volatile,
}

impl MarketPreset {
    pub const ALL: [MarketPreset; 4] = [
        MarketPreset::Balanced,
        MarketPreset::Hot,
        MarketPreset::Cold,
        MarketPreset::Volatile,
    ];

    /// Strict lookup
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "balanced" => Some(MarketPreset::Balanced),
            "hot" => Some(MarketPreset::Hot),
            "cold" => Some(MarketPreset::Cold),
            "volatile" => Some(MarketPreset::Volatile),
            _ => None,
        }
    }

    /// Lenient lookup: unknown names become `Balanced`
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::warn!(preset = name, "unknown market preset, using balanced");
            MarketPreset::Balanced
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            MarketPreset::Balanced => "balanced",
            MarketPreset::Hot => "hot",
            MarketPreset::Cold => "cold",
            MarketPreset::Volatile => "volatile",
        }
    }

    pub fn market(self) -> MarketConfig {
        match self {
            MarketPreset::Balanced => MarketConfig::default(),
            MarketPreset::Hot => MarketConfig {
                mean: 1.15,
                std: 0.15,
                min: 0.7,
                max: 1.8,
            },
            MarketPreset::Cold => MarketConfig {
                mean: 0.85,
                std: 0.12,
                min: 0.5,
                max: 1.3,
            },
            MarketPreset::Volatile => MarketConfig {
                mean: 1.0,
                std: 0.30,
                min: 0.4,
                max: 2.0,
            },
        }
    }
}

/// Weekly external credit injections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopUpPreset {
    None,
    Modest,
    Steady,
    Generous,
}

impl TopUpPreset {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Some(TopUpPreset::None),
            "modest" => Some(TopUpPreset::Modest),
            "steady" => Some(TopUpPreset::Steady),
            "generous" => Some(TopUpPreset::Generous),
            _ => None,
        }
    }

    /// Lenient lookup: unknown names become `None`
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::warn!(preset = name, "unknown top-up preset, using none");
            TopUpPreset::None
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            TopUpPreset::None => "none",
            TopUpPreset::Modest => "modest",
            TopUpPreset::Steady => "steady",
            TopUpPreset::Generous => "generous",
        }
    }

    /// Credits injected before each week's decisions
    pub fn weekly_amount(self) -> i64 {
        match self {
            TopUpPreset::None => 0,
            TopUpPreset::Modest => 5_000,
            TopUpPreset::Steady => 12_000,
            TopUpPreset::Generous => 25_000,
        }
    }
}

/// Difficulty tuning applied on top of the default economy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TuningPreset {
    Standard,
    Easy,
    Hard,
}

impl TuningPreset {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(TuningPreset::Standard),
            "easy" => Some(TuningPreset::Easy),
            "hard" => Some(TuningPreset::Hard),
            _ => None,
        }
    }

    /// Lenient lookup: unknown names become `Standard`
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or_else(|| {
            tracing::warn!(preset = name, "unknown tuning preset, using standard");
            TuningPreset::Standard
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            TuningPreset::Standard => "standard",
            TuningPreset::Easy => "easy",
            TuningPreset::Hard => "hard",
        }
    }

    /// Apply the tuning to a config in place
    pub fn apply(self, config: &mut Config) {
        match self {
            TuningPreset::Standard => {}
            TuningPreset::Easy => {
                config.starting_cash = 1_500_000;
                config.ascension.base_starting_credits = 1_500_000;
                config.idle_surcharge_multiplier = 1.25;
                config.museum.endowment_weeks = 20;
                config.museum.min_expertise = 35;
            }
            TuningPreset::Hard => {
                config.starting_cash = 750_000;
                config.ascension.base_starting_credits = 750_000;
                config.idle_surcharge_weeks = 6;
                config.museum.endowment_weeks = 32;
                config.museum.min_expertise = 65;
                config.tiers.d.premium_rate *= 1.2;
                config.tiers.c.premium_rate *= 1.2;
                config.tiers.b.premium_rate *= 1.2;
                config.tiers.a.premium_rate *= 1.2;
            }
        }
    }
}

/// Build a config from preset names (lenient)
pub fn config_from_presets(market: &str, tuning: &str) -> Config {
    let mut config = Config::default();
    TuningPreset::from_name(tuning).apply(&mut config);
    config.market = MarketPreset::from_name(market).market();
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_names_fall_back() {
        assert_eq!(MarketPreset::from_name("bubble"), MarketPreset::Balanced);
        assert_eq!(TopUpPreset::from_name(""), TopUpPreset::None);
        assert_eq!(TuningPreset::from_name("nightmare"), TuningPreset::Standard);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(MarketPreset::parse("HOT"), Some(MarketPreset::Hot));
        assert_eq!(MarketPreset::parse("bubble"), None);
    }

    #[test]
    fn test_every_preset_combination_validates() {
        for market in MarketPreset::ALL {
            for tuning in ["standard", "easy", "hard"] {
                let config = config_from_presets(market.name(), tuning);
                assert!(config.validate().is_ok(), "{} / {}", market.name(), tuning);
            }
        }
    }
}
