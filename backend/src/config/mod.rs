//! Engine configuration
//!
//! Static tunables for the collection economy. Pure data: every type is
//! serde-serializable and `Default` is the documented default economy.
//!
//! Partial JSON is accepted (`#[serde(default)]`), so an override file only
//! needs the fields it changes.
//!
//! # Example
//!
//! ```rust
//! use collection_sim_core::Config;
//!
//! let config = Config::from_json_str(r#"{ "starting_cash": 750000 }"#).unwrap();
//! assert_eq!(config.starting_cash, 750_000);
//! assert_eq!(config.max_weeks, 104);
//! ```

pub mod presets;

use crate::models::artwork::Tier;
use crate::models::npc::{Curator, CuratorTier};
use crate::models::state::AchievementTier;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// Per-tier table
// ============================================================================

/// One value per tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerTier<T> {
    pub d: T,
    pub c: T,
    pub b: T,
    pub a: T,
}

impl<T> PerTier<T> {
    pub fn get(&self, tier: Tier) -> &T {
        match tier {
            Tier::D => &self.d,
            Tier::C => &self.c,
            Tier::B => &self.b,
            Tier::A => &self.a,
        }
    }

    /// `(tier, value)` pairs, cheapest tier first
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &T)> {
        Tier::ALL.into_iter().map(move |tier| (tier, self.get(tier)))
    }
}

// ============================================================================
// Configuration Types
// ============================================================================

/// Economics of one tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Lowest insured value generated for this tier (inclusive)
    pub iv_min: i64,
    /// Highest insured value generated for this tier (inclusive)
    pub iv_max: i64,
    /// Weekly insurance premium as a share of insured value
    pub premium_rate: f64,
    /// Flat weekly storage fee
    pub storage_fee: i64,
    /// Auction lots supplied per week
    pub lots_per_week: u32,
    /// Weekly chance that a curator asks to borrow an unencumbered piece
    pub loan_offer_probability: f64,
}

/// Clearing-price distribution (fraction of insured value)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            mean: 1.0,
            std: 0.15,
            min: 0.6,
            max: 1.5,
        }
    }
}

/// One row of the curator table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratorConfig {
    pub tier: CuratorTier,
    /// Relative selection weight
    pub weight: f64,
    /// Loan fee as a share of insured value
    pub fee_rate: f64,
    /// Expertise granted on acceptance
    pub expertise_reward: u32,
}

impl CuratorConfig {
    pub fn curator(&self) -> Curator {
        Curator {
            tier: self.tier,
            fee_rate: self.fee_rate,
            expertise_reward: self.expertise_reward,
        }
    }
}

/// Curator loan schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanConfig {
    pub min_weeks: u32,
    pub max_weeks: u32,
    /// Premium reduction while an artwork is on loan (0.5 = half price)
    pub premium_reduction: f64,
    pub curators: Vec<CuratorConfig>,
}

impl Default for LoanConfig {
    fn default() -> Self {
        Self {
            min_weeks: 4,
            max_weeks: 12,
            premium_reduction: 0.5,
            curators: vec![
                CuratorConfig {
                    tier: CuratorTier::Regional,
                    weight: 0.6,
                    fee_rate: 0.010,
                    expertise_reward: 1,
                },
                CuratorConfig {
                    tier: CuratorTier::National,
                    weight: 0.3,
                    fee_rate: 0.020,
                    expertise_reward: 2,
                },
                CuratorConfig {
                    tier: CuratorTier::International,
                    weight: 0.1,
                    fee_rate: 0.040,
                    expertise_reward: 3,
                },
            ],
        }
    }
}

/// Mortgage terms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageConfig {
    /// Principal as a share of insured value
    pub ltv_rate: f64,
    pub weekly_interest_rate: f64,
    pub term_weeks: u32,
    pub max_concurrent: u32,
}

impl Default for MortgageConfig {
    fn default() -> Self {
        Self {
            ltv_rate: 0.5,
            weekly_interest_rate: 0.005,
            term_weeks: 12,
            max_concurrent: 3,
        }
    }
}

/// Transaction fees and dealer rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Added on top of the hammer price when buying a lot
    pub buyer_premium: f64,
    /// Deducted from consignment proceeds
    pub seller_fee: f64,
    /// Share of insured value a dealer pays outright
    pub dealer_buy_rate: f64,
    /// Guaranteed minimum share of insured value for a consignment
    pub backstop_rate: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            buyer_premium: 0.10,
            seller_fee: 0.10,
            dealer_buy_rate: 0.60,
            backstop_rate: 0.70,
        }
    }
}

/// Hard gate for founding a museum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuseumThresholds {
    pub min_per_tier: PerTier<u32>,
    pub min_total: u32,
    pub min_tag_diversity: u32,
    /// Cash must cover this many weeks of normal (no-loan) carry
    pub endowment_weeks: u32,
    pub min_expertise: u32,
}

impl Default for MuseumThresholds {
    fn default() -> Self {
        Self {
            min_per_tier: PerTier { d: 2, c: 2, b: 1, a: 1 },
            min_total: 8,
            min_tag_diversity: 6,
            endowment_weeks: 26,
            min_expertise: 50,
        }
    }
}

/// Thresholds for one achievement tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementThreshold {
    pub tier: AchievementTier,
    pub min_artworks: u32,
    pub min_tag_diversity: u32,
    /// Artworks of tier B or above
    pub min_b_plus: u32,
    pub min_a: u32,
}

/// Ascension reset parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AscensionConfig {
    pub base_starting_credits: i64,
    pub bonus_per_museum: i64,
    /// Foundings beyond this count add no further bonus
    pub max_bonus_museums: u32,
    pub gift_starting_artwork: bool,
}

impl Default for AscensionConfig {
    fn default() -> Self {
        Self {
            base_starting_credits: 1_000_000,
            bonus_per_museum: 250_000,
            max_bonus_museums: 4,
            gift_starting_artwork: true,
        }
    }
}

/// Surprise package definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageConfig {
    pub name: String,
    pub cost: i64,
    /// Relative payout weight per tier
    pub tier_weights: PerTier<f64>,
}

/// Weekly trivia
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    pub enabled: bool,
    pub expertise_reward: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            expertise_reward: 5,
        }
    }
}

/// Whether founding a museum ends the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MuseumMode {
    /// Ascension resets the collection and the run continues
    Continue,
    /// First founding is terminal (`Outcome::Museum`)
    EndRun,
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub starting_cash: i64,
    pub max_weeks: u32,
    pub tiers: PerTier<TierConfig>,
    pub market: MarketConfig,
    pub loans: LoanConfig,
    pub mortgage: MortgageConfig,
    pub fees: FeeSchedule,
    pub museum: MuseumThresholds,
    /// Ascending: exhibition, gallery, wing
    pub achievements: Vec<AchievementThreshold>,
    pub ascension: AscensionConfig,
    /// Idle weeks at which the surcharge starts applying
    pub idle_surcharge_weeks: u32,
    pub idle_surcharge_multiplier: f64,
    pub packages: Vec<PackageConfig>,
    pub quiz: QuizConfig,
    pub max_acquisitions_per_week: u32,
    pub museum_mode: MuseumMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_cash: 1_000_000,
            max_weeks: 104,
            tiers: PerTier {
                d: TierConfig {
                    iv_min: 5_000,
                    iv_max: 24_999,
                    premium_rate: 0.010,
                    storage_fee: 100,
                    lots_per_week: 4,
                    loan_offer_probability: 0.05,
                },
                c: TierConfig {
                    iv_min: 25_000,
                    iv_max: 99_999,
                    premium_rate: 0.012,
                    storage_fee: 300,
                    lots_per_week: 3,
                    loan_offer_probability: 0.10,
                },
                b: TierConfig {
                    iv_min: 100_000,
                    iv_max: 499_999,
                    premium_rate: 0.015,
                    storage_fee: 1_000,
                    lots_per_week: 2,
                    loan_offer_probability: 0.15,
                },
                a: TierConfig {
                    iv_min: 500_000,
                    iv_max: 2_000_000,
                    premium_rate: 0.018,
                    storage_fee: 2_500,
                    lots_per_week: 1,
                    loan_offer_probability: 0.20,
                },
            },
            market: MarketConfig::default(),
            loans: LoanConfig::default(),
            mortgage: MortgageConfig::default(),
            fees: FeeSchedule::default(),
            museum: MuseumThresholds::default(),
            achievements: vec![
                AchievementThreshold {
                    tier: AchievementTier::Exhibition,
                    min_artworks: 3,
                    min_tag_diversity: 3,
                    min_b_plus: 0,
                    min_a: 0,
                },
                AchievementThreshold {
                    tier: AchievementTier::Gallery,
                    min_artworks: 6,
                    min_tag_diversity: 5,
                    min_b_plus: 2,
                    min_a: 0,
                },
                AchievementThreshold {
                    tier: AchievementTier::Wing,
                    min_artworks: 10,
                    min_tag_diversity: 8,
                    min_b_plus: 4,
                    min_a: 1,
                },
            ],
            ascension: AscensionConfig::default(),
            idle_surcharge_weeks: 8,
            idle_surcharge_multiplier: 1.5,
            packages: vec![
                PackageConfig {
                    name: "crate".to_string(),
                    cost: 40_000,
                    tier_weights: PerTier {
                        d: 0.70,
                        c: 0.25,
                        b: 0.05,
                        a: 0.0,
                    },
                },
                PackageConfig {
                    name: "vault".to_string(),
                    cost: 150_000,
                    tier_weights: PerTier {
                        d: 0.20,
                        c: 0.45,
                        b: 0.30,
                        a: 0.05,
                    },
                },
            ],
            quiz: QuizConfig::default(),
            max_acquisitions_per_week: 3,
            museum_mode: MuseumMode::Continue,
        }
    }
}

impl Config {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Economics for a tier
    pub fn tier(&self, tier: Tier) -> &TierConfig {
        self.tiers.get(tier)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(msg: String) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(msg))
        }

        if self.starting_cash <= 0 {
            return invalid("starting_cash must be > 0".to_string());
        }
        if self.max_weeks == 0 {
            return invalid("max_weeks must be > 0".to_string());
        }

        for (tier, tc) in self.tiers.iter() {
            if tc.iv_min <= 0 || tc.iv_min > tc.iv_max {
                return invalid(format!("tier {}: iv range {}..={} is empty", tier, tc.iv_min, tc.iv_max));
            }
            if Tier::from_insured_value(tc.iv_min) != tier || Tier::from_insured_value(tc.iv_max) != tier {
                return invalid(format!("tier {}: iv range crosses a tier threshold", tier));
            }
            if !(0.0..=1.0).contains(&tc.loan_offer_probability) {
                return invalid(format!("tier {}: loan_offer_probability must be in [0, 1]", tier));
            }
            if tc.premium_rate < 0.0 || tc.storage_fee < 0 {
                return invalid(format!("tier {}: premium and storage must be >= 0", tier));
            }
        }

        let m = &self.market;
        if m.min > m.max || m.std < 0.0 || m.min <= 0.0 {
            return invalid("market distribution must have 0 < min <= max and std >= 0".to_string());
        }

        if self.loans.min_weeks == 0 || self.loans.min_weeks > self.loans.max_weeks {
            return invalid("loan duration range must be non-empty and start above 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.loans.premium_reduction) {
            return invalid("loan premium_reduction must be in [0, 1]".to_string());
        }
        if self.loans.curators.is_empty() || self.loans.curators.iter().all(|c| c.weight <= 0.0) {
            return invalid("curator table needs at least one positive weight".to_string());
        }

        if self.mortgage.term_weeks == 0 {
            return invalid("mortgage term_weeks must be > 0".to_string());
        }

        if self.idle_surcharge_multiplier < 1.0 {
            return invalid("idle_surcharge_multiplier must be >= 1".to_string());
        }

        let tiers: Vec<AchievementTier> = self.achievements.iter().map(|a| a.tier).collect();
        if tiers.windows(2).any(|w| w[0] >= w[1]) {
            return invalid("achievement thresholds must be listed in ascending tier order".to_string());
        }

        for package in &self.packages {
            if package.cost <= 0 {
                return invalid(format!("package '{}': cost must be > 0", package.name));
            }
            if package.tier_weights.iter().map(|(_, w)| *w).sum::<f64>() <= 0.0 {
                return invalid(format!("package '{}': needs a positive tier weight", package.name));
            }
        }

        Ok(())
    }
}
