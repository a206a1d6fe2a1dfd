//! Non-player characters the collector deals with
//!
//! Each role carries only the fields that role needs. Callers resolve
//! role-specific behaviour by matching on [`Npc`] rather than probing
//! free-form payloads.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Curator prestige tier (drives offer weight, fee rate and expertise gain)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CuratorTier {
    Regional,
    National,
    International,
}

impl fmt::Display for CuratorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CuratorTier::Regional => "regional",
            CuratorTier::National => "national",
            CuratorTier::International => "international",
        };
        write!(f, "{}", label)
    }
}

/// Museum curator asking to borrow an artwork
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curator {
    pub tier: CuratorTier,
    /// Share of insured value paid as loan fee
    pub fee_rate: f64,
    /// Expertise granted when the loan is accepted
    pub expertise_reward: u32,
}

/// Dealer who buys artworks outright
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dealer {
    /// Share of insured value paid on a direct buy-back
    pub buy_rate: f64,
    /// Guaranteed share of insured value for an unsold consignment
    pub backstop_rate: f64,
}

/// Critic posing the weekly trivia question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Critic {
    /// Expertise granted for a correct answer
    pub expertise_reward: u32,
}

/// Counterparty of an economic event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Npc {
    Curator(Curator),
    Dealer(Dealer),
    Critic(Critic),
}

impl Npc {
    /// Short caller-visible description of the counterparty
    pub fn describe(&self) -> String {
        match self {
            Npc::Curator(c) => format!("{} curator", c.tier),
            Npc::Dealer(d) => format!("dealer (buys at {:.0}% of IV)", d.buy_rate * 100.0),
            Npc::Critic(_) => "critic".to_string(),
        }
    }
}
