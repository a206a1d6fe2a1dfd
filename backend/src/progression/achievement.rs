//! Achievement Evaluator
//!
//! A stateless function of the current collection. It is recomputed after
//! every tick and every decision, and may go down as well as up: selling or
//! losing artworks can drop a collection back to a lower tier.

use crate::config::{AchievementThreshold, Config};
use crate::models::{AchievementTier, Artwork, Tier};
use std::collections::BTreeSet;

/// Shape of a collection as seen by the thresholds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionProfile {
    /// Artworks per tier, indexed by `Tier::index()`
    pub per_tier: [u32; 4],
    /// Artworks of tier B or above
    pub b_plus: u32,
    pub total: u32,
    pub tag_diversity: u32,
}

impl CollectionProfile {
    pub fn of(artworks: &[Artwork]) -> Self {
        let mut per_tier = [0u32; 4];
        let mut tags = BTreeSet::new();
        for art in artworks {
            per_tier[art.tier.index()] += 1;
            tags.extend(art.tags.iter().map(String::as_str));
        }
        Self {
            per_tier,
            b_plus: per_tier[Tier::B.index()] + per_tier[Tier::A.index()],
            total: artworks.len() as u32,
            tag_diversity: tags.len() as u32,
        }
    }

    pub fn count(&self, tier: Tier) -> u32 {
        self.per_tier[tier.index()]
    }

    fn meets(&self, threshold: &AchievementThreshold) -> bool {
        self.total >= threshold.min_artworks
            && self.tag_diversity >= threshold.min_tag_diversity
            && self.b_plus >= threshold.min_b_plus
            && self.count(Tier::A) >= threshold.min_a
    }
}

/// Highest achievement tier whose thresholds are all met
pub fn evaluate_achievement(artworks: &[Artwork], config: &Config) -> Option<AchievementTier> {
    let profile = CollectionProfile::of(artworks);
    config
        .achievements
        .iter()
        .filter(|t| profile.meets(t))
        .map(|t| t.tier)
        .max()
}
