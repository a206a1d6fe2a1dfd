//! Surprise packages
//!
//! A package costs a fixed amount and pays out one artwork whose tier is
//! drawn from the package's weight table. Draws come from the `Package`
//! stream of the current week, disambiguated by the run's running count of
//! opened packages so two packages bought in one week differ.

use super::draw_piece;
use crate::config::{Config, PackageConfig};
use crate::models::Tier;
use crate::rng::{Prng, Stream};

/// Contents of an opened package
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDraw {
    pub tier: Tier,
    pub iv: i64,
    pub tags: Vec<String>,
}

/// Open `package` deterministically
pub fn draw_package(
    config: &Config,
    package: &PackageConfig,
    seed: u32,
    week: u32,
    packages_opened: u32,
) -> Option<PackageDraw> {
    let mut rng = Prng::for_week_with(seed, week, Stream::Package, packages_opened);
    let weights: Vec<f64> = package.tier_weights.iter().map(|(_, w)| *w).collect();
    let tier = *rng.weighted_choice(&Tier::ALL, &weights)?;
    let (iv, tags) = draw_piece(&mut rng, config.tier(tier));
    Some(PackageDraw { tier, iv, tags })
}
