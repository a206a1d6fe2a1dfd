//! Museum Founder / Ascension
//!
//! Founding is a hard gate checked in one place ([`check_museum`]) and a
//! reset applied in another ([`execute_ascension`]). The reset keeps the
//! run's week and seed: the run continues with a fresh collection and a
//! cash bonus that grows with each museum (capped).

use crate::config::Config;
use crate::costs::normal_total_weekly_carry;
use crate::market::draw_piece;
use crate::models::{Artwork, Event, RunState, Tier};
use crate::progression::achievement::CollectionProfile;
use crate::rng::{Prng, Stream};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Week offset for the ascension gift draw, far past any real week so it
/// never lines up with a normal weekly draw
pub const GIFT_WEEK_OFFSET: u32 = 10_000;

/// One unmet museum threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MuseumShortfall {
    TierCount { tier: Tier, have: u32, need: u32 },
    TotalCount { have: u32, need: u32 },
    TagDiversity { have: u32, need: u32 },
    ActiveMortgages { count: u32 },
    Endowment { have: i64, need: i64 },
    Expertise { have: u32, need: u32 },
}

impl fmt::Display for MuseumShortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MuseumShortfall::TierCount { tier, have, need } => {
                write!(f, "tier {} artworks {}/{}", tier, have, need)
            }
            MuseumShortfall::TotalCount { have, need } => write!(f, "artworks {}/{}", have, need),
            MuseumShortfall::TagDiversity { have, need } => write!(f, "distinct tags {}/{}", have, need),
            MuseumShortfall::ActiveMortgages { count } => write!(f, "{} active mortgage(s)", count),
            MuseumShortfall::Endowment { have, need } => write!(f, "endowment {}/{}", have, need),
            MuseumShortfall::Expertise { have, need } => write!(f, "expertise {}/{}", have, need),
        }
    }
}

/// Result of an eligibility check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuseumCheck {
    pub eligible: bool,
    /// Cash required: `endowment_weeks * normal weekly carry`
    pub endowment_required: i64,
    pub shortfalls: Vec<MuseumShortfall>,
}

/// Check every museum threshold at once
pub fn check_museum(state: &RunState, config: &Config) -> MuseumCheck {
    let thresholds = &config.museum;
    let profile = CollectionProfile::of(&state.artworks);
    let mut shortfalls = Vec::new();

    for (tier, need) in thresholds.min_per_tier.iter() {
        let have = profile.count(tier);
        if have < *need {
            shortfalls.push(MuseumShortfall::TierCount {
                tier,
                have,
                need: *need,
            });
        }
    }
    if profile.total < thresholds.min_total {
        shortfalls.push(MuseumShortfall::TotalCount {
            have: profile.total,
            need: thresholds.min_total,
        });
    }
    if profile.tag_diversity < thresholds.min_tag_diversity {
        shortfalls.push(MuseumShortfall::TagDiversity {
            have: profile.tag_diversity,
            need: thresholds.min_tag_diversity,
        });
    }

    let mortgaged = state.mortgaged_count() as u32;
    if mortgaged > 0 {
        shortfalls.push(MuseumShortfall::ActiveMortgages { count: mortgaged });
    }

    let endowment_required =
        thresholds.endowment_weeks as i64 * normal_total_weekly_carry(&state.artworks, config);
    if state.cash < endowment_required {
        shortfalls.push(MuseumShortfall::Endowment {
            have: state.cash,
            need: endowment_required,
        });
    }

    if state.expertise < thresholds.min_expertise {
        shortfalls.push(MuseumShortfall::Expertise {
            have: state.expertise,
            need: thresholds.min_expertise,
        });
    }

    MuseumCheck {
        eligible: shortfalls.is_empty(),
        endowment_required,
        shortfalls,
    }
}

/// What ascension did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AscensionResult {
    pub museums_founded: u32,
    pub new_cash: i64,
    pub gift: Option<Artwork>,
    pub events: Vec<Event>,
}

/// Apply the ascension reset. Callers must have checked eligibility.
///
/// Week and seed are left untouched.
pub fn execute_ascension(state: &mut RunState, config: &Config) -> AscensionResult {
    let ascension = &config.ascension;
    let week = state.week;

    state.museums_founded += 1;
    if state.first_museum_week.is_none() {
        state.first_museum_week = Some(week);
    }
    state.artworks.clear();
    state.loan_offers.clear();

    let bonus_count = state.museums_founded.min(ascension.max_bonus_museums) as i64;
    state.cash = ascension.base_starting_credits + bonus_count * ascension.bonus_per_museum;

    let mut events = vec![Event::MuseumFounded {
        week,
        museums_founded: state.museums_founded,
        new_cash: state.cash,
    }];

    let gift = if ascension.gift_starting_artwork {
        let mut rng = Prng::for_week(state.seed, week.wrapping_add(GIFT_WEEK_OFFSET), Stream::Gift);
        let (iv, tags) = draw_piece(&mut rng, config.tier(Tier::D));
        let id = state.allocate_artwork_id();
        let title = crate::models::artwork::make_title(&tags, id);
        let artwork = Artwork::new(id, title, iv, tags, week, 0);
        state.artworks.push(artwork.clone());
        events.push(Event::ArtworkGifted {
            week,
            artwork_id: id,
        });
        Some(artwork)
    } else {
        None
    };

    tracing::info!(
        week,
        museums_founded = state.museums_founded,
        cash = state.cash,
        "museum founded"
    );

    AscensionResult {
        museums_founded: state.museums_founded,
        new_cash: state.cash,
        gift,
        events,
    }
}
