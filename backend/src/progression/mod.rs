//! Collection progression: achievement tiers and museum founding

pub mod achievement;
pub mod museum;

pub use achievement::{evaluate_achievement, CollectionProfile};
pub use museum::{
    check_museum, execute_ascension, AscensionResult, MuseumCheck, MuseumShortfall,
    GIFT_WEEK_OFFSET,
};
