//! Domain models for the collection economy

pub mod artwork;
pub mod event;
pub mod market;
pub mod npc;
pub mod state;

// Re-exports
pub use artwork::{Artwork, Tier, TAG_CATALOGUE};
pub use event::Event;
pub use market::{AuctionLot, LoanOffer, QuizQuestion};
pub use npc::{Critic, Curator, CuratorTier, Dealer, Npc};
pub use state::{AchievementTier, Outcome, RunState};
