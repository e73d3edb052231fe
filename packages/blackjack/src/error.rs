use thiserror::Error;

use crate::Rank;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown rank '{0}', expected one of A 2 3 4 5 6 7 8 9 10 J Q K")]
pub struct ParseRankError(pub String);

#[derive(Error, Debug)]
pub enum RulesError {
    #[error("Cannot read rules file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid rules JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown preset '{0}'. Available: default, no_double, liberal")]
    UnknownPreset(String),
    #[error("max_hands must be at least 1")]
    NoHands,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Hand {hand} already holds {max} cards")]
    HandFull { hand: usize, max: usize },
    #[error("Split aces receive one card only")]
    SplitAcesOneCard,
    #[error("No hand at index {0}")]
    NoSuchHand(usize),
    #[error("Hand {hand} has no card at index {card}")]
    NoSuchCard { hand: usize, card: usize },
    #[error("Hand {0} is not a two-card pair")]
    NotSplittable(usize),
    #[error("Split limit reached ({0} hands)")]
    SplitLimit(u8),
    #[error("Resplitting {0}s is not allowed")]
    ResplitNotAllowed(Rank),
    #[error("A session needs at least one hand")]
    NoHands,
    #[error("max_hands must be at least 1")]
    ZeroHandLimit,
}
