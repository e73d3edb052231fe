mod card;
mod chart;
mod error;
mod hand;
mod rules;
mod session;
mod strategy;

pub use card::{parse_ranks, Rank};
pub use chart::{ChartRow, StrategyChart};
pub use error::{ParseRankError, RulesError, SessionError};
pub use hand::{
    calculate_hand_value, can_split_cards, evaluate, is_blackjack, is_busted, is_pair,
    is_soft_hand, Hand, HandEvaluation,
};
pub use rules::{RuleSet, RuleToggle};
pub use session::{Session, MAX_HAND_CARDS};
pub use strategy::{decide, decide_hand, decide_in_context, Action, Decision, HandContext};
