use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// Table rule toggles, supplied by the caller for every decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Dealer hits soft 17. The chart is built for S17 and ignores this.
    pub dealer_hits_soft_17: bool,

    /// Doubling down is offered at all
    pub allow_double: bool,

    /// Allow doubling after split
    pub allow_das: bool,

    /// Allow splitting a hand that itself came from a split
    pub allow_resplit: bool,

    /// Split aces get exactly one more card and must stand
    pub split_aces_one_card: bool,

    /// Maximum number of hands a split may grow to
    pub max_hands: u8,
}

impl Default for RuleSet {
    fn default() -> Self {
        // Single deck, dealer stands on soft 17
        Self {
            dealer_hits_soft_17: false,
            allow_double: true,
            allow_das: true,
            allow_resplit: false,
            split_aces_one_card: true,
            max_hands: 4,
        }
    }
}

impl RuleSet {
    /// Same table without doubling down
    pub fn no_double() -> Self {
        Self {
            allow_double: false,
            allow_das: false,
            ..Self::default()
        }
    }

    /// Resplit to four hands, split aces may be played out
    pub fn liberal() -> Self {
        Self {
            allow_resplit: true,
            split_aces_one_card: false,
            max_hands: 4,
            ..Self::default()
        }
    }

    pub fn preset(name: &str) -> Result<Self, RulesError> {
        match name.to_lowercase().replace('-', "_").as_str() {
            "default" => Ok(Self::default()),
            "no_double" => Ok(Self::no_double()),
            "liberal" => Ok(Self::liberal()),
            _ => Err(RulesError::UnknownPreset(name.to_string())),
        }
    }

    pub fn validate(self) -> Result<Self, RulesError> {
        if self.max_hands == 0 {
            return Err(RulesError::NoHands);
        }
        Ok(self)
    }

    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        serde_json::from_str::<Self>(json)?.validate()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, RulesError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Hand count a split may not exceed, after the resplit toggle is applied
    pub fn hand_limit(&self) -> u8 {
        if self.allow_resplit {
            self.max_hands
        } else {
            self.max_hands.min(2)
        }
    }

    pub fn toggle(&mut self, toggle: RuleToggle) {
        match toggle {
            RuleToggle::DealerHitsSoft17 => self.dealer_hits_soft_17 = !self.dealer_hits_soft_17,
            RuleToggle::Double => self.allow_double = !self.allow_double,
            RuleToggle::DoubleAfterSplit => self.allow_das = !self.allow_das,
            RuleToggle::Resplit => self.allow_resplit = !self.allow_resplit,
            RuleToggle::SplitAcesOneCard => self.split_aces_one_card = !self.split_aces_one_card,
        }
    }

    pub fn is_enabled(&self, toggle: RuleToggle) -> bool {
        match toggle {
            RuleToggle::DealerHitsSoft17 => self.dealer_hits_soft_17,
            RuleToggle::Double => self.allow_double,
            RuleToggle::DoubleAfterSplit => self.allow_das,
            RuleToggle::Resplit => self.allow_resplit,
            RuleToggle::SplitAcesOneCard => self.split_aces_one_card,
        }
    }
}

impl FromStr for RuleSet {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::preset(s)
    }
}

/// The boolean rules a user can flip from the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleToggle {
    DealerHitsSoft17,
    Double,
    DoubleAfterSplit,
    Resplit,
    SplitAcesOneCard,
}

impl RuleToggle {
    pub const ALL: [RuleToggle; 5] = [
        RuleToggle::Double,
        RuleToggle::DoubleAfterSplit,
        RuleToggle::Resplit,
        RuleToggle::SplitAcesOneCard,
        RuleToggle::DealerHitsSoft17,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RuleToggle::DealerHitsSoft17 => "Dealer hits soft 17",
            RuleToggle::Double => "Double allowed",
            RuleToggle::DoubleAfterSplit => "Double after split",
            RuleToggle::Resplit => "Resplit",
            RuleToggle::SplitAcesOneCard => "Split aces: one card",
        }
    }
}
