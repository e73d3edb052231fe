use std::fmt;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::hand::evaluate;
use crate::{Hand, Rank, RuleSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Hit,
    Stand,
    Double,
    Split,
    Blackjack,
    /// Not enough input to decide yet, shown as `-`
    Undetermined,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Hit => "Hit",
            Action::Stand => "Stand",
            Action::Double => "Double",
            Action::Split => "Split",
            Action::Blackjack => "Blackjack",
            Action::Undetermined => "-",
        }
    }

    /// Chart cell code
    pub fn code(&self) -> &'static str {
        match self {
            Action::Hit => "H",
            Action::Stand => "S",
            Action::Double => "D",
            Action::Split => "P",
            Action::Blackjack => "BJ",
            Action::Undetermined => "?",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Recommended action plus the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: Action,
    pub reason: String,
}

impl Decision {
    pub fn new(action: Action, reason: impl Into<String>) -> Self {
        Self {
            action,
            reason: reason.into(),
        }
    }

    pub fn undetermined(reason: impl Into<String>) -> Self {
        Self::new(Action::Undetermined, reason)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.action, self.reason)
    }
}

/// Where a hand came from. Split hands are gated by DAS, resplit and split-aces rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandContext {
    pub from_split: bool,
    pub split_aces: bool,
}

impl HandContext {
    pub fn of(hand: &Hand) -> Self {
        Self {
            from_split: hand.split,
            split_aces: hand.is_split_aces(),
        }
    }
}

/// Basic-strategy recommendation for a fresh (unsplit) hand.
pub fn decide(hand: &[Rank], dealer_up_card: Option<Rank>, rules: &RuleSet) -> Decision {
    decide_in_context(hand, dealer_up_card, rules, HandContext::default())
}

/// Basic-strategy recommendation for a session hand, split marker included.
pub fn decide_hand(hand: &Hand, dealer_up_card: Option<Rank>, rules: &RuleSet) -> Decision {
    decide_in_context(&hand.cards, dealer_up_card, rules, HandContext::of(hand))
}

pub fn decide_in_context(
    hand: &[Rank],
    dealer_up_card: Option<Rank>,
    rules: &RuleSet,
    ctx: HandContext,
) -> Decision {
    let Some(dealer) = dealer_up_card else {
        return Decision::undetermined("Select the dealer upcard");
    };
    if hand.is_empty() {
        return Decision::undetermined("Select your cards");
    }
    if rules.dealer_hits_soft_17 {
        debug!("Chart assumes dealer stands on soft 17; H17 toggle ignored");
    }

    let decision = table_lookup(hand, dealer, rules, ctx);
    trace!("{hand:?} vs {dealer}: {decision}");
    decision
}

// Precedence: natural, pair, soft, hard. First match wins.
fn table_lookup(hand: &[Rank], dealer: Rank, rules: &RuleSet, ctx: HandContext) -> Decision {
    let eval = evaluate(hand);
    let up = Upcard(dealer);
    let can_double = rules.allow_double
        && hand.len() == 2
        && (!ctx.from_split || rules.allow_das);

    if ctx.split_aces && rules.split_aces_one_card && hand.len() >= 2 {
        return Decision::new(Action::Stand, "Split aces receive one card");
    }

    if eval.is_natural {
        if ctx.from_split {
            return Decision::new(Action::Stand, "21 after split -> Stand");
        }
        return Decision::new(Action::Blackjack, "Natural 21 -> Blackjack");
    }

    if eval.is_pair && may_split(hand[0], rules, ctx) {
        return pair_decision(hand[0], up, can_double);
    }

    if eval.is_soft {
        let name = if hand.len() == 2 {
            format!("A{}", eval.total - 11)
        } else {
            format!("Soft {}", eval.total)
        };
        return soft_decision(&name, eval.total, up, can_double);
    }

    hard_decision(eval.total, up, can_double)
}

fn may_split(rank: Rank, rules: &RuleSet, ctx: HandContext) -> bool {
    if !ctx.from_split {
        return true;
    }
    rules.allow_resplit && !(rank.is_ace() && rules.split_aces_one_card)
}

#[derive(Clone, Copy)]
struct Upcard(Rank);

impl Upcard {
    fn value(&self) -> u8 {
        self.0.value()
    }

    fn within(&self, low: u8, high: u8) -> bool {
        (low..=high).contains(&self.value())
    }
}

impl fmt::Display for Upcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_ace() {
            f.write_str("A")
        } else {
            write!(f, "{}", self.value())
        }
    }
}

fn pair_decision(rank: Rank, up: Upcard, can_double: bool) -> Decision {
    let split_or_hit = |split: bool, label: &str, range: &str| {
        if split {
            Decision::new(Action::Split, format!("{label} vs {range} -> Split"))
        } else {
            Decision::new(Action::Hit, format!("{label} vs {up} -> Hit"))
        }
    };

    match rank {
        Rank::Ace | Rank::Eight => Decision::new(Action::Split, "Always split Aces and 8s"),
        Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => {
            Decision::new(Action::Stand, "Never split tens")
        }
        Rank::Two | Rank::Three => split_or_hit(up.within(4, 7), "2s/3s", "4-7"),
        Rank::Four => split_or_hit(up.within(5, 6), "4s", "5-6"),
        Rank::Five => {
            if can_double {
                Decision::new(Action::Double, "Treat pair of 5s as 10 -> Double")
            } else {
                Decision::new(Action::Hit, "Treat pair of 5s as 10, no double -> Hit")
            }
        }
        Rank::Six => split_or_hit(up.within(3, 6), "6s", "3-6"),
        Rank::Seven => split_or_hit(up.within(2, 7), "7s", "2-7"),
        Rank::Nine => {
            if up.within(2, 6) || up.value() == 8 || up.value() == 9 {
                Decision::new(Action::Split, "9s split vs 2-6,8,9")
            } else {
                Decision::new(Action::Stand, "9s stand vs 7,10,A")
            }
        }
    }
}

/// `Double` when the upcard is in range and doubling is possible, otherwise `fallback`.
fn double_or(
    double_range: bool,
    can_double: bool,
    fallback: Action,
    what: &str,
    up: Upcard,
) -> Decision {
    if double_range && can_double {
        Decision::new(Action::Double, format!("{what} vs {up} -> Double"))
    } else if double_range {
        Decision::new(fallback, format!("{what} vs {up} -> {fallback} (no double)"))
    } else {
        Decision::new(fallback, format!("{what} vs {up} -> {fallback}"))
    }
}

fn soft_decision(name: &str, total: u8, up: Upcard, can_double: bool) -> Decision {
    match total {
        13 | 14 => double_or(up.within(5, 6), can_double, Action::Hit, name, up),
        15 | 16 => double_or(up.within(4, 6), can_double, Action::Hit, name, up),
        17 => double_or(up.within(3, 6), can_double, Action::Hit, name, up),
        18 => {
            if up.within(3, 6) && can_double {
                Decision::new(Action::Double, format!("{name} vs {up} -> Double"))
            } else if up.value() == 2 || up.within(7, 8) {
                Decision::new(Action::Stand, format!("{name} vs {up} -> Stand"))
            } else {
                Decision::new(Action::Hit, format!("{name} vs {up} -> Hit"))
            }
        }
        19 | 20 => Decision::new(Action::Stand, format!("{name} vs {up} -> Stand")),
        _ => {
            let action = if total >= 19 { Action::Stand } else { Action::Hit };
            Decision::new(action, format!("Soft {total} default -> {action}"))
        }
    }
}

fn hard_decision(total: u8, up: Upcard, can_double: bool) -> Decision {
    let what = format!("Hard {total}");
    match total {
        0..=8 => Decision::new(Action::Hit, format!("{what} -> Hit")),
        9 => double_or(up.within(3, 6), can_double, Action::Hit, &what, up),
        10 => double_or(up.within(2, 9), can_double, Action::Hit, &what, up),
        11 => double_or(up.within(2, 10), can_double, Action::Hit, &what, up),
        12 => {
            let action = if up.within(4, 6) { Action::Stand } else { Action::Hit };
            Decision::new(action, format!("{what} vs {up} -> {action}"))
        }
        13..=16 => {
            let action = if up.within(2, 6) { Action::Stand } else { Action::Hit };
            Decision::new(action, format!("{what} vs {up} -> {action}"))
        }
        17..=21 => Decision::new(Action::Stand, format!("{what} -> Stand")),
        _ => Decision::new(Action::Stand, format!("Busted with {total}")),
    }
}
