use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::{decide_hand, Decision, Hand, Rank, RuleSet, RuleToggle};

/// Sanity bound on cards per hand, not a table rule
pub const MAX_HAND_CARDS: usize = 12;

/// One advising session: the player's hands (several after splits), the dealer's
/// upcard and the table rules, all shared by every hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SessionSnapshot")]
pub struct Session {
    hands: Vec<Hand>,
    active_hand_index: usize,
    dealer_up_card: Option<Rank>,
    rules: RuleSet,
}

/// Unchecked wire form, validated into a `Session`.
#[derive(Deserialize)]
struct SessionSnapshot {
    hands: Vec<Hand>,
    #[serde(default)]
    active_hand_index: usize,
    #[serde(default)]
    dealer_up_card: Option<Rank>,
    #[serde(default)]
    rules: RuleSet,
}

impl TryFrom<SessionSnapshot> for Session {
    type Error = SessionError;

    fn try_from(snapshot: SessionSnapshot) -> Result<Self, Self::Error> {
        if snapshot.hands.is_empty() {
            return Err(SessionError::NoHands);
        }
        if snapshot.active_hand_index >= snapshot.hands.len() {
            return Err(SessionError::NoSuchHand(snapshot.active_hand_index));
        }
        if let Some(index) = snapshot
            .hands
            .iter()
            .position(|hand| hand.len() > MAX_HAND_CARDS)
        {
            return Err(SessionError::HandFull {
                hand: index,
                max: MAX_HAND_CARDS,
            });
        }
        if snapshot.rules.max_hands == 0 {
            return Err(SessionError::ZeroHandLimit);
        }

        Ok(Self {
            hands: snapshot.hands,
            active_hand_index: snapshot.active_hand_index,
            dealer_up_card: snapshot.dealer_up_card,
            rules: snapshot.rules,
        })
    }
}

impl Session {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            hands: vec![Hand::new()],
            active_hand_index: 0,
            dealer_up_card: None,
            rules,
        }
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn active_hand_index(&self) -> usize {
        self.active_hand_index
    }

    pub fn active_hand(&self) -> &Hand {
        &self.hands[self.active_hand_index]
    }

    pub fn dealer_up_card(&self) -> Option<Rank> {
        self.dealer_up_card
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn set_dealer_up_card(&mut self, card: Option<Rank>) {
        debug!("Dealer upcard set to {card:?}");
        self.dealer_up_card = card;
    }

    pub fn set_rules(&mut self, rules: RuleSet) {
        debug!("Rules replaced: {rules:?}");
        self.rules = rules;
    }

    pub fn toggle_rule(&mut self, toggle: RuleToggle) {
        self.rules.toggle(toggle);
        debug!("{} -> {}", toggle.label(), self.rules.is_enabled(toggle));
    }

    pub fn select_hand(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.hands.len() {
            return Err(SessionError::NoSuchHand(index));
        }
        self.active_hand_index = index;
        Ok(())
    }

    pub fn has_next_hand(&self) -> bool {
        self.active_hand_index + 1 < self.hands.len()
    }

    pub fn next_hand(&mut self) -> bool {
        if self.has_next_hand() {
            self.active_hand_index += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_hand(&mut self) -> bool {
        if self.active_hand_index > 0 {
            self.active_hand_index -= 1;
            true
        } else {
            false
        }
    }

    /// Append a card to the active hand.
    pub fn add_card(&mut self, card: Rank) -> Result<(), SessionError> {
        let index = self.active_hand_index;
        let hand = &self.hands[index];
        if hand.len() >= MAX_HAND_CARDS {
            return Err(SessionError::HandFull {
                hand: index,
                max: MAX_HAND_CARDS,
            });
        }
        if hand.is_split_aces() && self.rules.split_aces_one_card && hand.len() >= 2 {
            return Err(SessionError::SplitAcesOneCard);
        }

        self.hands[index].add_card(card);
        debug!("Hand {} += {card} -> {}", index + 1, self.hands[index].describe());
        Ok(())
    }

    /// Remove a card. A hand emptied this way disappears unless it is the only one,
    /// in which case it stops counting as a split hand.
    pub fn remove_card(&mut self, hand_index: usize, card_index: usize) -> Result<Rank, SessionError> {
        let sole_hand = self.hands.len() == 1;
        let hand = self
            .hands
            .get_mut(hand_index)
            .ok_or(SessionError::NoSuchHand(hand_index))?;
        if card_index >= hand.len() {
            return Err(SessionError::NoSuchCard {
                hand: hand_index,
                card: card_index,
            });
        }

        let card = hand.cards.remove(card_index);
        debug!("Hand {} -= {card}", hand_index + 1);

        if !hand.is_empty() {
            return Ok(card);
        }
        if sole_hand {
            // Nothing left of the split, the next cards start a fresh hand
            hand.split = false;
        } else {
            self.hands.remove(hand_index);
            debug!("Hand {} removed, {} left", hand_index + 1, self.hands.len());
            if self.active_hand_index >= self.hands.len() {
                self.active_hand_index = self.hands.len() - 1;
            }
        }
        Ok(card)
    }

    /// Remove the active hand's most recent card.
    pub fn remove_last_card(&mut self) -> Result<Rank, SessionError> {
        let hand_index = self.active_hand_index;
        let len = self.hands[hand_index].len();
        if len == 0 {
            return Err(SessionError::NoSuchCard {
                hand: hand_index,
                card: 0,
            });
        }
        self.remove_card(hand_index, len - 1)
    }

    pub fn can_split(&self, hand_index: usize) -> bool {
        self.check_split(hand_index).is_ok()
    }

    fn check_split(&self, hand_index: usize) -> Result<(), SessionError> {
        let hand = self
            .hands
            .get(hand_index)
            .ok_or(SessionError::NoSuchHand(hand_index))?;
        if !hand.can_split() {
            return Err(SessionError::NotSplittable(hand_index));
        }

        let rank = hand.cards[0];
        if hand.split {
            if !self.rules.allow_resplit {
                return Err(SessionError::ResplitNotAllowed(rank));
            }
            if rank.is_ace() && self.rules.split_aces_one_card {
                return Err(SessionError::ResplitNotAllowed(rank));
            }
        }

        let limit = self.rules.hand_limit();
        if self.hands.len() >= limit as usize {
            return Err(SessionError::SplitLimit(limit));
        }
        Ok(())
    }

    /// Split a pair into two one-card hands; the second card becomes the next hand.
    pub fn split(&mut self, hand_index: usize) -> Result<(), SessionError> {
        self.check_split(hand_index)?;

        let hand = &mut self.hands[hand_index];
        let second_card = hand.cards.pop().ok_or(SessionError::NotSplittable(hand_index))?;
        hand.split = true;

        let new_hand = Hand {
            cards: vec![second_card],
            split: true,
        };
        self.hands.insert(hand_index + 1, new_hand);
        if self.active_hand_index > hand_index {
            self.active_hand_index += 1;
        }

        debug!(
            "Split hand {} ({second_card}s), now {} hands",
            hand_index + 1,
            self.hands.len()
        );
        Ok(())
    }

    /// One empty hand, no dealer card. Rules are kept.
    pub fn reset(&mut self) {
        self.hands = vec![Hand::new()];
        self.active_hand_index = 0;
        self.dealer_up_card = None;
        debug!("Session reset");
    }

    /// One decision per hand, left to right, against the shared upcard and rules.
    pub fn decisions(&self) -> Vec<Decision> {
        self.hands
            .iter()
            .map(|hand| decide_hand(hand, self.dealer_up_card, &self.rules))
            .collect()
    }

    pub fn active_decision(&self) -> Decision {
        decide_hand(self.active_hand(), self.dealer_up_card, &self.rules)
    }

    /// Share text, e.g. `My hand: A, 7 vs 9 -> Hit`
    pub fn summary(&self) -> String {
        let dealer = self
            .dealer_up_card
            .map(|card| card.to_string())
            .unwrap_or_else(|| "-".to_string());
        let decisions = self.decisions();

        if self.hands.len() == 1 {
            return format!(
                "My hand: {} vs {dealer} -> {}",
                self.hands[0].describe(),
                decisions[0].action
            );
        }

        self.hands
            .iter()
            .zip(&decisions)
            .enumerate()
            .map(|(i, (hand, decision))| {
                format!("Hand {}: {} vs {dealer} -> {}", i + 1, hand.describe(), decision.action)
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}
