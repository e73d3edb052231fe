use crate::Rank;
use serde::{Deserialize, Serialize};

/// Totals and shape of a hand, recomputed from its cards on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandEvaluation {
    pub total: u8,
    /// At least one Ace still counts as 11
    pub is_soft: bool,
    pub is_pair: bool,
    pub is_natural: bool,
}

impl HandEvaluation {
    pub fn is_busted(&self) -> bool {
        self.total > 21
    }
}

/// Evaluate a hand of any length (an empty hand totals 0).
pub fn evaluate(cards: &[Rank]) -> HandEvaluation {
    let (total, soft_aces) = reduce_aces(cards);
    HandEvaluation {
        total,
        is_soft: soft_aces > 0,
        is_pair: is_pair(cards),
        is_natural: is_blackjack(cards),
    }
}

/// Sum the hand with Aces high, then drop Aces to 1 one at a time while busting.
/// Returns the total and how many Aces are still counted as 11.
/// Only a total past 255 (a long way into bust) is clamped.
fn reduce_aces(cards: &[Rank]) -> (u8, u8) {
    let mut total: usize = 0;
    let mut aces: usize = 0;

    for card in cards {
        if card.is_ace() {
            aces += 1;
        }
        total += usize::from(card.value());
    }

    while total > 21 && aces > 0 {
        total -= 10; // Count ace as 1 instead of 11
        aces -= 1;
    }

    (
        u8::try_from(total).unwrap_or(u8::MAX),
        u8::try_from(aces).unwrap_or(u8::MAX),
    )
}

/// Calculate the value of a blackjack hand
pub fn calculate_hand_value(cards: &[Rank]) -> u8 {
    reduce_aces(cards).0
}

/// Check if a hand is soft (has an ace counted as 11)
pub fn is_soft_hand(cards: &[Rank]) -> bool {
    reduce_aces(cards).1 > 0
}

/// Check if a hand is busted
pub fn is_busted(cards: &[Rank]) -> bool {
    calculate_hand_value(cards) > 21
}

/// Check if a hand is a natural: an Ace and a ten-valued card, nothing else
pub fn is_blackjack(cards: &[Rank]) -> bool {
    match cards {
        [a, b] => (a.is_ace() && b.is_ten_valued()) || (b.is_ace() && a.is_ten_valued()),
        _ => false,
    }
}

/// Two cards of the same rank symbol (a King and a Ten are not a pair)
pub fn is_pair(cards: &[Rank]) -> bool {
    matches!(cards, [a, b] if can_split_cards(a, b))
}

/// Check if two cards can be split (same rank)
pub fn can_split_cards(card1: &Rank, card2: &Rank) -> bool {
    card1 == card2
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    pub cards: Vec<Rank>,
    /// Produced by splitting a pair
    pub split: bool,
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cards(cards: impl IntoIterator<Item = Rank>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            split: false,
        }
    }

    pub fn evaluate(&self) -> HandEvaluation {
        evaluate(&self.cards)
    }

    pub fn value(&self) -> u8 {
        calculate_hand_value(&self.cards)
    }

    pub fn is_soft(&self) -> bool {
        is_soft_hand(&self.cards)
    }

    pub fn is_busted(&self) -> bool {
        is_busted(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        !self.split && is_blackjack(&self.cards)
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn add_card(&mut self, card: Rank) {
        self.cards.push(card);
    }

    pub fn can_split(&self) -> bool {
        is_pair(&self.cards)
    }

    /// A hand made by splitting Aces
    pub fn is_split_aces(&self) -> bool {
        self.split && self.cards.first().is_some_and(Rank::is_ace)
    }

    /// Cards joined for display, e.g. `A, 7`
    pub fn describe(&self) -> String {
        if self.cards.is_empty() {
            return "-".to_string();
        }
        self.cards
            .iter()
            .map(Rank::symbol)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Rank::*;

    #[test]
    fn test_calculate_hand_value_simple() {
        assert_eq!(calculate_hand_value(&[Two, Three]), 5);
    }

    #[test]
    fn test_calculate_hand_value_with_face_cards() {
        assert_eq!(calculate_hand_value(&[King, Queen]), 20);
    }

    #[test]
    fn test_calculate_hand_value_blackjack() {
        assert_eq!(calculate_hand_value(&[Ace, King]), 21);
    }

    #[test]
    fn test_calculate_hand_value_soft_ace() {
        assert_eq!(calculate_hand_value(&[Ace, Six]), 17); // Ace as 11
    }

    #[test]
    fn test_calculate_hand_value_hard_ace() {
        assert_eq!(calculate_hand_value(&[Ace, Six, Nine]), 16); // Ace as 1
    }

    #[test]
    fn test_calculate_hand_value_multiple_aces() {
        let eval = evaluate(&[Ace, Ace, Nine]);
        assert_eq!(eval.total, 21); // One ace as 11, one as 1
        assert!(eval.is_soft);
    }

    #[test]
    fn test_four_aces() {
        let eval = evaluate(&[Ace, Ace, Ace, Ace]);
        assert_eq!(eval.total, 14);
        assert!(eval.is_soft);
        assert!(!eval.is_pair);
    }

    #[test]
    fn test_long_hand_of_aces() {
        let eval = evaluate(&[Ace; 24]);
        assert_eq!(eval.total, 24);
        assert!(!eval.is_soft);

        let mut cards = vec![Ace; 11];
        cards.push(Two);
        let eval = evaluate(&cards);
        assert_eq!(eval.total, 13);
        assert!(!eval.is_soft);

        let eval = evaluate(&[Ace; 10]);
        assert_eq!(eval.total, 20);
        assert!(eval.is_soft);
    }

    #[test]
    fn test_very_long_hand_stays_busted() {
        let eval = evaluate(&[King; 30]);
        assert_eq!(eval.total, u8::MAX);
        assert!(eval.is_busted());
    }

    #[test]
    fn test_evaluate_empty() {
        let eval = evaluate(&[]);
        assert_eq!(eval.total, 0);
        assert!(!eval.is_soft);
        assert!(!eval.is_pair);
        assert!(!eval.is_natural);
    }

    #[test]
    fn test_busted_keeps_minimal_total() {
        let eval = evaluate(&[Ace, King, Queen, Five]);
        assert_eq!(eval.total, 26);
        assert!(!eval.is_soft);
        assert!(eval.is_busted());
    }

    #[test]
    fn test_is_busted() {
        assert!(is_busted(&[King, Queen, Five]));
        assert!(!is_busted(&[King, Queen]));
    }

    #[test]
    fn test_is_blackjack() {
        assert!(is_blackjack(&[Ace, King]));
        assert!(is_blackjack(&[Ten, Ace]));
    }

    #[test]
    fn test_not_blackjack_three_cards() {
        assert!(!is_blackjack(&[Seven, Seven, Seven]));
        assert!(!is_blackjack(&[Ace, Five, Five]));
    }

    #[test]
    fn test_not_blackjack_wrong_value() {
        assert!(!is_blackjack(&[King, Queen]));
        assert!(!is_blackjack(&[Ace, Ace]));
    }

    #[test]
    fn test_is_soft_hand() {
        assert!(is_soft_hand(&[Ace, Six]));
        assert!(!is_soft_hand(&[Ace, Six, Nine]));
        assert!(!is_soft_hand(&[King, Queen]));
    }

    #[test]
    fn test_pairs_by_symbol() {
        assert!(is_pair(&[King, King]));
        assert!(!is_pair(&[King, Ten]));
        assert!(!is_pair(&[Eight, Eight, Eight]));
        assert!(!is_pair(&[Eight]));
    }

    #[test]
    fn test_can_split_cards() {
        assert!(can_split_cards(&Eight, &Eight));
        assert!(!can_split_cards(&Eight, &Nine));
        assert!(!can_split_cards(&King, &Queen));
    }

    #[test]
    fn test_hand_struct_value() {
        let mut hand = Hand::new();
        hand.add_card(King);
        hand.add_card(Seven);
        assert_eq!(hand.value(), 17);
        assert_eq!(hand.describe(), "K, 7");
    }

    #[test]
    fn test_split_hand_is_not_blackjack() {
        let mut hand = Hand::from_cards([Ace, King]);
        assert!(hand.is_blackjack());
        hand.split = true;
        assert!(!hand.is_blackjack());
        assert!(hand.is_split_aces());
    }

    #[test]
    fn test_hand_struct_cannot_split_three_cards() {
        let hand = Hand::from_cards([Eight, Eight, Two]);
        assert!(!hand.can_split());
        assert!(Hand::from_cards([Eight, Eight]).can_split());
    }
}
