use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseRankError;

/// Card rank. Suits never matter for strategy, so a card is just its rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// Every rank in display order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Dealer upcards in chart column order (2..10, then Ace).
    pub const UPCARDS: [Rank; 10] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Ace,
    ];

    /// Blackjack value, with the Ace counted high.
    pub fn value(&self) -> u8 {
        match self {
            Rank::Ace => 11,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    pub fn is_ace(&self) -> bool {
        matches!(self, Rank::Ace)
    }

    pub fn is_ten_valued(&self) -> bool {
        self.value() == 10
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Rank {
    type Err = ParseRankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rank = match s.trim().to_ascii_uppercase().as_str() {
            "A" => Rank::Ace,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            _ => return Err(ParseRankError(s.to_string())),
        };
        Ok(rank)
    }
}

impl TryFrom<String> for Rank {
    type Error = ParseRankError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rank> for String {
    fn from(rank: Rank) -> Self {
        rank.symbol().to_string()
    }
}

/// Parse a comma- or space-separated list of ranks, e.g. `"A,7"` or `"10 K"`.
pub fn parse_ranks(input: &str) -> Result<Vec<Rank>, ParseRankError> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        assert_eq!(Rank::Ace.value(), 11);
        assert_eq!(Rank::Seven.value(), 7);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Jack.value(), 10);
        assert_eq!(Rank::King.value(), 10);
    }

    #[test]
    fn test_ten_valued() {
        let tens: Vec<Rank> = Rank::ALL.iter().copied().filter(Rank::is_ten_valued).collect();
        assert_eq!(tens, vec![Rank::Ten, Rank::Jack, Rank::Queen, Rank::King]);
    }

    #[test]
    fn test_symbol_round_trip() {
        for rank in Rank::ALL {
            assert_eq!(rank.symbol().parse::<Rank>().unwrap(), rank);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("t".parse::<Rank>().unwrap(), Rank::Ten);
        assert_eq!(" q ".parse::<Rank>().unwrap(), Rank::Queen);
        assert_eq!("a".parse::<Rank>().unwrap(), Rank::Ace);
    }

    #[test]
    fn test_parse_invalid() {
        assert!("1".parse::<Rank>().is_err());
        assert!("11".parse::<Rank>().is_err());
        assert!("".parse::<Rank>().is_err());
        assert_eq!("Z".parse::<Rank>(), Err(ParseRankError("Z".to_string())));
    }

    #[test]
    fn test_parse_ranks_list() {
        assert_eq!(parse_ranks("A,7").unwrap(), vec![Rank::Ace, Rank::Seven]);
        assert_eq!(parse_ranks("10 K").unwrap(), vec![Rank::Ten, Rank::King]);
        assert!(parse_ranks("").unwrap().is_empty());
        assert!(parse_ranks("A,X").is_err());
    }

    #[test]
    fn test_upcards_order() {
        assert_eq!(Rank::UPCARDS[0], Rank::Two);
        assert_eq!(Rank::UPCARDS[9], Rank::Ace);
    }
}
