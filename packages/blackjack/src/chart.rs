//! Full basic-strategy chart, generated cell by cell from the decision table.

use std::fmt;

use crate::{decide, Action, Rank, RuleSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartRow {
    pub label: String,
    /// One cell per dealer upcard, in `Rank::UPCARDS` order
    pub cells: [Action; 10],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyChart {
    pub pairs: Vec<ChartRow>,
    pub soft: Vec<ChartRow>,
    pub hard: Vec<ChartRow>,
}

impl StrategyChart {
    pub fn generate(rules: &RuleSet) -> Self {
        let pairs = [
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
        ]
        .into_iter()
        .map(|rank| row(format!("{rank},{rank}"), &[rank, rank], rules))
        .collect();

        let soft = (2..=9)
            .map(|other| {
                let card = rank_of_value(other);
                row(format!("A,{card}"), &[Rank::Ace, card], rules)
            })
            .collect();

        let hard = (5..=18)
            .map(|total| {
                let label = if total == 18 {
                    "18+".to_string()
                } else {
                    total.to_string()
                };
                row(label, &hard_hand(total), rules)
            })
            .collect();

        Self { pairs, soft, hard }
    }

    pub fn sections(&self) -> [(&'static str, &[ChartRow]); 3] {
        [
            ("Pairs", self.pairs.as_slice()),
            ("Soft totals", self.soft.as_slice()),
            ("Hard totals", self.hard.as_slice()),
        ]
    }
}

fn row(label: String, hand: &[Rank], rules: &RuleSet) -> ChartRow {
    let cells = Rank::UPCARDS.map(|dealer| decide(hand, Some(dealer), rules).action);
    ChartRow { label, cells }
}

fn rank_of_value(value: u8) -> Rank {
    match value {
        2 => Rank::Two,
        3 => Rank::Three,
        4 => Rank::Four,
        5 => Rank::Five,
        6 => Rank::Six,
        7 => Rank::Seven,
        8 => Rank::Eight,
        9 => Rank::Nine,
        11 => Rank::Ace,
        _ => Rank::Ten,
    }
}

/// Two unpaired, ace-free cards totalling `total` (5..=19)
fn hard_hand(total: u8) -> [Rank; 2] {
    if total <= 11 {
        [Rank::Two, rank_of_value(total - 2)]
    } else {
        [rank_of_value(total - 10), Rank::Ten]
    }
}

impl fmt::Display for StrategyChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (title, rows) in self.sections() {
            write!(f, "{title:<12}")?;
            for up in Rank::UPCARDS {
                let label = if up.is_ace() { "A".to_string() } else { up.value().to_string() };
                write!(f, "{label:>3}")?;
            }
            writeln!(f)?;
            for row in rows {
                write!(f, "{:<12}", row.label)?;
                for cell in &row.cells {
                    write!(f, "{:>3}", cell.code())?;
                }
                writeln!(f)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
