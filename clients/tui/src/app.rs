use std::sync::{Arc, Mutex};

use blackjack::{Rank, RuleSet, RuleToggle, Session, StrategyChart};
use crossterm::event::KeyCode;

/// Log entries shown in the pane
const LOG_LIMIT: usize = 20;

/// Where a rank key goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    Player,
    Dealer,
}

pub struct App {
    pub session: Session,
    pub target: InputTarget,
    pub status: String,
    pub logs: Vec<String>,
    log_buffer: Arc<Mutex<Vec<String>>>, // Shared buffer for capturing log:: messages
    pub log_visible: bool,
    pub chart_visible: bool,
    pub chart: StrategyChart,
    pub should_quit: bool,
}

impl App {
    pub fn new(rules: RuleSet, log_buffer: Arc<Mutex<Vec<String>>>) -> App {
        let mut app = App {
            session: Session::new(rules),
            target: InputTarget::Dealer,
            status: String::new(),
            logs: vec![
                "Blackjack helper: single deck, dealer stands on soft 17".to_string(),
                "Pick the dealer upcard, then your cards".to_string(),
            ],
            log_buffer,
            log_visible: true,
            chart_visible: false,
            chart: StrategyChart::generate(&rules),
            should_quit: false,
        };
        app.refresh_status();
        app
    }

    pub fn sync_logs(&mut self) {
        // Pull any new log messages from the shared buffer
        let messages: Vec<String> = if let Ok(mut buffer) = self.log_buffer.lock() {
            buffer.drain(..).collect()
        } else {
            Vec::new()
        };

        for msg in messages {
            self.add_log(msg);
        }
    }

    pub fn add_log(&mut self, message: String) {
        self.logs.push(message);
        if self.logs.len() > LOG_LIMIT {
            self.logs.remove(0);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                self.target = match self.target {
                    InputTarget::Player => InputTarget::Dealer,
                    InputTarget::Dealer => InputTarget::Player,
                };
            }
            KeyCode::Left => {
                self.session.previous_hand();
            }
            KeyCode::Right => {
                self.session.next_hand();
            }
            KeyCode::Backspace => match self.session.remove_last_card() {
                Ok(card) => log::info!(
                    "Removed {card} from hand {}",
                    self.session.active_hand_index() + 1
                ),
                Err(e) => log::warn!("{e}"),
            },
            KeyCode::F(n @ 1..=5) => {
                let toggle = RuleToggle::ALL[usize::from(n - 1)];
                self.session.toggle_rule(toggle);
                self.chart = StrategyChart::generate(self.session.rules());
                let state = if self.session.rules().is_enabled(toggle) { "on" } else { "off" };
                log::info!("{}: {state}", toggle.label());
            }
            KeyCode::Char(c) => {
                if let Some(rank) = rank_for_key(c) {
                    self.enter_rank(rank);
                } else {
                    self.command(c.to_ascii_lowercase());
                }
            }
            _ => {}
        }
        self.refresh_status();
    }

    fn enter_rank(&mut self, rank: Rank) {
        match self.target {
            InputTarget::Dealer => {
                self.session.set_dealer_up_card(Some(rank));
                log::info!("Dealer shows {rank}");
                self.target = InputTarget::Player;
            }
            InputTarget::Player => match self.session.add_card(rank) {
                Ok(()) => log::info!(
                    "Hand {}: {}",
                    self.session.active_hand_index() + 1,
                    self.session.active_hand().describe()
                ),
                Err(e) => log::warn!("{e}"),
            },
        }
    }

    fn command(&mut self, c: char) {
        match c {
            's' => {
                let index = self.session.active_hand_index();
                match self.session.split(index) {
                    Ok(()) => log::info!("Split hand {}", index + 1),
                    Err(e) => log::warn!("{e}"),
                }
            }
            'r' => {
                self.session.reset();
                self.target = InputTarget::Dealer;
                log::info!("Reset");
            }
            'l' => self.log_visible = !self.log_visible,
            'c' => self.chart_visible = !self.chart_visible,
            'x' => {
                self.session.set_dealer_up_card(None);
                self.target = InputTarget::Dealer;
                log::info!("Dealer upcard cleared");
            }
            'y' => log::info!("{}", self.session.summary()),
            _ => {}
        }
    }

    fn refresh_status(&mut self) {
        let hand = self.session.active_hand_index() + 1;
        let decision = self.session.active_decision();
        self.status = format!("Hand {hand}: {} | {}", decision.action, decision.reason);
    }
}

/// Rank keys: a, 2-9, t or 0 for ten, j, q, k
pub fn rank_for_key(c: char) -> Option<Rank> {
    match c.to_ascii_lowercase() {
        'a' => Some(Rank::Ace),
        '0' | 't' => Some(Rank::Ten),
        'j' => Some(Rank::Jack),
        'q' => Some(Rank::Queen),
        'k' => Some(Rank::King),
        '2'..='9' => c.to_string().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackjack::Action;

    fn app() -> App {
        App::new(RuleSet::default(), Arc::new(Mutex::new(Vec::new())))
    }

    fn press(app: &mut App, keys: &str) {
        for c in keys.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn test_rank_keys() {
        assert_eq!(rank_for_key('A'), Some(Rank::Ace));
        assert_eq!(rank_for_key('0'), Some(Rank::Ten));
        assert_eq!(rank_for_key('t'), Some(Rank::Ten));
        assert_eq!(rank_for_key('7'), Some(Rank::Seven));
        assert_eq!(rank_for_key('K'), Some(Rank::King));
        assert_eq!(rank_for_key('1'), None);
        assert_eq!(rank_for_key('s'), None);
    }

    #[test]
    fn test_starts_undetermined_on_dealer() {
        let app = app();
        assert_eq!(app.target, InputTarget::Dealer);
        assert!(app.status.starts_with("Hand 1: -"));
    }

    #[test]
    fn test_dealer_then_player_cards() {
        let mut app = app();
        press(&mut app, "9a7");
        assert_eq!(app.session.dealer_up_card(), Some(Rank::Nine));
        assert_eq!(app.session.active_hand().cards, vec![Rank::Ace, Rank::Seven]);
        assert_eq!(app.status, "Hand 1: Hit | A7 vs 9 -> Hit");
    }

    #[test]
    fn test_split_and_navigate() {
        let mut app = app();
        press(&mut app, "688s");
        assert_eq!(app.session.hands().len(), 2);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.session.active_hand_index(), 1);
        press(&mut app, "3");
        assert_eq!(app.session.hands()[1].cards, vec![Rank::Eight, Rank::Three]);
        assert_eq!(app.session.active_decision().action, Action::Double);
    }

    #[test]
    fn test_backspace_removes_card() {
        let mut app = app();
        press(&mut app, "5k6");
        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.session.active_hand().cards, vec![Rank::King]);
    }

    #[test]
    fn test_function_keys_toggle_rules() {
        let mut app = app();
        press(&mut app, "655");
        assert_eq!(app.session.active_decision().action, Action::Double);
        app.handle_key(KeyCode::F(1));
        assert!(!app.session.rules().allow_double);
        assert_eq!(app.session.active_decision().action, Action::Hit);
    }

    #[test]
    fn test_reset_and_quit() {
        let mut app = app();
        press(&mut app, "9a7r");
        assert_eq!(app.session.dealer_up_card(), None);
        assert!(app.session.active_hand().is_empty());
        assert_eq!(app.target, InputTarget::Dealer);
        app.handle_key(KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_tab_switches_target() {
        let mut app = app();
        app.handle_key(KeyCode::Tab);
        press(&mut app, "k");
        assert_eq!(app.session.dealer_up_card(), None);
        assert_eq!(app.session.active_hand().cards, vec![Rank::King]);
    }

    #[test]
    fn test_add_log_is_bounded() {
        let mut app = app();
        for i in 0..50 {
            app.add_log(format!("line {i}"));
        }
        assert_eq!(app.logs.len(), LOG_LIMIT);
        assert_eq!(app.logs.last().map(String::as_str), Some("line 49"));
    }
}
