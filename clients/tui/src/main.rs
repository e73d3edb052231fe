use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::{error::Error, io};

use blackjack::{Action, RuleSet, RuleToggle};

mod app;
use app::{App, InputTarget};

mod tui_logger;
use tui_logger::TuiLogger;

fn load_rules() -> Result<RuleSet, Box<dyn Error>> {
    match std::env::var("BJ_RULES") {
        Ok(path) => {
            let rules = RuleSet::load(&path)?;
            log::info!("Rules loaded from {path}");
            Ok(rules)
        }
        Err(_) => Ok(RuleSet::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let log_buffer = TuiLogger::install(log::LevelFilter::Info)?;
    let rules = load_rules()?;

    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(rules, log_buffer);
    let res = run_app(&mut terminal, app);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}")
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<(), Box<dyn Error>>
where
    B::Error: 'static,
{
    loop {
        app.sync_logs();
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn action_color(action: Action) -> Color {
    match action {
        Action::Hit => Color::Yellow,
        Action::Stand => Color::Cyan,
        Action::Double => Color::Green,
        Action::Split => Color::Magenta,
        Action::Blackjack => Color::LightGreen,
        Action::Undetermined => Color::DarkGray,
    }
}

fn ui(f: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3), // Title bar
                Constraint::Min(10),   // Table area
                Constraint::Length(3), // Status bar
                Constraint::Length(1), // Key help
            ]
            .as_ref(),
        )
        .split(f.area());

    let title = Paragraph::new("Blackjack Helper - single deck, dealer stands on soft 17")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, main_chunks[0]);

    // Left: table, right: chart or logs
    let side_visible = app.log_visible || app.chart_visible;
    let (table_area, side_area) = if side_visible {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
            .split(main_chunks[1]);
        (horizontal[0], Some(horizontal[1]))
    } else {
        (main_chunks[1], None)
    };

    let table = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(RuleToggle::ALL.len() as u16 + 2),
            ]
            .as_ref(),
        )
        .split(table_area);

    render_dealer(f, app, table[0]);
    render_hands(f, app, table[1]);
    render_rules(f, app, table[2]);

    if let Some(side_area) = side_area {
        if app.chart_visible {
            render_chart(f, app, side_area);
        } else {
            render_logs(f, app, side_area);
        }
    }

    let decision = app.session.active_decision();
    let status_bar = Paragraph::new(app.status.as_str())
        .style(
            Style::default()
                .fg(action_color(decision.action))
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status_bar, main_chunks[2]);

    let help = Paragraph::new(
        "a 2-9 t j q k: card  Tab: dealer/player  \u{2190}\u{2192}: hand  Bksp: undo  s: split  x: clear dealer  y: share  r: reset  c: chart  l: log  Esc: quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, main_chunks[3]);
}

fn render_dealer(f: &mut Frame, app: &App, area: Rect) {
    let card = app
        .session
        .dealer_up_card()
        .map(|card| card.symbol())
        .unwrap_or("??");
    let border = if app.target == InputTarget::Dealer {
        Color::Yellow
    } else {
        Color::Gray
    };
    let dealer = Paragraph::new(Line::from(vec![
        Span::raw("Upcard: "),
        Span::styled(
            format!(" {card} "),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ),
    ]))
    .block(
        Block::default()
            .title(" Dealer ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(dealer, area);
}

fn render_hands(f: &mut Frame, app: &App, area: Rect) {
    let decisions = app.session.decisions();
    let active = app.session.active_hand_index();

    let mut lines: Vec<Line> = Vec::new();
    for (i, (hand, decision)) in app.session.hands().iter().zip(&decisions).enumerate() {
        let eval = hand.evaluate();
        let marker = if i == active { "\u{25b6} " } else { "  " };
        let kind = if eval.is_soft { "soft" } else { "hard" };
        let total = if hand.is_empty() {
            String::new()
        } else {
            format!(" ({kind} {})", eval.total)
        };

        let label_style = if i == active {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker}Hand {}: ", i + 1), label_style),
            Span::raw(format!("{}{total}", hand.describe())),
        ]));
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(
                decision.action.label(),
                Style::default()
                    .fg(action_color(decision.action))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", decision.reason),
                Style::default().fg(Color::Gray),
            ),
        ]));
    }

    let border = if app.target == InputTarget::Player {
        Color::Yellow
    } else {
        Color::Gray
    };
    let hands = Paragraph::new(lines).block(
        Block::default()
            .title(" Your hands ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    f.render_widget(hands, area);
}

fn render_rules(f: &mut Frame, app: &App, area: Rect) {
    let rules = app.session.rules();
    let lines: Vec<Line> = RuleToggle::ALL
        .iter()
        .enumerate()
        .map(|(i, toggle)| {
            let check = if rules.is_enabled(*toggle) { "[x]" } else { "[ ]" };
            Line::from(format!("F{} {check} {}", i + 1, toggle.label()))
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" Rules (max {} hands) ", rules.hand_limit()))
            .borders(Borders::ALL),
    );
    f.render_widget(widget, area);
}

fn render_chart(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .chart
        .to_string()
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect();

    let chart = Paragraph::new(lines).block(
        Block::default()
            .title(" Strategy chart ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    f.render_widget(chart, area);
}

fn render_logs(f: &mut Frame, app: &App, area: Rect) {
    let log_frame_height = area.height.saturating_sub(2) as usize; // Subtract borders
    let log_start_idx = app.logs.len().saturating_sub(log_frame_height);

    let log_lines: Vec<Line> = app
        .logs
        .iter()
        .skip(log_start_idx)
        .map(|log| {
            Line::from(vec![
                Span::styled("\u{2022} ", Style::default().fg(Color::DarkGray)),
                Span::raw(log.clone()),
            ])
        })
        .collect();

    let logs_widget = Paragraph::new(log_lines)
        .block(
            Block::default()
                .title(" Log ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    f.render_widget(logs_widget, area);
}
