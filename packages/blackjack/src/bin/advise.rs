use std::path::PathBuf;

use blackjack::{decide, evaluate, parse_ranks, Rank, RuleSet, RulesError, StrategyChart};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "advise",
    about = "Basic-strategy advice for the single-deck, dealer-stands-on-soft-17 table"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Recommend a move for one hand against the dealer upcard
    Decide {
        /// Your cards, e.g. "A,7" or "10 6 2"
        #[arg(long)]
        hand: String,

        /// Dealer upcard (A, 2-10, J, Q, K)
        #[arg(long)]
        dealer: Option<String>,

        /// Print the decision as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        rules: RuleArgs,
    },
    /// Print the full strategy chart for a rule configuration
    Chart {
        #[command(flatten)]
        rules: RuleArgs,
    },
}

#[derive(Args)]
struct RuleArgs {
    /// Use a preset: default, no_double, liberal
    #[arg(long)]
    preset: Option<String>,

    /// JSON rules file; replaces the preset
    #[arg(long, env = "BJ_RULES")]
    rules: Option<PathBuf>,

    /// Doubling down allowed
    #[arg(long, action = clap::ArgAction::Set)]
    allow_double: Option<bool>,

    /// Double after split allowed
    #[arg(long, action = clap::ArgAction::Set)]
    allow_das: Option<bool>,

    /// Split hands may be split again
    #[arg(long, action = clap::ArgAction::Set)]
    allow_resplit: Option<bool>,

    /// Split aces receive one card only
    #[arg(long, action = clap::ArgAction::Set)]
    split_aces_one_card: Option<bool>,

    /// Dealer hits soft 17 (accepted, the chart is S17)
    #[arg(long, action = clap::ArgAction::Set)]
    dealer_hits_soft_17: Option<bool>,

    /// Maximum hands after splitting
    #[arg(long)]
    max_hands: Option<u8>,
}

impl RuleArgs {
    fn resolve(&self) -> Result<RuleSet, RulesError> {
        let mut rules = match (&self.rules, &self.preset) {
            (Some(path), _) => RuleSet::load(path)?,
            (None, Some(preset)) => RuleSet::preset(preset)?,
            (None, None) => RuleSet::default(),
        };

        if let Some(v) = self.allow_double {
            rules.allow_double = v;
        }
        if let Some(v) = self.allow_das {
            rules.allow_das = v;
        }
        if let Some(v) = self.allow_resplit {
            rules.allow_resplit = v;
        }
        if let Some(v) = self.split_aces_one_card {
            rules.split_aces_one_card = v;
        }
        if let Some(v) = self.dealer_hits_soft_17 {
            rules.dealer_hits_soft_17 = v;
        }
        if let Some(v) = self.max_hands {
            rules.max_hands = v;
        }

        rules.validate()
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Decide {
            hand,
            dealer,
            json,
            rules,
        } => {
            let rules = rules.resolve().unwrap_or_else(|e| fail(&e.to_string()));
            let cards = parse_ranks(&hand).unwrap_or_else(|e| fail(&e.to_string()));
            let dealer: Option<Rank> = dealer
                .map(|d| d.parse::<Rank>())
                .transpose()
                .unwrap_or_else(|e| fail(&e.to_string()));

            let decision = decide(&cards, dealer, &rules);

            if json {
                match serde_json::to_string_pretty(&decision) {
                    Ok(out) => println!("{out}"),
                    Err(e) => fail(&format!("Cannot encode decision: {e}")),
                }
                return;
            }

            let eval = evaluate(&cards);
            let kind = if eval.is_soft { "soft" } else { "hard" };
            let shown: Vec<&str> = cards.iter().map(Rank::symbol).collect();
            println!("Hand:    {} ({kind} {})", shown.join(", "), eval.total);
            println!(
                "Dealer:  {}",
                dealer.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
            );
            println!("Action:  {}", decision.action);
            println!("Reason:  {}", decision.reason);
        }
        Command::Chart { rules } => {
            let rules = rules.resolve().unwrap_or_else(|e| fail(&e.to_string()));
            print_configuration(&rules);
            print!("{}", StrategyChart::generate(&rules));
        }
    }
}

fn print_configuration(rules: &RuleSet) {
    eprintln!("Configuration:");
    eprintln!(
        "  Dealer soft 17:     {}",
        if rules.dealer_hits_soft_17 {
            "hits (chart assumes stands)"
        } else {
            "stands"
        }
    );
    eprintln!("  Double allowed:     {}", rules.allow_double);
    eprintln!("  Double after split: {}", rules.allow_das);
    eprintln!("  Resplit:            {}", rules.allow_resplit);
    eprintln!("  Split aces 1 card:  {}", rules.split_aces_one_card);
    eprintln!("  Max hands:          {}", rules.hand_limit());
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}
