//! Command-line interface definitions and handlers.
//!
//! Two subcommands: `pick` draws random commanders for a filter (optionally
//! accepting the last draw to see its deck suggestions), and `suggest`
//! prints suggestions for a commander looked up by fuzzy name.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;

use crate::app::PickerSession;
use crate::config::Config;
use crate::core::normalize::normalize;
use crate::domain::{Color, Commander, Filter, SuggestionGroup};
use crate::error::Result;
use crate::ports::{CardSource, SuggestionSource};
use crate::scryfall::ScryfallClient;
use crate::suggest::{EdhrecScraper, SuggestionService};

/// Commander picker: filtered random commanders with deck suggestions
#[derive(Parser, Debug)]
#[command(name = "helmsman")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./helmsman.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the helmsman CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw random commanders matching a filter
    Pick(PickArgs),
    /// Print deck suggestions for a commander by fuzzy name
    Suggest(SuggestArgs),
}

#[derive(Args, Debug)]
pub struct PickArgs {
    /// Color identity letters out of WUBRG, e.g. "UG"; empty means any
    #[arg(long, default_value = "")]
    pub colors: String,

    /// Minimum mana value
    #[arg(long, default_value_t = 0)]
    pub mana_min: u32,

    /// Maximum mana value
    #[arg(long, default_value_t = 15)]
    pub mana_max: u32,

    /// How many commanders to draw
    #[arg(long, default_value_t = 1)]
    pub count: usize,

    /// Accept the last draw and print its deck suggestions
    #[arg(long)]
    pub accept: bool,
}

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Commander name (fuzzy matched)
    #[arg(required = true)]
    pub name: Vec<String>,
}

pub async fn run(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Pick(args) => pick(args, config).await,
        Commands::Suggest(args) => suggest(args, config).await,
    }
}

async fn pick(args: PickArgs, config: &Config) -> Result<()> {
    let filter = parse_filter(&args)?;
    let session = PickerSession::from_config(config)?;
    session.apply_filter(filter);

    for drawn in 0..args.count {
        let commander = if drawn == 0 {
            session.next_commander().await?
        } else {
            session.reject_current().await?
        };
        print_commander(&commander);
    }

    if args.accept {
        let accepted = session.accept_current().await?;
        if let Some(groups) = &accepted.deck_suggestions {
            print_suggestions(&accepted.name, groups);
        }
    }
    Ok(())
}

async fn suggest(args: SuggestArgs, config: &Config) -> Result<()> {
    let name = args.name.join(" ");
    let client: Arc<dyn CardSource> =
        Arc::new(ScryfallClient::new(&config.network, &config.limits)?);
    let scraper: Arc<dyn SuggestionSource> = Arc::new(EdhrecScraper::new(&config.network)?);

    let card = client.named(&name).await?;
    let commander = normalize(&card, None);

    let service = SuggestionService::new(scraper, client);
    let groups = service.for_commander(&commander).await;
    print_suggestions(&commander.name, &groups);
    Ok(())
}

fn parse_filter(args: &PickArgs) -> Result<Filter> {
    let mut colors = Vec::new();
    for letter in args.colors.chars() {
        colors.push(Color::from_letter(letter)?);
    }
    Ok(Filter::new(colors, args.mana_min, args.mana_max)?)
}

fn print_commander(commander: &Commander) {
    let identity: String = commander.colors.iter().map(|c| c.letter()).collect();
    let identity = if identity.is_empty() {
        "colorless".to_string()
    } else {
        identity
    };

    println!();
    println!("{}", commander.name.bold());
    println!("{}", commander.type_line.dimmed());
    println!(
        "identity: {}  mana value: {}",
        identity.cyan(),
        commander.mana_value
    );
    if let Some(partner) = &commander.partner {
        println!("paired with: {}", partner.name.bold());
    }
    println!("{}", commander.explanation);
}

fn print_suggestions(name: &str, groups: &[SuggestionGroup]) {
    println!();
    println!("{} {}", "Building around".bold(), name.bold());
    for group in groups {
        println!();
        println!("{}", group.category.underline());
        for card in &group.cards {
            println!("  {card}");
        }
    }
}
