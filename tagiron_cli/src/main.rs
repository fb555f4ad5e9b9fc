use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tagiron::{default_catalog, load_catalog, Hand};
use tagiron_cli::{play, Config, Lang, Prompter};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Your hand, e.g. "1r 3b 5 7r 9b". Asked for interactively if not given
    #[arg(long)]
    hand: Option<Hand>,

    /// Path to a JSON file with the question cards, instead of the built-in ones
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Language of the card texts
    #[arg(long, value_enum, default_value_t = Lang::En)]
    lang: Lang,

    /// Do not clear the screen before redrawing
    #[arg(long, default_value_t = false)]
    no_clear: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let catalog = match &args.catalog {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Could not open catalog {}", path.display()))?;
            load_catalog(BufReader::new(file))
                .with_context(|| format!("Could not load catalog {}", path.display()))?
        }
        None => default_catalog()?,
    };
    info!(cards = catalog.len(), "Loaded catalog");

    let config = Config {
        lang: args.lang,
        clear_screen: !args.no_clear,
    };
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
    play(&mut prompter, &config, &catalog, args.hand)
}

// Logs go to stderr so that they don't get mixed into the dashboard.
fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
