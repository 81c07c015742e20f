//! # Tip & Split CLI
//!
//! Command-line front end for `tipsplit-core`.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Tip & Split CLI Startup                            │
//! │                                                                         │
//! │  1. Parse arguments (clap)                                             │
//! │     └── --bill, --tip, --people, --item, --name, --weight, ...         │
//! │                                                                         │
//! │  2. Initialize tracing (stderr)                                        │
//! │     └── RUST_LOG, or -v for debug output                               │
//! │                                                                         │
//! │  3. Load configuration                                                 │
//! │     └── TIPSPLIT_CURRENCY, TIPSPLIT_DEFAULT_TIP, TIPSPLIT_ROUND_UP     │
//! │                                                                         │
//! │  4. Build the form                                                     │
//! │     ├── Start from --file, or a fresh form seeded by config            │
//! │     └── Replay each flag through the matching form setter              │
//! │                                                                         │
//! │  5. Allocate, build the receipt, print it (text or JSON)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod form;
pub mod output;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use tipsplit_core::{BillMode, Currency, Receipt, SplitMode};

use crate::cli::{parse_item_arg, Cli};
use crate::config::AppConfig;
use crate::form::BillForm;

/// Runs the CLI.
///
/// ## Errors
/// Bad configuration, an unreadable bill file, or a refused form edit
/// (too many people, unknown participant position, ...).
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = AppConfig::from_env().context("failed to load configuration")?;
    debug!(?config, "Configuration loaded");

    let output = execute(&cli, &config)?;
    print!("{}", output);
    Ok(())
}

/// Computes the bill described by `cli` and renders it.
pub fn execute(cli: &Cli, config: &AppConfig) -> anyhow::Result<String> {
    let currency = match &cli.currency {
        Some(code) => code.parse::<Currency>()?,
        None => config.currency,
    };

    let form = build_form(cli, config)?;
    let allocation = form.allocation();
    for issue in &allocation.issues {
        warn!(%issue, "Input adjusted");
    }

    let receipt = Receipt::new(&form.to_bill(), &allocation, currency);
    info!(
        people = receipt.people,
        grand_total = %receipt.grand_total,
        tip_total = %receipt.tip_total,
        "Bill split"
    );

    output::render(&receipt, &allocation, cli.format)
}

/// Replays the command line into a form, one setter per flag.
///
/// ## Order
/// description, bill, tip, items, people, split mode, names, weights,
/// round up. When `--people` is absent the roster grows to fit the names
/// or weights given; weights without `--split` imply a weighted split.
pub fn build_form(cli: &Cli, config: &AppConfig) -> anyhow::Result<BillForm> {
    let mut form = match &cli.file {
        Some(path) => BillForm::load(path)?,
        None => BillForm::from_config(config),
    };

    if let Some(description) = &cli.description {
        form.set_description(description)?;
    }
    if let Some(bill) = &cli.bill {
        form.set_bill_amount(bill);
    }
    if let Some(tip) = &cli.tip {
        form.set_tip(tip);
    }

    if !cli.items.is_empty() {
        let default_tip = form.tip.clone();
        for raw in &cli.items {
            let row = parse_item_arg(raw, &default_tip)?;
            form.add_item(row)?;
        }
        form.set_mode(BillMode::Itemized);
    }

    match &cli.people {
        Some(people) => {
            form.set_people(people)?;
        }
        None => {
            let listed = cli.names.len().max(cli.weights.len());
            if listed > form.participants.len() {
                form.set_people(&listed.to_string())?;
            }
        }
    }

    match cli.split {
        Some(split) => {
            form.set_split_mode(split.into());
        }
        None if !cli.weights.is_empty() => {
            form.set_split_mode(SplitMode::Weighted);
        }
        None => {}
    }

    for (index, name) in cli.names.iter().enumerate() {
        form.set_participant_name(index + 1, name)?;
    }
    for (index, weight) in cli.weights.iter().enumerate() {
        form.set_participant_weight(index + 1, weight)?;
    }

    if cli.round_up {
        form.set_round_up(true);
    }

    Ok(form)
}

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `-v` - Debug for the tipsplit crates
/// - Default: warnings only (adjusted inputs)
fn init_tracing(verbose: bool) {
    let default_directives = if verbose {
        "info,tipsplit_cli=debug,tipsplit_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
