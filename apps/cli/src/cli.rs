//! # Command-Line Arguments
//!
//! Flags map one-to-one onto form fields. Numbers stay as text so they go
//! through the same lenient parsing as typed input.
//!
//! ```text
//! tipsplit --bill 120 --tip 18 --people 3 --name Ada --name Bea --name Cy
//! tipsplit --item "Pizza:60:10" --item "Wine:40:20" --people 2 --format json
//! tipsplit --people 2 --split weighted --weight 30 --weight 70 --round-up
//! tipsplit --file dinner.json
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tipsplit_core::{SplitMode, ValidationError};

use crate::form::ItemRow;

/// Tip & Split: calculate the tip and split the bill.
#[derive(Parser, Debug)]
#[command(name = "tipsplit", version)]
#[command(about = "Calculate the tip and split a bill between people")]
pub struct Cli {
    /// Bill amount before tip (single mode)
    #[arg(short, long)]
    pub bill: Option<String>,

    /// Tip percentage (single mode, and the default for items)
    #[arg(short, long)]
    pub tip: Option<String>,

    /// Number of people splitting the bill
    #[arg(short, long, allow_hyphen_values = true)]
    pub people: Option<String>,

    /// Line item as "description:amount:tip"; repeat for each item
    #[arg(short, long = "item", value_name = "ITEM")]
    pub items: Vec<String>,

    /// Participant name, in roster order; repeat for each person
    #[arg(short, long = "name", value_name = "NAME")]
    pub names: Vec<String>,

    /// Participant weight for a weighted split, in roster order
    #[arg(short, long = "weight", value_name = "WEIGHT")]
    pub weights: Vec<String>,

    /// How the total is split
    #[arg(short, long, value_enum)]
    pub split: Option<SplitArg>,

    /// Round each share up to a whole currency unit
    #[arg(short, long)]
    pub round_up: bool,

    /// Receipt title (single mode)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Currency code for display (USD, EUR, GBP, JPY, NGN)
    #[arg(short, long)]
    pub currency: Option<String>,

    /// Load a saved bill from a JSON file; flags are applied on top
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// `--split` values.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitArg {
    Equal,
    #[value(alias = "percent")]
    Weighted,
}

impl From<SplitArg> for SplitMode {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::Equal => SplitMode::Equal,
            SplitArg::Weighted => SplitMode::Weighted,
        }
    }
}

/// How the receipt is printed.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum OutputFormat {
    /// Plain-text receipt
    #[default]
    Text,
    /// Pretty-printed JSON report
    Json,
}

/// Parses one `--item` value.
///
/// ## Accepted Shapes
/// - `"45.50"` → unnamed item at the default tip
/// - `"Pizza:60"` → named item at the default tip
/// - `"Pizza:60:10"` → named item with its own tip
///
/// Colons inside the description are kept: the last two fields are always
/// amount and tip.
pub fn parse_item_arg(raw: &str, default_tip: &str) -> Result<ItemRow, ValidationError> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "item".to_string(),
        reason: reason.to_string(),
    };

    if raw.trim().is_empty() {
        return Err(invalid("expected description:amount:tip"));
    }

    let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
    let (description, amount, tip) = match parts.as_slice() {
        [amount] => (String::new(), *amount, default_tip),
        [description, amount] => (description.to_string(), *amount, default_tip),
        [description @ .., amount, tip] => (description.join(":"), *amount, *tip),
        [] => return Err(invalid("expected description:amount:tip")),
    };

    if amount.is_empty() {
        return Err(invalid("amount is missing"));
    }
    let tip = if tip.is_empty() { default_tip } else { tip };

    Ok(ItemRow::new(description, amount, tip))
}
