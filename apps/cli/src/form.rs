//! # Bill Form State
//!
//! The mutable side of the calculator: raw text fields exactly as typed,
//! plus the toggles. Every edit recomputes the allocation.
//!
//! ## Form Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Form State Operations                                │
//! │                                                                         │
//! │  User Action              Setter                  Then                  │
//! │  ───────────              ──────                  ────                  │
//! │                                                                         │
//! │  Type bill amount ───────► set_bill_amount() ───► allocate()           │
//! │  Change tip ─────────────► set_tip() ───────────► allocate()           │
//! │  Change head count ──────► set_people() ────────► sync roster, allocate│
//! │  Toggle split mode ──────► set_split_mode() ────► sync roster, allocate│
//! │  Toggle round up ────────► set_round_up() ──────► allocate()           │
//! │  Add / remove item ──────► add_item() ... ──────► allocate()           │
//! │  Reset ──────────────────► reset() ─────────────► allocate()           │
//! │                                                                         │
//! │  NOTE: one synchronous allocate() per edit, no debouncing. The engine  │
//! │        is linear in items + people.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::debug;

use tipsplit_core::validation::{
    format_amount_input, parse_amount, parse_participant_count, parse_percentage,
    validate_description, validate_line_item_count, validate_participant_count,
    validate_participant_name,
};
use tipsplit_core::{
    Allocation, Bill, BillMode, CoreError, CoreResult, LineItem, Participant, SplitMode,
    MAX_LINE_ITEMS, MAX_PARTICIPANTS,
};

use crate::config::AppConfig;

/// Amount a new field starts with.
const DEFAULT_AMOUNT_INPUT: &str = "0.00";

/// Tip a new field starts with.
const DEFAULT_TIP_INPUT: &str = "15";

/// One itemized row, as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemRow {
    pub description: String,
    pub amount: String,
    pub tip: String,
}

impl Default for ItemRow {
    fn default() -> Self {
        ItemRow {
            description: String::new(),
            amount: DEFAULT_AMOUNT_INPUT.to_string(),
            tip: DEFAULT_TIP_INPUT.to_string(),
        }
    }
}

impl ItemRow {
    /// Creates a row; the amount is normalized like a typed field.
    pub fn new(description: impl Into<String>, amount: &str, tip: impl Into<String>) -> Self {
        ItemRow {
            description: description.into(),
            amount: format_amount_input(amount),
            tip: tip.into(),
        }
    }

    fn to_line_item(&self) -> LineItem {
        LineItem::new(
            self.description.trim(),
            parse_amount(&self.amount),
            parse_percentage(&self.tip),
        )
    }
}

/// One participant row, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantRow {
    pub name: String,
    /// Weight field; only shown in weighted mode.
    pub weight: String,
}

/// The bill form.
///
/// ## Invariants
/// - `participants.len()` equals the clamped head count after every setter
/// - In weighted mode every participant row has a non-blank weight
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillForm {
    pub mode: BillMode,
    pub description: String,
    pub bill_amount: String,
    pub tip: String,
    pub items: Vec<ItemRow>,
    pub people: String,
    pub participants: Vec<ParticipantRow>,
    pub split_mode: SplitMode,
    pub round_up: bool,
}

impl Default for BillForm {
    fn default() -> Self {
        BillForm {
            mode: BillMode::Single,
            description: String::new(),
            bill_amount: DEFAULT_AMOUNT_INPUT.to_string(),
            tip: DEFAULT_TIP_INPUT.to_string(),
            items: Vec::new(),
            people: "1".to_string(),
            participants: vec![ParticipantRow::default()],
            split_mode: SplitMode::Equal,
            round_up: false,
        }
    }
}

impl BillForm {
    /// A fresh form seeded from configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        BillForm {
            tip: config.default_tip_input(),
            round_up: config.round_up,
            ..BillForm::default()
        }
    }

    /// Loads a saved form from a JSON bill file.
    ///
    /// Missing fields take their defaults and the roster is re-synced to
    /// the head count.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read bill file {}", path.display()))?;
        let mut form: BillForm = serde_json::from_str(&raw)
            .with_context(|| format!("invalid bill file {}", path.display()))?;
        form.sync_roster();
        debug!(path = %path.display(), items = form.items.len(), "Bill file loaded");
        Ok(form)
    }

    // =========================================================================
    // Snapshot & Recompute
    // =========================================================================

    /// Head count after clamping and capping.
    fn head_count(&self) -> usize {
        parse_participant_count(&self.people).clamp(1, MAX_PARTICIPANTS) as usize
    }

    /// Freezes the form into an immutable [`Bill`].
    pub fn to_bill(&self) -> Bill {
        let items = match self.mode {
            BillMode::Single => vec![LineItem::new(
                self.description.trim(),
                parse_amount(&self.bill_amount),
                parse_percentage(&self.tip),
            )],
            BillMode::Itemized => self.items.iter().map(ItemRow::to_line_item).collect(),
        };

        let participants = self
            .participants
            .iter()
            .map(|row| Participant {
                name: row.name.clone(),
                weight: match row.weight.trim() {
                    "" => None,
                    text => Some(parse_percentage(text)),
                },
            })
            .collect();

        Bill {
            mode: self.mode,
            description: self.description.clone(),
            items,
            participant_count: parse_participant_count(&self.people).min(MAX_PARTICIPANTS),
            participants,
            split_mode: self.split_mode,
            round_up: self.round_up,
        }
    }

    /// Runs the allocation engine on the current state.
    pub fn allocation(&self) -> Allocation {
        let allocation = self.to_bill().allocate();
        debug!(
            mode = ?allocation.split_mode,
            people = allocation.people(),
            grand_total = %allocation.grand_total,
            "Recomputed allocation"
        );
        allocation
    }

    /// Resizes the participant rows to the head count.
    ///
    /// Existing names and weights are kept. In weighted mode, blank weights
    /// are seeded with `floor(100 / people)`.
    fn sync_roster(&mut self) {
        let count = self.head_count();
        self.participants.resize_with(count, ParticipantRow::default);

        if self.split_mode == SplitMode::Weighted {
            let seed = (100 / count).to_string();
            for row in &mut self.participants {
                if row.weight.trim().is_empty() {
                    row.weight = seed.clone();
                }
            }
        }
    }

    // =========================================================================
    // Setters (each recomputes)
    // =========================================================================

    /// Sets the bill description.
    pub fn set_description(&mut self, description: &str) -> CoreResult<Allocation> {
        validate_description(description)?;
        self.description = description.to_string();
        Ok(self.allocation())
    }

    /// Sets the single-mode bill amount, reformatted as typed.
    pub fn set_bill_amount(&mut self, raw: &str) -> Allocation {
        self.bill_amount = format_amount_input(raw);
        self.allocation()
    }

    /// Sets the single-mode tip percentage.
    pub fn set_tip(&mut self, raw: &str) -> Allocation {
        self.tip = format_amount_input(raw);
        self.allocation()
    }

    /// Sets the head count and resizes the roster.
    ///
    /// Counts below 1 are kept as typed (the engine clamps and reports
    /// them). Counts above the maximum are refused.
    pub fn set_people(&mut self, raw: &str) -> CoreResult<Allocation> {
        let requested = parse_participant_count(raw);
        if requested >= 1 {
            validate_participant_count(requested).map_err(|_| CoreError::TooManyParticipants {
                requested,
                max: MAX_PARTICIPANTS,
            })?;
        }
        self.people = raw.trim().to_string();
        self.sync_roster();
        Ok(self.allocation())
    }

    /// Switches between equal and weighted split.
    pub fn set_split_mode(&mut self, split_mode: SplitMode) -> Allocation {
        self.split_mode = split_mode;
        self.sync_roster();
        self.allocation()
    }

    /// Turns the round-up policy on or off.
    pub fn set_round_up(&mut self, round_up: bool) -> Allocation {
        self.round_up = round_up;
        self.allocation()
    }

    /// Switches between a single amount and itemized entry.
    ///
    /// Entering itemized mode with no rows adds one default row.
    pub fn set_mode(&mut self, mode: BillMode) -> Allocation {
        self.mode = mode;
        if mode == BillMode::Itemized && self.items.is_empty() {
            self.items.push(ItemRow::default());
        }
        self.allocation()
    }

    /// Appends an itemized row.
    pub fn add_item(&mut self, row: ItemRow) -> CoreResult<Allocation> {
        validate_line_item_count(self.items.len() + 1)
            .map_err(|_| CoreError::TooManyLineItems { max: MAX_LINE_ITEMS })?;
        validate_description(&row.description)?;
        self.items.push(row);
        Ok(self.allocation())
    }

    /// Replaces the itemized row at a 1-based position.
    pub fn update_item(&mut self, position: usize, row: ItemRow) -> CoreResult<Allocation> {
        validate_description(&row.description)?;
        let slot = position
            .checked_sub(1)
            .and_then(|index| self.items.get_mut(index))
            .ok_or(CoreError::ItemNotFound(position))?;
        *slot = ItemRow {
            amount: format_amount_input(&row.amount),
            ..row
        };
        Ok(self.allocation())
    }

    /// Removes the itemized row at a 1-based position.
    pub fn remove_item(&mut self, position: usize) -> CoreResult<Allocation> {
        if position == 0 || position > self.items.len() {
            return Err(CoreError::ItemNotFound(position));
        }
        self.items.remove(position - 1);
        Ok(self.allocation())
    }

    /// Renames the participant at a 1-based position.
    pub fn set_participant_name(&mut self, position: usize, name: &str) -> CoreResult<Allocation> {
        validate_participant_name(name)?;
        self.participant_row(position)?.name = name.to_string();
        Ok(self.allocation())
    }

    /// Sets the weight of the participant at a 1-based position.
    pub fn set_participant_weight(&mut self, position: usize, raw: &str) -> CoreResult<Allocation> {
        self.participant_row(position)?.weight = raw.trim().to_string();
        Ok(self.allocation())
    }

    fn participant_row(&mut self, position: usize) -> CoreResult<&mut ParticipantRow> {
        position
            .checked_sub(1)
            .and_then(|index| self.participants.get_mut(index))
            .ok_or(CoreError::ParticipantNotFound(position))
    }

    /// Restores every field to its default.
    pub fn reset(&mut self) -> Allocation {
        *self = BillForm::default();
        self.allocation()
    }
}
