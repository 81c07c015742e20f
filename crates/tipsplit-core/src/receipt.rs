//! # Receipt Summary
//!
//! The data behind the shareable receipt: what an image renderer or a
//! share sheet needs, with amounts still as [`Money`].
//!
//! ## Receipt Layout
//! ```text
//! ┌──────────────────────────────────────┐
//! │           RECEIPT SUMMARY            │
//! │            TEAM DINNER               │  ← title
//! │ - - - - - - - - - - - - - - - - - - -│
//! │ Mode: Itemized Split   Currency: USD │
//! │ People: 3                            │
//! │ ITEM | TIP %               AMOUNT    │  ← items (itemized only)
//! │ Tip Amount:                 $14.00   │
//! │ GRAND TOTAL:               $114.00   │
//! │           SPLIT BREAKDOWN            │  ← splits
//! │ Ada                         $38.00   │
//! └──────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::allocation::Allocation;
use crate::money::{Currency, Money, Percentage};
use crate::types::{Bill, BillMode};

/// Title used when a single-mode bill has no description.
pub const DEFAULT_TITLE: &str = "General Expense";

/// Title used for itemized bills.
pub const ITEMIZED_TITLE: &str = "Multiple Items Expense";

/// File name offered to the share sheet for the rendered image.
pub const IMAGE_FILE_NAME: &str = "invoice_summary.png";

/// One itemized row on the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptLine {
    /// Item description, `Item <n>` when blank.
    pub description: String,
    pub amount: Money,
    pub tip_rate: Percentage,
    /// This item's own tip, rounded to the cent.
    pub tip: Money,
}

/// One row of the split breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ReceiptSplit {
    pub name: String,
    pub amount: Money,
}

/// Everything a collaborator needs to draw or share the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Receipt {
    pub title: String,
    pub mode: BillMode,
    pub currency: Currency,
    pub people: usize,
    pub round_up: bool,

    /// Itemized rows; empty in single mode.
    pub items: Vec<ReceiptLine>,

    /// Includes `rounding_surplus`.
    pub tip_total: Money,
    /// Cents the share rounding added on top of the bill and tip.
    pub rounding_surplus: Money,
    pub grand_total: Money,
    pub per_person: Money,
    pub splits: Vec<ReceiptSplit>,
}

impl Receipt {
    /// Builds the receipt for a bill and its allocation.
    ///
    /// `allocation` should come from `bill.allocate()`; the receipt copies
    /// its totals rather than recomputing them.
    pub fn new(bill: &Bill, allocation: &Allocation, currency: Currency) -> Self {
        let title = match bill.mode {
            BillMode::Single => {
                let description = bill.description.trim();
                if description.is_empty() {
                    DEFAULT_TITLE.to_string()
                } else {
                    description.to_string()
                }
            }
            BillMode::Itemized => ITEMIZED_TITLE.to_string(),
        };

        let items = match bill.mode {
            BillMode::Single => Vec::new(),
            BillMode::Itemized => bill
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| ReceiptLine {
                    description: match item.description.trim() {
                        "" => format!("Item {}", index + 1),
                        text => text.to_string(),
                    },
                    amount: item.amount,
                    tip_rate: item.tip_rate,
                    tip: item.tip(),
                })
                .collect(),
        };

        Receipt {
            title,
            mode: bill.mode,
            currency,
            people: allocation.people(),
            round_up: bill.round_up,
            items,
            tip_total: allocation.tip_total,
            rounding_surplus: allocation.rounding_surplus,
            grand_total: allocation.grand_total,
            per_person: allocation.per_person(),
            splits: allocation
                .shares
                .iter()
                .map(|share| ReceiptSplit {
                    name: share.name.clone(),
                    amount: share.amount,
                })
                .collect(),
        }
    }

    /// Title for the share sheet.
    pub fn share_title(&self) -> String {
        format!("Invoice: {}", self.title)
    }

    /// Body text for the share sheet.
    pub fn share_text(&self) -> String {
        format!(
            "Tip & Split Summary: {}",
            self.currency.format(self.grand_total)
        )
    }

    /// Suggested file name for the rendered image.
    pub fn file_name(&self) -> &'static str {
        IMAGE_FILE_NAME
    }

    /// Mode label shown in the receipt header.
    pub fn mode_label(&self) -> &'static str {
        match self.mode {
            BillMode::Single => "Single Split",
            BillMode::Itemized => "Itemized Split",
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
