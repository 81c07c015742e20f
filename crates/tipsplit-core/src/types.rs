//! # Domain Types
//!
//! The inputs of a calculation, rebuilt from the form on every change.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Bill Snapshot                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │   Participant   │   │   SplitMode     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  description    │   │  name           │   │  Equal          │       │
//! │  │  amount (Money) │   │  weight (bps)   │   │  Weighted       │       │
//! │  │  tip_rate (bps) │   │                 │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │            │                    │                     │                 │
//! │            └────────────────────┼─────────────────────┘                 │
//! │                                 ▼                                       │
//! │                        ┌─────────────────┐                              │
//! │                        │      Bill       │ ──► allocate() ──► Allocation│
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::allocation::{allocate_roster, Allocation};
use crate::error::AllocationIssue;
use crate::money::{Money, Percentage};

// =============================================================================
// Line Item
// =============================================================================

/// One entry on the bill, with its own tip rate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Free text, may be blank.
    pub description: String,

    /// Amount before tip. Never negative.
    pub amount: Money,

    /// Tip rate applied to this item only.
    pub tip_rate: Percentage,
}

impl LineItem {
    /// Creates a line item. Negative amounts are clamped to zero.
    pub fn new(description: impl Into<String>, amount: Money, tip_rate: Percentage) -> Self {
        LineItem {
            description: description.into(),
            amount: amount.non_negative(),
            tip_rate,
        }
    }

    /// Tip on this item alone, rounded to the cent.
    ///
    /// For receipt lines only. Bill totals round once over all items, so
    /// these may not add up to [`crate::Allocation::tip_total`].
    #[inline]
    pub fn tip(&self) -> Money {
        self.amount.calculate_tip(self.tip_rate)
    }
}

// =============================================================================
// Participant
// =============================================================================

/// Someone sharing the bill.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Participant {
    /// Display name. Blank names fall back to `Person <position>`.
    pub name: String,

    /// Share weight for weighted splits. `None` counts as zero.
    #[serde(default)]
    pub weight: Option<Percentage>,
}

impl Participant {
    /// Creates a participant without a weight.
    pub fn named(name: impl Into<String>) -> Self {
        Participant {
            name: name.into(),
            weight: None,
        }
    }

    /// Creates a participant with a share weight.
    pub fn weighted(name: impl Into<String>, weight: Percentage) -> Self {
        Participant {
            name: name.into(),
            weight: Some(weight),
        }
    }

    /// The name shown for this participant at a 1-based roster position.
    ///
    /// ```rust
    /// use tipsplit_core::Participant;
    ///
    /// assert_eq!(Participant::named("  ").display_name(2), "Person 2");
    /// assert_eq!(Participant::named(" Ada ").display_name(2), "Ada");
    /// ```
    pub fn display_name(&self, position: usize) -> String {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            format!("Person {}", position)
        } else {
            trimmed.to_string()
        }
    }

    /// Weight used by the engine; a missing weight is zero.
    #[inline]
    pub fn effective_weight(&self) -> Percentage {
        self.weight.unwrap_or_default()
    }
}

// =============================================================================
// Modes
// =============================================================================

/// How the grand total is divided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SplitMode {
    /// Everyone pays the same.
    #[default]
    Equal,
    /// Shares follow each participant's weight.
    #[serde(alias = "percent")]
    Weighted,
}

/// Whether the bill is one amount or a list of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BillMode {
    /// One amount with one tip rate.
    #[default]
    Single,
    /// Several items, each with its own tip rate.
    #[serde(alias = "multiple")]
    Itemized,
}

// =============================================================================
// Bill
// =============================================================================

/// Immutable snapshot of everything a calculation needs.
///
/// The form layer owns the mutable state and hands a fresh `Bill` to the
/// engine on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Bill {
    pub mode: BillMode,

    /// Title for single-mode receipts.
    #[serde(default)]
    pub description: String,

    /// Line items. Single mode carries exactly one.
    pub items: Vec<LineItem>,

    /// Requested head count, before clamping.
    pub participant_count: i64,

    /// Roster as entered; may be shorter or longer than the head count.
    #[serde(default)]
    pub participants: Vec<Participant>,

    pub split_mode: SplitMode,

    /// Round each share up to a whole currency unit.
    #[serde(default)]
    pub round_up: bool,
}

impl Default for Bill {
    fn default() -> Self {
        Bill {
            mode: BillMode::Single,
            description: String::new(),
            items: vec![LineItem::default()],
            participant_count: 1,
            participants: Vec::new(),
            split_mode: SplitMode::Equal,
            round_up: false,
        }
    }
}

impl Bill {
    /// A single-amount bill split equally between `people`.
    pub fn single(amount: Money, tip_rate: Percentage, people: i64) -> Self {
        Bill {
            items: vec![LineItem::new("", amount, tip_rate)],
            participant_count: people,
            ..Bill::default()
        }
    }

    /// The roster the engine splits between, with exactly
    /// `max(participant_count, 1)` entries.
    ///
    /// Extra entries are dropped and missing ones are padded with blank
    /// participants. A clamped count is reported as an issue.
    pub fn roster(&self) -> (Vec<Participant>, Option<AllocationIssue>) {
        let issue = (self.participant_count < 1).then_some(AllocationIssue::InvalidParticipantCount {
            requested: self.participant_count,
        });
        let count = self.participant_count.max(1) as usize;

        let mut roster: Vec<Participant> = self.participants.iter().take(count).cloned().collect();
        roster.resize_with(count, Participant::default);
        (roster, issue)
    }

    /// Runs the allocation engine on this bill.
    pub fn allocate(&self) -> Allocation {
        let (roster, issue) = self.roster();
        let mut allocation = allocate_roster(&self.items, &roster, self.split_mode, self.round_up);
        if let Some(issue) = issue {
            allocation.issues.insert(0, issue);
        }
        allocation
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_item_tip() {
        let item = LineItem::new("Pizza", Money::from_cents(6_000), Percentage::from_percentage(10.0));
        assert_eq!(item.tip().cents(), 600);
    }

    #[test]
    fn test_line_item_clamps_negative_amount() {
        let item = LineItem::new("Refund?", Money::from_cents(-500), Percentage::from_bps(1_500));
        assert!(item.amount.is_zero());
        assert!(item.tip().is_zero());
    }

    #[test]
    fn test_deserialized_negative_amount_is_ignored() {
        let bill: Bill = serde_json::from_str(
            r#"{
                "mode": "itemized",
                "items": [
                    {"description": "Refund", "amount": -5000, "tipRate": 2000},
                    {"description": "Tea", "amount": 1000, "tipRate": 1000}
                ],
                "participantCount": 1,
                "splitMode": "equal"
            }"#,
        )
        .unwrap();
        assert_eq!(bill.items[0].amount.cents(), -5_000);

        let allocation = bill.allocate();
        assert_eq!(allocation.base_total.cents(), 1_000);
        assert_eq!(allocation.grand_total.cents(), 1_100);
    }

    #[test]
    fn test_display_name_placeholder() {
        assert_eq!(Participant::default().display_name(1), "Person 1");
        assert_eq!(Participant::named("Jane Doe").display_name(4), "Jane Doe");
    }

    #[test]
    fn test_split_mode_accepts_legacy_alias() {
        let mode: SplitMode = serde_json::from_str(r#""percent""#).unwrap();
        assert_eq!(mode, SplitMode::Weighted);
        let mode: BillMode = serde_json::from_str(r#""multiple""#).unwrap();
        assert_eq!(mode, BillMode::Itemized);
    }

    #[test]
    fn test_roster_pads_and_truncates() {
        let mut bill = Bill::single(Money::from_cents(1_000), Percentage::zero(), 3);
        bill.participants = vec![Participant::named("Ann")];

        let (roster, issue) = bill.roster();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].name, "Ann");
        assert_eq!(roster[2], Participant::default());
        assert!(issue.is_none());

        bill.participant_count = 1;
        bill.participants.push(Participant::named("Bob"));
        let (roster, _) = bill.roster();
        assert_eq!(roster, vec![Participant::named("Ann")]);
    }

    #[test]
    fn test_roster_clamps_count_below_one() {
        let bill = Bill::single(Money::from_cents(1_000), Percentage::zero(), -4);
        let (roster, issue) = bill.roster();
        assert_eq!(roster.len(), 1);
        assert_eq!(
            issue,
            Some(AllocationIssue::InvalidParticipantCount { requested: -4 })
        );
    }

    #[test]
    fn test_bill_deserializes_from_camel_case() {
        let json = r#"{
            "mode": "itemized",
            "items": [
                {"description": "Pizza", "amount": 6000, "tipRate": 1000},
                {"description": "Wine", "amount": 4000, "tipRate": 2000}
            ],
            "participantCount": 2,
            "participants": [{"name": "A", "weight": 3000}, {"name": "B"}],
            "splitMode": "weighted"
        }"#;
        let bill: Bill = serde_json::from_str(json).unwrap();
        assert_eq!(bill.mode, BillMode::Itemized);
        assert_eq!(bill.items[1].amount.cents(), 4_000);
        assert_eq!(bill.participants[1].weight, None);
        assert!(!bill.round_up);
    }
}
