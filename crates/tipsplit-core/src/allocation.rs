//! # Allocation Engine
//!
//! Turns line items and a roster into a tip total, a grand total and one
//! share per participant.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Step 1: Base totals                                                    │
//! │    base  = Σ item.amount                                                │
//! │    tip   = Σ round(item.amount × item.tip_rate)   (per item)            │
//! │    grand = base + tip                                                   │
//! │                                                                         │
//! │  Step 2: Split                                                          │
//! │    Equal (or P ≤ 1)    per = ceil(grand / P)  to the cent               │
//! │                        round_up: per = ceil(grand / P) to the unit      │
//! │                                                                         │
//! │    Weighted            share_i = floor(grand × w_i / Σw)  (i < last)    │
//! │                        share_last = grand − Σ share_i                   │
//! │                        round_up: every share → next whole unit          │
//! │                                                                         │
//! │  Step 3: Reconcile                                                      │
//! │    grand = Σ shares          tip = grand − base                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The last participant in roster order always absorbs the weighted-split
//! remainder. Reordering the roster changes who pays the odd cent.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::AllocationIssue;
use crate::money::Money;
use crate::types::{LineItem, Participant, SplitMode};

// =============================================================================
// Result Types
// =============================================================================

/// What one participant owes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Share {
    /// 1-based roster position. This, not the name, identifies the share.
    pub position: usize,

    /// Display name (placeholder for blank names).
    pub name: String,

    pub amount: Money,
}

/// Result of one calculation.
///
/// ## Invariants
/// - `shares` sum exactly to `grand_total`
/// - `grand_total == base_total + tip_total`
/// - `shares` are in roster order, one per participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Allocation {
    /// The mode actually applied. A single participant always gets `Equal`.
    pub split_mode: SplitMode,

    pub base_total: Money,

    /// Tip including any rounding surplus.
    pub tip_total: Money,

    pub grand_total: Money,

    pub shares: Vec<Share>,

    /// Cents added by share rounding, already included in `tip_total`.
    ///
    /// Zero when the shares divide the bill exactly.
    #[serde(default)]
    pub rounding_surplus: Money,

    /// Input problems the engine recovered from.
    #[serde(default)]
    pub issues: Vec<AllocationIssue>,
}

impl Allocation {
    /// Number of participants the bill was split between.
    #[inline]
    pub fn people(&self) -> usize {
        self.shares.len()
    }

    /// The "per person" figure.
    ///
    /// Equal split: the share everyone pays. Weighted split: the average
    /// share, rounded to the cent, for display only.
    pub fn per_person(&self) -> Money {
        match (self.split_mode, self.shares.first()) {
            (SplitMode::Equal, Some(first)) => first.amount,
            _ => self.grand_total.split_round(self.people() as i64),
        }
    }

    /// Looks up a share by 1-based roster position.
    pub fn share_for(&self, position: usize) -> Option<&Share> {
        position
            .checked_sub(1)
            .and_then(|index| self.shares.get(index))
    }

    /// Shares keyed by display name, in first-seen order.
    ///
    /// Compatibility view for consumers that key by name: when two
    /// participants share a name, the later amount overwrites the earlier
    /// one and the entry keeps its original position. Values of this view
    /// may therefore sum to less than `grand_total`.
    pub fn by_name(&self) -> Vec<(String, Money)> {
        let mut entries: Vec<(String, Money)> = Vec::with_capacity(self.shares.len());
        for share in &self.shares {
            match entries.iter_mut().find(|(name, _)| *name == share.name) {
                Some(entry) => entry.1 = share.amount,
                None => entries.push((share.name.clone(), share.amount)),
            }
        }
        entries
    }

    /// Sum of all shares. Equal to `grand_total` by construction.
    pub fn shares_total(&self) -> Money {
        self.shares.iter().map(|share| share.amount).sum()
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Allocates a bill between `participants`.
///
/// The participant count is `participants.len()`; an empty slice is
/// treated as one anonymous participant and reported as
/// [`AllocationIssue::InvalidParticipantCount`].
///
/// ## Example
/// ```rust
/// use tipsplit_core::{allocate, LineItem, Money, Participant, Percentage, SplitMode};
///
/// let items = [LineItem::new("", Money::from_cents(10_001), Percentage::zero())];
/// let people = [
///     Participant::weighted("A", Percentage::from_percentage(50.0)),
///     Participant::weighted("B", Percentage::from_percentage(50.0)),
/// ];
///
/// let allocation = allocate(&items, &people, SplitMode::Weighted, false);
/// assert_eq!(allocation.shares[0].amount.cents(), 5_000); // floor(50.005)
/// assert_eq!(allocation.shares[1].amount.cents(), 5_001); // remainder
/// ```
pub fn allocate(
    items: &[LineItem],
    participants: &[Participant],
    split_mode: SplitMode,
    round_up: bool,
) -> Allocation {
    if participants.is_empty() {
        let mut allocation =
            allocate_roster(items, &[Participant::default()], split_mode, round_up);
        allocation
            .issues
            .insert(0, AllocationIssue::InvalidParticipantCount { requested: 0 });
        return allocation;
    }
    allocate_roster(items, participants, split_mode, round_up)
}

/// Engine body. `roster` must not be empty.
pub(crate) fn allocate_roster(
    items: &[LineItem],
    roster: &[Participant],
    split_mode: SplitMode,
    round_up: bool,
) -> Allocation {
    // Items built by hand or deserialized may carry negative amounts.
    let item_amounts = || items.iter().map(|item| item.amount.non_negative());

    let base_total = item_amounts().sum::<Money>().min(Money::MAX_TOTAL);
    let tip_total = Money::total_tip(item_amounts().zip(items.iter().map(|item| item.tip_rate)));
    let exact_total = (base_total + tip_total).min(Money::MAX_TOTAL);

    let count = roster.len().max(1) as i64;
    let split_mode = if count <= 1 { SplitMode::Equal } else { split_mode };

    let mut issues = Vec::new();
    let amounts = match split_mode {
        SplitMode::Equal => split_equal(exact_total, count, round_up),
        SplitMode::Weighted => {
            let weights: Vec<u64> = roster
                .iter()
                .map(|p| u64::from(p.effective_weight().bps()))
                .collect();
            if weights.iter().all(|w| *w == 0) {
                issues.push(AllocationIssue::DegenerateWeights);
            }
            split_weighted(exact_total, &weights, round_up)
        }
    };

    let shares: Vec<Share> = roster
        .iter()
        .zip(amounts)
        .enumerate()
        .map(|(index, (participant, amount))| Share {
            position: index + 1,
            name: participant.display_name(index + 1),
            amount,
        })
        .collect();

    // Rounding surplus is folded into the tip so both invariants hold.
    let grand_total: Money = shares.iter().map(|share| share.amount).sum();
    Allocation {
        split_mode,
        base_total,
        tip_total: grand_total - base_total,
        grand_total,
        shares,
        rounding_surplus: grand_total - exact_total,
        issues,
    }
}

/// Identical shares for everyone, never short of `grand_total`.
fn split_equal(grand_total: Money, count: i64, round_up: bool) -> Vec<Money> {
    let per_person = if round_up {
        grand_total.split_ceil(count).ceil_to_major()
    } else {
        grand_total.split_ceil(count)
    };
    vec![per_person; count as usize]
}

/// Proportional shares with the remainder on the last entry.
///
/// Non-last shares are truncated to the cent so their sum can never pass
/// `grand_total`; the last share is therefore never negative.
fn split_weighted(grand_total: Money, weights: &[u64], round_up: bool) -> Vec<Money> {
    let total_weight: u64 = weights.iter().sum();
    let last = weights.len().saturating_sub(1);

    let mut distributed = Money::zero();
    let mut shares = Vec::with_capacity(weights.len());
    for (index, weight) in weights.iter().enumerate() {
        let share = if index < last {
            let share = if total_weight == 0 {
                Money::zero()
            } else {
                let scaled = grand_total.cents() as i128 * *weight as i128;
                Money::from_cents(scaled.div_euclid(total_weight as i128) as i64)
            };
            distributed += share;
            share
        } else {
            grand_total - distributed
        };
        shares.push(share);
    }

    if round_up {
        shares.iter_mut().for_each(|share| *share = share.ceil_to_major());
    }
    shares
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Percentage;
    use crate::types::Bill;

    fn item(cents: i64, tip_pct: f64) -> LineItem {
        LineItem::new("", Money::from_cents(cents), Percentage::from_percentage(tip_pct))
    }

    fn weighted(names_and_weights: &[(&str, f64)]) -> Vec<Participant> {
        names_and_weights
            .iter()
            .map(|(name, w)| Participant::weighted(*name, Percentage::from_percentage(*w)))
            .collect()
    }

    #[test]
    fn test_single_payer() {
        let allocation = allocate(&[item(10_000, 15.0)], &[Participant::default()], SplitMode::Equal, false);

        assert_eq!(allocation.tip_total.cents(), 1_500);
        assert_eq!(allocation.grand_total.cents(), 11_500);
        assert_eq!(
            allocation.by_name(),
            vec![("Person 1".to_string(), Money::from_cents(11_500))]
        );
    }

    #[test]
    fn test_equal_split_four_ways() {
        let people = vec![Participant::default(); 4];
        let allocation = allocate(&[item(10_000, 10.0)], &people, SplitMode::Equal, false);

        assert_eq!(allocation.grand_total.cents(), 11_000);
        assert!(allocation.shares.iter().all(|s| s.amount.cents() == 2_750));
        assert!(allocation.rounding_surplus.is_zero());
        assert_eq!(allocation.per_person().cents(), 2_750);
    }

    #[test]
    fn test_equal_split_round_up() {
        let people = vec![Participant::default(); 4];
        let allocation = allocate(&[item(10_000, 10.0)], &people, SplitMode::Equal, true);

        assert!(allocation.shares.iter().all(|s| s.amount.cents() == 2_800));
        assert_eq!(allocation.grand_total.cents(), 11_200);
        assert_eq!(allocation.tip_total.cents(), 1_200);
        assert_eq!(allocation.rounding_surplus.cents(), 200);
    }

    #[test]
    fn test_equal_split_uneven_cents_rounds_up_to_cent() {
        // $100.00 / 3 → $33.34 each, surplus cent goes to the tip
        let people = vec![Participant::default(); 3];
        let allocation = allocate(&[item(10_000, 0.0)], &people, SplitMode::Equal, false);

        assert_eq!(allocation.per_person().cents(), 3_334);
        assert_eq!(allocation.grand_total.cents(), 10_002);
        assert_eq!(allocation.tip_total.cents(), 2);
        assert_eq!(allocation.rounding_surplus.cents(), 2);
    }

    #[test]
    fn test_mixed_tip_rates() {
        let allocation = allocate(
            &[item(6_000, 10.0), item(4_000, 20.0)],
            &[Participant::default()],
            SplitMode::Equal,
            false,
        );
        assert_eq!(allocation.base_total.cents(), 10_000);
        assert_eq!(allocation.tip_total.cents(), 1_400);
        assert_eq!(allocation.grand_total.cents(), 11_400);
    }

    #[test]
    fn test_tip_is_rounded_once_over_all_items() {
        // 100 × $0.01 at 50%: exact tip $0.50
        let items = vec![item(1, 50.0); 100];
        let allocation = allocate(&items, &[Participant::default()], SplitMode::Equal, false);

        assert_eq!(allocation.base_total.cents(), 100);
        assert_eq!(allocation.tip_total.cents(), 50);
        assert_eq!(allocation.grand_total.cents(), 150);
    }

    #[test]
    fn test_huge_amounts_are_capped() {
        let items = vec![
            LineItem::new("", Money::from_cents(i64::MAX), Percentage::from_bps(u32::MAX)),
            LineItem::new("", Money::from_cents(i64::MAX), Percentage::from_percentage(15.0)),
        ];
        for mode in [SplitMode::Equal, SplitMode::Weighted] {
            for round_up in [false, true] {
                let people = vec![Participant::weighted("", Percentage::from_bps(3_333)); 3];
                let allocation = allocate(&items, &people, mode, round_up);

                assert_eq!(allocation.base_total, Money::MAX_TOTAL);
                assert!(allocation.grand_total >= Money::MAX_TOTAL);
                assert_eq!(allocation.shares_total(), allocation.grand_total);
                assert_eq!(
                    allocation.grand_total - allocation.base_total,
                    allocation.tip_total
                );
                assert!(allocation.shares.iter().all(|s| !s.amount.is_negative()));
            }
        }
    }

    #[test]
    fn test_negative_amounts_count_as_zero() {
        // Struct literal skips the clamp in LineItem::new
        let items = [
            LineItem {
                description: String::new(),
                amount: Money::from_cents(-5_000),
                tip_rate: Percentage::from_percentage(20.0),
            },
            item(1_000, 10.0),
        ];
        let allocation = allocate(&items, &[Participant::default()], SplitMode::Equal, false);
        assert_eq!(allocation.base_total.cents(), 1_000);
        assert_eq!(allocation.tip_total.cents(), 100);
        assert_eq!(allocation.grand_total.cents(), 1_100);
    }

    #[test]
    fn test_weighted_split_exact() {
        let people = weighted(&[("A", 30.0), ("B", 70.0)]);
        let allocation = allocate(&[item(10_000, 0.0)], &people, SplitMode::Weighted, false);

        assert_eq!(allocation.shares[0].amount.cents(), 3_000);
        assert_eq!(allocation.shares[1].amount.cents(), 7_000);
    }

    #[test]
    fn test_weighted_split_last_absorbs_remainder() {
        let people = weighted(&[("A", 50.0), ("B", 50.0)]);
        let allocation = allocate(&[item(10_001, 0.0)], &people, SplitMode::Weighted, false);

        assert_eq!(allocation.shares[0].amount.cents(), 5_000);
        assert_eq!(allocation.shares[1].amount.cents(), 5_001);
        assert_eq!(allocation.grand_total.cents(), 10_001);
    }

    #[test]
    fn test_weighted_split_weights_need_not_sum_to_hundred() {
        // 1:1:2 ratio expressed as 10/10/20
        let people = weighted(&[("A", 10.0), ("B", 10.0), ("C", 20.0)]);
        let allocation = allocate(&[item(10_000, 0.0)], &people, SplitMode::Weighted, false);

        let amounts: Vec<i64> = allocation.shares.iter().map(|s| s.amount.cents()).collect();
        assert_eq!(amounts, vec![2_500, 2_500, 5_000]);
    }

    #[test]
    fn test_weighted_round_up_rounds_every_share() {
        let people = weighted(&[("A", 33.33), ("B", 33.33), ("C", 33.34)]);
        let allocation = allocate(&[item(10_000, 0.0)], &people, SplitMode::Weighted, true);

        // floor shares 33.33, 33.33, remainder 33.34 → 34 each
        let amounts: Vec<i64> = allocation.shares.iter().map(|s| s.amount.cents()).collect();
        assert_eq!(amounts, vec![3_400, 3_400, 3_400]);
        assert_eq!(allocation.grand_total.cents(), 10_200);
        assert_eq!(allocation.tip_total.cents(), 200);
    }

    #[test]
    fn test_degenerate_weights() {
        let people = weighted(&[("A", 0.0), ("B", 0.0)]);
        let allocation = allocate(&[item(5_000, 10.0)], &people, SplitMode::Weighted, false);

        assert_eq!(allocation.issues, vec![AllocationIssue::DegenerateWeights]);
        assert!(allocation.shares[0].amount.is_zero());
        assert_eq!(allocation.shares[1].amount.cents(), 5_500);
        assert_eq!(allocation.shares_total(), allocation.grand_total);
    }

    #[test]
    fn test_missing_weight_counts_as_zero() {
        let people = vec![
            Participant::named("A"),
            Participant::weighted("B", Percentage::from_percentage(100.0)),
        ];
        let allocation = allocate(&[item(2_000, 0.0)], &people, SplitMode::Weighted, false);
        assert!(allocation.shares[0].amount.is_zero());
        assert_eq!(allocation.shares[1].amount.cents(), 2_000);
        assert!(allocation.issues.is_empty());
    }

    #[test]
    fn test_single_participant_forces_equal() {
        let people = weighted(&[("Solo", 0.0)]);
        let allocation = allocate(&[item(1_000, 0.0)], &people, SplitMode::Weighted, false);

        assert_eq!(allocation.split_mode, SplitMode::Equal);
        assert!(allocation.issues.is_empty());
        assert_eq!(allocation.shares[0].amount.cents(), 1_000);
    }

    #[test]
    fn test_empty_roster_is_clamped() {
        let allocation = allocate(&[item(1_000, 0.0)], &[], SplitMode::Equal, false);
        assert_eq!(allocation.people(), 1);
        assert_eq!(
            allocation.issues,
            vec![AllocationIssue::InvalidParticipantCount { requested: 0 }]
        );
    }

    #[test]
    fn test_no_items_is_all_zero() {
        let people = vec![Participant::default(); 2];
        let allocation = allocate(&[], &people, SplitMode::Equal, true);
        assert!(allocation.grand_total.is_zero());
        assert!(allocation.tip_total.is_zero());
        assert!(allocation.shares.iter().all(|s| s.amount.is_zero()));
    }

    #[test]
    fn test_placeholder_names_and_positions() {
        let people = vec![
            Participant::named(""),
            Participant::named("Bea"),
            Participant::named("  "),
        ];
        let allocation = allocate(&[item(900, 0.0)], &people, SplitMode::Equal, false);
        let names: Vec<&str> = allocation.shares.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Person 1", "Bea", "Person 3"]);
        assert_eq!(allocation.share_for(2).map(|s| s.name.as_str()), Some("Bea"));
        assert!(allocation.share_for(0).is_none());
        assert!(allocation.share_for(4).is_none());
    }

    #[test]
    fn test_by_name_overwrites_duplicates_in_place() {
        let people = weighted(&[("Sam", 20.0), ("Kim", 30.0), ("Sam", 50.0)]);
        let allocation = allocate(&[item(10_000, 0.0)], &people, SplitMode::Weighted, false);

        assert_eq!(allocation.shares.len(), 3);
        assert_eq!(
            allocation.by_name(),
            vec![
                ("Sam".to_string(), Money::from_cents(5_000)),
                ("Kim".to_string(), Money::from_cents(3_000)),
            ]
        );
    }

    #[test]
    fn test_weighted_per_person_is_average() {
        let people = weighted(&[("A", 30.0), ("B", 70.0)]);
        let allocation = allocate(&[item(10_001, 0.0)], &people, SplitMode::Weighted, false);
        assert_eq!(allocation.per_person().cents(), 5_001);
    }

    #[test]
    fn test_bill_allocate_records_clamped_count() {
        let bill = Bill::single(Money::from_cents(1_000), Percentage::zero(), 0);
        let allocation = bill.allocate();
        assert_eq!(allocation.people(), 1);
        assert_eq!(
            allocation.issues,
            vec![AllocationIssue::InvalidParticipantCount { requested: 0 }]
        );
    }

    #[test]
    fn test_allocation_is_idempotent() {
        let people = weighted(&[("A", 12.5), ("B", 40.0), ("C", 47.5)]);
        let items = [item(12_345, 18.0), item(999, 12.5)];
        let first = allocate(&items, &people, SplitMode::Weighted, true);
        let second = allocate(&items, &people, SplitMode::Weighted, true);
        assert_eq!(first, second);
    }
}
