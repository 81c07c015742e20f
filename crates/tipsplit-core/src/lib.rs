//! # tipsplit-core: Pure Business Logic for Tip & Split
//!
//! This crate is the **heart** of Tip & Split. It turns a bill (line items,
//! tip rates, a participant roster and a split strategy) into a tip total,
//! a grand total and the amount each participant owes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tip & Split Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Front end (CLI today, web form tomorrow)           │   │
//! │  │    Bill inputs ──► People ──► Split mode ──► Receipt / Share    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Bill snapshot (on every change)        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ tipsplit-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   money   │  │   types   │  │ allocation │  │  receipt  │  │   │
//! │  │   │   Money   │  │ LineItem  │  │  allocate  │  │  Receipt  │  │   │
//! │  │   │Percentage │  │   Bill    │  │   Share    │  │ share text│  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING SINKS • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money (integer minor units), Percentage (basis points), Currency
//! - [`types`] - Bill inputs (LineItem, Participant, Bill, SplitMode)
//! - [`allocation`] - The allocation engine
//! - [`receipt`] - Shareable receipt summary
//! - [`validation`] - Lenient form parsing and strict validators
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same bill in, same allocation out, bit for bit
//! 2. **Integer Money**: amounts are cents (i64), rates are basis points (u32)
//! 3. **Never Fail**: malformed form input degrades to safe defaults, and
//!    recovered conditions are reported as data on the result
//!
//! ## Example Usage
//!
//! ```rust
//! use tipsplit_core::{allocate, LineItem, Money, Participant, Percentage, SplitMode};
//!
//! let items = vec![LineItem::new("Dinner", Money::from_cents(10_000), Percentage::from_percentage(10.0))];
//! let people = vec![Participant::default(); 4];
//!
//! let allocation = allocate(&items, &people, SplitMode::Equal, true);
//!
//! // $110.00 / 4 = $27.50, rounded up to $28 each
//! assert_eq!(allocation.per_person().cents(), 2_800);
//! assert_eq!(allocation.grand_total.cents(), 11_200);
//! assert_eq!(allocation.tip_total.cents(), 1_200);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod error;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use allocation::{allocate, Allocation, Share};
pub use error::{AllocationIssue, CoreError, CoreResult, ValidationError};
pub use money::{Currency, Money, Percentage};
pub use receipt::Receipt;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Tip rate a fresh form starts with, in percent.
pub const DEFAULT_TIP_PERCENT: f64 = 15.0;

/// Maximum number of participants a form accepts.
///
/// The engine itself has no limit; this keeps a typo like `1000` from
/// building a thousand-row roster.
pub const MAX_PARTICIPANTS: i64 = 100;

/// Maximum number of line items in itemized mode.
pub const MAX_LINE_ITEMS: usize = 100;
