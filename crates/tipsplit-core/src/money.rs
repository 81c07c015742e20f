//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely, the
//! `Percentage` type used for tip rates and split weights, and the small
//! set of supported `Currency` codes.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floating point:                                                   │
//! │    0.1 + 0.2 = 0.30000000000000004                                      │
//! │                                                                         │
//! │  Splitting a bill:                                                      │
//! │    $100.00 / 3 = 33.333... → shares displayed as $33.33 sum to $99.99   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Every share is a whole number of cents, and the grand total is       │
//! │    defined as the exact sum of the shares                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tipsplit_core::money::{Money, Percentage};
//!
//! let bill = Money::from_cents(10_000);          // $100.00
//! let tip = bill.calculate_tip(Percentage::from_percentage(15.0));
//! assert_eq!(tip.cents(), 1_500);                // $15.00
//!
//! let share = (bill + tip).split_ceil(4);        // $115.00 / 4
//! assert_eq!(share.cents(), 2_875);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// Minor units per major unit. Every supported currency is handled with
/// two decimal places.
pub const MINOR_PER_MAJOR: i64 = 100;

/// Ceiling for a bill's grand total, in cents ($10 quadrillion).
///
/// Leaves headroom below `i64::MAX` for per-share rounding surplus, so
/// shares always sum exactly to a capped total.
pub const MAX_TOTAL_CENTS: i64 = 1_000_000_000_000_000_000;

/// Divisor that turns `cents × basis points` into cents.
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  LineItem.amount ──┬──► Money::total_tip() ──► Allocation.tip_total     │
/// │                    │                                                    │
/// │                    └──► Allocation.base_total                           │
/// │                                                                         │
/// │  Allocation.grand_total ──► Share.amount (one per participant)          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use tipsplit_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Largest grand total the allocation engine produces.
    pub const MAX_TOTAL: Money = Money(MAX_TOTAL_CENTS);

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Checks if the value is a whole number of major units.
    #[inline]
    pub const fn is_whole_major(&self) -> bool {
        self.0 % MINOR_PER_MAJOR == 0
    }

    /// Clamps negative values to zero.
    #[inline]
    pub const fn non_negative(&self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            *self
        }
    }

    /// Calculates the tip on this amount alone, rounded half away from
    /// zero to the nearest cent.
    ///
    /// For a bill total use [`Money::total_tip`], which rounds once over
    /// all items instead of once per item.
    ///
    /// ## Example
    /// ```rust
    /// use tipsplit_core::money::{Money, Percentage};
    ///
    /// let amount = Money::from_cents(1099);        // $10.99
    /// let rate = Percentage::from_percentage(15.0);
    ///
    /// // $10.99 × 15% = $1.6485 → $1.65
    /// assert_eq!(amount.calculate_tip(rate).cents(), 165);
    /// ```
    pub fn calculate_tip(&self, rate: Percentage) -> Money {
        Money::total_tip([(*self, rate)])
    }

    /// Total tip over `(amount, rate)` pairs.
    ///
    /// ## Implementation
    /// The exact products `cents × bps` are summed in i128 and the sum is
    /// rounded once, half away from zero: `(Σ + 5000) / 10000`. Rounding
    /// each item first would drift by up to half a cent per item.
    ///
    /// ## Example
    /// ```rust
    /// use tipsplit_core::money::{Money, Percentage};
    ///
    /// // 100 items of $0.01 at 50% tip $0.50, not 100 × $0.01
    /// let lines = vec![(Money::from_cents(1), Percentage::from_percentage(50.0)); 100];
    /// assert_eq!(Money::total_tip(lines).cents(), 50);
    /// ```
    pub fn total_tip<I>(lines: I) -> Money
    where
        I: IntoIterator<Item = (Money, Percentage)>,
    {
        let product: i128 = lines
            .into_iter()
            .map(|(amount, rate)| i128::from(amount.0) * i128::from(rate.bps()))
            .sum();
        let half = BPS_SCALE / 2;
        let rounded = if product >= 0 {
            (product + half) / BPS_SCALE
        } else {
            (product - half) / BPS_SCALE
        };
        Money::saturating_from_wide(rounded)
    }

    /// Narrows a wide intermediate, saturating at the i64 bounds.
    fn saturating_from_wide(cents: i128) -> Money {
        Money(cents.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }

    /// Divides into `parts` equal shares, rounding each share UP to the cent.
    ///
    /// `parts` values below 1 are treated as 1.
    ///
    /// ## Example
    /// ```rust
    /// use tipsplit_core::money::Money;
    ///
    /// // $100.00 / 3 = $33.333... → $33.34
    /// assert_eq!(Money::from_cents(10_000).split_ceil(3).cents(), 3_334);
    /// ```
    pub fn split_ceil(&self, parts: i64) -> Money {
        let parts = parts.max(1);
        let quotient = self.0.div_euclid(parts);
        if self.0.rem_euclid(parts) == 0 {
            Money(quotient)
        } else {
            Money(quotient + 1)
        }
    }

    /// Divides into `parts` and rounds half up to the cent.
    ///
    /// Used for the display-only "per person" average of a weighted split.
    pub fn split_round(&self, parts: i64) -> Money {
        let parts = i128::from(parts.max(1));
        Money::saturating_from_wide((i128::from(self.0) * 2 + parts).div_euclid(parts * 2))
    }

    /// Rounds UP to the next whole major unit.
    ///
    /// ## Example
    /// ```rust
    /// use tipsplit_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(2_750).ceil_to_major().cents(), 2_800);
    /// assert_eq!(Money::from_cents(2_800).ceil_to_major().cents(), 2_800);
    /// ```
    pub fn ceil_to_major(&self) -> Money {
        let whole = i128::from(self.0.div_euclid(MINOR_PER_MAJOR));
        let whole = if self.0.rem_euclid(MINOR_PER_MAJOR) == 0 {
            whole
        } else {
            whole + 1
        };
        Money::saturating_from_wide(whole * i128::from(MINOR_PER_MAJOR))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Arithmetic saturates at the i64 bounds instead of overflowing.

/// Plain decimal rendering without a currency symbol, e.g. `-5.50`.
///
/// Use [`Currency::format`] for anything a person will read on a receipt.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by a participant count.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, count: i64) -> Self {
        Money(self.0.saturating_mul(count))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// A percentage in basis points (bps) of a percent.
///
/// Used for both tip rates and weighted-split weights.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000.
/// 1500 bps = 15% tip; 3333 bps = a 33.33% share weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Percentage(u32);

impl Percentage {
    /// Creates a percentage from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Percentage(bps)
    }

    /// Creates a percentage from a real-valued percent, rounded to the
    /// nearest basis point.
    ///
    /// Negative, NaN and infinite inputs become zero.
    ///
    /// ```rust
    /// use tipsplit_core::money::Percentage;
    ///
    /// assert_eq!(Percentage::from_percentage(8.25).bps(), 825);
    /// assert_eq!(Percentage::from_percentage(-3.0).bps(), 0);
    /// assert_eq!(Percentage::from_percentage(f64::NAN).bps(), 0);
    /// ```
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return Percentage(0);
        }
        Percentage((pct * 100.0).round().min(u32::MAX as f64) as u32)
    }

    /// Returns the value in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the value as a percent (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percentage(0)
    }

    /// Checks if the percentage is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Percentage {
    fn default() -> Self {
        Percentage::zero()
    }
}

/// Renders `15%`, `8.25%` or `12.5%`.
impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        match frac {
            0 => write!(f, "{}%", whole),
            _ if frac % 10 == 0 => write!(f, "{}.{}%", whole, frac / 10),
            _ => write!(f, "{}.{:02}%", whole, frac),
        }
    }
}

// =============================================================================
// Currency
// =============================================================================

/// The currencies a bill can be entered in.
///
/// A calculation always uses one currency; nothing here converts between
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
    Ngn,
}

impl Currency {
    /// Every supported currency, in menu order.
    pub const ALL: [Currency; 5] = [
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Ngn,
    ];

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Ngn => "NGN",
        }
    }

    /// Display symbol.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
            Currency::Ngn => "₦",
        }
    }

    /// Formats an amount as `<symbol><grouped major>.<minor>`.
    ///
    /// Always two fraction digits. Locale-specific separators are left to
    /// the front end.
    ///
    /// ```rust
    /// use tipsplit_core::money::{Currency, Money};
    ///
    /// assert_eq!(Currency::Usd.format(Money::from_cents(123_456_789)), "$1,234,567.89");
    /// assert_eq!(Currency::Gbp.format(Money::from_cents(-550)), "-£5.50");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.symbol(),
            group_thousands(&amount.major().abs().to_string()),
            amount.minor_part()
        )
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() {
            return Err(ValidationError::Required {
                field: "currency".to_string(),
            });
        }
        Currency::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "currency".to_string(),
                allowed: Currency::ALL.iter().map(|c| c.code().to_string()).collect(),
            })
    }
}

/// Inserts `,` between every group of three digits, counting from the right.
pub(crate) fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
