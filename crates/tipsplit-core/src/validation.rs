//! # Validation Module
//!
//! Input handling for the bill form.
//!
//! ## Two Policies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Input Handling Layers                              │
//! │                                                                         │
//! │  Layer 1: Lenient parsers (every keystroke)                            │
//! │  ├── parse_amount("1,234.5x")   → 1234.50                              │
//! │  ├── parse_percentage("abc")    → 0%                                   │
//! │  └── parse_participant_count("")→ 1                                    │
//! │      Never fail: the totals must always show a number                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Strict validators (form edits that can be refused)           │
//! │  ├── validate_participant_count(500) → OutOfRange                      │
//! │  └── validate_participant_name(..)   → TooLong                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tipsplit_core::validation::{format_amount_input, parse_amount};
//!
//! assert_eq!(parse_amount("1,234.56").cents(), 123_456);
//! assert_eq!(format_amount_input("1234567.891"), "1,234,567.89");
//! ```

use crate::error::ValidationError;
use crate::money::{group_thousands, Money, Percentage, MINOR_PER_MAJOR};
use crate::{MAX_LINE_ITEMS, MAX_PARTICIPANTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted participant name.
pub const MAX_NAME_LEN: usize = 50;

/// Longest accepted bill or item description.
pub const MAX_DESCRIPTION_LEN: usize = 100;

/// Largest amount a single field accepts: $1,000,000,000,000.00.
///
/// Anything larger parses as 0, like any other malformed input.
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000_000_000);

// =============================================================================
// Lenient Parsers
// =============================================================================

/// Leading decimal number of `raw`, split into sign, whole and fraction
/// digits. `None` when no digit is found before the number ends.
fn leading_decimal(raw: &str) -> Option<(bool, &str, &str)> {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let whole_len = s.bytes().take_while(u8::is_ascii_digit).count();
    let whole = &s[..whole_len];
    let rest = &s[whole_len..];

    let fraction = match rest.strip_prefix('.') {
        Some(after_dot) => {
            let frac_len = after_dot.bytes().take_while(u8::is_ascii_digit).count();
            &after_dot[..frac_len]
        }
        None => "",
    };

    if whole.is_empty() && fraction.is_empty() {
        None
    } else {
        Some((negative, whole, fraction))
    }
}

/// Parses a currency string typed into the form.
///
/// ## Rules
/// - Grouping commas and surrounding whitespace are ignored
/// - The longest leading number is used: `"12.5abc"` → 12.50
/// - Digits past the second decimal place are dropped, not rounded
/// - Malformed, empty or negative input → 0
/// - Amounts above [`MAX_AMOUNT`] → 0
///
/// ## Example
/// ```rust
/// use tipsplit_core::validation::parse_amount;
///
/// assert_eq!(parse_amount("1,000.00").cents(), 100_000);
/// assert_eq!(parse_amount(".5").cents(), 50);
/// assert_eq!(parse_amount("abc").cents(), 0);
/// assert_eq!(parse_amount("-20").cents(), 0);
/// ```
pub fn parse_amount(raw: &str) -> Money {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let Some((negative, whole, fraction)) = leading_decimal(&cleaned) else {
        return Money::zero();
    };
    if negative {
        return Money::zero();
    }

    let Some(major) = whole_units(whole) else {
        return Money::zero();
    };
    let minor = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(2)
        .fold(0_i64, |acc, digit| acc * 10 + i64::from(digit - b'0'));

    major
        .checked_mul(MINOR_PER_MAJOR)
        .and_then(|cents| cents.checked_add(minor))
        .map(Money::from_cents)
        .filter(|amount| *amount <= MAX_AMOUNT)
        .unwrap_or_default()
}

/// Parses a percentage typed into the form (tip rate or share weight).
///
/// Malformed, empty or negative input → 0%.
///
/// ```rust
/// use tipsplit_core::validation::parse_percentage;
///
/// assert_eq!(parse_percentage("15").bps(), 1_500);
/// assert_eq!(parse_percentage("12.5%").bps(), 1_250);
/// assert_eq!(parse_percentage("").bps(), 0);
/// ```
pub fn parse_percentage(raw: &str) -> Percentage {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    match leading_decimal(&cleaned) {
        Some((false, whole, fraction)) => {
            let literal = format!("{}.{}", if whole.is_empty() { "0" } else { whole }, fraction);
            literal
                .trim_end_matches('.')
                .parse::<f64>()
                .map(Percentage::from_percentage)
                .unwrap_or_default()
        }
        _ => Percentage::zero(),
    }
}

/// Parses the head count typed into the form.
///
/// ## Rules
/// - Leading integer only: `"3.7"` → 3
/// - Empty, malformed or zero → 1
/// - Negative values are returned unchanged; [`crate::Bill::roster`]
///   clamps them and reports the clamp
///
/// ```rust
/// use tipsplit_core::validation::parse_participant_count;
///
/// assert_eq!(parse_participant_count("4"), 4);
/// assert_eq!(parse_participant_count("0"), 1);
/// assert_eq!(parse_participant_count("many"), 1);
/// assert_eq!(parse_participant_count("-2"), -2);
/// ```
pub fn parse_participant_count(raw: &str) -> i64 {
    match leading_decimal(raw) {
        Some((negative, whole, _)) if !whole.is_empty() => {
            let value = whole_units(whole).unwrap_or(i64::MAX);
            match (negative, value) {
                (_, 0) => 1,
                (true, v) => -v,
                (false, v) => v,
            }
        }
        _ => 1,
    }
}

fn whole_units(digits: &str) -> Option<i64> {
    if digits.is_empty() {
        Some(0)
    } else {
        digits.parse::<i64>().ok()
    }
}

/// Reformats an amount field as the user types.
///
/// Keeps digits and the first decimal point, drops everything else, keeps
/// at most two decimal digits and adds thousands separators.
///
/// ```rust
/// use tipsplit_core::validation::format_amount_input;
///
/// assert_eq!(format_amount_input("$1234.5"), "1,234.5");
/// assert_eq!(format_amount_input("1,000,00"), "100,000");
/// assert_eq!(format_amount_input("12."), "12.");
/// ```
pub fn format_amount_input(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let mut parts = cleaned.split('.');
    let whole = parts.next().unwrap_or_default();
    let decimal = parts
        .next()
        .map(|fraction| format!(".{}", &fraction[..fraction.len().min(2)]))
        .unwrap_or_default();
    format!("{}{}", group_thousands(whole), decimal)
}

// =============================================================================
// Strict Validators
// =============================================================================

/// Validates a head count for the form.
///
/// ## Rules
/// - Must be between 1 and [`MAX_PARTICIPANTS`]
pub fn validate_participant_count(count: i64) -> ValidationResult<()> {
    if !(1..=MAX_PARTICIPANTS).contains(&count) {
        return Err(ValidationError::OutOfRange {
            field: "people".to_string(),
            min: 1,
            max: MAX_PARTICIPANTS,
        });
    }
    Ok(())
}

/// Validates the number of line items in itemized mode.
pub fn validate_line_item_count(count: usize) -> ValidationResult<()> {
    if count > MAX_LINE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 0,
            max: MAX_LINE_ITEMS as i64,
        });
    }
    Ok(())
}

/// Validates a participant name.
///
/// Blank names are fine (they get a placeholder); very long ones are not.
pub fn validate_participant_name(name: &str) -> ValidationResult<()> {
    if name.trim().chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validates a bill or item description.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.trim().chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
