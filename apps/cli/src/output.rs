//! # Output Rendering
//!
//! Turns a [`Receipt`] into what the user sees: a fixed-width text receipt
//! or a JSON report for scripts.

use serde::Serialize;
use tipsplit_core::{Allocation, BillMode, Receipt};

use crate::cli::OutputFormat;

/// Width of the text receipt, in characters.
const RECEIPT_WIDTH: usize = 40;

/// JSON report: the receipt plus the raw allocation (cents, positions,
/// recovered issues).
#[derive(Debug, Serialize)]
struct Report<'a> {
    receipt: &'a Receipt,
    allocation: &'a Allocation,
}

/// Renders the result in the requested format.
pub fn render(
    receipt: &Receipt,
    allocation: &Allocation,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(receipt, allocation)),
        OutputFormat::Json => {
            let report = Report {
                receipt,
                allocation,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}

fn render_text(receipt: &Receipt, allocation: &Allocation) -> String {
    let currency = receipt.currency;
    let heavy = "=".repeat(RECEIPT_WIDTH);
    let light = "-".repeat(RECEIPT_WIDTH);
    let dashed = "- ".repeat(RECEIPT_WIDTH / 2).trim_end().to_string();

    let mut out: Vec<String> = vec![
        heavy.clone(),
        center("RECEIPT SUMMARY"),
        center(&receipt.title.to_uppercase()),
        dashed,
        columns(
            &format!("Mode: {}", receipt.mode_label()),
            &format!("Currency: {}", currency),
        ),
        format!("People: {}", receipt.people),
        light.clone(),
    ];

    if receipt.mode == BillMode::Itemized {
        out.push(item_row("ITEM", "TIP %", "AMOUNT"));
        for line in &receipt.items {
            out.push(item_row(
                &line.description,
                &line.tip_rate.to_string(),
                &currency.format(line.amount),
            ));
        }
        out.push(light.clone());
    }

    out.push(columns("Tip Amount:", &currency.format(receipt.tip_total)));
    if !receipt.rounding_surplus.is_zero() {
        out.push(columns(
            "  incl. rounding:",
            &currency.format(receipt.rounding_surplus),
        ));
    }
    out.push(columns("GRAND TOTAL:", &currency.format(receipt.grand_total)));
    out.push(columns("Per Person:", &currency.format(receipt.per_person)));
    if receipt.round_up {
        out.push("(shares rounded up to whole units)".to_string());
    }

    out.push(light);
    out.push(center("SPLIT BREAKDOWN"));
    for split in &receipt.splits {
        out.push(columns(&split.name, &currency.format(split.amount)));
    }
    out.push(heavy);
    out.push(receipt.share_text());

    for issue in &allocation.issues {
        out.push(format!("Note: {}", issue));
    }

    let mut text = out.join("\n");
    text.push('\n');
    text
}

fn center(text: &str) -> String {
    format!("{:^width$}", text, width = RECEIPT_WIDTH)
        .trim_end()
        .to_string()
}

/// Left text and right-aligned value on one line; the left side is cut
/// short when both don't fit.
fn columns(left: &str, right: &str) -> String {
    let room = RECEIPT_WIDTH.saturating_sub(right.chars().count() + 1);
    let left = truncate(left, room);
    let gap = RECEIPT_WIDTH.saturating_sub(left.chars().count() + right.chars().count());
    format!("{}{}{}", left, " ".repeat(gap.max(1)), right)
}

fn item_row(description: &str, tip: &str, amount: &str) -> String {
    format!("{:<24}{:>7}{:>9}", truncate(description, 23), tip, amount)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tipsplit_core::{Bill, Currency, LineItem, Money, Participant, Percentage, SplitMode};

    fn dinner() -> (Receipt, Allocation) {
        let mut bill = Bill::single(Money::from_cents(10_000), Percentage::from_bps(1_000), 4);
        bill.description = "Team dinner".to_string();
        bill.round_up = true;
        let allocation = bill.allocate();
        (Receipt::new(&bill, &allocation, Currency::Usd), allocation)
    }

    fn line<'a>(text: &'a str, prefix: &str) -> &'a str {
        text.lines()
            .find(|l| l.starts_with(prefix))
            .unwrap_or_else(|| panic!("no line starting with {prefix:?} in\n{text}"))
    }

    #[test]
    fn test_text_receipt() {
        let (receipt, allocation) = dinner();
        let text = render(&receipt, &allocation, OutputFormat::Text).unwrap();

        assert!(text.contains("RECEIPT SUMMARY"));
        assert!(text.contains("TEAM DINNER"));
        assert!(line(&text, "Mode: Single Split").ends_with("Currency: USD"));
        assert_eq!(line(&text, "People:"), "People: 4");

        let grand = line(&text, "GRAND TOTAL:");
        assert!(grand.ends_with("$112.00"));
        assert_eq!(grand.chars().count(), RECEIPT_WIDTH);
        assert!(line(&text, "Tip Amount:").ends_with("$12.00"));
        assert!(line(&text, "Per Person:").ends_with("$28.00"));
        assert!(line(&text, "Person 4").ends_with("$28.00"));
        assert!(text.contains("rounded up"));
        assert!(line(&text, "  incl. rounding:").ends_with("$2.00"));
        assert!(text.ends_with("Tip & Split Summary: $112.00\n"));
        assert!(!text.contains("ITEM"));
    }

    #[test]
    fn test_text_receipt_itemized() {
        let bill = Bill {
            mode: BillMode::Itemized,
            items: vec![
                LineItem::new("Pizza", Money::from_cents(6_000), Percentage::from_bps(1_000)),
                LineItem::new("", Money::from_cents(4_000), Percentage::from_bps(2_000)),
            ],
            participant_count: 2,
            participants: vec![
                Participant::weighted("Ada", Percentage::from_bps(3_000)),
                Participant::weighted("Bea", Percentage::from_bps(7_000)),
            ],
            split_mode: SplitMode::Weighted,
            ..Bill::default()
        };
        let allocation = bill.allocate();
        let receipt = Receipt::new(&bill, &allocation, Currency::Gbp);
        let text = render(&receipt, &allocation, OutputFormat::Text).unwrap();

        assert!(text.contains("MULTIPLE ITEMS EXPENSE"));
        assert!(line(&text, "Pizza").ends_with("£60.00"));
        assert!(line(&text, "Item 2").contains("20%"));
        assert!(line(&text, "Ada").ends_with("£34.20"));
        assert!(line(&text, "Bea").ends_with("£79.80"));
    }

    #[test]
    fn test_text_receipt_lists_issues() {
        let bill = Bill::single(Money::from_cents(5_000), Percentage::zero(), 0);
        let allocation = bill.allocate();
        let receipt = Receipt::new(&bill, &allocation, Currency::Usd);
        let text = render(&receipt, &allocation, OutputFormat::Text).unwrap();
        assert!(text.contains("Note: participant count 0 is below 1, using 1"));
    }

    #[test]
    fn test_text_receipt_shows_cent_surplus() {
        let bill = Bill::single(Money::from_cents(10_000), Percentage::zero(), 3);
        let allocation = bill.allocate();
        let receipt = Receipt::new(&bill, &allocation, Currency::Usd);
        let text = render(&receipt, &allocation, OutputFormat::Text).unwrap();

        assert!(line(&text, "Tip Amount:").ends_with("$0.02"));
        assert!(line(&text, "  incl. rounding:").ends_with("$0.02"));
        assert!(line(&text, "GRAND TOTAL:").ends_with("$100.02"));
    }

    #[test]
    fn test_exact_split_has_no_surplus_line() {
        let bill = Bill::single(Money::from_cents(10_000), Percentage::zero(), 4);
        let allocation = bill.allocate();
        let receipt = Receipt::new(&bill, &allocation, Currency::Usd);
        let text = render(&receipt, &allocation, OutputFormat::Text).unwrap();
        assert!(!text.contains("incl. rounding"));
    }

    #[test]
    fn test_json_report() {
        let (receipt, allocation) = dinner();
        let json = render(&receipt, &allocation, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["receipt"]["title"], "Team dinner");
        assert_eq!(value["receipt"]["currency"], "USD");
        assert_eq!(value["allocation"]["grandTotal"], 11_200);
        assert_eq!(value["allocation"]["shares"].as_array().unwrap().len(), 4);
        assert_eq!(value["allocation"]["shares"][0]["position"], 1);
    }

    #[test]
    fn test_columns_truncates_long_names() {
        let name = "A".repeat(60);
        let row = columns(&name, "$1.00");
        assert_eq!(row.chars().count(), RECEIPT_WIDTH);
        assert!(row.ends_with(" $1.00"));
        assert!(row.contains('…'));
    }
}
