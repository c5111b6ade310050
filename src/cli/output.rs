//! Shared CLI output helpers for consistent operator-facing text.

use std::fmt::Display;

use owo_colors::OwoColorize;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::Result;

const RULE_WIDTH: usize = 56;

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("{:<14} {value}", label.dimmed());
}

/// Print a successful status line.
pub fn ok(message: &str) {
    println!("{} {message}", "✓".green());
}

/// Print a warning status line.
pub fn warn(message: &str) {
    println!("{} {message}", "⚠".yellow());
}

/// Print an error status line.
pub fn error(message: &str) {
    eprintln!("{} {message}", "✗".red());
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("{message}");
}

/// Print rows as an indented table.
pub fn table<T: Tabled>(rows: impl IntoIterator<Item = T>) {
    let table = Table::new(rows).with(Style::rounded()).to_string();
    for line in table.lines() {
        println!("  {line}");
    }
}

/// Print a value as pretty JSON on stdout.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Group the integer part in thousands: `1234567.5` → `1,234,567.5`.
#[must_use]
pub fn coins(value: Decimal) -> String {
    let text = value.normalize().to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, digit) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Like [`coins`], but `-` for a missing value.
#[must_use]
pub fn maybe_coins(value: Option<Decimal>) -> String {
    value.map_or_else(|| "-".to_string(), coins)
}

/// Signed profit, green when positive and red when negative.
#[must_use]
pub fn profit(value: Decimal) -> String {
    let text = coins(value);
    if value.is_sign_positive() && !value.is_zero() {
        format!("+{text}").green().to_string()
    } else if value.is_sign_negative() {
        text.red().to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_thousands() {
        assert_eq!(coins(dec!(500025502)), "500,025,502");
        assert_eq!(coins(dec!(4500)), "4,500");
        assert_eq!(coins(dec!(999)), "999");
        assert_eq!(coins(dec!(8500.50)), "8,500.5");
        assert_eq!(coins(dec!(-1234567)), "-1,234,567");
        assert_eq!(coins(dec!(0)), "0");
    }

    #[test]
    fn missing_value_is_a_dash() {
        assert_eq!(maybe_coins(None), "-");
        assert_eq!(maybe_coins(Some(dec!(1000))), "1,000");
    }
}
