//! Chest valuation from a request file.

use std::path::Path;

use owo_colors::OwoColorize;
use tabled::Tabled;

use super::{output, Session};
use crate::domain::{ChestRequestBody, ChestResult, LineResult};
use crate::error::Result;

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Qty")]
    quantity: u64,
    #[tabled(rename = "Unit")]
    unit: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Source")]
    source: String,
}

impl From<&LineResult> for LineRow {
    fn from(line: &LineResult) -> Self {
        let source = match (&line.source, &line.reason) {
            (Some(source), _) if line.stale => format!("{source} (stale)"),
            (Some(source), _) => source.to_string(),
            (None, Some(reason)) => format!("unpriced: {reason}"),
            (None, None) => "unpriced".to_string(),
        };
        Self {
            item: line.item.to_string(),
            quantity: line.quantity,
            unit: output::maybe_coins(line.unit_price),
            value: output::maybe_coins(line.line_value),
            source,
        }
    }
}

/// Read a chest request body from disk.
pub fn read_request(path: &Path) -> Result<ChestRequestBody> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Value the chest described by `request_path`.
pub fn execute(session: &Session, request_path: &Path, json: bool) -> Result<()> {
    let body = read_request(request_path)?;
    let result = session.calculator.evaluate(body.items, body.chest_cost)?;
    if json {
        output::json(&result)
    } else {
        print_result(&result);
        Ok(())
    }
}

/// Human-readable breakdown of a valued chest.
pub fn print_result(result: &ChestResult) {
    output::section("Chest contents");
    output::table(result.lines.iter().map(LineRow::from));

    output::section("Summary");
    output::key_value("Total value", output::coins(result.total_value));
    output::key_value("Chest cost", output::coins(result.chest_cost));
    output::key_value("Profit", output::profit(result.profit));
    if let Some(roi) = result.roi_percent() {
        output::key_value("ROI", format!("{roi}%"));
    }
    output::key_value(
        "Items priced",
        format!("{}/{}", result.items_found(), result.lines.len()),
    );
    if let Some(at) = result.freshness.bazaar {
        output::key_value("Bazaar as of", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if let Some(at) = result.freshness.auction {
        output::key_value("Auctions as of", at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!();

    if result.is_complete() {
        if result.is_profitable() {
            output::ok("Chest is profitable");
        } else {
            output::warn("Chest is not profitable");
        }
    } else {
        let missing: Vec<String> = result
            .unresolved_items
            .iter()
            .map(ToString::to_string)
            .collect();
        output::warn(&format!(
            "No price for {}; totals exclude them",
            missing.join(", ").bold()
        ));
    }
}
