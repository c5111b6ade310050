//! Unit price lookup for several items.

use serde::Serialize;
use tabled::Tabled;

use super::{output, Session};
use crate::domain::{ItemName, PriceQuote, UnpricedReason};
use crate::error::Result;

#[derive(Tabled)]
struct PriceRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Unit price")]
    unit_price: String,
    #[tabled(rename = "Source")]
    source: String,
}

#[derive(Serialize)]
struct BatchEntry<'a> {
    item: &'a ItemName,
    #[serde(skip_serializing_if = "Option::is_none")]
    quote: Option<&'a PriceQuote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<UnpricedReason>,
}

pub fn execute(session: &Session, names: &[String], json: bool) -> Result<()> {
    let items: Vec<ItemName> = names.iter().map(ItemName::new).collect();
    let resolutions = session.calculator.resolve_batch(&items);

    if json {
        let entries: Vec<BatchEntry<'_>> = items
            .iter()
            .zip(&resolutions)
            .map(|(item, resolution)| BatchEntry {
                item,
                quote: resolution.as_ref().ok(),
                reason: resolution.as_ref().err().map(|e| e.reason),
            })
            .collect();
        return output::json(&entries);
    }

    let rows = items.iter().zip(&resolutions).map(|(item, resolution)| match resolution {
        Ok(quote) => PriceRow {
            item: item.to_string(),
            unit_price: output::coins(quote.unit_price),
            source: quote.source.to_string(),
        },
        Err(unresolved) => PriceRow {
            item: item.to_string(),
            unit_price: "-".to_string(),
            source: format!("unpriced: {}", unresolved.reason),
        },
    });
    output::section("Unit prices");
    output::table(rows);

    let priced = resolutions.iter().filter(|r| r.is_ok()).count();
    println!();
    output::note(&format!("{priced}/{} items priced", items.len()));
    Ok(())
}
