//! Single-item appraisal.

use super::{output, Session};
use crate::domain::{ItemAppraisal, ItemName};
use crate::error::Result;

pub fn execute(session: &Session, name: &str, quantity: u64, json: bool) -> Result<()> {
    let item = ItemName::new(name);
    let appraisal = session.calculator.appraise(&item, quantity);
    if json {
        return output::json(&appraisal);
    }
    print_appraisal(&appraisal);
    Ok(())
}

fn print_appraisal(appraisal: &ItemAppraisal) {
    output::section(&format!("{} x{}", appraisal.item, appraisal.quantity));

    match &appraisal.bazaar {
        Some(quote) => {
            output::key_value("Instant sell", output::coins(quote.instant_sell_price));
            output::key_value("Instant buy", output::coins(quote.instant_buy_price));
            if !quote.has_buy_orders() {
                output::warn("No buy orders");
            }
        }
        None => output::key_value("Bazaar", "-"),
    }

    match &appraisal.auction {
        Some(quote) if quote.has_listings() => {
            output::key_value("Lowest BIN", output::coins(quote.lowest_bin_price));
            output::key_value("Listings", quote.sample_size);
            if let Some(tier) = &quote.tier {
                output::key_value("Tier", tier);
            }
        }
        Some(_) => output::key_value("Auction", "no active listings"),
        None => output::key_value("Auction", "-"),
    }

    if let (Some(per_day), Some(source)) = (appraisal.sales_per_day, appraisal.sales_source) {
        output::key_value("Sales/day", format!("{per_day} ({source})"));
    }

    println!();
    match (&appraisal.resolved, appraisal.total_value) {
        (Some(quote), Some(total)) => {
            output::key_value("Unit price", output::coins(quote.unit_price));
            output::key_value("Total", output::coins(total));
            output::ok(&format!("Priced from {}", quote.source));
            if quote.stale {
                output::warn(&format!(
                    "Quote is {}s old; prices may have moved",
                    quote.staleness_seconds
                ));
            }
        }
        _ => {
            let reason = appraisal
                .unpriced_reason
                .map_or_else(|| "unknown".to_string(), |reason| reason.to_string());
            output::warn(&format!("No market price: {reason}"));
        }
    }
}
