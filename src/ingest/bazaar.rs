//! Bazaar endpoint payloads.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{timestamp_from_millis, BazaarSnapshot};
use crate::domain::money::coins_from_f64;
use crate::domain::{BazaarQuote, ItemName, PriceSourceKind};
use crate::error::SnapshotError;

/// Top-level bazaar response. Products stay raw until decoded one by one.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BazaarPayload {
    pub success: bool,
    #[serde(default)]
    pub last_updated: Option<i64>,
    #[serde(default)]
    pub products: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct BazaarProduct {
    #[serde(default)]
    pub product_id: Option<String>,
    pub quick_status: QuickStatus,
}

/// Summary levels for one product.
///
/// The endpoint names the levels from the order book's side: `buyPrice` is
/// the best buy order (what an instant sell realizes) and `sellPrice` is the
/// best sell offer (what an instant buy pays).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickStatus {
    #[serde(default)]
    pub buy_price: f64,
    #[serde(default)]
    pub sell_price: f64,
    #[serde(default)]
    pub buy_moving_week: Option<u64>,
}

/// Parse a bazaar response into quotes.
///
/// Products that fail to decode or carry unusable prices are skipped and
/// counted. An empty buy book is kept; the quote then reports no buy orders.
pub fn parse_bazaar(json: &str, fetched_at: DateTime<Utc>) -> Result<BazaarSnapshot, SnapshotError> {
    let payload: BazaarPayload =
        serde_json::from_str(json).map_err(|source| SnapshotError::Parse {
            market: PriceSourceKind::Bazaar,
            source,
        })?;

    if !payload.success {
        return Err(SnapshotError::Unsuccessful {
            market: PriceSourceKind::Bazaar,
        });
    }

    let observed_at = payload
        .last_updated
        .and_then(timestamp_from_millis)
        .unwrap_or(fetched_at);

    let mut quotes = Vec::with_capacity(payload.products.len());
    let mut skipped = 0;
    for (id, raw) in payload.products {
        let product: BazaarProduct = match serde_json::from_value(raw) {
            Ok(product) => product,
            Err(e) => {
                warn!(product = %id, error = %e, "Skipping malformed bazaar product");
                skipped += 1;
                continue;
            }
        };
        let name = product.product_id.unwrap_or(id);
        match to_quote(&name, &product.quick_status, observed_at) {
            Some(quote) => quotes.push(quote),
            None => skipped += 1,
        }
    }

    debug!(products = quotes.len(), skipped, "Parsed bazaar snapshot");
    Ok(BazaarSnapshot {
        quotes,
        refreshed_at: observed_at,
        skipped,
    })
}

fn to_quote(name: &str, status: &QuickStatus, observed_at: DateTime<Utc>) -> Option<BazaarQuote> {
    let item = ItemName::new(name);
    if item.is_blank() {
        warn!("Skipping bazaar product with blank id");
        return None;
    }

    let prices = coins_from_f64(status.buy_price).and_then(|instant_sell| {
        coins_from_f64(status.sell_price).map(|instant_buy| (instant_buy, instant_sell))
    });
    let (instant_buy, instant_sell) = match prices {
        Ok(prices) => prices,
        Err(e) => {
            warn!(product = name, error = %e, "Skipping bazaar product");
            return None;
        }
    };
    if instant_buy.is_sign_negative() || instant_sell.is_sign_negative() {
        warn!(product = name, "Skipping bazaar product with negative price");
        return None;
    }

    let quote = BazaarQuote::new(item, instant_buy, instant_sell, observed_at);
    if !quote.has_buy_orders() {
        debug!(product = name, "Bazaar product has no buy orders");
    }
    Some(match status.buy_moving_week {
        Some(volume) => quote.with_weekly_volume(volume),
        None => quote,
    })
}
