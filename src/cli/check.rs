//! Configuration validation.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::config::Config;
use crate::error::Result;

/// Report the effective configuration. Loading already validated it.
pub fn execute(path: &Path, config: &Config, json: bool) -> Result<()> {
    let policy = config.pricing.staleness_policy();
    let snapshots = &config.snapshots;

    if json {
        return output::json(&json!({
            "config": path,
            "valid": true,
            "stale_after_secs": policy.threshold.map(|t| t.as_secs()),
            "stale_mode": policy.mode.to_string(),
            "bazaar_path": snapshots.bazaar_path,
            "auction_path": snapshots.auction_path,
            "refresh_interval_secs": snapshots.refresh_interval_secs,
        }));
    }

    output::section(&format!("Checking configuration: {}", path.display()));
    if path.exists() {
        output::ok("Configuration file is valid");
    } else {
        output::note("No configuration file found, using defaults");
    }
    println!();

    match policy.threshold {
        Some(threshold) => output::key_value(
            "Stale after",
            format!("{}s ({})", threshold.as_secs(), policy.mode),
        ),
        None => output::key_value("Stale after", "never"),
    }
    output::key_value(
        "Refresh every",
        format!("{}s", snapshots.refresh_interval_secs),
    );
    println!();

    match &snapshots.bazaar_path {
        Some(p) if p.exists() => output::ok(&format!("Bazaar snapshot: {}", p.display())),
        Some(p) => output::warn(&format!("Bazaar snapshot not found: {}", p.display())),
        None => output::warn("No bazaar snapshot configured"),
    }
    match &snapshots.auction_path {
        Some(p) if p.exists() => output::ok(&format!("Auction snapshot: {}", p.display())),
        Some(p) => output::warn(&format!("Auction snapshot not found: {}", p.display())),
        None => output::warn("No auction snapshot configured"),
    }

    println!();
    output::note("Configuration is ready to use.");
    Ok(())
}
