//! Continuous chest valuation.

use std::path::Path;

use tokio::sync::watch;
use tracing::{error, info};

use super::calculate::{print_result, read_request};
use super::{output, Session};
use crate::domain::ChestRequest;
use crate::error::Result;

/// Re-value the chest after every snapshot refresh until Ctrl-C.
pub async fn execute(session: Session, request_path: &Path, json: bool) -> Result<()> {
    let body = read_request(request_path)?;
    let request = ChestRequest::try_new(body.items, body.chest_cost)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });

    let calculator = &session.calculator;
    session
        .refresher
        .run(shutdown_rx, |report| {
            info!(bazaar = ?report.bazaar, auction = ?report.auction, "Snapshots refreshed");
            let result = calculator.calculate_chest_profit(&request);
            if !json {
                print_result(&result);
            } else if let Err(e) = output::json(&result) {
                error!(error = %e, "Failed to write result");
            }
        })
        .await;

    Ok(())
}
