//! Periodic reload of market snapshots into the quote store.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::cache::MemoryPriceCache;
use crate::config::SnapshotConfig;
use crate::error::SnapshotError;
use crate::ingest;

/// Quote counts loaded by one refresh cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    pub bazaar: Option<usize>,
    pub auction: Option<usize>,
}

/// Reloads configured snapshot files into a [`MemoryPriceCache`].
pub struct SnapshotRefresher {
    cache: Arc<MemoryPriceCache>,
    config: SnapshotConfig,
}

impl SnapshotRefresher {
    pub fn new(cache: Arc<MemoryPriceCache>, config: SnapshotConfig) -> Self {
        Self { cache, config }
    }

    #[must_use]
    pub fn cache(&self) -> &Arc<MemoryPriceCache> {
        &self.cache
    }

    /// Load every configured snapshot, stopping at the first failure.
    ///
    /// Markets loaded before the failure keep their new data.
    pub fn load_once(&self) -> Result<RefreshReport, SnapshotError> {
        if !self.config.is_configured() {
            return Err(SnapshotError::NoSources);
        }
        Ok(RefreshReport {
            bazaar: self.refresh_bazaar().transpose()?,
            auction: self.refresh_auctions().transpose()?,
        })
    }

    /// Reload the bazaar snapshot. `None` when no path is configured.
    pub fn refresh_bazaar(&self) -> Option<Result<usize, SnapshotError>> {
        let path = self.config.bazaar_path.as_deref()?;
        Some(ingest::load_bazaar(path).map(|snapshot| {
            let count = snapshot.quotes.len();
            self.cache.replace_bazaar(snapshot.quotes, snapshot.refreshed_at);
            info!(
                products = count,
                skipped = snapshot.skipped,
                refreshed_at = %snapshot.refreshed_at,
                "Bazaar snapshot loaded"
            );
            count
        }))
    }

    /// Reload the auction snapshot. `None` when no path is configured.
    pub fn refresh_auctions(&self) -> Option<Result<usize, SnapshotError>> {
        let path = self.config.auction_path.as_deref()?;
        Some(ingest::load_auctions(path).map(|snapshot| {
            let count = snapshot.quotes.len();
            self.cache.replace_auctions(snapshot.quotes, snapshot.refreshed_at);
            let sold = self
                .cache
                .record_auction_listings(snapshot.active, snapshot.refreshed_at);
            info!(
                items = count,
                skipped = snapshot.skipped,
                sold,
                refreshed_at = %snapshot.refreshed_at,
                "Auction snapshot loaded"
            );
            count
        }))
    }

    /// One background cycle. Failures are logged and the previous data kept.
    pub fn cycle(&self) -> RefreshReport {
        let bazaar = match self.refresh_bazaar() {
            Some(Ok(count)) => Some(count),
            Some(Err(e)) => {
                warn!(error = %e, "Bazaar refresh failed, keeping previous snapshot");
                None
            }
            None => None,
        };
        let auction = match self.refresh_auctions() {
            Some(Ok(count)) => Some(count),
            Some(Err(e)) => {
                warn!(error = %e, "Auction refresh failed, keeping previous snapshot");
                None
            }
            None => None,
        };
        RefreshReport { bazaar, auction }
    }

    /// Refresh on the configured interval until `shutdown` flips to true.
    ///
    /// The first tick fires immediately. `on_refresh` runs after every cycle.
    pub async fn run<F>(&self, mut shutdown: watch::Receiver<bool>, mut on_refresh: F)
    where
        F: FnMut(RefreshReport),
    {
        let mut interval = tokio::time::interval(self.config.refresh_interval());
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        info!(
            interval_secs = self.config.refresh_interval_secs,
            "Starting snapshot refresher"
        );

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    match result {
                        Ok(_) => {
                            if *shutdown.borrow() {
                                info!("Shutdown signal received");
                                break;
                            }
                        }
                        Err(_) => {
                            info!("Shutdown channel closed");
                            break;
                        }
                    }
                }
                _ = interval.tick() => {
                    let report = self.cycle();
                    on_refresh(report);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemName;
    use crate::cache::PriceCache;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BAZAAR: &str = r#"{"success":true,"lastUpdated":1700000000000,"products":{
        "ENCHANTED_COAL":{"product_id":"ENCHANTED_COAL","quick_status":{"buyPrice":4.5,"sellPrice":5.0}}}}"#;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn refresher(bazaar: &NamedTempFile) -> SnapshotRefresher {
        let config = SnapshotConfig {
            bazaar_path: Some(bazaar.path().to_path_buf()),
            ..SnapshotConfig::default()
        };
        SnapshotRefresher::new(Arc::new(MemoryPriceCache::new()), config)
    }

    #[test]
    fn load_once_fills_cache() {
        let file = write_temp(BAZAAR);
        let refresher = refresher(&file);
        let report = refresher.load_once().unwrap();
        assert_eq!(report.bazaar, Some(1));
        assert_eq!(report.auction, None);
        assert!(refresher
            .cache()
            .get_bazaar_quote(&ItemName::new("Enchanted Coal"))
            .is_some());
    }

    #[test]
    fn failed_cycle_keeps_previous_data() {
        let file = write_temp(BAZAAR);
        let refresher = refresher(&file);
        refresher.load_once().unwrap();

        std::fs::write(file.path(), r#"{"success":false}"#).unwrap();
        let report = refresher.cycle();
        assert_eq!(report.bazaar, None);
        assert_eq!(refresher.cache().bazaar_len(), 1);
    }

    #[test]
    fn unconfigured_load_fails() {
        let refresher =
            SnapshotRefresher::new(Arc::new(MemoryPriceCache::new()), SnapshotConfig::default());
        assert!(matches!(
            refresher.load_once(),
            Err(SnapshotError::NoSources)
        ));
    }

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let file = write_temp(BAZAAR);
        let refresher = refresher(&file);
        let (tx, rx) = watch::channel(false);

        let mut cycles = 0;
        let run = refresher.run(rx, |_| {
            cycles += 1;
            let _ = tx.send(true);
        });
        tokio::time::timeout(std::time::Duration::from_secs(5), run)
            .await
            .unwrap();
        assert_eq!(cycles, 1);
    }
}
