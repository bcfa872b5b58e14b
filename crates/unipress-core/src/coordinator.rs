// ── Coordinator ──
//
// Full lifecycle management for one UniFi console. Owns the API
// clients, probes Protect availability, polls both APIs into an
// immutable `Snapshot`, and swaps snapshots atomically for readers.
// Buttons hold a `Coordinator` clone and never talk HTTP themselves.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::{ArcSwap, ArcSwapOption};
use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use unipress_api::{NetworkClient, ProtectClient};

use crate::config::ControllerConfig;
use crate::convert;
use crate::error::CoreError;
use crate::model::{Camera, Chime, Device};
use crate::snapshot::{ProtectSnapshot, Snapshot};

/// Page size for Integration API list endpoints.
const PAGE_LIMIT: i32 = 100;

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

// ── Coordinator ──────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<CoordinatorInner>`. Manages the full
/// lifecycle: client construction, the Protect availability probe,
/// initial and periodic snapshot refresh, and shutdown.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    config: ControllerConfig,
    network: NetworkClient,
    /// `None` when Protect is disabled by config or the probe failed.
    protect: ArcSwapOption<ProtectClient>,
    snapshot: ArcSwap<Snapshot>,
    connection_state: watch::Sender<ConnectionState>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Coordinator {
    /// Create a new Coordinator from configuration. Builds the API
    /// clients but performs no I/O -- call [`connect()`](Self::connect)
    /// to probe, load the first snapshot, and start background refresh.
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let transport = config.transport();

        let network = NetworkClient::from_api_key(config.url.as_str(), &config.api_key, &transport)?;
        let protect = if config.protect_enabled {
            Some(ProtectClient::from_api_key(
                config.url.as_str(),
                &config.api_key,
                &transport,
            )?)
        } else {
            None
        };

        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);
        let (last_refresh, _) = watch::channel(None);

        Ok(Self {
            inner: Arc::new(CoordinatorInner {
                config,
                network,
                protect: ArcSwapOption::from(protect.map(Arc::new)),
                snapshot: ArcSwap::from_pointee(Snapshot::empty()),
                connection_state,
                last_refresh,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    /// Access the console configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    /// The Network API client.
    pub fn network(&self) -> &NetworkClient {
        &self.inner.network
    }

    /// The Protect API client, when the console has one.
    pub fn protect(&self) -> Option<Arc<ProtectClient>> {
        self.inner.protect.load_full()
    }

    /// Whether Protect actions can currently be dispatched.
    pub fn protect_configured(&self) -> bool {
        self.inner.protect.load().is_some()
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Connect to the console.
    ///
    /// Probes the Protect application (downgrading to network-only when
    /// the probe fails), loads the initial snapshot, and spawns the
    /// periodic refresh task.
    pub async fn connect(&self) -> Result<(), CoreError> {
        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Connecting);

        if let Some(client) = self.protect() {
            match client.get_meta_info().await {
                Ok(info) => {
                    debug!(
                        version = info.application_version.as_deref().unwrap_or("unknown"),
                        "protect application present"
                    );
                }
                Err(err) => {
                    warn!(error = %err, "protect probe failed -- continuing network-only");
                    self.inner.protect.store(None);
                }
            }
        }

        // Initial snapshot load
        if let Err(err) = self.refresh_now().await {
            let _ = self.inner.connection_state.send(ConnectionState::Failed);
            return Err(err);
        }

        // Spawn background refresh
        let interval_secs = self.inner.config.refresh_interval_secs;
        if interval_secs > 0 {
            let coordinator = self.clone();
            let cancel = self.inner.cancel.clone();
            let mut handles = self.inner.task_handles.lock().await;
            handles.push(tokio::spawn(refresh_task(coordinator, interval_secs, cancel)));
        }

        let _ = self.inner.connection_state.send(ConnectionState::Connected);
        info!("connected to console");
        Ok(())
    }

    /// Shut down background tasks and mark the coordinator disconnected.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();

        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }

        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Disconnected);
        debug!("coordinator shut down");
    }

    // ── Snapshot refresh ─────────────────────────────────────────

    /// Fetch everything and install a fresh snapshot.
    ///
    /// A site whose device listing fails is skipped with a warning, as
    /// is a device whose detail fetch fails and each Protect endpoint
    /// that errors; one broken corner never hides the rest. Only a
    /// failing site *listing* aborts the whole refresh.
    pub async fn refresh_now(&self) -> Result<(), CoreError> {
        let network = self.network();

        let sites = network
            .paginate_all(PAGE_LIMIT, |offset, limit| network.list_sites(offset, limit))
            .await?;

        let site_results = join_all(sites.iter().map(|site| self.refresh_site(&site.id))).await;

        let mut devices = HashMap::new();
        for (site_id, site_devices) in site_results.into_iter().flatten() {
            devices.insert(site_id, site_devices);
        }

        let protect = match self.protect() {
            Some(client) => Some(self.refresh_protect(&client).await),
            None => None,
        };

        let snapshot = Snapshot {
            devices,
            protect,
            refreshed_at: Utc::now(),
        };

        debug!(
            sites = snapshot.devices.len(),
            devices = snapshot.device_count(),
            protect = snapshot.protect.is_some(),
            "snapshot refresh complete"
        );

        self.install_snapshot(snapshot);
        Ok(())
    }

    /// Fetch one site's devices with per-device detail merging.
    async fn refresh_site(&self, site_id: &str) -> Option<(String, HashMap<String, Device>)> {
        let network = self.network();

        let summaries = match network
            .paginate_all(PAGE_LIMIT, |offset, limit| {
                network.list_devices(site_id, offset, limit)
            })
            .await
        {
            Ok(list) => list,
            Err(err) => {
                warn!(site = %site_id, error = %err, "device listing failed -- skipping site");
                return None;
            }
        };

        let details = join_all(
            summaries
                .iter()
                .map(|summary| network.get_device(site_id, &summary.id)),
        )
        .await;

        let mut devices = HashMap::with_capacity(summaries.len());
        for (summary, details) in summaries.iter().zip(details) {
            let details = match details {
                Ok(d) => Some(d),
                Err(err) => {
                    warn!(
                        site = %site_id,
                        device = %summary.id,
                        error = %err,
                        "device detail fetch failed -- keeping summary only"
                    );
                    None
                }
            };
            let device = convert::device_from_api(summary, details.as_ref());
            devices.insert(device.id.clone(), device);
        }

        Some((site_id.to_owned(), devices))
    }

    /// Fetch the Protect section. Endpoint failures degrade to empty
    /// collections rather than aborting the refresh.
    async fn refresh_protect(&self, client: &ProtectClient) -> ProtectSnapshot {
        let (cameras_res, chimes_res) = tokio::join!(client.list_cameras(), client.list_chimes());

        let cameras = match cameras_res {
            Ok(list) => list,
            Err(err) => {
                warn!(error = %err, "camera listing failed");
                Vec::new()
            }
        };
        let chimes = match chimes_res {
            Ok(list) => list,
            Err(err) => {
                warn!(error = %err, "chime listing failed");
                Vec::new()
            }
        };

        ProtectSnapshot {
            cameras: cameras
                .into_iter()
                .map(Camera::from)
                .map(|camera| (camera.id.clone(), camera))
                .collect(),
            chimes: chimes
                .into_iter()
                .map(Chime::from)
                .map(|chime| (chime.id.clone(), chime))
                .collect(),
        }
    }

    // ── Snapshot access ──────────────────────────────────────────

    /// The current snapshot. Readers get an `Arc` that stays coherent
    /// even while a refresh swaps in a newer one.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.snapshot.load_full()
    }

    /// Install a fully assembled snapshot.
    ///
    /// The single write path for cached state: `refresh_now` ends here,
    /// and embedders with their own data feed can call it directly.
    pub fn install_snapshot(&self, snapshot: Snapshot) {
        let refreshed_at = snapshot.refreshed_at;
        self.inner.snapshot.store(Arc::new(snapshot));
        let _ = self.inner.last_refresh.send(Some(refreshed_at));
    }

    // ── State observation ────────────────────────────────────────

    /// Subscribe to connection state changes.
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    /// Subscribe to snapshot installation times.
    pub fn last_refresh(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.inner.last_refresh.subscribe()
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// One-shot: connect, run closure, shut down.
    ///
    /// Optimized for CLI use: periodic refresh is disabled since only a
    /// single request-response cycle is needed.
    pub async fn oneshot<F, Fut, T>(config: ControllerConfig, f: F) -> Result<T, CoreError>
    where
        F: FnOnce(Coordinator) -> Fut,
        Fut: std::future::Future<Output = Result<T, CoreError>>,
    {
        let mut cfg = config;
        cfg.refresh_interval_secs = 0;

        let coordinator = Coordinator::new(cfg)?;
        coordinator.connect().await?;
        let result = f(coordinator.clone()).await;
        coordinator.shutdown().await;
        result
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Periodically refresh the snapshot.
async fn refresh_task(coordinator: Coordinator, interval_secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = coordinator.refresh_now().await {
                    warn!(error = %e, "periodic refresh failed");
                }
            }
        }
    }
}
