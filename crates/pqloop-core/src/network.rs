//! Network lifecycle: starting, stopping and reconfiguring the units.
//!
//! The run-state and the state vector live together behind one `RwLock`.
//! Every unit toggle, gate and measurement takes that lock, so checking the
//! run-state and touching a slot always happen in the same critical section.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::{Mutex, RwLock, RwLockWriteGuard, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::bits::BitSequence;
use crate::config::NetworkConfig;
use crate::entropy::{Entropy, SeededEntropy};
use crate::error::{NetError, NetResult};
use crate::oscillator::Oscillator;
use crate::state::StateVector;

/// Lifecycle state of a [`NetworkController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunState {
    /// No units are active. The vector may be resized or loaded.
    #[default]
    Idle,
    /// Units are toggling their slots.
    Running,
    /// Stop was requested and at least one unit has not been joined yet.
    Stopping,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "Idle"),
            RunState::Running => write!(f, "Running"),
            RunState::Stopping => write!(f, "Stopping"),
        }
    }
}

/// Everything guarded by the network lock.
#[derive(Debug, Default)]
pub(crate) struct Network {
    pub(crate) run_state: RunState,
    /// Empty until the first `start`, `resize` or `load`.
    pub(crate) vector: StateVector,
}

impl Network {
    /// Gates may run while units are live or after a clean stop, never
    /// mid-stop and never before a vector exists.
    pub(crate) fn ensure_writable(&self) -> NetResult<()> {
        if self.run_state == RunState::Stopping {
            return Err(NetError::invalid_state(
                "Running or Idle with a live state vector",
                self.run_state,
            ));
        }
        self.ensure_live()
    }

    pub(crate) fn ensure_live(&self) -> NetResult<()> {
        if self.vector.is_empty() {
            return Err(NetError::invalid_state(
                "a live state vector",
                self.run_state,
            ));
        }
        Ok(())
    }
}

pub(crate) type SharedNetwork = Arc<RwLock<Network>>;

/// Owns the state vector and the unit tasks that toggle it.
///
/// All methods take `&self`, so a controller can be shared behind an `Arc`
/// between the tasks driving gates and measurements. Lifecycle calls
/// (`start`, `stop`, `resize`, `load`) are serialized internally.
///
/// # Example
///
/// ```no_run
/// use pqloop_core::{NetworkConfig, NetworkController};
///
/// # async fn run() -> pqloop_core::NetResult<()> {
/// let controller = NetworkController::new(NetworkConfig::default())?;
/// controller.start(8).await?;
/// let bits = controller.measure().await?;
/// assert_eq!(bits.len(), 8);
/// controller.stop().await?;
/// # Ok(())
/// # }
/// ```
pub struct NetworkController {
    pub(crate) config: Arc<NetworkConfig>,
    pub(crate) entropy: Arc<dyn Entropy>,
    pub(crate) shared: SharedNetwork,
    shutdown: watch::Sender<bool>,
    /// Unit handles not yet joined, keyed by slot index. Also the lifecycle lock.
    units: Mutex<Vec<(usize, JoinHandle<()>)>>,
}

impl NetworkController {
    /// Create an idle controller. Entropy is seeded from `config.seed`
    /// when present, from the OS otherwise.
    pub fn new(config: NetworkConfig) -> NetResult<Self> {
        let entropy = Arc::new(SeededEntropy::new(config.seed));
        Self::with_entropy(config, entropy)
    }

    /// Create an idle controller drawing all randomness from `entropy`.
    pub fn with_entropy(config: NetworkConfig, entropy: Arc<dyn Entropy>) -> NetResult<Self> {
        config.validate()?;
        let (shutdown, _) = watch::channel(false);
        Ok(Self {
            config: Arc::new(config),
            entropy,
            shared: Arc::new(RwLock::new(Network::default())),
            shutdown,
            units: Mutex::new(Vec::new()),
        })
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub async fn run_state(&self) -> RunState {
        self.shared.read().await.run_state
    }

    /// Current number of slots. Zero until a vector has been allocated.
    pub async fn len(&self) -> usize {
        self.shared.read().await.vector.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Heap bytes used by the current state vector.
    pub async fn footprint_bytes(&self) -> usize {
        self.shared.read().await.vector.footprint_bytes()
    }

    /// Number of unit tasks that have not been joined yet.
    pub async fn active_units(&self) -> usize {
        self.units.lock().await.len()
    }

    /// Allocate `n` zero slots and spawn one unit per slot.
    #[instrument(skip(self))]
    pub async fn start(&self, n: usize) -> NetResult<()> {
        let mut units = self.units.lock().await;

        let generation = {
            let mut net = self.shared.write().await;
            if net.run_state != RunState::Idle {
                return Err(NetError::invalid_state("Idle", net.run_state));
            }
            if n == 0 {
                return Err(NetError::InvalidConfiguration(
                    "network needs at least one unit".to_string(),
                ));
            }
            net.vector.reset(n);
            net.run_state = RunState::Running;
            net.vector.generation()
        };

        self.shutdown.send_replace(false);
        for index in 0..n {
            let base_period = self.config.base_period(self.entropy.uniform());
            let phase = if self.config.random_phase {
                base_period.mul_f64(self.entropy.uniform())
            } else {
                Duration::ZERO
            };
            let unit = Oscillator {
                index,
                generation,
                base_period,
                phase,
                config: Arc::clone(&self.config),
                shared: Arc::clone(&self.shared),
                shutdown: self.shutdown.subscribe(),
            };
            units.push((index, tokio::spawn(unit.run())));
        }

        info!(units = n, generation, "Network started");
        Ok(())
    }

    /// Signal every unit to stop and wait up to the grace period for them.
    ///
    /// Idle is a no-op. If some units are still running when the grace
    /// period expires they are logged, the controller stays in `Stopping`
    /// and a later call retries the join.
    #[instrument(skip(self))]
    pub async fn stop(&self) -> NetResult<()> {
        let mut units = self.units.lock().await;

        {
            let mut net = self.shared.write().await;
            match net.run_state {
                RunState::Idle => return Ok(()),
                RunState::Running => {
                    net.run_state = RunState::Stopping;
                    info!(units = units.len(), "Stopping network");
                }
                RunState::Stopping => {
                    debug!(pending = units.len(), "Retrying join of stopped units");
                }
            }
        }

        self.shutdown.send_replace(true);

        let grace = self.config.stop_grace();
        let joined = tokio::time::timeout(
            grace,
            join_all(units.iter_mut().map(|(_, handle)| handle)),
        )
        .await;

        match joined {
            Ok(results) => {
                for ((index, _), result) in units.iter().zip(results) {
                    if let Err(e) = result {
                        warn!(unit = index, error = %e, "Unit terminated abnormally");
                    }
                }
                units.clear();
            }
            Err(_) => {
                // Handles that completed inside join_all are consumed and
                // must not be polled again.
                units.retain(|(_, handle)| !handle.is_finished());
                for (index, _) in units.iter() {
                    warn!(
                        unit = index,
                        grace_ms = grace.as_millis() as u64,
                        "Unit did not stop within the grace period"
                    );
                }
                if !units.is_empty() {
                    return Ok(());
                }
            }
        }

        self.shared.write().await.run_state = RunState::Idle;
        info!("Network stopped");
        Ok(())
    }

    /// Replace the vector with `n` zero slots. Only allowed while Idle.
    pub async fn resize(&self, n: usize) -> NetResult<()> {
        let _units = self.units.lock().await;
        let mut net = self.idle_network().await?;
        if n == 0 {
            return Err(NetError::InvalidConfiguration(
                "network needs at least one unit".to_string(),
            ));
        }
        net.vector.reset(n);
        debug!(units = n, generation = net.vector.generation(), "Network resized");
        Ok(())
    }

    /// Overwrite the vector with `bits`, resizing if needed. Only allowed
    /// while Idle.
    pub async fn load(&self, bits: &BitSequence) -> NetResult<()> {
        let _units = self.units.lock().await;
        let mut net = self.idle_network().await?;
        if bits.is_empty() {
            return Err(NetError::InvalidConfiguration(
                "cannot load an empty bit sequence".to_string(),
            ));
        }
        net.vector.load(bits);
        debug!(bits = %bits, "State loaded");
        Ok(())
    }

    async fn idle_network(&self) -> NetResult<RwLockWriteGuard<'_, Network>> {
        let net = self.shared.write().await;
        if net.run_state != RunState::Idle {
            return Err(NetError::invalid_state("Idle", net.run_state));
        }
        Ok(net)
    }
}

impl Drop for NetworkController {
    fn drop(&mut self) {
        // Units exit at their next wake-up; nothing is joined here.
        self.shutdown.send_replace(true);
    }
}
