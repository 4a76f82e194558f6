//! The per-unit toggle loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::trace;

use crate::bits::Bit;
use crate::config::NetworkConfig;
use crate::network::{RunState, SharedNetwork};

/// One unit bound to slot `index`, coupled to slot `(index + 1) % n` when
/// `n > 1`.
pub(crate) struct Oscillator {
    pub(crate) index: usize,
    /// Vector generation this unit was spawned against.
    pub(crate) generation: u64,
    pub(crate) base_period: Duration,
    /// Delay before the first toggle.
    pub(crate) phase: Duration,
    pub(crate) config: Arc<NetworkConfig>,
    pub(crate) shared: SharedNetwork,
    pub(crate) shutdown: watch::Receiver<bool>,
}

impl Oscillator {
    pub(crate) async fn run(mut self) {
        let mut toggles: u64 = 0;

        if !self.phase.is_zero() && !self.sleep(self.phase).await {
            return;
        }

        while let Some(neighbor) = self.step().await {
            toggles += 1;
            let period = effective_period(&self.config, self.base_period, neighbor);
            if !self.sleep(period).await {
                break;
            }
        }

        trace!(unit = self.index, toggles, "Unit exited");
    }

    /// Read the neighbor and toggle the own slot in one critical section.
    /// `None` means the unit must exit.
    async fn step(&mut self) -> Option<Bit> {
        let mut net = self.shared.write().await;
        if *self.shutdown.borrow()
            || net.run_state != RunState::Running
            || net.vector.generation() != self.generation
        {
            return None;
        }

        // A lone unit has no neighbor to couple to.
        let len = net.vector.len();
        let neighbor = if len > 1 {
            net.vector.get((self.index + 1) % len).ok()?
        } else {
            Bit::Zero
        };
        let value = net.vector.toggle(self.index).ok()?;
        trace!(unit = self.index, value = %value, neighbor = %neighbor, "Toggled");
        Some(neighbor)
    }

    /// Sleep for `period` unless stop is signalled first. Returns whether
    /// the unit should keep running.
    async fn sleep(&mut self, period: Duration) -> bool {
        tokio::select! {
            _ = tokio::time::sleep(period) => !*self.shutdown.borrow(),
            _ = self.shutdown.changed() => false,
        }
    }
}

/// Base period, shortened by the coupling factor while the neighbor reads 1,
/// never below the configured floor.
pub(crate) fn effective_period(config: &NetworkConfig, base: Duration, neighbor: Bit) -> Duration {
    let period = if neighbor.is_one() {
        base.mul_f64(config.coupling_factor)
    } else {
        base
    };
    period.max(config.period_floor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_one_halves_period() {
        let config = NetworkConfig::default();
        let base = Duration::from_millis(800);
        assert_eq!(effective_period(&config, base, Bit::Zero), base);
        assert_eq!(
            effective_period(&config, base, Bit::One),
            Duration::from_millis(400)
        );
    }

    #[test]
    fn test_period_is_clamped_to_floor() {
        let config = NetworkConfig::default();
        let period = effective_period(&config, Duration::from_millis(120), Bit::One);
        assert_eq!(period, config.period_floor());
    }
}
