//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use pqloop_core::{Bit, Entropy, NetworkConfig, NetworkController};

/// Entropy that always returns the same draws.
#[derive(Debug, Clone, Copy)]
pub struct FixedEntropy {
    pub uniform: f64,
    pub bit: Bit,
    pub index: usize,
}

impl FixedEntropy {
    /// Late phases and slow periods, so units stay put for minutes of
    /// virtual time, and every random bit comes out as `bit`.
    pub fn quiet(bit: Bit) -> Self {
        Self {
            uniform: 0.999,
            bit,
            index: 0,
        }
    }
}

impl Entropy for FixedEntropy {
    fn uniform(&self) -> f64 {
        self.uniform
    }

    fn bit(&self) -> Bit {
        self.bit
    }

    fn index(&self, len: usize) -> usize {
        self.index % len
    }
}

/// One-minute nominal period: a started network does not toggle within a
/// test's virtual runtime when paired with [`FixedEntropy::quiet`].
pub fn slow_config() -> NetworkConfig {
    NetworkConfig {
        nominal_period_ms: 60_000,
        ..NetworkConfig::default()
    }
}

pub fn controller(config: NetworkConfig, entropy: impl Entropy + 'static) -> NetworkController {
    NetworkController::with_entropy(config, Arc::new(entropy)).unwrap()
}

pub fn quiet_controller(bit: Bit) -> NetworkController {
    controller(slow_config(), FixedEntropy::quiet(bit))
}
