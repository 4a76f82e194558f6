//! `pqloop-core` — a concurrent network of self-toggling pseudo-qubits.
//!
//! Each unit is a tokio task that flips its own slot of a shared state
//! vector on a randomized period, running faster while its right-hand
//! neighbor reads 1. On top of that the crate offers:
//!
//! - **Gates**: global randomize, single- and double-controlled flips
//! - **Measurement**: an atomic snapshot of every slot
//! - **Heuristics**: a random-restart pattern search and a
//!   constant/balanced classifier
//!
//! This is not a quantum simulator. There are no amplitudes, a gate is a
//! conditional bit flip and a measurement is a plain read.
//!
//! # Quick start
//!
//! ```rust
//! use pqloop_core::{NetworkConfig, NetworkController};
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() -> pqloop_core::NetResult<()> {
//! let controller = NetworkController::new(NetworkConfig::default())?;
//!
//! controller.start(4).await?;
//! controller.stop().await?;
//!
//! controller.load(&"1010".parse().unwrap()).await?;
//! controller.apply_conditional_flip(0, 1).await?;
//! controller.apply_conditional_flip2(0, 2, 3).await?;
//! assert_eq!(controller.measure().await?.to_string(), "1111");
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
pub mod bits;
pub mod config;
pub mod entropy;
pub mod error;
mod gates;
mod measure;
pub mod network;
mod oscillator;
pub mod state;

pub use algorithms::{OracleKind, SearchOutcome};
pub use bits::{Bit, BitParseError, BitSequence};
pub use config::{ConfigError, NetworkConfig};
pub use entropy::{Entropy, SeededEntropy};
pub use error::{NetError, NetResult};
pub use network::{NetworkController, RunState};
pub use state::StateVector;
