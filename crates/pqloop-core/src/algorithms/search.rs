//! Random-restart search toward a target pattern.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::bits::BitSequence;
use crate::error::{NetError, NetResult};
use crate::network::NetworkController;

/// Result of [`NetworkController::amplify_towards`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The matching measurement on success, the last one otherwise.
    #[serde(with = "bits_as_string")]
    pub measurement: BitSequence,
    /// Rounds used. Equals the budget when the search failed.
    pub iterations: usize,
    pub success: bool,
}

impl NetworkController {
    /// Measure, compare with `target`, randomize and retry, up to
    /// `max_iterations` rounds.
    ///
    /// Every round is an independent uniform draw, so the expected number of
    /// rounds to hit a fixed pattern grows as `2^n`. When the budget runs out
    /// one more measurement is taken and returned with `success = false`.
    #[instrument(skip(self, target), fields(target = %target))]
    pub async fn amplify_towards(
        &self,
        target: &BitSequence,
        max_iterations: usize,
    ) -> NetResult<SearchOutcome> {
        let len = self.len().await;
        if target.len() != len {
            return Err(NetError::TargetLength {
                expected: len,
                found: target.len(),
            });
        }

        for iteration in 1..=max_iterations {
            let measurement = self.measure().await?;
            debug!(iteration, measured = %measurement, "Search round");

            if measurement == *target {
                info!(iterations = iteration, "Target found");
                return Ok(SearchOutcome {
                    measurement,
                    iterations: iteration,
                    success: true,
                });
            }

            self.apply_global_randomize().await?;
            tokio::time::sleep(self.config.round_pause()).await;
        }

        let measurement = self.measure().await?;
        info!(iterations = max_iterations, last = %measurement, "Target not found");
        Ok(SearchOutcome {
            measurement,
            iterations: max_iterations,
            success: false,
        })
    }
}

mod bits_as_string {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use crate::bits::BitSequence;

    pub fn serialize<S: Serializer>(bits: &BitSequence, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(bits)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BitSequence, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
