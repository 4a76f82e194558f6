//! Whole-network measurement.

use tracing::debug;

use crate::bits::BitSequence;
use crate::error::NetResult;
use crate::network::NetworkController;

impl NetworkController {
    /// Wait out the settle delay, then copy every slot at one instant.
    ///
    /// The snapshot is taken under the network lock, so no slot can be
    /// mid-toggle and the length always matches the live vector. Allowed in
    /// any run-state once a vector exists.
    pub async fn measure(&self) -> NetResult<BitSequence> {
        let settle = self.config.settle_delay(self.entropy.uniform());
        tokio::time::sleep(settle).await;

        let net = self.shared.read().await;
        net.ensure_live()?;
        let bits = net.vector.snapshot();
        debug!(bits = %bits, settle_ms = settle.as_millis() as u64, "Measured");
        Ok(bits)
    }
}
