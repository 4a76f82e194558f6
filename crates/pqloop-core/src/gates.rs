//! Gate operations on a controller's state vector.
//!
//! Each gate runs under the network write lock, so its read-then-write of
//! the operand slots never interleaves with a unit toggle.

use tracing::debug;

use crate::error::NetResult;
use crate::network::NetworkController;

impl NetworkController {
    /// Overwrite every slot with an independent random bit.
    pub async fn apply_global_randomize(&self) -> NetResult<()> {
        let mut net = self.shared.write().await;
        net.ensure_writable()?;
        net.vector.randomize(self.entropy.as_ref());
        debug!(state = %net.vector.snapshot(), "Randomized");
        Ok(())
    }

    /// Flip `target` if `control` reads 1.
    pub async fn apply_conditional_flip(&self, control: usize, target: usize) -> NetResult<()> {
        let mut net = self.shared.write().await;
        net.ensure_writable()?;
        let flipped = net.vector.conditional_flip(control, target)?;
        debug!(control, target, flipped, "Conditional flip");
        Ok(())
    }

    /// Flip `target` if both `control1` and `control2` read 1.
    pub async fn apply_conditional_flip2(
        &self,
        control1: usize,
        control2: usize,
        target: usize,
    ) -> NetResult<()> {
        let mut net = self.shared.write().await;
        net.ensure_writable()?;
        let flipped = net.vector.conditional_flip2(control1, control2, target)?;
        debug!(control1, control2, target, flipped, "Double-controlled flip");
        Ok(())
    }

    /// Flip a single slot unconditionally.
    pub async fn apply_flip(&self, index: usize) -> NetResult<()> {
        let mut net = self.shared.write().await;
        net.ensure_writable()?;
        let value = net.vector.toggle(index)?;
        debug!(index, value = %value, "Flip");
        Ok(())
    }
}
