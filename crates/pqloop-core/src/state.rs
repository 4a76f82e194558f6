//! The shared slot array and the gate primitives that act on it.
//!
//! `StateVector` itself is plain data: it has no interior synchronization.
//! The controller keeps it behind a single `RwLock`, so every method here
//! runs as one atomic step with respect to the oscillator units.

use crate::bits::{Bit, BitSequence};
use crate::entropy::Entropy;
use crate::error::{NetError, NetResult};

/// Ordered slot values, one per unit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StateVector {
    slots: Vec<Bit>,
    /// Bumped on every resize so units spawned against an older vector can
    /// tell that their index no longer belongs to them.
    generation: u64,
}

impl StateVector {
    /// A vector of `len` zero slots at generation 0.
    pub fn zeroed(len: usize) -> Self {
        Self {
            slots: vec![Bit::Zero; len],
            generation: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Heap bytes used by the slot storage.
    pub fn footprint_bytes(&self) -> usize {
        self.slots.len() * std::mem::size_of::<Bit>()
    }

    /// Replace the contents with `len` zero slots and start a new generation.
    pub(crate) fn reset(&mut self, len: usize) {
        self.slots.clear();
        self.slots.resize(len, Bit::Zero);
        self.generation += 1;
    }

    /// Overwrite the contents with `bits`. A length change counts as a resize.
    pub(crate) fn load(&mut self, bits: &BitSequence) {
        if bits.len() != self.slots.len() {
            self.generation += 1;
        }
        self.slots.clear();
        self.slots.extend(bits.iter());
    }

    pub fn get(&self, index: usize) -> NetResult<Bit> {
        self.slots
            .get(index)
            .copied()
            .ok_or(NetError::IndexOutOfRange {
                index,
                len: self.slots.len(),
            })
    }

    /// Flip one slot and return its new value.
    pub fn toggle(&mut self, index: usize) -> NetResult<Bit> {
        let len = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(NetError::IndexOutOfRange { index, len })?;
        *slot = slot.flipped();
        Ok(*slot)
    }

    /// Copy every slot out as one consistent sequence.
    pub fn snapshot(&self) -> BitSequence {
        BitSequence::from(self.slots.as_slice())
    }

    /// Overwrite every slot with an independently drawn bit.
    pub fn randomize(&mut self, entropy: &dyn Entropy) {
        for slot in &mut self.slots {
            *slot = entropy.bit();
        }
    }

    /// Flip `target` when `control` reads 1. Returns whether a flip happened.
    pub fn conditional_flip(&mut self, control: usize, target: usize) -> NetResult<bool> {
        self.check_indices(&[control, target])?;
        if self.slots[control].is_one() {
            self.slots[target] = self.slots[target].flipped();
            return Ok(true);
        }
        Ok(false)
    }

    /// Flip `target` when both controls read 1. Returns whether a flip happened.
    pub fn conditional_flip2(
        &mut self,
        control1: usize,
        control2: usize,
        target: usize,
    ) -> NetResult<bool> {
        self.check_indices(&[control1, control2, target])?;
        if self.slots[control1].is_one() && self.slots[control2].is_one() {
            self.slots[target] = self.slots[target].flipped();
            return Ok(true);
        }
        Ok(false)
    }

    /// Validate every operand before any slot is touched, so a bad index
    /// never leaves a half-applied gate behind.
    fn check_indices(&self, indices: &[usize]) -> NetResult<()> {
        let len = self.slots.len();
        match indices.iter().find(|&&i| i >= len) {
            Some(&index) => Err(NetError::IndexOutOfRange { index, len }),
            None => Ok(()),
        }
    }
}
