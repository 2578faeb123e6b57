use heapless::Vec;

use crate::{error::ShadowError, helpers::shadow_slot};

/// Host-side mirror of the shadowed registers.
///
/// Slot 0 is a sentinel and never holds a register. Writes mark their slot
/// pending until the device reports a completed update. A slot is also
/// unflushed from the moment its value changes until the bus write carrying
/// it succeeds; a completed update does not clear pending on unflushed slots.
pub struct ShadowTable<const N: usize>
where
    bitmaps::BitsImpl<N>: bitmaps::Bits,
{
    values: [u32; N],
    pending: bitmaps::Bitmap<N>,
    unflushed: bitmaps::Bitmap<N>,
}

impl<const N: usize> ShadowTable<N>
where
    bitmaps::BitsImpl<N>: bitmaps::Bits,
{
    /// Creates a table holding a copy of `defaults`.
    pub fn new(defaults: &[u32; N]) -> Self {
        Self {
            values: *defaults,
            pending: bitmaps::Bitmap::new(),
            unflushed: bitmaps::Bitmap::new(),
        }
    }

    /// Returns the cached value of slot `index`.
    pub fn get(&self, index: u8) -> Result<u32, ShadowError> {
        let slot = shadow_slot::<N>(index)?;
        Ok(self.values[slot])
    }

    /// Stores `value` in slot `index` and marks it pending and unflushed.
    pub fn set(&mut self, index: u8, value: u32) -> Result<(), ShadowError> {
        let slot = shadow_slot::<N>(index)?;
        self.values[slot] = value;
        self.pending.set(slot, true);
        self.unflushed.set(slot, true);
        Ok(())
    }

    /// Records that the value in slot `index` reached the device.
    pub fn mark_flushed(&mut self, index: u8) -> Result<(), ShadowError> {
        let slot = shadow_slot::<N>(index)?;
        self.unflushed.set(slot, false);
        Ok(())
    }

    /// Returns true if the last value stored in slot `index` never made it
    /// onto the bus.
    pub fn is_unflushed(&self, index: u8) -> Result<bool, ShadowError> {
        let slot = shadow_slot::<N>(index)?;
        Ok(self.unflushed.get(slot))
    }

    pub fn any_unflushed(&self) -> bool {
        !self.unflushed.is_empty()
    }

    /// Returns true if slot `index` was written since the last completed update.
    pub fn is_pending(&self, index: u8) -> Result<bool, ShadowError> {
        let slot = shadow_slot::<N>(index)?;
        Ok(self.pending.get(slot))
    }

    pub fn any_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Collects the indices of all pending slots in ascending order.
    pub fn pending(&self) -> Vec<u8, N> {
        collect_slots(&self.pending)
    }

    /// Collects the indices of all unflushed slots in ascending order.
    pub fn unflushed(&self) -> Vec<u8, N> {
        collect_slots(&self.unflushed)
    }

    /// Clears pending state after a completed update.
    ///
    /// Unflushed slots stay pending: the update applied whatever the device
    /// held, not the value cached here.
    pub fn clear_pending(&mut self) {
        self.pending = self.unflushed;
    }

    /// Overwrites every slot with `defaults` and clears all tracking state.
    pub fn reload(&mut self, defaults: &[u32; N]) {
        self.values = *defaults;
        self.pending = bitmaps::Bitmap::new();
        self.unflushed = bitmaps::Bitmap::new();
    }
}

fn collect_slots<const N: usize>(bits: &bitmaps::Bitmap<N>) -> Vec<u8, N>
where
    bitmaps::BitsImpl<N>: bitmaps::Bits,
{
    let mut out = Vec::new();
    let mut idx = bits.first_index();
    while let Some(slot) = idx {
        // Capacity equals the slot count, so this cannot overflow.
        let _ = out.push(slot as u8);
        idx = bits.next_index(slot);
    }
    out
}
