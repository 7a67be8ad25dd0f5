//! Transfer buffer lifecycle
//!
//! One transmit/receive buffer pair, owned by the cycle controller and
//! reused in place across cycles. The transmit side is a pure function of
//! the generation counter, so every cycle's payload is reproducible; the
//! receive side is zeroed before each receive phase so stale bytes from a
//! prior cycle cannot masquerade as a fresh echo.

/// Paired transmit/receive buffers for one transfer cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleBuffers<const N: usize> {
    tx: [u8; N],
    rx: [u8; N],
}

impl<const N: usize> CycleBuffers<N> {
    /// Create a zeroed buffer pair.
    pub const fn new() -> Self {
        Self {
            tx: [0; N],
            rx: [0; N],
        }
    }

    /// Fill the transmit buffer with the generation-seeded pattern
    /// `tx[i] = (i + generation) mod 256`.
    ///
    /// Pure in `(N, generation)`; call exactly once per cycle, before the
    /// send phase.
    pub fn fill_tx(&mut self, generation: u32) {
        for (i, slot) in self.tx.iter_mut().enumerate() {
            // The truncating casts are the mod-256 of the pattern.
            #[allow(clippy::cast_possible_truncation)]
            {
                *slot = (i as u8).wrapping_add(generation as u8);
            }
        }
    }

    /// Zero the receive buffer; call exactly once per cycle, before the
    /// receive phase.
    pub fn clear_rx(&mut self) {
        self.rx.fill(0);
    }

    /// Number of positions where the echo differs from what was sent.
    /// Exact equality, no tolerance.
    pub fn mismatches(&self) -> usize {
        self.tx
            .iter()
            .zip(self.rx.iter())
            .filter(|(tx, rx)| tx != rx)
            .count()
    }

    /// The transmit buffer.
    pub const fn tx(&self) -> &[u8; N] {
        &self.tx
    }

    /// The receive buffer.
    pub const fn rx(&self) -> &[u8; N] {
        &self.rx
    }

    /// Exclusive access to the receive buffer, for the receive-phase
    /// descriptor.
    pub fn rx_mut(&mut self) -> &mut [u8; N] {
        &mut self.rx
    }
}

impl<const N: usize> Default for CycleBuffers<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn fill_produces_generation_offset_pattern() {
        let mut buffers = CycleBuffers::<4>::new();
        buffers.fill_tx(1);
        assert_eq!(buffers.tx(), &[1, 2, 3, 4]);
    }

    #[test]
    fn fill_wraps_generation_modulo_256() {
        let mut buffers = CycleBuffers::<4>::new();
        buffers.fill_tx(257);
        assert_eq!(buffers.tx(), &[1, 2, 3, 4]);
    }

    #[test]
    fn fill_wraps_byte_values_without_saturating() {
        let mut buffers = CycleBuffers::<4>::new();
        buffers.fill_tx(254);
        assert_eq!(buffers.tx(), &[254, 255, 0, 1]);
    }

    #[test]
    fn fill_is_pure_in_generation() {
        let mut first = CycleBuffers::<64>::new();
        let mut second = CycleBuffers::<64>::new();
        first.fill_tx(42);
        second.fill_tx(42);
        assert_eq!(first.tx(), second.tx());

        first.fill_tx(43);
        first.fill_tx(42);
        assert_eq!(first.tx(), second.tx(), "refill restores the pattern");
    }

    #[test]
    fn clear_zeroes_a_dirty_receive_buffer() {
        let mut buffers = CycleBuffers::<4>::new();
        buffers.rx_mut().copy_from_slice(&[9, 9, 9, 9]);
        buffers.clear_rx();
        assert_eq!(buffers.rx(), &[0, 0, 0, 0]);
    }

    #[test]
    fn mismatches_counts_differing_positions() {
        let mut buffers = CycleBuffers::<4>::new();
        buffers.fill_tx(9);
        let tx = *buffers.tx();
        buffers.rx_mut().copy_from_slice(&tx);
        buffers.rx_mut()[3] = tx[3].wrapping_add(1);
        assert_eq!(buffers.mismatches(), 1);
    }

    #[test]
    fn identical_buffers_have_zero_mismatches() {
        let mut buffers = CycleBuffers::<64>::new();
        buffers.fill_tx(7);
        let tx = *buffers.tx();
        buffers.rx_mut().copy_from_slice(&tx);
        assert_eq!(buffers.mismatches(), 0);
    }

    #[test]
    fn zero_length_pair_trivially_matches() {
        let buffers = CycleBuffers::<0>::new();
        assert_eq!(buffers.mismatches(), 0);
    }
}
