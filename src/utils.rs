//! Common tools

/// The state of a bit,
/// It's either [`BitState::Clear`] to represent a 0
/// or [`BitState::Set`] to represent a 1
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BitState {
    /// Bit is 0
    Clear,
    /// Bit is 1
    Set,
}

/// Simple bit ops
///
/// Positions above 7 are masked into `0..=7`.
pub trait BitOps {
    #[allow(missing_docs)]
    fn set_bit(&mut self, pos: u8) -> Self;
    #[allow(missing_docs)]
    fn clear_bit(&mut self, pos: u8) -> Self;
    #[allow(missing_docs)]
    fn check_bit(&self, pos: u8) -> BitState;

    /// Set or clear a bit depending on `set`
    fn put_bit(&mut self, pos: u8, set: bool) -> Self
    where
        Self: Sized,
    {
        match set {
            true => self.set_bit(pos),
            false => self.clear_bit(pos),
        }
    }
}

impl BitOps for u8 {
    fn set_bit(&mut self, pos: u8) -> Self {
        *self |= 1u8 << (pos & 0b111);
        *self
    }

    fn clear_bit(&mut self, pos: u8) -> Self {
        *self &= !(1u8 << (pos & 0b111));
        *self
    }

    fn check_bit(&self, pos: u8) -> BitState {
        match (*self >> (pos & 0b111)) & 1 == 1 {
            true => BitState::Set,
            false => BitState::Clear,
        }
    }
}

/// Split a byte into `(high, low)` nibbles, each in the lower 4 bits.
///
/// 4-bit mode always transfers the high nibble first.
pub const fn split_nibbles(byte: u8) -> (u8, u8) {
    (byte >> 4, byte & 0x0F)
}

/// Inverse of [`split_nibbles`]
pub const fn join_nibbles(high: u8, low: u8) -> u8 {
    ((high & 0x0F) << 4) | (low & 0x0F)
}
