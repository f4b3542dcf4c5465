//! Reading packed values out of unpacked bit arrays
//!
//! An unpacked bit array stores one bit per byte in the least significant
//! bit. [`BitCursor`] walks such an array and gathers groups of bits into
//! bytes, most significant bit first.

/// Forward cursor over a one-bit-per-byte array
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    bits: &'a [u8],
    position: usize,
}

impl<'a> BitCursor<'a> {
    pub fn new(bits: &'a [u8]) -> Self {
        Self { bits, position: 0 }
    }

    /// Number of bits consumed so far
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bits left to read
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bits.len() - self.position
    }

    /// Read the next `count` bits, first bit most significant, into the low
    /// bits of a byte and advance past them
    ///
    /// Returns `None` without moving when `count > 8` or fewer than `count`
    /// bits remain. Only bit 0 of each input byte is used.
    pub fn unpack(&mut self, count: usize) -> Option<u8> {
        if count > 8 || count > self.remaining() {
            return None;
        }
        let group = &self.bits[self.position..self.position + count];
        let value = group.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1));
        self.position += count;
        Some(value)
    }
}

/// Pack a one-bit-per-byte array into bytes, eight bits per byte
///
/// A trailing group of `len % 8` bits becomes one more byte holding those
/// bits in its low end.
pub fn pack_bits(bits: &[u8]) -> Vec<u8> {
    let mut cursor = BitCursor::new(bits);
    let mut packed = Vec::with_capacity(bits.len().div_ceil(8));
    while cursor.remaining() > 0 {
        let count = cursor.remaining().min(8);
        if let Some(byte) = cursor.unpack(count) {
            packed.push(byte);
        }
    }
    packed
}
