//! MSB-first bit packing and unpacking
//!
//! Codes are written most-significant-bit first into a growing byte buffer;
//! bits fill each output byte from its most-significant position down. The
//! reader walks the same layout bounded by a valid-bit count, so zero padding
//! in the final byte is never mistaken for payload.

use crate::error::{HftfError, Result};

/// Accumulates variable-length bit-codes into a byte buffer
pub struct BitWriter {
    buf: Vec<u8>,
    current: u8,
    used: u8,
    bit_len: u64,
}

impl BitWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            current: 0,
            used: 0,
            bit_len: 0,
        }
    }

    /// Create an empty writer with room for `bytes` output bytes
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
            current: 0,
            used: 0,
            bit_len: 0,
        }
    }

    /// Append a single bit
    pub fn push_bit(&mut self, bit: bool) {
        if bit {
            self.current |= 1 << (7 - self.used);
        }
        self.used += 1;
        self.bit_len += 1;
        if self.used == 8 {
            self.buf.push(self.current);
            self.current = 0;
            self.used = 0;
        }
    }

    /// Append the low `len` bits of `bits`, most significant first
    pub fn push_code(&mut self, bits: u64, len: u8) {
        for j in (0..len).rev() {
            self.push_bit((bits >> j) & 1 == 1);
        }
    }

    /// Total number of bits appended so far
    pub fn bit_len(&self) -> u64 {
        self.bit_len
    }

    /// Finalize the stream, zero-padding the last partial byte.
    /// Returns the packed buffer and the count of valid bits in it.
    pub fn finish(mut self) -> (Vec<u8>, u64) {
        if self.used > 0 {
            self.buf.push(self.current);
        }
        (self.buf, self.bit_len)
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a packed buffer, bounded by a valid-bit count
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_len: u64,
    pos: u64,
}

impl<'a> BitReader<'a> {
    /// Create a reader over `data` holding `bit_len` valid bits.
    /// Fails if the buffer cannot hold that many bits.
    pub fn new(data: &'a [u8], bit_len: u64) -> Result<Self> {
        let capacity = data.len() as u64 * 8;
        if bit_len > capacity {
            return Err(HftfError::truncated(format!(
                "bitstream declares {} bits but buffer holds only {}",
                bit_len, capacity
            )));
        }
        Ok(Self {
            data,
            bit_len,
            pos: 0,
        })
    }

    /// Consume and return the next bit, or `None` when all valid bits are
    /// exhausted
    pub fn next_bit(&mut self) -> Option<bool> {
        if self.pos >= self.bit_len {
            return None;
        }
        let byte = self.data[(self.pos / 8) as usize];
        let bit = (byte >> (7 - (self.pos % 8))) & 1;
        self.pos += 1;
        Some(bit == 1)
    }

    /// Number of valid bits not yet consumed
    pub fn bits_remaining(&self) -> u64 {
        self.bit_len - self.pos
    }

    /// Number of bits consumed so far
    pub fn bits_consumed(&self) -> u64 {
        self.pos
    }
}
