//! Human-readable vector dumps
//!
//! Every dump is one line of the form `[` elements `];`. The `Display`
//! adapters render that line; the `write_*` functions write it to a stream
//! followed by a newline.
//!
//! | Adapter          | Element format          |
//! |------------------|-------------------------|
//! | [`ComplexDump`]  | `+1.00-2.50i, `         |
//! | [`RealDump`]     | `+1.00, `               |
//! | [`ByteDump`]     | `200, `                 |
//! | [`HexDump`]      | `c8 `                   |
//! | [`IntDump`]      | `-7, `                  |
//! | [`PackedBitsDump`] | `aa ` per 8 input bits |

use crate::bits::BitCursor;
use sigvec_core::{Cf32, Result};
use std::fmt;
use std::io::Write;

/// Complex samples as signed real and imaginary parts with two decimals
#[derive(Debug, Clone, Copy)]
pub struct ComplexDump<'a>(pub &'a [Cf32]);

/// Real samples as signed values with two decimals
#[derive(Debug, Clone, Copy)]
pub struct RealDump<'a>(pub &'a [f32]);

/// Bytes as unsigned decimals
#[derive(Debug, Clone, Copy)]
pub struct ByteDump<'a>(pub &'a [u8]);

/// Bytes as two-digit lowercase hex
#[derive(Debug, Clone, Copy)]
pub struct HexDump<'a>(pub &'a [u8]);

/// 32-bit integers as signed decimals
#[derive(Debug, Clone, Copy)]
pub struct IntDump<'a>(pub &'a [i32]);

/// One-bit-per-byte array packed eight bits to a hex byte
#[derive(Debug, Clone, Copy)]
pub struct PackedBitsDump<'a>(pub &'a [u8]);

fn bracketed<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    mut item: impl FnMut(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("[")?;
    for value in items {
        item(f, value)?;
    }
    f.write_str("];")
}

impl fmt::Display for ComplexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bracketed(f, self.0, |f, v| write!(f, "{:+.2}{:+.2}i, ", v.re, v.im))
    }
}

impl fmt::Display for RealDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bracketed(f, self.0, |f, v| write!(f, "{v:+.2}, "))
    }
}

impl fmt::Display for ByteDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bracketed(f, self.0, |f, v| write!(f, "{v}, "))
    }
}

impl fmt::Display for HexDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bracketed(f, self.0, |f, v| write!(f, "{v:02x} "))
    }
}

impl fmt::Display for IntDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bracketed(f, self.0, |f, v| write!(f, "{v}, "))
    }
}

impl fmt::Display for PackedBitsDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cursor = BitCursor::new(self.0);
        f.write_str("[")?;
        while cursor.remaining() > 0 {
            let count = cursor.remaining().min(8);
            if let Some(byte) = cursor.unpack(count) {
                write!(f, "{byte:02x} ")?;
            }
        }
        f.write_str("];")
    }
}

/// Write a complex dump line
pub fn write_c32<W: Write>(stream: &mut W, x: &[Cf32]) -> Result<()> {
    writeln!(stream, "{}", ComplexDump(x))?;
    Ok(())
}

/// Write a real dump line
pub fn write_f32<W: Write>(stream: &mut W, x: &[f32]) -> Result<()> {
    writeln!(stream, "{}", RealDump(x))?;
    Ok(())
}

/// Write a decimal byte dump line
pub fn write_bytes<W: Write>(stream: &mut W, x: &[u8]) -> Result<()> {
    writeln!(stream, "{}", ByteDump(x))?;
    Ok(())
}

/// Write a hex byte dump line
pub fn write_hex<W: Write>(stream: &mut W, x: &[u8]) -> Result<()> {
    writeln!(stream, "{}", HexDump(x))?;
    Ok(())
}

/// Write an integer dump line
pub fn write_i32<W: Write>(stream: &mut W, x: &[i32]) -> Result<()> {
    writeln!(stream, "{}", IntDump(x))?;
    Ok(())
}

/// Write a packed hex dump of a one-bit-per-byte array
pub fn write_packed_bits<W: Write>(stream: &mut W, bits: &[u8]) -> Result<()> {
    writeln!(stream, "{}", PackedBitsDump(bits))?;
    Ok(())
}
