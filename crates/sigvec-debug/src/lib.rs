//! Debug output for sigvec buffers
//!
//! - [`format`]: one-line text dumps of real, complex, byte and integer
//!   vectors, and packed hex dumps of unpacked bit arrays
//! - [`save`]: raw dumps of any plain-old-data slice to a file, and loading
//!   them back
//! - [`bits`]: the bit cursor used to pack unpacked bit arrays
//!
//! # Example
//!
//! ```rust
//! use sigvec_debug::{write_packed_bits, RealDump};
//!
//! assert_eq!(RealDump(&[1.0, -0.5]).to_string(), "[+1.00, -0.50, ];");
//!
//! let mut out = Vec::new();
//! write_packed_bits(&mut out, &[1, 0, 1, 0, 1, 0, 1, 0, 1, 1]).unwrap();
//! assert_eq!(out, b"[aa 03 ];\n");
//! ```

pub mod bits;
pub mod format;
pub mod save;

pub use bits::{pack_bits, BitCursor};
pub use format::{
    write_bytes, write_c32, write_f32, write_hex, write_i32, write_packed_bits, ByteDump,
    ComplexDump, HexDump, IntDump, PackedBitsDump, RealDump,
};
pub use save::{load_slice, save_file, save_slice};
