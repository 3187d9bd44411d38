//! Seekable KLV byte-stream I/O.
//!
//! An MXF file is read and written through a single cursor that tracks the
//! length of an optional run-in (up to 65535 arbitrary bytes preceding the
//! first partition pack, see [`MAX_RUNIN_LEN`]) and knows how to read and
//! write the KLV primitives partition packs and the RIP are built from:
//! 16-byte keys, BER-coded lengths, big-endian integers, and batch headers.
//!
//! Unlike the sibling crates this library is grounded on, this one commits
//! to `std`: an MXF reader/writer fundamentally needs random access to a
//! real seekable byte stream, so there is no no-std split here.

mod ber;
mod file;

pub use ber::{ber_encoded_len, MIN_BER_LLEN};
pub use file::MxfFile;

pub use mxf_common::Key;

/// Length, in bytes, of a KLV key and of a universal label.
pub const KEY_LEN: usize = 16;

/// Maximum permitted run-in length before the first partition pack, per
/// SMPTE 377M.
pub const MAX_RUNIN_LEN: u16 = 65535;
