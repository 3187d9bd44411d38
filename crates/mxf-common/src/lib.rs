//! Common types shared across the MXF partition/random-index crates.
//!
//! Currently this is just the 16-byte universal label type used for
//! partition-pack keys, the KLV Fill key, the RIP key, and essence-container
//! labels. Everything else in an MXF file (metadata sets, index tables,
//! essence) lives outside this crate's scope.
#![cfg_attr(not(feature = "std"), no_std)]

mod key;

pub use key::Key;
