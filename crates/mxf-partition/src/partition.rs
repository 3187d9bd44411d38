use mxf_common::Key;

use crate::error::{PartitionError, Result};
use crate::key;

/// Sentinel for an unset header/index mark position.
const NO_MARK: i64 = -1;

/// One partition pack plus its essence-container label list.
///
/// A `Partition` is created empty (or cloned from a template), mutated
/// while the caller builds up a file, and then handed by value to a
/// [`crate::list::PartitionList`], which owns it from then on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    pub key: Key,
    pub major_version: u16,
    pub minor_version: u16,
    pub kag_size: u32,
    pub this_partition: u64,
    pub previous_partition: u64,
    pub footer_partition: u64,
    pub header_byte_count: u64,
    pub index_byte_count: u64,
    pub index_sid: u32,
    pub body_offset: u64,
    pub body_sid: u32,
    pub operational_pattern: Key,
    pub essence_containers: Vec<Key>,
    header_mark_in_pos: i64,
    index_mark_in_pos: i64,
}

impl Default for Partition {
    fn default() -> Self {
        Self::new()
    }
}

impl Partition {
    /// A fresh, unkeyed partition: `kagSize = 1`, version `1.2`, no marks,
    /// no labels. Matches `mxf_initialise_partition`.
    pub fn new() -> Self {
        Self {
            key: Key::ZERO,
            major_version: 0x0001,
            minor_version: 0x0002,
            kag_size: 1,
            this_partition: 0,
            previous_partition: 0,
            footer_partition: 0,
            header_byte_count: 0,
            index_byte_count: 0,
            index_sid: 0,
            body_offset: 0,
            body_sid: 0,
            operational_pattern: Key::ZERO,
            essence_containers: Vec::new(),
            header_mark_in_pos: NO_MARK,
            index_mark_in_pos: NO_MARK,
        }
    }

    /// Builds a fresh partition that copies only the template fields of
    /// `source`: version, KAG size, operational pattern, and essence
    /// container labels. Offsets, byte counts, SIDs, and the key are left
    /// at zero. Matches `mxf_initialise_with_partition`.
    pub fn from_partition(source: &Partition) -> Self {
        Self {
            major_version: source.major_version,
            minor_version: source.minor_version,
            kag_size: source.kag_size,
            operational_pattern: source.operational_pattern,
            essence_containers: source.essence_containers.clone(),
            ..Self::new()
        }
    }

    pub fn append_essence_container_label(&mut self, label: Key) {
        self.essence_containers.push(label);
    }

    pub fn is_header(&self) -> bool {
        key::is_header_partition_pack(&self.key)
    }

    pub fn is_body(&self) -> bool {
        key::is_body_partition_pack(&self.key)
    }

    pub fn is_footer(&self) -> bool {
        key::is_footer_partition_pack(&self.key)
    }

    pub fn mark_header_start(&mut self, pos: u64) {
        self.header_mark_in_pos = pos as i64;
    }

    pub fn mark_header_end(&mut self, pos: u64) -> Result<()> {
        if self.header_mark_in_pos < 0 {
            return Err(PartitionError::MarkNotStarted);
        }
        if (pos as i64) < self.header_mark_in_pos {
            return Err(PartitionError::MarkNotStarted);
        }
        self.header_byte_count = pos - self.header_mark_in_pos as u64;
        self.header_mark_in_pos = NO_MARK;
        Ok(())
    }

    pub fn mark_index_start(&mut self, pos: u64) {
        self.index_mark_in_pos = pos as i64;
    }

    pub fn mark_index_end(&mut self, pos: u64) -> Result<()> {
        if self.index_mark_in_pos < 0 {
            return Err(PartitionError::MarkNotStarted);
        }
        if (pos as i64) < self.index_mark_in_pos {
            return Err(PartitionError::MarkNotStarted);
        }
        self.index_byte_count = pos - self.index_mark_in_pos as u64;
        self.index_mark_in_pos = NO_MARK;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_partition_has_expected_defaults() {
        let p = Partition::new();
        assert_eq!(p.kag_size, 1);
        assert_eq!(p.major_version, 0x0001);
        assert_eq!(p.minor_version, 0x0002);
        assert_eq!(p.key, Key::ZERO);
        assert!(p.essence_containers.is_empty());
    }

    #[test]
    fn from_partition_keeps_template_fields_only() {
        let mut source = Partition::new();
        source.key = key::partition_pack_key(0x02, 0x04);
        source.kag_size = 512;
        source.this_partition = 1024;
        source.body_sid = 7;
        source.append_essence_container_label(Key::new([1; 16]));

        let clone = Partition::from_partition(&source);
        assert_eq!(clone.kag_size, 512);
        assert_eq!(clone.essence_containers, vec![Key::new([1; 16])]);
        assert_eq!(clone.key, Key::ZERO);
        assert_eq!(clone.this_partition, 0);
        assert_eq!(clone.body_sid, 0);
    }

    #[test]
    fn mark_end_without_start_fails() {
        let mut p = Partition::new();
        assert!(p.mark_header_end(10).is_err());
    }

    #[test]
    fn mark_start_then_end_computes_byte_count() {
        let mut p = Partition::new();
        p.mark_header_start(100);
        p.mark_header_end(180).unwrap();
        assert_eq!(p.header_byte_count, 80);
        // mark is reset, so calling end again fails
        assert!(p.mark_header_end(200).is_err());
    }
}
