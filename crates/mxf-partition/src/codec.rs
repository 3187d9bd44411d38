//! Serialises and deserialises a partition pack to/from the KLV value
//! region that follows its key and BER length.
//!
//! Layout (88-byte fixed prefix, then a batch of 16-byte labels):
//! `majorVersion:u16 | minorVersion:u16 | kagSize:u32 | thisPartition:u64 |
//! previousPartition:u64 | footerPartition:u64 | headerByteCount:u64 |
//! indexByteCount:u64 | indexSID:u32 | bodyOffset:u64 | bodySID:u32 |
//! operationalPattern:[u8;16] | count:u32 | elementSize:u32 | label × count`.
//! All integers are big-endian.

use std::io::{Read, Seek, Write};

use mxf_io::MxfFile;

use crate::error::{PartitionError, Result};
use crate::partition::Partition;

/// Fixed-size prefix of a partition pack value, before the essence
/// container label batch.
pub const FIXED_PREFIX_LEN: u64 = 88;

/// Length, in bytes, of a single essence-container / operational-pattern
/// universal label.
pub const LABEL_LEN: u32 = 16;

/// Writes `partition` at the file's current position.
///
/// Sets `partition.this_partition` (and, for a footer pack,
/// `partition.footer_partition`) from the current position before writing,
/// per the base format's self-referencing footer rule.
pub fn write_partition<T: Write + Seek>(file: &mut MxfFile<T>, partition: &mut Partition) -> Result<()> {
    let file_pos = file.tell()?;
    partition.this_partition = file_pos - file.run_in_len() as u64;
    if partition.is_footer() {
        partition.footer_partition = partition.this_partition;
    }

    let essence_container_len = partition.essence_containers.len() as u32;
    let pack_len = FIXED_PREFIX_LEN + LABEL_LEN as u64 * essence_container_len as u64;

    file.write_kl(&partition.key, pack_len)?;

    file.write_u16_be(partition.major_version)?;
    file.write_u16_be(partition.minor_version)?;
    file.write_u32_be(partition.kag_size)?;
    file.write_u64_be(partition.this_partition)?;
    file.write_u64_be(partition.previous_partition)?;
    file.write_u64_be(partition.footer_partition)?;
    file.write_u64_be(partition.header_byte_count)?;
    file.write_u64_be(partition.index_byte_count)?;
    file.write_u32_be(partition.index_sid)?;
    file.write_u64_be(partition.body_offset)?;
    file.write_u32_be(partition.body_sid)?;
    file.write_ul(&partition.operational_pattern)?;

    file.write_batch_header(essence_container_len, LABEL_LEN)?;
    for label in &partition.essence_containers {
        file.write_ul(label)?;
    }

    log::trace!(
        "wrote partition pack at {} (key={:?}, labels={})",
        partition.this_partition,
        partition.key,
        essence_container_len
    );

    Ok(())
}

/// Reads a partition pack value, given the key the caller has already
/// consumed from the stream.
pub fn read_partition<T: Read + Seek>(file: &mut MxfFile<T>, key: mxf_common::Key) -> Result<Partition> {
    if !crate::key::is_partition_pack(&key) {
        return Err(PartitionError::NotAPartitionPack);
    }

    let mut partition = Partition::new();
    partition.key = key;

    partition.major_version = file.read_u16_be()?;
    partition.minor_version = file.read_u16_be()?;
    partition.kag_size = file.read_u32_be()?;
    partition.this_partition = file.read_u64_be()?;
    partition.previous_partition = file.read_u64_be()?;
    partition.footer_partition = file.read_u64_be()?;
    partition.header_byte_count = file.read_u64_be()?;
    partition.index_byte_count = file.read_u64_be()?;
    partition.index_sid = file.read_u32_be()?;
    partition.body_offset = file.read_u64_be()?;
    partition.body_sid = file.read_u32_be()?;
    partition.operational_pattern = file.read_ul()?;

    let (count, element_size) = file.read_batch_header()?;
    if element_size != LABEL_LEN {
        return Err(PartitionError::BadBatchElementSize {
            expected: LABEL_LEN,
            got: element_size,
        });
    }
    for _ in 0..count {
        let label = file.read_ul()?;
        partition.append_essence_container_label(label);
    }

    log::trace!(
        "read partition pack at {} (key={:?}, labels={count})",
        partition.this_partition,
        partition.key
    );

    Ok(partition)
}
