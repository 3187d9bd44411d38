//! The Random Index Pack: a trailer giving `(bodySID, thisPartition)` for
//! every partition in the file, so a reader can seek straight to any
//! partition without walking the whole file.

use std::io::{Read, Seek, SeekFrom, Write};

use mxf_io::{MxfFile, KEY_LEN};

use crate::error::{PartitionError, Result};
use crate::key;
use crate::list::PartitionList;

/// One `(bodySID, thisPartition)` pair from a random index pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RipEntry {
    pub body_sid: u32,
    pub this_partition: u64,
}

/// The random index pack's entry table, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RandomIndexPack {
    pub entries: Vec<RipEntry>,
}

/// Writes one entry per partition in `partitions`, followed by the
/// trailing 4-byte total-size field a reader uses to locate the pack
/// from the end of the file. Leaves the file positioned just past the
/// pack.
pub fn write_rip<T: Write>(file: &mut MxfFile<T>, partitions: &PartitionList) -> Result<()> {
    let num_partitions = partitions.len() as u64;
    let len = (4 + 8) * num_partitions + 4;

    file.write_k(&key::RANDOM_INDEX_PACK_KEY)?;
    let llen = file.write_l(len)?;

    for partition in partitions {
        file.write_u32_be(partition.body_sid)?;
        file.write_u64_be(partition.this_partition)?;
    }

    let total_size = KEY_LEN as u64 + llen as u64 + len;
    file.write_u32_be(total_size as u32)?;
    log::debug!("wrote random index pack with {num_partitions} entries ({total_size} bytes)");
    Ok(())
}

/// Reads the random index pack from the end of the file, returning it
/// along with its total byte size (key + length + entries + trailer).
///
/// Leaves the file positioned at the start of the pack's key.
pub fn read_rip_and_size<T: Read + Seek>(file: &mut MxfFile<T>) -> Result<(RandomIndexPack, u32)> {
    // Steps 1-2 (size sanity, key check) find "no RIP" on many legitimate
    // MXF files and are not treated as errors; only a malformed structure
    // past the key check is.
    file.seek(SeekFrom::End(-4))?;
    let rip_size = file.read_u32_be()?;
    if rip_size < 33 {
        return Err(PartitionError::NoRandomIndexPack);
    }

    file.seek(SeekFrom::Current(-(rip_size as i64)))?;
    let key = file.read_k()?;
    if key != key::RANDOM_INDEX_PACK_KEY {
        return Err(PartitionError::NoRandomIndexPack);
    }
    let (_llen, len) = file.read_l()?;

    if len < 4 || (len - 4) % 12 != 0 {
        return Err(PartitionError::MalformedRandomIndexPack {
            reason: "entry table length is not a whole number of 12-byte entries",
        });
    }
    let num_entries = (len - 4) / 12;

    let mut rip = RandomIndexPack::default();
    for _ in 0..num_entries {
        let body_sid = file.read_u32_be()?;
        let this_partition = file.read_u64_be()?;
        rip.entries.push(RipEntry { body_sid, this_partition });
    }

    log::debug!("read random index pack with {num_entries} entries ({rip_size} bytes)");
    Ok((rip, rip_size))
}

/// Reads the random index pack, discarding its byte size.
pub fn read_rip<T: Read + Seek>(file: &mut MxfFile<T>) -> Result<RandomIndexPack> {
    let (rip, _size) = read_rip_and_size(file)?;
    Ok(rip)
}
