//! KLV Fill items: padding written as a single `KLVFill` key plus a BER
//! length and that many zero bytes, used both to reach an exact byte
//! position and to round a position up to a KLV Alignment Grid (KAG)
//! boundary.

use std::io::{Seek, Write};

use mxf_io::{MxfFile, KEY_LEN};

use crate::error::{PartitionError, Result};
use crate::key;
use crate::partition::Partition;

/// Writes a fill item that advances the file to exactly `position`.
///
/// A no-op if already there. Fails if `position` is behind the current
/// position, or so close ahead that a fill item (key + length) cannot fit.
pub fn fill_to_position<T: Write + Seek>(file: &mut MxfFile<T>, position: u64) -> Result<()> {
    let file_pos = file.tell()?;
    if file_pos == position {
        return Ok(());
    }

    let required = file.get_min_llen() as i64 + KEY_LEN as i64;
    if position as i64 - file_pos as i64 < required {
        return Err(PartitionError::FillTargetUnreachable);
    }

    file.write_k(&key::KLV_FILL_KEY)?;

    let mut fill_size = position - file_pos - KEY_LEN as u64;
    let llen = file.get_llen(fill_size) as u64;
    fill_size -= llen;

    file.write_l(fill_size)?;
    file.write_zeros(fill_size)?;
    Ok(())
}

/// Writes a fill item exactly `size` bytes long (key, length, and padding
/// together).
pub fn allocate_space<T: Write + Seek>(file: &mut MxfFile<T>, size: u32) -> Result<()> {
    let minimum = file.get_min_llen() as u32 + KEY_LEN as u32;
    if size < minimum {
        return Err(PartitionError::AllocationTooSmall { requested: size, minimum });
    }

    file.write_k(&key::KLV_FILL_KEY)?;

    let mut fill_size = (size - KEY_LEN as u32) as u64;
    let llen = file.get_llen(fill_size) as u64;
    fill_size -= llen;

    file.write_l(fill_size)?;
    file.write_zeros(fill_size)?;
    Ok(())
}

/// Writes a fill item that reserves `size` extra bytes and rounds the
/// resulting position up to the next multiple of `partition.kag_size`,
/// measured relative to `partition.this_partition`.
///
/// A no-op when `size` is zero and the partition isn't KAG-aligned
/// (`kag_size == 1`).
pub fn allocate_space_to_kag<T: Write + Seek>(file: &mut MxfFile<T>, partition: &Partition, size: u32) -> Result<()> {
    if partition.kag_size == 0 {
        return Err(PartitionError::InvalidKagSize(partition.kag_size));
    }
    if size == 0 && partition.kag_size == 1 {
        return Ok(());
    }

    let file_pos = file.tell()?;
    if file_pos <= partition.this_partition {
        return Err(PartitionError::FillTargetUnreachable);
    }
    let relative_file_pos = file_pos + size as u64 - partition.this_partition;

    if size != 0 || relative_file_pos % partition.kag_size as u64 != 0 {
        file.write_k(&key::KLV_FILL_KEY)?;

        let mut fill_size: i64 = size as i64 - KEY_LEN as i64;
        if partition.kag_size > 1 {
            fill_size += partition.kag_size as i64 - (relative_file_pos % partition.kag_size as u64) as i64;
        }

        let llen_for = |file: &MxfFile<T>, fill_size: i64| {
            if fill_size >= 0 {
                file.get_llen(fill_size as u64) as i64
            } else {
                0
            }
        };

        let mut llen = llen_for(file, fill_size);
        while fill_size - llen < 0 {
            fill_size += partition.kag_size as i64;
            llen = llen_for(file, fill_size);
        }
        fill_size -= llen;

        file.write_l(fill_size as u64)?;
        file.write_zeros(fill_size as u64)?;
    }

    Ok(())
}

/// Pads to the next KAG boundary with no extra reserved space. Equivalent
/// to `allocate_space_to_kag(file, partition, 0)`.
pub fn fill_to_kag<T: Write + Seek>(file: &mut MxfFile<T>, partition: &Partition) -> Result<()> {
    allocate_space_to_kag(file, partition, 0)
}
