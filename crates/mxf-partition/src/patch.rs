//! The two-pass offset patcher: once every partition in a session has been
//! written once (so each `this_partition` is known), this fills in the
//! back-links — `previous_partition` and, when the file has a footer,
//! `footer_partition` — and rewrites every partition pack in place.

use std::io::{Seek, SeekFrom, Write};

use mxf_io::MxfFile;

use crate::codec::write_partition;
use crate::error::Result;
use crate::list::PartitionList;

/// Patches back-links across `partitions` and rewrites each partition
/// pack at its recorded `this_partition` offset. A no-op on an empty
/// list. Leaves the file positioned at its end.
///
/// Unlike a format that could patch just the back-link fields in place,
/// this re-serialises the whole fixed prefix of each partition pack: simpler
/// to get right, and partition packs are small enough that the extra I/O
/// doesn't matter.
pub fn update_partitions<T: Write + Seek>(file: &mut MxfFile<T>, partitions: &mut PartitionList) -> Result<()> {
    if partitions.is_empty() {
        return Ok(());
    }

    log::debug!("patching {} partition(s)", partitions.len());

    let last_this_partition = partitions.last().unwrap().this_partition;
    let have_footer = partitions.last().unwrap().is_footer();

    let mut previous_this_partition: Option<u64> = None;
    for partition in partitions.iter_mut() {
        if let Some(previous) = previous_this_partition {
            partition.previous_partition = previous;
        }
        if have_footer {
            partition.footer_partition = last_this_partition;
        }
        previous_this_partition = Some(partition.this_partition);
    }

    let run_in_len = file.run_in_len() as u64;
    for partition in partitions.iter_mut() {
        file.seek(SeekFrom::Start(partition.this_partition + run_in_len))?;
        write_partition(file, partition)?;
    }

    file.seek(SeekFrom::End(0))?;
    log::debug!(
        "finished patching, footer offset = {}",
        if have_footer { last_this_partition } else { 0 }
    );
    Ok(())
}
