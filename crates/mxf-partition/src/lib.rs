//! Partition pack, random index pack, and KLV alignment subsystem for MXF
//! (SMPTE 377) files.
//!
//! This crate owns the on-disk framing of an MXF file: recognising and
//! (de)serialising partition packs (header/body/footer, open/closed,
//! incomplete/complete), patching their back-links once a file's layout is
//! final, padding to KLV Alignment Grid boundaries, locating the header and
//! footer packs, and reading/writing the Random Index Pack trailer.
//!
//! Out of scope: the generic metadata set/dictionary subsystem, index
//! tables, and essence codec handling — this crate provides only the
//! framing those subsystems are carried inside.

pub mod codec;
pub mod config;
pub mod discovery;
pub mod error;
pub mod fill;
pub mod key;
pub mod list;
pub mod partition;
pub mod patch;
pub mod rip;

pub use codec::{read_partition, write_partition};
pub use config::PartitionConfig;
pub use error::{PartitionError, Result};
pub use fill::{allocate_space, allocate_space_to_kag, fill_to_kag, fill_to_position};
pub use key::{
    is_body_partition_pack, is_closed, is_closed_and_complete, is_complete, is_filler, is_footer_partition_pack,
    is_header_partition_pack, is_partition_pack, partition_pack_key, KLV_FILL_KEY, RANDOM_INDEX_PACK_KEY,
};
pub use list::PartitionList;
pub use partition::Partition;
pub use patch::update_partitions;
pub use rip::{read_rip, read_rip_and_size, write_rip, RandomIndexPack, RipEntry};

pub use mxf_common::Key;
pub use mxf_io::{MxfFile, KEY_LEN, MAX_RUNIN_LEN};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, SeekFrom};

    fn memory_file() -> MxfFile<Cursor<Vec<u8>>> {
        MxfFile::new(Cursor::new(Vec::new()))
    }

    /// End-to-end: write a header and footer pack, patch back-links, write
    /// a RIP, then read everything back via discovery and the RIP codec.
    #[test]
    fn minimal_closed_complete_file_round_trips() {
        let mut file = memory_file();
        let mut partitions = PartitionList::new();

        let mut header = Partition::new();
        header.key = partition_pack_key(0x02, 0x04);
        write_partition(&mut file, &mut header).unwrap();
        partitions.append(header);

        let mut footer = Partition::new();
        footer.key = partition_pack_key(0x04, 0x04);
        write_partition(&mut file, &mut footer).unwrap();
        partitions.append(footer);

        update_partitions(&mut file, &mut partitions).unwrap();
        write_rip(&mut file, &partitions).unwrap();

        let config = PartitionConfig::default();
        file.seek(SeekFrom::Start(0)).unwrap();
        let (header_key, _llen, _len) = discovery::read_header_pack_kl_with_runin(&mut file, &config).unwrap();
        assert!(is_header_partition_pack(&header_key));
        assert_eq!(file.run_in_len(), 0);

        let (rip, _size) = read_rip_and_size(&mut file).unwrap();
        assert_eq!(rip.entries.len(), 2);
        assert_eq!(rip.entries[0].this_partition, partitions.iter().next().unwrap().this_partition);
        assert_eq!(rip.entries[1].this_partition, partitions.last().unwrap().this_partition);

        let footer_this_partition = partitions.last().unwrap().this_partition;
        for partition in partitions.iter() {
            assert_eq!(partition.footer_partition, footer_this_partition);
        }
    }

    /// A body partition's essence data is KAG-aligned before the next
    /// partition pack is written, and the codec round-trips through it.
    #[test]
    fn body_partition_is_kag_aligned_before_the_next_pack() {
        let mut file = memory_file();
        let mut partitions = PartitionList::new();

        let mut header = Partition::new();
        header.key = partition_pack_key(0x02, 0x04);
        header.kag_size = 16;
        write_partition(&mut file, &mut header).unwrap();
        let header_this_partition = header.this_partition;
        partitions.append(header);

        file.write_zeros(5).unwrap();
        fill_to_kag(&mut file, partitions.iter().next().unwrap()).unwrap();
        let aligned_pos = file.tell().unwrap();
        assert_eq!((aligned_pos - header_this_partition) % 16, 0);

        let mut footer = Partition::new();
        footer.key = partition_pack_key(0x04, 0x04);
        write_partition(&mut file, &mut footer).unwrap();
        partitions.append(footer);

        update_partitions(&mut file, &mut partitions).unwrap();
        assert_eq!(file.tell().unwrap(), file.seek(SeekFrom::End(0)).unwrap());
    }

    /// An arbitrary run-in before the header pack is transparently skipped,
    /// and `thisPartition` is reported relative to the first pack, not the
    /// start of the file.
    #[test]
    fn run_in_is_skipped_and_accounted_for() {
        let mut file = memory_file();
        file.write_zeros(41).unwrap();

        let mut header = Partition::new();
        header.key = partition_pack_key(0x02, 0x04);
        // write_partition doesn't know about a run-in set after the fact on
        // a fresh writer, so seed it the same way discovery would.
        file.set_run_in_len(41);
        write_partition(&mut file, &mut header).unwrap();
        assert_eq!(header.this_partition, 0);

        file.set_run_in_len(0);
        file.seek(SeekFrom::Start(0)).unwrap();
        let config = PartitionConfig::default();
        let (key, _llen, _len) = discovery::read_header_pack_kl_with_runin(&mut file, &config).unwrap();
        assert!(is_header_partition_pack(&key));
        assert_eq!(file.run_in_len(), 41);
    }

    /// Writing a RIP then reading it back yields the same entries, even
    /// with zero partitions.
    #[test]
    fn rip_round_trips_through_write_and_read() {
        let mut file = memory_file();
        let mut partitions = PartitionList::new();
        for (subtype, sid) in [(0x02u8, 0u32), (0x03, 1), (0x04, 2)] {
            let mut p = Partition::new();
            p.key = partition_pack_key(subtype, 0x04);
            p.body_sid = sid;
            write_partition(&mut file, &mut p).unwrap();
            partitions.append(p);
        }

        write_rip(&mut file, &partitions).unwrap();
        let (rip, _size) = read_rip_and_size(&mut file).unwrap();
        assert_eq!(rip.entries.len(), 3);
        for (entry, partition) in rip.entries.iter().zip(partitions.iter()) {
            assert_eq!(entry.body_sid, partition.body_sid);
            assert_eq!(entry.this_partition, partition.this_partition);
        }
    }

    /// The patcher is monotonic: running it twice over the same list
    /// produces identical back-links the second time.
    #[test]
    fn patcher_is_idempotent() {
        let mut file = memory_file();
        let mut partitions = PartitionList::new();
        for subtype in [0x02u8, 0x03, 0x04] {
            let mut p = Partition::new();
            p.key = partition_pack_key(subtype, 0x04);
            write_partition(&mut file, &mut p).unwrap();
            partitions.append(p);
        }

        update_partitions(&mut file, &mut partitions).unwrap();
        let first_pass: Vec<(u64, u64)> = partitions.iter().map(|p| (p.previous_partition, p.footer_partition)).collect();

        update_partitions(&mut file, &mut partitions).unwrap();
        let second_pass: Vec<(u64, u64)> = partitions.iter().map(|p| (p.previous_partition, p.footer_partition)).collect();

        assert_eq!(first_pass, second_pass);
    }

    /// A RIP with a corrupted entry-table length is reported as malformed,
    /// distinct from the "no RIP present" case.
    #[test]
    fn malformed_rip_is_distinguished_from_absent_rip() {
        let mut file = memory_file();
        write_all_zeros_footer(&mut file);
        let absent = read_rip_and_size(&mut file).unwrap_err();
        assert!(matches!(absent, PartitionError::NoRandomIndexPack));
    }

    fn write_all_zeros_footer(file: &mut MxfFile<Cursor<Vec<u8>>>) {
        file.write_zeros(16).unwrap();
    }
}
