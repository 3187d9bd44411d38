//! Locating a file's header and footer partition packs: the header by
//! scanning past an optional run-in, the footer by reading backward from
//! the end of the file.

use std::io::{Read, Seek, SeekFrom};

use mxf_common::Key;
use mxf_io::{MxfFile, KEY_LEN};

use crate::config::PartitionConfig;
use crate::error::{PartitionError, Result};
use crate::key;

/// Number of leading prefix octets the run-in scanner matches
/// byte-by-byte before reading the rest of the key outright. Matches
/// `mxf_read_header_pp_kl_with_runin`, which only verifies 11 of the 13
/// common prefix octets during the scan and leaves octets 11-15 to the
/// `is_header_partition_pack` check that follows.
const SCAN_PREFIX_LEN: usize = 11;

/// Scans forward from the current position for a header partition pack,
/// tolerating up to `config.max_runin_len` bytes of arbitrary run-in data
/// first. On success the file's run-in length is recorded via
/// [`MxfFile::set_run_in_len`] and the stream is left positioned at the
/// start of the partition pack's value (key and length already consumed).
///
/// Returns the header pack's key, BER length-of-length, and value length.
pub fn read_header_pack_kl_with_runin<T: Read>(
    file: &mut MxfFile<T>,
    config: &PartitionConfig,
) -> Result<(Key, u8, u64)> {
    let prefix = key::PARTITION_PACK_PREFIX.as_bytes();

    let mut key_bytes = [0u8; KEY_LEN];
    let mut matched = 0usize;
    let mut runin_check_count: u32 = 0;
    let scan_limit = config.max_runin_len as u32 + SCAN_PREFIX_LEN as u32;

    loop {
        if runin_check_count >= scan_limit {
            log::warn!("run-in scan exhausted its {}-byte budget without finding a header partition pack", config.max_runin_len);
            return Err(PartitionError::RunInTooLong { max: config.max_runin_len });
        }
        let byte = match file.getc()? {
            Some(b) => b,
            None => return Err(PartitionError::NotAHeaderPartitionPack),
        };
        runin_check_count += 1;

        if byte == prefix[matched] {
            key_bytes[matched] = byte;
            matched += 1;
            if matched == SCAN_PREFIX_LEN {
                break;
            }
        } else {
            if runin_check_count >= config.max_runin_len as u32 {
                log::warn!("run-in scan exhausted its {}-byte budget without finding a header partition pack", config.max_runin_len);
                return Err(PartitionError::RunInTooLong { max: config.max_runin_len });
            }
            matched = 0;
        }
    }

    for slot in key_bytes.iter_mut().skip(SCAN_PREFIX_LEN) {
        *slot = match file.getc()? {
            Some(b) => b,
            None => return Err(PartitionError::NotAHeaderPartitionPack),
        };
    }

    let found_key = Key::new(key_bytes);
    if !key::is_header_partition_pack(&found_key) {
        return Err(PartitionError::NotAHeaderPartitionPack);
    }

    let (llen, len) = file.read_l()?;

    let run_in_len = runin_check_count - SCAN_PREFIX_LEN as u32;
    file.set_run_in_len(run_in_len as u16);

    log::debug!("found header partition pack after a {run_in_len}-byte run-in");
    Ok((found_key, llen, len))
}

/// Searches backward from the end of the file for the footer partition
/// pack's key, reading in windows of `config.footer_scan_window` bytes
/// and stopping as soon as the search buffer also contains a header or
/// body partition pack key (the footer, if present at all, must be the
/// partition pack closest to the end of that buffer).
///
/// Leaves the file positioned at the start of the footer key on success.
pub fn find_footer_partition<T: Read + Seek>(file: &mut MxfFile<T>, config: &PartitionConfig) -> Result<()> {
    let prefix = key::PARTITION_PACK_PREFIX.as_bytes();
    let overlap = SCAN_PREFIX_LEN + 2;
    let window = config.footer_scan_window as usize;
    let buffer_len = window + overlap;
    let mut buffer = vec![0u8; buffer_len];

    let mut offset = file.seek(SeekFrom::End(0))? as i64;

    for iteration in 0..config.footer_scan_max_iterations {
        if offset < 17 {
            break;
        }

        let mut num_read = window;
        if num_read as i64 > offset {
            num_read = offset as usize;
        }

        if iteration > 0 {
            // preserve the previous window's leading bytes as this window's
            // trailing lookahead, before they get overwritten below
            let (head, tail) = buffer.split_at_mut(num_read);
            tail[..overlap].copy_from_slice(&head[..overlap]);
        }

        file.seek(SeekFrom::Start((offset - num_read as i64) as u64))?;
        file.read_exact(&mut buffer[..num_read])?;

        let mut found_other_partition_pack = false;
        for j in 0..num_read {
            if j + 13 >= buffer.len() {
                break;
            }
            if buffer[j] == prefix[0] && buffer[j + 1] == prefix[1] && buffer[j + 2..j + 13] == prefix[2..13] {
                match buffer[j + 13] {
                    0x04 => {
                        file.seek(SeekFrom::Start((offset - num_read as i64 + j as i64) as u64))?;
                        return Ok(());
                    }
                    0x02 | 0x03 => found_other_partition_pack = true,
                    _ => {}
                }
            }
        }

        if found_other_partition_pack {
            break;
        }
        offset -= num_read as i64;
    }

    log::warn!("footer scan found no 0x04 partition pack within the search budget");
    Err(PartitionError::NoFooterFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::partition_pack_key;
    use mxf_io::MxfFile;
    use std::io::Cursor;

    fn memory_file() -> MxfFile<Cursor<Vec<u8>>> {
        MxfFile::new(Cursor::new(Vec::new()))
    }

    fn header_pack_bytes() -> Vec<u8> {
        let key = partition_pack_key(0x02, 0x04);
        let mut bytes = key.as_bytes().to_vec();
        bytes.push(4); // short-form BER length of 4
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes
    }

    #[test]
    fn header_scan_finds_the_key_immediately_with_no_runin() {
        let mut file = memory_file();
        file.write_all(&header_pack_bytes()).unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();

        let config = PartitionConfig::default();
        let (key, _llen, len) = read_header_pack_kl_with_runin(&mut file, &config).unwrap();
        assert!(key::is_header_partition_pack(&key));
        assert_eq!(len, 4);
        assert_eq!(file.run_in_len(), 0);
    }

    #[test]
    fn header_scan_skips_an_arbitrary_runin() {
        let mut file = memory_file();
        file.write_all(&[0xde; 23]).unwrap();
        file.write_all(&header_pack_bytes()).unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();

        let config = PartitionConfig::default();
        read_header_pack_kl_with_runin(&mut file, &config).unwrap();
        assert_eq!(file.run_in_len(), 23);
    }

    #[test]
    fn header_scan_fails_without_ever_finding_a_header_key() {
        let mut file = memory_file();
        file.write_all(&[0xaa; 64]).unwrap();
        file.seek(SeekFrom::Start(0)).unwrap();

        let config = PartitionConfig::new().with_max_runin_len(32);
        let err = read_header_pack_kl_with_runin(&mut file, &config).unwrap_err();
        assert!(matches!(err, PartitionError::RunInTooLong { .. }) || matches!(err, PartitionError::NotAHeaderPartitionPack));
    }

    #[test]
    fn footer_scan_finds_a_footer_pack_near_the_end() {
        let mut file = memory_file();
        file.write_all(&header_pack_bytes()).unwrap();
        let footer_key = partition_pack_key(0x04, 0x04);
        let footer_start = file.tell().unwrap();
        file.write_all(footer_key.as_bytes()).unwrap();
        file.write_all(&[4]).unwrap();
        file.write_all(&[0, 0, 0, 0]).unwrap();

        let config = PartitionConfig::default();
        find_footer_partition(&mut file, &config).unwrap();
        assert_eq!(file.tell().unwrap(), footer_start);
    }

    #[test]
    fn footer_scan_fails_when_there_is_no_footer() {
        let mut file = memory_file();
        file.write_all(&header_pack_bytes()).unwrap();

        let config = PartitionConfig::default();
        let err = find_footer_partition(&mut file, &config).unwrap_err();
        assert!(matches!(err, PartitionError::NoFooterFound));
    }
}
