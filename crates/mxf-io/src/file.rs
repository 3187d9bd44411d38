use std::io::{self, Read, Seek, SeekFrom, Write};

use mxf_common::Key;

use crate::ber::{self, ber_encoded_len};
use crate::KEY_LEN;

/// A seekable KLV byte stream.
///
/// Wraps any `Read + Write + Seek` backing store (a [`std::fs::File`] for
/// real files, a [`std::io::Cursor<Vec<u8>>`] for tests) and adds the
/// bookkeeping and typed primitives partition-pack and RIP code need: a
/// run-in length, big-endian integer I/O, KLV key/length helpers, and the
/// batch header used for essence-container label lists.
#[derive(Debug)]
pub struct MxfFile<T> {
    inner: T,
    run_in_len: u16,
    min_llen: u8,
}

impl<T> MxfFile<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            run_in_len: 0,
            min_llen: ber::MIN_BER_LLEN,
        }
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Length of the run-in preceding the first partition pack, recorded by
    /// header discovery (see `mxf-partition`'s discovery module).
    pub fn run_in_len(&self) -> u16 {
        self.run_in_len
    }

    pub fn set_run_in_len(&mut self, len: u16) {
        self.run_in_len = len;
    }

    /// Smallest `llen` this file's BER length encoder is willing to
    /// produce. Writers that want every length field padded to a fixed
    /// width (so it can be rewritten later without moving the file's
    /// tail) raise this; the default, 1, always uses the shortest valid
    /// encoding.
    pub fn get_min_llen(&self) -> u8 {
        self.min_llen
    }

    pub fn set_min_llen(&mut self, min_llen: u8) {
        self.min_llen = min_llen;
    }

    /// Number of bytes [`Self::write_l`] will write for `value`, honouring
    /// [`Self::get_min_llen`].
    pub fn get_llen(&self, value: u64) -> u8 {
        ber_encoded_len(value).max(self.min_llen)
    }
}

impl<T: Seek> MxfFile<T> {
    pub fn tell(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }

    pub fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }

    pub fn skip(&mut self, n: i64) -> io::Result<u64> {
        self.inner.seek(SeekFrom::Current(n))
    }
}

impl<T: Read> MxfFile<T> {
    /// Reads one byte, or `None` at end of file.
    pub fn getc(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.inner.read(&mut byte)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(buf)
    }

    pub fn read_u16_be(&mut self) -> io::Result<u16> {
        let mut buf = [0u8; 2];
        self.inner.read_exact(&mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    pub fn read_u32_be(&mut self) -> io::Result<u32> {
        let mut buf = [0u8; 4];
        self.inner.read_exact(&mut buf)?;
        Ok(u32::from_be_bytes(buf))
    }

    pub fn read_u64_be(&mut self) -> io::Result<u64> {
        let mut buf = [0u8; 8];
        self.inner.read_exact(&mut buf)?;
        Ok(u64::from_be_bytes(buf))
    }

    pub fn read_ul(&mut self) -> io::Result<Key> {
        let mut buf = [0u8; KEY_LEN];
        self.inner.read_exact(&mut buf)?;
        Ok(Key::new(buf))
    }

    /// Reads a KLV key. Alias of [`Self::read_ul`]: a key and a universal
    /// label share the same 16-byte encoding.
    pub fn read_k(&mut self) -> io::Result<Key> {
        self.read_ul()
    }

    /// Reads a BER-coded length, returning `(llen, value)`.
    pub fn read_l(&mut self) -> io::Result<(u8, u64)> {
        let mut first = [0u8; 1];
        self.inner.read_exact(&mut first)?;
        if first[0] & 0x80 == 0 {
            return Ok((1, first[0] as u64));
        }
        let n = (first[0] & 0x7f) as usize;
        if n == 0 || n > 8 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "BER long-form length-of-length out of range",
            ));
        }
        let mut buf = [0u8; 8];
        self.inner.read_exact(&mut buf[8 - n..])?;
        Ok((1 + n as u8, u64::from_be_bytes(buf)))
    }

    /// Reads a key followed by its BER length.
    pub fn read_kl(&mut self) -> io::Result<(Key, u8, u64)> {
        let key = self.read_k()?;
        let (llen, len) = self.read_l()?;
        Ok((key, llen, len))
    }

    /// Reads a batch header: `(count, element_size)`.
    pub fn read_batch_header(&mut self) -> io::Result<(u32, u32)> {
        let count = self.read_u32_be()?;
        let element_size = self.read_u32_be()?;
        Ok((count, element_size))
    }
}

impl<T: Write> MxfFile<T> {
    pub fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.inner.write_all(buf)
    }

    pub fn write_zeros(&mut self, n: u64) -> io::Result<()> {
        const CHUNK: [u8; 4096] = [0u8; 4096];
        let mut remaining = n;
        while remaining > 0 {
            let take = remaining.min(CHUNK.len() as u64) as usize;
            self.inner.write_all(&CHUNK[..take])?;
            remaining -= take as u64;
        }
        Ok(())
    }

    pub fn write_u16_be(&mut self, value: u16) -> io::Result<()> {
        self.inner.write_all(&value.to_be_bytes())
    }

    pub fn write_u32_be(&mut self, value: u32) -> io::Result<()> {
        self.inner.write_all(&value.to_be_bytes())
    }

    pub fn write_u64_be(&mut self, value: u64) -> io::Result<()> {
        self.inner.write_all(&value.to_be_bytes())
    }

    pub fn write_ul(&mut self, key: &Key) -> io::Result<()> {
        self.inner.write_all(key.as_bytes())
    }

    /// Writes a KLV key. Alias of [`Self::write_ul`].
    pub fn write_k(&mut self, key: &Key) -> io::Result<()> {
        self.write_ul(key)
    }

    /// Writes a BER-coded length, returning the `llen` used.
    pub fn write_l(&mut self, value: u64) -> io::Result<u8> {
        let mut buf = [0u8; 9];
        let natural = ber::encode(value, &mut buf);
        let llen = natural.max(self.min_llen);
        if llen == natural {
            self.inner.write_all(&buf[..natural as usize])?;
            return Ok(llen);
        }
        // Padded long form: re-encode with `llen - 1` length bytes.
        let n = llen - 1;
        let full = value.to_be_bytes();
        self.inner.write_all(&[0x80 | n])?;
        self.inner.write_all(&full[8 - n as usize..])?;
        Ok(llen)
    }

    pub fn write_kl(&mut self, key: &Key, len: u64) -> io::Result<u8> {
        self.write_k(key)?;
        self.write_l(len)
    }

    pub fn write_batch_header(&mut self, count: u32, element_size: u32) -> io::Result<()> {
        self.write_u32_be(count)?;
        self.write_u32_be(element_size)
    }
}
