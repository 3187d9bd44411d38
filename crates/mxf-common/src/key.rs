use core::fmt;

/// A 16-octet SMPTE universal label.
///
/// Used both as a KLV key and, for operational patterns and essence
/// container identifiers, as a plain value embedded in a partition pack.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Key(pub [u8; 16]);

impl Key {
    pub const ZERO: Key = Key([0u8; 16]);

    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Octet at the given index (0-indexed), as used to read the
    /// partition-pack subtype (octet 13) and status (octet 14) bytes.
    pub const fn octet(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// True when `self` and `other` agree on the first `n` octets.
    pub fn eq_prefix(&self, other: &Key, n: usize) -> bool {
        self.0[..n] == other.0[..n]
    }

    /// True when `self` and `other` are equal ignoring octet 7, the UL
    /// registry-version byte. Used to recognise the KLV Fill key across
    /// registry versions.
    pub fn eq_mod_regver(&self, other: &Key) -> bool {
        self.0[..7] == other.0[..7] && self.0[8..] == other.0[8..]
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key(")?;
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{b:02x}")?;
        }
        write!(f, ")")
    }
}

impl From<[u8; 16]> for Key {
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}
