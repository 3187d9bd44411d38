//! Key classifier: pure predicates over the 16-byte SMPTE universal labels
//! that identify partition packs and KLV fill items.

pub use mxf_common::Key;

/// First 13 octets shared by every partition pack key (header, body,
/// footer, any open/closed/incomplete/complete combination).
const PARTITION_PACK_PREFIX_LEN: usize = 13;

/// A partition pack key with octet 13 (subtype) and octet 14 (status)
/// filled with placeholders; only the first 13 octets are compared.
pub(crate) const PARTITION_PACK_PREFIX: Key = Key::new([
    0x06, 0x0e, 0x2b, 0x34, 0x02, 0x05, 0x01, 0x01, 0x0d, 0x01, 0x02, 0x01, 0x01, 0x00, 0x00, 0x00,
]);

/// The Random Index Pack key.
pub const RANDOM_INDEX_PACK_KEY: Key = Key::new([
    0x06, 0x0e, 0x2b, 0x34, 0x02, 0x05, 0x01, 0x01, 0x0d, 0x01, 0x02, 0x01, 0x01, 0x11, 0x01, 0x00,
]);

/// The KLV Fill Item key, compared modulo the registry-version octet (7).
pub const KLV_FILL_KEY: Key = Key::new([
    0x06, 0x0e, 0x2b, 0x34, 0x01, 0x01, 0x01, 0x01, 0x03, 0x01, 0x02, 0x10, 0x01, 0x00, 0x00, 0x00,
]);

/// Builds a partition pack key for the given subtype and status octets.
pub const fn partition_pack_key(subtype: u8, status: u8) -> Key {
    let mut bytes = PARTITION_PACK_PREFIX.0;
    bytes[13] = subtype;
    bytes[14] = status;
    Key::new(bytes)
}

pub fn is_partition_pack(key: &Key) -> bool {
    key.eq_prefix(&PARTITION_PACK_PREFIX, PARTITION_PACK_PREFIX_LEN) && (0x02..=0x04).contains(&key.octet(13))
}

pub fn is_header_partition_pack(key: &Key) -> bool {
    key.eq_prefix(&PARTITION_PACK_PREFIX, PARTITION_PACK_PREFIX_LEN) && key.octet(13) == 0x02
}

pub fn is_body_partition_pack(key: &Key) -> bool {
    key.eq_prefix(&PARTITION_PACK_PREFIX, PARTITION_PACK_PREFIX_LEN) && key.octet(13) == 0x03
}

pub fn is_footer_partition_pack(key: &Key) -> bool {
    key.eq_prefix(&PARTITION_PACK_PREFIX, PARTITION_PACK_PREFIX_LEN) && key.octet(13) == 0x04
}

pub fn is_filler(key: &Key) -> bool {
    key.eq_mod_regver(&KLV_FILL_KEY)
}

pub fn is_closed(key: &Key) -> bool {
    is_partition_pack(key) && matches!(key.octet(14), 0x02 | 0x04)
}

pub fn is_complete(key: &Key) -> bool {
    is_partition_pack(key) && matches!(key.octet(14), 0x03 | 0x04)
}

pub fn is_closed_and_complete(key: &Key) -> bool {
    is_partition_pack(key) && key.octet(14) == 0x04
}
