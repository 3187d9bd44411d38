use thiserror::Error;

/// Everything that can go wrong while reading or writing partition packs,
/// the random index pack, or KLV fill items.
#[derive(Debug, Error)]
pub enum PartitionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("key is not a partition pack")]
    NotAPartitionPack,

    #[error("key is not a header partition pack")]
    NotAHeaderPartitionPack,

    #[error("no footer partition pack found within the search window")]
    NoFooterFound,

    #[error("no random index pack present")]
    NoRandomIndexPack,

    #[error("malformed random index pack: {reason}")]
    MalformedRandomIndexPack { reason: &'static str },

    #[error("run-in exceeds the maximum of {max} bytes without a header partition pack")]
    RunInTooLong { max: u16 },

    #[error("batch header element size mismatch: expected {expected}, got {got}")]
    BadBatchElementSize { expected: u32, got: u32 },

    #[error("KAG size must be at least 1, got {0}")]
    InvalidKagSize(u32),

    #[error("mark_*_end called without a matching mark_*_start")]
    MarkNotStarted,

    #[error("fill target is behind the current position or too close to encode a valid fill item")]
    FillTargetUnreachable,

    #[error("allocate_space size {requested} is below the minimum of {minimum}")]
    AllocationTooSmall { requested: u32, minimum: u32 },
}

pub type Result<T> = std::result::Result<T, PartitionError>;
