use thiserror::Error;

pub type MetadataResult<T> = Result<T, MetadataError>;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Downgrade Error: cannot convert metadata from version {from} to version {to}")]
    Downgrade { from: u32, to: u32 },

    #[error("Unresolved Type: {0}")]
    UnresolvedType(String),

    #[error("Schema Mismatch: upgrade step expected v{expected}, received v{found}")]
    SchemaMismatch { expected: u32, found: u32 },

    #[error("Unknown Metadata Version: {0}")]
    UnknownVersion(u32),

    #[error("Invalid Magic Number: expected {expected:#010x}, found {found:#010x}")]
    InvalidMagicNumber { expected: u32, found: u32 },

    #[error("Truncated Record: needed {needed} bytes, found {found}")]
    Truncated { needed: usize, found: usize },

    #[error("Bincode Encode Error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("Bincode Decode Error: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Hex Error: {0}")]
    Hex(#[from] hex::FromHexError),
}
