//! Error types for core validation and parsing

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised while validating inputs or parsing output files
#[derive(Debug, Error)]
pub enum CoreError {
    /// Parallel sequence and identifier lists differ in length
    #[error("got {sequences} sequence(s) but {ids} identifier(s)")]
    LengthMismatch { sequences: usize, ids: usize },

    /// A stack does not declare one of the expected batch resources
    #[error("stack resource '{0}' not found")]
    MissingResource(String),

    /// An alignment row contains a symbol outside the index table
    #[error("unknown alignment symbol '{symbol}' in sequence {row}")]
    UnknownSymbol { symbol: char, row: usize },

    /// An ATOM record is too short or has a non-numeric residue number
    #[error("malformed ATOM record on line {line}")]
    MalformedAtomRecord { line: usize },

    /// More residues than the supplied per-chain lengths account for
    #[error("residue {residue} lies beyond the supplied chain lengths (total {total})")]
    ChainLengthsExhausted { residue: usize, total: usize },

    /// An alignment file had no sequences
    #[error("alignment contains no sequences")]
    EmptyAlignment,

    /// Writing serialized output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
