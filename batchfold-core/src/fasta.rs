//! FASTA serialization of input sequences

use std::io::Write;

use bio::io::fasta;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// A named input sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub id: String,
    pub sequence: String,
}

impl SequenceRecord {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    /// Pairs parallel sequence and identifier lists by position
    pub fn pair(sequences: &[String], ids: &[String]) -> Result<Vec<SequenceRecord>> {
        if sequences.len() != ids.len() {
            return Err(CoreError::LengthMismatch {
                sequences: sequences.len(),
                ids: ids.len(),
            });
        }

        Ok(sequences
            .iter()
            .zip(ids)
            .map(|(seq, id)| SequenceRecord::new(id.clone(), seq.clone()))
            .collect())
    }
}

/// Writes records as FASTA
pub fn write_fasta<W: Write>(writer: W, records: &[SequenceRecord]) -> Result<()> {
    let mut writer = fasta::Writer::new(writer);
    for record in records {
        writer.write(&record.id, None, record.sequence.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}
