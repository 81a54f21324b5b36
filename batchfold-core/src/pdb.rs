//! PDB residue renumbering
//!
//! Predicted structures restart residue numbering per chain. For display the
//! residues are renumbered sequentially across the whole file and, when the
//! per-chain lengths are known, relabelled with consecutive chain letters.

use crate::error::{CoreError, Result};

/// Chain labels, uppercase then lowercase
pub const CHAIN_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Chain letter for a zero-based chain index
pub fn chain_letter(index: usize) -> Option<char> {
    CHAIN_ALPHABET.chars().nth(index)
}

/// Maps a zero-based residue index onto chains of the given lengths
struct ChainMap {
    /// Exclusive upper residue bound of each chain
    bounds: Vec<usize>,
}

impl ChainMap {
    fn new(lengths: &[usize]) -> Self {
        let bounds = lengths
            .iter()
            .scan(0usize, |total, &len| {
                *total = total.saturating_add(len);
                Some(*total)
            })
            .take(CHAIN_ALPHABET.len())
            .collect();
        Self { bounds }
    }

    fn total(&self) -> usize {
        self.bounds.last().copied().unwrap_or(0)
    }

    fn letter(&self, residue: usize) -> Option<char> {
        let chain = self.bounds.iter().position(|&end| residue < end)?;
        chain_letter(chain)
    }
}

/// Renumbers the ATOM records of a PDB file.
///
/// Only ATOM records are kept. A new residue starts whenever the residue
/// number (with insertion code) or the chain identifier differs from the
/// previous ATOM record; residues are numbered from 1. With `chain_lengths`,
/// residue `i` (zero-based) is relabelled with the chain whose cumulative
/// length range contains `i`.
pub fn renumber(pdb: &str, chain_lengths: Option<&[usize]>) -> Result<String> {
    let chains = chain_lengths.map(ChainMap::new);
    let mut out = String::with_capacity(pdb.len());
    let mut previous: Option<(&str, &str)> = None;
    let mut residue = 0usize;

    for (index, line) in pdb.split_inclusive('\n').enumerate() {
        if !line.starts_with("ATOM") {
            continue;
        }

        let malformed = || CoreError::MalformedAtomRecord { line: index + 1 };
        let chain = line.get(21..22).ok_or_else(malformed)?;
        let resnum = line.get(22..27).ok_or_else(malformed)?;
        let head = line.get(..21).ok_or_else(malformed)?;
        let tail = line.get(26..).ok_or_else(malformed)?;
        if resnum.get(..4).map(str::trim).and_then(|n| n.parse::<i32>().ok()).is_none() {
            return Err(malformed());
        }

        let key = (resnum, chain);
        if previous != Some(key) {
            previous = Some(key);
            residue += 1;
        }

        let chain = match &chains {
            Some(map) => map
                .letter(residue - 1)
                .ok_or(CoreError::ChainLengthsExhausted {
                    residue,
                    total: map.total(),
                })?
                .to_string(),
            None => chain.to_string(),
        };

        out.push_str(head);
        out.push_str(&chain);
        out.push_str(&format!("{:>4}", residue));
        out.push_str(tail);
    }

    Ok(out)
}
