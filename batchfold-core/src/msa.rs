//! Multiple sequence alignments
//!
//! Parsing of the Stockholm hit files written by the fold pipeline and the
//! numbers behind the two coverage plots.

use std::collections::HashSet;
use std::collections::hash_map::{Entry, HashMap};

use crate::error::{CoreError, Result};

/// Alignment hit files written per job, in plotting order
pub const ALIGNMENT_FILES: [&str; 3] = [
    "mgnify_hits.sto",
    "small_bfd_hits.sto",
    "uniref90_hits.sto",
];

/// Index table for coverage counting: `A`..`Z` then gap
pub const COVERAGE_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ-";

/// Index of the gap symbol in [`COVERAGE_ALPHABET`]
pub const COVERAGE_GAP: u8 = 26;

/// Residue order of the identity matrix; gap is index 20, unknown is 21
pub const MSA_INFO_ALPHABET: &str = "ARNDCQEGHILKMFPSTWYV";

/// Gap index in identity matrices
pub const MSA_INFO_GAP: u8 = 20;

/// Unknown residue index in identity matrices
pub const MSA_INFO_UNKNOWN: u8 = 21;

/// A parsed alignment: rows in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Alignment {
    pub rows: Vec<AlignedSequence>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedSequence {
    pub name: String,
    pub sequence: String,
}

impl Alignment {
    /// Parses a single Stockholm alignment.
    ///
    /// Markup lines (`#`) are skipped and parsing stops at `//`. Interleaved
    /// blocks are concatenated per sequence name, keeping first-seen order.
    pub fn parse_stockholm(text: &str) -> Result<Self> {
        let mut rows: Vec<AlignedSequence> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();

        for line in text.lines() {
            let line = line.trim_end();
            if line.starts_with("//") {
                break;
            }
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (Some(name), Some(chunk)) = (fields.next(), fields.next()) else {
                continue;
            };

            match by_name.entry(name.to_string()) {
                Entry::Occupied(entry) => rows[*entry.get()].sequence.push_str(chunk),
                Entry::Vacant(entry) => {
                    entry.insert(rows.len());
                    rows.push(AlignedSequence {
                        name: name.to_string(),
                        sequence: chunk.to_string(),
                    });
                }
            }
        }

        if rows.is_empty() {
            return Err(CoreError::EmptyAlignment);
        }
        Ok(Self { rows })
    }
}

/// Flattens alignments into distinct sequences, keeping first occurrences
pub fn dedupe_sequences<'a>(alignments: impl IntoIterator<Item = &'a Alignment>) -> Vec<String> {
    let mut seen = HashSet::new();
    alignments
        .into_iter()
        .flat_map(|a| a.rows.iter())
        .filter(|row| seen.insert(row.sequence.clone()))
        .map(|row| row.sequence.clone())
        .collect()
}

/// Maps a row through [`COVERAGE_ALPHABET`].
///
/// Insert-state lowercase letters count as residues and `.` counts as a gap.
pub fn encode_coverage(sequence: &str, row: usize) -> Result<Vec<u8>> {
    sequence
        .chars()
        .map(|c| {
            let c = if c == '.' { '-' } else { c.to_ascii_uppercase() };
            COVERAGE_ALPHABET
                .find(c)
                .map(|i| i as u8)
                .ok_or(CoreError::UnknownSymbol { symbol: c, row })
        })
        .collect()
}

/// Maps a row through [`MSA_INFO_ALPHABET`]
pub fn encode_msa_info(sequence: &str) -> Vec<u8> {
    sequence
        .chars()
        .map(|c| match c {
            '-' | '.' => MSA_INFO_GAP,
            c => MSA_INFO_ALPHABET
                .find(c.to_ascii_uppercase())
                .map(|i| i as u8)
                .unwrap_or(MSA_INFO_UNKNOWN),
        })
        .collect()
}

/// Per-position count of non-gap symbols.
///
/// Rows may differ in length; a short row contributes nothing past its end.
pub fn non_gap_counts(rows: &[Vec<u8>], gap: u8) -> Vec<usize> {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut counts = vec![0; width];
    for row in rows {
        for (count, &symbol) in counts.iter_mut().zip(row) {
            if symbol != gap {
                *count += 1;
            }
        }
    }
    counts
}

/// Y-axis ticks for the coverage plot: `0..=total` stepping `max(1, total / 3)`
pub fn coverage_ticks(total: usize) -> Vec<usize> {
    let step = (total / 3).max(1);
    (0..=total).step_by(step).collect()
}

/// Everything the coverage line chart needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageProfile {
    /// Number of distinct sequences
    pub total_sequences: usize,
    pub non_gap_counts: Vec<usize>,
    pub ticks: Vec<usize>,
}

impl CoverageProfile {
    pub fn from_alignments(alignments: &[Alignment]) -> Result<Self> {
        let sequences = dedupe_sequences(alignments);
        let rows = sequences
            .iter()
            .enumerate()
            .map(|(i, s)| encode_coverage(s, i))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            total_sequences: rows.len(),
            non_gap_counts: non_gap_counts(&rows, COVERAGE_GAP),
            ticks: coverage_ticks(rows.len()),
        })
    }
}

/// Rows of an identity heatmap, ordered by identity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct MsaInfo {
    /// Distinct rows, ascending by identity to the query
    pub rows: Vec<Vec<u8>>,
    /// Fractional identity of each row to the query, same order as `rows`
    pub identity: Vec<f64>,
    /// Per-position non-gap count over the distinct rows
    pub non_gap_counts: Vec<usize>,
    pub width: usize,
}

impl MsaInfo {
    /// Builds the heatmap data from an index matrix whose first row is the query.
    ///
    /// Identical rows are collapsed. Returns `None` when fewer than two
    /// distinct rows remain, since there is nothing to compare against.
    pub fn from_matrix(msa: &[Vec<u8>]) -> Option<Self> {
        let query = msa.first()?;
        let width = query.len();

        let distinct = distinct_rows(msa);
        if distinct.len() < 2 {
            return None;
        }

        let mut scored: Vec<(f64, Vec<u8>)> = distinct
            .into_iter()
            .map(|row| (identity(query, &row), row))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));

        let (identity, rows): (Vec<f64>, Vec<Vec<u8>>) = scored.into_iter().unzip();
        let non_gap_counts = non_gap_counts(&rows, MSA_INFO_GAP);

        Some(Self {
            rows,
            identity,
            non_gap_counts,
            width,
        })
    }

    /// Heatmap cell: row identity where the row has a residue, `None` at gaps
    pub fn cell(&self, row: usize, column: usize) -> Option<f64> {
        match self.rows.get(row)?.get(column) {
            Some(&symbol) if symbol != MSA_INFO_GAP => Some(self.identity[row]),
            _ => None,
        }
    }
}

/// Distinct rows of an index matrix, each padded with gaps or truncated to
/// the width of the first row, in sorted order
pub fn distinct_rows(msa: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let width = msa.first().map_or(0, Vec::len);
    let mut distinct: Vec<Vec<u8>> = msa
        .iter()
        .map(|row| {
            let mut row = row.clone();
            row.resize(width, MSA_INFO_GAP);
            row
        })
        .collect();
    distinct.sort();
    distinct.dedup();
    distinct
}

/// Fraction of positions where `row` equals `query`
fn identity(query: &[u8], row: &[u8]) -> f64 {
    if query.is_empty() {
        return 0.0;
    }
    let same = query.iter().zip(row).filter(|(a, b)| a == b).count();
    same as f64 / query.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOCKHOLM: &str = "# STOCKHOLM 1.0\n\
#=GF ID query\n\
\n\
query      MKV-LA\n\
hit/1-4    MKVQ..\n\
#=GR hit/1-4 PP 88**..\n\
\n\
query      GG\n\
hit/1-4    -g\n\
//\n\
ignored    XXXX\n";

    #[test]
    fn test_parse_stockholm_concatenates_blocks() {
        let alignment = Alignment::parse_stockholm(STOCKHOLM).unwrap();
        assert_eq!(alignment.rows.len(), 2);
        assert_eq!(alignment.rows[0].name, "query");
        assert_eq!(alignment.rows[0].sequence, "MKV-LAGG");
        assert_eq!(alignment.rows[1].sequence, "MKVQ..-g");
    }

    #[test]
    fn test_parse_stockholm_rejects_empty() {
        let err = Alignment::parse_stockholm("# STOCKHOLM 1.0\n//\n").unwrap_err();
        assert!(matches!(err, CoreError::EmptyAlignment));
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence_order() {
        let a = Alignment::parse_stockholm("q AAA\nx CCC\n").unwrap();
        let b = Alignment::parse_stockholm("q AAA\ny DDD\nz CCC\n").unwrap();
        assert_eq!(dedupe_sequences([&a, &b]), vec!["AAA", "CCC", "DDD"]);
    }

    #[test]
    fn test_encode_coverage() {
        assert_eq!(encode_coverage("AZ-", 0).unwrap(), vec![0, 25, 26]);
        assert_eq!(encode_coverage("a.", 0).unwrap(), vec![0, 26]);
        let err = encode_coverage("A*", 3).unwrap_err();
        assert!(matches!(err, CoreError::UnknownSymbol { symbol: '*', row: 3 }));
    }

    #[test]
    fn test_coverage_profile() {
        let a = Alignment::parse_stockholm("q MK-V\nh1 M--V\n").unwrap();
        let b = Alignment::parse_stockholm("q MK-V\nh2 -K-V\n").unwrap();
        let profile = CoverageProfile::from_alignments(&[a, b]).unwrap();

        assert_eq!(profile.total_sequences, 3);
        assert_eq!(profile.non_gap_counts, vec![2, 2, 0, 3]);
        assert_eq!(profile.ticks, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_coverage_ticks() {
        assert_eq!(coverage_ticks(0), vec![0]);
        assert_eq!(coverage_ticks(2), vec![0, 1, 2]);
        assert_eq!(coverage_ticks(100), vec![0, 33, 66, 99]);
    }

    #[test]
    fn test_non_gap_counts_with_ragged_rows() {
        let rows = vec![vec![0, 26, 1], vec![2]];
        assert_eq!(non_gap_counts(&rows, 26), vec![2, 0, 1]);
    }

    #[test]
    fn test_msa_info_sorts_by_identity() {
        let query = encode_msa_info("ARND");
        let msa = vec![
            query.clone(),
            encode_msa_info("AR--"),
            encode_msa_info("ARND"),
            encode_msa_info("A---"),
        ];

        let info = MsaInfo::from_matrix(&msa).unwrap();
        assert_eq!(info.rows.len(), 3);
        assert_eq!(info.identity, vec![0.25, 0.5, 1.0]);
        assert_eq!(info.rows[2], query);
        assert_eq!(info.non_gap_counts, vec![3, 2, 1, 1]);
        assert_eq!(info.cell(0, 0), Some(0.25));
        assert_eq!(info.cell(0, 1), None);
        assert_eq!(info.width, 4);
    }

    #[test]
    fn test_msa_info_needs_two_distinct_rows() {
        let row = encode_msa_info("ARN");
        assert!(MsaInfo::from_matrix(&[row.clone(), row]).is_none());
        assert!(MsaInfo::from_matrix(&[]).is_none());
    }

    #[test]
    fn test_distinct_rows_pads_to_query_width() {
        let rows = distinct_rows(&[
            encode_msa_info("ARN"),
            encode_msa_info("AR"),
            encode_msa_info("AR-"),
            encode_msa_info("ARNDC"),
        ]);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == 3));
        assert!(distinct_rows(&[]).is_empty());
    }

    #[test]
    fn test_encode_msa_info() {
        assert_eq!(encode_msa_info("AV-.X"), vec![0, 19, 20, 20, 21]);
    }
}
