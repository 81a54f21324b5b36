//! Job and object naming

use std::sync::LazyLock;

use chrono::{Local, NaiveDateTime};
use regex::Regex;

/// Anything the batch service rejects in a job name
static INVALID_NAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_-]").expect("valid regex"));

/// Timestamp token format, 15 characters
pub const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Creates a job name from the current local time and an optional suffix
pub fn create_job_name(suffix: Option<&str>) -> String {
    job_name_at(Local::now().naive_local(), suffix)
}

/// Creates a job name for a fixed time
pub fn job_name_at(time: NaiveDateTime, suffix: Option<&str>) -> String {
    let stamp = time.format(TIMESTAMP_FORMAT).to_string();
    match suffix {
        Some(suffix) => format!("{}_{}", stamp, sanitize(suffix)),
        None => stamp,
    }
}

/// Replaces every character outside letters, digits, `-` and `_` with `_`
pub fn sanitize(suffix: &str) -> String {
    INVALID_NAME_CHARS.replace_all(suffix, "_").into_owned()
}

/// Object key of the input FASTA for a job
pub fn fasta_object_key(job_name: &str) -> String {
    format!("{}/{}.fasta", job_name, job_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap()
    }

    #[test]
    fn test_name_without_suffix() {
        assert_eq!(job_name_at(fixed_time(), None), "20240305T070809");
    }

    #[test]
    fn test_name_with_suffix_is_sanitized() {
        assert_eq!(
            job_name_at(fixed_time(), Some("My Protein!")),
            "20240305T070809_My_Protein_"
        );
    }

    #[test]
    fn test_sanitize_keeps_allowed_characters() {
        assert_eq!(sanitize("abc-DEF_123"), "abc-DEF_123");
        let cleaned = sanitize("a/b.c:d é\t(x)");
        assert!(
            cleaned
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_eq!(cleaned.chars().count(), "a/b.c:d é\t(x)".chars().count());
    }

    #[test]
    fn test_current_name_has_timestamp_prefix() {
        let name = create_job_name(Some("x"));
        assert_eq!(name.len(), 17);
        assert_eq!(&name[8..9], "T");
        assert!(name[..8].chars().all(|c| c.is_ascii_digit()));
        assert!(name.ends_with("_x"));
    }

    #[test]
    fn test_fasta_object_key() {
        assert_eq!(fasta_object_key("job1"), "job1/job1.fasta");
    }
}
