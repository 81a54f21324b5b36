//! Configuration module
//!
//! Settings shared by every command: AWS selection, stack, bucket and the
//! local data directory.

use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};
use batchfold_client::AwsSettings;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub region: Option<String>,
    pub profile: Option<String>,
    /// Explicit stack name; discovered when unset
    pub stack_name: Option<String>,
    pub bucket: Option<String>,
    pub data_dir: PathBuf,
}

impl Config {
    /// Rejects values that would only fail later against the services
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("region", &self.region),
            ("profile", &self.profile),
            ("stack", &self.stack_name),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                bail!("--{} must not be empty", name);
            }
        }

        if self.data_dir.as_os_str().is_empty() {
            bail!("--data-dir must not be empty");
        }

        Ok(())
    }

    pub fn aws_settings(&self) -> AwsSettings {
        AwsSettings {
            region: self.region.clone(),
            profile: self.profile.clone(),
        }
    }

    pub fn stack_name(&self) -> Option<&str> {
        self.stack_name.as_deref()
    }

    /// The configured bucket, for commands that touch object storage
    pub fn require_bucket(&self) -> Result<&str> {
        let bucket = self
            .bucket
            .as_deref()
            .ok_or_else(|| anyhow!("No bucket configured. Pass --bucket or set BATCHFOLD_BUCKET"))?;
        validate_bucket_name(bucket)?;
        Ok(bucket)
    }
}

/// Bucket names are 3 to 255 characters of letters, digits, dots, hyphens and
/// underscores, starting and ending with a letter or digit. Uppercase and
/// underscores only occur in legacy names but are still accepted.
fn validate_bucket_name(bucket: &str) -> Result<()> {
    let valid_chars = bucket
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    let valid_ends = bucket
        .chars()
        .next()
        .zip(bucket.chars().last())
        .is_some_and(|(first, last)| first.is_ascii_alphanumeric() && last.is_ascii_alphanumeric());

    if !(3..=255).contains(&bucket.len()) || !valid_chars || !valid_ends {
        bail!("Invalid bucket name '{}'", bucket);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            region: Some("us-east-1".to_string()),
            profile: None,
            stack_name: None,
            bucket: Some("fold-results-1".to_string()),
            data_dir: PathBuf::from("data"),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_empty_values_rejected() {
        let mut c = config();
        c.stack_name = Some("  ".to_string());
        assert!(c.validate().is_err());

        let mut c = config();
        c.data_dir = PathBuf::new();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_bucket_checked_only_when_required() {
        let mut c = config();
        c.bucket = Some("not a bucket".to_string());
        assert!(c.validate().is_ok());
        assert!(c.require_bucket().is_err());
    }

    #[test]
    fn test_bucket_names() {
        let long = "a".repeat(256);
        for bad in ["ab", "fold results", "-fold", "fold.", "fold/key", long.as_str()] {
            let mut c = config();
            c.bucket = Some(bad.to_string());
            assert!(c.require_bucket().is_err(), "{bad} should be rejected");
        }
        for good in ["abc", "fold.results-2024", "0fold9", "Legacy_Bucket"] {
            let mut c = config();
            c.bucket = Some(good.to_string());
            assert_eq!(c.require_bucket().unwrap(), good);
        }
    }

    #[test]
    fn test_require_bucket() {
        let mut c = config();
        assert_eq!(c.require_bucket().unwrap(), "fold-results-1");
        c.bucket = None;
        assert!(c.require_bucket().is_err());
    }
}
