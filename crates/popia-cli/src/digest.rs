//! # `popia digest`
//!
//! Computes the local integrity receipt of a file: its SHA-256 digest, size
//! and the time it was computed. With `--expect` the digest is compared
//! against a known value and a mismatch exits with code 2.
//!
//! The receipt only states that this exact file produced this exact digest
//! on this machine. Nothing is sent anywhere.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use popia_core::{ContentDigest, IntegrityReceipt};

use crate::config::CliConfig;
use crate::EXIT_CHECK_FAILED;

/// Arguments for `popia digest`.
#[derive(Args, Debug)]
pub struct DigestArgs {
    /// File to digest.
    pub file: PathBuf,

    /// Expected digest, as hex or `sha256:hex`.
    #[arg(long)]
    pub expect: Option<String>,

    /// Print the receipt as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute `popia digest`.
pub fn run_digest(args: &DigestArgs, _config: &CliConfig) -> Result<u8> {
    let content = std::fs::read(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let file_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    let receipt = IntegrityReceipt::compute(file_name, &content);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    } else {
        println!("  file:      {}", args.file.display());
        println!("  digest:    {}", receipt.digest);
        println!("  size:      {} bytes", receipt.size_bytes);
        println!("  timestamp: {}", receipt.computed_at);
        println!("  status:    {}", receipt.status);
    }

    match &args.expect {
        Some(expected) if !digest_matches(&receipt, expected) => {
            tracing::warn!(
                expected = %expected,
                actual = %receipt.digest,
                "digest mismatch"
            );
            println!("MISMATCH: expected {expected}");
            Ok(EXIT_CHECK_FAILED)
        }
        Some(_) => {
            println!("OK: digest matches");
            Ok(0)
        }
        None => Ok(0),
    }
}

/// Whether `expected` (bare hex or `sha256:hex`, any case) names the
/// receipt's digest. Unparseable input never matches.
pub fn digest_matches(receipt: &IntegrityReceipt, expected: &str) -> bool {
    expected
        .parse::<ContentDigest>()
        .is_ok_and(|digest| digest == receipt.digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn test_digest_matches_forms() {
        let receipt = IntegrityReceipt::compute(None, b"abc");
        assert!(digest_matches(&receipt, ABC_SHA256));
        assert!(digest_matches(&receipt, &format!("sha256:{ABC_SHA256}")));
        assert!(digest_matches(&receipt, &ABC_SHA256.to_uppercase()));
        assert!(!digest_matches(&receipt, &format!("md5:{ABC_SHA256}")));
        assert!(!digest_matches(&receipt, "00"));
    }

    #[test]
    fn test_run_digest_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("abc.txt");
        std::fs::write(&file, "abc").unwrap();
        let config = CliConfig::default();

        let ok = DigestArgs {
            file: file.clone(),
            expect: Some(ABC_SHA256.into()),
            json: false,
        };
        assert_eq!(run_digest(&ok, &config).unwrap(), 0);

        let bad = DigestArgs {
            file,
            expect: Some("sha256:00".into()),
            json: true,
        };
        assert_eq!(run_digest(&bad, &config).unwrap(), EXIT_CHECK_FAILED);
    }

    #[test]
    fn test_missing_file_errors() {
        let args = DigestArgs {
            file: PathBuf::from("/nonexistent/file"),
            expect: None,
            json: false,
        };
        assert!(run_digest(&args, &CliConfig::default()).is_err());
    }
}
