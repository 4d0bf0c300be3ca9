//! # Integrity Digests
//!
//! SHA-256 digests of uploaded files, written `sha256:<64 hex digits>` in
//! text and in JSON alike. Parsing also accepts bare hex, in either case.
//!
//! Digests are taken over the exact bytes of the upload, before any
//! decoding or CSV parsing. Two uploads share a digest only if their bytes
//! are identical.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::PopiaError;

/// Length of a SHA-256 digest in bytes.
pub const SHA256_LEN: usize = 32;

/// Hash algorithm tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestAlgorithm {
    /// SHA-256, 32-byte output.
    Sha256,
}

impl DigestAlgorithm {
    /// Prefix used in the textual form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        prefix
            .eq_ignore_ascii_case(Self::Sha256.as_str())
            .then_some(Self::Sha256)
    }
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A digest value tagged with the algorithm that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentDigest {
    /// Algorithm that produced `bytes`.
    pub algorithm: DigestAlgorithm,
    /// Raw digest output.
    pub bytes: [u8; SHA256_LEN],
}

impl ContentDigest {
    /// Wrap raw digest bytes.
    pub fn new(algorithm: DigestAlgorithm, bytes: [u8; SHA256_LEN]) -> Self {
        Self { algorithm, bytes }
    }

    /// Lowercase hex of the digest bytes, without the algorithm prefix.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

impl FromStr for ContentDigest {
    type Err = PopiaError;

    /// Parse `sha256:<hex>` or bare `<hex>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PopiaError::InvalidDigest(s.to_string());
        let (algorithm, hex) = match s.trim().split_once(':') {
            Some((prefix, hex)) => {
                let algorithm = DigestAlgorithm::from_prefix(prefix).ok_or_else(invalid)?;
                (algorithm, hex)
            }
            None => (DigestAlgorithm::Sha256, s.trim()),
        };
        if hex.len() != SHA256_LEN * 2 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let mut bytes = [0u8; SHA256_LEN];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self::new(algorithm, bytes))
    }
}

impl TryFrom<String> for ContentDigest {
    type Error = PopiaError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ContentDigest> for String {
    fn from(digest: ContentDigest) -> Self {
        digest.to_string()
    }
}

/// SHA-256 of `data`.
pub fn sha256_digest(data: &[u8]) -> ContentDigest {
    let mut bytes = [0u8; SHA256_LEN];
    bytes.copy_from_slice(&Sha256::digest(data));
    ContentDigest::new(DigestAlgorithm::Sha256, bytes)
}

/// SHA-256 of `data` as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    sha256_digest(data).to_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    #[test]
    fn test_known_vectors() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(sha256_hex(b"abc"), ABC);
    }

    #[test]
    fn test_case_of_content_matters() {
        assert_ne!(sha256_digest(b"yes"), sha256_digest(b"Yes"));
    }

    #[test]
    fn test_display_has_prefix() {
        assert_eq!(sha256_digest(b"abc").to_string(), format!("sha256:{ABC}"));
    }

    #[test]
    fn test_parse_accepted_forms() {
        let expected = sha256_digest(b"abc");
        assert_eq!(ABC.parse::<ContentDigest>().unwrap(), expected);
        assert_eq!(format!("sha256:{ABC}").parse::<ContentDigest>().unwrap(), expected);
        assert_eq!(
            format!(" SHA256:{} ", ABC.to_uppercase())
                .parse::<ContentDigest>()
                .unwrap(),
            expected
        );
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            String::new(),
            "00".to_string(),
            format!("md5:{ABC}"),
            format!("sha256:{}", &ABC[..62]),
            format!("{}zz", &ABC[..62]),
            format!("+{}", &ABC[..63]),
            format!("{}\u{e9}", &ABC[..62]),
        ] {
            assert!(bad.parse::<ContentDigest>().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_json_is_prefixed_string() {
        let digest = sha256_digest(b"abc");
        let json = serde_json::to_value(&digest).unwrap();
        assert_eq!(json, format!("sha256:{ABC}"));
        let back: ContentDigest = serde_json::from_value(json).unwrap();
        assert_eq!(back, digest);
    }
}
