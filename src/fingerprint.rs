//! Fingerprint computation over payload bytes.
//!
//! The service addresses and verifies payloads by the hex MD5 digest of the
//! exact byte sequence transmitted. Both entry points here fold bytes into a
//! single running digest context: [`Fingerprint::from_bytes`] for payloads
//! already in memory, and [`from_reader`]/[`from_file`] for payloads that
//! arrive incrementally.
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use digest::Digest;
use md5::Md5;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::errors::{IoErrorExt, Result};

const BUF_SIZE: usize = 16 * 1024;

/// Hex-encoded MD5 digest of a payload's bytes. Identical payloads always
/// carry identical fingerprints, so the service also uses them as default
/// names for deduplication.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprints an in-memory byte sequence.
    ///
    /// ## Example
    /// ```
    /// let fp = limelock::Fingerprint::from_bytes(b"abc");
    /// assert_eq!(fp.as_str(), "900150983cd24fb0d6963f7d28e17f72");
    /// ```
    pub fn from_bytes(data: impl AsRef<[u8]>) -> Fingerprint {
        let mut hasher = Hasher::new();
        hasher.update(data.as_ref());
        hasher.finish()
    }

    /// The digest as its lowercase hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        // MD5 digests are exactly 16 bytes.
        if s.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        hex::decode(s)?;
        Ok(Fingerprint(s.to_ascii_lowercase()))
    }
}

/// Incremental fingerprint context. Feed chunks in arrival order with
/// [`Hasher::update`], then finalize once with [`Hasher::finish`].
pub struct Hasher {
    inner: Md5,
}

impl Hasher {
    /// Creates a fresh digest context.
    pub fn new() -> Hasher {
        Hasher { inner: Md5::new() }
    }

    /// Folds a chunk into the running digest.
    pub fn update(&mut self, chunk: impl AsRef<[u8]>) {
        self.inner.update(chunk.as_ref());
    }

    /// Finalizes the digest, consuming the context.
    pub fn finish(self) -> Fingerprint {
        Fingerprint(hex::encode(self.inner.finalize()))
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Fingerprints a byte stream, folding chunks into one running digest as
/// they arrive. A read error aborts the computation and discards the
/// partial digest.
pub async fn from_reader<R: AsyncRead + Unpin>(mut reader: R) -> Result<Fingerprint> {
    let mut hasher = Hasher::new();
    let mut buf = [0u8; BUF_SIZE];
    loop {
        let read = reader
            .read(&mut buf)
            .await
            .with_context(|| String::from("Failed to read payload chunk while fingerprinting"))?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(hasher.finish())
}

/// Fingerprints a file's contents without loading the file wholly into
/// memory.
pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Fingerprint> {
    let path = path.as_ref();
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open {} for fingerprinting", path.display()))?;
    from_reader(file).await
}
