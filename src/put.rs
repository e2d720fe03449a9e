//! Functions for storing payloads with the service.
//!
//! Every store transmits a payload string together with its fingerprint;
//! the fingerprint is always computed over the exact representation that
//! goes on the wire. [`data`] sends a string verbatim, while [`bytes`] and
//! [`file`] hex-encode their input first and fingerprint the encoded form.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::errors::{Error, IoErrorExt, Result};
use crate::fingerprint::Fingerprint;

/// Record the service reports back for a stored payload. Returned verbatim;
/// the client never fabricates or alters it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    /// Opaque transaction identifier. Hand it to [`crate::get`] to fetch the
    /// payload back later.
    pub tx_id: String,
    /// Fingerprint the payload was recorded under, if reported.
    #[serde(default)]
    pub hash: Option<Fingerprint>,
    /// Name the payload was recorded under, if reported.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PutRequest<'a> {
    auth_token: String,
    data: &'a str,
    name: &'a str,
    hash: &'a Fingerprint,
}

/// Stores a payload string with the service, naming it after its own
/// fingerprint.
///
/// ## Example
/// ```no_run
/// #[tokio::main]
/// async fn main() -> limelock::Result<()> {
///     let client = limelock::Client::options().token("tok").build()?;
///     let record = limelock::put::data(&client, "hello").await?;
///     println!("stored as {}", record.tx_id);
///     Ok(())
/// }
/// ```
pub async fn data<D: AsRef<str>>(client: &Client, data: D) -> Result<StoredRecord> {
    PutOpts::new().data(client, data).await
}

/// Stores a byte payload with the service. The bytes are hex-encoded for
/// transmission and the fingerprint is computed over the encoded form.
pub async fn bytes<D: AsRef<[u8]>>(client: &Client, data: D) -> Result<StoredRecord> {
    PutOpts::new().bytes(client, data).await
}

/// Reads a local file and stores its contents, hex-encoded. The record is
/// named after the payload's fingerprint unless [`PutOpts::name`] says
/// otherwise.
pub async fn file<P: AsRef<Path>>(client: &Client, path: P) -> Result<StoredRecord> {
    PutOpts::new().file(client, path).await
}

/// Options and flags for controlling how a payload is stored.
#[derive(Clone, Default)]
pub struct PutOpts {
    name: Option<String>,
    fingerprint: Option<Fingerprint>,
}

impl PutOpts {
    /// Creates blank options.
    pub fn new() -> PutOpts {
        Default::default()
    }

    /// Name to record the payload under. Defaults to the payload's own
    /// fingerprint.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Fingerprint the caller expects the payload to have. The store fails
    /// with [`Error::IntegrityCheckError`] before any network traffic if the
    /// computed digest disagrees.
    pub fn fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }

    /// Stores a payload string verbatim.
    pub async fn data<D: AsRef<str>>(self, client: &Client, data: D) -> Result<StoredRecord> {
        send_payload(client, data.as_ref(), self).await
    }

    /// Hex-encodes a byte payload and stores the encoded form.
    pub async fn bytes<D: AsRef<[u8]>>(self, client: &Client, data: D) -> Result<StoredRecord> {
        let encoded = hex::encode(data.as_ref());
        send_payload(client, &encoded, self).await
    }

    /// Reads a local file, hex-encodes its contents, and stores them.
    pub async fn file<P: AsRef<Path>>(self, client: &Client, path: P) -> Result<StoredRecord> {
        if !client.file_system {
            return Err(Error::FileOpsUnsupported);
        }
        let path = path.as_ref();
        let contents = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {} for upload", path.display()))?;
        let encoded = hex::encode(contents);
        send_payload(client, &encoded, self).await
    }
}

async fn send_payload(client: &Client, payload: &str, opts: PutOpts) -> Result<StoredRecord> {
    let computed = Fingerprint::from_bytes(payload.as_bytes());
    if let Some(expected) = &opts.fingerprint {
        if expected != &computed {
            return Err(Error::IntegrityCheckError {
                expected: expected.clone(),
                actual: computed,
            });
        }
    }
    let name = opts.name.as_deref().unwrap_or_else(|| computed.as_str());
    tracing::debug!(hash = %computed, name, "storing payload");
    client
        .post_json(
            "data/put",
            "POST /data/put",
            &PutRequest {
                auth_token: client.auth_token(),
                data: payload,
                name,
                hash: &computed,
            },
        )
        .await
}
