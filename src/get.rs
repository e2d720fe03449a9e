//! Functions for fetching stored payloads back from the service.
//!
//! Every payload-returning function here refuses to hand data to the caller
//! unless the record's integrity indicator holds: the service's own flag is
//! checked first, and [`data_checked`] additionally recomputes the payload's
//! fingerprint locally and compares it to the one the caller expects.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::client::Client;
use crate::errors::{Error, IoErrorExt, Result};
use crate::fingerprint::Fingerprint;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GetRequest<'a> {
    auth_token: String,
    tx_id: &'a str,
}

/// Record as returned by the service for a fetch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedRecord {
    /// Hex-encoded payload bytes.
    pub data: String,
    /// Name the payload was stored under.
    #[serde(default)]
    pub filename: Option<String>,
    /// Integrity indicator asserted by the service. A missing field counts
    /// as false.
    #[serde(default)]
    pub integrity: bool,
}

/// Fetches the raw record for a transaction, without decoding the payload
/// or applying the integrity gate. Most callers want [`data`] instead.
pub async fn record(client: &Client, tx_id: &str) -> Result<FetchedRecord> {
    tracing::debug!(tx_id, "fetching record");
    client
        .post_json(
            "data/get",
            "POST /data/get",
            &GetRequest {
                auth_token: client.auth_token(),
                tx_id,
            },
        )
        .await
}

/// Fetches a payload and decodes it, refusing with
/// [`Error::IntegrityViolation`] if the service cannot vouch for the
/// record's integrity.
///
/// ## Example
/// ```no_run
/// #[tokio::main]
/// async fn main() -> limelock::Result<()> {
///     let client = limelock::Client::options().token("tok").build()?;
///     let payload = limelock::get::data(&client, "tx-123").await?;
///     println!("{} bytes", payload.len());
///     Ok(())
/// }
/// ```
pub async fn data(client: &Client, tx_id: &str) -> Result<Vec<u8>> {
    let record = gate(record(client, tx_id).await?, tx_id)?;
    Ok(hex::decode(&record.data)?)
}

/// Like [`data`], but also recomputes the fingerprint over the payload as
/// transmitted and compares it against the one the caller expects, rather
/// than trusting the service's flag alone.
pub async fn data_checked(
    client: &Client,
    tx_id: &str,
    expected: &Fingerprint,
) -> Result<Vec<u8>> {
    let record = gate(record(client, tx_id).await?, tx_id)?;
    let actual = Fingerprint::from_bytes(record.data.as_bytes());
    if &actual != expected {
        return Err(Error::IntegrityCheckError {
            expected: expected.clone(),
            actual,
        });
    }
    Ok(hex::decode(&record.data)?)
}

/// Copies a stored payload to a local path, applying the integrity gate
/// first. Returns the number of bytes written.
pub async fn copy<P: AsRef<Path>>(client: &Client, tx_id: &str, to: P) -> Result<u64> {
    if !client.file_system {
        return Err(Error::FileOpsUnsupported);
    }
    let to = to.as_ref();
    let record = gate(record(client, tx_id).await?, tx_id)?;
    let bytes = hex::decode(&record.data)?;
    tokio::fs::write(to, &bytes)
        .await
        .with_context(|| format!("Failed to write payload to {}", to.display()))?;
    Ok(bytes.len() as u64)
}

/// Copies a stored payload to the name it was originally stored under,
/// returning the path written. Fails with [`Error::MissingFilename`] when
/// the record carries none.
pub async fn copy_to_name(client: &Client, tx_id: &str) -> Result<PathBuf> {
    if !client.file_system {
        return Err(Error::FileOpsUnsupported);
    }
    let record = gate(record(client, tx_id).await?, tx_id)?;
    let filename = record.filename.as_deref().ok_or_else(|| Error::MissingFilename {
        tx_id: tx_id.into(),
    })?;
    let to = PathBuf::from(filename);
    let bytes = hex::decode(&record.data)?;
    tokio::fs::write(&to, &bytes)
        .await
        .with_context(|| format!("Failed to write payload to {}", to.display()))?;
    Ok(to)
}

fn gate(record: FetchedRecord, tx_id: &str) -> Result<FetchedRecord> {
    if !record.integrity {
        return Err(Error::IntegrityViolation {
            tx_id: tx_id.into(),
        });
    }
    Ok(record)
}
