//! limelock is a Rust client for the Limelock remote content-addressable
//! storage service. Payloads go in, transaction identifiers come out, and
//! no payload ever comes back to you without passing an integrity check
//! first.
//!
//! ## Examples
//!
//! All operations are async and run on [`tokio`](https://crates.io/crates/tokio).
//! Put data in, get it back out by transaction id:
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() -> limelock::Result<()> {
//!     let client = limelock::Client::new()?;
//!     client.login("me@example.com", "hunter2").await?;
//!
//!     // Data goes in...
//!     let record = limelock::put::data(&client, "hello").await?;
//!
//!     // ...data comes out!
//!     let data = limelock::get::data(&client, &record.tx_id).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Verifying by fingerprint
//!
//! Every payload is addressed by its fingerprint, the hex MD5 digest of the
//! bytes as transmitted. If you keep the fingerprint from before the store,
//! you can have the fetch recompute and compare it locally instead of
//! trusting the service's integrity flag alone:
//!
//! ```no_run
//! use limelock::Fingerprint;
//!
//! #[tokio::main]
//! async fn main() -> limelock::Result<()> {
//!     let client = limelock::Client::options().token("tok").build()?;
//!
//!     let payload = hex::encode(b"hello world");
//!     let fingerprint = Fingerprint::from_bytes(payload.as_bytes());
//!     let record = limelock::put::bytes(&client, b"hello world").await?;
//!
//!     let data = limelock::get::data_checked(&client, &record.tx_id, &fingerprint).await?;
//!     assert_eq!(data, b"hello world");
//!     Ok(())
//! }
//! ```
//!
//! ### Files
//!
//! Whole files can be uploaded and downloaded through the same pipeline;
//! their contents travel hex-encoded and are named after their fingerprint
//! by default:
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() -> limelock::Result<()> {
//!     let client = limelock::Client::options().token("tok").build()?;
//!     let record = limelock::put::file(&client, "./report.pdf").await?;
//!     limelock::get::copy(&client, &record.tx_id, "./report-copy.pdf").await?;
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]

pub use serde_json::Value;

mod client;
mod errors;

pub mod fingerprint;
pub mod get;
pub mod put;

pub use client::{Client, ClientOptions};
pub use errors::{Error, Result};
pub use fingerprint::{Fingerprint, Hasher};
pub use get::FetchedRecord;
pub use put::StoredRecord;
