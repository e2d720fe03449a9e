use miette::Diagnostic;
use thiserror::Error;

use crate::fingerprint::Fingerprint;

/// Error type returned by all `limelock` APIs.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Returned when a payload's recomputed digest does not match the
    /// fingerprint it was promised under.
    #[error("Integrity check failed.\n\tWanted: {expected}\n\tActual: {actual}")]
    #[diagnostic(code(limelock::integrity_check_failure), url(docsrs))]
    IntegrityCheckError {
        /// The fingerprint the payload was expected to have.
        expected: Fingerprint,
        /// The fingerprint actually computed over the payload.
        actual: Fingerprint,
    },

    /// Returned when the service reports a fetched record's integrity
    /// indicator as false or absent. The payload is never handed to the
    /// caller in this case.
    #[error("Data integrity compromised for transaction {tx_id}")]
    #[diagnostic(
        code(limelock::integrity_violation),
        help("The record exists but the service could not vouch for its contents. Do not trust this payload.")
    )]
    IntegrityViolation {
        /// Transaction identifier of the untrusted record.
        tx_id: String,
    },

    /// Returned when the service answers with a non-success status. Carries
    /// the response body verbatim.
    #[error("Remote rejected {endpoint} with status {status}: {body}")]
    #[diagnostic(code(limelock::remote_rejection))]
    RemoteRejection {
        /// Endpoint the request was sent to.
        endpoint: String,
        /// HTTP status the service answered with.
        status: u16,
        /// Response body, as received.
        body: String,
    },

    /// Returned when a request could not be completed at all.
    #[error("Request to {endpoint} failed")]
    #[diagnostic(code(limelock::transport_error))]
    TransportError {
        /// Endpoint the request was sent to.
        endpoint: String,
        /// Underlying transport failure.
        #[source]
        source: reqwest::Error,
    },

    /// Returned when a successful response could not be decoded into the
    /// expected shape.
    #[error("Malformed response from {endpoint}")]
    #[diagnostic(code(limelock::malformed_response))]
    MalformedResponse {
        /// Endpoint the response came from.
        endpoint: String,
        /// Underlying decode failure.
        #[source]
        source: reqwest::Error,
    },

    /// Returned when a fetched record does not carry a filename but one was
    /// needed to pick a destination path.
    #[error("Record for transaction {tx_id} does not carry a filename")]
    #[diagnostic(
        code(limelock::missing_filename),
        help("Pass an explicit destination path to limelock::get::copy instead.")
    )]
    MissingFilename {
        /// Transaction identifier of the record.
        tx_id: String,
    },

    /// Returned when file-backed operations are invoked on a client whose
    /// environment has no file-system access.
    #[error("File operations are not supported in this environment")]
    #[diagnostic(
        code(limelock::file_ops_unsupported),
        help("Construct the client with ClientOptions::file_system(true), or use the in-memory put/get APIs.")
    )]
    FileOpsUnsupported,

    /// Returned when an underlying IO operation failed during a file-backed
    /// operation.
    #[error("{1}")]
    #[diagnostic(code(limelock::io_error), url(docsrs))]
    IoError(#[source] std::io::Error, String),

    /// Returned when a fetched payload is not valid hex.
    #[error(transparent)]
    #[diagnostic(code(limelock::hex_error))]
    HexError(#[from] hex::FromHexError),

    /// Returned when serializing or deserializing wire JSON fails outside of
    /// the transport layer.
    #[error(transparent)]
    #[diagnostic(code(limelock::serde_error))]
    SerdeError(#[from] serde_json::Error),

    /// Returned when the configured base URL cannot be parsed.
    #[error(transparent)]
    #[diagnostic(code(limelock::url_error))]
    UrlError(#[from] url::ParseError),
}

/// The result type returned by calls to this library.
pub type Result<T> = std::result::Result<T, Error>;

pub trait IoErrorExt<T> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T> IoErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        match self {
            Ok(t) => Ok(t),
            Err(e) => Err(Error::IoError(e, f())),
        }
    }
}
