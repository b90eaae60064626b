//! Error types for the PubMed fetcher.
//!
//! Uses `thiserror` for structured error handling with automatic `From` implementations.

/// Errors from the HTTP client layer.
#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    /// HTTP transport error (connection, DNS, TLS, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Search response was not the expected JSON
    #[error("Failed to parse search response: {0}")]
    Json(#[from] serde_json::Error),

    /// Record response was not well-formed XML
    #[error("Failed to parse record for PMID {pmid}: {source}")]
    Xml {
        /// Identifier whose record failed to parse
        pmid: String,
        /// Underlying parse failure
        #[source]
        source: ParseError,
    },

    /// Rate limited by NCBI (429 response)
    #[error("Rate limited: {message}")]
    RateLimited {
        /// Response body
        message: String,
    },

    /// Resource not found (404 response)
    #[error("Resource not found: {resource}")]
    NotFound {
        /// Description of the missing resource
        resource: String,
    },

    /// Invalid request parameters (400 response)
    #[error("Bad request: {message}")]
    BadRequest {
        /// Error message from API
        message: String,
    },

    /// Server error (5xx response)
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Unexpected HTTP status
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body or message
        message: String,
    },
}

impl ClientError {
    /// Create a rate limited error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited { message: message.into() }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    /// Create a bad request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    /// Create a server error.
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server { status, message: message.into() }
    }

    /// Wrap a parse failure for the given record.
    #[must_use]
    pub fn xml(pmid: impl Into<String>, source: ParseError) -> Self {
        Self::Xml { pmid: pmid.into(), source }
    }

    /// HTTP status behind this error, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RateLimited { .. } => Some(429),
            Self::NotFound { .. } => Some(404),
            Self::BadRequest { .. } => Some(400),
            Self::Server { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors from parsing an `efetch` XML document.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    /// Syntax error reported by the XML reader
    #[error("malformed XML at byte {position}: {source}")]
    Syntax {
        /// Byte offset where the reader stopped
        position: u64,
        /// Reader error
        #[source]
        source: quick_xml::Error,
    },

    /// Well-formed tokens that do not make a single-rooted document
    #[error("invalid XML document: {0}")]
    Structure(String),
}

/// Errors from appending records to the output file.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    /// Opening or flushing the file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Output path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Serializing a row failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Errors surfaced by the search → fetch → write pipeline.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// A search or fetch call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Writing the output file failed
    #[error(transparent)]
    Export(#[from] ExportError),

    /// A fetch task panicked or was cancelled
    #[error("Fetch worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    /// Pool width must be at least one
    #[error("Invalid worker count {0}: must be at least 1")]
    InvalidWorkers(usize),
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Result type alias for XML parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
