use appdiff_core_types::RequestId;
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// testing, and CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    InvalidPath,
    DuplicatePath,

    // Local filesystem read or prepare failure
    Io,
    /// Remote accessor failure, including auth/session errors and malformed responses
    Service,
    /// Dependency archive could not be assembled
    Build,
    /// Asset cache unreadable or unwritable (recoverable)
    Cache,

    // Integration
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidPath => "ERR_INVALID_PATH",
            ExErrorKind::DuplicatePath => "ERR_DUPLICATE_PATH",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Service => "ERR_SERVICE",
            ExErrorKind::Build => "ERR_BUILD",
            ExErrorKind::Cache => "ERR_CACHE",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether an error of this kind aborts the whole diff.
    ///
    /// Only cache failures are recovered locally.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ExErrorKind::Cache)
    }
}

/// Canonical structured error type
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    app_id: Option<String>,
    path: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            app_id: None,
            path: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add application identity context
    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Add path context (relative snapshot path or local filesystem path)
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Whether this error aborts the diff
    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the application identity context, if any
    pub fn app_id(&self) -> Option<&str> {
        self.app_id.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(app_id) = &self.app_id {
            write!(f, " (app_id: {})", app_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Model-level violations raised while building snapshots
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    /// Path is empty, escapes its root, or otherwise cannot be normalised
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Two nodes normalise to the same path within one tree
    #[error("Duplicate path in snapshot: {path}")]
    DuplicatePath { path: String },

    /// Directory nodes carry no content
    #[error("Directory node '{path}' must not carry content")]
    DirectoryWithContent { path: String },

    /// A present dependency snapshot must carry a digest
    #[error("Dependency snapshot is marked present but has no digest")]
    PresentWithoutDigest,

    /// Digest is not lower/upper-case hex of the expected length
    #[error("Malformed digest '{digest}' for {subject}")]
    MalformedDigest { subject: String, digest: String },

    /// A remote response could not be interpreted
    #[error("Malformed remote response for {what}: {reason}")]
    MalformedResponse { what: String, reason: String },
}

impl From<SnapshotError> for ExError {
    fn from(err: SnapshotError) -> Self {
        let message = err.to_string();
        match err {
            SnapshotError::InvalidPath { path, .. } => ExError::new(ExErrorKind::InvalidPath)
                .with_path(path)
                .with_message(message),
            SnapshotError::DuplicatePath { path } => ExError::new(ExErrorKind::DuplicatePath)
                .with_path(path)
                .with_message(message),
            SnapshotError::DirectoryWithContent { path } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_path(path)
                    .with_message(message)
            }
            SnapshotError::PresentWithoutDigest => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            SnapshotError::MalformedDigest { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            SnapshotError::MalformedResponse { .. } => {
                ExError::new(ExErrorKind::Service).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
