use thiserror::Error;

/// Errors returned synchronously from import operations.
///
/// Per-field validation problems are never errors -- they live in the
/// step's `FieldErrors` map. These cover the import control surface only.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("website URL is required")]
    InvalidInput,

    /// A second `start()` while one import is in flight. The start
    /// affordance should already be disabled while busy, so hitting this
    /// is an invariant guard, not a user-facing crash.
    #[error("an import is already running")]
    AlreadyRunning,

    #[error("no import is running")]
    NotRunning,
}

/// Failure from the external content fetch collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("import failed: {0}")]
pub struct FetchError(pub String);

/// Failure from the external submit collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("submit rejected: {0}")]
pub struct SinkError(pub String);

/// Errors from the wizard's final submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    /// One or more steps failed validation; the collaborator was never
    /// called and the per-step error maps hold the details.
    #[error("one or more steps failed validation")]
    Validation,

    /// The external collaborator rejected the payload. All-or-nothing:
    /// the wizard returns to an editable state.
    #[error("submit rejected: {0}")]
    Sink(String),

    /// The wizard already reached its terminal state.
    #[error("configuration was already submitted")]
    AlreadySubmitted,
}

/// Errors from the import dialog control surface.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DialogError {
    #[error("dialog is already open")]
    AlreadyOpen,

    #[error("dialog is not open")]
    NotOpen,

    #[error(transparent)]
    Import(#[from] ImportError),
}
