//! Single-flight cancellable website import.
//!
//! An `ImportSession` is created per attempt, transitions to exactly one
//! terminal state, and is replaced by the next attempt -- sessions are
//! never reused or queued. Cancellation is cooperative: the background
//! fetch runs to completion, but a cancelled session's result is
//! discarded, never applied to the form.

use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use botsmith_types::error::{FetchError, ImportError};
use botsmith_types::wizard::ImportStatus;

use super::defaults::import_summary;
use super::form::SharedForm;
use super::schema::KnowledgeSchema;

/// External collaborator that fetches importable content for a URL.
///
/// The core imposes no timeout of its own; callers may layer one over
/// their implementation. Uses RPITIT consistent with all project traits.
pub trait ContentFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, FetchError>> + Send;
}

#[derive(Debug)]
struct SessionInner {
    status: ImportStatus,
    error: Option<String>,
    finished_at: Option<DateTime<Utc>>,
}

/// One import attempt: its target URL, status, and cancellation token.
#[derive(Debug)]
pub struct ImportSession {
    id: Uuid,
    url: String,
    started_at: DateTime<Utc>,
    inner: Arc<Mutex<SessionInner>>,
    token: CancellationToken,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl ImportSession {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The URL this session resolves, fixed at start.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn status(&self) -> ImportStatus {
        self.lock().status
    }

    /// The fetch failure message, present only when status is `Failed`.
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.lock().finished_at
    }

    /// Wait for the background task to settle. The session may already be
    /// `Cancelled` when the task finishes; waiting only guarantees that no
    /// further writes will happen.
    pub async fn wait(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionInner> {
        self.inner.lock().expect("import session lock poisoned")
    }

    fn cancel(&self) {
        self.token.cancel();
        let mut inner = self.lock();
        if inner.status == ImportStatus::Running {
            inner.status = ImportStatus::Cancelled;
            inner.finished_at = Some(Utc::now());
            tracing::info!(session_id = %self.id, "import cancelled");
        }
    }
}

/// Starts, tracks, and cancels import sessions against the knowledge form.
///
/// Single-flight wizard-wide: a second `start()` while one session is
/// running is rejected, never queued or coalesced.
pub struct ImportRunner<F: ContentFetcher> {
    fetcher: Arc<F>,
    target: SharedForm<KnowledgeSchema>,
    session: Option<ImportSession>,
}

impl<F: ContentFetcher + 'static> ImportRunner<F> {
    /// Wire the runner to its fetch collaborator and the knowledge form
    /// its successful imports write into.
    pub fn new(fetcher: F, target: SharedForm<KnowledgeSchema>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            target,
            session: None,
        }
    }

    /// Start a new import. Must be called within a tokio runtime.
    ///
    /// Fails with `InvalidInput` if the URL is empty and `AlreadyRunning`
    /// if a session is in flight. On success the previous (terminal)
    /// session is discarded and replaced.
    pub fn start(&mut self, url: &str) -> Result<Uuid, ImportError> {
        if url.trim().is_empty() {
            return Err(ImportError::InvalidInput);
        }
        if self.status() == ImportStatus::Running {
            return Err(ImportError::AlreadyRunning);
        }

        let id = Uuid::now_v7();
        let url = url.to_string();
        let token = CancellationToken::new();
        let inner = Arc::new(Mutex::new(SessionInner {
            status: ImportStatus::Running,
            error: None,
            finished_at: None,
        }));

        let fetcher = Arc::clone(&self.fetcher);
        let target = self.target.clone();
        let task_url = url.clone();
        let task_inner = Arc::clone(&inner);
        let task_token = token.clone();

        tracing::info!(session_id = %id, url = task_url.as_str(), "import started");

        let handle = tokio::spawn(async move {
            let result = fetcher.fetch(&task_url).await;

            // A cancelled session's result must never reach the form.
            if task_token.is_cancelled() {
                tracing::debug!(session_id = %id, "discarding result of cancelled import");
                return;
            }

            let mut inner = task_inner.lock().expect("import session lock poisoned");
            if inner.status != ImportStatus::Running {
                return;
            }

            match result {
                Ok(content) => {
                    // The one observable side effect: exactly one field
                    // write, and only on success. Writing under the status
                    // lock keeps cancel() from racing the apply.
                    target.set_field(
                        "companyInformation",
                        serde_json::Value::String(import_summary(&task_url, &content)),
                    );
                    inner.status = ImportStatus::Succeeded;
                    tracing::info!(session_id = %id, "import succeeded");
                }
                Err(err) => {
                    inner.status = ImportStatus::Failed;
                    inner.error = Some(err.to_string());
                    tracing::warn!(session_id = %id, error = %err, "import failed");
                }
            }
            inner.finished_at = Some(Utc::now());
        });

        self.session = Some(ImportSession {
            id,
            url,
            started_at: Utc::now(),
            inner,
            token,
            handle: Some(handle),
        });
        Ok(id)
    }

    /// Cancel the running session. Only legal while one is running.
    pub fn cancel(&mut self) -> Result<(), ImportError> {
        match &self.session {
            Some(session) if session.status() == ImportStatus::Running => {
                session.cancel();
                Ok(())
            }
            _ => Err(ImportError::NotRunning),
        }
    }

    /// Status of the current session, or `Idle` when none was started.
    pub fn status(&self) -> ImportStatus {
        self.session
            .as_ref()
            .map_or(ImportStatus::Idle, ImportSession::status)
    }

    /// The current session's failure message, if any.
    pub fn error(&self) -> Option<String> {
        self.session.as_ref().and_then(ImportSession::error)
    }

    pub fn session(&self) -> Option<&ImportSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut ImportSession> {
        self.session.as_mut()
    }
}
