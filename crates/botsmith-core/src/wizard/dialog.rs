//! The import dialog: modal visibility plus the busy lock that keeps a
//! running import from being dismissed or double-started.
//!
//! All mutation happens on the control thread; `refresh()` reconciles
//! the busy flag with the session's status on every user intent, so no
//! completion callback is needed.

use botsmith_types::error::DialogError;
use botsmith_types::wizard::{DialogState, ImportStatus};
use uuid::Uuid;

use super::import::{ContentFetcher, ImportRunner};

/// Modal state machine guarding the import runner.
pub struct DialogController<F: ContentFetcher> {
    state: DialogState,
    website_url: String,
    runner: ImportRunner<F>,
}

impl<F: ContentFetcher + 'static> DialogController<F> {
    pub fn new(runner: ImportRunner<F>) -> Self {
        Self {
            state: DialogState::Closed,
            website_url: String::new(),
            runner,
        }
    }

    pub fn state(&self) -> DialogState {
        self.state
    }

    /// The staged URL the user has typed so far. Cleared on close.
    pub fn website_url(&self) -> &str {
        &self.website_url
    }

    pub fn import_status(&self) -> ImportStatus {
        self.runner.status()
    }

    pub fn import_error(&self) -> Option<String> {
        self.runner.error()
    }

    /// Open the dialog. Legal only from `Closed`.
    pub fn open(&mut self) -> Result<(), DialogError> {
        if self.state != DialogState::Closed {
            return Err(DialogError::AlreadyOpen);
        }
        self.state = DialogState::OpenIdle;
        Ok(())
    }

    pub fn set_website_url(&mut self, url: impl Into<String>) {
        self.website_url = url.into();
    }

    /// Start importing the staged URL. The dialog locks busy until the
    /// session reaches a terminal state.
    pub fn start_import(&mut self) -> Result<Uuid, DialogError> {
        self.refresh();
        if self.state == DialogState::Closed {
            return Err(DialogError::NotOpen);
        }
        let id = self.runner.start(&self.website_url)?;
        self.state = DialogState::OpenBusy;
        Ok(id)
    }

    /// Cancel the running import. The dialog stays open.
    pub fn cancel_import(&mut self) -> Result<(), DialogError> {
        self.runner.cancel()?;
        self.refresh();
        Ok(())
    }

    /// Ask to dismiss the dialog. Ignored (returns false) while an import
    /// is running -- closing mid-flight would orphan the session.
    pub fn request_close(&mut self) -> bool {
        self.refresh();
        match self.state {
            DialogState::OpenBusy => {
                tracing::debug!("close request ignored while import is running");
                false
            }
            DialogState::OpenIdle => {
                self.close();
                true
            }
            DialogState::Closed => true,
        }
    }

    /// Reconcile the busy flag with the import session's status: any
    /// terminal status clears busy, and success additionally auto-closes
    /// the dialog. Returns the (possibly updated) state.
    pub fn refresh(&mut self) -> DialogState {
        if self.state == DialogState::OpenBusy {
            let status = self.runner.status();
            if status.is_terminal() {
                if status == ImportStatus::Succeeded {
                    self.close();
                } else {
                    self.state = DialogState::OpenIdle;
                }
            }
        }
        self.state
    }

    pub fn runner(&self) -> &ImportRunner<F> {
        &self.runner
    }

    pub fn runner_mut(&mut self) -> &mut ImportRunner<F> {
        &mut self.runner
    }

    fn close(&mut self) {
        self.state = DialogState::Closed;
        self.website_url.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::controller::WizardController;
    use crate::wizard::form::SharedForm;
    use crate::wizard::schema::KnowledgeSchema;
    use botsmith_types::error::{FetchError, ImportError};
    use botsmith_types::wizard::StepId;
    use serde_json::json;
    use std::future::Future;
    use std::sync::Arc;
    use tokio::sync::Notify;

    struct GatedFetcher {
        gate: Arc<Notify>,
        response: Result<String, FetchError>,
    }

    impl ContentFetcher for GatedFetcher {
        fn fetch(&self, _url: &str) -> impl Future<Output = Result<String, FetchError>> + Send {
            let gate = Arc::clone(&self.gate);
            let response = self.response.clone();
            async move {
                gate.notified().await;
                response
            }
        }
    }

    fn dialog_with(
        response: Result<String, FetchError>,
        form: SharedForm<KnowledgeSchema>,
    ) -> (DialogController<GatedFetcher>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let fetcher = GatedFetcher {
            gate: Arc::clone(&gate),
            response,
        };
        (DialogController::new(ImportRunner::new(fetcher, form)), gate)
    }

    async fn settle(dialog: &mut DialogController<GatedFetcher>) {
        dialog.runner_mut().session_mut().expect("no session").wait().await;
    }

    #[test]
    fn test_open_only_from_closed() {
        let (mut dialog, _gate) =
            dialog_with(Ok("content".to_string()), SharedForm::new(KnowledgeSchema));

        dialog.open().unwrap();
        assert_eq!(dialog.state(), DialogState::OpenIdle);
        assert_eq!(dialog.open(), Err(DialogError::AlreadyOpen));
    }

    #[tokio::test]
    async fn test_start_import_requires_open_dialog() {
        let (mut dialog, _gate) =
            dialog_with(Ok("content".to_string()), SharedForm::new(KnowledgeSchema));
        dialog.set_website_url("https://example.com");

        assert_eq!(dialog.start_import(), Err(DialogError::NotOpen));
    }

    #[tokio::test]
    async fn test_close_ignored_while_busy_then_succeeds_after_terminal() {
        let (mut dialog, gate) =
            dialog_with(Ok("content".to_string()), SharedForm::new(KnowledgeSchema));

        dialog.open().unwrap();
        dialog.set_website_url("https://example.com");
        dialog.start_import().unwrap();
        assert_eq!(dialog.state(), DialogState::OpenBusy);

        assert!(!dialog.request_close());
        assert_eq!(dialog.state(), DialogState::OpenBusy);

        gate.notify_one();
        settle(&mut dialog).await;

        assert!(dialog.request_close());
        assert_eq!(dialog.state(), DialogState::Closed);
    }

    #[tokio::test]
    async fn test_success_auto_closes_and_clears_url() {
        let form = SharedForm::new(KnowledgeSchema);
        let (mut dialog, gate) = dialog_with(Ok("About Us".to_string()), form.clone());

        dialog.open().unwrap();
        dialog.set_website_url("https://example.com/about");
        dialog.start_import().unwrap();

        gate.notify_one();
        settle(&mut dialog).await;

        assert_eq!(dialog.refresh(), DialogState::Closed);
        assert_eq!(dialog.website_url(), "");
        assert!(form.values().company_information.contains("About Us"));
    }

    #[tokio::test]
    async fn test_failure_keeps_dialog_open_for_retry() {
        let (mut dialog, gate) = dialog_with(
            Err(FetchError("timeout".to_string())),
            SharedForm::new(KnowledgeSchema),
        );

        dialog.open().unwrap();
        dialog.set_website_url("https://example.com");
        dialog.start_import().unwrap();

        gate.notify_one();
        settle(&mut dialog).await;

        assert_eq!(dialog.refresh(), DialogState::OpenIdle);
        assert_eq!(dialog.import_status(), ImportStatus::Failed);
        assert!(dialog.import_error().is_some());

        // Busy cleared: the user may retry.
        dialog.start_import().unwrap();
        assert_eq!(dialog.state(), DialogState::OpenBusy);
    }

    #[tokio::test]
    async fn test_cancel_clears_busy_but_keeps_dialog_open() {
        let (mut dialog, _gate) =
            dialog_with(Ok("content".to_string()), SharedForm::new(KnowledgeSchema));

        dialog.open().unwrap();
        dialog.set_website_url("https://example.com");
        dialog.start_import().unwrap();

        dialog.cancel_import().unwrap();
        assert_eq!(dialog.state(), DialogState::OpenIdle);
        assert_eq!(dialog.import_status(), ImportStatus::Cancelled);

        assert_eq!(
            dialog.cancel_import(),
            Err(DialogError::Import(ImportError::NotRunning))
        );
    }

    #[tokio::test]
    async fn test_double_start_rejected_while_busy() {
        let (mut dialog, _gate) =
            dialog_with(Ok("content".to_string()), SharedForm::new(KnowledgeSchema));

        dialog.open().unwrap();
        dialog.set_website_url("https://a.example.com");
        dialog.start_import().unwrap();

        dialog.set_website_url("https://b.example.com");
        assert_eq!(
            dialog.start_import(),
            Err(DialogError::Import(ImportError::AlreadyRunning))
        );
        assert_eq!(
            dialog.runner().session().unwrap().url(),
            "https://a.example.com"
        );
    }

    /// Navigating the wizard while an import is in flight is permitted;
    /// the result still lands in the knowledge step's field.
    #[tokio::test]
    async fn test_import_lands_while_wizard_is_on_another_step() {
        let mut wizard = WizardController::new();
        wizard.set_field(StepId::Personality, "primaryTraits", json!(["Friendly"]));
        wizard.set_field(StepId::Personality, "primaryFunction", json!("assistant"));
        wizard.go_next().unwrap();

        let (mut dialog, gate) =
            dialog_with(Ok("About Us".to_string()), wizard.knowledge_form());
        dialog.open().unwrap();
        dialog.set_website_url("https://example.com");
        dialog.start_import().unwrap();

        // The user wanders back to the personality step mid-import.
        wizard.go_back().unwrap();

        gate.notify_one();
        settle(&mut dialog).await;

        assert_eq!(dialog.import_status(), ImportStatus::Succeeded);
        assert!(wizard
            .knowledge_form()
            .values()
            .company_information
            .contains("About Us"));
        assert_eq!(wizard.active_step(), StepId::Personality);
    }
}
