//! Host controller
//!
//! Owns the single survey model for the lifetime of the app, reacts to the
//! model's page-changing, upload and completion events, and drives the UI
//! phase. Deferred transitions run as timer tasks that post back over a
//! channel; every task is aborted when the host is dropped.

use crate::choices::ChoiceSource;
use crate::config::TuiConfig;
use crate::survey::{
    inspect, Advance, AnswerSet, NavigationError, PageChange, SurveyDefinition, SurveyEvents,
    SurveyModel, UploadError, UploadRequest,
};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use uuid::Uuid;

/// Which of the two screen regions is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiPhase {
    /// Loading indicator
    #[default]
    Loading,
    /// The survey itself
    Ready,
}

impl UiPhase {
    pub fn is_loading(&self) -> bool {
        *self == UiPhase::Loading
    }
}

/// Fixed delays used by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostTimings {
    pub startup_delay: Duration,
    pub upload_delay: Duration,
}

impl Default for HostTimings {
    fn default() -> Self {
        Self {
            startup_delay: Duration::from_secs(2),
            upload_delay: Duration::from_secs(1),
        }
    }
}

impl From<&TuiConfig> for HostTimings {
    fn from(config: &TuiConfig) -> Self {
        Self {
            startup_delay: config.startup_delay(),
            upload_delay: config.upload_delay(),
        }
    }
}

/// Messages posted back to the host by background tasks
#[derive(Debug)]
pub enum HostMessage {
    /// A deferred `Loading -> Ready` transition is due
    Ready,
    /// A remote choice list finished loading
    ChoicesLoaded {
        question: String,
        result: Result<Vec<crate::survey::Choice>, String>,
    },
}

/// Event reactions and UI phase; kept apart from the model so both can be
/// borrowed at once while the model raises events
struct Controller {
    phase: UiPhase,
    /// Set on completion; the phase stays `Loading` from then on
    finished: bool,
    timings: HostTimings,
    session_id: Uuid,
    results: Option<AnswerSet>,
    tx: UnboundedSender<HostMessage>,
    tasks: Vec<JoinHandle<()>>,
}

impl Controller {
    fn track(&mut self, handle: JoinHandle<()>) {
        self.tasks.retain(|task| !task.is_finished());
        self.tasks.push(handle);
    }

    /// Post `Ready` once `delay` has passed since this call. Overlapping
    /// timers are not debounced.
    fn schedule_ready(&mut self, delay: Duration) {
        let deadline = Instant::now() + delay;
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let _ = tx.send(HostMessage::Ready);
        });
        self.track(handle);
    }

    fn set_ready(&mut self) {
        if self.finished {
            tracing::debug!("Ignoring ready transition after completion");
            return;
        }
        self.phase = UiPhase::Ready;
    }
}

impl SurveyEvents for Controller {
    fn on_current_page_changing(&mut self, survey: &mut SurveyModel, change: &PageChange) {
        tracing::info!(
            "Page changing {} -> {} of {} ({})",
            change.from,
            change.to,
            survey.page_count(),
            if change.is_forward() { "next" } else { "back" }
        );
        if survey.current_page_no() + 2 == survey.page_count() {
            if !survey.is_single_page() {
                tracing::info!("Collapsing remaining pages into a single page");
            }
            survey.set_single_page();
        }
    }

    fn on_upload_files(&mut self, _survey: &SurveyModel, upload: &UploadRequest) {
        tracing::info!(
            "Received {} file(s) for {}",
            upload.files.len(),
            upload.question
        );
        self.phase = UiPhase::Loading;
        self.schedule_ready(self.timings.upload_delay);
    }

    fn on_complete(&mut self, survey: &SurveyModel) {
        let data = survey.data();
        match data.to_json() {
            Ok(json) => tracing::info!(
                session = %self.session_id,
                completed_at = %Utc::now().to_rfc3339(),
                "Survey Results: {json}"
            ),
            Err(e) => tracing::warn!("Could not serialize survey results: {e}"),
        }
        self.results = Some(data.clone());
        self.finished = true;
        self.phase = UiPhase::Loading;
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// The top-level survey component
pub struct SurveyHost {
    model: SurveyModel,
    controller: Controller,
    rx: UnboundedReceiver<HostMessage>,
}

impl SurveyHost {
    /// Build the model once and start the startup timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(definition: SurveyDefinition, timings: HostTimings) -> Self {
        let (tx, rx) = unbounded_channel();
        let session_id = Uuid::new_v4();
        tracing::info!("Starting survey session {session_id}");

        let mut controller = Controller {
            phase: UiPhase::Loading,
            finished: false,
            timings,
            session_id,
            results: None,
            tx,
            tasks: Vec::new(),
        };
        controller.schedule_ready(timings.startup_delay);

        Self {
            model: SurveyModel::new(definition),
            controller,
            rx,
        }
    }

    pub fn phase(&self) -> UiPhase {
        self.controller.phase
    }

    pub fn is_finished(&self) -> bool {
        self.controller.finished
    }

    pub fn session_id(&self) -> Uuid {
        self.controller.session_id
    }

    /// Answers handed over at completion
    pub fn results(&self) -> Option<&AnswerSet> {
        self.controller.results.as_ref()
    }

    pub fn model(&self) -> &SurveyModel {
        &self.model
    }

    /// Mutable access for answer edits; navigation and uploads go through the host
    pub fn model_mut(&mut self) -> &mut SurveyModel {
        &mut self.model
    }

    pub fn next_page(&mut self) -> Result<Advance, NavigationError> {
        self.model.next_page(&mut self.controller)
    }

    pub fn prev_page(&mut self) -> Result<PageChange, NavigationError> {
        self.model.prev_page(&mut self.controller)
    }

    /// Attach the file at `path` to a file question
    pub fn upload_file(&mut self, question: &str, path: &Path) -> Result<(), UploadError> {
        let attachment = inspect(path)?;
        self.model
            .upload_files(question, vec![attachment], &mut self.controller)
    }

    /// Fetch every remote choice list in the background
    pub fn load_remote_choices(&mut self, source: Arc<dyn ChoiceSource>) {
        for (question, by_url) in self.model.remote_choice_sources() {
            let source = Arc::clone(&source);
            let tx = self.controller.tx.clone();
            let handle = tokio::spawn(async move {
                let result = source
                    .fetch_choices(&by_url)
                    .await
                    .map_err(|e| e.to_string());
                let _ = tx.send(HostMessage::ChoicesLoaded { question, result });
            });
            self.controller.track(handle);
        }
    }

    /// Apply messages posted by background tasks. Returns true if any arrived.
    pub fn process_messages(&mut self) -> bool {
        let mut handled = false;
        while let Ok(message) = self.rx.try_recv() {
            handled = true;
            match message {
                HostMessage::Ready => self.controller.set_ready(),
                HostMessage::ChoicesLoaded { question, result } => match result {
                    Ok(choices) => {
                        tracing::info!("Loaded {} choices for {question}", choices.len());
                        self.model.set_remote_choices(&question, choices);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load choices for {question}: {e}");
                        self.model.set_remote_choices(&question, Vec::new());
                    }
                },
            }
        }
        handled
    }
}
