//! Runtime survey model
//!
//! Evaluates the definition against the answer set: page visibility, triggers,
//! validation and navigation. Lifecycle notifications go to a [`SurveyEvents`]
//! implementation supplied by the caller for each operation.

use super::answers::{AnswerSet, AnswerValue, FileAttachment};
use super::definition::{Choice, ChoicesByUrl, Element, ElementKind, SurveyDefinition, Trigger};
use super::upload::{check_constraints, UploadError};
use super::validation::{validate_question, ValidationReport};
use std::collections::HashMap;
use thiserror::Error;

/// Why a navigation request was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("{0}")]
    Invalid(ValidationReport),
    #[error("the survey is already completed")]
    Completed,
    #[error("already on the first page")]
    NoPreviousPage,
}

/// How pages are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageMode {
    #[default]
    Paged,
    /// Remaining pages are shown as one continuous page
    SinglePage,
}

/// A pending move between visible pages, reported before it is applied.
///
/// Indices are positions in the list of visible pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChange {
    pub from: usize,
    pub to: usize,
}

impl PageChange {
    pub fn is_forward(&self) -> bool {
        self.to > self.from
    }
}

/// Files attached to a question
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub question: String,
    pub files: Vec<FileAttachment>,
}

/// Result of a successful forward navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    PageChanged(PageChange),
    Completed,
}

/// Lifecycle notifications raised by the model
#[cfg_attr(test, mockall::automock)]
pub trait SurveyEvents {
    /// Raised before the current page changes; the model may be adjusted here
    fn on_current_page_changing(&mut self, survey: &mut SurveyModel, change: &PageChange);

    /// Raised when files are attached to a file question
    fn on_upload_files(&mut self, survey: &SurveyModel, upload: &UploadRequest);

    /// Raised once the final page is submitted
    fn on_complete(&mut self, survey: &SurveyModel);
}

/// Survey state driven by user input
#[derive(Debug, Clone)]
pub struct SurveyModel {
    definition: SurveyDefinition,
    answers: AnswerSet,
    /// Index into `definition.pages`
    current_page: usize,
    mode: PageMode,
    completed: bool,
    remote_choices: HashMap<String, Vec<Choice>>,
}

impl SurveyModel {
    pub fn new(definition: SurveyDefinition) -> Self {
        let mut model = Self {
            definition,
            answers: AnswerSet::new(),
            current_page: 0,
            mode: PageMode::Paged,
            completed: false,
            remote_choices: HashMap::new(),
        };
        model.current_page = model.visible_pages().first().copied().unwrap_or(0);
        model
    }

    pub fn definition(&self) -> &SurveyDefinition {
        &self.definition
    }

    /// The answer set
    pub fn data(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn mode(&self) -> PageMode {
        self.mode
    }

    pub fn is_single_page(&self) -> bool {
        self.mode == PageMode::SinglePage
    }

    /// Switch to single-page presentation. There is no way back.
    pub fn set_single_page(&mut self) {
        self.mode = PageMode::SinglePage;
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    // --- Visibility -------------------------------------------------------

    pub fn is_element_visible(&self, element: &Element) -> bool {
        element
            .visible_if
            .as_ref()
            .map_or(true, |predicate| predicate.eval(&self.answers))
    }

    /// Visible elements of a page in render order, skipping the contents of hidden panels
    pub fn visible_elements(&self, page_index: usize) -> Vec<&Element> {
        fn collect<'a>(model: &SurveyModel, elements: &'a [Element], out: &mut Vec<&'a Element>) {
            for element in elements {
                if model.is_element_visible(element) {
                    out.push(element);
                    collect(model, element.children(), out);
                }
            }
        }

        let mut out = Vec::new();
        if let Some(page) = self.definition.pages.get(page_index) {
            collect(self, &page.elements, &mut out);
        }
        out
    }

    pub fn is_page_visible(&self, page_index: usize) -> bool {
        let Some(page) = self.definition.pages.get(page_index) else {
            return false;
        };
        let predicate_holds = page
            .visible_if
            .as_ref()
            .map_or(true, |predicate| predicate.eval(&self.answers));
        predicate_holds
            && self
                .visible_elements(page_index)
                .iter()
                .any(|e| !matches!(e.kind, ElementKind::Panel { .. }))
    }

    /// Indices of visible pages, in document order
    pub fn visible_pages(&self) -> Vec<usize> {
        (0..self.definition.pages.len())
            .filter(|i| self.is_page_visible(*i))
            .collect()
    }

    /// Number of visible pages
    pub fn page_count(&self) -> usize {
        self.visible_pages().len()
    }

    /// Position of the current page among visible pages
    pub fn current_page_no(&self) -> usize {
        let visible = self.visible_pages();
        visible
            .iter()
            .position(|i| *i == self.current_page)
            .unwrap_or_else(|| visible.iter().filter(|i| **i < self.current_page).count())
    }

    pub fn current_page_name(&self) -> &str {
        self.definition
            .pages
            .get(self.current_page)
            .map(|p| p.name.as_str())
            .unwrap_or_default()
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page_no() == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page_no() + 1 >= self.page_count()
    }

    /// Pages currently on screen: the current page, or every remaining
    /// visible page in single-page mode
    pub fn pages_in_view(&self) -> Vec<usize> {
        match self.mode {
            PageMode::Paged => vec![self.current_page],
            PageMode::SinglePage => self
                .visible_pages()
                .into_iter()
                .filter(|i| *i >= self.current_page)
                .collect(),
        }
    }

    /// Visible questions on screen, in order
    pub fn questions_in_view(&self) -> Vec<&Element> {
        self.pages_in_view()
            .into_iter()
            .flat_map(|p| self.visible_elements(p))
            .filter(|e| e.is_question())
            .collect()
    }

    fn is_question_visible(&self, name: &str) -> bool {
        self.definition.pages.iter().enumerate().any(|(i, _)| {
            self.is_page_visible(i)
                && self
                    .visible_elements(i)
                    .iter()
                    .any(|e| e.is_question() && e.name == name)
        })
    }

    // --- Choices ----------------------------------------------------------

    /// Choices for a question, preferring remotely loaded ones
    pub fn choices(&self, question: &Element) -> Vec<Choice> {
        self.remote_choices
            .get(&question.name)
            .cloned()
            .unwrap_or_else(|| question.choices().to_vec())
    }

    /// Questions whose choices come from a URL
    pub fn remote_choice_sources(&self) -> Vec<(String, ChoicesByUrl)> {
        self.definition
            .questions()
            .into_iter()
            .filter_map(|q| match &q.kind {
                ElementKind::Dropdown {
                    choices_by_url: Some(source),
                    ..
                } => Some((q.name.clone(), source.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn set_remote_choices(&mut self, question: &str, choices: Vec<Choice>) {
        self.remote_choices.insert(question.to_string(), choices);
    }

    pub fn has_remote_choices(&self, question: &str) -> bool {
        self.remote_choices.contains_key(question)
    }

    // --- Values -----------------------------------------------------------

    /// Store an answer and re-run triggers
    pub fn set_value(&mut self, name: &str, value: AnswerValue) {
        self.answers.set(name, value);
        self.run_triggers();
    }

    pub fn clear_value(&mut self, name: &str) {
        self.answers.remove(name);
        self.run_triggers();
    }

    /// Select the single value of a radio group (or single-select dropdown)
    pub fn select_choice(&mut self, name: &str, value: &str) {
        self.set_value(name, AnswerValue::Text(value.to_string()));
    }

    /// Add or remove a value of a multi-select question
    pub fn toggle_choice(&mut self, name: &str, value: &str) {
        let mut selected = self.answers.list(name).to_vec();
        if let Some(pos) = selected.iter().position(|v| v == value) {
            selected.remove(pos);
        } else {
            selected.push(value.to_string());
        }
        self.set_value(name, AnswerValue::List(selected));
    }

    fn run_triggers(&mut self) {
        for trigger in &self.definition.triggers {
            match trigger {
                Trigger::RunExpression {
                    expression,
                    set_to_name,
                    set_value,
                } => {
                    if !expression.eval(&self.answers) {
                        continue;
                    }
                    if let Some(value) = AnswerValue::from_json(set_value) {
                        if self.answers.get(set_to_name) != Some(&value) {
                            tracing::debug!(
                                "Trigger '{}' set {} = {}",
                                expression,
                                set_to_name,
                                value.display()
                            );
                        }
                        self.answers.set(set_to_name, value);
                    }
                }
            }
        }
    }

    /// Attach files to a file question.
    ///
    /// Every file must pass the question's constraints; on success
    /// `on_upload_files` is raised and the attachments become the answer.
    pub fn upload_files(
        &mut self,
        question: &str,
        files: Vec<FileAttachment>,
        events: &mut dyn SurveyEvents,
    ) -> Result<(), UploadError> {
        if self.completed {
            return Err(UploadError::Completed);
        }
        let element = self
            .definition
            .question(question)
            .filter(|q| matches!(q.kind, ElementKind::File { .. }))
            .ok_or_else(|| UploadError::UnknownQuestion(question.to_string()))?;

        for file in &files {
            check_constraints(element, file)?;
        }

        let request = UploadRequest {
            question: question.to_string(),
            files,
        };
        events.on_upload_files(self, &request);
        self.set_value(question, AnswerValue::Files(request.files));
        Ok(())
    }

    // --- Validation & navigation -------------------------------------------

    /// Validate every visible question on screen
    pub fn validate_current(&self) -> ValidationReport {
        ValidationReport {
            errors: self
                .questions_in_view()
                .into_iter()
                .filter_map(|q| validate_question(q, &self.answers))
                .collect(),
        }
    }

    /// Validate and move forward, completing on the last page.
    ///
    /// `on_current_page_changing` runs before the move is applied.
    pub fn next_page(&mut self, events: &mut dyn SurveyEvents) -> Result<Advance, NavigationError> {
        if self.completed {
            return Err(NavigationError::Completed);
        }
        let report = self.validate_current();
        if !report.is_empty() {
            return Err(NavigationError::Invalid(report));
        }

        if self.is_single_page() || self.is_last_page() {
            self.complete(events);
            return Ok(Advance::Completed);
        }

        let from = self.current_page_no();
        let change = PageChange { from, to: from + 1 };
        self.change_page(change, events);
        Ok(Advance::PageChanged(change))
    }

    /// Move back one page without validating
    pub fn prev_page(
        &mut self,
        events: &mut dyn SurveyEvents,
    ) -> Result<PageChange, NavigationError> {
        if self.completed {
            return Err(NavigationError::Completed);
        }
        if self.is_single_page() || self.is_first_page() {
            return Err(NavigationError::NoPreviousPage);
        }

        let from = self.current_page_no();
        let change = PageChange { from, to: from - 1 };
        self.change_page(change, events);
        Ok(change)
    }

    fn change_page(&mut self, change: PageChange, events: &mut dyn SurveyEvents) {
        events.on_current_page_changing(self, &change);
        if let Some(target) = self.visible_pages().get(change.to) {
            self.current_page = *target;
        }
    }

    /// Drop answers of hidden questions, mark complete and raise `on_complete`
    fn complete(&mut self, events: &mut dyn SurveyEvents) {
        let hidden: Vec<String> = self
            .definition
            .questions()
            .into_iter()
            .map(|q| q.name.clone())
            .filter(|name| self.answers.get(name).is_some() && !self.is_question_visible(name))
            .collect();
        for name in hidden {
            self.answers.remove(&name);
        }

        self.completed = true;
        events.on_complete(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Records events and optionally collapses pages like the host does
    #[derive(Default)]
    struct Recorder {
        changes: Vec<PageChange>,
        uploads: Vec<UploadRequest>,
        completed_with: Option<AnswerSet>,
        collapse_at_second_to_last: bool,
    }

    impl SurveyEvents for Recorder {
        fn on_current_page_changing(&mut self, survey: &mut SurveyModel, change: &PageChange) {
            self.changes.push(*change);
            if self.collapse_at_second_to_last && survey.current_page_no() + 2 == survey.page_count()
            {
                survey.set_single_page();
            }
        }

        fn on_upload_files(&mut self, _survey: &SurveyModel, upload: &UploadRequest) {
            self.uploads.push(upload.clone());
        }

        fn on_complete(&mut self, survey: &SurveyModel) {
            self.completed_with = Some(survey.data().clone());
        }
    }

    fn model() -> SurveyModel {
        SurveyModel::new(SurveyDefinition::erat().unwrap())
    }

    fn png(name: &str) -> Vec<FileAttachment> {
        vec![FileAttachment {
            name: name.into(),
            mime: "image/png".into(),
            size: 2048,
        }]
    }

    /// Answer pages up to and including the passport upload
    fn through_passports(model: &mut SurveyModel, events: &mut Recorder) {
        for _ in 0..3 {
            model.next_page(events).unwrap();
        }
        model.toggle_choice("confirmEligibility", "age");
        model.toggle_choice("confirmEligibility", "consent");
        model.next_page(events).unwrap();
        assert_eq!(model.current_page_name(), "passport_upload");
        model.upload_files("passportFront", png("front.png"), events).unwrap();
        model.upload_files("passportBack", png("back.png"), events).unwrap();
        model.next_page(events).unwrap();
    }

    mod visibility {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_account_status_hidden_initially() {
            let model = model();
            let account = model.definition().page_index("account_status").unwrap();
            assert!(!model.is_page_visible(account));
            assert_eq!(model.page_count(), 8);
        }

        #[test]
        fn test_one_passport_keeps_account_status_hidden() {
            let mut model = model();
            let mut events = Recorder::default();
            model.upload_files("passportFront", png("front.png"), &mut events).unwrap();
            let account = model.definition().page_index("account_status").unwrap();
            assert!(!model.is_page_visible(account));
            assert!(model.data().get("accountStatusLoaded").is_none());
        }

        #[test]
        fn test_both_passports_reveal_account_status() {
            let mut model = model();
            let mut events = Recorder::default();
            model.upload_files("passportBack", png("back.png"), &mut events).unwrap();
            model.upload_files("passportFront", png("front.png"), &mut events).unwrap();
            let account = model.definition().page_index("account_status").unwrap();
            assert!(model.is_page_visible(account));
            assert_eq!(
                model.data().get("accountStatusLoaded"),
                Some(&AnswerValue::Bool(true))
            );
            assert_eq!(model.page_count(), 9);
        }

        #[test]
        fn test_trigger_value_is_not_reverted() {
            let mut model = model();
            let mut events = Recorder::default();
            model.upload_files("passportFront", png("front.png"), &mut events).unwrap();
            model.upload_files("passportBack", png("back.png"), &mut events).unwrap();
            model.clear_value("passportBack");
            assert_eq!(
                model.data().get("accountStatusLoaded"),
                Some(&AnswerValue::Bool(true))
            );
        }

        #[test]
        fn test_visited_countries_follows_travel_answer() {
            let mut model = model();
            let page = model.definition().page_index("travel_history").unwrap();
            let names = |m: &SurveyModel| -> Vec<String> {
                m.visible_elements(page).iter().map(|e| e.name.clone()).collect()
            };

            assert_eq!(names(&model), vec!["internationalTravel"]);
            model.select_choice("internationalTravel", "Yes");
            assert_eq!(names(&model), vec!["internationalTravel", "visitedCountries"]);
            model.select_choice("internationalTravel", "No");
            assert_eq!(names(&model), vec!["internationalTravel"]);
        }

        #[test]
        fn test_booster_follows_vaccine_answer() {
            let mut model = model();
            let page = model.definition().page_index("vaccination_status").unwrap();
            assert_eq!(model.visible_elements(page).len(), 1);
            model.select_choice("covidVaccine", "Yes");
            assert_eq!(model.visible_elements(page).len(), 2);
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_starts_on_welcome_page() {
            let model = model();
            assert_eq!(model.current_page_name(), "welcome_page");
            assert!(model.is_first_page());
            assert_eq!(model.mode(), PageMode::Paged);
        }

        #[test]
        fn test_info_pages_advance_without_answers() {
            let mut model = model();
            let mut events = Recorder::default();
            for _ in 0..3 {
                model.next_page(&mut events).unwrap();
            }
            assert_eq!(model.current_page_name(), "eligibility");
            assert_eq!(
                events.changes,
                vec![
                    PageChange { from: 0, to: 1 },
                    PageChange { from: 1, to: 2 },
                    PageChange { from: 2, to: 3 },
                ]
            );
        }

        #[test]
        fn test_required_blocks_advance() {
            let mut model = model();
            let mut events = Recorder::default();
            for _ in 0..3 {
                model.next_page(&mut events).unwrap();
            }
            match model.next_page(&mut events) {
                Err(NavigationError::Invalid(report)) => {
                    assert_eq!(report.errors.len(), 1);
                    assert_eq!(report.errors[0].question, "confirmEligibility");
                }
                other => panic!("expected validation failure, got {other:?}"),
            }
            assert_eq!(model.current_page_name(), "eligibility");
        }

        #[test]
        fn test_single_eligibility_box_blocks_advance() {
            let mut model = model();
            let mut events = Recorder::default();
            for _ in 0..3 {
                model.next_page(&mut events).unwrap();
            }
            model.toggle_choice("confirmEligibility", "age");
            assert!(matches!(
                model.next_page(&mut events),
                Err(NavigationError::Invalid(_))
            ));
            model.toggle_choice("confirmEligibility", "consent");
            assert!(model.next_page(&mut events).is_ok());
        }

        #[test]
        fn test_passports_lead_to_account_status() {
            let mut model = model();
            let mut events = Recorder::default();
            through_passports(&mut model, &mut events);
            assert_eq!(model.current_page_name(), "account_status");
        }

        #[test]
        fn test_without_passports_account_status_is_skipped() {
            let mut model = model();
            let mut events = Recorder::default();
            for _ in 0..3 {
                model.next_page(&mut events).unwrap();
            }
            model.toggle_choice("confirmEligibility", "age");
            model.toggle_choice("confirmEligibility", "consent");
            model.next_page(&mut events).unwrap();
            model.next_page(&mut events).unwrap();
            assert_eq!(model.current_page_name(), "health_information");
        }

        #[test]
        fn test_prev_page() {
            let mut model = model();
            let mut events = Recorder::default();
            assert_eq!(
                model.prev_page(&mut events),
                Err(NavigationError::NoPreviousPage)
            );
            model.next_page(&mut events).unwrap();
            let change = model.prev_page(&mut events).unwrap();
            assert!(!change.is_forward());
            assert_eq!(model.current_page_name(), "welcome_page");
        }

        #[test]
        fn test_travel_yes_requires_countries() {
            let mut model = model();
            let mut events = Recorder::default();
            through_passports(&mut model, &mut events);
            model.next_page(&mut events).unwrap();
            model.select_choice("recentSymptoms", "Fever");
            model.next_page(&mut events).unwrap();
            assert_eq!(model.current_page_name(), "travel_history");

            model.select_choice("internationalTravel", "Yes");
            match model.next_page(&mut events) {
                Err(NavigationError::Invalid(report)) => {
                    assert!(report.for_question("visitedCountries").is_some())
                }
                other => panic!("expected validation failure, got {other:?}"),
            }

            model.toggle_choice("visitedCountries", "Peru");
            assert!(model.next_page(&mut events).is_ok());
        }
    }

    mod collapse_and_completion {
        use super::*;
        use pretty_assertions::assert_eq;

        fn to_travel_page(model: &mut SurveyModel, events: &mut Recorder) {
            through_passports(model, events);
            model.next_page(events).unwrap();
            model.select_choice("recentSymptoms", "Cough");
            model.next_page(events).unwrap();
        }

        #[test]
        fn test_advancing_from_second_to_last_collapses() {
            let mut model = model();
            let mut events = Recorder {
                collapse_at_second_to_last: true,
                ..Default::default()
            };
            to_travel_page(&mut model, &mut events);
            assert_eq!(model.mode(), PageMode::Paged);

            model.select_choice("internationalTravel", "No");
            model.next_page(&mut events).unwrap();
            assert!(model.is_single_page());
            assert_eq!(model.current_page_name(), "vaccination_status");
            assert_eq!(
                model.prev_page(&mut events),
                Err(NavigationError::NoPreviousPage)
            );
        }

        #[test]
        fn test_single_page_next_completes() {
            let mut model = model();
            let mut events = Recorder {
                collapse_at_second_to_last: true,
                ..Default::default()
            };
            to_travel_page(&mut model, &mut events);
            model.select_choice("internationalTravel", "No");
            model.next_page(&mut events).unwrap();

            model.select_choice("covidVaccine", "No");
            assert_eq!(model.next_page(&mut events), Ok(Advance::Completed));
            assert!(model.is_completed());
            assert_eq!(
                model.next_page(&mut events),
                Err(NavigationError::Completed)
            );
        }

        #[test]
        fn test_completion_drops_hidden_answers() {
            let mut model = model();
            let mut events = Recorder::default();
            to_travel_page(&mut model, &mut events);
            model.select_choice("internationalTravel", "Yes");
            model.toggle_choice("visitedCountries", "Chile");
            model.select_choice("internationalTravel", "No");
            model.next_page(&mut events).unwrap();
            model.select_choice("covidVaccine", "Yes");
            model.select_choice("boosterShot", "No");
            model.next_page(&mut events).unwrap();

            let data = events.completed_with.expect("completion raised");
            let names: Vec<&str> = data.names().collect();
            assert_eq!(
                names,
                vec![
                    "accountStatusLoaded",
                    "boosterShot",
                    "confirmEligibility",
                    "covidVaccine",
                    "internationalTravel",
                    "passportBack",
                    "passportFront",
                    "recentSymptoms",
                ]
            );
        }

        #[test]
        fn test_upload_after_completion_rejected() {
            let mut model = model();
            let mut events = Recorder::default();
            to_travel_page(&mut model, &mut events);
            model.select_choice("internationalTravel", "No");
            model.next_page(&mut events).unwrap();
            model.select_choice("covidVaccine", "No");
            model.next_page(&mut events).unwrap();
            assert!(matches!(
                model.upload_files("passportFront", png("x.png"), &mut events),
                Err(UploadError::Completed)
            ));
        }
    }

    mod uploads {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_upload_raises_event_and_stores_value() {
            let mut model = model();
            let mut events = MockSurveyEvents::new();
            events
                .expect_on_upload_files()
                .withf(|_, upload| upload.question == "passportFront" && upload.files.len() == 1)
                .times(1)
                .return_const(());

            model
                .upload_files("passportFront", png("front.png"), &mut events)
                .unwrap();
            assert!(model.data().is_answered("passportFront"));
        }

        #[test]
        fn test_rejected_upload_raises_nothing() {
            let mut model = model();
            let mut events = MockSurveyEvents::new();
            events.expect_on_upload_files().never();

            let result = model.upload_files(
                "passportFront",
                vec![FileAttachment {
                    name: "scan.pdf".into(),
                    mime: "application/pdf".into(),
                    size: 10,
                }],
                &mut events,
            );
            assert!(matches!(result, Err(UploadError::UnsupportedType { .. })));
            assert!(!model.data().is_answered("passportFront"));
        }

        #[test]
        fn test_upload_to_non_file_question() {
            let mut model = model();
            let mut events = MockSurveyEvents::new();
            assert!(matches!(
                model.upload_files("covidVaccine", png("a.png"), &mut events),
                Err(UploadError::UnknownQuestion(_))
            ));
        }
    }

    mod choices {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_remote_sources() {
            let model = model();
            let sources = model.remote_choice_sources();
            assert_eq!(sources.len(), 1);
            assert_eq!(sources[0].0, "visitedCountries");
        }

        #[test]
        fn test_remote_choices_override_static() {
            let mut model = model();
            let survey = model.definition().clone();
            let question = survey.question("visitedCountries").unwrap();
            assert!(model.choices(question).is_empty());
            model.set_remote_choices("visitedCountries", vec![Choice::new("Peru", "Peru")]);
            assert!(model.has_remote_choices("visitedCountries"));
            assert_eq!(model.choices(question), vec![Choice::new("Peru", "Peru")]);
        }

        #[test]
        fn test_toggle_choice_adds_and_removes() {
            let mut model = model();
            model.toggle_choice("healthConditions", "Diabetes");
            model.toggle_choice("healthConditions", "None");
            assert_eq!(model.data().list("healthConditions"), ["Diabetes", "None"]);
            model.toggle_choice("healthConditions", "Diabetes");
            assert_eq!(model.data().list("healthConditions"), ["None"]);
        }
    }
}
