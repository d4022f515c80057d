//! Declarative questionnaire document
//!
//! The document format follows the common JSON survey layout: a list of pages,
//! each holding typed elements, plus document-level triggers and button texts.

use super::expression::Expression;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// The ERAT intake questionnaire, embedded at build time
const ERAT_SURVEY_JSON: &str = include_str!("../../assets/erat_survey.json");

/// Errors raised while loading a survey document
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("invalid survey document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expression '{expression}' references unknown name '{name}'")]
    UnknownReference { expression: String, name: String },
    #[error("duplicate question name '{0}'")]
    DuplicateQuestion(String),
    #[error("duplicate page name '{0}'")]
    DuplicatePage(String),
}

/// A selectable choice
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ChoiceRepr")]
pub struct Choice {
    pub value: String,
    pub text: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChoiceRepr {
    Plain(String),
    Detailed { value: String, text: Option<String> },
}

impl From<ChoiceRepr> for Choice {
    fn from(repr: ChoiceRepr) -> Self {
        match repr {
            ChoiceRepr::Plain(value) => Self {
                text: value.clone(),
                value,
            },
            ChoiceRepr::Detailed { value, text } => Self {
                text: text.unwrap_or_else(|| value.clone()),
                value,
            },
        }
    }
}

/// Remote choice source for a dropdown
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoicesByUrl {
    pub url: String,
    pub value_name: String,
    pub title_name: String,
}

/// Per-question validator
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Validator {
    Expression {
        expression: Expression,
        #[serde(default)]
        text: Option<String>,
    },
}

/// Document-level trigger
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Trigger {
    /// Writes `set_value` into `set_to_name` whenever `expression` holds
    #[serde(rename = "runExpression", rename_all = "camelCase")]
    RunExpression {
        expression: Expression,
        set_to_name: String,
        set_value: serde_json::Value,
    },
}

impl Trigger {
    pub fn expression(&self) -> &Expression {
        match self {
            Trigger::RunExpression { expression, .. } => expression,
        }
    }
}

/// Type-specific attributes
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Html {
        html: String,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        image_link: String,
        #[serde(default)]
        image_fit: Option<String>,
    },
    Panel {
        #[serde(default)]
        elements: Vec<Element>,
    },
    Checkbox {
        choices: Vec<Choice>,
    },
    Radiogroup {
        choices: Vec<Choice>,
    },
    #[serde(rename_all = "camelCase")]
    Dropdown {
        #[serde(default)]
        choices: Vec<Choice>,
        #[serde(default)]
        choices_by_url: Option<ChoicesByUrl>,
        #[serde(default)]
        multi_select: bool,
    },
    #[serde(rename_all = "camelCase")]
    File {
        #[serde(default)]
        max_size: Option<u64>,
        #[serde(default)]
        accepted_types: Option<String>,
        #[serde(default)]
        store_data_as_text: bool,
        #[serde(default)]
        allow_multiple: bool,
    },
}

/// A page element: content, container or question
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub visible_if: Option<Expression>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default)]
    pub validators: Vec<Validator>,
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Questions hold answers; html, image and panel elements do not
    pub fn is_question(&self) -> bool {
        !matches!(
            self.kind,
            ElementKind::Html { .. } | ElementKind::Image { .. } | ElementKind::Panel { .. }
        )
    }

    /// Title shown to the user, falling back to the name
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Static choices (empty for non-choice elements)
    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            ElementKind::Checkbox { choices }
            | ElementKind::Radiogroup { choices }
            | ElementKind::Dropdown { choices, .. } => choices,
            _ => &[],
        }
    }

    /// Nested elements of a panel
    pub fn children(&self) -> &[Element] {
        match &self.kind {
            ElementKind::Panel { elements } => elements,
            _ => &[],
        }
    }

    /// Whether the answer is a list of values
    pub fn is_multi_value(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Checkbox { .. } | ElementKind::Dropdown { multi_select: true, .. }
        )
    }

    /// Accepted MIME types of a file question, split from the comma list
    pub fn accepted_types(&self) -> Vec<&str> {
        match &self.kind {
            ElementKind::File {
                accepted_types: Some(types),
                ..
            } => types
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// This element followed by all nested elements, depth first
    pub fn flatten(&self) -> Vec<&Element> {
        let mut out = vec![self];
        for child in self.children() {
            out.extend(child.flatten());
        }
        out
    }

    fn expressions(&self) -> impl Iterator<Item = &Expression> {
        self.visible_if
            .iter()
            .chain(self.validators.iter().map(|v| match v {
                Validator::Expression { expression, .. } => expression,
            }))
    }
}

/// A page of the questionnaire
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDefinition {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub visible_if: Option<Expression>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl PageDefinition {
    /// All elements on the page including panel contents
    pub fn all_elements(&self) -> Vec<&Element> {
        self.elements.iter().flat_map(Element::flatten).collect()
    }

    pub fn questions(&self) -> impl Iterator<Item = &Element> {
        self.all_elements().into_iter().filter(|e| e.is_question())
    }
}

fn default_prev_text() -> String {
    "Previous".to_string()
}

fn default_next_text() -> String {
    "Next".to_string()
}

fn default_complete_text() -> String {
    "Complete".to_string()
}

/// The full questionnaire document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyDefinition {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub pages: Vec<PageDefinition>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    #[serde(default)]
    pub show_question_numbers: Option<String>,
    #[serde(default)]
    pub completed_html: Option<String>,
    #[serde(default)]
    pub start_survey_text: Option<String>,
    #[serde(default = "default_prev_text")]
    pub page_prev_text: String,
    #[serde(default = "default_next_text")]
    pub page_next_text: String,
    #[serde(default = "default_complete_text")]
    pub complete_text: String,
}

impl SurveyDefinition {
    /// Load the embedded ERAT questionnaire
    pub fn erat() -> Result<Self, DefinitionError> {
        Self::from_json(ERAT_SURVEY_JSON)
    }

    /// Parse a document and check its internal references
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let definition: SurveyDefinition = serde_json::from_str(json)?;
        definition.check_references()?;
        Ok(definition)
    }

    /// Find a question by name anywhere in the document
    pub fn question(&self, name: &str) -> Option<&Element> {
        self.pages
            .iter()
            .flat_map(|p| p.all_elements())
            .find(|e| e.is_question() && e.name == name)
    }

    /// Every question in document order
    pub fn questions(&self) -> Vec<&Element> {
        self.pages.iter().flat_map(|p| p.questions()).collect()
    }

    #[cfg(test)]
    pub fn page_index(&self, name: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.name == name)
    }

    /// Verify name uniqueness and that every expression only reads known names.
    ///
    /// Content elements (html, image, panel) may repeat names; questions may not.
    pub fn check_references(&self) -> Result<(), DefinitionError> {
        let mut page_names = HashSet::new();
        for page in &self.pages {
            if !page_names.insert(page.name.as_str()) {
                return Err(DefinitionError::DuplicatePage(page.name.clone()));
            }
        }

        let mut known: HashSet<&str> = HashSet::new();
        let mut question_names = HashSet::new();
        for element in self.pages.iter().flat_map(|p| p.all_elements()) {
            if element.is_question() && !question_names.insert(element.name.as_str()) {
                return Err(DefinitionError::DuplicateQuestion(element.name.clone()));
            }
            known.insert(element.name.as_str());
        }
        for trigger in &self.triggers {
            match trigger {
                Trigger::RunExpression { set_to_name, .. } => known.insert(set_to_name.as_str()),
            };
        }

        let page_expressions = self.pages.iter().filter_map(|p| p.visible_if.as_ref());
        let element_expressions = self
            .pages
            .iter()
            .flat_map(|p| p.all_elements())
            .flat_map(|e| e.expressions());
        let trigger_expressions = self.triggers.iter().map(Trigger::expression);

        for expression in page_expressions
            .chain(element_expressions)
            .chain(trigger_expressions)
        {
            if let Some(name) = expression
                .variables()
                .into_iter()
                .find(|name| !known.contains(name))
            {
                return Err(DefinitionError::UnknownReference {
                    expression: expression.source().to_string(),
                    name: name.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    mod erat_document {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_loads() {
            let survey = SurveyDefinition::erat().unwrap();
            assert_eq!(survey.title, "Epidemiological Risk Assessment Tool (ERAT)");
            assert_eq!(survey.page_prev_text, "Back");
            assert_eq!(survey.page_next_text, "Next");
            assert_eq!(survey.show_question_numbers.as_deref(), Some("off"));
        }

        #[test]
        fn test_page_order() {
            let survey = SurveyDefinition::erat().unwrap();
            let names: Vec<&str> = survey.pages.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(
                names,
                vec![
                    "welcome_page",
                    "instructions_page",
                    "confirmation_page",
                    "eligibility",
                    "passport_upload",
                    "account_status",
                    "health_information",
                    "travel_history",
                    "vaccination_status",
                ]
            );
        }

        #[test]
        fn test_question_order() {
            let survey = SurveyDefinition::erat().unwrap();
            let names: Vec<&str> = survey.questions().iter().map(|q| q.name.as_str()).collect();
            assert_eq!(
                names,
                vec![
                    "confirmEligibility",
                    "passportFront",
                    "passportBack",
                    "recentSymptoms",
                    "healthConditions",
                    "internationalTravel",
                    "visitedCountries",
                    "covidVaccine",
                    "boosterShot",
                ]
            );
        }

        #[test]
        fn test_account_status_page_is_conditional() {
            let survey = SurveyDefinition::erat().unwrap();
            let page = &survey.pages[survey.page_index("account_status").unwrap()];
            assert_eq!(
                page.visible_if.as_ref().map(|e| e.source()),
                Some("{accountStatusLoaded} = true")
            );
        }

        #[test]
        fn test_trigger() {
            let survey = SurveyDefinition::erat().unwrap();
            assert_eq!(survey.triggers.len(), 1);
            let Trigger::RunExpression {
                expression,
                set_to_name,
                set_value,
            } = &survey.triggers[0];
            assert_eq!(
                expression.source(),
                "{passportFront} notempty and {passportBack} notempty"
            );
            assert_eq!(set_to_name, "accountStatusLoaded");
            assert_eq!(set_value, &serde_json::Value::Bool(true));
        }

        #[test]
        fn test_file_constraints() {
            let survey = SurveyDefinition::erat().unwrap();
            for name in ["passportFront", "passportBack"] {
                let question = survey.question(name).unwrap();
                assert_eq!(question.accepted_types(), vec!["image/jpeg", "image/png"]);
                match &question.kind {
                    ElementKind::File {
                        max_size,
                        store_data_as_text,
                        ..
                    } => {
                        assert_eq!(*max_size, Some(1_024_000));
                        assert!(!store_data_as_text);
                    }
                    other => panic!("unexpected kind {other:?}"),
                }
            }
        }

        #[test]
        fn test_choice_forms() {
            let survey = SurveyDefinition::erat().unwrap();
            let eligibility = survey.question("confirmEligibility").unwrap();
            assert_eq!(
                eligibility.choices()[0],
                Choice::new("age", "I am 18 years of age or older.")
            );
            let travel = survey.question("internationalTravel").unwrap();
            assert_eq!(travel.choices()[1], Choice::new("No", "No"));
        }

        #[test]
        fn test_country_dropdown() {
            let survey = SurveyDefinition::erat().unwrap();
            let countries = survey.question("visitedCountries").unwrap();
            assert!(countries.is_multi_value());
            assert!(countries.is_required);
            match &countries.kind {
                ElementKind::Dropdown { choices_by_url, .. } => {
                    let source = choices_by_url.as_ref().unwrap();
                    assert_eq!(source.url, "https://restcountries.com/v3.1/all");
                    assert_eq!(source.value_name, "name.common");
                    assert_eq!(source.title_name, "name.common");
                }
                other => panic!("unexpected kind {other:?}"),
            }
        }

        #[test]
        fn test_panel_children_are_flattened() {
            let survey = SurveyDefinition::erat().unwrap();
            let page = &survey.pages[1];
            let names: Vec<&str> = page.all_elements().iter().map(|e| e.name.as_str()).collect();
            assert_eq!(
                names,
                vec![
                    "instructionsHeader",
                    "instructionsPanel",
                    "instruction1",
                    "instruction2",
                    "instruction3",
                    "nextStepInfo",
                ]
            );
        }
    }

    mod reference_checks {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_unknown_reference_rejected() {
            let json = r#"{
                "pages": [{
                    "name": "p1",
                    "elements": [{
                        "type": "radiogroup", "name": "a", "choices": ["x"],
                        "visibleIf": "{missing} = 'x'"
                    }]
                }]
            }"#;
            match SurveyDefinition::from_json(json) {
                Err(DefinitionError::UnknownReference { name, .. }) => assert_eq!(name, "missing"),
                other => panic!("expected unknown reference, got {other:?}"),
            }
        }

        #[test]
        fn test_trigger_target_counts_as_known() {
            let json = r#"{
                "pages": [{
                    "name": "p1",
                    "visibleIf": "{flag} = true",
                    "elements": [{"type": "radiogroup", "name": "a", "choices": ["x"]}]
                }],
                "triggers": [{
                    "type": "runExpression", "expression": "{a} notempty",
                    "setToName": "flag", "setValue": true
                }]
            }"#;
            assert!(SurveyDefinition::from_json(json).is_ok());
        }

        #[test]
        fn test_duplicate_question_rejected() {
            let json = r#"{
                "pages": [{
                    "name": "p1",
                    "elements": [
                        {"type": "radiogroup", "name": "a", "choices": ["x"]},
                        {"type": "checkbox", "name": "a", "choices": ["y"]}
                    ]
                }]
            }"#;
            assert!(matches!(
                SurveyDefinition::from_json(json),
                Err(DefinitionError::DuplicateQuestion(name)) if name == "a"
            ));
        }

        #[test]
        fn test_duplicate_html_names_allowed() {
            let json = r#"{
                "pages": [
                    {"name": "p1", "elements": [{"type": "html", "name": "info", "html": "a"}]},
                    {"name": "p2", "elements": [{"type": "html", "name": "info", "html": "b"}]}
                ]
            }"#;
            assert!(SurveyDefinition::from_json(json).is_ok());
        }

        #[test]
        fn test_bad_expression_is_parse_error() {
            let json = r#"{
                "pages": [{
                    "name": "p1", "visibleIf": "{a = 1",
                    "elements": [{"type": "radiogroup", "name": "a", "choices": ["x"]}]
                }]
            }"#;
            assert!(matches!(
                SurveyDefinition::from_json(json),
                Err(DefinitionError::Parse(_))
            ));
        }
    }
}
