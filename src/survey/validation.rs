//! Question validation: required answers and expression validators

use super::answers::AnswerSet;
use super::definition::{Element, Validator};
use std::fmt;

/// Message shown for an unanswered required question
pub const REQUIRED_MESSAGE: &str = "Response required.";

/// A failed check on a single question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub question: String,
    pub message: String,
}

/// All failures found on the pages being validated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First error for a question, if any
    pub fn for_question(&self, name: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.question == name)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "no validation errors"),
            [only] => write!(f, "{}: {}", only.question, only.message),
            [first, rest @ ..] => write!(
                f,
                "{}: {} (and {} more)",
                first.question,
                first.message,
                rest.len()
            ),
        }
    }
}

/// Check a single visible question.
///
/// Expression validators only run once the question has an answer;
/// an empty optional question is always valid.
pub fn validate_question(question: &Element, answers: &AnswerSet) -> Option<ValidationError> {
    let answered = answers.is_answered(&question.name);

    if question.is_required && !answered {
        return Some(ValidationError {
            question: question.name.clone(),
            message: REQUIRED_MESSAGE.to_string(),
        });
    }

    if !answered {
        return None;
    }

    question.validators.iter().find_map(|validator| match validator {
        Validator::Expression { expression, text } if !expression.eval(answers) => {
            Some(ValidationError {
                question: question.name.clone(),
                message: text.clone().unwrap_or_else(|| {
                    format!("The expression: {expression} should return 'true'.")
                }),
            })
        }
        Validator::Expression { .. } => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::answers::AnswerValue;
    use crate::survey::definition::SurveyDefinition;
    use pretty_assertions::assert_eq;

    fn eligibility() -> Element {
        SurveyDefinition::erat()
            .unwrap()
            .question("confirmEligibility")
            .unwrap()
            .clone()
    }

    #[test]
    fn test_required_unanswered() {
        let error = validate_question(&eligibility(), &AnswerSet::new()).unwrap();
        assert_eq!(error.message, REQUIRED_MESSAGE);
        assert_eq!(error.question, "confirmEligibility");
    }

    #[test]
    fn test_expression_validator_needs_both_boxes() {
        let mut answers = AnswerSet::new();
        answers.set("confirmEligibility", AnswerValue::List(vec!["age".into()]));
        let error = validate_question(&eligibility(), &answers).unwrap();
        assert_eq!(
            error.message,
            "The expression: {confirmEligibility.length} = 2 should return 'true'."
        );

        answers.set(
            "confirmEligibility",
            AnswerValue::List(vec!["age".into(), "consent".into()]),
        );
        assert!(validate_question(&eligibility(), &answers).is_none());
    }

    #[test]
    fn test_optional_unanswered_is_valid() {
        let survey = SurveyDefinition::erat().unwrap();
        let conditions = survey.question("healthConditions").unwrap();
        assert!(validate_question(conditions, &AnswerSet::new()).is_none());
    }

    #[test]
    fn test_report_display() {
        let report = ValidationReport {
            errors: vec![
                ValidationError {
                    question: "a".into(),
                    message: "bad".into(),
                },
                ValidationError {
                    question: "b".into(),
                    message: "worse".into(),
                },
            ],
        };
        assert_eq!(report.to_string(), "a: bad (and 1 more)");
        assert_eq!(report.for_question("b").unwrap().message, "worse");
    }
}
