//! Survey engine
//!
//! This module evaluates a declarative questionnaire against the user's answers:
//! - `definition`: the document format and the embedded ERAT questionnaire
//! - `expression`: predicate language for visibility, validators and triggers
//! - `answers`: answer values and the answer set
//! - `validation`: required and expression checks
//! - `upload`: file attachment inspection and constraints
//! - `model`: runtime state, navigation and lifecycle events

mod answers;
mod definition;
mod expression;
mod model;
mod upload;
mod validation;

pub use answers::{AnswerSet, AnswerValue};
pub use definition::{Choice, ChoicesByUrl, Element, ElementKind, SurveyDefinition};
pub use model::{
    Advance, NavigationError, PageChange, PageMode, SurveyEvents, SurveyModel, UploadRequest,
};
pub use upload::{inspect, UploadError};
pub use validation::{ValidationError, ValidationReport};
