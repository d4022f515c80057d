//! Trait abstraction for choice loading to enable mocking in tests

use crate::survey::{Choice, ChoicesByUrl};
use anyhow::Result;
use async_trait::async_trait;

/// Loads the choices a `choicesByUrl` question refers to
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChoiceSource: Send + Sync {
    /// Fetch and map the remote list into choices
    async fn fetch_choices(&self, source: &ChoicesByUrl) -> Result<Vec<Choice>>;
}
