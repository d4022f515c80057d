//! HTTP client for `choicesByUrl` sources
//!
//! Expects a JSON array of objects; `valueName` and `titleName` are dotted
//! paths into each object (e.g. `name.common`).

use super::traits::ChoiceSource;
use crate::survey::{Choice, ChoicesByUrl};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Fetches choice lists over HTTP
pub struct RestChoiceClient {
    http: Client,
    /// Replaces the URL from the document when set
    url_override: Option<String>,
}

impl RestChoiceClient {
    pub fn new(url_override: Option<String>) -> Self {
        Self {
            http: Client::new(),
            url_override,
        }
    }

    fn url_for<'a>(&'a self, source: &'a ChoicesByUrl) -> &'a str {
        self.url_override.as_deref().unwrap_or(&source.url)
    }
}

#[async_trait]
impl ChoiceSource for RestChoiceClient {
    async fn fetch_choices(&self, source: &ChoicesByUrl) -> Result<Vec<Choice>> {
        let url = self.url_for(source);
        tracing::info!("Fetching choices from {url}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to fetch choices from {url}: {e}"))?
            .error_for_status()?;
        let body: Value = response.json().await?;

        parse_choices(&body, &source.value_name, &source.title_name)
    }
}

/// Follow a dotted path (`name.common`) into a JSON object
fn lookup<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(item, |value, segment| value.get(segment))
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Map a JSON array into choices sorted by label, skipping entries without a value
pub fn parse_choices(body: &Value, value_name: &str, title_name: &str) -> Result<Vec<Choice>> {
    let items = body
        .as_array()
        .ok_or_else(|| anyhow!("Expected a JSON array of choices"))?;

    let mut choices: Vec<Choice> = items
        .iter()
        .filter_map(|item| {
            let value = lookup(item, value_name).and_then(as_text)?;
            let text = lookup(item, title_name)
                .and_then(as_text)
                .unwrap_or_else(|| value.clone());
            Some(Choice { value, text })
        })
        .collect();

    choices.sort_by(|a, b| a.text.cmp(&b.text));
    choices.dedup_by(|a, b| a.value == b.value);
    Ok(choices)
}
