//! Typed view of the Responses API reply and output-text extraction.
//!
//! Only the parts needed to find the model's text are modelled; every
//! other field of the reply is ignored.

use crate::error::EnvelopeDefect;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// Fields are decoded leniently: a field of the wrong JSON type reads as
// absent and a malformed list element reads as an empty one, so a single
// odd item never hides the rest of the reply.

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ResponseEnvelope {
    /// Flattened text of every `output_text` part, when the sender
    /// precomputed it.
    #[serde(default, deserialize_with = "lenient")]
    pub output_text: Option<String>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub output: Option<Vec<OutputItem>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct OutputItem {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "lenient_list")]
    pub content: Option<Vec<ContentPart>>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ContentPart {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub text: Option<String>,
}

impl OutputItem {
    fn is(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }
}

impl ContentPart {
    fn is(&self, kind: &str) -> bool {
        self.kind.as_deref() == Some(kind)
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or_default())
                .collect(),
        )),
        _ => Ok(None),
    }
}

impl ResponseEnvelope {
    fn output(&self) -> &[OutputItem] {
        self.output.as_deref().unwrap_or_default()
    }

    /// Fill `output_text` from the structured output when the reply did not
    /// carry it: the text of every `output_text` part across all `message`
    /// items, concatenated in order.
    pub fn with_flattened_text(mut self) -> Self {
        if self.output_text.is_none() {
            let text: String = self
                .output()
                .iter()
                .filter(|item| item.is("message"))
                .flat_map(|item| item.content.as_deref().unwrap_or_default())
                .filter(|part| part.is("output_text"))
                .filter_map(|part| part.text.as_deref())
                .collect();
            self.output_text = Some(text);
        }
        self
    }
}

/// Find the model's text in a reply.
///
/// A non-empty `output_text` wins. Otherwise the first output item must be
/// a `message` with content, and its first `output_text` part is used.
pub fn extract_output_text(envelope: Option<&ResponseEnvelope>) -> Result<&str, EnvelopeDefect> {
    let envelope = envelope.ok_or(EnvelopeDefect::MissingResponse)?;

    if let Some(text) = envelope.output_text.as_deref().filter(|t| !t.is_empty()) {
        return Ok(text);
    }

    let first = envelope
        .output()
        .first()
        .ok_or(EnvelopeDefect::EmptyOutput)?;

    let content = match first.content.as_deref() {
        Some(content) if first.is("message") && !content.is_empty() => content,
        _ => return Err(EnvelopeDefect::MissingMessageContent),
    };

    content
        .iter()
        .find(|part| part.is("output_text"))
        .map(|part| part.text.as_deref().unwrap_or_default())
        .ok_or(EnvelopeDefect::MissingTextOutput)
}
