//! Element records from the LXP repository (`elements.json`).

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Element type whose `data.content` holds HTML
pub const HTML_ELEMENT_TYPE: &str = "HLXP_HTML";

/// One element of the repository.
///
/// Only `uid` is required. `data` and `meta` are kept as raw JSON and read
/// on demand, so a record with an odd payload shape never rejects the
/// repository it sits in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier (numeric uids are kept as their decimal text)
    #[serde(deserialize_with = "uid_from_json")]
    pub uid: String,

    /// Element type (HLXP_HTML, HLXP_VIDEO, ...), empty when absent
    #[serde(rename = "type", default)]
    pub element_type: String,

    #[serde(default)]
    pub data: Value,

    #[serde(default)]
    pub meta: Value,
}

/// Where a video element keeps its transcript metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLocation {
    /// Under `data.transcript`
    Data(Option<String>),

    /// Under `meta.transcript`
    Meta(Option<String>),

    NotFound,
}

impl Element {
    pub fn is_html(&self) -> bool {
        self.element_type == HTML_ELEMENT_TYPE
    }

    pub fn is_video(&self) -> bool {
        self.element_type.contains("VIDEO")
    }

    /// HTML content, empty when the element carries none
    pub fn content(&self) -> &str {
        self.data
            .get("content")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Locate transcript metadata, `data` takes precedence over `meta`
    pub fn transcript_location(&self) -> TranscriptLocation {
        if let Some(key) = transcript_key(&self.data) {
            return TranscriptLocation::Data(key);
        }
        if let Some(key) = transcript_key(&self.meta) {
            return TranscriptLocation::Meta(key);
        }
        TranscriptLocation::NotFound
    }
}

/// `Some(key)` when `holder.transcript` is present and not null
fn transcript_key(holder: &Value) -> Option<Option<String>> {
    let transcript = holder.get("transcript").filter(|t| !t.is_null())?;

    Some(match transcript.get("key") {
        Some(Value::String(key)) => Some(key.clone()),
        Some(Value::Null) | None => None,
        Some(other) => Some(other.to_string()),
    })
}

/// Transcript lookup result for one video element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptFinding {
    pub uid: String,
    pub location: TranscriptLocation,
}

impl std::fmt::Display for TranscriptFinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.location {
            TranscriptLocation::Data(key) => write!(
                f,
                "--- transcript.DATA: {}",
                key.as_deref().unwrap_or("<no key>")
            ),
            TranscriptLocation::Meta(key) => write!(
                f,
                "*** transcript.META: {}",
                key.as_deref().unwrap_or("<no key>")
            ),
            TranscriptLocation::NotFound => write!(f, "NNNNNNNNNNNNNNNN not found"),
        }
    }
}

/// uid -> element lookup table
#[derive(Debug, Clone, Default)]
pub struct ElementIndex {
    by_uid: HashMap<String, Element>,
}

impl ElementIndex {
    /// Build the index, later records replace earlier ones with the same uid
    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        let by_uid = elements
            .into_iter()
            .map(|e| (e.uid.clone(), e))
            .collect();
        Self { by_uid }
    }

    pub fn get(&self, uid: &str) -> Option<&Element> {
        self.by_uid.get(uid)
    }

    pub fn len(&self) -> usize {
        self.by_uid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_uid.is_empty()
    }
}

fn uid_from_json<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Uid {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Uid::deserialize(deserializer)? {
        Uid::Text(s) => s,
        Uid::Number(n) => n.to_string(),
    })
}
