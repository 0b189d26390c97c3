use anyhow::Result;
use fixphrase_core::Decoded;
use serde::{Deserialize, Serialize};

pub const ENCODE_USAGE: [&str; 2] = [
    "GET  /encode?lat=52.5902&lon=-2.13049",
    r#"POST /encode {"lat":52.5902,"lon":-2.13049}"#,
];

pub const DECODE_USAGE: [&str; 2] = [
    "GET  /decode?phrase=abacus%20abdomen%20...",
    r#"POST /decode {"phrase":"abacus abdomen ..."}"#,
];

/// Missing fields default to zero values; unknown fields are rejected.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeRequest {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeRequest {
    pub phrase: String,
}

/// Body of every error response
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            detail: None,
            usage: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    pub fn with_usage(mut self, usage: &[&str]) -> Self {
        self.usage = Some(usage.iter().map(|line| line.to_string()).collect());
        self
    }
}

/// Decode response: the result plus the input words in sorted order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecodeEnvelope {
    pub result: Decoded,
    pub input_words_sorted: Vec<String>,
}

impl From<Decoded> for DecodeEnvelope {
    fn from(result: Decoded) -> Self {
        let mut input_words_sorted = result.input_words.clone();
        input_words_sorted.sort();
        Self {
            result,
            input_words_sorted,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub ok: bool,
    pub service: String,
    pub repo: String,
    pub image: String,
    pub version: String,
    pub commit: String,
    pub build_date: String,
    pub wordlist_len: usize,
    pub time: String,
}

/// Two-space indented JSON, terminated by a newline
pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut raw = serde_json::to_string_pretty(value)?;
    raw.push('\n');
    Ok(raw)
}
