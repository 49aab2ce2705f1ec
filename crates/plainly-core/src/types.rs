//! Common types used across the Plainly workflow

use serde::{Deserialize, Serialize};

/// Inputs must be strictly longer than this to be submitted
pub const MIN_INPUT_CHARS: usize = 10;

/// Advisory upper bound shown next to the input; never enforced
pub const MAX_RECOMMENDED_CHARS: usize = 3000;

/// Sample passage offered to first-time users
pub const EXAMPLE_PASSAGE: &str = "The policyholder's liability for out-of-pocket expenses shall be limited to the annual deductible amount as stipulated in Section 4.2, provided that all prerequisite documentation has been submitted within the prescribed timeframe.";

/// Target reading level for the rewritten text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    /// Plain English for adults
    #[default]
    Standard,
    /// Explained for a ten-year-old
    Child,
}

impl ComplexityLevel {
    /// Wire name sent to the simplification service
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::Standard => "standard",
            ComplexityLevel::Child => "child",
        }
    }

    /// Label shown in the level selector
    pub fn display_name(&self) -> &'static str {
        match self {
            ComplexityLevel::Standard => "Standard (plain English)",
            ComplexityLevel::Child => "Child (explain like I'm 10)",
        }
    }

    /// Get all selectable levels
    pub fn all() -> Vec<ComplexityLevel> {
        vec![ComplexityLevel::Standard, ComplexityLevel::Child]
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<ComplexityLevel> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "professional" => Some(ComplexityLevel::Standard),
            "child" | "kid" => Some(ComplexityLevel::Child),
            _ => None,
        }
    }
}

impl std::fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The text the user is editing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputDocument {
    text: String,
}

impl InputDocument {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Length in characters, not bytes
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Long enough to be submitted
    pub fn is_submittable(&self) -> bool {
        self.len() > MIN_INPUT_CHARS
    }

    /// Past the recommended size
    pub fn is_over_limit(&self) -> bool {
        self.len() > MAX_RECOMMENDED_CHARS
    }

    /// Counter shown under the input, e.g. `42 / 3000 chars`
    pub fn counter_label(&self) -> String {
        format!("{} / {} chars", self.len(), MAX_RECOMMENDED_CHARS)
    }
}

/// Identifies one submission; later submissions get larger tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestToken(pub u64);

impl RequestToken {
    pub fn next(self) -> RequestToken {
        RequestToken(self.0 + 1)
    }
}

/// Text and level captured at the moment of submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplificationRequest {
    pub token: RequestToken,
    pub text: String,
    pub level: ComplexityLevel,
}

/// What the simplification service sends back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplificationResult {
    /// HTML fragment with the rewritten text
    pub simplified: String,
    #[serde(rename = "keyPoints")]
    pub key_points: Vec<String>,
}

/// Network reachability as last reported by the OS
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    #[default]
    Online,
    Offline,
}

impl Connectivity {
    pub fn is_online(&self) -> bool {
        matches!(self, Connectivity::Online)
    }
}

impl From<bool> for Connectivity {
    fn from(online: bool) -> Self {
        if online {
            Connectivity::Online
        } else {
            Connectivity::Offline
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(ComplexityLevel::from_str("standard"), Some(ComplexityLevel::Standard));
        assert_eq!(ComplexityLevel::from_str("CHILD"), Some(ComplexityLevel::Child));
        assert_eq!(ComplexityLevel::from_str(" kid "), Some(ComplexityLevel::Child));
        assert_eq!(ComplexityLevel::from_str("expert"), None);
    }

    #[test]
    fn test_level_serializes_lowercase() {
        let json = serde_json::to_string(&ComplexityLevel::Child).unwrap();
        assert_eq!(json, "\"child\"");
        assert_eq!(ComplexityLevel::all().len(), 2);
        assert_eq!(ComplexityLevel::default(), ComplexityLevel::Standard);
    }

    #[test]
    fn test_input_bounds() {
        let doc = InputDocument::new("0123456789");
        assert_eq!(doc.len(), 10);
        assert!(!doc.is_submittable());

        let doc = InputDocument::new("0123456789a");
        assert!(doc.is_submittable());
        assert!(!doc.is_over_limit());

        let doc = InputDocument::new("x".repeat(3001));
        assert!(doc.is_submittable());
        assert!(doc.is_over_limit());
        assert_eq!(doc.counter_label(), "3001 / 3000 chars");
    }

    #[test]
    fn test_input_counts_characters() {
        let doc = InputDocument::new("héllo wörld");
        assert_eq!(doc.len(), 11);
        assert!(doc.is_submittable());
    }

    #[test]
    fn test_result_wire_format() {
        let json = r#"{"simplified":"<p>X</p>","keyPoints":["a","b"]}"#;
        let result: SimplificationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.simplified, "<p>X</p>");
        assert_eq!(result.key_points, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_example_passage_is_submittable() {
        assert!(InputDocument::new(EXAMPLE_PASSAGE).is_submittable());
    }
}
