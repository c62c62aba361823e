use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "Spam")]
    Spam,
    #[serde(rename = "Not Spam")]
    NotSpam,
}

impl Classification {
    pub const ALL: [Classification; 2] = [Classification::Spam, Classification::NotSpam];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Spam => "Spam",
            Classification::NotSpam => "Not Spam",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Classification::Spam => Classification::NotSpam,
            Classification::NotSpam => Classification::Spam,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub classification: Classification,
    pub confidence: f64,
}

impl ClassificationResult {
    pub const FALLBACK_CONFIDENCE: f64 = 0.5;

    pub fn new(classification: Classification, confidence: f64) -> Self {
        Self {
            classification,
            confidence,
        }
    }

    pub fn fallback() -> Self {
        Self::new(Classification::NotSpam, Self::FALLBACK_CONFIDENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_match_schema_enum() {
        assert_eq!(
            serde_json::to_string(&Classification::NotSpam).unwrap(),
            "\"Not Spam\""
        );
        let parsed: Classification = serde_json::from_str("\"Spam\"").unwrap();
        assert_eq!(parsed, Classification::Spam);
        assert!(serde_json::from_str::<Classification>("\"spam\"").is_err());
    }

    #[test]
    fn fallback_is_not_spam_at_half_confidence() {
        let fallback = ClassificationResult::fallback();
        assert_eq!(fallback.classification, Classification::NotSpam);
        assert_eq!(fallback.confidence, 0.5);
    }
}
