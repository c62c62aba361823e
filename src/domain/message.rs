use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Classification, ClassificationResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub sender: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub classification: Classification,
    pub model_confidence: f64,
    pub user_corrected: bool,
}

impl Message {
    pub fn classified(
        id: String,
        sender: String,
        content: String,
        timestamp: DateTime<Utc>,
        result: ClassificationResult,
    ) -> Self {
        Self {
            id,
            sender,
            content,
            timestamp,
            classification: result.classification,
            model_confidence: result.confidence,
            user_corrected: false,
        }
    }

    pub fn toggle_classification(&mut self) {
        self.classification = self.classification.flipped();
        self.user_corrected = true;
    }

    pub fn is_spam(&self) -> bool {
        self.classification == Classification::Spam
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spam_message() -> Message {
        Message::classified(
            "msg-1-0".into(),
            "+15552345678".into(),
            "You've won a gift card".into(),
            Utc::now(),
            ClassificationResult::new(Classification::Spam, 0.97),
        )
    }

    #[test]
    fn toggle_keeps_confidence_and_marks_corrected() {
        let mut msg = spam_message();
        assert!(!msg.user_corrected);

        msg.toggle_classification();
        assert_eq!(msg.classification, Classification::NotSpam);
        assert_eq!(msg.model_confidence, 0.97);
        assert!(msg.user_corrected);

        msg.toggle_classification();
        assert_eq!(msg.classification, Classification::Spam);
        assert!(msg.user_corrected);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let value = serde_json::to_value(spam_message()).unwrap();
        assert_eq!(value["modelConfidence"], 0.97);
        assert_eq!(value["userCorrected"], false);
        assert_eq!(value["classification"], "Spam");
    }
}
