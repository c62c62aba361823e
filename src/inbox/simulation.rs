use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use rand::{seq::SliceRandom, Rng};

use crate::{ai::SpamClassifier, domain::Message};

pub const SAMPLE_MESSAGES: [&str; 5] = [
    "URGENT: Your account has been compromised! Click http://bit.ly/reset-now to secure it.",
    "Hey, are we still on for dinner tonight at 7? Let me know!",
    "You've won a $1000 gift card! Claim it here: sketchy-link.com/winner",
    "Your Amazon package with order #A123BC456 has been delivered. Thank you for your order!",
    "FINAL NOTICE: Your car's extended warranty is about to expire. Call 800-123-4567 now!",
];

static SIMULATED_SEQUENCE: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedDraft {
    pub sender: String,
    pub content: String,
}

impl SimulatedDraft {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let content = SAMPLE_MESSAGES
            .choose(rng)
            .copied()
            .unwrap_or(SAMPLE_MESSAGES[0]);
        let number: u64 = rng.gen_range(1_000_000_000..10_000_000_000);
        Self {
            sender: format!("+1{number}"),
            content: content.to_string(),
        }
    }

    pub async fn classify(self, classifier: &dyn SpamClassifier) -> Message {
        let result = classifier.classify(&self.content).await;
        let now = Utc::now();
        let id = simulated_id(now.timestamp_millis());
        tracing::info!(
            target: "simulation",
            id = %id,
            classification = %result.classification,
            confidence = result.confidence,
            "simulated message classified"
        );
        Message::classified(id, self.sender, self.content, now, result)
    }
}

fn simulated_id(millis: i64) -> String {
    let seq = SIMULATED_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("msg-{millis}-n{seq}")
}
