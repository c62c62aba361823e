use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;

use crate::{ai::SpamClassifier, domain::Message};

#[derive(Debug, Clone, Copy)]
pub struct SeedMessage {
    pub sender: &'static str,
    pub content: &'static str,
    pub age_minutes: i64,
}

pub const SEED_MESSAGES: [SeedMessage; 7] = [
    SeedMessage {
        sender: "+15552345678",
        content: "Congratulations! You've won a $1000 Walmart gift card. Go to http://bit.ly/w-mart-winner to claim now.",
        age_minutes: 5,
    },
    SeedMessage {
        sender: "Sarah",
        content: "Hey! Are you free for coffee tomorrow morning? Let me know!",
        age_minutes: 30,
    },
    SeedMessage {
        sender: "FedEx",
        content: "Your package with tracking number #84391032 is out for delivery and will arrive today.",
        age_minutes: 2 * 60,
    },
    SeedMessage {
        sender: "+15558765432",
        content: "URGENT: Your bank account has been suspended due to suspicious activity. Please verify your identity here: http://secure-bank-login.xyz",
        age_minutes: 4 * 60,
    },
    SeedMessage {
        sender: "Mom",
        content: "Don't forget to pick up milk on your way home. Love you!",
        age_minutes: 5 * 60,
    },
    SeedMessage {
        sender: "Unknown",
        content: "We've been trying to reach you about your car's extended warranty. This is your final notice.",
        age_minutes: 24 * 60,
    },
    SeedMessage {
        sender: "Appointment Reminder",
        content: "Reminder: You have a dental cleaning appointment tomorrow at 10:30 AM with Dr. Smith.",
        age_minutes: 26 * 60,
    },
];

pub fn seed_id(batch_millis: i64, index: usize) -> String {
    format!("msg-{batch_millis}-{index}")
}

/// Classifies every seed concurrently and returns messages in seed order,
/// whatever order the calls finish in.
pub async fn classify_seed_batch(
    classifier: &dyn SpamClassifier,
    seeds: &[SeedMessage],
    started_at: DateTime<Utc>,
) -> Vec<Message> {
    let batch_millis = started_at.timestamp_millis();
    let pending = seeds.iter().enumerate().map(|(index, seed)| async move {
        let result = classifier.classify(seed.content).await;
        Message::classified(
            seed_id(batch_millis, index),
            seed.sender.to_string(),
            seed.content.to_string(),
            started_at - Duration::minutes(seed.age_minutes),
            result,
        )
    });

    let messages = join_all(pending).await;
    tracing::info!(
        target: "session",
        total = messages.len(),
        spam = messages.iter().filter(|m| m.is_spam()).count(),
        "seed batch classified"
    );
    messages
}
