use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;

use super::SpamClassifier;
use crate::domain::ClassificationResult;

#[derive(Default)]
pub struct ScriptedClassifier {
    verdicts: HashMap<String, (Duration, ClassificationResult)>,
    completed: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, content: &str, delay_ms: u64, result: ClassificationResult) -> Self {
        self.verdicts.insert(
            content.to_string(),
            (Duration::from_millis(delay_ms), result),
        );
        self
    }

    pub fn completion_order(&self) -> Vec<String> {
        self.completed.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpamClassifier for ScriptedClassifier {
    async fn classify(&self, content: &str) -> ClassificationResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (delay, result) = self
            .verdicts
            .get(content)
            .copied()
            .unwrap_or((Duration::ZERO, ClassificationResult::fallback()));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.completed.lock().unwrap().push(content.to_string());
        result
    }
}
