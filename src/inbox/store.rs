use thiserror::Error;

use crate::domain::Message;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("message id {0} already exists")]
    DuplicateId(String),
}

#[derive(Debug, Default, Clone)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn prepend(&mut self, message: Message) -> Result<(), StoreError> {
        if self.contains(&message.id) {
            return Err(StoreError::DuplicateId(message.id));
        }
        self.messages.insert(0, message);
        Ok(())
    }

    pub fn extend_batch(&mut self, batch: Vec<Message>) -> Result<(), StoreError> {
        for (idx, message) in batch.iter().enumerate() {
            let repeated = batch[..idx].iter().any(|m| m.id == message.id);
            if repeated || self.contains(&message.id) {
                return Err(StoreError::DuplicateId(message.id.clone()));
            }
        }
        self.messages.extend(batch);
        Ok(())
    }

    pub fn toggle(&mut self, id: &str) -> Option<&Message> {
        let message = self.messages.iter_mut().find(|m| m.id == id)?;
        message.toggle_classification();
        Some(message)
    }
}
