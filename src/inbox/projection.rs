use crate::domain::{Classification, Message};

use super::store::MessageStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Inbox,
    Spam,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            View::Inbox => "Inbox",
            View::Spam => "Spam",
        }
    }

    fn classification(&self) -> Classification {
        match self {
            View::Inbox => Classification::NotSpam,
            View::Spam => Classification::Spam,
        }
    }
}

pub fn messages_in(store: &MessageStore, view: View) -> Vec<&Message> {
    let wanted = view.classification();
    store.iter().filter(|m| m.classification == wanted).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStats {
    pub total: usize,
    pub spam: usize,
    pub not_spam: usize,
    pub spam_percentage: f64,
}

impl DashboardStats {
    pub fn compute(store: &MessageStore) -> Self {
        let total = store.len();
        let spam = store.iter().filter(|m| m.is_spam()).count();
        let spam_percentage = if total > 0 {
            spam as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            spam,
            not_spam: total - spam,
            spam_percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::ClassificationResult;

    fn store_with(labels: &[Classification]) -> MessageStore {
        let mut store = MessageStore::new();
        let batch = labels
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                Message::classified(
                    format!("msg-0-{idx}"),
                    "sender".into(),
                    format!("content {idx}"),
                    Utc::now(),
                    ClassificationResult::new(*label, 0.7),
                )
            })
            .collect();
        store.extend_batch(batch).unwrap();
        store
    }

    #[test]
    fn empty_store_has_zero_percentage() {
        let stats = DashboardStats::compute(&MessageStore::new());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.spam_percentage, 0.0);
        assert!(messages_in(&MessageStore::new(), View::Spam).is_empty());
    }

    #[test]
    fn subsets_partition_the_store() {
        use Classification::*;
        let mut store = store_with(&[Spam, NotSpam, NotSpam, Spam, NotSpam]);

        let check = |store: &MessageStore| {
            let inbox = messages_in(store, View::Inbox);
            let spam = messages_in(store, View::Spam);
            assert_eq!(inbox.len() + spam.len(), store.len());
            assert!(inbox.iter().all(|m| !m.is_spam()));
            assert!(spam.iter().all(|m| m.is_spam()));
            let stats = DashboardStats::compute(store);
            assert_eq!(stats.spam, spam.len());
            assert_eq!(stats.not_spam, inbox.len());
        };

        check(&store);
        store.toggle("msg-0-1");
        check(&store);
        store.toggle("msg-0-0");
        store.toggle("msg-0-3");
        check(&store);
    }

    #[test]
    fn stats_follow_current_state() {
        use Classification::*;
        let mut store = store_with(&[Spam, NotSpam, NotSpam, NotSpam]);
        assert_eq!(DashboardStats::compute(&store).spam_percentage, 25.0);

        store.toggle("msg-0-1");
        let stats = DashboardStats::compute(&store);
        assert_eq!(stats.spam, 2);
        assert_eq!(stats.spam_percentage, 50.0);
    }

    #[test]
    fn subsets_keep_store_order() {
        use Classification::*;
        let store = store_with(&[Spam, NotSpam, Spam]);
        let ids: Vec<_> = messages_in(&store, View::Spam)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, ["msg-0-0", "msg-0-2"]);
    }
}
