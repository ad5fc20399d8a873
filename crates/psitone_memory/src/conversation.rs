use crate::buffer::{ConversationMemory, ConversationTurn};
use tokio::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// One logical conversation: a memory log plus the lock that serializes it.
///
/// Whoever holds the guard from [`Conversation::begin_turn`] owns the
/// conversation until it is dropped, so reading history, generating and
/// appending happen as one exclusive step and turns land in completion order.
#[derive(Debug)]
pub struct Conversation {
    id: Uuid,
    memory: Mutex<ConversationMemory>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self::with_memory(ConversationMemory::new())
    }

    pub fn with_memory(memory: ConversationMemory) -> Self {
        Self {
            id: Uuid::new_v4(),
            memory: Mutex::new(memory),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Take exclusive access to the memory for a whole turn.
    pub async fn begin_turn(&self) -> MutexGuard<'_, ConversationMemory> {
        self.memory.lock().await
    }

    /// Copy of every turn so far.
    pub async fn snapshot(&self) -> Vec<ConversationTurn> {
        self.memory.lock().await.turns().to_vec()
    }

    pub async fn len(&self) -> usize {
        self.memory.lock().await.len()
    }

    pub async fn flatten_history(&self) -> String {
        self.memory.lock().await.flatten_history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_conversation_ids_are_unique() {
        assert_ne!(Conversation::new().id(), Conversation::new().id());
    }

    #[tokio::test]
    async fn test_turn_guard_serializes_access() {
        let conversation = Arc::new(Conversation::new());

        let first = {
            let conversation = conversation.clone();
            tokio::spawn(async move {
                let mut memory = conversation.begin_turn().await;
                // Hold the guard across an await, like a generation call.
                tokio::time::sleep(Duration::from_millis(50)).await;
                memory.append_turn("first", "1");
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = {
            let conversation = conversation.clone();
            tokio::spawn(async move {
                let mut memory = conversation.begin_turn().await;
                let seen = memory.len();
                memory.append_turn("second", "2");
                seen
            })
        };

        first.await.unwrap();
        let seen_by_second = second.await.unwrap();
        assert_eq!(seen_by_second, 1);
        assert_eq!(
            conversation.flatten_history().await,
            "Human: first\nAI: 1\nHuman: second\nAI: 2"
        );
    }

    #[tokio::test]
    async fn test_snapshot_is_a_copy() {
        let conversation = Conversation::new();
        conversation.begin_turn().await.append_turn("a", "b");
        let snap = conversation.snapshot().await;
        conversation.begin_turn().await.append_turn("c", "d");
        assert_eq!(snap.len(), 1);
        assert_eq!(conversation.len().await, 2);
    }
}
