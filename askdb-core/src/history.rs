use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TurnOutcome;

/// Explicit conversation-history value. Callers pass it into the
/// orchestrator per turn and receive the extended value back; the pipeline
/// itself keeps no cross-request state.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub asked_at: DateTime<Utc>,
    pub question: String,
    pub outcome: TurnOutcome,
}

impl ConversationTurn {
    pub fn new(question: impl Into<String>, outcome: TurnOutcome) -> Self {
        Self {
            id: Uuid::new_v4(),
            asked_at: Utc::now(),
            question: question.into(),
            outcome,
        }
    }
}
