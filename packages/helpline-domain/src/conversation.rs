use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
	Assistant,
}
impl Role {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::User => "user",
			Self::Assistant => "assistant",
		}
	}
}

/// One prior exchange in a chat session. The caller replays the full ordered
/// history with every request; nothing is persisted on this side.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationTurn {
	pub role: Role,
	pub content: String,
}
impl ConversationTurn {
	pub fn user(content: impl Into<String>) -> Self {
		Self { role: Role::User, content: content.into() }
	}

	pub fn assistant(content: impl Into<String>) -> Self {
		Self { role: Role::Assistant, content: content.into() }
	}
}

/// Response strategy for one turn, derived fresh from the message, the prior
/// turn count, and whether the ranker produced a match. Never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StrategyState {
	Initial,
	KbSolution,
	#[serde(rename = "AI_ATTEMPT_1")]
	AiAttempt1,
	#[serde(rename = "AI_ATTEMPT_2")]
	AiAttempt2,
	TicketOption,
	TicketRequested,
}
impl StrategyState {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Initial => "INITIAL",
			Self::KbSolution => "KB_SOLUTION",
			Self::AiAttempt1 => "AI_ATTEMPT_1",
			Self::AiAttempt2 => "AI_ATTEMPT_2",
			Self::TicketOption => "TICKET_OPTION",
			Self::TicketRequested => "TICKET_REQUESTED",
		}
	}

	/// Whether this state surfaces the escalation affordance on its own.
	pub fn offers_ticket(self) -> bool {
		matches!(self, Self::TicketOption | Self::TicketRequested)
	}
}
