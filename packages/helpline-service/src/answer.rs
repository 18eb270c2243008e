use serde::Serialize;
use serde_json::{Value, json};

use crate::{HelplineService, ServiceError, ServiceResult};
use helpline_corpus::models::KnowledgeEntry;
use helpline_domain::{
	conversation::{ConversationTurn, StrategyState},
	intent,
	strategy::{self, StrategyInput},
};

/// Canned reply for the greeting fast path. Greetings never touch the
/// retrieval sources or the completion provider.
pub const GREETING_REPLY: &str =
	"Hello! I'm the Helpline assistant. Describe the problem you're running into and I'll try to help.";

const FALLBACK_REPLY: &str =
	"I'm having trouble generating a response right now. Please try again in a moment.";
const KB_FALLBACK_HEADER: &str = "I found these potential solutions in our records:";

/// One answered turn.
#[derive(Clone, Debug, Serialize)]
pub struct Answer {
	pub reply: String,
	pub state: StrategyState,
	pub show_escalation: bool,
}

impl HelplineService {
	/// Answer one user message given the replayed prior turns.
	pub async fn answer(
		&self,
		message: &str,
		prior_turns: &[ConversationTurn],
	) -> ServiceResult<Answer> {
		let message = message.trim();

		if message.is_empty() {
			return Err(ServiceError::InvalidRequest {
				message: "Message must be non-empty.".to_string(),
			});
		}

		if intent::is_greeting(message) {
			let answer = Answer {
				reply: GREETING_REPLY.to_string(),
				state: StrategyState::Initial,
				show_escalation: false,
			};

			self.log_exchange(message, &answer.reply).await;

			return Ok(answer);
		}

		let candidates = self.search_candidates(message).await;
		let state = strategy::decide(StrategyInput {
			message,
			prior_turns: prior_turns.len(),
			kb_match_exists: !candidates.is_empty(),
		});
		let mut show_escalation = state.offers_ticket();
		let context = solutions_context(&candidates);
		let messages = completion_messages(
			self.cfg.chat.history_window as usize,
			state,
			message,
			prior_turns,
			context.as_deref(),
		);
		let reply = match self
			.providers
			.completion
			.complete(&self.cfg.providers.completion, &messages)
			.await
		{
			Ok(text) => clean_reply(&text),
			Err(err) => {
				tracing::warn!(error = %err, state = state.as_str(), "Completion failed, serving degraded reply.");

				match context.as_deref() {
					Some(context) => format!("{KB_FALLBACK_HEADER}\n\n{context}"),
					None => {
						// Two failed exchanges are enough; surface the human path.
						if prior_turns.len() >= 2 {
							show_escalation = true;
						}

						FALLBACK_REPLY.to_string()
					},
				}
			},
		};

		self.log_exchange(message, &reply).await;

		Ok(Answer { reply, state, show_escalation })
	}

	async fn log_exchange(&self, message: &str, reply: &str) {
		let Some(logger) = self.logger.as_ref() else {
			return;
		};

		for turn in [ConversationTurn::user(message), ConversationTurn::assistant(reply)] {
			if let Err(err) = logger.log(&turn).await {
				tracing::warn!(error = %err, "Chat log write failed.");
			}
		}
	}
}

/// Ranked candidates rendered as an "Option N" context block for the prompt
/// and for the degraded-reply path. Candidate text is already sanitized.
fn solutions_context(candidates: &[KnowledgeEntry]) -> Option<String> {
	if candidates.is_empty() {
		return None;
	}

	let blocks: Vec<String> = candidates
		.iter()
		.enumerate()
		.map(|(index, entry)| format!("Option {}: {}\n{}", index + 1, entry.question, entry.answer))
		.collect();

	Some(blocks.join("\n\n"))
}

fn completion_messages(
	history_window: usize,
	state: StrategyState,
	message: &str,
	prior_turns: &[ConversationTurn],
	context: Option<&str>,
) -> Vec<Value> {
	let mut messages = vec![json!({ "role": "system", "content": system_instruction(state) })];
	let start = prior_turns.len().saturating_sub(history_window);

	for turn in &prior_turns[start..] {
		messages.push(json!({ "role": turn.role.as_str(), "content": turn.content }));
	}

	let content = match context {
		Some(context) => format!("{message}\n\nKnown solutions:\n{context}"),
		None => message.to_string(),
	};

	messages.push(json!({ "role": "user", "content": content }));

	messages
}

fn system_instruction(state: StrategyState) -> String {
	format!(
		"You are Helpline, an IT support assistant for employees. Keep replies short and concrete, number any troubleshooting steps, and never repeat personal data back to the user.\n\nCurrent strategy: {}. {}",
		state.as_str(),
		strategy_rules(state)
	)
}

fn strategy_rules(state: StrategyState) -> &'static str {
	match state {
		StrategyState::Initial => "Greet the user and ask what they need help with.",
		StrategyState::KbSolution => {
			"Known solutions are attached to the user message. Present the best ones as numbered steps and ask whether they resolve the issue."
		},
		StrategyState::AiAttempt1 => {
			"No documented solution matched. Offer your best troubleshooting steps for the described issue."
		},
		StrategyState::AiAttempt2 => {
			"Earlier suggestions did not resolve the issue. Offer one alternative approach, then ask if the user wants a support ticket."
		},
		StrategyState::TicketOption => {
			"Troubleshooting has not resolved the issue. Summarise what was tried and offer to raise a support ticket."
		},
		StrategyState::TicketRequested => {
			"The user asked for a human. Confirm that a ticket can be raised and summarise the issue for the agent."
		},
	}
}

/// Model output arrives with occasional chat-template tags and markdown
/// decoration; both read poorly in a plain-text chat widget.
fn clean_reply(text: &str) -> String {
	let mut out = text.to_string();

	for tag in ["<s>", "</s>", "[INST]", "[/INST]", "[BOT]"] {
		out = out.replace(tag, "");
	}

	helpline_sanitize::strip_markdown(&out).trim().to_string()
}
