use crate::{conversation::StrategyState, intent};

/// Inputs the per-turn decision is derived from. `prior_turns` counts every
/// turn before the current message, both roles included.
#[derive(Clone, Copy, Debug)]
pub struct StrategyInput<'a> {
	pub message: &'a str,
	pub prior_turns: usize,
	pub kb_match_exists: bool,
}

/// Decide the response strategy for one incoming message.
///
/// Pure over its inputs so the whole state machine is testable without any
/// store or provider fixture. Greeting bypass happens before this point; a
/// greeting never increments the escalation ladder.
pub fn decide(input: StrategyInput<'_>) -> StrategyState {
	if intent::wants_ticket(input.message) {
		return StrategyState::TicketRequested;
	}
	if input.kb_match_exists {
		return StrategyState::KbSolution;
	}

	match input.prior_turns {
		0 | 1 => StrategyState::AiAttempt1,
		2 | 3 => StrategyState::AiAttempt2,
		_ => StrategyState::TicketOption,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn input(message: &str, prior_turns: usize, kb_match_exists: bool) -> StrategyInput<'_> {
		StrategyInput { message, prior_turns, kb_match_exists }
	}

	#[test]
	fn kb_match_wins_over_attempt_ladder() {
		assert_eq!(decide(input("vpn drops", 0, true)), StrategyState::KbSolution);
		assert_eq!(decide(input("vpn drops", 5, true)), StrategyState::KbSolution);
	}

	#[test]
	fn attempt_ladder_follows_prior_turn_count() {
		assert_eq!(decide(input("vpn drops", 0, false)), StrategyState::AiAttempt1);
		assert_eq!(decide(input("vpn drops", 1, false)), StrategyState::AiAttempt1);
		assert_eq!(decide(input("vpn drops", 2, false)), StrategyState::AiAttempt2);
		assert_eq!(decide(input("vpn drops", 3, false)), StrategyState::AiAttempt2);
		assert_eq!(decide(input("vpn drops", 4, false)), StrategyState::TicketOption);
		assert_eq!(decide(input("vpn drops", 5, false)), StrategyState::TicketOption);
	}

	#[test]
	fn explicit_escalation_overrides_everything() {
		assert_eq!(
			decide(input("please create a ticket", 0, true)),
			StrategyState::TicketRequested
		);
		assert_eq!(
			decide(input("get me a human", 3, false)),
			StrategyState::TicketRequested
		);
	}
}
