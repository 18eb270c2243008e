use regex::Regex;

const GREETING_PATTERN: &str =
	r"(?i)^(hi|hii|hello|hey|helo|hola|good\s+(morning|afternoon|evening)|greetings?)[\s!.]*$";
const TICKET_INTENT_PATTERN: &str =
	r"(?i)\b(create|raise|submit|open)\s+(a\s+)?ticket\b|\b(human|agent|support|representative)\b";

/// Social messages bypass search entirely. Anything shorter than five
/// characters after trimming counts as filler, matching or not.
pub fn is_greeting(message: &str) -> bool {
	let trimmed = message.trim();

	if trimmed.chars().count() < 5 {
		return true;
	}

	Regex::new(GREETING_PATTERN).map(|re| re.is_match(trimmed)).unwrap_or(false)
}

/// Explicit request to reach a human, overriding every other strategy.
pub fn wants_ticket(message: &str) -> bool {
	Regex::new(TICKET_INTENT_PATTERN).map(|re| re.is_match(message)).unwrap_or(false)
}
