use std::collections::HashSet;

/// Greetings and generic complaint words that carry no searchable signal.
const STOP_WORDS: &[&str] = &[
	"not", "working", "issue", "help", "problem", "error", "failed", "fail", "doesn't", "didn't",
	"cant", "can't", "please", "thanks", "thank", "thankyou", "hii", "hi", "hello", "hey",
];

/// Lowercased tokens longer than two characters with stop words removed,
/// deduplicated in first-seen order.
pub fn significant_keywords(query: &str) -> Vec<String> {
	let lowered = query.to_lowercase();
	let mut out = Vec::new();
	let mut seen = HashSet::new();

	for token in lowered.split_whitespace() {
		if token.chars().count() <= 2 {
			continue;
		}
		if STOP_WORDS.contains(&token) {
			continue;
		}
		if seen.insert(token.to_string()) {
			out.push(token.to_string());
		}
	}

	out
}

/// Fraction of keywords contained (case-insensitive substring) in `text`.
/// Returns 0.0 for an empty keyword list so degenerate queries never match.
pub fn overlap_ratio(keywords: &[String], text: &str) -> f32 {
	if keywords.is_empty() {
		return 0.0;
	}

	let lowered = text.to_lowercase();
	let matched = keywords.iter().filter(|keyword| lowered.contains(keyword.as_str())).count();

	matched as f32 / keywords.len() as f32
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn drops_short_tokens_and_stop_words() {
		let keywords = significant_keywords("hi my VPN is not working please help");

		assert_eq!(keywords, vec!["vpn".to_string()]);
	}

	#[test]
	fn pure_greeting_yields_no_keywords() {
		assert!(significant_keywords("hii hello hey").is_empty());
		assert!(significant_keywords("ok no").is_empty());
	}

	#[test]
	fn keywords_keep_first_seen_order_without_duplicates() {
		let keywords = significant_keywords("printer offline printer spooler");

		assert_eq!(
			keywords,
			vec!["printer".to_string(), "offline".to_string(), "spooler".to_string()]
		);
	}

	#[test]
	fn overlap_is_case_insensitive_substring_containment() {
		let keywords = significant_keywords("vpn keeps disconnecting");

		let entry = "VPN Disconnect Issue: if it keeps disconnecting, reset the adapter";

		assert!(overlap_ratio(&keywords, entry) >= 0.6);
		assert_eq!(overlap_ratio(&keywords, "outlook calendar sync"), 0.0);
	}

	#[test]
	fn empty_keywords_never_match() {
		assert_eq!(overlap_ratio(&[], "anything at all"), 0.0);
	}
}
