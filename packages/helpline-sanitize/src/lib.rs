//! Redaction and presentation of retrieved solution text.
//!
//! Raw solutions come out of ticket logs and carry emails, phone numbers,
//! credentials, server names, and desk locations. Every pass here is a pure
//! string transform; a pattern that fails to compile is skipped with a
//! warning instead of blocking the remaining passes, so one bad pattern can
//! never withhold an answer. Redaction is lossy and irreversible.

use std::sync::LazyLock;

use regex::Regex;

struct Pass {
	name: &'static str,
	pattern: &'static str,
	replacement: &'static str,
}

/// Applied in order. Phones come in three shapes; the credential pass keeps
/// the key name and drops only the value.
const REDACTION_PASSES: &[Pass] = &[
	Pass { name: "email", pattern: r"[\w.+-]+@[\w.-]+\.\w+", replacement: "[email]" },
	Pass { name: "phone_plain", pattern: r"\b\d{10}\b", replacement: "[phone]" },
	Pass {
		name: "phone_dashed",
		pattern: r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b",
		replacement: "[phone]",
	},
	Pass {
		name: "phone_international",
		pattern: r"\+\d{1,3}[-.\s]?\d{3,4}[-.\s]?\d{3,4}[-.\s]?\d{3,4}",
		replacement: "[phone]",
	},
	Pass { name: "employee_id", pattern: r"(?i)\b(id|emp)[-:\s]?\d+\b", replacement: "[ID]" },
	Pass {
		name: "ipv4",
		pattern: r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b",
		replacement: "[IP address]",
	},
	Pass {
		name: "credential",
		pattern: r"(?i)\b(pwd|password|pass|secret|token|key|cred|credential)s?[:=]\s*\S+",
		replacement: "${1}: [REDACTED]",
	},
	Pass { name: "server_name", pattern: r"\b[A-Z]{3,}\d{2,}[A-Z0-9-]*\b", replacement: "[server]" },
	Pass {
		name: "location_building",
		pattern: r"(?i)\b(floor|bldg|building)\s+[A-Z0-9-]+\b",
		replacement: "[location]",
	},
	Pass {
		name: "location_desk",
		pattern: r"(?i)\b(pillar|desk|room)\s+(no\.?|number)?\s*[A-Z0-9-]+\b",
		replacement: "[location]",
	},
	Pass { name: "slash_date", pattern: r"\b\d{1,2}/\d{1,2}/\d{2,4}\b", replacement: "[date]" },
];

/// Generalization runs after redaction: device codes, resolution-log
/// boilerplate, and signature blocks add nothing for the end user.
const GENERALIZATION_PASSES: &[Pass] = &[
	Pass {
		name: "device_code",
		pattern: r"\b[A-Z]{2,}-[A-Z0-9-]+-[A-Z0-9-]+\b",
		replacement: "[device]",
	},
	Pass { name: "resolution_prefix", pattern: r"(?im)^resolution:?\s*", replacement: "" },
	Pass { name: "diagnostics_prefix", pattern: r"(?im)^issue diagnostics:?\s*", replacement: "" },
	Pass { name: "update_prefix", pattern: r"(?i)\bupdate[-:]\s*", replacement: "" },
	Pass {
		name: "signature_thanks",
		pattern: r"(?is)\bthanks\b[\s\S]*?\bregards\b,?[\s\S]*$",
		replacement: "",
	},
	Pass {
		name: "signature_best",
		pattern: r"(?is)\bbest\b[\s\S]*?\bregards\b,?[\s\S]*$",
		replacement: "",
	},
];

static REDACTION: LazyLock<Vec<(&'static str, Option<Regex>, &'static str)>> =
	LazyLock::new(|| compile(REDACTION_PASSES));
static GENERALIZATION: LazyLock<Vec<(&'static str, Option<Regex>, &'static str)>> =
	LazyLock::new(|| compile(GENERALIZATION_PASSES));
// Runs of blanks collapse to one space; newline runs survive as a single
// newline so the step splitter still sees line structure.
static BLANK_RUNS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[^\S\n]+").ok());
static NEWLINE_RUNS: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s*\n\s*").ok());
static MARKDOWN_BOLD: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").ok());
static MARKDOWN_ITALIC: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\*([^*]+)\*").ok());
static MARKDOWN_HEADER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?m)^#+\s+").ok());
static MARKDOWN_BULLET: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"(?m)^[-*•]\s+").ok());
static STEP_NUMBER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\d+\.?\s*").ok());

/// A redacted projection of solution text. The original is kept only for
/// transient debugging; it is never derivable from the redacted form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sanitized {
	pub original: String,
	pub redacted: String,
}

fn compile(passes: &'static [Pass]) -> Vec<(&'static str, Option<Regex>, &'static str)> {
	passes
		.iter()
		.map(|pass| {
			let regex = Regex::new(pass.pattern)
				.inspect_err(|err| {
					tracing::warn!(pass = pass.name, error = %err, "Skipping redaction pass.");
				})
				.ok();

			(pass.name, regex, pass.replacement)
		})
		.collect()
}

fn apply(passes: &[(&'static str, Option<Regex>, &'static str)], text: &str) -> String {
	let mut out = text.to_string();

	for (_, regex, replacement) in passes {
		let Some(regex) = regex else { continue };

		out = regex.replace_all(&out, *replacement).into_owned();
	}

	out
}

fn collapse_whitespace(text: &str) -> String {
	let mut out = text.to_string();

	if let Some(regex) = BLANK_RUNS.as_ref() {
		out = regex.replace_all(&out, " ").into_owned();
	}
	if let Some(regex) = NEWLINE_RUNS.as_ref() {
		out = regex.replace_all(&out, "\n").into_owned();
	}

	out.trim().to_string()
}

/// Strip personal and confidential substrings, preserving technical content.
pub fn redact(text: &str) -> String {
	if text.is_empty() {
		return String::new();
	}

	collapse_whitespace(&apply(&REDACTION, text))
}

/// Redact, then drop resolution-log boilerplate and signature blocks so the
/// solution reads as a reusable answer instead of a closed ticket.
pub fn generalize(text: &str) -> String {
	if text.is_empty() {
		return String::new();
	}

	collapse_whitespace(&apply(&GENERALIZATION, &apply(&REDACTION, text)))
}

/// Render generalized text as a numbered troubleshooting list.
///
/// Multi-line input renumbers the existing lines. A single block splits on
/// sentence boundaries. A single sentence stays a single unnumbered string.
pub fn format_steps(text: &str) -> String {
	let stripped = strip_markdown(text);
	let lines: Vec<&str> =
		stripped.split('\n').map(str::trim).filter(|line| line.chars().count() > 5).collect();

	if lines.len() > 1 {
		return number_steps(&lines);
	}

	let sentences = split_sentences(&stripped);
	let sentences: Vec<&str> =
		sentences.iter().map(|s| s.as_str()).filter(|s| s.chars().count() > 10).collect();

	if sentences.len() <= 1 {
		return stripped.trim().to_string();
	}

	number_steps(&sentences)
}

/// Full pipeline for user-facing answers: generalize then step-format.
pub fn sanitize(text: &str) -> Sanitized {
	let redacted = format_steps(&generalize(text));

	Sanitized { original: text.to_string(), redacted }
}

/// Drop markdown decoration (bold, italic, headers, leading bullets).
pub fn strip_markdown(text: &str) -> String {
	let mut out = text.to_string();

	for regex in [&MARKDOWN_BOLD, &MARKDOWN_ITALIC] {
		if let Some(regex) = regex.as_ref() {
			out = regex.replace_all(&out, "${1}").into_owned();
		}
	}
	for regex in [&MARKDOWN_HEADER, &MARKDOWN_BULLET] {
		if let Some(regex) = regex.as_ref() {
			out = regex.replace_all(&out, "").into_owned();
		}
	}

	out.trim().to_string()
}

fn number_steps(steps: &[&str]) -> String {
	steps
		.iter()
		.enumerate()
		.map(|(index, step)| {
			let cleaned = STEP_NUMBER
				.as_ref()
				.map(|regex| regex.replace(step, "").into_owned())
				.unwrap_or_else(|| step.to_string());

			format!("{}. {}", index + 1, cleaned.trim())
		})
		.collect::<Vec<_>>()
		.join("\n")
}

fn split_sentences(text: &str) -> Vec<String> {
	let mut out = Vec::new();
	let mut current = String::new();

	for ch in text.chars() {
		current.push(ch);

		if matches!(ch, '.' | '!' | '?') {
			let trimmed = current.trim();

			if !trimmed.is_empty() {
				out.push(trimmed.to_string());
			}

			current.clear();
		}
	}

	let tail = current.trim();

	if !tail.is_empty() {
		out.push(tail.to_string());
	}

	out
}
