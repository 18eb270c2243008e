use serde::{Deserialize, Serialize};

/// Which corpus produced a candidate. Trust is ordered by source, not by the
/// numeric similarity, because the scoring scales are not comparable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
	Kb,
	Manual,
	Historical,
}
impl Source {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Kb => "kb",
			Self::Manual => "manual",
			Self::Historical => "historical",
		}
	}

	/// Ranking bucket: curated and embedded sources dominate keyword-mined
	/// historical rows regardless of score.
	pub fn priority(self) -> u8 {
		match self {
			Self::Kb | Self::Manual => 10,
			Self::Historical => 0,
		}
	}
}

/// One ranked candidate for a single search pass. `similarity` is only
/// comparable within the pass that produced it: semantic cosine for KB
/// entries, fixed confidence constants for the flat-text sources.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnowledgeEntry {
	pub question: String,
	pub answer: String,
	pub source: Source,
	pub similarity: f32,
}

/// Curated admin-entered override, stored as a JSON array on disk.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ManualSolution {
	pub issue: String,
	pub solution: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub created_at: Option<String>,
}

/// One row of the flat historical-ticket export. Other export columns exist
/// but only these three take part in matching.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct HistoricalTicket {
	#[serde(rename = "Description", default)]
	pub description: String,
	#[serde(rename = "Solution", default)]
	pub solution: String,
	#[serde(rename = "Symptom", default)]
	pub symptom: String,
}

/// Raw hit from the vector knowledge store.
#[derive(Clone, Debug)]
pub struct KnowledgeMatch {
	pub question: String,
	pub answer: String,
	pub similarity: f32,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kb_and_manual_share_the_top_priority_bucket() {
		assert_eq!(Source::Kb.priority(), Source::Manual.priority());
		assert!(Source::Manual.priority() > Source::Historical.priority());
	}
}
