use helpline_corpus::{
	historical, manual,
	models::{KnowledgeEntry, Source},
};
use helpline_domain::keywords;

use crate::HelplineService;

/// Confidence assigned to curated overrides. Above the usual semantic score
/// range so an override is never accidentally outranked inside its bucket.
pub const MANUAL_SIMILARITY: f32 = 0.95;
/// Confidence assigned to keyword-mined historical rows.
pub const HISTORICAL_SIMILARITY: f32 = 0.8;

impl HelplineService {
	/// One retrieval pass over all three sources, fused and truncated.
	///
	/// Every source degrades to zero candidates on failure; retrieval never
	/// surfaces an error to the caller.
	pub async fn search_candidates(&self, message: &str) -> Vec<KnowledgeEntry> {
		let mut candidates = self.kb_candidates(message).await;
		let query_keywords = keywords::significant_keywords(message);

		if query_keywords.is_empty() {
			tracing::debug!("No significant keywords, flat corpora skipped.");
		} else {
			let snapshot = self.corpus.snapshot();
			let ratio = self.cfg.search.keyword_match_ratio;
			let limit = self.cfg.search.max_results as usize;

			for entry in manual::matching(&snapshot.manual, &query_keywords, ratio, limit) {
				candidates.push(KnowledgeEntry {
					question: helpline_sanitize::redact(&entry.issue),
					answer: helpline_sanitize::sanitize(&entry.solution).redacted,
					source: Source::Manual,
					similarity: MANUAL_SIMILARITY,
				});
			}

			for ticket in historical::matching(&snapshot.historical, &query_keywords, ratio, limit) {
				let question = if ticket.description.trim().is_empty() {
					if ticket.symptom.trim().is_empty() {
						"Reported issue".to_string()
					} else {
						ticket.symptom.clone()
					}
				} else {
					ticket.description.clone()
				};

				candidates.push(KnowledgeEntry {
					question: helpline_sanitize::redact(&question),
					answer: helpline_sanitize::sanitize(&ticket.solution).redacted,
					source: Source::Historical,
					similarity: HISTORICAL_SIMILARITY,
				});
			}
		}

		rank(candidates, self.cfg.search.max_results as usize)
	}

	async fn kb_candidates(&self, message: &str) -> Vec<KnowledgeEntry> {
		let texts = [message.to_string()];
		let vector =
			match self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await {
				Ok(mut vectors) if !vectors.is_empty() => vectors.remove(0),
				Ok(_) => {
					tracing::warn!("Embedding provider returned no vector, semantic pass skipped.");

					return Vec::new();
				},
				Err(err) => {
					tracing::warn!(error = %err, "Embedding failed, semantic pass skipped.");

					return Vec::new();
				},
			};

		if vector.is_empty() || vector.iter().all(|value| *value == 0.) {
			tracing::warn!("Degenerate query embedding, semantic pass skipped.");

			return Vec::new();
		}

		let threshold = self.cfg.search.similarity_threshold;
		let limit = self.cfg.search.match_count as u64;
		let matches = match self.kb.search(vector, threshold, limit).await {
			Ok(matches) => matches,
			Err(err) => {
				tracing::warn!(error = %err, "Knowledge store unavailable, semantic pass skipped.");

				return Vec::new();
			},
		};

		matches
			.into_iter()
			.map(|hit| KnowledgeEntry {
				question: helpline_sanitize::redact(&hit.question),
				answer: helpline_sanitize::sanitize(&hit.answer).redacted,
				source: Source::Kb,
				similarity: hit.similarity.clamp(0., 1.),
			})
			.collect()
	}
}

/// Source priority first, similarity second. The sort is stable, so entries
/// tied on both keys keep the order their source emitted them in.
pub fn rank(mut candidates: Vec<KnowledgeEntry>, limit: usize) -> Vec<KnowledgeEntry> {
	candidates.sort_by(|a, b| {
		b.source
			.priority()
			.cmp(&a.source.priority())
			.then_with(|| b.similarity.total_cmp(&a.similarity))
	});
	candidates.truncate(limit);

	candidates
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entry(question: &str, source: Source, similarity: f32) -> KnowledgeEntry {
		KnowledgeEntry {
			question: question.to_string(),
			answer: "Restart it.".to_string(),
			source,
			similarity,
		}
	}

	#[test]
	fn low_scoring_kb_entries_outrank_high_scoring_historical_rows() {
		let ranked = rank(
			vec![
				entry("old ticket", Source::Historical, HISTORICAL_SIMILARITY),
				entry("kb hit", Source::Kb, 0.1),
			],
			5,
		);

		assert_eq!(ranked[0].question, "kb hit");
		assert_eq!(ranked[1].question, "old ticket");
	}

	#[test]
	fn similarity_orders_within_a_priority_bucket() {
		let ranked = rank(
			vec![
				entry("kb weak", Source::Kb, 0.61),
				entry("override", Source::Manual, MANUAL_SIMILARITY),
				entry("kb strong", Source::Kb, 0.87),
			],
			5,
		);

		assert_eq!(ranked[0].question, "override");
		assert_eq!(ranked[1].question, "kb strong");
		assert_eq!(ranked[2].question, "kb weak");
	}

	#[test]
	fn exact_ties_keep_emission_order() {
		let ranked = rank(
			vec![
				entry("first", Source::Kb, 0.7),
				entry("second", Source::Kb, 0.7),
				entry("third", Source::Kb, 0.7),
			],
			5,
		);
		let questions: Vec<&str> = ranked.iter().map(|entry| entry.question.as_str()).collect();

		assert_eq!(questions, ["first", "second", "third"]);
	}

	#[test]
	fn output_is_capped_at_the_limit() {
		let candidates =
			(0..9).map(|index| entry(&format!("q{index}"), Source::Kb, 0.9)).collect();

		assert_eq!(rank(candidates, 5).len(), 5);
	}
}
