use serde::Deserialize;

use crate::{HelplineService, ServiceError, ServiceResult};
use helpline_corpus::manual;

/// A resolved question/answer pair submitted from the admin side.
#[derive(Clone, Debug, Deserialize)]
pub struct AddSolutionRequest {
	pub question: String,
	pub answer: String,
}

impl HelplineService {
	/// Record a resolved solution: append it to the curated override list,
	/// index the pair in the vector store, then drop the corpus cache so the
	/// next search sees the new entry.
	///
	/// Indexing is best-effort; the curated list on disk is the source of
	/// truth and a failed upsert only loses the semantic route to the entry.
	/// Returns whether the list changed.
	pub async fn add_solution(&self, req: &AddSolutionRequest) -> ServiceResult<bool> {
		let question = req.question.trim();
		let answer = req.answer.trim();

		if question.is_empty() || answer.is_empty() {
			return Err(ServiceError::InvalidRequest {
				message: "Question and answer must be non-empty.".to_string(),
			});
		}

		let appended = manual::append(self.corpus.manual_path(), question, answer)?;

		if appended {
			self.index_solution(question, answer).await;
			self.corpus.invalidate();

			tracing::info!(question, "Solution recorded.");
		} else {
			tracing::debug!(question, "Duplicate solution ignored.");
		}

		Ok(appended)
	}

	async fn index_solution(&self, question: &str, answer: &str) {
		let texts = [format!("{question} {answer}")];
		let vector =
			match self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await {
				Ok(mut vectors) if !vectors.is_empty() => vectors.remove(0),
				Ok(_) => {
					tracing::warn!("Embedding provider returned no vector, solution not indexed.");

					return;
				},
				Err(err) => {
					tracing::warn!(error = %err, "Embedding failed, solution not indexed.");

					return;
				},
			};

		if let Err(err) = self.kb.upsert(question, answer, vector).await {
			tracing::warn!(error = %err, "Knowledge store upsert failed, solution not indexed.");
		}
	}
}
