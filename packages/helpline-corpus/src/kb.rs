use std::collections::HashMap;

use qdrant_client::{
	Payload,
	qdrant::{PointStruct, Query, QueryPointsBuilder, UpsertPointsBuilder, Value, value::Kind},
};
use uuid::Uuid;

use crate::{Result, models::KnowledgeMatch};

/// Vector-indexed store of previously answered question/answer pairs.
pub struct KnowledgeStore {
	pub client: qdrant_client::Qdrant,
	pub collection: String,
	pub vector_dim: u32,
}
impl KnowledgeStore {
	pub fn new(cfg: &helpline_config::Qdrant) -> Result<Self> {
		let mut builder = qdrant_client::Qdrant::from_url(&cfg.url);

		if let Some(api_key) = cfg.api_key.as_deref() {
			builder = builder.api_key(api_key);
		}

		let client = builder.build()?;

		Ok(Self { client, collection: cfg.collection.clone(), vector_dim: cfg.vector_dim })
	}

	/// Nearest-neighbour search over the query embedding, filtered by the
	/// configured score threshold. Points with unreadable payloads are
	/// skipped with a warning.
	pub async fn search(
		&self,
		vector: Vec<f32>,
		threshold: f32,
		limit: u64,
	) -> Result<Vec<KnowledgeMatch>> {
		let query = QueryPointsBuilder::new(self.collection.clone())
			.query(Query::new_nearest(vector))
			.score_threshold(threshold)
			.with_payload(true)
			.limit(limit);
		let response = self.client.query(query).await?;
		let mut out = Vec::with_capacity(response.result.len());

		for point in response.result {
			let Some(question) = payload_str(&point.payload, "question") else {
				tracing::warn!("Knowledge point missing question payload.");

				continue;
			};
			let Some(answer) = payload_str(&point.payload, "answer") else {
				tracing::warn!("Knowledge point missing answer payload.");

				continue;
			};

			out.push(KnowledgeMatch { question, answer, similarity: point.score });
		}

		Ok(out)
	}

	/// Index a resolved question/answer pair under a fresh point id.
	pub async fn upsert(&self, question: &str, answer: &str, vector: Vec<f32>) -> Result<()> {
		let mut payload = Payload::new();

		payload.insert("question", question);
		payload.insert("answer", answer);

		let point = PointStruct::new(Uuid::new_v4().to_string(), vector, payload);

		self.client
			.upsert_points(UpsertPointsBuilder::new(self.collection.clone(), vec![point]).wait(true))
			.await?;

		Ok(())
	}
}

fn payload_str(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
	match payload.get(key).and_then(|value| value.kind.as_ref()) {
		Some(Kind::StringValue(value)) => Some(value.clone()),
		_ => None,
	}
}
