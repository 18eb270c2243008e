use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub corpus: Corpus,
	pub storage: Storage,
	pub providers: Providers,
	pub search: Search,
	pub chat: Chat,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Corpus {
	/// Curated manual-override solutions, a JSON array of `{issue, solution}`.
	pub manual_path: String,
	/// Flat historical-ticket export with description/solution/symptom columns.
	pub historical_path: String,
	pub reload_interval_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub qdrant: Qdrant,
}

#[derive(Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub collection: String,
	pub vector_dim: u32,
	pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub completion: CompletionProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionProviderConfig {
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	/// Tried in order until one model answers.
	pub models: Vec<String>,
	pub temperature: f32,
	pub max_tokens: u32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub struct Search {
	pub similarity_threshold: f32,
	pub match_count: u32,
	#[serde(default = "default_max_results")]
	pub max_results: u32,
	#[serde(default = "default_keyword_match_ratio")]
	pub keyword_match_ratio: f32,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
	/// How many prior turns are replayed to the completion provider.
	#[serde(default = "default_history_window")]
	pub history_window: u32,
}

fn default_max_results() -> u32 {
	5
}

fn default_keyword_match_ratio() -> f32 {
	0.6
}

fn default_history_window() -> u32 {
	6
}
