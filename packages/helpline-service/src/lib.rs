pub mod admin;
pub mod answer;
pub mod search;

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

pub use admin::AddSolutionRequest;
pub use answer::{Answer, GREETING_REPLY};
use helpline_config::{CompletionProviderConfig, Config, EmbeddingProviderConfig};
use helpline_corpus::{cache::CorpusCache, kb::KnowledgeStore, models::KnowledgeMatch};
use helpline_domain::conversation::ConversationTurn;
use helpline_providers::{completion, embedding};

pub type ServiceResult<T> = Result<T, ServiceError>;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, helpline_providers::Result<Vec<Vec<f32>>>>;
}

pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a CompletionProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, helpline_providers::Result<String>>;
}

/// Seam over the vector knowledge store so the orchestrator is testable
/// without a running backend.
pub trait KnowledgeSearch
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		vector: Vec<f32>,
		threshold: f32,
		limit: u64,
	) -> BoxFuture<'a, helpline_corpus::Result<Vec<KnowledgeMatch>>>;

	fn upsert<'a>(
		&'a self,
		question: &'a str,
		answer: &'a str,
		vector: Vec<f32>,
	) -> BoxFuture<'a, helpline_corpus::Result<()>>;
}

/// Best-effort transcript sink. Write failures are logged and never fail
/// the turn that produced them.
pub trait ChatLogger
where
	Self: Send + Sync,
{
	fn log<'a>(&'a self, turn: &'a ConversationTurn) -> BoxFuture<'a, ServiceResult<()>>;
}

#[derive(Debug)]
pub enum ServiceError {
	InvalidRequest { message: String },
	Provider { message: String },
	Corpus { message: String },
	Storage { message: String },
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub completion: Arc<dyn CompletionProvider>,
}

pub struct HelplineService {
	pub cfg: Config,
	pub corpus: CorpusCache,
	pub kb: Arc<dyn KnowledgeSearch>,
	pub providers: Providers,
	pub logger: Option<Arc<dyn ChatLogger>>,
}

struct DefaultProviders;

impl std::fmt::Display for ServiceError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidRequest { message } => write!(f, "Invalid request: {message}"),
			Self::Provider { message } => write!(f, "Provider error: {message}"),
			Self::Corpus { message } => write!(f, "Corpus error: {message}"),
			Self::Storage { message } => write!(f, "Storage error: {message}"),
		}
	}
}

impl std::error::Error for ServiceError {}

impl From<helpline_providers::Error> for ServiceError {
	fn from(err: helpline_providers::Error) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<helpline_corpus::Error> for ServiceError {
	fn from(err: helpline_corpus::Error) -> Self {
		Self::Corpus { message: err.to_string() }
	}
}

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, helpline_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl CompletionProvider for DefaultProviders {
	fn complete<'a>(
		&'a self,
		cfg: &'a CompletionProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, helpline_providers::Result<String>> {
		Box::pin(completion::complete(cfg, messages))
	}
}

impl KnowledgeSearch for KnowledgeStore {
	fn search<'a>(
		&'a self,
		vector: Vec<f32>,
		threshold: f32,
		limit: u64,
	) -> BoxFuture<'a, helpline_corpus::Result<Vec<KnowledgeMatch>>> {
		Box::pin(KnowledgeStore::search(self, vector, threshold, limit))
	}

	fn upsert<'a>(
		&'a self,
		question: &'a str,
		answer: &'a str,
		vector: Vec<f32>,
	) -> BoxFuture<'a, helpline_corpus::Result<()>> {
		Box::pin(KnowledgeStore::upsert(self, question, answer, vector))
	}
}

impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>, completion: Arc<dyn CompletionProvider>) -> Self {
		Self { embedding, completion }
	}
}

impl Default for Providers {
	fn default() -> Self {
		let provider = Arc::new(DefaultProviders);

		Self { embedding: provider.clone(), completion: provider }
	}
}

impl HelplineService {
	pub fn new(cfg: Config, kb: Arc<dyn KnowledgeSearch>) -> Self {
		let corpus = CorpusCache::new(&cfg.corpus);

		Self { cfg, corpus, kb, providers: Providers::default(), logger: None }
	}

	pub fn with_providers(cfg: Config, kb: Arc<dyn KnowledgeSearch>, providers: Providers) -> Self {
		let corpus = CorpusCache::new(&cfg.corpus);

		Self { cfg, corpus, kb, providers, logger: None }
	}

	pub fn with_logger(mut self, logger: Arc<dyn ChatLogger>) -> Self {
		self.logger = Some(logger);

		self
	}
}
