mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Chat, CompletionProviderConfig, Config, Corpus, EmbeddingProviderConfig, Providers, Qdrant,
	Search, Service, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.corpus.manual_path.trim().is_empty() {
		return Err(Error::Validation {
			message: "corpus.manual_path must be non-empty.".to_string(),
		});
	}
	if cfg.corpus.historical_path.trim().is_empty() {
		return Err(Error::Validation {
			message: "corpus.historical_path must be non-empty.".to_string(),
		});
	}
	if cfg.corpus.reload_interval_secs == 0 {
		return Err(Error::Validation {
			message: "corpus.reload_interval_secs must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions != cfg.storage.qdrant.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.qdrant.vector_dim."
				.to_string(),
		});
	}
	if cfg.providers.completion.models.is_empty() {
		return Err(Error::Validation {
			message: "providers.completion.models must be non-empty.".to_string(),
		});
	}
	if cfg.providers.completion.max_tokens == 0 {
		return Err(Error::Validation {
			message: "providers.completion.max_tokens must be greater than zero.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.search.similarity_threshold) {
		return Err(Error::Validation {
			message: "search.similarity_threshold must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.search.match_count == 0 {
		return Err(Error::Validation {
			message: "search.match_count must be greater than zero.".to_string(),
		});
	}
	if cfg.search.max_results == 0 {
		return Err(Error::Validation {
			message: "search.max_results must be greater than zero.".to_string(),
		});
	}
	if !cfg.search.keyword_match_ratio.is_finite() {
		return Err(Error::Validation {
			message: "search.keyword_match_ratio must be a finite number.".to_string(),
		});
	}
	if !(cfg.search.keyword_match_ratio > 0.0 && cfg.search.keyword_match_ratio <= 1.0) {
		return Err(Error::Validation {
			message: "search.keyword_match_ratio must be greater than zero and at most 1.0."
				.to_string(),
		});
	}
	if cfg.chat.history_window == 0 {
		return Err(Error::Validation {
			message: "chat.history_window must be greater than zero.".to_string(),
		});
	}

	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("completion", &cfg.providers.completion.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	for model in &cfg.providers.completion.models {
		if model.trim().is_empty() {
			return Err(Error::Validation {
				message: "providers.completion.models entries must be non-empty.".to_string(),
			});
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.storage.qdrant.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		cfg.storage.qdrant.api_key = None;
	}
}
