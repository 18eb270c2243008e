// std
use std::time::Duration;

// crates.io
use reqwest::{Client, header::HeaderMap};
use serde_json::Value;

use crate::{Error, Result};

/// Chat completion with a fallback model chain: models are tried in the
/// configured order and the first answer wins. Rate limits on free tiers make
/// single-model calls too fragile for a support flow.
pub async fn complete(
	cfg: &helpline_config::CompletionProviderConfig,
	messages: &[Value],
) -> Result<String> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let headers = crate::auth_headers(&cfg.api_key, &cfg.default_headers)?;
	let mut last_error: Option<Error> = None;

	for model in &cfg.models {
		match complete_with_model(&client, &url, headers.clone(), cfg, model, messages).await {
			Ok(text) => return Ok(text),
			Err(err) => {
				tracing::warn!(model = model.as_str(), error = %err, "Completion model failed, trying next.");

				last_error = Some(err);
			},
		}
	}

	Err(Error::AllModelsFailed {
		source: Box::new(last_error.unwrap_or(Error::InvalidResponse {
			message: "No completion model configured.".to_string(),
		})),
	})
}

async fn complete_with_model(
	client: &Client,
	url: &str,
	headers: HeaderMap,
	cfg: &helpline_config::CompletionProviderConfig,
	model: &str,
	messages: &[Value],
) -> Result<String> {
	let body = serde_json::json!({
		"model": model,
		"temperature": cfg.temperature,
		"max_tokens": cfg.max_tokens,
		"messages": messages,
	});
	let res = client.post(url).headers(headers).json(&body).send().await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_completion_response(json)
}

fn parse_completion_response(json: Value) -> Result<String> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.map(str::trim)
		.ok_or_else(|| Error::InvalidResponse {
			message: "Completion response is missing message content.".to_string(),
		})?;

	if content.is_empty() {
		return Err(Error::InvalidResponse {
			message: "Completion response content is empty.".to_string(),
		});
	}

	Ok(content.to_string())
}
