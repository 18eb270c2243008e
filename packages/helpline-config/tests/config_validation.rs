use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use helpline_config::{Config, Error};

const SAMPLE_CONFIG_TOML: &str = include_str!("fixtures/sample_config.toml");

static COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_temp_config(contents: &str) -> PathBuf {
	let nanos =
		SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.subsec_nanos()).unwrap_or_default();
	let unique = COUNTER.fetch_add(1, Ordering::SeqCst);
	let path =
		env::temp_dir().join(format!("helpline_config_{}_{nanos}_{unique}.toml", std::process::id()));

	fs::write(&path, contents).expect("Failed to write temp config.");

	path
}

fn sample_with<F>(mutate: F) -> String
where
	F: FnOnce(&mut toml::Table),
{
	let mut value: Value = toml::from_str(SAMPLE_CONFIG_TOML).expect("Failed to parse fixture.");
	let root = value.as_table_mut().expect("Fixture config must be a table.");

	mutate(root);

	toml::to_string(&value).expect("Failed to render fixture config.")
}

#[test]
fn loads_valid_config() {
	let path = write_temp_config(SAMPLE_CONFIG_TOML);
	let cfg = helpline_config::load(&path).expect("Sample config must load.");

	assert_eq!(cfg.providers.embedding.dimensions, 384);
	assert_eq!(cfg.search.max_results, 5);
	assert_eq!(cfg.providers.completion.models.len(), 2);

	let _ = fs::remove_file(path);
}

#[test]
fn normalize_drops_empty_qdrant_api_key() {
	let path = write_temp_config(SAMPLE_CONFIG_TOML);
	let cfg = helpline_config::load(&path).expect("Sample config must load.");

	assert_eq!(cfg.storage.qdrant.api_key, None);

	let _ = fs::remove_file(path);
}

#[test]
fn rejects_dimension_mismatch() {
	let toml = sample_with(|root| {
		let storage = root.get_mut("storage").and_then(Value::as_table_mut).unwrap();
		let qdrant = storage.get_mut("qdrant").and_then(Value::as_table_mut).unwrap();

		qdrant.insert("vector_dim".to_string(), Value::Integer(768));
	});
	let path = write_temp_config(&toml);
	let err = helpline_config::load(&path).expect_err("Dimension mismatch must be rejected.");

	assert!(matches!(err, Error::Validation { .. }));

	let _ = fs::remove_file(path);
}

#[test]
fn rejects_out_of_range_similarity_threshold() {
	let toml = sample_with(|root| {
		let search = root.get_mut("search").and_then(Value::as_table_mut).unwrap();

		search.insert("similarity_threshold".to_string(), Value::Float(1.5));
	});
	let path = write_temp_config(&toml);
	let err = helpline_config::load(&path).expect_err("Out-of-range threshold must be rejected.");

	assert!(matches!(err, Error::Validation { .. }));

	let _ = fs::remove_file(path);
}

#[test]
fn rejects_empty_completion_model_list() {
	let toml = sample_with(|root| {
		let providers = root.get_mut("providers").and_then(Value::as_table_mut).unwrap();
		let completion = providers.get_mut("completion").and_then(Value::as_table_mut).unwrap();

		completion.insert("models".to_string(), Value::Array(Vec::new()));
	});
	let path = write_temp_config(&toml);
	let err = helpline_config::load(&path).expect_err("Empty model list must be rejected.");

	assert!(matches!(err, Error::Validation { .. }));

	let _ = fs::remove_file(path);
}

#[test]
fn rejects_zero_keyword_match_ratio() {
	let toml = sample_with(|root| {
		let search = root.get_mut("search").and_then(Value::as_table_mut).unwrap();

		search.insert("keyword_match_ratio".to_string(), Value::Float(0.0));
	});
	let path = write_temp_config(&toml);
	let err = helpline_config::load(&path).expect_err("Zero match ratio must be rejected.");

	assert!(matches!(err, Error::Validation { .. }));

	let _ = fs::remove_file(path);
}

#[test]
fn missing_file_reports_read_error() {
	let path = env::temp_dir().join("helpline_config_missing.toml");
	let err = helpline_config::load(&path).expect_err("Missing file must fail.");

	assert!(matches!(err, Error::ReadConfig { .. }));

	let mut cfg: Config =
		toml::from_str(SAMPLE_CONFIG_TOML).expect("Fixture must deserialize directly.");

	cfg.providers.completion.models.clear();
	assert!(matches!(helpline_config::validate(&cfg), Err(Error::Validation { .. })));
}
