use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
};

use helpline_corpus::{cache::CorpusCache, manual};

static COUNTER: AtomicU64 = AtomicU64::new(0);

struct TempCorpus {
	manual_path: PathBuf,
	historical_path: PathBuf,
}
impl TempCorpus {
	fn new(manual_json: &str, historical_csv: &str) -> Self {
		let unique = COUNTER.fetch_add(1, Ordering::SeqCst);
		let base = env::temp_dir().join(format!("helpline_corpus_{}_{unique}", std::process::id()));

		fs::create_dir_all(&base).expect("Failed to create temp dir.");

		let manual_path = base.join("solutions.json");
		let historical_path = base.join("monthly_report.csv");

		fs::write(&manual_path, manual_json).expect("Failed to write manual fixture.");
		fs::write(&historical_path, historical_csv).expect("Failed to write historical fixture.");

		Self { manual_path, historical_path }
	}

	fn config(&self, reload_interval_secs: u64) -> helpline_config::Corpus {
		helpline_config::Corpus {
			manual_path: self.manual_path.to_string_lossy().into_owned(),
			historical_path: self.historical_path.to_string_lossy().into_owned(),
			reload_interval_secs,
		}
	}
}
impl Drop for TempCorpus {
	fn drop(&mut self) {
		if let Some(parent) = self.manual_path.parent() {
			let _ = fs::remove_dir_all(parent);
		}
	}
}

const MANUAL_JSON: &str = r#"[
	{ "issue": "VPN disconnect issue", "solution": "Reset the adapter." }
]"#;
const HISTORICAL_CSV: &str = "\
Ticket ID,Description,Category,Solution,Symptom
T-1,User reports VPN drops,Network,Update the VPN client and reconnect.,disconnects repeatedly
T-2,Monitor flickering,Hardware,Replaced display cable.,screen blinks
";

#[test]
fn snapshot_loads_both_corpora() {
	let corpus = TempCorpus::new(MANUAL_JSON, HISTORICAL_CSV);
	let cache = CorpusCache::new(&corpus.config(300));
	let snapshot = cache.snapshot();

	assert_eq!(snapshot.manual.len(), 1);
	assert_eq!(snapshot.historical.len(), 2);
	assert_eq!(snapshot.historical[0].description, "User reports VPN drops");
	assert_eq!(snapshot.historical[1].symptom, "screen blinks");
}

#[test]
fn snapshot_is_cached_until_invalidated() {
	let corpus = TempCorpus::new(MANUAL_JSON, HISTORICAL_CSV);
	let cache = CorpusCache::new(&corpus.config(300));

	assert_eq!(cache.snapshot().manual.len(), 1);

	// A write without invalidation is not visible inside the TTL.
	manual::append(&corpus.manual_path, "Printer offline", "Restart the print spooler.")
		.expect("Append must succeed.");
	assert_eq!(cache.snapshot().manual.len(), 1);

	cache.invalidate();
	assert_eq!(cache.snapshot().manual.len(), 2);
}

#[test]
fn append_dedupes_by_case_insensitive_issue() {
	let corpus = TempCorpus::new(MANUAL_JSON, HISTORICAL_CSV);

	let appended =
		manual::append(&corpus.manual_path, "vpn DISCONNECT issue", "Anything.").expect("ok");

	assert!(!appended);
	assert_eq!(manual::load(&corpus.manual_path).expect("load").len(), 1);

	let appended =
		manual::append(&corpus.manual_path, "Outlook search broken", "Rebuild the index.")
			.expect("ok");

	assert!(appended);

	let entries = manual::load(&corpus.manual_path).expect("load");

	assert_eq!(entries.len(), 2);
	assert!(entries[1].created_at.is_some());
}

#[test]
fn missing_files_degrade_to_empty_snapshot() {
	let corpus = TempCorpus::new(MANUAL_JSON, HISTORICAL_CSV);

	fs::remove_file(&corpus.manual_path).expect("remove");
	fs::remove_file(&corpus.historical_path).expect("remove");

	let cache = CorpusCache::new(&corpus.config(300));
	let snapshot = cache.snapshot();

	assert!(snapshot.manual.is_empty());
	assert!(snapshot.historical.is_empty());
}

#[test]
fn malformed_manual_json_degrades_to_empty() {
	let corpus = TempCorpus::new("{ not json", HISTORICAL_CSV);
	let cache = CorpusCache::new(&corpus.config(300));
	let snapshot = cache.snapshot();

	assert!(snapshot.manual.is_empty());
	assert_eq!(snapshot.historical.len(), 2);
}
