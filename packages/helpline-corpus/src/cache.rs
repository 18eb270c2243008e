use std::{
	path::PathBuf,
	sync::{Arc, RwLock},
	time::{Duration, Instant},
};

use crate::{
	historical, manual,
	models::{HistoricalTicket, ManualSolution},
};

/// Immutable view over the flat-text corpora, shared by all in-flight
/// requests. Request code never mutates the lists; updates arrive only
/// through `invalidate` after an external write.
#[derive(Clone)]
pub struct CorpusSnapshot {
	pub manual: Arc<Vec<ManualSolution>>,
	pub historical: Arc<Vec<HistoricalTicket>>,
}

struct Loaded {
	snapshot: CorpusSnapshot,
	loaded_at: Instant,
}

/// Process-wide cache for the manual-override list and the historical
/// export, reloaded after `ttl` or on explicit invalidation. Load failures
/// degrade that source to empty with a warning; adapter unavailability is
/// never a user-visible error.
pub struct CorpusCache {
	manual_path: PathBuf,
	historical_path: PathBuf,
	ttl: Duration,
	inner: RwLock<Option<Loaded>>,
}
impl CorpusCache {
	pub fn new(cfg: &helpline_config::Corpus) -> Self {
		Self {
			manual_path: PathBuf::from(&cfg.manual_path),
			historical_path: PathBuf::from(&cfg.historical_path),
			ttl: Duration::from_secs(cfg.reload_interval_secs),
			inner: RwLock::new(None),
		}
	}

	pub fn manual_path(&self) -> &std::path::Path {
		&self.manual_path
	}

	/// Current snapshot, reloading from disk when stale.
	pub fn snapshot(&self) -> CorpusSnapshot {
		{
			let guard = self.inner.read().unwrap_or_else(|err| err.into_inner());

			if let Some(loaded) = guard.as_ref()
				&& loaded.loaded_at.elapsed() < self.ttl
			{
				return loaded.snapshot.clone();
			}
		}

		let mut guard = self.inner.write().unwrap_or_else(|err| err.into_inner());

		// Another request may have reloaded while we waited for the lock.
		if let Some(loaded) = guard.as_ref()
			&& loaded.loaded_at.elapsed() < self.ttl
		{
			return loaded.snapshot.clone();
		}

		let snapshot = self.load();

		*guard = Some(Loaded { snapshot: snapshot.clone(), loaded_at: Instant::now() });

		snapshot
	}

	/// Drop the cached lists so the next snapshot reloads from disk. Called
	/// by the external "add solution" collaborator after writes.
	pub fn invalidate(&self) {
		let mut guard = self.inner.write().unwrap_or_else(|err| err.into_inner());

		*guard = None;
	}

	fn load(&self) -> CorpusSnapshot {
		let manual = match manual::load(&self.manual_path) {
			Ok(entries) => entries,
			Err(err) => {
				tracing::warn!(error = %err, "Manual corpus unavailable, continuing empty.");

				Vec::new()
			},
		};
		let historical = match historical::load(&self.historical_path) {
			Ok(tickets) => tickets,
			Err(err) => {
				tracing::warn!(error = %err, "Historical corpus unavailable, continuing empty.");

				Vec::new()
			},
		};

		tracing::debug!(
			manual = manual.len(),
			historical = historical.len(),
			"Corpus snapshot loaded."
		);

		CorpusSnapshot { manual: Arc::new(manual), historical: Arc::new(historical) }
	}
}
