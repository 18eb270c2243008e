use std::{fs, path::Path};

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Error, Result, models::ManualSolution};
use helpline_domain::keywords;

/// Load the curated override list. A missing file is an empty corpus, not an
/// error; the external "add solution" operation creates it on first write.
pub fn load(path: &Path) -> Result<Vec<ManualSolution>> {
	if !path.exists() {
		return Ok(Vec::new());
	}

	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadCorpus { path: path.to_path_buf(), source: err })?;
	let entries: Vec<ManualSolution> = serde_json::from_str(&raw)
		.map_err(|err| Error::ParseManual { path: path.to_path_buf(), source: err })?;

	Ok(entries)
}

/// Entries whose combined issue + solution text contains at least
/// `min_ratio` of the significant keywords. Emission order is list order.
pub fn matching<'a>(
	entries: &'a [ManualSolution],
	query_keywords: &[String],
	min_ratio: f32,
	limit: usize,
) -> Vec<&'a ManualSolution> {
	if query_keywords.is_empty() {
		return Vec::new();
	}

	entries
		.iter()
		.filter(|entry| {
			let combined = format!("{} {}", entry.issue, entry.solution);

			keywords::overlap_ratio(query_keywords, &combined) >= min_ratio
		})
		.take(limit)
		.collect()
}

/// Append a solution, deduplicating by case-insensitive issue text. Returns
/// whether the list changed; the caller decides whether to reindex.
pub fn append(path: &Path, issue: &str, solution: &str) -> Result<bool> {
	let mut entries = load(path)?;
	let lowered = issue.trim().to_lowercase();

	if entries.iter().any(|entry| entry.issue.trim().to_lowercase() == lowered) {
		return Ok(false);
	}

	let created_at = OffsetDateTime::now_utc().format(&Rfc3339)?;

	entries.push(ManualSolution {
		issue: issue.trim().to_string(),
		solution: solution.trim().to_string(),
		created_at: Some(created_at),
	});

	let raw = serde_json::to_string_pretty(&entries)
		.map_err(|err| Error::ParseManual { path: path.to_path_buf(), source: err })?;

	fs::write(path, raw).map_err(|err| Error::WriteCorpus { path: path.to_path_buf(), source: err })?;

	Ok(true)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entries() -> Vec<ManualSolution> {
		vec![
			ManualSolution {
				issue: "VPN disconnect issue".to_string(),
				solution: "If it keeps disconnecting every few minutes, reset the adapter."
					.to_string(),
				created_at: None,
			},
			ManualSolution {
				issue: "Printer offline".to_string(),
				solution: "Restart the print spooler service.".to_string(),
				created_at: None,
			},
		]
	}

	#[test]
	fn matches_require_sixty_percent_keyword_overlap() {
		let entries = entries();
		let keywords = keywords::significant_keywords("VPN keeps disconnecting every 10 minutes");
		let matched = matching(&entries, &keywords, 0.6, 5);

		assert_eq!(matched.len(), 1);
		assert_eq!(matched[0].issue, "VPN disconnect issue");
	}

	#[test]
	fn no_keywords_means_no_matches() {
		let entries = entries();
		let matched = matching(&entries, &[], 0.6, 5);

		assert!(matched.is_empty());
	}

	#[test]
	fn limit_caps_emitted_matches() {
		let entries: Vec<ManualSolution> = (0..8)
			.map(|index| ManualSolution {
				issue: format!("printer offline desk {index}"),
				solution: "Restart the print spooler.".to_string(),
				created_at: None,
			})
			.collect();
		let keywords = keywords::significant_keywords("printer offline again");
		let matched = matching(&entries, &keywords, 0.6, 5);

		assert_eq!(matched.len(), 5);
	}
}
