use std::path::Path;

use crate::{Error, Result, models::HistoricalTicket};
use helpline_domain::keywords;

/// Load the flat ticket export. Rows that fail to deserialize are skipped
/// with a warning; one mangled row must not take the whole corpus down.
pub fn load(path: &Path) -> Result<Vec<HistoricalTicket>> {
	if !path.exists() {
		return Ok(Vec::new());
	}

	let mut reader = csv::ReaderBuilder::new()
		.flexible(true)
		.from_path(path)
		.map_err(|err| Error::ParseHistorical { path: path.to_path_buf(), source: err })?;
	let mut out = Vec::new();

	for (index, record) in reader.deserialize::<HistoricalTicket>().enumerate() {
		match record {
			Ok(ticket) => out.push(ticket),
			Err(err) => {
				tracing::warn!(row = index + 1, error = %err, "Skipping malformed export row.");
			},
		}
	}

	Ok(out)
}

/// Rows whose description + solution + symptom concatenation contains at
/// least `min_ratio` of the significant keywords, in export order.
pub fn matching<'a>(
	tickets: &'a [HistoricalTicket],
	query_keywords: &[String],
	min_ratio: f32,
	limit: usize,
) -> Vec<&'a HistoricalTicket> {
	if query_keywords.is_empty() {
		return Vec::new();
	}

	tickets
		.iter()
		.filter(|ticket| {
			let combined =
				format!("{} {} {}", ticket.description, ticket.solution, ticket.symptom);

			keywords::overlap_ratio(query_keywords, &combined) >= min_ratio
		})
		.take(limit)
		.collect()
}
