pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read corpus file at {path:?}.")]
	ReadCorpus { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to write corpus file at {path:?}.")]
	WriteCorpus { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to parse manual solutions at {path:?}.")]
	ParseManual { path: std::path::PathBuf, source: serde_json::Error },
	#[error("Failed to parse historical export at {path:?}.")]
	ParseHistorical { path: std::path::PathBuf, source: csv::Error },
	#[error(transparent)]
	Time(#[from] time::error::Format),
	#[error(transparent)]
	Qdrant(#[from] Box<qdrant_client::QdrantError>),
}
impl From<qdrant_client::QdrantError> for Error {
	fn from(err: qdrant_client::QdrantError) -> Self {
		Self::Qdrant(Box::new(err))
	}
}
