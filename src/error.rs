use thiserror::Error;

/// Error kinds for the extraction and grading pipeline.
///
/// Each variant maps to a distinguishable failure category so a caller can
/// tell "network down" apart from "the site changed its markup" apart from
/// "bad data in a cell".
#[derive(Error, Debug)]
pub enum Error {
    /// Network failure or non-success HTTP response. Never retried here.
    #[error("fetch failed for {url}: {detail}")]
    Fetch { url: String, detail: String },

    /// An expected markup region, label or panel was not found. Usually
    /// means the page layout changed or the identifier does not exist.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// A cell declared numeric still refused to parse after cleanup.
    #[error("non-numeric cell in column {column:?}, row {row}: {value:?}")]
    Normalization {
        column: String,
        row: usize,
        value: String,
    },

    /// A subject failed mid-comparison; wraps the underlying failure.
    #[error("comparison failed for {subject}: {source}")]
    Comparison {
        subject: String,
        #[source]
        source: Box<Error>,
    },

    /// Guild roster exceeds the sequential-fetch cap.
    #[error("guild roster has {found} members, cap is {cap}")]
    RosterTooLarge { found: usize, cap: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
