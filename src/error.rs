use thiserror::Error;

/// Taxonomy classifier error types
#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("Missing field '{field}' in record {record}")]
    MissingField { field: String, record: usize },

    #[error("Malformed row at record {record}: {message}")]
    MalformedRow { record: usize, message: String },

    #[error("Invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Parse error at line {line}: {message}")]
    ParseAtLine { line: usize, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
