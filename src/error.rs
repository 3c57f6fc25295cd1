use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a database build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("template {path:?} is not valid JSON: {source}")]
    InvalidTemplate {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("template {path:?} must contain a JSON object at the top level")]
    TemplateNotObject { path: PathBuf },
    #[error("{path:?} is not a valid food database: {source}")]
    InvalidDatabase {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read nutrition CSV {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("nutrition CSV {path:?} is not valid UTF-8 text")]
    InvalidEncoding {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Column '{column}' not found")]
    MissingColumn { column: String },
    #[error("row {row}: no value for column '{column}'")]
    MissingField { row: usize, column: String },
    #[error("row {row}: column '{column}' has invalid numeric value {value:?}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
    #[error("failed to serialize food database: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }

    /// Short stable code, handy for matching in tests and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "IO_ERROR",
            Self::InvalidTemplate { .. }
            | Self::TemplateNotObject { .. }
            | Self::InvalidDatabase { .. } => "FORMAT_ERROR",
            Self::Csv { .. }
            | Self::InvalidEncoding { .. }
            | Self::MissingColumn { .. }
            | Self::MissingField { .. } => "FORMAT_ERROR",
            Self::InvalidNumber { .. } => "PARSE_ERROR",
            Self::Serialize(_) => "SERIALIZE_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_taxonomy() {
        let missing = BuildError::MissingColumn {
            column: "Calories".to_string(),
        };
        assert_eq!(missing.code(), "FORMAT_ERROR");
        assert_eq!(missing.to_string(), "Column 'Calories' not found");

        let bad_number = BuildError::InvalidNumber {
            row: 3,
            column: "Fat (g)".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(bad_number.code(), "PARSE_ERROR");
        assert!(bad_number.to_string().contains("row 3"));

        let io = BuildError::io(
            "missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "nope"),
        );
        assert_eq!(io.code(), "IO_ERROR");

        let short_row = BuildError::MissingField {
            row: 2,
            column: "Fat (g)".to_string(),
        };
        assert_eq!(short_row.code(), "FORMAT_ERROR");
    }
}
