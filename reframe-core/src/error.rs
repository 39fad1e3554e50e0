//! Error types for reframe

use thiserror::Error;

/// Main error type for reframe operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("reference frame '{0}' is declared more than once")]
    DuplicateFrame(String),

    #[error("reference frame '{0}' is not declared")]
    UnknownFrame(String),

    #[error("unknown transformation '{0}'")]
    UnknownTransformKind(String),

    #[error("{element} has no '{attr}' attribute")]
    MissingRequiredAttribute { element: String, attr: &'static str },

    #[error("invalid value '{value}' for attribute '{attr}' of {element}")]
    InvalidAttribute {
        element: String,
        attr: &'static str,
        value: String,
    },

    #[error("section '{0}' is missing or empty")]
    MissingSection(&'static str),

    #[error("conversion '{from}' -> '{to}' is declared more than once")]
    DuplicateConversion { from: String, to: String },

    #[error("cannot invert {0}: division by zero")]
    DivisionByZero(String),

    #[error("no conversion path from '{from}' to '{to}'")]
    NoPathFound { from: String, to: String },

    #[error(
        "several conversion paths from '{from}' to '{to}': {}",
        format_paths(.paths)
    )]
    AmbiguousPath {
        from: String,
        to: String,
        paths: Vec<Vec<String>>,
    },

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_paths(paths: &[Vec<String>]) -> String {
    paths
        .iter()
        .map(|path| format!("[{}]", path.join(" -> ")))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for reframe operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_path_message_lists_candidates() {
        let err = Error::AmbiguousPath {
            from: "A".to_string(),
            to: "C".to_string(),
            paths: vec![
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
                vec!["A".to_string(), "C".to_string()],
            ],
        };
        let message = err.to_string();
        assert!(message.contains("[A -> B -> C]"));
        assert!(message.contains("[A -> C]"));
    }
}
