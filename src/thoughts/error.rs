use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThoughtsError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Notes folder not set (run `thoughts init <folder>` first)")]
    DirectoryNotSet,

    #[error("Notes folder or trash folder not initialized")]
    StoreNotInitialized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("{name} was copied to the trash but could not be removed: {source}")]
    PartialMoveFailure {
        name: String,
        #[source]
        source: Box<ThoughtsError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl ThoughtsError {
    /// Maps an io error on a named entry onto the typed kinds callers match on.
    pub fn from_io(err: std::io::Error, name: &str) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ThoughtsError::NotFound(name.to_string()),
            std::io::ErrorKind::PermissionDenied => {
                ThoughtsError::PermissionDenied(name.to_string())
            }
            _ => ThoughtsError::Io(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, ThoughtsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_not_found_becomes_not_found() {
        let err = ThoughtsError::from_io(io::Error::from(io::ErrorKind::NotFound), "a.md");
        assert!(matches!(err, ThoughtsError::NotFound(name) if name == "a.md"));
    }

    #[test]
    fn io_permission_becomes_permission_denied() {
        let err =
            ThoughtsError::from_io(io::Error::from(io::ErrorKind::PermissionDenied), "notes");
        assert!(matches!(err, ThoughtsError::PermissionDenied(_)));
    }

    #[test]
    fn other_io_errors_pass_through() {
        let err = ThoughtsError::from_io(io::Error::other("disk on fire"), "a.md");
        assert!(matches!(err, ThoughtsError::Io(_)));
    }

    #[test]
    fn partial_move_reports_cause() {
        let err = ThoughtsError::PartialMoveFailure {
            name: "a.md".into(),
            source: Box::new(ThoughtsError::PermissionDenied("a.md".into())),
        };
        let text = err.to_string();
        assert!(text.contains("a.md"));
        assert!(text.contains("Permission denied"));
    }
}
