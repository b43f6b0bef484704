use std::path::PathBuf;

/// Errors raised at the fallible edges of the crate: reading snapshots and
/// profiles, reading or writing configuration, and parsing command-line
/// assignments.
///
/// Detection and filling themselves never fail; they degrade to skipping
/// the field.
#[derive(Debug, thiserror::Error)]
pub enum AtsError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid page snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),
    #[error("invalid snapshot url: {url}")]
    SnapshotUrl { url: String },
    #[error("invalid profile: {0}")]
    Profile(#[source] serde_json::Error),
    #[error("invalid configuration in {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("cannot serialize configuration: {0}")]
    ConfigFormat(#[from] toml::ser::Error),
    #[error("invalid assignment '{input}' (expected <field_type>=<value>)")]
    InvalidAssignment { input: String },
    #[error("unknown field type: {0}")]
    UnknownFieldType(String),
}

impl AtsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = AtsError> = std::result::Result<T, E>;
