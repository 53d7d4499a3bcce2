use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetexError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Malformed version '{version}' on {kind} '{id}'")]
    MalformedVersion {
        kind: &'static str,
        id: String,
        version: String,
    },
    #[error("Missing version on {kind} '{id}'")]
    MissingVersion { kind: &'static str, id: String },
    #[error("Could not read document '{document}': {source}")]
    Io {
        document: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse document '{document}': {source}")]
    Document {
        document: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Archive error in '{document}': {message}")]
    Archive { document: String, message: String },
    #[error("Unknown lookup: {0}")]
    Lookup(String),
    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, NetexError>;

// Helper conversions
impl From<config::ConfigError> for NetexError {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}
