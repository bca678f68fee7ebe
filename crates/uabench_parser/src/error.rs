use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("failed to read rule set {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed rule set yaml")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid rule regex `{pattern}`")]
    BadRegex {
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
}
