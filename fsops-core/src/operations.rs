//! Operation options

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobOptions {
    /// Fold case on both the pattern and the candidate paths.
    pub case_insensitive: bool,
}

impl GlobOptions {
    pub fn case_insensitive() -> Self {
        Self { case_insensitive: true }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateOptions {
    /// Create missing ancestors first.
    pub parents: bool,
}
