use std::path::PathBuf;

use thiserror::Error;

use crate::theme::TokenCategory;

/// An animation names keyframes that the merged token set doesn't define.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("animation `{animation}` references keyframes `{keyframe}`, which are not defined")]
pub struct DanglingReferenceError {
    pub animation: String,
    pub keyframe: String,
}

/// A token value doesn't have the shape its category requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed token at `{path}`: {reason}")]
pub struct MalformedTokenError {
    /// Dotted path to the offending value, e.g. `colors.primary.500`.
    pub path: String,
    pub reason: String,
}

impl MalformedTokenError {
    pub(crate) fn new(category: TokenCategory, segments: &[&str], reason: impl ToString) -> Self {
        Self {
            path: category.path(segments),
            reason: reason.to_string(),
        }
    }
}

/// Why a registry couldn't be built. No registry exists after either.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error(transparent)]
    DanglingReference(#[from] DanglingReferenceError),
    #[error(transparent)]
    MalformedToken(#[from] MalformedTokenError),
}

impl RegistryError {
    /// Dotted path of the token that failed.
    pub fn path(&self) -> String {
        match self {
            Self::DanglingReference(error) => {
                TokenCategory::Animation.path(&[error.animation.as_str()])
            }
            Self::MalformedToken(error) => error.path.clone(),
        }
    }
}

/// A dotted-path lookup that didn't resolve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("token `{path}` not found: nothing named `{segment}`")]
pub struct NotFoundError {
    pub path: String,
    /// First segment of `path` that didn't resolve.
    pub segment: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read token document `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse token document: {0}")]
    Parse(#[from] serde_json::Error),
}
