use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArkifyError {
    #[error("project file not found: {}", .0.display())]
    ProjectNotFound(PathBuf),

    #[error("invalid story type: {0}")]
    InvalidStoryType(String),

    #[error("invalid panel: {0}")]
    InvalidPanel(String),

    #[error("invalid plan format '{0}': expected yaml or json")]
    InvalidPlanFormat(String),

    #[error("git not found on PATH")]
    GitNotInstalled,

    #[error("git command failed: {0}")]
    GitFailed(String),

    #[error("could not parse git output: {0}")]
    GitParse(String),

    #[error("repository has no commits")]
    NoCommits,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ArkifyError>;
