use crate::error::{ArkifyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// Timeline
// ---------------------------------------------------------------------------

/// A duration as a person wrote it: either a bare number of days or free text
/// such as `"2-3 days"` or `"a weekend"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timeline {
    Days(f64),
    Text(String),
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeline::Days(d) => write!(f, "{d} days"),
            Timeline::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Timeline {
    fn from(s: &str) -> Self {
        Timeline::Text(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Outlook (expectations / reality)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Outlook {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub challenges: Vec<String>,
}

impl Outlook {
    pub fn with_timeline(timeline: impl Into<Timeline>) -> Self {
        Self {
            timeline: Some(timeline.into()),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Results {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signups: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// One side project as described in the input YAML.
///
/// Only `name` and `learning` are expected to be filled in; every other
/// section is optional and simply removes a panel from the breakdown when
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub learning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expectations: Option<Outlook>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reality: Option<Outlook>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Results>,
}

/// Fields a breakdown cannot be produced without.
pub const REQUIRED_FIELDS: &[&str] = &["name", "learning"];

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Required fields that are absent or blank, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self
            .learning
            .as_deref()
            .map(|l| l.trim().is_empty())
            .unwrap_or(true)
        {
            missing.push("learning");
        }
        missing
    }

    pub fn expected_timeline(&self) -> Option<&Timeline> {
        self.expectations.as_ref()?.timeline.as_ref()
    }

    pub fn reality_timeline(&self) -> Option<&Timeline> {
        self.reality.as_ref()?.timeline.as_ref()
    }
}

// ---------------------------------------------------------------------------
// ProjectFile (on-disk envelope)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub project: Project,
}

impl ProjectFile {
    pub fn from_yaml(data: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }
}

/// Read and parse a project YAML file.
pub fn load_project(path: &Path) -> Result<Project> {
    if !path.exists() {
        return Err(ArkifyError::ProjectNotFound(path.to_path_buf()));
    }
    let data = std::fs::read_to_string(path)?;
    let file = ProjectFile::from_yaml(&data)?;
    tracing::debug!(path = %path.display(), name = %file.project.name, "loaded project");
    Ok(file.project)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
