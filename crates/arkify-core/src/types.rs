use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// StoryType
// ---------------------------------------------------------------------------

/// Narrative archetype a breakdown is told as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryType {
    /// Reality ran well past the plan.
    StruggleStory,
    /// The numbers are the hook.
    SuccessStory,
    /// Default: plan, reality and what was learned.
    LearningStory,
}

impl StoryType {
    pub fn all() -> &'static [StoryType] {
        &[
            StoryType::StruggleStory,
            StoryType::SuccessStory,
            StoryType::LearningStory,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StoryType::StruggleStory => "struggle_story",
            StoryType::SuccessStory => "success_story",
            StoryType::LearningStory => "learning_story",
        }
    }

    pub fn narrative_flow(self) -> &'static str {
        match self {
            StoryType::StruggleStory => "Problem → Struggle → Reality → Perseverance → Wisdom",
            StoryType::SuccessStory => "Achievement → Method → Reality Check → Wisdom",
            StoryType::LearningStory => "Plan → Reality → Tools → Outcome → Wisdom",
        }
    }
}

impl fmt::Display for StoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StoryType {
    type Err = crate::error::ArkifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "struggle_story" => Ok(StoryType::StruggleStory),
            "success_story" => Ok(StoryType::SuccessStory),
            "learning_story" => Ok(StoryType::LearningStory),
            _ => Err(crate::error::ArkifyError::InvalidStoryType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PanelId
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    Header,
    Results,
    TechStack,
    Expected,
    Reality,
    Learning,
}

impl PanelId {
    pub fn all() -> &'static [PanelId] {
        &[
            PanelId::Header,
            PanelId::Results,
            PanelId::TechStack,
            PanelId::Expected,
            PanelId::Reality,
            PanelId::Learning,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PanelId::Header => "header",
            PanelId::Results => "results",
            PanelId::TechStack => "tech_stack",
            PanelId::Expected => "expected",
            PanelId::Reality => "reality",
            PanelId::Learning => "learning",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PanelId {
    type Err = crate::error::ArkifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PanelId::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| crate::error::ArkifyError::InvalidPanel(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// PlanFormat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanFormat {
    #[default]
    Yaml,
    Json,
}

impl PlanFormat {
    pub fn extension(self) -> &'static str {
        match self {
            PlanFormat::Yaml => "yaml",
            PlanFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for PlanFormat {
    type Err = crate::error::ArkifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(PlanFormat::Yaml),
            "json" => Ok(PlanFormat::Json),
            _ => Err(crate::error::ArkifyError::InvalidPlanFormat(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
