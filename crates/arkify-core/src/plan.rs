use crate::config::{Config, Palette};
use crate::error::Result;
use crate::kpi::Kpis;
use crate::layout::LayoutPlan;
use crate::paths;
use crate::project::{Outlook, Project};
use crate::story::{design_story_arc, StoryArc};
use crate::types::PlanFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// TechEntry
// ---------------------------------------------------------------------------

/// Common spellings mapped to their SimpleIcons slug.
const ICON_ALIASES: &[(&str, &str)] = &[
    ("nextjs", "nextdotjs"),
    ("next.js", "nextdotjs"),
    ("claude", "anthropic"),
    ("tailwind", "tailwindcss"),
    ("github api", "github"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechEntry {
    pub name: String,
    pub slug: String,
    /// Two-letter badge used when no logo is available.
    pub initials: String,
}

impl TechEntry {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            slug: icon_slug(name),
            initials: name.chars().take(2).collect::<String>().to_uppercase(),
        }
    }
}

pub fn icon_slug(tech: &str) -> String {
    let normalized = tech.trim().to_lowercase();
    ICON_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, slug)| slug.to_string())
        .unwrap_or(normalized)
}

// ---------------------------------------------------------------------------
// BreakdownPlan
// ---------------------------------------------------------------------------

/// Everything a renderer needs to draw one breakdown image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownPlan {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    pub image: String,
    pub story: StoryArc,
    pub kpis: Kpis,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tech_stack: Vec<TechEntry>,
    #[serde(default)]
    pub learning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expectations: Option<Outlook>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reality: Option<Outlook>,
    pub layout: LayoutPlan,
    pub palette: Palette,
}

impl BreakdownPlan {
    pub fn build(project: &Project, config: &Config) -> Self {
        let story = design_story_arc(project);
        let kpis = Kpis::calculate(project, &config.output.currency);
        let tech_stack = project
            .tech_stack
            .iter()
            .take(config.layout.max_tech_stack)
            .map(|t| TechEntry::new(t))
            .collect();
        let layout = LayoutPlan::build(&story.panel_order, &config.layout);

        Self {
            name: project.name.clone(),
            tagline: project.tagline.clone(),
            image: paths::image_file_name(&project.name, &config.output.image_suffix),
            story,
            kpis,
            tech_stack,
            learning: project.learning.clone().unwrap_or_default(),
            expectations: project.expectations.clone(),
            reality: project.reality.clone(),
            layout,
            palette: config.palette.clone(),
        }
    }

    pub fn render(&self, format: PlanFormat) -> Result<String> {
        Ok(match format {
            PlanFormat::Yaml => serde_yaml::to_string(self)?,
            PlanFormat::Json => serde_json::to_string_pretty(self)?,
        })
    }

    /// Write the plan into `dir` and return the file path.
    pub fn save(&self, dir: &Path, format: PlanFormat) -> Result<PathBuf> {
        let path = dir.join(paths::plan_file_name(&self.name, format.extension()));
        let data = self.render(format)?;
        crate::io::atomic_write(&path, data.as_bytes())?;
        tracing::info!(path = %path.display(), story_type = %self.story.story_type, "wrote breakdown plan");
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
