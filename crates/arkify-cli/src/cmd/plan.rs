use crate::output::print_json;
use anyhow::Context;
use arkify_core::{config::Config, paths, plan::BreakdownPlan, types::PlanFormat};
use std::path::Path;

pub fn run(
    root: &Path,
    file: &Path,
    out: Option<&Path>,
    format: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let format: PlanFormat = match format {
        Some(f) => f.parse()?,
        None => config.output.format,
    };

    let project = super::read_project(file)?;
    let missing = project.missing_fields();
    if !missing.is_empty() {
        anyhow::bail!("missing required fields: {}", missing.join(", "));
    }

    let plan = BreakdownPlan::build(&project, &config);
    let dir = match out {
        Some(p) => p.to_path_buf(),
        None => paths::output_dir(root, &config.output.dir),
    };
    let path = plan
        .save(&dir, format)
        .with_context(|| format!("failed to write plan to {}", dir.display()))?;

    if json {
        print_json(&serde_json::json!({
            "plan": path,
            "image": plan.image,
            "story_type": plan.story.story_type,
            "panel_order": plan.story.panel_order,
        }))?;
    } else {
        println!("Story:  {} ({})", plan.story.story_type, plan.story.narrative_flow);
        if !plan.layout.overflow.is_empty() {
            let dropped: Vec<&str> = plan.layout.overflow.iter().map(|p| p.as_str()).collect();
            println!("Dropped panels (grid full): {}", dropped.join(", "));
        }
        println!("Plan:   {}", path.display());
        println!("Image:  {}", plan.image);
    }
    Ok(())
}
