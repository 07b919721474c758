use crate::output::print_json;
use anyhow::Context;
use arkify_core::git::GitKpiExtractor;
use std::path::Path;

pub fn run(root: &Path, repo: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let repo = repo.unwrap_or(root);
    let stats = GitKpiExtractor::new(repo)?
        .collect()
        .with_context(|| format!("failed to read git history in {}", repo.display()))?;
    let snippet = stats.project_snippet();

    if json {
        print_json(&serde_json::json!({
            "stats": stats,
            "snippet": snippet,
        }))?;
    } else {
        print!("{}", stats.summary());
        println!();
        println!("Project YAML:");
        print!("{}", serde_yaml::to_string(&snippet)?);
    }
    Ok(())
}
