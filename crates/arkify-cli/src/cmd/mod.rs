pub mod check;
pub mod config;
pub mod git_stats;
pub mod init;
pub mod kpis;
pub mod plan;
pub mod story;

use anyhow::Context;
use arkify_core::project::{load_project, Project};
use std::path::Path;

pub(crate) fn read_project(file: &Path) -> anyhow::Result<Project> {
    load_project(file).with_context(|| format!("failed to load project from {}", file.display()))
}
