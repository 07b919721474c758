use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const ARKIFY_DIR: &str = ".arkify";
pub const CONFIG_FILE: &str = ".arkify/config.yaml";

pub const IMAGE_EXTENSION: &str = "png";
pub const PLAN_SUFFIX: &str = ".plan";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve the configured output directory against `root` unless absolute.
pub fn output_dir(root: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

// ---------------------------------------------------------------------------
// File naming
// ---------------------------------------------------------------------------

/// File stem for a project: lowercased, spaces replaced with hyphens.
pub fn file_stem(project_name: &str) -> String {
    project_name.to_lowercase().replace(' ', "-")
}

pub fn image_file_name(project_name: &str, suffix: &str) -> String {
    format!("{}{suffix}.{IMAGE_EXTENSION}", file_stem(project_name))
}

pub fn plan_file_name(project_name: &str, extension: &str) -> String {
    format!("{}{PLAN_SUFFIX}.{extension}", file_stem(project_name))
}
