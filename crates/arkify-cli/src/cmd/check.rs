use crate::output::print_json;
use arkify_core::project::REQUIRED_FIELDS;
use std::path::Path;

pub fn run(file: &Path, json: bool) -> anyhow::Result<()> {
    let project = super::read_project(file)?;
    let missing = project.missing_fields();

    if json {
        print_json(&serde_json::json!({
            "ok": missing.is_empty(),
            "missing": missing,
        }))?;
    } else if missing.is_empty() {
        println!("{}: all required fields present", file.display());
    } else {
        println!("Required fields: {}", REQUIRED_FIELDS.join(", "));
    }

    if !missing.is_empty() {
        anyhow::bail!("missing required fields: {}", missing.join(", "));
    }
    Ok(())
}
