use crate::output::print_json;
use arkify_core::story::design_story_arc;
use std::path::Path;

pub fn run(file: &Path, json: bool) -> anyhow::Result<()> {
    let project = super::read_project(file)?;
    let arc = design_story_arc(&project);

    if json {
        print_json(&arc)?;
    } else {
        let panels: Vec<&str> = arc.panel_order.iter().map(|p| p.as_str()).collect();
        println!("Project:  {}", project.name);
        println!("Story:    {}", arc.story_type);
        println!("Flow:     {}", arc.narrative_flow);
        println!("Panels:   {}", panels.join(", "));
    }
    Ok(())
}
