use crate::output::{print_json, print_table};
use anyhow::Context;
use arkify_core::{config::Config, kpi::Kpis};
use std::path::Path;

pub fn run(root: &Path, file: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let project = super::read_project(file)?;
    let kpis = Kpis::calculate(&project, &config.output.currency);

    if json {
        return print_json(&kpis);
    }

    let mut rows = vec![
        vec!["Time".to_string(), kpis.hours_display.clone()],
        vec!["Cost".to_string(), kpis.cost_display.clone()],
        vec!["Cost/hour".to_string(), kpis.cost_per_hour_display.clone()],
    ];
    if let Some(users) = kpis.users {
        rows.push(vec!["Users".to_string(), users.to_string()]);
    }
    if let Some(signups) = kpis.signups {
        rows.push(vec!["Signups".to_string(), signups.to_string()]);
    }
    if let Some(ref revenue) = kpis.revenue_display {
        rows.push(vec!["Revenue".to_string(), revenue.clone()]);
    }
    if let Some(ref cmp) = kpis.timeline_comparison {
        rows.push(vec![
            "Timeline".to_string(),
            format!(
                "expected {} ({} d), actual {} ({} d)",
                cmp.expected, cmp.expected_days, cmp.actual, cmp.actual_days
            ),
        ]);
    }

    println!("{}", project.name);
    println!("{}", kpis.headline);
    println!();
    print_table(&["METRIC", "VALUE"], rows);
    Ok(())
}
