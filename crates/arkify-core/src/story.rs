use crate::duration::parse_days;
use crate::project::Project;
use crate::types::{PanelId, StoryType};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Reality must exceed the plan by more than this factor to count as a struggle.
pub const STRUGGLE_RATIO: f64 = 1.5;
/// Users strictly above this make a success story.
pub const SUCCESS_MIN_USERS: f64 = 100.0;
/// Revenue strictly above this makes a success story.
pub const SUCCESS_MIN_REVENUE: f64 = 1000.0;

// ---------------------------------------------------------------------------
// StoryArc (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryArc {
    pub story_type: StoryType,
    pub panel_order: Vec<PanelId>,
    pub narrative_flow: String,
}

// ---------------------------------------------------------------------------
// StoryRule
// ---------------------------------------------------------------------------

/// A fn-pointer rule: when `condition` holds the project is told as `story_type`.
pub struct StoryRule {
    pub id: &'static str,
    pub condition: fn(&Project) -> bool,
    pub story_type: StoryType,
}

fn overran_plan(project: &Project) -> bool {
    let (Some(expected), Some(actual)) = (project.expected_timeline(), project.reality_timeline())
    else {
        return false;
    };
    let expected_days = parse_days(Some(expected));
    let reality_days = parse_days(Some(actual));
    reality_days > expected_days * STRUGGLE_RATIO
}

fn strong_results(project: &Project) -> bool {
    let Some(results) = &project.results else {
        return false;
    };
    let users = results.users.unwrap_or(0.0);
    let revenue = results.revenue.unwrap_or(0.0);
    users > SUCCESS_MIN_USERS || revenue > SUCCESS_MIN_REVENUE
}

/// Rules in evaluation order. Order is significant: a project that both
/// overran and did well is a struggle story.
pub fn default_story_rules() -> Vec<StoryRule> {
    vec![
        StoryRule {
            id: "overran_plan",
            condition: overran_plan,
            story_type: StoryType::StruggleStory,
        },
        StoryRule {
            id: "strong_results",
            condition: strong_results,
            story_type: StoryType::SuccessStory,
        },
    ]
}

// ---------------------------------------------------------------------------
// StoryClassifier
// ---------------------------------------------------------------------------

pub struct StoryClassifier {
    rules: Vec<StoryRule>,
}

impl Default for StoryClassifier {
    fn default() -> Self {
        Self::new(default_story_rules())
    }
}

impl StoryClassifier {
    pub fn new(rules: Vec<StoryRule>) -> Self {
        Self { rules }
    }

    pub fn classify(&self, project: &Project) -> StoryType {
        for rule in &self.rules {
            if (rule.condition)(project) {
                tracing::trace!(rule = rule.id, story_type = %rule.story_type, "story rule matched");
                return rule.story_type;
            }
        }
        StoryType::LearningStory
    }
}

pub fn detect_story_type(project: &Project) -> StoryType {
    StoryClassifier::default().classify(project)
}

// ---------------------------------------------------------------------------
// Panel ordering
// ---------------------------------------------------------------------------

/// Panels in reading order for `story_type`. `header` always leads; panels
/// whose data section is missing are left out.
pub fn build_panel_order(story_type: StoryType, project: &Project) -> Vec<PanelId> {
    let has_results = project.results.is_some();
    let has_comparison = project.expectations.is_some() && project.reality.is_some();
    let comparison: &[PanelId] = if has_comparison {
        &[PanelId::Expected, PanelId::Reality]
    } else {
        &[]
    };
    let results: &[PanelId] = if has_results { &[PanelId::Results] } else { &[] };

    let mut order = vec![PanelId::Header];
    match story_type {
        StoryType::StruggleStory => {
            order.extend_from_slice(comparison);
            order.extend_from_slice(results);
            order.extend_from_slice(&[PanelId::TechStack, PanelId::Learning]);
        }
        StoryType::SuccessStory => {
            order.extend_from_slice(results);
            order.push(PanelId::TechStack);
            order.extend_from_slice(comparison);
            order.push(PanelId::Learning);
        }
        StoryType::LearningStory => {
            order.extend_from_slice(comparison);
            order.push(PanelId::TechStack);
            order.extend_from_slice(results);
            order.push(PanelId::Learning);
        }
    }
    order
}

/// Narrative tagline for a story-type label; `"Unknown"` for anything else.
pub fn narrative_flow_for(label: &str) -> &'static str {
    label
        .parse::<StoryType>()
        .map(StoryType::narrative_flow)
        .unwrap_or("Unknown")
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn design_story_arc(project: &Project) -> StoryArc {
    let story_type = detect_story_type(project);
    let panel_order = build_panel_order(story_type, project);
    tracing::debug!(
        project = %project.name,
        story_type = %story_type,
        panels = ?panel_order,
        "designed story arc"
    );
    StoryArc {
        story_type,
        panel_order,
        narrative_flow: story_type.narrative_flow().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{Outlook, Results, Timeline};

    fn with_timelines(expected: &str, actual: &str) -> Project {
        Project {
            expectations: Some(Outlook::with_timeline(expected)),
            reality: Some(Outlook::with_timeline(actual)),
            ..Project::default()
        }
    }

    fn with_users(users: f64) -> Project {
        Project {
            results: Some(Results {
                users: Some(users),
                ..Results::default()
            }),
            ..Project::default()
        }
    }

    /// Every combination of present/absent sections.
    fn section_combinations() -> Vec<Project> {
        let mut out = Vec::new();
        for mask in 0..8u8 {
            let mut p = Project::new("combo");
            if mask & 1 != 0 {
                p.expectations = Some(Outlook::with_timeline("2 days"));
            }
            if mask & 2 != 0 {
                p.reality = Some(Outlook::with_timeline("9 days"));
            }
            if mask & 4 != 0 {
                p.results = Some(Results {
                    users: Some(500.0),
                    ..Results::default()
                });
            }
            out.push(p);
        }
        out
    }

    #[test]
    fn overrun_is_struggle() {
        let project = with_timelines("2 days", "5 days");
        assert_eq!(detect_story_type(&project), StoryType::StruggleStory);
    }

    #[test]
    fn exactly_one_and_a_half_is_not_struggle() {
        let project = with_timelines("2 days", "3 days");
        assert_ne!(detect_story_type(&project), StoryType::StruggleStory);
        assert_eq!(detect_story_type(&project), StoryType::LearningStory);
    }

    #[test]
    fn non_struggle_falls_through_to_results() {
        let mut project = with_timelines("2 days", "3 days");
        project.results = Some(Results {
            revenue: Some(1000.5),
            ..Results::default()
        });
        assert_eq!(detect_story_type(&project), StoryType::SuccessStory);
    }

    #[test]
    fn zero_day_plan_makes_any_overrun_a_struggle() {
        let project = with_timelines("ASAP", "1 day");
        assert_eq!(detect_story_type(&project), StoryType::StruggleStory);
    }

    #[test]
    fn timeline_required_on_both_sides() {
        let project = Project {
            expectations: Some(Outlook::default()),
            reality: Some(Outlook::with_timeline("5 days")),
            ..Project::default()
        };
        assert_eq!(detect_story_type(&project), StoryType::LearningStory);
    }

    #[test]
    fn numeric_timelines_compare() {
        let project = Project {
            expectations: Some(Outlook::with_timeline(Timeline::Days(2.0))),
            reality: Some(Outlook::with_timeline(Timeline::Days(3.5))),
            ..Project::default()
        };
        assert_eq!(detect_story_type(&project), StoryType::StruggleStory);
    }

    #[test]
    fn many_users_is_success() {
        assert_eq!(detect_story_type(&with_users(150.0)), StoryType::SuccessStory);
    }

    fn from_yaml(yaml: &str) -> Project {
        crate::project::ProjectFile::from_yaml(yaml).unwrap().project
    }

    #[test]
    fn float_user_count_is_success() {
        let project = from_yaml("project:\n  name: Floaty\n  results:\n    users: 150.0\n");
        assert_eq!(detect_story_type(&project), StoryType::SuccessStory);
        let project = from_yaml("project:\n  name: Sci\n  results:\n    users: 1.5e2\n");
        assert_eq!(detect_story_type(&project), StoryType::SuccessStory);
    }

    #[test]
    fn negative_users_still_success_on_revenue() {
        let project = from_yaml(
            "project:\n  name: Refunds\n  results:\n    users: -3\n    revenue: 5000\n",
        );
        assert_eq!(detect_story_type(&project), StoryType::SuccessStory);
    }

    #[test]
    fn success_thresholds_are_strict() {
        assert_eq!(detect_story_type(&with_users(100.0)), StoryType::LearningStory);
        let project = Project {
            results: Some(Results {
                revenue: Some(1000.0),
                ..Results::default()
            }),
            ..Project::default()
        };
        assert_eq!(detect_story_type(&project), StoryType::LearningStory);
    }

    #[test]
    fn empty_project_is_learning_story() {
        assert_eq!(
            detect_story_type(&Project::default()),
            StoryType::LearningStory
        );
    }

    #[test]
    fn custom_rules_replace_defaults() {
        let classifier = StoryClassifier::new(vec![StoryRule {
            id: "always",
            condition: |_| true,
            story_type: StoryType::SuccessStory,
        }]);
        assert_eq!(
            classifier.classify(&Project::default()),
            StoryType::SuccessStory
        );
        assert_eq!(
            StoryClassifier::new(Vec::new()).classify(&with_users(10_000.0)),
            StoryType::LearningStory
        );
    }

    #[test]
    fn panel_order_per_story_type_with_all_sections() {
        use PanelId::{Expected, Header, Learning, Reality, TechStack};
        let mut project = with_timelines("1 day", "2 days");
        project.results = with_users(0.0).results;

        assert_eq!(
            build_panel_order(StoryType::StruggleStory, &project),
            vec![Header, Expected, Reality, PanelId::Results, TechStack, Learning]
        );
        assert_eq!(
            build_panel_order(StoryType::SuccessStory, &project),
            vec![Header, PanelId::Results, TechStack, Expected, Reality, Learning]
        );
        assert_eq!(
            build_panel_order(StoryType::LearningStory, &project),
            vec![Header, Expected, Reality, TechStack, PanelId::Results, Learning]
        );
    }

    #[test]
    fn panel_order_with_no_sections() {
        use PanelId::{Header, Learning, TechStack};
        for st in StoryType::all() {
            assert_eq!(
                build_panel_order(*st, &Project::default()),
                vec![Header, TechStack, Learning]
            );
        }
    }

    #[test]
    fn comparison_needs_both_sections() {
        let project = Project {
            expectations: Some(Outlook::with_timeline("2 days")),
            ..Project::default()
        };
        let order = build_panel_order(StoryType::LearningStory, &project);
        assert!(!order.contains(&PanelId::Expected));
        assert!(!order.contains(&PanelId::Reality));
    }

    #[test]
    fn panel_order_invariants_hold_for_every_shape() {
        for project in section_combinations() {
            for st in StoryType::all() {
                let order = build_panel_order(*st, &project);
                assert_eq!(order[0], PanelId::Header);
                assert!(order.contains(&PanelId::TechStack));
                assert!(order.contains(&PanelId::Learning));
                assert_eq!(
                    order.contains(&PanelId::Expected),
                    order.contains(&PanelId::Reality)
                );
                assert_eq!(
                    order.contains(&PanelId::Results),
                    project.results.is_some()
                );
                let mut dedup = order.clone();
                dedup.sort_by_key(|p| p.as_str());
                dedup.dedup();
                assert_eq!(dedup.len(), order.len(), "duplicate panel in {order:?}");
            }
        }
    }

    #[test]
    fn narrative_flow_lookup() {
        assert_eq!(
            narrative_flow_for("struggle_story"),
            "Problem → Struggle → Reality → Perseverance → Wisdom"
        );
        assert_eq!(
            narrative_flow_for("success_story"),
            "Achievement → Method → Reality Check → Wisdom"
        );
        assert_eq!(
            narrative_flow_for("learning_story"),
            "Plan → Reality → Tools → Outcome → Wisdom"
        );
        assert_eq!(narrative_flow_for("epic_saga"), "Unknown");
    }

    #[test]
    fn ai_todo_app_end_to_end() {
        let project = Project {
            name: "AI Todo App".to_string(),
            expectations: Some(Outlook::with_timeline("2 days")),
            reality: Some(Outlook::with_timeline("5 days")),
            results: Some(Results {
                users: Some(127.0),
                ..Results::default()
            }),
            tech_stack: vec![
                "Cursor".to_string(),
                "Claude".to_string(),
                "Next.js".to_string(),
                "Vercel".to_string(),
            ],
            learning: Some("Ship fast".to_string()),
            ..Project::default()
        };

        let arc = design_story_arc(&project);
        assert_eq!(arc.story_type, StoryType::StruggleStory);
        let ids: Vec<&str> = arc.panel_order.iter().map(|p| p.as_str()).collect();
        assert_eq!(
            ids,
            vec!["header", "expected", "reality", "results", "tech_stack", "learning"]
        );
        assert_eq!(
            arc.narrative_flow,
            "Problem → Struggle → Reality → Perseverance → Wisdom"
        );
        assert_eq!(design_story_arc(&project), arc);
    }

    #[test]
    fn arc_serializes_with_snake_case_labels() {
        let arc = design_story_arc(&with_users(150.0));
        let json = serde_json::to_value(&arc).unwrap();
        assert_eq!(json["story_type"], "success_story");
        assert_eq!(json["panel_order"][1], "results");
    }
}
