//! Court system: list, hierarchy and utilization statistics.

use crate::models::{Court, CourtHierarchy, CourtLevel, CourtStat, CourtStatistics, HierarchyNode};
use crate::query::{QueryKey, QueryOptions, QueryResult};

use super::{Page, PageContext, Tone};

pub const LOAD_FAILED: &str = "Failed to load courts data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CourtsTab {
    #[default]
    List,
    Hierarchy,
    Stats,
}

impl CourtsTab {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "list" => Some(CourtsTab::List),
            "hierarchy" => Some(CourtsTab::Hierarchy),
            "stats" => Some(CourtsTab::Stats),
            _ => None,
        }
    }
}

pub fn level_tone(level: Option<CourtLevel>) -> Tone {
    match level {
        Some(CourtLevel::SupremeCourt) => Tone::Purple,
        Some(CourtLevel::HighCourt) => Tone::Blue,
        Some(CourtLevel::DistrictCourt) => Tone::Green,
        _ => Tone::Gray,
    }
}

pub fn utilization_tone(utilization: f64) -> Tone {
    if utilization < 50.0 {
        Tone::Green
    } else if utilization < 80.0 {
        Tone::Yellow
    } else {
        Tone::Red
    }
}

/// Mean utilization rounded to a whole percent; 0 with no courts.
pub fn average_utilization(stats: &[CourtStat]) -> i64 {
    if stats.is_empty() {
        return 0;
    }
    let total: f64 = stats.iter().map(|s| s.utilization).sum();
    (total / stats.len() as f64).round() as i64
}

/// Courts at `level`, or all of them.
pub fn filter_by_level(courts: &[Court], level: Option<CourtLevel>) -> Vec<&Court> {
    courts
        .iter()
        .filter(|c| level.is_none() || c.level == level)
        .collect()
}

/// Depth-first walk of the tree, paired with each node's depth.
pub fn flatten_hierarchy(nodes: &[HierarchyNode]) -> Vec<(usize, &HierarchyNode)> {
    fn walk<'a>(nodes: &'a [HierarchyNode], depth: usize, out: &mut Vec<(usize, &'a HierarchyNode)>) {
        for node in nodes {
            out.push((depth, node));
            walk(&node.children, depth + 1, out);
        }
    }

    let mut out = Vec::new();
    walk(nodes, 0, &mut out);
    out
}

fn level_label(level: Option<CourtLevel>) -> String {
    level.map(|l| l.label()).unwrap_or_else(|| "-".to_string())
}

pub struct CourtsPage {
    pub tab: CourtsTab,
    pub level: Option<CourtLevel>,
    pub courts: QueryResult<Vec<Court>>,
    pub hierarchy: QueryResult<CourtHierarchy>,
    pub statistics: QueryResult<CourtStatistics>,
}

impl CourtsPage {
    pub async fn load(ctx: &PageContext, tab: CourtsTab, level: Option<CourtLevel>) -> Self {
        let api = &ctx.api.courts;
        let courts_key = QueryKey::new("courts");
        let hierarchy_key = QueryKey::new("court-hierarchy");
        let statistics_key = QueryKey::new("court-statistics");

        let courts = ctx
            .queries
            .fetch(&courts_key, QueryOptions::default(), || api.list(None));
        let hierarchy = ctx
            .queries
            .fetch(&hierarchy_key, QueryOptions::default(), || api.hierarchy());
        let statistics = ctx
            .queries
            .fetch(&statistics_key, QueryOptions::default(), || api.statistics());
        let (courts, hierarchy, statistics) = futures::join!(courts, hierarchy, statistics);

        if courts.is_error() || hierarchy.is_error() || statistics.is_error() {
            ctx.notify_error(LOAD_FAILED);
        }

        Self {
            tab,
            level,
            courts,
            hierarchy,
            statistics,
        }
    }
}

impl Page for CourtsPage {
    fn render(&self) -> Vec<String> {
        let mut lines = vec!["Court System Management".to_string()];

        if let Some(stats) = self.statistics.data() {
            lines.push(format!(
                "Total Courts: {}  Total Cases: {}  Total Judges: {}  Avg Utilization: {}%",
                stats.total_courts,
                stats.total_cases,
                stats.total_judges,
                average_utilization(&stats.court_statistics),
            ));
        }
        lines.push(String::new());

        match self.tab {
            CourtsTab::List => {
                let courts = self.courts.data().map(Vec::as_slice).unwrap_or_default();
                let shown = filter_by_level(courts, self.level);
                if shown.is_empty() {
                    lines.push("No courts found".to_string());
                }
                for court in shown {
                    lines.push(format!(
                        "{} [{}:{}]  {}  {}",
                        court.name,
                        level_label(court.level),
                        level_tone(court.level).as_str(),
                        court.jurisdiction.map(|j| j.as_str()).unwrap_or("-"),
                        court.location,
                    ));
                    if let Some(parent) = &court.parent_court_name {
                        lines.push(format!("  Parent: {}", parent));
                    }
                }
            }
            CourtsTab::Hierarchy => {
                let nodes = self
                    .hierarchy
                    .data()
                    .map(|h| h.hierarchy.as_slice())
                    .unwrap_or_default();
                for (depth, node) in flatten_hierarchy(nodes) {
                    lines.push(format!(
                        "{}{} [{}:{}]  {}",
                        "  ".repeat(depth),
                        node.name,
                        level_label(node.level),
                        level_tone(node.level).as_str(),
                        node.location,
                    ));
                }
            }
            CourtsTab::Stats => {
                let stats = self
                    .statistics
                    .data()
                    .map(|s| s.court_statistics.as_slice())
                    .unwrap_or_default();
                for stat in stats {
                    lines.push(format!(
                        "{} [{}]  cases {}  judges {}  utilization {:.1}% [{}]",
                        stat.court_name,
                        level_label(stat.level),
                        stat.cases_count,
                        stat.judges_count,
                        stat.utilization,
                        utilization_tone(stat.utilization).as_str(),
                    ));
                }
            }
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn stat(utilization: f64) -> CourtStat {
        CourtStat {
            court_id: 1,
            court_name: "Court".into(),
            level: None,
            cases_count: 0,
            judges_count: 0,
            utilization,
        }
    }

    #[test]
    fn test_utilization() {
        assert_eq!(utilization_tone(49.9), Tone::Green);
        assert_eq!(utilization_tone(50.0), Tone::Yellow);
        assert_eq!(utilization_tone(80.0), Tone::Red);
        assert_eq!(average_utilization(&[]), 0);
        assert_eq!(average_utilization(&[stat(40.0), stat(61.0)]), 51);
    }

    #[test]
    fn test_level_tone() {
        assert_eq!(level_tone(Some(CourtLevel::SupremeCourt)), Tone::Purple);
        assert_eq!(level_tone(Some(CourtLevel::HighCourt)), Tone::Blue);
        assert_eq!(level_tone(Some(CourtLevel::DistrictCourt)), Tone::Green);
        assert_eq!(level_tone(None), Tone::Gray);
    }

    #[test]
    fn test_flatten_hierarchy() {
        let nodes: Vec<HierarchyNode> = serde_json::from_value(json!([
            {"id": 1, "name": "Supreme Court", "level": "supreme_court", "children": [
                {"id": 2, "name": "High Court A", "level": "high_court", "children": [
                    {"id": 4, "name": "District Court A1", "level": "district_court"}
                ]},
                {"id": 3, "name": "High Court B", "level": "high_court"}
            ]}
        ]))
        .unwrap();

        let flat: Vec<(usize, i64)> = flatten_hierarchy(&nodes)
            .into_iter()
            .map(|(d, n)| (d, n.id))
            .collect();
        assert_eq!(flat, vec![(0, 1), (1, 2), (2, 4), (1, 3)]);
    }

    #[test]
    fn test_level_filter() {
        let courts: Vec<Court> = serde_json::from_value(json!([
            {"id": 1, "name": "SC", "level": "supreme_court"},
            {"id": 2, "name": "HC", "level": "high_court"}
        ]))
        .unwrap();
        assert_eq!(filter_by_level(&courts, None).len(), 2);
        assert_eq!(filter_by_level(&courts, Some(CourtLevel::HighCourt))[0].id, 2);
    }
}
