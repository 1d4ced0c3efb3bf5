//! Judge roster.

use crate::errors::ClientError;
use crate::models::{Judge, JudgeQuery, Jurisdiction, MessageResponse, WorkloadAnalysis};
use crate::query::{QueryKey, QueryOptions, QueryResult};

use super::{contains_ci, Page, PageContext, Tone, ViewState, LOADING};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct JudgeFilters {
    pub specialization: Option<Jurisdiction>,
    pub search: String,
}

pub fn availability_tone(is_available: bool) -> Tone {
    if is_available {
        Tone::Green
    } else {
        Tone::Red
    }
}

pub fn judges_key(filters: &JudgeFilters, court_id: Option<i64>) -> QueryKey {
    QueryKey::new("judges")
        .with(court_id)
        .with(filters.specialization)
}

/// Judges whose display name contains `term`, ignoring case.
pub fn filter_judges<'a>(judges: &'a [Judge], term: &str) -> Vec<&'a Judge> {
    judges
        .iter()
        .filter(|j| contains_ci(&j.display_name(), term))
        .collect()
}

pub struct JudgesPage {
    pub filters: JudgeFilters,
    pub result: QueryResult<Vec<Judge>>,
    pub workload: QueryResult<WorkloadAnalysis>,
}

impl JudgesPage {
    pub async fn load(ctx: &PageContext, filters: JudgeFilters) -> Self {
        let court_id = ctx.court_id();
        let key = judges_key(&filters, court_id);
        let workload_key = QueryKey::new("judge-workload").with(court_id);
        let query = JudgeQuery {
            court_id,
            specialization: filters.specialization,
        };
        let api = &ctx.api.judges;

        let result = ctx
            .queries
            .fetch(&key, QueryOptions::default(), || api.list(&query));
        let workload = ctx
            .queries
            .fetch(&workload_key, QueryOptions::default(), || {
                api.workload_analysis(court_id)
            });
        let (result, workload) = futures::join!(result, workload);

        Self {
            filters,
            result,
            workload,
        }
    }

    pub fn view(&self) -> ViewState<Vec<&Judge>> {
        let items = self
            .result
            .data()
            .map(|judges| filter_judges(judges, &self.filters.search))
            .unwrap_or_default();
        ViewState::list(&self.result, items)
    }
}

/// Toggle a judge's availability and mark judge views stale.
pub async fn set_availability(
    ctx: &PageContext,
    judge_id: i64,
    is_available: bool,
) -> Result<MessageResponse, ClientError> {
    ctx.queries
        .mutate(
            ctx.api.judges.update_availability(judge_id, is_available),
            &["judges", "dashboard-judges", "judge-workload"],
        )
        .await
}

impl Page for JudgesPage {
    fn render(&self) -> Vec<String> {
        let mut lines = vec!["Judges".to_string()];

        match self.view() {
            ViewState::Idle | ViewState::Loading => lines.push(LOADING.to_string()),
            ViewState::Empty => {
                lines.push("No judges found".to_string());
                lines.push("Try adjusting your search or filter criteria".to_string());
            }
            ViewState::Populated(judges) => {
                for judge in judges {
                    let specs: Vec<&str> =
                        judge.specializations.iter().map(|s| s.as_str()).collect();
                    lines.push(format!(
                        "{}  {} years experience  [{}]",
                        judge.display_name(),
                        judge.experience_years,
                        specs.join(", "),
                    ));
                    lines.push(format!(
                        "  Workload: {}%  Disposal Rate: {:.1}  Score: {:.1}  {} [{}]",
                        judge.current_workload.unwrap_or(0),
                        judge.disposal_rate.unwrap_or(0.0),
                        judge.performance_score.unwrap_or(0.0),
                        if judge.is_available {
                            "Available"
                        } else {
                            "Unavailable"
                        },
                        availability_tone(judge.is_available).as_str(),
                    ));
                }
            }
        }

        if let Some(analysis) = self.workload.data() {
            if analysis.needs_rebalancing {
                lines.push(String::new());
                lines.push("Workload rebalancing suggested".to_string());
                for s in &analysis.suggestions {
                    lines.push(format!(
                        "  Move {} case(s) from {} to {}: {}",
                        s.suggested_cases_count, s.from_judge, s.to_judge, s.reason
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

    fn judges() -> Vec<Judge> {
        serde_json::from_value(json!([
            {"id": 1, "user": {"full_name": "Justice Meera Rao"}, "is_available": true},
            {"id": 2, "user": {"full_name": "Justice Arun Shah"}, "is_available": false},
            {"id": 3, "user": null, "is_available": true}
        ]))
        .unwrap()
    }

    #[test]
    fn test_name_filter() {
        let judges = judges();
        let ids: Vec<i64> = filter_judges(&judges, "rao").iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![1]);

        let ids: Vec<i64> = filter_judges(&judges, "judge 3").iter().map(|j| j.id).collect();
        assert_eq!(ids, vec![3]);
        assert_eq!(filter_judges(&judges, "").len(), 3);
    }

    #[test]
    fn test_availability_tone() {
        assert_eq!(availability_tone(true), Tone::Green);
        assert_eq!(availability_tone(false), Tone::Red);
    }

    #[test]
    fn test_key_varies_with_specialization() {
        let civil = JudgeFilters {
            specialization: Some(Jurisdiction::Civil),
            ..JudgeFilters::default()
        };
        assert_ne!(
            judges_key(&civil, Some(1)),
            judges_key(&JudgeFilters::default(), Some(1))
        );
    }
}
