//! Case list page.

use crate::models::{Case, CaseQuery, CaseStatus, UrgencyLevel};
use crate::query::{QueryKey, QueryOptions, QueryResult};

use super::{contains_ci, Page, PageContext, Tone, ViewState, LOADING};

/// Filters chosen on the case list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseFilters {
    pub status: Option<CaseStatus>,
    pub urgency: Option<UrgencyLevel>,
    /// Client-side search over case number and title.
    pub search: String,
}

pub fn status_tone(status: CaseStatus) -> Tone {
    match status {
        CaseStatus::Admitted => Tone::Blue,
        CaseStatus::Listed => Tone::Yellow,
        CaseStatus::Hearing => Tone::Orange,
        CaseStatus::Reserved => Tone::Purple,
        CaseStatus::Judgment => Tone::Green,
        CaseStatus::Filed | CaseStatus::Archived | CaseStatus::Unknown => Tone::Gray,
    }
}

pub fn urgency_tone(urgency: UrgencyLevel) -> Tone {
    match urgency {
        UrgencyLevel::HabeasCorpus => Tone::Red,
        UrgencyLevel::Bail => Tone::Orange,
        UrgencyLevel::Injunction => Tone::Yellow,
        UrgencyLevel::Regular => Tone::Gray,
    }
}

/// Cache key for the filtered list. The search term is applied locally and is not
/// part of it.
pub fn cases_key(filters: &CaseFilters, court_id: Option<i64>) -> QueryKey {
    QueryKey::new("cases")
        .with(filters.status)
        .with(filters.urgency)
        .with(court_id)
}

/// Cases whose number or title contains `term`, ignoring case, in fetched order.
pub fn filter_cases<'a>(cases: &'a [Case], term: &str) -> Vec<&'a Case> {
    cases
        .iter()
        .filter(|c| contains_ci(&c.case_number, term) || contains_ci(&c.title, term))
        .collect()
}

pub struct CasesPage {
    pub filters: CaseFilters,
    pub result: QueryResult<Vec<Case>>,
    pub can_create: bool,
}

impl CasesPage {
    pub async fn load(ctx: &PageContext, filters: CaseFilters) -> Self {
        let court_id = ctx.court_id();
        let key = cases_key(&filters, court_id);
        let query = CaseQuery {
            status: filters.status,
            urgency: filters.urgency,
            court_id,
            ..CaseQuery::default()
        };
        let api = ctx.api.cases.clone();

        let result = ctx
            .queries
            .fetch(&key, QueryOptions::default(), || api.list(&query))
            .await;

        Self {
            filters,
            result,
            can_create: ctx.user.as_ref().is_some_and(|u| u.can_create_cases()),
        }
    }

    pub fn view(&self) -> ViewState<Vec<&Case>> {
        let items = self
            .result
            .data()
            .map(|cases| filter_cases(cases, &self.filters.search))
            .unwrap_or_default();
        ViewState::list(&self.result, items)
    }
}

impl Page for CasesPage {
    fn render(&self) -> Vec<String> {
        let mut lines = vec!["Cases".to_string()];
        if self.can_create {
            lines.push("[New Case]".to_string());
        }

        match self.view() {
            ViewState::Idle | ViewState::Loading => lines.push(LOADING.to_string()),
            ViewState::Empty => {
                lines.push("No cases found".to_string());
                lines.push("Try adjusting your search or filter criteria".to_string());
            }
            ViewState::Populated(cases) => {
                for case in cases {
                    lines.push(format!(
                        "{}  {}  [{}:{}]  [{}:{}]  filed {}",
                        case.case_number,
                        case.title,
                        case.status.as_str(),
                        status_tone(case.status).as_str(),
                        case.urgency_level.label(),
                        urgency_tone(case.urgency_level).as_str(),
                        case.filing_date.format("%Y-%m-%d"),
                    ));
                }
            }
        }
        lines
    }
}
