//! Case analysis predictions.

use crate::errors::ClientError;
use crate::models::{
    CaseAnalysis, CaseAnalysisRequest, MlStatus, SettlementPrediction, SettlementRequest,
};
use crate::query::{QueryKey, QueryOptions, QueryResult};

use super::{Page, PageContext, Tone};

pub const FACTS_REQUIRED: &str = "Please enter case facts";
pub const ANALYSIS_DONE: &str = "Analysis completed successfully!";

pub fn outcome_tone(probability: f64) -> Tone {
    if probability > 0.6 {
        Tone::Green
    } else if probability < 0.4 {
        Tone::Red
    } else {
        Tone::Amber
    }
}

pub fn outcome_label(probability: f64) -> &'static str {
    if probability > 0.7 {
        "Strong Win"
    } else if probability > 0.6 {
        "Likely Win"
    } else if probability >= 0.4 {
        "Uncertain"
    } else if probability >= 0.3 {
        "Likely Loss"
    } else {
        "Strong Loss"
    }
}

/// Hearing length class and its badge tone.
pub fn duration_category(hours: f64) -> (&'static str, Tone) {
    if hours < 2.0 {
        ("Quick", Tone::Green)
    } else if hours < 4.0 {
        ("Standard", Tone::Blue)
    } else if hours < 8.0 {
        ("Extended", Tone::Amber)
    } else {
        ("Complex", Tone::Red)
    }
}

/// Signed distance from an even outcome, in percentage points.
pub fn plaintiff_advantage(probability: f64) -> String {
    let points = (probability - 0.5) * 100.0;
    if probability > 0.5 {
        format!("+{:.1}%", points)
    } else {
        format!("{:.1}%", points)
    }
}

/// Two-hour sessions and six-hour court days needed for `hours`.
pub fn sessions_and_days(hours: f64) -> (u32, u32) {
    ((hours / 2.0).ceil() as u32, (hours / 6.0).ceil() as u32)
}

/// Submitted form plus whatever came back.
pub struct MlPage {
    pub request: CaseAnalysisRequest,
    pub analysis: Option<CaseAnalysis>,
    pub error: Option<ClientError>,
    pub models: QueryResult<MlStatus>,
}

impl MlPage {
    /// Show the page without running an analysis.
    pub async fn load(ctx: &PageContext) -> Self {
        Self {
            request: CaseAnalysisRequest::default(),
            analysis: None,
            error: None,
            models: model_status(ctx).await,
        }
    }

    /// Validate and submit the analysis form.
    pub async fn analyze(ctx: &PageContext, request: CaseAnalysisRequest) -> Self {
        let models = model_status(ctx).await;
        let (analysis, error) = match analyze_case(ctx, &request).await {
            Ok(analysis) => (Some(analysis), None),
            Err(e) => (None, Some(e)),
        };
        Self {
            request,
            analysis,
            error,
            models,
        }
    }
}

async fn model_status(ctx: &PageContext) -> QueryResult<MlStatus> {
    let api = &ctx.api.ml;
    ctx.queries
        .fetch(&QueryKey::new("ml-status"), QueryOptions::default(), || {
            api.status()
        })
        .await
}

pub async fn analyze_case(
    ctx: &PageContext,
    request: &CaseAnalysisRequest,
) -> Result<CaseAnalysis, ClientError> {
    if request.facts_text.trim().is_empty() {
        ctx.notify_error(FACTS_REQUIRED);
        return Err(ClientError::InvalidInput(FACTS_REQUIRED.to_string()));
    }

    match ctx.api.ml.analyze_case(request).await {
        Ok(analysis) => {
            ctx.notify_success(ANALYSIS_DONE);
            Ok(analysis)
        }
        Err(e) => {
            // The adapter already reported server and detailed rejections.
            if matches!(e, ClientError::Decode(_)) {
                ctx.notify_error("Failed to analyze case");
            }
            Err(e)
        }
    }
}

pub async fn predict_settlement(
    ctx: &PageContext,
    request: &SettlementRequest,
) -> Result<SettlementPrediction, ClientError> {
    ctx.api.ml.predict_settlement(request).await
}

impl Page for MlPage {
    fn render(&self) -> Vec<String> {
        let mut lines = vec!["AI-Powered Case Analysis".to_string()];

        if let Some(status) = self.models.data() {
            lines.push(format!(
                "Models: {}{}",
                status.status,
                if status.models_loaded { "" } else { " (not loaded)" }
            ));
        }

        let analysis = match &self.analysis {
            Some(analysis) => analysis,
            None => {
                if let Some(e) = &self.error {
                    lines.push(e.message().to_string());
                }
                return lines;
            }
        };

        let p = analysis.outcome_probability;
        let hours = analysis.expected_duration_hours;
        let (category, duration_tone) = duration_category(hours);
        let (sessions, days) = sessions_and_days(hours);

        lines.push(String::new());
        lines.push("Analysis Results".to_string());
        if !analysis.analysis_summary.is_empty() {
            lines.push(analysis.analysis_summary.clone());
        }
        lines.push(format!(
            "Case Outcome: {:.1}% win rate  {} [{}]  Plaintiff Advantage: {}",
            p * 100.0,
            outcome_label(p),
            outcome_tone(p).as_str(),
            plaintiff_advantage(p),
        ));
        lines.push(format!(
            "Hearing Duration: {:.1} hours  {} [{}]  {} minutes, {} sessions, {} days",
            hours,
            category,
            duration_tone.as_str(),
            (hours * 60.0).round(),
            sessions,
            days,
        ));
        lines.push("Recommended Judges".to_string());
        for (rank, judge) in analysis.recommended_judges.iter().enumerate() {
            lines.push(format!(
                "  #{} Judge ID: {}  {:.1}%{}",
                rank + 1,
                judge.judge_id,
                judge.similarity_score * 100.0,
                if rank == 0 { "  Best Match" } else { "" },
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_thresholds() {
        assert_eq!(outcome_label(0.75), "Strong Win");
        assert_eq!(outcome_label(0.7), "Likely Win");
        assert_eq!(outcome_label(0.65), "Likely Win");
        assert_eq!(outcome_label(0.6), "Uncertain");
        assert_eq!(outcome_label(0.4), "Uncertain");
        assert_eq!(outcome_label(0.3), "Likely Loss");
        assert_eq!(outcome_label(0.29), "Strong Loss");

        assert_eq!(outcome_tone(0.61), Tone::Green);
        assert_eq!(outcome_tone(0.6), Tone::Amber);
        assert_eq!(outcome_tone(0.4), Tone::Amber);
        assert_eq!(outcome_tone(0.39), Tone::Red);
    }

    #[test]
    fn test_duration_categories() {
        assert_eq!(duration_category(1.5), ("Quick", Tone::Green));
        assert_eq!(duration_category(2.0), ("Standard", Tone::Blue));
        assert_eq!(duration_category(7.9), ("Extended", Tone::Amber));
        assert_eq!(duration_category(8.0), ("Complex", Tone::Red));
        assert_eq!(sessions_and_days(7.0), (4, 2));
    }

    #[test]
    fn test_plaintiff_advantage() {
        assert_eq!(plaintiff_advantage(0.72), "+22.0%");
        assert_eq!(plaintiff_advantage(0.35), "-15.0%");
        assert_eq!(plaintiff_advantage(0.5), "0.0%");
    }
}
