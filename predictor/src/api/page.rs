use std::fmt::Write;

use common::config::UiConfig;

use crate::form::ReservationForm;
use crate::form::render::{escape_html, render_inputs};
use crate::services::inference::{PredictionOutcome, PredictionReport};
use crate::services::ModelStatus;

const STYLE: &str = r#"<style>
body { background-color: #F0F8FF; font-family: sans-serif; }
.main-header { font-size: 2.8rem; color: #4CAF50; text-align: center; margin: 2rem 0; }
.feature-box { background-color: #FFFFFF; padding: 1.5rem; border-radius: 10px;
  box-shadow: 0px 4px 6px rgba(0, 0, 0, 0.1); margin: 1rem auto; width: 80%; }
.columns { display: flex; gap: 2rem; }
.column { flex: 1; display: flex; flex-direction: column; }
.column input, .column select { margin-bottom: 0.8rem; }
.banner { width: 80%; margin: 0.5rem auto; padding: 0.8rem; border-radius: 6px; }
.banner.success { background: #E8F5E9; color: #1B5E20; }
.banner.warning { background: #FFF8E1; color: #8D6E00; }
.banner.error { background: #FFEBEE; color: #B71C1C; }
.cta-button { display: block; margin: 2rem auto; padding: 1rem 2rem; background-color: #4CAF50;
  color: white; font-size: 1.2rem; border: none; border-radius: 25px; cursor: pointer; }
.cta-button:hover { background-color: #45A049; }
.cta-button:disabled { background-color: #9E9E9E; cursor: not-allowed; }
pre { width: 80%; margin: 0.5rem auto; background: #FAFAFA; padding: 1rem; overflow-x: auto; }
</style>"#;

fn render_status(out: &mut String, status: &ModelStatus) {
    match status {
        ModelStatus::Ready { name } => {
            let _ = writeln!(
                out,
                r#"<div class="banner success">Model loaded successfully! ({})</div>"#,
                escape_html(name)
            );
        }
        ModelStatus::Degraded { reason } => {
            let _ = writeln!(
                out,
                r#"<div class="banner warning">Model unavailable, prediction is disabled. {}</div>"#,
                escape_html(reason)
            );
        }
    }
}

fn render_report(out: &mut String, report: &PredictionReport) {
    if let Some(record) = &report.record {
        let json = serde_json::to_string_pretty(record).unwrap_or_else(|e| e.to_string());
        let _ = writeln!(
            out,
            "<h4 style=\"text-align:center;\">Input data for prediction:</h4>\n<pre>{}</pre>",
            escape_html(&json)
        );
    }

    match &report.outcome {
        PredictionOutcome::Verdict(view) => {
            let _ = writeln!(
                out,
                r#"<h3 style="color:{}; text-align:center;">{}</h3>"#,
                view.color, view.text
            );
            if let Some(confidence) = &view.confidence {
                let _ = writeln!(
                    out,
                    r#"<p style="text-align:center;">Confidence: {}</p>"#,
                    confidence
                );
            }
        }
        PredictionOutcome::Error(failure) => {
            let _ = writeln!(
                out,
                r#"<div class="banner error">{}</div>"#,
                escape_html(&failure.message)
            );
            if let Some(details) = &failure.details {
                let _ = writeln!(out, "<pre>Error details: {}</pre>", escape_html(details));
            }
        }
    }
}

/// Full page: header, model status, the form and, after a trigger, the output area.
pub fn render_page(
    ui: &UiConfig,
    status: &ModelStatus,
    form: &ReservationForm,
    debug: bool,
    report: Option<&PredictionReport>,
) -> String {
    let title = escape_html(&ui.page_title);
    let mut out = String::with_capacity(16 * 1024);

    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n{STYLE}\n</head>\n<body>\n\
         <h1 class=\"main-header\">🏨 {title} 🏨</h1>\n"
    );
    render_status(&mut out, status);

    out.push_str("<form method=\"post\" action=\"/predict\">\n<div class=\"feature-box\">\n");
    out.push_str("<h2>📝 Enter Hotel Reservation Details</h2>\n");
    out.push_str(&render_inputs(form));
    let _ = writeln!(
        out,
        r#"<label><input type="checkbox" name="debug" value="on"{}> Debug Mode</label>"#,
        if debug { " checked" } else { "" }
    );
    out.push_str("</div>\n");

    let disabled = matches!(status, ModelStatus::Degraded { .. });
    let _ = writeln!(
        out,
        r#"<button type="submit" class="cta-button"{}>🔍 Predict Cancellation</button>"#,
        if disabled { " disabled" } else { "" }
    );
    out.push_str("</form>\n<div id=\"output\">\n");

    if let Some(report) = report {
        render_report(&mut out, report);
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::inference::{FailureKind, PredictionFailure, Verdict, VerdictView};

    fn ready() -> ModelStatus {
        ModelStatus::Ready {
            name: "gbc".to_string(),
        }
    }

    #[test]
    fn test_degraded_page_disables_trigger() {
        let status = ModelStatus::Degraded {
            reason: "file not found".to_string(),
        };
        let html = render_page(
            &UiConfig::default(),
            &status,
            &ReservationForm::default(),
            false,
            None,
        );
        assert!(html.contains("banner warning"));
        assert!(html.contains("file not found"));
        assert!(html.contains(r#"class="cta-button" disabled"#));
    }

    #[test]
    fn test_verdict_renders_color_and_confidence() {
        let report = PredictionReport {
            record: None,
            outcome: PredictionOutcome::Verdict(VerdictView {
                verdict: Verdict::LikelyCancelled,
                label: 1,
                text: Verdict::LikelyCancelled.text(),
                color: Verdict::LikelyCancelled.color(),
                confidence: Some("70.0%".to_string()),
                probability: Some(0.7),
            }),
        };
        let html = render_page(
            &UiConfig::default(),
            &ready(),
            &ReservationForm::default(),
            false,
            Some(&report),
        );
        assert!(html.contains(r#"<h3 style="color:red; text-align:center;">❌ High Chance of Cancellation!</h3>"#));
        assert!(html.contains("Confidence: 70.0%"));
        assert!(!html.contains("cta-button\" disabled"));
    }

    #[test]
    fn test_error_is_escaped_with_details() {
        let report = PredictionReport {
            record: None,
            outcome: PredictionOutcome::Error(PredictionFailure {
                message: "Error during prediction: <bad>".to_string(),
                details: Some("Other(\"<bad>\")".to_string()),
                kind: FailureKind::Classification,
            }),
        };
        let html = render_page(
            &UiConfig::default(),
            &ready(),
            &ReservationForm::default(),
            true,
            Some(&report),
        );
        assert!(html.contains("Error during prediction: &lt;bad&gt;"));
        assert!(html.contains("Error details:"));
        assert!(html.contains(r#"name="debug" value="on" checked"#));
    }
}
