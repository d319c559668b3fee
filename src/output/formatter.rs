use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::api::{Dashboard, DecisionKind, HealthStatus, Prediction, Sample};
use crate::auth::SignupForm;
use crate::estimator::{CreditBand, FactorContribution, RiskLevel, ScoreResult};
use crate::store::AuthSession;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap `text` for display under `indent`, to the terminal width when known.
fn wrap_indented(text: &str, indent: &str, term_width: Option<usize>) -> String {
    let width = match term_width {
        Some(w) if w > indent.len() + 20 => w - indent.len(),
        Some(_) => 20,
        None => return format!("{}{}", indent, text),
    };
    wrap_text(text, width)
        .into_iter()
        .map(|line| format!("{}{}", indent, line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn paint_band(band: CreditBand, use_colors: bool) -> String {
    if !use_colors {
        return band.to_string();
    }
    match band {
        CreditBand::Excellent => band.green().bold().to_string(),
        CreditBand::Good => band.cyan().bold().to_string(),
        CreditBand::Fair => band.yellow().bold().to_string(),
        CreditBand::Poor => band.red().bold().to_string(),
    }
}

fn paint_risk(risk: RiskLevel, use_colors: bool) -> String {
    if !use_colors {
        return risk.to_string();
    }
    match risk {
        RiskLevel::Low => risk.green().to_string(),
        RiskLevel::Medium => risk.yellow().to_string(),
        RiskLevel::High => risk.red().to_string(),
    }
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Format the results view: score, band, risk, ratios, numbered tips, summary.
pub fn format_result(result: &ScoreResult, use_colors: bool) -> String {
    render_result(result, use_colors, get_terminal_width())
}

fn render_result(result: &ScoreResult, use_colors: bool, term_width: Option<usize>) -> String {
    let score = if use_colors {
        result.score.bold().to_string()
    } else {
        result.score.to_string()
    };

    let mut lines = vec![
        heading("Your CIBIL Score Analysis", use_colors),
        String::new(),
        format!("  Score: {} / 900", score),
        format!("  Band: {}", paint_band(result.credit_band, use_colors)),
        format!("  Risk Level: {}", paint_risk(result.risk_level, use_colors)),
        format!("  Credit Utilization: {}%", result.credit_utilization),
        format!("  Debt-to-Income Ratio: {:.1}%", result.debt_to_income_ratio),
        String::new(),
        heading("Tips to Improve Your Score", use_colors),
    ];

    for (idx, tip) in result.tips.iter().enumerate() {
        let title = format!("{:>2}. {}", idx + 1, tip.title);
        lines.push(heading(&title, use_colors));
        lines.push(wrap_indented(&tip.description, "    ", term_width));
    }

    lines.push(String::new());
    lines.push(wrap_indented(&result.summary(), "", term_width));
    lines.join("\n")
}

/// Format the per-factor adjustments (for verbose mode)
pub fn format_breakdown(breakdown: &[FactorContribution], base: f64, use_colors: bool) -> String {
    let label_width = breakdown
        .iter()
        .map(|factor| factor.label.len())
        .max()
        .unwrap_or(0);

    let mut lines = vec![format!("  {:<width$}  {:>6}", "Base", base, width = label_width)];
    for factor in breakdown {
        let points = format!("{:+}", factor.points);
        let points = if !use_colors || factor.points == 0.0 {
            format!("{:>6}", points)
        } else if factor.points > 0.0 {
            format!("{:>6}", points).green().to_string()
        } else {
            format!("{:>6}", points).red().to_string()
        };
        lines.push(format!(
            "  {:<width$}  {}  {}",
            factor.label,
            points,
            factor.description,
            width = label_width
        ));
    }
    lines.join("\n")
}

/// Format a prediction returned by the API
pub fn format_prediction(prediction: &Prediction, use_colors: bool) -> String {
    let decision = if use_colors {
        match prediction.decision_kind() {
            DecisionKind::Approved => prediction.loan_decision.green().bold().to_string(),
            DecisionKind::Review => prediction.loan_decision.yellow().bold().to_string(),
            DecisionKind::Declined => prediction.loan_decision.red().bold().to_string(),
            DecisionKind::Other => prediction.loan_decision.bold().to_string(),
        }
    } else {
        prediction.loan_decision.clone()
    };

    let mut lines = vec![
        heading("Prediction", use_colors),
        format!("  Score Band: {}", prediction.credit_score_band),
        format!("  Risk Score: {:.1} / 100", prediction.risk_score),
        format!("  Risk Level: {}", prediction.risk_level),
        format!("  Loan Decision: {}", decision),
        format!("  Approval Chance: {}", prediction.approval_chance),
        format!("  Suggested Interest Rate: {}", prediction.suggested_interest_rate),
    ];

    let insights = &prediction.insights;
    if !insights.score_analysis.is_empty() {
        lines.push(String::new());
        lines.push(insights.score_analysis.clone());
    }
    if !insights.warnings.is_empty() {
        lines.push(String::new());
        lines.push(heading("Warnings", use_colors));
        for warning in &insights.warnings {
            lines.push(format!("  - {}", warning));
        }
    }
    if !insights.recommendations.is_empty() {
        lines.push(String::new());
        lines.push(heading("Recommendations", use_colors));
        for recommendation in &insights.recommendations {
            lines.push(format!("  - {}", recommendation));
        }
    }

    if let Some(timestamp) = prediction.timestamp {
        lines.push(String::new());
        lines.push(format!("Predicted at {}", timestamp.format("%Y-%m-%d %H:%M:%S")));
    }

    lines.join("\n")
}

/// Format the API's sample applicants
pub fn format_samples(samples: &[Sample], use_colors: bool) -> String {
    if samples.is_empty() {
        return "No sample data available.".to_string();
    }

    samples
        .iter()
        .enumerate()
        .map(|(idx, sample)| {
            let data = &sample.data;
            format!(
                "{}\n    age {}, income {}, loan {}, tenure {} months, utilization {:.0}%, \
                 missed {}, active loans {}, history {} years",
                heading(&format!("{:>2}. {}", idx + 1, sample.description), use_colors),
                data.age,
                data.monthly_income,
                data.loan_amount,
                data.loan_tenure_months,
                data.credit_utilization * 100.0,
                data.missed_payments,
                data.total_active_loans,
                data.credit_history_years
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn loaded_mark(loaded: bool, use_colors: bool) -> String {
    match (loaded, use_colors) {
        (true, true) => "loaded".green().to_string(),
        (false, true) => "missing".red().to_string(),
        (true, false) => "loaded".to_string(),
        (false, false) => "missing".to_string(),
    }
}

/// Format the `/health` response
pub fn format_health(health: &HealthStatus, base_url: &str, use_colors: bool) -> String {
    let status = match (health.is_healthy(), use_colors) {
        (true, true) => health.status.green().bold().to_string(),
        (false, true) => health.status.red().bold().to_string(),
        _ => health.status.clone(),
    };
    [
        format!("API {} is {}", base_url, status),
        format!("  Model: {}", loaded_mark(health.model_loaded, use_colors)),
        format!("  Scaler: {}", loaded_mark(health.scaler_loaded, use_colors)),
        format!("  Encoder: {}", loaded_mark(health.encoder_loaded, use_colors)),
        format!("  Features: {}", loaded_mark(health.features_loaded, use_colors)),
    ]
    .join("\n")
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Format model performance and feature importance
pub fn format_dashboard(dashboard: &Dashboard, use_colors: bool) -> String {
    let metrics = &dashboard.metrics;
    let mut lines = vec![
        heading("Model Performance", use_colors),
        format!("  Accuracy:  {:>6}", percent(metrics.accuracy)),
        format!("  Precision: {:>6}", percent(metrics.precision)),
        format!("  Recall:    {:>6}", percent(metrics.recall)),
        format!("  F1 Score:  {:>6}", percent(metrics.f1_score)),
    ];

    let reports = metrics.class_reports();
    if !reports.is_empty() {
        lines.push(String::new());
        lines.push(heading("Per-Class Performance", use_colors));
        lines.push(format!(
            "  {:<10} {:>9} {:>7} {:>8} {:>7}",
            "Class", "Precision", "Recall", "F1", "Support"
        ));
        for (class, report) in &reports {
            lines.push(format!(
                "  {:<10} {:>9} {:>7} {:>8} {:>7}",
                class,
                percent(report.precision),
                percent(report.recall),
                percent(report.f1_score),
                report.support
            ));
        }
    }

    if !dashboard.feature_importance.is_empty() {
        lines.push(String::new());
        lines.push(heading("Feature Importance", use_colors));
        let name_width = dashboard
            .feature_importance
            .iter()
            .map(|f| f.feature.len())
            .max()
            .unwrap_or(0);
        for (idx, feature) in dashboard.feature_importance.iter().enumerate() {
            lines.push(format!(
                "  {:>2}. {:<width$}  {}",
                idx + 1,
                feature.feature,
                percent(feature.importance),
                width = name_width
            ));
        }
    }

    for note in &dashboard.notes {
        lines.push(String::new());
        lines.push(format!("Note: {}", note));
    }

    lines.join("\n")
}

/// Format the signed-in user line
pub fn format_session(session: Option<&AuthSession>) -> String {
    match session {
        Some(session) => format!(
            "Signed in as {} since {}",
            session.email,
            session.signed_in_at.format("%Y-%m-%d %H:%M UTC")
        ),
        None => "Not signed in.".to_string(),
    }
}

/// Welcome line after a successful sign-up
pub fn format_welcome(form: &SignupForm) -> String {
    format!("Welcome, {}! Account created for {}.", form.full_name.trim(), form.email.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FeatureImportance, Insights, ModelMetrics, PredictRequest};
    use crate::estimator::{estimate, engine::BASE_SCORE};
    use crate::profile::{validate_form, ProfileForm};
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeMap;

    fn sample_result() -> ScoreResult {
        let profile = validate_form(&ProfileForm::default()).unwrap();
        estimate(&profile)
    }

    fn sample_prediction() -> Prediction {
        Prediction {
            credit_score_band: "Good".to_string(),
            risk_score: 34.56,
            loan_decision: "APPROVED".to_string(),
            risk_level: "MODERATE".to_string(),
            suggested_interest_rate: "10.5% - 12.5%".to_string(),
            approval_chance: "High (75-90%)".to_string(),
            features: BTreeMap::new(),
            insights: Insights {
                warnings: vec!["High credit utilization detected.".to_string()],
                recommendations: vec![],
                score_analysis: "Your credit score is categorized as 'Good'.".to_string(),
            },
            timestamp: None,
        }
    }

    #[test]
    fn test_wrap_text() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_text_long_word() {
        let lines = wrap_text("a extraordinarily b", 5);
        assert_eq!(lines, vec!["a", "extraordinarily", "b"]);
    }

    #[test]
    fn test_wrap_indented_without_terminal() {
        assert_eq!(wrap_indented("one two", "  ", None), "  one two");
    }

    #[test]
    fn test_wrap_indented_narrow_terminal() {
        let wrapped = wrap_indented("aaaa bbbb cccc dddd eeee ffff", "    ", Some(10));
        for line in wrapped.lines() {
            assert!(line.starts_with("    "));
        }
        assert!(wrapped.lines().count() > 1);
    }

    #[test]
    fn test_format_result_plain() {
        let output = render_result(&sample_result(), false, None);
        assert!(output.contains("Score: 755 / 900"));
        assert!(output.contains("Band: Excellent"));
        assert!(output.contains("Risk Level: Low"));
        assert!(output.contains("Credit Utilization: 35%"));
        assert!(output.contains("Debt-to-Income Ratio: 33.3%"));
        assert!(output.contains(" 1. "));
        assert!(output.contains("falls into the Excellent category"));
    }

    #[test]
    fn test_format_result_numbers_every_tip() {
        let result = sample_result();
        let output = render_result(&result, false, Some(40));
        let last = format!("{:>2}. {}", result.tips.len(), result.tips[result.tips.len() - 1].title);
        assert!(output.contains(&last));
    }

    #[test]
    fn test_format_breakdown() {
        let result = sample_result();
        let output = format_breakdown(&result.breakdown, BASE_SCORE, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), result.breakdown.len() + 1);
        assert!(lines[0].contains("Base"));
        assert!(lines[0].contains("700"));
        assert!(output.contains("Age"));
        assert!(output.contains("+20"));
    }

    #[test]
    fn test_format_prediction() {
        let output = format_prediction(&sample_prediction(), false);
        assert!(output.contains("Loan Decision: APPROVED"));
        assert!(output.contains("Risk Score: 34.6 / 100"));
        assert!(output.contains("Warnings"));
        assert!(output.contains("  - High credit utilization detected."));
        assert!(!output.contains("Recommendations"));
    }

    #[test]
    fn test_format_samples() {
        let samples = vec![Sample {
            description: "Good credit applicant".to_string(),
            data: PredictRequest {
                age: 35.0,
                monthly_income: 75000.0,
                loan_amount: 500000.0,
                credit_utilization: 0.3,
                missed_payments: 0,
                total_active_loans: 2,
                credit_history_years: 8.0,
                loan_tenure_months: 60.0,
            },
        }];
        let output = format_samples(&samples, false);
        assert!(output.starts_with(" 1. Good credit applicant"));
        assert!(output.contains("utilization 30%"));
    }

    #[test]
    fn test_format_samples_empty() {
        assert_eq!(format_samples(&[], false), "No sample data available.");
    }

    #[test]
    fn test_format_health() {
        let health = HealthStatus {
            status: "healthy".to_string(),
            model_loaded: true,
            scaler_loaded: true,
            encoder_loaded: false,
            features_loaded: true,
        };
        let output = format_health(&health, "http://localhost:8000", false);
        assert!(output.starts_with("API http://localhost:8000 is healthy"));
        assert!(output.contains("Encoder: missing"));
        assert!(output.contains("Model: loaded"));
    }

    #[test]
    fn test_format_dashboard() {
        let dashboard = Dashboard {
            metrics: ModelMetrics {
                accuracy: 0.853,
                precision: 0.85,
                recall: 0.84,
                f1_score: 0.845,
                ..ModelMetrics::default()
            },
            feature_importance: vec![
                FeatureImportance {
                    feature: "missed_payments".to_string(),
                    importance: 0.25,
                },
                FeatureImportance {
                    feature: "age".to_string(),
                    importance: 0.05,
                },
            ],
            notes: vec!["Using fallback metrics".to_string()],
        };
        let output = format_dashboard(&dashboard, false);
        assert!(output.contains("Accuracy:   85.3%"));
        assert!(output.contains(" 1. missed_payments  25.0%"));
        assert!(output.contains(" 2. age"));
        assert!(output.contains("Note: Using fallback metrics"));
        assert!(!output.contains("Per-Class"));
    }

    #[test]
    fn test_format_session() {
        assert_eq!(format_session(None), "Not signed in.");
        let session = AuthSession {
            authenticated: true,
            email: "asha@example.com".to_string(),
            signed_in_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        };
        assert_eq!(
            format_session(Some(&session)),
            "Signed in as asha@example.com since 2024-05-01 09:30 UTC"
        );
    }
}
