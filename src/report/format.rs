//! Plain-text rendering of a finished selection run.
//!
//! We keep formatting code in one place so:
//! - the selection/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)
//!
//! Charts and HTML templating live with external collaborators; this module
//! only produces terminal-friendly text from the assembled report.

use crate::domain::{Coefficient, ModelOutcome, SelectionReport, Term};

/// Format the full run summary (data overview + selection outcome + model
/// quality + coefficient table).
///
/// `names` optionally maps column indices to display names; missing entries
/// fall back to `x{index}`.
pub fn format_run_summary(report: &SelectionReport, names: Option<&[String]>) -> String {
    let mut out = String::new();

    out.push_str("=== High-dimensional variable selection ===\n");
    out.push_str(&format!(
        "Sample: n={} | candidates p={} | p/n={:.2}\n",
        report.n,
        report.p,
        report.p as f64 / report.n as f64
    ));
    out.push_str(&format!(
        "Search: criterion={} | max steps={} | path length={}\n",
        report.criterion.display_name(),
        report.max_steps,
        report.path.len()
    ));
    out.push_str(&format!(
        "Selected: k*={} | after trim={} | screened out {}/{} candidates\n",
        report.k_star,
        report.j_trim.len(),
        report.p - report.j_trim.len(),
        report.p
    ));

    out.push_str("\nModel quality:\n");
    out.push_str(&format_quality_line("HDIC", &report.hdic_model));
    out.push_str(&format_quality_line("Trimmed", &report.trimmed_model));

    if !report.skipped.is_empty() {
        out.push_str("\nNumerical notes:\n");
        for s in &report.skipped {
            out.push_str(&format!(
                "- column {} skipped at step {}: {}\n",
                s.column, s.step, s.reason
            ));
        }
    }

    if let ModelOutcome::Valid(model) = &report.trimmed_model {
        if !model.coefficients.is_empty() {
            out.push_str("\nRetained terms (trimmed model):\n");
            out.push_str(&format_coefficient_table(&model.coefficients, names));
        }
    }

    out
}

/// Render a coefficient table sorted by |estimate| (intercept first).
///
/// Significance markers follow the usual convention: `***` below 0.001,
/// `**` below 0.01, `*` below 0.05.
pub fn format_coefficient_table(coefficients: &[Coefficient], names: Option<&[String]>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<20} {:>12} {:>12} {:>10} {:>10}\n",
        "term", "estimate", "std error", "t", "p"
    ));

    let mut rows: Vec<&Coefficient> = coefficients.iter().collect();
    rows.sort_by(|a, b| match (a.term, b.term) {
        (Term::Intercept, Term::Intercept) => std::cmp::Ordering::Equal,
        (Term::Intercept, _) => std::cmp::Ordering::Less,
        (_, Term::Intercept) => std::cmp::Ordering::Greater,
        _ => b
            .estimate
            .abs()
            .partial_cmp(&a.estimate.abs())
            .unwrap_or(std::cmp::Ordering::Equal),
    });

    for c in rows {
        let name = match c.term {
            Term::Intercept => "(intercept)".to_string(),
            Term::Predictor(j) => column_name(names, j),
        };
        out.push_str(
            format!(
                "{:<20} {:>12.4} {:>12.4} {:>10.3} {:>10.4} {}",
                truncate(&name, 20),
                c.estimate,
                c.std_error,
                c.t_value,
                c.p_value,
                significance_marker(c.p_value)
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Resolve a display name for a predictor column.
fn column_name(names: Option<&[String]>, col: usize) -> String {
    names
        .and_then(|ns| ns.get(col))
        .cloned()
        .unwrap_or_else(|| format!("x{col}"))
}

fn significance_marker(p: f64) -> &'static str {
    if p < 0.001 {
        "***"
    } else if p < 0.01 {
        "**"
    } else if p < 0.05 {
        "*"
    } else {
        ""
    }
}

fn format_quality_line(label: &str, outcome: &ModelOutcome) -> String {
    match outcome {
        ModelOutcome::Valid(m) => format!(
            "  {label:<8} terms={:<3} R2={:.4} adj R2={:.4} RSS={:.4}\n",
            m.indices.len(),
            m.r_squared,
            m.adj_r_squared,
            m.rss
        ),
        ModelOutcome::Degenerate { reason } => format!("  {label:<8} degenerate: {reason}\n"),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
