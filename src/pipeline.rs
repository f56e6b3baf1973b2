//! End-to-end selection pipeline: validate → greedy path → criterion →
//! trim → inference fits → assembled report.
//!
//! Each stage consumes only the previous stage's output; the assembled
//! [`SelectionReport`] is the single immutable value handed back to the
//! caller. Rendering and persistence of that record live with external
//! collaborators.

use nalgebra::{DMatrix, DVector};

use crate::domain::{ModelOutcome, SelectedModel, SelectionConfig, SelectionReport};
use crate::error::{EngineError, FitError};
use crate::fit::fit_subset;
use crate::select::{evaluate, select_path, trim};

/// Run one engine invocation.
///
/// Configuration and degenerate-input errors surface here, before any
/// selection step runs. Degenerate-fit conditions do not: they are scoped
/// to the affected model variant inside the report, so one variant's
/// failure never suppresses the other's result.
pub fn run_selection(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    config: &SelectionConfig,
) -> Result<SelectionReport, EngineError> {
    let n = x.nrows();
    let p = x.ncols();

    validate_inputs(x, y, config)?;
    let max_steps = config.resolve_max_steps(n, p)?;

    let greedy = select_path(x, y, config.include_intercept, max_steps)?;
    let decision = evaluate(&greedy.rss, n, p, config.criterion, config.criterion_scale);

    let j_hdic: Vec<usize> = greedy.path.iter().take(decision.k_star).copied().collect();
    let hdic_model = outcome(fit_subset(x, y, &j_hdic, config.include_intercept));

    // A degenerate refit during trimming leaves the chosen set untrimmed
    // and marks only the trimmed variant.
    let (j_trim, trimmed_model) =
        match trim(x, y, &j_hdic, config.include_intercept, config.trim_scale) {
            Ok(kept) => {
                let model = outcome(fit_subset(x, y, &kept, config.include_intercept));
                (kept, model)
            }
            Err(e) => (
                j_hdic.clone(),
                ModelOutcome::Degenerate {
                    reason: e.to_string(),
                },
            ),
        };

    Ok(SelectionReport {
        n,
        p,
        max_steps,
        criterion: config.criterion,
        path: greedy.path,
        trace: decision.trace,
        k_star: decision.k_star,
        j_hdic,
        j_trim,
        hdic_model,
        trimmed_model,
        skipped: greedy.skipped,
    })
}

fn outcome(fit: Result<SelectedModel, FitError>) -> ModelOutcome {
    match fit {
        Ok(model) => ModelOutcome::Valid(model),
        Err(e) => ModelOutcome::Degenerate {
            reason: e.to_string(),
        },
    }
}

fn validate_inputs(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    config: &SelectionConfig,
) -> Result<(), EngineError> {
    let n = x.nrows();
    let p = x.ncols();

    if n == 0 || p == 0 {
        return Err(EngineError::EmptyMatrix);
    }
    if y.len() != n {
        return Err(EngineError::RowCountMismatch {
            rows: n,
            responses: y.len(),
        });
    }

    for (name, value) in [
        ("step_scale", config.step_scale),
        ("criterion_scale", config.criterion_scale),
        ("trim_scale", config.trim_scale),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(EngineError::InvalidScale { name, value });
        }
    }

    // Degenerate inputs are rejected before any selection step runs.
    for j in 0..p {
        for i in 0..n {
            if !x[(i, j)].is_finite() {
                return Err(EngineError::NonFinite {
                    what: "design matrix",
                    row: i,
                    col: j,
                });
            }
        }
    }
    for (i, v) in y.iter().enumerate() {
        if !v.is_finite() {
            return Err(EngineError::NonFinite {
                what: "response",
                row: i,
                col: 0,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SynthSpec, generate_sparse_sample};
    use crate::domain::CriterionKind;

    fn small_sample() -> (DMatrix<f64>, DVector<f64>) {
        let sample = generate_sparse_sample(&SynthSpec {
            n: 40,
            p: 12,
            support: vec![(3, 3.0), (8, -2.5)],
            intercept: 1.0,
            noise_sd: 0.5,
            seed: 5,
        })
        .unwrap();
        (sample.x, sample.y)
    }

    #[test]
    fn smoke_run_produces_consistent_report() {
        let (x, y) = small_sample();
        let report = run_selection(&x, &y, &SelectionConfig::default()).unwrap();

        assert_eq!(report.n, 40);
        assert_eq!(report.p, 12);
        assert_eq!(report.path.len(), report.trace.len());
        assert!(report.k_star <= report.path.len());
        assert_eq!(report.j_hdic.len(), report.k_star);
        assert!(report.j_trim.iter().all(|j| report.j_hdic.contains(j)));
        assert!(report.hdic_model.is_valid());
        assert!(report.trimmed_model.is_valid());
    }

    #[test]
    fn non_finite_design_value_is_rejected_up_front() {
        let (mut x, y) = small_sample();
        x[(2, 7)] = f64::NAN;

        let err = run_selection(&x, &y, &SelectionConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EngineError::NonFinite {
                what: "design matrix",
                row: 2,
                col: 7,
            }
        );
    }

    #[test]
    fn non_finite_response_value_is_rejected_up_front() {
        let (x, mut y) = small_sample();
        y[9] = f64::INFINITY;

        let err = run_selection(&x, &y, &SelectionConfig::default()).unwrap_err();
        assert_eq!(
            err,
            EngineError::NonFinite {
                what: "response",
                row: 9,
                col: 0,
            }
        );
    }

    #[test]
    fn non_positive_scale_is_rejected() {
        let (x, y) = small_sample();
        let config = SelectionConfig {
            trim_scale: 0.0,
            ..SelectionConfig::default()
        };

        let err = run_selection(&x, &y, &config).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidScale {
                name: "trim_scale",
                value: 0.0,
            }
        );
    }

    #[test]
    fn degenerate_fits_are_scoped_not_fatal() {
        // Four centered unit columns span only three dimensions, so the
        // greedy search stops after three steps with one skip; the exact
        // three-step fit then has no residual degrees of freedom. The run
        // still succeeds and both variants carry degenerate markers.
        let x = DMatrix::from_row_slice(
            4,
            4,
            &[
                1.0, 0.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, 0.0, //
                0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0,
            ],
        );
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0, 4.0]);
        let config = SelectionConfig {
            max_steps: Some(4),
            ..SelectionConfig::default()
        };

        let report = run_selection(&x, &y, &config).unwrap();
        assert_eq!(report.path.len(), 3);
        assert_eq!(report.skipped.len(), 1);
        assert!(!report.hdic_model.is_valid());
        assert!(!report.trimmed_model.is_valid());
        assert_eq!(report.j_trim, report.j_hdic);
    }

    #[test]
    fn empty_no_intercept_trim_degenerates_only_the_trimmed_variant() {
        // The response is exactly orthogonal to both candidate columns, so
        // the single selected predictor is trimmed away. Without an
        // intercept there is nothing left to fit: the trimmed variant is
        // degenerate while the HDIC variant stays valid.
        let x =
            DMatrix::from_column_slice(4, 2, &[1.0, 1.0, -1.0, -1.0, 1.0, -1.0, -1.0, 1.0]);
        let y = DVector::from_row_slice(&[1.0, -1.0, 1.0, -1.0]);
        let config = SelectionConfig {
            max_steps: Some(1),
            include_intercept: false,
            ..SelectionConfig::default()
        };

        let report = run_selection(&x, &y, &config).unwrap();
        assert!(report.j_trim.is_empty());
        assert!(report.hdic_model.is_valid());
        assert!(!report.trimmed_model.is_valid());
    }

    #[test]
    fn criterion_kind_is_carried_into_the_report() {
        let (x, y) = small_sample();
        let config = SelectionConfig {
            criterion: CriterionKind::Hdaic,
            ..SelectionConfig::default()
        };

        let report = run_selection(&x, &y, &config).unwrap();
        assert_eq!(report.criterion, CriterionKind::Hdaic);
    }
}
