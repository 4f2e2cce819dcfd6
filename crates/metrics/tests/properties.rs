use approx::assert_relative_eq;
use skill_metrics::{
    FieldSet, KgeWeights, MetricsError, StatsKind, TAYLOR_THRESHOLD, TargetSeries, TaylorSeries,
    bias, centered_rms_dev, check_duplicate_stats, check_taylor_stats, kge09, nse, rmsd,
    skill_score_murphy, target_statistics, taylor_statistics,
};

/// Deterministic, irregular test series.
fn series(n: usize, phase: f64, scale: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            scale * (0.37 * t + phase).sin() + 0.05 * t + 0.3 * (1.3 * t).cos()
        })
        .collect()
}

#[test]
fn test_identity_properties() {
    for n in [2, 7, 30] {
        let p = series(n, 0.4, 2.0);
        assert_eq!(bias(&p, &p).unwrap(), 0.0);
        assert_eq!(rmsd(&p, &p).unwrap(), 0.0);
        assert_relative_eq!(skill_score_murphy(&p, &p).unwrap(), 1.0);
        assert_relative_eq!(nse(&p, &p).unwrap(), 1.0);
        assert_relative_eq!(kge09(&p, &p, &KgeWeights::default()).unwrap(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_worked_examples() {
    assert_eq!(bias(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap(), 0.0);
    assert_eq!(rmsd(&[0.0, 0.0, 0.0], &[1.0, 1.0, 1.0]).unwrap(), 1.0);
}

#[test]
fn test_rmsd_non_negative() {
    for phase in [0.0, 0.9, 2.5, 4.0] {
        let p = series(25, phase, 1.5);
        let r = series(25, 1.1, 3.0);
        assert!(rmsd(&p, &r).unwrap() >= 0.0);
    }
}

#[test]
fn test_centered_rms_dev_shift_invariance() {
    let p = series(40, 0.2, 1.0);
    let r = series(40, 1.7, 1.4);
    let base = centered_rms_dev(&p, &r).unwrap();

    let p_shift: Vec<f64> = p.iter().map(|x| x + 12.5).collect();
    let r_shift: Vec<f64> = r.iter().map(|x| x - 3.0).collect();
    assert_relative_eq!(centered_rms_dev(&p_shift, &r).unwrap(), base, epsilon = 1e-10);
    assert_relative_eq!(centered_rms_dev(&p, &r_shift).unwrap(), base, epsilon = 1e-10);
}

#[test]
fn test_taylor_statistics_satisfy_identity() {
    let r = series(50, 0.0, 2.0);
    let mut collected: Option<TaylorSeries> = None;
    for (phase, scale) in [(0.1, 1.8), (0.6, 2.5), (1.5, 0.7), (3.0, 2.0)] {
        let p = series(50, phase, scale);
        let stats = taylor_statistics(&p, &r, None).unwrap();
        check_taylor_stats(&stats.sdev, &stats.crmsd, &stats.ccoef, TAYLOR_THRESHOLD).unwrap();
        match collected.as_mut() {
            Some(s) => s.push(&stats),
            None => collected = Some(TaylorSeries::new(&stats)),
        }
    }
    let collected = collected.unwrap();
    assert_eq!(collected.len(), 5);
    let diffs = collected.check(TAYLOR_THRESHOLD).unwrap();
    assert!(diffs.iter().all(|d| *d < 1e-8));
}

#[test]
fn test_taylor_identity_holds_for_identical_and_near_identical_series() {
    let r: Vec<f64> = (0..50).map(|i| 1000.0 + 10.0 * (0.7 * i as f64).sin()).collect();
    let near: Vec<f64> = r
        .iter()
        .enumerate()
        .map(|(i, v)| v + 1e-7 * (1.3 * i as f64).cos())
        .collect();

    for p in [&r, &near] {
        let stats = taylor_statistics(p, &r, None).unwrap();
        check_taylor_stats(&stats.sdev, &stats.crmsd, &stats.ccoef, TAYLOR_THRESHOLD).unwrap();
    }

    let mut collected = TaylorSeries::new(&taylor_statistics(&r, &r, None).unwrap());
    collected.push(&taylor_statistics(&near, &r, None).unwrap());
    collected.push(&taylor_statistics(&series(50, 0.3, 4.0), &r, None).unwrap());
    assert_eq!(collected.check(TAYLOR_THRESHOLD).unwrap().len(), 3);
}

#[test]
fn test_dimension_mismatch_reports_both_shapes() {
    let p = [1.0; 5];
    let r = [1.0; 4];
    for err in [
        bias(&p, &r).unwrap_err(),
        rmsd(&p, &r).unwrap_err(),
        target_statistics(&p, &r, None, false).unwrap_err(),
        taylor_statistics(&p, &r, None).unwrap_err(),
    ] {
        let msg = err.to_string();
        assert!(msg.contains("(5,)"), "{msg}");
        assert!(msg.contains("(4,)"), "{msg}");
    }
}

#[test]
fn test_non_finite_rejected() {
    let err = rmsd(&[1.0, f64::NAN], &[1.0, 2.0]).unwrap_err();
    assert_eq!(err, MetricsError::NonFiniteInput { input: "predicted" });
    let err = bias(&[1.0, 2.0], &[f64::INFINITY, 2.0]).unwrap_err();
    assert_eq!(err, MetricsError::NonFiniteInput { input: "reference" });
}

#[test]
fn test_field_set_lookup_errors() {
    let pred = FieldSet::new().with_field("data", vec![1.0, 2.0]);
    let refs = FieldSet::new().with_field("obs", vec![1.0, 2.0]);
    let err = target_statistics(&pred, &refs, None, false).unwrap_err();
    assert_eq!(err, MetricsError::MissingFieldName { input: "predicted" });
    let err = target_statistics(&pred, &refs, Some("data"), false).unwrap_err();
    assert_eq!(
        err,
        MetricsError::UnknownField {
            input: "reference",
            field: "data".to_string()
        }
    );
}

#[test]
fn test_target_series_and_duplicates() {
    let r = series(30, 0.0, 1.0);
    let a = series(30, 0.3, 1.2);
    let stats: Vec<_> = [&a, &a, &r]
        .iter()
        .map(|p| target_statistics(p.as_slice(), &r, None, true).unwrap())
        .collect();
    assert!(stats.iter().all(|s| s.kind == StatsKind::Normalized));

    let collected: TargetSeries = stats.iter().collect();
    assert_eq!(collected.len(), 3);

    // The first two models are identical; the third is the reference itself
    // and sits at the origin.
    let dups = check_duplicate_stats(&collected.bias, &collected.crmsd, 0.01).unwrap();
    assert_eq!(dups.len(), 1);
    assert_eq!((dups[0].i, dups[0].j), (0, 1));
}
