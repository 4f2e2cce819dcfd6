//! Integration tests: the comparison pipeline end to end.

use approx::assert_relative_eq;
use skill::{SkillConfig, STATS_FILE, TARGET_FILE, TAYLOR_FILE, compare};

fn series(n: usize, phase: f64, scale: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            scale * (0.31 * t + phase).sin() + 0.05 * t + 0.3 * (1.3 * t).cos()
        })
        .collect()
}

struct Data {
    reference: Vec<f64>,
    models: Vec<(String, Vec<f64>)>,
}

impl Data {
    fn new() -> Self {
        let reference = series(48, 0.0, 2.0);
        let models = vec![
            ("M1".to_string(), series(48, 0.15, 1.7)),
            ("M2".to_string(), series(48, 0.6, 2.5)),
            ("M3".to_string(), series(48, 1.1, 1.1)),
        ];
        Self { reference, models }
    }

    fn models(&self) -> Vec<(&str, &[f64])> {
        self.models.iter().map(|(n, v)| (n.as_str(), v.as_slice())).collect()
    }
}

#[test]
fn compare_without_output_dir_writes_nothing() {
    let data = Data::new();
    let result = compare(&data.reference, &data.models(), &SkillConfig::default()).unwrap();

    assert!(result.written.is_empty());
    assert_eq!(result.target.len(), 3);
    assert_eq!(result.taylor.len(), 4);
    assert_eq!(result.taylor.ccoef[0], 1.0);
    assert_eq!(result.target_figure.markers().count(), 3);
    assert_eq!(result.taylor_figure.markers().count(), 3);

    for i in 0..3 {
        let (b, c, r) = (result.target.bias[i], result.target.crmsd[i], result.target.rmsd[i]);
        assert_relative_eq!(r * r, b * b + c * c, epsilon = 1e-10);
    }
}

#[test]
fn markers_are_labelled_with_model_names() {
    let data = Data::new();
    let result = compare(&data.reference, &data.models(), &SkillConfig::default()).unwrap();
    let texts: Vec<_> = result.target_figure.texts().map(|t| t.text.as_str()).collect();
    for name in ["M1", "M2", "M3"] {
        assert!(texts.contains(&name), "{name} missing from {texts:?}");
    }
}

#[test]
fn compare_writes_figures_and_report() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("run");
    let doc = format!(
        r#"
        [target]
        normalized = true

        [taylor.obs]
        marker = "o"
        title = "Observed"

        [output]
        dir = {:?}
        title = "Expt. 01"
        "#,
        out.display().to_string()
    );
    let config: SkillConfig = toml::from_str(&doc).unwrap();

    let data = Data::new();
    let result = compare(&data.reference, &data.models(), &config).unwrap();
    assert_eq!(result.written.len(), 3);

    let target = std::fs::read_to_string(out.join(TARGET_FILE)).unwrap();
    assert!(target.starts_with("<svg"));
    let taylor = std::fs::read_to_string(out.join(TAYLOR_FILE)).unwrap();
    assert!(taylor.contains("Observed"));

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(out.join(STATS_FILE)).unwrap()).unwrap();
    assert_eq!(json["target"]["title"], "Expt. 01");
    assert_eq!(json["target"]["type"], "normalized");
    assert_eq!(json["target"]["rows"].as_array().unwrap().len(), 3);
    assert_eq!(json["taylor"]["reference"]["label"], "Reference");
    assert_eq!(json["taylor"]["rows"][2]["label"], "M3");
}

#[test]
fn identical_models_are_reported_as_duplicates() {
    let data = Data::new();
    let copy = data.models[0].1.clone();
    let mut models = data.models();
    models.push(("M1 copy", copy.as_slice()));

    let result = compare(&data.reference, &models, &SkillConfig::default()).unwrap();
    assert_eq!(result.duplicates.len(), 1);
    assert_eq!((result.duplicates[0].i, result.duplicates[0].j), (0, 3));
}

#[test]
fn mismatched_model_length_names_the_model() {
    let data = Data::new();
    let short = vec![1.0, 2.0];
    let models = vec![("M1", data.models[0].1.as_slice()), ("short", short.as_slice())];
    let err = compare(&data.reference, &models, &SkillConfig::default()).unwrap_err();
    assert!(format!("{err:#}").contains("'short'"));
}

#[test]
fn empty_model_list_is_an_error() {
    let data = Data::new();
    assert!(compare(&data.reference, &[], &SkillConfig::default()).is_err());
}

#[test]
fn config_file_errors_carry_context() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.toml");
    let err = SkillConfig::load(&missing).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read config file"));

    let bad = dir.path().join("bad.toml");
    std::fs::write(&bad, "[target]\nmarker_size = 4\n").unwrap();
    let err = SkillConfig::load(&bad).unwrap_err();
    assert!(format!("{err:#}").contains("marker_size"));

    let good = dir.path().join("good.toml");
    std::fs::write(&good, "[taylor]\nnumber_panels = 2\n").unwrap();
    assert_eq!(SkillConfig::load(&good).unwrap().taylor.number_panels, Some(2));
}

#[test]
fn near_identical_model_passes_the_taylor_check() {
    let reference: Vec<f64> = (0..50).map(|i| 1000.0 + 10.0 * (0.7 * i as f64).sin()).collect();
    let near: Vec<f64> = reference
        .iter()
        .enumerate()
        .map(|(i, v)| v + 1e-7 * (1.3 * i as f64).cos())
        .collect();
    let good: Vec<f64> = reference
        .iter()
        .enumerate()
        .map(|(i, v)| v + 2.0 * (0.4 * i as f64).cos())
        .collect();

    let models = vec![("good", good.as_slice()), ("near", near.as_slice())];
    let result = compare(&reference, &models, &SkillConfig::default()).unwrap();
    assert_relative_eq!(result.taylor.ccoef[2], 1.0, epsilon = 1e-9);
    assert!(result.taylor.crmsd[2] < 1e-6);
}
