//! Scenario tests for loading and applying a classifier artifact

use std::path::{Path, PathBuf};

use crate::logic::features::{ChangesetFeatures, FeatureVector};

use super::{
    load_model, predict, AnomalyModel, KernelSpec, ModelArtifact, ModelError, ScalerParams, Label,
};

/// Flags changesets whose deletions dwarf everything else
fn delete_ratio_artifact() -> ModelArtifact {
    ModelArtifact {
        format_version: 1,
        model_type: "one_class_svm".to_string(),
        features: vec!["create".into(), "modify".into(), "delete".into()],
        scaler: None,
        kernel: KernelSpec::Rbf { gamma: 0.01 },
        support_vectors: vec![
            vec![10.0, 5.0, 1.0],
            vec![8.0, 4.0, 0.0],
            vec![12.0, 6.0, 2.0],
        ],
        dual_coef: vec![1.0, 1.0, 1.0],
        intercept: -1.0,
    }
}

fn write_artifact(dir: &Path, artifact: &ModelArtifact) -> PathBuf {
    let path = dir.join("models").join("gabbar.json");
    artifact.write(&path).unwrap();
    path
}

fn vector(create: f64, modify: f64, delete: f64) -> FeatureVector {
    ChangesetFeatures::new(create, modify, delete).to_vector()
}

#[test]
fn test_delete_heavy_changeset_is_outlier() {
    let dir = tempfile::tempdir().unwrap();
    let model = load_model(write_artifact(dir.path(), &delete_ratio_artifact())).unwrap();

    assert_eq!(predict(&model, &vector(5.0, 2.0, 100.0)).unwrap(), Label::Outlier);
    assert_eq!(predict(&model, &vector(10.0, 5.0, 1.0)).unwrap(), Label::Inlier);
}

#[test]
fn test_prediction_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let model = load_model(write_artifact(dir.path(), &delete_ratio_artifact())).unwrap();
    let v = vector(7.0, 3.0, 4.0);

    let first = predict(&model, &v).unwrap();
    for _ in 0..50 {
        assert_eq!(predict(&model, &v).unwrap(), first);
    }
}

#[test]
fn test_labels_are_plus_or_minus_one() {
    let dir = tempfile::tempdir().unwrap();
    let model = load_model(write_artifact(dir.path(), &delete_ratio_artifact())).unwrap();

    for c in [0.0, 1.0, 10.0, 1e6] {
        for d in [0.0, 3.0, 500.0, f64::MAX] {
            let label = predict(&model, &vector(c, 2.0, d)).unwrap();
            assert!(matches!(label.as_i8(), 1 | -1));
        }
    }
}

#[test]
fn test_two_loads_agree() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_artifact(dir.path(), &delete_ratio_artifact());

    let a = load_model(&path).unwrap();
    let b = load_model(&path).unwrap();
    drop(dir);

    for v in [vector(5.0, 2.0, 100.0), vector(10.0, 5.0, 1.0), vector(0.0, 0.0, 0.0)] {
        assert_eq!(a.decision_function(&v).unwrap(), b.decision_function(&v).unwrap());
        assert_eq!(predict(&a, &v).unwrap(), predict(&b, &v).unwrap());
    }
}

#[test]
fn test_columns_mapped_by_name() {
    // Same model, trained with columns stored in another order
    let mut reordered = delete_ratio_artifact();
    reordered.features = vec!["delete".into(), "create".into(), "modify".into()];
    reordered.support_vectors = reordered
        .support_vectors
        .iter()
        .map(|sv| vec![sv[2], sv[0], sv[1]])
        .collect();

    let dir = tempfile::tempdir().unwrap();
    let original = load_model(write_artifact(dir.path(), &delete_ratio_artifact())).unwrap();
    let other_dir = tempfile::tempdir().unwrap();
    let reordered = load_model(write_artifact(other_dir.path(), &reordered)).unwrap();

    let v = vector(9.0, 5.0, 3.0);
    let diff = original.decision_function(&v).unwrap() - reordered.decision_function(&v).unwrap();
    assert!(diff.abs() < 1e-12);
}

#[test]
fn test_scaler_applied_before_kernel() {
    let mut artifact = delete_ratio_artifact();
    artifact.kernel = KernelSpec::Linear;
    artifact.support_vectors = vec![vec![1.0, 1.0, 1.0]];
    artifact.dual_coef = vec![1.0];
    artifact.intercept = 0.0;
    artifact.scaler = Some(ScalerParams {
        mean: vec![10.0, 10.0, 10.0],
        scale: vec![10.0, 10.0, 10.0],
    });

    let dir = tempfile::tempdir().unwrap();
    let model = load_model(write_artifact(dir.path(), &artifact)).unwrap();

    // scaled [1, 0, -1] · [1, 1, 1] = 0
    assert_eq!(model.decision_function(&vector(20.0, 10.0, 0.0)).unwrap(), 0.0);
    assert_eq!(predict(&model, &vector(20.0, 10.0, 0.0)).unwrap(), Label::Outlier);
    assert_eq!(predict(&model, &vector(30.0, 10.0, 10.0)).unwrap(), Label::Inlier);
}

#[test]
fn test_unknown_feature_rejected() {
    let mut artifact = delete_ratio_artifact();
    artifact.features[2] = "harmful".into();

    let dir = tempfile::tempdir().unwrap();
    let err = load_model(write_artifact(dir.path(), &artifact)).unwrap_err();
    assert!(matches!(err, ModelError::UnknownFeature(ref name) if name == "harmful"));
}

#[test]
fn test_missing_artifact_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_model(dir.path().join("models/gabbar.json")).unwrap_err();
    assert!(matches!(err, ModelError::Io { .. }));
}

#[test]
fn test_stale_vector_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let model = load_model(write_artifact(dir.path(), &delete_ratio_artifact())).unwrap();

    let mut v = vector(1.0, 1.0, 1.0);
    v.layout_hash ^= 1;
    assert!(predict(&model, &v).is_err());
}

#[test]
fn test_shipped_model() {
    let path = PathBuf::from(crate::constants::PACKAGE_DIR).join(crate::constants::MODEL_RELATIVE_PATH);
    let model = load_model(&path).unwrap();

    assert_eq!(model.metadata().features, vec!["create", "modify", "delete"]);
    assert_eq!(predict(&model, &vector(5.0, 2.0, 100.0)).unwrap(), Label::Outlier);
    assert_eq!(predict(&model, &vector(10.0, 5.0, 1.0)).unwrap(), Label::Inlier);
}
