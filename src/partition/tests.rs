use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use proptest::prelude::*;

use super::*;
use crate::data::{Cell, CsvLoader, InMemoryLoader};
use crate::tracking::storage::InMemoryBackend;
use crate::tracking::{ExperimentTracker, RunStatus};

const IRIS_CLASSES: [&str; 3] = ["Iris-setosa", "Iris-versicolor", "Iris-virginica"];

fn labelled(class_sizes: &[(&str, usize)]) -> Dataset {
    let mut rows = Vec::new();
    let mut id = 1.0;
    for &(label, size) in class_sizes {
        for i in 0..size {
            rows.push(vec![
                Cell::Number(id),
                Cell::Number(id * 0.1),
                Cell::Number(i as f64),
                Cell::from(label),
            ]);
            id += 1.0;
        }
    }
    Dataset::new(
        vec!["Id".into(), "SepalLengthCm".into(), "PetalWidthCm".into(), "Species".into()],
        rows,
    )
    .unwrap()
}

fn iris_150() -> Dataset {
    labelled(&[(IRIS_CLASSES[0], 50), (IRIS_CLASSES[1], 50), (IRIS_CLASSES[2], 50)])
}

fn class_counts(ds: &Dataset) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for cell in ds.column("Species").unwrap() {
        *counts.entry(cell.key().unwrap()).or_insert(0) += 1;
    }
    counts
}

/// Source rows identified by their (unique) SepalLengthCm value
fn row_keys(ds: &Dataset) -> Vec<u64> {
    ds.column("SepalLengthCm")
        .unwrap()
        .map(|c| (c.as_f64().unwrap() * 10.0).round() as u64)
        .collect()
}

// ---------------------------------------------------------------------------
// SplitConfig
// ---------------------------------------------------------------------------

#[test]
fn test_split_config_defaults() {
    let config = SplitConfig::default();
    assert_eq!(config.test_ratio, 0.25);
    assert_eq!(config.seed, 42);
    assert_eq!(config.strategy, SplitStrategy::Stratified);
}

#[test]
fn test_split_config_yaml_partial() {
    let config: SplitConfig = serde_yaml::from_str("seed: 7\nstrategy: random\n").unwrap();
    assert_eq!(config.test_ratio, 0.25);
    assert_eq!(config.seed, 7);
    assert_eq!(config.strategy, SplitStrategy::Random);
}

// ---------------------------------------------------------------------------
// partition
// ---------------------------------------------------------------------------

#[test]
fn test_partition_iris_sizes() {
    let split = partition(&iris_150(), &DatasetSchema::default(), &SplitConfig::default()).unwrap();
    assert_eq!(split.train.row_count(), 112);
    assert_eq!(split.test.row_count(), 38);

    for (_, n) in class_counts(&split.train) {
        assert!((37..=38).contains(&n));
    }
    for (_, n) in class_counts(&split.test) {
        assert!((12..=13).contains(&n));
    }
    assert_eq!(class_counts(&split.test).len(), 3);
}

#[test]
fn test_partition_drops_id_column() {
    let split = partition(&iris_150(), &DatasetSchema::default(), &SplitConfig::default()).unwrap();
    let expected = vec![
        "SepalLengthCm".to_string(),
        "PetalWidthCm".to_string(),
        "Species".to_string(),
    ];
    assert_eq!(split.train.columns(), expected.as_slice());
    assert_eq!(split.test.columns(), expected.as_slice());
}

#[test]
fn test_partition_drops_id_listed_as_feature() {
    let schema = DatasetSchema::default().with_feature_columns(["Id", "SepalLengthCm"]);
    let split = partition(&iris_150(), &schema, &SplitConfig::default()).unwrap();
    let expected = vec!["SepalLengthCm".to_string(), "Species".to_string()];
    assert_eq!(split.train.columns(), expected.as_slice());
    assert_eq!(split.test.columns(), expected.as_slice());
}

#[test]
fn test_partition_is_disjoint_and_exhaustive() {
    let split = partition(&iris_150(), &DatasetSchema::default(), &SplitConfig::default()).unwrap();
    let mut keys = row_keys(&split.train);
    keys.extend(row_keys(&split.test));
    keys.sort_unstable();
    assert_eq!(keys, (1..=150).collect::<Vec<u64>>());
}

#[test]
fn test_partition_is_deterministic() {
    let ds = iris_150();
    let config = SplitConfig::new(0.3, 1234);
    let a = partition(&ds, &DatasetSchema::default(), &config).unwrap();
    let b = partition(&ds, &DatasetSchema::default(), &config).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_partition_seed_changes_membership() {
    let ds = iris_150();
    let a = partition(&ds, &DatasetSchema::default(), &SplitConfig::new(0.25, 1)).unwrap();
    let b = partition(&ds, &DatasetSchema::default(), &SplitConfig::new(0.25, 2)).unwrap();
    assert_ne!(row_keys(&a.test), row_keys(&b.test));
}

#[test]
fn test_partition_random_strategy() {
    let config = SplitConfig::new(0.2, 9).with_strategy(SplitStrategy::Random);
    let split = partition(&iris_150(), &DatasetSchema::default(), &config).unwrap();
    assert_eq!(split.test.row_count(), 30);
    assert_eq!(split.train.row_count(), 120);
}

#[test]
fn test_partition_random_tolerates_singleton_class() {
    let ds = labelled(&[("a", 9), ("b", 1)]);
    let config = SplitConfig::new(0.3, 0).with_strategy(SplitStrategy::Random);
    assert!(partition(&ds, &DatasetSchema::default(), &config).is_ok());
}

// ---------------------------------------------------------------------------
// Error cases
// ---------------------------------------------------------------------------

#[test]
fn test_partition_rejects_bad_ratio() {
    let ds = iris_150();
    for ratio in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
        let err = partition(&ds, &DatasetSchema::default(), &SplitConfig::new(ratio, 0)).unwrap_err();
        assert!(matches!(err, PartitionError::InvalidRatio(_)));
    }
}

#[test]
fn test_partition_empty_dataset() {
    let ds = Dataset::new(vec!["x".into(), "Species".into()], vec![]).unwrap();
    assert!(matches!(
        partition(&ds, &DatasetSchema::default(), &SplitConfig::default()),
        Err(PartitionError::EmptyDataset)
    ));
}

#[test]
fn test_partition_missing_label_column() {
    let schema = DatasetSchema::new("Class").with_id_column("Id");
    assert!(matches!(
        partition(&iris_150(), &schema, &SplitConfig::default()),
        Err(PartitionError::MissingColumn(c)) if c == "Class"
    ));
}

#[test]
fn test_partition_missing_label_value() {
    let ds = Dataset::new(
        vec!["x".into(), "Species".into()],
        vec![
            vec![Cell::Number(1.0), "a".into()],
            vec![Cell::Number(2.0), Cell::Missing],
            vec![Cell::Number(3.0), "a".into()],
        ],
    )
    .unwrap();
    assert!(matches!(
        partition(&ds, &DatasetSchema::default(), &SplitConfig::new(0.5, 0)),
        Err(PartitionError::MissingLabel { row: 1 })
    ));
}

#[test]
fn test_partition_too_few_rows() {
    let ds = labelled(&[("a", 1)]);
    assert!(matches!(
        partition(&ds, &DatasetSchema::default(), &SplitConfig::new(0.5, 0)),
        Err(PartitionError::InfeasibleSizes { rows: 1, test_rows: 1 })
    ));
}

#[test]
fn test_partition_stratification_infeasible() {
    let ds = labelled(&[("a", 20), ("b", 1)]);
    let err = partition(&ds, &DatasetSchema::default(), &SplitConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        PartitionError::StratificationInfeasible { ref class, members: 1, .. } if class == "b"
    ));
    assert!(err.to_string().contains("'b'"));
}

// ---------------------------------------------------------------------------
// Output and tracking
// ---------------------------------------------------------------------------

#[test]
fn test_write_csv_creates_directory() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("nested").join("processed_data");
    let split = partition(&iris_150(), &DatasetSchema::default(), &SplitConfig::default()).unwrap();

    let (train_path, test_path) = split.write_csv(&out).unwrap();
    assert_eq!(train_path, out.join(TRAIN_FILE));
    assert_eq!(test_path, out.join(TEST_FILE));

    let reloaded = CsvLoader::new().load(&train_path).unwrap();
    assert_eq!(reloaded.row_count(), 112);
    assert_eq!(reloaded.columns(), split.train.columns());
    let header = fs::read_to_string(&test_path).unwrap();
    assert!(header.starts_with("SepalLengthCm,PetalWidthCm,Species\n"));
}

#[test]
fn test_split_source_records_run() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("processed_data");
    let loader = InMemoryLoader::new().with_dataset("Iris.csv", iris_150());
    let mut tracker = ExperimentTracker::new("preprocessing", InMemoryBackend::new());

    let summary = tracker
        .with_run(None, |run| {
            split_source(
                &loader,
                Path::new("Iris.csv"),
                &DatasetSchema::default(),
                &SplitConfig::default(),
                &out,
                run,
            )
        })
        .unwrap()
        .unwrap();

    assert_eq!(summary.train_rows, 112);
    assert_eq!(summary.test_rows, 38);
    assert!(summary.train_path.exists());
    assert!(summary.test_path.exists());
    let mut bundled: Vec<&str> = summary.artifacts.iter().map(|a| a.path.as_str()).collect();
    bundled.sort_unstable();
    assert_eq!(bundled, vec!["processed_data/test.csv", "processed_data/train.csv"]);

    let run = tracker.get_run(&summary.run_id).unwrap();
    assert_eq!(run.status, RunStatus::Completed);
    assert_eq!(run.tags["ml.step"], STEP_TAG);
    assert_eq!(run.params["test_size"], "0.25");
    assert_eq!(run.params["random_state"], "42");
    assert_eq!(run.params["split_strategy"], "stratified");
    assert_eq!(run.latest_metric("training_set_rows"), Some(112.0));
    assert_eq!(run.latest_metric("test_set_rows"), Some(38.0));
}

#[test]
fn test_split_source_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("processed_data");
    let loader = InMemoryLoader::new();
    let mut tracker = ExperimentTracker::new("preprocessing", InMemoryBackend::new());

    let summary = tracker
        .with_run(None, |run| {
            split_source(
                &loader,
                Path::new("Iris.csv"),
                &DatasetSchema::default(),
                &SplitConfig::default(),
                &out,
                run,
            )
        })
        .unwrap();

    assert!(summary.is_none());
    assert!(!out.exists());
    let runs = tracker.list_runs().unwrap();
    assert_eq!(runs[0].status, RunStatus::Completed);
    assert!(runs[0].params.is_empty());
    assert!(runs[0].metrics.is_empty());
}

#[test]
fn test_split_source_infeasible_fails_run() {
    let dir = tempfile::TempDir::new().unwrap();
    let loader = InMemoryLoader::new().with_dataset("tiny.csv", labelled(&[("a", 5), ("b", 1)]));
    let mut tracker = ExperimentTracker::new("preprocessing", InMemoryBackend::new());

    let result = tracker.with_run(None, |run| {
        split_source(
            &loader,
            Path::new("tiny.csv"),
            &DatasetSchema::default(),
            &SplitConfig::default(),
            dir.path(),
            run,
        )
    });

    assert!(matches!(
        result,
        Err(crate::Error::Partition(PartitionError::StratificationInfeasible { .. }))
    ));
    assert_eq!(tracker.list_runs().unwrap()[0].status, RunStatus::Failed);
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_stratification_bound(
        sizes in prop::collection::vec(2usize..40, 2..5),
        ratio in 0.1f64..0.9,
        seed in any::<u64>(),
    ) {
        let names = ["a", "b", "c", "d"];
        let spec: Vec<(&str, usize)> = names.iter().copied().zip(sizes.iter().copied()).collect();
        let ds = labelled(&spec);

        let result = partition(&ds, &DatasetSchema::default(), &SplitConfig::new(ratio, seed));
        prop_assume!(result.is_ok());
        let split = result.unwrap();

        let total = ds.row_count() as f64;
        let n_train = split.train.row_count() as f64;
        let train_counts = class_counts(&split.train);
        for (name, size) in &spec {
            let train_c = train_counts.get(*name).copied().unwrap_or(0) as f64;
            let drift = (train_c / n_train - *size as f64 / total).abs();
            prop_assert!(drift <= 1.0 / n_train + 1e-12);
        }
    }

    #[test]
    fn prop_partition_disjoint_exhaustive(
        per_class in 2usize..30,
        ratio in 0.05f64..0.95,
        seed in any::<u64>(),
        stratify in any::<bool>(),
    ) {
        let ds = labelled(&[("x", per_class), ("y", per_class + 3)]);
        let strategy = if stratify { SplitStrategy::Stratified } else { SplitStrategy::Random };
        let config = SplitConfig::new(ratio, seed).with_strategy(strategy);

        let result = partition(&ds, &DatasetSchema::default(), &config);
        prop_assume!(result.is_ok());
        let split = result.unwrap();

        let mut keys = row_keys(&split.train);
        keys.extend(row_keys(&split.test));
        keys.sort_unstable();
        let expected: Vec<u64> = (1..=ds.row_count() as u64).collect();
        prop_assert_eq!(keys, expected);
        prop_assert!(split.train.row_count() >= 1);
        prop_assert!(split.test.row_count() >= 1);
    }
}
