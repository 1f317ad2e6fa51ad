//! Row assignment for train/test splits

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::error::{PartitionError, Result};

/// Row indices assigned to each subset
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Assignment {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// `ceil(ratio * rows)`, the number of test rows
pub(crate) fn test_size(rows: usize, ratio: f64) -> usize {
    (ratio * rows as f64).ceil() as usize
}

/// Split `n_test` test slots across classes in proportion to their sizes
///
/// Each class gets the floor of its exact quota; leftover slots go to the
/// classes with the largest remainders, earlier classes first on ties. The
/// result sums to `n_test` and never exceeds a class's size.
pub(crate) fn allocate_test_counts(class_sizes: &[usize], n_test: usize) -> Vec<usize> {
    let total: usize = class_sizes.iter().sum();
    if total == 0 {
        return vec![0; class_sizes.len()];
    }

    let mut counts = Vec::with_capacity(class_sizes.len());
    let mut remainders = Vec::with_capacity(class_sizes.len());
    for (idx, &size) in class_sizes.iter().enumerate() {
        let scaled = n_test * size;
        counts.push(scaled / total);
        remainders.push((scaled % total, idx));
    }

    let assigned: usize = counts.iter().sum();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, idx) in remainders.iter().take(n_test.saturating_sub(assigned)) {
        counts[idx] += 1;
    }
    counts
}

/// Stratified assignment: every class is shuffled and cut independently
///
/// `labels[i]` is the label of row `i`. Classes are visited in label order and
/// all shuffles draw from the same generator.
pub(crate) fn stratified(
    labels: &[String],
    n_test: usize,
    ratio: f64,
    rng: &mut StdRng,
) -> Result<Assignment> {
    let mut classes: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (row, label) in labels.iter().enumerate() {
        classes.entry(label.as_str()).or_default().push(row);
    }

    let sizes: Vec<usize> = classes.values().map(Vec::len).collect();
    let test_counts = allocate_test_counts(&sizes, n_test);

    for ((class, members), &test_count) in classes.iter().zip(&test_counts) {
        if test_count == 0 || test_count >= members.len() {
            return Err(PartitionError::StratificationInfeasible {
                class: (*class).to_string(),
                members: members.len(),
                ratio,
            });
        }
    }

    let mut assignment = Assignment {
        train: Vec::with_capacity(labels.len() - n_test),
        test: Vec::with_capacity(n_test),
    };
    for (mut members, test_count) in classes.into_values().zip(test_counts) {
        members.shuffle(rng);
        assignment.test.extend_from_slice(&members[..test_count]);
        assignment.train.extend_from_slice(&members[test_count..]);
    }
    Ok(assignment)
}

/// Unstratified assignment over all rows
pub(crate) fn random(rows: usize, n_test: usize, rng: &mut StdRng) -> Assignment {
    let mut indices: Vec<usize> = (0..rows).collect();
    indices.shuffle(rng);
    let train = indices.split_off(n_test);
    Assignment {
        train,
        test: indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_test_size_uses_ceiling() {
        assert_eq!(test_size(150, 0.25), 38);
        assert_eq!(test_size(100, 0.2), 20);
        assert_eq!(test_size(3, 0.1), 1);
    }

    #[test]
    fn test_allocate_equal_classes() {
        assert_eq!(allocate_test_counts(&[50, 50, 50], 38), vec![13, 13, 12]);
    }

    #[test]
    fn test_allocate_sums_to_n_test() {
        let sizes = [7, 13, 29, 1];
        for n_test in 0..=50 {
            let counts = allocate_test_counts(&sizes, n_test);
            assert_eq!(counts.iter().sum::<usize>(), n_test);
            for (c, s) in counts.iter().zip(sizes) {
                assert!(*c <= s);
            }
        }
    }

    #[test]
    fn test_allocate_largest_remainder_wins() {
        // quotas: 25.49.. and 0.50..
        assert_eq!(allocate_test_counts(&[100, 2], 26), vec![25, 1]);
    }

    #[test]
    fn test_stratified_is_disjoint_and_exhaustive() {
        let labels: Vec<String> = (0..30).map(|i| format!("c{}", i % 3)).collect();
        let mut rng = StdRng::seed_from_u64(7);
        let a = stratified(&labels, 8, 0.25, &mut rng).unwrap();

        let mut all: Vec<usize> = a.train.iter().chain(&a.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..30).collect::<Vec<_>>());
        assert_eq!(a.test.len(), 8);
    }

    #[test]
    fn test_stratified_singleton_class_is_infeasible() {
        let labels: Vec<String> = ["a", "a", "a", "b"].iter().map(|s| s.to_string()).collect();
        let mut rng = StdRng::seed_from_u64(0);
        let err = stratified(&labels, 2, 0.5, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            PartitionError::StratificationInfeasible { ref class, members: 1, .. } if class == "b"
        ));
    }

    #[test]
    fn test_random_assignment_sizes() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = random(10, 3, &mut rng);
        assert_eq!(a.test.len(), 3);
        assert_eq!(a.train.len(), 7);
    }
}
