//! Integration tests for distance matrices, ECDF vectors and list assembly

mod common;

use common::*;
use ecdf_core::prelude::*;
use ecdf_core::{distance_matrix, mean_of_ecdf_vectors};

#[test]
fn test_two_subset_round_trip() {
    let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    let bins = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let list = ecdf_vector_list(&data, &bins, &absolute_difference, &[0, 3, 6]).unwrap();

    assert_eq!(list.shape(), (5, 1));
    let expected = [0.0, 1.0 / 9.0, 3.0 / 9.0, 6.0 / 9.0, 8.0 / 9.0];
    for (got, want) in column(&list, 0).iter().zip(expected.iter()) {
        assert_relative_eq!(*got, *want, epsilon = EPSILON);
    }

    // a single column is its own mean
    let mean = mean_of_ecdf_vectors(&list).unwrap();
    assert_relative_eq!(mean[3], 6.0 / 9.0, epsilon = EPSILON);
}

#[test]
fn test_matrix_shape_and_entries() {
    let a = vec![vec![0.0, 0.0], vec![3.0, 4.0]];
    let b = vec![vec![0.0, 0.0], vec![6.0, 8.0], vec![3.0, 0.0]];
    let m = distance_matrix(&a, &b, &euclidean);
    assert_eq!(m.shape(), (2, 3));
    assert_relative_eq!(*m.get(0, 1).unwrap(), 10.0, epsilon = EPSILON);
    assert_relative_eq!(*m.get(1, 0).unwrap(), 5.0, epsilon = EPSILON);
    assert_relative_eq!(*m.get(1, 2).unwrap(), 4.0, epsilon = EPSILON);
    assert!(m.get(2, 0).is_none());
}

#[test]
fn test_k_subsets_give_k_choose_two_columns() {
    let data = uniform_data(24, 10.0, 3);
    let bins = linspace(0.5, 9.5, 6);
    for k in [2usize, 3, 4, 6, 8] {
        let partition = SubsetPartition::from_sizes(&vec![24 / k; k]);
        let list = ecdf_vector_list(&data, &bins, &absolute_difference, partition.indices()).unwrap();
        assert_eq!(list.shape(), (6, k * (k - 1) / 2), "k = {}", k);
    }
}

#[test]
fn test_unequal_subsets_are_supported() {
    let data = uniform_data(11, 1.0, 5);
    let list = ecdf_vector_list(&data, &[0.25, 0.5], &absolute_difference, &[0, 5, 11]).unwrap();
    assert_eq!(list.ncols(), 1);
}

#[test]
fn test_bootstrap_shape_and_reproducibility() {
    let a = uniform_data(30, 5.0, 1);
    let b = uniform_data(20, 5.0, 2);
    let bins = linspace(0.5, 4.5, 5);

    let first =
        ecdf_vector_list_bootstrap(&a, &b, &bins, &absolute_difference, 40, &mut seeded_rng(9)).unwrap();
    let second =
        ecdf_vector_list_bootstrap(&a, &b, &bins, &absolute_difference, 40, &mut seeded_rng(9)).unwrap();
    assert_eq!(first.shape(), (5, 40));
    assert_eq!(first, second);
}

#[test]
fn test_bootstrap_of_identical_points_is_degenerate() {
    let a = vec![2.0; 8];
    let list =
        ecdf_vector_list_bootstrap(&a, &a, &[0.5, 1.0], &absolute_difference, 12, &mut seeded_rng(0)).unwrap();
    assert!(list.iter().all(|&v| v == 1.0));
}

#[test]
fn test_zero_bootstrap_samples_give_empty_list() {
    let a = vec![1.0, 2.0];
    let list =
        ecdf_vector_list_bootstrap(&a, &a, &[1.0], &absolute_difference, 0, &mut seeded_rng(0)).unwrap();
    assert_eq!(list.shape(), (1, 0));
    assert!(matches!(mean_of_ecdf_vectors(&list), Err(Error::InsufficientData { .. })));
}
