// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Isolation forest (Liu, Ting & Zhou, 2008).
//!
//! Each tree is grown on a random subsample by picking a random feature and
//! a random split value between that feature's minimum and maximum in the
//! node, until every point is alone or the height limit is hit. Points that
//! get isolated after few splits are the unusual ones.
//!
//! All randomness comes from a single [`StdRng`] seeded by the caller, so a
//! given `(data, n_estimators, max_samples, seed)` always produces the same
//! forest and the same scores.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        /// Training points that ended up here
        size: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        /// Points with `value <= threshold`
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone)]
struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    fn grow<R: AsRef<[f64]>>(
        data: &[R],
        mut indices: Vec<usize>,
        height_limit: usize,
        rng: &mut StdRng,
    ) -> Self {
        Self {
            root: grow_node(data, &mut indices, 0, height_limit, rng),
        }
    }

    fn path_length(&self, point: &[f64]) -> f64 {
        let mut node = &self.root;
        let mut depth = 0.0;
        loop {
            match node {
                Node::Leaf { size } => return depth + average_path_length(*size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if point[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                    depth += 1.0;
                }
            }
        }
    }
}

fn grow_node<R: AsRef<[f64]>>(
    data: &[R],
    indices: &mut [usize],
    depth: usize,
    height_limit: usize,
    rng: &mut StdRng,
) -> Node {
    if depth >= height_limit || indices.len() <= 1 {
        return Node::Leaf {
            size: indices.len(),
        };
    }

    // Only features that still vary inside this node can split it
    let dims = data[indices[0]].as_ref().len();
    let candidates: Vec<(usize, f64, f64)> = (0..dims)
        .filter_map(|feature| {
            let (min, max) = indices.iter().fold(
                (f64::INFINITY, f64::NEG_INFINITY),
                |(min, max), &i| {
                    let value = data[i].as_ref()[feature];
                    (min.min(value), max.max(value))
                },
            );
            (max > min).then_some((feature, min, max))
        })
        .collect();

    if candidates.is_empty() {
        return Node::Leaf {
            size: indices.len(),
        };
    }

    let (feature, min, max) = candidates[rng.gen_range(0..candidates.len())];
    let threshold = rng.gen_range(min..max);

    // In-place partition: left part holds values <= threshold
    let mut split_at = 0;
    for i in 0..indices.len() {
        if data[indices[i]].as_ref()[feature] <= threshold {
            indices.swap(i, split_at);
            split_at += 1;
        }
    }

    if split_at == 0 || split_at == indices.len() {
        return Node::Leaf {
            size: indices.len(),
        };
    }

    let (left, right) = indices.split_at_mut(split_at);
    Node::Split {
        feature,
        threshold,
        left: Box::new(grow_node(data, left, depth + 1, height_limit, rng)),
        right: Box::new(grow_node(data, right, depth + 1, height_limit, rng)),
    }
}

/// Average path length of an unsuccessful search in a binary search tree of
/// `n` points. Normalizes path lengths and estimates the unbuilt part of a
/// leaf that still holds several points.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            #[expect(clippy::cast_precision_loss)]
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Fitted ensemble of isolation trees
#[derive(Debug, Clone)]
pub struct IsolationForest {
    trees: Vec<IsolationTree>,
    sample_size: usize,
}

impl IsolationForest {
    /// Grow `n_estimators` trees, each on `min(max_samples, data.len())`
    /// rows drawn without replacement.
    pub fn fit<R: AsRef<[f64]>>(
        data: &[R],
        n_estimators: usize,
        max_samples: usize,
        seed: u64,
    ) -> Self {
        let n_rows = data.len();
        let sample_size = max_samples.min(n_rows);
        if sample_size == 0 {
            return Self {
                trees: Vec::new(),
                sample_size,
            };
        }

        #[expect(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let height_limit = (sample_size as f64).log2().ceil() as usize;
        let mut rng = StdRng::seed_from_u64(seed);

        let trees = (0..n_estimators)
            .map(|_| {
                let sample = index::sample(&mut rng, n_rows, sample_size).into_vec();
                IsolationTree::grow(data, sample, height_limit, &mut rng)
            })
            .collect();

        Self { trees, sample_size }
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Mean path length of `point` across all trees
    pub fn mean_path_length(&self, point: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }
        let total: f64 = self.trees.iter().map(|tree| tree.path_length(point)).sum();
        #[expect(clippy::cast_precision_loss)]
        let n_trees = self.trees.len() as f64;
        total / n_trees
    }

    /// Score in [-1, 0): `-2^(-E[h(x)] / c(sample_size))`.
    ///
    /// Lower is more anomalous. Values near -1 are clear outliers, values
    /// around -0.5 or above are ordinary points.
    pub fn score_point(&self, point: &[f64]) -> f64 {
        let normalizer = average_path_length(self.sample_size);
        // Only reachable when fitted directly on fewer than two rows
        if normalizer == 0.0 {
            return -1.0;
        }
        -(2.0_f64).powf(-self.mean_path_length(point) / normalizer)
    }

    pub fn score_samples<R: AsRef<[f64]>>(&self, data: &[R]) -> Vec<f64> {
        data.iter().map(|row| self.score_point(row.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with_outlier() -> Vec<[f64; 2]> {
        let mut data: Vec<[f64; 2]> = (0..64)
            .map(|i| [f64::from(i % 8) * 0.1, f64::from(i / 8) * 0.1])
            .collect();
        data.push([25.0, -25.0]);
        data
    }

    #[test]
    fn test_average_path_length() {
        assert_eq!(average_path_length(0), 0.0);
        assert_eq!(average_path_length(1), 0.0);
        assert_eq!(average_path_length(2), 1.0);
        // c(256) from the original paper's setting
        assert!((average_path_length(256) - 10.244_770_920_119_917).abs() < 1e-9);
    }

    #[test]
    fn test_outlier_scores_lowest() {
        let data = grid_with_outlier();
        let forest = IsolationForest::fit(&data, 100, 256, 7);
        let scores = forest.score_samples(&data);

        let outlier = scores[64];
        assert!(scores[..64].iter().all(|&s| s > outlier));
        assert!(outlier < -0.6, "outlier score {outlier}");
        assert!(scores.iter().all(|&s| (-1.0..0.0).contains(&s)));
    }

    #[test]
    fn test_same_seed_same_scores() {
        let data = grid_with_outlier();
        let a = IsolationForest::fit(&data, 50, 32, 11).score_samples(&data);
        let b = IsolationForest::fit(&data, 50, 32, 11).score_samples(&data);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_size_capped_by_data() {
        let data = grid_with_outlier();
        let forest = IsolationForest::fit(&data, 10, 256, 1);
        assert_eq!(forest.sample_size(), data.len());
        assert_eq!(forest.n_trees(), 10);
    }

    #[test]
    fn test_identical_points_share_score() {
        let data = vec![[1.0, 1.0]; 12];
        let forest = IsolationForest::fit(&data, 20, 256, 3);
        let scores = forest.score_samples(&data);
        assert!(scores.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_empty_fit() {
        let data: Vec<[f64; 3]> = Vec::new();
        let forest = IsolationForest::fit(&data, 10, 256, 1);
        assert_eq!(forest.n_trees(), 0);
        assert!(forest.score_samples(&data).is_empty());
    }
}
