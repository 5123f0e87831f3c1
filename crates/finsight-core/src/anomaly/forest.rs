//! Seeded isolation forest
//!
//! Classic isolation-forest construction: each tree is grown over a random
//! subsample of rows by repeatedly picking a random feature and a random
//! split point until points isolate or the depth cap is hit. Anomalous
//! points isolate in fewer splits, so shorter average path length means
//! more anomalous.
//!
//! Scores follow the score_samples convention: `-(2^(-E[h(x)]/c(ψ)))`,
//! always negative, **lower = more anomalous**. A fixed seed drives a
//! single `StdRng` through subsampling and tree growth, so the same rows in
//! the same order produce bit-identical scores. Reordering rows changes the
//! subsamples and may change the fitted trees.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

use super::OutlierDetector;

const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;

/// Forest construction parameters.
#[derive(Debug, Clone)]
pub struct ForestConfig {
    /// Number of trees in the ensemble
    pub n_trees: usize,
    /// Per-tree subsample cap (uses all rows when the input is smaller)
    pub max_samples: usize,
    /// RNG seed for reproducible fits
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_samples: 256,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
enum Node {
    Internal {
        feature: usize,
        split: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        size: usize,
    },
}

#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Path length of a point through this tree, with the standard
    /// c(size) adjustment at unresolved leaves.
    fn path_length(&self, row: &[f64]) -> f64 {
        let mut depth = 0.0;
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                Node::Leaf { size } => return depth + average_path_length(*size),
                Node::Internal {
                    feature,
                    split,
                    left,
                    right,
                } => {
                    index = if row[*feature] < *split { *left } else { *right };
                    depth += 1.0;
                }
            }
        }
    }
}

/// Expected path length of an unsuccessful BST search over `n` points.
/// Normalizes raw path lengths into the score exponent.
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_MASCHERONI) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Tree-ensemble isolation detector.
///
/// Created unfitted; [`OutlierDetector::fit`] grows the ensemble and a
/// repeated fit rebuilds it from scratch.
#[derive(Debug, Clone)]
pub struct IsolationForest {
    config: ForestConfig,
    trees: Vec<Tree>,
    n_features: usize,
    sample_size: usize,
}

impl IsolationForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            n_features: 0,
            sample_size: 0,
        }
    }

    /// Default-sized forest with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self::new(ForestConfig {
            seed,
            ..ForestConfig::default()
        })
    }

    fn grow_tree(
        &self,
        x: &[Vec<f64>],
        indices: Vec<usize>,
        height_limit: usize,
        rng: &mut StdRng,
    ) -> Tree {
        let mut nodes = Vec::new();
        self.grow_node(x, indices, 0, height_limit, rng, &mut nodes);
        Tree { nodes }
    }

    /// Grow one node into the arena and return its index.
    fn grow_node(
        &self,
        x: &[Vec<f64>],
        indices: Vec<usize>,
        depth: usize,
        height_limit: usize,
        rng: &mut StdRng,
        nodes: &mut Vec<Node>,
    ) -> usize {
        if depth >= height_limit || indices.len() <= 1 {
            nodes.push(Node::Leaf {
                size: indices.len(),
            });
            return nodes.len() - 1;
        }

        // Only features with spread can split this node
        let splittable: Vec<(usize, f64, f64)> = (0..self.n_features)
            .filter_map(|f| {
                let mut min = f64::INFINITY;
                let mut max = f64::NEG_INFINITY;
                for &i in &indices {
                    min = min.min(x[i][f]);
                    max = max.max(x[i][f]);
                }
                if min < max {
                    Some((f, min, max))
                } else {
                    None
                }
            })
            .collect();

        if splittable.is_empty() {
            // All remaining points identical
            nodes.push(Node::Leaf {
                size: indices.len(),
            });
            return nodes.len() - 1;
        }

        let (feature, min, max) = splittable[rng.gen_range(0..splittable.len())];
        let split = rng.gen_range(min..max);

        let (left_indices, right_indices): (Vec<usize>, Vec<usize>) =
            indices.into_iter().partition(|&i| x[i][feature] < split);

        // Reserve the slot before recursing so child indices stay stable
        let node_index = nodes.len();
        nodes.push(Node::Leaf { size: 0 });
        let left = self.grow_node(x, left_indices, depth + 1, height_limit, rng, nodes);
        let right = self.grow_node(x, right_indices, depth + 1, height_limit, rng, nodes);
        nodes[node_index] = Node::Internal {
            feature,
            split,
            left,
            right,
        };
        node_index
    }
}

impl OutlierDetector for IsolationForest {
    fn fit(&mut self, x: &[Vec<f64>]) -> Result<()> {
        if x.is_empty() {
            return Err(Error::Data("cannot fit on zero rows".into()));
        }
        let n_features = x[0].len();
        if n_features == 0 {
            return Err(Error::Data("cannot fit on zero features".into()));
        }

        let n = x.len();
        let psi = self.config.max_samples.min(n);
        let height_limit = (psi as f64).log2().ceil().max(0.0) as usize;

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.n_features = n_features;
        self.sample_size = psi;

        let mut trees = Vec::with_capacity(self.config.n_trees);
        for _ in 0..self.config.n_trees {
            let indices: Vec<usize> = if psi == n {
                (0..n).collect()
            } else {
                rand::seq::index::sample(&mut rng, n, psi).into_vec()
            };
            trees.push(self.grow_tree(x, indices, height_limit, &mut rng));
        }

        self.trees = trees;
        Ok(())
    }

    fn score(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        if self.trees.is_empty() {
            return Err(Error::NotFitted);
        }
        let normalizer = average_path_length(self.sample_size).max(f64::MIN_POSITIVE);

        Ok(x.iter()
            .map(|row| {
                let total: f64 = self.trees.iter().map(|t| t.path_length(row)).sum();
                let mean_depth = total / self.trees.len() as f64;
                -(2f64.powf(-mean_depth / normalizer))
            })
            .collect())
    }
}
