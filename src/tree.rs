//! Decision tree synthesis.
//!
//! A [`DecisionTree`] decides a formula one variable at a time: each node
//! branches on a variable (`low` = false, `high` = true), each leaf is the
//! formula's value on that path. Construction prunes variables that cannot
//! change the outcome — structurally identical branches collapse — and cuts
//! true-branches the theory's conflict relation forbids, so no variable
//! appears twice on a path and irrelevant variables never appear at all.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::formula::Formula;
use crate::solver::{assign, Clause};
use crate::theory::Theory;

/// A binary decision tree with constant leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionTree<V> {
    Leaf(bool),
    Node {
        var: V,
        low: Box<DecisionTree<V>>,
        high: Box<DecisionTree<V>>,
    },
}

impl<V> DecisionTree<V> {
    pub fn leaf(value: bool) -> Self {
        DecisionTree::Leaf(value)
    }

    pub fn node(var: V, low: Self, high: Self) -> Self {
        DecisionTree::Node {
            var,
            low: Box::new(low),
            high: Box::new(high),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, DecisionTree::Leaf(_))
    }

    /// Number of satisfying total assignments over a universe of `num_vars`
    /// variables.
    ///
    /// # Panics
    ///
    /// Panics if `num_vars` is smaller than the number of variables on some
    /// root-to-leaf path.
    pub fn model_count(&self, num_vars: usize) -> BigUint {
        match self {
            DecisionTree::Leaf(false) => BigUint::zero(),
            DecisionTree::Leaf(true) => BigUint::one() << num_vars,
            DecisionTree::Node { low, high, .. } => {
                low.model_count(num_vars - 1) + high.model_count(num_vars - 1)
            }
        }
    }
}

impl<V: Ord + Clone> Formula<V> {
    /// Builds a decision tree whose path values equal the formula's truth
    /// value under the path's partial assignment.
    ///
    /// Variables are visited in `theory.compare` order among those still
    /// appearing in the residual clauses. A true-branch that would set a
    /// variable conflicting with one already set true becomes a false leaf
    /// without recursion. Branches that come out structurally identical
    /// collapse into one, which is how variables with no influence drop out.
    /// The root itself may be a leaf.
    pub fn decision_tree<T: Theory<V>>(&self, theory: &T) -> DecisionTree<V> {
        if self.is_false() {
            return DecisionTree::leaf(false);
        }
        build(self, self.clauses().to_vec(), &mut Vec::new(), theory)
    }
}

fn build<V: Ord + Clone, T: Theory<V>>(
    formula: &Formula<V>,
    clauses: Vec<Clause>,
    fixed_true: &mut Vec<V>,
    theory: &T,
) -> DecisionTree<V> {
    if clauses.is_empty() {
        return DecisionTree::leaf(true);
    }

    let (var, index) = clauses
        .iter()
        .flatten()
        .filter_map(|&lit| formula.variable(lit.abs()).map(|var| (var, lit.abs())))
        .min_by(|x, y| theory.compare(x.0, y.0).then_with(|| x.0.cmp(y.0)))
        .expect("residual clauses are nonempty and fully bound");
    let var = var.clone();

    let low = match assign(&clauses, -index) {
        Some(reduced) => build(formula, reduced, fixed_true, theory),
        None => DecisionTree::leaf(false),
    };

    let conflicted = fixed_true
        .iter()
        .any(|u| theory.conflicts(u, &var) || theory.conflicts(&var, u));
    let high = if conflicted {
        DecisionTree::leaf(false)
    } else {
        match assign(&clauses, index) {
            Some(reduced) => {
                fixed_true.push(var.clone());
                let subtree = build(formula, reduced, fixed_true, theory);
                fixed_true.pop();
                subtree
            }
            None => DecisionTree::leaf(false),
        }
    };

    if low == high {
        return low;
    }
    DecisionTree::node(var, low, high)
}
