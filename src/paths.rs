//! Iterator over root-to-leaf paths of a decision tree.
//!
//! Each path is the partial assignment that leads to a leaf of the requested
//! value; by construction of the tree, any extension of that assignment
//! evaluates the formula to the same value.
//!
//! # Example
//!
//! ```
//! use crux::expr::Expr;
//! use crux::formula::Formula;
//! use crux::theory::EmptyTheory;
//!
//! let f = Formula::from_expression(&(Expr::var("a") | Expr::var("b")));
//! let tree = f.decision_tree(&EmptyTheory);
//!
//! let paths: Vec<_> = tree.paths().collect();
//! assert_eq!(paths, vec![
//!     vec![("a", false), ("b", true)],
//!     vec![("a", true)],
//! ]);
//! ```
//!
//! The number of paths can be exponential in the number of variables; the
//! iterator is lazy and keeps only one path in memory.

use crate::tree::DecisionTree;

impl<V> DecisionTree<V> {
    /// Returns an iterator over all paths to `true` leaves.
    ///
    /// Each path is a `Vec<(V, bool)>` in branching order. A bare `true`
    /// leaf has exactly one path, the empty one; a bare `false` leaf has
    /// none.
    pub fn paths(&self) -> TreePaths<'_, V> {
        TreePaths::new(self, true)
    }

    /// Returns an iterator over all paths to leaves of the given value.
    pub fn paths_to(&self, value: bool) -> TreePaths<'_, V> {
        TreePaths::new(self, value)
    }
}

/// Iterator state for exploring a single node.
#[derive(Debug, Clone, Copy)]
enum Branch {
    Low,
    High,
}

/// Frame on the exploration stack.
#[derive(Debug)]
struct StackFrame<'a, V> {
    node: &'a DecisionTree<V>,
    /// Which branch to explore next (None if both explored)
    next_branch: Option<Branch>,
}

/// An iterator over root-to-leaf paths. Created by [`DecisionTree::paths()`].
///
/// Uses depth-first traversal with backtracking; the current path lives in a
/// single vector that grows and shrinks with the walk, and is only cloned
/// when a matching leaf is reached.
pub struct TreePaths<'a, V> {
    target: bool,
    stack: Vec<StackFrame<'a, V>>,
    current_path: Vec<(&'a V, bool)>,
}

impl<'a, V> TreePaths<'a, V> {
    fn new(root: &'a DecisionTree<V>, target: bool) -> Self {
        TreePaths {
            target,
            stack: vec![StackFrame {
                node: root,
                next_branch: Some(Branch::Low),
            }],
            current_path: Vec::new(),
        }
    }
}

impl<V: Clone> Iterator for TreePaths<'_, V> {
    type Item = Vec<(V, bool)>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let node = frame.node;
            let next_branch = frame.next_branch;

            if let DecisionTree::Leaf(value) = node {
                let result = if *value == self.target {
                    Some(
                        self.current_path
                            .iter()
                            .map(|&(var, branch)| (var.clone(), branch))
                            .collect(),
                    )
                } else {
                    None
                };
                self.stack.pop();
                // Pop the literal that led here (unless this was the root).
                if !self.stack.is_empty() {
                    self.current_path.pop();
                }
                if let Some(path) = result {
                    return Some(path);
                }
                continue;
            }

            let (var, low, high) = match node {
                DecisionTree::Node { var, low, high } => (var, low, high),
                DecisionTree::Leaf(_) => unreachable!(),
            };

            match next_branch {
                Some(Branch::Low) => {
                    frame.next_branch = Some(Branch::High);
                    self.current_path.push((var, false));
                    self.stack.push(StackFrame {
                        node: low,
                        next_branch: Some(Branch::Low),
                    });
                }
                Some(Branch::High) => {
                    frame.next_branch = None;
                    self.current_path.push((var, true));
                    self.stack.push(StackFrame {
                        node: high,
                        next_branch: Some(Branch::Low),
                    });
                }
                None => {
                    // Both branches explored - backtrack.
                    self.stack.pop();
                    if !self.stack.is_empty() {
                        self.current_path.pop();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::expr::Expr;
    use crate::formula::Formula;
    use crate::theory::EmptyTheory;

    fn tree_of(expr: &Expr<&'static str>) -> DecisionTree<&'static str> {
        Formula::from_expression(expr).decision_tree(&EmptyTheory)
    }

    #[test]
    fn test_paths_conjunction() {
        let tree = tree_of(&(Expr::var("a") & Expr::var("b")));
        let paths: Vec<_> = tree.paths().collect();
        assert_eq!(paths, vec![vec![("a", true), ("b", true)]]);
    }

    #[test]
    fn test_paths_disjunction() {
        let tree = tree_of(&(Expr::var("a") | Expr::var("b")));
        let paths: Vec<_> = tree.paths().collect();
        assert_eq!(
            paths,
            vec![vec![("a", false), ("b", true)], vec![("a", true)]]
        );
    }

    #[test]
    fn test_paths_to_false() {
        let tree = tree_of(&(Expr::var("a") & Expr::var("b")));
        let paths: Vec<_> = tree.paths_to(false).collect();
        assert_eq!(
            paths,
            vec![vec![("a", false)], vec![("a", true), ("b", false)]]
        );
    }

    #[test]
    fn test_paths_constants() {
        let t: DecisionTree<&str> = DecisionTree::leaf(true);
        let paths: Vec<_> = t.paths().collect();
        assert_eq!(paths, vec![Vec::<(&str, bool)>::new()]);
        assert_eq!(t.paths_to(false).count(), 0);

        let f: DecisionTree<&str> = DecisionTree::leaf(false);
        assert_eq!(f.paths().count(), 0);
    }

    #[test]
    fn test_paths_satisfy_source_expression() {
        let e = (Expr::var("a") & !Expr::var("b")) | (Expr::var("b") & Expr::var("c"));
        let tree = tree_of(&e);
        for path in tree.paths() {
            let env: std::collections::BTreeMap<&str, bool> = path.into_iter().collect();
            // Unmentioned variables are free; false is as good as any.
            assert!(e.eval(&mut |v| env.get(v).copied().unwrap_or(false)));
        }
        for path in tree.paths_to(false) {
            let env: std::collections::BTreeMap<&str, bool> = path.into_iter().collect();
            assert!(!e.eval(&mut |v| env.get(v).copied().unwrap_or(false)));
        }
    }

    #[test]
    fn test_path_count_matches_model_count() {
        use num_bigint::BigUint;

        let e = (Expr::var("a") | Expr::var("b")) & (Expr::var("b") | Expr::var("c"));
        let tree = tree_of(&e);
        let total: BigUint = tree
            .paths()
            .map(|path| BigUint::from(1u32) << (3 - path.len()))
            .sum();
        assert_eq!(total, tree.model_count(3));
    }
}
