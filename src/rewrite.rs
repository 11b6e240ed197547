//! Bottom-up fixpoint rewriting.
//!
//! The driver composes the rule functions from [`crate::rules`]: children are
//! rewritten first (post-order), then the rule sequence is applied to the
//! node until it stops changing. A node that changed shape is re-entered, so
//! patterns exposed by the rewrite get another chance to match. Results are
//! memoized per input subtree, keeping repeated subtrees from being rewritten
//! over and over.
//!
//! Every rule strictly moves the tree toward normal form except
//! [`rules::distribution`], which grows it; distribution only runs in
//! aggressive mode and only fires while an `Or` still has an `And` operand,
//! which bounds it.

use std::collections::BTreeMap;

use log::trace;

use crate::expr::Expr;
use crate::rules;

/// A rewrite rule: returns a rewritten expression on match, its argument
/// unchanged otherwise.
pub type Rule<V> = fn(Expr<V>) -> Expr<V>;

/// Options for [`expand`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Also apply distribution, pushing `Or` below `And`. The output can be
    /// exponentially larger; CNF conversion is the one caller that wants it.
    pub aggressive: bool,
}

/// Applies the simplification rules to a fixpoint.
pub fn expand<V: Ord + Clone>(expr: Expr<V>, options: ExpandOptions) -> Expr<V> {
    let mut sequence: Vec<Rule<V>> = vec![
        rules::constant_negation,
        rules::double_negation,
        rules::de_morgan,
        rules::idempotent,
        rules::identity,
        rules::domination,
        rules::complement,
        rules::absorption,
    ];
    if options.aggressive {
        sequence.push(rules::distribution);
    }
    Rewriter::new(sequence).rewrite(expr)
}

impl<V: Ord + Clone> Expr<V> {
    /// Simplifies the expression; see [`expand`].
    pub fn expand(self, options: ExpandOptions) -> Self {
        expand(self, options)
    }
}

/// Composes a rule sequence into a bottom-up fixpoint traversal.
pub struct Rewriter<V> {
    rules: Vec<Rule<V>>,
    cache: BTreeMap<Expr<V>, Expr<V>>,
}

impl<V: Ord + Clone> Rewriter<V> {
    pub fn new(rules: Vec<Rule<V>>) -> Self {
        Rewriter {
            rules,
            cache: BTreeMap::new(),
        }
    }

    /// Rewrites `expr` to a form on which no rule fires anywhere.
    pub fn rewrite(&mut self, expr: Expr<V>) -> Expr<V> {
        if let Some(hit) = self.cache.get(&expr) {
            return hit.clone();
        }
        let key = expr.clone();
        let rewritten = self.rewrite_children(expr);
        let result = self.fixpoint(rewritten);
        self.cache.insert(key, result.clone());
        result
    }

    fn rewrite_children(&mut self, expr: Expr<V>) -> Expr<V> {
        match expr {
            Expr::Not(a) => Expr::not(self.rewrite(*a)),
            Expr::And(a, b) => Expr::and(self.rewrite(*a), self.rewrite(*b)),
            Expr::Or(a, b) => Expr::or(self.rewrite(*a), self.rewrite(*b)),
            leaf => leaf,
        }
    }

    fn fixpoint(&mut self, expr: Expr<V>) -> Expr<V> {
        let mut current = expr;
        loop {
            let mut next = current.clone();
            for rule in &self.rules {
                next = rule(next);
            }
            if next == current {
                return current;
            }
            trace!("rewrite step produced a new node shape");
            // Re-enter: the node changed, so its children may expose new
            // matches and the node itself gets the rule sequence again.
            current = self.rewrite_children(next);
        }
    }
}
