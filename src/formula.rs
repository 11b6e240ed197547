//! Clausal form.
//!
//! A [`Formula`] is a conjunction of clauses over 1-indexed integer literals,
//! together with the bindings that tie each index to a variable. Conversion
//! from an [`Expr`] distributes to clausal form; conversion back rebuilds a
//! balanced expression tree.
//!
//! # Example
//!
//! ```
//! use crux::expr::Expr;
//! use crux::formula::Formula;
//!
//! let f = Formula::from_expression(&(Expr::var("a") & Expr::var("b")));
//! assert_eq!(f.to_dimacs(), "p cnf 2 2\n1 0\n2 0");
//! ```

use std::collections::BTreeMap;

use crate::expr::Expr;
use crate::rewrite::ExpandOptions;
use crate::solver::{Clause, Lit};

/// A formula in conjunctive normal form, with variable bindings.
///
/// # Invariants
///
/// - Clauses are nonempty; literals are nonzero and deduplicated.
/// - Indices are 1-based and assigned in first-seen order.
/// - An empty clause list encodes `true`. `false` is canonically encoded as
///   the two unit clauses `[[1], [-1]]` over a synthetic index with no
///   binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula<V> {
    clauses: Vec<Clause>,
    vars: Vec<V>,
    index: BTreeMap<V, Lit>,
}

impl<V> Formula<V> {
    /// The canonical `true` formula: no clauses, no bindings.
    pub fn tautology() -> Self {
        Formula {
            clauses: Vec::new(),
            vars: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    /// The canonical `false` formula: `[[1], [-1]]` over a synthetic index.
    pub fn contradiction() -> Self {
        Formula {
            clauses: vec![vec![1], vec![-1]],
            vars: Vec::new(),
            index: BTreeMap::new(),
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// The bound variables, in index order (index `i` binds `variables()[i - 1]`).
    pub fn variables(&self) -> &[V] {
        &self.vars
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Number of variable indices in play. The `false` placeholder counts
    /// its synthetic index.
    pub fn num_vars(&self) -> usize {
        if self.is_false() {
            1
        } else {
            self.vars.len()
        }
    }

    pub fn is_true(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn is_false(&self) -> bool {
        self.vars.is_empty() && self.clauses == [vec![1], vec![-1]]
    }

    /// The variable bound to `index`, if any.
    pub fn variable(&self, index: Lit) -> Option<&V> {
        if index < 1 {
            return None;
        }
        self.vars.get(index as usize - 1)
    }

    /// Emits the formula in DIMACS CNF format: a `p cnf` header, then one
    /// line per clause terminated by ` 0`. No trailing newline.
    pub fn to_dimacs(&self) -> String {
        let mut lines = Vec::with_capacity(self.clauses.len() + 1);
        lines.push(format!("p cnf {} {}", self.num_vars(), self.clauses.len()));
        for clause in &self.clauses {
            let mut line = clause
                .iter()
                .map(|lit| lit.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            line.push_str(" 0");
            lines.push(line);
        }
        lines.join("\n")
    }
}

impl<V: Ord> Formula<V> {
    /// The index bound to `var`, if any.
    pub fn index_of(&self, var: &V) -> Option<Lit> {
        self.index.get(var).copied()
    }
}

impl<V: Ord + Clone> Formula<V> {
    /// Converts an expression to clausal form.
    ///
    /// The expression is expanded aggressively (distribution included),
    /// which yields a constant or a conjunction of disjunctions of
    /// literals. Variables are numbered in first-seen order on a
    /// left-to-right, leaves-first walk; each conjunct becomes one clause
    /// with duplicated literals collapsed to their first occurrence and
    /// tautological clauses dropped.
    pub fn from_expression(expr: &Expr<V>) -> Self {
        let normalized = expr.clone().expand(ExpandOptions { aggressive: true });
        match normalized {
            Expr::Const(true) => return Self::tautology(),
            Expr::Const(false) => return Self::contradiction(),
            _ => {}
        }

        let mut formula = Self::tautology();
        formula.bind_variables(&normalized);

        let mut conjuncts = Vec::new();
        collect_conjuncts(&normalized, &mut conjuncts);
        for conjunct in conjuncts {
            let mut disjuncts = Vec::new();
            collect_disjuncts(conjunct, &mut disjuncts);

            let mut clause: Clause = Vec::new();
            for part in disjuncts {
                let (var, positive) = literal(part);
                let index = formula.index[var];
                let lit = if positive { index } else { -index };
                if !clause.contains(&lit) {
                    clause.push(lit);
                }
            }
            if clause.iter().any(|&lit| clause.contains(&-lit)) {
                continue;
            }
            formula.clauses.push(clause);
        }
        formula
    }

    fn bind_variables(&mut self, expr: &Expr<V>) {
        match expr {
            Expr::Const(_) => {}
            Expr::Var(v) => {
                if !self.index.contains_key(v) {
                    let index = self.vars.len() as Lit + 1;
                    self.vars.push(v.clone());
                    self.index.insert(v.clone(), index);
                }
            }
            Expr::Not(a) => self.bind_variables(a),
            Expr::And(a, b) | Expr::Or(a, b) => {
                self.bind_variables(a);
                self.bind_variables(b);
            }
        }
    }

    /// Builds a formula from raw clauses and bindings.
    ///
    /// # Panics
    ///
    /// Panics on malformed input: an empty clause, a zero literal, a literal
    /// without a binding (outside the `false` placeholder), or duplicate
    /// variables in `vars`.
    pub fn from_parts(clauses: Vec<Clause>, vars: Vec<V>) -> Self {
        let index: BTreeMap<V, Lit> = vars.iter().cloned().zip(1..).collect();
        assert_eq!(index.len(), vars.len(), "bindings must be one-to-one");

        let placeholder = vars.is_empty() && clauses == [vec![1], vec![-1]];
        if !placeholder {
            for clause in &clauses {
                assert!(!clause.is_empty(), "clauses must be nonempty");
                for &lit in clause {
                    assert_ne!(lit, 0, "literals must be nonzero");
                    assert!(
                        lit.unsigned_abs() as usize <= vars.len(),
                        "literal {} has no binding",
                        lit
                    );
                }
            }
        }
        Formula { clauses, vars, index }
    }

    /// Rebuilds a balanced expression: each clause a balanced `Or` tree in
    /// clause order, the clause sequence a balanced `And` tree.
    pub fn to_expression(&self) -> Expr<V> {
        if self.is_false() {
            return Expr::constant(false);
        }
        if self.is_true() {
            return Expr::constant(true);
        }
        let clauses: Vec<Expr<V>> = self
            .clauses
            .iter()
            .map(|clause| {
                let literals: Vec<Expr<V>> = clause
                    .iter()
                    .map(|&lit| {
                        let var = self.vars[lit.unsigned_abs() as usize - 1].clone();
                        if lit > 0 {
                            Expr::var(var)
                        } else {
                            Expr::not(Expr::var(var))
                        }
                    })
                    .collect();
                balanced(literals, Expr::or)
            })
            .collect();
        balanced(clauses, Expr::and)
    }
}

fn collect_conjuncts<'a, V>(expr: &'a Expr<V>, out: &mut Vec<&'a Expr<V>>) {
    match expr {
        Expr::And(a, b) => {
            collect_conjuncts(a, out);
            collect_conjuncts(b, out);
        }
        other => out.push(other),
    }
}

fn collect_disjuncts<'a, V>(expr: &'a Expr<V>, out: &mut Vec<&'a Expr<V>>) {
    match expr {
        Expr::Or(a, b) => {
            collect_disjuncts(a, out);
            collect_disjuncts(b, out);
        }
        other => out.push(other),
    }
}

fn literal<V>(expr: &Expr<V>) -> (&V, bool) {
    match expr {
        Expr::Var(v) => (v, true),
        Expr::Not(inner) => match &**inner {
            Expr::Var(v) => (v, false),
            _ => panic!("clausal form may only negate variables"),
        },
        _ => panic!("clausal form must be built from literals"),
    }
}

/// Joins a nonempty sequence into a min-depth binary tree, splitting at the
/// midpoint recursively.
fn balanced<V>(mut items: Vec<Expr<V>>, join: fn(Expr<V>, Expr<V>) -> Expr<V>) -> Expr<V> {
    match items.len() {
        0 => unreachable!("balanced join of an empty sequence"),
        1 => items.pop().unwrap(),
        n => {
            let right = items.split_off(n / 2);
            join(balanced(items, join), balanced(right, join))
        }
    }
}
