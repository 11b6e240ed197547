//! Minimal satisfying scenarios.
//!
//! A scenario is a partial assignment listing the variables that must be
//! true; everything unmentioned defaults to false. Enumeration walks every
//! model of the formula via blocking clauses, prunes models the theory's
//! conflict relation forbids, strips variables implied by other true
//! variables, and keeps a subset-minimal covering set.

use std::collections::BTreeMap;

use log::warn;

use crate::formula::Formula;
use crate::solver::{default_solver, Model, Problem, Solution};
use crate::theory::Theory;

/// A partial assignment; unmentioned variables read as false.
pub type Scenario<V> = BTreeMap<V, bool>;

const CLAUSE_WARNING_THRESHOLD: usize = 100;

impl<V: Ord + Clone> Formula<V> {
    /// Enumerates the minimal scenarios that cover every model.
    ///
    /// After each model the solver is re-run with a blocking clause (the
    /// negation of the model, at most one literal per binding), so the walk
    /// visits each of the up to `2^bindings` models once. Models that set
    /// two conflicting variables true are skipped and blocked. Each
    /// surviving model is reduced to its true variables minus those implied
    /// by another true variable (a single pass, no transitive closure), and
    /// scenarios subsumed by a smaller one are dropped. Order follows first
    /// discovery.
    ///
    /// The `true` formula yields `[{}]`; the `false` placeholder yields `[]`.
    pub fn satisfying_scenarios<T: Theory<V>>(&self, theory: &T) -> Vec<Scenario<V>> {
        if self.is_false() {
            return Vec::new();
        }
        if self.is_true() {
            return vec![Scenario::new()];
        }
        if self.num_clauses() > CLAUSE_WARNING_THRESHOLD {
            warn!(
                "enumerating models over {} clauses; worst case is 2^{} solver calls",
                self.num_clauses(),
                self.num_vars()
            );
        }

        let mut solver = default_solver();
        let mut clauses = self.clauses().to_vec();
        let mut scenarios: Vec<Scenario<V>> = Vec::new();
        loop {
            let problem = Problem {
                var_count: self.num_vars(),
                clauses: clauses.clone(),
            };
            let model = match solver.solve(&problem) {
                Solution::Sat { model } => model,
                Solution::Unsat | Solution::Unknown => break,
            };
            clauses.push(model.iter().map(|&lit| -lit).collect());

            let assignment = self.model_from_literals(&model);
            if violates_conflicts(&assignment, theory) {
                continue;
            }
            scenarios.push(reduce(&assignment, theory));
        }
        minimal_cover(scenarios)
    }
}

fn violates_conflicts<V: Ord, T: Theory<V>>(model: &Model<V>, theory: &T) -> bool {
    let true_vars: Vec<&V> = model
        .iter()
        .filter(|&(_, &value)| value)
        .map(|(var, _)| var)
        .collect();
    true_vars.iter().enumerate().any(|(i, &a)| {
        true_vars[i + 1..]
            .iter()
            .any(|&b| theory.conflicts(a, b) || theory.conflicts(b, a))
    })
}

/// Keeps the model's true variables, minus those implied by another true
/// variable of the same model.
fn reduce<V: Ord + Clone, T: Theory<V>>(model: &Model<V>, theory: &T) -> Scenario<V> {
    let true_vars: Vec<&V> = model
        .iter()
        .filter(|&(_, &value)| value)
        .map(|(var, _)| var)
        .collect();
    let mut scenario = Scenario::new();
    for &var in &true_vars {
        let implied = true_vars
            .iter()
            .any(|&other| other != var && theory.implies(other, var));
        if !implied {
            scenario.insert(var.clone(), true);
        }
    }
    scenario
}

/// Drops duplicates (keeping the first) and scenarios strictly subsumed by a
/// smaller scenario.
fn minimal_cover<V: Ord + Clone>(scenarios: Vec<Scenario<V>>) -> Vec<Scenario<V>> {
    let mut kept = Vec::new();
    for (i, scenario) in scenarios.iter().enumerate() {
        let redundant = scenarios.iter().enumerate().any(|(j, other)| {
            if i == j {
                false
            } else if other == scenario {
                j < i
            } else {
                other.keys().all(|k| scenario.contains_key(k))
            }
        });
        if !redundant {
            kept.push(scenario.clone());
        }
    }
    kept
}
