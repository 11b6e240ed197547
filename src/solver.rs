//! SAT solving.
//!
//! The [`Solver`] trait is the seam between the formula pipeline and the
//! actual search. Two backends are built in: [`Dpll`], the default, and
//! [`Exhaustive`], a deterministic assignment enumerator meant for tests and
//! cross-checking. Which one [`Formula::solve`] uses is a process-scoped
//! choice ([`set_backend`]); [`Formula::solve_with`] takes the backend
//! explicitly.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::RwLock;

use log::debug;

use crate::formula::Formula;

pub type Lit = i32;

pub type Clause = Vec<Lit>;

/// A CNF problem in backend form.
///
/// Clause literals reference variables `1..=var_count`, sign encoding
/// polarity.
#[derive(Debug, Clone)]
pub struct Problem {
    pub var_count: usize,
    pub clauses: Vec<Clause>,
}

/// Backend verdict. A model carries one literal per variable index,
/// positive for true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    Sat { model: Vec<Lit> },
    Unsat,
    Unknown,
}

pub trait Solver {
    fn solve(&mut self, problem: &Problem) -> Solution;
}

/// An assignment of variables to truth values.
pub type Model<V> = BTreeMap<V, bool>;

/// Why a formula has no model to give.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveError {
    Unsat,
    Unknown,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::Unsat => write!(f, "formula is unsatisfiable"),
            SolveError::Unknown => write!(f, "solver could not decide the formula"),
        }
    }
}

impl std::error::Error for SolveError {}

/// Built-in backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Dpll,
    Exhaustive,
}

static BACKEND: RwLock<Backend> = RwLock::new(Backend::Dpll);

/// Selects the process-wide backend used by [`Formula::solve`].
pub fn set_backend(backend: Backend) {
    *BACKEND.write().unwrap() = backend;
}

/// The currently selected process-wide backend.
pub fn backend() -> Backend {
    *BACKEND.read().unwrap()
}

pub(crate) fn default_solver() -> Box<dyn Solver> {
    match backend() {
        Backend::Dpll => Box::new(Dpll),
        Backend::Exhaustive => Box::new(Exhaustive),
    }
}

/// Recursive DPLL: unit propagation, pure-literal elimination, then
/// branching on the first literal of the first clause (true before false).
/// Unassigned variables come out false. Fully deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dpll;

impl Solver for Dpll {
    fn solve(&mut self, problem: &Problem) -> Solution {
        if problem.clauses.iter().any(|clause| clause.is_empty()) {
            return Solution::Unsat;
        }
        match search(problem.clauses.clone()) {
            Some(trail) => Solution::Sat {
                model: model_from_trail(problem.var_count, &trail),
            },
            None => Solution::Unsat,
        }
    }
}

fn search(mut clauses: Vec<Clause>) -> Option<Vec<Lit>> {
    let mut trail = Vec::new();
    loop {
        if let Some(&lit) = clauses.iter().find(|c| c.len() == 1).map(|c| &c[0]) {
            debug!("unit clause {}", lit);
            clauses = assign(&clauses, lit)?;
            trail.push(lit);
            continue;
        }
        if let Some(lit) = pure_literal(&clauses) {
            debug!("pure literal {}", lit);
            clauses = assign(&clauses, lit)?;
            trail.push(lit);
            continue;
        }
        break;
    }

    if clauses.is_empty() {
        return Some(trail);
    }

    let pivot = clauses[0][0];
    debug!("branching on {}", pivot);
    for lit in [pivot, -pivot] {
        if let Some(reduced) = assign(&clauses, lit) {
            if let Some(rest) = search(reduced) {
                trail.push(lit);
                trail.extend(rest);
                return Some(trail);
            }
        }
    }
    None
}

/// Applies `lit`: satisfied clauses drop out, the opposite literal is
/// removed everywhere. `None` means some clause became empty (a conflict).
pub(crate) fn assign(clauses: &[Clause], lit: Lit) -> Option<Vec<Clause>> {
    let mut reduced = Vec::with_capacity(clauses.len());
    for clause in clauses {
        if clause.contains(&lit) {
            continue;
        }
        let rest: Clause = clause.iter().copied().filter(|&l| l != -lit).collect();
        if rest.is_empty() {
            return None;
        }
        reduced.push(rest);
    }
    Some(reduced)
}

fn pure_literal(clauses: &[Clause]) -> Option<Lit> {
    let mut polarity: BTreeMap<Lit, (bool, bool)> = BTreeMap::new();
    for &lit in clauses.iter().flatten() {
        let entry = polarity.entry(lit.abs()).or_default();
        if lit > 0 {
            entry.0 = true;
        } else {
            entry.1 = true;
        }
    }
    polarity
        .into_iter()
        .find_map(|(var, seen)| match seen {
            (true, false) => Some(var),
            (false, true) => Some(-var),
            _ => None,
        })
}

fn model_from_trail(var_count: usize, trail: &[Lit]) -> Vec<Lit> {
    let mut values = vec![false; var_count + 1];
    for &lit in trail {
        if lit > 0 {
            values[lit as usize] = true;
        }
    }
    (1..=var_count)
        .map(|v| if values[v] { v as Lit } else { -(v as Lit) })
        .collect()
}

/// Reference backend: walks every assignment from all-false upward
/// (variable 1 least significant) and returns the first that satisfies all
/// clauses.
#[derive(Debug, Clone, Copy, Default)]
pub struct Exhaustive;

impl Solver for Exhaustive {
    fn solve(&mut self, problem: &Problem) -> Solution {
        let n = problem.var_count;
        let mut values = vec![false; n + 1];
        loop {
            let satisfied = problem.clauses.iter().all(|clause| {
                clause
                    .iter()
                    .any(|&lit| (lit > 0) == values[lit.unsigned_abs() as usize])
            });
            if satisfied {
                let model = (1..=n)
                    .map(|v| if values[v] { v as Lit } else { -(v as Lit) })
                    .collect();
                return Solution::Sat { model };
            }
            let mut v = 1;
            while v <= n && values[v] {
                values[v] = false;
                v += 1;
            }
            if v > n {
                return Solution::Unsat;
            }
            values[v] = true;
        }
    }
}

impl<V: Ord + Clone> Formula<V> {
    /// Solves with the process-wide backend.
    ///
    /// Constant formulas never reach a backend: `true` yields the empty
    /// model, the `false` placeholder yields [`SolveError::Unsat`].
    pub fn solve(&self) -> Result<Model<V>, SolveError> {
        self.solve_with(&mut *default_solver())
    }

    /// Solves with an explicit backend.
    pub fn solve_with(&self, solver: &mut dyn Solver) -> Result<Model<V>, SolveError> {
        if self.is_true() {
            return Ok(Model::new());
        }
        if self.is_false() {
            return Err(SolveError::Unsat);
        }
        let problem = Problem {
            var_count: self.num_vars(),
            clauses: self.clauses().to_vec(),
        };
        match solver.solve(&problem) {
            Solution::Sat { model } => Ok(self.model_from_literals(&model)),
            Solution::Unsat => Err(SolveError::Unsat),
            Solution::Unknown => Err(SolveError::Unknown),
        }
    }

    /// True iff the formula has a model.
    pub fn satisfiable(&self) -> bool {
        self.solve().is_ok()
    }

    /// Maps backend literals through the bindings; synthetic indices with no
    /// binding are discarded.
    pub(crate) fn model_from_literals(&self, literals: &[Lit]) -> Model<V> {
        let mut model = Model::new();
        for &lit in literals {
            if let Some(var) = self.variable(lit.abs()) {
                model.insert(var.clone(), lit > 0);
            }
        }
        model
    }
}
