//! # crux: Boolean reasoning in Rust
//!
//! **`crux`** is a small library for reasoning about propositional formulas
//! over a user-chosen variable type. It answers four questions about a
//! formula: is it satisfiable, what is a model, which minimal scenarios
//! cover every model, and what does the formula look like as a decision
//! tree. A standalone validator screens candidate assignments against a
//! caller-supplied implication/conflict theory without touching a solver.
//!
//! ## Pipeline
//!
//! An [`Expr`][crate::expr::Expr] is a plain AST built with constructors or
//! the `!`/`&`/`|` operators. A fixpoint rewrite engine
//! ([`expand`][crate::rewrite::expand]) simplifies it algebraically; with
//! distribution enabled the same engine drives conversion into a clausal
//! [`Formula`][crate::formula::Formula] with stable 1-based variable
//! numbering. Formulas solve through a pluggable SAT backend and convert
//! back into balanced expressions or DIMACS text.
//!
//! ## Basic Usage
//!
//! ```rust
//! use crux::expr::Expr;
//! use crux::formula::Formula;
//! use crux::theory::EmptyTheory;
//!
//! // Build a formula: exactly one of a, b
//! let a = Expr::var("a");
//! let b = Expr::var("b");
//! let f = (a.clone() | b.clone()) & !(a & b);
//!
//! // Convert to clausal form and solve
//! let formula = Formula::from_expression(&f);
//! assert!(formula.satisfiable());
//!
//! // Minimal scenarios covering every model
//! let scenarios = formula.satisfying_scenarios(&EmptyTheory);
//! assert_eq!(scenarios.len(), 2);
//!
//! // A decision tree with one satisfying path per scenario
//! let tree = formula.decision_tree(&EmptyTheory);
//! assert_eq!(tree.paths().count(), 2);
//! ```
//!
//! ## Core Components
//!
//! - **[`expr`]**: the expression AST, builders, and the strict evaluator.
//! - **[`rewrite`]** / **[`rules`]**: the bottom-up fixpoint rewrite engine
//!   and the algebraic law set it applies.
//! - **[`formula`]**: clausal form, bindings, DIMACS emission, and both
//!   directions of the expression conversion.
//! - **[`solver`]**: the SAT facade with swappable backends.
//! - **[`theory`]**: caller-supplied implication/conflict relations and
//!   variable ordering.
//! - **[`scenarios`]**, **[`tree`]**, **[`paths`]**: the analyses layered on
//!   top — model enumeration, decision trees, path iteration.
//! - **[`validate`]**: assignment screening under a theory.
//! - **[`dot`]**: Graphviz rendering of decision trees.

pub mod dot;
pub mod expr;
pub mod formula;
pub mod paths;
pub mod rewrite;
pub mod rules;
pub mod scenarios;
pub mod solver;
pub mod theory;
pub mod tree;
pub mod validate;
