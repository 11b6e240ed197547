//! Assignment validation against a theory.
//!
//! Screens a candidate assignment without touching a solver: implied true
//! variables are redundant and drop out, implied variables set false are a
//! contradiction, and two conflicting true variables are a contradiction.

use crate::solver::SolveError;
use crate::theory::Theory;

/// Validates a candidate assignment under `theory`.
///
/// Pairs are processed in `theory.compare` order (stable, so equal keys keep
/// their input order) and folded left to right:
///
/// - a true variable already implied by an accepted true variable is
///   dropped;
/// - a false variable implied by an accepted true variable is a
///   contradiction;
/// - a true variable conflicting (either way round) with an accepted true
///   variable is a contradiction;
/// - anything else is accepted.
///
/// Returns the accepted pairs in processing order. False variables never
/// introduce conflicts.
///
/// ```
/// use crux::theory::Theory;
/// use crux::validate::validate_assignments;
///
/// struct Requires;
///
/// impl Theory<&'static str> for Requires {
///     fn implies(&self, a: &&'static str, b: &&'static str) -> bool {
///         (*a, *b) == ("server", "network")
///     }
/// }
///
/// let accepted =
///     validate_assignments([("server", true), ("network", true)], &Requires).unwrap();
/// assert_eq!(accepted, vec![("network", true), ("server", true)]);
/// ```
pub fn validate_assignments<V, T>(
    assignments: impl IntoIterator<Item = (V, bool)>,
    theory: &T,
) -> Result<Vec<(V, bool)>, SolveError>
where
    V: Ord + Clone,
    T: Theory<V>,
{
    let mut pairs: Vec<(V, bool)> = assignments.into_iter().collect();
    pairs.sort_by(|(a, _), (b, _)| theory.compare(a, b));

    let mut accepted: Vec<(V, bool)> = Vec::new();
    for (var, value) in pairs {
        let forced = accepted
            .iter()
            .any(|(u, u_value)| *u_value && theory.implies(u, &var));
        if value {
            if forced {
                continue;
            }
            let conflicted = accepted.iter().any(|(u, u_value)| {
                *u_value && (theory.conflicts(u, &var) || theory.conflicts(&var, u))
            });
            if conflicted {
                return Err(SolveError::Unsat);
            }
        } else if forced {
            return Err(SolveError::Unsat);
        }
        accepted.push((var, value));
    }
    Ok(accepted)
}
