//! Algebraic rewrite rules.
//!
//! Each rule is a pure function on [`Expr`]: it returns a rewritten form when
//! its pattern matches and its argument unchanged otherwise. Patterns match
//! both operand orders; equality between subtrees is structural.

use crate::expr::Expr;

/// `!!a -> a`
pub fn double_negation<V>(expr: Expr<V>) -> Expr<V> {
    match expr {
        Expr::Not(inner) => match *inner {
            Expr::Not(a) => *a,
            other => Expr::not(other),
        },
        other => other,
    }
}

/// `!true -> false`, `!false -> true`
pub fn constant_negation<V>(expr: Expr<V>) -> Expr<V> {
    match expr {
        Expr::Not(inner) => match *inner {
            Expr::Const(b) => Expr::Const(!b),
            other => Expr::not(other),
        },
        other => other,
    }
}

/// `!(a & b) -> !a | !b`, `!(a | b) -> !a & !b`
pub fn de_morgan<V>(expr: Expr<V>) -> Expr<V> {
    match expr {
        Expr::Not(inner) => match *inner {
            Expr::And(a, b) => Expr::Or(Box::new(Expr::Not(a)), Box::new(Expr::Not(b))),
            Expr::Or(a, b) => Expr::And(Box::new(Expr::Not(a)), Box::new(Expr::Not(b))),
            other => Expr::not(other),
        },
        other => other,
    }
}

/// `a & a -> a`, `a | a -> a`
pub fn idempotent<V: Eq>(expr: Expr<V>) -> Expr<V> {
    match expr {
        Expr::And(a, b) | Expr::Or(a, b) if a == b => *a,
        other => other,
    }
}

/// `a & true -> a`, `a | false -> a`
pub fn identity<V>(expr: Expr<V>) -> Expr<V> {
    match expr {
        Expr::And(a, b) => match (*a, *b) {
            (x, Expr::Const(true)) | (Expr::Const(true), x) => x,
            (x, y) => Expr::and(x, y),
        },
        Expr::Or(a, b) => match (*a, *b) {
            (x, Expr::Const(false)) | (Expr::Const(false), x) => x,
            (x, y) => Expr::or(x, y),
        },
        other => other,
    }
}

/// `a & false -> false`, `a | true -> true`
pub fn domination<V>(expr: Expr<V>) -> Expr<V> {
    match expr {
        Expr::And(a, b) => match (*a, *b) {
            (_, Expr::Const(false)) | (Expr::Const(false), _) => Expr::Const(false),
            (x, y) => Expr::and(x, y),
        },
        Expr::Or(a, b) => match (*a, *b) {
            (_, Expr::Const(true)) | (Expr::Const(true), _) => Expr::Const(true),
            (x, y) => Expr::or(x, y),
        },
        other => other,
    }
}

/// `a & !a -> false`, `a | !a -> true`
pub fn complement<V: Eq>(expr: Expr<V>) -> Expr<V> {
    match expr {
        Expr::And(a, b) => match (*a, *b) {
            (x, Expr::Not(y)) if x == *y => Expr::Const(false),
            (Expr::Not(y), x) if x == *y => Expr::Const(false),
            (x, y) => Expr::and(x, y),
        },
        Expr::Or(a, b) => match (*a, *b) {
            (x, Expr::Not(y)) if x == *y => Expr::Const(true),
            (Expr::Not(y), x) if x == *y => Expr::Const(true),
            (x, y) => Expr::or(x, y),
        },
        other => other,
    }
}

/// `a & (a | b) -> a`, `a | (a & b) -> a`
pub fn absorption<V: Eq>(expr: Expr<V>) -> Expr<V> {
    match expr {
        Expr::And(a, b) => match (*a, *b) {
            (x, Expr::Or(p, q)) if x == *p || x == *q => x,
            (Expr::Or(p, q), x) if x == *p || x == *q => x,
            (x, y) => Expr::and(x, y),
        },
        Expr::Or(a, b) => match (*a, *b) {
            (x, Expr::And(p, q)) if x == *p || x == *q => x,
            (Expr::And(p, q), x) if x == *p || x == *q => x,
            (x, y) => Expr::or(x, y),
        },
        other => other,
    }
}

/// `(a & b) | c -> (a | c) & (b | c)`, `a | (b & c) -> (a | b) & (a | c)`
///
/// Grows the tree, so it runs only in aggressive mode; pushing every `Or`
/// below every `And` is what produces clausal form.
pub fn distribution<V: Clone>(expr: Expr<V>) -> Expr<V> {
    match expr {
        Expr::Or(a, b) => match (*a, *b) {
            (Expr::And(p, q), r) => Expr::and(Expr::or(*p, r.clone()), Expr::or(*q, r)),
            (l, Expr::And(p, q)) => Expr::and(Expr::or(l.clone(), *p), Expr::or(l, *q)),
            (l, r) => Expr::or(l, r),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(id: u32) -> Expr<u32> {
        Expr::var(id)
    }

    #[test]
    fn test_double_negation() {
        assert_eq!(double_negation(Expr::not(Expr::not(var(1)))), var(1));
        assert_eq!(double_negation(Expr::not(var(1))), Expr::not(var(1)));
    }

    #[test]
    fn test_constant_negation() {
        assert_eq!(constant_negation(Expr::not(Expr::<u32>::constant(true))), Expr::constant(false));
        assert_eq!(constant_negation(Expr::not(Expr::<u32>::constant(false))), Expr::constant(true));
    }

    #[test]
    fn test_de_morgan() {
        assert_eq!(
            de_morgan(Expr::not(Expr::and(var(1), var(2)))),
            Expr::or(Expr::not(var(1)), Expr::not(var(2)))
        );
        assert_eq!(
            de_morgan(Expr::not(Expr::or(var(1), var(2)))),
            Expr::and(Expr::not(var(1)), Expr::not(var(2)))
        );
    }

    #[test]
    fn test_idempotent() {
        assert_eq!(idempotent(Expr::and(var(1), var(1))), var(1));
        assert_eq!(idempotent(Expr::or(var(1), var(1))), var(1));
        // Nested subtrees count as long as they are structurally equal.
        let nested = Expr::or(var(1), var(2));
        assert_eq!(idempotent(Expr::and(nested.clone(), nested.clone())), nested);
        let distinct = idempotent(Expr::and(var(1), var(2)));
        assert_eq!(distinct, Expr::and(var(1), var(2)));
    }

    #[test]
    fn test_identity() {
        assert_eq!(identity(Expr::and(var(1), Expr::constant(true))), var(1));
        assert_eq!(identity(Expr::and(Expr::constant(true), var(1))), var(1));
        assert_eq!(identity(Expr::or(var(1), Expr::constant(false))), var(1));
        assert_eq!(identity(Expr::or(Expr::constant(false), var(1))), var(1));
    }

    #[test]
    fn test_domination() {
        assert_eq!(domination(Expr::and(var(1), Expr::constant(false))), Expr::constant(false));
        assert_eq!(domination(Expr::and(Expr::constant(false), var(1))), Expr::constant(false));
        assert_eq!(domination(Expr::or(var(1), Expr::constant(true))), Expr::constant(true));
        assert_eq!(domination(Expr::or(Expr::constant(true), var(1))), Expr::constant(true));
    }

    #[test]
    fn test_complement() {
        assert_eq!(complement(Expr::and(var(1), Expr::not(var(1)))), Expr::constant(false));
        assert_eq!(complement(Expr::and(Expr::not(var(1)), var(1))), Expr::constant(false));
        assert_eq!(complement(Expr::or(var(1), Expr::not(var(1)))), Expr::constant(true));
        assert_eq!(complement(Expr::or(Expr::not(var(1)), var(1))), Expr::constant(true));
        // Different variables are left alone.
        let other = complement(Expr::and(var(1), Expr::not(var(2))));
        assert_eq!(other, Expr::and(var(1), Expr::not(var(2))));
    }

    #[test]
    fn test_absorption() {
        assert_eq!(absorption(Expr::and(var(1), Expr::or(var(1), var(2)))), var(1));
        assert_eq!(absorption(Expr::and(Expr::or(var(2), var(1)), var(1))), var(1));
        assert_eq!(absorption(Expr::or(var(1), Expr::and(var(1), var(2)))), var(1));
        assert_eq!(absorption(Expr::or(Expr::and(var(2), var(1)), var(1))), var(1));
    }

    #[test]
    fn test_distribution() {
        assert_eq!(
            distribution(Expr::or(Expr::and(var(1), var(2)), var(3))),
            Expr::and(Expr::or(var(1), var(3)), Expr::or(var(2), var(3)))
        );
        assert_eq!(
            distribution(Expr::or(var(1), Expr::and(var(2), var(3)))),
            Expr::and(Expr::or(var(1), var(2)), Expr::or(var(1), var(3)))
        );
        // And-over-Or is not this rule's job.
        let dnf = distribution(Expr::and(var(1), Expr::or(var(2), var(3))));
        assert_eq!(dnf, Expr::and(var(1), Expr::or(var(2), var(3))));
    }
}
