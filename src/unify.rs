//! Structural unification of terms against a binding environment.

use crate::binding::Bindings;
use crate::term::Term;

/// Unifies `a` with `b` under `env`.
///
/// Both sides are compared element by element (an atom counts as a compound of
/// one element). On success the extended environment is returned; `env` itself
/// is never touched. An extension that holds no bindings at all is reported as
/// a failure, which among other things makes fully ground queries fail.
pub fn unify(a: &Term, b: &Term, env: &Bindings) -> Option<Bindings> {
    let mut scratch = env.clone();
    if unify_elements(a.elements(), b.elements(), &mut scratch) && !scratch.is_empty() {
        Some(scratch)
    } else {
        None
    }
}

fn unify_elements(left: &[Term], right: &[Term], env: &mut Bindings) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(l, r)| unify_pair(l, r, env))
}

fn unify_pair(left: &Term, right: &Term, env: &mut Bindings) -> bool {
    if left == right {
        return true;
    }
    if env.is_bound(left) {
        let value = env.chase(left).clone();
        return unify_elements(std::slice::from_ref(&value), std::slice::from_ref(right), env);
    }
    if env.is_bound(right) {
        let value = env.chase(right).clone();
        return unify_elements(std::slice::from_ref(left), std::slice::from_ref(&value), env);
    }
    match (left, right) {
        (Term::Atom(name), _) if left.is_variable() => {
            env.bind(name, right.clone());
            true
        }
        (_, Term::Atom(name)) if right.is_variable() => {
            env.bind(name, left.clone());
            true
        }
        (Term::Compound(l), Term::Compound(r)) => unify_elements(l, r, env),
        _ => false,
    }
}
