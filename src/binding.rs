//! Binding environments and hygienic renaming.
//!
//! A [`Bindings`] is extended by cloning, so a trial extension never disturbs
//! the environment other proof branches still hold. There is no occurs-check
//! anywhere: a variable can end up bound to a structure that contains it, in
//! which case [`Bindings::resolve`] does not terminate.

use core::hash::BuildHasherDefault;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use seahash::SeaHasher;

use crate::term::{is_variable, Term};

pub type OtherHasher = BuildHasherDefault<SeaHasher>;

// ------------- Bindings -------------
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Bindings {
    kept: HashMap<String, Term, OtherHasher>,
}

impl Bindings {
    pub fn new() -> Self {
        Self { kept: HashMap::default() }
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
    pub fn get(&self, variable: &str) -> Option<&Term> {
        self.kept.get(variable)
    }
    pub fn is_bound(&self, term: &Term) -> bool {
        match term {
            Term::Atom(name) => is_variable(name) && self.kept.contains_key(name),
            Term::Compound(_) => false,
        }
    }
    /// Returns a copy with one more binding; `self` is left as it was.
    pub fn extend(&self, variable: &str, value: Term) -> Self {
        let mut extended = self.clone();
        extended.bind(variable, value);
        extended
    }
    pub(crate) fn bind(&mut self, variable: &str, value: Term) {
        self.kept.insert(variable.to_string(), value);
    }
    /// Follows variable chains until reaching an unbound variable or a value.
    pub fn chase<'b>(&'b self, term: &'b Term) -> &'b Term {
        let mut current = term;
        while let Term::Atom(name) = current {
            match self.kept.get(name) {
                Some(next) if is_variable(name) => current = next,
                _ => break,
            }
        }
        current
    }
    /// Substitutes every bound variable in `term`, all the way down.
    pub fn resolve(&self, term: &Term) -> Term {
        match self.chase(term) {
            Term::Atom(name) => Term::Atom(name.clone()),
            Term::Compound(elements) => {
                Term::Compound(elements.iter().map(|e| self.resolve(e)).collect())
            }
        }
    }
}

impl fmt::Display for Bindings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut pairs: Vec<String> = self
            .kept
            .iter()
            .map(|(variable, value)| format!("{} = {}", variable, value))
            .collect();
        pairs.sort();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

// ------------- Fresh variables -------------
#[derive(Debug)]
pub struct VariableGenerator {
    lower_bound: AtomicU64,
}

impl VariableGenerator {
    pub const fn new() -> Self {
        Self { lower_bound: AtomicU64::new(0) }
    }
    /// A variable name that this generator has never handed out before.
    pub fn generate(&self, stem: &str) -> String {
        let n = self.lower_bound.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}.{}", stem, n)
    }
}

// Shared by every renamer in the process so outputs never collide.
static GENERATOR: VariableGenerator = VariableGenerator::new();

/// A fresh, never before seen variable derived from `stem` (which should carry
/// the sigil).
pub fn fresh_variable(stem: &str) -> String {
    GENERATOR.generate(stem)
}

/// Consistent renaming of variables to fresh ones. Every term renamed through
/// the same renamer shares one mapping, so a rule's head and body keep their
/// variables linked.
#[derive(Debug, Default)]
pub struct Renamer {
    mapping: HashMap<String, String, OtherHasher>,
}

impl Renamer {
    pub fn new() -> Self {
        Self { mapping: HashMap::default() }
    }
    pub fn rename(&mut self, term: &Term) -> Term {
        match term {
            Term::Atom(name) if is_variable(name) => {
                let fresh = self
                    .mapping
                    .entry(name.clone())
                    .or_insert_with(|| fresh_variable(stem(name)));
                Term::Atom(fresh.clone())
            }
            Term::Atom(name) => Term::Atom(name.clone()),
            Term::Compound(elements) => {
                Term::Compound(elements.iter().map(|e| self.rename(e)).collect())
            }
        }
    }
    /// Puts back the original name of every variable this renamer produced.
    pub fn restore(&self, term: &Term) -> Term {
        match term {
            Term::Atom(name) if is_variable(name) => self
                .mapping
                .iter()
                .find(|(_, fresh)| *fresh == name)
                .map(|(original, _)| Term::Atom(original.clone()))
                .unwrap_or_else(|| term.clone()),
            Term::Atom(_) => term.clone(),
            Term::Compound(elements) => {
                Term::Compound(elements.iter().map(|e| self.restore(e)).collect())
            }
        }
    }
}

/// Renames the variables of a single term.
pub fn rename(term: &Term) -> Term {
    Renamer::new().rename(term)
}

// `*x.12` renamed again becomes `*x.31`, not `*x.12.31`
fn stem(variable: &str) -> &str {
    match variable.find('.') {
        Some(i) if i > 0 => &variable[..i],
        _ => variable,
    }
}
