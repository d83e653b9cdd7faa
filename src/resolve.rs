//! Depth-first proof search over a [`KnowledgeBase`].
//!
//! Proving a goal yields every binding environment under which it holds; an
//! empty vector means the goal failed. Recursion is guarded per call path: a
//! predicate that is already being proved further up the same path fails
//! immediately instead of expanding again. The path travels down the recursion
//! by reference, so the knowledge base is only ever read.

use tracing::{debug, trace};

use crate::binding::{Bindings, Renamer};
use crate::grammar::{AND, NOT, OR};
use crate::knowledge::{KnowledgeBase, Predicate};
use crate::term::Term;
use crate::unify::unify;

/// Predicates currently being proved on the way down to the current goal.
#[derive(Debug, Clone, Copy)]
struct Path<'p> {
    name: &'p str,
    parent: Option<&'p Path<'p>>,
}

impl<'p> Path<'p> {
    fn contains(path: Option<&Path<'_>>, name: &str) -> bool {
        let mut current = path;
        while let Some(step) = current {
            if step.name == name {
                return true;
            }
            current = step.parent;
        }
        false
    }
}

pub struct Resolver<'kb> {
    knowledge: &'kb KnowledgeBase,
}

impl<'kb> Resolver<'kb> {
    pub fn new(knowledge: &'kb KnowledgeBase) -> Self {
        Self { knowledge }
    }
    /// Every environment under which `goal` holds. The goal's own variables are
    /// taken as they are; [`crate::query::QueryDriver`] renames them first.
    pub fn prove(&self, goal: &Term, env: &Bindings) -> Vec<Bindings> {
        self.solve(goal, env, None)
    }
    fn solve(&self, goal: &Term, env: &Bindings, path: Option<&Path<'_>>) -> Vec<Bindings> {
        let goal = env.chase(goal);
        trace!(%goal, %env, "solving");
        match (goal.head(), goal.args()) {
            (Some(AND), [first, second]) => self.conjunction(first, second, env, path),
            (Some(OR), [first, second]) => {
                let mut solutions = self.solve(first, env, path);
                solutions.extend(self.solve(second, env, path));
                solutions
            }
            (Some(NOT), [negated]) => {
                if !env.is_empty() && self.solve(negated, env, path).is_empty() {
                    vec![env.clone()]
                } else {
                    Vec::new()
                }
            }
            _ => self.predicate(goal, env, path),
        }
    }
    // The second conjunct is tried first only when the first one finds nothing.
    fn conjunction(
        &self,
        first: &Term,
        second: &Term,
        env: &Bindings,
        path: Option<&Path<'_>>,
    ) -> Vec<Bindings> {
        let partials = self.solve(first, env, path);
        if !partials.is_empty() {
            return self.extend_all(&partials, second, path);
        }
        trace!(%first, %second, "conjunction retried in reverse");
        let partials = self.solve(second, env, path);
        self.extend_all(&partials, first, path)
    }
    fn extend_all(&self, partials: &[Bindings], goal: &Term, path: Option<&Path<'_>>) -> Vec<Bindings> {
        partials
            .iter()
            .flat_map(|partial| self.solve(goal, partial, path))
            .collect()
    }
    fn predicate(&self, goal: &Term, env: &Bindings, path: Option<&Path<'_>>) -> Vec<Bindings> {
        let Some(head) = goal.elements().first() else {
            return Vec::new();
        };
        let head = env.chase(head);
        match head {
            // an unbound variable in the predicate position ranges over every predicate
            Term::Atom(_) if head.is_variable() => {
                let arity = goal.args().len();
                self.knowledge
                    .predicates()
                    .filter(|predicate| predicate.arity() == arity)
                    .flat_map(|predicate| self.expand(predicate, goal, env, path))
                    .collect()
            }
            Term::Atom(name) => match self.knowledge.predicate(name) {
                Some(predicate) => self.expand(predicate, goal, env, path),
                None => {
                    debug!(predicate = %name, "unknown predicate");
                    Vec::new()
                }
            },
            Term::Compound(_) => Vec::new(),
        }
    }
    fn expand(
        &self,
        predicate: &Predicate,
        goal: &Term,
        env: &Bindings,
        path: Option<&Path<'_>>,
    ) -> Vec<Bindings> {
        if Path::contains(path, predicate.name()) {
            debug!(predicate = %predicate.name(), "already being proved");
            return Vec::new();
        }
        debug!(predicate = %predicate.name(), %goal, "expanding");
        let here = Path {
            name: predicate.name(),
            parent: path,
        };
        let mut solutions = Vec::new();
        for fact in predicate.facts() {
            let fact = Renamer::new().rename(fact);
            if let Some(extended) = unify(&fact, goal, env) {
                solutions.push(extended);
            }
        }
        for rule in predicate.rules() {
            let mut renamer = Renamer::new();
            let head = renamer.rename(rule.head());
            let body = renamer.rename(rule.body());
            if let Some(extended) = unify(&head, goal, env) {
                solutions.extend(self.solve(&body, &extended, Some(&here)));
            }
        }
        solutions
    }
}
