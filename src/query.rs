//! Answering queries: proof search plus rendering of the solutions.

use std::collections::HashSet;

use tracing::debug;

use crate::binding::{Bindings, OtherHasher, Renamer};
use crate::knowledge::KnowledgeBase;
use crate::resolve::Resolver;
use crate::term::Term;
use crate::translate::Translator;

/// The distinct solutions of one query, in the order they were found.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Answers {
    solutions: Vec<Term>,
    rendered: Vec<String>,
}

impl Answers {
    /// The query with each solution's bindings substituted in.
    pub fn solutions(&self) -> &[Term] {
        &self.solutions
    }
    /// Solutions as shown to a user.
    pub fn rendered(&self) -> &[String] {
        &self.rendered
    }
    pub fn len(&self) -> usize {
        self.solutions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

pub struct QueryDriver<'a> {
    knowledge: &'a KnowledgeBase,
    translator: &'a Translator,
}

impl<'a> QueryDriver<'a> {
    pub fn new(knowledge: &'a KnowledgeBase, translator: &'a Translator) -> Self {
        Self { knowledge, translator }
    }
    pub fn answer(&self, query: &Term) -> Answers {
        // query variables get fresh names too, so no renamed clause variable can meet them
        let mut renamer = Renamer::new();
        let goal = renamer.rename(query);
        let environments = Resolver::new(self.knowledge).prove(&goal, &Bindings::new());
        debug!(%query, environments = environments.len(), "proved");
        let mut seen: HashSet<Term, OtherHasher> = HashSet::default();
        let mut answers = Answers::default();
        for env in &environments {
            let solution = renamer.restore(&env.resolve(&goal));
            if seen.insert(solution.clone()) {
                answers.rendered.push(self.translator.render(&solution));
                answers.solutions.push(solution);
            }
        }
        answers
    }
}
