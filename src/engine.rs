//! Command execution: `define`, `search`, `save` and `load`.
//!
//! Every line goes through the translator first, so commands can be written as
//! sentences (`define socrates is mortal`) or in canonical form
//! (`define (mortal socrates)`). Accepted `define` and `load` lines are kept in
//! order, without repeats, and are what `save` writes out.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::binding::{fresh_variable, OtherHasher};
use crate::error::{Result, SyllogyError};
use crate::grammar::{Grammar, DEFINE, LOAD, SAVE, SEARCH};
use crate::knowledge::{Clause, KnowledgeBase};
use crate::persist::Persistor;
use crate::query::{Answers, QueryDriver};
use crate::settings::Settings;
use crate::term::{Term, SIGIL};
use crate::translate::Translator;

#[derive(Debug)]
pub enum Outcome {
    Defined(Clause),
    /// The same line was defined before and was ignored.
    Repeated,
    Answers(Answers),
    Saved(PathBuf),
    Loaded { name: String, lines: usize },
    /// The name is already being loaded further up; nothing was done.
    AlreadyLoading(String),
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Outcome::Defined(Clause::Fact(name)) => write!(f, "fact added to {}", name),
            Outcome::Defined(Clause::Rule(name)) => write!(f, "rule added to {}", name),
            Outcome::Repeated => write!(f, "already defined"),
            Outcome::Answers(answers) if answers.is_empty() => write!(f, "no matches"),
            Outcome::Answers(answers) => write!(f, "{}", answers.rendered().join("\n")),
            Outcome::Saved(path) => write!(f, "saved to {}", path.display()),
            Outcome::Loaded { name, lines } => write!(f, "loaded {} ({} lines)", name, lines),
            Outcome::AlreadyLoading(name) => write!(f, "{} is already being loaded", name),
        }
    }
}

const VERBS: [&str; 4] = [DEFINE, SEARCH, SAVE, LOAD];

pub struct Engine {
    knowledge: KnowledgeBase,
    translator: Translator,
    persistor: Persistor,
    accepted: Vec<String>,
    seen: HashSet<String, OtherHasher>,
    loading: HashSet<String, OtherHasher>,
}

impl Engine {
    pub fn new(settings: &Settings) -> Result<Self> {
        let grammar = Arc::new(Grammar::standard()?);
        let persistor = Persistor::new(settings.store.clone(), &settings.extension);
        Ok(Self::with_grammar(grammar, persistor))
    }
    pub fn with_grammar(grammar: Arc<Grammar>, persistor: Persistor) -> Self {
        Self {
            knowledge: KnowledgeBase::new(),
            translator: Translator::new(grammar),
            persistor,
            accepted: Vec::new(),
            seen: HashSet::default(),
            loading: HashSet::default(),
        }
    }
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }
    pub fn translator(&self) -> &Translator {
        &self.translator
    }
    /// Accepted `define` and `load` lines in order.
    pub fn accepted(&self) -> &[String] {
        &self.accepted
    }
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let line = line.trim();
        let word = line.split(|c: char| c.is_whitespace() || c == '(').next().unwrap_or_default();
        if !word.is_empty() && !VERBS.contains(&word) {
            return Err(SyllogyError::UnknownCommand(word.to_string()));
        }
        let command = self.translator.translate(line)?;
        let (verb, argument) = match command.elements() {
            [Term::Atom(verb), argument] => (verb.as_str(), argument),
            _ => return Err(SyllogyError::UnknownCommand(command.to_string())),
        };
        match verb {
            DEFINE => {
                if self.seen.contains(line) {
                    debug!(line, "ignoring repeated definition");
                    return Ok(Outcome::Repeated);
                }
                let clause = self.knowledge.define(argument)?;
                info!(%argument, "defined");
                self.accept(line);
                Ok(Outcome::Defined(clause))
            }
            SEARCH => Ok(Outcome::Answers(self.search(argument))),
            SAVE => {
                let path = self.persistor.save(file_name(argument)?, &self.accepted)?;
                Ok(Outcome::Saved(path))
            }
            LOAD => {
                let name = file_name(argument)?.to_string();
                self.load(line, name)
            }
            other => Err(SyllogyError::UnknownCommand(other.to_string())),
        }
    }
    /// Answers a query. A bare predicate name asks for every argument of that
    /// predicate.
    pub fn search(&self, query: &Term) -> Answers {
        let query = match query {
            Term::Atom(name) if !query.is_variable() => match self.knowledge.arity(name) {
                Some(arity) => {
                    let mut elements = vec![query.clone()];
                    let stem = SIGIL.to_string();
                    elements.extend((0..arity).map(|_| Term::Atom(fresh_variable(&stem))));
                    Term::Compound(elements)
                }
                None => return Answers::default(),
            },
            _ => query.clone(),
        };
        QueryDriver::new(&self.knowledge, &self.translator).answer(&query)
    }
    fn load(&mut self, line: &str, name: String) -> Result<Outcome> {
        if !self.loading.insert(name.clone()) {
            debug!(%name, "already being loaded");
            return Ok(Outcome::AlreadyLoading(name));
        }
        let replayed = self.replay(&name);
        self.loading.remove(&name);
        let lines = replayed?;
        info!(%name, lines, "loaded");
        self.accept(line);
        Ok(Outcome::Loaded { name, lines })
    }
    fn replay(&mut self, name: &str) -> Result<usize> {
        let lines = self.persistor.load(name)?;
        for line in &lines {
            self.execute(line)?;
        }
        Ok(lines.len())
    }
    fn accept(&mut self, line: &str) {
        if self.seen.insert(line.to_string()) {
            self.accepted.push(line.to_string());
        }
    }
}

fn file_name(argument: &Term) -> Result<&str> {
    argument
        .as_atom()
        .ok_or_else(|| SyllogyError::Persistence(format!("invalid name '{}'", argument)))
}
