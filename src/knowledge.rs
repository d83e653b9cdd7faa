//! The knowledge base: predicates with their facts and conditional rules.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, warn};

use crate::binding::OtherHasher;
use crate::error::{Result, SyllogyError};
use crate::grammar::IF;
use crate::term::Term;

// ------------- Rule -------------
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Rule {
    head: Term,
    body: Term,
}

impl Rule {
    pub fn new(head: Term, body: Term) -> Self {
        Self { head, body }
    }
    pub fn head(&self) -> &Term {
        &self.head
    }
    pub fn body(&self) -> &Term {
        &self.body
    }
}

// ------------- Predicate -------------
#[derive(Debug)]
pub struct Predicate {
    name: String,
    arity: usize,
    facts: Vec<Term>,
    rules: Vec<Rule>,
}

impl Predicate {
    pub fn new(name: String, arity: usize) -> Self {
        Self {
            name,
            arity,
            facts: Vec::new(),
            rules: Vec::new(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn arity(&self) -> usize {
        self.arity
    }
    pub fn facts(&self) -> &[Term] {
        &self.facts
    }
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// What a call to [`KnowledgeBase::define`] added.
#[derive(Debug, PartialEq, Eq)]
pub enum Clause {
    Fact(String),
    Rule(String),
}

// ------------- KnowledgeBase -------------
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    kept: HashMap<String, Predicate, OtherHasher>,
    order: Vec<String>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self {
            kept: HashMap::default(),
            order: Vec::new(),
        }
    }
    /// Adds a fact, or a rule when the clause is `(if HEAD BODY)`.
    pub fn define(&mut self, clause: &Term) -> Result<Clause> {
        if clause.head() == Some(IF) {
            match clause.args() {
                [head, body] => {
                    let name = self.keep_rule(Rule::new(head.clone(), body.clone()))?;
                    Ok(Clause::Rule(name))
                }
                _ => Err(SyllogyError::syntax(format!(
                    "a rule needs exactly a head and a body: {}",
                    clause
                ))),
            }
        } else {
            let fact = match clause {
                Term::Atom(_) => Term::compound(vec![clause.clone()]),
                Term::Compound(_) => clause.clone(),
            };
            let predicate = self.entry(&fact)?;
            predicate.facts.push(fact);
            Ok(Clause::Fact(predicate.name.clone()))
        }
    }
    fn keep_rule(&mut self, rule: Rule) -> Result<String> {
        let rule = match rule.head {
            Term::Atom(_) => Rule::new(Term::compound(vec![rule.head]), rule.body),
            Term::Compound(_) => rule,
        };
        let predicate = self.entry(&rule.head)?;
        predicate.rules.push(rule);
        Ok(predicate.name.clone())
    }
    // Arity is fixed by the first clause; later clauses are trusted as they are.
    fn entry(&mut self, clause: &Term) -> Result<&mut Predicate> {
        let name = match clause.head() {
            Some(name) if !clause.elements()[0].is_variable() => name.to_string(),
            _ => {
                return Err(SyllogyError::syntax(format!(
                    "a clause must start with a predicate name: {}",
                    clause
                )));
            }
        };
        let arity = clause.args().len();
        match self.kept.entry(name.clone()) {
            Entry::Vacant(e) => {
                debug!(predicate = %name, arity, "new predicate");
                self.order.push(name.clone());
                Ok(e.insert(Predicate::new(name, arity)))
            }
            Entry::Occupied(e) => {
                let predicate = e.into_mut();
                if predicate.arity != arity {
                    warn!(
                        predicate = %predicate.name,
                        declared = predicate.arity,
                        found = arity,
                        "clause arity differs from the declared arity"
                    );
                }
                Ok(predicate)
            }
        }
    }
    pub fn predicate(&self, name: &str) -> Option<&Predicate> {
        self.kept.get(name)
    }
    pub fn arity(&self, name: &str) -> Option<usize> {
        self.kept.get(name).map(Predicate::arity)
    }
    /// Predicates in the order they were first defined.
    pub fn predicates(&self) -> impl Iterator<Item = &Predicate> {
        self.order.iter().filter_map(|name| self.kept.get(name))
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}
