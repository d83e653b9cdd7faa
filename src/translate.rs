//! Surface translation: sentences in, canonical terms out, and back again.
//!
//! Translation runs in two phases. The rewrite phase resolves parenthesised
//! groups innermost first and then applies the surface rules in priority order;
//! every finished piece of canonical structure is stashed and replaced in the
//! text by a mark token so later rules see it as a single word. The assembly
//! phase tokenizes what is left and folds operators into compounds level by
//! level, from the tightest binding level to the loosest.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::binding::OtherHasher;
use crate::error::{Result, SyllogyError};
use crate::grammar::{Grammar, OperatorTable};
use crate::term::{assemble, is_compound, is_variable, match_parens, split, Term};

const STRIPMARK: char = 15 as char;

lazy_static! {
    static ref MARK: Regex = Regex::new(r"^\x0F(\d+)$").unwrap();
    static ref MARKS: Regex = Regex::new(r"\x0F(\d+)").unwrap();
}

fn mark(index: usize) -> String {
    format!("{}{}", STRIPMARK, index)
}

fn marked(token: &str) -> Option<usize> {
    MARK.captures(token)?.get(1)?.as_str().parse().ok()
}

/// A token during assembly: either untouched input or finished structure.
#[derive(Debug)]
enum Piece {
    Raw(String),
    Built(Term),
}

impl Piece {
    fn into_term(self) -> Term {
        match self {
            Piece::Raw(token) => Term::Atom(token),
            Piece::Built(term) => term,
        }
    }
    fn operator<'t>(&self, operators: &'t OperatorTable) -> Option<&'t str> {
        match self {
            Piece::Raw(token) => operators.get(token).map(|o| o.name()),
            Piece::Built(_) => None,
        }
    }
}

// ------------- Translator -------------
pub struct Translator {
    grammar: Arc<Grammar>,
    // predicate name -> index of the surface rule that first produced it
    owners: HashMap<String, usize, OtherHasher>,
}

impl Translator {
    pub fn new(grammar: Arc<Grammar>) -> Self {
        Self {
            grammar,
            owners: HashMap::default(),
        }
    }
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }
    /// Name of the surface rule owning `predicate`, if any.
    pub fn owner(&self, predicate: &str) -> Option<&str> {
        let index = *self.owners.get(predicate)?;
        self.grammar.rule(index).map(|rule| rule.name())
    }
    /// Translates a line of input into one canonical term.
    pub fn translate(&mut self, text: &str) -> Result<Term> {
        let mut strips = Vec::new();
        let term = self.span(text, &mut strips, false)?;
        debug!(input = text, %term, "translated");
        Ok(term)
    }
    fn span(&mut self, text: &str, strips: &mut Vec<Term>, group: bool) -> Result<Term> {
        let flattened = self.groups(text, strips)?;
        let rewritten = self.rewrite(&flattened, strips)?;
        let pieces = tokenize(&rewritten, strips);
        if pieces.is_empty() {
            return Err(SyllogyError::syntax(format!("nothing to translate in '{}'", text)));
        }
        let operators = self.grammar.operators();
        if group {
            // canonical prefix form, e.g. (and A B), is taken as written
            let prefix = pieces[0]
                .operator(operators)
                .and_then(|name| operators.get(name))
                .is_some_and(|o| o.left() > 0);
            if prefix {
                return Ok(Term::Compound(pieces.into_iter().map(Piece::into_term).collect()));
            }
        }
        let mut reduced = reduce(pieces, operators)?;
        match reduced.len() {
            // a lone word in brackets stays a one-element compound
            1 if group => match reduced.remove(0) {
                Piece::Raw(token) => Ok(Term::Compound(vec![Term::Atom(token)])),
                Piece::Built(term) => Ok(term),
            },
            1 => Ok(reduced.remove(0).into_term()),
            _ if group => Ok(Term::Compound(reduced.into_iter().map(Piece::into_term).collect())),
            n => Err(SyllogyError::syntax(format!(
                "'{}' does not reduce to a single expression ({} parts remain)",
                text, n
            ))),
        }
    }
    // Replaces every top-level parenthesised group by a mark for its translation.
    fn groups(&mut self, text: &str, strips: &mut Vec<Term>) -> Result<String> {
        let matching = match_parens(text)?;
        let mut flattened = String::with_capacity(text.len());
        let mut skip_to = 0;
        for (i, c) in text.char_indices() {
            if i < skip_to {
                continue;
            }
            if c == '(' {
                let close = matching[&i];
                let inner = self.span(&text[i + 1..close], strips, true)?;
                strips.push(inner);
                flattened.push(' ');
                flattened.push_str(&mark(strips.len() - 1));
                flattened.push(' ');
                skip_to = close + 1;
            } else {
                flattened.push(c);
            }
        }
        Ok(flattened)
    }
    fn rewrite(&mut self, text: &str, strips: &mut Vec<Term>) -> Result<String> {
        let grammar = Arc::clone(&self.grammar);
        let mut text = text.to_string();
        for (index, rule) in grammar.rules().iter().enumerate() {
            while let Some(captures) = rule.sentence().captures(&text) {
                let mut canonical = String::new();
                captures.expand(rule.template(), &mut canonical);
                let term = unmark(&Term::parse(&canonical)?, strips);
                trace!(rule = rule.name(), %term, "rewrote");
                if rule.owns_predicates() {
                    self.claim(&term, index);
                }
                let range = captures
                    .get(0)
                    .map(|m| m.range())
                    .ok_or_else(|| SyllogyError::syntax("empty rule match"))?;
                strips.push(term);
                text.replace_range(range, &mark(strips.len() - 1));
            }
        }
        Ok(text)
    }
    fn claim(&mut self, term: &Term, rule: usize) {
        let Some(name) = term.head() else { return };
        if is_variable(name) || self.grammar.operators().is_operator(name) {
            return;
        }
        self.owners.entry(name.to_string()).or_insert(rule);
    }
    /// Renders a term for display: through its owning surface rule when there
    /// is one and it matches, otherwise as canonical text.
    pub fn render(&self, term: &Term) -> String {
        let canonical = term.to_string();
        let Some(&index) = term.head().and_then(|name| self.owners.get(name)) else {
            return canonical;
        };
        let Some(rule) = self.grammar.rule(index) else {
            return canonical;
        };
        let (Some(compound), Some(rendering)) = (rule.compound(), rule.rendering()) else {
            return canonical;
        };
        let Ok(elements) = split(&canonical) else {
            return canonical;
        };
        // nested compounds become single tokens for the pattern
        let mut strips = Vec::new();
        let masked: Vec<String> = elements
            .into_iter()
            .map(|element| {
                if is_compound(&element) {
                    strips.push(element);
                    mark(strips.len() - 1)
                } else {
                    element
                }
            })
            .collect();
        let masked = assemble(&masked);
        match compound.captures(&masked) {
            Some(captures) => {
                let mut sentence = String::new();
                captures.expand(rendering, &mut sentence);
                MARKS
                    .replace_all(&sentence, |c: &Captures| {
                        c[1].parse::<usize>()
                            .ok()
                            .and_then(|i| strips.get(i).cloned())
                            .unwrap_or_default()
                    })
                    .into_owned()
            }
            None => canonical,
        }
    }
}

fn tokenize(text: &str, strips: &[Term]) -> Vec<Piece> {
    text.split_whitespace()
        .map(|token| match marked(token).and_then(|i| strips.get(i)) {
            Some(term) => Piece::Built(term.clone()),
            None => Piece::Raw(token.to_string()),
        })
        .collect()
}

fn unmark(term: &Term, strips: &[Term]) -> Term {
    match term {
        Term::Atom(token) => match marked(token).and_then(|i| strips.get(i)) {
            Some(stripped) => stripped.clone(),
            None => term.clone(),
        },
        Term::Compound(elements) => {
            Term::Compound(elements.iter().map(|e| unmark(e, strips)).collect())
        }
    }
}

// Folds operators into compounds, one level at a time.
fn reduce(mut pieces: Vec<Piece>, operators: &OperatorTable) -> Result<Vec<Piece>> {
    for (level, _) in operators.levels() {
        let mut reduced: Vec<Piece> = Vec::with_capacity(pieces.len());
        let mut queue: VecDeque<Piece> = pieces.into();
        while let Some(piece) = queue.pop_front() {
            let operator = match &piece {
                Piece::Raw(token) => operators.at_level(level, token),
                Piece::Built(_) => None,
            };
            let Some(operator) = operator else {
                reduced.push(piece);
                continue;
            };
            if reduced.len() < operator.left() {
                return Err(SyllogyError::syntax(format!(
                    "'{}' needs {} argument(s) on its left",
                    operator.name(),
                    operator.left()
                )));
            }
            if queue.len() < operator.right() {
                return Err(SyllogyError::syntax(format!(
                    "'{}' needs {} argument(s) on its right",
                    operator.name(),
                    operator.right()
                )));
            }
            let left = reduced.split_off(reduced.len() - operator.left());
            let right: Vec<Piece> = queue.drain(..operator.right()).collect();
            if let Some(name) = left.iter().chain(&right).find_map(|p| p.operator(operators)) {
                return Err(SyllogyError::syntax(format!(
                    "'{}' cannot take the operator '{}' as an argument",
                    operator.name(),
                    name
                )));
            }
            let mut elements = vec![Term::atom(operator.name())];
            elements.extend(left.into_iter().map(Piece::into_term));
            elements.extend(right.into_iter().map(Piece::into_term));
            reduced.push(Piece::Built(Term::Compound(elements)));
        }
        pieces = reduced;
    }
    Ok(pieces)
}
