//! Expression core: the [`Term`] tree and the bracketed text it is read from and
//! written to.
//!
//! Canonical text uses parentheses as the only delimiters and whitespace
//! between elements. Variables are atoms starting with [`SIGIL`]. The textual
//! helpers ([`match_parens`], [`split`], [`assemble`]) work directly on that
//! text and are used wherever the translator needs to look at bracketed input
//! before it is a tree.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use pest::Parser;
use pest::error::LineColLocation;
use pest::iterators::Pair;

use crate::error::{Result, SyllogyError};

/// Leading character that marks an atom as a variable.
pub const SIGIL: char = '*';

mod canonical {
    #[derive(pest_derive::Parser)]
    #[grammar = "term.pest"]
    pub struct CanonicalParser;
}

use canonical::{CanonicalParser, Rule};

// ------------- Term -------------
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Term {
    Atom(String),
    Compound(Vec<Term>),
}

impl Term {
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }
    pub fn compound(elements: Vec<Term>) -> Self {
        Term::Compound(elements)
    }
    /// Parses canonical text into a term.
    pub fn parse(text: &str) -> Result<Self> {
        match_parens(text)?;
        let mut pairs = CanonicalParser::parse(Rule::expression, text).map_err(from_pest)?;
        let expression = pairs
            .next()
            .ok_or_else(|| SyllogyError::syntax("empty expression"))?;
        expression
            .into_inner()
            .find(|pair| matches!(pair.as_rule(), Rule::atom | Rule::compound))
            .map(build)
            .ok_or_else(|| SyllogyError::syntax("empty expression"))
    }
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Atom(name) if is_variable(name))
    }
    pub fn is_compound(&self) -> bool {
        matches!(self, Term::Compound(_))
    }
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Term::Atom(name) => Some(name),
            Term::Compound(_) => None,
        }
    }
    /// The elements of a compound, or the atom itself as a single element.
    pub fn elements(&self) -> &[Term] {
        match self {
            Term::Atom(_) => std::slice::from_ref(self),
            Term::Compound(elements) => elements,
        }
    }
    /// Name in the leading position, if that position holds an atom.
    pub fn head(&self) -> Option<&str> {
        self.elements().first().and_then(Term::as_atom)
    }
    pub fn args(&self) -> &[Term] {
        self.elements().get(1..).unwrap_or(&[])
    }
    /// Variables in order of first appearance.
    pub fn variables(&self) -> Vec<&str> {
        let mut found = Vec::new();
        self.collect_variables(&mut found);
        found
    }
    fn collect_variables<'t>(&'t self, found: &mut Vec<&'t str>) {
        match self {
            Term::Atom(name) => {
                if is_variable(name) && !found.contains(&name.as_str()) {
                    found.push(name);
                }
            }
            Term::Compound(elements) => {
                for element in elements {
                    element.collect_variables(found);
                }
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Term::Atom(name) => write!(f, "{}", name),
            Term::Compound(elements) => {
                let parts: Vec<String> = elements.iter().map(Term::to_string).collect();
                write!(f, "{}", assemble(&parts))
            }
        }
    }
}

impl FromStr for Term {
    type Err = SyllogyError;
    fn from_str(text: &str) -> Result<Self> {
        Term::parse(text)
    }
}

fn build(pair: Pair<Rule>) -> Term {
    match pair.as_rule() {
        Rule::atom => Term::Atom(pair.as_str().to_string()),
        Rule::compound => Term::Compound(pair.into_inner().map(build).collect()),
        rule => unreachable!("grammar produced {:?} inside a term", rule),
    }
}

fn from_pest(e: pest::error::Error<Rule>) -> SyllogyError {
    let (line, col) = match e.line_col {
        LineColLocation::Pos((l, c)) | LineColLocation::Span((l, c), _) => (l, c),
    };
    SyllogyError::Syntax {
        message: e.variant.message().to_string(),
        line: Some(line),
        col: Some(col),
    }
}

// ------------- Text helpers -------------
pub fn is_variable(token: &str) -> bool {
    token.starts_with(SIGIL)
}

pub fn is_compound(text: &str) -> bool {
    text.starts_with('(') && text.ends_with(')')
}

/// Maps the byte position of every parenthesis to the position of its partner.
pub fn match_parens(text: &str) -> Result<HashMap<usize, usize>> {
    let mut matching = HashMap::new();
    let mut open = Vec::new();
    for (i, c) in text.char_indices() {
        match c {
            '(' => open.push(i),
            ')' => {
                let j = open.pop().ok_or_else(|| SyllogyError::Syntax {
                    message: "parentheses don't match".into(),
                    line: None,
                    col: Some(i + 1),
                })?;
                matching.insert(i, j);
                matching.insert(j, i);
            }
            _ => (),
        }
    }
    if let Some(&i) = open.last() {
        return Err(SyllogyError::Syntax {
            message: "parentheses don't match".into(),
            line: None,
            col: Some(i + 1),
        });
    }
    Ok(matching)
}

/// Splits a bracketed compound into its top-level elements. Nested compounds
/// are kept whole.
pub fn split(text: &str) -> Result<Vec<String>> {
    let matching = match_parens(text)?;
    if !is_compound(text) || matching.get(&0) != Some(&(text.len() - 1)) {
        return Err(SyllogyError::syntax(format!("not a compound: {}", text)));
    }
    let inner = &text[1..text.len() - 1];
    let mut elements = Vec::new();
    let mut current = String::new();
    let mut skip_to = 0;
    for (i, c) in inner.char_indices() {
        if i < skip_to {
            continue;
        }
        match c {
            '(' => {
                if !current.is_empty() {
                    elements.push(std::mem::take(&mut current));
                }
                // positions in `matching` are relative to the outer text
                let close = matching[&(i + 1)] - 1;
                elements.push(inner[i..=close].to_string());
                skip_to = close + 1;
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    elements.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        elements.push(current);
    }
    if elements.is_empty() {
        return Err(SyllogyError::syntax("empty compound"));
    }
    Ok(elements)
}

pub fn assemble<S: AsRef<str>>(elements: &[S]) -> String {
    let parts: Vec<&str> = elements.iter().map(AsRef::as_ref).collect();
    format!("({})", parts.join(" "))
}
