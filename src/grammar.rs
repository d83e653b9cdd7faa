//! Operator and surface rule tables.
//!
//! A [`Grammar`] is built once at startup and then only read: the translator
//! holds it behind an `Arc`, and the resolver relies on the connective names
//! defined here.

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::Result;

pub const IF: &str = "if";
pub const AND: &str = "and";
pub const OR: &str = "or";
pub const NOT: &str = "not";
pub const DEFINE: &str = "define";
pub const SEARCH: &str = "search";
pub const SAVE: &str = "save";
pub const LOAD: &str = "load";

// ------------- Operator -------------
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Operator {
    name: String,
    left: usize,
    right: usize,
    level: u8,
}

impl Operator {
    pub fn new(name: &str, left: usize, right: usize, level: u8) -> Self {
        Self {
            name: name.to_string(),
            left,
            right,
            level,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn left(&self) -> usize {
        self.left
    }
    pub fn right(&self) -> usize {
        self.right
    }
    pub fn level(&self) -> u8 {
        self.level
    }
}

/// Operators grouped by level. A higher level binds tighter.
#[derive(Debug, Default)]
pub struct OperatorTable {
    levels: BTreeMap<u8, Vec<Operator>>,
}

impl OperatorTable {
    pub fn new(operators: Vec<Operator>) -> Self {
        let mut levels: BTreeMap<u8, Vec<Operator>> = BTreeMap::new();
        for operator in operators {
            levels.entry(operator.level).or_default().push(operator);
        }
        Self { levels }
    }
    pub fn get(&self, name: &str) -> Option<&Operator> {
        self.levels.values().flatten().find(|o| o.name == name)
    }
    pub fn is_operator(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
    /// Levels from the tightest binding to the loosest.
    pub fn levels(&self) -> impl Iterator<Item = (u8, &[Operator])> {
        self.levels.iter().rev().map(|(level, ops)| (*level, ops.as_slice()))
    }
    pub fn at_level(&self, level: u8, name: &str) -> Option<&Operator> {
        self.levels.get(&level)?.iter().find(|o| o.name == name)
    }
}

// ------------- SurfaceRule -------------
/// Maps a sentence fragment to a canonical compound and, for rules that can
/// own predicates, a canonical compound back to a sentence.
#[derive(Debug)]
pub struct SurfaceRule {
    name: String,
    sentence: Regex,
    template: String,
    reverse: Option<(Regex, String)>,
}

impl SurfaceRule {
    pub fn new(name: &str, sentence: &str, template: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            sentence: Regex::new(sentence)?,
            template: template.to_string(),
            reverse: None,
        })
    }
    /// Lets the rule render compounds matching `compound` as `rendering`.
    pub fn rendered_by(mut self, compound: &str, rendering: &str) -> Result<Self> {
        self.reverse = Some((Regex::new(compound)?, rendering.to_string()));
        Ok(self)
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Pattern looked for in input sentences.
    pub fn sentence(&self) -> &Regex {
        &self.sentence
    }
    /// Canonical text a sentence match expands into (`${1}` style captures).
    pub fn template(&self) -> &str {
        &self.template
    }
    /// Pattern a canonical compound must match to be rendered by this rule.
    pub fn compound(&self) -> Option<&Regex> {
        self.reverse.as_ref().map(|(compound, _)| compound)
    }
    /// Sentence a compound match expands into.
    pub fn rendering(&self) -> Option<&str> {
        self.reverse.as_ref().map(|(_, rendering)| rendering.as_str())
    }
    /// Only rules that can render their output back claim predicates.
    pub fn owns_predicates(&self) -> bool {
        self.reverse.is_some()
    }
}

// ------------- Grammar -------------
#[derive(Debug)]
pub struct Grammar {
    operators: OperatorTable,
    rules: Vec<SurfaceRule>,
}

// a single token: anything but whitespace and parentheses
const W: &str = r"([^\s()]+)";

impl Grammar {
    pub fn new(operators: OperatorTable, rules: Vec<SurfaceRule>) -> Self {
        Self { operators, rules }
    }
    /// The fixed operator and surface rule tables.
    pub fn standard() -> Result<Self> {
        let operators = OperatorTable::new(vec![
            Operator::new(NOT, 0, 1, 3),
            Operator::new(AND, 1, 1, 2),
            Operator::new(OR, 1, 1, 2),
            Operator::new(IF, 1, 1, 1),
            Operator::new(DEFINE, 0, 1, 0),
            Operator::new(SEARCH, 0, 1, 0),
            Operator::new(SAVE, 0, 1, 0),
            Operator::new(LOAD, 0, 1, 0),
        ]);
        // Longer forms come first, otherwise "is" would eat "is not ... of".
        let rules = vec![
            SurfaceRule::new(
                "is-not-of",
                &format!(r"{W} is not {W} of {W}"),
                "(not (${2} ${1} ${3}))",
            )?,
            SurfaceRule::new("is-of", &format!(r"{W} is {W} of {W}"), "(${2} ${1} ${3})")?
                .rendered_by(&format!(r"^\({W} {W} {W}\)$"), "${2} is ${1} of ${3}")?,
            SurfaceRule::new("is-not", &format!(r"{W} is not {W}"), "(not (${2} ${1}))")?,
            SurfaceRule::new(
                "does-not-equal",
                &format!(r"{W} does not equal {W}"),
                "(not (= ${1} ${2}))",
            )?,
            SurfaceRule::new("equals", &format!(r"{W} equals {W}"), "(= ${1} ${2})")?
                .rendered_by(&format!(r"^\(= {W} {W}\)$"), "${1} equals ${2}")?,
            SurfaceRule::new("is", &format!(r"{W} is {W}"), "(${2} ${1})")?
                .rendered_by(&format!(r"^\({W} {W}\)$"), "${2} is ${1}")?,
        ];
        Ok(Self::new(operators, rules))
    }
    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }
    /// Surface rules in priority order.
    pub fn rules(&self) -> &[SurfaceRule] {
        &self.rules
    }
    pub fn rule(&self, index: usize) -> Option<&SurfaceRule> {
        self.rules.get(index)
    }
}
