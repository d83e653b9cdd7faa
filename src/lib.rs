//! Syllogy – a small backward-chaining inference engine with a sentence-like
//! front end.
//!
//! Knowledge is kept as canonical bracketed terms: atoms such as `socrates`,
//! variables such as `*x` (the leading `*` marks a variable) and compounds such
//! as `(mortal socrates)`. Facts are compounds; rules are written
//! `(if HEAD BODY)` where the body may combine goals with `and`, `or` and
//! `not`.
//!
//! ## Modules
//! * [`term`] – The [`term::Term`] tree, its canonical text form and the
//!   parenthesis helpers.
//! * [`binding`] – Binding environments, chasing and fresh-variable renaming.
//! * [`unify`] – Non-destructive unification.
//! * [`knowledge`] – Predicates with their facts and rules.
//! * [`resolve`] – Depth-first proof search with a per-path cycle guard.
//! * [`grammar`] – The fixed operator and surface rule tables.
//! * [`translate`] – Sentence rewriting, operator assembly and rendering back.
//! * [`query`] – Runs a query and renders its distinct solutions.
//! * [`engine`] – The `define`/`search`/`save`/`load` commands.
//! * [`persist`] – Saved command lines on disk.
//! * [`settings`] – Layered configuration.
//!
//! ## Quick Start
//! ```
//! use syllogy::engine::{Engine, Outcome};
//! use syllogy::settings::Settings;
//! let mut engine = Engine::new(&Settings::default()).unwrap();
//! engine.execute("define socrates is mortal").unwrap();
//! match engine.execute("search socrates is *what").unwrap() {
//!     Outcome::Answers(answers) => assert_eq!(answers.rendered(), ["socrates is mortal"]),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```
//!
//! ## Known surprises
//! An environment without any bindings counts as a failed proof. A fully
//! ground query such as `search (mortal socrates)` therefore reports no
//! matches, and `not` directly at the top of a query always fails. Ask with a
//! variable (`search socrates is *what`) or the bare predicate name
//! (`search mortal`) instead.
//!
//! Unification has no occurs-check, and a predicate that is already being
//! proved higher up the same search path simply fails, so recursive rules
//! without a differently named base predicate find nothing.

pub mod binding;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod knowledge;
pub mod persist;
pub mod query;
pub mod resolve;
pub mod settings;
pub mod term;
pub mod translate;
pub mod unify;

pub use error::{Result, SyllogyError};
