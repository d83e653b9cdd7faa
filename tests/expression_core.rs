use syllogy::SyllogyError;
use syllogy::term::{assemble, is_compound, is_variable, match_parens, split, Term};

#[test]
fn split_then_assemble_gives_back_the_text() {
    let samples = [
        "(likes john mary)",
        "(if (friend *x *y) (and (likes *x *y) (not (= *x *y))))",
        "(a)",
        "((nested once) (and (twice (deep))))",
    ];
    for sample in samples {
        let elements = split(sample).expect("well formed");
        assert_eq!(assemble(&elements), sample);
    }
}

#[test]
fn split_keeps_nested_compounds_whole() {
    let elements = split("(if (friend *x *y) (likes *x *y))").unwrap();
    assert_eq!(elements, vec!["if", "(friend *x *y)", "(likes *x *y)"]);
}

#[test]
fn parens_are_paired_both_ways() {
    let matching = match_parens("(a (b c))").unwrap();
    assert_eq!(matching[&0], 8);
    assert_eq!(matching[&8], 0);
    assert_eq!(matching[&3], 7);
    assert_eq!(matching[&7], 3);
}

#[test]
fn unbalanced_text_is_a_syntax_error() {
    for text in ["(a (b c)", "a b)", ")("] {
        let err = match_parens(text).unwrap_err();
        assert!(matches!(err, SyllogyError::Syntax { .. }), "{text}");
    }
    assert!(matches!(Term::parse("(a (b)"), Err(SyllogyError::Syntax { .. })));
    assert!(matches!(split("(a (b)"), Err(SyllogyError::Syntax { .. })));
}

#[test]
fn empty_compounds_are_rejected() {
    assert!(Term::parse("()").is_err());
    assert!(split("()").is_err());
}

#[test]
fn parsed_terms_print_canonically() {
    let term = Term::parse("(if  (friend *x *y)\t(likes *x *y))").unwrap();
    assert_eq!(term.to_string(), "(if (friend *x *y) (likes *x *y))");
    assert_eq!(Term::parse(&term.to_string()).unwrap(), term);
    let atom: Term = "socrates".parse().unwrap();
    assert_eq!(atom, Term::atom("socrates"));
}

#[test]
fn atoms_are_classified() {
    assert!(is_variable("*x"));
    assert!(!is_variable("x"));
    assert!(is_compound("(a b)"));
    assert!(!is_compound("a"));
    let term = Term::parse("(likes *x mary)").unwrap();
    assert!(term.is_compound());
    assert_eq!(term.head(), Some("likes"));
    assert_eq!(term.args().len(), 2);
    assert!(term.args()[0].is_variable());
    assert_eq!(term.variables(), vec!["*x"]);
    assert_eq!(Term::atom("a").elements(), [Term::atom("a")]);
}

#[test]
fn empty_compounds_have_no_arguments() {
    let empty = Term::compound(Vec::new());
    assert!(empty.args().is_empty());
    assert_eq!(empty.head(), None);
    assert!(Term::atom("a").args().is_empty());
}
