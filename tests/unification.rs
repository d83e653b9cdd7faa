use syllogy::binding::{rename, Bindings, Renamer};
use syllogy::term::Term;
use syllogy::unify::unify;

fn t(text: &str) -> Term {
    Term::parse(text).expect("valid term")
}

#[test]
fn variables_bind_to_constants() {
    let env = unify(&t("(likes *x mary)"), &t("(likes john mary)"), &Bindings::new()).unwrap();
    assert_eq!(env.get("*x"), Some(&t("john")));
}

#[test]
fn variables_bind_to_compounds_unevaluated() {
    let env = unify(&t("(holds *x)"), &t("(holds (pair a b))"), &Bindings::new()).unwrap();
    assert_eq!(env.get("*x"), Some(&t("(pair a b)")));
}

#[test]
fn different_constants_or_lengths_fail() {
    let empty = Bindings::new();
    assert!(unify(&t("(likes *x mary)"), &t("(likes john susan)"), &empty).is_none());
    assert!(unify(&t("(likes *x)"), &t("(likes john mary)"), &empty).is_none());
    // an atom is never matched against a compound
    assert!(unify(&t("(p a)"), &t("(p (a))"), &empty).is_none());
}

#[test]
fn bound_variables_are_chased() {
    let env = Bindings::new().extend("*x", t("*y")).extend("*y", t("john"));
    assert_eq!(env.chase(&t("*x")), &t("john"));
    assert!(unify(&t("(likes *x)"), &t("(likes john)"), &env).is_some());
    assert!(unify(&t("(likes *x)"), &t("(likes mary)"), &env).is_none());
}

#[test]
fn nested_compounds_merge_bindings() {
    let env = unify(
        &t("(owns *who (car *colour))"),
        &t("(owns ann (car *c))"),
        &Bindings::new().extend("*c", t("red")),
    )
    .unwrap();
    assert_eq!(env.resolve(&t("(*who *colour)")), t("(ann red)"));
}

#[test]
fn failure_leaves_the_environment_untouched() {
    let env = Bindings::new().extend("*z", t("zed"));
    let before = env.clone();
    assert!(unify(&t("(p *a b)"), &t("(p a c)"), &env).is_none());
    let extended = unify(&t("(p *a)"), &t("(p a)"), &env).unwrap();
    assert_eq!(env, before);
    assert_eq!(extended.len(), 2);
}

#[test]
fn empty_result_counts_as_failure() {
    assert!(unify(&t("(mortal socrates)"), &t("(mortal socrates)"), &Bindings::new()).is_none());
    let env = Bindings::new().extend("*x", t("a"));
    assert!(unify(&t("(mortal socrates)"), &t("(mortal socrates)"), &env).is_some());
}

#[test]
fn outcome_does_not_depend_on_argument_order() {
    let pairs = [
        ("(likes *x mary)", "(likes john *y)"),
        ("(f *x *x)", "(f a b)"),
        ("(f (g *x) *y)", "(f *z (h *z))"),
        ("(f *x a)", "(f *y *x)"),
    ];
    let env = Bindings::new();
    for (a, b) in pairs {
        let forward = unify(&t(a), &t(b), &env);
        let backward = unify(&t(b), &t(a), &env);
        assert_eq!(forward.is_some(), backward.is_some(), "{a} ~ {b}");
        if let (Some(f), Some(g)) = (forward, backward) {
            assert_eq!(f.resolve(&t(a)), f.resolve(&t(b)), "{a} ~ {b}");
            assert_eq!(g.resolve(&t(a)), g.resolve(&t(b)), "{b} ~ {a}");
        }
    }
}

#[test]
fn renaming_is_consistent_and_never_reused() {
    let clause = t("(if (friend *x *y) (likes *x *y))");
    let first = rename(&clause);
    let second = rename(&clause);
    let first_vars = first.variables();
    let second_vars = second.variables();
    assert_eq!(first_vars.len(), 2);
    assert!(first_vars.iter().all(|v| !second_vars.contains(v)));
    assert!(first_vars.iter().all(|v| *v != "*x" && *v != "*y"));

    let mut renamer = Renamer::new();
    let head = renamer.rename(&t("(friend *x *y)"));
    let body = renamer.rename(&t("(likes *y *x)"));
    assert_eq!(head.args()[0], body.args()[1]);
    assert_eq!(head.args()[1], body.args()[0]);
}

#[test]
fn bindings_print_sorted() {
    let env = unify(&t("(likes *y *x)"), &t("(likes mary john)"), &Bindings::new()).unwrap();
    assert_eq!(env.to_string(), "{*x = john, *y = mary}");
}

#[test]
fn restoring_undoes_a_renaming() {
    let mut renamer = Renamer::new();
    let query = t("(diff *b.3 (pair *w a))");
    let renamed = renamer.rename(&query);
    assert_ne!(renamed, query);
    assert_eq!(renamer.restore(&renamed), query);
}
