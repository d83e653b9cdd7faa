use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use syllogy::binding::Bindings;
use syllogy::grammar::Grammar;
use syllogy::knowledge::KnowledgeBase;
use syllogy::resolve::Resolver;
use syllogy::term::Term;
use syllogy::translate::Translator;
use syllogy::unify::unify;

// facts (likes pN pM) for a ring of people, plus the friend rule
fn ring(people: usize) -> KnowledgeBase {
    let mut clauses = vec!["(= *z *z)".to_string()];
    for i in 0..people {
        clauses.push(format!("(likes p{} p{})", i, (i + 1) % people));
        clauses.push(format!("(likes p{} p{})", (i + 1) % people, i));
    }
    clauses.push("(if (friend *x *y) (and (likes *x *y) (and (likes *y *x) (not (= *x *y)))))".into());
    let mut knowledge = KnowledgeBase::new();
    for clause in &clauses {
        knowledge.define(&Term::parse(clause).unwrap()).unwrap();
    }
    knowledge
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let grammar = Arc::new(Grammar::standard().unwrap());

    let mut translator = Translator::new(Arc::clone(&grammar));
    c.bench_function("translate sentence", |b| {
        b.iter(|| translator.translate(black_box("define socrates is mortal")).unwrap())
    });
    c.bench_function("translate rule", |b| {
        b.iter(|| {
            translator
                .translate(black_box(
                    "define *x is friend of *y if *x is fond of *y and *x does not equal *y",
                ))
                .unwrap()
        })
    });

    let left = Term::parse("(owns *who (car *colour (wheels *n)))").unwrap();
    let right = Term::parse("(owns ann (car red (wheels 4)))").unwrap();
    let env = Bindings::new();
    c.bench_function("unify nested", |b| b.iter(|| unify(black_box(&left), black_box(&right), &env)));

    for people in [10, 100, 1000] {
        let knowledge = ring(people);
        let query = Term::parse("(friend p0 *who)").unwrap();
        c.bench_function(&format!("friends in ring of {}", people), |b| {
            b.iter(|| Resolver::new(&knowledge).prove(black_box(&query), &Bindings::new()))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
