//! A small command-line driver over [`cbpv_machine`], built with
//! named programs rather than a surface parser (none is part of this
//! crate; see `SPEC_FULL.md` §4). Generalizes the teacher's
//! `main.rs`/`repl.rs` pair: `main.rs`'s hardcoded-program-then-run
//! shape, `repl.rs`'s verbose step tracing.

use std::process::ExitCode;
use std::rc::Rc;

use clap::{Parser, ValueEnum};

use cbpv_machine::sample_host::{ArithHost, Num};
use cbpv_machine::term::Term;
use cbpv_machine::{inject, run, step, StepResult};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scenario {
    /// `((? sqr) 69)` with `sqr` a `letrec`-bound closure.
    Closure,
    /// `(let n (op:add 1 2) (op:mul n 2))`.
    Let,
    /// Recursive factorial-style accumulator via `letrec`/`if`.
    Recursion,
    /// A captured continuation applied as a plain value.
    Shift,
}

/// Run one of a handful of built-in CBPV programs and print the
/// result.
#[derive(Parser)]
#[command(name = "cbpv-demo", author, version, about)]
struct Args {
    /// Which built-in program to run.
    #[arg(value_enum, default_value_t = Scenario::Recursion)]
    scenario: Scenario,

    /// Print every `step` transition as it happens (enables `trace`-level logging).
    #[arg(short, long)]
    verbose: bool,
}

fn program(scenario: Scenario) -> Rc<Term<Num>> {
    let lit = |n: i64| Term::lit(Num::Int(n));

    match scenario {
        Scenario::Closure => {
            let sqr = Term::abs(vec!["n"], Term::op("op:mul", vec![Term::sym("n"), Term::sym("n")]));
            Term::letrec(
                vec![("sqr", sqr)],
                Term::apply(Term::resume(Term::sym("sqr")), vec![lit(69)]),
            )
        }
        Scenario::Let => Term::let_(
            "n",
            Term::op("op:add", vec![lit(1), lit(2)]),
            Term::op("op:mul", vec![Term::sym("n"), lit(2)]),
        ),
        Scenario::Recursion => {
            let recur = Term::apply(
                Term::resume(Term::sym("f")),
                vec![
                    Term::op("op:sub", vec![Term::sym("n"), lit(1)]),
                    Term::op("op:mul", vec![Term::sym("n"), Term::sym("total")]),
                ],
            );
            let f_body = Term::if_(Term::op("op:eq", vec![Term::sym("n"), lit(2)]), Term::sym("total"), recur);
            let f = Term::abs(vec!["n", "total"], f_body);
            Term::letrec(
                vec![("f", f)],
                Term::apply(Term::resume(Term::sym("f")), vec![lit(10), lit(1)]),
            )
        }
        Scenario::Shift => {
            let captured = Term::reset(Term::shift("k", Term::sym("k")));
            let call_f = Term::apply(Term::sym("f"), vec![Term::op("op:add", vec![lit(10), lit(55)])]);
            Term::let_(
                "f",
                captured,
                Term::let_("n", call_f, Term::op("op:mul", vec![lit(3), Term::sym("n")])),
            )
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { log::LevelFilter::Trace } else { log::LevelFilter::Warn };
    env_logger::Builder::new().filter_level(level).init();

    let host = ArithHost;
    let term = program(args.scenario);

    if args.verbose {
        let mut state = inject(term);
        loop {
            match step(state, &host) {
                Ok(StepResult::Done(value)) => {
                    println!("{:?}", value.ensure_scalar().ok());
                    return ExitCode::SUCCESS;
                }
                Ok(StepResult::More(next)) => state = next,
                Err(e) => {
                    eprintln!("error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    match run(inject(term), &host) {
        Ok(value) => {
            println!("{:?}", value.ensure_scalar().ok());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
