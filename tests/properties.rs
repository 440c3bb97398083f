//! Property-based coverage of spec §8.1's claims. Built-in term
//! shapes are parameterized by `proptest`-generated literals rather
//! than by arbitrary term trees (there is no surface parser to derive
//! an `Arbitrary` impl against — see `SPEC_FULL.md` §4); each property
//! still ranges over its operative dimension (arbitrary integers,
//! arbitrary nesting depth, arbitrary op argument order).

use std::rc::Rc;

use proptest::prelude::*;

use cbpv_machine::sample_host::{ArithHost, Num};
use cbpv_machine::term::Term;
use cbpv_machine::{inject, run, step, StepResult};

fn lit(n: i64) -> Rc<Term<Num>> {
    Term::lit(Num::Int(n))
}

fn eval(program: Rc<Term<Num>>) -> Num {
    let host = ArithHost;
    *run(inject(program), &host).unwrap().ensure_scalar().unwrap()
}

proptest! {
    /// `positive` totality (spec §4.1, §4.2, §8.1): a bare positive
    /// term wrapped in `Resume` resolves to its value in exactly one
    /// `step` call — no intermediate `More` states are produced while
    /// reducing the positive subterm itself.
    #[test]
    fn positive_terms_resolve_in_a_single_step(n in any::<i64>()) {
        let host = ArithHost;
        let program = Term::resume(Term::op("op:add", vec![lit(n), lit(0)]));
        match step(inject(program), &host).unwrap() {
            StepResult::Done(value) => prop_assert_eq!(*value.ensure_scalar().unwrap(), Num::Int(n)),
            StepResult::More(_) => prop_assert!(false, "a lone positive term should finish in one step"),
        }
    }

    /// `step` determinism (spec §8.1): running the same program twice
    /// from a fresh `inject` produces the same value.
    #[test]
    fn step_is_deterministic(a in any::<i64>(), b in any::<i64>()) {
        let program = || Term::op("op:add", vec![lit(a), lit(b)]);
        prop_assert_eq!(eval(program()), eval(program()));
    }

    /// `Let` evaluates its bound term exactly once and before the body
    /// observes it (spec §4.4, §8.1): the body can depend on the
    /// bound value, and changing the bound expression changes only
    /// the result, never whether the body runs.
    #[test]
    fn let_binds_before_the_body_runs(a in any::<i64>(), b in any::<i64>()) {
        let program = Term::let_(
            "x",
            Term::op("op:add", vec![lit(a), lit(b)]),
            Term::op("op:mul", vec![Term::sym("x"), lit(2)]),
        );
        prop_assert_eq!(eval(program), Num::Int((a.wrapping_add(b)).wrapping_mul(2)));
    }

    /// `Op` operands are evaluated left to right (spec §4.2): swapping
    /// a non-commutative op's argument order changes the result
    /// exactly as swapping plain subtraction operands would.
    #[test]
    fn op_operands_evaluate_in_argument_order(a in any::<i64>(), b in any::<i64>()) {
        let forward = Term::op("op:sub", vec![lit(a), lit(b)]);
        let backward = Term::op("op:sub", vec![lit(b), lit(a)]);
        prop_assert_eq!(eval(forward), Num::Int(a.wrapping_sub(b)));
        prop_assert_eq!(eval(backward), Num::Int(b.wrapping_sub(a)));
    }

    /// Suspend/Resume round-trip (spec §4.2, §4.4, §8.1): resuming a
    /// suspended positive term yields exactly the value the term
    /// would have produced unsuspended.
    #[test]
    fn suspend_then_resume_is_identity_on_positive_terms(n in any::<i64>()) {
        let direct = Term::let_("x", lit(n), Term::sym("x"));
        let via_suspend_resume = Term::let_(
            "x",
            Term::resume(Term::suspend(lit(n))),
            Term::sym("x"),
        );
        prop_assert_eq!(eval(direct), eval(via_suspend_resume));
    }

    /// Reset/shift round-trip (spec §4.4, §8.1): `(reset (shift k (k
    /// v)))` behaves as plain `v` when the captured continuation is
    /// invoked exactly once with no further control effects — the
    /// delimiter is transparent to a shift that immediately resumes.
    #[test]
    fn reset_shift_immediate_resume_is_transparent(n in any::<i64>()) {
        let trivial = lit(n);
        let through_shift = Term::reset(Term::shift("k", Term::apply(Term::sym("k"), vec![lit(n)])));
        prop_assert_eq!(eval(trivial), eval(through_shift));
    }

    /// Termination (spec §8.1): any finite composition of `Let`/`Op`
    /// over literals reaches `StepResult::Done` in a bounded number of
    /// `step` calls (no silent infinite loop for structurally
    /// decreasing programs).
    #[test]
    fn well_formed_finite_programs_terminate(depth in 1usize..12, seed in any::<i64>()) {
        let mut program = lit(seed);
        for i in 0..depth {
            program = Term::let_(format!("x{}", i), program, Term::op("op:add", vec![Term::sym(format!("x{}", i)), lit(1)]));
        }

        let host = ArithHost;
        let mut state = inject(program);
        let mut steps = 0;
        loop {
            prop_assert!(steps < 10_000, "did not terminate within a generous step bound");
            match step(state, &host).unwrap() {
                StepResult::Done(_) => break,
                StepResult::More(next) => state = next,
            }
            steps += 1;
        }
    }
}

/// `positive` confluence (spec §8.1): a positive term that reads a
/// bound name yields the same value regardless of how many other
/// addresses were allocated first — result depends only on the term's
/// own bindings, never on incidental store layout.
#[test]
fn positive_is_confluent_across_differently_padded_stores() {
    let read_x = Term::op("op:add", vec![Term::sym("x"), lit(1)]);

    let unpadded = Term::let_("x", lit(41), Rc::clone(&read_x));
    let padded = Term::let_(
        "padding",
        lit(999),
        Term::let_("x", lit(41), read_x),
    );

    assert_eq!(eval(unpadded), eval(padded));
}
