//! The evaluator (spec §4): `positive`, `continue_`, `step`, and the
//! `State`/`StepResult` types that thread a run through them, plus
//! the free-standing `inject`.
//!
//! Generalizes the teacher's `frames/mod.rs` (match on term shape to
//! pick a step kind, `FrameStepResult` driving the loop) and `vm.rs`
//! (an explicit `Op`-indexed bytecode stepper) from a flat bytecode
//! machine to the CBPV `Continuation`/meta-stack pair spec §3.4-3.5
//! calls for. Tracing follows `akasaka-miraina-lambdust`'s `log`
//! dependency rather than the teacher's own `println!`/
//! `dissassemble()` calls.

use std::fmt;
use std::rc::Rc;

use log::trace;

use crate::env::{Binding, Env, Store};
use crate::error::{Error, Result};
use crate::host::Host;
use crate::term::{Term, DISCARD};
use crate::value::{Boolean, Continuation, Value};

/// Machine state (spec §3.5): control term, environment, store,
/// current continuation, and the meta-stack of continuations saved
/// by `Reset`.
pub struct State<L> {
    pub control: Rc<Term<L>>,
    pub env: Env<L>,
    pub store: Store<L>,
    pub kont: Rc<Continuation<L>>,
    pub meta: Vec<Rc<Continuation<L>>>,
}

/// The result of one [`step`] call.
pub enum StepResult<L> {
    /// The machine has halted with a final value.
    Done(Value<L>),
    /// Progress was made; call [`step`] again on the returned state.
    More(State<L>),
}

/// Build the initial state for a fresh run (spec §4.5): empty
/// environment and store, the bottom `Top` continuation, empty
/// meta-stack.
pub fn inject<L: Clone>(term: Rc<Term<L>>) -> State<L> {
    State {
        control: term,
        env: Env::new(),
        store: Store::new(),
        kont: Rc::new(Continuation::Top),
        meta: Vec::new(),
    }
}

/// Reduce a positive term to a value without producing a new state
/// (spec §4.2). Loops rather than recurs on `Suspend` so that nested
/// `Suspend`s around an already-positive term peel off in one call
/// (`!!x` ≡ `!x`).
pub(crate) fn positive<L, H>(
    mut term: Rc<Term<L>>,
    env: &Env<L>,
    store: &Store<L>,
    host: &H,
) -> Result<Value<L>>
where
    L: Clone,
    H: Host<L>,
{
    loop {
        match &*term {
            Term::Literal(payload) => return host.literal(payload.clone()),
            Term::Symbol(name) => {
                if name == DISCARD {
                    return Ok(Value::KontVal(Rc::new(Continuation::Top)));
                }
                return match env.lookup(name)? {
                    Binding::Address(addr) => store.get(*addr).map(Clone::clone),
                    Binding::Definition(def) => Ok(Value::KontVal(Continuation::closure(
                        Rc::clone(def),
                        env.clone(),
                    ))),
                };
            }
            Term::Op(name, operands) => {
                let values = operands
                    .iter()
                    .map(|operand| positive(Rc::clone(operand), env, store, host))
                    .collect::<Result<Vec<_>>>()?;
                return host.op(name, values);
            }
            Term::Suspend(inner) => {
                if inner.is_positive() {
                    term = Rc::clone(inner);
                    continue;
                }
                return Ok(Value::KontVal(Continuation::closure(
                    Rc::clone(inner),
                    env.clone(),
                )));
            }
            _ => {
                return Err(Error::InvalidPositive {
                    shape: "negative term passed to the positive reducer",
                })
            }
        }
    }
}

/// Deliver a value to the current continuation (spec §4.3). Loops
/// until it either returns a new state (progress) or the meta-stack
/// and continuation are both exhausted (the run is done).
pub(crate) fn continue_<L>(
    mut val: Value<L>,
    mut kont: Rc<Continuation<L>>,
    mut store: Store<L>,
    meta: &mut Vec<Rc<Continuation<L>>>,
) -> Result<StepResult<L>>
where
    L: Clone,
{
    loop {
        match &*kont {
            Continuation::Arg(operands, successor) => {
                // "Throw to a captured continuation": val must itself
                // be a continuation value; restore it as current,
                // deferring the remainder of the present one to the
                // meta-stack, then deliver the (sole) queued operand
                // to it.
                let k_prime = val.ensure_kont()?;
                let next_val = operands.first().cloned().ok_or(Error::ArityOrContext)?;
                meta.push(Rc::clone(successor));
                kont = k_prime;
                val = next_val;
            }
            Continuation::Let(names, body, captured_env, successor) => {
                let new_env = if names.len() == 1 {
                    let addr = store.alloc(val);
                    captured_env.bind(names[0].clone(), Binding::Address(addr))
                } else if names.is_empty() {
                    captured_env.clone()
                } else {
                    // Multi-binder destructuring (spec §9 open question
                    // 1): the delivered value must be an Arg frame
                    // supplying one value per binder.
                    let arg = val.ensure_kont()?;
                    match &*arg {
                        Continuation::Arg(operands, _) if operands.len() == names.len() => {
                            let mut env = captured_env.clone();
                            for (name, operand) in names.iter().zip(operands.iter()) {
                                let addr = store.alloc(operand.clone());
                                env = env.bind(name.clone(), Binding::Address(addr));
                            }
                            env
                        }
                        _ => return Err(Error::ArityOrContext),
                    }
                };
                return Ok(StepResult::More(State {
                    control: Rc::clone(body),
                    env: new_env,
                    store,
                    kont: Rc::clone(successor),
                    meta: std::mem::take(meta),
                }));
            }
            Continuation::Top => match meta.pop() {
                Some(saved) => kont = saved,
                None => return Ok(StepResult::Done(val)),
            },
        }
    }
}

/// Advance one small step (spec §4.4). Structural negative terms
/// (`Apply`, `Let`, `Letrec`) fold into the continuation and loop
/// inside `step` itself rather than yielding; every other negative
/// term produces exactly one state transition.
pub fn step<L, H>(state: State<L>, host: &H) -> Result<StepResult<L>>
where
    L: Clone + fmt::Debug + Boolean,
    H: Host<L>,
{
    let State {
        mut control,
        mut env,
        mut store,
        mut kont,
        mut meta,
    } = state;

    loop {
        trace!("step: control = {:?}", control);

        match &*control {
            Term::Apply(operator, operands) => {
                let values = operands
                    .iter()
                    .map(|operand| positive(Rc::clone(operand), &env, &store, host))
                    .collect::<Result<Vec<_>>>()?;
                kont = Rc::new(Continuation::Arg(values, kont));
                control = Rc::clone(operator);
            }
            Term::Let(name, bound, body) => {
                kont = Rc::new(Continuation::Let(
                    vec![name.clone()],
                    Rc::clone(body),
                    env.clone(),
                    kont,
                ));
                control = Rc::clone(bound);
            }
            Term::Letrec(bindings, body) => {
                for (name, definition) in bindings {
                    env = env.bind(name.clone(), Binding::Definition(Rc::clone(definition)));
                }
                control = Rc::clone(body);
            }
            Term::Shift(k_name, body) => {
                let addr = store.alloc(Value::KontVal(kont));
                let env = env.bind(k_name.clone(), Binding::Address(addr));
                return Ok(StepResult::More(State {
                    control: Rc::clone(body),
                    env,
                    store,
                    kont: Rc::new(Continuation::Top),
                    meta,
                }));
            }
            Term::Reset(body) => {
                meta.push(kont);
                return Ok(StepResult::More(State {
                    control: Rc::clone(body),
                    env,
                    store,
                    kont: Rc::new(Continuation::Top),
                    meta,
                }));
            }
            Term::If(cond, then, els) => {
                let val = positive(Rc::clone(cond), &env, &store, host)?;
                let branch = match &val {
                    Value::Scalar(payload) => {
                        payload.as_bool().ok_or(Error::IfRequiresBool)?
                    }
                    Value::KontVal(_) => return Err(Error::IfRequiresBool),
                };
                control = if branch { Rc::clone(then) } else { Rc::clone(els) };
            }
            Term::Resume(t) => {
                let val = positive(Rc::clone(t), &env, &store, host)?;
                if let Value::KontVal(k) = &val {
                    if let Continuation::Let(params, body, closed_env, successor) = &**k {
                        if params.is_empty() && matches!(&**successor, Continuation::Top) {
                            control = Rc::clone(body);
                            env = closed_env.clone();
                            continue;
                        }
                    }
                }
                return continue_(val, kont, store, &mut meta);
            }
            Term::Abstract(params, body) => {
                return match &*kont {
                    Continuation::Arg(values, successor) if values.len() == params.len() => {
                        let mut env = env.clone();
                        for (param, value) in params.iter().zip(values.iter()) {
                            let addr = store.alloc(value.clone());
                            env = env.bind(param.clone(), Binding::Address(addr));
                        }
                        Ok(StepResult::More(State {
                            control: Rc::clone(body),
                            env,
                            store,
                            kont: Rc::clone(successor),
                            meta,
                        }))
                    }
                    _ => Err(Error::ArityOrContext),
                };
            }
            _ => {
                debug_assert!(control.is_positive());
                let val = positive(Rc::clone(&control), &env, &store, host)?;
                return continue_(val, kont, store, &mut meta);
            }
        }
    }
}

/// Runs a state to completion, calling [`step`] until it yields
/// [`StepResult::Done`]. Not part of the spec's core surface (the
/// host owns the step loop, per spec §6.2) — a convenience for tests
/// and the demo binary, analogous to the teacher's
/// `Evaler::step_until_return`/`VM::step_until_cost`.
pub fn run<L, H>(mut state: State<L>, host: &H) -> Result<Value<L>>
where
    L: Clone + fmt::Debug + Boolean,
    H: Host<L>,
{
    loop {
        match step(state, host)? {
            StepResult::Done(value) => return Ok(value),
            StepResult::More(next) => state = next,
        }
    }
}
