//! Runtime values and continuations (spec §3.2, §3.4).
//!
//! Generalizes the teacher's tagged runtime-value convention
//! (`data::Literal` with `ensure_number`/`ensure_bool`/...
//! destructuring helpers) to the two-variant `Value` the CBPV machine
//! needs, and gives continuations the same tagged-enum treatment the
//! teacher's `frames/mod.rs` gives its `FrameStepResult`.
//!
//! Every continuation is reached through an `Rc`: a captured
//! continuation (the payload of `KontVal`) may be looked up from the
//! store and applied more than once (spec scenario S5's generator
//! resumes the same captured continuation across several `next`
//! calls), so continuations are shared, read-only structures from the
//! moment they are captured. `Rc::clone` is the only clone a
//! continuation ever needs.

use std::fmt;
use std::rc::Rc;

use derive_is_enum_variant::is_enum_variant;

use crate::env::Env;
use crate::error::Error;
use crate::term::Term;

/// A host literal payload's ability to answer "am I a Boolean, and
/// which one?". The core is otherwise agnostic to what `L` is (spec
/// §3.2 calls the payload "opaque"), but `If` (spec §4.4) must be
/// able to branch on a condition value without the host's `op`/
/// `literal` hooks in scope — this is the one piece of structure the
/// core needs to know about `L` directly, generalizing the teacher's
/// concrete `Literal::truthy()`/`ensure_bool()` methods into a trait
/// bound instead of a fixed enum variant.
pub trait Boolean {
    fn as_bool(&self) -> Option<bool>;
}

/// A runtime value: either a host scalar, or a reified continuation.
/// There is no separate closure variant (spec §3.2) — a closure is
/// just a `KontVal` wrapping a `Let([], body, env, Top)` continuation
/// (see [`Continuation::closure`]).
#[derive(Clone, is_enum_variant)]
pub enum Value<L> {
    Scalar(L),
    KontVal(Rc<Continuation<L>>),
}

impl<L> Value<L> {
    pub fn ensure_scalar(&self) -> Result<&L, Error> {
        match self {
            Value::Scalar(l) => Ok(l),
            Value::KontVal(_) => Err(Error::ExpectedContinuation),
        }
    }

    pub fn ensure_kont(&self) -> Result<Rc<Continuation<L>>, Error> {
        match self {
            Value::KontVal(k) => Ok(Rc::clone(k)),
            Value::Scalar(_) => Err(Error::ExpectedContinuation),
        }
    }
}

/// A reified representation of the work remaining to be done (spec
/// §3.4). `Top` is the bottom of the stack; `Arg` and `Let` are the
/// two frame shapes `Apply` and `Let` push while threading control.
pub enum Continuation<L> {
    /// Bottom of the stack: halts when the meta-stack is also empty.
    Top,
    /// Pushed by `Apply`; consumed by `Abstract`. Holds the already-
    /// evaluated operand values and the continuation to resume once
    /// the callee returns.
    Arg(Vec<Value<L>>, Rc<Continuation<L>>),
    /// Pushed by `Let`; consumed once the bound term yields a value.
    /// Carries the environment captured at the point `Let` was
    /// entered, so a continuation captured from inside the bound term
    /// observes that environment even if the "live" one is later
    /// extended.
    Let(Vec<String>, Rc<Term<L>>, Env<L>, Rc<Continuation<L>>),
}

impl<L> Continuation<L> {
    /// A closure over `env`: a `Let` frame with no binders, whose
    /// "body" is the suspended term, bottoming out at `Top` (spec
    /// §3.4). Function values and captured continuations share this
    /// one representation.
    pub fn closure(body: Rc<Term<L>>, env: Env<L>) -> Rc<Self> {
        Rc::new(Continuation::Let(Vec::new(), body, env, Rc::new(Continuation::Top)))
    }
}

impl<L: fmt::Debug> fmt::Debug for Value<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Scalar(l) => write!(f, "scalar({:?})", l),
            Value::KontVal(k) => write!(f, "kont({:?})", k),
        }
    }
}

impl<L: fmt::Debug> fmt::Debug for Continuation<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Continuation::Top => write!(f, "top"),
            Continuation::Arg(values, k) => write!(f, "arg({:?}) -> {:?}", values, k),
            Continuation::Let(names, body, _env, k) => {
                write!(f, "let{:?}.{:?} -> {:?}", names, body, k)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_scalar_rejects_a_continuation() {
        let v: Value<i64> = Value::KontVal(Rc::new(Continuation::Top));
        assert!(v.ensure_scalar().is_err());
    }

    #[test]
    fn ensure_kont_rejects_a_scalar() {
        let v: Value<i64> = Value::Scalar(1);
        assert!(v.ensure_kont().is_err());
    }

    #[test]
    fn ensure_kont_shares_the_rc_rather_than_deep_cloning() {
        let k = Rc::new(Continuation::<i64>::Top);
        let v = Value::KontVal(Rc::clone(&k));
        let extracted = v.ensure_kont().unwrap();
        assert!(Rc::ptr_eq(&k, &extracted));
    }
}
