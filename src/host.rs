//! The host extension seam (spec §4.6, §9).
//!
//! The original evaluator this crate's lineage descends from exposes
//! extension via subclassing an evaluator class; spec §9 directs that
//! a systems-language port re-express that as a trait with two
//! methods plus a default state-threading loop. This crate's `Host`
//! trait plays the role the teacher's `syscall::SyscallFactory`
//! trait plays for its bytecode VM (a registry of host-defined
//! primitive operations), generalized to the two hooks the CBPV core
//! actually calls out to: mapping literal payloads to values, and
//! applying named primitive operations.

use crate::error::Error;
use crate::value::Value;

/// Implemented once per host application. `L` is the host's literal
/// payload type (opaque to the core).
pub trait Host<L> {
    /// Map a raw literal payload into a [`Value::Scalar`]. Primitive
    /// ops are not first-class (spec §4.6): they only ever occur
    /// inside `Op` terms, never as a literal payload or a value.
    fn literal(&self, payload: L) -> Result<Value<L>, Error>;

    /// Apply a primitive operation to already-evaluated operand
    /// values. The default implementation fails `UnknownOp` for every
    /// name, matching the teacher's documented "fail rather than
    /// silently fall through" fix for its own `op` switch's missing
    /// `break`s (spec §9, open question 3).
    fn op(&self, name: &str, _args: Vec<Value<L>>) -> Result<Value<L>, Error> {
        Err(Error::UnknownOp {
            name: name.to_string(),
        })
    }
}
