//! Runtime error kinds for the evaluator.
//!
//! Mirrors the one-variant-per-failure-family shape of the teacher's
//! `error.rs` (`VmError`/`VmGeneralError`/`VmTypeError`/`VmPopError`),
//! but lets `failure`'s derive macro generate `Display` instead of
//! hand-writing it.

use failure::Fail;

use crate::env::Address;

/// Every way a [`step`](crate::machine::step) or
/// [`positive`](crate::machine::positive) call can fail. All errors are
/// fatal to the current run (spec §7): the core never catches or
/// retries, a host restarts by calling
/// [`inject`](crate::machine::inject) again.
#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "unbound symbol: {}", name)]
    UnboundSymbol { name: String },

    #[fail(display = "unbound address: {}", address)]
    UnboundAddress { address: Address },

    #[fail(display = "positive reducer given a negative term: {}", shape)]
    InvalidPositive { shape: &'static str },

    #[fail(display = "if condition did not evaluate to a boolean scalar")]
    IfRequiresBool,

    #[fail(display = "expected a continuation value, found a scalar")]
    ExpectedContinuation,

    #[fail(display = "entered Abstract with a non-Arg continuation (arity or context mismatch)")]
    ArityOrContext,

    #[fail(display = "unknown primitive op: {}", name)]
    UnknownOp { name: String },

    #[fail(display = "literal payload rejected by host: {}", reason)]
    BadLiteral { reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
