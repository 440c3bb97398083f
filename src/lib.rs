//! An embeddable evaluator for a small, untyped call-by-push-value
//! intermediate language with first-class delimited control
//! (shift/reset) and a pluggable primitive-operation layer.
//!
//! The crate root re-exports the pieces a host needs: build a
//! [`term::Term`] tree, implement [`host::Host`], call
//! [`machine::inject`], then repeatedly call [`machine::step`] until
//! it yields [`machine::StepResult::Done`].

pub mod env;
pub mod error;
pub mod host;
pub mod machine;
pub mod sample_host;
pub mod term;
pub mod value;

pub use error::{Error, Result};
pub use host::Host;
pub use machine::{inject, run, step, State, StepResult};
pub use term::Term;
pub use value::{Boolean, Continuation, Value};
