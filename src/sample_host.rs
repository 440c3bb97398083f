//! A minimal arithmetic/boolean [`Host`] implementation, used by the
//! demo binary and by the integration tests for spec §8.2's
//! end-to-end scenarios.
//!
//! Grounded on the teacher's own primitive-operation modules
//! (`syscall/math.rs`, `syscall/mod.rs`'s `SyscallFactory`): a small,
//! fixed set of named host functions over the runtime's scalar type.

use crate::error::Error;
use crate::host::Host;
use crate::value::{Boolean, Value};

/// The literal payload this sample host accepts: numbers and
/// booleans, matching the `number | boolean` universe spec §8.2's
/// scenarios are written against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Num {
    Int(i64),
    Bool(bool),
}

impl Boolean for Num {
    fn as_bool(&self) -> Option<bool> {
        match self {
            Num::Bool(b) => Some(*b),
            Num::Int(_) => None,
        }
    }
}

fn int(v: &Value<Num>) -> Result<i64, Error> {
    match v.ensure_scalar()? {
        Num::Int(n) => Ok(*n),
        Num::Bool(_) => Err(Error::BadLiteral {
            reason: "expected a number, got a boolean".to_string(),
        }),
    }
}

fn boolean(v: &Value<Num>) -> Result<bool, Error> {
    match v.ensure_scalar()? {
        Num::Bool(b) => Ok(*b),
        Num::Int(_) => Err(Error::BadLiteral {
            reason: "expected a boolean, got a number".to_string(),
        }),
    }
}

/// `op:add`, `op:mul`, `op:sub`, `op:eq`, `op:lt`, `op:and`, `op:not`,
/// `op:mod` over `number | boolean` (spec §8.2).
pub struct ArithHost;

impl Host<Num> for ArithHost {
    fn literal(&self, payload: Num) -> Result<Value<Num>, Error> {
        Ok(Value::Scalar(payload))
    }

    fn op(&self, name: &str, args: Vec<Value<Num>>) -> Result<Value<Num>, Error> {
        match (name, args.as_slice()) {
            ("op:add", [a, b]) => Ok(Value::Scalar(Num::Int(int(a)? + int(b)?))),
            ("op:mul", [a, b]) => Ok(Value::Scalar(Num::Int(int(a)? * int(b)?))),
            ("op:sub", [a, b]) => Ok(Value::Scalar(Num::Int(int(a)? - int(b)?))),
            ("op:mod", [a, b]) => Ok(Value::Scalar(Num::Int(int(a)? % int(b)?))),
            ("op:eq", [a, b]) => Ok(Value::Scalar(Num::Bool(int(a)? == int(b)?))),
            ("op:lt", [a, b]) => Ok(Value::Scalar(Num::Bool(int(a)? < int(b)?))),
            ("op:and", [a, b]) => Ok(Value::Scalar(Num::Bool(boolean(a)? && boolean(b)?))),
            ("op:not", [a]) => Ok(Value::Scalar(Num::Bool(!boolean(a)?))),
            _ => Err(Error::UnknownOp {
                name: name.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_arithmetic() {
        let host = ArithHost;
        let result = host
            .op("op:add", vec![Value::Scalar(Num::Int(1)), Value::Scalar(Num::Int(2))])
            .unwrap();
        assert_eq!(*result.ensure_scalar().unwrap(), Num::Int(3));
    }

    #[test]
    fn unknown_op_fails_rather_than_falling_through() {
        let host = ArithHost;
        assert!(host.op("op:frobnicate", vec![]).is_err());
    }

    #[test]
    fn type_mismatch_is_bad_literal_not_a_panic() {
        let host = ArithHost;
        let result = host.op("op:add", vec![Value::Scalar(Num::Bool(true)), Value::Scalar(Num::Int(1))]);
        assert!(result.is_err());
    }
}
