//! The CBPV intermediate-language term representation (spec §3.1).
//!
//! An immutable, tagged-variant tree, generalizing the teacher's
//! `ast.rs` `AST` enum (`Rc<AST>` subterms, one variant per surface
//! form) from a fixed Lisp surface syntax to the CBPV core: terms are
//! partitioned into *positive* (data-like, reducible without a step)
//! and *negative* (computational, requires a step) polarities.

use std::fmt;
use std::rc::Rc;

use derive_is_enum_variant::is_enum_variant;

/// A CBPV term. Parameterized over `L`, the host's literal payload
/// type; the core never inspects `L` except by handing it to the
/// host's [`Host::literal`](crate::host::Host::literal) hook.
///
/// The distinguished symbol name `"_"` is special-cased by
/// [`positive`](crate::machine::positive): it resolves to
/// `KontVal(Top)` regardless of environment contents, used as a
/// "discard" continuation.
#[derive(Clone, is_enum_variant)]
pub enum Term<L> {
    // --- positive (§3.1) ---
    /// A host-defined scalar payload.
    Literal(L),
    /// Lookup in the environment.
    Symbol(String),
    /// Apply a primitive operation to evaluated operands.
    Op(String, Vec<Rc<Term<L>>>),
    /// Freeze a (possibly negative) term into a value.
    Suspend(Rc<Term<L>>),

    // --- negative (§3.1) ---
    /// Evaluate a positive term, delivering its value to the current
    /// continuation (or jumping into a captured one).
    Resume(Rc<Term<L>>),
    /// A multi-argument abstraction; consumes an `Arg` continuation frame.
    Abstract(Vec<String>, Rc<Term<L>>),
    /// Apply an operator term to operand terms.
    Apply(Rc<Term<L>>, Vec<Rc<Term<L>>>),
    /// Bind one name to the value of one term in the body.
    Let(String, Rc<Term<L>>, Rc<Term<L>>),
    /// Mutually recursive term-level bindings.
    Letrec(Vec<(String, Rc<Term<L>>)>, Rc<Term<L>>),
    /// Install a delimiter.
    Reset(Rc<Term<L>>),
    /// Capture the continuation up to the nearest enclosing `Reset`.
    Shift(String, Rc<Term<L>>),
    /// Two-armed conditional over a scalar boolean.
    If(Rc<Term<L>>, Rc<Term<L>>, Rc<Term<L>>),
}

/// The distinguished "discard" symbol name (spec §3.1).
pub const DISCARD: &str = "_";

impl<L> Term<L> {
    /// Total, side-effect-free positivity predicate (spec §4.1):
    /// true exactly for `Literal | Symbol | Op | Suspend`.
    pub fn is_positive(&self) -> bool {
        self.is_literal() || self.is_symbol() || self.is_op() || self.is_suspend()
    }

    pub fn lit(payload: L) -> Rc<Self> {
        Rc::new(Term::Literal(payload))
    }

    pub fn sym(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Term::Symbol(name.into()))
    }

    pub fn op(name: impl Into<String>, operands: Vec<Rc<Self>>) -> Rc<Self> {
        Rc::new(Term::Op(name.into(), operands))
    }

    pub fn suspend(inner: Rc<Self>) -> Rc<Self> {
        Rc::new(Term::Suspend(inner))
    }

    pub fn resume(inner: Rc<Self>) -> Rc<Self> {
        Rc::new(Term::Resume(inner))
    }

    pub fn abs(params: Vec<impl Into<String>>, body: Rc<Self>) -> Rc<Self> {
        Rc::new(Term::Abstract(
            params.into_iter().map(Into::into).collect(),
            body,
        ))
    }

    pub fn apply(operator: Rc<Self>, operands: Vec<Rc<Self>>) -> Rc<Self> {
        Rc::new(Term::Apply(operator, operands))
    }

    pub fn let_(name: impl Into<String>, bound: Rc<Self>, body: Rc<Self>) -> Rc<Self> {
        Rc::new(Term::Let(name.into(), bound, body))
    }

    pub fn letrec(bindings: Vec<(impl Into<String>, Rc<Self>)>, body: Rc<Self>) -> Rc<Self> {
        Rc::new(Term::Letrec(
            bindings
                .into_iter()
                .map(|(name, term)| (name.into(), term))
                .collect(),
            body,
        ))
    }

    pub fn reset(body: Rc<Self>) -> Rc<Self> {
        Rc::new(Term::Reset(body))
    }

    pub fn shift(kont_name: impl Into<String>, body: Rc<Self>) -> Rc<Self> {
        Rc::new(Term::Shift(kont_name.into(), body))
    }

    pub fn if_(cond: Rc<Self>, then: Rc<Self>, els: Rc<Self>) -> Rc<Self> {
        Rc::new(Term::If(cond, then, els))
    }
}

impl<L: fmt::Debug> fmt::Debug for Term<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Literal(l) => write!(f, "lit({:?})", l),
            Term::Symbol(s) => write!(f, "sym({})", s),
            Term::Op(o, args) => write!(f, "op:{}({:?})", o, args),
            Term::Suspend(t) => write!(f, "!{:?}", t),
            Term::Resume(t) => write!(f, "?{:?}", t),
            Term::Abstract(params, body) => write!(f, "λ{:?}.{:?}", params, body),
            Term::Apply(op, args) => write!(f, "({:?} {:?})", op, args),
            Term::Let(x, t, b) => write!(f, "let {} = {:?} in {:?}", x, t, b),
            Term::Letrec(bs, b) => write!(f, "letrec {:?} in {:?}", bs, b),
            Term::Reset(t) => write!(f, "reset({:?})", t),
            Term::Shift(k, t) => write!(f, "shift {}.{:?}", k, t),
            Term::If(c, t, e) => write!(f, "if {:?} then {:?} else {:?}", c, t, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positivity_totality() {
        let positive: Vec<Rc<Term<i64>>> = vec![
            Term::lit(1),
            Term::sym("x"),
            Term::op("op:add", vec![Term::lit(1), Term::lit(2)]),
            Term::suspend(Term::sym("x")),
        ];
        for t in positive {
            assert!(t.is_positive());
        }

        let negative: Vec<Rc<Term<i64>>> = vec![
            Term::resume(Term::sym("x")),
            Term::abs(vec!["x"], Term::sym("x")),
            Term::apply(Term::sym("f"), vec![Term::sym("x")]),
            Term::let_("x", Term::lit(1), Term::sym("x")),
            Term::letrec(vec![("x", Term::lit(1))], Term::sym("x")),
            Term::reset(Term::sym("x")),
            Term::shift("k", Term::sym("k")),
            Term::if_(Term::lit(1), Term::sym("x"), Term::sym("x")),
        ];
        for t in negative {
            assert!(!t.is_positive());
        }
    }

    #[test]
    fn discard_symbol_is_just_a_name() {
        let t = Term::<i64>::sym(DISCARD);
        assert!(t.is_symbol());
    }
}
