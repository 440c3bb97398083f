//! Environment and store (spec §3.3).
//!
//! Generalizes the teacher's `environment.rs`/`isl/src/env.rs`
//! (`Env = im::HashMap<String, Rc<Literal>>`, cloned wholesale on
//! `EnvStack::push`) to the two data structures the CBPV machine
//! needs: an `Env` mapping names to either a store address or a
//! local (letrec) term definition, and an append-only `Store` mapping
//! addresses to values. Both are `im::HashMap`s, so `.clone()` is
//! O(1) structure-sharing — exactly what capturing a continuation
//! (§3.3, §5) requires: the environment in force at capture time must
//! survive later mutation of the "live" environment.

use std::fmt;
use std::rc::Rc;

use im::hashmap::HashMap;

use crate::error::{Error, Result};
use crate::term::Term;
use crate::value::Value;

/// An opaque store address. Spec §3.3 only requires addresses be
/// fresh and unique within a run; the concrete representation here is
/// a monotonic counter rather than a string, since the spec says the
/// format is irrelevant to semantics.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(u64);

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}", self.0)
    }
}

/// What a name in the environment resolves to: either a store
/// address (the common case — `Let`, `Abstract`, `Shift` bindings) or
/// a term definition (only produced by `Letrec`, which binds names
/// directly to their defining term rather than to an address, per
/// spec §9 "Cyclic structures").
#[derive(Clone)]
pub enum Binding<L> {
    Address(Address),
    Definition(Rc<Term<L>>),
}

/// `name -> Address | Term` (spec §3.3). Persistent: `.clone()` is
/// cheap and produces an independent snapshot, so pushing a frame
/// never disturbs environments other code may have captured.
#[derive(Clone)]
pub struct Env<L>(HashMap<String, Binding<L>>);

impl<L: Clone> Env<L> {
    pub fn new() -> Self {
        Env(HashMap::new())
    }

    /// Functional binding: returns a new environment shadowing `name`
    /// in the caller's environment; the caller's own `Env` is
    /// unaffected (spec §3.3 "Binding is functional").
    pub fn bind(&self, name: String, binding: Binding<L>) -> Self {
        Env(self.0.update(name, binding))
    }

    pub fn lookup(&self, name: &str) -> Result<&Binding<L>> {
        self.0.get(name).ok_or_else(|| Error::UnboundSymbol {
            name: name.to_string(),
        })
    }
}

impl<L: Clone> Default for Env<L> {
    fn default() -> Self {
        Self::new()
    }
}

/// `Address -> Value` (spec §3.3). Append-only within a run: once an
/// address is written it is never rewritten, so two `Store`s that
/// share a structural prefix (the common case after `.clone()`) never
/// observe each other's later writes — the "no aliasing hazard"
/// property spec §3.3 calls for.
#[derive(Clone, Default)]
pub struct Store<L> {
    cells: HashMap<Address, Value<L>>,
    next: u64,
}

impl<L: Clone> Store<L> {
    pub fn new() -> Self {
        Store {
            cells: HashMap::new(),
            next: 0,
        }
    }

    /// Allocate a fresh address and write `value` to it, returning the
    /// address. The returned store is a new snapshot; prior clones of
    /// `self` (e.g. inside a captured continuation's environment) do
    /// not observe this write.
    pub fn alloc(&mut self, value: Value<L>) -> Address {
        let addr = Address(self.next);
        self.next += 1;
        self.cells.insert(addr, value);
        addr
    }

    pub fn get(&self, addr: Address) -> Result<&Value<L>> {
        self.cells
            .get(&addr)
            .ok_or(Error::UnboundAddress { address: addr })
    }
}
