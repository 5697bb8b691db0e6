//! Commands run inside the shell process.
//!
//! `quit` is the only builtin the shell registers. `BuiltinMap::add` stays the way
//! to register more; whatever they return surfaces as `Dispatch::Builtin`.

pub mod map;

pub trait Builtin {
    fn call(&mut self, args: &[String]) -> Option<i32>;
}
