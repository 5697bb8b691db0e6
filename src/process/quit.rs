use crate::process::builtin::Builtin;

/// Sentinel returned by `quit` so the control loop knows to stop reading.
pub const QUIT_CODE: i32 = 1000;

/// Implements the `quit` builtin, ending the session.
pub struct Quit {}

impl Builtin for Quit {
    /// Arguments are ignored; the shell always stops.
    fn call(&mut self, _args: &[String]) -> Option<i32> {
        Some(QUIT_CODE)
    }
}

impl Quit {
    /// Construct a new quit builtin instance.
    pub fn new() -> Self {
        Quit {}
    }
}
