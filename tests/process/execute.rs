use psh::environment::Environment;
use psh::error::ShellError;
use psh::parser::{CommandLine, parse};
use psh::process::builtin::map::BuiltinMap;
use psh::process::spawn::{self, not_a_command};
use psh::process::builtin::Builtin;
use psh::process::{Dispatch, execute};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn blank_line_dispatches_nothing() {
    let map = BuiltinMap::new();
    let environment = Environment::default();

    for line in ["", "   ", "\t\n", "&"] {
        let dispatch = execute(&map, &environment, &parse(line)).unwrap();
        assert_eq!(dispatch, Dispatch::Empty, "{line:?}");
    }
}

#[test]
fn quit_is_handled_without_spawning() {
    let map = BuiltinMap::new();
    let environment = Environment::default();

    let dispatch = execute(&map, &environment, &parse("quit\n")).unwrap();
    assert_eq!(dispatch, Dispatch::Quit);

    let dispatch = execute(&map, &environment, &parse("quit &")).unwrap();
    assert_eq!(dispatch, Dispatch::Quit);
}

#[test]
fn nul_bytes_are_rejected_before_forking() {
    let map = BuiltinMap::new();
    let environment = Environment::default();
    let command = CommandLine {
        argv: vec!["/bin/echo".to_string(), "bad\0arg".to_string()],
        background: false,
    };

    let err = execute(&map, &environment, &command).unwrap_err();
    assert!(matches!(err, ShellError::NulArgument(ref name) if name == "/bin/echo"));
    assert!(err.is_recoverable());
}

#[test]
fn spawn_refuses_an_empty_vector() {
    let err = spawn::spawn(&[], &Environment::default()).unwrap_err();
    assert!(matches!(err, ShellError::EmptyCommand));
}

#[test]
fn not_a_command_message_format() {
    assert_eq!(
        not_a_command("notarealprogram"),
        "notarealprogram: is not a command.\n"
    );
}

struct Status(i32);

impl Builtin for Status {
    fn call(&mut self, _args: &[String]) -> Option<i32> {
        Some(self.0)
    }
}

#[test]
fn registered_builtins_report_their_status() {
    let mut map = BuiltinMap::new();
    map.add("status", Rc::new(RefCell::new(Status(3))));

    let dispatch = execute(&map, &Environment::default(), &parse("status a b")).unwrap();

    assert_eq!(dispatch, Dispatch::Builtin(Some(3)));
}
