use psh::process::builtin::map::BuiltinMap;
use psh::process::builtin::Builtin;
use psh::process::quit::{QUIT_CODE, Quit};
use std::cell::RefCell;
use std::rc::Rc;

struct Recorder {
    calls: Vec<Vec<String>>,
}

impl Builtin for Recorder {
    fn call(&mut self, args: &[String]) -> Option<i32> {
        self.calls.push(args.to_vec());
        Some(7)
    }
}

fn owned(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}

#[test]
fn quit_is_the_only_default_builtin() {
    let map = BuiltinMap::new();

    assert!(!map.is_empty());
    assert!(map.contains("quit"));
    for name in ["exit", "cd", "history"] {
        assert!(!map.contains(name), "{name} registered");
    }
}

#[test]
fn quit_returns_sentinel_regardless_of_arguments() {
    let map = BuiltinMap::new();

    assert_eq!(map.invoke("quit", &[]), Some(Some(QUIT_CODE)));
    assert_eq!(map.invoke("quit", &owned(&["now", "please"])), Some(Some(QUIT_CODE)));
    assert_eq!(Quit::new().call(&[]), Some(QUIT_CODE));
}

#[test]
fn unknown_names_are_not_builtins() {
    let map = BuiltinMap::new();

    assert_eq!(map.invoke("QUIT", &[]), None);
    assert_eq!(map.invoke("/bin/echo", &[]), None);
    assert!(!map.contains("exit"));
}

#[test]
fn added_builtins_receive_arguments() {
    let mut map = BuiltinMap::new();
    let recorder = Rc::new(RefCell::new(Recorder { calls: Vec::new() }));
    map.add("record", recorder.clone());

    assert_eq!(map.invoke("record", &owned(&["a", "b"])), Some(Some(7)));
    assert_eq!(recorder.borrow().calls, vec![owned(&["a", "b"])]);
}
