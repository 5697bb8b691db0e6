use std::rc::Rc;
use super::Builtin;
use std::cell::RefCell;
use std::collections::HashMap;
use crate::process::quit::Quit;

/// Table of builtins keyed on the command name.
pub struct BuiltinMap {
    quit: Rc<RefCell<Quit>>,
    func_map: HashMap<String, Rc<RefCell<dyn Builtin>>>,
}

impl BuiltinMap {
    pub fn new() -> Self {
        let mut builtin = BuiltinMap {
            quit: Rc::new(RefCell::new(Quit::new())),
            func_map: HashMap::new(),
        };

        builtin.populate_func_map();
        builtin
    }

    fn populate_func_map(&mut self) {
        // If builtin map is not empty abort inital population
        if !self.is_empty() {
            return;
        }

        self.add("quit", self.quit.clone());
    }

    /// Run the builtin registered as `func_name`. `None` means no such builtin.
    pub fn invoke(&self, func_name: &str, args: &[String]) -> Option<Option<i32>> {
        let builtin = self.func_map.get(func_name)?;
        let result = builtin.borrow_mut().call(args);
        return Some(result);
    }

    pub fn add(&mut self, func_name: &str, func_ptr: Rc<RefCell<dyn Builtin>>) {
        self.func_map.insert(func_name.to_string(), func_ptr);
    }

    pub fn contains(&self, func_name: &str) -> bool {
        self.func_map.contains_key(func_name)
    }

    pub fn is_empty(&self) -> bool {
        self.func_map.is_empty()
    }
}
