//! The environment model: a global name→`Value` map plus a stack of local
//! frames, one per active call. An empty frame stack means top-level
//! statements are executing and assignments write the global map directly.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::value::Value;

#[derive(Default, Debug)]
struct Frame {
    locals: HashMap<Rc<str>, Value>,
    /// Names declared `global` in this frame: lookups and assignments for
    /// these names bypass `locals` and target `globals`.
    globals_declared: HashSet<Rc<str>>,
}

#[derive(Default, Debug)]
pub struct Environment {
    globals: HashMap<Rc<str>, Value>,
    frames: Vec<Frame>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_frame(&mut self) {
        self.frames.push(Frame::default());
    }

    pub fn pop_frame(&mut self) {
        self.frames.pop();
    }

    pub fn frame_depth(&self) -> usize {
        self.frames.len()
    }

    /// Bind a function parameter unconditionally into the current (topmost)
    /// frame. Only valid right after `push_frame`.
    pub fn bind_param(&mut self, name: Rc<str>, value: Value) {
        let frame = self.frames.last_mut().expect("bind_param requires an active frame");
        frame.locals.insert(name, value);
    }

    /// Declare `name` as referring to the global environment within the
    /// current frame. Returns `false` if there is no active frame, or if
    /// `name` does not already exist in the global map: declaring a global
    /// requires it to already be bound there.
    pub fn declare_global(&mut self, name: &Rc<str>) -> bool {
        if !self.globals.contains_key(name) {
            return false;
        }
        let Some(frame) = self.frames.last_mut() else {
            return false;
        };
        frame.globals_declared.insert(name.clone());
        true
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(frame) = self.frames.last() {
            if frame.globals_declared.contains(name) {
                return self.globals.get(name).cloned();
            }
            if let Some(value) = frame.locals.get(name) {
                return Some(value.clone());
            }
        }
        self.globals.get(name).cloned()
    }

    /// Resolve the assignment target for `name` and write `value` into it:
    /// the existing local binding if present, else the existing global
    /// binding if present, else a freshly inserted binding — into the
    /// global map if the frame stack is empty, otherwise into the top local
    /// frame. A `global`-declared name always targets the global map
    /// directly.
    pub fn assign(&mut self, name: Rc<str>, value: Value) {
        let Some(frame) = self.frames.last_mut() else {
            self.globals.insert(name, value);
            return;
        };

        if frame.globals_declared.contains(&name) {
            self.globals.insert(name, value);
        } else if frame.locals.contains_key(&name) {
            frame.locals.insert(name, value);
        } else if self.globals.contains_key(&name) {
            self.globals.insert(name, value);
        } else {
            frame.locals.insert(name, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_assignment_writes_globals() {
        let mut env = Environment::new();
        env.assign(Rc::from("x"), Value::Int64(1));
        assert_eq!(env.get("x"), Some(Value::Int64(1)));
    }

    #[test]
    fn local_shadows_global_until_declared_global() {
        let mut env = Environment::new();
        env.assign(Rc::from("g"), Value::Int64(0));

        env.push_frame();
        env.bind_param(Rc::from("g"), Value::Int64(99));
        assert_eq!(env.get("g"), Some(Value::Int64(99)));

        assert!(env.declare_global(&Rc::from("g")));
        assert_eq!(env.get("g"), Some(Value::Int64(0)));

        env.assign(Rc::from("g"), Value::Int64(1));
        env.pop_frame();
        assert_eq!(env.get("g"), Some(Value::Int64(1)));
    }

    #[test]
    fn global_declaration_requires_prior_existence() {
        let mut env = Environment::new();
        env.push_frame();
        assert!(!env.declare_global(&Rc::from("missing")));
    }

    #[test]
    fn assignment_without_global_writes_existing_global_from_frame() {
        let mut env = Environment::new();
        env.assign(Rc::from("g"), Value::Int64(0));

        env.push_frame();
        env.assign(Rc::from("g"), Value::Int64(5));
        env.pop_frame();

        assert_eq!(env.get("g"), Some(Value::Int64(5)));
    }

    #[test]
    fn frame_pop_restores_previous_scope() {
        let mut env = Environment::new();
        env.push_frame();
        env.bind_param(Rc::from("n"), Value::Int64(1));
        env.pop_frame();
        assert_eq!(env.get("n"), None);
    }
}
