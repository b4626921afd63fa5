use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Scopes are shared: a block, a call frame and every closure created in it
/// all hold the same `Env`.
pub type Env = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    store: HashMap<String, Value>,
    outer: Option<Env>,
}

impl Environment {
    pub fn new() -> Env {
        Rc::new(RefCell::new(Default::default()))
    }

    pub fn with_enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Self {
            store: HashMap::new(),
            outer: Some(Rc::clone(outer)),
        }))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Binds `name` in this scope, shadowing any outer binding.
    pub fn define(&mut self, name: &str, val: Value) {
        self.store.insert(name.to_owned(), val);
    }

    /// Overwrites the nearest existing binding of `name`; when no scope
    /// defines it, the binding is created here.
    pub fn assign(&mut self, name: &str, val: Value) {
        if let Some(val) = self.update(name, val) {
            self.define(name, val);
        }
    }

    /// Hands the value back when no scope in the chain defines `name`.
    fn update(&mut self, name: &str, val: Value) -> Option<Value> {
        if let Some(slot) = self.store.get_mut(name) {
            *slot = val;
            return None;
        }
        match &self.outer {
            Some(outer) => outer.borrow_mut().update(name, val),
            None => Some(val),
        }
    }

    /// Reads the nearest binding of `name` without cloning it.
    pub fn with_binding<R>(&self, name: &str, f: impl FnOnce(&Value) -> R) -> Option<R> {
        if let Some(value) = self.store.get(name) {
            return Some(f(value));
        }
        match &self.outer {
            Some(outer) => outer.borrow().with_binding(name, f),
            None => None,
        }
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.with_binding(name, |_| ()).is_some()
    }

    /// Runs `f` on the nearest binding of `name` in place.
    pub fn with_binding_mut<R>(&mut self, name: &str, f: impl FnOnce(&mut Value) -> R) -> Option<R> {
        if let Some(slot) = self.store.get_mut(name) {
            return Some(f(slot));
        }
        match &self.outer {
            Some(outer) => outer.borrow_mut().with_binding_mut(name, f),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.store.contains_key(name)
    }

    /// Drops every binding, releasing closures that captured this scope.
    pub fn clear(&mut self) {
        self.store.clear();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_lookup_walks_outer_scopes() {
        let global = Environment::new();
        global.borrow_mut().define("x", 1.into());

        let inner = Environment::with_enclosed(&global);
        inner.borrow_mut().define("y", 2.into());

        assert_eq!(inner.borrow().get("x"), Some(1.into()));
        assert_eq!(inner.borrow().get("y"), Some(2.into()));
        assert_eq!(global.borrow().get("y"), None);
    }

    #[test]
    fn test_assign_mutates_nearest_binding() {
        let global = Environment::new();
        global.borrow_mut().define("counter", 1.into());

        let inner = Environment::with_enclosed(&global);
        inner.borrow_mut().assign("counter", 2.into());

        assert!(!inner.borrow().contains("counter"));
        assert_eq!(global.borrow().get("counter"), Some(2.into()));
    }

    #[test]
    fn test_assign_creates_in_current_scope() {
        let global = Environment::new();
        let inner = Environment::with_enclosed(&global);
        inner.borrow_mut().assign("fresh", "yes".into());

        assert!(inner.borrow().contains("fresh"));
        assert_eq!(global.borrow().get("fresh"), None);
    }

    #[test]
    fn test_define_shadows() {
        let global = Environment::new();
        global.borrow_mut().define("x", 1.into());

        let inner = Environment::with_enclosed(&global);
        inner.borrow_mut().define("x", 10.into());
        inner.borrow_mut().assign("x", 11.into());

        assert_eq!(inner.borrow().get("x"), Some(11.into()));
        assert_eq!(global.borrow().get("x"), Some(1.into()));
    }

    #[test]
    fn test_with_binding_mut() {
        let global = Environment::new();
        global
            .borrow_mut()
            .define("xs", vec![Value::from(1)].into());

        let inner = Environment::with_enclosed(&global);
        let found = inner.borrow_mut().with_binding_mut("xs", |xs| {
            if let Value::List(items) = xs {
                items.push(2.into());
            }
        });

        assert!(found.is_some());
        assert_eq!(
            global.borrow().get("xs"),
            Some(vec![Value::from(1), Value::from(2)].into())
        );
        assert!(inner.borrow_mut().with_binding_mut("nope", |_| ()).is_none());
    }

    #[test]
    fn test_with_binding_reads_outer_scopes() {
        let global = Environment::new();
        global
            .borrow_mut()
            .define("xs", vec![Value::from(1), Value::from(2)].into());

        let inner = Environment::with_enclosed(&global);
        let len = inner.borrow().with_binding("xs", |xs| match xs {
            Value::List(items) => items.len(),
            _ => 0,
        });

        assert_eq!(len, Some(2));
        assert!(inner.borrow().is_bound("xs"));
        assert!(!inner.borrow().is_bound("ys"));
    }
}
