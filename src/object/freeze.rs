//! Deep freeze, deep clone and clone-and-refreeze.
//!
//! Both traversals keep a set of visited node identities, so shared nodes
//! are handled once and cyclic graphs terminate. A deep clone reproduces
//! sharing and cycles: two references to one node in the source become two
//! references to one node in the clone.

use super::value::{Array, CLONE_AND_REFREEZE, Callable, Function, Object, Value, WeakObject};
use std::collections::{HashMap, HashSet};

/// Freeze `obj` and everything reachable from it.
///
/// Nodes that are already frozen are not descended into.
pub fn deep_freeze(obj: &Object) {
    freeze_value(&Value::Object(obj.clone()), &mut HashSet::new());
}

/// Like [`deep_freeze`], starting from any value. Primitives are a no-op.
pub fn deep_freeze_value(value: &Value) {
    freeze_value(value, &mut HashSet::new());
}

fn freeze_value(value: &Value, visited: &mut HashSet<usize>) {
    let Some(id) = value.node_id() else {
        return;
    };
    if !visited.insert(id) {
        return;
    }

    let children: Vec<Value> = match value {
        Value::Object(obj) => {
            obj.freeze();
            obj.entries().into_iter().map(|(_, v)| v).collect()
        }
        Value::Array(arr) => {
            arr.freeze();
            arr.to_vec()
        }
        Value::Function(f) => {
            f.freeze();
            Vec::new()
        }
        _ => Vec::new(),
    };

    for child in children.iter().filter(|c| !c.is_frozen()) {
        freeze_value(child, visited);
    }
}

/// Structurally independent, unfrozen copy of `obj`.
///
/// Objects and arrays are copied; functions are shared by reference.
pub fn deep_clone(obj: &Object) -> Object {
    let mut copies = HashMap::new();
    clone_object(obj, &mut copies)
}

/// Like [`deep_clone`], starting from any value.
pub fn deep_clone_value(value: &Value) -> Value {
    clone_value(value, &mut HashMap::new())
}

fn clone_value(value: &Value, copies: &mut HashMap<usize, Value>) -> Value {
    match value {
        Value::Object(obj) => Value::Object(clone_object(obj, copies)),
        Value::Array(arr) => Value::Array(clone_array(arr, copies)),
        other => other.clone(),
    }
}

fn clone_object(obj: &Object, copies: &mut HashMap<usize, Value>) -> Object {
    if let Some(Value::Object(copy)) = copies.get(&obj.node_id()) {
        return copy.clone();
    }

    let copy = Object::new();
    copies.insert(obj.node_id(), Value::Object(copy.clone()));
    for (key, child) in obj.entries() {
        copy.set(key, clone_value(&child, copies));
    }
    copy
}

fn clone_array(arr: &Array, copies: &mut HashMap<usize, Value>) -> Array {
    if let Some(Value::Array(copy)) = copies.get(&arr.node_id()) {
        return copy.clone();
    }

    let copy = Array::new();
    copies.insert(arr.node_id(), Value::Array(copy.clone()));
    for child in arr.to_vec() {
        copy.push(clone_value(&child, copies));
    }
    copy
}

/// Attach a `cloneAndRefreeze` function to `obj`.
///
/// Returns `false` if `obj` is frozen and the hook could not be attached.
pub fn make_clonable(obj: &Object) -> bool {
    let hook = Function::from_callable(Callable::CloneHook(obj.downgrade()));
    obj.set(CLONE_AND_REFREEZE, hook)
}

/// [`make_clonable`] then [`deep_freeze`]. The hook is frozen along with
/// everything else and stays callable.
pub fn make_clonable_and_deep_freeze(obj: &Object) {
    make_clonable(obj);
    deep_freeze(obj);
}

/// Clone, apply `changes` to the unfrozen copy, re-attach the hook, freeze.
fn clone_and_refreeze(source: &Object, changes: impl FnOnce(&Object)) -> Object {
    let copy = deep_clone(source);
    changes(&copy);
    make_clonable(&copy);
    deep_freeze(&copy);
    copy
}

/// Entry point for calling the hook as a [`Function`]. An optional first
/// argument that is itself a function receives the copy before it is frozen.
pub(crate) fn invoke_clone_hook(target: &WeakObject, args: &[Value]) -> Value {
    let Some(source) = target.upgrade() else {
        return Value::Null;
    };
    let callback = args.first().and_then(Value::as_function).cloned();
    let copy = clone_and_refreeze(&source, |copy| {
        if let Some(callback) = callback {
            callback.call(&[Value::Object(copy.clone())]);
        }
    });
    Value::Object(copy)
}

impl Object {
    /// Whether a `cloneAndRefreeze` hook is attached.
    pub fn is_clonable(&self) -> bool {
        self.clone_hook().is_some()
    }

    fn clone_hook(&self) -> Option<WeakObject> {
        match self.get(CLONE_AND_REFREEZE)? {
            Value::Function(f) => match f.callable() {
                Callable::CloneHook(target) => Some(target.clone()),
                Callable::Native(_) => None,
            },
            _ => None,
        }
    }

    /// Frozen, clonable copy of the object the hook was attached to.
    ///
    /// Returns `None` if no hook is attached.
    pub fn clone_and_refreeze(&self) -> Option<Object> {
        self.clone_and_refreeze_with(|_| {})
    }

    /// Like [`clone_and_refreeze`](Self::clone_and_refreeze), letting
    /// `changes` mutate the copy before it is frozen. The source object is
    /// never touched.
    pub fn clone_and_refreeze_with(&self, changes: impl FnOnce(&Object)) -> Option<Object> {
        let source = self.clone_hook()?.upgrade()?;
        Some(clone_and_refreeze(&source, changes))
    }
}
