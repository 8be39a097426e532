//! Dynamic value graph with shared, freezable nodes.
//!
//! [`Object`], [`Array`] and [`Function`] are handles: cloning one yields
//! another handle to the same node, so a graph can share nodes and even
//! contain cycles. Each node carries a frozen flag. Once frozen, mutating
//! calls on that node have no effect and report `false`/`None`; they never
//! panic.

use serde_json::Number;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

/// Property name under which the clone hook is attached.
pub const CLONE_AND_REFREEZE: &str = "cloneAndRefreeze";

/// A value in a configuration graph.
///
/// Primitives compare by value; handles compare by identity.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Array),
    Object(Object),
    Function(Function),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Whether the value can no longer be mutated.
    ///
    /// Primitives are always immutable.
    pub fn is_frozen(&self) -> bool {
        match self {
            Value::Array(a) => a.is_frozen(),
            Value::Object(o) => o.is_frozen(),
            Value::Function(f) => f.is_frozen(),
            _ => true,
        }
    }

    /// Identity of the node behind a handle, `None` for primitives.
    pub(crate) fn node_id(&self) -> Option<usize> {
        match self {
            Value::Array(a) => Some(a.node_id()),
            Value::Object(o) => Some(o.node_id()),
            Value::Function(f) => Some(f.node_id()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Array(a) => fmt::Debug::fmt(a, f),
            Value::Object(o) => fmt::Debug::fmt(o, f),
            Value::Function(func) => fmt::Debug::fmt(func, f),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

/// Non-finite floats become [`Value::Null`].
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value::Array(a)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

/// `None` becomes [`Value::Null`], which is how an unread variable lands in
/// a configuration object.
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Shared node state: a frozen flag guarding the data behind a lock.
struct Node<T> {
    frozen: AtomicBool,
    data: RwLock<T>,
}

impl<T> Node<T> {
    fn new(data: T) -> Self {
        Self {
            frozen: AtomicBool::new(false),
            data: RwLock::new(data),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, T> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    /// Mutate unless frozen. The flag is checked under the write lock so a
    /// concurrent freeze cannot interleave with the mutation.
    fn mutate<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut data = self.write();
        if self.is_frozen() {
            return None;
        }
        Some(f(&mut data))
    }

    fn freeze(&self) {
        let _guard = self.write();
        self.frozen.store(true, Ordering::Release);
    }
}

/// Handle to a string-keyed map node.
#[derive(Clone)]
pub struct Object(Arc<Node<BTreeMap<String, Value>>>);

impl Object {
    pub fn new() -> Self {
        Self(Arc::new(Node::new(BTreeMap::new())))
    }

    /// Builder-style insert for constructing literals.
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Property value, or `None` when absent.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.read().get(key).cloned()
    }

    /// Assign a property. Returns `false` without effect when frozen.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let (key, value) = (key.into(), value.into());
        self.0
            .mutate(move |map| {
                map.insert(key, value);
            })
            .is_some()
    }

    /// Delete a property. Returns `None` when absent or frozen.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0.mutate(|map| map.remove(key)).flatten()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.read().keys().cloned().collect()
    }

    /// Snapshot of all properties.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.0
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.0.is_frozen()
    }

    /// Shallow freeze: this node only.
    pub fn freeze(&self) {
        self.0.freeze();
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn node_id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    pub(crate) fn downgrade(&self) -> WeakObject {
        WeakObject(Arc::downgrade(&self.0))
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let map = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self(Arc::new(Node::new(map)))
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("frozen", &self.is_frozen())
            .field("keys", &self.keys())
            .finish()
    }
}

/// Non-owning reference to an object node.
#[derive(Clone)]
pub(crate) struct WeakObject(Weak<Node<BTreeMap<String, Value>>>);

impl WeakObject {
    pub(crate) fn upgrade(&self) -> Option<Object> {
        self.0.upgrade().map(Object)
    }
}

/// Handle to a list node.
#[derive(Clone)]
pub struct Array(Arc<Node<Vec<Value>>>);

impl Array {
    pub fn new() -> Self {
        Self(Arc::new(Node::new(Vec::new())))
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.read().get(index).cloned()
    }

    /// Replace an element. Returns `false` when out of range or frozen.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> bool {
        let value = value.into();
        self.0
            .mutate(move |items| match items.get_mut(index) {
                Some(slot) => {
                    *slot = value;
                    true
                }
                None => false,
            })
            .unwrap_or(false)
    }

    /// Append an element. Returns `false` without effect when frozen.
    pub fn push(&self, value: impl Into<Value>) -> bool {
        let value = value.into();
        self.0.mutate(move |items| items.push(value)).is_some()
    }

    /// Snapshot of all elements.
    pub fn to_vec(&self) -> Vec<Value> {
        self.0.read().clone()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.0.is_frozen()
    }

    pub fn freeze(&self) {
        self.0.freeze();
    }

    pub fn ptr_eq(&self, other: &Array) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn node_id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl Default for Array {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Into<Value>> FromIterator<V> for Array {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        let items = iter.into_iter().map(Into::into).collect();
        Self(Arc::new(Node::new(items)))
    }
}

impl fmt::Debug for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Array")
            .field("frozen", &self.is_frozen())
            .field("len", &self.len())
            .finish()
    }
}

type NativeFn = dyn Fn(&[Value]) -> Value + Send + Sync;

pub(crate) enum Callable {
    Native(Box<NativeFn>),
    /// The hook attached by `make_clonable`, bound weakly to its object so
    /// the object and its own hook do not keep each other alive.
    CloneHook(WeakObject),
}

struct FunctionNode {
    frozen: AtomicBool,
    callable: Callable,
}

/// Handle to a callable node.
///
/// Functions have no properties of their own; freezing one only sets its
/// flag and never affects whether it can be called.
#[derive(Clone)]
pub struct Function(Arc<FunctionNode>);

impl Function {
    pub fn new(f: impl Fn(&[Value]) -> Value + Send + Sync + 'static) -> Self {
        Self::from_callable(Callable::Native(Box::new(f)))
    }

    pub(crate) fn from_callable(callable: Callable) -> Self {
        Self(Arc::new(FunctionNode {
            frozen: AtomicBool::new(false),
            callable,
        }))
    }

    pub(crate) fn callable(&self) -> &Callable {
        &self.0.callable
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Value {
        match &self.0.callable {
            Callable::Native(f) => f(args),
            Callable::CloneHook(target) => super::freeze::invoke_clone_hook(target, args),
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.0.frozen.load(Ordering::Acquire)
    }

    pub fn freeze(&self) {
        self.0.frozen.store(true, Ordering::Release);
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn node_id(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.0.callable {
            Callable::Native(_) => "native",
            Callable::CloneHook(_) => "cloneAndRefreeze",
        };
        f.debug_struct("Function")
            .field("kind", &kind)
            .field("frozen", &self.is_frozen())
            .finish()
    }
}
