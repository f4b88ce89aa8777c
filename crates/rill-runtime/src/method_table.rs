// method_table.rs
//! Per-class registry of native methods and the dispatch primitives built on it.

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::block::Block;
use crate::error::RuntimeError;
use crate::value::{ClassId, Value};

/// Signature of a native method: receiver, positional arguments, optional block.
pub type NativeMethod =
    for<'b> fn(&Value, &[Value], Option<Block<'b>>) -> Result<Value, RuntimeError>;

/// Methods defined on one class.
#[derive(Default)]
struct ClassMethods {
    methods: FxHashMap<String, NativeMethod>,
}

impl std::fmt::Debug for ClassMethods {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.methods.keys()).finish()
    }
}

impl ClassMethods {
    fn define(&mut self, name: &str, method: NativeMethod) {
        self.methods.insert(name.to_string(), method);
    }

    fn get(&self, name: &str) -> Option<NativeMethod> {
        self.methods.get(name).copied()
    }
}

/// Registry of all classes' native methods.
#[derive(Debug, Default)]
pub struct MethodTable {
    classes: FxHashMap<ClassId, ClassMethods>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding every built-in method.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        crate::integer::register(&mut table);
        crate::range::register(&mut table);
        crate::string::register(&mut table);
        crate::enumerator::register(&mut table);
        crate::enumerable::register(&mut table);
        table
    }

    pub fn define(&mut self, class: ClassId, name: &str, method: NativeMethod) {
        self.classes.entry(class).or_default().define(name, method);
    }

    pub fn lookup(&self, class: ClassId, name: &str) -> Option<NativeMethod> {
        self.classes.get(&class)?.get(name)
    }
}

thread_local! {
    static METHODS: RefCell<MethodTable> = RefCell::new(MethodTable::with_builtins());
}

/// Define (or redefine) a native method on `class` for the current thread.
pub fn define_method(class: ClassId, name: &str, method: NativeMethod) {
    tracing::debug!(%class, name, "define_method");
    METHODS.with(|table| table.borrow_mut().define(class, name, method));
}

/// Capability query: does `receiver` have a method called `name`?
pub fn respond_to(receiver: &Value, name: &str) -> bool {
    METHODS.with(|table| table.borrow().lookup(receiver.class(), name).is_some())
}

/// Invoke `receiver.name(*args)` with an optional block.
pub fn send(
    receiver: &Value,
    name: &str,
    args: &[Value],
    block: Option<Block<'_>>,
) -> Result<Value, RuntimeError> {
    let class = receiver.class();
    // Copy the method out so the table is not borrowed while it runs.
    let method = METHODS.with(|table| table.borrow().lookup(class, name));
    let Some(method) = method else {
        return Err(RuntimeError::NoMethod {
            method: name.to_string(),
            class: class.to_string(),
        });
    };
    tracing::trace!(%class, name, argc = args.len(), block = block.is_some(), "send");
    method(receiver, args, block)
}
