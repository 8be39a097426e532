//! Immutable configuration objects.
//!
//! A resolved configuration is built as a dynamic graph of [`Value`]s, then
//! frozen with [`make_clonable_and_deep_freeze`]. Variants (for tests, say)
//! are produced with [`Object::clone_and_refreeze_with`], which copies,
//! mutates and refreezes without touching the original.
//!
//! ```
//! use envread::object::{Object, make_clonable_and_deep_freeze};
//!
//! let config = Object::new()
//!     .with("user", "svc")
//!     .with("database", Object::new().with("port", 5432));
//! make_clonable_and_deep_freeze(&config);
//!
//! assert!(!config.set("user", "other"));
//!
//! let test_config = config
//!     .clone_and_refreeze_with(|c| {
//!         c.set("user", "test_user");
//!     })
//!     .unwrap();
//! assert_eq!(test_config.get("user").unwrap().as_str(), Some("test_user"));
//! assert_eq!(config.get("user").unwrap().as_str(), Some("svc"));
//! assert!(test_config.is_frozen());
//! ```

mod freeze;
mod json;
mod value;

pub use freeze::{
    deep_clone, deep_clone_value, deep_freeze, deep_freeze_value, make_clonable,
    make_clonable_and_deep_freeze,
};
pub use value::{Array, CLONE_AND_REFREEZE, Function, Object, Value};
