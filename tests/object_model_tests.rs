//! Integration tests for freezing, cloning and the clone-and-refreeze hook.

use envread::object::{
    Array, CLONE_AND_REFREEZE, Function, Object, Value, deep_clone, deep_freeze, make_clonable,
    make_clonable_and_deep_freeze,
};

fn sample() -> Object {
    Object::new()
        .with("test", "wibble")
        .with("child", Object::new().with("cheese", "cheddar").with("count", 3))
        .with("list", Array::from_iter(["a", "b"]))
}

fn child(obj: &Object) -> Object {
    obj.get("child").and_then(|v| v.as_object().cloned()).unwrap()
}

mod deep_freeze_tests {
    use super::*;

    #[test]
    fn freezes_every_reachable_node() {
        let obj = sample();
        deep_freeze(&obj);

        assert!(obj.is_frozen());
        assert!(child(&obj).is_frozen());
        assert!(obj.get("list").unwrap().is_frozen());
    }

    #[test]
    fn mutations_are_ignored() {
        let obj = sample();
        deep_freeze(&obj);

        assert!(!obj.set("test", "changed"));
        assert!(!obj.set("new_key", 1));
        assert_eq!(obj.remove("test"), None);
        assert!(!child(&obj).set("cheese", "brie"));

        let list = obj.get("list").unwrap();
        let list = list.as_array().unwrap();
        assert!(!list.push("c"));
        assert!(!list.set(0, "z"));

        assert_eq!(obj.get("test").unwrap().as_str(), Some("wibble"));
        assert!(!obj.contains_key("new_key"));
        assert_eq!(child(&obj).get("cheese").unwrap().as_str(), Some("cheddar"));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn handles_cycles() {
        let obj = Object::new().with("name", "loop");
        obj.set("self", obj.clone());

        deep_freeze(&obj);

        assert!(obj.is_frozen());
        assert!(obj.to_json().is_err());
    }

    #[test]
    fn functions_stay_callable() {
        let obj = Object::new().with("double", Function::new(|args| match args.first() {
            Some(v) => Value::from(v.as_i64().unwrap_or(0) * 2),
            None => Value::Null,
        }));
        deep_freeze(&obj);

        let f = obj.get("double").unwrap();
        let f = f.as_function().unwrap();
        assert!(f.is_frozen());
        assert_eq!(f.call(&[Value::from(21)]).as_i64(), Some(42));
    }
}

mod deep_clone_tests {
    use super::*;

    #[test]
    fn copy_is_unfrozen_and_independent() {
        let obj = sample();
        deep_freeze(&obj);

        let copy = deep_clone(&obj);

        assert!(!copy.is_frozen());
        assert!(!copy.ptr_eq(&obj));
        assert!(copy.set("test", "changed"));
        assert!(child(&copy).set("cheese", "brie"));

        assert_eq!(obj.get("test").unwrap().as_str(), Some("wibble"));
        assert_eq!(child(&obj).get("cheese").unwrap().as_str(), Some("cheddar"));
    }

    #[test]
    fn preserves_shared_references() {
        let shared = Object::new().with("v", 1);
        let obj = Object::new()
            .with("left", shared.clone())
            .with("right", shared);

        let copy = deep_clone(&obj);

        let left = copy.get("left").unwrap().as_object().cloned().unwrap();
        let right = copy.get("right").unwrap().as_object().cloned().unwrap();
        assert!(left.ptr_eq(&right));
        assert!(!left.ptr_eq(&obj.get("left").unwrap().as_object().cloned().unwrap()));
    }

    #[test]
    fn shares_functions_by_reference() {
        let f = Function::new(|_| Value::from("called"));
        let obj = Object::new()
            .with("f", f.clone())
            .with("nested", Object::new().with("g", f.clone()));

        let copy = deep_clone(&obj);

        let copied_f = copy.get("f").unwrap();
        assert!(copied_f.as_function().unwrap().ptr_eq(&f));

        let nested = copy.get("nested").unwrap().as_object().cloned().unwrap();
        assert!(!nested.ptr_eq(&obj.get("nested").unwrap().as_object().cloned().unwrap()));
        assert!(nested.get("g").unwrap().as_function().unwrap().ptr_eq(&f));
        assert_eq!(copied_f.as_function().unwrap().call(&[]).as_str(), Some("called"));
    }

    #[test]
    fn reproduces_cycles() {
        let obj = Object::new();
        obj.set("self", obj.clone());

        let copy = deep_clone(&obj);

        let inner = copy.get("self").unwrap().as_object().cloned().unwrap();
        assert!(inner.ptr_eq(&copy));
        assert!(!inner.ptr_eq(&obj));
    }
}

mod clone_and_refreeze_tests {
    use super::*;

    #[test]
    fn make_clonable_attaches_hook() {
        let obj = sample();
        assert!(!obj.is_clonable());

        assert!(make_clonable(&obj));

        assert!(obj.is_clonable());
        assert!(obj.get(CLONE_AND_REFREEZE).unwrap().as_function().is_some());
    }

    #[test]
    fn make_clonable_on_frozen_object_fails() {
        let obj = sample();
        deep_freeze(&obj);

        assert!(!make_clonable(&obj));
        assert!(!obj.is_clonable());
    }

    #[test]
    fn refrozen_copy_carries_changes() {
        let obj = sample();
        make_clonable_and_deep_freeze(&obj);

        let copy = obj
            .clone_and_refreeze_with(|c| {
                c.set("test", "wobble");
                child(c).set("cheese", "stilton");
            })
            .unwrap();

        assert!(copy.is_frozen());
        assert!(copy.is_clonable());
        assert_eq!(copy.get("test").unwrap().as_str(), Some("wobble"));
        assert_eq!(child(&copy).get("cheese").unwrap().as_str(), Some("stilton"));
        assert!(child(&copy).is_frozen());

        assert_eq!(obj.get("test").unwrap().as_str(), Some("wibble"));
        assert_eq!(child(&obj).get("cheese").unwrap().as_str(), Some("cheddar"));
    }

    #[test]
    fn copies_can_be_cloned_again() {
        let obj = sample();
        make_clonable_and_deep_freeze(&obj);

        let first = obj
            .clone_and_refreeze_with(|c| {
                c.set("test", "one");
            })
            .unwrap();
        let second = first
            .clone_and_refreeze_with(|c| {
                c.set("extra", true);
            })
            .unwrap();

        assert_eq!(second.get("test").unwrap().as_str(), Some("one"));
        assert_eq!(second.get("extra").unwrap().as_bool(), Some(true));
        assert!(!first.contains_key("extra"));
    }

    #[test]
    fn without_changes_copy_matches_source() {
        let obj = sample();
        make_clonable_and_deep_freeze(&obj);

        let copy = obj.clone_and_refreeze().unwrap();

        assert!(!copy.ptr_eq(&obj));
        assert_eq!(copy.to_json().unwrap(), obj.to_json().unwrap());
    }

    #[test]
    fn hook_callable_as_function() {
        let obj = sample();
        make_clonable_and_deep_freeze(&obj);

        let hook = obj.get(CLONE_AND_REFREEZE).unwrap();
        let hook = hook.as_function().unwrap();
        let changes = Function::new(|args| {
            if let Some(copy) = args.first().and_then(Value::as_object) {
                child(copy).set("cheese", "gouda");
            }
            Value::Null
        });

        let copy = hook.call(&[Value::Function(changes)]);
        let copy = copy.as_object().unwrap();

        assert!(copy.is_frozen());
        assert_eq!(child(copy).get("cheese").unwrap().as_str(), Some("gouda"));
        assert_eq!(child(&obj).get("cheese").unwrap().as_str(), Some("cheddar"));
    }

    #[test]
    fn unclonable_object_yields_none() {
        let obj = sample();
        deep_freeze(&obj);
        assert!(obj.clone_and_refreeze().is_none());
    }
}
