//! Conversion between value graphs and JSON.
//!
//! Functions have no JSON form: object properties holding one are skipped
//! and array elements holding one become `null`.

use super::value::{Array, Object, Value};
use crate::error::{EnvReadError, Result};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as Json};
use std::collections::HashSet;

impl Value {
    /// Render as JSON. Fails if the graph is cyclic.
    pub fn to_json(&self) -> Result<Json> {
        to_json(self, &mut HashSet::new(), "$")
    }

    /// Build a fresh, unfrozen graph from JSON.
    pub fn from_json(json: Json) -> Self {
        Value::from(json)
    }
}

impl Object {
    pub fn to_json(&self) -> Result<Json> {
        Value::Object(self.clone()).to_json()
    }
}

/// `ancestors` holds the nodes on the current path; seeing one again means a
/// cycle. Shared but acyclic nodes are rendered once per reference.
fn to_json(value: &Value, ancestors: &mut HashSet<usize>, path: &str) -> Result<Json> {
    let id = value.node_id();
    if let Some(id) = id {
        if !ancestors.insert(id) {
            return Err(EnvReadError::cyclic_value(path));
        }
    }

    let json = match value {
        Value::Null | Value::Function(_) => Ok(Json::Null),
        Value::Bool(b) => Ok(Json::Bool(*b)),
        Value::Number(n) => Ok(Json::Number(n.clone())),
        Value::String(s) => Ok(Json::String(s.clone())),
        Value::Array(arr) => array_to_json(arr, ancestors, path),
        Value::Object(obj) => object_to_json(obj, ancestors, path),
    };

    if let Some(id) = id {
        ancestors.remove(&id);
    }
    json
}

fn array_to_json(arr: &Array, ancestors: &mut HashSet<usize>, path: &str) -> Result<Json> {
    arr.to_vec()
        .iter()
        .enumerate()
        .map(|(i, item)| to_json(item, ancestors, &format!("{path}[{i}]")))
        .collect::<Result<Vec<_>>>()
        .map(Json::Array)
}

fn object_to_json(obj: &Object, ancestors: &mut HashSet<usize>, path: &str) -> Result<Json> {
    let mut map = Map::new();
    for (key, child) in obj.entries() {
        if matches!(child, Value::Function(_)) {
            continue;
        }
        let child_path = format!("{path}.{key}");
        map.insert(key, to_json(&child, ancestors, &child_path)?);
    }
    Ok(Json::Object(map))
}

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n),
            Json::String(s) => Value::String(s),
            Json::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            Json::Object(map) => Value::Object(map.into_iter().collect()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl Serialize for Object {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        Value::Object(self.clone()).serialize(serializer)
    }
}
