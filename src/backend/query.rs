//! Typed backend queries
//!
//! A [`Query`] is the statically-typed form of the backend's generic query
//! interface: equality and prefix filters, OR-combination, a result limit and
//! a field projection. It serializes to the REST `where` parameter and can
//! also be evaluated locally against a JSON object.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Equal { field: String, value: Value },
    StartsWith { field: String, prefix: String },
    /// Matches when every filter of at least one branch matches.
    Or(Vec<Vec<Filter>>),
}

impl Filter {
    pub fn equal(field: &str, value: impl Into<Value>) -> Self {
        Filter::Equal {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn starts_with(field: &str, prefix: &str) -> Self {
        Filter::StartsWith {
            field: field.to_string(),
            prefix: prefix.to_string(),
        }
    }

    fn matches(&self, object: &Value) -> bool {
        match self {
            Filter::Equal { field, value } => object.get(field) == Some(value),
            Filter::StartsWith { field, prefix } => object
                .get(field)
                .and_then(Value::as_str)
                .is_some_and(|s| s.starts_with(prefix.as_str())),
            Filter::Or(branches) => branches
                .iter()
                .any(|branch| branch.iter().all(|f| f.matches(object))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub class_name: String,
    pub filters: Vec<Filter>,
    pub limit: Option<usize>,
    pub keys: Vec<String>,
}

impl Query {
    pub fn new(class_name: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            filters: Vec::new(),
            limit: None,
            keys: Vec::new(),
        }
    }

    pub fn equal_to(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::equal(field, value));
        self
    }

    pub fn starts_with(mut self, field: &str, prefix: &str) -> Self {
        self.filters.push(Filter::starts_with(field, prefix));
        self
    }

    pub fn any_of(mut self, branches: Vec<Vec<Filter>>) -> Self {
        self.filters.push(Filter::Or(branches));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn select(mut self, keys: &[&str]) -> Self {
        self.keys = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    /// The `where` constraint object.
    pub fn where_clause(&self) -> Value {
        where_for(&self.filters)
    }

    /// URL query parameters for a REST `find`.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if !self.filters.is_empty() {
            params.push(("where", self.where_clause().to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if !self.keys.is_empty() {
            params.push(("keys", self.keys.join(",")));
        }
        params
    }

    pub fn matches(&self, object: &Value) -> bool {
        self.filters.iter().all(|f| f.matches(object))
    }

    /// Copy of `object` restricted to `objectId` and the selected keys.
    pub fn project(&self, object: &Value) -> Value {
        if self.keys.is_empty() {
            return object.clone();
        }
        let mut projected = Map::new();
        if let Some(map) = object.as_object() {
            for (key, value) in map {
                if key == "objectId" || self.keys.iter().any(|k| k == key) {
                    projected.insert(key.clone(), value.clone());
                }
            }
        }
        Value::Object(projected)
    }

    /// Evaluate the query against a collection: filter, limit, project.
    pub fn apply<'a>(&self, objects: impl IntoIterator<Item = &'a Value>) -> Vec<Value> {
        objects
            .into_iter()
            .filter(|o| self.matches(o))
            .take(self.limit.unwrap_or(usize::MAX))
            .map(|o| self.project(o))
            .collect()
    }
}

fn where_for(filters: &[Filter]) -> Value {
    let mut constraints = Map::new();
    let mut or_groups: Vec<Value> = Vec::new();

    for filter in filters {
        match filter {
            Filter::Equal { field, value } => {
                constraints.insert(field.clone(), value.clone());
            }
            Filter::StartsWith { field, prefix } => {
                let regex = Value::String(anchored_prefix(prefix));
                match constraints.get_mut(field) {
                    Some(Value::Object(ops)) => {
                        ops.insert("$regex".to_string(), regex);
                    }
                    _ => {
                        let mut ops = Map::new();
                        ops.insert("$regex".to_string(), regex);
                        constraints.insert(field.clone(), Value::Object(ops));
                    }
                }
            }
            Filter::Or(branches) => {
                or_groups.push(Value::Array(branches.iter().map(|b| where_for(b)).collect()));
            }
        }
    }

    let mut or_groups = or_groups.into_iter();
    if let Some(first) = or_groups.next() {
        constraints.insert("$or".to_string(), first);
    }
    let rest: Vec<Value> = or_groups
        .map(|group| {
            let mut wrapper = Map::new();
            wrapper.insert("$or".to_string(), group);
            Value::Object(wrapper)
        })
        .collect();
    if !rest.is_empty() {
        constraints.insert("$and".to_string(), Value::Array(rest));
    }

    Value::Object(constraints)
}

/// `^` plus the prefix quoted as a literal (`\Q...\E`), the backend's
/// encoding of a `startsWith` constraint.
fn anchored_prefix(prefix: &str) -> String {
    format!("^\\Q{}\\E", prefix.replace("\\E", "\\E\\\\E\\Q"))
}

/// Lookup of autocomplete candidates for a normalized (lowercased) query.
///
/// Names are stored with their natural capitalization, so both the
/// lowercase and the capitalized prefix are searched.
pub fn suggestion_query(class_name: &str, field: &str, normalized: &str, limit: usize) -> Query {
    let capitalized = capitalize(normalized);
    let mut branches = vec![vec![Filter::starts_with(field, normalized)]];
    if capitalized != normalized {
        branches.push(vec![Filter::starts_with(field, &capitalized)]);
    }

    Query::new(class_name)
        .any_of(branches)
        .limit(limit)
        .select(&[field])
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod query_tests;
