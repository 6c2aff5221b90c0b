//! Declarative input schemas.
//!
//! A [`SchemaNode`] describes the JSON shapes an operation accepts. The same
//! node is rendered to JSON Schema for discovery (`to_json`) and walked to
//! validate incoming arguments (`check`), so what callers are told and what
//! the dispatcher enforces cannot drift apart.

use std::fmt;

use regex::Regex;
use serde_json::{Map, Value, json};

/// JSON value types a schema node can admit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Object,
    String,
    Number,
    Boolean,
    Array,
    Null,
}

impl SchemaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Null => "null",
        }
    }

    /// The type of an arbitrary JSON value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Self::Object,
            Value::String(_) => Self::String,
            Value::Number(_) => Self::Number,
            Value::Bool(_) => Self::Boolean,
            Value::Array(_) => Self::Array,
            Value::Null => Self::Null,
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A compiled `pattern` constraint that remembers its source text.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: &'static str,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern literal.
    ///
    /// Schema patterns are compile-time constants, so an invalid one is a
    /// programming error rather than a runtime condition.
    pub fn new(source: &'static str) -> Self {
        let regex = Regex::new(source)
            .unwrap_or_else(|e| panic!("invalid schema pattern {source:?}: {e}"));
        Self { source, regex }
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

/// One offending field found while validating arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path of the field, e.g. `customProperties.estimate` or `tags[2]`.
    pub field: String,
    pub reason: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Recursive description of an accepted JSON shape.
#[derive(Debug, Clone, Default)]
pub struct SchemaNode {
    types: Vec<SchemaType>,
    one_of: Vec<SchemaNode>,
    title: Option<&'static str>,
    description: Option<&'static str>,
    properties: Option<Vec<(&'static str, SchemaNode)>>,
    required: Vec<&'static str>,
    items: Option<Box<SchemaNode>>,
    additional_properties: Option<Box<SchemaNode>>,
    pattern: Option<Pattern>,
    enum_values: Vec<&'static str>,
    identifier: bool,
}

impl SchemaNode {
    /// A node admitting any of the given types.
    pub fn of(types: &[SchemaType]) -> Self {
        Self {
            types: types.to_vec(),
            ..Self::default()
        }
    }

    pub fn string() -> Self {
        Self::of(&[SchemaType::String])
    }

    pub fn number() -> Self {
        Self::of(&[SchemaType::Number])
    }

    pub fn boolean() -> Self {
        Self::of(&[SchemaType::Boolean])
    }

    pub fn array(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(&[SchemaType::Array])
        }
    }

    /// A free-form object (no declared property list).
    pub fn object() -> Self {
        Self::of(&[SchemaType::Object])
    }

    /// An operation input: an object with an explicit, possibly empty,
    /// property list and required list.
    pub fn input() -> Self {
        Self {
            properties: Some(Vec::new()),
            ..Self::object()
        }
    }

    /// A union: values must match at least one variant.
    pub fn one_of(variants: Vec<SchemaNode>) -> Self {
        Self {
            one_of: variants,
            ..Self::default()
        }
    }

    /// Also admit `null`.
    pub fn nullable(mut self) -> Self {
        if !self.types.contains(&SchemaType::Null) {
            self.types.push(SchemaType::Null);
        }
        self
    }

    pub fn title(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn pattern(mut self, source: &'static str) -> Self {
        self.pattern = Some(Pattern::new(source));
        self
    }

    pub fn enumerated(mut self, values: &[&'static str]) -> Self {
        self.enum_values = values.to_vec();
        self
    }

    pub fn property(mut self, name: &'static str, node: SchemaNode) -> Self {
        self.properties.get_or_insert_with(Vec::new).push((name, node));
        self
    }

    pub fn require(mut self, name: &'static str) -> Self {
        self.required.push(name);
        self
    }

    pub fn additional(mut self, node: SchemaNode) -> Self {
        self.additional_properties = Some(Box::new(node));
        self
    }

    /// Mark the value as a resource identifier. Not rendered on the wire.
    pub fn identifier(mut self) -> Self {
        self.identifier = true;
        self
    }

    pub fn types(&self) -> &[SchemaType] {
        &self.types
    }

    pub fn title_text(&self) -> Option<&'static str> {
        self.title
    }

    pub fn is_identifier(&self) -> bool {
        self.identifier
    }

    /// Declared properties in declaration order (empty when none).
    pub fn properties(&self) -> &[(&'static str, SchemaNode)] {
        self.properties.as_deref().unwrap_or(&[])
    }

    pub fn property_node(&self, name: &str) -> Option<&SchemaNode> {
        self.properties()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, node)| node)
    }

    pub fn required_fields(&self) -> &[&'static str] {
        &self.required
    }

    /// Names of top-level properties flagged as identifiers.
    pub fn identifier_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties()
            .iter()
            .filter(|(_, node)| node.identifier)
            .map(|(name, _)| *name)
    }

    /// Render as JSON Schema.
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();

        if let Some(title) = self.title {
            out.insert("title".into(), json!(title));
        }
        match self.types.as_slice() {
            [] => {}
            [single] => {
                out.insert("type".into(), json!(single.as_str()));
            }
            many => {
                let names: Vec<&str> = many.iter().map(|t| t.as_str()).collect();
                out.insert("type".into(), json!(names));
            }
        }
        if let Some(items) = &self.items {
            out.insert("items".into(), items.to_json());
        }
        if !self.enum_values.is_empty() {
            out.insert("enum".into(), json!(self.enum_values));
        }
        if let Some(pattern) = &self.pattern {
            out.insert("pattern".into(), json!(pattern.source()));
        }
        if let Some(description) = self.description {
            out.insert("description".into(), json!(description));
        }
        if let Some(properties) = &self.properties {
            let rendered: Map<String, Value> = properties
                .iter()
                .map(|(name, node)| ((*name).to_string(), node.to_json()))
                .collect();
            out.insert("properties".into(), Value::Object(rendered));
            out.insert("required".into(), json!(self.required));
        }
        if let Some(additional) = &self.additional_properties {
            out.insert("additionalProperties".into(), additional.to_json());
        }
        if !self.one_of.is_empty() {
            let variants: Vec<Value> = self.one_of.iter().map(SchemaNode::to_json).collect();
            out.insert("oneOf".into(), Value::Array(variants));
        }

        Value::Object(out)
    }

    /// True if `value` satisfies this node.
    pub fn accepts(&self, value: &Value) -> bool {
        let mut errors = Vec::new();
        self.check("", value, &mut errors);
        errors.is_empty()
    }

    /// Validate `value`, appending every problem found to `errors`.
    ///
    /// `path` is the location of `value` within the argument bag; the root
    /// is the empty string.
    pub fn check(&self, path: &str, value: &Value, errors: &mut Vec<FieldError>) {
        let field = || {
            if path.is_empty() {
                "(arguments)".to_string()
            } else {
                path.to_string()
            }
        };

        if !self.types.is_empty() && !self.types.contains(&SchemaType::of(value)) {
            let expected: Vec<&str> = self.types.iter().map(|t| t.as_str()).collect();
            errors.push(FieldError {
                field: field(),
                reason: format!("expected {}, got {}", expected.join(" | "), SchemaType::of(value)),
            });
            return;
        }

        if !self.one_of.is_empty() && !self.one_of.iter().any(|v| v.accepts(value)) {
            let titles: Vec<&str> = self.one_of.iter().filter_map(|v| v.title).collect();
            errors.push(FieldError {
                field: field(),
                reason: format!("does not match any of: {}", titles.join(", ")),
            });
            return;
        }

        match value {
            Value::String(s) => {
                if let Some(pattern) = &self.pattern
                    && !pattern.is_match(s)
                {
                    errors.push(FieldError {
                        field: field(),
                        reason: format!("must match pattern {}", pattern.source()),
                    });
                }
                if !self.enum_values.is_empty() && !self.enum_values.contains(&s.as_str()) {
                    errors.push(FieldError {
                        field: field(),
                        reason: format!("must be one of: {}", self.enum_values.join(", ")),
                    });
                }
            }
            Value::Array(elements) => {
                if let Some(items) = &self.items {
                    for (i, element) in elements.iter().enumerate() {
                        items.check(&format!("{path}[{i}]"), element, errors);
                    }
                }
            }
            Value::Object(map) => self.check_object(path, map, errors),
            _ => {}
        }
    }

    /// Validate a call's argument bag against an operation input node.
    pub fn check_arguments(&self, args: &Map<String, Value>) -> Vec<FieldError> {
        let mut errors = Vec::new();
        self.check_object("", args, &mut errors);
        errors
    }

    fn check_object(&self, path: &str, map: &Map<String, Value>, errors: &mut Vec<FieldError>) {
        let child = |name: &str| {
            if path.is_empty() {
                name.to_string()
            } else {
                format!("{path}.{name}")
            }
        };

        let mut missing = Vec::new();
        for name in &self.required {
            if map.get(*name).is_none_or(Value::is_null) {
                errors.push(FieldError {
                    field: child(name),
                    reason: "is required".to_string(),
                });
                missing.push(*name);
            }
        }

        for (name, value) in map {
            if missing.contains(&name.as_str()) {
                continue;
            }
            match self.property_node(name) {
                Some(node) => node.check(&child(name), value, errors),
                None => {
                    if let Some(additional) = &self.additional_properties {
                        additional.check(&child(name), value, errors);
                    }
                }
            }
        }
    }
}
