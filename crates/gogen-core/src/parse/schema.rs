use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The `required` keyword: a boolean on parameter-like nodes, a list of
/// property names on object schemas. The loader pushes object-level lists
/// down onto each property as a flag before decoration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Required {
    Flag(bool),
    Names(Vec<String>),
}

/// `additionalProperties` is either a toggle or a value schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Flag(bool),
    Schema(Box<Schema>),
}

/// A raw schema node from the specification. Immutable once loaded; the
/// resolver and decoration passes never mutate it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,

    /// Non-standard override for `type`; also admits values like `any`.
    #[serde(rename = "x-type", skip_serializing_if = "Option::is_none")]
    pub x_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Synonym format consulted after the primary format lookup.
    #[serde(rename = "x-format", skip_serializing_if = "Option::is_none")]
    pub x_format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub ref_path: Option<String>,

    /// Response-style wrapper: `{ schema: { $ref: ... } }`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Box<Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Required>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<serde_json::Value>,

    /// Explicit name override for a synthesized enum type.
    #[serde(rename = "x-enum-name", skip_serializing_if = "Option::is_none")]
    pub x_enum_name: Option<String>,

    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<serde_json::Value>,

    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(rename = "uniqueItems", default, skip_serializing_if = "is_false")]
    pub unique_items: bool,

    #[serde(rename = "allOf", default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,

    /// Extension-rule identifiers consumed by the validation tag bucket.
    #[serde(rename = "x-validate", default, skip_serializing_if = "Vec::is_empty")]
    pub x_validate: Vec<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Schema {
    /// The effective type keyword, with `x-type` taking precedence.
    pub fn effective_type(&self) -> Option<&str> {
        self.x_type.as_deref().or(self.schema_type.as_deref())
    }

    /// The per-field required flag, if the loader pushed one down.
    pub fn required_flag(&self) -> Option<bool> {
        match self.required {
            Some(Required::Flag(flag)) => Some(flag),
            _ => None,
        }
    }

    /// Object-level required property names.
    pub fn required_names(&self) -> &[String] {
        match &self.required {
            Some(Required::Names(names)) => names,
            _ => &[],
        }
    }

    /// Reference target, unwrapping a response-style `schema` wrapper.
    pub fn ref_target(&self) -> Option<&str> {
        self.ref_path
            .as_deref()
            .or_else(|| self.schema.as_ref().and_then(|s| s.ref_path.as_deref()))
    }
}

/// Push object-level `required` name lists down onto each property node as
/// a boolean flag, recursively. Runs once at load time so decoration sees
/// a uniform per-field flag.
pub fn push_down_required(schema: &mut Schema) {
    let names: Vec<String> = schema.required_names().to_vec();
    for (name, prop) in schema.properties.iter_mut() {
        if prop.required.is_none() {
            prop.required = Some(Required::Flag(names.contains(name)));
        }
        push_down_required(prop);
    }
    if let Some(items) = schema.items.as_mut() {
        push_down_required(items);
    }
    if let Some(AdditionalProperties::Schema(value)) = schema.additional_properties.as_mut() {
        push_down_required(value);
    }
    if let Some(inner) = schema.schema.as_mut() {
        push_down_required(inner);
    }
    for part in schema.all_of.iter_mut() {
        push_down_required(part);
    }
}
