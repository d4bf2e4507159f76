use serde::Serialize;

use crate::collect::{ImportList, TagSet};
use crate::registry::EnumDef;

/// The fully decorated output of one generation run, handed to the
/// template layer and then discarded.
#[derive(Debug, Clone, Serialize)]
pub struct Context {
    /// Owning import path for generated model types.
    pub package: String,
    /// Union of every model's imports, sorted.
    pub imports: Vec<String>,
    /// Decorated models, sorted by name.
    pub models: Vec<DecoratedModel>,
    /// Decorated resources, in traversal order.
    pub resources: Vec<DecoratedResource>,
    /// Synthesized enums, sorted by canonical name.
    pub enums: Vec<EnumDef>,
}

/// A reference from one model to another (an `allOf` parent).
#[derive(Debug, Clone, Serialize)]
pub struct ModelReference {
    pub name: String,
    /// Owning package when the target lives outside the model package.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
}

/// A model enriched with resolver output.
#[derive(Debug, Clone, Serialize)]
pub struct DecoratedModel {
    pub name: String,
    pub struct_name: String,
    pub package: String,
    pub display_name: String,
    pub singular_var: String,
    pub plural_var: String,
    /// Snake-cased entity table name, with a trailing `_update` stripped.
    pub table_name: String,
    /// Set when the model is an update variant of another entity.
    pub update: bool,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<ModelReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub imports: ImportList,
    /// Own imports unioned with every property's imports, sorted.
    pub all_imports: Vec<String>,
    pub properties: Vec<DecoratedProperty>,
    pub max_var_name_len: usize,
    pub max_type_name_len: usize,
}

/// A property enriched with resolver output and struct tags.
#[derive(Debug, Clone, Serialize)]
pub struct DecoratedProperty {
    /// Wire name from the specification.
    pub name: String,
    pub var_name: String,
    pub data_type: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub imports: ImportList,
    pub tags: TagSet,
    /// Serialized tag buckets, frozen at finalize.
    pub tags_string: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// A resource (path/tag group) enriched with resolver output.
#[derive(Debug, Clone, Serialize)]
pub struct DecoratedResource {
    pub name: String,
    pub struct_name: String,
    pub package: String,
    /// Imports accumulated by operation and parameter resolution, sorted.
    pub imports: ImportList,
    pub operations: Vec<DecoratedOperation>,
}

/// An operation enriched with return-type resolution.
#[derive(Debug, Clone, Serialize)]
pub struct DecoratedOperation {
    pub method: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    pub method_name: String,
    pub global_method_name: String,
    pub return_type: String,
    pub return_type_external: String,
    pub has_return: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub parameters: Vec<DecoratedParameter>,
}

/// A parameter enriched with all four type variants.
#[derive(Debug, Clone, Serialize)]
pub struct DecoratedParameter {
    pub name: String,
    pub location: String,
    pub var_name: String,
    pub required: bool,
    pub data_type: String,
    pub data_type_external: String,
    /// Pointer-suppressed variants for composite positions.
    pub inline_type: String,
    pub inline_type_external: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
}
