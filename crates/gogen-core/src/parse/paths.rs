use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::schema::{Required, Schema};

/// Operations available on a single path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,

    /// Parameters shared by every operation on the path.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
}

impl PathItem {
    /// All present operations with their method keywords, in a fixed order.
    pub fn operations(&self) -> Vec<(&'static str, &Operation)> {
        let mut out = Vec::new();
        for (method, op) in [
            ("get", &self.get),
            ("put", &self.put),
            ("post", &self.post),
            ("delete", &self.delete),
            ("patch", &self.patch),
            ("head", &self.head),
            ("options", &self.options),
        ] {
            if let Some(op) = op {
                out.push((method, op));
            }
        }
        out
    }
}

/// A single API operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    /// Resource-scoped method name override.
    #[serde(
        rename = "x-resource-operation",
        skip_serializing_if = "Option::is_none"
    )]
    pub x_resource_operation: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, Response>,
}

impl Operation {
    /// The lowest-numbered 2xx response, if any.
    pub fn success_response(&self) -> Option<&Response> {
        let mut best: Option<(u16, &Response)> = None;
        for (status, response) in &self.responses {
            let Ok(code) = status.parse::<u16>() else {
                continue;
            };
            if (200..300).contains(&code) && best.is_none_or(|(c, _)| code < c) {
                best = Some((code, response));
            }
        }
        best.map(|(_, response)| response)
    }
}

/// A Swagger 2.0 parameter. Parameters are schema-shaped, so the type
/// keywords flatten into an embedded `Schema`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(flatten)]
    pub schema: Schema,
}

impl Parameter {
    /// The parameter as a resolvable schema node, with its own `required`
    /// flag and name folded in.
    pub fn as_schema_node(&self) -> Schema {
        let mut node = self.schema.clone();
        if node.required.is_none() {
            node.required = self.required.map(Required::Flag);
        }
        if node.name.is_none() {
            node.name = Some(self.name.clone());
        }
        node
    }
}

/// A response declaration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}
