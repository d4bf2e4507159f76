use indexmap::IndexMap;
use serde::Serialize;

use crate::names;

/// Bucket name for bare tag values emitted without a `key:"value"` wrapper.
pub const DEFAULT_BUCKET: &str = "_";

/// An ordered, deduplicated list of package import paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ImportList {
    items: Vec<String>,
}

impl ImportList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dedupe-append a package import path.
    pub fn add(&mut self, package: &str) {
        if package.is_empty() {
            return;
        }
        if !self.items.iter().any(|p| p == package) {
            self.items.push(package.to_string());
        }
    }

    /// Register the import implied by a resolved type string: strips a
    /// leading `*`, then treats the text before the first `.` as a package
    /// short name, mapped through `prefixes` when an entry exists.
    pub fn add_type_import(&mut self, type_name: &str, prefixes: &IndexMap<String, String>) {
        let bare = type_name.strip_prefix('*').unwrap_or(type_name);
        if let Some((package, _)) = bare.split_once('.') {
            let package = prefixes
                .get(package)
                .map(String::as_str)
                .unwrap_or(package);
            self.add(package);
        }
    }

    pub fn merge(&mut self, other: &ImportList) {
        for package in &other.items {
            self.add(package);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn sort(&mut self) {
        self.items.sort();
    }

    /// A lexicographically sorted copy, for deterministic emission.
    pub fn sorted(&self) -> Vec<String> {
        let mut out = self.items.clone();
        out.sort();
        out
    }
}

/// Ordered struct-tag buckets for one field. Bucket order is the order
/// buckets were first touched; values dedupe within a bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TagSet {
    buckets: IndexMap<String, Vec<String>>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dedupe-append a value under a named tag bucket.
    pub fn add(&mut self, tag: &str, value: &str) {
        if tag.is_empty() || value.is_empty() {
            return;
        }
        let bucket = self.buckets.entry(tag.to_string()).or_default();
        if !bucket.iter().any(|v| v == value) {
            bucket.push(value.to_string());
        }
    }

    /// Append a value to the default bucket, emitted raw.
    pub fn add_bare(&mut self, value: &str) {
        self.add(DEFAULT_BUCKET, value);
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Render the buckets as one Go struct-tag string. Values in the
    /// default bucket pass through unquoted.
    pub fn render(&self) -> String {
        let mut parts = Vec::new();
        for (tag, values) in &self.buckets {
            for value in values {
                if tag == DEFAULT_BUCKET {
                    parts.push(value.clone());
                } else {
                    parts.push(format!("{}:{}", tag, names::escape_go_string(value)));
                }
            }
        }
        parts.join(" ")
    }
}
