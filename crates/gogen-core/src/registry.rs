use indexmap::IndexMap;
use serde::Serialize;

/// A single member of a synthesized enum type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    pub name: String,
    pub value: String,
    pub value_escaped: String,
    /// 1-based, in declaration order.
    pub number: u32,
}

/// A named enum type synthesized from an inline string enum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDef {
    pub name: String,
    pub package: String,
    pub var_name: String,
    pub values: Vec<EnumValue>,
}

/// Outcome of an enum registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// First registration under this name.
    Inserted,
    /// Structurally identical to the stored definition.
    Matched,
    /// Structurally different; the stored definition is kept.
    Conflict,
}

/// Deduplicating store for enum definitions, keyed by canonical type name.
/// First registration wins; re-registrations are compared structurally.
#[derive(Debug, Default)]
pub struct EnumRegistry {
    entries: IndexMap<String, EnumDef>,
}

impl EnumRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, definition: EnumDef) -> RegisterOutcome {
        match self.entries.get(&definition.name) {
            Some(existing) if *existing == definition => RegisterOutcome::Matched,
            Some(_) => RegisterOutcome::Conflict,
            None => {
                self.entries.insert(definition.name.clone(), definition);
                RegisterOutcome::Inserted
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&EnumDef> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All definitions sorted by canonical name, for deterministic output.
    pub fn into_sorted(self) -> Vec<EnumDef> {
        let mut defs: Vec<EnumDef> = self.entries.into_values().collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }
}
