pub mod collect;
pub mod config;
pub mod decorate;
pub mod error;
pub mod names;
pub mod parse;
pub mod registry;
pub mod resolve;

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for code generators that consume a decorated context.
pub trait CodeGenerator {
    fn generate(
        &self,
        context: &decorate::Context,
        config: &config::GogenConfig,
    ) -> Result<Vec<GeneratedFile>, error::GenerateError>;
}
