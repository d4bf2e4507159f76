use gogen_core::config::GogenConfig;
use gogen_core::decorate::Context;
use gogen_core::error::GenerateError;
use gogen_core::{CodeGenerator, GeneratedFile};

use crate::emitters;

/// Go model generator: one `generated.go` per decorated context.
pub struct GoModelGenerator;

impl CodeGenerator for GoModelGenerator {
    fn generate(
        &self,
        context: &Context,
        config: &GogenConfig,
    ) -> Result<Vec<GeneratedFile>, GenerateError> {
        let content = emitters::models::emit_models(context, config)?;
        Ok(vec![GeneratedFile {
            path: config.output.clone(),
            content,
        }])
    }
}
