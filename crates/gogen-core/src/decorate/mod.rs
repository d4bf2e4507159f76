pub mod model;
pub mod resource;
pub mod types;

use indexmap::IndexMap;

use crate::collect::ImportList;
use crate::config::GogenConfig;
use crate::error::PipelineError;
use crate::names;
use crate::parse::schema::{AdditionalProperties, Schema};
use crate::parse::spec::ApiSpec;
use crate::registry::EnumRegistry;
use crate::resolve::GoResolver;

pub use types::{
    Context, DecoratedModel, DecoratedOperation, DecoratedParameter, DecoratedProperty,
    DecoratedResource, ModelReference,
};

/// Run the decoration pipeline over one or more parsed specs, producing a
/// fully decorated [`Context`] for the template layer.
///
/// Stage order is fixed: Context prepare, then models (properties before
/// each model's finalize), then resources (operations and parameters after
/// their owning resource), then Context finalize. Running twice over the
/// same specs yields identical output.
pub fn run(
    specs: &[ApiSpec],
    config: &GogenConfig,
    resolver: &GoResolver,
) -> Result<Context, PipelineError> {
    // Context prepare: fresh per-run state
    let mut enums = EnumRegistry::new();

    // Reference targets are resolvable across all loaded documents
    let mut definitions: IndexMap<&str, &Schema> = IndexMap::new();
    for spec in specs {
        for (name, schema) in &spec.definitions {
            definitions.insert(name.as_str(), schema);
        }
    }

    let mut models = Vec::new();
    for spec in specs {
        for (name, schema) in &spec.definitions {
            models.push(model::decorate_model(
                name,
                schema,
                &definitions,
                config,
                resolver,
                &mut enums,
            )?);
        }
    }

    let mut resources = Vec::new();
    for spec in specs {
        resources.extend(resource::decorate_resources(
            spec,
            &definitions,
            config,
            resolver,
            &mut enums,
        )?);
    }

    // Context finalize
    models.sort_by(|a, b| a.name.cmp(&b.name));
    let mut imports = ImportList::new();
    for model in &models {
        imports.merge(&model.imports);
    }

    Ok(Context {
        package: config.packages.model.clone(),
        imports: imports.sorted(),
        models,
        resources,
        enums: enums.into_sorted(),
    })
}

/// Decorate a single spec.
pub fn run_single(
    spec: &ApiSpec,
    config: &GogenConfig,
    resolver: &GoResolver,
) -> Result<Context, PipelineError> {
    run(std::slice::from_ref(spec), config, resolver)
}

/// Verify that every local `$ref` beneath a schema names a known
/// definition. External-document references are the loader's concern and
/// pass through unchecked.
pub(crate) fn check_refs(
    schema: &Schema,
    definitions: &IndexMap<&str, &Schema>,
    owner: &str,
) -> Result<(), PipelineError> {
    if let Some(ref_path) = &schema.ref_path
        && ref_path.starts_with("#/")
        && !definitions.contains_key(names::extract_model_name(ref_path))
    {
        return Err(PipelineError::UnresolvedRef(format!("{owner}: {ref_path}")));
    }
    if let Some(inner) = &schema.schema {
        check_refs(inner, definitions, owner)?;
    }
    if let Some(items) = &schema.items {
        check_refs(items, definitions, owner)?;
    }
    if let Some(AdditionalProperties::Schema(value)) = &schema.additional_properties {
        check_refs(value, definitions, owner)?;
    }
    for (_, prop) in &schema.properties {
        check_refs(prop, definitions, owner)?;
    }
    for part in &schema.all_of {
        check_refs(part, definitions, owner)?;
    }
    Ok(())
}
