use indexmap::IndexMap;

use crate::collect::ImportList;
use crate::config::GogenConfig;
use crate::error::PipelineError;
use crate::names;
use crate::parse::paths::{Operation, Parameter};
use crate::parse::schema::Schema;
use crate::parse::spec::ApiSpec;
use crate::registry::EnumRegistry;
use crate::resolve::{GoResolver, ResolveCx, VOID_TYPE};

use super::check_refs;
use super::types::{DecoratedOperation, DecoratedParameter, DecoratedResource};

/// Group a spec's operations into resources and decorate each group.
/// Operations and parameters decorate after their owning resource so
/// return-type resolution accumulates into the resource's import list.
pub fn decorate_resources(
    spec: &ApiSpec,
    definitions: &IndexMap<&str, &Schema>,
    config: &GogenConfig,
    resolver: &GoResolver,
    enums: &mut EnumRegistry,
) -> Result<Vec<DecoratedResource>, PipelineError> {
    // Group operations by tag, falling back to the leading path segment
    let mut groups: IndexMap<String, Vec<(&'static str, &str, &Operation, &[Parameter])>> =
        IndexMap::new();
    for (path, item) in &spec.paths {
        for (method, op) in item.operations() {
            let group = resource_name(op, path);
            groups
                .entry(group)
                .or_default()
                .push((method, path.as_str(), op, item.parameters.as_slice()));
        }
    }

    let mut resources = Vec::new();
    for (name, ops) in groups {
        // Resource decorate
        let struct_name = names::capitalize(&name);
        let package = config.packages.resource.clone();
        let mut imports = ImportList::new();

        let mut operations = Vec::new();
        for (method, path, op, path_params) in ops {
            operations.push(decorate_operation(
                method,
                path,
                op,
                path_params,
                definitions,
                resolver,
                &mut imports,
                enums,
            )?);
        }

        // Resource finalize
        imports.sort();
        resources.push(DecoratedResource {
            name,
            struct_name,
            package,
            imports,
            operations,
        });
    }
    Ok(resources)
}

fn resource_name(op: &Operation, path: &str) -> String {
    if let Some(tag) = op.tags.first() {
        return tag.clone();
    }
    path.split('/')
        .find(|segment| !segment.is_empty() && !segment.starts_with('{'))
        .unwrap_or("default")
        .to_string()
}

#[allow(clippy::too_many_arguments)]
fn decorate_operation(
    method: &str,
    path: &str,
    op: &Operation,
    path_params: &[Parameter],
    definitions: &IndexMap<&str, &Schema>,
    resolver: &GoResolver,
    imports: &mut ImportList,
    enums: &mut EnumRegistry,
) -> Result<DecoratedOperation, PipelineError> {
    let owner = format!("{} {}", method.to_uppercase(), path);

    let ok_response = op.success_response();
    let ok_schema = ok_response.and_then(|response| response.schema.as_ref());
    if let Some(schema) = ok_schema {
        check_refs(schema, definitions, &owner)?;
    }

    let return_type = resolve_return(resolver, ok_schema, imports, enums, false);
    let return_type_external = resolve_return(resolver, ok_schema, imports, enums, true);
    let has_return = return_type != VOID_TYPE;
    let return_description = if has_return {
        ok_response.and_then(|response| response.description.clone())
    } else {
        None
    };

    let global_name = op
        .operation_id
        .clone()
        .unwrap_or_else(|| format!("{method} {path}"));
    let local_name = op.x_resource_operation.clone().unwrap_or_else(|| global_name.clone());

    let mut parameters = Vec::new();
    for param in path_params.iter().chain(&op.parameters) {
        check_refs(&param.schema, definitions, &owner)?;
        parameters.push(decorate_parameter(param, resolver, imports, enums));
    }

    Ok(DecoratedOperation {
        method: method.to_uppercase(),
        path: path.to_string(),
        operation_id: op.operation_id.clone(),
        method_name: names::method_name(&local_name),
        global_method_name: names::method_name(&global_name),
        return_type,
        return_type_external,
        has_return,
        return_description,
        summary: op.summary.clone(),
        parameters,
    })
}

fn resolve_return(
    resolver: &GoResolver,
    schema: Option<&Schema>,
    imports: &mut ImportList,
    enums: &mut EnumRegistry,
    external: bool,
) -> String {
    let mut cx = ResolveCx {
        property_name: None,
        enums,
    };
    resolver
        .resolve(schema, imports, &mut cx, external, false)
        .unwrap_or_else(|| VOID_TYPE.to_string())
}

fn decorate_parameter(
    param: &Parameter,
    resolver: &GoResolver,
    imports: &mut ImportList,
    enums: &mut EnumRegistry,
) -> DecoratedParameter {
    let node = param.as_schema_node();

    let mut resolve_variant = |external: bool, no_pointer: bool| {
        let mut cx = ResolveCx {
            property_name: Some(&param.name),
            enums: &mut *enums,
        };
        resolver
            .resolve(Some(&node), imports, &mut cx, external, no_pointer)
            .unwrap_or_else(|| VOID_TYPE.to_string())
    };

    let data_type = resolve_variant(false, false);
    let data_type_external = resolve_variant(true, false);
    let inline_type = resolve_variant(false, true);
    let inline_type_external = resolve_variant(true, true);

    let item_type = node.items.as_deref().map(|items| {
        let mut cx = ResolveCx {
            property_name: Some(&param.name),
            enums,
        };
        resolver
            .resolve(Some(items), imports, &mut cx, false, true)
            .unwrap_or_else(|| VOID_TYPE.to_string())
    });

    DecoratedParameter {
        name: param.name.clone(),
        location: param.location.clone(),
        var_name: param.name.clone(),
        required: param.required.unwrap_or(false),
        data_type,
        data_type_external,
        inline_type,
        inline_type_external,
        item_type,
    }
}
