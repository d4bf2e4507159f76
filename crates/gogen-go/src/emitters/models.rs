use minijinja::{Environment, context};

use gogen_core::config::GogenConfig;
use gogen_core::decorate::{Context, DecoratedModel};
use gogen_core::error::GenerateError;
use gogen_core::names;

/// Emit `generated.go` containing all concrete structs and enum blocks.
/// `*List` page wrappers are filtered out; the template layer never sees
/// them.
pub fn emit_models(ctx: &Context, config: &GogenConfig) -> Result<String, GenerateError> {
    let mut env = Environment::new();
    env.add_template("models.go.j2", include_str!("../../templates/models.go.j2"))
        .map_err(render_error)?;
    let tmpl = env.get_template("models.go.j2").map_err(render_error)?;

    let models: Vec<minijinja::Value> = ctx
        .models
        .iter()
        .filter(|model| !model.name.ends_with("List"))
        .map(|model| model_to_ctx(model, config))
        .collect();
    let enums: Vec<minijinja::Value> = ctx
        .enums
        .iter()
        .map(minijinja::Value::from_serialize)
        .collect();

    tmpl.render(context! {
        package => names::package_prefix(&ctx.package),
        imports => ctx.imports.clone(),
        models => models,
        enums => enums,
    })
    .map_err(render_error)
}

fn render_error(err: minijinja::Error) -> GenerateError {
    GenerateError::Render(err.to_string())
}

fn model_to_ctx(model: &DecoratedModel, config: &GogenConfig) -> minijinja::Value {
    // Pre-pad field lines so struct columns align
    let mut fields: Vec<String> = model
        .properties
        .iter()
        .map(|prop| {
            let mut line = format!(
                "\t{:width$} {}",
                prop.var_name,
                prop.data_type,
                width = model.max_var_name_len
            );
            if !prop.tags_string.is_empty() {
                let pad = model.max_type_name_len.saturating_sub(prop.data_type.len());
                line.push_str(&" ".repeat(pad));
                line.push_str(" `");
                line.push_str(&prop.tags_string);
                line.push('`');
            }
            line
        })
        .collect();

    // Hand-written members appended verbatim after the generated fields
    if let Some(extra) = config.additional_fields.get(&model.struct_name) {
        fields.extend(extra.iter().map(|line| format!("\t{line}")));
    }

    context! {
        struct_name => model.struct_name.clone(),
        display_name => model.display_name.clone(),
        description => model.description.clone(),
        fields => fields,
    }
}
