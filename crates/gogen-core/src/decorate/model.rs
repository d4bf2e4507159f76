use indexmap::IndexMap;

use crate::collect::{ImportList, TagSet};
use crate::config::GogenConfig;
use crate::error::PipelineError;
use crate::names;
use crate::parse::schema::Schema;
use crate::registry::EnumRegistry;
use crate::resolve::{GoResolver, ResolveCx, VOID_TYPE};

use super::check_refs;
use super::types::{DecoratedModel, DecoratedProperty, ModelReference};

/// Base/marker model names flagged as abstract.
pub const ABSTRACT_MODELS: &[&str] = &["PaginatedList", "Entity", "Auditable"];

/// Suffix marking a model as the update variant of another entity.
const UPDATE_SUFFIX: &str = "_update";

/// Recognized validation-rule identifiers (the govalidator set).
pub const VALIDATORS: &[&str] = &[
    "alpha", "alphanum", "ascii", "base64", "creditcard", "datauri",
    "dialstring", "dns", "email", "float", "fullwidth", "halfwidth",
    "hexadecimal", "hexcolor", "host", "int", "ip", "ipv4", "ipv6",
    "isbn10", "isbn13", "json", "latitude", "longitude", "lowercase",
    "mac", "multibyte", "null", "numeric", "port", "printableascii",
    "requri", "requrl", "rgbcolor", "ssn", "semver", "uppercase", "url",
    "utfdigit", "utfletter", "utfletternum", "utfnumeric", "uuid",
    "uuidv3", "uuidv4", "uuidv5", "variablewidth",
];

/// Decorate one model: properties first, then the model's own finalize
/// step, which aggregates property-derived imports.
pub fn decorate_model(
    name: &str,
    schema: &Schema,
    definitions: &IndexMap<&str, &Schema>,
    config: &GogenConfig,
    resolver: &GoResolver,
    enums: &mut EnumRegistry,
) -> Result<DecoratedModel, PipelineError> {
    check_refs(schema, definitions, name)?;

    let package = config.packages.model.clone();

    let mut table_name = names::underscore(name);
    let update = table_name.ends_with(UPDATE_SUFFIX);
    if update {
        table_name.truncate(table_name.len() - UPDATE_SUFFIX.len());
    }

    let references: Vec<ModelReference> = schema
        .all_of
        .iter()
        .filter_map(|part| part.ref_path.as_deref())
        .map(|ref_path| {
            let name = names::extract_model_name(ref_path).to_string();
            let ref_package = config.reference_packages.get(&name).cloned();
            ModelReference {
                name,
                package: ref_package,
            }
        })
        .collect();
    let parent = references
        .first()
        .map(|reference| names::capitalize(&reference.name));
    let entity = references
        .iter()
        .find(|reference| reference.name == "Entity")
        .map(|reference| reference.name.clone());

    let mut imports = ImportList::new();
    for reference in &references {
        if let Some(ref_package) = &reference.package
            && *ref_package != package
        {
            imports.add(ref_package);
        }
    }

    // Decorate properties: the model's own, then inline allOf parts
    let mut properties = Vec::new();
    let inline_parts = schema
        .all_of
        .iter()
        .filter(|part| part.ref_path.is_none());
    for object in std::iter::once(schema).chain(inline_parts) {
        for (prop_name, prop_schema) in &object.properties {
            let property = decorate_property(name, prop_name, prop_schema, resolver, enums);
            imports.merge(&property.imports);
            properties.push(property);
        }
    }

    // Finalize
    properties.sort_by(|a, b| a.name.cmp(&b.name));
    imports.sort();
    let mut all_imports = ImportList::new();
    for property in &properties {
        all_imports.merge(&property.imports);
    }
    all_imports.merge(&imports);
    let all_imports = all_imports.sorted();

    let max_var_name_len = properties.iter().map(|p| p.var_name.len()).max().unwrap_or(0);
    let max_type_name_len = properties.iter().map(|p| p.data_type.len()).max().unwrap_or(0);

    Ok(DecoratedModel {
        name: name.to_string(),
        struct_name: names::capitalize(name),
        package,
        display_name: names::display_name(name),
        singular_var: names::singular_variable(name),
        plural_var: names::plural_variable(name),
        table_name,
        update,
        is_abstract: ABSTRACT_MODELS.contains(&name),
        parent,
        entity,
        references,
        description: schema.description.clone(),
        imports,
        all_imports,
        properties,
        max_var_name_len,
        max_type_name_len,
    })
}

/// Decorate one property: resolve its type into a transient import list,
/// assemble struct tags, then freeze the serialized tag string.
fn decorate_property(
    model_name: &str,
    prop_name: &str,
    schema: &Schema,
    resolver: &GoResolver,
    enums: &mut EnumRegistry,
) -> DecoratedProperty {
    let mut imports = ImportList::new();
    let mut cx = ResolveCx {
        property_name: Some(prop_name),
        enums,
    };
    let data_type = resolver
        .resolve(Some(schema), &mut imports, &mut cx, false, false)
        .unwrap_or_else(|| VOID_TYPE.to_string());

    let mut tags = TagSet::new();
    tags.add("json", prop_name);
    tags.add("yaml", prop_name);
    tags.add("msgpack", prop_name);

    let rules = validation_rules(model_name, prop_name, schema);
    if !rules.is_empty() {
        tags.add("valid", &rules.join(","));
    }
    let tags_string = tags.render();

    let default_value = schema.default_value.as_ref().map(|value| {
        if data_type == "string" {
            match value.as_str() {
                Some(text) => names::escape_go_string(text),
                None => names::escape_go_string(&value.to_string()),
            }
        } else {
            value.to_string()
        }
    });

    DecoratedProperty {
        name: prop_name.to_string(),
        var_name: names::variable_name(prop_name),
        data_type,
        required: schema.required_flag().unwrap_or(false),
        description: schema.description.clone(),
        imports,
        tags,
        tags_string,
        default_value,
    }
}

/// Assemble the `valid` tag bucket: requiredness, string length/pattern
/// constraints, and whitelisted extension rules.
fn validation_rules(model_name: &str, prop_name: &str, schema: &Schema) -> Vec<String> {
    let mut rules = Vec::new();
    if schema.required_flag() == Some(true) {
        rules.push("required".to_string());
    }
    if schema.effective_type() == Some("string") {
        if let Some(max) = schema.max_length {
            let min = schema.min_length.unwrap_or(0);
            rules.push(format!("stringlength({min}|{max})"));
        } else if let Some(min) = schema.min_length {
            rules.push(format!("stringlength({min}|1024)"));
        }
        if let Some(pattern) = &schema.pattern {
            rules.push(format!("matches({pattern})"));
        }
    }
    for rule in &schema.x_validate {
        if VALIDATORS.contains(&rule.as_str()) {
            rules.push(rule.clone());
        } else {
            log::warn!("unrecognized validation rule for {model_name}.{prop_name}: {rule}");
        }
    }
    rules
}
