pub mod paths;
pub mod schema;
pub mod spec;

use crate::error::LoadError;
use schema::push_down_required;
use spec::ApiSpec;

/// Parse a Swagger spec from YAML.
pub fn from_yaml(input: &str) -> Result<ApiSpec, LoadError> {
    let mut spec: ApiSpec = serde_yaml_ng::from_str(input)?;
    validate_version(&spec)?;
    normalize(&mut spec);
    Ok(spec)
}

/// Parse a Swagger spec from JSON.
pub fn from_json(input: &str) -> Result<ApiSpec, LoadError> {
    let mut spec: ApiSpec = serde_json::from_str(input)?;
    validate_version(&spec)?;
    normalize(&mut spec);
    Ok(spec)
}

fn validate_version(spec: &ApiSpec) -> Result<(), LoadError> {
    if let Some(version) = &spec.swagger
        && !version.starts_with("2.")
    {
        return Err(LoadError::UnsupportedVersion(version.clone()));
    }
    Ok(())
}

/// Loader-side normalization: push object-level `required` lists down onto
/// properties everywhere a schema can appear.
fn normalize(spec: &mut ApiSpec) {
    for (_, schema) in spec.definitions.iter_mut() {
        push_down_required(schema);
    }
    for (_, item) in spec.paths.iter_mut() {
        for op in [
            item.get.as_mut(),
            item.put.as_mut(),
            item.post.as_mut(),
            item.delete.as_mut(),
            item.patch.as_mut(),
            item.head.as_mut(),
            item.options.as_mut(),
        ]
        .into_iter()
        .flatten()
        {
            for (_, response) in op.responses.iter_mut() {
                if let Some(schema) = response.schema.as_mut() {
                    push_down_required(schema);
                }
            }
            for param in op.parameters.iter_mut() {
                push_down_required(&mut param.schema);
            }
        }
    }
}
