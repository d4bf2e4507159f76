use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported Swagger version: {0}")]
    UnsupportedVersion(String),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("unresolved reference: {0}")]
    UnresolvedRef(String),

    #[error("decoration failed: {0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("render failed: {0}")]
    Render(String),
}
