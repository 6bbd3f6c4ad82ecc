//! cs-project: diagram file format and validation.

pub mod schema;
pub mod validate;

pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_diagram};

use std::path::Path;

use tracing::debug;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unsupported file extension: {path}")]
    UnknownFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// File encodings a diagram can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ProjectError::UnknownFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<Diagram> {
    let content = std::fs::read_to_string(path)?;
    let diagram: Diagram = serde_yaml::from_str(&content)?;
    validate_diagram(&diagram)?;
    Ok(diagram)
}

pub fn save_yaml(path: &Path, diagram: &Diagram) -> ProjectResult<()> {
    validate_diagram(diagram)?;
    let content = serde_yaml::to_string(diagram)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &Path) -> ProjectResult<Diagram> {
    let content = std::fs::read_to_string(path)?;
    let diagram: Diagram = serde_json::from_str(&content)?;
    validate_diagram(&diagram)?;
    Ok(diagram)
}

pub fn save_json(path: &Path, diagram: &Diagram) -> ProjectResult<()> {
    validate_diagram(diagram)?;
    let content = serde_json::to_string_pretty(diagram)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Load a diagram, choosing YAML or JSON by extension.
pub fn load(path: &Path) -> ProjectResult<Diagram> {
    let diagram = match Format::from_path(path)? {
        Format::Yaml => load_yaml(path)?,
        Format::Json => load_json(path)?,
    };
    debug!(
        path = %path.display(),
        name = %diagram.name,
        blocks = diagram.blocks.len(),
        "diagram loaded"
    );
    Ok(diagram)
}

/// Save a diagram, choosing YAML or JSON by extension.
pub fn save(path: &Path, diagram: &Diagram) -> ProjectResult<()> {
    match Format::from_path(path)? {
        Format::Yaml => save_yaml(path, diagram),
        Format::Json => save_json(path, diagram),
    }
}
