//! ft-factors: per-technology footprint factor tables and their file format.

pub mod builtin;
pub mod table;
pub mod validate;

pub use table::{FactorTable, Metric};
pub use validate::validate_table;

pub type FactorResult<T> = Result<T, FactorError>;

#[derive(thiserror::Error, Debug)]
pub enum FactorError {
    #[error("Invalid factor table: {what}")]
    Invalid { what: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> FactorResult<FactorTable> {
    let table: FactorTable = serde_yaml::from_str(content)?;
    validate_table(&table)?;
    Ok(table)
}

pub fn load_yaml(path: &std::path::Path) -> FactorResult<FactorTable> {
    let content = std::fs::read_to_string(path)?;
    from_yaml_str(&content)
}

pub fn save_yaml(path: &std::path::Path, table: &FactorTable) -> FactorResult<()> {
    validate_table(table)?;
    let content = serde_yaml::to_string(table)?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_json(path: &std::path::Path) -> FactorResult<FactorTable> {
    let content = std::fs::read_to_string(path)?;
    let table: FactorTable = serde_json::from_str(&content)?;
    validate_table(&table)?;
    Ok(table)
}

/// Load a table, choosing the format from the file extension.
pub fn load(path: &std::path::Path) -> FactorResult<FactorTable> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json { load_json(path) } else { load_yaml(path) }
}
