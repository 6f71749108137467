use thiserror::Error;

pub type FtResult<T> = Result<T, FtError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FtError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: String, value: f64 },

    #[error("Zone position {index} does not fit in a zone handle")]
    IndexOverflow { index: usize },
}
