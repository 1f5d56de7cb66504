use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Could not read .env: {0}")]
    DotEnv(#[from] dotenvy::Error),
    #[error("{key} is not a valid URL ({value}): {reason}")]
    InvalidUrl {
        key: &'static str,
        value: String,
        reason: String,
    },
}
