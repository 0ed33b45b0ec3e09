use thiserror::Error;

#[derive(Error, Debug)]
pub enum TourGuideError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Worker pool error: {0}")]
    Pool(String),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl TourGuideError {
    pub fn user_not_found(name: &str) -> Self {
        TourGuideError::NotFound(format!("user '{}'", name))
    }
}

pub type TourGuideResult<T> = Result<T, TourGuideError>;
