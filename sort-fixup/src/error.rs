use mock_core::MasterApiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FixupError>;

/// Every variant ends the run with exit code 1
#[derive(Error, Debug)]
pub enum FixupError {
    #[error("以下の診療科がマスターにありません: {}", .0.join(", "))]
    MissingDepartments(Vec<String>),

    #[error(transparent)]
    Api(#[from] MasterApiError),

    #[error("Failed to write progress: {0}")]
    Output(#[from] std::io::Error),
}

impl FixupError {
    pub fn exit_code(&self) -> u8 {
        1
    }
}
