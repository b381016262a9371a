use thiserror::Error;

/// Errors from training or querying the opportunity model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("model has not been trained; call train() before predict()")]
    NotTrained,

    #[error("model is already trained; fitted parameters are immutable")]
    AlreadyTrained,

    #[error("insufficient training data: {0}")]
    InsufficientData(String),

    #[error("unknown category '{0}' (not seen during training)")]
    UnknownCategory(String),
}
