use thiserror::Error;

/// Errors that can occur around recipe import operations.
///
/// Extraction itself never fails; these cover the edges where a caller
/// asks for something the input cannot provide.
#[derive(Error, Debug)]
pub enum ImportError {
    /// The message contained nothing that looks like a recipe
    #[error("No recipe detected in the provided text")]
    NoRecipeDetected,

    /// A draft index was selected that does not exist
    #[error("Recipe draft {index} not found ({available} detected)")]
    DraftNotFound { index: usize, available: usize },

    /// Meal type string outside breakfast/lunch/dinner/snack
    #[error("Invalid meal type: {0}")]
    InvalidMealType(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Failed to read input text
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to encode output
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
