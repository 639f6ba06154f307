use rust_tokenizers::error::TokenizerError;
#[cfg(feature = "torch")]
use tch::TchError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Could not load model {model_identifier}: {cause}")]
    ModelLoad {
        model_identifier: String,
        cause: String,
    },

    #[error("Input text is empty")]
    EmptyInput,

    #[error("Translation runtime error: {0}")]
    TranslationRuntime(String),

    #[error("Endpoint not available error: {0}")]
    FileDownload(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("Tch tensor error: {0}")]
    Tch(String),

    #[error("Invalid configuration error: {0}")]
    InvalidConfiguration(String),
}

impl TranslationError {
    /// Message suitable for direct display to an end user.
    ///
    /// Every failure of the translation service can be rendered this way, hosts do not need to
    /// match on the variants unless they want to react differently to each of them.
    pub fn user_message(&self) -> String {
        match self {
            TranslationError::UnknownLanguage(language) => format!(
                "Language \"{}\" is not supported. Please select another language.",
                language
            ),
            TranslationError::ModelLoad { cause, .. } => format!(
                "Error loading model: {}. Some models may not be available, please try another language.",
                cause
            ),
            TranslationError::EmptyInput => "Please enter some text to translate.".to_string(),
            TranslationError::TranslationRuntime(cause) => format!("Translation error: {}", cause),
            other => format!("Error: {}", other),
        }
    }

    /// Wraps any failure raised while loading `model_identifier` into a `ModelLoad` error for
    /// that identifier. The cause of an existing `ModelLoad` error is kept as is.
    pub(crate) fn into_model_load(self, model_identifier: &str) -> TranslationError {
        let cause = match self {
            TranslationError::ModelLoad { cause, .. } => cause,
            other => other.to_string(),
        };
        TranslationError::ModelLoad {
            model_identifier: model_identifier.to_string(),
            cause,
        }
    }

    /// Wraps any failure raised during inference into a `TranslationRuntime` error, keeping the
    /// underlying message verbatim.
    pub(crate) fn into_runtime(self) -> TranslationError {
        match self {
            TranslationError::TranslationRuntime(_) | TranslationError::EmptyInput => self,
            TranslationError::Tokenizer(cause)
            | TranslationError::Tch(cause)
            | TranslationError::Io(cause) => TranslationError::TranslationRuntime(cause),
            other => TranslationError::TranslationRuntime(other.to_string()),
        }
    }
}

#[cfg(feature = "remote")]
impl From<cached_path::Error> for TranslationError {
    fn from(error: cached_path::Error) -> Self {
        TranslationError::FileDownload(error.to_string())
    }
}

impl From<std::io::Error> for TranslationError {
    fn from(error: std::io::Error) -> Self {
        TranslationError::Io(error.to_string())
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::InvalidConfiguration(error.to_string())
    }
}

impl From<TokenizerError> for TranslationError {
    fn from(error: TokenizerError) -> Self {
        TranslationError::Tokenizer(error.to_string())
    }
}

#[cfg(feature = "torch")]
impl From<TchError> for TranslationError {
    fn from(error: TchError) -> Self {
        TranslationError::Tch(error.to_string())
    }
}
