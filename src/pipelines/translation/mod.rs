//! # Translation pipeline
//!
//! Translation of English text to a set of target languages with pretrained sequence-to-sequence
//! models (OPUS-MT Marian models by default). The pipeline is made of:
//! - a `LanguageRegistry`, the static table mapping the language names shown to users to the
//!   identifier of the model translating into that language,
//! - a `ModelCache`, loading each model at most once through a `ModelProvider` and sharing it
//!   between callers (concurrent requests for a model being loaded wait for that load),
//! - a `Translator`, running tokenization (truncated at 512 tokens), generation and decoding,
//! - a `TranslationService` composing the three.
//!
//! Model loading is delegated to a `ModelProvider`. `MarianModelProvider` (feature `torch`)
//! loads OPUS-MT models from the Hugging Face hub or a local directory; any other source can be
//! plugged in by implementing the trait.
//!
//! ```no_run
//! # #[cfg(feature = "torch")]
//! # fn main() -> anyhow::Result<()> {
//! use opus_translate::marian::MarianModelProvider;
//! use opus_translate::pipelines::translation::{LanguageRegistry, TranslationService};
//!
//! let service = TranslationService::new(
//!     LanguageRegistry::opus_mt_english(),
//!     MarianModelProvider::default(),
//! );
//!
//! for language in service.supported_languages().iter().take(3) {
//!     println!("{}", language.label());
//! }
//!
//! let output = service.translate_with_language("Hello, how are you?", "Spanish")?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "torch"))]
//! # fn main() {}
//! ```
//!
//! Errors are reported as `TranslationError`. Hosts that only need to show a message can call
//! `TranslationService::translate_for_display` or `TranslationError::user_message`:
//!
//! ```no_run
//! # #[cfg(feature = "torch")]
//! # fn main() {
//! # use opus_translate::marian::MarianModelProvider;
//! # use opus_translate::pipelines::translation::{LanguageRegistry, TranslationService};
//! # let service = TranslationService::new(LanguageRegistry::default(), MarianModelProvider::default());
//! let message = service.translate_for_display("   ", "German");
//! assert_eq!(message, "Please enter some text to translate.");
//! # }
//! # #[cfg(not(feature = "torch"))]
//! # fn main() {}
//! ```

mod language_registry;
mod model_cache;
mod translation_service;
mod translator;

pub use language_registry::{LanguagePairConfig, LanguageRegistry, EXAMPLE_SENTENCES};
pub use model_cache::{ModelCache, ModelProvider};
pub use translation_service::{TranslationResult, TranslationService};
pub use translator::{
    EncodedInput, ModelHandle, Seq2SeqGenerator, TranslationOutput, TranslationTokenizer,
    Translator, TranslatorConfig, DEFAULT_MAX_INPUT_TOKENS,
};
