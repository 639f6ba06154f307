//! # Ready-to-use machine translation with pretrained OPUS-MT models
//!
//! This crate provides a translation service from English to a set of target languages, built
//! on the Helsinki-NLP OPUS-MT (Marian) models. It handles the plumbing around the models:
//! - a registry of the supported languages, mapping the name shown to users to a model identifier,
//! - a model cache loading every model at most once, on first use, and sharing it between
//!   callers. Concurrent requests for a model being loaded wait for the single load in progress,
//! - a translator running the tokenization (truncated at 512 tokens), generation and decoding steps.
//!
//! Model inference is delegated to a `ModelProvider`. With the `torch` feature,
//! `marian::MarianModelProvider` downloads (or reads from a local directory) the tokenizer files and
//! a TorchScript export of each model and runs it with [tch-rs](https://github.com/LaurentMazare/tch-rs).
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
//! let output = service.translate_with_language("I am learning a new language", "Italian")?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "torch"))]
//! # fn main() {}
//! ```
//!
//! ## Features
//! - `remote` (default): download model files from the Hugging Face hub with `cached-path`. Files
//!   are cached in `$OPUS_TRANSLATE_CACHE`, or `~/.cache/.opus-translate` by default.
//! - `rustls-tls` (default) / `default-tls`: TLS backend used for the downloads
//! - `torch`: TorchScript model execution with `tch` (requires libtorch), `MarianModelProvider`
//!   and the `opus-translate` command line tool
//! - `all-tests`: runs the tests requiring network access and pretrained models
//!
//! ## Custom models
//!
//! Any model can be served by implementing `ModelProvider`, returning a `ModelHandle` made of a
//! `TranslationTokenizer` and a `Seq2SeqGenerator`. The table of languages can be read from a
//! JSON file with `LanguageRegistry::from_file`.

pub mod common;
pub mod marian;
pub mod pipelines;

pub use common::error::TranslationError;
pub use common::resources;
pub use common::Config;
pub use pipelines::translation::{
    LanguagePairConfig, LanguageRegistry, ModelCache, ModelHandle, ModelProvider,
    TranslationResult, TranslationService, Translator,
};
