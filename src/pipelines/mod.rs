//! # Ready-to-use translation pipeline
//!
//! Based on the Hugging Face OPUS-MT models, an end-to-end translation pipeline is available as
//! part of this crate:
//!
//! #### Translation
//! Translation of English text to 29 target languages, one Marian model per target language.
//! Models are loaded on first use and kept in memory for the lifetime of the service.
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
//! let output = service.translate_with_language("Thank you very much", "German")?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "torch"))]
//! # fn main() {}
//! ```

pub mod translation;
