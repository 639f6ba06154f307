//! # Marian
//!
//! Support for the OPUS-MT translation models ([Marian: Fast Neural Machine Translation in {C++}](http://www.aclweb.org/anthology/P18-4020) Junczys-Dowmunt, Grundkiewicz, Dwojak, Hoang, Heafield, Neckermann, Seide, Germann, Fikri Aji, Bogoychev, Martins, Birch, 2018).
//! The models are shared under Creative Commons Attribution 4.0 International License license by the Opus-MT team from Language Technology at the University of Helsinki at <https://github.com/Helsinki-NLP/Opus-MT>.
//!
//! The model itself is not implemented in this crate: it is run from a TorchScript export
//! (`torch.jit.trace` of the Hugging Face `MarianMTModel`) with `tch` (requires the `torch` feature).
//!
//! # Model set-up
//!
//! Each model is expected to provide the following files:
//! - `config.json`: configuration file following the [Transformers library](https://github.com/huggingface/transformers)
//! - `vocab.json` and `source.spm`: vocabulary and sentence piece model of the `MarianTokenizer`
//! - `traced_model.pt`: TorchScript export of the model (the name can be changed)
//!
//! `MarianModelProvider` fetches these files for a model identifier, either from a model hub
//! (default, requires the `remote` feature) or from a local directory:
//!
//! ```no_run
//! # #[cfg(feature = "torch")]
//! # fn main() -> anyhow::Result<()> {
//! use opus_translate::marian::MarianModelProvider;
//! use opus_translate::pipelines::translation::{ModelProvider, Translator};
//! use tch::Device;
//!
//! let provider = MarianModelProvider::from_directory("path/to/models").with_device(Device::Cpu);
//! let handle = provider.load("Helsinki-NLP/opus-mt-en-fr")?;
//! let output = Translator::default().translate("Good morning", &handle)?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "torch"))]
//! # fn main() {}
//! ```

mod marian_config;
mod marian_tokenizer;

#[cfg(feature = "torch")]
mod marian_provider;
#[cfg(feature = "torch")]
mod torchscript_generator;

pub use marian_config::{MarianFiles, MarianGenerationConfig};
pub use marian_tokenizer::MarianTokenizerAdapter;

#[cfg(feature = "torch")]
pub use marian_provider::{MarianModelProvider, ModelSource, HUGGING_FACE_HUB};
#[cfg(feature = "torch")]
pub use torchscript_generator::TorchScriptGenerator;
