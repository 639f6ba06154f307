// Copyright 2019-2020 Guillaume Becquin
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::common::error::TranslationError;
use crate::pipelines::translation::{
    LanguagePairConfig, LanguageRegistry, ModelCache, ModelProvider, TranslationOutput,
    Translator, TranslatorConfig, EXAMPLE_SENTENCES,
};
use tracing::debug;

/// Outcome of a translation request: the translated text or the reason it failed.
pub type TranslationResult = Result<String, TranslationError>;

/// # Translation service
///
/// Entry point for hosts: resolves the selected language, loads (once) the corresponding model and
/// translates the input text. The service owns its model cache; share it between threads behind an
/// `Arc` to share the loaded models.
pub struct TranslationService<P: ModelProvider> {
    registry: LanguageRegistry,
    cache: ModelCache<P>,
    translator: Translator,
}

impl<P: ModelProvider> TranslationService<P> {
    /// Creates a new service, with the default translator configuration (512 input tokens).
    ///
    /// # Arguments
    ///
    /// * `registry` - Supported languages
    /// * `provider` - Source of the models
    ///
    /// # Example
    ///
    /// ```no_run
    /// # #[cfg(feature = "torch")]
    /// # fn main() -> anyhow::Result<()> {
    /// use opus_translate::marian::MarianModelProvider;
    /// use opus_translate::pipelines::translation::{LanguageRegistry, TranslationService};
    ///
    /// let service = TranslationService::new(
    ///     LanguageRegistry::opus_mt_english(),
    ///     MarianModelProvider::default(),
    /// );
    /// let output = service.translate_with_language("Good morning", "French")?;
    /// println!("{}", output);
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "torch"))]
    /// # fn main() {}
    /// ```
    pub fn new(registry: LanguageRegistry, provider: P) -> TranslationService<P> {
        TranslationService::new_with_config(registry, provider, TranslatorConfig::default())
    }

    pub fn new_with_config(
        registry: LanguageRegistry,
        provider: P,
        config: TranslatorConfig,
    ) -> TranslationService<P> {
        TranslationService {
            registry,
            cache: ModelCache::new(provider),
            translator: Translator::new(config),
        }
    }

    /// Translates `text` into the language named `display_name`.
    ///
    /// Steps, the first failure being returned:
    /// 1. resolve the language (`TranslationError::UnknownLanguage`)
    /// 2. acquire its model from the cache (`TranslationError::ModelLoad`)
    /// 3. translate (`TranslationError::EmptyInput`, `TranslationError::TranslationRuntime`)
    ///
    /// Inputs longer than the configured token limit are silently truncated.
    pub fn translate_with_language(&self, text: &str, display_name: &str) -> TranslationResult {
        Ok(self
            .translate_with_language_detailed(text, display_name)?
            .text)
    }

    /// Same as `translate_with_language`, also reporting how many input tokens were dropped.
    pub fn translate_with_language_detailed(
        &self,
        text: &str,
        display_name: &str,
    ) -> Result<TranslationOutput, TranslationError> {
        let language = self.registry.resolve(display_name)?;
        let handle = self.cache.acquire(&language.model_identifier)?;
        debug!(
            display_name,
            model_identifier = language.model_identifier.as_str(),
            "translating"
        );
        self.translator.translate_detailed(text, &handle)
    }

    /// Translates and renders the outcome as text to display, errors included.
    pub fn translate_for_display(&self, text: &str, display_name: &str) -> String {
        match self.translate_with_language(text, display_name) {
            Ok(translation) => translation,
            Err(error) => error.user_message(),
        }
    }

    /// Loads the model of a language ahead of the first translation.
    pub fn load_language(&self, display_name: &str) -> Result<&LanguagePairConfig, TranslationError> {
        let language = self.registry.resolve(display_name)?;
        self.cache.acquire(&language.model_identifier)?;
        Ok(language)
    }

    /// Translates each of the `EXAMPLE_SENTENCES`.
    ///
    /// # Returns
    ///
    /// * `(sentence, result)` pairs, in the order of `EXAMPLE_SENTENCES`
    /// * `TranslationError::UnknownLanguage` / `TranslationError::ModelLoad` if the language or its
    /// model is not available
    pub fn translate_examples(
        &self,
        display_name: &str,
    ) -> Result<Vec<(&'static str, TranslationResult)>, TranslationError> {
        let language = self.registry.resolve(display_name)?;
        let handle = self.cache.acquire(&language.model_identifier)?;
        Ok(EXAMPLE_SENTENCES
            .iter()
            .map(|sentence| (*sentence, self.translator.translate(sentence, &handle)))
            .collect())
    }

    pub fn supported_languages(&self) -> &[LanguagePairConfig] {
        self.registry.list_supported()
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    pub fn cache(&self) -> &ModelCache<P> {
        &self.cache
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }
}
