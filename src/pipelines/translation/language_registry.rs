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
use crate::Config;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Quick examples offered to users next to the free text input.
pub const EXAMPLE_SENTENCES: [&str; 5] = [
    "Hello, how are you?",
    "Thank you very much",
    "What is your name?",
    "Good morning",
    "I am learning a new language",
];

/// # Language pair supported by the translation service
/// Associates a user-facing language name with the pretrained model translating into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePairConfig {
    /// Name shown to users and used as selector (e.g. `French`)
    pub display_name: String,
    /// Identifier of the pretrained model (e.g. `Helsinki-NLP/opus-mt-en-fr`)
    pub model_identifier: String,
    /// Language code of the input text
    pub source_language_code: String,
    /// Language code of the translated text
    pub target_language_code: String,
    /// Optional flag emoji rendered next to the display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

impl LanguagePairConfig {
    pub fn new(
        display_name: &str,
        model_identifier: &str,
        source_language_code: &str,
        target_language_code: &str,
    ) -> LanguagePairConfig {
        LanguagePairConfig {
            display_name: display_name.to_string(),
            model_identifier: model_identifier.to_string(),
            source_language_code: source_language_code.to_string(),
            target_language_code: target_language_code.to_string(),
            flag: None,
        }
    }

    pub fn with_flag(mut self, flag: &str) -> LanguagePairConfig {
        self.flag = Some(flag.to_string());
        self
    }

    /// Display name prefixed with the flag, if any
    pub fn label(&self) -> String {
        match &self.flag {
            Some(flag) => format!("{} {}", flag, self.display_name),
            None => self.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
struct LanguageTable(Vec<LanguagePairConfig>);

impl Config for LanguageTable {}

/// # Registry of the supported language pairs
///
/// Immutable table resolving the language selected by a user to the model to use. The
/// declaration order of the pairs is preserved (it is the order in which hosts render them).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRegistry {
    pairs: Vec<LanguagePairConfig>,
}

impl LanguageRegistry {
    /// Builds a registry from a list of language pairs.
    ///
    /// # Arguments
    ///
    /// * `pairs` - Language pairs, in the order they should be listed
    ///
    /// # Returns
    ///
    /// * `LanguageRegistry`, or `TranslationError::InvalidConfiguration` if the table is empty,
    /// has an empty field, or repeats a display name or a model identifier
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> anyhow::Result<()> {
    /// use opus_translate::pipelines::translation::{LanguagePairConfig, LanguageRegistry};
    /// let registry = LanguageRegistry::new(vec![LanguagePairConfig::new(
    ///     "French",
    ///     "Helsinki-NLP/opus-mt-en-fr",
    ///     "en",
    ///     "fr",
    /// )])?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pairs: Vec<LanguagePairConfig>) -> Result<LanguageRegistry, TranslationError> {
        if pairs.is_empty() {
            return Err(TranslationError::InvalidConfiguration(
                "language registry must contain at least one language pair".to_string(),
            ));
        }
        let mut display_names = HashSet::new();
        let mut model_identifiers = HashSet::new();
        for pair in &pairs {
            if pair.display_name.trim().is_empty()
                || pair.model_identifier.trim().is_empty()
                || pair.source_language_code.trim().is_empty()
                || pair.target_language_code.trim().is_empty()
            {
                return Err(TranslationError::InvalidConfiguration(format!(
                    "language pair with empty field: {:?}",
                    pair
                )));
            }
            if !display_names.insert(pair.display_name.as_str()) {
                return Err(TranslationError::InvalidConfiguration(format!(
                    "duplicate display name {}",
                    pair.display_name
                )));
            }
            if !model_identifiers.insert(pair.model_identifier.as_str()) {
                return Err(TranslationError::InvalidConfiguration(format!(
                    "duplicate model identifier {}",
                    pair.model_identifier
                )));
            }
        }
        Ok(LanguageRegistry { pairs })
    }

    /// Loads a registry from a JSON file holding an array of `LanguagePairConfig`.
    ///
    /// ```json
    /// [
    ///   {"display_name": "French", "model_identifier": "Helsinki-NLP/opus-mt-en-fr",
    ///    "source_language_code": "en", "target_language_code": "fr", "flag": "🇫🇷"}
    /// ]
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<LanguageRegistry, TranslationError> {
        let LanguageTable(pairs) = LanguageTable::from_file(path)?;
        LanguageRegistry::new(pairs)
    }

    /// English to 29 target languages, using the Helsinki-NLP OPUS-MT models.
    pub fn opus_mt_english() -> LanguageRegistry {
        let pairs = OPUS_MT_ENGLISH
            .iter()
            .map(|(flag, display_name, model_identifier, code)| {
                LanguagePairConfig::new(display_name, model_identifier, "en", code).with_flag(flag)
            })
            .collect();
        LanguageRegistry { pairs }
    }

    /// Supported language pairs, in declaration order.
    pub fn list_supported(&self) -> &[LanguagePairConfig] {
        &self.pairs
    }

    /// Resolves a display name to its language pair.
    ///
    /// # Arguments
    ///
    /// * `display_name` - Name of the language, as listed by `list_supported`
    ///
    /// # Returns
    ///
    /// * `&LanguagePairConfig`, or `TranslationError::UnknownLanguage`
    pub fn resolve(&self, display_name: &str) -> Result<&LanguagePairConfig, TranslationError> {
        self.pairs
            .iter()
            .find(|pair| pair.display_name == display_name)
            .ok_or_else(|| TranslationError::UnknownLanguage(display_name.to_string()))
    }

    /// Resolves a target language code (e.g. `fr`) to its language pair.
    pub fn resolve_target_code(
        &self,
        target_language_code: &str,
    ) -> Result<&LanguagePairConfig, TranslationError> {
        self.pairs
            .iter()
            .find(|pair| pair.target_language_code == target_language_code)
            .ok_or_else(|| TranslationError::UnknownLanguage(target_language_code.to_string()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        LanguageRegistry::opus_mt_english()
    }
}

const OPUS_MT_ENGLISH: [(&str, &str, &str, &str); 29] = [
    ("🇵🇰", "Urdu", "Helsinki-NLP/opus-mt-en-ur", "ur"),
    ("🇫🇷", "French", "Helsinki-NLP/opus-mt-en-fr", "fr"),
    ("🇪🇸", "Spanish", "Helsinki-NLP/opus-mt-en-es", "es"),
    ("🇩🇪", "German", "Helsinki-NLP/opus-mt-en-de", "de"),
    ("🇮🇹", "Italian", "Helsinki-NLP/opus-mt-en-it", "it"),
    ("🇵🇹", "Portuguese", "Helsinki-NLP/opus-mt-en-pt", "pt"),
    ("🇷🇺", "Russian", "Helsinki-NLP/opus-mt-en-ru", "ru"),
    ("🇨🇳", "Chinese", "Helsinki-NLP/opus-mt-en-zh", "zh"),
    ("🇯🇵", "Japanese", "Helsinki-NLP/opus-mt-en-jap", "ja"),
    ("🇰🇷", "Korean", "Helsinki-NLP/opus-mt-en-ko", "ko"),
    ("🇸🇦", "Arabic", "Helsinki-NLP/opus-mt-en-ar", "ar"),
    ("🇮🇳", "Hindi", "Helsinki-NLP/opus-mt-en-hi", "hi"),
    ("🇹🇷", "Turkish", "Helsinki-NLP/opus-mt-en-tr", "tr"),
    ("🇳🇱", "Dutch", "Helsinki-NLP/opus-mt-en-nl", "nl"),
    ("🇵🇱", "Polish", "Helsinki-NLP/opus-mt-en-pl", "pl"),
    ("🇸🇪", "Swedish", "Helsinki-NLP/opus-mt-en-sv", "sv"),
    ("🇬🇷", "Greek", "Helsinki-NLP/opus-mt-en-el", "el"),
    ("🇨🇿", "Czech", "Helsinki-NLP/opus-mt-en-cs", "cs"),
    ("🇷🇴", "Romanian", "Helsinki-NLP/opus-mt-en-ro", "ro"),
    ("🇭🇺", "Hungarian", "Helsinki-NLP/opus-mt-en-hu", "hu"),
    ("🇫🇮", "Finnish", "Helsinki-NLP/opus-mt-en-fi", "fi"),
    ("🇩🇰", "Danish", "Helsinki-NLP/opus-mt-en-da", "da"),
    ("🇳🇴", "Norwegian", "Helsinki-NLP/opus-mt-en-no", "no"),
    ("🇺🇦", "Ukrainian", "Helsinki-NLP/opus-mt-en-uk", "uk"),
    ("🇮🇩", "Indonesian", "Helsinki-NLP/opus-mt-en-id", "id"),
    ("🇻🇳", "Vietnamese", "Helsinki-NLP/opus-mt-en-vi", "vi"),
    ("🇹🇭", "Thai", "Helsinki-NLP/opus-mt-en-th", "th"),
    ("🇮🇷", "Persian", "Helsinki-NLP/opus-mt-en-fa", "fa"),
    ("🇧🇩", "Bengali", "Helsinki-NLP/opus-mt-en-bn", "bn"),
];
