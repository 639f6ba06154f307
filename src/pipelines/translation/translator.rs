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
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Maximum number of input tokens fed to the models. Longer inputs are truncated.
pub const DEFAULT_MAX_INPUT_TOKENS: usize = 512;

/// # Tokenized input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncodedInput {
    /// Token ids, special tokens included, at most `max_len` long
    pub token_ids: Vec<i64>,
    /// Number of tokens dropped to fit `max_len`
    pub num_truncated_tokens: usize,
}

/// # Tokenizer half of a loaded model
pub trait TranslationTokenizer: Send + Sync {
    /// Converts text to token ids, truncating the sequence to `max_len` tokens.
    fn encode(&self, text: &str, max_len: usize) -> Result<EncodedInput, TranslationError>;

    /// Converts generated token ids back to text, skipping special tokens (padding,
    /// end of sequence, language markers).
    fn decode(&self, token_ids: &[i64]) -> Result<String, TranslationError>;
}

/// # Sequence-to-sequence half of a loaded model
///
/// Implementations are shared between threads. Models whose inference primitive is not safe for
/// concurrent use must serialize calls internally.
pub trait Seq2SeqGenerator: Send + Sync {
    /// Generates the output token ids for a single tokenized input.
    fn generate(&self, input_ids: &[i64]) -> Result<Vec<i64>, TranslationError>;
}

/// # Loaded model
/// Initialized tokenizer and generator pair for one model identifier.
pub struct ModelHandle {
    model_identifier: String,
    tokenizer: Box<dyn TranslationTokenizer>,
    generator: Box<dyn Seq2SeqGenerator>,
}

impl ModelHandle {
    pub fn new(
        model_identifier: &str,
        tokenizer: impl TranslationTokenizer + 'static,
        generator: impl Seq2SeqGenerator + 'static,
    ) -> ModelHandle {
        ModelHandle {
            model_identifier: model_identifier.to_string(),
            tokenizer: Box::new(tokenizer),
            generator: Box::new(generator),
        }
    }

    pub fn model_identifier(&self) -> &str {
        &self.model_identifier
    }

    pub fn tokenizer(&self) -> &dyn TranslationTokenizer {
        self.tokenizer.as_ref()
    }

    pub fn generator(&self) -> &dyn Seq2SeqGenerator {
        self.generator.as_ref()
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("model_identifier", &self.model_identifier)
            .finish()
    }
}

/// # Translation output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutput {
    /// Translated text
    pub text: String,
    /// Number of input tokens that were dropped before translation
    pub num_truncated_tokens: usize,
}

impl TranslationOutput {
    pub fn was_truncated(&self) -> bool {
        self.num_truncated_tokens > 0
    }
}

/// # Configuration for the translator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    /// Maximum number of input tokens (special tokens included)
    pub max_input_tokens: usize,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        TranslatorConfig {
            max_input_tokens: DEFAULT_MAX_INPUT_TOKENS,
        }
    }
}

/// # Translator
///
/// Runs the tokenize, generate and decode sequence on a loaded model.
///
/// Inputs longer than `max_input_tokens` tokens are **silently truncated**: only the first
/// `max_input_tokens` tokens are translated and the rest of the text is lost. Use
/// `translate_detailed` to find out whether an input was truncated.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Translator {
        Translator { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translates a text with a loaded model.
    ///
    /// # Arguments
    ///
    /// * `text` - Text to translate. Must contain at least one non-whitespace character.
    /// * `handle` - Loaded model
    ///
    /// # Returns
    ///
    /// * Translated text, with special tokens stripped
    /// * `TranslationError::EmptyInput` for empty or whitespace-only text (the model is not called)
    /// * `TranslationError::TranslationRuntime` for any tokenizer or model failure, not retried
    pub fn translate(&self, text: &str, handle: &ModelHandle) -> Result<String, TranslationError> {
        Ok(self.translate_detailed(text, handle)?.text)
    }

    /// Same as `translate`, also reporting how many input tokens were dropped.
    pub fn translate_detailed(
        &self,
        text: &str,
        handle: &ModelHandle,
    ) -> Result<TranslationOutput, TranslationError> {
        if text.trim().is_empty() {
            return Err(TranslationError::EmptyInput);
        }

        let encoded = handle
            .tokenizer()
            .encode(text, self.config.max_input_tokens)
            .map_err(TranslationError::into_runtime)?;
        if encoded.num_truncated_tokens > 0 {
            warn!(
                model_identifier = handle.model_identifier(),
                max_input_tokens = self.config.max_input_tokens,
                num_truncated_tokens = encoded.num_truncated_tokens,
                "input truncated"
            );
        }

        let output_ids = handle
            .generator()
            .generate(&encoded.token_ids)
            .map_err(TranslationError::into_runtime)?;
        let text = handle
            .tokenizer()
            .decode(&output_ids)
            .map_err(TranslationError::into_runtime)?;

        Ok(TranslationOutput {
            text,
            num_truncated_tokens: encoded.num_truncated_tokens,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CharTokenizer;

    impl TranslationTokenizer for CharTokenizer {
        fn encode(&self, text: &str, max_len: usize) -> Result<EncodedInput, TranslationError> {
            let ids: Vec<i64> = text.chars().map(|c| c as i64).collect();
            let kept = ids.len().min(max_len);
            Ok(EncodedInput {
                num_truncated_tokens: ids.len() - kept,
                token_ids: ids[..kept].to_vec(),
            })
        }

        fn decode(&self, token_ids: &[i64]) -> Result<String, TranslationError> {
            Ok(token_ids
                .iter()
                .filter_map(|id| char::from_u32(*id as u32))
                .collect())
        }
    }

    struct UppercaseGenerator {
        calls: Arc<AtomicUsize>,
    }

    impl Seq2SeqGenerator for UppercaseGenerator {
        fn generate(&self, input_ids: &[i64]) -> Result<Vec<i64>, TranslationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(input_ids
                .iter()
                .map(|id| (*id as u8).to_ascii_uppercase() as i64)
                .collect())
        }
    }

    fn handle(calls: &Arc<AtomicUsize>) -> ModelHandle {
        ModelHandle::new(
            "test/upper",
            CharTokenizer,
            UppercaseGenerator {
                calls: calls.clone(),
            },
        )
    }

    #[test]
    fn short_limit_truncates() {
        let calls = Arc::new(AtomicUsize::new(0));
        let translator = Translator::new(TranslatorConfig {
            max_input_tokens: 5,
        });
        let output = translator
            .translate_detailed("hello world", &handle(&calls))
            .unwrap();
        assert_eq!(output.text, "HELLO");
        assert_eq!(output.num_truncated_tokens, 6);
        assert!(output.was_truncated());
    }

    #[test]
    fn whitespace_is_rejected_before_inference() {
        let calls = Arc::new(AtomicUsize::new(0));
        let translator = Translator::default();
        assert_eq!(
            translator.translate(" \t\n", &handle(&calls)),
            Err(TranslationError::EmptyInput)
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
