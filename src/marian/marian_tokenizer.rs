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
use crate::pipelines::translation::{EncodedInput, TranslationTokenizer};
use rust_tokenizers::tokenizer::{MarianTokenizer, Tokenizer, TruncationStrategy};
use std::path::Path;

/// # Marian tokenizer
/// Sentence piece tokenizer of the OPUS-MT models, backed by `rust_tokenizers`.
pub struct MarianTokenizerAdapter {
    tokenizer: MarianTokenizer,
}

impl MarianTokenizerAdapter {
    /// Creates the tokenizer from a `vocab.json` vocabulary and a `source.spm` sentence piece model.
    pub fn from_files<V: AsRef<Path>, S: AsRef<Path>>(
        vocab_path: V,
        sentence_piece_path: S,
    ) -> Result<MarianTokenizerAdapter, TranslationError> {
        let vocab_path = vocab_path.as_ref().to_string_lossy();
        let sentence_piece_path = sentence_piece_path.as_ref().to_string_lossy();
        let tokenizer = MarianTokenizer::from_files(&*vocab_path, &*sentence_piece_path, false)?;
        Ok(MarianTokenizerAdapter { tokenizer })
    }
}

impl TranslationTokenizer for MarianTokenizerAdapter {
    fn encode(&self, text: &str, max_len: usize) -> Result<EncodedInput, TranslationError> {
        let tokenized_input =
            self.tokenizer
                .encode(text, None, max_len, &TruncationStrategy::LongestFirst, 0);
        Ok(EncodedInput {
            token_ids: tokenized_input.token_ids,
            num_truncated_tokens: tokenized_input.num_truncated_tokens,
        })
    }

    fn decode(&self, token_ids: &[i64]) -> Result<String, TranslationError> {
        Ok(self.tokenizer.decode(token_ids, true, true))
    }
}
