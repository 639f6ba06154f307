#![allow(dead_code)]

use opus_translate::pipelines::translation::{
    EncodedInput, ModelHandle, ModelProvider, Seq2SeqGenerator, TranslationTokenizer,
};
use opus_translate::TranslationError;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const EOS_ID: i64 = 0;

/// Word-level vocabulary shared by the stub tokenizer and generator. Id 0 is reserved for the end
/// of sequence token.
#[derive(Default)]
pub struct Vocab {
    words: Mutex<(Vec<String>, HashMap<String, i64>)>,
}

impl Vocab {
    fn id(&self, word: &str) -> i64 {
        let mut words = self.words.lock();
        if let Some(id) = words.1.get(word) {
            return *id;
        }
        words.0.push(word.to_string());
        let id = words.0.len() as i64;
        words.1.insert(word.to_string(), id);
        id
    }

    fn word(&self, id: i64) -> Option<String> {
        let words = self.words.lock();
        words.0.get((id - 1) as usize).cloned()
    }
}

pub struct WordTokenizer {
    vocab: Arc<Vocab>,
}

impl TranslationTokenizer for WordTokenizer {
    fn encode(&self, text: &str, max_len: usize) -> Result<EncodedInput, TranslationError> {
        let ids: Vec<i64> = text.split_whitespace().map(|w| self.vocab.id(w)).collect();
        let kept = ids.len().min(max_len);
        Ok(EncodedInput {
            num_truncated_tokens: ids.len() - kept,
            token_ids: ids[..kept].to_vec(),
        })
    }

    fn decode(&self, token_ids: &[i64]) -> Result<String, TranslationError> {
        Ok(token_ids
            .iter()
            .filter(|id| **id != EOS_ID)
            .filter_map(|id| self.vocab.word(*id))
            .collect::<Vec<String>>()
            .join(" "))
    }
}

/// Translates word by word with a dictionary, unknown words are copied.
pub struct DictionaryGenerator {
    vocab: Arc<Vocab>,
    dictionary: HashMap<String, String>,
    failure: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl Seq2SeqGenerator for DictionaryGenerator {
    fn generate(&self, input_ids: &[i64]) -> Result<Vec<i64>, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(failure) = &self.failure {
            return Err(TranslationError::Tch(failure.clone()));
        }
        let mut output: Vec<i64> = input_ids
            .iter()
            .filter_map(|id| self.vocab.word(*id))
            .map(|word| match self.dictionary.get(&word) {
                Some(translation) => self.vocab.id(translation),
                None => self.vocab.id(&word),
            })
            .collect();
        output.push(EOS_ID);
        Ok(output)
    }
}

/// Configurable in-memory model provider recording the loads it performs.
#[derive(Default)]
pub struct StubProvider {
    dictionaries: HashMap<String, HashMap<String, String>>,
    failing: HashSet<String>,
    failing_inference: HashMap<String, String>,
    load_delay: Duration,
    load_counts: Mutex<HashMap<String, usize>>,
    pub generate_calls: Arc<AtomicUsize>,
}

impl StubProvider {
    pub fn new() -> StubProvider {
        StubProvider::default()
    }

    pub fn with_dictionary(mut self, model_identifier: &str, entries: &[(&str, &str)]) -> Self {
        self.dictionaries.insert(
            model_identifier.to_string(),
            entries
                .iter()
                .map(|(source, target)| (source.to_string(), target.to_string()))
                .collect(),
        );
        self
    }

    pub fn failing(mut self, model_identifier: &str) -> Self {
        self.failing.insert(model_identifier.to_string());
        self
    }

    pub fn failing_inference(mut self, model_identifier: &str, message: &str) -> Self {
        self.failing_inference
            .insert(model_identifier.to_string(), message.to_string());
        self
    }

    pub fn with_load_delay(mut self, load_delay: Duration) -> Self {
        self.load_delay = load_delay;
        self
    }

    pub fn load_count(&self, model_identifier: &str) -> usize {
        *self
            .load_counts
            .lock()
            .get(model_identifier)
            .unwrap_or(&0)
    }

    pub fn total_loads(&self) -> usize {
        self.load_counts.lock().values().sum()
    }

    pub fn generate_count(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }
}

impl ModelProvider for StubProvider {
    fn load(&self, model_identifier: &str) -> Result<ModelHandle, TranslationError> {
        *self
            .load_counts
            .lock()
            .entry(model_identifier.to_string())
            .or_insert(0) += 1;
        if !self.load_delay.is_zero() {
            thread::sleep(self.load_delay);
        }
        if self.failing.contains(model_identifier) {
            return Err(TranslationError::FileDownload(
                "connection refused".to_string(),
            ));
        }
        let vocab = Arc::new(Vocab::default());
        Ok(ModelHandle::new(
            model_identifier,
            WordTokenizer {
                vocab: vocab.clone(),
            },
            DictionaryGenerator {
                vocab,
                dictionary: self
                    .dictionaries
                    .get(model_identifier)
                    .cloned()
                    .unwrap_or_default(),
                failure: self.failing_inference.get(model_identifier).cloned(),
                calls: self.generate_calls.clone(),
            },
        ))
    }
}
