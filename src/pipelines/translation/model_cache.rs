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
use crate::pipelines::translation::ModelHandle;
use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// # Source of loaded models
/// Fetches and initializes the tokenizer and model for a model identifier.
pub trait ModelProvider: Send + Sync {
    /// Loads the model named `model_identifier`. May block for a long time (download,
    /// deserialization of the weights).
    fn load(&self, model_identifier: &str) -> Result<ModelHandle, TranslationError>;
}

impl<P: ModelProvider + ?Sized> ModelProvider for Box<P> {
    fn load(&self, model_identifier: &str) -> Result<ModelHandle, TranslationError> {
        P::load(self, model_identifier)
    }
}

impl<P: ModelProvider + ?Sized> ModelProvider for Arc<P> {
    fn load(&self, model_identifier: &str) -> Result<ModelHandle, TranslationError> {
        P::load(self, model_identifier)
    }
}

type LoadOutcome = Result<Arc<ModelHandle>, TranslationError>;

/// Completion latch of a load in progress, shared by the loading thread and the waiters.
#[derive(Default)]
struct InFlightLoad {
    outcome: Mutex<Option<LoadOutcome>>,
    done: Condvar,
}

impl InFlightLoad {
    fn complete(&self, outcome: LoadOutcome) {
        let mut slot = self.outcome.lock();
        *slot = Some(outcome);
        self.done.notify_all();
    }

    fn wait(&self) -> LoadOutcome {
        let mut slot = self.outcome.lock();
        loop {
            if let Some(outcome) = slot.as_ref() {
                return outcome.clone();
            }
            self.done.wait(&mut slot);
        }
    }
}

enum Slot {
    Loading(Arc<InFlightLoad>),
    Ready(Arc<ModelHandle>),
    Failed(TranslationError),
}

/// Releases the slot of a load whose provider panicked, so that waiters are not blocked forever.
struct LoadGuard<'a, P: ModelProvider> {
    cache: &'a ModelCache<P>,
    model_identifier: &'a str,
    in_flight: Arc<InFlightLoad>,
    completed: bool,
}

impl<P: ModelProvider> Drop for LoadGuard<'_, P> {
    fn drop(&mut self) {
        if !self.completed {
            self.cache.slots.lock().remove(self.model_identifier);
            self.in_flight.complete(Err(TranslationError::ModelLoad {
                model_identifier: self.model_identifier.to_string(),
                cause: "model provider panicked".to_string(),
            }));
        }
    }
}

/// # Cache of loaded models
///
/// Memoizes the models returned by a `ModelProvider`, one per model identifier:
/// - a model is loaded on the first `acquire` for its identifier and kept until the cache is dropped
///   (there is no eviction),
/// - concurrent `acquire` calls for the same identifier share a single load: one caller runs it,
///   the others block until it completes and receive the same handle (or the same error),
/// - loads of different identifiers run in parallel, the internal lock is never held while a model
///   is loading,
/// - failed loads are memoized as well: later calls for the identifier return the same
///   `ModelLoad` error without calling the provider again. Only a panicking provider leaves the
///   identifier free for a new attempt.
pub struct ModelCache<P: ModelProvider> {
    provider: P,
    slots: Mutex<HashMap<String, Slot>>,
}

enum Role {
    Leader(Arc<InFlightLoad>),
    Waiter(Arc<InFlightLoad>),
}

impl<P: ModelProvider> ModelCache<P> {
    pub fn new(provider: P) -> ModelCache<P> {
        ModelCache {
            provider,
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the loaded model for `model_identifier`, loading it if needed.
    ///
    /// # Arguments
    ///
    /// * `model_identifier` - Identifier of the model to load
    ///
    /// # Returns
    ///
    /// * Shared handle on the loaded model. Repeated calls return the same instance.
    /// * `TranslationError::ModelLoad` if the provider failed to load the model, now or on an
    /// earlier call
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> anyhow::Result<()> {
    /// # use opus_translate::pipelines::translation::{ModelCache, ModelHandle, ModelProvider};
    /// # use opus_translate::TranslationError;
    /// # struct MyProvider;
    /// # impl ModelProvider for MyProvider {
    /// #     fn load(&self, id: &str) -> Result<ModelHandle, TranslationError> { unimplemented!() }
    /// # }
    /// let cache = ModelCache::new(MyProvider);
    /// let first = cache.acquire("Helsinki-NLP/opus-mt-en-fr")?;
    /// let second = cache.acquire("Helsinki-NLP/opus-mt-en-fr")?;
    /// assert!(std::sync::Arc::ptr_eq(&first, &second));
    /// # Ok(())
    /// # }
    /// ```
    pub fn acquire(&self, model_identifier: &str) -> Result<Arc<ModelHandle>, TranslationError> {
        let role = {
            let mut slots = self.slots.lock();
            match slots.get(model_identifier) {
                Some(Slot::Ready(handle)) => {
                    debug!(model_identifier, "model cache hit");
                    return Ok(handle.clone());
                }
                Some(Slot::Failed(error)) => {
                    debug!(model_identifier, "model load failed previously");
                    return Err(error.clone());
                }
                Some(Slot::Loading(in_flight)) => Role::Waiter(in_flight.clone()),
                None => {
                    let in_flight = Arc::new(InFlightLoad::default());
                    slots.insert(
                        model_identifier.to_string(),
                        Slot::Loading(in_flight.clone()),
                    );
                    Role::Leader(in_flight)
                }
            }
        };

        match role {
            Role::Waiter(in_flight) => {
                debug!(model_identifier, "waiting for model load in progress");
                in_flight.wait()
            }
            Role::Leader(in_flight) => self.load(model_identifier, in_flight),
        }
    }

    fn load(&self, model_identifier: &str, in_flight: Arc<InFlightLoad>) -> LoadOutcome {
        let mut guard = LoadGuard {
            cache: self,
            model_identifier,
            in_flight,
            completed: false,
        };

        info!(model_identifier, "loading model");
        let start = Instant::now();
        let outcome = self
            .provider
            .load(model_identifier)
            .map(Arc::new)
            .map_err(|error| error.into_model_load(model_identifier));

        {
            let mut slots = self.slots.lock();
            match &outcome {
                Ok(handle) => {
                    info!(
                        model_identifier,
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "model loaded"
                    );
                    slots.insert(model_identifier.to_string(), Slot::Ready(handle.clone()));
                }
                Err(error) => {
                    warn!(model_identifier, %error, "model load failed");
                    slots.insert(model_identifier.to_string(), Slot::Failed(error.clone()));
                }
            }
        }
        guard.completed = true;
        guard.in_flight.complete(outcome.clone());
        outcome
    }

    /// Whether the model is loaded (a load in progress or a failed load does not count).
    pub fn is_loaded(&self, model_identifier: &str) -> bool {
        matches!(
            self.slots.lock().get(model_identifier),
            Some(Slot::Ready(_))
        )
    }

    /// Identifiers of the loaded models, sorted.
    pub fn loaded_models(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self
            .slots
            .lock()
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Ready(_)))
            .map(|(identifier, _)| identifier.clone())
            .collect();
        identifiers.sort();
        identifiers
    }

    /// Identifiers whose load failed, sorted.
    pub fn failed_models(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self
            .slots
            .lock()
            .iter()
            .filter(|(_, slot)| matches!(slot, Slot::Failed(_)))
            .map(|(identifier, _)| identifier.clone())
            .collect();
        identifiers.sort();
        identifiers
    }

    /// Number of loaded models.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}
