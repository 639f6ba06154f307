// Copyright 2019-present, Laurent Mazare.
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
use crate::marian::MarianGenerationConfig;
use crate::pipelines::translation::Seq2SeqGenerator;
use parking_lot::Mutex;
use std::path::Path;
use tch::{CModule, Device, Tensor};

/// # Generator running a TorchScript export of a Marian model
///
/// The exported module takes `(input_ids, attention_mask, decoder_input_ids)`, each of shape
/// `[1, sequence_length]`, and returns the logits of shape `[1, decoder_length, vocab_size]`.
/// Tokens are generated greedily until the end of sequence token or `max_length` is reached.
///
/// `CModule` cannot be called from several threads at once: calls to `generate` are serialized
/// per generator.
pub struct TorchScriptGenerator {
    module: Mutex<CModule>,
    config: MarianGenerationConfig,
    device: Device,
}

impl TorchScriptGenerator {
    /// Loads a TorchScript module on `device`.
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the TorchScript file
    /// * `config` - Special token ids and maximum output length
    /// * `device` - Device to run the model on
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> anyhow::Result<()> {
    /// use opus_translate::marian::{MarianGenerationConfig, TorchScriptGenerator};
    /// use opus_translate::Config;
    /// use tch::Device;
    ///
    /// let config = MarianGenerationConfig::from_file("path/to/config.json")?;
    /// let generator =
    ///     TorchScriptGenerator::new("path/to/traced_model.pt", config, Device::cuda_if_available())?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new<P: AsRef<Path>>(
        model_path: P,
        config: MarianGenerationConfig,
        device: Device,
    ) -> Result<TorchScriptGenerator, TranslationError> {
        let mut module = CModule::load_on_device(model_path.as_ref(), device)?;
        module.set_eval();
        Ok(TorchScriptGenerator {
            module: Mutex::new(module),
            config,
            device,
        })
    }

    pub fn config(&self) -> &MarianGenerationConfig {
        &self.config
    }

    fn greedy_decode(&self, module: &CModule, input_ids: &[i64]) -> Result<Vec<i64>, TranslationError> {
        let input = Tensor::from_slice(input_ids)
            .unsqueeze(0)
            .to_device(self.device);
        let attention_mask = input.ones_like();

        let mut output_ids = vec![self.config.decoder_start_token_id];
        while (output_ids.len() as i64) < self.config.max_length {
            let decoder_input = Tensor::from_slice(&output_ids)
                .unsqueeze(0)
                .to_device(self.device);
            let logits = module.forward_ts(&[&input, &attention_mask, &decoder_input])?;
            let next_token = logits
                .f_select(1, -1)?
                .f_argmax(-1, false)?
                .f_int64_value(&[0])?;
            output_ids.push(next_token);
            if next_token == self.config.eos_token_id {
                break;
            }
        }
        Ok(output_ids)
    }
}

impl Seq2SeqGenerator for TorchScriptGenerator {
    fn generate(&self, input_ids: &[i64]) -> Result<Vec<i64>, TranslationError> {
        if input_ids.is_empty() {
            return Ok(vec![]);
        }
        let module = self.module.lock();
        tch::no_grad(|| self.greedy_decode(&module, input_ids))
    }
}
