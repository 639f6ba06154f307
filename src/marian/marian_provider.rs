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
use crate::marian::{
    MarianFiles, MarianGenerationConfig, MarianTokenizerAdapter, TorchScriptGenerator,
};
use crate::pipelines::translation::{ModelHandle, ModelProvider};
#[cfg(feature = "remote")]
use crate::resources::RemoteResource;
use crate::resources::{LocalResource, ResourceProvider};
use crate::Config;
use std::path::PathBuf;
use tch::Device;
use tracing::debug;

/// Default model hub
pub const HUGGING_FACE_HUB: &str = "https://huggingface.co";

/// # Location of the model files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Files downloaded from `{base_url}/{model_identifier}/resolve/main/{file}`
    #[cfg(feature = "remote")]
    Hub { base_url: String },
    /// Files read from `{root}/{model_identifier}/{file}`
    Directory { root: PathBuf },
}

/// # Provider of OPUS-MT Marian models
///
/// Loads, for a model identifier such as `Helsinki-NLP/opus-mt-en-fr`:
/// - `vocab.json` and `source.spm` into a `MarianTokenizerAdapter`,
/// - `config.json` and the TorchScript export of the model into a `TorchScriptGenerator`.
#[derive(Debug, Clone)]
pub struct MarianModelProvider {
    source: ModelSource,
    model_file: String,
    device: Device,
}

impl MarianModelProvider {
    pub fn new(source: ModelSource) -> MarianModelProvider {
        MarianModelProvider {
            source,
            model_file: MarianFiles::TORCHSCRIPT_MODEL.to_string(),
            device: Device::cuda_if_available(),
        }
    }

    /// Reads the models from a hub at `base_url` (downloaded files are cached locally).
    #[cfg(feature = "remote")]
    pub fn from_hub(base_url: &str) -> MarianModelProvider {
        MarianModelProvider::new(ModelSource::Hub {
            base_url: base_url.to_string(),
        })
    }

    /// Reads the models from a local directory holding one subdirectory per model identifier.
    pub fn from_directory<P: Into<PathBuf>>(root: P) -> MarianModelProvider {
        MarianModelProvider::new(ModelSource::Directory { root: root.into() })
    }

    /// Sets the name of the TorchScript file (`traced_model.pt` by default).
    pub fn with_model_file(mut self, model_file: &str) -> MarianModelProvider {
        self.model_file = model_file.to_string();
        self
    }

    pub fn with_device(mut self, device: Device) -> MarianModelProvider {
        self.device = device;
        self
    }

    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    fn resource(&self, model_identifier: &str, file_name: &str) -> Box<dyn ResourceProvider> {
        match &self.source {
            #[cfg(feature = "remote")]
            ModelSource::Hub { base_url } => Box::new(RemoteResource::for_model(
                base_url,
                model_identifier,
                file_name,
            )),
            ModelSource::Directory { root } => Box::new(LocalResource {
                local_path: root.join(model_identifier).join(file_name),
            }),
        }
    }

    fn local_path(
        &self,
        model_identifier: &str,
        file_name: &str,
    ) -> Result<PathBuf, TranslationError> {
        let path = self.resource(model_identifier, file_name).get_local_path()?;
        debug!(model_identifier, path = %path.display(), "resolved model file");
        Ok(path)
    }
}

impl Default for MarianModelProvider {
    #[cfg(feature = "remote")]
    fn default() -> Self {
        MarianModelProvider::from_hub(HUGGING_FACE_HUB)
    }

    #[cfg(not(feature = "remote"))]
    fn default() -> Self {
        MarianModelProvider::from_directory("models")
    }
}

fn validate_identifier(model_identifier: &str) -> Result<(), TranslationError> {
    if model_identifier.trim().is_empty()
        || model_identifier.starts_with('/')
        || model_identifier.split('/').any(|part| part == ".." || part.is_empty())
    {
        return Err(TranslationError::InvalidConfiguration(format!(
            "invalid model identifier \"{}\"",
            model_identifier
        )));
    }
    Ok(())
}

impl ModelProvider for MarianModelProvider {
    fn load(&self, model_identifier: &str) -> Result<ModelHandle, TranslationError> {
        validate_identifier(model_identifier)?;

        let vocab_path = self.local_path(model_identifier, MarianFiles::VOCAB)?;
        let spm_path = self.local_path(model_identifier, MarianFiles::SOURCE_SPM)?;
        let config_path = self.local_path(model_identifier, MarianFiles::CONFIG)?;
        let model_path = self.local_path(model_identifier, &self.model_file)?;

        let tokenizer = MarianTokenizerAdapter::from_files(vocab_path, spm_path)?;
        let config = MarianGenerationConfig::from_file(config_path)?;
        let generator = TorchScriptGenerator::new(model_path, config, self.device)?;

        Ok(ModelHandle::new(model_identifier, tokenizer, generator))
    }
}
