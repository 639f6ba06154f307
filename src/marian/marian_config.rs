// Copyright 2018-2020 The HuggingFace Inc. team.
// Copyright 2020 Marian Team Authors
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

use crate::Config;
use serde::{Deserialize, Serialize};

/// Files making up an exported OPUS-MT model, relative to the model root.
pub struct MarianFiles;

impl MarianFiles {
    pub const CONFIG: &'static str = "config.json";
    pub const VOCAB: &'static str = "vocab.json";
    pub const SOURCE_SPM: &'static str = "source.spm";
    /// Default name of the TorchScript export of the model
    pub const TORCHSCRIPT_MODEL: &'static str = "traced_model.pt";
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
/// # Marian generation configuration
/// Subset of the Hugging Face `config.json` of a Marian model needed to run generation. Other
/// fields of the file are ignored.
pub struct MarianGenerationConfig {
    pub decoder_start_token_id: i64,
    pub eos_token_id: i64,
    pub pad_token_id: i64,
    #[serde(default = "default_max_length")]
    pub max_length: i64,
}

fn default_max_length() -> i64 {
    512
}

impl Config for MarianGenerationConfig {}

impl Default for MarianGenerationConfig {
    fn default() -> Self {
        MarianGenerationConfig {
            decoder_start_token_id: 59513,
            eos_token_id: 0,
            pad_token_id: 59513,
            max_length: default_max_length(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    #[test]
    fn reads_hugging_face_config() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(
            file,
            r#"{{
                "architectures": ["MarianMTModel"],
                "d_model": 512,
                "decoder_start_token_id": 59513,
                "eos_token_id": 0,
                "pad_token_id": 59513,
                "vocab_size": 59514
            }}"#
        )?;
        let config = MarianGenerationConfig::from_file(file.path())?;
        assert_eq!(config, MarianGenerationConfig::default());
        Ok(())
    }
}
