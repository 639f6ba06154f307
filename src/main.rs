// Copyright 2019-present Guillaume Becquin
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Command line front-end of the translation service.
//!
//! ```text
//! opus-translate --list
//! opus-translate --examples <language>
//! opus-translate <language> <text...>
//! opus-translate <language>            (translates stdin, line by line)
//! ```
//!
//! Environment:
//! - `OPUS_TRANSLATE_MODELS`: read the models from this directory instead of the model hub
//! - `OPUS_TRANSLATE_LANGUAGES`: JSON file replacing the built-in language table
//! - `RUST_LOG`: log filter (defaults to `opus_translate=info`)

use opus_translate::marian::MarianModelProvider;
use opus_translate::{LanguageRegistry, TranslationError, TranslationService};
use std::io::BufRead;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn usage(program: &str) -> String {
    format!(
        "usage: {0} --list | {0} --examples <language> | {0} <language> [text...]",
        program
    )
}

fn create_service() -> Result<TranslationService<MarianModelProvider>, TranslationError> {
    let registry = match std::env::var("OPUS_TRANSLATE_LANGUAGES") {
        Ok(path) => LanguageRegistry::from_file(path)?,
        Err(_) => LanguageRegistry::opus_mt_english(),
    };
    let provider = match std::env::var("OPUS_TRANSLATE_MODELS") {
        Ok(root) => MarianModelProvider::from_directory(root),
        Err(_) => MarianModelProvider::default(),
    };
    Ok(TranslationService::new(registry, provider))
}

pub fn main() -> Result<(), TranslationError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "opus_translate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("opus-translate");
    let service = create_service()?;

    match args.get(1).map(String::as_str) {
        None | Some("-h") | Some("--help") => {
            eprintln!("{}", usage(program));
        }
        Some("--list") => {
            for language in service.supported_languages() {
                println!(
                    "{}\t{} -> {}\t{}",
                    language.label(),
                    language.source_language_code,
                    language.target_language_code,
                    language.model_identifier
                );
            }
        }
        Some("--examples") => {
            let display_name = args.get(2).ok_or_else(|| {
                TranslationError::InvalidConfiguration(usage(program))
            })?;
            match service.translate_examples(display_name) {
                Ok(examples) => {
                    for (sentence, translation) in examples {
                        match translation {
                            Ok(translation) => println!("{}\t{}", sentence, translation),
                            Err(error) => println!("{}\t{}", sentence, error.user_message()),
                        }
                    }
                }
                Err(error) => eprintln!("{}", error.user_message()),
            }
        }
        Some(display_name) => {
            if args.len() > 2 {
                let text = args[2..].join(" ");
                println!("{}", service.translate_for_display(&text, display_name));
            } else {
                if let Err(error) = service.load_language(display_name) {
                    eprintln!("{}", error.user_message());
                    return Ok(());
                }
                for line in std::io::stdin().lock().lines() {
                    let line = line?;
                    println!("{}", service.translate_for_display(&line, display_name));
                }
            }
        }
    }
    Ok(())
}
