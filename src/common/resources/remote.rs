use super::*;
use crate::common::error::TranslationError;
use cached_path::{Cache, Options, ProgressBar};
use dirs::cache_dir;
use lazy_static::lazy_static;
use std::path::PathBuf;

/// # Remote resource that will be downloaded and cached locally on demand
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RemoteResource {
    /// Remote path/url for the resource
    pub url: String,
    /// Local subdirectory of the cache root where this resource is saved
    pub cache_subdir: String,
}

impl RemoteResource {
    /// Declares a file of a model hosted on a Hugging Face style hub, available at
    /// `{base_url}/{model_identifier}/resolve/main/{file_name}`. The file is cached under a
    /// subdirectory named after the model identifier.
    ///
    /// # Arguments
    ///
    /// * `base_url` - `&str` Root of the model hub (e.g. `https://huggingface.co`)
    /// * `model_identifier` - `&str` Model identifier (e.g. `Helsinki-NLP/opus-mt-en-fr`)
    /// * `file_name` - `&str` Name of the file in the model repository
    ///
    /// # Example
    ///
    /// ```no_run
    /// use opus_translate::resources::RemoteResource;
    /// let vocab_resource = RemoteResource::for_model(
    ///     "https://huggingface.co",
    ///     "Helsinki-NLP/opus-mt-en-fr",
    ///     "vocab.json",
    /// );
    /// ```
    pub fn for_model(base_url: &str, model_identifier: &str, file_name: &str) -> RemoteResource {
        RemoteResource {
            url: format!(
                "{}/{}/resolve/main/{}",
                base_url.trim_end_matches('/'),
                model_identifier,
                file_name
            ),
            cache_subdir: model_identifier.to_string(),
        }
    }
}

impl ResourceProvider for RemoteResource {
    /// Gets the local path for a remote resource.
    ///
    /// The remote resource is downloaded and cached. Then the path
    /// to the local cache is returned.
    ///
    /// # Returns
    ///
    /// * `PathBuf` pointing to the resource file
    fn get_local_path(&self) -> Result<PathBuf, TranslationError> {
        let cache = CACHE
            .as_ref()
            .map_err(|error| TranslationError::FileDownload(error.clone()))?;
        let cached_path = cache
            .cached_path_with_options(&self.url, &Options::default().subdir(&self.cache_subdir))?;
        Ok(cached_path)
    }
}

lazy_static! {
    /// `OPUS_TRANSLATE_CACHE` if set, otherwise `.opus-translate` in the user cache directory.
    static ref CACHE_DIRECTORY: PathBuf = _get_cache_directory();
    static ref CACHE: Result<Cache, String> = Cache::builder()
        .dir(CACHE_DIRECTORY.to_path_buf())
        .progress_bar(Some(ProgressBar::Light))
        .build()
        .map_err(|error| error.to_string());
}

fn _get_cache_directory() -> PathBuf {
    match std::env::var("OPUS_TRANSLATE_CACHE") {
        Ok(value) => PathBuf::from(value),
        Err(_) => {
            let mut home = cache_dir().unwrap_or_else(std::env::temp_dir);
            home.push(".opus-translate");
            home
        }
    }
}
