use crate::common::error::TranslationError;
use crate::resources::ResourceProvider;
use std::path::PathBuf;

/// # Local resource
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LocalResource {
    /// Local path for the resource
    pub local_path: PathBuf,
}

impl ResourceProvider for LocalResource {
    /// Gets the path for a local resource.
    ///
    /// Fails with `TranslationError::Io` if the file does not exist, so that missing model files
    /// are reported when the model is loaded rather than deep inside the tokenizer or the model.
    ///
    /// # Returns
    ///
    /// * `PathBuf` pointing to the resource file
    ///
    /// # Example
    ///
    /// ```no_run
    /// use opus_translate::resources::{LocalResource, ResourceProvider};
    /// use std::path::PathBuf;
    /// let config_resource = LocalResource {
    ///     local_path: PathBuf::from("path/to/config.json"),
    /// };
    /// let config_path = config_resource.get_local_path();
    /// ```
    fn get_local_path(&self) -> Result<PathBuf, TranslationError> {
        if !self.local_path.is_file() {
            return Err(TranslationError::Io(format!(
                "resource file not found: {}",
                self.local_path.display()
            )));
        }
        Ok(self.local_path.clone())
    }
}

impl From<PathBuf> for LocalResource {
    fn from(local_path: PathBuf) -> Self {
        Self { local_path }
    }
}
