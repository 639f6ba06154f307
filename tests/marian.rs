#![cfg(feature = "torch")]

use opus_translate::marian::{MarianModelProvider, HUGGING_FACE_HUB};
use opus_translate::pipelines::translation::{LanguageRegistry, TranslationService};
use opus_translate::TranslationError;
use tch::Device;

#[test]
#[cfg_attr(not(feature = "all-tests"), ignore)]
fn test_translation() -> anyhow::Result<()> {
    let service = TranslationService::new(
        LanguageRegistry::opus_mt_english(),
        MarianModelProvider::from_hub(HUGGING_FACE_HUB).with_device(Device::cuda_if_available()),
    );

    let output = service.translate_with_language("Good morning", "French")?;

    assert!(!output.is_empty());
    assert!(!output.contains("</s>"));
    assert!(!output.contains("<pad>"));
    Ok(())
}

#[test]
fn test_missing_model_directory() {
    let root = tempfile::tempdir().unwrap();
    let service = TranslationService::new(
        LanguageRegistry::opus_mt_english(),
        MarianModelProvider::from_directory(root.path()).with_device(Device::Cpu),
    );

    match service.translate_with_language("Good morning", "French") {
        Err(TranslationError::ModelLoad {
            model_identifier, ..
        }) => assert_eq!(model_identifier, "Helsinki-NLP/opus-mt-en-fr"),
        other => panic!("unexpected result {:?}", other),
    }
}
