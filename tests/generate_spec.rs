mod common;

use std::path::Path;

use common::{ENGLISH, JAPANESE, write_file};
use pretty_assertions::assert_eq;
use serde_json::json;
use sla_langinfo::labels::{LabelError, LanguageId, MissingFilePolicy};
use sla_langinfo::langinfo::{Error, GeneratorConfig, Warning, generate, write_document};
use sla_langinfo::rsrc::builder::{ContainerBuilder, string_list};
use tempfile::{TempDir, tempdir};

const LANGUAGES: &str = "\
id\tlangTags\tcharsets\tdisplayLangTag\tlabelsResourceID\tdoubleByteCharset
# English variants share one label set
10\ten-US,en\tmac-roman\t\t5\t
30\ten-GB\tmac-roman\t\t8\t
20\tja-JP,ja\tmac-roman,shift-jis\tja\t7\tx
40\tis\tmac-roman
";

const NAMES: &str = "\
langTag\tenglishName\tlocalizedName
en-US\tEnglish\tEnglish
en-GB\tEnglish (UK)\tEnglish (UK)
ja\tJapanese\t日本語
is\tIcelandic\tÍslenska
";

fn fixture(resources: Option<&[u8]>) -> (TempDir, GeneratorConfig) {
    let dir = tempdir().unwrap();
    let languages_table = write_file(dir.path(), "Languages.tsv", LANGUAGES.as_bytes());
    let language_names_table = write_file(dir.path(), "Language names.tsv", NAMES.as_bytes());
    let resources_file = match resources {
        Some(bytes) => write_file(dir.path(), "SLAResources", bytes),
        None => dir.path().join("SLAResources"),
    };
    let config = GeneratorConfig {
        resources_file: Some(resources_file),
        languages_table,
        language_names_table,
        missing_resources: MissingFilePolicy::Tolerate,
    };
    (dir, config)
}

fn resources() -> Vec<u8> {
    ContainerBuilder::new()
        .resource(b"STR#", 5, None, &string_list(&ENGLISH))
        .resource(b"STR#", 7, None, &string_list(&JAPANESE))
        .resource(b"STR#", 8, None, &string_list(&ENGLISH))
        .build()
}

#[test]
fn generates_consolidated_document() {
    let (_dir, config) = fixture(Some(&resources()));
    let mut warnings = Vec::new();

    let document = generate(&config, &mut |w| warnings.push(w)).unwrap();

    let mut out = Vec::new();
    write_document(&document, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

    assert_eq!(
        value,
        json!({
            "labels": {
                "en-US": {
                    "languageName": "English",
                    "agree": "Agree",
                    "disagree": "Disagree",
                    "print": "Print",
                    "save": "Save...",
                    "message": "If you agree, click Agree."
                },
                "ja": {
                    "languageName": "日本語",
                    "agree": "同意します",
                    "disagree": "同意しません",
                    "print": "Print",
                    "save": "Save",
                    "message": "License"
                }
            },
            "languages": {
                "10": {
                    "charsets": ["mac-roman"],
                    "labels": "en-US",
                    "langTags": ["en-US", "en"],
                    "englishName": "English",
                    "localizedName": "English"
                },
                "20": {
                    "charsets": ["mac-roman", "shift-jis"],
                    "labels": "ja",
                    "langTags": ["ja-JP", "ja"],
                    "englishName": "Japanese",
                    "localizedName": "日本語",
                    "doubleByteCharset": true
                },
                "30": {
                    "charsets": ["mac-roman"],
                    "labels": "en-US",
                    "langTags": ["en-GB"],
                    "englishName": "English (UK)",
                    "localizedName": "English (UK)"
                },
                "40": {
                    "charsets": ["mac-roman"],
                    "langTags": ["is"],
                    "englishName": "Icelandic",
                    "localizedName": "Íslenska"
                }
            }
        })
    );

    assert_eq!(warnings.len(), 1);
    assert!(matches!(
        &warnings[0],
        Warning::Labels(LabelError::WrongCharsetSelected { language: LanguageId(20), .. })
    ));
}

#[test]
fn output_is_byte_identical_across_runs() {
    let (_dir, config) = fixture(Some(&resources()));
    let render = || {
        let document = generate(&config, &mut |_| {}).unwrap();
        let mut out = Vec::new();
        write_document(&document, &mut out).unwrap();
        out
    };
    assert_eq!(render(), render());
}

#[test]
fn missing_resources_yield_document_without_labels() {
    let (_dir, config) = fixture(None);
    let mut warnings = Vec::new();

    let document = generate(&config, &mut |w| warnings.push(w)).unwrap();

    assert!(document.labels.is_empty());
    assert_eq!(document.languages.len(), 4);
    assert!(document.languages.values().all(|l| l.labels.is_none()));
    assert_eq!(warnings.len(), 1);
    assert!(matches!(warnings[0], Warning::Resources(_)));
}

#[test]
fn strict_policy_makes_missing_resources_fatal() {
    let (_dir, mut config) = fixture(None);
    config.missing_resources = MissingFilePolicy::Fail;

    let err = generate(&config, &mut |_| {}).unwrap_err();
    assert!(matches!(err, Error::Resources(_)));
}

#[test]
fn no_resource_file_skips_extraction() {
    let (_dir, mut config) = fixture(None);
    config.resources_file = None;
    let mut warnings = Vec::new();

    let document = generate(&config, &mut |w| warnings.push(w)).unwrap();
    assert!(document.labels.is_empty());
    assert!(warnings.is_empty());
}

#[test]
fn missing_name_entry_aborts() {
    let (dir, mut config) = fixture(Some(&resources()));
    config.language_names_table = write_file(
        dir.path(),
        "Short names.tsv",
        b"langTag\tenglishName\tlocalizedName\nen-US\tEnglish\tEnglish\n",
    );

    let err = generate(&config, &mut |_| {}).unwrap_err();
    assert!(matches!(err, Error::MissingNameEntry { ref lang_tag } if lang_tag == "en-GB"));
}

#[test]
fn missing_table_is_a_table_error() {
    let (_dir, mut config) = fixture(Some(&resources()));
    config.languages_table = Path::new("/nonexistent/Languages.tsv").to_path_buf();

    let err = generate(&config, &mut |_| {}).unwrap_err();
    assert!(err.is_table_error());
}
