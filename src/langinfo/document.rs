//! The language-info document and its assembly.
//!
//! ```json
//! {
//!   "labels":    { "<key>": { "languageName": ..., "agree": ..., ... } },
//!   "languages": { "<id>":  { "charsets": [...], "labels": "<key>", "langTags": [...],
//!                             "englishName": ..., "localizedName": ...,
//!                             "doubleByteCharset": true } }
//! }
//! ```
//!
//! Languages with identical label text share one entry under `labels`.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use super::error::{Error, Result};
use super::tables::{Language, LanguageNames};
use crate::labels::{LabelSet, Labels, LanguageId, LanguageLabelsMap};

/// Everything known about one language, as written to the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageDescriptor {
    pub charsets: Vec<String>,
    /// Key into the document's `labels`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<String>,
    pub lang_tags: Vec<String>,
    pub english_name: String,
    pub localized_name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub double_byte_charset: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfoDocument {
    /// Label sets in the order they were first placed.
    pub labels: IndexMap<String, Labels>,
    pub languages: BTreeMap<LanguageId, LanguageDescriptor>,
}

impl LanguageInfoDocument {
    /// The labels a language refers to, if any.
    pub fn labels_for(&self, language: LanguageId) -> Option<&Labels> {
        let key = self.languages.get(&language)?.labels.as_ref()?;
        self.labels.get(key)
    }
}

/// Builds a document one language at a time.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: LanguageInfoDocument,
    keys: HashMap<Labels, String>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `labels` in the document and returns the key they live under.
    ///
    /// Identical labels already placed keep their key. Otherwise the first
    /// unused of the language's display tag and its other tags is taken,
    /// then `<displayTag>-2`, `<displayTag>-3` and so on.
    pub fn put_labels(&mut self, labels: &Labels, language: &Language) -> String {
        if let Some(key) = self.keys.get(labels) {
            return key.clone();
        }

        let taken = |key: &str| self.document.labels.contains_key(key);
        let key = std::iter::once(&language.display_lang_tag)
            .chain(&language.lang_tags)
            .find(|tag| !taken(tag))
            .cloned()
            .unwrap_or_else(|| {
                (2..)
                    .map(|n| format!("{}-{}", language.display_lang_tag, n))
                    .find(|candidate| !taken(candidate))
                    .unwrap_or_default()
            });

        debug!("Labels of language {} stored under '{}'", language.id, key);
        self.document.labels.insert(key.clone(), labels.clone());
        self.keys.insert(labels.clone(), key.clone());
        key
    }

    /// Adds a language's descriptor, placing its labels first when it has any.
    ///
    /// # Errors
    /// `MissingNameEntry` if the display tag has no row in the names table.
    pub fn add_language(
        &mut self,
        language: &Language,
        label_set: Option<&LabelSet>,
        names: &LanguageNames,
    ) -> Result<()> {
        let labels = label_set.map(|set| self.put_labels(set.labels(), language));

        let name = names
            .get(&language.display_lang_tag)
            .ok_or_else(|| Error::MissingNameEntry {
                lang_tag: language.display_lang_tag.clone(),
            })?;

        self.document.languages.insert(
            language.id,
            LanguageDescriptor {
                charsets: language.charsets.clone(),
                labels,
                lang_tags: language.lang_tags.clone(),
                english_name: name.english_name.clone(),
                localized_name: name.localized_name.clone(),
                double_byte_charset: language.double_byte_charset,
            },
        );
        Ok(())
    }

    pub fn finish(self) -> LanguageInfoDocument {
        self.document
    }
}

/// Merges the tables and extracted labels into one document.
///
/// Languages are visited in table order, which decides who gets first pick of a label key.
pub fn assemble(
    languages: &[Language],
    names: &LanguageNames,
    label_map: &LanguageLabelsMap,
) -> Result<LanguageInfoDocument> {
    let mut builder = DocumentBuilder::new();
    for language in languages {
        let label_set = label_map.get(&language.id).map(|set| set.as_ref());
        builder.add_language(language, label_set, names)?;
    }
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::labels::DecodedWith;
    use crate::langinfo::tables::LanguageName;

    fn language(id: u16, tags: &[&str], display: &str) -> Language {
        Language {
            id: LanguageId(id),
            lang_tags: tags.iter().map(|t| t.to_string()).collect(),
            charsets: vec!["macintosh".into()],
            display_lang_tag: display.into(),
            labels_resource_id: None,
            double_byte_charset: false,
        }
    }

    fn labels(name: &str) -> Labels {
        Labels::from_strings([name, "Agree", "Disagree", "Print", "Save", "Message"].map(String::from))
    }

    fn names(tags: &[&str]) -> LanguageNames {
        tags.iter()
            .map(|tag| {
                (
                    tag.to_string(),
                    LanguageName {
                        lang_tag: tag.to_string(),
                        english_name: format!("{} (English)", tag),
                        localized_name: format!("{} (native)", tag),
                    },
                )
            })
            .collect()
    }

    fn set(id: u16, labels: Labels) -> Arc<LabelSet> {
        Arc::new(LabelSet::new(LanguageId(id), 5000 + id as i16, DecodedWith::Charset("macintosh".into()), 0, labels))
    }

    #[test]
    fn identical_labels_share_a_key() {
        let en_us = language(0, &["en-US"], "en-US");
        let en_gb = language(2, &["en-GB"], "en-GB");
        let mut builder = DocumentBuilder::new();

        assert_eq!(builder.put_labels(&labels("English"), &en_us), "en-US");
        assert_eq!(builder.put_labels(&labels("English"), &en_gb), "en-US");
        assert_eq!(builder.finish().labels.len(), 1);
    }

    #[test]
    fn key_falls_back_through_tags_then_numbers() {
        let first = language(1, &["fr-FR", "fr"], "fr");
        let second = language(3, &["fr-CA", "fr"], "fr");
        let third = language(4, &["fr"], "fr");
        let mut builder = DocumentBuilder::new();

        assert_eq!(builder.put_labels(&labels("Français"), &first), "fr");
        assert_eq!(builder.put_labels(&labels("Français (Canada)"), &second), "fr-CA");
        assert_eq!(builder.put_labels(&labels("Français (Suisse)"), &third), "fr-2");
        assert_eq!(builder.put_labels(&labels("Français (Belgique)"), &third), "fr-3");
    }

    #[test]
    fn missing_name_entry_is_fatal() {
        let languages = [language(7, &["sv"], "sv")];
        let err = assemble(&languages, &names(&["en-US"]), &LanguageLabelsMap::new()).unwrap_err();
        assert!(matches!(err, Error::MissingNameEntry { lang_tag } if lang_tag == "sv"));
    }

    #[test]
    fn assembles_descriptors() {
        let mut ja = language(14, &["ja-JP", "ja"], "ja");
        ja.double_byte_charset = true;
        let languages = [language(0, &["en-US", "en"], "en-US"), ja];
        let mut label_map = LanguageLabelsMap::new();
        label_map.insert(LanguageId(14), set(14, labels("日本語")));

        let document = assemble(&languages, &names(&["en-US", "ja"]), &label_map).unwrap();

        assert_eq!(document.labels.keys().collect::<Vec<_>>(), vec!["ja"]);
        assert_eq!(document.labels_for(LanguageId(14)).map(|l| l.language_name.as_str()), Some("日本語"));
        assert_eq!(document.labels_for(LanguageId(0)), None);
        assert!(document.languages[&LanguageId(14)].double_byte_charset);

        let json = serde_json::to_value(&document).unwrap();
        let english = &json["languages"]["0"];
        assert_eq!(english.get("labels"), None);
        assert_eq!(english.get("doubleByteCharset"), None);
        assert_eq!(english["englishName"], "en-US (English)");
        assert_eq!(json["languages"]["14"]["labels"], "ja");
        assert_eq!(json["languages"]["14"]["doubleByteCharset"], true);
    }

    #[test]
    fn descriptor_fields_keep_their_order() {
        let mut ja = language(14, &["ja"], "ja");
        ja.double_byte_charset = true;
        let mut label_map = LanguageLabelsMap::new();
        label_map.insert(LanguageId(14), set(14, labels("日本語")));

        let document = assemble(&[ja], &names(&["ja"]), &label_map).unwrap();
        let json = serde_json::to_value(&document).unwrap();
        let keys: Vec<&str> = json["languages"]["14"].as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["charsets", "labels", "langTags", "englishName", "localizedName", "doubleByteCharset"]
        );
    }
}
