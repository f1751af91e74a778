//! Label extraction: resource container in, per-language label sets out.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info, trace};

use super::charset::{self, DEFAULT_CHARSET};
use super::decoder::{LabelDecoder, Outcome};
use super::error::{FailureReason, LabelError};
use super::lookup::{CharsetLookup, ExtractionObserver, LanguageLookup};
use super::models::{DecodedWith, LabelSet, Labels, LanguageId, LanguageLabelsMap};
use super::string_list;
use crate::rsrc::{ResourceContainer, ResourceEntry, ResourceType, Result, RsrcError};

/// What to do when the resource file cannot be found or read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingFilePolicy {
    /// Report through the observer and return an empty map.
    #[default]
    Tolerate,
    /// Return the error.
    Fail,
}

/// Inputs for [`extract_labels`].
pub struct ExtractConfig<'a> {
    pub resources_file: PathBuf,
    /// Type of the label resources. Defaults to `STR#`.
    pub resource_type: ResourceType,
    pub languages: &'a dyn LanguageLookup,
    pub charsets: &'a dyn CharsetLookup,
    pub observer: &'a mut dyn ExtractionObserver,
    pub missing_file: MissingFilePolicy,
}

impl<'a> ExtractConfig<'a> {
    pub fn new(
        resources_file: impl Into<PathBuf>,
        languages: &'a dyn LanguageLookup,
        charsets: &'a dyn CharsetLookup,
        observer: &'a mut dyn ExtractionObserver,
    ) -> Self {
        Self {
            resources_file: resources_file.into(),
            resource_type: ResourceType::STRING_LIST,
            languages,
            charsets,
            observer,
            missing_file: MissingFilePolicy::default(),
        }
    }

    pub fn with_missing_file(mut self, policy: MissingFilePolicy) -> Self {
        self.missing_file = policy;
        self
    }
}

/// Opens the resource file and extracts the labels of every claimed resource.
///
/// # Errors
/// - `ResourceFileNotFound` only under [`MissingFilePolicy::Fail`]; under
///   `Tolerate` the observer is told once and an empty map is returned.
/// - Any malformed-container error, always.
///
/// Per-resource decoding problems never fail the call; they go to the observer.
pub fn extract_labels(config: ExtractConfig<'_>) -> Result<LanguageLabelsMap> {
    let container = match ResourceContainer::open(&config.resources_file) {
        Ok(container) => container,
        Err(e @ RsrcError::ResourceFileNotFound { .. }) if config.missing_file == MissingFilePolicy::Tolerate => {
            config.observer.on_resource_file_not_found(e);
            return Ok(BTreeMap::new());
        }
        Err(e) => return Err(e),
    };

    Ok(extract_from_container(
        &container,
        config.resource_type,
        config.languages,
        config.charsets,
        config.observer,
    ))
}

/// Extracts labels from an already opened container.
///
/// Resources no language claims are skipped. When two resources resolve to
/// the same language the later one wins and the observer is told.
pub fn extract_from_container(
    container: &ResourceContainer,
    resource_type: ResourceType,
    languages: &dyn LanguageLookup,
    charsets: &dyn CharsetLookup,
    observer: &mut dyn ExtractionObserver,
) -> LanguageLabelsMap {
    let mut map = LanguageLabelsMap::new();

    for entry in container.iter_type(resource_type) {
        let Some(language) = languages.language_id(entry.id) else {
            trace!("{} {} is not claimed by any language; skipping", resource_type, entry.id);
            continue;
        };

        let label_set = decode_entry(&entry, language, charsets, observer);
        debug!(
            "Language {}: labels from {} {} decoded with {}",
            language,
            resource_type,
            entry.id,
            label_set.decoded_with()
        );

        if let Some(previous) = map.insert(language, Arc::new(label_set)) {
            observer.on_duplicate_language(LabelError::DuplicateLanguage {
                language,
                replaced: previous.resource_id(),
                replacement: entry.id,
            });
        }
    }

    info!("Extracted labels for {} languages", map.len());
    map
}

fn decode_entry(
    entry: &ResourceEntry<'_>,
    language: LanguageId,
    charsets: &dyn CharsetLookup,
    observer: &mut dyn ExtractionObserver,
) -> LabelSet {
    let mut candidates = charsets.charsets(language);
    if candidates.is_empty() {
        candidates.push(DEFAULT_CHARSET.to_string());
    }
    let declared_double_byte = charsets.double_byte(language);
    let list = string_list::parse(entry.data);

    let reason = match list.problem {
        Some(problem) => FailureReason::Structure(problem),
        None => match LabelDecoder::new(&list.strings, &candidates, declared_double_byte).run() {
            Outcome::Accepted {
                index,
                charset,
                labels,
                rejected,
            } => {
                if index > 0
                    && let Some(first) = rejected.into_iter().next()
                {
                    observer.on_wrong_charset(LabelError::WrongCharsetSelected {
                        language,
                        resource_id: entry.id,
                        attempted: first.charset,
                        reason: first.reason,
                        accepted: charset.clone(),
                        raw: entry.data.to_vec(),
                    });
                }
                return LabelSet::new(
                    language,
                    entry.id,
                    DecodedWith::Charset(charset),
                    entry.data.len(),
                    labels,
                );
            }
            Outcome::Exhausted { rejected } => FailureReason::AllCandidatesRejected(rejected),
        },
    };

    let raw_labels = lenient_label_set(entry, language, &candidates, declared_double_byte, &list.strings);
    let error = LabelError::LabelDecodingFailure {
        language,
        resource_id: entry.id,
        attempted: candidates,
        reason,
        raw: entry.data.to_vec(),
    };
    observer.on_decoding_failure(error, raw_labels)
}

/// Best-effort decode of whatever strings were read.
///
/// Uses the first candidate whose width matches the language, else the first
/// resolvable candidate, else the default charset.
fn lenient_label_set(
    entry: &ResourceEntry<'_>,
    language: LanguageId,
    candidates: &[String],
    declared_double_byte: Option<bool>,
    strings: &[&[u8]],
) -> LabelSet {
    let resolved: Vec<_> = candidates
        .iter()
        .filter_map(|name| charset::resolve(name).map(|encoding| (name.as_str(), encoding)))
        .collect();
    let (name, encoding) = resolved
        .iter()
        .find(|&&(_, encoding)| charset::check_width(encoding, declared_double_byte).is_ok())
        .or_else(|| resolved.first())
        .copied()
        .unwrap_or((DEFAULT_CHARSET, encoding_rs::MACINTOSH));

    let labels = Labels::from_strings(strings.iter().map(|bytes| charset::decode_lenient(encoding, bytes)));
    LabelSet::new(
        language,
        entry.id,
        DecodedWith::Fallback(name.to_string()),
        entry.data.len(),
        labels,
    )
}
