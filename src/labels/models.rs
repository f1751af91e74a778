//! Data structures produced by the label extractor.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::rsrc::ResourceId;

/// Small integer joining locale-table rows to label resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageId(pub u16);

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for LanguageId {
    fn from(id: u16) -> Self {
        LanguageId(id)
    }
}

/// The position of each string in a label resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelRole {
    LanguageName,
    Agree,
    Disagree,
    Print,
    Save,
    Message,
}

impl LabelRole {
    /// All roles, in the order they are stored in the string list.
    pub const ALL: [LabelRole; 6] = [
        LabelRole::LanguageName,
        LabelRole::Agree,
        LabelRole::Disagree,
        LabelRole::Print,
        LabelRole::Save,
        LabelRole::Message,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            LabelRole::LanguageName => "languageName",
            LabelRole::Agree => "agree",
            LabelRole::Disagree => "disagree",
            LabelRole::Print => "print",
            LabelRole::Save => "save",
            LabelRole::Message => "message",
        }
    }
}

/// The decoded strings of one label resource.
///
/// Equality is by content, which is what the consolidation stage uses to
/// share one label entry between languages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Labels {
    pub language_name: String,
    pub agree: String,
    pub disagree: String,
    pub print: String,
    pub save: String,
    pub message: String,
}

impl Labels {
    /// Builds labels from strings in storage order. Missing roles are empty, extras are dropped.
    pub fn from_strings<I>(strings: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut labels = Labels::default();
        for (role, text) in LabelRole::ALL.iter().zip(strings) {
            *labels.get_mut(*role) = text;
        }
        labels
    }

    pub fn get(&self, role: LabelRole) -> &str {
        match role {
            LabelRole::LanguageName => &self.language_name,
            LabelRole::Agree => &self.agree,
            LabelRole::Disagree => &self.disagree,
            LabelRole::Print => &self.print,
            LabelRole::Save => &self.save,
            LabelRole::Message => &self.message,
        }
    }

    fn get_mut(&mut self, role: LabelRole) -> &mut String {
        match role {
            LabelRole::LanguageName => &mut self.language_name,
            LabelRole::Agree => &mut self.agree,
            LabelRole::Disagree => &mut self.disagree,
            LabelRole::Print => &mut self.print,
            LabelRole::Save => &mut self.save,
            LabelRole::Message => &mut self.message,
        }
    }
}

/// How a label set's text was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DecodedWith {
    /// Strictly decoded with this candidate charset.
    Charset(String),
    /// No candidate decoded cleanly; decoded leniently with this charset.
    Fallback(String),
}

impl DecodedWith {
    pub fn charset(&self) -> &str {
        match self {
            DecodedWith::Charset(name) | DecodedWith::Fallback(name) => name,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, DecodedWith::Fallback(_))
    }
}

impl fmt::Display for DecodedWith {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecodedWith::Charset(name) => write!(f, "{}", name),
            DecodedWith::Fallback(name) => write!(f, "{} (lenient)", name),
        }
    }
}

/// The decoded labels for one language.
///
/// Immutable once built. The extractor hands these out behind [`Arc`] so a
/// consumer may share one set between several languages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelSet {
    language: LanguageId,
    resource_id: ResourceId,
    decoded_with: DecodedWith,
    raw_len: usize,
    labels: Labels,
}

impl LabelSet {
    pub fn new(
        language: LanguageId,
        resource_id: ResourceId,
        decoded_with: DecodedWith,
        raw_len: usize,
        labels: Labels,
    ) -> Self {
        Self {
            language,
            resource_id,
            decoded_with,
            raw_len,
            labels,
        }
    }

    /// The language this set was decoded for.
    pub fn language(&self) -> LanguageId {
        self.language
    }

    /// The label resource the bytes came from.
    pub fn resource_id(&self) -> ResourceId {
        self.resource_id
    }

    pub fn decoded_with(&self) -> &DecodedWith {
        &self.decoded_with
    }

    /// Length of the raw resource payload.
    pub fn raw_len(&self) -> usize {
        self.raw_len
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    /// True when both sets carry identical label text.
    pub fn same_labels(&self, other: &LabelSet) -> bool {
        self.labels == other.labels
    }
}

/// Extraction result, keyed by language.
pub type LanguageLabelsMap = BTreeMap<LanguageId, Arc<LabelSet>>;
