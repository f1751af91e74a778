#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use sla_langinfo::labels::{ExtractionObserver, LabelError, LabelSet};
use sla_langinfo::rsrc::RsrcError;
use sla_langinfo::rsrc::builder::{ContainerBuilder, string_list};

pub const ENGLISH: [&[u8]; 6] = [b"English", b"Agree", b"Disagree", b"Print", b"Save...", b"If you agree, click Agree."];

// Shift_JIS: "日本語", "同意します", "同意しません", then ASCII roles.
pub const JAPANESE: [&[u8]; 6] = [
    b"\x93\xfa\x96\x7b\x8c\xea",
    b"\x93\xaf\x88\xd3\x82\xb5\x82\xdc\x82\xb7",
    b"\x93\xaf\x88\xd3\x82\xb5\x82\xdc\x82\xb9\x82\xf1",
    b"Print",
    b"Save",
    b"License",
];

/// Records every callback; decoding failures are answered by `replacement` when set.
#[derive(Default)]
pub struct Recorder {
    pub wrong_charset: Vec<LabelError>,
    pub decoding_failures: Vec<LabelError>,
    pub not_found: Vec<RsrcError>,
    pub duplicates: Vec<LabelError>,
    pub replacement: Option<LabelSet>,
}

impl ExtractionObserver for Recorder {
    fn on_wrong_charset(&mut self, error: LabelError) {
        self.wrong_charset.push(error);
    }

    fn on_decoding_failure(&mut self, error: LabelError, raw_labels: LabelSet) -> LabelSet {
        self.decoding_failures.push(error);
        self.replacement.clone().unwrap_or(raw_labels)
    }

    fn on_resource_file_not_found(&mut self, error: RsrcError) {
        self.not_found.push(error);
    }

    fn on_duplicate_language(&mut self, error: LabelError) {
        self.duplicates.push(error);
    }
}

/// Resources 5 (English, Mac Roman) and 7 (Japanese, Shift_JIS).
pub fn two_language_container() -> Vec<u8> {
    ContainerBuilder::new()
        .resource(b"STR#", 5, Some("English"), &string_list(&ENGLISH))
        .resource(b"STR#", 7, Some("Japanese"), &string_list(&JAPANESE))
        .build()
}

pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}
