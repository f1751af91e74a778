//! Per-resource charset selection.
//!
//! Each label resource is decoded by a small state machine that walks the
//! candidate charsets in order:
//!
//! ```text
//! Untried ──▶ Trying(0) ──reject──▶ Trying(1) ──reject──▶ … ──▶ Exhausted
//!                │                      │
//!                └──────accept──────────┴──────────────────────▶ Accepted
//! ```
//!
//! `Accepted` and `Exhausted` are terminal.

use log::trace;

use super::charset::{self, Rejection};
use super::error::CandidateRejection;
use super::models::{LabelRole, Labels};

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Untried,
    Trying(usize),
    Accepted { index: usize, labels: Labels },
    Exhausted,
}

/// The terminal result of decoding one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted {
        /// Position of the accepted charset in the candidate list.
        index: usize,
        charset: String,
        labels: Labels,
        /// Earlier candidates, in the order they were rejected.
        rejected: Vec<CandidateRejection>,
    },
    Exhausted {
        rejected: Vec<CandidateRejection>,
    },
}

/// Walks the candidate charsets for one label resource.
#[derive(Debug)]
pub struct LabelDecoder<'a> {
    strings: &'a [&'a [u8]],
    candidates: &'a [String],
    declared_double_byte: Option<bool>,
    state: State,
    rejected: Vec<CandidateRejection>,
}

impl<'a> LabelDecoder<'a> {
    /// `candidates` should not be empty; an empty list goes straight to `Exhausted`.
    pub fn new(strings: &'a [&'a [u8]], candidates: &'a [String], declared_double_byte: Option<bool>) -> Self {
        Self {
            strings,
            candidates,
            declared_double_byte,
            state: State::Untried,
            rejected: Vec::new(),
        }
    }

    fn is_terminal(&self) -> bool {
        matches!(self.state, State::Accepted { .. } | State::Exhausted)
    }

    /// Advances one transition. Does nothing in a terminal state.
    fn step(&mut self) {
        self.state = match std::mem::replace(&mut self.state, State::Exhausted) {
            State::Untried if self.candidates.is_empty() => State::Exhausted,
            State::Untried => State::Trying(0),
            State::Trying(index) => {
                let candidates = self.candidates;
                let name = &candidates[index];
                match self.try_candidate(name) {
                    Ok(labels) => {
                        trace!("Charset {} accepted", name);
                        State::Accepted { index, labels }
                    }
                    Err(reason) => {
                        trace!("Charset {} rejected: {}", name, reason);
                        self.rejected.push(CandidateRejection {
                            charset: name.clone(),
                            reason,
                        });
                        if index + 1 < self.candidates.len() {
                            State::Trying(index + 1)
                        } else {
                            State::Exhausted
                        }
                    }
                }
            }
            terminal => terminal,
        };
    }

    fn try_candidate(&self, name: &str) -> Result<Labels, Rejection> {
        let encoding = charset::resolve(name).ok_or(Rejection::UnknownCharset)?;
        charset::check_width(encoding, self.declared_double_byte)?;
        let decoded = self
            .strings
            .iter()
            .take(LabelRole::ALL.len())
            .map(|bytes| charset::decode_strict(encoding, bytes))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Labels::from_strings(decoded))
    }

    /// Runs to a terminal state.
    pub fn run(mut self) -> Outcome {
        while !self.is_terminal() {
            self.step();
        }
        match self.state {
            State::Accepted { index, labels } => Outcome::Accepted {
                index,
                charset: self.candidates[index].clone(),
                labels,
                rejected: self.rejected,
            },
            _ => Outcome::Exhausted { rejected: self.rejected },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENGLISH: [&[u8]; 6] = [b"English", b"Agree", b"Disagree", b"Print", b"Save...", b"Read this"];
    // "日本語" then five short ASCII roles, in Shift_JIS.
    const JAPANESE: [&[u8]; 6] = [b"\x93\xfa\x96\x7b\x8c\xea", b"OK", b"No", b"Print", b"Save", b"\x82\xa0"];

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_candidate_accepted() {
        let candidates = names(&["mac-roman"]);
        match LabelDecoder::new(&ENGLISH, &candidates, None).run() {
            Outcome::Accepted { index, charset, labels, rejected } => {
                assert_eq!(index, 0);
                assert_eq!(charset, "mac-roman");
                assert_eq!(labels.save, "Save...");
                assert!(rejected.is_empty());
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn falls_through_to_later_candidate() {
        let candidates = names(&["mac-roman", "shift-jis"]);
        match LabelDecoder::new(&JAPANESE, &candidates, Some(true)).run() {
            Outcome::Accepted { index, charset, labels, rejected } => {
                assert_eq!(index, 1);
                assert_eq!(charset, "shift-jis");
                assert_eq!(labels.language_name, "日本語");
                assert_eq!(labels.message, "あ");
                assert_eq!(
                    rejected,
                    vec![CandidateRejection {
                        charset: "mac-roman".into(),
                        reason: Rejection::WidthMismatch { declared_double_byte: true },
                    }]
                );
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn malformed_sequence_moves_to_next_candidate() {
        let strings: [&[u8]; 6] = [b"Fran\x8Dais\x82 ", b"Accepter", b"Refuser", b"Imprimer", b"Enregistrer", b"Texte"];
        let candidates = names(&["shift_jis", "macintosh"]);
        match LabelDecoder::new(&strings, &candidates, None).run() {
            Outcome::Accepted { index, charset, labels, rejected } => {
                assert_eq!(index, 1);
                assert_eq!(charset, "macintosh");
                assert_eq!(labels.language_name, "Fran\u{E7}ais\u{C7} ");
                assert_eq!(
                    rejected,
                    vec![CandidateRejection { charset: "shift_jis".into(), reason: Rejection::MalformedSequence }]
                );
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn exhausts_all_candidates() {
        let strings: [&[u8]; 6] = [b"\x82", b"", b"", b"", b"", b""];
        let candidates = names(&["shift_jis", "nonsense"]);
        let outcome = LabelDecoder::new(&strings, &candidates, None).run();
        assert_eq!(
            outcome,
            Outcome::Exhausted {
                rejected: vec![
                    CandidateRejection { charset: "shift_jis".into(), reason: Rejection::MalformedSequence },
                    CandidateRejection { charset: "nonsense".into(), reason: Rejection::UnknownCharset },
                ]
            }
        );
    }

    #[test]
    fn empty_candidate_list_is_exhausted() {
        let candidates: Vec<String> = Vec::new();
        let outcome = LabelDecoder::new(&ENGLISH, &candidates, None).run();
        assert_eq!(outcome, Outcome::Exhausted { rejected: Vec::new() });
    }
}
