//! Parsing of `STR#` payloads.
//!
//! # Payload Structure
//! ```text
//! [2 bytes] Number of strings (big-endian u16)
//! per string:
//!   [1 byte ] Length
//!   [N bytes] Text in the language's legacy charset
//! ```

use std::fmt;

use log::debug;

use super::models::LabelRole;

/// A structural defect in a string-list payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListProblem {
    /// The payload ends before the declared strings do.
    Truncated { declared: usize, found: usize },
    /// The list is complete but has fewer strings than there are label roles.
    TooFewStrings { found: usize },
}

impl fmt::Display for ListProblem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ListProblem::Truncated { declared, found } => {
                write!(f, "string list declares {} strings but is truncated after {}", declared, found)
            }
            ListProblem::TooFewStrings { found } => write!(
                f,
                "string list has {} strings, expected {}",
                found,
                LabelRole::ALL.len()
            ),
        }
    }
}

/// The raw strings of one label resource.
///
/// Parsing never fails outright: whatever strings could be read are kept
/// so a lenient fallback can still be built from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringList<'a> {
    pub strings: Vec<&'a [u8]>,
    pub problem: Option<ListProblem>,
}

/// Splits a `STR#` payload into its raw strings.
pub fn parse(data: &[u8]) -> StringList<'_> {
    let Some((count_bytes, mut rest)) = data.split_first_chunk::<2>() else {
        return StringList {
            strings: Vec::new(),
            problem: Some(ListProblem::Truncated { declared: 0, found: 0 }),
        };
    };
    let declared = u16::from_be_bytes(*count_bytes) as usize;

    let mut strings = Vec::with_capacity(declared.min(LabelRole::ALL.len()));
    for _ in 0..declared {
        let Some((&len, tail)) = rest.split_first() else { break };
        if tail.len() < len as usize {
            break;
        }
        let (text, tail) = tail.split_at(len as usize);
        strings.push(text);
        rest = tail;
    }

    let problem = if strings.len() < declared {
        Some(ListProblem::Truncated { declared, found: strings.len() })
    } else if declared < LabelRole::ALL.len() {
        Some(ListProblem::TooFewStrings { found: declared })
    } else {
        None
    };

    if declared > LabelRole::ALL.len() {
        debug!("String list has {} strings; ignoring {} extra", declared, declared - LabelRole::ALL.len());
    }

    StringList { strings, problem }
}
