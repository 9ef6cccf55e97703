//! Value-dependent cell classification.
//!
//! The default classifier tags the broad ASCII categories a host typically
//! colors (null bytes, digits, upper/lower letters). Hosts replace it with
//! their own function or disable classification entirely; the grid builder
//! treats the result as opaque class strings.

use crate::cell::CellPayload;

/// Classifier selection for a grid build.
pub enum Classify<'a> {
    /// Built-in ASCII categories ([`default_classes`]).
    Default,
    /// No value-dependent classes at all.
    Disabled,
    /// Caller-supplied classifier; `None` means "no classes for this cell".
    Custom(&'a dyn Fn(&CellPayload) -> Option<Vec<String>>),
}

impl Classify<'_> {
    pub(crate) fn classes_for(&self, payload: &CellPayload) -> Vec<String> {
        match self {
            Classify::Default => default_classes(payload)
                .map(|c| vec![c.to_string()])
                .unwrap_or_default(),
            Classify::Disabled => Vec::new(),
            Classify::Custom(f) => f(payload).unwrap_or_default(),
        }
    }
}

/// Built-in ASCII category for a byte, if it has one.
pub fn default_classes(payload: &CellPayload) -> Option<&'static str> {
    match payload.byte {
        0x00 => Some("null"),
        b'0'..=b'9' => Some("digit"),
        b'A'..=b'Z' => Some("upper"),
        b'a'..=b'z' => Some("lower"),
        _ => None,
    }
}
