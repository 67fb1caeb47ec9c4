// SPDX-License-Identifier: MPL-2.0
//! Scripted interaction steps for driving the viewer without a browser.
//!
//! A script is a comma-separated list such as
//! `open:0, next, key:ArrowLeft, wait, key:Escape`.

use crate::domain::gallery::Key;
use crate::error::{Error, Result};
use std::fmt;

/// One scripted user or host action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Click the n-th activation link (0-based, binding order).
    Open(usize),
    /// Click the close control.
    Close,
    /// Click the previous control.
    Previous,
    /// Click the next control.
    Next,
    /// Click the overlay outside the image, caption and controls.
    Background,
    /// Press a key.
    Key(Key),
    /// Resize the window.
    Resize,
    /// Let the earliest pending transition run to completion.
    Wait,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Open(index) => write!(f, "open:{}", index),
            Step::Close => write!(f, "close"),
            Step::Previous => write!(f, "prev"),
            Step::Next => write!(f, "next"),
            Step::Background => write!(f, "background"),
            Step::Key(key) => write!(f, "key:{}", key),
            Step::Resize => write!(f, "resize"),
            Step::Wait => write!(f, "wait"),
        }
    }
}

impl std::str::FromStr for Step {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        let (name, argument) = match token.split_once(':') {
            Some((name, argument)) => (name.trim(), Some(argument.trim())),
            None => (token, None),
        };
        match (name, argument) {
            ("open", Some(index)) => index
                .parse()
                .map(Step::Open)
                .map_err(|_| Error::Script(format!("invalid slide index in `{}`", token))),
            ("key", Some(key)) if !key.is_empty() => Ok(Step::Key(Key::from_name(key))),
            ("close", None) => Ok(Step::Close),
            ("prev" | "previous", None) => Ok(Step::Previous),
            ("next", None) => Ok(Step::Next),
            ("background", None) => Ok(Step::Background),
            ("resize", None) => Ok(Step::Resize),
            ("wait", None) => Ok(Step::Wait),
            _ => Err(Error::Script(format!("unknown step `{}`", token))),
        }
    }
}

/// Parses a comma-separated script. Empty entries are skipped.
///
/// # Errors
///
/// Returns [`Error::Script`] naming the first invalid step.
pub fn parse_script(script: &str) -> Result<Vec<Step>> {
    script
        .split(',')
        .filter(|entry| !entry.trim().is_empty())
        .map(str::parse)
        .collect()
}
