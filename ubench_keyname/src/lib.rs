#![deny(rust_2018_idioms)]

//! Key-value metadata embedded in file names.
//!
//! A name such as `impl=foo+procs=4+ext=.json` carries the map
//! `{impl: foo, procs: 4, ext: .json}`. Benchmark runs name their output
//! files this way and consolidated tables are named the same way, so both
//! directions go through [`Keyname::unpack`] and [`Keyname::pack`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Separates `key=value` tokens.
pub const TOKEN_SEP: char = '+';
/// Separates a key from its value.
pub const KV_SEP: char = '=';
/// Key holding the file extension; always packed last.
pub const EXT_KEY: &str = "ext";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeynameError {
    #[error("file name is empty")]
    EmptyName,
    #[error("malformed token {token:?} in {name:?}")]
    MalformedToken { name: String, token: String },
    #[error("{what} {text:?} contains reserved character {reserved:?}")]
    ReservedCharacter {
        what: &'static str,
        text: String,
        reserved: char,
    },
    #[error("key {key:?} not present in {name:?}")]
    MissingKey { name: String, key: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyname {
    entries: BTreeMap<String, String>,
}

impl Keyname {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes the file name of `path`; any directories are ignored.
    pub fn unpack(path: impl AsRef<Path>) -> Result<Self, KeynameError> {
        let name = path
            .as_ref()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name.is_empty() {
            return Err(KeynameError::EmptyName);
        }

        let mut entries = BTreeMap::new();
        for token in name.split(TOKEN_SEP) {
            match token.split_once(KV_SEP) {
                Some((key, value)) if !key.is_empty() => {
                    // a repeated key keeps the last value
                    entries.insert(key.to_string(), value.to_string());
                }
                _ => {
                    return Err(KeynameError::MalformedToken {
                        name: name.clone(),
                        token: token.to_string(),
                    });
                }
            }
        }
        Ok(Self { entries })
    }

    /// Encodes into a file name: regular keys sorted, then `_`-prefixed keys
    /// sorted, then `ext`.
    pub fn pack(&self) -> Result<String, KeynameError> {
        for (key, value) in self.entries.iter() {
            check_reserved("key", key, &[TOKEN_SEP, KV_SEP, '/'])?;
            check_reserved("value", value, &[TOKEN_SEP, '/'])?;
        }

        let (hidden, regular): (Vec<_>, Vec<_>) = self
            .entries
            .iter()
            .filter(|(key, _)| key.as_str() != EXT_KEY)
            .partition(|(key, _)| key.starts_with('_'));

        let tokens: Vec<_> = regular
            .into_iter()
            .chain(hidden)
            .chain(self.entries.get_key_value(EXT_KEY))
            .map(|(key, value)| format!("{}{}{}", key, KV_SEP, value))
            .collect();
        Ok(tokens.join(TOKEN_SEP.to_string().as_str()))
    }

    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Like `get`, but a missing key is an error.
    pub fn require(&self, key: &str) -> Result<&str, KeynameError> {
        self.get(key).ok_or_else(|| KeynameError::MissingKey {
            name: self.to_string(),
            key: key.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for Keyname
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self { entries }
    }
}

impl fmt::Display for Keyname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<_> = self
            .iter()
            .map(|(key, value)| format!("{}{}{}", key, KV_SEP, value))
            .collect();
        write!(f, "{}", tokens.join(TOKEN_SEP.to_string().as_str()))
    }
}

fn check_reserved(
    what: &'static str,
    text: &str,
    reserved: &[char],
) -> Result<(), KeynameError> {
    match text.chars().find(|c| reserved.contains(c)) {
        Some(reserved) => Err(KeynameError::ReservedCharacter {
            what,
            text: text.to_string(),
            reserved,
        }),
        None => Ok(()),
    }
}
