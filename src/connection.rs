//! Connection parameters shared by rsync and SSH command construction.
//!
//! Values that callers may supply either as a single string or as a list
//! (exclude patterns, key files) enter through [`OneOrMany`] and are
//! normalised into an ordered `Vec<String>` straight away, so the command
//! builders only ever see the canonical form.

use serde::{Deserialize, Deserializer};

/// Default SSH port used when a configuration omits one.
pub const DEFAULT_SSH_PORT: u16 = 22;

/// A single string or an ordered list of strings.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany {
    /// A lone value, treated as a one-element list.
    One(String),
    /// An ordered list of values.
    Many(Vec<String>),
}

impl Default for OneOrMany {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl OneOrMany {
    /// Normalises the value into an ordered list.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        value.into_vec()
    }
}

impl From<&str> for OneOrMany {
    fn from(value: &str) -> Self {
        Self::One(value.to_owned())
    }
}

impl From<String> for OneOrMany {
    fn from(value: String) -> Self {
        Self::One(value)
    }
}

impl From<Vec<String>> for OneOrMany {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

impl From<&[&str]> for OneOrMany {
    fn from(values: &[&str]) -> Self {
        Self::Many(values.iter().map(|value| (*value).to_owned()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for OneOrMany {
    fn from(values: [&str; N]) -> Self {
        Self::Many(values.iter().map(|value| (*value).to_owned()).collect())
    }
}

/// Deserialises a string-or-list field straight into its canonical list.
pub(crate) fn deserialize_one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    OneOrMany::deserialize(deserializer).map(OneOrMany::into_vec)
}

const fn default_port() -> u16 {
    DEFAULT_SSH_PORT
}

/// Target host details used to address rsync and SSH.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ConnectionParams {
    /// User used to authenticate via SSH.
    pub user: String,
    /// Hostname, IPv4 or IPv6 address.
    pub host: String,
    /// SSH port on the remote host.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Private key files passed to SSH with `-i`, in order.
    #[serde(default, deserialize_with = "deserialize_one_or_many")]
    pub key_files: Vec<String>,
}

impl ConnectionParams {
    /// Creates parameters without any key files.
    #[must_use]
    pub fn new(user: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
            port,
            key_files: Vec::new(),
        }
    }

    /// Replaces the key files with `keys`, accepting a single path or a list.
    #[must_use]
    pub fn with_key_files(mut self, keys: impl Into<OneOrMany>) -> Self {
        self.key_files = keys.into().into_vec();
        self
    }

    /// Returns `true` when the host looks like an IPv6 address.
    ///
    /// Any host with more than one colon is treated as IPv6; rsync needs such
    /// addresses bracketed even when no port is given.
    #[must_use]
    pub fn is_ipv6(&self) -> bool {
        self.host.matches(':').count() > 1
    }

    /// Renders the `user@host` login used by SSH.
    #[must_use]
    pub fn login(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}
