//! `<scheme>://word/<id>` links into a specific card

use std::fmt;

use thiserror::Error;

use crate::words::WordId;

const WORD_TARGET: &str = "word";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeepLinkError {
    #[error("Malformed link: {0}")]
    Malformed(String),

    #[error("Unknown link target: {0}")]
    UnknownTarget(String),

    #[error("Invalid word id: {0}")]
    InvalidId(String),

    #[error("Link scheme '{found}' does not match '{expected}'")]
    SchemeMismatch { expected: String, found: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLink {
    pub scheme: String,
    pub word_id: WordId,
}

impl DeepLink {
    pub fn new(scheme: &str, word_id: WordId) -> Self {
        Self {
            scheme: scheme.to_string(),
            word_id,
        }
    }

    pub fn to_uri(&self) -> String {
        format!("{}://{}/{}", self.scheme, WORD_TARGET, self.word_id)
    }

    pub fn parse(uri: &str) -> Result<Self, DeepLinkError> {
        let (scheme, rest) = uri
            .trim()
            .split_once("://")
            .ok_or_else(|| DeepLinkError::Malformed(uri.to_string()))?;
        if scheme.is_empty() {
            return Err(DeepLinkError::Malformed(uri.to_string()));
        }

        let rest = rest.trim_end_matches('/');
        let (target, id) = rest
            .split_once('/')
            .ok_or_else(|| DeepLinkError::Malformed(uri.to_string()))?;
        if target != WORD_TARGET {
            return Err(DeepLinkError::UnknownTarget(target.to_string()));
        }

        let word_id = id
            .parse::<WordId>()
            .map_err(|_| DeepLinkError::InvalidId(id.to_string()))?;

        Ok(Self::new(scheme, word_id))
    }

    /// Parse and require a specific scheme
    pub fn parse_for_scheme(uri: &str, expected: &str) -> Result<Self, DeepLinkError> {
        let link = Self::parse(uri)?;
        if link.scheme != expected {
            return Err(DeepLinkError::SchemeMismatch {
                expected: expected.to_string(),
                found: link.scheme,
            });
        }
        Ok(link)
    }
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}
