// Copyright (c) 2026 Element Creations Ltd
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Selection must cover at least one character")]
    InvalidSelection,

    #[error("Invalid link URL: {0:?}")]
    InvalidUrl(String),

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Malformed document: {0}")]
    Malformed(String),
}

impl DocumentError {
    /// Whether this error means serialized content could not be decoded.
    pub fn is_decode_failure(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Malformed(_))
    }
}

pub type Result<T> = std::result::Result<T, DocumentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_error_conversion() {
        let json_err =
            serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DocumentError = json_err.into();
        assert!(matches!(err, DocumentError::Decode(_)));
        assert!(err.is_decode_failure());
    }

    #[test]
    fn error_display() {
        let err = DocumentError::InvalidUrl("  ".to_string());
        assert_eq!(err.to_string(), "Invalid link URL: \"  \"");

        let err = DocumentError::Malformed("duplicate block key a".into());
        assert_eq!(err.to_string(), "Malformed document: duplicate block key a");
        assert!(!DocumentError::InvalidSelection.is_decode_failure());
    }
}
