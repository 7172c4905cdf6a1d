use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetKeyError {
    #[error("asset key must not be empty")]
    Empty,
    #[error("asset key must be relative to the asset root")]
    Absolute,
    #[error("asset key must use '/' separators")]
    Backslash,
    #[error("asset key must not walk out of the asset root")]
    ParentTraversal,
    #[error("asset key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

/// Asset keys are relative, forward-slash paths under `assets/`, for example
/// `scenes/cabin.png`.
pub(crate) fn validate_asset_key(key: &str) -> Result<(), AssetKeyError> {
    if key.is_empty() {
        return Err(AssetKeyError::Empty);
    }
    if key.starts_with('/') {
        return Err(AssetKeyError::Absolute);
    }
    if key.contains('\\') {
        return Err(AssetKeyError::Backslash);
    }
    if key.contains("..") {
        return Err(AssetKeyError::ParentTraversal);
    }
    if let Some(character) = key.chars().find(|ch| !is_key_character(*ch)) {
        return Err(AssetKeyError::InvalidCharacter { character });
    }
    Ok(())
}

fn is_key_character(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '/' | '-' | '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_relative_file_keys() {
        for key in ["cabin.png", "scenes/bridge.png", "sfx/correct-1.mp3", "a_b/c.jpg"] {
            assert!(validate_asset_key(key).is_ok(), "key={key}");
        }
    }

    #[test]
    fn rejects_escaping_or_malformed_keys() {
        for key in ["", "/etc/passwd", "..", "a/../b", r"a\b.png", "Cabin.png", "a b.png"] {
            assert!(validate_asset_key(key).is_err(), "key={key}");
        }
    }

    #[test]
    fn reports_the_first_invalid_character() {
        assert_eq!(
            validate_asset_key("ship$.png"),
            Err(AssetKeyError::InvalidCharacter { character: '$' })
        );
    }
}
