//! Validated text primitives shared by the catalog crates.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,

    /// The identifier exceeded [`EntryId::MAX_LEN`] bytes
    #[error("identifier exceeds maximum length of {max} characters")]
    TooLong { max: usize },

    /// The identifier contained something other than lowercase ASCII, digits or '-'
    #[error("identifier '{0}' contains invalid characters (only a-z, 0-9 and '-' allowed)")]
    InvalidCharacters(String),

    /// The identifier started or ended with '-'
    #[error("identifier '{0}' must not start or end with '-'")]
    DanglingHyphen(String),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err(TextError::Empty)` if the input is empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Stable identifier of a catalog record, e.g. `iron-deficiency-anemia`.
///
/// Identifiers are assigned when content is authored and never change. They are kebab-case
/// slugs: lowercase ASCII letters, digits and single hyphens, without a leading or trailing
/// hyphen. Lookups compare identifiers exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(String);

impl EntryId {
    /// Longest identifier accepted, in bytes.
    pub const MAX_LEN: usize = 128;

    /// Parse and validate an identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`TextError`] if the identifier is empty, too long, contains characters
    /// outside `a-z`, `0-9` and `-`, or starts/ends with a hyphen.
    pub fn parse(input: &str) -> Result<Self, TextError> {
        if input.is_empty() {
            return Err(TextError::Empty);
        }

        if input.len() > Self::MAX_LEN {
            return Err(TextError::TooLong { max: Self::MAX_LEN });
        }

        let ok = input
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'-'));
        if !ok {
            return Err(TextError::InvalidCharacters(input.to_owned()));
        }

        if input.starts_with('-') || input.ends_with('-') {
            return Err(TextError::DanglingHyphen(input.to_owned()));
        }

        Ok(Self(input.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for EntryId {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for EntryId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for EntryId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        EntryId::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Immune Thrombocytopenia  ").expect("valid text");
        assert_eq!(text.as_str(), "Immune Thrombocytopenia");
    }

    #[test]
    fn non_empty_text_rejects_whitespace_only() {
        assert_eq!(NonEmptyText::new("   "), Err(TextError::Empty));
    }

    #[test]
    fn entry_id_accepts_kebab_case_slugs() {
        assert!(EntryId::parse("itp").is_ok());
        assert!(EntryId::parse("b12-deficiency-anemia").is_ok());
        assert!(EntryId::parse("hematology-iron-deficiency-anemia-comprehensive").is_ok());
    }

    #[test]
    fn entry_id_rejects_empty() {
        assert_eq!(EntryId::parse(""), Err(TextError::Empty));
    }

    #[test]
    fn entry_id_rejects_uppercase_and_spaces() {
        let err = EntryId::parse("Iron Deficiency").expect_err("should reject");
        assert!(matches!(err, TextError::InvalidCharacters(_)));

        let err = EntryId::parse("ITP").expect_err("should reject uppercase");
        assert!(matches!(err, TextError::InvalidCharacters(_)));
    }

    #[test]
    fn entry_id_rejects_dangling_hyphen() {
        let err = EntryId::parse("-itp").expect_err("should reject leading hyphen");
        assert!(matches!(err, TextError::DanglingHyphen(_)));
        let err = EntryId::parse("itp-").expect_err("should reject trailing hyphen");
        assert!(matches!(err, TextError::DanglingHyphen(_)));
    }

    #[test]
    fn entry_id_rejects_too_long() {
        let long = "a".repeat(EntryId::MAX_LEN + 1);
        assert_eq!(
            EntryId::parse(&long),
            Err(TextError::TooLong {
                max: EntryId::MAX_LEN
            })
        );
    }

    #[test]
    fn entry_id_deserialize_validates() {
        let ok: EntryId = serde_json::from_str("\"ttp\"").expect("valid id");
        assert_eq!(ok.as_str(), "ttp");

        let err = serde_json::from_str::<EntryId>("\"not valid\"");
        assert!(err.is_err());
    }
}
