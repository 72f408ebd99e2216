//! Capability tokens.
//!
//! An event has no accounts attached to it. Whoever holds the owner token can
//! edit or delete the event; whoever holds the participant token can read it
//! and record availability. A token is 256 bits rendered as 64 hex digits.
//!
//! `CapabilityToken<K>` can only be obtained through [`CapabilityToken::parse`]
//! or [`CapabilityToken::generate`], so holding a value proves it is
//! well-formed. The kind marker keeps the two roles apart at compile time,
//! the same way `Id<T>` keeps row ids apart.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use thiserror::Error;

/// Number of hex characters in a well-formed token.
pub const TOKEN_LEN: usize = 64;

/// Bytes drawn from the OS generator before hashing.
const SEED_LEN: usize = 64;

/// Reasons a string is not a capability token.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("not hexadecimal")]
    NotHexadecimal,

    #[error("not 64 characters (got {0})")]
    WrongLength(usize),
}

/// Which role a token grants.
pub trait TokenKind {
    /// Human label, used in "no rows matching the <kind> token".
    const LABEL: &'static str;
}

/// Grants edit and delete rights over an event (source term: admin hash).
pub struct Owner;

/// Grants read and respond rights on an event (source term: user hash).
pub struct Participant;

impl TokenKind for Owner {
    const LABEL: &'static str = "owner";
}

impl TokenKind for Participant {
    const LABEL: &'static str = "participant";
}

pub type OwnerToken = CapabilityToken<Owner>;

pub type ParticipantToken = CapabilityToken<Participant>;

pub struct CapabilityToken<K>(String, PhantomData<fn() -> K>);

impl<K: TokenKind> CapabilityToken<K> {
    /// Validates `s` as a token. Characters are checked before length, so a
    /// short string with a symbol in it reports `NotHexadecimal`.
    ///
    /// The value is kept exactly as given; upper-case hex is accepted and not
    /// folded.
    pub fn parse(s: &str) -> Result<Self, TokenError> {
        validate(s)?;
        Ok(Self(s.to_string(), PhantomData))
    }

    /// Draws a fresh token: 512 bits from the OS generator, SHA-256, hex.
    ///
    /// Nothing checks the result against existing rows. The unique indexes
    /// on the token columns turn a collision into a store error.
    pub fn generate() -> Self {
        let mut seed = [0u8; SEED_LEN];
        OsRng.fill_bytes(&mut seed);
        let digest = Sha256::digest(seed);
        Self(hex::encode(digest), PhantomData)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn kind_label(&self) -> &'static str {
        K::LABEL
    }
}

/// Checks the token shape without constructing a value.
pub fn validate(s: &str) -> Result<(), TokenError> {
    if !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TokenError::NotHexadecimal);
    }
    if s.len() != TOKEN_LEN {
        return Err(TokenError::WrongLength(s.chars().count()));
    }
    Ok(())
}

// ============================================================================
// Standard trait implementations
// ============================================================================

impl<K> Clone for CapabilityToken<K> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<K> PartialEq for CapabilityToken<K> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<K> Eq for CapabilityToken<K> {}

impl<K> Hash for CapabilityToken<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

// Tokens are secrets; keep them out of debug output and logs.
impl<K: TokenKind> Debug for CapabilityToken<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Token({}…)", K::LABEL, &self.0[..8])
    }
}

impl<K> Display for CapabilityToken<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<K> AsRef<str> for CapabilityToken<K> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<K> Serialize for CapabilityToken<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// Rows carry tokens as TEXT; decoding re-validates so a malformed value in
// the table surfaces as a decode error instead of a usable token.
impl<K> sqlx::Type<sqlx::Postgres> for CapabilityToken<K> {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<K> sqlx::Encode<'_, sqlx::Postgres> for CapabilityToken<K> {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0.as_str(), buf)
    }
}

impl<'r, K: TokenKind> sqlx::Decode<'r, sqlx::Postgres> for CapabilityToken<K> {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let raw = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::parse(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const VALID: &str = "8d9d7c59eec27a7aee55536582e45afb18f072c282edd22474a0db0676d74299";

    #[test]
    fn test_accepts_64_hex_chars() {
        assert_eq!(validate(VALID), Ok(()));
        assert_eq!(
            validate("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
            Ok(())
        );
    }

    #[test]
    fn test_accepts_upper_case_without_folding() {
        let upper = VALID.to_ascii_uppercase();
        let token = OwnerToken::parse(&upper).unwrap();
        assert_eq!(token.as_str(), upper);
    }

    #[test]
    fn test_rejects_short_input_on_length() {
        assert_eq!(validate("abc"), Err(TokenError::WrongLength(3)));
        assert_eq!(validate(""), Err(TokenError::WrongLength(0)));
    }

    #[test]
    fn test_rejects_long_input_on_length() {
        let long = format!("{}a", VALID);
        assert_eq!(validate(&long), Err(TokenError::WrongLength(65)));
    }

    #[test]
    fn test_rejects_symbols_before_checking_length() {
        assert_eq!(validate("@#$%$#%^"), Err(TokenError::NotHexadecimal));
        assert_eq!(
            TokenError::NotHexadecimal.to_string(),
            "not hexadecimal"
        );
    }

    #[test]
    fn test_rejects_non_ascii_bytes() {
        let mut s: String = VALID[..62].to_string();
        s.push('é');
        assert_eq!(validate(&s), Err(TokenError::NotHexadecimal));
    }

    #[test]
    fn test_generated_tokens_are_well_formed_lowercase() {
        let token = ParticipantToken::generate();
        assert_eq!(token.as_str().len(), TOKEN_LEN);
        assert!(validate(token.as_str()).is_ok());
        assert_eq!(token.as_str(), token.as_str().to_ascii_lowercase());
    }

    // There is no uniqueness check at generation time; distinctness here is
    // only probabilistic. The unique indexes are the real backstop.
    #[test]
    fn test_ten_thousand_generated_tokens_are_pairwise_distinct() {
        let tokens: HashSet<String> = (0..10_000)
            .map(|_| OwnerToken::generate().into_string())
            .collect();
        assert_eq!(tokens.len(), 10_000);
    }

    #[test]
    fn test_debug_does_not_leak_full_token() {
        let token = OwnerToken::parse(VALID).unwrap();
        let debug = format!("{:?}", token);
        assert!(!debug.contains(VALID));
        assert!(debug.starts_with("ownerToken("));
    }
}
