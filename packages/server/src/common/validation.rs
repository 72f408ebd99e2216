//! Request field validation. Nothing here touches the store.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

use super::errors::ValidationError;
use super::token::{CapabilityToken, TokenKind};

// RFC 5322 atext; dot-atoms are runs of it joined by single dots
const ATOM: &str = r"[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+";

lazy_static! {
    // local-part: dot-atom or quoted-string. domain: dot-atom (one label is
    // enough) or a bracketed domain literal.
    static ref ADDR_SPEC: String = format!(
        r#"(?:{atom}(?:\.{atom})*|"(?:[^"\\\r\n]|\\.)*")@(?:{atom}(?:\.{atom})*|\[[^\[\]\\\r\n]*\])"#,
        atom = ATOM
    );
    static ref EMAIL_REGEX: Regex =
        Regex::new(&format!("^{}$", *ADDR_SPEC)).expect("email regex compiles");
    // `Display Name <addr>`; the display name may be a quoted string
    static ref NAMED_EMAIL_REGEX: Regex = Regex::new(&format!(
        r#"^(?:[^<>"]*|"(?:[^"\\]|\\.)*"\s*)<({})>$"#,
        *ADDR_SPEC
    ))
    .expect("named email regex compiles");
}

pub fn parse_token<K: TokenKind>(raw: &str) -> Result<CapabilityToken<K>, ValidationError> {
    CapabilityToken::parse(raw).map_err(|source| ValidationError::InvalidToken {
        kind: K::LABEL,
        source,
    })
}

/// Candidate dates as epoch milliseconds. Duplicates collapse; the result is
/// sorted.
pub fn validate_dates(dates: &[i64]) -> Result<BTreeSet<i64>, ValidationError> {
    if dates.is_empty() {
        return Err(ValidationError::NoDates);
    }
    if let Some(&bad) = dates.iter().find(|&&d| d <= 0) {
        return Err(ValidationError::InvalidDate(bad));
    }
    Ok(dates.iter().copied().collect())
}

/// Availability lists may be empty (available on nothing), but every entry
/// must still be a real instant.
pub fn validate_availability(dates: &[i64]) -> Result<BTreeSet<i64>, ValidationError> {
    if let Some(&bad) = dates.iter().find(|&&d| d <= 0) {
        return Err(ValidationError::InvalidDate(bad));
    }
    Ok(dates.iter().copied().collect())
}

/// Owner contact: empty means "none", anything else must parse as an
/// RFC 5322 address. A `Name <addr>` contact keeps only the address.
pub fn validate_contact(contact: Option<&str>) -> Result<String, ValidationError> {
    let contact = contact.map(str::trim).unwrap_or_default();
    if contact.is_empty() || EMAIL_REGEX.is_match(contact) {
        return Ok(contact.to_string());
    }
    NAMED_EMAIL_REGEX
        .captures(contact)
        .and_then(|caps| caps.get(1))
        .map(|addr| addr.as_str().to_string())
        .ok_or(ValidationError::InvalidEmail)
}

/// Participant names are a soft identity: trimmed, non-empty, compared
/// exactly.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}
