//! Tenant identity handling.
//!
//! A tenant is one registered company, identified by its CNPJ (the Brazilian
//! national tax id, 14 digits). Every representation a user or a URL can carry
//! (punctuated, partial, raw) is reduced to digits before it is used as a
//! lookup key or a query filter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical tenant key: the digits of a CNPJ, nothing else.
///
/// `normalize` never fails; the result may be empty or shorter than 14 digits
/// while the user is still typing. Callers that create a new tenant
/// association must check [`TenantKey::is_complete`] first; read paths may
/// tolerate prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantKey(String);

impl TenantKey {
    /// Strip every non-digit character from `raw`. Idempotent.
    pub fn normalize(raw: &str) -> Self {
        TenantKey(strip_non_digits(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A complete CNPJ has exactly 14 digits.
    pub fn is_complete(&self) -> bool {
        self.0.len() == 14
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Punctuated display form (`12.345.678/0001-95`) when complete,
    /// raw digits otherwise.
    pub fn formatted(&self) -> String {
        if !self.is_complete() {
            return self.0.clone();
        }
        format!(
            "{}.{}.{}/{}-{}",
            &self.0[0..2],
            &self.0[2..5],
            &self.0[5..8],
            &self.0[8..12],
            &self.0[12..14]
        )
    }
}

impl fmt::Display for TenantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generic digit normalization, shared by every numeric-looking identity
/// field (customer tax ids, postal codes, phone numbers).
pub fn strip_non_digits(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Input mask for CNPJ fields: keeps at most 14 digits and re-punctuates as
/// far as the entered prefix allows (`12.345.678/0001-95`).
pub fn format_cnpj_input(raw: &str) -> String {
    let digits: String = strip_non_digits(raw).chars().take(14).collect();
    let mut out = String::with_capacity(18);
    for (i, c) in digits.chars().enumerate() {
        match i {
            2 | 5 => out.push('.'),
            8 => out.push('/'),
            12 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}

/// Input mask for CPF fields: keeps at most 11 digits (`123.456.789-01`).
pub fn format_cpf_input(raw: &str) -> String {
    let digits: String = strip_non_digits(raw).chars().take(11).collect();
    let mut out = String::with_capacity(14);
    for (i, c) in digits.chars().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(c);
    }
    out
}
