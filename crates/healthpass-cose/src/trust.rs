//! Trust anchors: resolving a key identifier to issuer key material.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::errors::{ResolveError, TrustError};
use crate::key::{Jwk, PublicKeyMaterial};

/// Resolves a key identifier from a protected header to a trusted key.
///
/// Implementations own how keys are obtained (a pinned file, a fetched and
/// verified directory, ...). Verification only depends on this interface.
pub trait TrustAnchorResolver {
    /// Returns the key registered under `key_id`.
    fn resolve(&self, key_id: &str) -> Result<PublicKeyMaterial, ResolveError>;
}

impl<T: TrustAnchorResolver + ?Sized> TrustAnchorResolver for &T {
    fn resolve(&self, key_id: &str) -> Result<PublicKeyMaterial, ResolveError> {
        (**self).resolve(key_id)
    }
}

/// JWKS document: `{"keys": [...]}`.
#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// In-memory set of trusted P-256 keys, indexed by `kid`.
#[derive(Debug, Clone, Default)]
pub struct TrustAnchorSet {
    keys: BTreeMap<String, PublicKeyMaterial>,
    revoked: BTreeSet<String>,
}

impl TrustAnchorSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JWKS document and registers every key in it.
    ///
    /// Fails if any key is not EC P-256, lacks a `kid`, or has undecodable
    /// coordinates.
    pub fn from_jwks_json(json: &str) -> Result<Self, TrustError> {
        let set: JwkSet = serde_json::from_str(json)?;
        let mut anchors = Self::new();
        for jwk in &set.keys {
            anchors.add_jwk(jwk)?;
        }
        Ok(anchors)
    }

    /// Registers a JWK under its `kid`, replacing any previous key.
    pub fn add_jwk(&mut self, jwk: &Jwk) -> Result<(), TrustError> {
        let kid = jwk.kid.clone().ok_or(TrustError::MissingKeyId)?;
        let key = PublicKeyMaterial::from_jwk(jwk)?;
        self.insert(kid, key);
        Ok(())
    }

    /// Registers key material under `key_id`, replacing any previous key.
    pub fn insert(&mut self, key_id: impl Into<String>, key: PublicKeyMaterial) {
        self.keys.insert(key_id.into(), key);
    }

    /// Marks `key_id` as revoked. Resolution then fails even if the key is registered.
    pub fn revoke(&mut self, key_id: impl Into<String>) {
        self.revoked.insert(key_id.into());
    }

    /// Number of registered keys, revoked ones included.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no keys are registered.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl TrustAnchorResolver for TrustAnchorSet {
    fn resolve(&self, key_id: &str) -> Result<PublicKeyMaterial, ResolveError> {
        if self.revoked.contains(key_id) {
            return Err(ResolveError::Revoked(key_id.to_string()));
        }
        self.keys
            .get(key_id)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(key_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JWKS: &str = r#"{
        "keys": [
            {
                "kty": "EC",
                "crv": "P-256",
                "kid": "key-1",
                "x": "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
                "y": "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE"
            }
        ]
    }"#;

    #[test]
    fn loads_jwks_and_resolves_by_kid() {
        let anchors = TrustAnchorSet::from_jwks_json(JWKS).unwrap();
        assert_eq!(anchors.len(), 1);
        let key = anchors.resolve("key-1").unwrap();
        assert_eq!(key.x(), Some([0u8; 32].as_slice()));
        assert_eq!(key.y(), Some([1u8; 32].as_slice()));
    }

    #[test]
    fn unknown_kid_is_not_found() {
        let anchors = TrustAnchorSet::from_jwks_json(JWKS).unwrap();
        assert_eq!(
            anchors.resolve("key-2"),
            Err(ResolveError::NotFound("key-2".into()))
        );
    }

    #[test]
    fn revoked_kid_is_rejected() {
        let mut anchors = TrustAnchorSet::from_jwks_json(JWKS).unwrap();
        anchors.revoke("key-1");
        assert_eq!(
            anchors.resolve("key-1"),
            Err(ResolveError::Revoked("key-1".into()))
        );
    }

    #[test]
    fn rejects_key_without_kid() {
        let json = r#"{"keys": [{"kty": "EC", "crv": "P-256"}]}"#;
        assert!(matches!(
            TrustAnchorSet::from_jwks_json(json),
            Err(TrustError::MissingKeyId)
        ));
    }

    #[test]
    fn rejects_malformed_document() {
        assert!(matches!(
            TrustAnchorSet::from_jwks_json(r#"[{"kty": "EC"}]"#),
            Err(TrustError::JsonParse(_))
        ));
    }

    #[test]
    fn resolves_through_reference() {
        let anchors = TrustAnchorSet::from_jwks_json(JWKS).unwrap();
        let resolver: &dyn TrustAnchorResolver = &anchors;
        assert!(resolver.resolve("key-1").is_ok());
    }
}
