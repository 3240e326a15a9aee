//! COSE_Sign1 envelope parsing and ECDSA P-256 verification for signed health passes.
//!
//! This crate provides:
//! - A typed view over the 4-element COSE_Sign1 envelope
//! - Byte-exact reconstruction of the `Sig_structure` signing input
//! - SHA-256 / ECDSA P-256 verification that fails closed
//! - A trust-anchor interface for resolving issuer keys by `kid`
//!
//! Core invariants:
//! - Protected header and payload bytes are replayed exactly as received
//! - Every malformed input resolves to a non-verified outcome
//! - All operations are pure; nothing here performs I/O
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use healthpass_cose::{verify_with_trust_anchors, TrustAnchorSet};
//!
//! let anchors = TrustAnchorSet::from_jwks_json(&std::fs::read_to_string("issuers.jwks.json")?)?;
//! let envelope = std::fs::read("pass.cbor")?;
//!
//! let outcome = verify_with_trust_anchors(&envelope, &anchors);
//! if let Some(payload) = outcome.payload() {
//!     println!("verified {} payload bytes", payload.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![deny(missing_docs)]

/// COSE_Sign1 envelope parsing.
pub mod envelope;
/// Error types for envelope, verification and trust operations.
pub mod errors;
/// Protected header fields.
pub mod header;
/// Public key material and JWK parsing.
pub mod key;
/// End-to-end verification outcomes.
pub mod outcome;
/// Signing input reconstruction.
pub mod sig_structure;
/// Trust-anchor resolution.
pub mod trust;
/// Signature verification.
pub mod verifier;

pub use envelope::{SignedEnvelope, COSE_SIGN1_TAG};
pub use errors::{EnvelopeError, ResolveError, TrustError, VerifyError};
pub use header::{Algorithm, ProtectedHeader};
pub use key::{Jwk, PublicKeyMaterial, COORDINATE_LEN};
pub use outcome::{verify_signed_envelope, verify_with_trust_anchors, VerificationOutcome};
pub use sig_structure::{build_signed_bytes, SIGNATURE1_CONTEXT};
pub use trust::{TrustAnchorResolver, TrustAnchorSet};
pub use verifier::{try_verify, verify};
