//! Issuer public key material.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{TrustError, VerifyError};

/// Width of a P-256 coordinate in bytes.
pub const COORDINATE_LEN: usize = 32;

/// SEC1 marker for an uncompressed point.
pub const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

/// Length of an uncompressed SEC1 P-256 point.
pub const UNCOMPRESSED_POINT_LEN: usize = 1 + 2 * COORDINATE_LEN;

/// A P-256 public key given as big-endian affine coordinates.
///
/// Either coordinate may be absent, as it can be in a malformed JWK; such a
/// key never verifies anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyMaterial {
    x: Option<Vec<u8>>,
    y: Option<Vec<u8>>,
}

impl PublicKeyMaterial {
    /// Creates key material from both coordinates.
    pub fn new(x: impl Into<Vec<u8>>, y: impl Into<Vec<u8>>) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
        }
    }

    /// Creates key material from possibly missing coordinates.
    pub fn from_coordinates(x: Option<Vec<u8>>, y: Option<Vec<u8>>) -> Self {
        Self { x, y }
    }

    /// The x coordinate, if present.
    pub fn x(&self) -> Option<&[u8]> {
        self.x.as_deref()
    }

    /// The y coordinate, if present.
    pub fn y(&self) -> Option<&[u8]> {
        self.y.as_deref()
    }

    /// Builds the uncompressed SEC1 encoding `0x04 || x || y`.
    ///
    /// Does not check that the point lies on the curve.
    pub fn to_uncompressed_point(&self) -> Result<[u8; UNCOMPRESSED_POINT_LEN], VerifyError> {
        let x = coordinate(self.x.as_deref(), "x")?;
        let y = coordinate(self.y.as_deref(), "y")?;

        let mut point = [0u8; UNCOMPRESSED_POINT_LEN];
        point[0] = UNCOMPRESSED_POINT_TAG;
        point[1..1 + COORDINATE_LEN].copy_from_slice(x);
        point[1 + COORDINATE_LEN..].copy_from_slice(y);
        Ok(point)
    }

    /// Reads the coordinates of an EC P-256 JWK.
    ///
    /// Missing `x`/`y` members are carried through as absent coordinates.
    pub fn from_jwk(jwk: &Jwk) -> Result<Self, TrustError> {
        if jwk.kty != "EC" || jwk.crv != "P-256" {
            return Err(TrustError::UnsupportedKey {
                kty: jwk.kty.clone(),
                crv: jwk.crv.clone(),
            });
        }
        Ok(Self {
            x: decode_coordinate(jwk.x.as_deref(), "x")?,
            y: decode_coordinate(jwk.y.as_deref(), "y")?,
        })
    }
}

fn coordinate<'a>(value: Option<&'a [u8]>, name: &str) -> Result<&'a [u8], VerifyError> {
    match value {
        None => Err(VerifyError::KeyMaterialInvalid(format!(
            "missing {name} coordinate"
        ))),
        Some(bytes) if bytes.len() != COORDINATE_LEN => Err(VerifyError::KeyMaterialInvalid(
            format!(
                "{name} coordinate is {} bytes, expected {COORDINATE_LEN}",
                bytes.len()
            ),
        )),
        Some(bytes) => Ok(bytes),
    }
}

fn decode_coordinate(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<Vec<u8>>, TrustError> {
    value
        .map(|encoded| {
            base64::engine::general_purpose::URL_SAFE_NO_PAD
                .decode(encoded.trim_end_matches('='))
                .map_err(|source| TrustError::InvalidCoordinate { field, source })
        })
        .transpose()
}

/// JSON Web Key, as published in issuer DID documents and JWKS files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type; only `EC` is supported.
    pub kty: String,
    /// Curve; only `P-256` is supported.
    pub crv: String,
    /// Key identifier matched against the protected header `kid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    /// Base64url x coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// Base64url y coordinate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}
