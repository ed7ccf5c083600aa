// Copyright (c) 2026 Oleksandr Melnychenko, Ukraine
// Ecliptix Security — ZKX Identity Handshake
// Licensed under the MIT License

//! Named prime-order groups and the handful of operations the Schnorr
//! identity needs from them.
//!
//! Scalars cross this module boundary as 32-byte big-endian integers and points
//! as their compressed encodings (33-byte SEC1 for the Weierstrass curves,
//! 32 bytes for Ristretto255), so callers never touch backend types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec;
use crate::types::{constant_time_eq, is_all_zero, ZkxError, ZkxResult, SCALAR_LENGTH};

/// Supported named curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveName {
    #[serde(rename = "secp256k1")]
    Secp256k1,
    #[serde(rename = "P-256", alias = "secp256r1", alias = "prime256v1", alias = "p256")]
    P256,
    #[serde(rename = "ristretto255")]
    Ristretto255,
}

impl CurveName {
    /// Canonical wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            CurveName::Secp256k1 => "secp256k1",
            CurveName::P256 => "P-256",
            CurveName::Ristretto255 => "ristretto255",
        }
    }

    /// Bit length of the group order N.
    pub fn order_bits(self) -> usize {
        match self {
            CurveName::Secp256k1 | CurveName::P256 => 256,
            CurveName::Ristretto255 => 253,
        }
    }

    /// Length of a compressed point encoding in bytes.
    pub fn point_length(self) -> usize {
        match self {
            CurveName::Secp256k1 | CurveName::P256 => 33,
            CurveName::Ristretto255 => 32,
        }
    }

    /// Interprets `digest` as a big-endian integer and reduces it modulo N.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidInput`] if the digest is wider than 64 bytes
    /// on Ristretto255.
    pub fn reduce(self, digest: &[u8]) -> ZkxResult<Scalar> {
        match self {
            CurveName::Secp256k1 => Ok(weierstrass::reduce::<k256::ProjectivePoint>(digest)),
            CurveName::P256 => Ok(weierstrass::reduce::<p256::ProjectivePoint>(digest)),
            CurveName::Ristretto255 => ristretto::reduce(digest),
        }
    }

    /// Draws a scalar uniformly from `[0, N)`.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::EntropyUnavailable`] if the random source is unavailable.
    pub fn random_scalar(self) -> ZkxResult<Scalar> {
        match self {
            CurveName::Secp256k1 => weierstrass::random_scalar::<k256::ProjectivePoint>(),
            CurveName::P256 => weierstrass::random_scalar::<p256::ProjectivePoint>(),
            CurveName::Ristretto255 => ristretto::random_scalar(),
        }
    }

    /// Computes `k · G`.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidScalar`] if `k` is not canonical or is zero.
    pub fn mul_base(self, k: &Scalar) -> ZkxResult<Point> {
        match self {
            CurveName::Secp256k1 => weierstrass::mul_base::<k256::ProjectivePoint>(k),
            CurveName::P256 => weierstrass::mul_base::<p256::ProjectivePoint>(k),
            CurveName::Ristretto255 => ristretto::mul_base(k),
        }
    }

    /// Computes `m · G + c · P`.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidPoint`] if `point` is not a valid non-identity
    /// element, [`ZkxError::InvalidScalar`] for non-canonical scalars.
    pub fn mul_base_add(self, m: &Scalar, c: &Scalar, point: &Point) -> ZkxResult<Point> {
        match self {
            CurveName::Secp256k1 => weierstrass::mul_base_add::<k256::ProjectivePoint>(m, c, point),
            CurveName::P256 => weierstrass::mul_base_add::<p256::ProjectivePoint>(m, c, point),
            CurveName::Ristretto255 => ristretto::mul_base_add(m, c, point),
        }
    }

    /// Computes `(r − c · key) mod N`.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidScalar`] if any input is not canonical.
    pub fn sub_mul(self, r: &Scalar, c: &Scalar, key: &Scalar) -> ZkxResult<Scalar> {
        match self {
            CurveName::Secp256k1 => weierstrass::sub_mul::<k256::ProjectivePoint>(r, c, key),
            CurveName::P256 => weierstrass::sub_mul::<p256::ProjectivePoint>(r, c, key),
            CurveName::Ristretto255 => ristretto::sub_mul(r, c, key),
        }
    }

    /// Checks that `point` decodes to a non-identity group element.
    pub fn validate_point(self, point: &Point) -> ZkxResult<()> {
        match self {
            CurveName::Secp256k1 => weierstrass::validate_point::<k256::ProjectivePoint>(point),
            CurveName::P256 => weierstrass::validate_point::<p256::ProjectivePoint>(point),
            CurveName::Ristretto255 => ristretto::validate_point(point),
        }
    }

    /// Checks that `scalar` is strictly below the group order.
    pub fn validate_scalar(self, scalar: &Scalar) -> ZkxResult<()> {
        match self {
            CurveName::Secp256k1 => weierstrass::validate_scalar::<k256::ProjectivePoint>(scalar),
            CurveName::P256 => weierstrass::validate_scalar::<p256::ProjectivePoint>(scalar),
            CurveName::Ristretto255 => ristretto::validate_scalar(scalar),
        }
    }
}

impl FromStr for CurveName {
    type Err = ZkxError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "secp256k1" => Ok(CurveName::Secp256k1),
            "p-256" | "p256" | "secp256r1" | "prime256v1" => Ok(CurveName::P256),
            "ristretto255" => Ok(CurveName::Ristretto255),
            _ => Err(ZkxError::InvalidCurve),
        }
    }
}

impl fmt::Display for CurveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A 32-byte big-endian integer modulo some group order. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Scalar([u8; SCALAR_LENGTH]);

impl Scalar {
    pub fn from_bytes(bytes: [u8; SCALAR_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parses a big-endian integer of at most 32 bytes, left-padding with zeros.
    ///
    /// # Errors
    ///
    /// Returns [`ZkxError::InvalidScalar`] if `bytes` is longer than 32 bytes.
    pub fn from_be_slice(bytes: &[u8]) -> ZkxResult<Self> {
        if bytes.len() > SCALAR_LENGTH {
            return Err(ZkxError::InvalidScalar);
        }
        let mut out = [0u8; SCALAR_LENGTH];
        out[SCALAR_LENGTH - bytes.len()..].copy_from_slice(bytes);
        Ok(Self(out))
    }

    pub fn as_bytes(&self) -> &[u8; SCALAR_LENGTH] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        is_all_zero(&self.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        constant_time_eq(&self.0, &other.0)
    }
}

impl Eq for Scalar {}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scalar([REDACTED])")
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&codec::encode_b64(&self.0))
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut bytes = codec::b64_bytes::deserialize(deserializer)?;
        let scalar = Scalar::from_be_slice(&bytes).map_err(serde::de::Error::custom);
        bytes.zeroize();
        scalar
    }
}

/// A compressed curve point encoding.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Point(Vec<u8>);

impl Point {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point({})", hex::encode(&self.0))
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&codec::encode_b64(&self.0))
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        codec::b64_bytes::deserialize(deserializer).map(Point)
    }
}

/// secp256k1 and P-256 through the `group` / `ff` traits shared by `k256` and `p256`.
mod weierstrass {
    use k256::elliptic_curve::ff::{Field, PrimeField};
    use k256::elliptic_curve::group::{Group, GroupEncoding};
    use zeroize::Zeroize;

    use super::{Point, Scalar};
    use crate::crypto;
    use crate::types::{ZkxError, ZkxResult, SCALAR_LENGTH};

    fn to_field<G: Group>(scalar: &Scalar) -> ZkxResult<G::Scalar> {
        let mut repr = <G::Scalar as PrimeField>::Repr::default();
        if repr.as_ref().len() != SCALAR_LENGTH {
            return Err(ZkxError::CryptoError);
        }
        repr.as_mut().copy_from_slice(scalar.as_bytes());
        let value: Option<G::Scalar> = G::Scalar::from_repr(repr).into();
        repr.as_mut().zeroize();
        value.ok_or(ZkxError::InvalidScalar)
    }

    fn from_field<G: Group>(value: G::Scalar) -> Scalar {
        let mut repr = value.to_repr();
        let mut out = [0u8; SCALAR_LENGTH];
        out.copy_from_slice(repr.as_ref());
        repr.as_mut().zeroize();
        Scalar::from_bytes(out)
    }

    fn decode_point<G: Group + GroupEncoding>(point: &Point) -> ZkxResult<G> {
        let mut repr = G::Repr::default();
        if repr.as_ref().len() != point.as_bytes().len() {
            return Err(ZkxError::InvalidPoint);
        }
        repr.as_mut().copy_from_slice(point.as_bytes());
        let decoded: Option<G> = G::from_bytes(&repr).into();
        match decoded {
            Some(p) if !bool::from(p.is_identity()) => Ok(p),
            _ => Err(ZkxError::InvalidPoint),
        }
    }

    fn encode_point<G: GroupEncoding>(point: &G) -> Point {
        Point::from_bytes(point.to_bytes().as_ref().to_vec())
    }

    // Horner evaluation in the scalar field: every byte costs one mul and one add.
    pub(super) fn reduce<G: Group>(digest: &[u8]) -> Scalar {
        let radix = G::Scalar::from(256u64);
        let value = digest.iter().fold(G::Scalar::ZERO, |acc, byte| {
            acc * radix + G::Scalar::from(u64::from(*byte))
        });
        from_field::<G>(value)
    }

    pub(super) fn random_scalar<G: Group>() -> ZkxResult<Scalar> {
        let mut wide = [0u8; 2 * SCALAR_LENGTH];
        crypto::random_bytes(&mut wide)?;
        let scalar = reduce::<G>(&wide);
        wide.zeroize();
        Ok(scalar)
    }

    pub(super) fn mul_base<G: Group + GroupEncoding>(k: &Scalar) -> ZkxResult<Point> {
        let point = G::generator() * to_field::<G>(k)?;
        if bool::from(point.is_identity()) {
            return Err(ZkxError::InvalidScalar);
        }
        Ok(encode_point(&point))
    }

    pub(super) fn mul_base_add<G: Group + GroupEncoding>(
        m: &Scalar,
        c: &Scalar,
        point: &Point,
    ) -> ZkxResult<Point> {
        let p = decode_point::<G>(point)?;
        let sum = G::generator() * to_field::<G>(m)? + p * to_field::<G>(c)?;
        Ok(encode_point(&sum))
    }

    pub(super) fn sub_mul<G: Group>(r: &Scalar, c: &Scalar, key: &Scalar) -> ZkxResult<Scalar> {
        let value = to_field::<G>(r)? - to_field::<G>(c)? * to_field::<G>(key)?;
        Ok(from_field::<G>(value))
    }

    pub(super) fn validate_point<G: Group + GroupEncoding>(point: &Point) -> ZkxResult<()> {
        decode_point::<G>(point).map(|_| ())
    }

    pub(super) fn validate_scalar<G: Group>(scalar: &Scalar) -> ZkxResult<()> {
        to_field::<G>(scalar).map(|_| ())
    }
}

/// Ristretto255 through libsodium. libsodium scalars are little-endian, so
/// every crossing reverses byte order.
mod ristretto {
    use zeroize::Zeroize;

    use super::{Point, Scalar};
    use crate::crypto;
    use crate::types::{is_all_zero, ZkxError, ZkxResult, MAX_DIGEST_LENGTH, SCALAR_LENGTH};

    const POINT_LENGTH: usize = 32;

    /// Group order L = 2^252 + 27742317777372353535851937790883648493, big-endian.
    const ORDER_BE: [u8; SCALAR_LENGTH] = [
        0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x14, 0xde, 0xf9, 0xde, 0xa2, 0xf7, 0x9c, 0xd6, 0x58, 0x12, 0x63, 0x1a, 0x5c, 0xf5,
        0xd3, 0xed,
    ];

    fn to_le(scalar: &Scalar) -> [u8; SCALAR_LENGTH] {
        let mut out = *scalar.as_bytes();
        out.reverse();
        out
    }

    fn from_le(mut le: [u8; SCALAR_LENGTH]) -> Scalar {
        le.reverse();
        let scalar = Scalar::from_bytes(le);
        le.zeroize();
        scalar
    }

    pub(super) fn reduce(digest: &[u8]) -> ZkxResult<Scalar> {
        if digest.len() > MAX_DIGEST_LENGTH {
            return Err(ZkxError::InvalidInput);
        }
        let mut wide = [0u8; MAX_DIGEST_LENGTH];
        for (dst, src) in wide.iter_mut().zip(digest.iter().rev()) {
            *dst = *src;
        }
        let mut out = [0u8; SCALAR_LENGTH];
        // SAFETY: wide is a 64-byte array, out is a 32-byte array as required by libsodium.
        unsafe {
            libsodium_sys::crypto_core_ristretto255_scalar_reduce(out.as_mut_ptr(), wide.as_ptr());
        }
        wide.zeroize();
        Ok(from_le(out))
    }

    pub(super) fn random_scalar() -> ZkxResult<Scalar> {
        crypto::init()?;
        let mut out = [0u8; SCALAR_LENGTH];
        // SAFETY: Output is a 32-byte array.
        unsafe {
            libsodium_sys::crypto_core_ristretto255_scalar_random(out.as_mut_ptr());
        }
        Ok(from_le(out))
    }

    pub(super) fn validate_scalar(scalar: &Scalar) -> ZkxResult<()> {
        if scalar.as_bytes() < &ORDER_BE {
            Ok(())
        } else {
            Err(ZkxError::InvalidScalar)
        }
    }

    pub(super) fn validate_point(point: &Point) -> ZkxResult<()> {
        let bytes = point.as_bytes();
        if bytes.len() != POINT_LENGTH || is_all_zero(bytes) {
            return Err(ZkxError::InvalidPoint);
        }
        // SAFETY: Pointer comes from a valid slice of POINT_LENGTH bytes.
        unsafe {
            if libsodium_sys::crypto_core_ristretto255_is_valid_point(bytes.as_ptr()) != 1 {
                return Err(ZkxError::InvalidPoint);
            }
        }
        Ok(())
    }

    pub(super) fn mul_base(k: &Scalar) -> ZkxResult<Point> {
        validate_scalar(k)?;
        let mut k_le = to_le(k);
        let mut out = [0u8; POINT_LENGTH];
        // SAFETY: Both arrays are 32 bytes as required. Return code is checked.
        let rc = unsafe {
            libsodium_sys::crypto_scalarmult_ristretto255_base(out.as_mut_ptr(), k_le.as_ptr())
        };
        k_le.zeroize();
        if rc != 0 {
            return Err(ZkxError::InvalidScalar);
        }
        Ok(Point::from_bytes(out.to_vec()))
    }

    pub(super) fn mul_base_add(m: &Scalar, c: &Scalar, point: &Point) -> ZkxResult<Point> {
        validate_point(point)?;
        validate_scalar(m)?;
        validate_scalar(c)?;
        let m_le = to_le(m);
        let c_le = to_le(c);
        let mut lhs = [0u8; POINT_LENGTH];
        let mut rhs = [0u8; POINT_LENGTH];
        let mut sum = [0u8; POINT_LENGTH];
        // SAFETY: All arrays are 32 bytes; point was validated above. Return codes are checked.
        unsafe {
            if libsodium_sys::crypto_scalarmult_ristretto255_base(lhs.as_mut_ptr(), m_le.as_ptr())
                != 0
            {
                return Err(ZkxError::CryptoError);
            }
            if libsodium_sys::crypto_scalarmult_ristretto255(
                rhs.as_mut_ptr(),
                c_le.as_ptr(),
                point.as_bytes().as_ptr(),
            ) != 0
            {
                return Err(ZkxError::CryptoError);
            }
            if libsodium_sys::crypto_core_ristretto255_add(
                sum.as_mut_ptr(),
                lhs.as_ptr(),
                rhs.as_ptr(),
            ) != 0
            {
                return Err(ZkxError::CryptoError);
            }
        }
        Ok(Point::from_bytes(sum.to_vec()))
    }

    pub(super) fn sub_mul(r: &Scalar, c: &Scalar, key: &Scalar) -> ZkxResult<Scalar> {
        validate_scalar(r)?;
        validate_scalar(c)?;
        validate_scalar(key)?;
        let mut r_le = to_le(r);
        let mut key_le = to_le(key);
        let c_le = to_le(c);
        let mut product = [0u8; SCALAR_LENGTH];
        let mut out = [0u8; SCALAR_LENGTH];
        // SAFETY: All arrays are 32 bytes as required by libsodium.
        unsafe {
            libsodium_sys::crypto_core_ristretto255_scalar_mul(
                product.as_mut_ptr(),
                c_le.as_ptr(),
                key_le.as_ptr(),
            );
            libsodium_sys::crypto_core_ristretto255_scalar_sub(
                out.as_mut_ptr(),
                r_le.as_ptr(),
                product.as_ptr(),
            );
        }
        r_le.zeroize();
        key_le.zeroize();
        product.zeroize();
        Ok(from_le(out))
    }
}
