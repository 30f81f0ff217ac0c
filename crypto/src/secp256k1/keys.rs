//
// Copyright (c) 2019 Stegos AG
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use super::*;
use crate::utils::*;
use crate::CryptoError;
use log::*;
use num_bigint::RandBigInt;
use num_traits::{Num, One, Zero};
use rand::thread_rng;
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;

// ------------------------------------------------------------------------
// Raw key derivation. Scalars are taken as-is; reducing secret material
// modulo the group order is up to the caller.

/// Affine public point d * G. A scalar that is a multiple of the group order
/// gives (0, 0).
pub fn public_key(d: &BigUint) -> (Fq, Fq) {
    scalar_mul(d, &G).to_affine()
}

/// Affine point d * Q for Q = (qx, qy). Q is not checked against the curve.
pub fn derive_shared_secret(d: &BigUint, qx: &Fq, qy: &Fq) -> (Fq, Fq) {
    let q = ECp::affine(qx.clone(), qy.clone());
    scalar_mul(d, &q).to_affine()
}

// ------------------------------------------------------------------------
// Typed keys

/// Length of a SEC1 uncompressed point, 0x04 || x || y.
pub const PUBLIC_KEY_SIZE: usize = 65;
/// Leading byte of a SEC1 uncompressed point.
const UNCOMPRESSED_TAG: u8 = 0x04;

/// Secret scalar, never congruent to zero modulo the group order.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey(BigUint);

impl SecretKey {
    pub fn new(d: BigUint) -> Result<SecretKey, CryptoError> {
        if (&d % &*N).is_zero() {
            return Err(CryptoError::InvalidSecretKey);
        }
        Ok(SecretKey(d))
    }

    /// Uniform in [1, N).
    pub fn random() -> SecretKey {
        let mut rng = thread_rng();
        SecretKey(rng.gen_biguint_range(&BigUint::one(), &*N))
    }

    pub fn scalar(&self) -> &BigUint {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("{:064x}", self.0)
    }

    pub fn from_hex(s: &str) -> Result<SecretKey, CryptoError> {
        let d = BigUint::from_str_radix(strip_hex_prefix(s), 16)
            .map_err(|_| CryptoError::InvalidNumber(s.to_string()))?;
        SecretKey::new(d)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // keep secrets out of logs
        write!(f, "SKey(..)")
    }
}

/// Affine point on the curve, other than infinity.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    x: Fq,
    y: Fq,
}

impl PublicKey {
    pub fn new(x: Fq, y: Fq) -> Result<PublicKey, CryptoError> {
        if !ECp::affine(x.clone(), y.clone()).is_on_curve() {
            return Err(CryptoError::PointNotOnCurve);
        }
        Ok(PublicKey { x, y })
    }

    pub fn x(&self) -> &Fq {
        &self.x
    }

    pub fn y(&self) -> &Fq {
        &self.y
    }

    pub fn point(&self) -> ECp {
        ECp::affine(self.x.clone(), self.y.clone())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut v = Vec::with_capacity(PUBLIC_KEY_SIZE);
        v.push(UNCOMPRESSED_TAG);
        v.extend_from_slice(&self.x.to_bytes());
        v.extend_from_slice(&self.y.to_bytes());
        v
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, CryptoError> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(CryptoError::InvalidBinaryLength(PUBLIC_KEY_SIZE, bytes.len()));
        }
        if bytes[0] != UNCOMPRESSED_TAG {
            return Err(CryptoError::InvalidPointFormat(bytes[0]));
        }
        let x = BigUint::from_bytes_be(&bytes[1..33]);
        let y = BigUint::from_bytes_be(&bytes[33..]);
        if x >= *P || y >= *P {
            return Err(CryptoError::PointNotOnCurve);
        }
        PublicKey::new(Fq::from(x), Fq::from(y))
    }

    pub fn to_hex(&self) -> String {
        u8v_to_hexstr(&self.to_bytes())
    }

    pub fn from_hex(s: &str) -> Result<PublicKey, CryptoError> {
        let mut bytes = [0u8; PUBLIC_KEY_SIZE];
        hexstr_to_bev_u8(s, &mut bytes)?;
        PublicKey::from_bytes(&bytes)
    }
}

impl<'a> From<&'a SecretKey> for PublicKey {
    fn from(skey: &'a SecretKey) -> PublicKey {
        // a non-zero scalar mod N never lands on infinity
        let (x, y) = public_key(skey.scalar());
        PublicKey { x, y }
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", u8v_to_typed_str("PKey", &self.to_bytes()))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_hex(&s).map_err(de::Error::custom)
    }
}

impl Serialize for SecretKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        SecretKey::from_hex(&s).map_err(de::Error::custom)
    }
}

/// Diffie-Hellman point shared by two key holders.
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecret {
    x: Fq,
    y: Fq,
}

impl SharedSecret {
    pub fn x(&self) -> &Fq {
        &self.x
    }

    pub fn y(&self) -> &Fq {
        &self.y
    }

    /// x coordinate as 32 big-endian bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.x.to_bytes()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SharedSecret(..)")
    }
}

pub fn make_random_keys() -> (SecretKey, PublicKey) {
    let skey = SecretKey::random();
    let pkey = PublicKey::from(&skey);
    debug!("Generated {}", pkey);
    (skey, pkey)
}

pub fn derive_key(skey: &SecretKey, pkey: &PublicKey) -> SharedSecret {
    trace!(
        "Deriving shared secret with {}, scalar of {} bits",
        pkey,
        skey.scalar().bits()
    );
    let (x, y) = derive_shared_secret(skey.scalar(), &pkey.x, &pkey.y);
    SharedSecret { x, y }
}
