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
use num_bigint::BigInt;
use num_traits::{Num, One, Signed, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

// -----------------------------------------------------------------
// Fq is the field in which the curve is computed - coords are all elements of Fq.
// Values are always held as the canonical representative in [0, p).

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fq(BigUint);

impl Fq {
    pub fn zero() -> Fq {
        Fq(BigUint::zero())
    }

    pub fn one() -> Fq {
        Fq(BigUint::one())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn is_odd(&self) -> bool {
        (&self.0 & BigUint::one()).is_one()
    }

    pub fn bits(&self) -> &BigUint {
        &self.0
    }

    pub fn into_bits(self) -> BigUint {
        self.0
    }

    /// Reduce an arbitrary non-negative integer into [0, p).
    pub fn reduce(v: BigUint) -> Fq {
        if v < *P {
            Fq(v)
        } else {
            Fq(v % &*P)
        }
    }

    /// Reduce a signed integer into [0, p), lifting negative residues by p.
    pub fn reduce_signed(v: BigInt) -> Fq {
        let p = BigInt::from(P.clone());
        let mut r = v % &p;
        while r.is_negative() {
            r += &p;
        }
        Fq(r.to_biguint().unwrap_or_default())
    }

    pub fn sqr(&self) -> Fq {
        self * self
    }

    /// Multiplicative inverse, with `0` mapped to `0`.
    pub fn invert(&self) -> Fq {
        invert(self)
    }

    /// Multiplicative inverse which refuses to invert zero.
    pub fn checked_invert(&self) -> Result<Fq, CryptoError> {
        if self.is_zero() {
            return Err(CryptoError::DivisionByZero);
        }
        Ok(invert(self))
    }

    pub fn from_hex(s: &str) -> Result<Fq, CryptoError> {
        let v = BigUint::from_str_radix(strip_hex_prefix(s), 16)
            .map_err(|_| CryptoError::InvalidNumber(s.to_string()))?;
        Ok(Fq::reduce(v))
    }

    pub fn from_dec(s: &str) -> Result<Fq, CryptoError> {
        let v = BigUint::from_str_radix(s, 10)
            .map_err(|_| CryptoError::InvalidNumber(s.to_string()))?;
        Ok(Fq::reduce(v))
    }

    /// Zero-padded 64-digit lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("{:064x}", self.0)
    }

    pub fn from_bytes(bytes: &[u8]) -> Fq {
        Fq::reduce(BigUint::from_bytes_be(bytes))
    }

    /// 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        biguint_to_bev_u8(&self.0, 32)
    }
}

// -------------------------------------------

impl fmt::Display for Fq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Fq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fq({})", self.0)
    }
}

/// Accepts `0x`-prefixed hex or plain decimal.
impl FromStr for Fq {
    type Err = CryptoError;
    fn from_str(s: &str) -> Result<Fq, CryptoError> {
        if s.starts_with("0x") || s.starts_with("0X") {
            Fq::from_hex(s)
        } else {
            Fq::from_dec(s)
        }
    }
}

impl From<u64> for Fq {
    fn from(x: u64) -> Fq {
        Fq::reduce(BigUint::from(x))
    }
}

impl From<BigUint> for Fq {
    fn from(x: BigUint) -> Fq {
        Fq::reduce(x)
    }
}

impl From<Fq> for BigUint {
    fn from(x: Fq) -> BigUint {
        x.0
    }
}

// -------------------------------------------

fn add_mod(a: &Fq, b: &Fq) -> Fq {
    Fq::reduce(&a.0 + &b.0)
}

fn sub_mod(a: &Fq, b: &Fq) -> Fq {
    if a.0 >= b.0 {
        Fq(&a.0 - &b.0)
    } else {
        // a - b is negative, lift by p
        Fq(&*P - &b.0 + &a.0)
    }
}

fn mul_mod(a: &Fq, b: &Fq) -> Fq {
    Fq::reduce(&a.0 * &b.0)
}

macro_rules! fq_binop {
    ($imp:ident, $method:ident, $op:ident) => {
        impl<'a, 'b> $imp<&'b Fq> for &'a Fq {
            type Output = Fq;
            fn $method(self, other: &'b Fq) -> Fq {
                $op(self, other)
            }
        }

        impl<'a> $imp<&'a Fq> for Fq {
            type Output = Fq;
            fn $method(self, other: &'a Fq) -> Fq {
                $op(&self, other)
            }
        }

        impl<'a> $imp<Fq> for &'a Fq {
            type Output = Fq;
            fn $method(self, other: Fq) -> Fq {
                $op(self, &other)
            }
        }

        impl $imp<Fq> for Fq {
            type Output = Fq;
            fn $method(self, other: Fq) -> Fq {
                $op(&self, &other)
            }
        }
    };
}

fq_binop!(Add, add, add_mod);
fq_binop!(Sub, sub, sub_mod);
fq_binop!(Mul, mul, mul_mod);

impl<'a> Neg for &'a Fq {
    type Output = Fq;
    fn neg(self) -> Fq {
        if self.is_zero() {
            Fq::zero()
        } else {
            Fq(&*P - &self.0)
        }
    }
}

impl Neg for Fq {
    type Output = Fq;
    fn neg(self) -> Fq {
        -&self
    }
}
