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

//! secp256k1: y^2 = x^3 + 7 over F_p, p = 2^256 - 2^32 - 977.

use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::Num;

mod fq;
pub use self::fq::*;

mod inverse;
pub use self::inverse::*;

mod frac;
pub use self::frac::*;

mod ecpt;
pub use self::ecpt::*;

mod keys;
pub use self::keys::*;

/// Coefficient `a` of the short Weierstrass form.
pub const CURVE_A: u64 = 0;
/// Coefficient `b` of the short Weierstrass form.
pub const CURVE_B: u64 = 7;

lazy_static! {
    /// The field prime.
    pub static ref P: BigUint = BigUint::from_str_radix(
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
        16
    )
    .expect("valid field prime");

    /// Order of the base point, |N| * G = INF.
    pub static ref N: BigUint = BigUint::from_str_radix(
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
        16
    )
    .expect("valid group order");

    pub static ref GX: Fq =
        Fq::from_hex("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798")
            .expect("valid generator x");

    pub static ref GY: Fq =
        Fq::from_hex("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8")
            .expect("valid generator y");

    /// The base point.
    pub static ref G: ECp = ECp::affine(GX.clone(), GY.clone());
}

// -------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn prime_shape() {
        let p = (BigUint::one() << 256) - (BigUint::one() << 32) - BigUint::from(977u32);
        assert_eq!(*P, p);
        assert!(*N < *P);
    }

    #[test]
    fn generator_on_curve() {
        assert!(G.is_on_curve());
        let lhs = GY.sqr();
        let rhs = &GX.sqr() * &*GX + Fq::from(CURVE_B);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn generator_order() {
        assert!((&*G * &*N).is_inf());
        assert_eq!(&*G * &(&*N + 1u32), *G);
    }
}
