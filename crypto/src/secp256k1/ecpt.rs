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
use crate::CryptoError;
use std::fmt;
use std::ops::{Add, Mul, Neg};

// -------------------------------------------------------------------------
// Projective triples
//
// A triple (x, y, z) stands for the affine point (x/z, y/z). The raw
// operations below work on the coordinates as fractions over z and build a
// fresh triple from the resulting x and y fractions. They never invert and
// never look for degenerate inputs.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjPt {
    pub x: Fq,
    pub y: Fq,
    pub z: Fq,
}

impl ProjPt {
    pub fn new(x: Fq, y: Fq, z: Fq) -> ProjPt {
        ProjPt { x, y, z }
    }

    pub fn from_affine(x: Fq, y: Fq) -> ProjPt {
        ProjPt::new(x, y, Fq::one())
    }

    fn frac_x(&self) -> Frac {
        Frac::new(self.x.clone(), self.z.clone())
    }

    fn frac_y(&self) -> Frac {
        Frac::new(self.y.clone(), self.z.clone())
    }

    /// Put the x and y fractions over a common denominator.
    fn combine(x: Frac, y: Frac) -> ProjPt {
        if x.den == y.den {
            ProjPt::new(x.num, y.num, x.den)
        } else {
            ProjPt::new(&x.num * &y.den, &y.num * &x.den, &x.den * &y.den)
        }
    }
}

/// Tangent doubling, lambda = 3x^2 / 2y.
///
/// A point with y == 0 comes out with z == 0; the caller has to treat that
/// as the point at infinity.
pub fn ec_double(pt: &ProjPt) -> ProjPt {
    let x = pt.frac_x();
    let y = pt.frac_y();

    let lambda = (&x * &x * Frac::from(3)) / (&y * Frac::from(2));
    let x3 = &lambda * &lambda - &x - &x;
    let y3 = &lambda * (&x - &x3) - &y;

    ProjPt::combine(x3, y3)
}

/// Chord addition, lambda = (y2 - y1) / (x2 - x1).
///
/// Only defined for x1 != x2. Equal or opposite points produce a zero
/// denominator; route those through `ECp` instead.
pub fn ec_add(p1: &ProjPt, p2: &ProjPt) -> ProjPt {
    let (x1, y1) = (p1.frac_x(), p1.frac_y());
    let (x2, y2) = (p2.frac_x(), p2.frac_y());

    let lambda = (&y2 - &y1) / (&x2 - &x1);
    let x3 = &lambda * &lambda - &x1 - &x2;
    let y3 = &lambda * (&x1 - &x3) - &y1;

    ProjPt::combine(x3, y3)
}

/// k * P as a raw triple; infinity is returned as (0, 1, 0).
pub fn ec_mul(k: &BigUint, pt: &ProjPt) -> ProjPt {
    match scalar_mul(k, &ECp::Projective(pt.clone())).to_proj() {
        Some(r) => r,
        None => ProjPt::new(Fq::zero(), Fq::one(), Fq::zero()),
    }
}

/// Affine coordinates of a triple. z == 0 gives (0, 0).
pub fn norm(pt: &ProjPt) -> (Fq, Fq) {
    let w = pt.z.invert();
    (&pt.x * &w, &pt.y * &w)
}

// -------------------------------------------------------------------------
// Point Structure

#[derive(Clone, Debug)]
pub enum ECp {
    Infinity,
    Affine { x: Fq, y: Fq },
    Projective(ProjPt),
}

impl ECp {
    pub fn inf() -> ECp {
        ECp::Infinity
    }

    /// No curve check, see `PublicKey::new` for a validating constructor.
    pub fn affine(x: Fq, y: Fq) -> ECp {
        ECp::Affine { x, y }
    }

    fn from_proj(pt: ProjPt) -> ECp {
        if pt.z.is_zero() {
            ECp::Infinity
        } else {
            ECp::Projective(pt)
        }
    }

    /// Triple form, or None for the point at infinity.
    pub fn to_proj(&self) -> Option<ProjPt> {
        match self {
            ECp::Infinity => None,
            ECp::Affine { x, y } => Some(ProjPt::from_affine(x.clone(), y.clone())),
            ECp::Projective(pt) if pt.z.is_zero() => None,
            ECp::Projective(pt) => Some(pt.clone()),
        }
    }

    pub fn is_inf(&self) -> bool {
        match self {
            ECp::Infinity => true,
            ECp::Affine { .. } => false,
            ECp::Projective(pt) => pt.z.is_zero(),
        }
    }

    pub fn is_affine(&self) -> bool {
        match self {
            ECp::Affine { .. } => true,
            _ => false,
        }
    }

    /// y^2 z = x^3 + 7 z^3
    pub fn is_on_curve(&self) -> bool {
        match self.to_proj() {
            None => true,
            Some(pt) => {
                let z3 = &pt.z.sqr() * &pt.z;
                let lhs = &pt.y.sqr() * &pt.z;
                let rhs = &pt.x.sqr() * &pt.x + &z3 * &Fq::from(CURVE_B);
                lhs == rhs
            }
        }
    }

    /// Affine coordinates; infinity normalizes to (0, 0).
    pub fn to_affine(&self) -> (Fq, Fq) {
        match self {
            ECp::Infinity => (Fq::zero(), Fq::zero()),
            ECp::Affine { x, y } => (x.clone(), y.clone()),
            ECp::Projective(pt) => norm(pt),
        }
    }

    pub fn try_affine(&self) -> Result<(Fq, Fq), CryptoError> {
        if self.is_inf() {
            return Err(CryptoError::PointAtInfinity);
        }
        Ok(self.to_affine())
    }

    /// Same point with z == 1.
    pub fn normalized(&self) -> ECp {
        if self.is_inf() {
            return ECp::Infinity;
        }
        let (x, y) = self.to_affine();
        ECp::affine(x, y)
    }

    pub fn double(&self) -> ECp {
        match self.to_proj() {
            None => ECp::Infinity,
            // vertical tangent
            Some(ref pt) if pt.y.is_zero() => ECp::Infinity,
            Some(pt) => ECp::from_proj(ec_double(&pt)),
        }
    }
}

fn ecp_add(a: &ECp, b: &ECp) -> ECp {
    let (p1, p2) = match (a.to_proj(), b.to_proj()) {
        (None, _) => return b.clone(),
        (_, None) => return a.clone(),
        (Some(p1), Some(p2)) => (p1, p2),
    };

    // x1/z1 == x2/z2 without inverting
    if &p1.x * &p2.z == &p2.x * &p1.z {
        if &p1.y * &p2.z == &p2.y * &p1.z {
            return a.double();
        }
        return ECp::Infinity;
    }

    ECp::from_proj(ec_add(&p1, &p2))
}

/// Double-and-add from the most significant bit of `k` down.
///
/// The loop shape and the additions performed depend on the bits of `k`,
/// so this is not constant time.
pub fn scalar_mul(k: &BigUint, pt: &ECp) -> ECp {
    let mut acc = ECp::Infinity;
    for byte in k.to_bytes_be() {
        for bit in (0..8).rev() {
            acc = acc.double();
            if (byte >> bit) & 1 == 1 {
                acc = ecp_add(&acc, pt);
            }
        }
    }
    acc
}

// -------------------------------------------

impl fmt::Display for ECp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_inf() {
            return write!(f, "ECp(INF)");
        }
        let (x, y) = self.to_affine();
        write!(f, "ECp {{ x: {}, y: {} }}", x, y)
    }
}

impl Eq for ECp {}
impl PartialEq for ECp {
    fn eq(&self, b: &ECp) -> bool {
        match (self.to_proj(), b.to_proj()) {
            (None, None) => true,
            (Some(p1), Some(p2)) => {
                &p1.x * &p2.z == &p2.x * &p1.z && &p1.y * &p2.z == &p2.y * &p1.z
            }
            _ => false,
        }
    }
}

impl<'a, 'b> Add<&'b ECp> for &'a ECp {
    type Output = ECp;
    fn add(self, other: &'b ECp) -> ECp {
        ecp_add(self, other)
    }
}

impl Add<ECp> for ECp {
    type Output = ECp;
    fn add(self, other: ECp) -> ECp {
        ecp_add(&self, &other)
    }
}

impl<'a> Neg for &'a ECp {
    type Output = ECp;
    fn neg(self) -> ECp {
        match self {
            ECp::Infinity => ECp::Infinity,
            ECp::Affine { x, y } => ECp::affine(x.clone(), -y),
            ECp::Projective(pt) => {
                ECp::Projective(ProjPt::new(pt.x.clone(), -&pt.y, pt.z.clone()))
            }
        }
    }
}

impl Neg for ECp {
    type Output = ECp;
    fn neg(self) -> ECp {
        -&self
    }
}

impl<'a, 'b> Mul<&'b BigUint> for &'a ECp {
    type Output = ECp;
    fn mul(self, k: &'b BigUint) -> ECp {
        scalar_mul(k, self)
    }
}

impl<'a> Mul<u64> for &'a ECp {
    type Output = ECp;
    fn mul(self, k: u64) -> ECp {
        match k {
            0 => ECp::Infinity,
            1 => self.clone(),
            _ => scalar_mul(&BigUint::from(k), self),
        }
    }
}

// -------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    const G2X: &str = "89565891926547004231252920425935692360644145829622209833684329913297188986597";
    const G2Y: &str = "12158399299693830322967808612713398636155367887041628176798871954788371653930";
    const G3X: &str = "112711660439710606056748659173929673102114977341539408544630613555209775888121";
    const G3Y: &str = "25583027980570883691656905877401976406448868254816295069919888960541586679410";

    fn g() -> ProjPt {
        ProjPt::from_affine(GX.clone(), GY.clone())
    }

    fn assert_affine(pt: &ProjPt, x: &str, y: &str) {
        let (ax, ay) = norm(pt);
        assert_eq!(ax.to_string(), x);
        assert_eq!(ay.to_string(), y);
    }

    #[test]
    fn double_generator() {
        let g2 = ec_double(&g());
        assert_affine(&g2, G2X, G2Y);
    }

    #[test]
    fn double_matches_frac_chain() {
        // lambda and x', y' worked out by hand with explicit mod-p fractions
        let ln = &GX.sqr() * &Fq::from(3);
        let ld = &*GY * &Fq::from(2);
        let x2n = ln.sqr() - &(&*GX * &Fq::from(2)) * &ld.sqr();
        let x2d = ld.sqr();
        let y2n = &(&*GX * &x2d) * &ln - &x2n * &ln - &(&*GY * &x2d) * &ld;
        let y2d = &x2d * &ld;
        let x = &x2n * &x2d.invert();
        let y = &y2n * &y2d.invert();
        assert_eq!(x.to_string(), G2X);
        assert_eq!(y.to_string(), G2Y);
    }

    #[test]
    fn add_generator_and_double() {
        let g2 = ProjPt::from_affine(Fq::from_dec(G2X).unwrap(), Fq::from_dec(G2Y).unwrap());
        assert_affine(&ec_add(&g(), &g2), G3X, G3Y);
    }

    #[test]
    fn two_g_plus_g_is_three_g() {
        let g2 = ec_double(&g());
        let g3 = ec_add(&g(), &g2);
        let g3c = ec_mul(&BigUint::from(3u32), &g());
        assert_eq!(norm(&g3), norm(&g3c));
        assert_affine(&g3c, G3X, G3Y);
    }

    #[test]
    fn double_equals_self_add() {
        let g2 = G.double();
        let sum = &*G + &*G;
        assert_eq!(g2.to_affine(), sum.to_affine());
        assert_eq!(g2.to_affine().0.to_string(), G2X);
    }

    #[test]
    fn infinity_is_identity() {
        let inf = ECp::inf();
        assert!(inf.is_inf());
        assert_eq!(&inf + &*G, *G);
        assert_eq!(&*G + &inf, *G);
        assert!((&inf + &inf).is_inf());
        assert!(inf.double().is_inf());
        assert_eq!(inf.to_affine(), (Fq::zero(), Fq::zero()));
        match inf.try_affine() {
            Err(CryptoError::PointAtInfinity) => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn opposite_points_cancel() {
        let neg = -&*G;
        assert!(neg.is_on_curve());
        assert!((&*G + &neg).is_inf());
        let g2 = G.double();
        assert!((&g2 + &(-&g2)).is_inf());
    }

    #[test]
    fn zero_z_normalizes_to_zero() {
        let pt = ProjPt::new(Fq::from(5), Fq::from(7), Fq::zero());
        assert_eq!(norm(&pt), (Fq::zero(), Fq::zero()));
        assert!(ECp::Projective(pt).is_inf());
    }

    #[test]
    fn raw_double_of_zero_y_has_zero_z() {
        let pt = ProjPt::from_affine(Fq::from(3), Fq::zero());
        assert!(ec_double(&pt).z.is_zero());
        assert!(ECp::Projective(pt).double().is_inf());
    }

    #[test]
    fn scalar_small_multiples() {
        assert!((&*G * 0).is_inf());
        assert!(scalar_mul(&BigUint::from(0u32), &G).is_inf());
        assert_eq!(&*G * 1, *G);
        assert_eq!(&*G * 2, G.double());
        let mut acc = ECp::inf();
        for k in 1..20u64 {
            acc = &acc + &*G;
            let direct = &*G * k;
            assert_eq!(direct, acc);
            assert!(direct.is_on_curve());
        }
    }

    #[test]
    fn scalar_on_projective_input() {
        let g2 = G.double();
        assert!(!g2.is_affine());
        assert_eq!(&g2 * 3, &*G * 6);
        assert_eq!(g2.normalized(), g2);
        assert!(g2.normalized().is_affine());
    }

    #[test]
    fn scalar_distributes() {
        let a = BigUint::from(0xdead_beefu64);
        let b = BigUint::from(0x1234_5678_9abcu64);
        let lhs = &*G * &(&a + &b);
        let rhs = &(&*G * &a) + &(&*G * &b);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn order_minus_one_is_negation() {
        let k = &*N - 1u32;
        assert_eq!(&*G * &k, -&*G);
    }

    #[test]
    fn display() {
        assert_eq!(ECp::inf().to_string(), "ECp(INF)");
        assert!(G.to_string().starts_with("ECp { x: 5506626302227734366957871889516853432625"));
    }
}
