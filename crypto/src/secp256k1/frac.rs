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
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

// -----------------------------------------------------------------
// Frac is a field value num/den with the division deferred. None of the
// operators below invert anything and results are never reduced to lowest
// terms, so long chains cost one inversion at `value()`.

#[derive(Clone, PartialEq, Eq)]
pub struct Frac {
    pub num: Fq,
    pub den: Fq,
}

impl Frac {
    pub fn new(num: Fq, den: Fq) -> Frac {
        Frac { num, den }
    }

    pub fn zero() -> Frac {
        Frac::new(Fq::zero(), Fq::one())
    }

    pub fn one() -> Frac {
        Frac::new(Fq::one(), Fq::one())
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    /// Collapse into a single field element, num * den^-1.
    /// A zero denominator yields zero.
    pub fn value(&self) -> Fq {
        &self.num * &self.den.invert()
    }

    pub fn into_parts(self) -> (Fq, Fq) {
        (self.num, self.den)
    }
}

impl From<Fq> for Frac {
    fn from(v: Fq) -> Frac {
        Frac::new(v, Fq::one())
    }
}

impl From<u64> for Frac {
    fn from(v: u64) -> Frac {
        Frac::from(Fq::from(v))
    }
}

impl fmt::Debug for Frac {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Frac({} / {})", self.num, self.den)
    }
}

// -------------------------------------------
// (x1/z1) op (x2/z2)

fn frac_add(a: &Frac, b: &Frac) -> Frac {
    Frac::new(&a.num * &b.den + &b.num * &a.den, &a.den * &b.den)
}

fn frac_sub(a: &Frac, b: &Frac) -> Frac {
    Frac::new(&a.num * &b.den - &b.num * &a.den, &a.den * &b.den)
}

fn frac_mul(a: &Frac, b: &Frac) -> Frac {
    Frac::new(&a.num * &b.num, &a.den * &b.den)
}

fn frac_div(a: &Frac, b: &Frac) -> Frac {
    // a zero b.num leaves a zero denominator behind
    Frac::new(&a.num * &b.den, &a.den * &b.num)
}

macro_rules! frac_binop {
    ($imp:ident, $method:ident, $op:ident) => {
        impl<'a, 'b> $imp<&'b Frac> for &'a Frac {
            type Output = Frac;
            fn $method(self, other: &'b Frac) -> Frac {
                $op(self, other)
            }
        }

        impl<'a> $imp<&'a Frac> for Frac {
            type Output = Frac;
            fn $method(self, other: &'a Frac) -> Frac {
                $op(&self, other)
            }
        }

        impl<'a> $imp<Frac> for &'a Frac {
            type Output = Frac;
            fn $method(self, other: Frac) -> Frac {
                $op(self, &other)
            }
        }

        impl $imp<Frac> for Frac {
            type Output = Frac;
            fn $method(self, other: Frac) -> Frac {
                $op(&self, &other)
            }
        }
    };
}

frac_binop!(Add, add, frac_add);
frac_binop!(Sub, sub, frac_sub);
frac_binop!(Mul, mul, frac_mul);
frac_binop!(Div, div, frac_div);

// -------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn fr(num: u64, den: u64) -> Frac {
        Frac::new(Fq::from(num), Fq::from(den))
    }

    fn p_minus(k: u64) -> Fq {
        -Fq::from(k)
    }

    fn random_fq(rng: &mut ThreadRng) -> Fq {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Fq::from_bytes(&bytes)
    }

    fn assert_parts(f: Frac, num: Fq, den: Fq) {
        assert_eq!(f.num, num);
        assert_eq!(f.den, den);
    }

    #[test]
    fn add_small() {
        assert_parts(fr(2, 3) + fr(4, 5), Fq::from(22), Fq::from(15));
    }

    #[test]
    fn add_big() {
        let a = Frac::from(p_minus(1));
        assert_parts(&a + &fr(2, 1), Fq::from(1), Fq::from(1));
        let b = Frac::from(p_minus(2));
        assert_parts(a + b, p_minus(3), Fq::from(1));
    }

    #[test]
    fn sub_small() {
        assert_parts(fr(2, 3) - fr(4, 5), p_minus(2), Fq::from(15));
    }

    #[test]
    fn sub_big() {
        assert_parts(fr(2, 1) - Frac::from(p_minus(1)), Fq::from(3), Fq::from(1));
        assert_parts(
            Frac::from(p_minus(2)) - Frac::from(p_minus(1)),
            p_minus(1),
            Fq::from(1),
        );
        assert_parts(
            Frac::from(p_minus(16)) - Frac::from(p_minus(16)),
            Fq::zero(),
            Fq::from(1),
        );
    }

    #[test]
    fn mul_small() {
        assert_parts(fr(2, 3) * fr(4, 5), Fq::from(8), Fq::from(15));
        assert_parts(fr(2, 3) * fr(0, 5), Fq::zero(), Fq::from(15));
    }

    #[test]
    fn mul_big() {
        assert_parts(Frac::from(p_minus(1)) * fr(2, 1), p_minus(2), Fq::from(1));
        assert_parts(
            Frac::from(p_minus(2)) * Frac::from(p_minus(3)),
            Fq::from(6),
            Fq::from(1),
        );
    }

    #[test]
    fn div_small() {
        assert_parts(fr(2, 3) / fr(4, 5), Fq::from(10), Fq::from(12));
    }

    #[test]
    fn div_big() {
        assert_parts(Frac::from(p_minus(1)) / fr(2, 1), p_minus(1), Fq::from(2));
        assert_parts(
            Frac::from(p_minus(2)) / Frac::from(p_minus(3)),
            p_minus(2),
            p_minus(3),
        );
    }

    #[test]
    fn div_by_zero_numerator() {
        let q = fr(2, 3) / fr(0, 5);
        assert_parts(q.clone(), Fq::from(10), Fq::zero());
        assert!(q.value().is_zero());
    }

    #[test]
    fn inverse_through_mul() {
        let d = Fq::from_hex("f167a208bea79bc52668c016aff174622837f780ab60f59dfed0a8e66bb7c2ad")
            .unwrap();
        let r = Frac::from(d.clone()) * Frac::from(d.invert());
        assert_parts(r, Fq::one(), Fq::one());
    }

    #[test]
    fn matches_direct_arithmetic() {
        let mut rng = thread_rng();
        for _ in 0..32 {
            let (a, b) = (random_fq(&mut rng), random_fq(&mut rng));
            let (c, d) = (random_fq(&mut rng), random_fq(&mut rng));
            if c.is_zero() || d.is_zero() {
                continue;
            }
            let x = Frac::new(a.clone(), c.clone());
            let y = Frac::new(b.clone(), d.clone());
            let (ac, bd) = (&a * &c.invert(), &b * &d.invert());

            assert_eq!((&x + &y).value(), &ac + &bd);
            assert_eq!((&x - &y).value(), &ac - &bd);
            assert_eq!((&x * &y).value(), &ac * &bd);
            let sum = &x + &y;
            assert_eq!(&sum.num * &(&c * &d).invert(), &ac + &bd);
            let prod = &x * &y;
            assert_eq!(&(&a * &b) * &(&c * &d).invert(), prod.value());
            if !b.is_zero() {
                assert_eq!((&x / &y).value(), &ac * &bd.invert());
            }
        }
    }

    #[test]
    fn zero_and_one() {
        assert!(Frac::zero().is_zero());
        assert_eq!(Frac::one().value(), Fq::one());
        assert_eq!(Frac::from(7).value(), Fq::from(7));
    }
}
