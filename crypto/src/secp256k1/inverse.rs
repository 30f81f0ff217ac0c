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
use num_bigint::BigInt;
use num_traits::{One, Zero};
use std::mem;

/// Inverse of `d` modulo p by the extended Euclidean algorithm over (d, p).
///
/// Zero has no inverse; it is mapped to zero so that a fraction with a zero
/// denominator normalizes to zero instead of faulting. Use
/// `Fq::checked_invert` to get an error instead.
pub fn invert(d: &Fq) -> Fq {
    let mut t = BigInt::zero();
    let mut new_t = BigInt::one();
    let mut r = BigInt::from(P.clone());
    let mut new_r = BigInt::from(d.bits().clone());

    while !new_r.is_zero() {
        let q = &r / &new_r;
        let next_t = &t - &q * &new_t;
        t = mem::replace(&mut new_t, next_t);
        let next_r = &r - &q * &new_r;
        r = mem::replace(&mut new_r, next_r);
    }

    // coefficient may be negative here
    Fq::reduce_signed(t)
}
