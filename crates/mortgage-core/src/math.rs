//! Decimal power and root helpers.
//!
//! Integer powers use repeated squaring with checked multiplication, so an
//! out-of-range result surfaces as `None` rather than a panic. Roots are
//! refined by Newton iteration on integer powers only; `powd` is never used.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const ROOT_TOLERANCE: Decimal = dec!(0.00000000000000000000000001);
const MAX_ROOT_ITERATIONS: u32 = 100;

/// Compute base^n by repeated squaring. `None` on overflow.
pub fn checked_powi(base: Decimal, n: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    let mut exp = n;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result.checked_mul(square)?;
        }
        exp >>= 1;
        if exp > 0 {
            square = square.checked_mul(square)?;
        }
    }
    Some(result)
}

/// Compute the positive nth root of a non-negative x.
///
/// The seed comes from `f64` and Newton's method then refines it at full
/// decimal precision. `None` when `n == 0`, `x < 0`, or an intermediate
/// power leaves the decimal range.
pub fn nth_root(x: Decimal, n: u32) -> Option<Decimal> {
    if n == 0 || (x.is_sign_negative() && !x.is_zero()) {
        return None;
    }
    if n == 1 || x.is_zero() || x == Decimal::ONE {
        return Some(x);
    }

    let n_dec = Decimal::from(n);
    let seed = x.to_f64()?.powf(1.0 / f64::from(n));
    let mut guess = Decimal::from_f64(seed).filter(|g| !g.is_zero())?;

    for _ in 0..MAX_ROOT_ITERATIONS {
        let lower = checked_powi(guess, n - 1)?;
        if lower.is_zero() {
            break;
        }
        let full = lower.checked_mul(guess)?;
        let delta = full.checked_sub(x)?.checked_div(n_dec.checked_mul(lower)?)?;
        guess = guess.checked_sub(delta)?;
        if delta.abs() < ROOT_TOLERANCE {
            break;
        }
    }

    Some(guess)
}

/// Greatest common divisor (Euclid).
pub fn gcd(a: u32, b: u32) -> u32 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
