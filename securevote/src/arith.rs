use crate::*;
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

/// Modular exponentiation for arbitrary-precision unsigned integers.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    base.modpow(exponent, modulus)
}

/// Greatest common divisor.
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

/// Least common multiple, `a * b / gcd(a, b)`.
///
/// Errors when both inputs are zero; `gcd(0, 0)` is zero and the quotient
/// is undefined.
pub fn lcm(a: &BigUint, b: &BigUint) -> Result<BigUint, Error> {
    if a.is_zero() && b.is_zero() {
        return Err(Error::DivideByZero);
    }
    Ok((a * b) / a.gcd(b))
}

/// Modular multiplicative inverse via the extended Euclidean algorithm.
///
/// Errors with `NoInverse` when `gcd(a, modulus) != 1`.
pub fn mod_inverse(a: &BigUint, modulus: &BigUint) -> Result<BigUint, Error> {
    if modulus.is_zero() {
        return Err(Error::NoInverse);
    }

    let modulus = BigInt::from_biguint(Sign::Plus, modulus.clone());
    let mut old_r = BigInt::from_biguint(Sign::Plus, a.clone());
    let mut r = modulus.clone();
    let mut old_s = BigInt::one();
    let mut s = BigInt::zero();

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return Err(Error::NoInverse);
    }

    let inverse = ((old_s % &modulus) + &modulus) % &modulus;
    Ok(inverse.magnitude().clone())
}
