use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand::Rng;

/// Default number of Miller-Rabin rounds. The probability of accepting a
/// composite is bounded by `4^-rounds`.
pub const MILLER_RABIN_ROUNDS: usize = 16;

const SMALL_PRIMES: [u32; 10] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29];

/// Probabilistic primality test: trial division by a fixed small prime
/// list, then `rounds` of Miller-Rabin with random bases drawn from
/// `[2, candidate - 2]`.
///
/// A `true` result means no evidence of compositeness was found; it is
/// never a certificate.
pub fn is_probable_prime(candidate: &BigUint, rounds: usize) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);

    if candidate < &two {
        return false;
    }
    for p in SMALL_PRIMES.iter() {
        let p = BigUint::from(*p);
        if *candidate == p {
            return true;
        }
        if (candidate % &p).is_zero() {
            return false;
        }
    }

    // Write candidate - 1 as d * 2^s with d odd
    let n_minus_one = candidate - &one;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while (&d % &two).is_zero() {
        d >>= 1u32;
        s += 1;
    }

    let mut rng = OsRng;
    'rounds: for _ in 0..rounds {
        let base = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = base.modpow(&d, candidate);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x) % candidate;
            if x == n_minus_one {
                continue 'rounds;
            }
        }
        return false;
    }
    true
}

/// Draw random odd candidates of exactly `bits` bits (top bit forced set)
/// until one passes the primality test.
pub fn generate_prime<R: Rng>(rng: &mut R, bits: u64) -> BigUint {
    loop {
        let mut candidate = rng.gen_biguint(bits);
        candidate |= BigUint::one() << (bits - 1);
        candidate |= BigUint::one();
        if is_probable_prime(&candidate, MILLER_RABIN_ROUNDS) {
            return candidate;
        }
    }
}
