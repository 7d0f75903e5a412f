use crate::*;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use std::fmt;
use std::str::FromStr;

/// A Paillier ciphertext: an opaque element of `[0, n^2)`.
///
/// Opaque to every component except this module; persists and transmits
/// as a base-10 decimal string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Ciphertext(#[serde(with = "serde_decimal")] pub BigUint);

impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.to_str_radix(10))
    }
}

impl FromStr for Ciphertext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = BigUint::from_str(s).map_err(|_| Error::MalformedCiphertext)?;
        Ok(Ciphertext(value))
    }
}

/// Encrypt `m` under `public` with fresh randomness.
///
/// Every call draws a new blinding factor, so encrypting the same message
/// twice yields different ciphertexts.
pub fn encrypt(public: &PublicKey, m: &BigUint) -> Result<Ciphertext, Error> {
    let r = draw_randomness(public);
    encrypt_with(public, m, &r)
}

/// Encrypt `m` under `public` with caller-supplied randomness `r`.
///
/// Computes `g^m * r^n mod n^2`. Requires `0 <= m < n`.
pub fn encrypt_with(public: &PublicKey, m: &BigUint, r: &BigUint) -> Result<Ciphertext, Error> {
    if m >= &public.n {
        return Err(Error::MessageOutOfRange);
    }
    let n_sq = public.n_sq();
    let c1 = mod_pow(&public.g, m, &n_sq);
    let c2 = mod_pow(r, &public.n, &n_sq);
    Ok(Ciphertext((c1 * c2) % &n_sq))
}

// Uniform in [1, n) with gcd(r, n) == 1, resampling on failure.
fn draw_randomness(public: &PublicKey) -> BigUint {
    let mut rng = OsRng;
    loop {
        let r = rng.gen_biguint_below(&public.n);
        if !r.is_zero() && gcd(&r, &public.n).is_one() {
            return r;
        }
    }
}

/// Decrypt `c` under `private`: `L(c^lambda mod n^2) * mu mod n`.
///
/// No well-formedness check is performed. A value that was not produced
/// under the matching public key decrypts to an arbitrary integer in
/// `[0, n)` rather than an error; the scheme offers no way to detect the
/// mismatch, so callers must track which key produced a ciphertext.
pub fn decrypt(private: &PrivateKey, c: &Ciphertext) -> BigUint {
    let n_sq = private.n_sq();
    let x = mod_pow(&c.0, &private.lambda, &n_sq);
    // x is zero only when c is 0 mod n^2; map it to zero to keep decryption total
    let l = if x.is_zero() {
        BigUint::zero()
    } else {
        (&x - BigUint::one()) / &private.n
    };
    (l * &private.mu) % &private.n
}

/// Homomorphic addition: `(c1 * c2) mod n^2` decrypts to the sum of the
/// two plaintexts.
///
/// The plaintext space is `Z_n`: sums exceeding `n` wrap around. With a
/// 256-bit or larger modulus and binary votes this is a modeled limit,
/// not an operational concern.
pub fn add(public: &PublicKey, c1: &Ciphertext, c2: &Ciphertext) -> Ciphertext {
    let n_sq = public.n_sq();
    Ciphertext((&c1.0 * &c2.0) % &n_sq)
}

/// Add a known plaintext into a ciphertext without fresh randomness:
/// `(c * g^m) mod n^2`.
pub fn add_plain(public: &PublicKey, c: &Ciphertext, m: &BigUint) -> Ciphertext {
    let n_sq = public.n_sq();
    Ciphertext((&c.0 * mod_pow(&public.g, m, &n_sq)) % &n_sq)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypair() -> (PublicKey, PrivateKey) {
        generate_keypair(128).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let (public, private) = keypair();
        for m in [0u64, 1, 2, 42, 1_000_000].iter() {
            let m = BigUint::from(*m);
            let c = encrypt(&public, &m).unwrap();
            assert_eq!(decrypt(&private, &c), m);
        }
    }

    #[test]
    fn test_message_out_of_range() {
        let (public, _) = keypair();
        assert!(matches!(
            encrypt(&public, &public.n),
            Err(Error::MessageOutOfRange)
        ));
        assert!(matches!(
            encrypt(&public, &(&public.n + BigUint::one())),
            Err(Error::MessageOutOfRange)
        ));
    }

    #[test]
    fn test_homomorphic_addition() {
        let (public, private) = keypair();
        let m1 = BigUint::from(12_345u32);
        let m2 = BigUint::from(67_890u32);

        let c1 = encrypt(&public, &m1).unwrap();
        let c2 = encrypt(&public, &m2).unwrap();
        let sum = add(&public, &c1, &c2);

        assert_eq!(decrypt(&private, &sum), m1 + m2);
    }

    #[test]
    fn test_add_plain() {
        let (public, private) = keypair();
        let m1 = BigUint::from(100u32);
        let m2 = BigUint::from(23u32);

        let c = encrypt(&public, &m1).unwrap();
        let shifted = add_plain(&public, &c, &m2);

        assert_eq!(decrypt(&private, &shifted), m1 + m2);
    }

    #[test]
    fn test_fresh_randomness_per_call() {
        let (public, _) = keypair();
        let m = BigUint::from(1u32);
        let c1 = encrypt(&public, &m).unwrap();
        let c2 = encrypt(&public, &m).unwrap();
        assert_ne!(c1, c2);
    }

    #[test]
    fn test_encrypt_with_is_deterministic() {
        let (public, _) = keypair();
        let m = BigUint::from(7u32);
        let r = BigUint::from(12_345u32);
        let c1 = encrypt_with(&public, &m, &r).unwrap();
        let c2 = encrypt_with(&public, &m, &r).unwrap();
        assert_eq!(c1, c2);
    }

    #[test]
    fn test_ciphertext_decimal_round_trip() {
        let (public, private) = keypair();
        let m = BigUint::from(9u32);
        let c = encrypt(&public, &m).unwrap();

        let parsed = Ciphertext::from_str(&c.to_string()).unwrap();
        assert_eq!(parsed, c);
        assert_eq!(decrypt(&private, &parsed), m);

        assert!(matches!(
            Ciphertext::from_str("not-a-number"),
            Err(Error::MalformedCiphertext)
        ));
    }

    #[test]
    fn test_decrypt_foreign_ciphertext_is_garbage_not_error() {
        // A ciphertext produced under a different key decrypts to some
        // meaningless integer in [0, n); it never errors.
        let (public_a, _) = keypair();
        let (_, private_b) = keypair();

        let c = encrypt(&public_a, &BigUint::from(1u32)).unwrap();
        let m = decrypt(&private_b, &c);
        assert!(m < private_b.n);

        // The degenerate all-zero ciphertext must not panic either
        let m = decrypt(&private_b, &Ciphertext(BigUint::zero()));
        assert!(m < private_b.n);
    }
}
