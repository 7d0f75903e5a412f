use crate::*;
use indexmap::IndexMap;
use num_bigint::BigUint;
use num_traits::One;
use rand::rngs::OsRng;

/// Paillier public key. `g` is fixed to `n + 1`.
///
/// Shared read-only by every encryption and aggregation call; serializes
/// as base-10 decimal strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    #[serde(with = "serde_decimal")]
    pub n: BigUint,

    #[serde(with = "serde_decimal")]
    pub g: BigUint,
}

impl PublicKey {
    /// The modulus `n^2` used by every ciphertext-space operation.
    pub fn n_sq(&self) -> BigUint {
        &self.n * &self.n
    }
}

/// Paillier private key.
///
/// Holds only the decryption constants; the primes `p` and `q` are
/// discarded inside key generation. Deliberately carries no serde derives
/// so it cannot end up in the ciphertext store.
#[derive(Debug, Clone)]
pub struct PrivateKey {
    pub lambda: BigUint,
    pub mu: BigUint,
    pub n: BigUint,
}

impl PrivateKey {
    pub fn n_sq(&self) -> BigUint {
        &self.n * &self.n
    }
}

const MAX_KEYGEN_ATTEMPTS: usize = 64;

/// Generate a Paillier keypair with a modulus of `bit_length` bits.
///
/// Draws two independent primes of `bit_length / 2` bits each, redrawing
/// the pair if they collide. The prime search itself retries until it
/// succeeds; the attempt ceiling only bounds pair-level redraws.
pub fn generate_keypair(bit_length: u64) -> Result<(PublicKey, PrivateKey), Error> {
    let mut rng = OsRng;
    let half = bit_length / 2;
    let one = BigUint::one();

    for _ in 0..MAX_KEYGEN_ATTEMPTS {
        let p = generate_prime(&mut rng, half);
        let q = generate_prime(&mut rng, half);
        if p == q {
            // Equal primes produce an unusable key; redraw the pair.
            continue;
        }

        let n = &p * &q;
        let n_sq = &n * &n;
        let g = &n + &one;
        let lambda = lcm(&(&p - &one), &(&q - &one))?;

        // mu = L(g^lambda mod n^2)^-1 mod n, with L(x) = (x - 1) / n
        let x = mod_pow(&g, &lambda, &n_sq);
        let l = (&x - &one) / &n;
        let mu = mod_inverse(&l, &n)?;

        let public = PublicKey { n: n.clone(), g };
        let private = PrivateKey { lambda, mu, n };
        return Ok((public, private));
    }

    Err(Error::KeyGeneration)
}

/// Process-wide registry of keypairs, keyed by key id.
///
/// Built once at startup and passed by reference into every call site;
/// read-only thereafter, so unsynchronized concurrent reads are safe.
#[derive(Debug, Default)]
pub struct Keyring {
    keys: IndexMap<String, (PublicKey, PrivateKey)>,
}

impl Keyring {
    pub fn new() -> Self {
        Keyring::default()
    }

    pub fn insert<S: Into<String>>(&mut self, key_id: S, public: PublicKey, private: PrivateKey) {
        self.keys.insert(key_id.into(), (public, private));
    }

    pub fn get(&self, key_id: &str) -> Option<(&PublicKey, &PrivateKey)> {
        self.keys.get(key_id).map(|(public, private)| (public, private))
    }

    /// The public half only, for handing to encrypting clients.
    pub fn public(&self, key_id: &str) -> Option<&PublicKey> {
        self.keys.get(key_id).map(|(public, _)| public)
    }

    pub fn key_ids(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(|id| id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_structure() {
        let (public, private) = generate_keypair(128).unwrap();

        // n is the product of two 64-bit primes
        assert!(public.n.bits() >= 127);
        assert_eq!(public.g, &public.n + BigUint::one());
        assert_eq!(public.n, private.n);

        // mu inverts L(g^lambda mod n^2) mod n
        let x = mod_pow(&public.g, &private.lambda, &public.n_sq());
        let l = (&x - BigUint::one()) / &public.n;
        assert_eq!((l * &private.mu) % &public.n, BigUint::one());
    }

    #[test]
    fn test_keyring_lookup() {
        let (public, private) = generate_keypair(128).unwrap();
        let mut keyring = Keyring::new();
        keyring.insert("key-v1", public.clone(), private);

        assert!(keyring.get("key-v1").is_some());
        assert!(keyring.get("key-v2").is_none());
        assert_eq!(keyring.public("key-v1"), Some(&public));
        assert_eq!(keyring.key_ids().collect::<Vec<_>>(), vec!["key-v1"]);
    }
}
