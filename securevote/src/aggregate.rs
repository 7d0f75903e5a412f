use crate::*;
use num_bigint::BigUint;
use num_traits::Zero;
use std::str::FromStr;

/// Outcome of homomorphic aggregation over one `(question, key)` pair.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AggregateResult {
    pub question_id: String,
    pub key_id: String,
    pub count: usize,

    #[serde(with = "serde_decimal")]
    pub total: BigUint,

    /// The folded ciphertext the total was decrypted from, kept for
    /// audit and debugging.
    pub aggregate_ciphertext: Option<String>,
}

/// Fold every stored ciphertext for `(question_id, key_id)` into a single
/// accumulator, then decrypt that accumulator once.
///
/// Individual ciphertexts are never decrypted; the private key is used
/// exactly once, on the final fold result. With no stored votes the
/// cryptosystem is not invoked at all. Fold order is irrelevant -
/// homomorphic addition is commutative and associative.
pub fn aggregate<S: Store>(
    store: &S,
    keyring: &Keyring,
    question_id: &str,
    key_id: &str,
) -> Result<AggregateResult, Error> {
    let (public, private) = keyring
        .get(key_id)
        .ok_or_else(|| Error::UnknownKey(key_id.to_string()))?;

    let rows = store.ciphertexts(question_id, key_id);
    if rows.is_empty() {
        return Ok(AggregateResult {
            question_id: question_id.to_string(),
            key_id: key_id.to_string(),
            count: 0,
            total: BigUint::zero(),
            aggregate_ciphertext: None,
        });
    }

    let mut accumulator = encrypt(public, &BigUint::zero())?;
    for row in rows.iter() {
        let ciphertext = Ciphertext::from_str(row)?;
        accumulator = add(public, &accumulator, &ciphertext);
    }

    let total = decrypt(private, &accumulator);

    Ok(AggregateResult {
        question_id: question_id.to_string(),
        key_id: key_id.to_string(),
        count: rows.len(),
        total,
        aggregate_ciphertext: Some(accumulator.to_string()),
    })
}
