use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("securevote: message out of range - plaintext must be in [0, n)")]
    MessageOutOfRange,

    #[error("securevote: no modular inverse - inputs are not coprime")]
    NoInverse,

    #[error("securevote: lcm is undefined when both inputs are zero")]
    DivideByZero,

    #[error("securevote: unknown or inactive question: {0}")]
    InvalidQuestion(String),

    #[error("securevote: audit chain broken at entry {0}")]
    ChainBroken(u64),

    #[error("securevote: key generation failed - attempt ceiling exceeded")]
    KeyGeneration,

    #[error("securevote: unknown key id: {0}")]
    UnknownKey(String),

    #[error("securevote: malformed ciphertext - not a decimal integer")]
    MalformedCiphertext,
}
