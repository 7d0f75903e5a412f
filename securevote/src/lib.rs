#[macro_use]
extern crate serde;

mod aggregate;
mod arith;
mod audit;
mod error;
mod keygen;
mod paillier;
mod photo;
mod prime;
pub mod serde_decimal;
mod store;
mod vote;

pub use aggregate::*;
pub use arith::*;
pub use audit::*;
pub use error::*;
pub use keygen::*;
pub use paillier::*;
pub use photo::*;
pub use prime::*;
pub use store::*;
pub use vote::*;
