//! Hashing to the G2 group of BLS12-381 with the Shallue-van de Woestijne map.
//!
//! [`hash_to_g2`] is the random-oracle construction (two field elements, two
//! maps, one cofactor clearing). [`encode_to_g2`] is the cheaper nonuniform
//! encoding. Both expand the message with `expand_message_xmd` over SHA-256.

mod constants;
mod errors;
mod expand;
mod svdw;


pub use errors::HashToCurveError;
pub use expand::{expand_message_xmd, hash_to_field, L};
pub use svdw::{encode_to_g2, g2_sgn0, hash_to_g2, map_to_curve, map_to_g2};
