//! BLS12-381 arithmetic for the G2 group.
//!
//! The crate is built bottom-up: a generic Montgomery field over `N` 64-bit
//! limbs ([`MontField`]), its two instances [`Fp`] and [`Fr`], the quadratic
//! extension [`Fp2`], and points on the sextic twist `y^2 = x^3 + 4(1 + u)`
//! in affine ([`G2Affine`]) and Jacobian ([`G2Jac`]) coordinates.
//!
//! Scalar multiplication uses the GLV endomorphism, subgroup membership uses
//! `phi`, and cofactor clearing uses the Budroni-Pintore chain built on
//! `psi`. Points serialize to the ZCash compressed and uncompressed formats.

mod arith;
mod batch;
mod encoding;
mod error;
mod field;
mod fp;
mod fp2;
mod fr;
mod g2;
pub mod glv;
mod group;
mod inverse;
pub mod parallel;
mod random;

pub use batch::batch_scalar_multiplication;
pub use encoding::{SIZE_OF_G2_COMPRESSED, SIZE_OF_G2_UNCOMPRESSED};
pub use error::{EncodingError, FieldError};
pub use field::{MontConfig, MontField};
pub use fp::{Fp, FpConfig};
pub use fp2::Fp2;
pub use fr::{Fr, FrConfig, MULTIPLICATIVE_GENERATOR};
pub use g2::{G2Affine, G2Jac, B_TWIST, X_ABS};
pub use group::{Group, ScalarBits};
pub use random::RandomField;
