//! Scalar field of BLS12-381, the prime order `r` of G1 and G2.

use crate::field::{MontConfig, MontField};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrConfig;

impl MontConfig<4> for FrConfig {
    const NAME: &'static str = "Fr";

    const MODULUS: [u64; 4] = [
        0xffffffff00000001,
        0x53bda402fffe5bfe,
        0x3339d80809a1d805,
        0x73eda753299d7d48,
    ];

    const INV: u64 = 0xfffffffeffffffff;

    const R: [u64; 4] = [
        0x00000001fffffffe,
        0x5884b7fa00034802,
        0x998c4fefecbc4ff5,
        0x1824b159acc5056f,
    ];

    const R2: [u64; 4] = [
        0xc999e990f3f29c6d,
        0x2b6cedcb87925c23,
        0x05d314967254398f,
        0x0748d9d99f59ff11,
    ];

    const INV_ITERATIONS: usize = 18;

    const INV_CORRECTION: [u64; 4] = [
        0x8c73b69a12a04978,
        0x5d1abf85d79566ee,
        0xd8596bc0a2c22605,
        0x19c65f03f4d2616d,
    ];

    const TWO_ADICITY: u32 = 32;

    // GENERATOR^t where t = (r - 1) >> 32
    const TWO_ADIC_ROOT: [u64; 4] = [
        0x3829971f439f0d2b,
        0xb63683508c2280b9,
        0xd09b681922c813b4,
        0x16a2a19edfe81f20,
    ];
}

pub type Fr = MontField<FrConfig, 4>;

/// Generator of the multiplicative group `Fr^*`.
pub const MULTIPLICATIVE_GENERATOR: Fr = Fr::from_raw([7, 0, 0, 0]);
