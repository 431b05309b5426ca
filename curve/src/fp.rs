//! Base field of BLS12-381, `q = 0x1a0111ea...ffffaaab` (381 bits, six limbs).

use crate::field::{MontConfig, MontField};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FpConfig;

impl MontConfig<6> for FpConfig {
    const NAME: &'static str = "Fp";

    const MODULUS: [u64; 6] = [
        0xb9feffffffffaaab,
        0x1eabfffeb153ffff,
        0x6730d2a0f6b0f624,
        0x64774b84f38512bf,
        0x4b1ba7b6434bacd7,
        0x1a0111ea397fe69a,
    ];

    const INV: u64 = 0x89f3fffcfffcfffd;

    const R: [u64; 6] = [
        0x760900000002fffd,
        0xebf4000bc40c0002,
        0x5f48985753c758ba,
        0x77ce585370525745,
        0x5c071a97a256ec6d,
        0x15f65ec3fa80e493,
    ];

    const R2: [u64; 6] = [
        0xf4df1f341c341746,
        0x0a76e6a609d104f1,
        0x8de5476c4c95b6d5,
        0x67eb88a9939d83c0,
        0x9a793e85b519952d,
        0x11988fe592cae3aa,
    ];

    const INV_ITERATIONS: usize = 26;

    const INV_CORRECTION: [u64; 6] = [
        0x79418864753acf97,
        0x8c1628e30146cb15,
        0x57fc0377d6b6ab4b,
        0x919d5898404a31cc,
        0xa953c9ce96797c75,
        0x10152db90cf0180e,
    ];

    const TWO_ADICITY: u32 = 1;

    // q - 1
    const TWO_ADIC_ROOT: [u64; 6] = [
        0xb9feffffffffaaaa,
        0x1eabfffeb153ffff,
        0x6730d2a0f6b0f624,
        0x64774b84f38512bf,
        0x4b1ba7b6434bacd7,
        0x1a0111ea397fe69a,
    ];
}

pub type Fp = MontField<FpConfig, 6>;
