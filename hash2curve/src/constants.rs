//! Constants of the Shallue-van de Woestijne map for `E'(Fp2): y^2 = x^3 + 4(1 + u)`.
//!
//! `Z` is the first element found by the `find_z_svdw` search; the others
//! follow from it. All limbs are canonical, little-endian.

use curve::Fp2;

/// `Z = -1`.
pub const Z: Fp2 = Fp2::from_raw(
    [
        0xb9feffffffffaaaa,
        0x1eabfffeb153ffff,
        0x6730d2a0f6b0f624,
        0x64774b84f38512bf,
        0x4b1ba7b6434bacd7,
        0x1a0111ea397fe69a,
    ],
    [0, 0, 0, 0, 0, 0],
);

/// `c1 = g(Z) = 3 + 4u`.
pub const C1: Fp2 = Fp2::from_raw([3, 0, 0, 0, 0, 0], [4, 0, 0, 0, 0, 0]);

/// `c2 = -Z / 2`.
pub const C2: Fp2 = Fp2::from_raw(
    [
        0xdcff7fffffffd556,
        0x0f55ffff58a9ffff,
        0xb39869507b587b12,
        0xb23ba5c279c2895f,
        0x258dd3db21a5d66b,
        0x0d0088f51cbff34d,
    ],
    [0, 0, 0, 0, 0, 0],
);

/// `c3 = sqrt(-g(Z) * 3 Z^2)` with `sgn0(c3) = 0`.
pub const C3: Fp2 = Fp2::from_raw(
    [
        0xb807fffffffbfffa,
        0x785f604d88280008,
        0x76cea4ef9be25a23,
        0xe9a7181da83ddfab,
        0x7c659cbf7ddb3946,
        0x0000000000000001,
    ],
    [
        0x5c03fffffffdfffd,
        0xbc2fb026c4140004,
        0xbb675277cdf12d11,
        0x74d38c0ed41eefd5,
        0xbe32ce5fbeed9ca3,
        0x0000000000000000,
    ],
);

/// `c4 = -4 g(Z) / (3 Z^2)`.
pub const C4: Fp2 = Fp2::from_raw(
    [
        0xb9feffffffffaaa7,
        0x1eabfffeb153ffff,
        0x6730d2a0f6b0f624,
        0x64774b84f38512bf,
        0x4b1ba7b6434bacd7,
        0x1a0111ea397fe69a,
    ],
    [
        0x9354ffffffffe389,
        0x0a395554e5c6aaaa,
        0xcd104635a790520c,
        0xcc27c3d6fbd7063f,
        0x190937e76bc3e447,
        0x08ab05f8bdd54cde,
    ],
);
