//! G2 of BLS12-381: points of the sextic twist `E'(Fp2): y^2 = x^3 + 4(1 + u)`
//! in Jacobian and affine coordinates.

use core::fmt::{self, Display, Formatter};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use rand::distr::{Distribution, StandardUniform};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::fp::Fp;
use crate::fp2::Fp2;
use crate::fr::Fr;
use crate::glv::split_reduced;
use crate::group::Group;

/// `b' = 4(1 + u)`.
pub const B_TWIST: Fp2 = Fp2::from_raw([4, 0, 0, 0, 0, 0], [4, 0, 0, 0, 0, 0]);

/// Absolute value of the BLS parameter `x = -0xd201000000010000`.
pub const X_ABS: u64 = 0xd201000000010000;

/// Primitive cube root of unity in `Fp` driving `phi(x, y) = (beta x, y)`.
pub const BETA: Fp = Fp::from_raw([
    0x2e01fffffffefffe,
    0xde17d813620a0002,
    0xddb3a93be6f89688,
    0xba69c6076a0f77ea,
    0x5f19672fdf76ce51,
    0x0000000000000000,
]);

/// `1 / (1 + u)^((q - 1) / 3)`, applied to `conj(x)` by `psi`.
pub const PSI_U: Fp2 = Fp2::from_raw(
    [0, 0, 0, 0, 0, 0],
    [
        0x8bfd00000000aaad,
        0x409427eb4f49fffd,
        0x897d29650fb85f9b,
        0xaa0d857d89759ad4,
        0xec02408663d4de85,
        0x1a0111ea397fe699,
    ],
);

/// `1 / (1 + u)^((q - 1) / 2)`, applied to `conj(y)` by `psi`.
pub const PSI_V: Fp2 = Fp2::from_raw(
    [
        0xf1ee7b04121bdea2,
        0x304466cf3e67fa0a,
        0xef396489f61eb45e,
        0x1c3dedd930b1cf60,
        0xe2e9c448d77a2cd9,
        0x135203e60180a68e,
    ],
    [
        0xc81084fbede3cc09,
        0xee67992f72ec05f4,
        0x77f76e17009241c5,
        0x48395dabc2d3435e,
        0x6831e36d6bd17ffe,
        0x06af0e0437ff400b,
    ],
);

const GENERATOR_X: Fp2 = Fp2::from_raw(
    [
        0xd48056c8c121bdb8,
        0x0bac0326a805bbef,
        0xb4510b647ae3d177,
        0xc6e47ad4fa403b02,
        0x260805272dc51051,
        0x024aa2b2f08f0a91,
    ],
    [
        0xe5ac7d055d042b7e,
        0x334cf11213945d57,
        0xb5da61bbdc7f5049,
        0x596bd0d09920b61a,
        0x7dacd3a088274f65,
        0x13e02b6052719f60,
    ],
);

const GENERATOR_Y: Fp2 = Fp2::from_raw(
    [
        0xe193548608b82801,
        0x923ac9cc3baca289,
        0x6d429a695160d12c,
        0xadfd9baa8cbdd3a7,
        0x8cc9cdc6da2e351a,
        0x0ce5d527727d6e11,
    ],
    [
        0xaaa9075ff05f79be,
        0x3f370d275cec1da1,
        0x267492ab572e99ab,
        0xcb3e287e85a763af,
        0x32acd2b02bc28b99,
        0x0606c4a02ea734cc,
    ],
);

/// Affine point. `(0, 0)` is the point at infinity; the curve does not pass
/// through the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct G2Affine {
    pub x: Fp2,
    pub y: Fp2,
}

/// Jacobian point `(X, Y, Z)` for the affine point `(X / Z^2, Y / Z^3)`.
/// Infinity is `(1, 1, 0)`.
#[derive(Copy, Clone, Debug)]
pub struct G2Jac {
    pub x: Fp2,
    pub y: Fp2,
    pub z: Fp2,
}

impl G2Affine {
    pub const INFINITY: Self = G2Affine {
        x: Fp2::ZERO,
        y: Fp2::ZERO,
    };

    pub fn new(x: Fp2, y: Fp2) -> Self {
        G2Affine { x, y }
    }

    /// The standard generator of G2.
    pub fn generator() -> Self {
        G2Affine {
            x: GENERATOR_X,
            y: GENERATOR_Y,
        }
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    /// `y^2 = x^3 + b'`; infinity counts as on the curve.
    pub fn is_on_curve(&self) -> bool {
        G2Jac::from_affine(self).is_on_curve()
    }

    /// On the curve and in the order-`r` subgroup.
    pub fn is_in_subgroup(&self) -> bool {
        let p = G2Jac::from_affine(self);
        p.is_on_curve() && p.is_in_subgroup()
    }

    pub fn neg(&self) -> Self {
        G2Affine {
            x: self.x,
            y: -self.y,
        }
    }

    /// `s * self` through GLV; the scalar is reduced mod `r`.
    pub fn scalar_mul(&self, s: &BigUint) -> Self {
        G2Jac::from_affine(self).scalar_mul(s).to_affine()
    }
}

impl G2Jac {
    pub const INFINITY: Self = G2Jac {
        x: Fp2::ONE,
        y: Fp2::ONE,
        z: Fp2::ZERO,
    };

    pub fn new(x: Fp2, y: Fp2, z: Fp2) -> Self {
        G2Jac { x, y, z }
    }

    pub fn generator() -> Self {
        Self::from_affine(&G2Affine::generator())
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    pub fn from_affine(q: &G2Affine) -> Self {
        if q.is_infinity() {
            return Self::INFINITY;
        }
        G2Jac {
            x: q.x,
            y: q.y,
            z: Fp2::ONE,
        }
    }

    /// Rescales to `Z = 1` with one inversion.
    pub fn to_affine(&self) -> G2Affine {
        if self.is_infinity() {
            return G2Affine::INFINITY;
        }
        let a = self.z.inverse();
        let b = a.square();
        G2Affine {
            x: self.x * b,
            y: self.y * b * a,
        }
    }

    /// Converts many points sharing a single inversion.
    pub fn batch_to_affine(points: &[Self]) -> Vec<G2Affine> {
        let mut zs: Vec<Fp2> = points.iter().map(|p| p.z).collect();
        batch_invert_fp2(&mut zs);
        points
            .iter()
            .zip(zs)
            .map(|(p, z_inv)| {
                if p.is_infinity() {
                    return G2Affine::INFINITY;
                }
                let z2 = z_inv.square();
                G2Affine {
                    x: p.x * z2,
                    y: p.y * z2 * z_inv,
                }
            })
            .collect()
    }

    /// `y^2 = x^3 + b' z^6`.
    pub fn is_on_curve(&self) -> bool {
        let left = self.y.square();
        let right = self.x.square() * self.x;
        let z2 = self.z.square();
        let tmp = z2.square() * z2 * B_TWIST;
        left == right + tmp
    }

    /// `p + x^2 phi(p) = O` characterises the order-`r` subgroup, since
    /// `1 + x^2 lambda = r` on G2.
    pub fn is_in_subgroup(&self) -> bool {
        let mut res = self.phi().mul_by_x().mul_by_x();
        res.add_assign(self);
        res.is_on_curve() && res.is_infinity()
    }

    /// Addition with the `add-2007-bl` formulas, doubling when both inputs
    /// are the same point.
    pub fn add_assign(&mut self, a: &Self) -> &mut Self {
        if self.is_infinity() {
            *self = *a;
            return self;
        }
        if a.is_infinity() {
            return self;
        }

        let z1z1 = a.z.square();
        let z2z2 = self.z.square();
        let u1 = a.x * z2z2;
        let u2 = self.x * z1z1;
        let s1 = a.y * self.z * z2z2;
        let s2 = self.y * a.z * z1z1;

        if u1 == u2 && s1 == s2 {
            return self.double_assign();
        }

        let h = u2 - u1;
        let i = h.double().square();
        let j = h * i;
        let r = (s2 - s1).double();
        let v = u1 * i;

        let x = r.square() - j - v - v;
        let y = (v - x) * r - (s1 * j).double();
        let z = ((self.z + a.z).square() - z1z1 - z2z2) * h;

        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Jacobian plus affine (`madd-2007-bl`).
    pub fn add_mixed(&mut self, a: &G2Affine) -> &mut Self {
        if a.is_infinity() {
            return self;
        }
        if self.is_infinity() {
            self.x = a.x;
            self.y = a.y;
            self.z = Fp2::ONE;
            return self;
        }

        let z1z1 = self.z.square();
        let u2 = a.x * z1z1;
        let s2 = a.y * self.z * z1z1;

        if u2 == self.x && s2 == self.y {
            return self.double_assign();
        }

        let h = u2 - self.x;
        let hh = h.square();
        let i = hh.double().double();
        let j = h * i;
        let r = (s2 - self.y).double();
        let v = self.x * i;

        let x = r.square() - j - v - v;
        let y = (v - x) * r - (j * self.y).double();
        let z = (self.z + h).square() - z1z1 - hh;

        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    /// Doubling (`dbl-2009-l`, a = 0). Infinity stays infinity since `Z = 0`
    /// propagates.
    pub fn double_assign(&mut self) -> &mut Self {
        let xx = self.x.square();
        let yy = self.y.square();
        let yyyy = yy.square();
        let zz = self.z.square();
        let s = ((self.x + yy).square() - xx - yyyy).double();
        let m = xx.double() + xx;

        let z = (self.z + self.y).square() - yy - zz;
        let x = m.square() - s.double();
        let y = (s - x) * m - yyyy.double().double().double();

        self.x = x;
        self.y = y;
        self.z = z;
        self
    }

    pub fn sub_assign(&mut self, a: &Self) -> &mut Self {
        let neg = a.neg();
        self.add_assign(&neg)
    }

    pub fn neg(&self) -> Self {
        G2Jac {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    pub fn double(&self) -> Self {
        let mut p = *self;
        p.double_assign();
        p
    }

    /// `phi(x, y) = (beta x, y)`, acting as multiplication by lambda on G2.
    pub fn phi(&self) -> Self {
        G2Jac {
            x: self.x.mul_by_element(&BETA),
            y: self.y,
            z: self.z,
        }
    }

    /// Untwist-Frobenius-twist endomorphism.
    pub fn psi(&self) -> Self {
        G2Jac {
            x: self.x.conjugate() * PSI_U,
            y: self.y.conjugate() * PSI_V,
            z: self.z.conjugate(),
        }
    }

    /// Multiplication by the public scalar `|x|`.
    pub fn mul_by_x_abs(&self) -> Self {
        self.mul_windowed(&BigUint::from(X_ABS))
    }

    /// Multiplication by the (negative) curve parameter `x`.
    pub fn mul_by_x(&self) -> Self {
        self.mul_by_x_abs().neg()
    }

    /// Maps any curve point into G2:
    /// `[x^2 - x - 1]P + psi([x - 1]P) + psi^2([2]P)` (Budroni-Pintore).
    pub fn clear_cofactor(&self) -> Self {
        let xp = self.mul_by_x();
        let mut res = xp.mul_by_x();
        res.sub_assign(&xp).sub_assign(self);

        let mut t = xp;
        t.sub_assign(self);
        res.add_assign(&t.psi());

        res.add_assign(&self.double().psi().psi());
        res
    }

    /// 2-bit windowed multiplication over the big-endian bytes of `s`.
    pub fn mul_windowed(&self, s: &BigUint) -> Self {
        let double = self.double();
        let ops = [*self, double, double + *self];

        let mut res = Self::INFINITY;
        for w in s.to_bytes_be() {
            for j in 0..4 {
                res.double_assign().double_assign();
                let c = (w >> (6 - 2 * j)) & 0x3;
                if c != 0 {
                    res.add_assign(&ops[c as usize - 1]);
                }
            }
        }
        res
    }

    /// GLV multiplication: `s = k1 + k2 lambda`, then a joint 2-bit window
    /// over `k1` and `k2` against a 15-entry table of `b1 P + b2 phi(P)`.
    pub fn mul_glv(&self, s: &BigInt) -> Self {
        let s = s.mod_floor(&BigInt::from(Fr::modulus()));
        let [k1, k2] = split_reduced(&s);

        // table[(b2 << 2 | b1) - 1] = b2 phi(P) + b1 P
        let mut table = [Self::INFINITY; 15];
        table[0] = if k1.negative { self.neg() } else { *self };
        table[3] = if k2.negative {
            self.phi().neg()
        } else {
            self.phi()
        };

        table[1] = table[0].double();
        table[2] = table[1] + table[0];
        table[7] = table[3].double();
        table[11] = table[7] + table[3];
        for base in [3, 7, 11] {
            for j in 0..3 {
                table[base + 1 + j] = table[base] + table[j];
            }
        }

        let mut res = Self::INFINITY;
        for j in (0..64).rev() {
            res.double_assign().double_assign();
            let b1 = (k1.magnitude >> (2 * j)) & 0x3;
            let b2 = (k2.magnitude >> (2 * j)) & 0x3;
            if b1 | b2 != 0 {
                let s = ((b2 << 2) | b1) as usize;
                res.add_assign(&table[s - 1]);
            }
        }
        res
    }

    /// `s * self` for any unsigned integer; reduced mod `r` and run through GLV.
    pub fn scalar_mul(&self, s: &BigUint) -> Self {
        self.mul_glv(&BigInt::from(s.clone()))
    }
}

/// Montgomery batch inversion over `Fp2`; zero entries stay zero.
pub(crate) fn batch_invert_fp2(values: &mut [Fp2]) {
    let mut prefix = Vec::with_capacity(values.len());
    let mut acc = Fp2::ONE;
    for v in values.iter() {
        prefix.push(acc);
        if !v.is_zero() {
            acc *= *v;
        }
    }
    acc = acc.inverse();
    for (v, before) in values.iter_mut().zip(prefix).rev() {
        if v.is_zero() {
            continue;
        }
        let next = acc * *v;
        *v = acc * before;
        acc = next;
    }
}

impl Default for G2Jac {
    fn default() -> Self {
        Self::INFINITY
    }
}

/// Equality by cross-multiplication, no inversion.
impl PartialEq for G2Jac {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_infinity(), other.is_infinity()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        self.x * z2z2 == other.x * z1z1
            && self.y * z2z2 * other.z == other.y * z1z1 * self.z
    }
}

impl Eq for G2Jac {}

impl From<G2Affine> for G2Jac {
    fn from(p: G2Affine) -> Self {
        G2Jac::from_affine(&p)
    }
}

impl From<G2Jac> for G2Affine {
    fn from(p: G2Jac) -> Self {
        p.to_affine()
    }
}

impl Add for G2Jac {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        G2Jac::add_assign(&mut self, &other);
        self
    }
}

impl AddAssign for G2Jac {
    fn add_assign(&mut self, other: Self) {
        G2Jac::add_assign(self, &other);
    }
}

impl Add<G2Affine> for G2Jac {
    type Output = Self;

    fn add(mut self, other: G2Affine) -> Self {
        self.add_mixed(&other);
        self
    }
}

impl Sub for G2Jac {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        G2Jac::sub_assign(&mut self, &other);
        self
    }
}

impl SubAssign for G2Jac {
    fn sub_assign(&mut self, other: Self) {
        G2Jac::sub_assign(self, &other);
    }
}

impl Neg for G2Jac {
    type Output = Self;

    fn neg(self) -> Self {
        G2Jac::neg(&self)
    }
}

impl Neg for G2Affine {
    type Output = Self;

    fn neg(self) -> Self {
        G2Affine::neg(&self)
    }
}

impl Mul<Fr> for G2Jac {
    type Output = Self;

    fn mul(self, scalar: Fr) -> Self {
        self.mul_glv(&BigInt::from(scalar.to_biguint()))
    }
}

impl Mul<&Fr> for &G2Jac {
    type Output = G2Jac;

    fn mul(self, scalar: &Fr) -> G2Jac {
        self.mul_glv(&BigInt::from(scalar.to_biguint()))
    }
}

impl Mul<Fr> for G2Affine {
    type Output = G2Jac;

    fn mul(self, scalar: Fr) -> G2Jac {
        G2Jac::from_affine(&self) * scalar
    }
}

impl Group for G2Jac {
    type Scalar = Fr;

    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> bool {
        self.is_infinity()
    }

    #[inline]
    fn generator() -> Self {
        G2Jac::generator()
    }

    #[inline]
    fn double(&self) -> Self {
        G2Jac::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        G2Jac::neg(self)
    }
}

impl Display for G2Affine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_infinity() {
            return write!(f, "O");
        }
        write!(f, "E([{}, {}])", self.x, self.y)
    }
}

impl Display for G2Jac {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_affine())
    }
}

/// Uniform points of G2: the generator times a uniform scalar.
impl Distribution<G2Jac> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> G2Jac {
        let s: Fr = rng.random();
        G2Jac::generator() * s
    }
}

impl Distribution<G2Affine> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> G2Affine {
        let p: G2Jac = rng.random();
        p.to_affine()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::glv::lambda;
    use num_traits::{One, Zero};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Image of `u = 0` under the SVDW map: on the curve, outside G2.
    pub(crate) fn non_subgroup_point() -> G2Affine {
        let x: Fp2 = Fp2::new(
            "0x1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaa6"
                .parse()
                .unwrap(),
            "0x8ab05f8bdd54cde190937e76bc3e447cc27c3d6fbd7063fcd104635a790520c0a395554e5c6aaaa9354ffffffffe389"
                .parse()
                .unwrap(),
        );
        let y = Fp2::new(
            "0x11560bf17baa99bf00997b716fecfbdca6fcee1ee022ebdfec518b1375934e5b1443441fccbc71d765d58e38e38671bc"
                .parse()
                .unwrap(),
            "0x11560bf17baa99c433fd200fa86c4454d8c5c286acfb7ab80c24cc5a172b89d73991152f294871f5e9f18e38e37871a7"
                .parse()
                .unwrap(),
        );
        G2Affine::new(x, y)
    }

    fn naive_mul(p: &G2Jac, s: &BigUint) -> G2Jac {
        let mut res = G2Jac::INFINITY;
        for i in (0..s.bits()).rev() {
            res.double_assign();
            if s.bit(i) {
                res.add_assign(p);
            }
        }
        res
    }

    #[test]
    fn test_generator_on_curve_and_in_subgroup() {
        let g = G2Affine::generator();
        assert!(g.is_on_curve());
        assert!(g.is_in_subgroup());
        assert!(G2Affine::INFINITY.is_on_curve());
        assert!(G2Affine::INFINITY.is_in_subgroup());
    }

    #[test]
    fn test_generator_order() {
        let g = G2Jac::generator();
        assert!(naive_mul(&g, &Fr::modulus()).is_infinity(), "r * G must be infinity");
    }

    #[test]
    fn test_double_known_value() {
        let g2 = G2Jac::generator().double().to_affine();
        let expected_x0: Fp = "0x1638533957d540a9d2370f17cc7ed5863bc0b995b8825e0ee1ea1e1e4d00dbae81f14b0bf3611b78c952aacab827a053"
            .parse()
            .unwrap();
        let expected_y1: Fp = "0x0f6d4552fa65dd2638b361543f887136a43253d9c66c411697003f7a13c308f5422e1aa0a59c8967acdefd8b6e36ccf3"
            .parse()
            .unwrap();
        assert_eq!(g2.x.c0, expected_x0);
        assert_eq!(g2.y.c1, expected_y1);
    }

    #[test]
    fn test_group_laws() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..5 {
            let p: G2Jac = rng.random();
            let q: G2Jac = rng.random();
            let s: G2Jac = rng.random();
            assert_eq!(p + q, q + p, "addition must commute");
            assert_eq!((p + q) + s, p + (q + s), "addition must associate");
            assert_eq!(p + p, p.double(), "p + p must equal 2p");
            assert_eq!(p - p, G2Jac::INFINITY);
            assert_eq!(p + G2Jac::INFINITY, p);
            assert_eq!(G2Jac::INFINITY + p, p);
            assert!((p + q).is_on_curve());
        }
    }

    #[test]
    fn test_mixed_addition() {
        let mut rng = StdRng::seed_from_u64(3);
        let p: G2Jac = rng.random();
        let q: G2Affine = rng.random();
        assert_eq!(p + q, p + G2Jac::from_affine(&q));
        // mixed addition of the same point doubles
        let pa = p.to_affine();
        assert_eq!(p + pa, p.double());
        assert_eq!(G2Jac::INFINITY + q, G2Jac::from_affine(&q));
        assert_eq!(p + G2Affine::INFINITY, p);
    }

    #[test]
    fn test_jacobian_equality_across_scalings() {
        let mut rng = StdRng::seed_from_u64(4);
        let p: G2Jac = rng.random();
        let lambda: Fp2 = rng.random();
        let l2 = lambda.square();
        let scaled = G2Jac::new(p.x * l2, p.y * l2 * lambda, p.z * lambda);
        assert_eq!(p, scaled);
        assert_ne!(p, p.neg());
        assert_ne!(p, G2Jac::INFINITY);
    }

    #[test]
    fn test_affine_round_trip_and_batch() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut points: Vec<G2Jac> = (0..6).map(|_| rng.random()).collect();
        points.push(G2Jac::INFINITY);
        let batch = G2Jac::batch_to_affine(&points);
        for (p, a) in points.iter().zip(&batch) {
            assert_eq!(p.to_affine(), *a);
            assert_eq!(G2Jac::from_affine(a), *p);
        }
        assert!(batch[6].is_infinity());
    }

    #[test]
    fn test_scalar_mul_edges() {
        let g = G2Jac::generator();
        let r = Fr::modulus();
        assert!(g.mul_glv(&BigInt::zero()).is_infinity());
        assert_eq!(g.mul_glv(&BigInt::one()), g);
        assert_eq!(g.mul_glv(&BigInt::from(&r - 1u8)), g.neg());
        assert!(g.mul_glv(&BigInt::from(r.clone())).is_infinity());
        assert_eq!(g.mul_glv(&BigInt::from(-1)), g.neg());
        assert!(G2Jac::INFINITY.mul_glv(&BigInt::from(12345)).is_infinity());
        // one half of the split vanishes for lambda and for small scalars
        assert_eq!(g.mul_glv(&lambda()), g.phi());
        assert_eq!(g.mul_glv(&BigInt::from(7)), g.mul_u64(7));
    }

    #[test]
    fn test_glv_matches_windowed_and_naive() {
        let mut rng = StdRng::seed_from_u64(6);
        let g = G2Jac::generator();
        for _ in 0..8 {
            let s: Fr = rng.random();
            let sb = s.to_biguint();
            let glv = g * s;
            assert_eq!(glv, g.mul_windowed(&sb), "glv and windowed disagree for {s}");
            assert_eq!(glv, naive_mul(&g, &sb), "glv and double-and-add disagree for {s}");
            assert_eq!(glv, g.scalar_mul_windowed(&s));
        }
    }

    #[test]
    fn test_group_trait_helpers() {
        let mut rng = StdRng::seed_from_u64(7);
        let g = G2Jac::generator();
        let a: Fr = rng.random();
        let b: Fr = rng.random();
        assert_eq!(Group::scalar_mul(&g, &a), g * a);
        assert_eq!(g.mul_u64(0), G2Jac::INFINITY);
        assert_eq!(g.mul_u64(3), g.double() + g);
        let h = g.double();
        assert_eq!(G2Jac::multi_scalar_mul(&[g, h], &[a, b]), g * a + h * b);
    }

    #[test]
    fn test_phi_is_multiplication_by_lambda() {
        let mut rng = StdRng::seed_from_u64(8);
        let p: G2Jac = rng.random();
        let l = lambda().to_biguint().unwrap();
        assert_eq!(p.phi(), p.mul_windowed(&l));
    }

    #[test]
    fn test_subgroup_check_rejects_cofactor_points() {
        let p = non_subgroup_point();
        assert!(p.is_on_curve());
        assert!(!p.is_in_subgroup());
        let cleared = G2Jac::from_affine(&p).clear_cofactor();
        assert!(cleared.is_in_subgroup());
        assert!(cleared.is_on_curve());
    }

    #[test]
    fn test_clear_cofactor_matches_h_eff() {
        let h_eff = BigUint::parse_bytes(
            b"bc69f08f2ee75b3584c6a0ea91b352888e2a8e9145ad7689986ff031508ffe1329c2f178731db956d82bf015d1212b02ec0ec69d7477c1ae954cbc06689f6a359894c0adebbf6b4e8020005aaa95551",
            16,
        )
        .unwrap();
        let p = G2Jac::from_affine(&non_subgroup_point());
        assert_eq!(p.clear_cofactor(), p.mul_windowed(&h_eff));
    }

    #[test]
    fn test_psi_preserves_curve() {
        let p = G2Jac::from_affine(&non_subgroup_point());
        assert!(p.psi().is_on_curve());
        // on G2, psi acts as multiplication by x
        let g = G2Jac::generator();
        assert_eq!(g.psi(), g.mul_by_x());
    }

    #[test]
    fn test_random_points_in_subgroup() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..4 {
            let p: G2Affine = rng.random();
            assert!(p.is_in_subgroup());
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", G2Affine::INFINITY), "O");
        assert!(format!("{}", G2Jac::generator()).starts_with("E(["));
    }
}
