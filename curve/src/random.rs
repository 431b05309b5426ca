use rand::distr::{Distribution, StandardUniform};
use rand::Rng;

use crate::{Fp, Fp2, Fr};

/// Helper trait for sampling random field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl RandomField for Fp {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}

impl RandomField for Fr {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}

impl RandomField for Fp2 {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_are_reduced_and_distinct() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = <Fp as RandomField>::random(&mut rng);
        let b = <Fp as RandomField>::random(&mut rng);
        assert_ne!(a, b);
        assert!(a.to_biguint() < Fp::modulus());

        let s = <Fr as RandomField>::random(&mut rng);
        assert!(s.to_biguint() < Fr::modulus());

        let e = <Fp2 as RandomField>::random(&mut rng);
        assert!(!e.is_zero());
    }
}
