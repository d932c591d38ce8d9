// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! `B_2 = G2 × G2`, the commitment group used for F_p and G2 witnesses.

use crate::crs::Crs;
use crate::{Fp, G2};
use ark_ec::PairingEngine;
use ark_ff::{Field, Zero};
use core::ops::{Add, Mul, Neg, Sub};

/// An element of `B_2 = G2 × G2`.
#[derive(derivative::Derivative)]
#[derivative(
    Clone(bound = ""),
    Copy(bound = ""),
    Debug(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
pub struct B2<E: PairingEngine> {
    /// First component.
    pub c1: G2<E>,
    /// Second component.
    pub c2: G2<E>,
}

impl<E: PairingEngine> B2<E> {
    /// The null element `(0, 0)`.
    #[inline]
    pub fn zero() -> Self {
        Self {
            c1: G2::<E>::zero(),
            c2: G2::<E>::zero(),
        }
    }

    /// Builds `B_2` from its two raw components.
    #[inline]
    pub fn new(c1: G2<E>, c2: G2<E>) -> Self {
        Self { c1, c2 }
    }

    /// The embedding G2 → B_2, `h ↦ (0, h)`.
    #[inline]
    pub fn from_g2(h: G2<E>) -> Self {
        Self {
            c1: G2::<E>::zero(),
            c2: h,
        }
    }

    /// The embedding F_p → B_2, `m ↦ m·u_2`, CRS-defined.
    #[inline]
    pub fn from_fp(m: Fp<E>, crs: &Crs<E>) -> Self {
        crs.u2() * m
    }

    /// `commit_scalar(m, r, crs) = m·u_2 + r·v_2`.
    pub fn commit_scalar(m: Fp<E>, r: Fp<E>, crs: &Crs<E>) -> Self {
        crs.u2() * m + crs.v2() * r
    }

    /// Commits a G2 group element in encrypted form (no `w` component).
    pub fn commit_group_encrypted(h: G2<E>, r: Fp<E>, crs: &Crs<E>) -> Self {
        Self::from_g2(h) + crs.v2() * r
    }

    /// Commits a G2 group element in non-encrypted form; collapses under a
    /// PRIVATE CRS the same way `B1::commit_group` does.
    pub fn commit_group(h: G2<E>, r: Fp<E>, s: Fp<E>, crs: &Crs<E>) -> Self {
        match crs.w2() {
            Some(w2) => Self::from_g2(h) + crs.v2() * r + w2 * s,
            None => {
                let sigma_p = crs.sigma_p().expect("PRIVATE CRS must carry sigma_P");
                Self::from_g2(h) + crs.v2() * (r + sigma_p * s)
            }
        }
    }

    /// Recovers `h = π₂ - (1/ε₂)·π₁` using the extraction trapdoor.
    pub fn extract(&self, crs: &Crs<E>) -> G2<E> {
        let eps2 = crs.eps2().expect("extraction requires a binding CRS");
        self.c2 - self.c1 * eps2.inverse().expect("ε₂ is non-zero by construction")
    }
}

impl<E: PairingEngine> Default for B2<E> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<E: PairingEngine> Add for B2<E> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.c1 + other.c1, self.c2 + other.c2)
    }
}

impl<E: PairingEngine> Sub for B2<E> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.c1 - other.c1, self.c2 - other.c2)
    }
}

impl<E: PairingEngine> Neg for B2<E> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.c1, -self.c2)
    }
}

impl<E: PairingEngine> Mul<Fp<E>> for B2<E> {
    type Output = Self;
    fn mul(self, scalar: Fp<E>) -> Self {
        Self::new(self.c1 * scalar, self.c2 * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::Bls12_381;
    use ark_ec::ProjectiveCurve;
    use ark_ff::UniformRand;
    use rand::thread_rng;

    type E = Bls12_381;

    #[test]
    fn extract_recovers_committed_group_element() {
        let mut rng = thread_rng();
        let crs = Crs::<E>::new(true, &mut rng);
        let h = G2::<E>::prime_subgroup_generator() * Fp::<E>::rand(&mut rng);
        let r = Fp::<E>::rand(&mut rng);
        let s = Fp::<E>::rand(&mut rng);

        let committed = B2::<E>::commit_group(h, r, s, &crs);
        assert_eq!(committed.extract(&crs), h);

        let encrypted = B2::<E>::commit_group_encrypted(h, r, &crs);
        assert_eq!(encrypted.extract(&crs), h);
    }

    #[test]
    fn private_crs_collapses_to_same_commitment() {
        let mut rng = thread_rng();
        let crs = Crs::<E>::new(false, &mut rng);
        let mut sink = Vec::new();
        let private_crs = crs.derive_private(&mut rng, &mut sink).unwrap();

        let h = G2::<E>::prime_subgroup_generator();
        let r = Fp::<E>::rand(&mut rng);
        let s = Fp::<E>::rand(&mut rng);

        let sigma_p = private_crs.sigma_p().unwrap();
        let via_private = B2::<E>::commit_group(h, r, s, &private_crs);
        let via_public = B2::<E>::from_g2(h) + crs.v2() * r + crs.w2().unwrap() * s;
        assert_eq!(via_private, B2::<E>::from_g2(h) + crs.v2() * (r + sigma_p * s));
        assert_eq!(via_private, via_public);
    }

    #[test]
    fn group_laws_hold() {
        let mut rng = thread_rng();
        let a = B2::<E>::new(
            G2::<E>::prime_subgroup_generator() * Fp::<E>::rand(&mut rng),
            G2::<E>::prime_subgroup_generator() * Fp::<E>::rand(&mut rng),
        );
        assert_eq!(a + B2::<E>::zero(), a);
        assert_eq!(a - a, B2::<E>::zero());
        assert_eq!(a + (-a), B2::<E>::zero());
    }
}
