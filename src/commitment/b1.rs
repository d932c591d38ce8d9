// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! `B_1 = G1 × G1`, the commitment group used for F_p and G1 witnesses.

use crate::crs::Crs;
use crate::{Fp, G1};
use ark_ec::PairingEngine;
use ark_ff::{Field, Zero};
use core::ops::{Add, Mul, Neg, Sub};

/// An element of `B_1 = G1 × G1`.
#[derive(derivative::Derivative)]
#[derivative(
    Clone(bound = ""),
    Copy(bound = ""),
    Debug(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
pub struct B1<E: PairingEngine> {
    /// First component.
    pub c1: G1<E>,
    /// Second component.
    pub c2: G1<E>,
}

impl<E: PairingEngine> B1<E> {
    /// The null element `(0, 0)`.
    #[inline]
    pub fn zero() -> Self {
        Self {
            c1: G1::<E>::zero(),
            c2: G1::<E>::zero(),
        }
    }

    /// Builds `B_1` from its two raw components.
    #[inline]
    pub fn new(c1: G1<E>, c2: G1<E>) -> Self {
        Self { c1, c2 }
    }

    /// The embedding G1 → B_1, `g ↦ (0, g)`.
    #[inline]
    pub fn from_g1(g: G1<E>) -> Self {
        Self {
            c1: G1::<E>::zero(),
            c2: g,
        }
    }

    /// The embedding F_p → B_1, `m ↦ m·u_1`, CRS-defined.
    #[inline]
    pub fn from_fp(m: Fp<E>, crs: &Crs<E>) -> Self {
        crs.u1() * m
    }

    /// `commit_scalar(m, r, crs) = m·u_1 + r·v_1`.
    pub fn commit_scalar(m: Fp<E>, r: Fp<E>, crs: &Crs<E>) -> Self {
        crs.u1() * m + crs.v1() * r
    }

    /// Commits a G1 group element in encrypted form (no `w` component):
    /// `commit_group(g, r, crs) = (0, g) + r·v_1`.
    pub fn commit_group_encrypted(g: G1<E>, r: Fp<E>, crs: &Crs<E>) -> Self {
        Self::from_g1(g) + crs.v1() * r
    }

    /// Commits a G1 group element in non-encrypted form:
    /// `commit_group(g, r, s, crs) = (0, g) + r·v_1 + s·w_1`. Under a
    /// PRIVATE CRS (no stored `w_1`) this collapses to
    /// `(0, g) + (r + ρ_P·s)·v_1`.
    pub fn commit_group(g: G1<E>, r: Fp<E>, s: Fp<E>, crs: &Crs<E>) -> Self {
        match crs.w1() {
            Some(w1) => Self::from_g1(g) + crs.v1() * r + w1 * s,
            None => {
                let rho_p = crs.rho_p().expect("PRIVATE CRS must carry rho_P");
                Self::from_g1(g) + crs.v1() * (r + rho_p * s)
            }
        }
    }

    /// Recovers `g = π₂ - (1/ε₁)·π₁` using the extraction trapdoor.
    pub fn extract(&self, crs: &Crs<E>) -> G1<E> {
        let eps1 = crs.eps1().expect("extraction requires a binding CRS");
        self.c2 - self.c1 * eps1.inverse().expect("ε₁ is non-zero by construction")
    }
}

impl<E: PairingEngine> Default for B1<E> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<E: PairingEngine> Add for B1<E> {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self::new(self.c1 + other.c1, self.c2 + other.c2)
    }
}

impl<E: PairingEngine> Sub for B1<E> {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self::new(self.c1 - other.c1, self.c2 - other.c2)
    }
}

impl<E: PairingEngine> Neg for B1<E> {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.c1, -self.c2)
    }
}

impl<E: PairingEngine> Mul<Fp<E>> for B1<E> {
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
        let g = G1::<E>::prime_subgroup_generator() * Fp::<E>::rand(&mut rng);
        let r = Fp::<E>::rand(&mut rng);
        let s = Fp::<E>::rand(&mut rng);

        let committed = B1::<E>::commit_group(g, r, s, &crs);
        assert_eq!(committed.extract(&crs), g);

        let encrypted = B1::<E>::commit_group_encrypted(g, r, &crs);
        assert_eq!(encrypted.extract(&crs), g);
    }

    #[test]
    fn private_crs_collapses_to_same_commitment() {
        let mut rng = thread_rng();
        let crs = Crs::<E>::new(false, &mut rng);
        let mut sink = Vec::new();
        let private_crs = crs.derive_private(&mut rng, &mut sink).unwrap();

        let g = G1::<E>::prime_subgroup_generator();
        let r = Fp::<E>::rand(&mut rng);
        let s = Fp::<E>::rand(&mut rng);

        let rho_p = private_crs.rho_p().unwrap();
        let via_private = B1::<E>::commit_group(g, r, s, &private_crs);
        let via_public = B1::<E>::from_g1(g) + crs.v1() * r + crs.w1().unwrap() * s;
        assert_eq!(via_private, B1::<E>::from_g1(g) + crs.v1() * (r + rho_p * s));
        assert_eq!(via_private, via_public);
    }

    #[test]
    fn group_laws_hold() {
        let mut rng = thread_rng();
        let a = B1::<E>::new(
            G1::<E>::prime_subgroup_generator() * Fp::<E>::rand(&mut rng),
            G1::<E>::prime_subgroup_generator() * Fp::<E>::rand(&mut rng),
        );
        assert_eq!(a + B1::<E>::zero(), a);
        assert_eq!(a - a, B1::<E>::zero());
        assert_eq!(a + (-a), B1::<E>::zero());
    }
}
