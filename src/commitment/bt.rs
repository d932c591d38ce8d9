// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! `B_T = GT⁴`, indexed `(1,1), (1,2), (2,1), (2,2)`, and the bilinear map
//! `B_1 × B_2 → B_T`.

use crate::commitment::{B1, B2};
use crate::crs::Crs;
use crate::{Fp, GT};
use ark_ec::PairingEngine;
use ark_ff::{Field, One, PrimeField};

/// An element of `B_T = GT × GT × GT × GT`.
#[derive(derivative::Derivative)]
#[derivative(
    Clone(bound = ""),
    Copy(bound = ""),
    Debug(bound = ""),
    PartialEq(bound = ""),
    Eq(bound = "")
)]
pub struct BT<E: PairingEngine> {
    /// Component `(1,1)`.
    pub t11: GT<E>,
    /// Component `(1,2)`.
    pub t12: GT<E>,
    /// Component `(2,1)`.
    pub t21: GT<E>,
    /// Component `(2,2)`.
    pub t22: GT<E>,
}

impl<E: PairingEngine> BT<E> {
    /// The identity element `(1, 1, 1, 1)`.
    #[inline]
    pub fn zero() -> Self {
        let one = GT::<E>::one();
        Self {
            t11: one,
            t12: one,
            t21: one,
            t22: one,
        }
    }

    /// Builds `B_T` from its four raw components.
    #[inline]
    pub fn new(t11: GT<E>, t12: GT<E>, t21: GT<E>, t22: GT<E>) -> Self {
        Self { t11, t12, t21, t22 }
    }

    /// The embedding GT → B_T, `g_T ↦ (1, 1, 1, g_T)`.
    #[inline]
    pub fn from_gt(g_t: GT<E>) -> Self {
        Self {
            t11: GT::<E>::one(),
            t12: GT::<E>::one(),
            t21: GT::<E>::one(),
            t22: g_t,
        }
    }

    /// The embedding F_p → B_T, `m ↦ m·u_T` with `u_T = pair(u_1, u_2)`,
    /// CRS-defined.
    pub fn from_fp(m: Fp<E>, crs: &Crs<E>) -> Self {
        Self::pair(&crs.u1(), &crs.u2()).pow(m)
    }

    /// The bilinear map `B_1 × B_2 → B_T`,
    /// `(a,b) ↦ (e(a₁,b₁), e(a₁,b₂), e(a₂,b₁), e(a₂,b₂))`.
    pub fn pair(a: &B1<E>, b: &B2<E>) -> Self {
        Self {
            t11: E::pairing(a.c1, b.c1),
            t12: E::pairing(a.c1, b.c2),
            t21: E::pairing(a.c2, b.c1),
            t22: E::pairing(a.c2, b.c2),
        }
    }

    /// Batched `pair`: given a list of `(B_1,B_2)` pairs, returns the
    /// componentwise product, computed as four underlying multi-pairing
    /// evaluations.
    pub fn pair_batch(pairs: &[(B1<E>, B2<E>)]) -> Self {
        let prep = |g1: crate::G1<E>, g2: crate::G2<E>| -> (E::G1Prepared, E::G2Prepared) {
            (g1.into().into(), g2.into().into())
        };
        let p11: Vec<_> = pairs.iter().map(|(a, b)| prep(a.c1, b.c1)).collect();
        let p12: Vec<_> = pairs.iter().map(|(a, b)| prep(a.c1, b.c2)).collect();
        let p21: Vec<_> = pairs.iter().map(|(a, b)| prep(a.c2, b.c1)).collect();
        let p22: Vec<_> = pairs.iter().map(|(a, b)| prep(a.c2, b.c2)).collect();
        Self {
            t11: E::product_of_pairings(p11.iter()),
            t12: E::product_of_pairings(p12.iter()),
            t21: E::product_of_pairings(p21.iter()),
            t22: E::product_of_pairings(p22.iter()),
        }
    }

    /// Componentwise product (the group operation, written additively to
    /// match `B1`/`B2`).
    pub fn add(self, other: Self) -> Self {
        Self::new(
            self.t11 * other.t11,
            self.t12 * other.t12,
            self.t21 * other.t21,
            self.t22 * other.t22,
        )
    }

    /// Componentwise quotient.
    pub fn sub(self, other: Self) -> Self {
        self.add(other.neg())
    }

    /// Componentwise inverse.
    pub fn neg(self) -> Self {
        Self::new(
            self.t11.inverse().expect("GT element is never zero"),
            self.t12.inverse().expect("GT element is never zero"),
            self.t21.inverse().expect("GT element is never zero"),
            self.t22.inverse().expect("GT element is never zero"),
        )
    }

    /// Componentwise exponentiation by a scalar.
    pub fn pow(self, scalar: Fp<E>) -> Self {
        let e = scalar.into_repr();
        Self::new(
            self.t11.pow(e),
            self.t12.pow(e),
            self.t21.pow(e),
            self.t22.pow(e),
        )
    }

    /// Recovers the GT value `g_T = e(g,h)` of a `B_T` element formed as
    /// `pair(commit_B1(g), commit_B2(h))`, using both trapdoors to undo
    /// all four components:
    /// `g_T = t11^{1/(ε₁ε₂)} · t12^{-1/ε₁} · t21^{-1/ε₂} · t22`.
    pub fn extract(&self, crs: &Crs<E>) -> GT<E> {
        let eps1 = crs.eps1().expect("extraction requires a binding CRS");
        let eps2 = crs.eps2().expect("extraction requires a binding CRS");
        let inv1 = eps1.inverse().expect("ε₁ is non-zero by construction");
        let inv2 = eps2.inverse().expect("ε₂ is non-zero by construction");
        let inv12 = inv1 * inv2;
        self.t11.pow(inv12.into_repr())
            * self.t12.pow(inv1.into_repr()).inverse().unwrap()
            * self.t21.pow(inv2.into_repr()).inverse().unwrap()
            * self.t22
    }
}

impl<E: PairingEngine> Default for BT<E> {
    fn default() -> Self {
        Self::zero()
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
    fn extract_recovers_pairing_of_committed_elements() {
        let mut rng = thread_rng();
        let crs = Crs::<E>::new(true, &mut rng);

        let g = crate::G1::<E>::prime_subgroup_generator() * Fp::<E>::rand(&mut rng);
        let h = crate::G2::<E>::prime_subgroup_generator() * Fp::<E>::rand(&mut rng);
        let expected = E::pairing(g, h);

        let a = B1::<E>::commit_group(g, Fp::<E>::rand(&mut rng), Fp::<E>::rand(&mut rng), &crs);
        let b = B2::<E>::commit_group(h, Fp::<E>::rand(&mut rng), Fp::<E>::rand(&mut rng), &crs);

        assert_eq!(BT::pair(&a, &b).extract(&crs), expected);
    }

    #[test]
    fn pair_batch_matches_sequential_products() {
        let mut rng = thread_rng();
        let crs = Crs::<E>::new(true, &mut rng);

        let pairs: Vec<(B1<E>, B2<E>)> = (0..3)
            .map(|_| {
                let g = crate::G1::<E>::prime_subgroup_generator() * Fp::<E>::rand(&mut rng);
                let h = crate::G2::<E>::prime_subgroup_generator() * Fp::<E>::rand(&mut rng);
                (
                    B1::<E>::commit_group(g, Fp::<E>::rand(&mut rng), Fp::<E>::rand(&mut rng), &crs),
                    B2::<E>::commit_group(h, Fp::<E>::rand(&mut rng), Fp::<E>::rand(&mut rng), &crs),
                )
            })
            .collect();

        let batched = BT::pair_batch(&pairs);
        let sequential = pairs
            .iter()
            .fold(BT::<E>::zero(), |acc, (a, b)| acc.add(BT::pair(a, b)));

        assert_eq!(batched, sequential);
    }

    #[test]
    fn zero_is_the_group_identity() {
        let mut rng = thread_rng();
        let t = BT::<E>::new(
            GT::<E>::rand(&mut rng),
            GT::<E>::rand(&mut rng),
            GT::<E>::rand(&mut rng),
            GT::<E>::rand(&mut rng),
        );
        assert_eq!(t.add(BT::<E>::zero()), t);
        assert_eq!(t.sub(t), BT::<E>::zero());
    }
}
