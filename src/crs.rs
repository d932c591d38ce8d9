// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! The four kinds of Common Reference String: PUBLIC, EXTRACT (binding),
//! ZK (hiding) and PRIVATE.

use crate::codec;
use crate::error::Error;
use crate::{B1, B2, Fp};
use ark_ec::PairingEngine;
use ark_ff::UniformRand;
use rand_core::RngCore;
use std::io::{Read, Write};

/// The extra information attached to a CRS depending on its kind.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub enum CrsKind<E: PairingEngine> {
    /// No extra information: only `u1, v1, w1, u2, v2, w2` are present.
    Public,
    /// Extraction (binding) trapdoor: `ρ1, ε1, ρ2, ε2`.
    Extract {
        /// ρ on the B_1 side.
        rho1: Fp<E>,
        /// ε on the B_1 side.
        eps1: Fp<E>,
        /// ρ on the B_2 side.
        rho2: Fp<E>,
        /// ε on the B_2 side.
        eps2: Fp<E>,
    },
    /// Simulation (hiding) trapdoor: `ρ1, ε1, ρ2, ε2`.
    Zk {
        /// ρ on the B_1 side.
        rho1: Fp<E>,
        /// ε on the B_1 side.
        eps1: Fp<E>,
        /// ρ on the B_2 side.
        rho2: Fp<E>,
        /// ε on the B_2 side.
        eps2: Fp<E>,
    },
    /// Efficient-prover trapdoor: `ρ_P, σ_P` with `w1 = ρ_P·v1`,
    /// `w2 = σ_P·v2` collapsed rather than stored.
    Private {
        /// Collapses `w1` into `v1`.
        rho_p: Fp<E>,
        /// Collapses `w2` into `v2`.
        sigma_p: Fp<E>,
    },
}

/// A Common Reference String for the Groth–Sahai proof system.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub struct Crs<E: PairingEngine> {
    u1: B1<E>,
    v1: B1<E>,
    w1: Option<B1<E>>,
    u2: B2<E>,
    v2: B2<E>,
    w2: Option<B2<E>>,
    kind: CrsKind<E>,
}

impl<E: PairingEngine> Crs<E> {
    /// Generates a new CRS. `binding = true` produces an `Extract` CRS
    /// suitable for proving and for trapdoor extraction; `binding = false`
    /// produces a `Zk` CRS suitable for proving and for simulation.
    ///
    /// Construction (SXDH-style, chosen so that extraction recovers a
    /// base element as `g = π₂ - (1/ε)·π₁`): pick the prime-subgroup
    /// generator `h` of each group and trapdoor scalars `ρ, ε`; set
    /// `v = (ε·h, h)`, `w = ρ·v`, `u = w + (0, h)`. Defining `w` as a
    /// scalar multiple of `v` (rather than from an independent discrete
    /// log) is what lets [`Crs::derive_private`] later prove knowledge of
    /// that same `ρ` as the `CrsKind::Private` collapse trapdoor.
    pub fn new<R: RngCore>(binding: bool, rng: &mut R) -> Self {
        use ark_ec::ProjectiveCurve;

        let g1 = E::G1Projective::prime_subgroup_generator();
        let g2 = E::G2Projective::prime_subgroup_generator();

        let rho1 = Fp::<E>::rand(rng);
        let eps1 = Fp::<E>::rand(rng);
        let rho2 = Fp::<E>::rand(rng);
        let eps2 = Fp::<E>::rand(rng);

        let v1 = B1::new(g1 * eps1, g1);
        let w1 = v1 * rho1;
        let u1 = w1 + B1::from_g1(g1);

        let v2 = B2::new(g2 * eps2, g2);
        let w2 = v2 * rho2;
        let u2 = w2 + B2::from_g2(g2);

        let kind = if binding {
            CrsKind::Extract {
                rho1,
                eps1,
                rho2,
                eps2,
            }
        } else {
            CrsKind::Zk {
                rho1,
                eps1,
                rho2,
                eps2,
            }
        };

        Self {
            u1,
            v1,
            w1: Some(w1),
            u2,
            v2,
            w2: Some(w2),
            kind,
        }
    }

    /// A dummy CRS, safe to use whenever no base element besides F_p's
    /// own unit is ever dereferenced.
    pub fn dummy() -> Self {
        Self {
            u1: B1::zero(),
            v1: B1::zero(),
            w1: Some(B1::zero()),
            u2: B2::zero(),
            v2: B2::zero(),
            w2: Some(B2::zero()),
            kind: CrsKind::Public,
        }
    }

    /// Rebuilds a CRS from its raw parts, as read off the wire by
    /// [`crate::codec::read_crs`].
    pub fn from_parts(
        u1: B1<E>,
        v1: B1<E>,
        w1: Option<B1<E>>,
        u2: B2<E>,
        v2: B2<E>,
        w2: Option<B2<E>>,
        kind: CrsKind<E>,
    ) -> Self {
        Self {
            u1,
            v1,
            w1,
            u2,
            v2,
            w2,
            kind,
        }
    }

    /// Clears any trapdoor, returning a CRS safe to publish.
    pub fn publish(&self) -> Self {
        Self {
            u1: self.u1,
            v1: self.v1,
            w1: self.w1,
            u2: self.u2,
            v2: self.v2,
            w2: self.w2,
            kind: CrsKind::Public,
        }
    }

    /// `true` for an `Extract` CRS.
    pub fn is_binding(&self) -> bool {
        matches!(self.kind, CrsKind::Extract { .. })
    }

    /// `true` for a `Zk` CRS with a simulation trapdoor.
    pub fn is_simulation_ready(&self) -> bool {
        matches!(self.kind, CrsKind::Zk { .. })
    }

    /// `u_1`.
    pub fn u1(&self) -> B1<E> {
        self.u1
    }
    /// `v_1`.
    pub fn v1(&self) -> B1<E> {
        self.v1
    }
    /// `w_1`, if stored (absent for a `Private` CRS).
    pub fn w1(&self) -> Option<B1<E>> {
        self.w1
    }
    /// `u_2`.
    pub fn u2(&self) -> B2<E> {
        self.u2
    }
    /// `v_2`.
    pub fn v2(&self) -> B2<E> {
        self.v2
    }
    /// `w_2`, if stored (absent for a `Private` CRS).
    pub fn w2(&self) -> Option<B2<E>> {
        self.w2
    }

    /// `ρ1`, for `Extract`/`Zk` CRSes.
    pub fn rho1(&self) -> Option<Fp<E>> {
        match self.kind {
            CrsKind::Extract { rho1, .. } | CrsKind::Zk { rho1, .. } => Some(rho1),
            _ => None,
        }
    }
    /// `ε1`, for `Extract`/`Zk` CRSes.
    pub fn eps1(&self) -> Option<Fp<E>> {
        match self.kind {
            CrsKind::Extract { eps1, .. } | CrsKind::Zk { eps1, .. } => Some(eps1),
            _ => None,
        }
    }
    /// `ρ2`, for `Extract`/`Zk` CRSes.
    pub fn rho2(&self) -> Option<Fp<E>> {
        match self.kind {
            CrsKind::Extract { rho2, .. } | CrsKind::Zk { rho2, .. } => Some(rho2),
            _ => None,
        }
    }
    /// `ε2`, for `Extract`/`Zk` CRSes.
    pub fn eps2(&self) -> Option<Fp<E>> {
        match self.kind {
            CrsKind::Extract { eps2, .. } | CrsKind::Zk { eps2, .. } => Some(eps2),
            _ => None,
        }
    }
    /// `ρ_P`, for `Private` CRSes.
    pub fn rho_p(&self) -> Option<Fp<E>> {
        match self.kind {
            CrsKind::Private { rho_p, .. } => Some(rho_p),
            _ => None,
        }
    }
    /// `σ_P`, for `Private` CRSes.
    pub fn sigma_p(&self) -> Option<Fp<E>> {
        match self.kind {
            CrsKind::Private { sigma_p, .. } => Some(sigma_p),
            _ => None,
        }
    }

    /// Derives an efficient-prover `Private` CRS from `self` (which must
    /// carry `w1, w2` and their discrete logs `ρ1, ρ2` against `v1, v2`,
    /// i.e. be `Extract` or `Zk`), writing to `sink` a short NIZK of
    /// knowledge of `ρ_P, σ_P` such that `w1 = ρ_P·v1` and `w2 = σ_P·v2`:
    /// a Chaum–Pedersen-style two-base sigma proof tying this CRS's own
    /// `ρ1, ρ2` (by construction the relation `Crs::new` establishes) to
    /// its `w1, w2`.
    pub fn derive_private<R: RngCore>(
        &self,
        rng: &mut R,
        sink: &mut impl Write,
    ) -> Result<Self, Error> {
        let w1 = self.w1.ok_or(Error::InvalidCrs)?;
        let w2 = self.w2.ok_or(Error::InvalidCrs)?;
        let rho_p = self.rho1().ok_or(Error::InvalidCrs)?;
        let sigma_p = self.rho2().ok_or(Error::InvalidCrs)?;

        // Commit phase: random blinding scalars for each base.
        let k1 = Fp::<E>::rand(rng);
        let k2 = Fp::<E>::rand(rng);
        let a1 = self.v1 * k1;
        let a2 = self.v2 * k2;

        let challenge = fiat_shamir_challenge::<E>(&a1, &a2, &w1, &w2)?;

        let z1 = k1 + challenge * rho_p;
        let z2 = k2 + challenge * sigma_p;

        codec::write_b1::<E>(sink, &a1)?;
        codec::write_b2::<E>(sink, &a2)?;
        codec::write_fp::<E>(sink, &z1)?;
        codec::write_fp::<E>(sink, &z2)?;

        Ok(Self {
            u1: self.u1,
            v1: self.v1,
            w1: None,
            u2: self.u2,
            v2: self.v2,
            w2: None,
            kind: CrsKind::Private { rho_p, sigma_p },
        })
    }

    /// Checks the proof written by `derive_private` that `candidate` was
    /// honestly derived from `self`. `self` must still carry `w1, w2`.
    pub fn verify_private(&self, source: &mut impl Read) -> Result<bool, Error> {
        let w1 = match self.w1 {
            Some(w1) => w1,
            None => return Ok(false),
        };
        let w2 = match self.w2 {
            Some(w2) => w2,
            None => return Ok(false),
        };

        let a1 = codec::read_b1::<E>(source)?;
        let a2 = codec::read_b2::<E>(source)?;
        let z1 = codec::read_fp::<E>(source)?;
        let z2 = codec::read_fp::<E>(source)?;

        let challenge = fiat_shamir_challenge::<E>(&a1, &a2, &w1, &w2)?;

        let lhs1 = self.v1 * z1;
        let rhs1 = a1 + w1 * challenge;
        let lhs2 = self.v2 * z2;
        let rhs2 = a2 + w2 * challenge;

        Ok(lhs1 == rhs1 && lhs2 == rhs2)
    }
}

/// Fiat–Shamir challenge for the `derive_private`/`verify_private` sigma
/// proof: a F_p element derived by hashing the serialized commitments and
/// statement.
fn fiat_shamir_challenge<E: PairingEngine>(
    a1: &B1<E>,
    a2: &B2<E>,
    w1: &B1<E>,
    w2: &B2<E>,
) -> Result<Fp<E>, Error> {
    use ark_ff::PrimeField;
    use sha2::{Digest, Sha256};

    let mut bytes = Vec::new();
    codec::write_b1::<E>(&mut bytes, a1)?;
    codec::write_b2::<E>(&mut bytes, a2)?;
    codec::write_b1::<E>(&mut bytes, w1)?;
    codec::write_b2::<E>(&mut bytes, w2)?;

    let digest = Sha256::digest(&bytes);
    Ok(Fp::<E>::from_le_bytes_mod_order(&digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::Bls12_381;
    use rand::thread_rng;

    type E = Bls12_381;

    #[test]
    fn new_crs_has_the_requested_kind() {
        let mut rng = thread_rng();
        let extract = Crs::<E>::new(true, &mut rng);
        assert!(extract.is_binding());
        assert!(!extract.is_simulation_ready());

        let zk = Crs::<E>::new(false, &mut rng);
        assert!(!zk.is_binding());
        assert!(zk.is_simulation_ready());
    }

    #[test]
    fn publish_strips_the_trapdoor() {
        let mut rng = thread_rng();
        let crs = Crs::<E>::new(true, &mut rng);
        let published = crs.publish();
        assert!(!published.is_binding());
        assert!(!published.is_simulation_ready());
        assert_eq!(published.eps1(), None);
        assert_eq!(published.u1(), crs.u1());
        assert_eq!(published.v1(), crs.v1());
        assert_eq!(published.w1(), crs.w1());
    }

    #[test]
    fn derive_private_proof_round_trips() {
        let mut rng = thread_rng();
        let crs = Crs::<E>::new(false, &mut rng);

        let mut sink = Vec::new();
        let private_crs = crs.derive_private(&mut rng, &mut sink).unwrap();
        assert!(private_crs.w1().is_none());
        assert!(private_crs.w2().is_none());
        assert!(private_crs.rho_p().is_some());

        let mut source = sink.as_slice();
        assert!(crs.verify_private(&mut source).unwrap());
    }

    #[test]
    fn derive_private_proof_rejects_tampered_transcript() {
        let mut rng = thread_rng();
        let crs = Crs::<E>::new(false, &mut rng);

        let mut sink = Vec::new();
        crs.derive_private(&mut rng, &mut sink).unwrap();
        // Flip a byte inside the serialized `z1` response.
        let last = sink.len() - 1;
        sink[last] ^= 0xff;

        let mut source = sink.as_slice();
        assert!(!crs.verify_private(&mut source).unwrap());
    }

    #[test]
    fn derive_private_proof_rejects_the_wrong_statement() {
        let mut rng = thread_rng();
        let crs = Crs::<E>::new(false, &mut rng);
        let other = Crs::<E>::new(false, &mut rng);

        let mut sink = Vec::new();
        crs.derive_private(&mut rng, &mut sink).unwrap();

        let mut source = sink.as_slice();
        assert!(!other.verify_private(&mut source).unwrap());
    }

    #[test]
    fn dummy_crs_is_unbound_and_unready() {
        let dummy = Crs::<E>::dummy();
        assert!(!dummy.is_binding());
        assert!(!dummy.is_simulation_ready());
        assert_eq!(dummy.u1(), B1::<E>::zero());
    }
}
