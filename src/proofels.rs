// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! The shared proof-element algebra [`crate::prove`] and [`crate::simulate`]
//! both build on: a leaf's randomized commitment ([`Commit1`]/[`Commit2`]),
//! the per-equation cross term two committed factors contribute
//! ([`scalar_combine`]), and the sixteen-tag wire writer
//! ([`write_eq_proof`]) that turns a `ProofEls` difference into the bytes
//! the classifier's equation tag says it should be.

use crate::classify::EqType;
use crate::codec;
use crate::crs::Crs;
use crate::error::Error;
use crate::{Fp, B1, B2};
use ark_ec::PairingEngine;
use ark_ff::{UniformRand, Zero};
use rand_core::RngCore;
use std::io::Write;

/// A value living on the `B_1` side of a leaf commitment before it is
/// necessarily forced into full `B_1` form: either nothing, a bare F_p
/// scalar, or a realized `B_1` element. Collapses the C++ original's
/// `VALUE_NULL`/`VALUE_FP`/`VALUE_G`/`VALUE_B` four-way split, since `G`
/// and `B` differ only in whether the embedding has happened yet.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub(crate) enum Pi1<E: PairingEngine> {
    Null,
    Fp(Fp<E>),
    B(B1<E>),
}

/// The `B_2`-side counterpart of [`Pi1`].
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub(crate) enum Pi2<E: PairingEngine> {
    Null,
    Fp(Fp<E>),
    B(B2<E>),
}

impl<E: PairingEngine> Pi1<E> {
    pub(crate) fn as_b1(&self, crs: &Crs<E>) -> B1<E> {
        match self {
            Pi1::Null => B1::zero(),
            Pi1::Fp(m) => B1::from_fp(*m, crs),
            Pi1::B(b) => *b,
        }
    }

    pub(crate) fn as_fp(&self) -> Fp<E> {
        match self {
            Pi1::Null => Fp::<E>::zero(),
            Pi1::Fp(m) => *m,
            Pi1::B(_) => panic!("Pi1 expected in Fp form, found a realized B_1 element"),
        }
    }

    fn scale(&self, s: Fp<E>) -> Self {
        match self {
            Pi1::Null => Pi1::Null,
            Pi1::Fp(m) => Pi1::Fp(*m * s),
            Pi1::B(b) => Pi1::B(*b * s),
        }
    }

    fn neg(&self) -> Self {
        match self {
            Pi1::Null => Pi1::Null,
            Pi1::Fp(m) => Pi1::Fp(-*m),
            Pi1::B(b) => Pi1::B(-*b),
        }
    }
}

impl<E: PairingEngine> Pi2<E> {
    pub(crate) fn as_b2(&self, crs: &Crs<E>) -> B2<E> {
        match self {
            Pi2::Null => B2::zero(),
            Pi2::Fp(m) => B2::from_fp(*m, crs),
            Pi2::B(b) => *b,
        }
    }

    pub(crate) fn as_fp(&self) -> Fp<E> {
        match self {
            Pi2::Null => Fp::<E>::zero(),
            Pi2::Fp(m) => *m,
            Pi2::B(_) => panic!("Pi2 expected in Fp form, found a realized B_2 element"),
        }
    }

    fn scale(&self, s: Fp<E>) -> Self {
        match self {
            Pi2::Null => Pi2::Null,
            Pi2::Fp(m) => Pi2::Fp(*m * s),
            Pi2::B(b) => Pi2::B(*b * s),
        }
    }

    fn neg(&self) -> Self {
        match self {
            Pi2::Null => Pi2::Null,
            Pi2::Fp(m) => Pi2::Fp(-*m),
            Pi2::B(b) => Pi2::B(-*b),
        }
    }
}

fn add_pi1<E: PairingEngine>(a: &Pi1<E>, b: &Pi1<E>, crs: &Crs<E>) -> Pi1<E> {
    match (a, b) {
        (Pi1::Null, x) | (x, Pi1::Null) => x.clone(),
        (Pi1::Fp(x), Pi1::Fp(y)) => Pi1::Fp(*x + *y),
        _ => Pi1::B(a.as_b1(crs) + b.as_b1(crs)),
    }
}

fn add_pi2<E: PairingEngine>(a: &Pi2<E>, b: &Pi2<E>, crs: &Crs<E>) -> Pi2<E> {
    match (a, b) {
        (Pi2::Null, x) | (x, Pi2::Null) => x.clone(),
        (Pi2::Fp(x), Pi2::Fp(y)) => Pi2::Fp(*x + *y),
        _ => Pi2::B(a.as_b2(crs) + b.as_b2(crs)),
    }
}

/// The commitment strategy a single leaf's proof-element contribution
/// was built with, fixing which randomizers [`scalar_combine`] mixes in
/// for cross terms with the leaf it is paired against. Ordered
/// `Public < Encrypted < Committed` (matches `max` in `addCommitGX`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum CommitKind {
    /// A constant or base element: no randomizer at all.
    Public,
    /// A G1/G2 witness committed without a `w` term, or any F_p witness
    /// (F_p commitments never carry a second randomizer): one `r`.
    Encrypted,
    /// A G1/G2 witness committed with both a `v` and a `w` term (whether
    /// `w` is stored explicitly or collapsed via a `Private` CRS's
    /// `ρ_P`/`σ_P`): an `r` and an `s`.
    Committed,
}

/// A leaf's randomized contribution on the `B_1` side: its own value
/// (`c`) plus the randomizer scalars (`r`, and `s` if [`CommitKind::Committed`])
/// any other leaf it is multiplied against needs to build a cross term.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub(crate) struct Commit1<E: PairingEngine> {
    pub(crate) kind: CommitKind,
    pub(crate) r: Fp<E>,
    pub(crate) s: Fp<E>,
    pub(crate) c: Pi1<E>,
}

/// The `B_2`-side counterpart of [`Commit1`].
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub(crate) struct Commit2<E: PairingEngine> {
    pub(crate) kind: CommitKind,
    pub(crate) r: Fp<E>,
    pub(crate) s: Fp<E>,
    pub(crate) c: Pi2<E>,
}

impl<E: PairingEngine> Commit1<E> {
    /// A public/constant leaf: no randomizer, value embedded directly.
    pub(crate) fn public(c: Pi1<E>) -> Self {
        Self {
            kind: CommitKind::Public,
            r: Fp::<E>::zero(),
            s: Fp::<E>::zero(),
            c,
        }
    }
}

impl<E: PairingEngine> Commit2<E> {
    pub(crate) fn public(c: Pi2<E>) -> Self {
        Self {
            kind: CommitKind::Public,
            r: Fp::<E>::zero(),
            s: Fp::<E>::zero(),
            c,
        }
    }
}

fn combine_kind_r_s<E: PairingEngine>(
    k1: CommitKind,
    r1: Fp<E>,
    s1: Fp<E>,
    k2: CommitKind,
    r2: Fp<E>,
    s2: Fp<E>,
) -> (CommitKind, Fp<E>, Fp<E>) {
    use CommitKind::*;
    let zero = Fp::<E>::zero();
    let (r, s) = match (k1, k2) {
        (Public, Public) => (zero, zero),
        (Public, Encrypted) => (r2, zero),
        (Public, Committed) => (r2, s2),
        (Encrypted, Public) => (r1, zero),
        (Encrypted, Encrypted) => (r1 + r2, zero),
        (Encrypted, Committed) => (r1 + r2, s2),
        (Committed, Public) => (r1, s1),
        (Committed, Encrypted) => (r1 + r2, s1),
        (Committed, Committed) => (r1 + r2, s1 + s2),
    };
    (k1.max(k2), r, s)
}

/// Combines two `B_1`-side leaf contributions added together in a
/// larger sum (`addCommitG1`).
pub(crate) fn add_commit1<E: PairingEngine>(
    a: &Commit1<E>,
    b: &Commit1<E>,
    crs: &Crs<E>,
) -> Commit1<E> {
    let (kind, r, s) = combine_kind_r_s(a.kind, a.r, a.s, b.kind, b.r, b.s);
    Commit1 {
        kind,
        r,
        s,
        c: add_pi1(&a.c, &b.c, crs),
    }
}

/// Combines two `B_2`-side leaf contributions added together in a
/// larger sum (`addCommitG2`).
pub(crate) fn add_commit2<E: PairingEngine>(
    a: &Commit2<E>,
    b: &Commit2<E>,
    crs: &Crs<E>,
) -> Commit2<E> {
    let (kind, r, s) = combine_kind_r_s(a.kind, a.r, a.s, b.kind, b.r, b.s);
    Commit2 {
        kind,
        r,
        s,
        c: add_pi2(&a.c, &b.c, crs),
    }
}

/// The four `B_1`/`B_2`-typed quantities an equation's proof part is
/// built from, before (for a single product leaf) or after (summed
/// across an equation side, then differenced between the two sides)
/// randomization.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub(crate) struct ProofEls<E: PairingEngine> {
    pub(crate) p1_v: Pi1<E>,
    pub(crate) p1_w: Pi1<E>,
    pub(crate) p2_v: Pi2<E>,
    pub(crate) p2_w: Pi2<E>,
}

impl<E: PairingEngine> ProofEls<E> {
    pub(crate) fn zero() -> Self {
        Self {
            p1_v: Pi1::Null,
            p1_w: Pi1::Null,
            p2_v: Pi2::Null,
            p2_w: Pi2::Null,
        }
    }
}

/// Adds two equation sides' proof-element contributions (a `Pair` sum
/// of product terms; `addAllPi`).
pub(crate) fn add_proof_els<E: PairingEngine>(
    a: &ProofEls<E>,
    b: &ProofEls<E>,
    crs: &Crs<E>,
) -> ProofEls<E> {
    ProofEls {
        p1_v: add_pi1(&a.p1_v, &b.p1_v, crs),
        p1_w: add_pi1(&a.p1_w, &b.p1_w, crs),
        p2_v: add_pi2(&a.p2_v, &b.p2_v, crs),
        p2_w: add_pi2(&a.p2_w, &b.p2_w, crs),
    }
}

fn sub_proof_els<E: PairingEngine>(
    a: &ProofEls<E>,
    b: &ProofEls<E>,
    crs: &Crs<E>,
) -> ProofEls<E> {
    add_proof_els(
        a,
        &ProofEls {
            p1_v: b.p1_v.neg(),
            p1_w: b.p1_w.neg(),
            p2_v: b.p2_v.neg(),
            p2_w: b.p2_w.neg(),
        },
        crs,
    )
}

/// The LHS-minus-RHS proof-element difference for one equation
/// (`subPiG1`/`subPiG2` applied to all four fields at once).
pub(crate) fn diff_proof_els<E: PairingEngine>(
    lhs: &ProofEls<E>,
    rhs: &ProofEls<E>,
    crs: &Crs<E>,
) -> ProofEls<E> {
    sub_proof_els(lhs, rhs, crs)
}

/// The cross term two committed factors of a product contribute to the
/// equation's proof element (`scalarCombine`): `c1` lives on the `B_1`
/// side of the product, `c2` on the `B_2` side.
pub(crate) fn scalar_combine<E: PairingEngine>(
    c1: &Commit1<E>,
    c2: &Commit2<E>,
) -> ProofEls<E> {
    let mut p1_v = Pi1::Null;
    let mut p1_w = Pi1::Null;
    let mut p2_v = Pi2::Null;
    let mut p2_w = Pi2::Null;

    match c1.kind {
        CommitKind::Committed => {
            p2_w = c2.c.scale(c1.s);
            p2_v = c2.c.scale(c1.r);
        }
        CommitKind::Encrypted => {
            p2_v = c2.c.scale(c1.r);
        }
        CommitKind::Public => {}
    }
    match c2.kind {
        CommitKind::Committed => {
            p1_w = c1.c.scale(c2.s);
            p1_v = c1.c.scale(c2.r);
        }
        CommitKind::Encrypted => {
            p1_v = c1.c.scale(c2.r);
        }
        CommitKind::Public => {}
    }

    ProofEls {
        p1_v,
        p1_w,
        p2_v,
        p2_w,
    }
}

/// Writes an equation's randomized proof part to `sink`, per the classifier's
/// sixteen-tag wire table (`writeEqProof`). `diff` is `get_proof(lhs) -
/// get_proof(rhs)`, not yet forced into `B_1`/`B_2` form or randomized —
/// both happen here, tag by tag.
pub(crate) fn write_eq_proof<E: PairingEngine, R: RngCore>(
    sink: &mut impl Write,
    tag: EqType,
    diff: ProofEls<E>,
    crs: &Crs<E>,
    rng: &mut R,
) -> Result<(), Error> {
    use EqType::*;
    match tag {
        Ppe => {
            let alpha = Fp::<E>::rand(rng);
            let beta = Fp::<E>::rand(rng);
            let gamma = Fp::<E>::rand(rng);
            let delta = Fp::<E>::rand(rng);
            let mut p1_v = diff.p1_v.as_b1(crs);
            let mut p1_w = diff.p1_w.as_b1(crs);
            let mut p2_v = diff.p2_v.as_b2(crs);
            let mut p2_w = diff.p2_w.as_b2(crs);
            match (crs.w1(), crs.w2()) {
                (Some(w1), Some(w2)) => {
                    p2_v = p2_v + crs.v2() * alpha + w2 * beta;
                    p2_w = p2_w + crs.v2() * gamma + w2 * delta;
                    p1_v = p1_v - (crs.v1() * alpha + w1 * gamma);
                    p1_w = p1_w - (crs.v1() * beta + w1 * delta);
                }
                _ => {
                    let rho_p = crs.rho_p().expect("Private CRS carries rho_P");
                    let sigma_p = crs.sigma_p().expect("Private CRS carries sigma_P");
                    p2_v = p2_v + crs.v2() * (alpha + sigma_p * beta);
                    p2_w = p2_w + crs.v2() * (gamma + sigma_p * delta);
                    p1_v = p1_v - crs.v1() * (alpha + rho_p * gamma);
                    p1_w = p1_w - crs.v1() * (beta + rho_p * delta);
                }
            }
            codec::write_b1::<E>(sink, &p1_v)?;
            codec::write_b1::<E>(sink, &p1_w)?;
            codec::write_b2::<E>(sink, &p2_v)?;
            codec::write_b2::<E>(sink, &p2_w)?;
        }
        PEncG | MeH => {
            let alpha = Fp::<E>::rand(rng);
            let beta = Fp::<E>::rand(rng);
            let mut p1_v = diff.p1_v.as_b1(crs);
            let p1_w = diff.p1_w.as_b1(crs);
            let mut p2_v = diff.p2_v.as_b2(crs);
            match crs.w2() {
                Some(w2) => p2_v = p2_v + crs.v2() * alpha + w2 * beta,
                None => {
                    let sigma_p = crs.sigma_p().expect("Private CRS carries sigma_P");
                    p2_v = p2_v + crs.v2() * (alpha + sigma_p * beta);
                }
            }
            p1_v = p1_v - crs.v1() * alpha;
            let p1_w = p1_w - crs.v1() * beta;
            codec::write_b1::<E>(sink, &p1_v)?;
            codec::write_b1::<E>(sink, &p1_w)?;
            codec::write_b2::<E>(sink, &p2_v)?;
        }
        PConstG => {
            let p1_v = diff.p1_v.as_b1(crs);
            let p1_w = diff.p1_w.as_b1(crs);
            codec::write_g1::<E>(sink, &p1_v.c2)?;
            codec::write_g1::<E>(sink, &p1_w.c2)?;
        }
        PEncH | MeG => {
            let alpha = Fp::<E>::rand(rng);
            let gamma = Fp::<E>::rand(rng);
            let mut p1_v = diff.p1_v.as_b1(crs);
            let mut p2_v = diff.p2_v.as_b2(crs);
            let mut p2_w = diff.p2_w.as_b2(crs);
            p2_v = p2_v + crs.v2() * alpha;
            p2_w = p2_w + crs.v2() * gamma;
            match crs.w1() {
                Some(w1) => p1_v = p1_v - (crs.v1() * alpha + w1 * gamma),
                None => {
                    let rho_p = crs.rho_p().expect("Private CRS carries rho_P");
                    p1_v = p1_v - crs.v1() * (alpha + rho_p * gamma);
                }
            }
            codec::write_b1::<E>(sink, &p1_v)?;
            codec::write_b2::<E>(sink, &p2_v)?;
            codec::write_b2::<E>(sink, &p2_w)?;
        }
        PConstH => {
            let p2_v = diff.p2_v.as_b2(crs);
            let p2_w = diff.p2_w.as_b2(crs);
            codec::write_g2::<E>(sink, &p2_v.c2)?;
            codec::write_g2::<E>(sink, &p2_w.c2)?;
        }
        MEncG | MEncH | Qe => {
            let alpha = Fp::<E>::rand(rng);
            let mut p1_v = diff.p1_v.as_b1(crs);
            let mut p2_v = diff.p2_v.as_b2(crs);
            p2_v = p2_v + crs.v2() * alpha;
            p1_v = p1_v - crs.v1() * alpha;
            codec::write_b1::<E>(sink, &p1_v)?;
            codec::write_b2::<E>(sink, &p2_v)?;
        }
        MConstG => {
            let p1_v = diff.p1_v.as_b1(crs);
            codec::write_g1::<E>(sink, &p1_v.c2)?;
        }
        MLinG => {
            codec::write_fp::<E>(sink, &diff.p2_v.as_fp())?;
            codec::write_fp::<E>(sink, &diff.p2_w.as_fp())?;
        }
        MConstH => {
            let p2_v = diff.p2_v.as_b2(crs);
            codec::write_g2::<E>(sink, &p2_v.c2)?;
        }
        MLinH => {
            codec::write_fp::<E>(sink, &diff.p1_v.as_fp())?;
            codec::write_fp::<E>(sink, &diff.p1_w.as_fp())?;
        }
        QConstG => {
            codec::write_fp::<E>(sink, &diff.p1_v.as_fp())?;
        }
        QConstH => {
            codec::write_fp::<E>(sink, &diff.p2_v.as_fp())?;
        }
    }
    Ok(())
}
