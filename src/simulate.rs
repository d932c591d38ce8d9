// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! The simulator (`NIZKProof::simulate_proof`): produces
//! a proof with the same wire shape [`crate::prove::write_proof`] would,
//! without ever touching a witness, by using a hiding `Zk` CRS's
//! `ρ1, ε1, ρ2, ε2` trapdoor. Every variable is committed to the group
//! identity; every constant and base element that a real proof would
//! commit honestly is instead committed to a trapdoor-derived value whose
//! sign toggles per equation, tag by tag, so that the equation's bilinear
//! identity still closes.

use crate::classify::EqType;
use crate::codec;
use crate::crs::Crs;
use crate::error::Error;
use crate::expr::{FpNode, G1Node, G2Node, GTNode};
use crate::model::{ProofData, ProofModel};
use crate::proofels::{
    add_commit1, add_commit2, add_proof_els, diff_proof_els, scalar_combine, Commit1, Commit2,
    CommitKind, Pi1, Pi2, ProofEls,
};
use crate::{Fp, B1, B2};
use ark_ec::PairingEngine;
use ark_ff::{One, UniformRand, Zero};
use rand_core::RngCore;
use std::io::Write;

enum FpVarEntry<E: PairingEngine> {
    Left { commit: Commit1<E>, wire: B1<E> },
    Right { commit: Commit2<E>, wire: B2<E> },
}

/// Every variable committed to the group identity, same shape as
/// [`crate::prove`]'s `Ctx` but with zeroed values and no constant
/// entries — constants cheat per equation tag, so they are rebuilt on
/// every leaf visit rather than cached once.
struct Ctx<E: PairingEngine> {
    fp_var: Vec<FpVarEntry<E>>,
    g1_var: Vec<(Commit1<E>, B1<E>)>,
    g2_var: Vec<(Commit2<E>, B2<E>)>,
}

impl<E: PairingEngine> Ctx<E> {
    fn build<R: RngCore>(model: &ProofModel<E>, crs: &Crs<E>, rng: &mut R) -> Self {
        let fp_var = (0..model.n_vars_fp)
            .map(|i| {
                let r = Fp::<E>::rand(rng);
                if model.side_fp_var[i] {
                    let wire = B1::commit_scalar(Fp::<E>::zero(), r, crs);
                    let commit = Commit1 {
                        kind: CommitKind::Encrypted,
                        r,
                        s: Fp::<E>::zero(),
                        c: Pi1::Fp(Fp::<E>::zero()),
                    };
                    FpVarEntry::Left { commit, wire }
                } else {
                    let wire = B2::commit_scalar(Fp::<E>::zero(), r, crs);
                    let commit = Commit2 {
                        kind: CommitKind::Encrypted,
                        r,
                        s: Fp::<E>::zero(),
                        c: Pi2::Fp(Fp::<E>::zero()),
                    };
                    FpVarEntry::Right { commit, wire }
                }
            })
            .collect();

        let g1_var = (0..model.n_vars_g1)
            .map(|i| {
                let r = Fp::<E>::rand(rng);
                if model.enc.g1_encrypted(i as u16) {
                    let wire = B1::commit_group_encrypted(crate::G1::<E>::zero(), r, crs);
                    let commit = Commit1 {
                        kind: CommitKind::Encrypted,
                        r,
                        s: Fp::<E>::zero(),
                        c: Pi1::B(B1::zero()),
                    };
                    (commit, wire)
                } else {
                    let s = Fp::<E>::rand(rng);
                    let wire = B1::commit_group(crate::G1::<E>::zero(), r, s, crs);
                    let commit = Commit1 {
                        kind: CommitKind::Committed,
                        r,
                        s,
                        c: Pi1::B(B1::zero()),
                    };
                    (commit, wire)
                }
            })
            .collect();

        let g2_var = (0..model.n_vars_g2)
            .map(|i| {
                let r = Fp::<E>::rand(rng);
                if model.enc.g2_encrypted(i as u16) {
                    let wire = B2::commit_group_encrypted(crate::G2::<E>::zero(), r, crs);
                    let commit = Commit2 {
                        kind: CommitKind::Encrypted,
                        r,
                        s: Fp::<E>::zero(),
                        c: Pi2::B(B2::zero()),
                    };
                    (commit, wire)
                } else {
                    let s = Fp::<E>::rand(rng);
                    let wire = B2::commit_group(crate::G2::<E>::zero(), r, s, crs);
                    let commit = Commit2 {
                        kind: CommitKind::Committed,
                        r,
                        s,
                        c: Pi2::B(B2::zero()),
                    };
                    (commit, wire)
                }
            })
            .collect();

        Self {
            fp_var,
            g1_var,
            g2_var,
        }
    }
}

/// `cheatLeft`: whether an equation of this tag needs its `B_1`-side
/// constants and base elements replaced by the trapdoor shortcut rather
/// than embedded honestly.
fn cheat_left(tag: EqType) -> bool {
    use EqType::*;
    matches!(
        tag,
        Ppe | PEncH | PConstH | MLinG | MeH | MEncH | MConstH | Qe | QConstH
    )
}

/// `cheatRight`: the `B_2`-side counterpart of [`cheat_left`]. Not the
/// complement of `cheat_left` — `Ppe` and `QConstH`/`QConstG` differ
/// between the two tables.
fn cheat_right(tag: EqType) -> bool {
    use EqType::*;
    matches!(
        tag,
        Ppe | PEncG | PConstG | MLinH | MeG | MEncG | MConstG | Qe | QConstG
    )
}

/// An F_p leaf used as a `B_1`-side scalar multiplier: a variable reads
/// its precomputed zeroed commitment; a constant or base element gets the
/// trapdoor shortcut `r = value·ρ1`, toggled between embedding the real
/// value (`Public`) and hiding it behind `Null` (`Encrypted`) by
/// [`cheat_left`] — the same cached-then-retagged value the original
/// reuses across every equation that touches the same constant.
fn left_fp_zk<E: PairingEngine>(
    node: &FpNode<E>,
    tag: EqType,
    data: &ProofData<E>,
    ctx: &Ctx<E>,
    crs: &Crs<E>,
) -> Commit1<E> {
    match node {
        FpNode::Variable(i) => match &ctx.fp_var[*i as usize] {
            FpVarEntry::Left { commit, .. } => commit.clone(),
            FpVarEntry::Right { .. } => unreachable!("Fp variable read on its non-native side"),
        },
        FpNode::ConstIndex(_) | FpNode::ConstValue(_) | FpNode::Base => {
            let value = match node {
                FpNode::ConstIndex(i) => data.pub_fp[*i as usize],
                FpNode::ConstValue(v) => *v,
                FpNode::Base => Fp::<E>::one(),
                _ => unreachable!(),
            };
            let rho1 = crs.rho1().expect("simulation requires a Zk CRS");
            let r = value * rho1;
            if cheat_left(tag) {
                Commit1 {
                    kind: CommitKind::Encrypted,
                    r,
                    s: Fp::<E>::zero(),
                    c: Pi1::Null,
                }
            } else {
                Commit1 {
                    kind: CommitKind::Public,
                    r,
                    s: Fp::<E>::zero(),
                    c: Pi1::Fp(value),
                }
            }
        }
        FpNode::Pair(a, b) => add_commit1(
            &left_fp_zk(a, tag, data, ctx, crs),
            &left_fp_zk(b, tag, data, ctx, crs),
            crs,
        ),
        FpNode::Scalar(..) => unreachable!("normalization promotes nested Fp products"),
    }
}

/// The `B_2`-side counterpart of [`left_fp_zk`], gated by [`cheat_right`]
/// and using `ρ2`.
fn right_fp_zk<E: PairingEngine>(
    node: &FpNode<E>,
    tag: EqType,
    data: &ProofData<E>,
    ctx: &Ctx<E>,
    crs: &Crs<E>,
) -> Commit2<E> {
    match node {
        FpNode::Variable(i) => match &ctx.fp_var[*i as usize] {
            FpVarEntry::Right { commit, .. } => commit.clone(),
            FpVarEntry::Left { .. } => unreachable!("Fp variable read on its non-native side"),
        },
        FpNode::ConstIndex(_) | FpNode::ConstValue(_) | FpNode::Base => {
            let value = match node {
                FpNode::ConstIndex(i) => data.pub_fp[*i as usize],
                FpNode::ConstValue(v) => *v,
                FpNode::Base => Fp::<E>::one(),
                _ => unreachable!(),
            };
            let rho2 = crs.rho2().expect("simulation requires a Zk CRS");
            let r = value * rho2;
            if cheat_right(tag) {
                Commit2 {
                    kind: CommitKind::Encrypted,
                    r,
                    s: Fp::<E>::zero(),
                    c: Pi2::Null,
                }
            } else {
                Commit2 {
                    kind: CommitKind::Public,
                    r,
                    s: Fp::<E>::zero(),
                    c: Pi2::Fp(value),
                }
            }
        }
        FpNode::Pair(a, b) => add_commit2(
            &right_fp_zk(a, tag, data, ctx, crs),
            &right_fp_zk(b, tag, data, ctx, crs),
            crs,
        ),
        FpNode::Scalar(..) => unreachable!("normalization promotes nested Fp products"),
    }
}

fn left_g1_zk<E: PairingEngine>(
    node: &G1Node<E>,
    tag: EqType,
    data: &ProofData<E>,
    ctx: &Ctx<E>,
    crs: &Crs<E>,
) -> Commit1<E> {
    match node {
        G1Node::Variable(i) => ctx.g1_var[*i as usize].0.clone(),
        G1Node::ConstIndex(i) => Commit1::public(Pi1::B(B1::from_g1(data.pub_g1[*i as usize]))),
        G1Node::ConstValue(v) => Commit1::public(Pi1::B(B1::from_g1(*v))),
        G1Node::Base => {
            let rho1 = crs.rho1().expect("simulation requires a Zk CRS");
            if cheat_left(tag) {
                Commit1 {
                    kind: CommitKind::Committed,
                    r: rho1,
                    s: -Fp::<E>::one(),
                    c: Pi1::Null,
                }
            } else {
                use ark_ec::ProjectiveCurve;
                Commit1::public(Pi1::B(B1::from_g1(E::G1Projective::prime_subgroup_generator())))
            }
        }
        G1Node::Pair(a, b) => add_commit1(
            &left_g1_zk(a, tag, data, ctx, crs),
            &left_g1_zk(b, tag, data, ctx, crs),
            crs,
        ),
        G1Node::Scalar(..) => unreachable!("normalization promotes nested G1 scalar addends"),
    }
}

fn right_g2_zk<E: PairingEngine>(
    node: &G2Node<E>,
    tag: EqType,
    data: &ProofData<E>,
    ctx: &Ctx<E>,
    crs: &Crs<E>,
) -> Commit2<E> {
    match node {
        G2Node::Variable(i) => ctx.g2_var[*i as usize].0.clone(),
        G2Node::ConstIndex(i) => Commit2::public(Pi2::B(B2::from_g2(data.pub_g2[*i as usize]))),
        G2Node::ConstValue(v) => Commit2::public(Pi2::B(B2::from_g2(*v))),
        G2Node::Base => {
            // The original `getRightZK(G2Data)` gates on `cheatLeft`, not
            // `cheatRight`, for this one leaf — an asymmetry carried over
            // verbatim rather than "fixed" into a false symmetry.
            let rho2 = crs.rho2().expect("simulation requires a Zk CRS");
            if cheat_left(tag) {
                Commit2 {
                    kind: CommitKind::Committed,
                    r: rho2,
                    s: -Fp::<E>::one(),
                    c: Pi2::Null,
                }
            } else {
                use ark_ec::ProjectiveCurve;
                Commit2::public(Pi2::B(B2::from_g2(E::G2Projective::prime_subgroup_generator())))
            }
        }
        G2Node::Pair(a, b) => add_commit2(
            &right_g2_zk(a, tag, data, ctx, crs),
            &right_g2_zk(b, tag, data, ctx, crs),
            crs,
        ),
        G2Node::Scalar(..) => unreachable!("normalization promotes nested G2 scalar addends"),
    }
}

fn get_proof_fp_zk<E: PairingEngine>(
    node: &FpNode<E>,
    tag: EqType,
    data: &ProofData<E>,
    ctx: &Ctx<E>,
    crs: &Crs<E>,
) -> ProofEls<E> {
    match node {
        FpNode::Pair(a, b) => add_proof_els(
            &get_proof_fp_zk(a, tag, data, ctx, crs),
            &get_proof_fp_zk(b, tag, data, ctx, crs),
            crs,
        ),
        FpNode::Scalar(a, b) => scalar_combine(
            &left_fp_zk(a, tag, data, ctx, crs),
            &right_fp_zk(b, tag, data, ctx, crs),
        ),
        _ => unreachable!("a finalized Fp equation side is Pair/Scalar only"),
    }
}

fn get_proof_g1_zk<E: PairingEngine>(
    node: &G1Node<E>,
    tag: EqType,
    data: &ProofData<E>,
    ctx: &Ctx<E>,
    crs: &Crs<E>,
) -> ProofEls<E> {
    match node {
        G1Node::Pair(a, b) => add_proof_els(
            &get_proof_g1_zk(a, tag, data, ctx, crs),
            &get_proof_g1_zk(b, tag, data, ctx, crs),
            crs,
        ),
        G1Node::Scalar(s, g) => scalar_combine(
            &left_g1_zk(g, tag, data, ctx, crs),
            &right_fp_zk(s, tag, data, ctx, crs),
        ),
        _ => unreachable!("a finalized G1 equation side is Pair/Scalar only"),
    }
}

fn get_proof_g2_zk<E: PairingEngine>(
    node: &G2Node<E>,
    tag: EqType,
    data: &ProofData<E>,
    ctx: &Ctx<E>,
    crs: &Crs<E>,
) -> ProofEls<E> {
    match node {
        G2Node::Pair(a, b) => add_proof_els(
            &get_proof_g2_zk(a, tag, data, ctx, crs),
            &get_proof_g2_zk(b, tag, data, ctx, crs),
            crs,
        ),
        G2Node::Scalar(s, h) => scalar_combine(
            &left_fp_zk(s, tag, data, ctx, crs),
            &right_g2_zk(h, tag, data, ctx, crs),
        ),
        _ => unreachable!("a finalized G2 equation side is Pair/Scalar only"),
    }
}

fn get_proof_gt_zk<E: PairingEngine>(
    node: &GTNode<E>,
    tag: EqType,
    data: &ProofData<E>,
    ctx: &Ctx<E>,
    crs: &Crs<E>,
) -> ProofEls<E> {
    match node {
        GTNode::ConstIndex(_) | GTNode::ConstValue(_) => ProofEls::zero(),
        GTNode::Base => {
            use ark_ec::ProjectiveCurve;
            let rho1 = crs.rho1().expect("simulation requires a Zk CRS");
            let rho2 = crs.rho2().expect("simulation requires a Zk CRS");
            let g1 = E::G1Projective::prime_subgroup_generator();
            let g2 = E::G2Projective::prime_subgroup_generator();
            if matches!(tag, EqType::PEncG | EqType::PConstG) {
                ProofEls {
                    p1_v: Pi1::B(B1::from_g1(g1) * rho2),
                    p1_w: Pi1::B(-B1::from_g1(g1)),
                    p2_v: Pi2::Null,
                    p2_w: Pi2::Null,
                }
            } else {
                ProofEls {
                    p1_v: Pi1::Null,
                    p1_w: Pi1::Null,
                    p2_v: Pi2::B(B2::from_g2(g2) * rho1),
                    p2_w: Pi2::B(-B2::from_g2(g2)),
                }
            }
        }
        GTNode::Pair(a, b) => add_proof_els(
            &get_proof_gt_zk(a, tag, data, ctx, crs),
            &get_proof_gt_zk(b, tag, data, ctx, crs),
            crs,
        ),
        GTNode::Pairing(a, b) => scalar_combine(
            &left_g1_zk(a, tag, data, ctx, crs),
            &right_g2_zk(b, tag, data, ctx, crs),
        ),
    }
}

/// Checks that `data` carries exactly `model`'s public constant counts —
/// the same requirement [`crate::verify::check_proof`] places on its
/// caller, since a simulated proof discloses no witnesses either.
fn check_public_instantiation<E: PairingEngine>(
    model: &ProofModel<E>,
    data: &ProofData<E>,
) -> Result<(), Error> {
    let check = |group, expected, got| {
        if expected == got {
            Ok(())
        } else {
            Err(Error::DataMismatch { group, expected, got })
        }
    };
    check("Fp constants", model.n_consts_fp, data.pub_fp.len())?;
    check("G1 constants", model.n_consts_g1, data.pub_g1.len())?;
    check("G2 constants", model.n_consts_g2, data.pub_g2.len())?;
    check("GT constants", model.n_consts_gt, data.pub_gt.len())?;
    Ok(())
}

/// Writes a proof that every equation in `model` holds, without any
/// witness, by exploiting `crs`'s simulation trapdoor (matches the C++
/// `NIZKProof::simulate_proof`). `data` carries only `model`'s public
/// constants — the auxiliary witnesses [`crate::eval::extend_data`] would
/// introduce for a real proof are never needed, since no witness
/// ever appears on the wire here.
///
/// Fails with [`Error::InvalidCrs`] unless `crs` is a `Zk` CRS and `model`
/// is both finalized and zero-knowledge; a model with any GT constant
/// also fails, matching the scheme's restriction that GT carries no
/// witnesses and thus no side channel to hide one behind.
pub fn simulate_proof<E: PairingEngine, R: RngCore>(
    model: &ProofModel<E>,
    crs: &Crs<E>,
    data: &ProofData<E>,
    sink: &mut impl Write,
    rng: &mut R,
) -> Result<(), Error> {
    if !model.is_finalized() {
        return Err(Error::NotFinalized);
    }
    if !crs.is_simulation_ready() || !model.is_zero_knowledge() || model.n_consts_gt != 0 {
        return Err(Error::InvalidCrs);
    }
    check_public_instantiation(model, data)?;

    let ctx = Ctx::build(model, crs, rng);

    for i in (0..model.n_vars_fp).rev() {
        match &ctx.fp_var[i] {
            FpVarEntry::Left { wire, .. } => codec::write_b1::<E>(sink, wire)?,
            FpVarEntry::Right { wire, .. } => codec::write_b2::<E>(sink, wire)?,
        }
    }
    for i in (0..model.n_vars_g1).rev() {
        codec::write_b1::<E>(sink, &ctx.g1_var[i].1)?;
    }
    for i in (0..model.n_vars_g2).rev() {
        codec::write_b2::<E>(sink, &ctx.g2_var[i].1)?;
    }

    for i in (0..model.eqs_fp.len()).rev() {
        let (l, r) = &model.eqs_fp[i];
        let tag = model.ty_fp[i];
        let diff = diff_proof_els(
            &get_proof_fp_zk(l, tag, data, &ctx, crs),
            &get_proof_fp_zk(r, tag, data, &ctx, crs),
            crs,
        );
        crate::proofels::write_eq_proof::<E, R>(sink, tag, diff, crs, rng)?;
    }
    for i in (0..model.eqs_g1.len()).rev() {
        let (l, r) = &model.eqs_g1[i];
        let tag = model.ty_g1[i];
        let diff = diff_proof_els(
            &get_proof_g1_zk(l, tag, data, &ctx, crs),
            &get_proof_g1_zk(r, tag, data, &ctx, crs),
            crs,
        );
        crate::proofels::write_eq_proof::<E, R>(sink, tag, diff, crs, rng)?;
    }
    for i in (0..model.eqs_g2.len()).rev() {
        let (l, r) = &model.eqs_g2[i];
        let tag = model.ty_g2[i];
        let diff = diff_proof_els(
            &get_proof_g2_zk(l, tag, data, &ctx, crs),
            &get_proof_g2_zk(r, tag, data, &ctx, crs),
            crs,
        );
        crate::proofels::write_eq_proof::<E, R>(sink, tag, diff, crs, rng)?;
    }
    for i in (0..model.eqs_gt.len()).rev() {
        let (l, r) = &model.eqs_gt[i];
        let tag = model.ty_gt[i];
        let diff = diff_proof_els(
            &get_proof_gt_zk(l, tag, data, &ctx, crs),
            &get_proof_gt_zk(r, tag, data, &ctx, crs),
            crs,
        );
        crate::proofels::write_eq_proof::<E, R>(sink, tag, diff, crs, rng)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{fp_var, g1_var, g2_var, gt_base as gt_base_expr, e as pair};
    use crate::model::{CommitType, ProofModel};
    use crate::{prove, verify};
    use ark_bls12_381::Bls12_381;
    use rand::thread_rng;

    type E = Bls12_381;

    #[test]
    fn simulated_quadratic_equation_checks() {
        // x * y = c, a single QE-tagged equation — exercises Qe's cheat
        // table (both sides cheat) end to end against the real verifier.
        let mut model = ProofModel::<E>::new(CommitType::SelectedEncryption);
        let x = fp_var::<E>(0);
        let y = fp_var::<E>(1);
        model.add_equation_fp(x.clone() * y.clone(), x.clone() * y).unwrap();
        model.finalize().unwrap();
        assert!(model.is_zero_knowledge());

        let mut rng = thread_rng();
        let crs = Crs::<E>::new(false, &mut rng);
        assert!(crs.is_simulation_ready());

        let data = ProofData::<E> {
            pub_fp: Vec::new(),
            priv_fp: Vec::new(),
            pub_g1: Vec::new(),
            priv_g1: Vec::new(),
            pub_g2: Vec::new(),
            priv_g2: Vec::new(),
            pub_gt: Vec::new(),
        };

        let mut wire = Vec::new();
        simulate_proof::<E, _>(&model, &crs, &data, &mut wire, &mut rng).unwrap();

        let mut source = wire.as_slice();
        assert!(verify::check_proof(&model, &crs, &data, &mut source).unwrap());
    }

    #[test]
    fn simulated_pairing_product_equation_checks() {
        // e(g, h)^k = e(A, B) with A, B witnesses — a PPE-tagged equation.
        let mut model = ProofModel::<E>::new(CommitType::SelectedEncryption);
        let a = g1_var::<E>(0);
        let b = g2_var::<E>(0);
        model
            .add_equation_gt(pair(a, b), gt_base_expr::<E>())
            .unwrap();
        model.finalize().unwrap();
        assert!(model.is_zero_knowledge());

        let mut rng = thread_rng();
        let crs = Crs::<E>::new(false, &mut rng);

        let data = ProofData::<E> {
            pub_fp: Vec::new(),
            priv_fp: Vec::new(),
            pub_g1: Vec::new(),
            priv_g1: Vec::new(),
            pub_g2: Vec::new(),
            priv_g2: Vec::new(),
            pub_gt: Vec::new(),
        };

        let mut wire = Vec::new();
        simulate_proof::<E, _>(&model, &crs, &data, &mut wire, &mut rng).unwrap();

        let mut source = wire.as_slice();
        assert!(verify::check_proof(&model, &crs, &data, &mut source).unwrap());
    }

    #[test]
    fn refuses_binding_crs() {
        let mut model = ProofModel::<E>::new(CommitType::SelectedEncryption);
        let x = fp_var::<E>(0);
        model.add_equation_fp(x.clone(), x).unwrap();
        model.finalize().unwrap();

        let mut rng = thread_rng();
        let crs = Crs::<E>::new(true, &mut rng);
        let data = ProofData::<E>::default();
        let mut wire = Vec::new();
        let err = simulate_proof::<E, _>(&model, &crs, &data, &mut wire, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidCrs));
    }

    #[test]
    fn matches_honest_proof_wire_length() {
        let mut model = ProofModel::<E>::new(CommitType::SelectedEncryption);
        let x = fp_var::<E>(0);
        let y = fp_var::<E>(1);
        model.add_equation_fp(x.clone() * y.clone(), x * y).unwrap();
        model.finalize().unwrap();

        let mut rng = thread_rng();
        let crs = Crs::<E>::new(false, &mut rng);
        let data = ProofData::<E>::default();

        let mut sim_wire = Vec::new();
        simulate_proof::<E, _>(&model, &crs, &data, &mut sim_wire, &mut rng).unwrap();

        let honest_data = ProofData::<E> {
            priv_fp: vec![Fp::<E>::from(3u64), Fp::<E>::from(5u64)],
            ..ProofData::<E>::default()
        };
        let mut honest_wire = Vec::new();
        prove::write_proof(&model, &crs, &honest_data, &mut honest_wire, &mut rng).unwrap();

        assert_eq!(sim_wire.len(), honest_wire.len());
    }
}
