// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! Commits every variable, then walks each
//! equation's two sides to build the randomized proof part its
//! classifier tag says it should have.

use crate::codec;
use crate::crs::Crs;
use crate::error::Error;
use crate::eval;
use crate::expr::{FpNode, G1Node, G2Node, GTNode};
use crate::model::{ProofData, ProofModel};
use crate::proofels::{
    add_commit1, add_commit2, add_proof_els, diff_proof_els, scalar_combine, Commit1, Commit2,
    CommitKind, Pi1, Pi2, ProofEls,
};
use crate::{Fp, B1, B2};
use ark_ec::{PairingEngine, ProjectiveCurve};
use ark_ff::{One, UniformRand, Zero};
use rand_core::RngCore;
use std::io::Write;

enum FpVarEntry<E: PairingEngine> {
    Left { commit: Commit1<E>, wire: B1<E> },
    Right { commit: Commit2<E>, wire: B2<E> },
}

enum FpConstEntry<E: PairingEngine> {
    Left(Commit1<E>),
    Right(Commit2<E>),
}

/// Precomputed randomized commitments for every variable and constant
/// leaf, keyed by the dense indices [`crate::normalize`] assigned.
struct Ctx<E: PairingEngine> {
    fp_var: Vec<FpVarEntry<E>>,
    fp_const: Vec<FpConstEntry<E>>,
    g1_var: Vec<(Commit1<E>, B1<E>)>,
    g1_const: Vec<Commit1<E>>,
    g2_var: Vec<(Commit2<E>, B2<E>)>,
    g2_const: Vec<Commit2<E>>,
}

impl<E: PairingEngine> Ctx<E> {
    fn build<R: RngCore>(
        model: &ProofModel<E>,
        crs: &Crs<E>,
        data: &ProofData<E>,
        rng: &mut R,
    ) -> Self {
        let fp_var = (0..model.n_vars_fp)
            .map(|i| {
                let value = data.priv_fp[i];
                let r = Fp::<E>::rand(rng);
                if model.side_fp_var[i] {
                    let wire = B1::commit_scalar(value, r, crs);
                    let commit = Commit1 {
                        kind: CommitKind::Encrypted,
                        r,
                        s: Fp::<E>::zero(),
                        c: Pi1::Fp(value),
                    };
                    FpVarEntry::Left { commit, wire }
                } else {
                    let wire = B2::commit_scalar(value, r, crs);
                    let commit = Commit2 {
                        kind: CommitKind::Encrypted,
                        r,
                        s: Fp::<E>::zero(),
                        c: Pi2::Fp(value),
                    };
                    FpVarEntry::Right { commit, wire }
                }
            })
            .collect();

        let fp_const = (0..model.n_consts_fp)
            .map(|i| {
                let value = data.pub_fp[i];
                if model.side_fp_const[i] {
                    FpConstEntry::Left(Commit1::public(Pi1::Fp(value)))
                } else {
                    FpConstEntry::Right(Commit2::public(Pi2::Fp(value)))
                }
            })
            .collect();

        let g1_var = (0..model.n_vars_g1)
            .map(|i| {
                let value = data.priv_g1[i];
                let r = Fp::<E>::rand(rng);
                if model.enc.g1_encrypted(i as u16) {
                    let wire = B1::commit_group_encrypted(value, r, crs);
                    let commit = Commit1 {
                        kind: CommitKind::Encrypted,
                        r,
                        s: Fp::<E>::zero(),
                        c: Pi1::B(B1::from_g1(value)),
                    };
                    (commit, wire)
                } else {
                    let s = Fp::<E>::rand(rng);
                    let wire = B1::commit_group(value, r, s, crs);
                    let commit = Commit1 {
                        kind: CommitKind::Committed,
                        r,
                        s,
                        c: Pi1::B(B1::from_g1(value)),
                    };
                    (commit, wire)
                }
            })
            .collect();

        let g1_const = (0..model.n_consts_g1)
            .map(|i| Commit1::public(Pi1::B(B1::from_g1(data.pub_g1[i]))))
            .collect();

        let g2_var = (0..model.n_vars_g2)
            .map(|i| {
                let value = data.priv_g2[i];
                let r = Fp::<E>::rand(rng);
                if model.enc.g2_encrypted(i as u16) {
                    let wire = B2::commit_group_encrypted(value, r, crs);
                    let commit = Commit2 {
                        kind: CommitKind::Encrypted,
                        r,
                        s: Fp::<E>::zero(),
                        c: Pi2::B(B2::from_g2(value)),
                    };
                    (commit, wire)
                } else {
                    let s = Fp::<E>::rand(rng);
                    let wire = B2::commit_group(value, r, s, crs);
                    let commit = Commit2 {
                        kind: CommitKind::Committed,
                        r,
                        s,
                        c: Pi2::B(B2::from_g2(value)),
                    };
                    (commit, wire)
                }
            })
            .collect();

        let g2_const = (0..model.n_consts_g2)
            .map(|i| Commit2::public(Pi2::B(B2::from_g2(data.pub_g2[i]))))
            .collect();

        Self {
            fp_var,
            fp_const,
            g1_var,
            g1_const,
            g2_var,
            g2_const,
        }
    }

}

fn left_fp<E: PairingEngine>(node: &FpNode<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> Commit1<E> {
    match node {
        FpNode::Variable(i) => match &ctx.fp_var[*i as usize] {
            FpVarEntry::Left { commit, .. } => commit.clone(),
            FpVarEntry::Right { .. } => unreachable!("Fp variable read on its non-native side"),
        },
        FpNode::ConstIndex(i) => match &ctx.fp_const[*i as usize] {
            FpConstEntry::Left(c) => c.clone(),
            FpConstEntry::Right(_) => unreachable!("Fp constant read on its non-native side"),
        },
        FpNode::ConstValue(v) => Commit1::public(Pi1::Fp(*v)),
        FpNode::Base => Commit1::public(Pi1::Fp(Fp::<E>::one())),
        FpNode::Pair(a, b) => add_commit1(&left_fp(a, ctx, crs), &left_fp(b, ctx, crs), crs),
        FpNode::Scalar(..) => unreachable!("normalization promotes nested Fp products"),
    }
}

fn right_fp<E: PairingEngine>(node: &FpNode<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> Commit2<E> {
    match node {
        FpNode::Variable(i) => match &ctx.fp_var[*i as usize] {
            FpVarEntry::Right { commit, .. } => commit.clone(),
            FpVarEntry::Left { .. } => unreachable!("Fp variable read on its non-native side"),
        },
        FpNode::ConstIndex(i) => match &ctx.fp_const[*i as usize] {
            FpConstEntry::Right(c) => c.clone(),
            FpConstEntry::Left(_) => unreachable!("Fp constant read on its non-native side"),
        },
        FpNode::ConstValue(v) => Commit2::public(Pi2::Fp(*v)),
        FpNode::Base => Commit2::public(Pi2::Fp(Fp::<E>::one())),
        FpNode::Pair(a, b) => add_commit2(&right_fp(a, ctx, crs), &right_fp(b, ctx, crs), crs),
        FpNode::Scalar(..) => unreachable!("normalization promotes nested Fp products"),
    }
}

fn left_g1<E: PairingEngine>(node: &G1Node<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> Commit1<E> {
    match node {
        G1Node::Variable(i) => ctx.g1_var[*i as usize].0.clone(),
        G1Node::ConstIndex(i) => ctx.g1_const[*i as usize].clone(),
        G1Node::ConstValue(v) => Commit1::public(Pi1::B(B1::from_g1(*v))),
        G1Node::Base => {
            Commit1::public(Pi1::B(B1::from_g1(E::G1Projective::prime_subgroup_generator())))
        }
        G1Node::Pair(a, b) => add_commit1(&left_g1(a, ctx, crs), &left_g1(b, ctx, crs), crs),
        G1Node::Scalar(..) => unreachable!("normalization promotes nested G1 scalar addends"),
    }
}

fn right_g2<E: PairingEngine>(node: &G2Node<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> Commit2<E> {
    match node {
        G2Node::Variable(i) => ctx.g2_var[*i as usize].0.clone(),
        G2Node::ConstIndex(i) => ctx.g2_const[*i as usize].clone(),
        G2Node::ConstValue(v) => Commit2::public(Pi2::B(B2::from_g2(*v))),
        G2Node::Base => {
            Commit2::public(Pi2::B(B2::from_g2(E::G2Projective::prime_subgroup_generator())))
        }
        G2Node::Pair(a, b) => add_commit2(&right_g2(a, ctx, crs), &right_g2(b, ctx, crs), crs),
        G2Node::Scalar(..) => unreachable!("normalization promotes nested G2 scalar addends"),
    }
}

fn get_proof_fp<E: PairingEngine>(node: &FpNode<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> ProofEls<E> {
    match node {
        FpNode::Pair(a, b) => add_proof_els(
            &get_proof_fp(a, ctx, crs),
            &get_proof_fp(b, ctx, crs),
            crs,
        ),
        FpNode::Scalar(a, b) => scalar_combine(&left_fp(a, ctx, crs), &right_fp(b, ctx, crs)),
        _ => unreachable!("a finalized Fp equation side is Pair/Scalar only"),
    }
}

fn get_proof_g1<E: PairingEngine>(node: &G1Node<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> ProofEls<E> {
    match node {
        G1Node::Pair(a, b) => add_proof_els(
            &get_proof_g1(a, ctx, crs),
            &get_proof_g1(b, ctx, crs),
            crs,
        ),
        G1Node::Scalar(s, g) => scalar_combine(&left_g1(g, ctx, crs), &right_fp(s, ctx, crs)),
        _ => unreachable!("a finalized G1 equation side is Pair/Scalar only"),
    }
}

fn get_proof_g2<E: PairingEngine>(node: &G2Node<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> ProofEls<E> {
    match node {
        G2Node::Pair(a, b) => add_proof_els(
            &get_proof_g2(a, ctx, crs),
            &get_proof_g2(b, ctx, crs),
            crs,
        ),
        G2Node::Scalar(s, h) => scalar_combine(&left_fp(s, ctx, crs), &right_g2(h, ctx, crs)),
        _ => unreachable!("a finalized G2 equation side is Pair/Scalar only"),
    }
}

fn get_proof_gt<E: PairingEngine>(node: &GTNode<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> ProofEls<E> {
    match node {
        GTNode::ConstIndex(_) | GTNode::ConstValue(_) | GTNode::Base => ProofEls::zero(),
        GTNode::Pair(a, b) => add_proof_els(
            &get_proof_gt(a, ctx, crs),
            &get_proof_gt(b, ctx, crs),
            crs,
        ),
        GTNode::Pairing(a, b) => scalar_combine(&left_g1(a, ctx, crs), &right_g2(b, ctx, crs)),
    }
}

/// Writes a proof that `data` satisfies every equation in `model` to
/// `sink`, under `crs` (`NIZKProof::write_proof`). `data`'s
/// witness vectors are sized to the *original* counts the caller
/// declared variables with; auxiliary witnesses normalization
/// introduced are evaluated and appended here.
pub fn write_proof<E: PairingEngine, R: RngCore>(
    model: &ProofModel<E>,
    crs: &Crs<E>,
    data: &ProofData<E>,
    sink: &mut impl Write,
    rng: &mut R,
) -> Result<(), Error> {
    if !model.is_finalized() {
        return Err(Error::NotFinalized);
    }
    let data = eval::extend_data(model, data.clone());
    model.check_instantiation(&data)?;

    let ctx = Ctx::build(model, crs, &data, rng);

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
        let diff = diff_proof_els(&get_proof_fp(l, &ctx, crs), &get_proof_fp(r, &ctx, crs), crs);
        crate::proofels::write_eq_proof::<E, R>(sink, model.ty_fp[i], diff, crs, rng)?;
    }
    for i in (0..model.eqs_g1.len()).rev() {
        let (l, r) = &model.eqs_g1[i];
        let diff = diff_proof_els(&get_proof_g1(l, &ctx, crs), &get_proof_g1(r, &ctx, crs), crs);
        crate::proofels::write_eq_proof::<E, R>(sink, model.ty_g1[i], diff, crs, rng)?;
    }
    for i in (0..model.eqs_g2.len()).rev() {
        let (l, r) = &model.eqs_g2[i];
        let diff = diff_proof_els(&get_proof_g2(l, &ctx, crs), &get_proof_g2(r, &ctx, crs), crs);
        crate::proofels::write_eq_proof::<E, R>(sink, model.ty_g2[i], diff, crs, rng)?;
    }
    for i in (0..model.eqs_gt.len()).rev() {
        let (l, r) = &model.eqs_gt[i];
        let diff = diff_proof_els(&get_proof_gt(l, &ctx, crs), &get_proof_gt(r, &ctx, crs), crs);
        crate::proofels::write_eq_proof::<E, R>(sink, model.ty_gt[i], diff, crs, rng)?;
    }

    Ok(())
}
