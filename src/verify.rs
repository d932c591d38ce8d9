// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! The verifier (`NIZKProof::check_proof`): rebuilds
//! each variable's committed value from the wire, evaluates both sides
//! of every equation in `B_T`, and checks that they agree once the
//! per-equation randomization term [`get_rnd_proof_part`] reads off the
//! wire is folded in.

use crate::classify::EqType;
use crate::codec;
use crate::crs::Crs;
use crate::error::Error;
use crate::expr::{FpNode, G1Node, G2Node, GTNode};
use crate::gt_base;
use crate::model::{ProofData, ProofModel};
use crate::{B1, B2, BT};
use ark_ec::{PairingEngine, ProjectiveCurve};
use std::io::Read;

enum FpVarWire<E: PairingEngine> {
    Left(B1<E>),
    Right(B2<E>),
}

enum FpConstSide<E: PairingEngine> {
    Left(B1<E>),
    Right(B2<E>),
}

/// The committed value of every variable, read off the wire, plus the
/// direct CRS embedding of every constant, keyed by dense index —
/// the verifier's counterpart to [`crate::prove`]'s `Ctx`.
struct Ctx<E: PairingEngine> {
    fp_var: Vec<FpVarWire<E>>,
    fp_const: Vec<FpConstSide<E>>,
    g1_var: Vec<B1<E>>,
    g1_const: Vec<B1<E>>,
    g2_var: Vec<B2<E>>,
    g2_const: Vec<B2<E>>,
}

impl<E: PairingEngine> Ctx<E> {
    fn read(
        model: &ProofModel<E>,
        crs: &Crs<E>,
        data: &ProofData<E>,
        source: &mut impl Read,
    ) -> Result<Self, Error> {
        let mut fp_var: Vec<Option<FpVarWire<E>>> = (0..model.n_vars_fp).map(|_| None).collect();
        for i in (0..model.n_vars_fp).rev() {
            let wire = if model.side_fp_var[i] {
                FpVarWire::Left(codec::read_b1::<E>(source)?)
            } else {
                FpVarWire::Right(codec::read_b2::<E>(source)?)
            };
            fp_var[i] = Some(wire);
        }
        let fp_var = fp_var
            .into_iter()
            .map(|w| w.expect("every Fp variable wire is read"))
            .collect();

        let mut g1_var: Vec<Option<B1<E>>> = (0..model.n_vars_g1).map(|_| None).collect();
        for i in (0..model.n_vars_g1).rev() {
            g1_var[i] = Some(codec::read_b1::<E>(source)?);
        }
        let g1_var = g1_var
            .into_iter()
            .map(|w| w.expect("every G1 variable wire is read"))
            .collect();

        let mut g2_var: Vec<Option<B2<E>>> = (0..model.n_vars_g2).map(|_| None).collect();
        for i in (0..model.n_vars_g2).rev() {
            g2_var[i] = Some(codec::read_b2::<E>(source)?);
        }
        let g2_var = g2_var
            .into_iter()
            .map(|w| w.expect("every G2 variable wire is read"))
            .collect();

        let fp_const = (0..model.n_consts_fp)
            .map(|i| {
                let value = data.pub_fp[i];
                if model.side_fp_const[i] {
                    FpConstSide::Left(B1::from_fp(value, crs))
                } else {
                    FpConstSide::Right(B2::from_fp(value, crs))
                }
            })
            .collect();

        let g1_const = data.pub_g1.iter().map(|g| B1::from_g1(*g)).collect();
        let g2_const = data.pub_g2.iter().map(|h| B2::from_g2(*h)).collect();

        Ok(Self {
            fp_var,
            fp_const,
            g1_var,
            g1_const,
            g2_var,
            g2_const,
        })
    }
}

fn calc_left_fp<E: PairingEngine>(node: &FpNode<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> B1<E> {
    match node {
        FpNode::Variable(i) => match &ctx.fp_var[*i as usize] {
            FpVarWire::Left(b) => *b,
            FpVarWire::Right(_) => unreachable!("Fp variable read on its non-native side"),
        },
        FpNode::ConstIndex(i) => match &ctx.fp_const[*i as usize] {
            FpConstSide::Left(b) => *b,
            FpConstSide::Right(_) => unreachable!("Fp constant read on its non-native side"),
        },
        FpNode::ConstValue(v) => B1::from_fp(*v, crs),
        FpNode::Base => crs.u1(),
        FpNode::Pair(a, b) => calc_left_fp(a, ctx, crs) + calc_left_fp(b, ctx, crs),
        FpNode::Scalar(..) => unreachable!("normalization promotes nested Fp products"),
    }
}

fn calc_right_fp<E: PairingEngine>(node: &FpNode<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> B2<E> {
    match node {
        FpNode::Variable(i) => match &ctx.fp_var[*i as usize] {
            FpVarWire::Right(b) => *b,
            FpVarWire::Left(_) => unreachable!("Fp variable read on its non-native side"),
        },
        FpNode::ConstIndex(i) => match &ctx.fp_const[*i as usize] {
            FpConstSide::Right(b) => *b,
            FpConstSide::Left(_) => unreachable!("Fp constant read on its non-native side"),
        },
        FpNode::ConstValue(v) => B2::from_fp(*v, crs),
        FpNode::Base => crs.u2(),
        FpNode::Pair(a, b) => calc_right_fp(a, ctx, crs) + calc_right_fp(b, ctx, crs),
        FpNode::Scalar(..) => unreachable!("normalization promotes nested Fp products"),
    }
}

fn calc_left_g1<E: PairingEngine>(node: &G1Node<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> B1<E> {
    match node {
        G1Node::Variable(i) => ctx.g1_var[*i as usize],
        G1Node::ConstIndex(i) => ctx.g1_const[*i as usize],
        G1Node::ConstValue(v) => B1::from_g1(*v),
        G1Node::Base => B1::from_g1(E::G1Projective::prime_subgroup_generator()),
        G1Node::Pair(a, b) => calc_left_g1(a, ctx, crs) + calc_left_g1(b, ctx, crs),
        G1Node::Scalar(..) => unreachable!("normalization promotes nested G1 scalar addends"),
    }
}

fn calc_right_g2<E: PairingEngine>(node: &G2Node<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> B2<E> {
    match node {
        G2Node::Variable(i) => ctx.g2_var[*i as usize],
        G2Node::ConstIndex(i) => ctx.g2_const[*i as usize],
        G2Node::ConstValue(v) => B2::from_g2(*v),
        G2Node::Base => B2::from_g2(E::G2Projective::prime_subgroup_generator()),
        G2Node::Pair(a, b) => calc_right_g2(a, ctx, crs) + calc_right_g2(b, ctx, crs),
        G2Node::Scalar(..) => unreachable!("normalization promotes nested G2 scalar addends"),
    }
}

fn calc_expr_fp<E: PairingEngine>(node: &FpNode<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> BT<E> {
    match node {
        FpNode::Pair(a, b) => calc_expr_fp(a, ctx, crs).add(calc_expr_fp(b, ctx, crs)),
        FpNode::Scalar(a, b) => BT::pair(&calc_left_fp(a, ctx, crs), &calc_right_fp(b, ctx, crs)),
        _ => unreachable!("a finalized Fp equation side is Pair/Scalar only"),
    }
}

fn calc_expr_g1<E: PairingEngine>(node: &G1Node<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> BT<E> {
    match node {
        G1Node::Pair(a, b) => calc_expr_g1(a, ctx, crs).add(calc_expr_g1(b, ctx, crs)),
        G1Node::Scalar(s, g) => BT::pair(&calc_left_g1(g, ctx, crs), &calc_right_fp(s, ctx, crs)),
        _ => unreachable!("a finalized G1 equation side is Pair/Scalar only"),
    }
}

fn calc_expr_g2<E: PairingEngine>(node: &G2Node<E>, ctx: &Ctx<E>, crs: &Crs<E>) -> BT<E> {
    match node {
        G2Node::Pair(a, b) => calc_expr_g2(a, ctx, crs).add(calc_expr_g2(b, ctx, crs)),
        G2Node::Scalar(s, h) => BT::pair(&calc_left_fp(s, ctx, crs), &calc_right_g2(h, ctx, crs)),
        _ => unreachable!("a finalized G2 equation side is Pair/Scalar only"),
    }
}

fn calc_expr_gt<E: PairingEngine>(
    node: &GTNode<E>,
    ctx: &Ctx<E>,
    crs: &Crs<E>,
    data: &ProofData<E>,
) -> BT<E> {
    match node {
        GTNode::ConstIndex(i) => BT::from_gt(data.pub_gt[*i as usize]),
        GTNode::ConstValue(v) => BT::from_gt(*v),
        GTNode::Base => BT::from_gt(gt_base::<E>()),
        GTNode::Pair(a, b) => calc_expr_gt(a, ctx, crs, data).add(calc_expr_gt(b, ctx, crs, data)),
        GTNode::Pairing(a, b) => BT::pair(&calc_left_g1(a, ctx, crs), &calc_right_g2(b, ctx, crs)),
    }
}

/// `w_1`, reading the stored value or reconstructing it as `ρ_P·v_1`
/// under a `Private` CRS — algebraically the same element `write_eq_proof`'s
/// `None` branch already substitutes for it.
fn resolved_w1<E: PairingEngine>(crs: &Crs<E>) -> B1<E> {
    match crs.w1() {
        Some(w1) => w1,
        None => crs.v1() * crs.rho_p().expect("Private CRS carries rho_P"),
    }
}

/// `w_2`, the `B_2`-side counterpart of [`resolved_w1`].
fn resolved_w2<E: PairingEngine>(crs: &Crs<E>) -> B2<E> {
    match crs.w2() {
        Some(w2) => w2,
        None => crs.v2() * crs.sigma_p().expect("Private CRS carries sigma_P"),
    }
}

/// Reads the randomization term an equation's proof part contributes
/// and pairs it back down into `B_T`, per the sixteen-tag wire
/// table (`getRndProofPart`). Must read exactly the bytes
/// [`crate::proofels::write_eq_proof`] wrote for the same tag.
fn get_rnd_proof_part<E: PairingEngine>(
    source: &mut impl Read,
    tag: EqType,
    crs: &Crs<E>,
) -> Result<BT<E>, Error> {
    use EqType::*;
    let w1 = resolved_w1(crs);
    let w2 = resolved_w2(crs);
    Ok(match tag {
        Ppe => {
            let b1_1 = codec::read_b1::<E>(source)?;
            let b1_2 = codec::read_b1::<E>(source)?;
            let b2_1 = codec::read_b2::<E>(source)?;
            let b2_2 = codec::read_b2::<E>(source)?;
            BT::pair_batch(&[(b1_1, crs.v2()), (b1_2, w2), (crs.v1(), b2_1), (w1, b2_2)])
        }
        PEncG | MeH => {
            let b1_1 = codec::read_b1::<E>(source)?;
            let b1_2 = codec::read_b1::<E>(source)?;
            let b2_1 = codec::read_b2::<E>(source)?;
            BT::pair_batch(&[(b1_1, crs.v2()), (b1_2, w2), (crs.v1(), b2_1)])
        }
        PConstG => {
            let g1_1 = codec::read_g1::<E>(source)?;
            let g1_2 = codec::read_g1::<E>(source)?;
            BT::pair_batch(&[(B1::from_g1(g1_1), crs.v2()), (B1::from_g1(g1_2), w2)])
        }
        PEncH | MeG => {
            let b1_1 = codec::read_b1::<E>(source)?;
            let b2_1 = codec::read_b2::<E>(source)?;
            let b2_2 = codec::read_b2::<E>(source)?;
            BT::pair_batch(&[(b1_1, crs.v2()), (crs.v1(), b2_1), (w1, b2_2)])
        }
        PConstH => {
            let g2_1 = codec::read_g2::<E>(source)?;
            let g2_2 = codec::read_g2::<E>(source)?;
            BT::pair_batch(&[(crs.v1(), B2::from_g2(g2_1)), (w1, B2::from_g2(g2_2))])
        }
        MEncG | MEncH | Qe => {
            let b1 = codec::read_b1::<E>(source)?;
            let b2 = codec::read_b2::<E>(source)?;
            BT::pair_batch(&[(b1, crs.v2()), (crs.v1(), b2)])
        }
        MConstG => {
            let g1 = codec::read_g1::<E>(source)?;
            BT::pair(&B1::from_g1(g1), &crs.v2())
        }
        MLinG => {
            let k1 = codec::read_fp::<E>(source)?;
            let k2 = codec::read_fp::<E>(source)?;
            let b1 = crs.v1() * k1 + w1 * k2;
            BT::pair(&b1, &crs.u2())
        }
        MConstH => {
            let g2 = codec::read_g2::<E>(source)?;
            BT::pair(&crs.v1(), &B2::from_g2(g2))
        }
        MLinH => {
            let k1 = codec::read_fp::<E>(source)?;
            let k2 = codec::read_fp::<E>(source)?;
            let b2 = crs.v2() * k1 + w2 * k2;
            BT::pair(&crs.u1(), &b2)
        }
        QConstG => {
            let k = codec::read_fp::<E>(source)?;
            BT::pair(&(crs.u1() * k), &crs.v2())
        }
        QConstH => {
            let k = codec::read_fp::<E>(source)?;
            BT::pair(&(crs.v1() * k), &crs.u2())
        }
    })
}

/// Checks that the public data in `data` matches `model`'s finalized
/// constant counts. Unlike [`ProofModel::check_instantiation`], this
/// does not require witness vectors at all — a verifier never sees them.
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

/// Checks a proof written by [`crate::prove::write_proof`] (or simulated
/// by [`crate::simulate::simulate_proof`]) against `model` under `crs`
/// (`NIZKProof::check_proof`). `data` carries only the
/// public constants; witnesses are never disclosed to the verifier.
pub fn check_proof<E: PairingEngine>(
    model: &ProofModel<E>,
    crs: &Crs<E>,
    data: &ProofData<E>,
    source: &mut impl Read,
) -> Result<bool, Error> {
    if !model.is_finalized() {
        return Err(Error::NotFinalized);
    }
    check_public_instantiation(model, data)?;

    let ctx = Ctx::read(model, crs, data, source)?;

    for i in (0..model.eqs_fp.len()).rev() {
        let (l, r) = &model.eqs_fp[i];
        let rnd = get_rnd_proof_part::<E>(source, model.ty_fp[i], crs)?;
        if calc_expr_fp(l, &ctx, crs) != calc_expr_fp(r, &ctx, crs).add(rnd) {
            return Ok(false);
        }
    }
    for i in (0..model.eqs_g1.len()).rev() {
        let (l, r) = &model.eqs_g1[i];
        let rnd = get_rnd_proof_part::<E>(source, model.ty_g1[i], crs)?;
        if calc_expr_g1(l, &ctx, crs) != calc_expr_g1(r, &ctx, crs).add(rnd) {
            return Ok(false);
        }
    }
    for i in (0..model.eqs_g2.len()).rev() {
        let (l, r) = &model.eqs_g2[i];
        let rnd = get_rnd_proof_part::<E>(source, model.ty_g2[i], crs)?;
        if calc_expr_g2(l, &ctx, crs) != calc_expr_g2(r, &ctx, crs).add(rnd) {
            return Ok(false);
        }
    }
    for i in (0..model.eqs_gt.len()).rev() {
        let (l, r) = &model.eqs_gt[i];
        let rnd = get_rnd_proof_part::<E>(source, model.ty_gt[i], crs)?;
        if calc_expr_gt(l, &ctx, crs, data) != calc_expr_gt(r, &ctx, crs, data).add(rnd) {
            return Ok(false);
        }
    }

    Ok(true)
}
