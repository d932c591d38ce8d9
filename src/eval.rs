// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! Plaintext evaluation of the expression DAG against a [`ProofData`]
//! instantiation: used by [`crate::model`]'s
//! `verify_solution` and, internally, to materialize the auxiliary
//! witnesses normalization introduces before a `ProofData` reaches any
//! function that checks it against the finalized variable/constant
//! counts.

use crate::expr::{FpNode, G1Node, G2Node, GTNode};
use crate::model::{ProofData, ProofModel};
use crate::{gt_base, Fp, G1, G2, GT};
use ark_ec::{PairingEngine, ProjectiveCurve};
use ark_ff::{Field, One};

/// Evaluates a F_p node.
pub fn eval_fp<E: PairingEngine>(node: &FpNode<E>, data: &ProofData<E>) -> Fp<E> {
    match node {
        FpNode::Variable(i) => data.priv_fp[*i as usize],
        FpNode::ConstIndex(i) => data.pub_fp[*i as usize],
        FpNode::ConstValue(v) => *v,
        FpNode::Base => Fp::<E>::one(),
        FpNode::Pair(a, b) => eval_fp(a, data) + eval_fp(b, data),
        FpNode::Scalar(a, b) => eval_fp(a, data) * eval_fp(b, data),
    }
}

/// Evaluates a G1 node.
pub fn eval_g1<E: PairingEngine>(node: &G1Node<E>, data: &ProofData<E>) -> G1<E> {
    match node {
        G1Node::Variable(i) => data.priv_g1[*i as usize],
        G1Node::ConstIndex(i) => data.pub_g1[*i as usize],
        G1Node::ConstValue(v) => *v,
        G1Node::Base => E::G1Projective::prime_subgroup_generator(),
        G1Node::Pair(a, b) => eval_g1(a, data) + eval_g1(b, data),
        G1Node::Scalar(s, g) => eval_g1(g, data) * eval_fp(s, data),
    }
}

/// Evaluates a G2 node.
pub fn eval_g2<E: PairingEngine>(node: &G2Node<E>, data: &ProofData<E>) -> G2<E> {
    match node {
        G2Node::Variable(i) => data.priv_g2[*i as usize],
        G2Node::ConstIndex(i) => data.pub_g2[*i as usize],
        G2Node::ConstValue(v) => *v,
        G2Node::Base => E::G2Projective::prime_subgroup_generator(),
        G2Node::Pair(a, b) => eval_g2(a, data) + eval_g2(b, data),
        G2Node::Scalar(s, h) => eval_g2(h, data) * eval_fp(s, data),
    }
}

/// Evaluates a GT node.
pub fn eval_gt<E: PairingEngine>(node: &GTNode<E>, data: &ProofData<E>) -> GT<E> {
    match node {
        GTNode::ConstIndex(i) => data.pub_gt[*i as usize],
        GTNode::ConstValue(v) => *v,
        GTNode::Base => gt_base::<E>(),
        GTNode::Pair(a, b) => eval_gt(a, data) * eval_gt(b, data),
        GTNode::Pairing(a, b) => E::pairing(eval_g1(a, data), eval_g2(b, data)),
    }
}

/// Extends caller-supplied witness data — sized to the model's *original*
/// (pre-promotion) variable counts — with the auxiliary F_p/G1/G2
/// witnesses normalization introduced, evaluating each in declaration
/// order against `data` so that the result's vectors match the finalized
/// model's dense counts exactly, as [`ProofModel::check_instantiation`]
/// requires.
pub(crate) fn extend_data<E: PairingEngine>(
    model: &ProofModel<E>,
    mut data: ProofData<E>,
) -> ProofData<E> {
    for node in &model.additional_fp {
        let value = eval_fp(node, &data);
        data.priv_fp.push(value);
    }
    for node in &model.additional_g1 {
        let value = eval_g1(node, &data);
        data.priv_g1.push(value);
    }
    for node in &model.additional_g2 {
        let value = eval_g2(node, &data);
        data.priv_g2.push(value);
    }
    data
}

/// Checks that `data` — already extended with auxiliary witnesses —
/// satisfies every equation in the finalized model (matches the C++
/// `verifySolution`).
pub(crate) fn check_all_equations<E: PairingEngine>(
    model: &ProofModel<E>,
    data: &ProofData<E>,
) -> bool {
    model
        .eqs_fp
        .iter()
        .all(|(l, r)| eval_fp(l, data) == eval_fp(r, data))
        && model
            .eqs_g1
            .iter()
            .all(|(l, r)| eval_g1(l, data) == eval_g1(r, data))
        && model
            .eqs_g2
            .iter()
            .all(|(l, r)| eval_g2(l, data) == eval_g2(r, data))
        && model
            .eqs_gt
            .iter()
            .all(|(l, r)| eval_gt(l, data) == eval_gt(r, data))
}
