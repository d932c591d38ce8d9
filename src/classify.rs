// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! The 16-tag equation classifier: walks each equation's two
//! sides to collect the set of "element types" participating in it (base,
//! public, encrypted, committed, on each of the G1/G2 sides, plus the
//! scalar/unit split on the F_p sides), then applies a small deterministic
//! decision table to pick one of sixteen [`EqType`] tags. The tag fixes how
//! many `B_1`/`B_2` elements the equation's proof part occupies on the wire
//! and which randomization [`crate::prove`] and [`crate::simulate`] apply.

use crate::expr::{FpNode, G1Node, G2Node, GTNode};
use crate::model::EncryptionPlan;
use ark_ec::PairingEngine;
use std::collections::HashSet;

/// One of the sixteen equation-proof-type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EqType {
    /// Generic `GT` equation: 2 `B_1` + 2 `B_2` on the wire.
    Ppe = 0,
    /// `GT` equation, one side fully encrypted G1-side: 2 `B_1` + 1 `B_2`.
    PEncG = 1,
    /// `GT` equation with only public/base elements on the G1 side: 2 G1.
    PConstG = 2,
    /// `GT` equation, one side fully encrypted G2-side: 1 `B_1` + 2 `B_2`.
    PEncH = 3,
    /// `GT` equation with only public/base elements on the G2 side: 2 G2.
    PConstH = 4,
    /// Linear G1 equation with a committed variable: 1 `B_1` + 1 `B_2`.
    MeG = 5,
    /// Linear G1 equation, fully encrypted: 1 `B_1` + 1 `B_2`.
    MEncG = 6,
    /// G1 equation with only constants on the right: 1 G1.
    MConstG = 7,
    /// G1 equation that is purely F_p-linear: 2 F_p.
    MLinG = 8,
    /// Linear G2 equation with a committed variable: 1 `B_1` + 1 `B_2`.
    MeH = 9,
    /// Linear G2 equation, fully encrypted: 1 `B_1` + 1 `B_2`.
    MEncH = 10,
    /// G2 equation with only constants on the right: 1 G2.
    MConstH = 11,
    /// G2 equation that is purely F_p-linear: 2 F_p.
    MLinH = 12,
    /// Generic F_p (quadratic) equation: 1 `B_1` + 1 `B_2`.
    Qe = 13,
    /// F_p equation with no left-side (B_1) scalar: 1 F_p.
    QConstG = 14,
    /// F_p equation with no right-side (B_2) scalar: 1 F_p.
    QConstH = 15,
}

/// The element types an expression's participation can be tagged with, per
/// The cross product of element-site tags (matches the C++ `EL_TYPE_PT` enum).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElType {
    /// The distinguished base element in G1.
    BaseG,
    /// A public constant in G1.
    PubG,
    /// An encrypted (no-`w`) committed G1 witness.
    EncG,
    /// A non-encrypted committed G1 witness.
    ComG,
    /// The distinguished base element in G2.
    BaseH,
    /// A public constant in G2.
    PubH,
    /// An encrypted (no-`w`) committed G2 witness.
    EncH,
    /// A non-encrypted committed G2 witness.
    ComH,
    /// An F_p unit (base/constant) on the B_1 side of a scalar context.
    UnitG,
    /// An F_p scalar witness on the B_1 side of a scalar context.
    ScaG,
    /// An F_p unit (base/constant) on the B_2 side of a scalar context.
    UnitH,
    /// An F_p scalar witness on the B_2 side of a scalar context.
    ScaH,
}

type TypePair = (HashSet<ElType>, HashSet<ElType>);

fn union(mut result: TypePair, other: TypePair) -> TypePair {
    result.0.extend(other.0);
    result.1.extend(other.1);
    result
}

fn fp_pt(node: &FpNode<impl PairingEngine>) -> TypePair {
    match node {
        FpNode::ConstValue(_) | FpNode::Base | FpNode::ConstIndex(_) => {
            (HashSet::from([ElType::UnitG]), HashSet::from([ElType::UnitH]))
        }
        FpNode::Pair(a, b) => union(fp_pt(a), fp_pt(b)),
        FpNode::Scalar(a, b) => (fp_pt_left(a), fp_pt_right(b)),
        FpNode::Variable(_) => unreachable!("bare Fp variable has no standalone p-type"),
    }
}

fn fp_pt_left(node: &FpNode<impl PairingEngine>) -> HashSet<ElType> {
    match node {
        FpNode::Variable(_) => HashSet::from([ElType::ScaG]),
        FpNode::ConstIndex(_) | FpNode::ConstValue(_) | FpNode::Base => {
            HashSet::from([ElType::UnitG])
        }
        FpNode::Pair(a, b) => {
            let mut result = fp_pt_left(a);
            result.extend(fp_pt_left(b));
            result
        }
        FpNode::Scalar(..) => unreachable!("normalization promotes nested Fp products"),
    }
}

fn fp_pt_right(node: &FpNode<impl PairingEngine>) -> HashSet<ElType> {
    match node {
        FpNode::Variable(_) => HashSet::from([ElType::ScaH]),
        FpNode::ConstIndex(_) | FpNode::ConstValue(_) | FpNode::Base => {
            HashSet::from([ElType::UnitH])
        }
        FpNode::Pair(a, b) => {
            let mut result = fp_pt_right(a);
            result.extend(fp_pt_right(b));
            result
        }
        FpNode::Scalar(..) => unreachable!("normalization promotes nested Fp products"),
    }
}

fn g1_pt<E: PairingEngine>(node: &G1Node<E>, enc: &EncryptionPlan) -> TypePair {
    match node {
        G1Node::ConstIndex(_) | G1Node::ConstValue(_) => {
            (HashSet::from([ElType::PubG]), HashSet::from([ElType::UnitH]))
        }
        G1Node::Base => (HashSet::from([ElType::BaseG]), HashSet::from([ElType::UnitH])),
        G1Node::Pair(a, b) => union(g1_pt(a, enc), g1_pt(b, enc)),
        G1Node::Scalar(s, g) => (g1_pt_left(g, enc), fp_pt_right(s)),
        G1Node::Variable(_) => unreachable!("bare G1 variable has no standalone p-type"),
    }
}

fn g1_pt_left(node: &G1Node<impl PairingEngine>, enc: &EncryptionPlan) -> HashSet<ElType> {
    match node {
        G1Node::Variable(i) => {
            if enc.g1_encrypted(*i) {
                HashSet::from([ElType::EncG])
            } else {
                HashSet::from([ElType::ComG])
            }
        }
        G1Node::ConstIndex(_) | G1Node::ConstValue(_) => HashSet::from([ElType::PubG]),
        G1Node::Base => HashSet::from([ElType::BaseG]),
        G1Node::Pair(a, b) => {
            let mut result = g1_pt_left(a, enc);
            result.extend(g1_pt_left(b, enc));
            result
        }
        G1Node::Scalar(..) => unreachable!("normalization promotes nested G1 scalar addends"),
    }
}

fn g2_pt<E: PairingEngine>(node: &G2Node<E>, enc: &EncryptionPlan) -> TypePair {
    match node {
        G2Node::ConstIndex(_) | G2Node::ConstValue(_) => {
            (HashSet::from([ElType::UnitG]), HashSet::from([ElType::PubH]))
        }
        G2Node::Base => (HashSet::from([ElType::UnitG]), HashSet::from([ElType::BaseH])),
        G2Node::Pair(a, b) => union(g2_pt(a, enc), g2_pt(b, enc)),
        G2Node::Scalar(s, h) => (fp_pt_left(s), g2_pt_right(h, enc)),
        G2Node::Variable(_) => unreachable!("bare G2 variable has no standalone p-type"),
    }
}

fn g2_pt_right(node: &G2Node<impl PairingEngine>, enc: &EncryptionPlan) -> HashSet<ElType> {
    match node {
        G2Node::Variable(i) => {
            if enc.g2_encrypted(*i) {
                HashSet::from([ElType::EncH])
            } else {
                HashSet::from([ElType::ComH])
            }
        }
        G2Node::ConstIndex(_) | G2Node::ConstValue(_) => HashSet::from([ElType::PubH]),
        G2Node::Base => HashSet::from([ElType::BaseH]),
        G2Node::Pair(a, b) => {
            let mut result = g2_pt_right(a, enc);
            result.extend(g2_pt_right(b, enc));
            result
        }
        G2Node::Scalar(..) => unreachable!("normalization promotes nested G2 scalar addends"),
    }
}

fn gt_pt<E: PairingEngine>(node: &GTNode<E>, enc: &EncryptionPlan) -> TypePair {
    match node {
        GTNode::ConstIndex(_) | GTNode::ConstValue(_) => {
            (HashSet::from([ElType::PubG]), HashSet::from([ElType::PubH]))
        }
        GTNode::Base => (HashSet::from([ElType::BaseG]), HashSet::from([ElType::BaseH])),
        GTNode::Pair(a, b) => union(gt_pt(a, enc), gt_pt(b, enc)),
        GTNode::Pairing(a, b) => (g1_pt_left(a, enc), g2_pt_right(b, enc)),
    }
}

/// Classifies an F_p equation, matching `getEqProofTypes`'s `tFp` branch.
pub fn classify_fp<E: PairingEngine>(lhs: &FpNode<E>, rhs: &FpNode<E>) -> EqType {
    let result = union(fp_pt(lhs), fp_pt(rhs));
    if !result.0.contains(&ElType::ScaG) {
        EqType::QConstG
    } else if !result.1.contains(&ElType::ScaH) {
        EqType::QConstH
    } else {
        EqType::Qe
    }
}

/// Classifies a G1 equation, matching `getEqProofTypes`'s `tG1` branch.
pub fn classify_g1<E: PairingEngine>(lhs: &G1Node<E>, rhs: &G1Node<E>, enc: &EncryptionPlan) -> EqType {
    let result = union(g1_pt(lhs, enc), g1_pt(rhs, enc));
    if result.1.contains(&ElType::ScaH) || result.0.contains(&ElType::PubG) {
        if result.0.contains(&ElType::ComG) {
            EqType::MeG
        } else if result.0.contains(&ElType::EncG) {
            EqType::MEncG
        } else {
            EqType::MConstG
        }
    } else if result.0.contains(&ElType::EncG) {
        EqType::MEncG
    } else {
        EqType::MLinG
    }
}

/// Classifies a G2 equation, matching `getEqProofTypes`'s `tG2` branch.
pub fn classify_g2<E: PairingEngine>(lhs: &G2Node<E>, rhs: &G2Node<E>, enc: &EncryptionPlan) -> EqType {
    let result = union(g2_pt(lhs, enc), g2_pt(rhs, enc));
    if result.0.contains(&ElType::ScaG) || result.1.contains(&ElType::PubH) {
        if result.1.contains(&ElType::ComH) {
            EqType::MeH
        } else if result.1.contains(&ElType::EncH) {
            EqType::MEncH
        } else {
            EqType::MConstH
        }
    } else if result.1.contains(&ElType::EncH) {
        EqType::MEncH
    } else {
        EqType::MLinH
    }
}

/// Classifies a GT equation, matching `getEqProofTypes`'s `tGT` branch.
pub fn classify_gt<E: PairingEngine>(lhs: &GTNode<E>, rhs: &GTNode<E>, enc: &EncryptionPlan) -> EqType {
    let result = union(gt_pt(lhs, enc), gt_pt(rhs, enc));
    let pub_l = result.0.contains(&ElType::PubG) || result.1.contains(&ElType::ComH);
    let pub_r = result.1.contains(&ElType::PubH) || result.0.contains(&ElType::ComG);
    if pub_l && pub_r {
        EqType::Ppe
    } else if pub_l {
        if result.1.contains(&ElType::EncH) {
            EqType::Ppe
        } else if result.0.contains(&ElType::EncG) {
            EqType::PEncG
        } else {
            EqType::PConstG
        }
    } else if pub_r {
        if result.0.contains(&ElType::EncG) {
            EqType::Ppe
        } else if result.1.contains(&ElType::EncH) {
            EqType::PEncH
        } else {
            EqType::PConstH
        }
    } else if result.0.contains(&ElType::EncG) {
        if result.1.contains(&ElType::EncH) {
            EqType::Ppe
        } else {
            EqType::PEncG
        }
    } else if result.1.contains(&ElType::EncH) {
        EqType::PEncH
    } else {
        EqType::PConstG
    }
}
