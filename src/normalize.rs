// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! Collects dense variable/constant indices,
//! assigns each F_p variable/constant to the B_1 or B_2 side, promotes
//! nested products to auxiliary witnesses so every equation reduces to
//! the shapes the prover/verifier/simulator know how to walk, checks
//! whether the system is already zero-knowledge, and — when it isn't and
//! [`CommitType::SelectedEncryption`] was requested — solves for the
//! cheapest per-variable encrypted/committed split that makes it so.
//!
//! `Arc<Node>` subexpressions are immutable, so the C++ original's trick
//! of stashing a scratch value on the node itself becomes explicit
//! side-tables here: one keyed by dense variable/constant index (for F_p
//! side assignment, since all occurrences of a given index carry the
//! same side) and one keyed by `Arc` pointer identity (for promoting a
//! shared nested product subtree to a witness exactly once).

use crate::classify::{self, EqType};
use crate::error::Error;
use crate::expr::{FpNode, G1Node, G2Node, GTNode};
use crate::model::{CommitType, ProofModel};
use ark_ec::PairingEngine;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub(crate) fn run<E: PairingEngine>(model: &mut ProofModel<E>) -> Result<(), Error> {
    collect_indices(model)?;

    let mut st = NormState {
        side_fp_var: vec![None; model.n_vars_fp],
        side_fp_const: vec![None; model.n_consts_fp],
        aux_fp: vec![None; model.n_vars_fp],
        scalar_scratch_fp: HashMap::new(),
        scalar_scratch_g1: HashMap::new(),
        scalar_scratch_g2: HashMap::new(),
    };

    select_sides(model, &mut st)?;

    // A variable/constant index that never occurs (impossible for a
    // variable once collected from a well-formed system, but constants
    // may legitimately be declared and never referenced by an Fp-typed
    // leaf) keeps an arbitrary side; nothing ever reads it.
    model.side_fp_var = st.side_fp_var.iter().map(|s| s.unwrap_or(true)).collect();
    model.side_fp_const = st
        .side_fp_const
        .iter()
        .map(|s| s.unwrap_or(true))
        .collect();

    model.zk = is_zero_knowledge(model);

    if model.commit_type == CommitType::SelectedEncryption && !model.zk {
        solve_selected_encryption(model);
    } else {
        model.enc.enc_g1 = vec![model.commit_type == CommitType::AllEncrypted; model.n_vars_g1];
        model.enc.enc_g2 = vec![model.commit_type == CommitType::AllEncrypted; model.n_vars_g2];
    }
    model.enc.commit_type = model.commit_type;

    classify_all(model);
    Ok(())
}

/// Per-finalize scratch: side assignment and promotion memoization.
struct NormState {
    side_fp_var: Vec<Option<bool>>,
    side_fp_const: Vec<Option<bool>>,
    /// Per original F_p variable index: the auxiliary variable index
    /// standing in for it when it is forced onto its non-native side.
    aux_fp: Vec<Option<u16>>,
    /// Keyed by `Arc::as_ptr(node) as usize`: the auxiliary F_p variable
    /// a shared nested product subtree has been promoted to.
    scalar_scratch_fp: HashMap<usize, u16>,
    scalar_scratch_g1: HashMap<usize, u16>,
    scalar_scratch_g2: HashMap<usize, u16>,
}

// ---------------------------------------------------------------------
// Step 1: dense index collection.
// ---------------------------------------------------------------------

#[derive(Default)]
struct Seen {
    var: HashSet<u16>,
    cst: HashSet<u16>,
}

fn dense_count(seen: &HashSet<u16>, group: &'static str) -> Result<usize, Error> {
    if seen.is_empty() {
        return Ok(0);
    }
    let max = *seen.iter().max().unwrap();
    for i in 0..=max {
        if !seen.contains(&i) {
            return Err(Error::IndexGap {
                group,
                index: i as usize,
            });
        }
    }
    Ok(max as usize + 1)
}

fn scan_fp<E: PairingEngine>(node: &FpNode<E>, seen: &mut Seen) {
    match node {
        FpNode::Variable(i) => {
            seen.var.insert(*i);
        }
        FpNode::ConstIndex(i) => {
            seen.cst.insert(*i);
        }
        FpNode::ConstValue(_) | FpNode::Base => {}
        FpNode::Pair(a, b) | FpNode::Scalar(a, b) => {
            scan_fp(a, seen);
            scan_fp(b, seen);
        }
    }
}

fn scan_g1<E: PairingEngine>(node: &G1Node<E>, seen: &mut Seen, fp_seen: &mut Seen) {
    match node {
        G1Node::Variable(i) => {
            seen.var.insert(*i);
        }
        G1Node::ConstIndex(i) => {
            seen.cst.insert(*i);
        }
        G1Node::ConstValue(_) | G1Node::Base => {}
        G1Node::Pair(a, b) => {
            scan_g1(a, seen, fp_seen);
            scan_g1(b, seen, fp_seen);
        }
        G1Node::Scalar(s, g) => {
            scan_fp(s, fp_seen);
            scan_g1(g, seen, fp_seen);
        }
    }
}

fn scan_g2<E: PairingEngine>(node: &G2Node<E>, seen: &mut Seen, fp_seen: &mut Seen) {
    match node {
        G2Node::Variable(i) => {
            seen.var.insert(*i);
        }
        G2Node::ConstIndex(i) => {
            seen.cst.insert(*i);
        }
        G2Node::ConstValue(_) | G2Node::Base => {}
        G2Node::Pair(a, b) => {
            scan_g2(a, seen, fp_seen);
            scan_g2(b, seen, fp_seen);
        }
        G2Node::Scalar(s, h) => {
            scan_fp(s, fp_seen);
            scan_g2(h, seen, fp_seen);
        }
    }
}

fn scan_gt<E: PairingEngine>(
    node: &GTNode<E>,
    seen: &mut Seen,
    g1_seen: &mut Seen,
    g2_seen: &mut Seen,
    fp_seen: &mut Seen,
) {
    match node {
        GTNode::ConstIndex(i) => {
            seen.cst.insert(*i);
        }
        GTNode::ConstValue(_) | GTNode::Base => {}
        GTNode::Pair(a, b) => {
            scan_gt(a, seen, g1_seen, g2_seen, fp_seen);
            scan_gt(b, seen, g1_seen, g2_seen, fp_seen);
        }
        GTNode::Pairing(a, b) => {
            scan_g1(a, g1_seen, fp_seen);
            scan_g2(b, g2_seen, fp_seen);
        }
    }
}

fn collect_indices<E: PairingEngine>(model: &mut ProofModel<E>) -> Result<(), Error> {
    let mut fp = Seen::default();
    let mut g1 = Seen::default();
    let mut g2 = Seen::default();
    let mut gt = Seen::default();

    for (l, r) in &model.eqs_fp {
        scan_fp(l, &mut fp);
        scan_fp(r, &mut fp);
    }
    for (l, r) in &model.eqs_g1 {
        scan_g1(l, &mut g1, &mut fp);
        scan_g1(r, &mut g1, &mut fp);
    }
    for (l, r) in &model.eqs_g2 {
        scan_g2(l, &mut g2, &mut fp);
        scan_g2(r, &mut g2, &mut fp);
    }
    for (l, r) in &model.eqs_gt {
        scan_gt(l, &mut gt, &mut g1, &mut g2, &mut fp);
        scan_gt(r, &mut gt, &mut g1, &mut g2, &mut fp);
    }

    let n_vars_fp = dense_count(&fp.var, "Fp variables")?;
    let n_consts_fp = dense_count(&fp.cst, "Fp constants")?;
    let n_vars_g1 = dense_count(&g1.var, "G1 variables")?;
    let n_consts_g1 = dense_count(&g1.cst, "G1 constants")?;
    let n_vars_g2 = dense_count(&g2.var, "G2 variables")?;
    let n_consts_g2 = dense_count(&g2.cst, "G2 constants")?;
    let n_consts_gt = dense_count(&gt.cst, "GT constants")?;

    model.n_vars_fp = n_vars_fp;
    model.n_consts_fp = n_consts_fp;
    model.n_vars_g1 = n_vars_g1;
    model.n_consts_g1 = n_consts_g1;
    model.n_vars_g2 = n_vars_g2;
    model.n_consts_g2 = n_consts_g2;
    model.n_consts_gt = n_consts_gt;
    Ok(())
}

// ---------------------------------------------------------------------
// Step 2: side selection and auxiliary witness promotion.
// ---------------------------------------------------------------------

/// `true` selects the B_1 side, `false` the B_2 side.
type Side = bool;

fn checkout_fp_leaf<E: PairingEngine>(
    node: &Arc<FpNode<E>>,
    side: Side,
    model: &mut ProofModel<E>,
    st: &mut NormState,
) -> Result<Arc<FpNode<E>>, Error> {
    match node.as_ref() {
        FpNode::Variable(i) => {
            let i = *i as usize;
            match st.side_fp_var[i] {
                None => {
                    st.side_fp_var[i] = Some(side);
                    Ok(node.clone())
                }
                Some(s) if s == side => Ok(node.clone()),
                Some(_) => {
                    if let Some(aux) = st.aux_fp[i] {
                        Ok(Arc::new(FpNode::Variable(aux)))
                    } else {
                        let new_idx = model.n_vars_fp as u16;
                        model.n_vars_fp += 1;
                        st.side_fp_var.push(Some(side));
                        st.aux_fp.push(None);
                        st.aux_fp[i] = Some(new_idx);
                        model.eqs_fp.push((
                            node.clone(),
                            Arc::new(FpNode::Variable(new_idx)),
                        ));
                        model.additional_fp.push(node.clone());
                        Ok(Arc::new(FpNode::Variable(new_idx)))
                    }
                }
            }
        }
        FpNode::ConstIndex(i) => {
            let idx = *i as usize;
            match st.side_fp_const[idx] {
                None => {
                    st.side_fp_const[idx] = Some(side);
                    Ok(node.clone())
                }
                Some(s) if s == side => Ok(node.clone()),
                Some(_) => Err(Error::SideConflict(idx)),
            }
        }
        FpNode::ConstValue(_) | FpNode::Base => Ok(node.clone()),
        FpNode::Pair(a, b) => Ok(Arc::new(FpNode::Pair(
            checkout_fp_leaf(a, side, model, st)?,
            checkout_fp_leaf(b, side, model, st)?,
        ))),
        FpNode::Scalar(_, _) => {
            let key = Arc::as_ptr(node) as usize;
            if let Some(&idx) = st.scalar_scratch_fp.get(&key) {
                Ok(Arc::new(FpNode::Variable(idx)))
            } else {
                let new_idx = model.n_vars_fp as u16;
                model.n_vars_fp += 1;
                st.side_fp_var.push(Some(side));
                st.aux_fp.push(None);
                st.scalar_scratch_fp.insert(key, new_idx);
                model.eqs_fp.push((
                    node.clone(),
                    Arc::new(FpNode::Variable(new_idx)),
                ));
                model.additional_fp.push(node.clone());
                Ok(Arc::new(FpNode::Variable(new_idx)))
            }
        }
    }
}

fn checkout_left_fp<E: PairingEngine>(
    node: &Arc<FpNode<E>>,
    model: &mut ProofModel<E>,
    st: &mut NormState,
) -> Result<Arc<FpNode<E>>, Error> {
    checkout_fp_leaf(node, true, model, st)
}

fn checkout_right_fp<E: PairingEngine>(
    node: &Arc<FpNode<E>>,
    model: &mut ProofModel<E>,
    st: &mut NormState,
) -> Result<Arc<FpNode<E>>, Error> {
    checkout_fp_leaf(node, false, model, st)
}

fn checkout_as_fp<E: PairingEngine>(
    node: &Arc<FpNode<E>>,
    model: &mut ProofModel<E>,
    st: &mut NormState,
) -> Result<Arc<FpNode<E>>, Error> {
    match node.as_ref() {
        FpNode::ConstValue(_) | FpNode::Base => Ok(node.clone()),
        FpNode::Pair(a, b) => Ok(Arc::new(FpNode::Pair(
            checkout_as_fp(a, model, st)?,
            checkout_as_fp(b, model, st)?,
        ))),
        FpNode::Scalar(a, b) => Ok(Arc::new(FpNode::Scalar(
            checkout_left_fp(a, model, st)?,
            checkout_right_fp(b, model, st)?,
        ))),
        // A bare variable/constant used directly as a whole equation side
        // carries no side information of its own. Wrap it as `x · 1` so
        // it reaches the classifier and prover in the same SCALAR shape
        // every other Fp equation side has, defaulting `x` to the B_1
        // side.
        FpNode::Variable(_) | FpNode::ConstIndex(_) => Ok(Arc::new(FpNode::Scalar(
            checkout_left_fp(node, model, st)?,
            Arc::new(FpNode::Base),
        ))),
    }
}

fn checkout_left_g1<E: PairingEngine>(
    node: &Arc<G1Node<E>>,
    model: &mut ProofModel<E>,
    st: &mut NormState,
) -> Result<Arc<G1Node<E>>, Error> {
    match node.as_ref() {
        G1Node::Variable(_) | G1Node::ConstIndex(_) | G1Node::ConstValue(_) | G1Node::Base => {
            Ok(node.clone())
        }
        G1Node::Pair(a, b) => Ok(Arc::new(G1Node::Pair(
            checkout_left_g1(a, model, st)?,
            checkout_left_g1(b, model, st)?,
        ))),
        G1Node::Scalar(_, _) => {
            let key = Arc::as_ptr(node) as usize;
            if let Some(&idx) = st.scalar_scratch_g1.get(&key) {
                Ok(Arc::new(G1Node::Variable(idx)))
            } else {
                let new_idx = model.n_vars_g1 as u16;
                model.n_vars_g1 += 1;
                st.scalar_scratch_g1.insert(key, new_idx);
                model.eqs_g1.push((
                    node.clone(),
                    Arc::new(G1Node::Variable(new_idx)),
                ));
                model.additional_g1.push(node.clone());
                Ok(Arc::new(G1Node::Variable(new_idx)))
            }
        }
    }
}

fn checkout_right_g2<E: PairingEngine>(
    node: &Arc<G2Node<E>>,
    model: &mut ProofModel<E>,
    st: &mut NormState,
) -> Result<Arc<G2Node<E>>, Error> {
    match node.as_ref() {
        G2Node::Variable(_) | G2Node::ConstIndex(_) | G2Node::ConstValue(_) | G2Node::Base => {
            Ok(node.clone())
        }
        G2Node::Pair(a, b) => Ok(Arc::new(G2Node::Pair(
            checkout_right_g2(a, model, st)?,
            checkout_right_g2(b, model, st)?,
        ))),
        G2Node::Scalar(_, _) => {
            let key = Arc::as_ptr(node) as usize;
            if let Some(&idx) = st.scalar_scratch_g2.get(&key) {
                Ok(Arc::new(G2Node::Variable(idx)))
            } else {
                let new_idx = model.n_vars_g2 as u16;
                model.n_vars_g2 += 1;
                st.scalar_scratch_g2.insert(key, new_idx);
                model.eqs_g2.push((
                    node.clone(),
                    Arc::new(G2Node::Variable(new_idx)),
                ));
                model.additional_g2.push(node.clone());
                Ok(Arc::new(G2Node::Variable(new_idx)))
            }
        }
    }
}

fn checkout_as_g1<E: PairingEngine>(
    node: &Arc<G1Node<E>>,
    model: &mut ProofModel<E>,
    st: &mut NormState,
) -> Result<Arc<G1Node<E>>, Error> {
    match node.as_ref() {
        // A bare committed variable has no standalone classification
        // shape; wrap it as `1 · x` so the classifier sees the same
        // SCALAR shape any other witness-bearing G1 term has.
        G1Node::Variable(_) => Ok(Arc::new(G1Node::Scalar(
            Arc::new(FpNode::Base),
            node.clone(),
        ))),
        G1Node::ConstIndex(_) | G1Node::ConstValue(_) | G1Node::Base => Ok(node.clone()),
        G1Node::Pair(a, b) => Ok(Arc::new(G1Node::Pair(
            checkout_as_g1(a, model, st)?,
            checkout_as_g1(b, model, st)?,
        ))),
        G1Node::Scalar(s, g) => Ok(Arc::new(G1Node::Scalar(
            checkout_right_fp(s, model, st)?,
            checkout_left_g1(g, model, st)?,
        ))),
    }
}

fn checkout_as_g2<E: PairingEngine>(
    node: &Arc<G2Node<E>>,
    model: &mut ProofModel<E>,
    st: &mut NormState,
) -> Result<Arc<G2Node<E>>, Error> {
    match node.as_ref() {
        G2Node::Variable(_) => Ok(Arc::new(G2Node::Scalar(
            Arc::new(FpNode::Base),
            node.clone(),
        ))),
        G2Node::ConstIndex(_) | G2Node::ConstValue(_) | G2Node::Base => Ok(node.clone()),
        G2Node::Pair(a, b) => Ok(Arc::new(G2Node::Pair(
            checkout_as_g2(a, model, st)?,
            checkout_as_g2(b, model, st)?,
        ))),
        G2Node::Scalar(s, h) => Ok(Arc::new(G2Node::Scalar(
            checkout_left_fp(s, model, st)?,
            checkout_right_g2(h, model, st)?,
        ))),
    }
}

fn checkout_as_gt<E: PairingEngine>(
    node: &Arc<GTNode<E>>,
    model: &mut ProofModel<E>,
    st: &mut NormState,
) -> Result<Arc<GTNode<E>>, Error> {
    match node.as_ref() {
        GTNode::ConstIndex(_) | GTNode::ConstValue(_) | GTNode::Base => Ok(node.clone()),
        GTNode::Pair(a, b) => Ok(Arc::new(GTNode::Pair(
            checkout_as_gt(a, model, st)?,
            checkout_as_gt(b, model, st)?,
        ))),
        GTNode::Pairing(a, b) => Ok(Arc::new(GTNode::Pairing(
            checkout_left_g1(a, model, st)?,
            checkout_right_g2(b, model, st)?,
        ))),
    }
}

fn select_sides<E: PairingEngine>(
    model: &mut ProofModel<E>,
    st: &mut NormState,
) -> Result<(), Error> {
    // A growing work queue per group: promotion in one group can append
    // fresh equations to any other group, so keep sweeping all four
    // until a full pass makes no further progress.
    let (mut i_fp, mut i_g1, mut i_g2, mut i_gt) = (0, 0, 0, 0);
    loop {
        let mut progressed = false;

        while i_fp < model.eqs_fp.len() {
            let (l, r) = model.eqs_fp[i_fp].clone();
            let l2 = checkout_as_fp(&l, model, st)?;
            let r2 = checkout_as_fp(&r, model, st)?;
            model.eqs_fp[i_fp] = (l2, r2);
            i_fp += 1;
            progressed = true;
        }
        while i_g1 < model.eqs_g1.len() {
            let (l, r) = model.eqs_g1[i_g1].clone();
            let l2 = checkout_as_g1(&l, model, st)?;
            let r2 = checkout_as_g1(&r, model, st)?;
            model.eqs_g1[i_g1] = (l2, r2);
            i_g1 += 1;
            progressed = true;
        }
        while i_g2 < model.eqs_g2.len() {
            let (l, r) = model.eqs_g2[i_g2].clone();
            let l2 = checkout_as_g2(&l, model, st)?;
            let r2 = checkout_as_g2(&r, model, st)?;
            model.eqs_g2[i_g2] = (l2, r2);
            i_g2 += 1;
            progressed = true;
        }
        while i_gt < model.eqs_gt.len() {
            let (l, r) = model.eqs_gt[i_gt].clone();
            let l2 = checkout_as_gt(&l, model, st)?;
            let r2 = checkout_as_gt(&r, model, st)?;
            model.eqs_gt[i_gt] = (l2, r2);
            i_gt += 1;
            progressed = true;
        }

        if !progressed {
            break;
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------
// Step 3: zero-knowledge check.
// ---------------------------------------------------------------------

/// Whether a F_p node's value is hidden: a secret witness or the `1`
/// base always is (F_p-side commitments are unconditionally hiding); a
/// constant never is; a sum needs both addends hidden, a product only
/// one factor.
fn is_zk_fp<E: PairingEngine>(node: &FpNode<E>) -> bool {
    match node {
        FpNode::Variable(_) | FpNode::Base => true,
        FpNode::ConstIndex(_) | FpNode::ConstValue(_) => false,
        FpNode::Pair(a, b) => is_zk_fp(a) && is_zk_fp(b),
        FpNode::Scalar(a, b) => is_zk_fp(a) || is_zk_fp(b),
    }
}

/// Whether a G1 node's value is hidden under the given commitment plan:
/// a variable is hidden only when every variable is committed with both
/// randomizers (`normal_commit`); a constant never is; the base always
/// is; a sum needs both addends hidden, a scalar product only one of
/// its two factors (the F_p scalar, checked with [`is_zk_fp`], or the
/// G1 base, recursively).
fn is_zk_g1<E: PairingEngine>(node: &G1Node<E>, normal_commit: bool) -> bool {
    match node {
        G1Node::Variable(_) => normal_commit,
        G1Node::ConstIndex(_) | G1Node::ConstValue(_) => false,
        G1Node::Base => true,
        G1Node::Pair(a, b) => is_zk_g1(a, normal_commit) && is_zk_g1(b, normal_commit),
        G1Node::Scalar(s, g) => is_zk_fp(s) || is_zk_g1(g, normal_commit),
    }
}

/// The `B_2`-side counterpart of [`is_zk_g1`].
fn is_zk_g2<E: PairingEngine>(node: &G2Node<E>, normal_commit: bool) -> bool {
    match node {
        G2Node::Variable(_) => normal_commit,
        G2Node::ConstIndex(_) | G2Node::ConstValue(_) => false,
        G2Node::Base => true,
        G2Node::Pair(a, b) => is_zk_g2(a, normal_commit) && is_zk_g2(b, normal_commit),
        G2Node::Scalar(s, h) => is_zk_fp(s) || is_zk_g2(h, normal_commit),
    }
}

/// Whether a GT node's value is hidden: a constant never is; the base
/// always is; a product needs both factors hidden; a pairing only one
/// of its two operands.
fn is_zk_gt<E: PairingEngine>(node: &GTNode<E>, normal_commit: bool) -> bool {
    match node {
        GTNode::ConstIndex(_) | GTNode::ConstValue(_) => false,
        GTNode::Base => true,
        GTNode::Pair(a, b) => is_zk_gt(a, normal_commit) && is_zk_gt(b, normal_commit),
        GTNode::Pairing(a, b) => is_zk_g1(a, normal_commit) || is_zk_g2(b, normal_commit),
    }
}

fn is_zero_knowledge<E: PairingEngine>(model: &ProofModel<E>) -> bool {
    // SelectedEncryption always succeeds: the SAT solve below picks an
    // encrypted/committed split that makes every equation ZK (falling
    // back to encrypting everything when unsatisfiable).
    if model.commit_type == CommitType::SelectedEncryption {
        return true;
    }
    let normal_commit = model.commit_type == CommitType::NormalCommit;
    model
        .eqs_fp
        .iter()
        .all(|(l, r)| is_zk_fp(l) && is_zk_fp(r))
        && model
            .eqs_g1
            .iter()
            .all(|(l, r)| is_zk_g1(l, normal_commit) && is_zk_g1(r, normal_commit))
        && model
            .eqs_g2
            .iter()
            .all(|(l, r)| is_zk_g2(l, normal_commit) && is_zk_g2(r, normal_commit))
        && model
            .eqs_gt
            .iter()
            .all(|(l, r)| is_zk_gt(l, normal_commit) && is_zk_gt(r, normal_commit))
}

// ---------------------------------------------------------------------
// Step 4: SelectedEncryption — boolean SAT over which G1/G2 variables
// are committed without a `w` component, minimizing the total number of
// variables encrypted subject to every equation becoming ZK.
// ---------------------------------------------------------------------

/// A boolean formula over encrypted-or-not G1/G2 variable choices,
/// flattened per equation: AND for a PAIR of two sub-formulas (both
/// halves of a sum must independently be satisfied), OR for a variable
/// occurrence that could be encrypted or left committed (SCALAR /
/// PAIRING positions), TRUE for positions that carry no secret (base
/// elements, constants, or Fp-only context), FALSE for a committed
/// constant that can never satisfy the clause on its own.
#[derive(Clone)]
enum Clause {
    True,
    False,
    VarG1(u16),
    VarG2(u16),
    And(Box<Clause>, Box<Clause>),
    Or(Box<Clause>, Box<Clause>),
}

fn clause_and(a: Clause, b: Clause) -> Clause {
    match (a, b) {
        (Clause::True, x) | (x, Clause::True) => x,
        (Clause::False, _) | (_, Clause::False) => Clause::False,
        (a, b) => Clause::And(Box::new(a), Box::new(b)),
    }
}
fn clause_or(a: Clause, b: Clause) -> Clause {
    match (a, b) {
        (Clause::False, x) | (x, Clause::False) => x,
        (Clause::True, _) | (_, Clause::True) => Clause::True,
        (a, b) => Clause::Or(Box::new(a), Box::new(b)),
    }
}

fn g1_clause<E: PairingEngine>(node: &G1Node<E>) -> Clause {
    match node {
        G1Node::Variable(i) => Clause::VarG1(*i),
        G1Node::ConstIndex(_) | G1Node::ConstValue(_) | G1Node::Base => Clause::True,
        G1Node::Pair(a, b) => clause_and(g1_clause(a), g1_clause(b)),
        G1Node::Scalar(_, g) => g1_clause(g),
    }
}
fn g2_clause<E: PairingEngine>(node: &G2Node<E>) -> Clause {
    match node {
        G2Node::Variable(i) => Clause::VarG2(*i),
        G2Node::ConstIndex(_) | G2Node::ConstValue(_) | G2Node::Base => Clause::True,
        G2Node::Pair(a, b) => clause_and(g2_clause(a), g2_clause(b)),
        G2Node::Scalar(_, h) => g2_clause(h),
    }
}
fn gt_clause<E: PairingEngine>(node: &GTNode<E>) -> Clause {
    match node {
        GTNode::ConstIndex(_) | GTNode::ConstValue(_) | GTNode::Base => Clause::True,
        GTNode::Pair(a, b) => clause_and(gt_clause(a), gt_clause(b)),
        GTNode::Pairing(a, b) => clause_or(g1_clause(a), g2_clause(b)),
    }
}

fn occurrences(clause: &Clause, count: &mut HashMap<(bool, u16), usize>) {
    match clause {
        Clause::True | Clause::False => {}
        Clause::VarG1(i) => *count.entry((true, *i)).or_insert(0) += 1,
        Clause::VarG2(i) => *count.entry((false, *i)).or_insert(0) += 1,
        Clause::And(a, b) | Clause::Or(a, b) => {
            occurrences(a, count);
            occurrences(b, count);
        }
    }
}

/// `assign` maps `(is_g1, index)` to `true` (encrypted) / `false`
/// (committed). Evaluates the clause with unassigned variables treated
/// as satisfying (optimistic, for branch-and-bound pruning).
fn eval(clause: &Clause, assign: &HashMap<(bool, u16), bool>) -> bool {
    match clause {
        Clause::True => true,
        Clause::False => false,
        Clause::VarG1(i) => assign.get(&(true, *i)).copied().unwrap_or(true),
        Clause::VarG2(i) => assign.get(&(false, *i)).copied().unwrap_or(true),
        Clause::And(a, b) => eval(a, assign) && eval(b, assign),
        Clause::Or(a, b) => eval(a, assign) || eval(b, assign),
    }
}

fn is_fully_assigned(clause: &Clause, assign: &HashMap<(bool, u16), bool>) -> bool {
    match clause {
        Clause::True | Clause::False => true,
        Clause::VarG1(i) => assign.contains_key(&(true, *i)),
        Clause::VarG2(i) => assign.contains_key(&(false, *i)),
        Clause::And(a, b) | Clause::Or(a, b) => {
            is_fully_assigned(a, assign) && is_fully_assigned(b, assign)
        }
    }
}

/// Branch-and-bound search for the assignment minimizing the number of
/// `true` (encrypted) variables subject to every clause evaluating to
/// `true`. Branches the variable with the highest occurrence count
/// first, trying "not encrypted" before "encrypted" so ties favor fewer
/// encrypted variables.
fn solve_sat(
    clauses: &[Clause],
    n_g1: usize,
    n_g2: usize,
) -> (HashMap<(bool, u16), bool>, usize) {
    let mut occ: HashMap<(bool, u16), usize> = HashMap::new();
    for c in clauses {
        occurrences(c, &mut occ);
    }
    let mut order: Vec<(bool, u16)> = occ.keys().copied().collect();
    order.sort_by(|a, b| occ[b].cmp(&occ[a]));

    let mut best: Option<(HashMap<(bool, u16), bool>, usize)> = None;
    let mut assign = HashMap::new();
    search(clauses, &order, 0, &mut assign, &mut best);

    match best {
        Some((assign, cost)) => (assign, cost),
        // No candidate satisfied every clause (shouldn't happen once
        // every variable may be freely encrypted), fall back to
        // encrypting everything, which always satisfies OR clauses.
        None => {
            let mut assign = HashMap::new();
            for i in 0..n_g1 {
                assign.insert((true, i as u16), true);
            }
            for i in 0..n_g2 {
                assign.insert((false, i as u16), true);
            }
            let cost = n_g1 + n_g2;
            (assign, cost)
        }
    }
}

fn search(
    clauses: &[Clause],
    order: &[(bool, u16)],
    pos: usize,
    assign: &mut HashMap<(bool, u16), bool>,
    best: &mut Option<(HashMap<(bool, u16), bool>, usize)>,
) {
    let cost = assign.values().filter(|v| **v).count();
    if let Some((_, best_cost)) = best {
        if cost >= *best_cost {
            return;
        }
    }
    if pos == order.len() {
        if clauses.iter().all(|c| eval(c, assign)) {
            *best = Some((assign.clone(), cost));
        }
        return;
    }
    let var = order[pos];
    for &value in &[false, true] {
        assign.insert(var, value);
        let still_viable = clauses
            .iter()
            .all(|c| !is_fully_assigned(c, assign) || eval(c, assign));
        if still_viable {
            search(clauses, order, pos + 1, assign, best);
        }
        assign.remove(&var);
    }
}

fn solve_selected_encryption<E: PairingEngine>(model: &mut ProofModel<E>) {
    let mut clauses = Vec::new();
    for (l, r) in &model.eqs_g1 {
        clauses.push(clause_and(g1_clause(l), g1_clause(r)));
    }
    for (l, r) in &model.eqs_g2 {
        clauses.push(clause_and(g2_clause(l), g2_clause(r)));
    }
    for (l, r) in &model.eqs_gt {
        clauses.push(clause_and(gt_clause(l), gt_clause(r)));
    }

    let (assign, _cost) = solve_sat(&clauses, model.n_vars_g1, model.n_vars_g2);

    model.enc.enc_g1 = (0..model.n_vars_g1)
        .map(|i| assign.get(&(true, i as u16)).copied().unwrap_or(false))
        .collect();
    model.enc.enc_g2 = (0..model.n_vars_g2)
        .map(|i| assign.get(&(false, i as u16)).copied().unwrap_or(false))
        .collect();
}

// ---------------------------------------------------------------------
// Step 5: classification.
// ---------------------------------------------------------------------

fn classify_all<E: PairingEngine>(model: &mut ProofModel<E>) {
    model.ty_fp = model
        .eqs_fp
        .iter()
        .map(|(l, r)| classify::classify_fp(l, r))
        .collect();
    model.ty_g1 = model
        .eqs_g1
        .iter()
        .map(|(l, r)| classify::classify_g1(l, r, &model.enc))
        .collect();
    model.ty_g2 = model
        .eqs_g2
        .iter()
        .map(|(l, r)| classify::classify_g2(l, r, &model.enc))
        .collect();
    model.ty_gt = model
        .eqs_gt
        .iter()
        .map(|(l, r)| classify::classify_gt(l, r, &model.enc))
        .collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{e as pair, fp_const, fp_var, g1_base, g2_base};
    use crate::Fp;
    use ark_bls12_381::Bls12_381;

    type E = Bls12_381;

    /// `e(G1, (k·l)·G2) = e(v, G2)` with `k` a witness and `l` a constant:
    /// the nested product `k·l` cannot be handed whole to either pairing
    /// side, so it must be promoted to a fresh auxiliary F_p variable with
    /// a linking multiplicative equation.
    #[test]
    fn nested_product_promotes_to_aux_witness() {
        let mut model = ProofModel::<E>::new(CommitType::SelectedEncryption);
        let k = fp_var::<E>(0);
        let l = fp_const::<E>(Fp::<E>::from(7u64));
        model
            .add_equation_gt(
                pair(g1_base::<E>(), (k * l) * g2_base::<E>()),
                pair(g1_base::<E>(), g2_base::<E>()),
            )
            .unwrap();

        let n_vars_before = model.n_vars_fp;
        model.finalize().unwrap();

        assert_eq!(n_vars_before, 1);
        assert_eq!(model.n_vars_fp, 2, "the nested product introduces one auxiliary variable");
        assert_eq!(model.additional_fp.len(), 1);

        // The linking equation `k * l = aux` is a genuine F_p=F_p equation
        // (classifier's Q* tags), not folded away as a plain equality.
        let aux_eq_type = model.ty_fp[0];
        assert!(matches!(
            aux_eq_type,
            EqType::Qe | EqType::QConstG | EqType::QConstH
        ));
    }

    #[test]
    fn shared_nested_product_reuses_one_aux_witness() {
        let mut model = ProofModel::<E>::new(CommitType::SelectedEncryption);
        let k = fp_var::<E>(0);
        let l = fp_const::<E>(Fp::<E>::from(3u64));
        let product = k * l;

        model
            .add_equation_g1(
                product.clone() * g1_base::<E>(),
                product * g1_base::<E>(),
            )
            .unwrap();

        model.finalize().unwrap();
        assert_eq!(model.n_vars_fp, 2, "both uses share the same auxiliary variable");
        assert_eq!(model.additional_fp.len(), 1);
    }
}
