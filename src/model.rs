// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! `ProofModel`: the equation store, `add_equation`/`finalize` surface,
//! dense variable/constant tables, and the finalized classification and
//! encryption-plan state every other module reads from.

use crate::classify::{self, EqType};
use crate::error::Error;
use crate::eval;
use crate::expr::{FpExpr, FpNode, G1Expr, G1Node, G2Expr, G2Node, GtExpr, GTNode};
use crate::normalize;
use crate::{Fp, G1, G2, GT};
use ark_ec::PairingEngine;
use std::sync::Arc;

/// The commitment strategy for G1/G2 witnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitType {
    /// Every G1/G2 variable is committed in non-encrypted (`w`-bearing)
    /// form; ZK-ness is checked, not engineered.
    NormalCommit,
    /// Per-variable encrypted/non-encrypted choice solved by SAT so that
    /// every equation becomes ZK. The default.
    SelectedEncryption,
    /// Every G1/G2 variable is committed in encrypted (no-`w`) form.
    AllEncrypted,
}

impl Default for CommitType {
    fn default() -> Self {
        CommitType::SelectedEncryption
    }
}

/// Which G1/G2 variables are committed in encrypted (no-`w`) form, per
/// The `EL_TYPE_ENC_*` vs `EL_TYPE_COM_*` split.
#[derive(Debug, Clone, Default)]
pub struct EncryptionPlan {
    pub(crate) commit_type: CommitType,
    pub(crate) enc_g1: Vec<bool>,
    pub(crate) enc_g2: Vec<bool>,
}

impl EncryptionPlan {
    /// `true` if the G1 variable at `index` is committed without a `w`
    /// component.
    pub fn g1_encrypted(&self, index: u16) -> bool {
        match self.commit_type {
            CommitType::AllEncrypted => true,
            CommitType::NormalCommit => false,
            CommitType::SelectedEncryption => {
                self.enc_g1.get(index as usize).copied().unwrap_or(false)
            }
        }
    }
    /// `true` if the G2 variable at `index` is committed without a `w`
    /// component.
    pub fn g2_encrypted(&self, index: u16) -> bool {
        match self.commit_type {
            CommitType::AllEncrypted => true,
            CommitType::NormalCommit => false,
            CommitType::SelectedEncryption => {
                self.enc_g2.get(index as usize).copied().unwrap_or(false)
            }
        }
    }
}

/// Instantiation values for a [`ProofModel`]'s constants and variables,
/// used to verify a solution, produce a proof or check one.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub struct ProofData<E: PairingEngine> {
    /// Public constants in F_p, in declaration order.
    pub pub_fp: Vec<Fp<E>>,
    /// Private witnesses in F_p, in declaration order.
    pub priv_fp: Vec<Fp<E>>,
    /// Public constants in G1, in declaration order.
    pub pub_g1: Vec<G1<E>>,
    /// Private witnesses in G1, in declaration order.
    pub priv_g1: Vec<G1<E>>,
    /// Public constants in G2, in declaration order.
    pub pub_g2: Vec<G2<E>>,
    /// Private witnesses in G2, in declaration order.
    pub priv_g2: Vec<G2<E>>,
    /// Public constants in GT, in declaration order. There is no `priv_gt`:
    /// the scheme supports no GT witnesses.
    pub pub_gt: Vec<GT<E>>,
}

impl<E: PairingEngine> Default for ProofData<E> {
    fn default() -> Self {
        Self {
            pub_fp: Vec::new(),
            priv_fp: Vec::new(),
            pub_g1: Vec::new(),
            priv_g1: Vec::new(),
            pub_g2: Vec::new(),
            priv_g2: Vec::new(),
            pub_gt: Vec::new(),
        }
    }
}

/// A pair of expression nodes making up one equation in some group.
pub(crate) type Eq<N> = (Arc<N>, Arc<N>);

/// A finite system of polynomial relations over F_p, G1, G2 and GT: the
/// `NIZKProof`.
///
/// Equations are accumulated with `add_equation_*` until [`Self::finalize`]
/// runs the normalizer (index collection, F_p side selection, auxiliary
/// witness promotion, the ZK/SelectedEncryption analysis) and the
/// classifier, after which the model is read-only and safe to share across
/// concurrent [`crate::prove`]/[`crate::verify`]/[`crate::simulate`] calls
/// from independent deep copies — `ProofModel` is plain owned
/// data (`#[derive(Clone)]`), so `.clone()` *is* that deep copy.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub struct ProofModel<E: PairingEngine> {
    pub(crate) commit_type: CommitType,
    pub(crate) finalized: bool,
    pub(crate) zk: bool,

    pub(crate) eqs_fp: Vec<Eq<FpNode<E>>>,
    pub(crate) eqs_g1: Vec<Eq<G1Node<E>>>,
    pub(crate) eqs_g2: Vec<Eq<G2Node<E>>>,
    pub(crate) eqs_gt: Vec<Eq<GTNode<E>>>,

    pub(crate) n_vars_fp: usize,
    pub(crate) n_consts_fp: usize,
    pub(crate) n_vars_g1: usize,
    pub(crate) n_consts_g1: usize,
    pub(crate) n_vars_g2: usize,
    pub(crate) n_consts_g2: usize,
    pub(crate) n_consts_gt: usize,

    /// `true` iff the F_p variable at this dense index commits in B_1.
    pub(crate) side_fp_var: Vec<bool>,
    /// `true` iff the F_p constant at this dense index is read from B_1.
    pub(crate) side_fp_const: Vec<bool>,

    pub(crate) enc: EncryptionPlan,

    pub(crate) ty_fp: Vec<EqType>,
    pub(crate) ty_g1: Vec<EqType>,
    pub(crate) ty_g2: Vec<EqType>,
    pub(crate) ty_gt: Vec<EqType>,

    /// Auxiliary witnesses introduced by normalization, in the order they
    /// were appended: the original formula each one is defined to equal.
    pub(crate) additional_fp: Vec<Arc<FpNode<E>>>,
    pub(crate) additional_g1: Vec<Arc<G1Node<E>>>,
    pub(crate) additional_g2: Vec<Arc<G2Node<E>>>,
}

impl<E: PairingEngine> ProofModel<E> {
    /// Constructs an empty model ready to accept equations.
    pub fn new(commit_type: CommitType) -> Self {
        Self {
            commit_type,
            finalized: false,
            zk: false,
            eqs_fp: Vec::new(),
            eqs_g1: Vec::new(),
            eqs_g2: Vec::new(),
            eqs_gt: Vec::new(),
            n_vars_fp: 0,
            n_consts_fp: 0,
            n_vars_g1: 0,
            n_consts_g1: 0,
            n_vars_g2: 0,
            n_consts_g2: 0,
            n_consts_gt: 0,
            side_fp_var: Vec::new(),
            side_fp_const: Vec::new(),
            enc: EncryptionPlan {
                commit_type,
                enc_g1: Vec::new(),
                enc_g2: Vec::new(),
            },
            ty_fp: Vec::new(),
            ty_g1: Vec::new(),
            ty_g2: Vec::new(),
            ty_gt: Vec::new(),
            additional_fp: Vec::new(),
            additional_g1: Vec::new(),
            additional_g2: Vec::new(),
        }
    }

    /// Appends an F_p equation. Fails with [`Error::NotFinalized`]'s
    /// dual — a finalized model refuses new equations (monotone
    /// finalization).
    pub fn add_equation_fp(&mut self, lhs: FpExpr<E>, rhs: FpExpr<E>) -> Result<(), Error> {
        self.ensure_open()?;
        self.eqs_fp.push((lhs.0, rhs.0));
        Ok(())
    }
    /// Appends a G1 equation.
    pub fn add_equation_g1(&mut self, lhs: G1Expr<E>, rhs: G1Expr<E>) -> Result<(), Error> {
        self.ensure_open()?;
        self.eqs_g1.push((lhs.0, rhs.0));
        Ok(())
    }
    /// Appends a G2 equation.
    pub fn add_equation_g2(&mut self, lhs: G2Expr<E>, rhs: G2Expr<E>) -> Result<(), Error> {
        self.ensure_open()?;
        self.eqs_g2.push((lhs.0, rhs.0));
        Ok(())
    }
    /// Appends a GT equation.
    pub fn add_equation_gt(&mut self, lhs: GtExpr<E>, rhs: GtExpr<E>) -> Result<(), Error> {
        self.ensure_open()?;
        self.eqs_gt.push((lhs.0, rhs.0));
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), Error> {
        if self.finalized {
            Err(Error::BadProof("add_equation after finalize"))
        } else {
            Ok(())
        }
    }

    /// Runs the normalizer and classifier. Idempotent:
    /// a second call on an already-finalized model is a no-op.
    pub fn finalize(&mut self) -> Result<(), Error> {
        if self.finalized {
            return Ok(());
        }
        normalize::run(self)?;
        self.finalized = true;
        Ok(())
    }

    /// `true` once [`Self::finalize`] has succeeded.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// `true` iff every equation is zero-knowledge.
    /// Always `false` before [`Self::finalize`] has run, matching the
    /// teacher's `isZeroKnowledge`.
    pub fn is_zero_knowledge(&self) -> bool {
        self.finalized && self.zk
    }

    /// The commitment strategy this model was constructed with.
    pub fn commit_type(&self) -> CommitType {
        self.commit_type
    }

    /// Reassembles an already-finalized model from its dense wire-format
    /// parts ([`crate::codec::read_model`]): skips the normalizer and
    /// classifier entirely, since both already ran before the model that
    /// produced these parts was serialized.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        commit_type: CommitType,
        zk: bool,
        side_fp_var: Vec<bool>,
        side_fp_const: Vec<bool>,
        n_vars_fp: usize,
        n_consts_fp: usize,
        n_vars_g1: usize,
        n_consts_g1: usize,
        n_vars_g2: usize,
        n_consts_g2: usize,
        n_consts_gt: usize,
        eqs_fp: Vec<Eq<FpNode<E>>>,
        eqs_g1: Vec<Eq<G1Node<E>>>,
        eqs_g2: Vec<Eq<G2Node<E>>>,
        eqs_gt: Vec<Eq<GTNode<E>>>,
        enc_g1: Vec<bool>,
        enc_g2: Vec<bool>,
        ty_fp: Vec<EqType>,
        ty_g1: Vec<EqType>,
        ty_g2: Vec<EqType>,
        ty_gt: Vec<EqType>,
        additional_fp: Vec<Arc<FpNode<E>>>,
        additional_g1: Vec<Arc<G1Node<E>>>,
        additional_g2: Vec<Arc<G2Node<E>>>,
    ) -> Self {
        Self {
            commit_type,
            finalized: true,
            zk,
            eqs_fp,
            eqs_g1,
            eqs_g2,
            eqs_gt,
            n_vars_fp,
            n_consts_fp,
            n_vars_g1,
            n_consts_g1,
            n_vars_g2,
            n_consts_g2,
            n_consts_gt,
            side_fp_var,
            side_fp_const,
            enc: EncryptionPlan { commit_type, enc_g1, enc_g2 },
            ty_fp,
            ty_g1,
            ty_g2,
            ty_gt,
            additional_fp,
            additional_g1,
            additional_g2,
        }
    }

    /// Checks that witness/constant `data` satisfies every equation in
    /// this finalized model, without producing or checking any proof
    /// (`verify_solution`). `data` is sized to the model's
    /// original, pre-auxiliary-promotion variable counts; the auxiliary
    /// witnesses normalization introduced are re-derived internally.
    pub fn verify_solution(&self, data: ProofData<E>) -> bool {
        if !self.finalized {
            return false;
        }
        let data = eval::extend_data(self, data);
        eval::check_all_equations(self, &data)
    }

    /// Checks that `data`'s vector lengths match this finalized model's
    /// dense variable/constant counts (`DataMismatch`).
    pub(crate) fn check_instantiation(&self, data: &ProofData<E>) -> Result<(), Error> {
        let check = |group, expected, got| {
            if expected == got {
                Ok(())
            } else {
                Err(Error::DataMismatch { group, expected, got })
            }
        };
        check("Fp constants", self.n_consts_fp, data.pub_fp.len())?;
        check("Fp variables", self.n_vars_fp, data.priv_fp.len())?;
        check("G1 constants", self.n_consts_g1, data.pub_g1.len())?;
        check("G1 variables", self.n_vars_g1, data.priv_g1.len())?;
        check("G2 constants", self.n_consts_g2, data.pub_g2.len())?;
        check("G2 variables", self.n_vars_g2, data.priv_g2.len())?;
        check("GT constants", self.n_consts_gt, data.pub_gt.len())?;
        Ok(())
    }
}
