// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! A collection of all possible errors encountered in `gsnizk`.

/// Defines all possible errors that can be encountered when building,
/// finalizing, proving, verifying or simulating a [`crate::model::ProofModel`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller added index `k` to a group's variable or constant table
    /// without first adding index `k - 1`; `finalize` refuses to run.
    #[error("dense index gap in group {group} at index {index}")]
    IndexGap {
        /// Which of F_p/G1/G2/GT the gap was found in.
        group: &'static str,
        /// The first missing index.
        index: usize,
    },

    /// A F_p constant was forced onto both the B_1 and the B_2 side by
    /// different equations; only variables may be split with an auxiliary
    /// linking equation.
    #[error("F_p constant {0} required on both B_1 and B_2 sides")]
    SideConflict(usize),

    /// The `SelectedEncryption` boolean SAT instance over which G1/G2
    /// variables must be encrypted has no satisfying assignment.
    #[error("selected-encryption SAT instance is unsatisfiable")]
    Unsatisfiable,

    /// `prove`/`verify`/`simulate` was invoked before `finalize`.
    #[error("proof model has not been finalized")]
    NotFinalized,

    /// The `ProofData` vectors' lengths do not match the finalized model's
    /// dense variable/constant counts.
    #[error("instantiation size mismatch in group {group}: expected {expected}, got {got}")]
    DataMismatch {
        /// Which of F_p/G1/G2/GT the mismatch was found in.
        group: &'static str,
        /// The size the finalized model expects.
        expected: usize,
        /// The size that was actually supplied.
        got: usize,
    },

    /// A proof failed to verify: a classifier tag mismatch on the wire, a
    /// stream shorter than expected, or a bilinear identity check failed.
    #[error("proof rejected: {0}")]
    BadProof(&'static str),

    /// `simulate` was invoked against a CRS that carries no simulation
    /// trapdoor, or against a non-ZK proof model.
    #[error("CRS or proof model is not simulation-ready")]
    InvalidCrs,

    /// An I/O error propagated from the caller-supplied stream.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A group/field element failed to (de)serialize through
    /// `ark_serialize`.
    #[error(transparent)]
    Serialization(#[from] ark_serialize::SerializationError),
}
