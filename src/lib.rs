// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! `gsnizk` — Non-Interactive Zero-Knowledge proofs in the Groth–Sahai
//! framework over a bilinear (type-3) pairing.
//!
//! The crate is generic over [`ark_ec::PairingEngine`]: `E::Fr` is the
//! scalar field F_p, `E::G1Projective`/`E::G2Projective` are the two
//! source groups, and `E::Fqk` is the target group GT. Field and curve
//! arithmetic, hashing-to-curve and pairing evaluation are delegated
//! entirely to that trait; this crate only ever calls its operations.
//!
//! A caller builds a finite set of polynomial relations over F_p, G1, G2
//! and GT with [`expr`], instantiates them with public constants and
//! secret witnesses in a [`model::ProofModel`], and obtains a proof that
//! the witnesses satisfy every relation without revealing them.

#![allow(clippy::type_complexity)]

pub mod classify;
pub mod codec;
pub mod commitment;
pub mod crs;
mod eval;
pub mod error;
pub mod expr;
pub mod model;
pub mod normalize;
mod proofels;
pub mod prove;
pub mod simulate;
pub mod verify;

pub use commitment::{b1::B1, b2::B2, bt::BT};
pub use crs::Crs;
pub use error::Error;
pub use model::{CommitType, ProofData, ProofModel};

use ark_ec::PairingEngine;

/// Scalar field element, F_p.
pub type Fp<E> = <E as PairingEngine>::Fr;
/// Element of the first source group, G1.
pub type G1<E> = <E as PairingEngine>::G1Projective;
/// Element of the second source group, G2.
pub type G2<E> = <E as PairingEngine>::G2Projective;
/// Element of the target group, GT.
pub type GT<E> = <E as PairingEngine>::Fqk;

/// The distinguished base element of GT, `e(base_G1, base_G2)`.
pub fn gt_base<E: PairingEngine>() -> GT<E> {
    E::pairing(E::G1Affine::prime_subgroup_generator(), E::G2Affine::prime_subgroup_generator())
}

#[cfg(test)]
mod tests {
    use crate::expr::{e as pair, fp_var, g1_const_index, g1_var, g2_const_index, g2_var};
    use crate::model::{CommitType, ProofData, ProofModel};
    use crate::{prove, verify};
    use crate::{Crs, Fp, G1, G2};
    use ark_bls12_381::Bls12_381;
    use ark_ec::ProjectiveCurve;
    use ark_ff::UniformRand;
    use rand::thread_rng;

    type E = Bls12_381;

    fn rand_g1<R: rand_core::RngCore>(rng: &mut R) -> G1<E> {
        G1::<E>::prime_subgroup_generator() * Fp::<E>::rand(rng)
    }

    /// Scenario 1: `k·a = 1·b` with `b = k·a`, public `a,b ∈ G1`, private
    /// `k ∈ F_p`. Flipping `b` must break both `verify_solution` and
    /// `check_proof`.
    #[test]
    fn discrete_log_proof() {
        let mut model = ProofModel::<E>::new(CommitType::SelectedEncryption);
        let k = fp_var::<E>(0);
        let a = g1_const_index::<E>(0);
        let b = g1_const_index::<E>(1);
        model.add_equation_g1(k * a, b).unwrap();
        model.finalize().unwrap();

        let mut rng = thread_rng();
        let a_val = rand_g1(&mut rng);
        let k_val = Fp::<E>::rand(&mut rng);
        let b_val = a_val * k_val;

        let data = ProofData::<E> {
            priv_fp: vec![k_val],
            pub_g1: vec![a_val, b_val],
            ..ProofData::<E>::default()
        };
        assert!(model.verify_solution(data.clone()));

        let crs = Crs::<E>::new(true, &mut rng);
        let mut wire = Vec::new();
        prove::write_proof(&model, &crs, &data, &mut wire, &mut rng).unwrap();
        let mut source = wire.as_slice();
        assert!(verify::check_proof(&model, &crs, &data, &mut source).unwrap());

        let mut bad_data = data;
        bad_data.pub_g1[1] = rand_g1(&mut rng);
        assert!(!model.verify_solution(bad_data.clone()));

        let mut bad_wire = Vec::new();
        prove::write_proof(&model, &crs, &bad_data, &mut bad_wire, &mut rng).unwrap();
        let mut bad_source = bad_wire.as_slice();
        assert!(!verify::check_proof(&model, &crs, &bad_data, &mut bad_source).unwrap());
    }

    /// Scenario 2: `derive_private`/`verify_private` delegation, with
    /// single-byte tampering of the witness breaking verification.
    #[test]
    fn private_crs_delegation() {
        let mut rng = thread_rng();
        let public_crs = Crs::<E>::new(true, &mut rng).publish();

        let mut sink = Vec::new();
        let private_crs = public_crs.derive_private(&mut rng, &mut sink).unwrap();
        assert!(private_crs.w1().is_none());

        let mut source = sink.as_slice();
        assert!(public_crs.verify_private(&mut source).unwrap());

        let tampered_index = sink.len() / 2;
        sink[tampered_index] ^= 0x01;
        let mut tampered_source = sink.as_slice();
        assert!(!public_crs.verify_private(&mut tampered_source).unwrap());
    }

    /// Scenario 3: the four-equation user/token credential chain —
    /// `pk_C = sk_C·G1`, `e(cert,G2) = e(pk_C,pk_A)`, `sign = sk_C·HK`,
    /// `value = sk_C·v_SP` — must verify jointly. `pk_A` and `cert` are
    /// private witnesses the caller derives off-model as
    /// `sk_A·G2`/`sk_A·pk_C`; only the four stated relations are checked.
    #[test]
    fn user_token_credential_chain() {
        use crate::expr::g1_base;

        let mut model = ProofModel::<E>::new(CommitType::SelectedEncryption);
        let sk_c = fp_var::<E>(0);
        let pk_a = g2_var::<E>(0);
        let pk_c = g1_var::<E>(0);
        let cert = g1_var::<E>(1);
        let sign = g1_var::<E>(2);
        let value = g1_var::<E>(3);
        let hk = g1_const_index::<E>(0);
        let v_sp = g1_const_index::<E>(1);

        model.add_equation_g1(pk_c.clone(), sk_c.clone() * g1_base::<E>()).unwrap();
        model
            .add_equation_gt(pair(cert, crate::expr::g2_base::<E>()), pair(pk_c, pk_a))
            .unwrap();
        model.add_equation_g1(sign, sk_c.clone() * hk).unwrap();
        model.add_equation_g1(value, sk_c * v_sp).unwrap();
        model.finalize().unwrap();

        let mut rng = thread_rng();
        let sk_a_val = Fp::<E>::rand(&mut rng);
        let sk_c_val = Fp::<E>::rand(&mut rng);
        let hk_val = rand_g1(&mut rng);
        let v_sp_val = rand_g1(&mut rng);

        let pk_c_val = G1::<E>::prime_subgroup_generator() * sk_c_val;
        let pk_a_val = G2::<E>::prime_subgroup_generator() * sk_a_val;
        let cert_val = pk_c_val * sk_a_val;
        let sign_val = hk_val * sk_c_val;
        let value_val = v_sp_val * sk_c_val;

        let data = ProofData::<E> {
            priv_fp: vec![sk_c_val],
            pub_g1: vec![hk_val, v_sp_val],
            priv_g1: vec![pk_c_val, cert_val, sign_val, value_val],
            priv_g2: vec![pk_a_val],
            ..ProofData::<E>::default()
        };
        assert!(model.verify_solution(data.clone()));

        let crs = Crs::<E>::new(true, &mut rng);
        let mut wire = Vec::new();
        prove::write_proof(&model, &crs, &data, &mut wire, &mut rng).unwrap();
        let mut source = wire.as_slice();
        assert!(verify::check_proof(&model, &crs, &data, &mut source).unwrap());
    }

    /// Scenario 4: `e(G1, (k·l)·G2) = e(v, G2)` with `v = (k·l)·G1` — the
    /// nested `k·l` product forces an auxiliary witness (see
    /// `normalize::tests::nested_product_promotes_to_aux_witness`), and the
    /// resulting proof must still check.
    #[test]
    fn big_quadratic_equation() {
        use crate::expr::{fp_const, g1_base, g2_base};

        let mut model = ProofModel::<E>::new(CommitType::SelectedEncryption);
        let k = fp_var::<E>(0);
        let l_val = Fp::<E>::from(11u64);
        let l = fp_const::<E>(l_val);
        let v = g1_var::<E>(0);

        model
            .add_equation_gt(pair(g1_base::<E>(), (k * l) * g2_base::<E>()), pair(v, g2_base::<E>()))
            .unwrap();
        model.finalize().unwrap();

        let mut rng = thread_rng();
        let k_val = Fp::<E>::rand(&mut rng);
        let v_val = G1::<E>::prime_subgroup_generator() * (k_val * l_val);

        let data = ProofData::<E> {
            priv_fp: vec![k_val],
            priv_g1: vec![v_val],
            ..ProofData::<E>::default()
        };
        assert!(model.verify_solution(data.clone()));

        let crs = Crs::<E>::new(true, &mut rng);
        let mut wire = Vec::new();
        prove::write_proof(&model, &crs, &data, &mut wire, &mut rng).unwrap();
        let mut source = wire.as_slice();
        assert!(verify::check_proof(&model, &crs, &data, &mut source).unwrap());
    }

    /// Scenario 5: under an extraction CRS, the first `B_1` commitment read
    /// out of a proof for `e(kg1,G2) = e(G1,kg2)` extracts `kg1` bit-exactly.
    #[test]
    fn extractable_proof() {
        let mut model = ProofModel::<E>::new(CommitType::SelectedEncryption);
        let kg1 = g1_var::<E>(0);
        let kg2 = g2_var::<E>(0);
        model
            .add_equation_gt(pair(kg1.clone(), g2_const_index::<E>(0)), pair(g1_const_index::<E>(0), kg2.clone()))
            .unwrap();
        model.finalize().unwrap();

        let mut rng = thread_rng();
        let crs = Crs::<E>::new(true, &mut rng);

        let k_val = Fp::<E>::rand(&mut rng);
        let g1_val = G1::<E>::prime_subgroup_generator();
        let g2_val = G2::<E>::prime_subgroup_generator();
        let kg1_val = g1_val * k_val;
        let kg2_val = g2_val * k_val;

        let data = ProofData::<E> {
            pub_g1: vec![g1_val],
            pub_g2: vec![g2_val],
            priv_g1: vec![kg1_val],
            priv_g2: vec![kg2_val],
            ..ProofData::<E>::default()
        };
        assert!(model.verify_solution(data.clone()));

        let mut wire = Vec::new();
        prove::write_proof(&model, &crs, &data, &mut wire, &mut rng).unwrap();

        let mut check_source = wire.as_slice();
        assert!(verify::check_proof(&model, &crs, &data, &mut check_source).unwrap());

        // The proof's variable commitments are written in reverse
        // declaration order; with a single G1 variable, the first `B_1`
        // read off the wire is its commitment.
        let mut extract_source = wire.as_slice();
        let first_commitment = crate::codec::read_b1::<E>(&mut extract_source).unwrap();
        assert_eq!(first_commitment.extract(&crs), kg1_val);
    }

    /// Scenario 6: a model whose only equation is `c = c` for a public G1
    /// constant. SelectedEncryption finalizes with no encrypted variables
    /// (there are none to encrypt); AllEncrypted finalizes too; NormalCommit
    /// declares the system non-ZK (a constant-only equation carries no
    /// witness to hide behind).
    #[test]
    fn selected_encryption_unsolvable_is_trivially_satisfiable() {
        let c = g1_const_index::<E>(0);

        let mut selected = ProofModel::<E>::new(CommitType::SelectedEncryption);
        selected.add_equation_g1(c.clone(), c.clone()).unwrap();
        selected.finalize().unwrap();
        assert!(selected.is_zero_knowledge());
        assert_eq!(selected.commit_type(), CommitType::SelectedEncryption);

        let mut all_encrypted = ProofModel::<E>::new(CommitType::AllEncrypted);
        all_encrypted.add_equation_g1(c.clone(), c.clone()).unwrap();
        all_encrypted.finalize().unwrap();

        let mut normal = ProofModel::<E>::new(CommitType::NormalCommit);
        normal.add_equation_g1(c.clone(), c).unwrap();
        normal.finalize().unwrap();
        assert!(!normal.is_zero_knowledge());
    }

    #[test]
    fn gt_base_matches_pairing_of_generators() {
        use ark_ec::PairingEngine;
        let g1 = <Bls12_381 as PairingEngine>::G1Affine::prime_subgroup_generator();
        let g2 = <Bls12_381 as PairingEngine>::G2Affine::prime_subgroup_generator();
        assert_eq!(super::gt_base::<E>(), <Bls12_381 as PairingEngine>::pairing(g1, g2));
    }
}
