// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! The binary wire layout shared by CRS, proof and proof-model
//! serialization: fixed-size integers are 16-bit big-endian unless
//! noted; group/field elements are framed with an explicit length
//! prefix around their `ark_serialize` encoding so the core never has
//! to assume a literal byte count for any curve.

use crate::classify::EqType;
use crate::crs::{Crs, CrsKind};
use crate::error::Error;
use crate::expr::{FpNode, G1Node, G2Node, GTNode};
use crate::model::{CommitType, ProofModel};
use crate::{Fp, B1, B2, BT, G1, G2, GT};
use ark_ec::PairingEngine;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use std::io::{Read, Write};
use std::sync::Arc;

/// Writes a 16-bit big-endian count.
pub fn write_u16(sink: &mut impl Write, value: u16) -> Result<(), Error> {
    sink.write_all(&value.to_be_bytes())?;
    Ok(())
}

/// Reads a 16-bit big-endian count.
pub fn read_u16(source: &mut impl Read) -> Result<u16, Error> {
    let mut buf = [0u8; 2];
    source.read_exact(&mut buf)?;
    Ok(u16::from_be_bytes(buf))
}

/// Writes a single tag byte (node kind, CRS type, CommitType, ...).
pub fn write_tag(sink: &mut impl Write, tag: u8) -> Result<(), Error> {
    sink.write_all(&[tag])?;
    Ok(())
}

/// Reads a single tag byte.
pub fn read_tag(source: &mut impl Read) -> Result<u8, Error> {
    let mut buf = [0u8; 1];
    source.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn write_canonical(sink: &mut impl Write, value: &impl CanonicalSerialize) -> Result<(), Error> {
    let mut bytes = Vec::new();
    value.serialize_uncompressed(&mut bytes)?;
    write_u16(sink, bytes.len() as u16)?;
    sink.write_all(&bytes)?;
    Ok(())
}

fn read_canonical<T: CanonicalDeserialize>(source: &mut impl Read) -> Result<T, Error> {
    let len = read_u16(source)? as usize;
    let mut bytes = vec![0u8; len];
    source.read_exact(&mut bytes)?;
    Ok(T::deserialize_uncompressed(&bytes[..])?)
}

/// Writes a F_p element.
pub fn write_fp<E: PairingEngine>(sink: &mut impl Write, value: &Fp<E>) -> Result<(), Error> {
    write_canonical(sink, value)
}

/// Reads a F_p element.
pub fn read_fp<E: PairingEngine>(source: &mut impl Read) -> Result<Fp<E>, Error> {
    read_canonical(source)
}

/// Writes a G1 element.
pub fn write_g1<E: PairingEngine>(sink: &mut impl Write, value: &G1<E>) -> Result<(), Error> {
    write_canonical(sink, value)
}

/// Reads a G1 element.
pub fn read_g1<E: PairingEngine>(source: &mut impl Read) -> Result<G1<E>, Error> {
    read_canonical(source)
}

/// Writes a G2 element.
pub fn write_g2<E: PairingEngine>(sink: &mut impl Write, value: &G2<E>) -> Result<(), Error> {
    write_canonical(sink, value)
}

/// Reads a G2 element.
pub fn read_g2<E: PairingEngine>(source: &mut impl Read) -> Result<G2<E>, Error> {
    read_canonical(source)
}

/// Writes a GT element through its own `CanonicalSerialize` call into
/// an independently allocated buffer.
pub fn write_gt<E: PairingEngine>(sink: &mut impl Write, value: &GT<E>) -> Result<(), Error> {
    write_canonical(sink, value)
}

/// Reads a GT element into a freshly allocated destination.
pub fn read_gt<E: PairingEngine>(source: &mut impl Read) -> Result<GT<E>, Error> {
    read_canonical(source)
}

/// Writes a `B1` element (two G1 components).
pub fn write_b1<E: PairingEngine>(sink: &mut impl Write, value: &B1<E>) -> Result<(), Error> {
    write_g1::<E>(sink, &value.c1)?;
    write_g1::<E>(sink, &value.c2)
}

/// Reads a `B1` element.
pub fn read_b1<E: PairingEngine>(source: &mut impl Read) -> Result<B1<E>, Error> {
    let c1 = read_g1::<E>(source)?;
    let c2 = read_g1::<E>(source)?;
    Ok(B1::new(c1, c2))
}

/// Writes a `B2` element (two G2 components).
pub fn write_b2<E: PairingEngine>(sink: &mut impl Write, value: &B2<E>) -> Result<(), Error> {
    write_g2::<E>(sink, &value.c1)?;
    write_g2::<E>(sink, &value.c2)
}

/// Reads a `B2` element.
pub fn read_b2<E: PairingEngine>(source: &mut impl Read) -> Result<B2<E>, Error> {
    let c1 = read_g2::<E>(source)?;
    let c2 = read_g2::<E>(source)?;
    Ok(B2::new(c1, c2))
}

/// Writes a `BT` element: four independently-destined GT limbs.
pub fn write_bt<E: PairingEngine>(sink: &mut impl Write, value: &BT<E>) -> Result<(), Error> {
    write_gt::<E>(sink, &value.t11)?;
    write_gt::<E>(sink, &value.t12)?;
    write_gt::<E>(sink, &value.t21)?;
    write_gt::<E>(sink, &value.t22)
}

/// Reads a `BT` element, each limb into its own destination.
pub fn read_bt<E: PairingEngine>(source: &mut impl Read) -> Result<BT<E>, Error> {
    let t11 = read_gt::<E>(source)?;
    let t12 = read_gt::<E>(source)?;
    let t21 = read_gt::<E>(source)?;
    let t22 = read_gt::<E>(source)?;
    Ok(BT::new(t11, t12, t21, t22))
}

const CRS_PUBLIC: u8 = 0;
const CRS_EXTRACT: u8 = 1;
const CRS_ZK: u8 = 2;
const CRS_PRIVATE: u8 = 3;

/// Writes a CRS: the four base commitments, a 1-byte type tag, and
/// whatever `w1`/`w2` or trapdoor scalars that type carries.
pub fn write_crs<E: PairingEngine>(sink: &mut impl Write, crs: &Crs<E>) -> Result<(), Error> {
    write_b1::<E>(sink, &crs.u1())?;
    write_b1::<E>(sink, &crs.v1())?;
    write_b2::<E>(sink, &crs.u2())?;
    write_b2::<E>(sink, &crs.v2())?;
    match crs.w1() {
        Some(w1) => {
            write_tag(
                sink,
                match crs.rho1() {
                    Some(_) if crs.is_binding() => CRS_EXTRACT,
                    Some(_) => CRS_ZK,
                    None => CRS_PUBLIC,
                },
            )?;
            write_b1::<E>(sink, &w1)?;
            write_b2::<E>(sink, &crs.w2().expect("w1/w2 are written together"))?;
            if let (Some(rho1), Some(eps1), Some(rho2), Some(eps2)) =
                (crs.rho1(), crs.eps1(), crs.rho2(), crs.eps2())
            {
                write_fp::<E>(sink, &rho1)?;
                write_fp::<E>(sink, &eps1)?;
                write_fp::<E>(sink, &rho2)?;
                write_fp::<E>(sink, &eps2)?;
            }
            Ok(())
        }
        None => {
            write_tag(sink, CRS_PRIVATE)?;
            let rho_p = crs.rho_p().expect("PRIVATE CRS carries rho_P");
            let sigma_p = crs.sigma_p().expect("PRIVATE CRS carries sigma_P");
            write_fp::<E>(sink, &rho_p)?;
            write_fp::<E>(sink, &sigma_p)
        }
    }
}

/// Reads a CRS written by [`write_crs`].
pub fn read_crs<E: PairingEngine>(source: &mut impl Read) -> Result<Crs<E>, Error> {
    let u1 = read_b1::<E>(source)?;
    let v1 = read_b1::<E>(source)?;
    let u2 = read_b2::<E>(source)?;
    let v2 = read_b2::<E>(source)?;
    let tag = read_tag(source)?;
    match tag {
        CRS_PUBLIC | CRS_EXTRACT | CRS_ZK => {
            let w1 = read_b1::<E>(source)?;
            let w2 = read_b2::<E>(source)?;
            let kind = match tag {
                CRS_PUBLIC => CrsKind::Public,
                CRS_EXTRACT => CrsKind::Extract {
                    rho1: read_fp::<E>(source)?,
                    eps1: read_fp::<E>(source)?,
                    rho2: read_fp::<E>(source)?,
                    eps2: read_fp::<E>(source)?,
                },
                CRS_ZK => CrsKind::Zk {
                    rho1: read_fp::<E>(source)?,
                    eps1: read_fp::<E>(source)?,
                    rho2: read_fp::<E>(source)?,
                    eps2: read_fp::<E>(source)?,
                },
                _ => unreachable!(),
            };
            Ok(Crs::from_parts(u1, v1, Some(w1), u2, v2, Some(w2), kind))
        }
        CRS_PRIVATE => {
            let rho_p = read_fp::<E>(source)?;
            let sigma_p = read_fp::<E>(source)?;
            Ok(Crs::from_parts(
                u1,
                v1,
                None,
                u2,
                v2,
                None,
                CrsKind::Private { rho_p, sigma_p },
            ))
        }
        _ => Err(Error::BadProof("unknown CRS type tag")),
    }
}

// ---------------------------------------------------------------------
// Tagged expression nodes.
// ---------------------------------------------------------------------

const NODE_VARIABLE: u8 = 0;
const NODE_CONST_INDEX: u8 = 1;
const NODE_CONST_VALUE: u8 = 2;
const NODE_BASE: u8 = 3;
const NODE_PAIR: u8 = 4;
const NODE_SCALAR: u8 = 5;

/// Writes a F_p node.
pub fn write_node_fp<E: PairingEngine>(
    sink: &mut impl Write,
    node: &FpNode<E>,
) -> Result<(), Error> {
    match node {
        FpNode::Variable(i) => {
            write_tag(sink, NODE_VARIABLE)?;
            write_u16(sink, *i)
        }
        FpNode::ConstIndex(i) => {
            write_tag(sink, NODE_CONST_INDEX)?;
            write_u16(sink, *i)
        }
        FpNode::ConstValue(v) => {
            write_tag(sink, NODE_CONST_VALUE)?;
            write_fp::<E>(sink, v)
        }
        FpNode::Base => write_tag(sink, NODE_BASE),
        FpNode::Pair(a, b) => {
            write_tag(sink, NODE_PAIR)?;
            write_node_fp::<E>(sink, a)?;
            write_node_fp::<E>(sink, b)
        }
        FpNode::Scalar(a, b) => {
            write_tag(sink, NODE_SCALAR)?;
            write_node_fp::<E>(sink, a)?;
            write_node_fp::<E>(sink, b)
        }
    }
}

/// Reads a F_p node written by [`write_node_fp`].
pub fn read_node_fp<E: PairingEngine>(source: &mut impl Read) -> Result<Arc<FpNode<E>>, Error> {
    let tag = read_tag(source)?;
    Ok(Arc::new(match tag {
        NODE_VARIABLE => FpNode::Variable(read_u16(source)?),
        NODE_CONST_INDEX => FpNode::ConstIndex(read_u16(source)?),
        NODE_CONST_VALUE => FpNode::ConstValue(read_fp::<E>(source)?),
        NODE_BASE => FpNode::Base,
        NODE_PAIR => FpNode::Pair(read_node_fp::<E>(source)?, read_node_fp::<E>(source)?),
        NODE_SCALAR => FpNode::Scalar(read_node_fp::<E>(source)?, read_node_fp::<E>(source)?),
        _ => return Err(Error::BadProof("unknown Fp node tag")),
    }))
}

/// Writes a G1 node. `Scalar`'s operands are written `(right, left)` —
/// the G1-typed factor first, then the F_p scalar — to mirror the side
/// the decoder reconstructs the commitment on.
pub fn write_node_g1<E: PairingEngine>(
    sink: &mut impl Write,
    node: &G1Node<E>,
) -> Result<(), Error> {
    match node {
        G1Node::Variable(i) => {
            write_tag(sink, NODE_VARIABLE)?;
            write_u16(sink, *i)
        }
        G1Node::ConstIndex(i) => {
            write_tag(sink, NODE_CONST_INDEX)?;
            write_u16(sink, *i)
        }
        G1Node::ConstValue(v) => {
            write_tag(sink, NODE_CONST_VALUE)?;
            write_g1::<E>(sink, v)
        }
        G1Node::Base => write_tag(sink, NODE_BASE),
        G1Node::Pair(a, b) => {
            write_tag(sink, NODE_PAIR)?;
            write_node_g1::<E>(sink, a)?;
            write_node_g1::<E>(sink, b)
        }
        G1Node::Scalar(s, g) => {
            write_tag(sink, NODE_SCALAR)?;
            write_node_g1::<E>(sink, g)?;
            write_node_fp::<E>(sink, s)
        }
    }
}

/// Reads a G1 node written by [`write_node_g1`].
pub fn read_node_g1<E: PairingEngine>(source: &mut impl Read) -> Result<Arc<G1Node<E>>, Error> {
    let tag = read_tag(source)?;
    Ok(Arc::new(match tag {
        NODE_VARIABLE => G1Node::Variable(read_u16(source)?),
        NODE_CONST_INDEX => G1Node::ConstIndex(read_u16(source)?),
        NODE_CONST_VALUE => G1Node::ConstValue(read_g1::<E>(source)?),
        NODE_BASE => G1Node::Base,
        NODE_PAIR => G1Node::Pair(read_node_g1::<E>(source)?, read_node_g1::<E>(source)?),
        NODE_SCALAR => {
            let g = read_node_g1::<E>(source)?;
            let s = read_node_fp::<E>(source)?;
            G1Node::Scalar(s, g)
        }
        _ => return Err(Error::BadProof("unknown G1 node tag")),
    }))
}

/// Writes a G2 node; see [`write_node_g1`] for the `Scalar` operand order.
pub fn write_node_g2<E: PairingEngine>(
    sink: &mut impl Write,
    node: &G2Node<E>,
) -> Result<(), Error> {
    match node {
        G2Node::Variable(i) => {
            write_tag(sink, NODE_VARIABLE)?;
            write_u16(sink, *i)
        }
        G2Node::ConstIndex(i) => {
            write_tag(sink, NODE_CONST_INDEX)?;
            write_u16(sink, *i)
        }
        G2Node::ConstValue(v) => {
            write_tag(sink, NODE_CONST_VALUE)?;
            write_g2::<E>(sink, v)
        }
        G2Node::Base => write_tag(sink, NODE_BASE),
        G2Node::Pair(a, b) => {
            write_tag(sink, NODE_PAIR)?;
            write_node_g2::<E>(sink, a)?;
            write_node_g2::<E>(sink, b)
        }
        G2Node::Scalar(s, h) => {
            write_tag(sink, NODE_SCALAR)?;
            write_node_g2::<E>(sink, h)?;
            write_node_fp::<E>(sink, s)
        }
    }
}

/// Reads a G2 node written by [`write_node_g2`].
pub fn read_node_g2<E: PairingEngine>(source: &mut impl Read) -> Result<Arc<G2Node<E>>, Error> {
    let tag = read_tag(source)?;
    Ok(Arc::new(match tag {
        NODE_VARIABLE => G2Node::Variable(read_u16(source)?),
        NODE_CONST_INDEX => G2Node::ConstIndex(read_u16(source)?),
        NODE_CONST_VALUE => G2Node::ConstValue(read_g2::<E>(source)?),
        NODE_BASE => G2Node::Base,
        NODE_PAIR => G2Node::Pair(read_node_g2::<E>(source)?, read_node_g2::<E>(source)?),
        NODE_SCALAR => {
            let h = read_node_g2::<E>(source)?;
            let s = read_node_fp::<E>(source)?;
            G2Node::Scalar(s, h)
        }
        _ => return Err(Error::BadProof("unknown G2 node tag")),
    }))
}

const NODE_GT_CONST_INDEX: u8 = 0;
const NODE_GT_CONST_VALUE: u8 = 1;
const NODE_GT_BASE: u8 = 2;
const NODE_GT_PAIR: u8 = 3;
const NODE_GT_PAIRING: u8 = 4;

/// Writes a GT node. GT carries no `Variable` tag: the scheme supports
/// no GT witnesses.
pub fn write_node_gt<E: PairingEngine>(
    sink: &mut impl Write,
    node: &GTNode<E>,
) -> Result<(), Error> {
    match node {
        GTNode::ConstIndex(i) => {
            write_tag(sink, NODE_GT_CONST_INDEX)?;
            write_u16(sink, *i)
        }
        GTNode::ConstValue(v) => {
            write_tag(sink, NODE_GT_CONST_VALUE)?;
            write_gt::<E>(sink, v)
        }
        GTNode::Base => write_tag(sink, NODE_GT_BASE),
        GTNode::Pair(a, b) => {
            write_tag(sink, NODE_GT_PAIR)?;
            write_node_gt::<E>(sink, a)?;
            write_node_gt::<E>(sink, b)
        }
        GTNode::Pairing(a, b) => {
            write_tag(sink, NODE_GT_PAIRING)?;
            write_node_g1::<E>(sink, a)?;
            write_node_g2::<E>(sink, b)
        }
    }
}

/// Reads a GT node written by [`write_node_gt`].
pub fn read_node_gt<E: PairingEngine>(source: &mut impl Read) -> Result<Arc<GTNode<E>>, Error> {
    let tag = read_tag(source)?;
    Ok(Arc::new(match tag {
        NODE_GT_CONST_INDEX => GTNode::ConstIndex(read_u16(source)?),
        NODE_GT_CONST_VALUE => GTNode::ConstValue(read_gt::<E>(source)?),
        NODE_GT_BASE => GTNode::Base,
        NODE_GT_PAIR => GTNode::Pair(read_node_gt::<E>(source)?, read_node_gt::<E>(source)?),
        NODE_GT_PAIRING => {
            GTNode::Pairing(read_node_g1::<E>(source)?, read_node_g2::<E>(source)?)
        }
        _ => return Err(Error::BadProof("unknown GT node tag")),
    }))
}

// ---------------------------------------------------------------------
// Proof model wire layout.
// ---------------------------------------------------------------------

fn write_bool_vec(sink: &mut impl Write, bits: &[bool]) -> Result<(), Error> {
    write_u16(sink, bits.len() as u16)?;
    for b in bits {
        sink.write_all(&[*b as u8])?;
    }
    Ok(())
}

fn read_bool_vec(source: &mut impl Read) -> Result<Vec<bool>, Error> {
    let len = read_u16(source)? as usize;
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push(read_tag(source)? != 0);
    }
    Ok(out)
}

fn write_tag_vec(sink: &mut impl Write, tags: &[EqType]) -> Result<(), Error> {
    write_u16(sink, tags.len() as u16)?;
    for t in tags {
        sink.write_all(&[*t as u8])?;
    }
    Ok(())
}

fn eq_type_from_u8(b: u8) -> Result<EqType, Error> {
    use EqType::*;
    Ok(match b {
        0 => Ppe,
        1 => PEncG,
        2 => PConstG,
        3 => PEncH,
        4 => PConstH,
        5 => MeG,
        6 => MEncG,
        7 => MConstG,
        8 => MLinG,
        9 => MeH,
        10 => MEncH,
        11 => MConstH,
        12 => MLinH,
        13 => Qe,
        14 => QConstG,
        15 => QConstH,
        _ => return Err(Error::BadProof("unknown equation classification tag")),
    })
}

fn read_tag_vec(source: &mut impl Read) -> Result<Vec<EqType>, Error> {
    let len = read_u16(source)? as usize;
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push(eq_type_from_u8(read_tag(source)?)?);
    }
    Ok(out)
}

const COMMIT_NORMAL: u8 = 0;
const COMMIT_SELECTED: u8 = 1;
const COMMIT_ALL_ENCRYPTED: u8 = 2;

fn commit_type_to_u8(c: CommitType) -> u8 {
    match c {
        CommitType::NormalCommit => COMMIT_NORMAL,
        CommitType::SelectedEncryption => COMMIT_SELECTED,
        CommitType::AllEncrypted => COMMIT_ALL_ENCRYPTED,
    }
}

fn commit_type_from_u8(b: u8) -> Result<CommitType, Error> {
    Ok(match b {
        COMMIT_NORMAL => CommitType::NormalCommit,
        COMMIT_SELECTED => CommitType::SelectedEncryption,
        COMMIT_ALL_ENCRYPTED => CommitType::AllEncrypted,
        _ => return Err(Error::BadProof("unknown CommitType tag")),
    })
}

/// Writes a finalized [`ProofModel`] to `sink` (the "Proof
/// model" layout): the `CommitType` and ZK flag, the seven dense counts,
/// the four equation vectors, the encryption plan and classification
/// tags, and the three auxiliary-witness node lists.
///
/// `side_fp_var`/`side_fp_const` are not part of the wire table
/// names explicitly, but the verifier cannot walk a F_p equation without
/// knowing which side each variable/constant commits on and recomputing
/// that would mean re-running the normalizer's side-selection pass on
/// already-normalized equations; we serialize them as two more bit
/// vectors immediately after the ZK flag rather than re-derive them.
pub fn write_model<E: PairingEngine>(
    sink: &mut impl Write,
    model: &ProofModel<E>,
) -> Result<(), Error> {
    if !model.is_finalized() {
        return Err(Error::NotFinalized);
    }
    write_tag(sink, commit_type_to_u8(model.commit_type))?;
    write_tag(sink, model.zk as u8)?;
    write_bool_vec(sink, &model.side_fp_var)?;
    write_bool_vec(sink, &model.side_fp_const)?;

    write_u16(sink, model.n_vars_fp as u16)?;
    write_u16(sink, model.n_consts_fp as u16)?;
    write_u16(sink, model.n_vars_g1 as u16)?;
    write_u16(sink, model.n_consts_g1 as u16)?;
    write_u16(sink, model.n_vars_g2 as u16)?;
    write_u16(sink, model.n_consts_g2 as u16)?;
    write_u16(sink, model.n_consts_gt as u16)?;

    write_u16(sink, model.eqs_fp.len() as u16)?;
    for (l, r) in &model.eqs_fp {
        write_node_fp::<E>(sink, l)?;
        write_node_fp::<E>(sink, r)?;
    }
    write_u16(sink, model.eqs_g1.len() as u16)?;
    for (l, r) in &model.eqs_g1 {
        write_node_g1::<E>(sink, l)?;
        write_node_g1::<E>(sink, r)?;
    }
    write_u16(sink, model.eqs_g2.len() as u16)?;
    for (l, r) in &model.eqs_g2 {
        write_node_g2::<E>(sink, l)?;
        write_node_g2::<E>(sink, r)?;
    }
    write_u16(sink, model.eqs_gt.len() as u16)?;
    for (l, r) in &model.eqs_gt {
        write_node_gt::<E>(sink, l)?;
        write_node_gt::<E>(sink, r)?;
    }

    write_bool_vec(sink, &model.enc.enc_g1)?;
    write_bool_vec(sink, &model.enc.enc_g2)?;
    write_tag_vec(sink, &model.ty_fp)?;
    write_tag_vec(sink, &model.ty_g1)?;
    write_tag_vec(sink, &model.ty_g2)?;
    write_tag_vec(sink, &model.ty_gt)?;

    write_u16(sink, model.additional_fp.len() as u16)?;
    for n in &model.additional_fp {
        write_node_fp::<E>(sink, n)?;
    }
    write_u16(sink, model.additional_g1.len() as u16)?;
    for n in &model.additional_g1 {
        write_node_g1::<E>(sink, n)?;
    }
    write_u16(sink, model.additional_g2.len() as u16)?;
    for n in &model.additional_g2 {
        write_node_g2::<E>(sink, n)?;
    }

    Ok(())
}

/// Reads a [`ProofModel`] written by [`write_model`]. The result is
/// already finalized: re-running [`ProofModel::finalize`] on it is a
/// no-op.
pub fn read_model<E: PairingEngine>(source: &mut impl Read) -> Result<ProofModel<E>, Error> {
    let commit_type = commit_type_from_u8(read_tag(source)?)?;
    let zk = read_tag(source)? != 0;
    let side_fp_var = read_bool_vec(source)?;
    let side_fp_const = read_bool_vec(source)?;

    let n_vars_fp = read_u16(source)? as usize;
    let n_consts_fp = read_u16(source)? as usize;
    let n_vars_g1 = read_u16(source)? as usize;
    let n_consts_g1 = read_u16(source)? as usize;
    let n_vars_g2 = read_u16(source)? as usize;
    let n_consts_g2 = read_u16(source)? as usize;
    let n_consts_gt = read_u16(source)? as usize;

    let n_eqs_fp = read_u16(source)? as usize;
    let mut eqs_fp = Vec::with_capacity(n_eqs_fp);
    for _ in 0..n_eqs_fp {
        eqs_fp.push((read_node_fp::<E>(source)?, read_node_fp::<E>(source)?));
    }
    let n_eqs_g1 = read_u16(source)? as usize;
    let mut eqs_g1 = Vec::with_capacity(n_eqs_g1);
    for _ in 0..n_eqs_g1 {
        eqs_g1.push((read_node_g1::<E>(source)?, read_node_g1::<E>(source)?));
    }
    let n_eqs_g2 = read_u16(source)? as usize;
    let mut eqs_g2 = Vec::with_capacity(n_eqs_g2);
    for _ in 0..n_eqs_g2 {
        eqs_g2.push((read_node_g2::<E>(source)?, read_node_g2::<E>(source)?));
    }
    let n_eqs_gt = read_u16(source)? as usize;
    let mut eqs_gt = Vec::with_capacity(n_eqs_gt);
    for _ in 0..n_eqs_gt {
        eqs_gt.push((read_node_gt::<E>(source)?, read_node_gt::<E>(source)?));
    }

    let enc_g1 = read_bool_vec(source)?;
    let enc_g2 = read_bool_vec(source)?;
    let ty_fp = read_tag_vec(source)?;
    let ty_g1 = read_tag_vec(source)?;
    let ty_g2 = read_tag_vec(source)?;
    let ty_gt = read_tag_vec(source)?;

    let n_add_fp = read_u16(source)? as usize;
    let mut additional_fp = Vec::with_capacity(n_add_fp);
    for _ in 0..n_add_fp {
        additional_fp.push(read_node_fp::<E>(source)?);
    }
    let n_add_g1 = read_u16(source)? as usize;
    let mut additional_g1 = Vec::with_capacity(n_add_g1);
    for _ in 0..n_add_g1 {
        additional_g1.push(read_node_g1::<E>(source)?);
    }
    let n_add_g2 = read_u16(source)? as usize;
    let mut additional_g2 = Vec::with_capacity(n_add_g2);
    for _ in 0..n_add_g2 {
        additional_g2.push(read_node_g2::<E>(source)?);
    }

    Ok(ProofModel::from_parts(
        commit_type,
        zk,
        side_fp_var,
        side_fp_const,
        n_vars_fp,
        n_consts_fp,
        n_vars_g1,
        n_consts_g1,
        n_vars_g2,
        n_consts_g2,
        n_consts_gt,
        eqs_fp,
        eqs_g1,
        eqs_g2,
        eqs_gt,
        enc_g1,
        enc_g2,
        ty_fp,
        ty_g1,
        ty_g2,
        ty_gt,
        additional_fp,
        additional_g1,
        additional_g2,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{e, fp_var, g1_var, g2_var};
    use crate::model::ProofData;
    use ark_bls12_381::Bls12_381;
    use rand::thread_rng;

    type E = Bls12_381;

    #[test]
    fn fp_node_round_trips() {
        let node = fp_var::<E>(3).0;
        let mut wire = Vec::new();
        write_node_fp::<E>(&mut wire, &node).unwrap();
        let mut source = wire.as_slice();
        let back = read_node_fp::<E>(&mut source).unwrap();
        assert_eq!(format!("{:?}", node), format!("{:?}", back));
        assert!(source.is_empty());
    }

    #[test]
    fn gt_pairing_node_round_trips() {
        let a = g1_var::<E>(0);
        let b = g2_var::<E>(1);
        let node = e(a, b).0;
        let mut wire = Vec::new();
        write_node_gt::<E>(&mut wire, &node).unwrap();
        let mut source = wire.as_slice();
        let back = read_node_gt::<E>(&mut source).unwrap();
        assert_eq!(format!("{:?}", node), format!("{:?}", back));
    }

    #[test]
    fn crs_round_trips() {
        let mut rng = thread_rng();
        let crs = Crs::<E>::new(true, &mut rng);
        let mut wire = Vec::new();
        write_crs::<E>(&mut wire, &crs).unwrap();
        let mut source = wire.as_slice();
        let back = read_crs::<E>(&mut source).unwrap();
        assert_eq!(crs.u1(), back.u1());
        assert_eq!(crs.is_binding(), back.is_binding());
    }

    #[test]
    fn model_round_trips_and_still_proves() {
        let mut model = ProofModel::<E>::new(CommitType::SelectedEncryption);
        let x = fp_var::<E>(0);
        let y = fp_var::<E>(1);
        model.add_equation_fp(x.clone() * y.clone(), x * y).unwrap();
        model.finalize().unwrap();

        let mut wire = Vec::new();
        write_model::<E>(&mut wire, &model).unwrap();
        let mut source = wire.as_slice();
        let back = read_model::<E>(&mut source).unwrap();

        assert!(back.is_finalized());
        assert_eq!(model.is_zero_knowledge(), back.is_zero_knowledge());
        assert_eq!(model.commit_type(), back.commit_type());

        let mut rng = thread_rng();
        let crs = Crs::<E>::new(false, &mut rng);
        let data = ProofData::<E> {
            priv_fp: vec![Fp::<E>::from(3u64), Fp::<E>::from(5u64)],
            ..ProofData::<E>::default()
        };

        let mut proof_wire = Vec::new();
        crate::prove::write_proof(&back, &crs, &data, &mut proof_wire, &mut rng).unwrap();
        let mut proof_source = proof_wire.as_slice();
        assert!(crate::verify::check_proof(&back, &crs, &data, &mut proof_source).unwrap());
    }
}
