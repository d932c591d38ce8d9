// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE
// or https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//
// Copyright (c) ZK-INFRA. All rights reserved.

//! The tagged expression DAG over F_p, G1, G2 and GT, and the
//! operator-overload `build` surface callers use to assemble equations.
//!
//! Every group's node type is a small tagged enum; subexpressions are
//! shared via `Arc` so the same node can be referenced from several
//! equations without cloning the tree underneath it. GT carries no
//! `Variable` node: the scheme supports no GT witnesses.

use crate::{Fp, G1, G2, GT};
use ark_ec::PairingEngine;
use core::ops::{Add, Mul};
use std::sync::Arc;

/// A node in the F_p expression DAG.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub enum FpNode<E: PairingEngine> {
    /// A secret witness, referenced by dense index.
    Variable(u16),
    /// A public constant, referenced by dense index into the caller's table.
    ConstIndex(u16),
    /// An inline literal public constant.
    ConstValue(Fp<E>),
    /// The distinguished base element, `1`.
    Base,
    /// Field addition of two subexpressions.
    Pair(Arc<FpNode<E>>, Arc<FpNode<E>>),
    /// Field multiplication of two subexpressions.
    Scalar(Arc<FpNode<E>>, Arc<FpNode<E>>),
}

/// A node in the G1 expression DAG.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub enum G1Node<E: PairingEngine> {
    /// A secret witness, referenced by dense index.
    Variable(u16),
    /// A public constant, referenced by dense index.
    ConstIndex(u16),
    /// An inline literal public constant.
    ConstValue(G1<E>),
    /// The distinguished base (prime subgroup generator).
    Base,
    /// Group addition.
    Pair(Arc<G1Node<E>>, Arc<G1Node<E>>),
    /// Scalar multiplication `s · e`, `s` a F_p node.
    Scalar(Arc<FpNode<E>>, Arc<G1Node<E>>),
}

/// A node in the G2 expression DAG.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub enum G2Node<E: PairingEngine> {
    /// A secret witness, referenced by dense index.
    Variable(u16),
    /// A public constant, referenced by dense index.
    ConstIndex(u16),
    /// An inline literal public constant.
    ConstValue(G2<E>),
    /// The distinguished base (prime subgroup generator).
    Base,
    /// Group addition.
    Pair(Arc<G2Node<E>>, Arc<G2Node<E>>),
    /// Scalar multiplication `s · e`, `s` a F_p node.
    Scalar(Arc<FpNode<E>>, Arc<G2Node<E>>),
}

/// A node in the GT expression DAG. No `Variable`: GT carries no witnesses.
#[derive(derivative::Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub enum GTNode<E: PairingEngine> {
    /// A public constant, referenced by dense index.
    ConstIndex(u16),
    /// An inline literal public constant.
    ConstValue(GT<E>),
    /// The distinguished base, `e(base_G1, base_G2)`.
    Base,
    /// GT multiplication (the additive group operation, written `Pair` to
    /// match the other three node types).
    Pair(Arc<GTNode<E>>, Arc<GTNode<E>>),
    /// The bilinear map evaluated on a G1 and a G2 node.
    Pairing(Arc<G1Node<E>>, Arc<G2Node<E>>),
}

macro_rules! expr_wrapper {
    ($wrapper:ident, $node:ident) => {
        /// A shared handle to a node in the expression DAG, cloneable in
        /// O(1) and usable directly with the `+`/`*` operators below.
        #[derive(derivative::Derivative)]
        #[derivative(Clone(bound = ""), Debug(bound = ""))]
        pub struct $wrapper<E: PairingEngine>(pub Arc<$node<E>>);

        impl<E: PairingEngine> $wrapper<E> {
            /// Wraps a raw node.
            pub fn new(node: $node<E>) -> Self {
                Self(Arc::new(node))
            }

            /// The underlying node.
            pub fn node(&self) -> &$node<E> {
                &self.0
            }
        }

        impl<E: PairingEngine> Add for $wrapper<E> {
            type Output = Self;
            fn add(self, other: Self) -> Self {
                Self::new($node::Pair(self.0, other.0))
            }
        }
    };
}

expr_wrapper!(FpExpr, FpNode);
expr_wrapper!(G1Expr, G1Node);
expr_wrapper!(G2Expr, G2Node);
expr_wrapper!(GtExpr, GTNode);

impl<E: PairingEngine> Mul for FpExpr<E> {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Self::new(FpNode::Scalar(self.0, other.0))
    }
}

impl<E: PairingEngine> Mul<G1Expr<E>> for FpExpr<E> {
    type Output = G1Expr<E>;
    fn mul(self, other: G1Expr<E>) -> G1Expr<E> {
        G1Expr::new(G1Node::Scalar(self.0, other.0))
    }
}

impl<E: PairingEngine> Mul<G2Expr<E>> for FpExpr<E> {
    type Output = G2Expr<E>;
    fn mul(self, other: G2Expr<E>) -> G2Expr<E> {
        G2Expr::new(G2Node::Scalar(self.0, other.0))
    }
}

/// The bilinear map applied to two expression nodes, `e(a,b)`.
pub fn e<E: PairingEngine>(a: G1Expr<E>, b: G2Expr<E>) -> GtExpr<E> {
    GtExpr::new(GTNode::Pairing(a.0, b.0))
}

/// A secret F_p witness at dense index `i`.
pub fn fp_var<E: PairingEngine>(i: u16) -> FpExpr<E> {
    FpExpr::new(FpNode::Variable(i))
}
/// A public F_p constant at dense index `i`.
pub fn fp_const_index<E: PairingEngine>(i: u16) -> FpExpr<E> {
    FpExpr::new(FpNode::ConstIndex(i))
}
/// An inline F_p literal.
pub fn fp_const<E: PairingEngine>(value: Fp<E>) -> FpExpr<E> {
    FpExpr::new(FpNode::ConstValue(value))
}
/// The F_p base element, `1`.
pub fn fp_base<E: PairingEngine>() -> FpExpr<E> {
    FpExpr::new(FpNode::Base)
}

/// A secret G1 witness at dense index `i`.
pub fn g1_var<E: PairingEngine>(i: u16) -> G1Expr<E> {
    G1Expr::new(G1Node::Variable(i))
}
/// A public G1 constant at dense index `i`.
pub fn g1_const_index<E: PairingEngine>(i: u16) -> G1Expr<E> {
    G1Expr::new(G1Node::ConstIndex(i))
}
/// An inline G1 literal.
pub fn g1_const<E: PairingEngine>(value: G1<E>) -> G1Expr<E> {
    G1Expr::new(G1Node::ConstValue(value))
}
/// The G1 base element (prime subgroup generator).
pub fn g1_base<E: PairingEngine>() -> G1Expr<E> {
    G1Expr::new(G1Node::Base)
}

/// A secret G2 witness at dense index `i`.
pub fn g2_var<E: PairingEngine>(i: u16) -> G2Expr<E> {
    G2Expr::new(G2Node::Variable(i))
}
/// A public G2 constant at dense index `i`.
pub fn g2_const_index<E: PairingEngine>(i: u16) -> G2Expr<E> {
    G2Expr::new(G2Node::ConstIndex(i))
}
/// An inline G2 literal.
pub fn g2_const<E: PairingEngine>(value: G2<E>) -> G2Expr<E> {
    G2Expr::new(G2Node::ConstValue(value))
}
/// The G2 base element (prime subgroup generator).
pub fn g2_base<E: PairingEngine>() -> G2Expr<E> {
    G2Expr::new(G2Node::Base)
}

/// A public GT constant at dense index `i`.
pub fn gt_const_index<E: PairingEngine>(i: u16) -> GtExpr<E> {
    GtExpr::new(GTNode::ConstIndex(i))
}
/// An inline GT literal.
pub fn gt_const<E: PairingEngine>(value: GT<E>) -> GtExpr<E> {
    GtExpr::new(GTNode::ConstValue(value))
}
/// The GT base element, `e(base_G1, base_G2)`.
pub fn gt_base<E: PairingEngine>() -> GtExpr<E> {
    GtExpr::new(GTNode::Base)
}
