// Copyright (c) 2025-2026, The rvve contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

//! Adaptive context models and their management.
//!
//! A *context* is one adaptive probability slot, selected by syntax-element
//! type and position. Contexts live in a flat bank ([`CtxBank`]) addressed
//! through [`CtxSpan`] handles handed out by the [`ContextCatalog`], and each
//! slot is a [`ProbModel`] updated after every coded bin.

mod catalog;
mod prob_model;
mod store;
pub mod tables;

pub use catalog::*;
pub use prob_model::*;
pub use store::*;

/// Nominal probability precision in bits; probabilities are fractions of
/// `1 << PROB_BITS`.
pub const PROB_BITS: u32 = 15;
/// Precision of the first (slow) sub-estimate.
pub const PROB_BITS_0: u32 = 10;
/// Precision of the second (fast) sub-estimate.
pub const PROB_BITS_1: u32 = 14;
/// Field mask for the first sub-estimate.
pub const MASK_0: u16 = ((1 << PROB_BITS_0) - 1) << (PROB_BITS - PROB_BITS_0);
/// Field mask for the second sub-estimate.
pub const MASK_1: u16 = ((1 << PROB_BITS_1) - 1) << (PROB_BITS - PROB_BITS_1);

/// Largest quantization parameter; QPs are clipped to `[0, MAX_QP]` before
/// seeding initial probability states.
pub const MAX_QP: i32 = 63;

/// Fixed-point scale of estimated bit costs: one bit is `1 << SCALE_BITS`.
pub const SCALE_BITS: u32 = 15;

/// Initialization byte for context slots that are allocated to keep the
/// tables rectangular but never coded in this profile.
pub const UNUSED_CTX: u8 = 154;
/// Default adaptation-rate byte.
pub const DEFAULT_RATE: u8 = 8;

/// Number of slice types (I, P, B) with dedicated initialization rows.
pub const NUM_SLICE_TYPES: usize = 3;
/// Number of initialization tables: one row per slice type plus the
/// adaptation-rate row.
pub const NUM_INIT_TABLES: usize = NUM_SLICE_TYPES + 1;
/// Init-table id of the adaptation-rate row.
pub const RATE_INIT_ID: usize = NUM_SLICE_TYPES;

/// Number of Golomb-Rice adaptation statistics slots carried per coding
/// context.
pub const GR_STAT_SETS: usize = 4;
