// Copyright (c) 2025-2026, The rvve contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

//! Entropy-coding core of a VVC-style block video codec.
//!
//! The crate provides the context-adaptive probability machinery of a CABAC
//! entropy coder and the binary arithmetic coder that consumes it:
//!
//! - [`ProbModel`]: the two-window adaptive binary probability estimator,
//!   one per context slot.
//! - [`ContextCatalog`]: the immutable catalogue of every context group the
//!   codec codes through, with per-slice-type initialization rows.
//! - [`EntropyContext`]: the per-slice bank of probability models. Cloning
//!   it is the snapshot primitive the encoder's mode-decision search uses to
//!   try a coding alternative and roll back.
//! - [`BinEncoder`] / [`BinDecoder`]: the low/range interval coder pair.
//!
//! All state is in-memory and single-threaded per coding context; concurrent
//! coding units each own an independent [`EntropyContext`] clone.

pub mod context;
pub mod ec;

pub use context::{
  BinModel, ContextCatalog, CtxBank, CtxSpan, EntropyContext, ProbModel,
  SliceType,
};
pub use ec::{BinDecoder, BinEncoder, EntropyError};
