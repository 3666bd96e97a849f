// Copyright (c) 2025-2026, The rvve contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use std::ops::{Index, IndexMut};

use super::{
  BinModel, ContextCatalog, CtxSpan, ProbModel, GR_STAT_SETS, MAX_QP,
  RATE_INIT_ID,
};

/// Flat bank of probability models for one coding state.
///
/// A default-constructed bank is an empty placeholder; a live bank holds
/// exactly the catalog's registered context count and keeps that size for
/// its whole life. `Clone` deep-copies the model array, so clones never
/// share mutable state.
#[derive(Clone, Default)]
pub struct CtxBank<M: BinModel = ProbModel> {
  models: Box<[M]>,
}

impl<M: BinModel> CtxBank<M> {
  /// Allocate a live bank sized to `catalog`, all models in their default
  /// state.
  pub fn for_catalog(catalog: &ContextCatalog) -> Self {
    CtxBank {
      models: vec![M::default(); catalog.num_contexts()].into_boxed_slice(),
    }
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.models.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.models.is_empty()
  }

  /// Seed every model from the chosen initialization row and apply the
  /// catalog's adaptation rates.
  pub fn init(&mut self, catalog: &ContextCatalog, qp: i32, init_id: usize) {
    let init_table = catalog.init_table(init_id);
    assert_eq!(
      self.models.len(),
      init_table.len(),
      "init table {init_id} does not match the bank size"
    );
    let rate_table = catalog.init_table(RATE_INIT_ID);
    assert_eq!(
      self.models.len(),
      rate_table.len(),
      "rate table does not match the bank size"
    );
    let qp = qp.clamp(0, MAX_QP);
    for (k, m) in self.models.iter_mut().enumerate() {
      m.init(qp, init_table[k]);
      m.set_log2_window_size(rate_table[k]);
    }
  }

  /// Reconfigure every model's adaptation window, leaving probabilities
  /// untouched.
  pub fn set_window_sizes(&mut self, rates: &[u8]) {
    assert_eq!(
      self.models.len(),
      rates.len(),
      "window-size table does not match the bank size"
    );
    for (m, &rate) in self.models.iter_mut().zip(rates) {
      m.set_log2_window_size(rate);
    }
  }

  /// Packed probability words of every model, for continuation across slice
  /// or picture boundaries.
  pub fn save_prob_states(&self) -> Vec<u16> {
    self.models.iter().map(|m| m.state()).collect()
  }

  /// Reload packed probability words saved by
  /// [`save_prob_states`](Self::save_prob_states).
  pub fn load_prob_states(&mut self, states: &[u16]) {
    assert_eq!(
      self.models.len(),
      states.len(),
      "probability-state table does not match the bank size"
    );
    for (m, &word) in self.models.iter_mut().zip(states) {
      m.set_state(word);
    }
  }
}

impl<M: BinModel> Index<usize> for CtxBank<M> {
  type Output = M;
  #[inline]
  fn index(&self, ctx_idx: usize) -> &M {
    &self.models[ctx_idx]
  }
}

impl<M: BinModel> IndexMut<usize> for CtxBank<M> {
  #[inline]
  fn index_mut(&mut self, ctx_idx: usize) -> &mut M {
    &mut self.models[ctx_idx]
  }
}

/// Everything the arithmetic coder reads and writes while coding one slice:
/// the context bank plus the Golomb-Rice adaptation statistics used by the
/// coefficient-escape paths.
///
/// Cloning an `EntropyContext` is the snapshot primitive of the encoder's
/// mode-decision search: take a copy, code the candidate through it, compare
/// costs, then either keep the mutated copy or drop it to roll back. Copies
/// are O(context count) and fully independent, so concurrent coding units
/// can each own one without synchronization.
#[derive(Clone, Default)]
pub struct EntropyContext {
  bank: CtxBank<ProbModel>,
  gr_adapt_stats: [u32; GR_STAT_SETS],
}

impl EntropyContext {
  /// A live, coding-ready context for `catalog`.
  pub fn new(catalog: &ContextCatalog) -> Self {
    EntropyContext {
      bank: CtxBank::for_catalog(catalog),
      gr_adapt_stats: [0; GR_STAT_SETS],
    }
  }

  /// True for the default placeholder, which cannot be coded through.
  #[inline]
  pub fn is_dummy(&self) -> bool {
    self.bank.is_empty()
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.bank.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.bank.is_empty()
  }

  /// Initialize for a slice: seed all models from the `init_id` row at `qp`
  /// and reset the Golomb-Rice statistics.
  pub fn init(&mut self, catalog: &ContextCatalog, qp: i32, init_id: usize) {
    self.bank.init(catalog, qp, init_id);
    self.gr_adapt_stats = [0; GR_STAT_SETS];
  }

  /// Model of the `k`-th context in `span`.
  #[inline]
  pub fn model(&self, span: CtxSpan, k: usize) -> &ProbModel {
    &self.bank[span.ctx_idx(k)]
  }

  #[inline]
  pub fn model_mut(&mut self, span: CtxSpan, k: usize) -> &mut ProbModel {
    &mut self.bank[span.ctx_idx(k)]
  }

  /// Copy the models inside `span` from `src`, leaving all other slots
  /// untouched. The partial-restore primitive for searches that only
  /// perturb one syntax family (pass a span union to restore several).
  pub fn copy_span(&mut self, src: &EntropyContext, span: CtxSpan) {
    assert_eq!(
      self.bank.len(),
      src.bank.len(),
      "cannot copy a span between banks of different sizes"
    );
    let lo = span.offset as usize;
    let hi = lo + span.size as usize;
    self.bank.models[lo..hi].clone_from_slice(&src.bank.models[lo..hi]);
  }

  pub fn set_window_sizes(&mut self, rates: &[u8]) {
    self.bank.set_window_sizes(rates);
  }

  pub fn save_prob_states(&self) -> Vec<u16> {
    self.bank.save_prob_states()
  }

  pub fn load_prob_states(&mut self, states: &[u16]) {
    self.bank.load_prob_states(states);
  }

  /// Golomb-Rice adaptation statistic for one syntax group.
  #[inline]
  pub fn gr_stat(&self, set: usize) -> u32 {
    self.gr_adapt_stats[set]
  }

  #[inline]
  pub fn gr_stat_mut(&mut self, set: usize) -> &mut u32 {
    &mut self.gr_adapt_stats[set]
  }
}

impl Index<usize> for EntropyContext {
  type Output = ProbModel;
  #[inline]
  fn index(&self, ctx_idx: usize) -> &ProbModel {
    &self.bank[ctx_idx]
  }
}

impl IndexMut<usize> for EntropyContext {
  #[inline]
  fn index_mut(&mut self, ctx_idx: usize) -> &mut ProbModel {
    &mut self.bank[ctx_idx]
  }
}

#[cfg(test)]
mod tests {
  use super::super::SliceType;
  use super::*;
  use pretty_assertions::assert_eq;

  fn live_ctx(qp: i32, slice: SliceType) -> (ContextCatalog, EntropyContext) {
    let catalog = ContextCatalog::new();
    let mut ctx = EntropyContext::new(&catalog);
    ctx.init(&catalog, qp, slice.init_id());
    (catalog, ctx)
  }

  #[test]
  fn live_bank_matches_catalog_size() {
    let catalog = ContextCatalog::new();
    let bank: CtxBank = CtxBank::for_catalog(&catalog);
    assert_eq!(bank.len(), catalog.num_contexts());
    assert!(CtxBank::<ProbModel>::default().is_empty());
    assert!(EntropyContext::default().is_dummy());
  }

  #[test]
  fn init_seeds_every_slot_with_interior_states() {
    let (_, ctx) = live_ctx(32, SliceType::I);
    for k in 0..ctx.len() {
      let word = ctx[k].state();
      assert!(word > 0, "context {k} initialized to zero");
      assert!(u32::from(word) < 2 * 32768, "context {k} left the probability range");
    }
  }

  #[test]
  fn skip_flag_group_initializes_deterministically() {
    let (cat_a, ctx_a) = live_ctx(32, SliceType::I);
    let (_, ctx_b) = live_ctx(32, SliceType::I);
    for k in 0..cat_a.skip_flag.size as usize {
      let a = ctx_a.model(cat_a.skip_flag, k);
      assert_eq!(a, ctx_b.model(cat_a.skip_flag, k));
      assert!(a.state() > 0);
    }
  }

  #[test]
  #[should_panic(expected = "does not match the bank size")]
  fn init_rejects_a_dummy_context() {
    let catalog = ContextCatalog::new();
    EntropyContext::default().init(&catalog, 32, SliceType::I.init_id());
  }

  #[test]
  #[should_panic(expected = "window-size table does not match")]
  fn window_sizes_of_the_wrong_length_are_rejected() {
    let (_, mut ctx) = live_ctx(32, SliceType::B);
    ctx.set_window_sizes(&[8, 8, 8]);
  }

  #[test]
  #[should_panic(expected = "probability-state table does not match")]
  fn prob_states_of_the_wrong_length_are_rejected() {
    let (_, mut ctx) = live_ctx(32, SliceType::B);
    let mut states = ctx.save_prob_states();
    states.pop();
    ctx.load_prob_states(&states);
  }

  #[test]
  fn snapshot_is_a_deep_copy() {
    let (_, ctx_a) = live_ctx(27, SliceType::P);
    let before: Vec<ProbModel> = (0..ctx_a.len()).map(|k| ctx_a[k]).collect();

    let mut ctx_b = ctx_a.clone();
    for k in 0..ctx_b.len() {
      ctx_b[k].update(true);
    }
    *ctx_b.gr_stat_mut(0) += 1;

    for k in 0..ctx_a.len() {
      assert_eq!(ctx_a[k], before[k], "snapshot aliased context {k}");
      assert_ne!(ctx_b[k], before[k], "mutation missed context {k}");
    }
    assert_eq!(ctx_a.gr_stat(0), 0);
    assert_eq!(ctx_b.gr_stat(0), 1);
  }

  #[test]
  fn try_and_rollback_search_pattern() {
    let (catalog, ctx) = live_ctx(32, SliceType::B);
    let baseline = ctx.save_prob_states();

    // candidate A: code the skip flag as 1, candidate B: as 0 three times
    let mut trial = ctx.clone();
    let mut cost_a = 0u64;
    trial.model_mut(catalog.skip_flag, 0).est_frac_bits_update(true, &mut cost_a);

    let mut cost_b = 0u64;
    let mut trial_b = ctx.clone();
    for _ in 0..3 {
      trial_b
        .model_mut(catalog.skip_flag, 0)
        .est_frac_bits_update(false, &mut cost_b);
    }

    assert!(cost_a > 0 && cost_b > 0);
    assert_ne!(cost_a, cost_b);
    // dropping the rejected trial is the whole rollback
    drop(trial_b);
    assert_eq!(ctx.save_prob_states(), baseline);
  }

  #[test]
  fn span_copy_restores_only_the_spanned_slots() {
    let (catalog, mut ctx) = live_ctx(32, SliceType::I);
    let snapshot = ctx.clone();

    let inside = catalog.sao;
    let outside = catalog.skip_flag;
    ctx.model_mut(inside, 0).update(true);
    ctx.model_mut(inside, 1).update(true);
    ctx.model_mut(outside, 0).update(true);

    ctx.copy_span(&snapshot, inside);
    for k in 0..inside.size as usize {
      assert_eq!(ctx.model(inside, k), snapshot.model(inside, k));
    }
    assert_ne!(ctx.model(outside, 0), snapshot.model(outside, 0));
  }

  #[test]
  fn prob_state_transplant_is_deterministic() {
    let (catalog, mut ctx) = live_ctx(37, SliceType::P);
    for k in 0..ctx.len() {
      ctx[k].update(k & 1 == 0);
    }
    let carried = ctx.save_prob_states();

    let mut next_a = EntropyContext::new(&catalog);
    let mut next_b = EntropyContext::new(&catalog);
    next_a.load_prob_states(&carried);
    next_b.load_prob_states(&carried);
    assert_eq!(next_a.save_prob_states(), next_b.save_prob_states());
    // and the rates can be re-applied independently of the probabilities
    next_a.set_window_sizes(catalog.init_table(RATE_INIT_ID));
  }
}
