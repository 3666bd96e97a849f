// Copyright (c) 2025-2026, The rvve contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use super::tables::{FRAC_BITS, INIT_STATE_TO_COUNT, RENORM_TABLE_32};
use super::{MASK_0, MASK_1, MAX_QP, SCALE_BITS};

/// Capabilities a probability-model kind must provide to live in a
/// [`CtxBank`](super::CtxBank): seeding from QP, per-bin adaptation, and raw
/// state transplant for cross-slice continuation.
pub trait BinModel: Clone + Default {
  /// Derive the initial state from the (pre-clipped) QP and the context's
  /// 8-bit initialization byte.
  fn init(&mut self, qp: i32, init_val: u8);
  /// Configure how fast the estimate reacts to future observations.
  fn set_log2_window_size(&mut self, log2_window_size: u8);
  /// Adapt toward an observed bin.
  fn update(&mut self, bin: bool);
  /// Packed probability word, for bulk save.
  fn state(&self) -> u16;
  /// Reload a packed probability word saved by [`BinModel::state`].
  fn set_state(&mut self, word: u16);
  /// Cost of coding `bin` under the current estimate, in fractional bits
  /// scaled by `1 << SCALE_BITS`.
  fn est_frac_bits(&self, bin: bool) -> u32;
}

/// Adaptive binary probability estimator with two exponential windows.
///
/// Two fixed-point sub-estimates track the probability of a `1` bin at
/// different adaptation rates; the coder works on their mean. Both are kept
/// strictly inside the open probability interval, so neither bin value ever
/// becomes impossible. The whole state is three words, making bank-wide
/// snapshots a flat memcpy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbModel {
  state: [u16; 2],
  rate: u8,
}

impl Default for ProbModel {
  fn default() -> Self {
    let half = 1 << (super::PROB_BITS - 1);
    let mut m = ProbModel { state: [half, half], rate: 0 };
    m.set_log2_window_size(super::DEFAULT_RATE);
    m
  }
}

impl BinModel for ProbModel {
  fn init(&mut self, qp: i32, init_val: u8) {
    let qp = qp.clamp(0, MAX_QP);
    let slope = i32::from(init_val >> 4) * 5 - 45;
    let offset = i32::from(init_val & 15) * 8 - 16;
    let idx = (((slope * qp) >> 4) + offset).clamp(0, 127);
    let count = INIT_STATE_TO_COUNT[idx as usize];
    self.state[0] = count & MASK_0;
    self.state[1] = count & MASK_1;
  }

  fn set_log2_window_size(&mut self, log2_window_size: u8) {
    let rate0 = 2 + ((log2_window_size >> 2) & 3);
    let rate1 = 3 + rate0 + (log2_window_size & 3);
    assert!(
      rate1 <= 9,
      "adaptation-rate byte {log2_window_size} puts the fast window shift at \
       {rate1}, past the representable maximum of 9"
    );
    self.rate = (rate0 << 4) | rate1;
  }

  fn update(&mut self, bin: bool) {
    let rate0 = self.rate >> 4;
    let rate1 = self.rate & 15;
    self.state[0] -= (self.state[0] >> rate0) & MASK_0;
    self.state[1] -= (self.state[1] >> rate1) & MASK_1;
    if bin {
      self.state[0] += (0x7FFF >> rate0) & MASK_0;
      self.state[1] += (0x7FFF >> rate1) & MASK_1;
    }
  }

  fn state(&self) -> u16 {
    self.state[0] + self.state[1]
  }

  fn set_state(&mut self, word: u16) {
    self.state[0] = (word >> 1) & MASK_0;
    self.state[1] = (word >> 1) & MASK_1;
  }

  fn est_frac_bits(&self, bin: bool) -> u32 {
    FRAC_BITS[self.prob_q8() as usize][bin as usize]
  }
}

impl ProbModel {
  /// 8-bit quantization of the combined estimate; indexes the bit-cost table
  /// and seeds the LPS size.
  #[inline]
  pub fn prob_q8(&self) -> u8 {
    ((self.state[0] + self.state[1]) >> 8) as u8
  }

  /// Most probable bin value under the current combined estimate.
  #[inline]
  pub fn mps(&self) -> bool {
    self.prob_q8() >> 7 != 0
  }

  /// Size of the less-probable-symbol subinterval for a coding interval of
  /// `range`. Always in `[4, 256)`, strictly below `range`.
  #[inline]
  pub fn lps_range(&self, range: u32) -> u32 {
    let mut q = u32::from(self.prob_q8());
    if q & 0x80 != 0 {
      q ^= 0xFF;
    }
    ((q >> 2) * (range >> 5) >> 1) + 4
  }

  /// Renormalization shift after coding the less probable symbol.
  #[inline]
  pub fn renorm_bits_lps(lps: u32) -> u32 {
    u32::from(RENORM_TABLE_32[(lps >> 3) as usize])
  }

  /// Accumulate the cost of `bin` into `acc`, then adapt. Rate-estimation
  /// helper for search loops that mirror coding without emitting bits.
  #[inline]
  pub fn est_frac_bits_update(&mut self, bin: bool, acc: &mut u64) {
    *acc += u64::from(self.est_frac_bits(bin));
    self.update(bin);
  }
}

/// Cost of `num_bins` bypass-coded bins, in scaled fractional bits.
#[inline]
pub const fn bypass_frac_bits(num_bins: u32) -> u32 {
  num_bins << SCALE_BITS
}

/// Cost of a terminating bin.
#[inline]
pub const fn terminate_frac_bits(bin: bool) -> u32 {
  if bin {
    0x3BFBB
  } else {
    0x0010C
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use interpolate_name::interpolate_test;
  use pretty_assertions::assert_eq;
  use rand::{Rng, SeedableRng};
  use rand_chacha::ChaCha8Rng;

  fn initialized(qp: i32, init_val: u8, rate: u8) -> ProbModel {
    let mut m = ProbModel::default();
    m.init(qp, init_val);
    m.set_log2_window_size(rate);
    m
  }

  #[test]
  fn init_derives_exact_packed_state() {
    // init byte 197: slope selector 12, offset selector 5 -> state index 54,
    // count 10249
    let m = initialized(32, 197, 5);
    assert_eq!(m.state, [0x2800, 0x2808]);
    assert_eq!(m.state(), 20488);
  }

  #[test]
  fn init_is_deterministic() {
    for init_val in [0u8, 40, 111, 154, 197, 255] {
      for qp in [0, 17, 32, 51, 63] {
        assert_eq!(
          initialized(qp, init_val, 8),
          initialized(qp, init_val, 8),
          "divergent state for qp {qp} init {init_val}"
        );
      }
    }
  }

  #[test]
  fn init_clips_qp_to_valid_range() {
    assert_eq!(initialized(-10, 197, 8), initialized(0, 197, 8));
    assert_eq!(initialized(1000, 197, 8), initialized(63, 197, 8));
  }

  #[test]
  fn init_clamps_state_index_to_table() {
    // slope selector 0 at high QP drives the raw index far negative
    let m = initialized(63, 0, 8);
    assert_eq!(m.state, [614 & 0x7FE0, 614 & 0x7FFE]);
    // and the opposite corner saturates at the top entry
    let m = initialized(63, 0xFF, 8);
    assert_eq!(m.state, [32153 & 0x7FE0, 32153 & 0x7FFE]);
  }

  #[interpolate_test(qp22, 22)]
  #[interpolate_test(qp32, 32)]
  #[interpolate_test(qp37, 37)]
  fn estimates_stay_interior(qp: i32) {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5EED + qp as u64);
    for (init_val, rate) in [(197u8, 5u8), (40, 8), (154, 8), (122, 9)] {
      let mut m = initialized(qp, init_val, rate);
      for _ in 0..20_000 {
        m.update(rng.gen_bool(0.3));
        assert!(m.state[0] > 0 && m.state[0] < 32768);
        assert!(m.state[1] > 0 && m.state[1] < 32768);
      }
    }
  }

  #[test]
  fn update_moves_both_estimates_toward_observed_bin() {
    let mut m = initialized(32, 154, 8);
    let before = m.state;
    m.update(true);
    assert!(m.state[0] > before[0]);
    assert!(m.state[1] > before[1]);
    m.update(false);
    m.update(false);
    assert!(m.state[0] < before[0] + (0x7FFF >> 4));
  }

  #[test]
  fn smaller_window_adapts_faster() {
    let mut fast = initialized(32, 154, 0);
    let mut slow = initialized(32, 154, 13);
    let start = fast.state();
    for _ in 0..4 {
      fast.update(true);
      slow.update(true);
    }
    assert!(fast.state() - start > slow.state() - start);
  }

  #[test]
  #[should_panic(expected = "fast window shift")]
  fn oversized_window_rate_is_rejected() {
    ProbModel::default().set_log2_window_size(15);
  }

  #[test]
  fn update_sequence_is_a_pure_function_of_initial_state() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let bins: Vec<bool> = (0..500).map(|_| rng.gen_bool(0.5)).collect();
    let run = || {
      let mut m = initialized(27, 111, 5);
      for &b in &bins {
        m.update(b);
      }
      m
    };
    assert_eq!(run(), run());
  }

  #[test]
  fn state_transplant_is_deterministic() {
    let mut src = initialized(32, 197, 5);
    for b in [true, false, true, true] {
      src.update(b);
    }
    let mut a = ProbModel::default();
    let mut b = ProbModel::default();
    a.set_state(src.state());
    b.set_state(src.state());
    assert_eq!(a.state, b.state);
    // both fields reload from the shared word
    assert_eq!(a.state[0], (src.state() >> 1) & 0x7FE0);
    assert_eq!(a.state[1], (src.state() >> 1) & 0x7FFE);
  }

  #[test]
  fn bit_costs_follow_the_estimate() {
    let likely_one = initialized(32, 0x9F, 8);
    assert!(likely_one.mps());
    assert!(likely_one.est_frac_bits(false) > likely_one.est_frac_bits(true));
    let likely_zero = initialized(63, 0, 8);
    assert!(!likely_zero.mps());
    assert!(likely_zero.est_frac_bits(true) > likely_zero.est_frac_bits(false));
    assert!(likely_one.est_frac_bits(true) > 0);
  }

  #[test]
  fn accumulated_estimate_matches_stepwise_costs() {
    let mut m = initialized(32, 197, 5);
    let mut shadow = m;
    let mut acc = 0u64;
    let mut expected = 0u64;
    for bin in [true, true, false, true] {
      expected += u64::from(shadow.est_frac_bits(bin));
      shadow.update(bin);
      m.est_frac_bits_update(bin, &mut acc);
    }
    assert_eq!(acc, expected);
    assert_eq!(m, shadow);
  }

  #[test]
  fn fixed_costs_for_bypass_and_termination() {
    assert_eq!(bypass_frac_bits(1), 1 << SCALE_BITS);
    assert_eq!(bypass_frac_bits(3), 3 << SCALE_BITS);
    assert_eq!(terminate_frac_bits(true), 0x3BFBB);
    assert_eq!(terminate_frac_bits(false), 0x0010C);
  }

  #[test]
  fn lps_shrinks_as_the_estimate_sharpens() {
    let confident = initialized(32, 0x9F, 8);
    let uncertain = ProbModel::default();
    for range in [256u32, 384, 510] {
      let lc = confident.lps_range(range);
      let lu = uncertain.lps_range(range);
      assert!(lc < lu);
      assert!((4..256).contains(&lc));
      assert!((4..256).contains(&lu));
    }
  }
}
