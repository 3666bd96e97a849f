// Copyright (c) 2025-2026, The rvve contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

//! Binary arithmetic coder.
//!
//! Low/range interval coder over the adaptive models in a context bank.
//! Three bin flavors: context-coded (probability from a [`ProbModel`], which
//! adapts after every bin), bypass (fixed half probability, no model), and
//! terminating (for end-of-block decisions; also what makes the final flush
//! decodable). Encoder and decoder renormalize identically, so driving the
//! decoder over an encoder's output reproduces the exact context trajectory.

use std::io;

use bitstream_io::{BigEndian, BitWrite, BitWriter};
use log::trace;
use thiserror::Error;

use crate::context::{BinModel, ProbModel};

/// Runtime bitstream failures. Contract violations panic instead; see the
/// context module.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EntropyError {
  #[error("bitstream truncated: need at least {need} bytes, have {have}")]
  Truncated { need: usize, have: usize },
}

/// Arithmetic encoder writing through a [`BitWriter`].
///
/// Carries the classic carry-buffered byte pipeline: completed bytes wait in
/// `buffered_byte` until the next byte proves no carry can reach them.
pub struct BinEncoder<W: io::Write> {
  out: BitWriter<W, BigEndian>,
  low: u32,
  range: u32,
  buffered_byte: u32,
  num_buffered_bytes: u32,
  bits_left: i32,
}

impl<W: io::Write> BinEncoder<W> {
  pub fn new(writer: W) -> Self {
    BinEncoder {
      out: BitWriter::endian(writer, BigEndian),
      low: 0,
      range: 510,
      buffered_byte: 0xFF,
      num_buffered_bytes: 0,
      bits_left: 23,
    }
  }

  /// Current interval range, exposed for rate tracking.
  #[inline]
  pub fn range(&self) -> u32 {
    self.range
  }

  /// Code one bin through `model` and adapt it.
  pub fn encode_bin(
    &mut self, model: &mut ProbModel, bin: bool,
  ) -> io::Result<()> {
    let lps = model.lps_range(self.range);
    self.range -= lps;
    if bin != model.mps() {
      let num_bits = ProbModel::renorm_bits_lps(lps);
      self.low = (self.low + self.range) << num_bits;
      self.range = lps << num_bits;
      self.bits_left -= num_bits as i32;
      self.test_and_write_out()?;
    } else if self.range < 256 {
      self.low <<= 1;
      self.range <<= 1;
      self.bits_left -= 1;
      self.test_and_write_out()?;
    }
    model.update(bin);
    Ok(())
  }

  /// Code one equiprobable bin, no context involved.
  pub fn encode_bin_ep(&mut self, bin: bool) -> io::Result<()> {
    self.low <<= 1;
    if bin {
      self.low += self.range;
    }
    self.bits_left -= 1;
    self.test_and_write_out()
  }

  /// Code `num_bins` bypass bins from `value`, most significant first.
  pub fn encode_bins_ep(
    &mut self, value: u32, num_bins: u32,
  ) -> io::Result<()> {
    debug_assert!(num_bins == 32 || value >> num_bins == 0);
    for i in (0..num_bins).rev() {
      self.encode_bin_ep((value >> i) & 1 != 0)?;
    }
    Ok(())
  }

  /// Code a terminating bin. A final `true` terminator is what makes
  /// [`finish`](Self::finish) safely decodable.
  pub fn encode_bin_trm(&mut self, bin: bool) -> io::Result<()> {
    self.range -= 2;
    if bin {
      self.low += self.range;
      self.low <<= 7;
      self.range = 2 << 7;
      self.bits_left -= 7;
    } else if self.range >= 256 {
      return Ok(());
    } else {
      self.low <<= 1;
      self.range <<= 1;
      self.bits_left -= 1;
    }
    self.test_and_write_out()
  }

  /// Flush buffered bytes, any pending carry and the remaining low bits,
  /// and return the underlying writer.
  pub fn finish(mut self) -> io::Result<W> {
    trace!(
      "flushing arithmetic coder, {} low bits pending",
      24 - self.bits_left
    );
    if self.low >> (32 - self.bits_left) != 0 {
      self.out.write(8, (self.buffered_byte + 1) & 0xFF)?;
      while self.num_buffered_bytes > 1 {
        self.out.write(8, 0x00u32)?;
        self.num_buffered_bytes -= 1;
      }
      self.low -= 1 << (32 - self.bits_left);
    } else {
      if self.num_buffered_bytes > 0 {
        self.out.write(8, self.buffered_byte)?;
      }
      while self.num_buffered_bytes > 1 {
        self.out.write(8, 0xFFu32)?;
        self.num_buffered_bytes -= 1;
      }
    }
    self.out.write((24 - self.bits_left) as u32, self.low >> 8)?;
    // stop bit: keeps the truncated low inside the final terminator interval
    self.out.write_bit(true)?;
    self.out.byte_align()?;
    Ok(self.out.into_writer())
  }

  fn test_and_write_out(&mut self) -> io::Result<()> {
    if self.bits_left < 12 {
      self.write_out()?;
    }
    Ok(())
  }

  fn write_out(&mut self) -> io::Result<()> {
    let lead_byte = self.low >> (24 - self.bits_left);
    self.bits_left += 8;
    self.low &= 0xFFFF_FFFF >> self.bits_left;
    if lead_byte == 0xFF {
      self.num_buffered_bytes += 1;
    } else if self.num_buffered_bytes > 0 {
      let carry = lead_byte >> 8;
      self.out.write(8, (self.buffered_byte + carry) & 0xFF)?;
      self.buffered_byte = lead_byte & 0xFF;
      let filler = (0xFF + carry) & 0xFF;
      while self.num_buffered_bytes > 1 {
        self.out.write(8, filler)?;
        self.num_buffered_bytes -= 1;
      }
    } else {
      self.num_buffered_bytes = 1;
      self.buffered_byte = lead_byte & 0xFF;
    }
    Ok(())
  }
}

/// Arithmetic decoder over an in-memory bitstream.
///
/// The value register runs scaled by `1 << 7` relative to the range. Reads
/// past the end of the slice zero-extend; the terminator coded by a
/// conforming encoder guarantees no information lives out there.
#[derive(Debug)]
pub struct BinDecoder<'a> {
  data: &'a [u8],
  pos: usize,
  range: u32,
  value: u32,
  bits_needed: i32,
}

impl<'a> BinDecoder<'a> {
  /// Bootstrap the value register from the first two bytes.
  ///
  /// # Errors
  ///
  /// [`EntropyError::Truncated`] if `data` cannot fill the register.
  pub fn new(data: &'a [u8]) -> Result<Self, EntropyError> {
    if data.len() < 2 {
      return Err(EntropyError::Truncated { need: 2, have: data.len() });
    }
    let mut d =
      BinDecoder { data, pos: 0, range: 510, value: 0, bits_needed: -8 };
    d.value = (u32::from(d.read_byte()) << 8) | u32::from(d.read_byte());
    Ok(d)
  }

  /// Decode one bin through `model` and adapt it.
  pub fn decode_bin(&mut self, model: &mut ProbModel) -> bool {
    let mut bin = model.mps();
    let lps = model.lps_range(self.range);
    self.range -= lps;
    let scaled_range = self.range << 7;
    if self.value < scaled_range {
      if scaled_range < (256 << 7) {
        self.range = scaled_range >> 6;
        self.value += self.value;
        self.bits_needed += 1;
        if self.bits_needed == 0 {
          self.bits_needed = -8;
          self.value += u32::from(self.read_byte());
        }
      }
    } else {
      bin = !bin;
      let num_bits = ProbModel::renorm_bits_lps(lps);
      self.value = (self.value - scaled_range) << num_bits;
      self.range = lps << num_bits;
      self.bits_needed += num_bits as i32;
      if self.bits_needed >= 0 {
        self.value += u32::from(self.read_byte()) << self.bits_needed;
        self.bits_needed -= 8;
      }
    }
    model.update(bin);
    bin
  }

  /// Decode one bypass bin.
  pub fn decode_bin_ep(&mut self) -> bool {
    self.value += self.value;
    self.bits_needed += 1;
    if self.bits_needed >= 0 {
      self.bits_needed = -8;
      self.value += u32::from(self.read_byte());
    }
    let scaled_range = self.range << 7;
    if self.value >= scaled_range {
      self.value -= scaled_range;
      true
    } else {
      false
    }
  }

  /// Decode `num_bins` bypass bins into a value, most significant first.
  pub fn decode_bins_ep(&mut self, num_bins: u32) -> u32 {
    let mut value = 0;
    for _ in 0..num_bins {
      value = (value << 1) | u32::from(self.decode_bin_ep());
    }
    value
  }

  /// Decode a terminating bin.
  pub fn decode_bin_trm(&mut self) -> bool {
    self.range -= 2;
    let scaled_range = self.range << 7;
    if self.value >= scaled_range {
      true
    } else {
      if scaled_range < (256 << 7) {
        self.range = scaled_range >> 6;
        self.value += self.value;
        self.bits_needed += 1;
        if self.bits_needed == 0 {
          self.bits_needed = -8;
          self.value += u32::from(self.read_byte());
        }
      }
      false
    }
  }

  fn read_byte(&mut self) -> u8 {
    let byte = self.data.get(self.pos).copied().unwrap_or(0);
    self.pos += 1;
    byte
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::context::{BinModel, ContextCatalog, EntropyContext, SliceType};
  use pretty_assertions::assert_eq;
  use rand::{Rng, SeedableRng};
  use rand_chacha::ChaCha8Rng;

  #[derive(Clone, Copy, Debug, PartialEq, Eq)]
  enum Op {
    Ctx { ctx_idx: usize, bin: bool },
    Bypass { bin: bool },
    BypassChunk { value: u32, num_bins: u32 },
    Terminate { last: bool },
  }

  fn random_ops(seed: u64, len: usize, num_ctx: usize) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ops: Vec<Op> = (0..len)
      .map(|_| match rng.gen_range(0..10) {
        0 => Op::Bypass { bin: rng.gen_bool(0.5) },
        1 => {
          let num_bins = rng.gen_range(1..=16);
          Op::BypassChunk { value: rng.gen_range(0..1 << num_bins), num_bins }
        }
        2 => Op::Terminate { last: false },
        _ => Op::Ctx {
          ctx_idx: rng.gen_range(0..num_ctx),
          bin: rng.gen_bool(0.3),
        },
      })
      .collect();
    ops.push(Op::Terminate { last: true });
    ops
  }

  fn encode_ops(ops: &[Op], ctx: &mut EntropyContext) -> Vec<u8> {
    let mut enc = BinEncoder::new(Vec::new());
    for op in ops {
      match *op {
        Op::Ctx { ctx_idx, bin } => {
          enc.encode_bin(&mut ctx[ctx_idx], bin).unwrap()
        }
        Op::Bypass { bin } => enc.encode_bin_ep(bin).unwrap(),
        Op::BypassChunk { value, num_bins } => {
          enc.encode_bins_ep(value, num_bins).unwrap()
        }
        Op::Terminate { last } => enc.encode_bin_trm(last).unwrap(),
      }
    }
    enc.finish().unwrap()
  }

  fn fresh_ctx(qp: i32, slice: SliceType) -> (ContextCatalog, EntropyContext) {
    let catalog = ContextCatalog::new();
    let mut ctx = EntropyContext::new(&catalog);
    ctx.init(&catalog, qp, slice.init_id());
    (catalog, ctx)
  }

  #[test]
  fn coded_bins_round_trip() {
    for seed in 0..4u64 {
      let (_, mut enc_ctx) = fresh_ctx(32, SliceType::B);
      let mut dec_ctx = enc_ctx.clone();
      let ops = random_ops(seed, 2000, enc_ctx.len());
      let bytes = encode_ops(&ops, &mut enc_ctx);

      let mut dec = BinDecoder::new(&bytes).unwrap();
      for op in &ops {
        match *op {
          Op::Ctx { ctx_idx, bin } => {
            assert_eq!(dec.decode_bin(&mut dec_ctx[ctx_idx]), bin);
          }
          Op::Bypass { bin } => assert_eq!(dec.decode_bin_ep(), bin),
          Op::BypassChunk { value, num_bins } => {
            assert_eq!(dec.decode_bins_ep(num_bins), value);
          }
          Op::Terminate { last } => assert_eq!(dec.decode_bin_trm(), last),
        }
      }
      // both sides walked the identical context trajectory
      assert_eq!(enc_ctx.save_prob_states(), dec_ctx.save_prob_states());
    }
  }

  #[test]
  fn encoding_is_deterministic() {
    let ops = random_ops(99, 500, 415);
    let (_, mut ctx_a) = fresh_ctx(22, SliceType::I);
    let (_, mut ctx_b) = fresh_ctx(22, SliceType::I);
    assert_eq!(encode_ops(&ops, &mut ctx_a), encode_ops(&ops, &mut ctx_b));
  }

  #[test]
  fn skewed_models_compress_their_mps_runs() {
    let (catalog, mut ctx) = fresh_ctx(32, SliceType::I);
    let span = catalog.skip_flag;
    let mps = ctx.model(span, 0).mps();

    let mut enc = BinEncoder::new(Vec::new());
    for _ in 0..4000 {
      enc.encode_bin(ctx.model_mut(span, 0), mps).unwrap();
    }
    enc.encode_bin_trm(true).unwrap();
    let compressed = enc.finish().unwrap();
    // 4000 all-MPS bins must land far below the bypass cost of 500 bytes
    assert!(compressed.len() < 200, "got {} bytes", compressed.len());
  }

  #[test]
  fn bypass_bins_cost_one_bit_each() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let bins: Vec<bool> = (0..800).map(|_| rng.gen_bool(0.5)).collect();
    let mut enc = BinEncoder::new(Vec::new());
    for &b in &bins {
      enc.encode_bin_ep(b).unwrap();
    }
    enc.encode_bin_trm(true).unwrap();
    let bytes = enc.finish().unwrap();
    assert!((100..=110).contains(&bytes.len()), "got {} bytes", bytes.len());

    let mut dec = BinDecoder::new(&bytes).unwrap();
    for &b in &bins {
      assert_eq!(dec.decode_bin_ep(), b);
    }
    assert!(dec.decode_bin_trm());
  }

  #[test]
  fn truncated_bootstrap_is_reported() {
    assert_eq!(
      BinDecoder::new(&[0x42]).unwrap_err(),
      EntropyError::Truncated { need: 2, have: 1 }
    );
    assert!(BinDecoder::new(&[]).is_err());
  }

  #[test]
  fn lps_and_renorm_agree_for_all_reachable_states() {
    let mut models = vec![ProbModel::default()];
    for init_val in 0..=255u8 {
      for qp in [0, 17, 32, 51, 63] {
        let mut m = ProbModel::default();
        m.init(qp, init_val);
        models.push(m);
      }
    }
    for m in &models {
      for range in 256..512u32 {
        let lps = m.lps_range(range);
        assert!((4..256).contains(&lps));
        assert!(range - lps >= 128);
        let renormed = lps << ProbModel::renorm_bits_lps(lps);
        assert!((256..512).contains(&renormed));
      }
    }
  }
}
