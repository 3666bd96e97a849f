// Copyright (c) 2025-2026, The rvve contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

//! Fixed lookup tables of the adaptation scheme. Every value here is part of
//! the bitstream contract; none of them may change without breaking
//! compatibility with conforming decoders.

/// Renormalization shift counts for the arithmetic coder, indexed by the
/// 5-bit LPS range class (`lps >> 3`). `lps << RENORM_TABLE_32[lps >> 3]`
/// brings the coding interval back into `[256, 512)`.
#[rustfmt::skip]
pub static RENORM_TABLE_32: [u8; 32] = [
  6, 5, 4, 4, 3, 3, 3, 3,
  2, 2, 2, 2, 2, 2, 2, 2,
  1, 1, 1, 1, 1, 1, 1, 1,
  1, 1, 1, 1, 1, 1, 1, 1,
];

/// Initial probability counts indexed by the 7-bit state index derived from
/// the QP and a context's initialization byte. Monotonically increasing and
/// symmetric around the midpoint of the probability range.
#[rustfmt::skip]
pub static INIT_STATE_TO_COUNT: [u16; 128] = [
  614, 647, 681, 718, 756, 797, 839, 884,
  932, 982, 1034, 1089, 1148, 1209, 1274, 1342,
  1414, 1490, 1569, 1653, 1742, 1835, 1933, 2037,
  2146, 2261, 2382, 2509, 2643, 2785, 2934, 3091,
  3256, 3430, 3614, 3807, 4011, 4225, 4452, 4690,
  4941, 5205, 5483, 5777, 6086, 6412, 6755, 7116,
  7497, 7898, 8320, 8766, 9235, 9729, 10249, 10798,
  11375, 11984, 12625, 13300, 14012, 14762, 15551, 16384,
  16384, 17216, 18005, 18755, 19467, 20142, 20783, 21392,
  21969, 22518, 23038, 23532, 24001, 24447, 24869, 25270,
  25651, 26012, 26355, 26681, 26990, 27284, 27562, 27826,
  28077, 28315, 28542, 28756, 28960, 29153, 29337, 29511,
  29676, 29833, 29982, 30124, 30258, 30385, 30506, 30621,
  30730, 30834, 30932, 31025, 31114, 31198, 31277, 31353,
  31425, 31493, 31558, 31619, 31678, 31733, 31785, 31835,
  31883, 31928, 31970, 32011, 32049, 32086, 32120, 32153,
];

/// Fractional-bit costs `[cost_of_0, cost_of_1]`, scaled by `1 << SCALE_BITS`
/// and indexed by the 8-bit quantized combined probability estimate. Used by
/// the rate-distortion search to price bins without emitting them.
#[rustfmt::skip]
pub static FRAC_BITS: [[u32; 2]; 256] = [
  [0x0005c, 0x48000], [0x00116, 0x3b520], [0x001d0, 0x356cb], [0x0028b, 0x318a9],
  [0x00346, 0x2ea40], [0x00403, 0x2c531], [0x004c0, 0x2a658], [0x0057e, 0x28beb],
  [0x0063c, 0x274ce], [0x006fc, 0x26044], [0x007bc, 0x24dc9], [0x0087d, 0x23cfc],
  [0x0093f, 0x22d96], [0x00a01, 0x21f60], [0x00ac4, 0x2122e], [0x00b89, 0x205dd],
  [0x00c4e, 0x1fa51], [0x00d13, 0x1ef74], [0x00dda, 0x1e531], [0x00ea2, 0x1db78],
  [0x00f6a, 0x1d23c], [0x01033, 0x1c970], [0x010fd, 0x1c10b], [0x011c8, 0x1b903],
  [0x01294, 0x1b151], [0x01360, 0x1a9ee], [0x0142e, 0x1a2d4], [0x014fc, 0x19bfc],
  [0x015cc, 0x19564], [0x0169c, 0x18f06], [0x0176d, 0x188de], [0x0183f, 0x182e8],
  [0x01912, 0x17d23], [0x019e6, 0x1778a], [0x01abb, 0x1721c], [0x01b91, 0x16cd5],
  [0x01c68, 0x167b4], [0x01d40, 0x162b6], [0x01e19, 0x15dda], [0x01ef3, 0x1591e],
  [0x01fcd, 0x15480], [0x020a9, 0x14fff], [0x02186, 0x14b99], [0x02264, 0x1474e],
  [0x02343, 0x1431b], [0x02423, 0x13f01], [0x02504, 0x13afd], [0x025e6, 0x1370f],
  [0x026ca, 0x13336], [0x027ae, 0x12f71], [0x02894, 0x12bc0], [0x0297a, 0x12821],
  [0x02a62, 0x12494], [0x02b4b, 0x12118], [0x02c35, 0x11dac], [0x02d20, 0x11a51],
  [0x02e0c, 0x11704], [0x02efa, 0x113c7], [0x02fe9, 0x11098], [0x030d9, 0x10d77],
  [0x031ca, 0x10a63], [0x032bc, 0x1075c], [0x033b0, 0x10461], [0x034a5, 0x10173],
  [0x0359b, 0x0fe90], [0x03693, 0x0fbb9], [0x0378c, 0x0f8ed], [0x03886, 0x0f62b],
  [0x03981, 0x0f374], [0x03a7e, 0x0f0c7], [0x03b7c, 0x0ee23], [0x03c7c, 0x0eb89],
  [0x03d7d, 0x0e8f9], [0x03e7f, 0x0e671], [0x03f83, 0x0e3f2], [0x04088, 0x0e17c],
  [0x0418e, 0x0df0e], [0x04297, 0x0dca8], [0x043a0, 0x0da4a], [0x044ab, 0x0d7f3],
  [0x045b8, 0x0d5a5], [0x046c6, 0x0d35d], [0x047d6, 0x0d11c], [0x048e7, 0x0cee3],
  [0x049fa, 0x0ccb0], [0x04b0e, 0x0ca84], [0x04c24, 0x0c85e], [0x04d3c, 0x0c63f],
  [0x04e55, 0x0c426], [0x04f71, 0x0c212], [0x0508d, 0x0c005], [0x051ac, 0x0bdfe],
  [0x052cc, 0x0bbfc], [0x053ee, 0x0b9ff], [0x05512, 0x0b808], [0x05638, 0x0b617],
  [0x0575f, 0x0b42a], [0x05888, 0x0b243], [0x059b4, 0x0b061], [0x05ae1, 0x0ae83],
  [0x05c10, 0x0acaa], [0x05d41, 0x0aad6], [0x05e74, 0x0a907], [0x05fa9, 0x0a73c],
  [0x060e0, 0x0a575], [0x06219, 0x0a3b3], [0x06354, 0x0a1f5], [0x06491, 0x0a03b],
  [0x065d1, 0x09e85], [0x06712, 0x09cd4], [0x06856, 0x09b26], [0x0699c, 0x0997c],
  [0x06ae4, 0x097d6], [0x06c2f, 0x09634], [0x06d7c, 0x09495], [0x06ecb, 0x092fa],
  [0x0701d, 0x09162], [0x07171, 0x08fce], [0x072c7, 0x08e3e], [0x07421, 0x08cb0],
  [0x0757c, 0x08b26], [0x076da, 0x089a0], [0x0783b, 0x0881c], [0x0799f, 0x0869c],
  [0x07b05, 0x0851f], [0x07c6e, 0x083a4], [0x07dd9, 0x0822d], [0x07f48, 0x080b9],
  [0x080b9, 0x07f48], [0x0822d, 0x07dd9], [0x083a4, 0x07c6e], [0x0851f, 0x07b05],
  [0x0869c, 0x0799f], [0x0881c, 0x0783b], [0x089a0, 0x076da], [0x08b26, 0x0757c],
  [0x08cb0, 0x07421], [0x08e3e, 0x072c7], [0x08fce, 0x07171], [0x09162, 0x0701d],
  [0x092fa, 0x06ecb], [0x09495, 0x06d7c], [0x09634, 0x06c2f], [0x097d6, 0x06ae4],
  [0x0997c, 0x0699c], [0x09b26, 0x06856], [0x09cd4, 0x06712], [0x09e85, 0x065d1],
  [0x0a03b, 0x06491], [0x0a1f5, 0x06354], [0x0a3b3, 0x06219], [0x0a575, 0x060e0],
  [0x0a73c, 0x05fa9], [0x0a907, 0x05e74], [0x0aad6, 0x05d41], [0x0acaa, 0x05c10],
  [0x0ae83, 0x05ae1], [0x0b061, 0x059b4], [0x0b243, 0x05888], [0x0b42a, 0x0575f],
  [0x0b617, 0x05638], [0x0b808, 0x05512], [0x0b9ff, 0x053ee], [0x0bbfc, 0x052cc],
  [0x0bdfe, 0x051ac], [0x0c005, 0x0508d], [0x0c212, 0x04f71], [0x0c426, 0x04e55],
  [0x0c63f, 0x04d3c], [0x0c85e, 0x04c24], [0x0ca84, 0x04b0e], [0x0ccb0, 0x049fa],
  [0x0cee3, 0x048e7], [0x0d11c, 0x047d6], [0x0d35d, 0x046c6], [0x0d5a5, 0x045b8],
  [0x0d7f3, 0x044ab], [0x0da4a, 0x043a0], [0x0dca8, 0x04297], [0x0df0e, 0x0418e],
  [0x0e17c, 0x04088], [0x0e3f2, 0x03f83], [0x0e671, 0x03e7f], [0x0e8f9, 0x03d7d],
  [0x0eb89, 0x03c7c], [0x0ee23, 0x03b7c], [0x0f0c7, 0x03a7e], [0x0f374, 0x03981],
  [0x0f62b, 0x03886], [0x0f8ed, 0x0378c], [0x0fbb9, 0x03693], [0x0fe90, 0x0359b],
  [0x10173, 0x034a5], [0x10461, 0x033b0], [0x1075c, 0x032bc], [0x10a63, 0x031ca],
  [0x10d77, 0x030d9], [0x11098, 0x02fe9], [0x113c7, 0x02efa], [0x11704, 0x02e0c],
  [0x11a51, 0x02d20], [0x11dac, 0x02c35], [0x12118, 0x02b4b], [0x12494, 0x02a62],
  [0x12821, 0x0297a], [0x12bc0, 0x02894], [0x12f71, 0x027ae], [0x13336, 0x026ca],
  [0x1370f, 0x025e6], [0x13afd, 0x02504], [0x13f01, 0x02423], [0x1431b, 0x02343],
  [0x1474e, 0x02264], [0x14b99, 0x02186], [0x14fff, 0x020a9], [0x15480, 0x01fcd],
  [0x1591e, 0x01ef3], [0x15dda, 0x01e19], [0x162b6, 0x01d40], [0x167b4, 0x01c68],
  [0x16cd5, 0x01b91], [0x1721c, 0x01abb], [0x1778a, 0x019e6], [0x17d23, 0x01912],
  [0x182e8, 0x0183f], [0x188de, 0x0176d], [0x18f06, 0x0169c], [0x19564, 0x015cc],
  [0x19bfc, 0x014fc], [0x1a2d4, 0x0142e], [0x1a9ee, 0x01360], [0x1b151, 0x01294],
  [0x1b903, 0x011c8], [0x1c10b, 0x010fd], [0x1c970, 0x01033], [0x1d23c, 0x00f6a],
  [0x1db78, 0x00ea2], [0x1e531, 0x00dda], [0x1ef74, 0x00d13], [0x1fa51, 0x00c4e],
  [0x205dd, 0x00b89], [0x2122e, 0x00ac4], [0x21f60, 0x00a01], [0x22d96, 0x0093f],
  [0x23cfc, 0x0087d], [0x24dc9, 0x007bc], [0x26044, 0x006fc], [0x274ce, 0x0063c],
  [0x28beb, 0x0057e], [0x2a658, 0x004c0], [0x2c531, 0x00403], [0x2ea40, 0x00346],
  [0x318a9, 0x0028b], [0x356cb, 0x001d0], [0x3b520, 0x00116], [0x48000, 0x0005c],
];

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renorm_shifts_cover_all_lps_classes() {
    assert_eq!(RENORM_TABLE_32[0], 6);
    assert_eq!(RENORM_TABLE_32[1], 5);
    assert!(RENORM_TABLE_32[16..].iter().all(|&s| s == 1));
    // every class renormalizes back into [256, 512)
    for (cls, &shift) in RENORM_TABLE_32.iter().enumerate().skip(1) {
      let lps = (cls as u32) << 3;
      assert!(lps << shift >= 256, "class {cls} under-renormalizes");
      assert!((lps | 7) << shift < 512, "class {cls} over-renormalizes");
    }
  }

  #[test]
  fn init_state_counts_are_monotonic_and_symmetric() {
    assert_eq!(INIT_STATE_TO_COUNT[0], 614);
    assert_eq!(INIT_STATE_TO_COUNT[63], 16384);
    assert_eq!(INIT_STATE_TO_COUNT[64], 16384);
    assert_eq!(INIT_STATE_TO_COUNT[127], 32153);
    for w in INIT_STATE_TO_COUNT.windows(2) {
      assert!(w[0] <= w[1]);
    }
    for i in 0..64 {
      let sum = INIT_STATE_TO_COUNT[i] + INIT_STATE_TO_COUNT[127 - i];
      // exact midpoint pair rounds up by one
      let expected = if i == 63 { 32768 } else { 32767 };
      assert_eq!(sum, expected, "asymmetry at index {i}");
    }
  }

  #[test]
  fn frac_bits_mirror_and_price_both_bins() {
    for (p, costs) in FRAC_BITS.iter().enumerate() {
      assert!(costs[0] > 0 && costs[1] > 0);
      // the table is its own mirror image in the probability argument
      assert_eq!(costs[0], FRAC_BITS[255 - p][1]);
      // the less likely bin never prices below the more likely one
      let mps = (p >> 7) & 1;
      assert!(costs[1 - mps] >= costs[mps]);
    }
    assert_eq!(FRAC_BITS[0], [0x0005c, 0x48000]);
    assert_eq!(FRAC_BITS[255], [0x48000, 0x0005c]);
  }
}
