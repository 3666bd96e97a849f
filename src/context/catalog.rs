// Copyright (c) 2025-2026, The rvve contributors. All rights reserved
//
// This source code is subject to the terms of the BSD 2 Clause License and
// the Alliance for Open Media Patent License 1.0. If the BSD 2 Clause License
// was not distributed with this source code in the LICENSE file, you can
// obtain it at www.aomedia.org/license/software. If the Alliance for Open
// Media Patent License 1.0 was not distributed with this source code in the
// PATENTS file, you can obtain it at www.aomedia.org/license/patent.

use log::debug;
use num_derive::FromPrimitive;

use super::{DEFAULT_RATE, NUM_INIT_TABLES, UNUSED_CTX};

/// Coding-frame category of a slice; selects which initialization row seeds
/// the context bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq, FromPrimitive)]
pub enum SliceType {
  I = 0,
  P = 1,
  B = 2,
}

impl SliceType {
  /// Id of the initialization table carrying this slice type's row.
  #[inline]
  pub const fn init_id(self) -> usize {
    self as usize
  }
}

/// Handle to a contiguous run of context slots inside the flat bank.
///
/// Spans are pure addressing values: `offset` is the first absolute context
/// index of the group, `size` the number of slots it was registered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CtxSpan {
  pub offset: u16,
  pub size: u16,
}

impl CtxSpan {
  pub const fn new(offset: u16, size: u16) -> Self {
    CtxSpan { offset, size }
  }

  /// Bounding union of a set of spans: from the lowest offset to the highest
  /// end. Non-adjacent members leave unrelated slots inside the result; the
  /// callers that bulk-save a union want exactly that single contiguous
  /// superset.
  pub fn covering(spans: &[CtxSpan]) -> Self {
    assert!(!spans.is_empty(), "cannot take the union of no spans");
    let lo = spans.iter().map(|s| s.offset).min().unwrap();
    let hi = spans.iter().map(|s| s.offset + s.size).max().unwrap();
    CtxSpan::new(lo, hi - lo)
  }

  /// Absolute context index of the `k`-th slot in this span.
  #[inline]
  pub fn ctx_idx(self, k: usize) -> usize {
    debug_assert!(k < self.size as usize);
    self.offset as usize + k
  }
}

/// The catalogue of every context group the codec codes through.
///
/// Built once by [`ContextCatalog::new`] and immutable afterwards: four
/// parallel byte rows (I-, P-, B-slice initialization values and adaptation
/// rates, all aligned by absolute context index) plus one named [`CtxSpan`]
/// per syntax-element family. Offsets are assigned by the fixed registration
/// order in `new`; that order is part of the bitstream contract and must not
/// be rearranged. Consumers receive the catalog by reference; there is no
/// global instance.
pub struct ContextCatalog {
  init_tables: [Vec<u8>; NUM_INIT_TABLES],

  // coding-tree structure
  pub split_flag: CtxSpan,
  pub split_qt_flag: CtxSpan,
  pub split_hv_flag: CtxSpan,
  pub split12_flag: CtxSpan,

  // block-level mode flags
  pub skip_flag: CtxSpan,
  pub merge_flag: CtxSpan,
  pub regular_merge_flag: CtxSpan,
  pub merge_idx: CtxSpan,
  pub mmvd_flag: CtxSpan,
  pub mmvd_merge_idx: CtxSpan,
  pub mmvd_step_idx: CtxSpan,
  pub part_size: CtxSpan,
  pub pred_mode: CtxSpan,

  // intra prediction
  pub multi_ref_line_idx: CtxSpan,
  pub intra_luma_mpm_flag: CtxSpan,
  pub intra_luma_planar_flag: CtxSpan,
  pub intra_chroma_pred_mode: CtxSpan,

  pub delta_qp: CtxSpan,

  // inter prediction and motion
  pub inter_dir: CtxSpan,
  pub ref_pic: CtxSpan,
  pub affine_flag: CtxSpan,
  pub affine_type: CtxSpan,
  pub affine_merge_idx: CtxSpan,
  pub bcw_idx: CtxSpan,
  pub mvd: CtxSpan,

  // transform coefficients
  pub qt_root_cbf: CtxSpan,
  pub qt_cbf: [CtxSpan; 3],
  pub sig_coeff_group: [CtxSpan; 4],
  pub sig_flag: [CtxSpan; 6],
  pub par_flag: [CtxSpan; 2],
  pub gtx_flag: [CtxSpan; 4],
  pub last_x: [CtxSpan; 2],
  pub last_y: [CtxSpan; 2],

  pub mvp_idx: CtxSpan,
  pub smvd_flag: CtxSpan,

  // in-loop filter control
  pub sao_merge_flag: CtxSpan,
  pub sao_type_idx: CtxSpan,

  pub transquant_bypass_flag: CtxSpan,
  pub rdpcm_flag: CtxSpan,
  pub rdpcm_dir: CtxSpan,
  pub mts_idx: CtxSpan,
  pub isp_mode: CtxSpan,
  pub sbt_flag: CtxSpan,
  pub sbt_quad_flag: CtxSpan,
  pub sbt_hor_flag: CtxSpan,
  pub sbt_pos_flag: CtxSpan,
  pub cross_comp_pred: CtxSpan,
  pub chroma_qp_adj_flag: CtxSpan,
  pub chroma_qp_adj_idc: CtxSpan,
  pub imv_flag: CtxSpan,
  pub ctb_alf_flag: CtxSpan,
  pub ciip_flag: CtxSpan,
  pub triangle_flag: CtxSpan,
  pub triangle_idx: CtxSpan,
  pub ibc_flag: CtxSpan,
  pub joint_cb_cr_flag: CtxSpan,

  // transform-skip residual coding
  pub ts_sig_coeff_group: CtxSpan,
  pub ts_sig_flag: CtxSpan,
  pub ts_par_flag: CtxSpan,
  pub ts_gtx_flag: CtxSpan,
  pub ts_residual_sign: CtxSpan,

  // combined families coded through one index space
  pub sao: CtxSpan,
}

/// Appends context groups to the four parallel tables, assigning each group
/// the next run of absolute indices.
#[derive(Default)]
struct CatalogBuilder {
  tables: [Vec<u8>; NUM_INIT_TABLES],
}

impl CatalogBuilder {
  fn add(&mut self, rows: [&[u8]; NUM_INIT_TABLES]) -> CtxSpan {
    let offset = self.tables[0].len();
    let size = rows[0].len();
    for (table, row) in self.tables.iter_mut().zip(rows) {
      assert_eq!(
        row.len(),
        size,
        "rows of one context group must agree in length"
      );
      table.extend_from_slice(row);
    }
    CtxSpan::new(offset as u16, size as u16)
  }
}

impl ContextCatalog {
  /// Register every context group, in the fixed canonical order, and return
  /// the finished catalog.
  pub fn new() -> Self {
    let mut b = CatalogBuilder::default();

    let split_flag = b.add([
      &[122, 124, 141, 108, 125, 156, 138, 126, 143],
      &[93, 139, 171, 124, 125, 141, 139, 141, 158],
      &[138, 154, 172, 124, 140, 142, 154, 127, 175],
      &[9, 13, 8, 8, 13, 12, 5, 10, 12],
    ]);
    let split_qt_flag = b.add([
      &[138, 140, 142, 136, 138, 140],
      &[139, 126, 142, 107, 138, 125],
      &[139, 125, 127, 136, 153, 126],
      &[0, 8, 8, 12, 12, 8],
    ]);
    let split_hv_flag = b.add([
      &[154, 168, 155, 139, 155],
      &[169, 168, 170, 153, 170],
      &[154, 168, 140, 153, 169],
      &[10, 9, 9, 8, 8],
    ]);
    let split12_flag = b.add([
      &[154, 140, 154, 140],
      &[169, 155, 154, 140],
      &[154, 170, 154, 170],
      &[12, 12, 12, 12],
    ]);
    let skip_flag = b.add([
      &[197, 214, 216],
      &[197, 198, 185],
      &[40, 138, 154],
      &[5, 8, 8],
    ]);
    let merge_flag = b.add([
      &[111],
      &[111],
      &[153],
      &[5],
    ]);
    let regular_merge_flag = b.add([
      &[111, 111],
      &[111, 111],
      &[153, 153],
      &[5, 5],
    ]);
    let merge_idx = b.add([
      &[138],
      &[154],
      &[153],
      &[8],
    ]);
    let mmvd_flag = b.add([
      &[120],
      &[122],
      &[UNUSED_CTX],
      &[8],
    ]);
    let mmvd_merge_idx = b.add([
      &[154],
      &[154],
      &[UNUSED_CTX],
      &[10],
    ]);
    let mmvd_step_idx = b.add([
      &[213],
      &[244],
      &[UNUSED_CTX],
      &[1],
    ]);
    let part_size = b.add([
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE],
    ]);
    let pred_mode = b.add([
      &[192, 168],
      &[165, 139],
      &[UNUSED_CTX, UNUSED_CTX],
      &[5, 2],
    ]);
    let multi_ref_line_idx = b.add([
      &[90, 212, UNUSED_CTX],
      &[118, 212, UNUSED_CTX],
      &[119, 169, UNUSED_CTX],
      &[8, 8, DEFAULT_RATE],
    ]);
    let intra_luma_mpm_flag = b.add([
      &[154],
      &[154],
      &[170],
      &[6],
    ]);
    let intra_luma_planar_flag = b.add([
      &[154, 154],
      &[154, 154],
      &[154, 154],
      &[6, 6],
    ]);
    let intra_chroma_pred_mode = b.add([
      &[137, 139, 140],
      &[138, 139, 169],
      &[154, 139, 154],
      &[5, 8, 9],
    ]);
    let delta_qp = b.add([
      &[154, 154, 154],
      &[154, 154, 154],
      &[154, 154, 154],
      &[DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE],
    ]);
    let inter_dir = b.add([
      &[111, 125, 110, 94, 192],
      &[126, 111, 110, 94, 208],
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[0, 0, 4, 5, 0],
    ]);
    let ref_pic = b.add([
      &[125, 139],
      &[138, 168],
      &[UNUSED_CTX, UNUSED_CTX],
      &[4, 5],
    ]);
    let affine_flag = b.add([
      &[179, 169, 171],
      &[180, 168, 155],
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[8, 5, 4],
    ]);
    let affine_type = b.add([
      &[138],
      &[153],
      &[UNUSED_CTX],
      &[4],
    ]);
    let affine_merge_idx = b.add([
      &[109],
      &[95],
      &[UNUSED_CTX],
      &[0],
    ]);
    let bcw_idx = b.add([
      &[228],
      &[242],
      &[UNUSED_CTX],
      &[4],
    ]);
    let mvd = b.add([
      &[169, 183],
      &[155, 154],
      &[141, 156],
      &[9, 5],
    ]);
    let qt_root_cbf = b.add([
      &[109],
      &[95],
      &[110],
      &[4],
    ]);
    let qt_cbf = [
      b.add([
        &[141, 127, 139, 140],
        &[142, 127, 139, 140],
        &[UNUSED_CTX, 111, 124, 111],
        &[1, 5, 9, 8],
      ]),
      b.add([
        &[163, 154, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
        &[164, 154, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
        &[109, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
        &[5, 8, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE],
      ]),
      b.add([
        &[161, 154],
        &[192, 154],
        &[151, 155],
        &[5, 5],
      ]),
    ];
    let sig_coeff_group = [
      b.add([
        &[105, 155],
        &[106, 156],
        &[107, 158],
        &[8, 5],
      ]),
      b.add([
        &[91, 155],
        &[90, 141],
        &[76, 127],
        &[5, 8],
      ]),
      b.add([
        &[UNUSED_CTX, UNUSED_CTX],
        &[UNUSED_CTX, UNUSED_CTX],
        &[UNUSED_CTX, UNUSED_CTX],
        &[DEFAULT_RATE, DEFAULT_RATE],
      ]),
      b.add([
        &[UNUSED_CTX, UNUSED_CTX],
        &[UNUSED_CTX, UNUSED_CTX],
        &[UNUSED_CTX, UNUSED_CTX],
        &[DEFAULT_RATE, DEFAULT_RATE],
      ]),
    ];
    let sig_flag = [
      b.add([
        &[88, 166, 152, 182, 168, 154, 0, 167, 182, 168, 183, 155, 193, 213,
          183, 183, 169, 185],
        &[132, 152, 167, 168, 183, 140, 177, 182, 168, 154, 169, 155, 180,
          213, 183, 169, 184, 156],
        &[89, 138, 153, 139, 154, 140, 134, 139, 139, 140, 140, 141, 137,
          170, 169, 170, 141, 157],
        &[12, 9, 9, 9, 9, 10, 9, 9, 9, 9, 9, 9, 8, 8, 8, 8, 8, 9],
      ]),
      b.add([
        &[72, 167, 153, 168, 154, 155, 180, 199, 183, 199, 199, 186],
        &[133, 138, 153, 139, 154, 140, 181, 229, 169, 229, 170, 157],
        &[43, 153, 168, 169, 154, 155, 152, 215, 155, 201, 171, 143],
        &[9, 9, 12, 9, 13, 13, 5, 5, 8, 8, 8, 9],
      ]),
      b.add([
        &[152, 156, 201, 186, 186, 187, 182, 248, 188, 232, 188, 205, 182,
          223, 223, 223, 223, 223],
        &[123, 142, 157, 172, 172, 218, 138, 249, 248, 248, 219, 223, 139,
          223, 223, 223, 223, 223],
        &[93, 142, 157, 143, 188, 175, 138, 238, 205, 238, 253, 237, 139,
          223, 223, 223, 223, 253],
        &[9, 12, 8, 8, 8, 8, 8, 8, 8, 8, 8, 5, 8, 0, 0, 0, 0, 0],
      ]),
      b.add([
        &[182, 171, 143, 158, 172, 189, 183, 223, 223, 223, 223, 223],
        &[168, 156, 173, 216, 172, 219, 169, 223, 223, 223, 223, 223],
        &[152, 173, 157, 187, 204, 253, 170, 223, 223, 223, 223, 223],
        &[8, 9, 12, 8, 8, 8, 4, 0, 2, 2, 2, 2],
      ]),
      b.add([
        &[123, 173, 223, 191, 232, 251, 212, 223, 223, 236, 206, 223, 192,
          223, 223, 223, 223, 223],
        &[123, 175, 223, 175, 218, 223, 138, 223, 223, 223, 222, 223, 196,
          223, 223, 223, 223, 223],
        &[107, 174, 223, 238, 251, 223, 63, 223, 223, 238, 223, 238, 12, 223,
          223, 223, 223, 223],
        &[8, 8, 4, 8, 8, 8, 8, 0, 0, 4, 8, 5, 4, 2, 2, 2, 2, 1],
      ]),
      b.add([
        &[167, 201, 223, 248, 219, 223, 181, 223, 223, 223, 223, 223],
        &[167, 171, 223, 175, 248, 223, 152, 223, 223, 223, 223, 223],
        &[166, 234, 223, 236, 248, 223, 108, 223, 223, 223, 223, 223],
        &[8, 8, 5, 8, 8, 8, 5, 1, 2, 2, 2, 2],
      ]),
    ];
    let par_flag = [
      b.add([
        &[121, 105, 136, 152, 138, 183, 90, 122, 167, 153, 168, 135, 152,
          153, 168, 139, 151, 153, 139, 168, 154],
        &[121, 119, 136, 137, 138, 153, 104, 122, 138, 153, 139, 106, 138,
          153, 168, 139, 137, 153, 168, 139, 139],
        &[121, 135, 137, 152, 138, 153, 91, 137, 138, 153, 139, 151, 138,
          153, 139, 139, 138, 168, 139, 154, 139],
        &[8, 9, 12, 13, 13, 13, 10, 13, 13, 13, 13, 13, 13, 13, 13, 13, 10,
          13, 13, 13, 13],
      ]),
      b.add([
        &[151, 120, 152, 138, 153, 153, 136, 168, 154, 168, 154],
        &[135, 120, 137, 138, 138, 153, 136, 153, 168, 139, 154],
        &[136, 135, 152, 153, 138, 153, 136, 168, 154, 139, 154],
        &[8, 10, 12, 12, 13, 13, 10, 10, 13, 13, 13],
      ]),
    ];
    let gtx_flag = [
      b.add([
        &[31, 73, 118, 75, 152, 109, 42, 44, 105, 107, 109, 0, 119, 136, 152,
          124, 118, 136, 138, 153, 140],
        &[14, 116, 86, 119, 106, 152, 0, 72, 120, 151, 138, 116, 90, 107,
          152, 153, 104, 107, 123, 153, 154],
        &[90, 72, 119, 135, 137, 138, 43, 60, 106, 137, 109, 58, 106, 108,
          109, 124, 121, 138, 139, 154, 155],
        &[4, 1, 8, 8, 4, 2, 5, 9, 9, 8, 9, 9, 9, 9, 8, 9, 9, 8, 9, 8, 8],
      ]),
      b.add([
        &[119, 101, 134, 151, 107, 123, 118, 122, 124, 140, 155],
        &[117, 0, 90, 106, 92, 93, 147, 136, 138, 154, 140],
        &[194, 40, 120, 122, 122, 138, 103, 121, 153, 154, 155],
        &[2, 5, 8, 8, 8, 6, 6, 8, 8, 8, 7],
      ]),
      b.add([
        &[43, 177, 181, 168, 154, 170, 133, 167, 139, 154, 155, 164, 153,
          154, 169, 155, 181, 183, 169, 185, 186],
        &[101, 133, 137, 153, 139, 140, 134, 138, 139, 154, 155, 136, 153,
          154, 140, 170, 138, 154, 155, 170, 186],
        &[134, 120, 123, 153, 139, 140, 92, 124, 154, 125, 111, 138, 154,
          140, 155, 141, 154, 140, 185, 171, 143],
        &[8, 5, 9, 9, 12, 9, 9, 10, 13, 12, 10, 9, 10, 10, 10, 10, 8, 9, 8,
          8, 10],
      ]),
      b.add([
        &[0, 178, 153, 154, 140, 140, 196, 170, 186, 157, 188],
        &[0, 135, 153, 139, 125, 140, 182, 155, 156, 142, 159],
        &[163, 136, 153, 154, 125, 140, 183, 170, 201, 187, 174],
        &[6, 9, 10, 12, 12, 10, 5, 9, 8, 8, 9],
      ]),
    ];
    let last_x = [
      b.add([
        &[111, 111, 110, 111, 111, 139, 111, 126, 111, 139, 126, 126, 111,
          111, 169, 154, 111, 110, 110, 139, UNUSED_CTX, UNUSED_CTX,
          UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
        &[125, 110, 109, 125, 125, 123, 111, 111, 95, 123, 126, 111, 110, 95,
          169, 154, 140, 139, 139, 138, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX,
          UNUSED_CTX, UNUSED_CTX],
        &[125, 140, 124, 111, 111, 109, 111, 126, 125, 123, 111, 141, 111,
          125, 79, 155, 142, 170, 140, 183, UNUSED_CTX, UNUSED_CTX,
          UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
        &[8, 5, 5, 5, 4, 4, 5, 4, 4, 0, 5, 1, 0, 0, 0, 1, 1, 0, 0, 0,
          DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE,
          DEFAULT_RATE],
      ]),
      b.add([
        &[122, 124, 63, UNUSED_CTX],
        &[138, 123, 92, UNUSED_CTX],
        &[138, 108, 47, UNUSED_CTX],
        &[2, 1, 1, DEFAULT_RATE],
      ]),
    ];
    let last_y = [
      b.add([
        &[125, 125, 139, 125, 111, 139, 111, 111, 110, 110, 140, 126, 125,
          125, 140, 139, 111, 110, 124, 181, UNUSED_CTX, UNUSED_CTX,
          UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
        &[95, 95, 109, 110, 110, 108, 125, 111, 124, 123, 140, 111, 110, 124,
          139, 125, 126, 110, 124, 182, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX,
          UNUSED_CTX, UNUSED_CTX],
        &[110, 110, 109, 125, 111, 123, 111, 126, 95, 108, 111, 127, 111, 95,
          78, 169, 157, 141, 125, 138, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX,
          UNUSED_CTX, UNUSED_CTX],
        &[8, 5, 8, 5, 5, 4, 5, 5, 4, 0, 5, 5, 1, 0, 0, 1, 4, 1, 0, 0,
          DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE,
          DEFAULT_RATE],
      ]),
      b.add([
        &[122, 124, 123, UNUSED_CTX],
        &[108, 123, 121, UNUSED_CTX],
        &[123, 123, 91, UNUSED_CTX],
        &[2, 2, 2, DEFAULT_RATE],
      ]),
    ];
    let mvp_idx = b.add([
      &[153],
      &[168],
      &[168],
      &[10],
    ]);
    let smvd_flag = b.add([
      &[154],
      &[125],
      &[UNUSED_CTX],
      &[8],
    ]);
    let sao_merge_flag = b.add([
      &[47],
      &[244],
      &[199],
      &[0],
    ]);
    let sao_type_idx = b.add([
      &[47],
      &[95],
      &[95],
      &[0],
    ]);
    let transquant_bypass_flag = b.add([
      &[154],
      &[154],
      &[154],
      &[DEFAULT_RATE],
    ]);
    let rdpcm_flag = b.add([
      &[139, 139],
      &[139, 139],
      &[UNUSED_CTX, UNUSED_CTX],
      &[DEFAULT_RATE, DEFAULT_RATE],
    ]);
    let rdpcm_dir = b.add([
      &[139, 139],
      &[139, 139],
      &[UNUSED_CTX, UNUSED_CTX],
      &[DEFAULT_RATE, DEFAULT_RATE],
    ]);
    let mts_idx = b.add([
      &[UNUSED_CTX, 155, 155, 140, 140, UNUSED_CTX, 216, 153, 153, 0,
        UNUSED_CTX],
      &[UNUSED_CTX, 155, 155, 140, 140, UNUSED_CTX, 233, 167, 153, 0,
        UNUSED_CTX],
      &[UNUSED_CTX, UNUSED_CTX, 140, 140, 140, UNUSED_CTX, 219, 138, 153, 0,
        UNUSED_CTX],
      &[DEFAULT_RATE, 8, 8, 8, 8, DEFAULT_RATE, 4, 8, 9, 3, DEFAULT_RATE],
    ]);
    let isp_mode = b.add([
      &[152, 154],
      &[166, 154],
      &[152, 154],
      &[8, 5],
    ]);
    let sbt_flag = b.add([
      &[168, 183],
      &[197, 183],
      &[UNUSED_CTX, UNUSED_CTX],
      &[4, 8],
    ]);
    let sbt_quad_flag = b.add([
      &[168],
      &[168],
      &[UNUSED_CTX],
      &[9],
    ]);
    let sbt_hor_flag = b.add([
      &[139, 154, 139],
      &[139, 154, 139],
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[8, 5, 4],
    ]);
    let sbt_pos_flag = b.add([
      &[154],
      &[154],
      &[UNUSED_CTX],
      &[13],
    ]);
    let cross_comp_pred = b.add([
      &[154, 154, 154, 154, 154, 154, 154, 154, 154, 154],
      &[154, 154, 154, 154, 154, 154, 154, 154, 154, 154],
      &[154, 154, 154, 154, 154, 154, 154, 154, 154, 154],
      &[DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE,
        DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE],
    ]);
    let chroma_qp_adj_flag = b.add([
      &[154],
      &[154],
      &[154],
      &[DEFAULT_RATE],
    ]);
    let chroma_qp_adj_idc = b.add([
      &[154],
      &[154],
      &[154],
      &[DEFAULT_RATE],
    ]);
    let imv_flag = b.add([
      &[212, 180, 183, 242],
      &[213, 166, 198, 244],
      &[UNUSED_CTX, 152, UNUSED_CTX, UNUSED_CTX],
      &[1, 5, 1, 0],
    ]);
    let ctb_alf_flag = b.add([
      &[154, 186, 174, 183, 233, 250, 168, 248, 250],
      &[139, 186, 203, 183, 247, 249, 183, 232, 249],
      &[219, 236, 238, 232, 249, 235, 246, 234, 251],
      &[0, 0, 4, 0, 0, 1, 0, 0, 1],
    ]);
    let ciip_flag = b.add([
      &[225],
      &[197],
      &[UNUSED_CTX],
      &[1],
    ]);
    let triangle_flag = b.add([
      &[149],
      &[151],
      &[UNUSED_CTX],
      &[8],
    ]);
    let triangle_idx = b.add([
      &[UNUSED_CTX],
      &[UNUSED_CTX],
      &[UNUSED_CTX],
      &[DEFAULT_RATE],
    ]);
    let ibc_flag = b.add([
      &[0, 154, 141],
      &[0, 153, 140],
      &[132, 153, 125],
      &[5, 5, 8],
    ]);
    let joint_cb_cr_flag = b.add([
      &[UNUSED_CTX],
      &[UNUSED_CTX],
      &[UNUSED_CTX],
      &[DEFAULT_RATE],
    ]);
    let ts_sig_coeff_group = b.add([
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE],
    ]);
    let ts_sig_flag = b.add([
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE],
    ]);
    let ts_par_flag = b.add([
      &[UNUSED_CTX],
      &[UNUSED_CTX],
      &[UNUSED_CTX],
      &[DEFAULT_RATE],
    ]);
    let ts_gtx_flag = b.add([
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX,
        UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX,
        UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX,
        UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX,
        UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX,
        UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX,
        UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX, UNUSED_CTX],
      &[DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE,
        DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE,
        DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE, DEFAULT_RATE],
    ]);
    let ts_residual_sign = b.add([
      &[UNUSED_CTX],
      &[UNUSED_CTX],
      &[UNUSED_CTX],
      &[DEFAULT_RATE],
    ]);

    let sao = CtxSpan::covering(&[sao_merge_flag, sao_type_idx]);

    let catalog = ContextCatalog {
      init_tables: b.tables,
      split_flag,
      split_qt_flag,
      split_hv_flag,
      split12_flag,
      skip_flag,
      merge_flag,
      regular_merge_flag,
      merge_idx,
      mmvd_flag,
      mmvd_merge_idx,
      mmvd_step_idx,
      part_size,
      pred_mode,
      multi_ref_line_idx,
      intra_luma_mpm_flag,
      intra_luma_planar_flag,
      intra_chroma_pred_mode,
      delta_qp,
      inter_dir,
      ref_pic,
      affine_flag,
      affine_type,
      affine_merge_idx,
      bcw_idx,
      mvd,
      qt_root_cbf,
      qt_cbf,
      sig_coeff_group,
      sig_flag,
      par_flag,
      gtx_flag,
      last_x,
      last_y,
      mvp_idx,
      smvd_flag,
      sao_merge_flag,
      sao_type_idx,
      transquant_bypass_flag,
      rdpcm_flag,
      rdpcm_dir,
      mts_idx,
      isp_mode,
      sbt_flag,
      sbt_quad_flag,
      sbt_hor_flag,
      sbt_pos_flag,
      cross_comp_pred,
      chroma_qp_adj_flag,
      chroma_qp_adj_idc,
      imv_flag,
      ctb_alf_flag,
      ciip_flag,
      triangle_flag,
      triangle_idx,
      ibc_flag,
      joint_cb_cr_flag,
      ts_sig_coeff_group,
      ts_sig_flag,
      ts_par_flag,
      ts_gtx_flag,
      ts_residual_sign,
      sao,
    };
    debug!("context catalog built: {} contexts", catalog.num_contexts());
    catalog
  }

  /// Total number of registered contexts; every live bank is exactly this
  /// large.
  #[inline]
  pub fn num_contexts(&self) -> usize {
    self.init_tables[0].len()
  }

  /// Full per-context row for one initialization id (`SliceType::init_id()`
  /// for the slice rows, [`RATE_INIT_ID`](super::RATE_INIT_ID) for the
  /// adaptation rates).
  pub fn init_table(&self, init_id: usize) -> &[u8] {
    assert!(
      init_id < NUM_INIT_TABLES,
      "invalid init id {init_id}, only {NUM_INIT_TABLES} tables defined"
    );
    &self.init_tables[init_id]
  }
}

impl Default for ContextCatalog {
  fn default() -> Self {
    Self::new()
  }
}
