// Copyright (c) Radzivon Bartoshyk. All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
// 1.  Redistributions of source code must retain the above copyright notice, this
// list of conditions and the following disclaimer.
//
// 2.  Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3.  Neither the name of the copyright holder nor the names of its
// contributors may be used to endorse or promote products derived from
// this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use crate::divide_table::{DivideLookupTable, RECIPROCAL_NINE_Q16, ROUNDING_BIAS};
use std::arch::aarch64::*;

const LANES: usize = 16;

#[inline(always)]
unsafe fn divide_by_nine(above: &[u16], current: &[u16], below: &[u16]) -> uint16x8_t {
    let v_reciprocal = vdupq_n_u16(RECIPROCAL_NINE_Q16);

    let mut sum = vaddq_u16(vld1q_u16(above.as_ptr()), vld1q_u16(current.as_ptr()));
    sum = vaddq_u16(sum, vld1q_u16(below.as_ptr()));
    sum = vaddq_u16(sum, vdupq_n_u16(ROUNDING_BIAS));

    let product_lo = vmull_u16(vget_low_u16(sum), vget_low_u16(v_reciprocal));
    let product_hi = vmull_high_u16(sum, v_reciprocal);
    vcombine_u16(vshrn_n_u32::<16>(product_lo), vshrn_n_u32::<16>(product_hi))
}

pub(crate) fn neon_average_row(rows: [&[u16]; 3], _: &DivideLookupTable, dst: &mut [u8]) {
    let [above, current, below] = rows;
    debug_assert!(dst.len() % LANES == 0);

    for (((dst, above), current), below) in dst
        .chunks_exact_mut(LANES)
        .zip(above.chunks_exact(LANES))
        .zip(current.chunks_exact(LANES))
        .zip(below.chunks_exact(LANES))
    {
        unsafe {
            let lo = divide_by_nine(above, current, below);
            let hi = divide_by_nine(
                above.get_unchecked(8..),
                current.get_unchecked(8..),
                below.get_unchecked(8..),
            );
            vst1q_u8(
                dst.as_mut_ptr(),
                vcombine_u8(vqmovn_u16(lo), vqmovn_u16(hi)),
            );
        }
    }
}
