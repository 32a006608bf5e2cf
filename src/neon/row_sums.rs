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

use crate::row_sums::{clamped_neighbours, patch_row_edges};
use std::arch::aarch64::*;

const LANES: usize = 16;

#[inline(always)]
unsafe fn sum_chunk(left: uint8x16_t, center: uint8x16_t, right: uint8x16_t, dst: &mut [u16]) {
    let sum0 = vaddw_u8(
        vaddl_u8(vget_low_u8(left), vget_low_u8(center)),
        vget_low_u8(right),
    );
    let sum1 = vaddw_high_u8(vaddl_high_u8(left, center), right);

    vst1q_u16(dst.as_mut_ptr(), sum0);
    vst1q_u16(dst.get_unchecked_mut(8..).as_mut_ptr(), sum1);
}

pub(crate) fn neon_row_sums(src: &[u8], border: u8, dst: &mut [u16]) {
    let width = src.len();
    debug_assert!(width % LANES == 0);
    debug_assert!(dst.len() >= width);

    for (x0, sums) in (0..width)
        .step_by(LANES)
        .zip(dst[..width].chunks_exact_mut(LANES))
    {
        unsafe {
            let center = vld1q_u8(src.get_unchecked(x0..).as_ptr());
            if x0 == 0 || x0 + LANES == width {
                let (left, right) = clamped_neighbours::<LANES>(src, x0);
                sum_chunk(vld1q_u8(left.as_ptr()), center, vld1q_u8(right.as_ptr()), sums);
            } else {
                sum_chunk(
                    vld1q_u8(src.get_unchecked(x0 - 1..).as_ptr()),
                    center,
                    vld1q_u8(src.get_unchecked(x0 + 1..).as_ptr()),
                    sums,
                );
            }
        }
    }

    patch_row_edges(src, border, dst);
}
