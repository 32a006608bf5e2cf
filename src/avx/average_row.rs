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

use crate::avx::pack::_mm256_pack_u16;
use crate::divide_table::{DivideLookupTable, RECIPROCAL_NINE_Q16, ROUNDING_BIAS};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

const LANES: usize = 32;

/// Caller must ensure AVX2 is available, `BlurBackend::resolve` checks it.
pub(crate) fn avx_average_row(rows: [&[u16]; 3], _: &DivideLookupTable, dst: &mut [u8]) {
    unsafe {
        avx_average_row_impl(rows, dst);
    }
}

#[inline(always)]
unsafe fn divide_by_nine(above: &[u16], current: &[u16], below: &[u16]) -> __m256i {
    let v_bias = _mm256_set1_epi16(ROUNDING_BIAS as i16);
    let v_reciprocal = _mm256_set1_epi16(RECIPROCAL_NINE_Q16 as i16);

    let mut sum = _mm256_loadu_si256(above.as_ptr() as *const _);
    sum = _mm256_add_epi16(sum, _mm256_loadu_si256(current.as_ptr() as *const _));
    sum = _mm256_add_epi16(sum, _mm256_loadu_si256(below.as_ptr() as *const _));
    sum = _mm256_add_epi16(sum, v_bias);
    _mm256_mulhi_epu16(sum, v_reciprocal)
}

#[target_feature(enable = "avx2")]
unsafe fn avx_average_row_impl(rows: [&[u16]; 3], dst: &mut [u8]) {
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
                above.get_unchecked(16..),
                current.get_unchecked(16..),
                below.get_unchecked(16..),
            );
            _mm256_storeu_si256(dst.as_mut_ptr() as *mut _, _mm256_pack_u16(lo, hi));
        }
    }
}
