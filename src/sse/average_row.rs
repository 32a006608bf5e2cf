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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

const LANES: usize = 16;

pub(crate) fn sse_average_row(rows: [&[u16]; 3], _: &DivideLookupTable, dst: &mut [u8]) {
    // SSE2 is part of the compilation target, see `BlurBackend::resolve`.
    unsafe {
        sse_average_row_impl(rows, dst);
    }
}

#[inline(always)]
unsafe fn divide_by_nine(above: &[u16], current: &[u16], below: &[u16]) -> __m128i {
    let v_bias = _mm_set1_epi16(ROUNDING_BIAS as i16);
    let v_reciprocal = _mm_set1_epi16(RECIPROCAL_NINE_Q16 as i16);

    let mut sum = _mm_loadu_si128(above.as_ptr() as *const _);
    sum = _mm_add_epi16(sum, _mm_loadu_si128(current.as_ptr() as *const _));
    sum = _mm_add_epi16(sum, _mm_loadu_si128(below.as_ptr() as *const _));
    sum = _mm_add_epi16(sum, v_bias);
    _mm_mulhi_epu16(sum, v_reciprocal)
}

#[target_feature(enable = "sse2")]
unsafe fn sse_average_row_impl(rows: [&[u16]; 3], dst: &mut [u8]) {
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
            _mm_storeu_si128(dst.as_mut_ptr() as *mut _, _mm_packus_epi16(lo, hi));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row_average::{average_row_reference, every_sum_rows};

    #[test]
    fn test_sse_average_agrees_with_table() {
        let table = DivideLookupTable::new();
        let [above, current, below] = every_sum_rows(16);
        let width = above.len();

        let mut expected = vec![0u8; width];
        average_row_reference([&above, &current, &below], &table, &mut expected);
        let mut averaged = vec![0u8; width];
        sse_average_row([&above, &current, &below], &table, &mut averaged);
        assert_eq!(averaged, expected);
    }
}
