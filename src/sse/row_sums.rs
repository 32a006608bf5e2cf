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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

const LANES: usize = 16;

pub(crate) fn sse_row_sums(src: &[u8], border: u8, dst: &mut [u16]) {
    // SSE2 is part of the compilation target, see `BlurBackend::resolve`.
    unsafe {
        sse_row_sums_impl(src, border, dst);
    }
}

#[inline(always)]
unsafe fn sum_chunk(left: __m128i, center: __m128i, right: __m128i, dst: &mut [u16]) {
    let zeros = _mm_setzero_si128();

    let sum_lo = _mm_add_epi16(
        _mm_add_epi16(
            _mm_unpacklo_epi8(left, zeros),
            _mm_unpacklo_epi8(center, zeros),
        ),
        _mm_unpacklo_epi8(right, zeros),
    );
    let sum_hi = _mm_add_epi16(
        _mm_add_epi16(
            _mm_unpackhi_epi8(left, zeros),
            _mm_unpackhi_epi8(center, zeros),
        ),
        _mm_unpackhi_epi8(right, zeros),
    );

    _mm_storeu_si128(dst.as_mut_ptr() as *mut _, sum_lo);
    _mm_storeu_si128(dst.get_unchecked_mut(8..).as_mut_ptr() as *mut _, sum_hi);
}

#[target_feature(enable = "sse2")]
unsafe fn sse_row_sums_impl(src: &[u8], border: u8, dst: &mut [u16]) {
    let width = src.len();
    debug_assert!(width % LANES == 0);
    debug_assert!(dst.len() >= width);

    for (x0, sums) in (0..width)
        .step_by(LANES)
        .zip(dst[..width].chunks_exact_mut(LANES))
    {
        unsafe {
            let center = _mm_loadu_si128(src.get_unchecked(x0..).as_ptr() as *const _);
            if x0 == 0 || x0 + LANES == width {
                let (left, right) = clamped_neighbours::<LANES>(src, x0);
                sum_chunk(
                    _mm_loadu_si128(left.as_ptr() as *const _),
                    center,
                    _mm_loadu_si128(right.as_ptr() as *const _),
                    sums,
                );
            } else {
                sum_chunk(
                    _mm_loadu_si128(src.get_unchecked(x0 - 1..).as_ptr() as *const _),
                    center,
                    _mm_loadu_si128(src.get_unchecked(x0 + 1..).as_ptr() as *const _),
                    sums,
                );
            }
        }
    }

    patch_row_edges(src, border, dst);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row_sums::row_sums_reference;

    #[test]
    fn test_sse_row_sums_match_reference() {
        for width in [16usize, 32, 48, 640] {
            let src = (0..width)
                .map(|x| (x * 131 + 7) as u8)
                .collect::<Vec<u8>>();
            for border in [0u8, 77, 255] {
                let mut expected = vec![0u16; width];
                row_sums_reference(&src, border, &mut expected);
                let mut sums = vec![0u16; width];
                sse_row_sums(&src, border, &mut sums);
                assert_eq!(sums, expected, "width {width}, border {border}");
            }
        }
    }
}
