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

use crate::avx::pack::_mm256_widen_u8;
use crate::row_sums::{clamped_neighbours, patch_row_edges};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

const LANES: usize = 32;

/// Caller must ensure AVX2 is available, `BlurBackend::resolve` checks it.
pub(crate) fn avx_row_sums(src: &[u8], border: u8, dst: &mut [u16]) {
    unsafe {
        avx_row_sums_impl(src, border, dst);
    }
}

#[inline(always)]
unsafe fn sum_chunk(left: __m256i, center: __m256i, right: __m256i, dst: &mut [u16]) {
    let (left0, left1) = _mm256_widen_u8(left);
    let (center0, center1) = _mm256_widen_u8(center);
    let (right0, right1) = _mm256_widen_u8(right);

    let sum0 = _mm256_add_epi16(_mm256_add_epi16(left0, center0), right0);
    let sum1 = _mm256_add_epi16(_mm256_add_epi16(left1, center1), right1);

    _mm256_storeu_si256(dst.as_mut_ptr() as *mut _, sum0);
    _mm256_storeu_si256(dst.get_unchecked_mut(16..).as_mut_ptr() as *mut _, sum1);
}

#[target_feature(enable = "avx2")]
unsafe fn avx_row_sums_impl(src: &[u8], border: u8, dst: &mut [u16]) {
    let width = src.len();
    debug_assert!(width % LANES == 0);
    debug_assert!(dst.len() >= width);

    for (x0, sums) in (0..width)
        .step_by(LANES)
        .zip(dst[..width].chunks_exact_mut(LANES))
    {
        unsafe {
            let center = _mm256_loadu_si256(src.get_unchecked(x0..).as_ptr() as *const _);
            if x0 == 0 || x0 + LANES == width {
                let (left, right) = clamped_neighbours::<LANES>(src, x0);
                sum_chunk(
                    _mm256_loadu_si256(left.as_ptr() as *const _),
                    center,
                    _mm256_loadu_si256(right.as_ptr() as *const _),
                    sums,
                );
            } else {
                sum_chunk(
                    _mm256_loadu_si256(src.get_unchecked(x0 - 1..).as_ptr() as *const _),
                    center,
                    _mm256_loadu_si256(src.get_unchecked(x0 + 1..).as_ptr() as *const _),
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
    fn test_avx_row_sums_match_reference() {
        if !std::arch::is_x86_feature_detected!("avx2") {
            return;
        }
        for width in [32usize, 64, 96, 640] {
            let src = (0..width)
                .map(|x| (x * 53 + 200) as u8)
                .collect::<Vec<u8>>();
            for border in [0u8, 13, 255] {
                let mut expected = vec![0u16; width];
                row_sums_reference(&src, border, &mut expected);
                let mut sums = vec![0u16; width];
                avx_row_sums(&src, border, &mut sums);
                assert_eq!(sums, expected, "width {width}, border {border}");
            }
        }
    }
}
