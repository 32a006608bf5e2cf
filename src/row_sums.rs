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

/// Horizontal 3-sums of one row, sliding window.
///
/// `dst[x] = src[x - 1] + src[x] + src[x + 1]` where samples outside of the
/// row are `border`. Every column after the first costs one fetch and two adds.
pub(crate) fn row_sums_reference(src: &[u8], border: u8, dst: &mut [u16]) {
    let width = src.len();
    let dst = &mut dst[..width];

    let mut a = border as u16;
    let mut b = src[0] as u16;
    for (&next, sum) in src[1..].iter().zip(dst.iter_mut()) {
        let c = next as u16;
        *sum = a + b + c;
        a = b;
        b = c;
    }

    dst[width - 1] = a + b + border as u16;
}

/// Left and right neighbours of the chunk starting at `x0`.
///
/// Positions outside the row take the nearest edge sample, the caller must
/// swap them for the border color with [patch_row_edges].
#[inline]
pub(crate) fn clamped_neighbours<const N: usize>(src: &[u8], x0: usize) -> ([u8; N], [u8; N]) {
    let last = src.len() - 1;
    let left = std::array::from_fn(|i| src[(x0 + i).saturating_sub(1)]);
    let right = std::array::from_fn(|i| src[(x0 + i + 1).min(last)]);
    (left, right)
}

/// Replaces the replicated edge sample with the border in the first and last sums.
#[inline]
pub(crate) fn patch_row_edges(src: &[u8], border: u8, dst: &mut [u16]) {
    let last = src.len() - 1;
    dst[0] = dst[0] - src[0] as u16 + border as u16;
    dst[last] = dst[last] - src[last] as u16 + border as u16;
}

#[inline(always)]
fn sum_lanes<const N: usize>(left: &[u8], center: &[u8], right: &[u8], dst: &mut [u16]) {
    let left = &left[..N];
    let center = &center[..N];
    let right = &right[..N];
    let dst = &mut dst[..N];
    for i in 0..N {
        dst[i] = left[i] as u16 + center[i] as u16 + right[i] as u16;
    }
}

/// Portable fixed width variant, `src.len()` must be a multiple of `N`.
pub(crate) fn row_sums_lanes<const N: usize>(src: &[u8], border: u8, dst: &mut [u16]) {
    let width = src.len();
    debug_assert!(width % N == 0);

    for (x0, sums) in (0..width)
        .step_by(N)
        .zip(dst[..width].chunks_exact_mut(N))
    {
        let center = &src[x0..x0 + N];
        if x0 == 0 || x0 + N == width {
            let (left, right) = clamped_neighbours::<N>(src, x0);
            sum_lanes::<N>(&left, center, &right, sums);
        } else {
            sum_lanes::<N>(&src[x0 - 1..], center, &src[x0 + 1..], sums);
        }
    }

    patch_row_edges(src, border, dst);
}

pub(crate) fn row_sums_lanes8(src: &[u8], border: u8, dst: &mut [u16]) {
    row_sums_lanes::<8>(src, border, dst);
}

pub(crate) fn row_sums_lanes16(src: &[u8], border: u8, dst: &mut [u16]) {
    row_sums_lanes::<16>(src, border, dst);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_force(src: &[u8], border: u8) -> Vec<u16> {
        let width = src.len() as isize;
        let at = |x: isize| {
            if x < 0 || x >= width {
                border as u16
            } else {
                src[x as usize] as u16
            }
        };
        (0..width).map(|x| at(x - 1) + at(x) + at(x + 1)).collect()
    }

    #[test]
    fn test_sliding_window() {
        let mut dst = [0u16; 4];
        row_sums_reference(&[10, 20, 30, 40], 0, &mut dst);
        assert_eq!(dst, [30, 60, 90, 70]);
    }

    #[test]
    fn test_single_sample() {
        let mut dst = [0u16; 1];
        row_sums_reference(&[7], 3, &mut dst);
        assert_eq!(dst, [13]);
    }

    #[test]
    fn test_only_width_is_written() {
        let mut dst = [u16::MAX; 6];
        row_sums_reference(&[1, 1, 1, 1], 1, &mut dst);
        assert_eq!(dst, [3, 3, 3, 3, u16::MAX, u16::MAX]);
    }

    #[test]
    fn test_lanes_match_reference() {
        for width in [8usize, 16, 32, 48, 640] {
            let src = (0..width)
                .map(|x| (x * 37 + 11) as u8)
                .collect::<Vec<u8>>();
            for border in [0u8, 1, 128, 255] {
                let expected = brute_force(&src, border);

                let mut reference = vec![0u16; width];
                row_sums_reference(&src, border, &mut reference);
                assert_eq!(reference, expected, "reference, width {width}");

                let mut lanes = vec![0u16; width];
                row_sums_lanes8(&src, border, &mut lanes);
                assert_eq!(lanes, expected, "8 lanes, width {width}, border {border}");

                if width % 16 == 0 {
                    let mut lanes = vec![0u16; width];
                    row_sums_lanes16(&src, border, &mut lanes);
                    assert_eq!(lanes, expected, "16 lanes, width {width}, border {border}");
                }
            }
        }
    }

    #[test]
    fn test_saturated_row() {
        let src = [255u8; 16];
        let mut dst = [0u16; 16];
        row_sums_lanes16(&src, 255, &mut dst);
        assert!(dst.iter().all(|&x| x == 765));
    }
}
