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

/// Averages rows above, current and below through the divide table.
pub(crate) fn average_row_reference(rows: [&[u16]; 3], table: &DivideLookupTable, dst: &mut [u8]) {
    let [above, current, below] = rows;
    for (((dst, &a), &c), &b) in dst.iter_mut().zip(above).zip(current).zip(below) {
        *dst = table.get(a + c + b);
    }
}

#[inline(always)]
fn average_lanes<const N: usize>(above: &[u16], current: &[u16], below: &[u16], dst: &mut [u8]) {
    let above = &above[..N];
    let current = &current[..N];
    let below = &below[..N];
    let dst = &mut dst[..N];
    for i in 0..N {
        let sum = above[i]
            .wrapping_add(current[i])
            .wrapping_add(below[i])
            .wrapping_add(ROUNDING_BIAS);
        let quotient = ((sum as u32 * RECIPROCAL_NINE_Q16 as u32) >> 16) as u16;
        dst[i] = quotient.min(255) as u8;
    }
}

/// Portable fixed width variant using a Q16 multiply-high instead of the table.
pub(crate) fn average_row_lanes<const N: usize>(
    rows: [&[u16]; 3],
    _: &DivideLookupTable,
    dst: &mut [u8],
) {
    let [above, current, below] = rows;
    debug_assert!(dst.len() % N == 0);
    for (((dst, above), current), below) in dst
        .chunks_exact_mut(N)
        .zip(above.chunks_exact(N))
        .zip(current.chunks_exact(N))
        .zip(below.chunks_exact(N))
    {
        average_lanes::<N>(above, current, below, dst);
    }
}

pub(crate) fn average_row_lanes8(rows: [&[u16]; 3], table: &DivideLookupTable, dst: &mut [u8]) {
    average_row_lanes::<8>(rows, table, dst);
}

pub(crate) fn average_row_lanes16(rows: [&[u16]; 3], table: &DivideLookupTable, dst: &mut [u8]) {
    average_row_lanes::<16>(rows, table, dst);
}

/// Three rows whose column sums walk every value in `0..=MAX_NEIGHBOURHOOD_SUM`,
/// zero padded to a multiple of `lanes`.
#[cfg(test)]
pub(crate) fn every_sum_rows(lanes: usize) -> [Vec<u16>; 3] {
    use crate::divide_table::{MAX_NEIGHBOURHOOD_SUM, MAX_ROW_SUM};
    let padded = (MAX_NEIGHBOURHOOD_SUM + 1).div_ceil(lanes) * lanes;
    let mut above = vec![0u16; padded];
    let mut current = vec![0u16; padded];
    let mut below = vec![0u16; padded];
    for sum in 0..=MAX_NEIGHBOURHOOD_SUM as u16 {
        let i = sum as usize;
        above[i] = sum.min(MAX_ROW_SUM);
        current[i] = (sum - above[i]).min(MAX_ROW_SUM);
        below[i] = sum - above[i] - current[i];
    }
    [above, current, below]
}
