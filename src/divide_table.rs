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

/// Largest sum of a 3x3 neighbourhood of 8-bit samples.
pub const MAX_NEIGHBOURHOOD_SUM: usize = 9 * 255;

/// Largest horizontal 3-sum of 8-bit samples.
pub const MAX_ROW_SUM: u16 = 3 * 255;

/// Number of entries in [DivideLookupTable].
pub const DIVIDE_TABLE_SIZE: usize = MAX_NEIGHBOURHOOD_SUM + 1;

/// `round(65536 / 9)`, the Q16 reciprocal shared by the table and vector averagers.
pub(crate) const RECIPROCAL_NINE_Q16: u16 = 7282;

/// Added to a sum before scaling so the truncating shift rounds to nearest.
pub(crate) const ROUNDING_BIAS: u16 = 4;

/// Scaled division by 9 of a neighbourhood sum, rounded to nearest.
///
/// Exact for every sum in `0..=MAX_NEIGHBOURHOOD_SUM`.
#[inline(always)]
pub(crate) const fn divide_by_nine(sum: u32) -> u32 {
    ((sum + ROUNDING_BIAS as u32) * RECIPROCAL_NINE_Q16 as u32) >> 16
}

const fn build_table() -> [u8; DIVIDE_TABLE_SIZE] {
    let mut table = [0u8; DIVIDE_TABLE_SIZE];
    let mut i = 0usize;
    while i < DIVIDE_TABLE_SIZE {
        table[i] = divide_by_nine(i as u32) as u8;
        i += 1;
    }
    table
}

/// Precomputed `round(i / 9)` for every possible 3x3 sum.
///
/// The table is filled on construction and is read-only afterwards,
/// so one instance may be shared by any number of readers.
#[derive(Clone)]
pub struct DivideLookupTable {
    table: [u8; DIVIDE_TABLE_SIZE],
}

impl DivideLookupTable {
    pub const fn new() -> DivideLookupTable {
        DivideLookupTable {
            table: build_table(),
        }
    }

    /// Recomputes every entry, calling it again produces identical values.
    pub fn initialize(&mut self) {
        self.table = build_table();
    }

    /// Rounded average of a 3x3 sum.
    ///
    /// # Panics
    /// If `sum` is larger than [MAX_NEIGHBOURHOOD_SUM].
    #[inline(always)]
    pub fn get(&self, sum: u16) -> u8 {
        self.table[sum as usize]
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.table
    }
}

impl Default for DivideLookupTable {
    fn default() -> Self {
        DivideLookupTable::new()
    }
}

impl std::fmt::Debug for DivideLookupTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DivideLookupTable")
            .field("len", &self.table.len())
            .finish()
    }
}
