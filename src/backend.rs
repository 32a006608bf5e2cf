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

use crate::divide_table::{DivideLookupTable, MAX_ROW_SUM};
use crate::row_average::{average_row_lanes16, average_row_lanes8, average_row_reference};
use crate::row_sums::{row_sums_lanes16, row_sums_lanes8, row_sums_reference};
use crate::util::MismatchedSize;
use crate::BlurError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[repr(C)]
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
/// Selects the row kernels used by a blur.
///
/// Every backend produces bit identical output, they only differ in speed.
/// Selection is explicit, nothing picks a backend on the caller's behalf.
pub enum BlurBackend {
    /// Scalar sliding window, works for any width.
    #[default]
    Reference,
    /// Portable 8 lanes, width must be a multiple of 8.
    Lanes8,
    /// Portable 16 lanes, width must be a multiple of 16.
    Lanes16,
    /// SSE2, 16 lanes.
    Sse2,
    /// AVX2, 32 lanes. Requires a CPU reporting AVX2.
    Avx2,
    /// NEON, 16 lanes.
    Neon,
}

impl BlurBackend {
    pub const ALL: [BlurBackend; 6] = [
        BlurBackend::Reference,
        BlurBackend::Lanes8,
        BlurBackend::Lanes16,
        BlurBackend::Sse2,
        BlurBackend::Avx2,
        BlurBackend::Neon,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            BlurBackend::Reference => "reference",
            BlurBackend::Lanes8 => "vector-8",
            BlurBackend::Lanes16 => "vector-16",
            BlurBackend::Sse2 => "sse2",
            BlurBackend::Avx2 => "avx2",
            BlurBackend::Neon => "neon",
        }
    }

    /// Pixels processed per step, row width must be a multiple of it.
    pub const fn lanes(&self) -> usize {
        match self {
            BlurBackend::Reference => 1,
            BlurBackend::Lanes8 => 8,
            BlurBackend::Lanes16 | BlurBackend::Sse2 | BlurBackend::Neon => 16,
            BlurBackend::Avx2 => 32,
        }
    }

    pub fn is_available(&self) -> bool {
        self.resolve().is_ok()
    }

    /// Looks up row kernels for this backend.
    pub fn resolve(self) -> Result<BackendPair, BlurError> {
        let (row_sums, average_row): (RowSumsFn, AverageRowFn) = match self {
            BlurBackend::Reference => (
                row_sums_reference as RowSumsFn,
                average_row_reference as AverageRowFn,
            ),
            BlurBackend::Lanes8 => (row_sums_lanes8 as RowSumsFn, average_row_lanes8 as AverageRowFn),
            BlurBackend::Lanes16 => (
                row_sums_lanes16 as RowSumsFn,
                average_row_lanes16 as AverageRowFn,
            ),
            BlurBackend::Sse2 => Self::sse_kernels()?,
            BlurBackend::Avx2 => Self::avx_kernels()?,
            BlurBackend::Neon => Self::neon_kernels()?,
        };
        Ok(BackendPair {
            backend: self,
            lanes: self.lanes(),
            row_sums,
            average_row,
        })
    }

    fn sse_kernels() -> Result<(RowSumsFn, AverageRowFn), BlurError> {
        #[cfg(all(
            any(target_arch = "x86_64", target_arch = "x86"),
            target_feature = "sse2",
            feature = "sse"
        ))]
        {
            use crate::sse::{sse_average_row, sse_row_sums};
            Ok((sse_row_sums as RowSumsFn, sse_average_row as AverageRowFn))
        }
        #[cfg(not(all(
            any(target_arch = "x86_64", target_arch = "x86"),
            target_feature = "sse2",
            feature = "sse"
        )))]
        {
            Err(BlurError::BackendUnavailable(BlurBackend::Sse2))
        }
    }

    fn avx_kernels() -> Result<(RowSumsFn, AverageRowFn), BlurError> {
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        {
            if std::arch::is_x86_feature_detected!("avx2") {
                use crate::avx::{avx_average_row, avx_row_sums};
                return Ok((avx_row_sums as RowSumsFn, avx_average_row as AverageRowFn));
            }
        }
        Err(BlurError::BackendUnavailable(BlurBackend::Avx2))
    }

    fn neon_kernels() -> Result<(RowSumsFn, AverageRowFn), BlurError> {
        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
        {
            use crate::neon::{neon_average_row, neon_row_sums};
            Ok((neon_row_sums as RowSumsFn, neon_average_row as AverageRowFn))
        }
        #[cfg(not(all(target_arch = "aarch64", feature = "neon")))]
        {
            Err(BlurError::BackendUnavailable(BlurBackend::Neon))
        }
    }
}

impl Display for BlurBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BlurBackend {
    type Err = BlurError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reference" | "scalar" | "c" => Ok(BlurBackend::Reference),
            "vector-8" => Ok(BlurBackend::Lanes8),
            "vector-16" => Ok(BlurBackend::Lanes16),
            "sse2" => Ok(BlurBackend::Sse2),
            "avx2" => Ok(BlurBackend::Avx2),
            "neon" => Ok(BlurBackend::Neon),
            _ => Err(BlurError::UnknownBackend(s.to_string())),
        }
    }
}

/// Backends usable in this build on this CPU, reference first.
pub fn available_backends() -> Vec<BlurBackend> {
    BlurBackend::ALL
        .into_iter()
        .filter(|backend| backend.is_available())
        .collect()
}

/// Resolves a backend by name, see [BlurBackend::from_str] for accepted names.
pub fn resolve_backend(name: &str) -> Result<BackendPair, BlurError> {
    name.parse::<BlurBackend>()?.resolve()
}

pub(crate) type RowSumsFn = fn(src: &[u8], border: u8, dst: &mut [u16]);

pub(crate) type AverageRowFn = fn(rows: [&[u16]; 3], table: &DivideLookupTable, dst: &mut [u8]);

/// Row sum and row average kernels of one backend.
#[derive(Debug, Copy, Clone)]
pub struct BackendPair {
    backend: BlurBackend,
    lanes: usize,
    row_sums: RowSumsFn,
    average_row: AverageRowFn,
}

impl BackendPair {
    #[inline]
    pub fn backend(&self) -> BlurBackend {
        self.backend
    }

    #[inline]
    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Checks a row of `width` pixels can be handled by these kernels.
    #[inline]
    pub fn check_width(&self, width: usize) -> Result<(), BlurError> {
        if width == 0 {
            return Err(BlurError::ZeroBaseSize);
        }
        if width % self.lanes != 0 {
            return Err(BlurError::LaneAlignmentMismatch {
                lanes: self.lanes,
                width,
            });
        }
        Ok(())
    }

    /// Computes horizontal 3-sums of `src` into the first `src.len()` items of `dst`.
    pub fn compute_row_sums(&self, src: &[u8], border: u8, dst: &mut [u16]) -> Result<(), BlurError> {
        self.check_width(src.len())?;
        if dst.len() < src.len() {
            return Err(BlurError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: src.len(),
                received: dst.len(),
            }));
        }
        self.row_sums_unchecked(src, border, dst);
        Ok(())
    }

    /// Averages three rows of sums into `dst`, the rows must be at least as long as `dst`.
    ///
    /// Every sum must be at most `3 * 255`, as produced by [BackendPair::compute_row_sums].
    pub fn average_row(
        &self,
        rows: [&[u16]; 3],
        table: &DivideLookupTable,
        dst: &mut [u8],
    ) -> Result<(), BlurError> {
        let width = dst.len();
        self.check_width(width)?;
        if let Some(short) = rows.iter().find(|row| row.len() < width) {
            return Err(BlurError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: width,
                received: short.len(),
            }));
        }
        for row in rows {
            if let Some((column, &value)) = row[..width]
                .iter()
                .enumerate()
                .find(|&(_, &value)| value > MAX_ROW_SUM)
            {
                return Err(BlurError::RowSumOutOfRange { column, value });
            }
        }
        self.average_row_unchecked(rows, table, dst);
        Ok(())
    }

    /// Width must already be validated with [BackendPair::check_width].
    #[inline(always)]
    pub(crate) fn row_sums_unchecked(&self, src: &[u8], border: u8, dst: &mut [u16]) {
        (self.row_sums)(src, border, dst)
    }

    /// Width must already be validated with [BackendPair::check_width].
    #[inline(always)]
    pub(crate) fn average_row_unchecked(
        &self,
        rows: [&[u16]; 3],
        table: &DivideLookupTable,
        dst: &mut [u8],
    ) {
        let width = dst.len();
        let [above, current, below] = rows;
        (self.average_row)([&above[..width], &current[..width], &below[..width]], table, dst)
    }
}
