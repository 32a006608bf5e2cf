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

use crate::BlurBackend;
use std::error::Error;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
/// Shows size mismatching
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlurError {
    ZeroBaseSize,
    MinimumSliceSizeMismatch(MismatchedSize),
    MinimumStrideSizeMismatch(MismatchedSize),
    ImagesMustMatch,
    /// Row is wider than the running sum buffer, `expected` holds the capacity
    CapacityExceeded(MismatchedSize),
    UnknownBackend(String),
    BackendUnavailable(BlurBackend),
    /// Vector backends only accept rows that are a whole number of lanes
    LaneAlignmentMismatch {
        lanes: usize,
        width: usize,
    },
    /// Row sum above `3 * 255` passed to a row averager
    RowSumOutOfRange {
        column: usize,
        value: u16,
    },
}

impl Error for BlurError {}

impl std::fmt::Display for BlurError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BlurError::MinimumSliceSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum image slice size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            BlurError::MinimumStrideSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum stride must have size at least {} but it is {}",
                size.expected, size.received
            )),
            BlurError::ZeroBaseSize => f.write_str("Image size must not be zero"),
            BlurError::ImagesMustMatch => {
                f.write_str("Source and destination images must match in their dimensions")
            }
            BlurError::CapacityExceeded(size) => f.write_fmt(format_args!(
                "Image width {} exceeds running sum capacity {}",
                size.received, size.expected
            )),
            BlurError::UnknownBackend(name) => {
                f.write_fmt(format_args!("Unknown blur backend: {name}"))
            }
            BlurError::BackendUnavailable(backend) => f.write_fmt(format_args!(
                "Blur backend {backend} is not available on this target"
            )),
            BlurError::LaneAlignmentMismatch { lanes, width } => f.write_fmt(format_args!(
                "Width {width} must be a multiple of {lanes} lanes for this backend"
            )),
            BlurError::RowSumOutOfRange { column, value } => f.write_fmt(format_args!(
                "Row sum {value} at column {column} exceeds maximum of three 8-bit samples"
            )),
        }
    }
}

pub(crate) fn check_slice_size<T>(
    arr: &[T],
    stride: usize,
    width: usize,
    height: usize,
) -> Result<(), BlurError> {
    if width == 0 || height == 0 {
        return Err(BlurError::ZeroBaseSize);
    }
    if arr.len() < stride * (height - 1) + width {
        return Err(BlurError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: stride * height,
            received: arr.len(),
        }));
    }
    if stride < width {
        return Err(BlurError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: width,
            received: stride,
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_slice_size() {
        let data = vec![0u8; 64];
        assert_eq!(check_slice_size(&data, 8, 8, 8), Ok(()));
        assert_eq!(check_slice_size(&data, 8, 0, 8), Err(BlurError::ZeroBaseSize));
        assert_eq!(
            check_slice_size(&data, 8, 8, 9),
            Err(BlurError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: 72,
                received: 64,
            }))
        );
        assert_eq!(
            check_slice_size(&data, 4, 8, 2),
            Err(BlurError::MinimumStrideSizeMismatch(MismatchedSize {
                expected: 8,
                received: 4,
            }))
        );
    }

    #[test]
    fn test_display() {
        let error = BlurError::LaneAlignmentMismatch {
            lanes: 16,
            width: 37,
        };
        assert_eq!(
            error.to_string(),
            "Width 37 must be a multiple of 16 lanes for this backend"
        );
        let error = BlurError::CapacityExceeded(MismatchedSize {
            expected: 16384,
            received: 20000,
        });
        assert_eq!(
            error.to_string(),
            "Image width 20000 exceeds running sum capacity 16384"
        );
    }
}
