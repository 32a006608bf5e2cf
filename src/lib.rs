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

#![allow(clippy::too_many_arguments)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! 3x3 box blur of 8-bit grayscale images built on running row sums.
//!
//! Every output pixel is the rounded mean of its 3x3 neighbourhood, pixels
//! outside of the image take a caller supplied border color. Horizontal sums
//! of each row are computed once and kept in a ring of three rows, so one
//! output row costs one row of sums and one row of averages.
//!
//! Row kernels are selected explicitly with [BlurBackend]; every backend
//! yields bit identical output.

#[cfg(all(target_arch = "x86_64", feature = "avx"))]
mod avx;
mod backend;
mod batch;
mod blur_engine;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
mod box_blur_image;
mod divide_table;
mod image;
#[cfg(all(target_arch = "aarch64", feature = "neon"))]
mod neon;
mod row_average;
mod row_sums;
mod running_sum;
#[cfg(all(
    any(target_arch = "x86_64", target_arch = "x86"),
    target_feature = "sse2",
    feature = "sse"
))]
mod sse;
mod threading_policy;
mod util;

pub use backend::{available_backends, resolve_backend, BackendPair, BlurBackend};
pub use batch::box_blur_3x3_batch;
pub use blur_engine::{box_blur_3x3, box_blur_3x3_in_place, BlurEngine};
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
pub use box_blur_image::{box_blur_3x3_gray_image_mut, box_blur_3x3_image};
pub use divide_table::{
    DivideLookupTable, DIVIDE_TABLE_SIZE, MAX_NEIGHBOURHOOD_SUM, MAX_ROW_SUM,
};
pub use image::{BlurImage, BlurImageMut, BufferStore};
pub use running_sum::{RunningSumBuffer, MAX_ROW_WIDTH};
pub use threading_policy::ThreadingPolicy;
pub use util::{BlurError, MismatchedSize};
