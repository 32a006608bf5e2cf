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

use crate::blur_engine::BlurEngine;
use crate::running_sum::MAX_ROW_WIDTH;
use crate::{BlurBackend, BlurError, BlurImageMut, ThreadingPolicy};
use rayon::prelude::*;

/// Blurs every image of the batch in place with a 3x3 box filter.
///
/// Images are independent and may differ in size. All of them are validated
/// before any is modified, output equals calling
/// [crate::box_blur_3x3_in_place] on each image.
///
/// # Arguments
///
/// * `images`: Grayscale images, overwritten with the result.
/// * `border_color`: Value of the virtual ring of pixels around each image.
/// * `backend`: Row kernels to use, see [BlurBackend].
/// * `threading_policy`: Threading policy according to *ThreadingPolicy*.
///
pub fn box_blur_3x3_batch(
    images: &mut [BlurImageMut<u8>],
    border_color: u8,
    backend: BlurBackend,
    threading_policy: ThreadingPolicy,
) -> Result<(), BlurError> {
    backend.resolve()?;
    let engine = BlurEngine::new();
    let mut pixels = 0usize;
    for image in images.iter() {
        image.layout_test()?;
        engine.prepare(image.width as usize, backend)?;
        pixels += image.width as usize * image.height as usize;
    }

    let thread_count = threading_policy.thread_count(images.len(), pixels);
    let pool = if thread_count == 1 {
        None
    } else {
        rayon::ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .build()
            .ok()
    };

    if let Some(pool) = &pool {
        pool.install(|| {
            images.par_iter_mut().try_for_each_init(
                || BlurEngine::with_capacity(MAX_ROW_WIDTH),
                |engine, image| engine.blur_in_place(image, border_color, backend),
            )
        })
    } else {
        let mut engine = engine;
        images
            .iter_mut()
            .try_for_each(|image| engine.blur_in_place(image, border_color, backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::box_blur_3x3_in_place;
    use std::num::NonZeroUsize;

    fn make_batch(sizes: &[(u32, u32)]) -> Vec<Vec<u8>> {
        sizes
            .iter()
            .enumerate()
            .map(|(n, &(w, h))| {
                (0..w as usize * h as usize)
                    .map(|i| (i * 31 + n * 7) as u8)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_batch_matches_single_calls() {
        let sizes = [(32u32, 4u32), (16, 1), (64, 9), (48, 2)];
        let mut expected = make_batch(&sizes);
        for (data, &(w, h)) in expected.iter_mut().zip(sizes.iter()) {
            let mut image = BlurImageMut::borrow(data, w, h);
            box_blur_3x3_in_place(&mut image, 17, BlurBackend::Lanes16).unwrap();
        }

        for policy in [
            ThreadingPolicy::Single,
            ThreadingPolicy::Adaptive,
            ThreadingPolicy::Fixed(NonZeroUsize::new(3).unwrap()),
        ] {
            let mut storage = make_batch(&sizes);
            let mut images = storage
                .iter_mut()
                .zip(sizes.iter())
                .map(|(data, &(w, h))| BlurImageMut::borrow(data, w, h))
                .collect::<Vec<_>>();
            box_blur_3x3_batch(&mut images, 17, BlurBackend::Lanes16, policy).unwrap();
            drop(images);
            assert_eq!(storage, expected, "{policy:?}");
        }
    }

    #[test]
    fn test_batch_is_validated_up_front() {
        let sizes = [(32u32, 4u32), (20, 4)];
        let mut storage = make_batch(&sizes);
        let original = storage.clone();
        let mut images = storage
            .iter_mut()
            .zip(sizes.iter())
            .map(|(data, &(w, h))| BlurImageMut::borrow(data, w, h))
            .collect::<Vec<_>>();
        assert_eq!(
            box_blur_3x3_batch(
                &mut images,
                0,
                BlurBackend::Lanes16,
                ThreadingPolicy::Single
            ),
            Err(BlurError::LaneAlignmentMismatch {
                lanes: 16,
                width: 20,
            })
        );
        drop(images);
        assert_eq!(storage, original);
    }

    #[test]
    fn test_empty_batch() {
        let mut images: Vec<BlurImageMut<u8>> = Vec::new();
        assert_eq!(
            box_blur_3x3_batch(
                &mut images,
                0,
                BlurBackend::Reference,
                ThreadingPolicy::Adaptive
            ),
            Ok(())
        );
    }
}
