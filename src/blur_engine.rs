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

use crate::backend::BackendPair;
use crate::divide_table::DivideLookupTable;
use crate::running_sum::{RunningSumBuffer, MAX_ROW_WIDTH};
use crate::{BlurBackend, BlurError, BlurImage, BlurImageMut};

/// Source and destination rows of one blur.
enum Planes<'a> {
    Split {
        src: &'a [u8],
        src_stride: usize,
        dst: &'a mut [u8],
        dst_stride: usize,
    },
    InPlace {
        data: &'a mut [u8],
        stride: usize,
    },
}

impl Planes<'_> {
    #[inline]
    fn source_row(&self, y: usize, width: usize) -> &[u8] {
        match self {
            Planes::Split {
                src, src_stride, ..
            } => &src[y * src_stride..y * src_stride + width],
            Planes::InPlace { data, stride } => &data[y * stride..y * stride + width],
        }
    }

    #[inline]
    fn target_row(&mut self, y: usize, width: usize) -> &mut [u8] {
        match self {
            Planes::Split {
                dst, dst_stride, ..
            } => &mut dst[y * *dst_stride..y * *dst_stride + width],
            Planes::InPlace { data, stride } => &mut data[y * *stride..y * *stride + width],
        }
    }
}

/// Owns the running sums and the divide table used by 3x3 blurs.
///
/// An engine may be reused for any number of images up to its capacity;
/// its buffers are overwritten by each call. Use one engine per thread.
#[derive(Debug, Clone)]
pub struct BlurEngine {
    sums: RunningSumBuffer,
    divide_table: DivideLookupTable,
}

impl BlurEngine {
    /// Engine accepting rows up to [MAX_ROW_WIDTH] pixels.
    pub fn new() -> BlurEngine {
        BlurEngine::with_capacity(MAX_ROW_WIDTH)
    }

    /// Engine accepting rows up to `max_width` pixels.
    pub fn with_capacity(max_width: usize) -> BlurEngine {
        BlurEngine {
            sums: RunningSumBuffer::new(max_width),
            divide_table: DivideLookupTable::new(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.sums.capacity()
    }

    /// Resolves `backend` and checks a `width` wide row is accepted by it and by this engine.
    pub fn prepare(&self, width: usize, backend: BlurBackend) -> Result<BackendPair, BlurError> {
        let pair = backend.resolve()?;
        pair.check_width(width)?;
        self.sums.check_width(width)?;
        Ok(pair)
    }

    /// Blurs `src` into `dst` with a 3x3 box, pixels outside of the image are `border_color`.
    ///
    /// Owned empty `dst` is resized to the source. Nothing is written to `dst`
    /// unless all arguments are valid.
    pub fn blur(
        &mut self,
        src: &BlurImage<u8>,
        dst: &mut BlurImageMut<u8>,
        border_color: u8,
        backend: BlurBackend,
    ) -> Result<(), BlurError> {
        src.check_layout()?;
        let width = src.width as usize;
        let height = src.height as usize;
        let pair = self.prepare(width, backend)?;
        dst.check_layout(Some(src))?;
        dst.size_matches(src)?;
        let src_stride = src.row_stride() as usize;
        let dst_stride = dst.row_stride() as usize;
        let mut planes = Planes::Split {
            src: src.data.as_ref(),
            src_stride,
            dst: dst.data.borrow_mut(),
            dst_stride,
        };
        self.blur_rows(&pair, &mut planes, width, height, border_color);
        Ok(())
    }

    /// Blurs `image` with a 3x3 box in place, see [BlurEngine::blur].
    pub fn blur_in_place(
        &mut self,
        image: &mut BlurImageMut<u8>,
        border_color: u8,
        backend: BlurBackend,
    ) -> Result<(), BlurError> {
        image.layout_test()?;
        let width = image.width as usize;
        let height = image.height as usize;
        let pair = self.prepare(width, backend)?;
        let stride = image.row_stride() as usize;
        let mut planes = Planes::InPlace {
            data: image.data.borrow_mut(),
            stride,
        };
        self.blur_rows(&pair, &mut planes, width, height, border_color);
        Ok(())
    }

    /// Row `y` is written after row `y + 1` was summed, so in place works.
    fn blur_rows(
        &mut self,
        pair: &BackendPair,
        planes: &mut Planes,
        width: usize,
        height: usize,
        border_color: u8,
    ) {
        let border_row = border_color as u16 * 3;
        let sums = &mut self.sums;
        let table = &self.divide_table;

        sums.rewind();
        sums.fill_above(width, border_row);
        pair.row_sums_unchecked(planes.source_row(0, width), border_color, sums.current_mut(width));

        for y in 0..height - 1 {
            pair.row_sums_unchecked(
                planes.source_row(y + 1, width),
                border_color,
                sums.below_mut(width),
            );
            pair.average_row_unchecked(sums.rows(width), table, planes.target_row(y, width));
            sums.advance();
        }

        sums.fill_below(width, border_row);
        pair.average_row_unchecked(
            sums.rows(width),
            table,
            planes.target_row(height - 1, width),
        );
    }
}

impl Default for BlurEngine {
    fn default() -> Self {
        BlurEngine::new()
    }
}

/// Blurs `src` into `dst` with a 3x3 box filter.
///
/// Every output pixel is the rounded mean of its 3x3 neighbourhood, positions
/// outside of the image read as `border_color`.
///
/// # Arguments
///
/// * `src`: Source grayscale image.
/// * `dst`: Destination, must match source size. Owned empty destination is resized.
/// * `border_color`: Value of the virtual ring of pixels around the image.
/// * `backend`: Row kernels to use, see [BlurBackend].
///
pub fn box_blur_3x3(
    src: &BlurImage<u8>,
    dst: &mut BlurImageMut<u8>,
    border_color: u8,
    backend: BlurBackend,
) -> Result<(), BlurError> {
    BlurEngine::new().blur(src, dst, border_color, backend)
}

/// Blurs `image` with a 3x3 box filter in place.
///
/// # Arguments
///
/// * `image`: Grayscale image, overwritten with the result.
/// * `border_color`: Value of the virtual ring of pixels around the image.
/// * `backend`: Row kernels to use, see [BlurBackend].
///
pub fn box_blur_3x3_in_place(
    image: &mut BlurImageMut<u8>,
    border_color: u8,
    backend: BlurBackend,
) -> Result<(), BlurError> {
    BlurEngine::new().blur_in_place(image, border_color, backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::MismatchedSize;

    fn brute_force(src: &[u8], width: usize, height: usize, border: u8) -> Vec<u8> {
        let at = |x: isize, y: isize| {
            if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
                border as u32
            } else {
                src[y as usize * width + x as usize] as u32
            }
        };
        let mut dst = vec![0u8; width * height];
        for y in 0..height as isize {
            for x in 0..width as isize {
                let mut sum = 0u32;
                for dy in -1..=1 {
                    for dx in -1..=1 {
                        sum += at(x + dx, y + dy);
                    }
                }
                dst[y as usize * width + x as usize] = ((sum as f64) / 9.).round() as u8;
            }
        }
        dst
    }

    fn pattern(width: usize, height: usize) -> Vec<u8> {
        (0..width * height)
            .map(|i| (i.wrapping_mul(2654435761) >> 7) as u8)
            .collect()
    }

    #[test]
    fn test_single_pixel_is_mostly_border() {
        for (v, b) in [(0u8, 0u8), (255, 0), (0, 255), (100, 37), (255, 255)] {
            let src = [v];
            let mut dst = BlurImageMut::default();
            box_blur_3x3(
                &BlurImage::borrow(&src, 1, 1),
                &mut dst,
                b,
                BlurBackend::Reference,
            )
            .unwrap();
            let expected = ((8. * b as f64 + v as f64) / 9.).round() as u8;
            assert_eq!(dst.data.borrow(), &[expected]);
        }
    }

    #[test]
    fn test_centre_impulse() {
        let mut src = [0u8; 9];
        src[4] = 9;
        let mut dst = BlurImageMut::default();
        box_blur_3x3(
            &BlurImage::borrow(&src, 3, 3),
            &mut dst,
            0,
            BlurBackend::Reference,
        )
        .unwrap();
        assert_eq!(dst.data.borrow(), &[1u8; 9]);
        assert_eq!(dst.data.borrow(), brute_force(&src, 3, 3, 0).as_slice());
    }

    #[test]
    fn test_uniform_image_with_matching_border() {
        for value in [0u8, 1, 128, 254, 255] {
            let mut data = vec![value; 32 * 5];
            let mut image = BlurImageMut::borrow(&mut data, 32, 5);
            box_blur_3x3_in_place(&mut image, value, BlurBackend::Lanes16).unwrap();
            assert!(data.iter().all(|&x| x == value));
        }
    }

    #[test]
    fn test_matches_brute_force() {
        for (width, height) in [(1usize, 1usize), (1, 7), (7, 1), (2, 2), (37, 13), (64, 3)] {
            let src = pattern(width, height);
            for border in [0u8, 90, 255] {
                let expected = brute_force(&src, width, height, border);
                let mut dst = BlurImageMut::default();
                box_blur_3x3(
                    &BlurImage::borrow(&src, width as u32, height as u32),
                    &mut dst,
                    border,
                    BlurBackend::Reference,
                )
                .unwrap();
                assert_eq!(
                    dst.data.borrow(),
                    expected.as_slice(),
                    "{width}x{height} border {border}"
                );
            }
        }
    }

    #[test]
    fn test_in_place_matches_out_of_place() {
        let (width, height) = (48usize, 17usize);
        let src = pattern(width, height);
        for backend in [BlurBackend::Reference, BlurBackend::Lanes8, BlurBackend::Lanes16] {
            let mut dst = BlurImageMut::default();
            box_blur_3x3(
                &BlurImage::borrow(&src, width as u32, height as u32),
                &mut dst,
                3,
                backend,
            )
            .unwrap();

            let mut data = src.clone();
            let mut image = BlurImageMut::borrow(&mut data, width as u32, height as u32);
            box_blur_3x3_in_place(&mut image, 3, backend).unwrap();
            assert_eq!(dst.data.borrow(), data.as_slice(), "{backend}");
        }
    }

    #[test]
    fn test_engine_reuse_overwrites_state() {
        let mut engine = BlurEngine::with_capacity(64);
        let first = pattern(64, 9);
        let second = pattern(16, 4);
        let mut dst = BlurImageMut::default();
        engine
            .blur(&BlurImage::borrow(&first, 64, 9), &mut dst, 200, BlurBackend::Lanes8)
            .unwrap();

        let mut dst = BlurImageMut::default();
        engine
            .blur(&BlurImage::borrow(&second, 16, 4), &mut dst, 0, BlurBackend::Lanes8)
            .unwrap();
        assert_eq!(dst.data.borrow(), brute_force(&second, 16, 4, 0).as_slice());
    }

    #[test]
    fn test_strided_planes() {
        let (width, height, stride) = (16usize, 4usize, 20usize);
        let packed = pattern(width, height);
        let mut padded = vec![0xEEu8; stride * height];
        for (row, src) in padded.chunks_mut(stride).zip(packed.chunks(width)) {
            row[..width].copy_from_slice(src);
        }
        let mut src = BlurImage::borrow(&padded, width as u32, height as u32);
        src.stride = stride as u32;

        let mut out = vec![0x11u8; stride * height];
        let mut dst = BlurImageMut::borrow(&mut out, width as u32, height as u32);
        dst.stride = stride as u32;
        box_blur_3x3(&src, &mut dst, 9, BlurBackend::Lanes16).unwrap();

        let expected = brute_force(&packed, width, height, 9);
        for (row, expected) in out.chunks(stride).zip(expected.chunks(width)) {
            assert_eq!(&row[..width], expected);
            assert!(row[width..].iter().all(|&x| x == 0x11));
        }
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut engine = BlurEngine::with_capacity(8);
        let mut data = vec![7u8; 16];
        let mut image = BlurImageMut::borrow(&mut data, 16, 1);
        assert_eq!(
            engine.blur_in_place(&mut image, 0, BlurBackend::Reference),
            Err(BlurError::CapacityExceeded(MismatchedSize {
                expected: 8,
                received: 16,
            }))
        );
        assert!(data.iter().all(|&x| x == 7));
    }

    #[test]
    fn test_misaligned_width_is_rejected_untouched() {
        let src = pattern(37, 2);
        let mut out = vec![5u8; 37 * 2];
        let mut dst = BlurImageMut::borrow(&mut out, 37, 2);
        assert_eq!(
            box_blur_3x3(&BlurImage::borrow(&src, 37, 2), &mut dst, 0, BlurBackend::Lanes8),
            Err(BlurError::LaneAlignmentMismatch {
                lanes: 8,
                width: 37,
            })
        );
        assert!(out.iter().all(|&x| x == 5));
    }

    #[test]
    fn test_owned_destination_untouched_on_error() {
        let src = pattern(37, 2);
        let mut dst = BlurImageMut::default();
        assert_eq!(
            box_blur_3x3(&BlurImage::borrow(&src, 37, 2), &mut dst, 0, BlurBackend::Lanes8),
            Err(BlurError::LaneAlignmentMismatch {
                lanes: 8,
                width: 37,
            })
        );
        let mut engine = BlurEngine::with_capacity(16);
        let wide = pattern(32, 2);
        assert!(matches!(
            engine.blur(&BlurImage::borrow(&wide, 32, 2), &mut dst, 0, BlurBackend::Reference),
            Err(BlurError::CapacityExceeded(_))
        ));
        assert_eq!((dst.width, dst.height, dst.stride), (0, 0, 0));
        assert!(dst.data.borrow().is_empty());
    }

    #[test]
    fn test_size_mismatch() {
        let src = pattern(16, 2);
        let mut out = vec![0u8; 16 * 3];
        let mut dst = BlurImageMut::borrow(&mut out, 16, 3);
        assert_eq!(
            box_blur_3x3(&BlurImage::borrow(&src, 16, 2), &mut dst, 0, BlurBackend::Reference),
            Err(BlurError::ImagesMustMatch)
        );
        let mut empty = BlurImageMut::<u8>::default();
        assert_eq!(
            box_blur_3x3_in_place(&mut empty, 0, BlurBackend::Reference),
            Err(BlurError::ZeroBaseSize)
        );
    }
}
