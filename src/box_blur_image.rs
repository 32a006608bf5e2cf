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

use crate::{box_blur_3x3_in_place, BlurBackend, BlurError, BlurImageMut, MismatchedSize};
use image::GrayImage;

/// Performs 3x3 box blur on a gray image
///
/// # Arguments
///
/// * `image`: Gray image provided by image crate
/// * `border_color`: Value of the virtual ring of pixels around the image
/// * `backend`: Row kernels to use, see [BlurBackend]
///
pub fn box_blur_3x3_image(
    image: &GrayImage,
    border_color: u8,
    backend: BlurBackend,
) -> Result<GrayImage, BlurError> {
    let mut new_image = image.as_raw().to_vec();
    let mut blur_image = BlurImageMut::borrow(&mut new_image, image.width(), image.height());
    box_blur_3x3_in_place(&mut blur_image, border_color, backend)?;
    let received = new_image.len();
    GrayImage::from_raw(image.width(), image.height(), new_image).ok_or(
        BlurError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: image.width() as usize * image.height() as usize,
            received,
        }),
    )
}

/// Performs 3x3 box blur on a gray image in place
///
/// # Arguments
///
/// * `image`: Gray image provided by image crate, overwritten with the result
/// * `border_color`: Value of the virtual ring of pixels around the image
/// * `backend`: Row kernels to use, see [BlurBackend]
///
pub fn box_blur_3x3_gray_image_mut(
    image: &mut GrayImage,
    border_color: u8,
    backend: BlurBackend,
) -> Result<(), BlurError> {
    let (width, height) = image.dimensions();
    let mut blur_image = BlurImageMut::borrow(&mut **image, width, height);
    box_blur_3x3_in_place(&mut blur_image, border_color, backend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn test_gray_image_adapters_agree() {
        let image = GrayImage::from_fn(32, 6, |x, y| Luma([(x * 7 + y * 13) as u8]));
        let blurred = box_blur_3x3_image(&image, 40, BlurBackend::Lanes16).unwrap();

        let mut in_place = image.clone();
        box_blur_3x3_gray_image_mut(&mut in_place, 40, BlurBackend::Reference).unwrap();
        assert_eq!(blurred, in_place);
        assert_ne!(blurred, image);
    }

    #[test]
    fn test_gray_image_errors_are_reported() {
        let image = GrayImage::new(20, 3);
        assert_eq!(
            box_blur_3x3_image(&image, 0, BlurBackend::Lanes8),
            Err(BlurError::LaneAlignmentMismatch {
                lanes: 8,
                width: 20,
            })
        );
    }
}
