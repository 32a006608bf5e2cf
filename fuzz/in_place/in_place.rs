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

#![no_main]

use arbitrary::Arbitrary;
use runblur::{box_blur_3x3, box_blur_3x3_in_place, BlurBackend, BlurImage, BlurImageMut};
use libfuzzer_sys::fuzz_target;

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcImage {
    pub src_width: u16,
    pub src_height: u16,
    pub stride_padding: u8,
    pub border: u8,
    pub backend: u8,
    pub value: u8,
}

fuzz_target!(|data: SrcImage| {
    if data.src_width > 700 || data.src_height > 250 {
        return;
    }
    let width = data.src_width as usize;
    let height = data.src_height as usize;
    let stride = width + data.stride_padding as usize;
    let backend = BlurBackend::ALL[data.backend as usize % BlurBackend::ALL.len()];

    let src = (0..stride * height)
        .map(|i| (i as u8).wrapping_mul(data.value))
        .collect::<Vec<u8>>();
    let mut src_image = BlurImage::borrow(&src, width as u32, height as u32);
    src_image.stride = stride as u32;

    let mut dst = BlurImageMut::default();
    let out_of_place = box_blur_3x3(&src_image, &mut dst, data.border, backend);

    let mut in_place = src.clone();
    let mut image = BlurImageMut::borrow(&mut in_place, width as u32, height as u32);
    image.stride = stride as u32;
    let result = box_blur_3x3_in_place(&mut image, data.border, backend);

    // Both paths validate identically, failures must leave data untouched.
    assert_eq!(out_of_place, result);
    if result.is_err() {
        assert_eq!(in_place, src);
        return;
    }
    for (row, expected) in in_place
        .chunks(stride)
        .zip(dst.data.borrow().chunks(width))
    {
        assert_eq!(&row[..width], expected);
    }
    for (row, source) in in_place.chunks(stride).zip(src.chunks(stride)) {
        assert_eq!(&row[width..], &source[width..]);
    }
});
