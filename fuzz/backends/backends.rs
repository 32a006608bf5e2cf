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
use runblur::{available_backends, BlurBackend, BlurEngine, BlurImage, BlurImageMut};
use libfuzzer_sys::fuzz_target;

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcImage {
    pub chunks: u8,
    pub src_height: u8,
    pub border: u8,
    pub pixels: Vec<u8>,
}

fuzz_target!(|data: SrcImage| {
    // Widths are whole 32 lane chunks so every backend accepts them.
    let width = (data.chunks as usize % 8 + 1) * 32;
    let height = data.src_height as usize % 64 + 1;
    if data.pixels.is_empty() {
        return;
    }
    let src = data
        .pixels
        .iter()
        .copied()
        .cycle()
        .take(width * height)
        .collect::<Vec<u8>>();
    let src_image = BlurImage::borrow(&src, width as u32, height as u32);

    let mut engine = BlurEngine::with_capacity(width);
    let mut reference = BlurImageMut::default();
    engine
        .blur(&src_image, &mut reference, data.border, BlurBackend::Reference)
        .unwrap();

    for backend in available_backends() {
        let mut dst = BlurImageMut::alloc(width as u32, height as u32);
        engine
            .blur(&src_image, &mut dst, data.border, backend)
            .unwrap();
        assert_eq!(dst.data.borrow(), reference.data.borrow(), "{backend}");
    }
});
