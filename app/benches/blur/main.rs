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

use criterion::{criterion_group, criterion_main, Criterion};
use runblur::{available_backends, BlurEngine, BlurImage, BlurImageMut};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

pub fn criterion_benchmark(c: &mut Criterion) {
    let src_bytes = (0..WIDTH as usize * HEIGHT as usize)
        .map(|i| (i.wrapping_mul(2654435761) >> 9) as u8)
        .collect::<Vec<u8>>();
    let src_image = BlurImage::borrow(&src_bytes, WIDTH, HEIGHT);

    for backend in available_backends() {
        c.bench_function(&format!("runblur: 640x480 box blur 3x3, {backend}"), |b| {
            let mut engine = BlurEngine::new();
            let mut dst_bytes: Vec<u8> = src_bytes.to_vec();
            let mut dst_image = BlurImageMut::borrow(&mut dst_bytes, WIDTH, HEIGHT);

            b.iter(|| {
                engine
                    .blur(&src_image, &mut dst_image, 0, backend)
                    .unwrap();
            })
        });

        c.bench_function(
            &format!("runblur: 640x480 box blur 3x3 in place, {backend}"),
            |b| {
                let mut engine = BlurEngine::new();
                let mut bytes: Vec<u8> = src_bytes.to_vec();
                let mut image = BlurImageMut::borrow(&mut bytes, WIDTH, HEIGHT);

                b.iter(|| {
                    engine.blur_in_place(&mut image, 0, backend).unwrap();
                })
            },
        );
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
