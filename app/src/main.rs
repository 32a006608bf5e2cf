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

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use runblur::{
    available_backends, box_blur_3x3_gray_image_mut, BlurBackend, BlurEngine, BlurError,
    BlurImageMut,
};

const TEST_WIDTH: u32 = 640;
const TEST_HEIGHT: u32 = 480;
const DEFAULT_REPEAT_COUNT: usize = 100;

/// 3x3 box blur of 8-bit grayscale images
#[derive(Parser, Debug)]
#[command(name = "runblur-app")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blur a 640x480 image in place `count` times with the given backend
    Test {
        /// reference, vector-8, vector-16, sse2, avx2 or neon
        backend: BlurBackend,
        /// Repeat count, 0 selects the default
        #[arg(long, short, default_value_t = DEFAULT_REPEAT_COUNT)]
        count: usize,
    },
    /// Blur an image file as 8-bit gray
    Blur {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
        #[arg(long, short, default_value = "reference")]
        backend: BlurBackend,
        /// Value of the pixels around the image
        #[arg(long, default_value_t = 0)]
        border: u8,
        /// Number of times the blur is applied
        #[arg(long, short, default_value_t = 1)]
        passes: usize,
    },
    /// List backends usable on this machine
    Backends,
}

fn per_image(elapsed: Duration, count: usize) -> Duration {
    elapsed.div_f64(count.max(1) as f64)
}

fn run_test(backend: BlurBackend, count: usize) -> Result<(), BlurError> {
    let count = if count == 0 {
        DEFAULT_REPEAT_COUNT
    } else {
        count
    };
    let mut data = vec![0u8; TEST_WIDTH as usize * TEST_HEIGHT as usize];
    let mut image = BlurImageMut::borrow(&mut data, TEST_WIDTH, TEST_HEIGHT);
    let mut engine = BlurEngine::new();
    // Surfaces width and availability errors before the timed loop.
    engine.prepare(TEST_WIDTH as usize, backend)?;

    println!("backend: {backend}");
    println!("repeat count: {count}");
    let start = Instant::now();
    for _ in 0..count {
        engine.blur_in_place(&mut image, 0, backend)?;
    }
    let elapsed = start.elapsed();
    println!(
        "elapsed: {:?}, {:?} per image",
        elapsed,
        per_image(elapsed, count)
    );
    Ok(())
}

fn run_blur(
    input: &Path,
    output: &Path,
    backend: BlurBackend,
    border: u8,
    passes: usize,
) -> Result<(), Box<dyn Error>> {
    let mut image = image::open(input)?.to_luma8();
    println!("dimensions {:?}", image.dimensions());

    let start = Instant::now();
    for _ in 0..passes {
        box_blur_3x3_gray_image_mut(&mut image, border, backend)?;
    }
    println!("{backend}: {passes} passes in {:?}", start.elapsed());

    image.save(output)?;
    Ok(())
}

fn list_backends() {
    let available = available_backends();
    for backend in BlurBackend::ALL {
        let status = if available.contains(&backend) {
            "available"
        } else {
            "unavailable"
        };
        println!("{:<10} {:>2} lanes  {status}", backend.name(), backend.lanes());
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result: Result<(), Box<dyn Error>> = match cli.command {
        Command::Test { backend, count } => run_test(backend, count).map_err(Into::into),
        Command::Blur {
            input,
            output,
            backend,
            border,
            passes,
        } => run_blur(&input, &output, backend, border, passes),
        Command::Backends => {
            list_backends();
            Ok(())
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_image_handles_any_count() {
        let elapsed = Duration::from_millis(100);
        let quarter = per_image(elapsed, 4).as_nanos() as i128;
        assert!((quarter - 25_000_000).abs() <= 1);
        assert!((per_image(elapsed, 0).as_nanos() as i128 - 100_000_000).abs() <= 1);
        let huge = per_image(elapsed, u32::MAX as usize + 1);
        assert!(huge < Duration::from_micros(1));
    }
}
