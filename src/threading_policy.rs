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

use std::{num::NonZeroUsize, thread::available_parallelism};

/// Pixels worth of blurring that justify one more worker.
const PIXELS_PER_WORKER: usize = 640 * 480;

#[repr(C)]
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
/// Set threading policy for batch blurring.
pub enum ThreadingPolicy {
    /// Use only one thread, current is preferred.
    Single,
    /// Compute adaptive thread count between 1..available CPUs.
    #[default]
    Adaptive,
    /// Like `Adaptive`, but reserve given amount of threads (i.e. those will not be
    /// used).
    AdaptiveReserve(NonZeroUsize),
    /// Use specified number of threads.
    Fixed(NonZeroUsize),
}

impl ThreadingPolicy {
    /// Returns the number of workers for `jobs` images holding `pixels` pixels in total.
    ///
    /// Never more workers than images, always at least 1.
    pub fn thread_count(&self, jobs: usize, pixels: usize) -> usize {
        let jobs = jobs.max(1);
        let adaptive = (pixels / PIXELS_PER_WORKER).max(1);
        match self {
            ThreadingPolicy::Single => 1,
            ThreadingPolicy::Adaptive => adaptive.min(jobs).min(Self::available_parallelism(2)),
            ThreadingPolicy::AdaptiveReserve(reserve) => {
                let max_threads = Self::available_parallelism(1);
                let max_threads = max_threads.saturating_sub(reserve.get()).max(1);
                adaptive.min(jobs).min(max_threads)
            }
            ThreadingPolicy::Fixed(fixed) => fixed.get().min(jobs),
        }
    }

    // Make always return at least some minimal amount of threads, if multi-threading were requested
    fn available_parallelism(min: usize) -> usize {
        available_parallelism()
            .map(|x| x.get())
            .unwrap_or(1)
            .max(min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_count_bounds() {
        let four = NonZeroUsize::new(4).unwrap();
        assert_eq!(ThreadingPolicy::Single.thread_count(100, usize::MAX), 1);
        assert_eq!(ThreadingPolicy::Fixed(four).thread_count(100, 0), 4);
        assert_eq!(ThreadingPolicy::Fixed(four).thread_count(2, 0), 2);
        assert_eq!(ThreadingPolicy::Adaptive.thread_count(0, 0), 1);
        assert_eq!(ThreadingPolicy::Adaptive.thread_count(1, 640 * 480 * 64), 1);
        let reserve = NonZeroUsize::new(usize::MAX).unwrap();
        assert_eq!(
            ThreadingPolicy::AdaptiveReserve(reserve).thread_count(8, 640 * 480 * 8),
            1
        );
        let adaptive = ThreadingPolicy::Adaptive.thread_count(8, 640 * 480 * 8);
        assert!((1..=8).contains(&adaptive));
    }
}
