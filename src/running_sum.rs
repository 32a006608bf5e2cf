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

use crate::util::MismatchedSize;
use crate::BlurError;

/// Default widest row an engine accepts.
pub const MAX_ROW_WIDTH: usize = 16 * 1024;

const SLOTS: usize = 3;

/// Three rows of horizontal 3-sums kept in a ring.
///
/// Slot `head` holds the row above the scanline being produced, `head + 1` the
/// row itself and `head + 2` the row below. [RunningSumBuffer::advance] moves
/// `head` by one so every row is summed once and read by three output rows.
#[derive(Debug, Clone)]
pub struct RunningSumBuffer {
    storage: Vec<u16>,
    capacity: usize,
    head: usize,
}

impl RunningSumBuffer {
    /// Allocates three rows of `capacity` sums.
    pub fn new(capacity: usize) -> RunningSumBuffer {
        RunningSumBuffer {
            storage: vec![0u16; capacity * SLOTS],
            capacity,
            head: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Checks a row of `width` sums fits into a slot.
    #[inline]
    pub fn check_width(&self, width: usize) -> Result<(), BlurError> {
        if width > self.capacity {
            return Err(BlurError::CapacityExceeded(MismatchedSize {
                expected: self.capacity,
                received: width,
            }));
        }
        Ok(())
    }

    /// Puts the ring back to its initial rotation, row contents are left as is.
    #[inline]
    pub fn rewind(&mut self) {
        self.head = 0;
    }

    /// Rotates the ring one scanline down.
    #[inline]
    pub fn advance(&mut self) {
        self.head = (self.head + 1) % SLOTS;
    }

    #[inline]
    fn slot_range(&self, logical: usize, width: usize) -> std::ops::Range<usize> {
        let start = ((self.head + logical) % SLOTS) * self.capacity;
        start..start + width
    }

    pub fn above_mut(&mut self, width: usize) -> &mut [u16] {
        let range = self.slot_range(0, width);
        &mut self.storage[range]
    }

    pub fn current_mut(&mut self, width: usize) -> &mut [u16] {
        let range = self.slot_range(1, width);
        &mut self.storage[range]
    }

    pub fn below_mut(&mut self, width: usize) -> &mut [u16] {
        let range = self.slot_range(2, width);
        &mut self.storage[range]
    }

    /// Fills the row above with a constant, used for the virtual border row.
    pub fn fill_above(&mut self, width: usize, value: u16) {
        self.above_mut(width).fill(value);
    }

    /// Fills the row below with a constant, used for the virtual border row.
    pub fn fill_below(&mut self, width: usize, value: u16) {
        self.below_mut(width).fill(value);
    }

    /// Rows above, current and below, in that order.
    pub fn rows(&self, width: usize) -> [&[u16]; 3] {
        [
            &self.storage[self.slot_range(0, width)],
            &self.storage[self.slot_range(1, width)],
            &self.storage[self.slot_range(2, width)],
        ]
    }
}

impl Default for RunningSumBuffer {
    fn default() -> Self {
        RunningSumBuffer::new(MAX_ROW_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_reuses_rows() {
        let mut buffer = RunningSumBuffer::new(4);
        buffer.fill_above(4, 1);
        buffer.current_mut(4).fill(2);
        buffer.fill_below(4, 3);
        assert_eq!(buffer.rows(4), [&[1u16; 4][..], &[2; 4], &[3; 4]]);

        buffer.advance();
        let [above, current, _] = buffer.rows(4);
        assert_eq!(above, &[2; 4]);
        assert_eq!(current, &[3; 4]);

        buffer.fill_below(4, 4);
        assert_eq!(buffer.rows(4), [&[2u16; 4][..], &[3; 4], &[4; 4]]);

        buffer.advance();
        buffer.advance();
        buffer.rewind();
        buffer.fill_above(2, 9);
        assert_eq!(buffer.rows(2)[0], &[9, 9]);
    }

    #[test]
    fn test_capacity_check() {
        let buffer = RunningSumBuffer::new(640);
        assert_eq!(buffer.check_width(640), Ok(()));
        assert_eq!(
            buffer.check_width(641),
            Err(BlurError::CapacityExceeded(MismatchedSize {
                expected: 640,
                received: 641,
            }))
        );
        assert_eq!(RunningSumBuffer::default().capacity(), MAX_ROW_WIDTH);
    }
}
