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

use crate::util::check_slice_size;
use crate::BlurError;
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStore<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStore<'_, T> {
    #[allow(clippy::should_implement_trait)]
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub(crate) fn resize(&mut self, new_size: usize, value: T) {
        match self {
            Self::Borrowed(_) => {}
            Self::Owned(vec) => vec.resize(new_size, value),
        }
    }
}

/// Immutable grayscale plane
pub struct BlurImage<'a, T: Clone + Copy + Default + Debug> {
    pub data: std::borrow::Cow<'a, [T]>,
    pub width: u32,
    pub height: u32,
    /// Image stride, items per row, might be 0
    pub stride: u32,
}

/// Mutable grayscale plane
/// If it owns vector it does auto resizing on methods that working out-of-place.
pub struct BlurImageMut<'a, T: Clone + Copy + Default + Debug> {
    pub data: BufferStore<'a, T>,
    pub width: u32,
    pub height: u32,
    /// Image stride, items per row, might be 0
    pub stride: u32,
}

impl<T: Clone + Copy + Default + Debug> Default for BlurImageMut<'_, T> {
    fn default() -> Self {
        BlurImageMut {
            data: BufferStore::Owned(Vec::new()),
            width: 0,
            height: 0,
            stride: 0,
        }
    }
}

impl<'a, T: Clone + Copy + Default + Debug> BlurImage<'a, T> {
    /// Allocates tightly packed plane filled with default value
    pub fn alloc(width: u32, height: u32) -> Self {
        Self {
            data: std::borrow::Cow::Owned(vec![T::default(); width as usize * height as usize]),
            width,
            height,
            stride: width,
        }
    }

    /// Borrows existing data
    /// Stride will be default `width`
    pub fn borrow(arr: &'a [T], width: u32, height: u32) -> Self {
        Self {
            data: std::borrow::Cow::Borrowed(arr),
            width,
            height,
            stride: width,
        }
    }

    /// Returns row stride
    #[inline]
    pub fn row_stride(&self) -> u32 {
        if self.stride == 0 {
            self.width
        } else {
            self.stride
        }
    }

    #[inline]
    pub fn check_layout(&self) -> Result<(), BlurError> {
        check_slice_size(
            self.data.as_ref(),
            self.row_stride() as usize,
            self.width as usize,
            self.height as usize,
        )
    }
}

impl<'a, T: Clone + Copy + Default + Debug> BlurImageMut<'a, T> {
    /// Allocates tightly packed plane filled with default value
    pub fn alloc(width: u32, height: u32) -> Self {
        Self {
            data: BufferStore::Owned(vec![T::default(); width as usize * height as usize]),
            width,
            height,
            stride: width,
        }
    }

    /// Mutable borrows existing data
    /// Stride will be default `width`
    pub fn borrow(arr: &'a mut [T], width: u32, height: u32) -> Self {
        Self {
            data: BufferStore::Borrowed(arr),
            width,
            height,
            stride: width,
        }
    }

    /// Returns row stride
    #[inline]
    pub fn row_stride(&self) -> u32 {
        if self.stride == 0 {
            self.width
        } else {
            self.stride
        }
    }

    /// Checks if layout matches necessary requirements
    #[inline]
    pub fn layout_test(&self) -> Result<(), BlurError> {
        check_slice_size(
            self.data.borrow(),
            self.row_stride() as usize,
            self.width as usize,
            self.height as usize,
        )
    }

    /// Checks if layout matches necessary requirements.
    ///
    /// Owned storage is resized to `other` instead of being checked.
    #[inline]
    pub fn check_layout(&mut self, other: Option<&BlurImage<'_, T>>) -> Result<(), BlurError> {
        if let Some(other) = other {
            if matches!(self.data, BufferStore::Owned(_)) {
                self.resize(other.width, other.height);
                return Ok(());
            }
        }
        self.layout_test()
    }

    /// Checks if it is matches the size of the other image
    #[inline]
    pub fn size_matches(&self, other: &BlurImage<'_, T>) -> Result<(), BlurError> {
        if self.width == other.width && self.height == other.height {
            return Ok(());
        }
        Err(BlurError::ImagesMustMatch)
    }

    #[inline]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.height = height;
        self.width = width;
        self.stride = width;
        self.data.resize(
            self.row_stride() as usize * self.height as usize,
            T::default(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MismatchedSize;

    #[test]
    fn test_owned_destination_is_resized() {
        let src = BlurImage::<u8>::alloc(17, 5);
        let mut dst = BlurImageMut::<u8>::default();
        dst.check_layout(Some(&src)).unwrap();
        assert_eq!(dst.width, 17);
        assert_eq!(dst.height, 5);
        assert_eq!(dst.data.borrow().len(), 17 * 5);
    }

    #[test]
    fn test_borrowed_destination_is_checked() {
        let src = BlurImage::<u8>::alloc(8, 8);
        let mut storage = vec![0u8; 16];
        let mut dst = BlurImageMut::borrow(&mut storage, 8, 8);
        assert_eq!(
            dst.check_layout(Some(&src)),
            Err(BlurError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: 64,
                received: 16,
            }))
        );
    }
}
