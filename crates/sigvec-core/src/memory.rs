//! Aligned, zero-initialised sample buffers
//!
//! `AlignedBuffer<T>` owns a heap block aligned to a caller-chosen power of
//! two. Buffers are created zeroed, so they are restricted to plain sample
//! types (`Zeroable + Copy`). Zero-length buffers never touch the allocator.

use crate::error::{Error, Result};
use bytemuck::Zeroable;
use std::alloc::{alloc_zeroed, dealloc, realloc, Layout};
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

/// Alignment the system allocator guarantees for every block
pub const SYSTEM_ALIGNMENT: usize = 2 * mem::size_of::<usize>();

/// Heap buffer with a guaranteed alignment
pub struct AlignedBuffer<T> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
    _marker: PhantomData<T>,
}

fn layout_for<T>(len: usize, alignment: usize) -> Result<Layout> {
    if !alignment.is_power_of_two() {
        return Err(Error::InvalidAlignment(alignment));
    }
    let alignment = alignment.max(mem::align_of::<T>());
    let size = len
        .checked_mul(mem::size_of::<T>())
        .ok_or(Error::Allocation {
            size: usize::MAX,
            alignment,
        })?;
    Layout::from_size_align(size, alignment).map_err(|_| Error::Allocation { size, alignment })
}

impl<T: Zeroable + Copy> AlignedBuffer<T> {
    /// Allocate `len` zeroed elements aligned to at least `alignment` bytes
    ///
    /// The effective alignment is raised to `align_of::<T>()` when smaller.
    pub fn try_new(len: usize, alignment: usize) -> Result<Self> {
        let layout = layout_for::<T>(len, alignment)?;
        let ptr = Self::allocate_zeroed(layout)?;
        Ok(Self {
            ptr,
            len,
            layout,
            _marker: PhantomData,
        })
    }

    fn allocate_zeroed(layout: Layout) -> Result<NonNull<T>> {
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }
        // Safety: layout has a non-zero size
        let raw = unsafe { alloc_zeroed(layout) } as *mut T;
        match NonNull::new(raw) {
            Some(ptr) => {
                tracing::debug!(
                    size = layout.size(),
                    alignment = layout.align(),
                    "allocated aligned buffer"
                );
                Ok(ptr)
            }
            None => {
                tracing::warn!(
                    size = layout.size(),
                    alignment = layout.align(),
                    "aligned allocation failed"
                );
                Err(Error::Allocation {
                    size: layout.size(),
                    alignment: layout.align(),
                })
            }
        }
    }

    /// Resize to `new_len` elements, keeping the first `min(len, new_len)`
    ///
    /// Elements past the old length are zeroed. Over-aligned buffers always
    /// move to a fresh block; others may be resized in place by the system
    /// allocator. On failure the original buffer is released.
    pub fn reallocate(self, new_len: usize) -> Result<Self> {
        if new_len == self.len {
            return Ok(self);
        }
        let new_layout = layout_for::<T>(new_len, self.layout.align())?;
        let old_size = self.layout.size();
        let new_size = new_layout.size();

        if self.layout.align() <= SYSTEM_ALIGNMENT && old_size != 0 && new_size != 0 {
            // Safety: ptr was allocated with self.layout and new_size is non-zero
            // and fits the same alignment
            let raw = unsafe { realloc(self.ptr.as_ptr() as *mut u8, self.layout, new_size) };
            let Some(block) = NonNull::new(raw) else {
                tracing::warn!(size = new_size, "buffer reallocation failed");
                return Err(Error::Allocation {
                    size: new_size,
                    alignment: new_layout.align(),
                });
            };
            if new_size > old_size {
                // Safety: the block holds new_size bytes
                unsafe { ptr::write_bytes(block.as_ptr().add(old_size), 0, new_size - old_size) };
            }
            // The old block now belongs to `block`
            mem::forget(self);
            return Ok(Self {
                ptr: block.cast(),
                len: new_len,
                layout: new_layout,
                _marker: PhantomData,
            });
        }

        let mut fresh = Self::try_new(new_len, new_layout.align())?;
        let keep = self.len.min(new_len);
        fresh[..keep].copy_from_slice(&self[..keep]);
        Ok(fresh)
    }
}

impl<T> AlignedBuffer<T> {
    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Alignment of the block in bytes
    #[inline]
    pub fn alignment(&self) -> usize {
        self.layout.align()
    }

    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Get the elements as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: ptr is valid (or dangling with len 0) for len initialised elements
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Get the elements as a mutable slice
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: as above, and &mut self guarantees exclusive access
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

impl<T> Deref for AlignedBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for AlignedBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("alignment", &self.alignment())
            .field("data", &self.as_slice())
            .finish()
    }
}

impl<T> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        if self.layout.size() != 0 {
            // Safety: ptr was allocated with exactly this layout
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, self.layout) };
        }
    }
}

// Safety: AlignedBuffer owns its data and T is Send
unsafe impl<T: Send> Send for AlignedBuffer<T> {}
// Safety: AlignedBuffer owns its data and T is Sync
unsafe impl<T: Sync> Sync for AlignedBuffer<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::Cf32;

    #[test]
    fn test_alignment_and_zeroing() {
        let buffer = AlignedBuffer::<f32>::try_new(37, 32).unwrap();
        assert_eq!(buffer.len(), 37);
        assert_eq!(buffer.alignment(), 32);
        assert_eq!(buffer.as_ptr() as usize % 32, 0);
        assert!(buffer.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_alignment_raised_to_element() {
        let buffer = AlignedBuffer::<Cf32>::try_new(4, 1).unwrap();
        assert_eq!(buffer.alignment(), mem::align_of::<Cf32>());
    }

    #[test]
    fn test_zero_length() {
        let buffer = AlignedBuffer::<u8>::try_new(0, 64).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_slice(), &[] as &[u8]);
    }

    #[test]
    fn test_rejects_bad_alignment() {
        let err = AlignedBuffer::<f32>::try_new(8, 24).unwrap_err();
        assert!(matches!(err, Error::InvalidAlignment(24)));
    }

    #[test]
    fn test_unsatisfiable_requests_fail_cleanly() {
        assert!(matches!(
            AlignedBuffer::<f32>::try_new(usize::MAX, 32),
            Err(Error::Allocation { .. })
        ));
        assert!(matches!(
            AlignedBuffer::<f32>::try_new(1 << 60, 32),
            Err(Error::Allocation { .. })
        ));
    }

    #[test]
    fn test_reallocate_grows_over_aligned() {
        let mut buffer = AlignedBuffer::<f32>::try_new(5, 64).unwrap();
        buffer.copy_from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let buffer = buffer.reallocate(12).unwrap();
        assert_eq!(buffer.alignment(), 64);
        assert_eq!(buffer.as_ptr() as usize % 64, 0);
        assert_eq!(&buffer[..5], &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(buffer[5..].iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_reallocate_system_aligned() {
        let mut buffer = AlignedBuffer::<i16>::try_new(3, 4).unwrap();
        buffer.copy_from_slice(&[7, -8, 9]);
        let buffer = buffer.reallocate(1000).unwrap();
        assert_eq!(&buffer[..3], &[7, -8, 9]);
        assert!(buffer[3..].iter().all(|&v| v == 0));

        let buffer = buffer.reallocate(2).unwrap();
        assert_eq!(&buffer[..], &[7, -8]);
    }

    #[test]
    fn test_reallocate_from_and_to_empty() {
        let buffer = AlignedBuffer::<u8>::try_new(0, 8).unwrap();
        let mut buffer = buffer.reallocate(4).unwrap();
        assert_eq!(&buffer[..], &[0, 0, 0, 0]);
        buffer[0] = 9;
        let buffer = buffer.reallocate(0).unwrap();
        assert!(buffer.is_empty());
    }
}
