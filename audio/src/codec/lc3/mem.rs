//! Aligned scratch memory for liblc3 state.

use std::alloc::{self, Layout};
use std::os::raw::c_void;
use std::ptr::NonNull;

use super::Lc3Error;

// liblc3 requires pointer alignment; 16 also covers its float vectors.
const ALIGN: usize = 16;

/// Zeroed heap block released on drop.
pub(crate) struct StateMem {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl StateMem {
    pub(crate) fn new(size: usize) -> Result<Self, Lc3Error> {
        if size == 0 {
            return Err(Lc3Error::InvalidParams("state size is zero".to_string()));
        }
        let layout = Layout::from_size_align(size, ALIGN)
            .map_err(|e| Lc3Error::InvalidParams(e.to_string()))?;
        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let ptr = NonNull::new(raw).ok_or(Lc3Error::AllocFailed(size))?;
        Ok(Self { ptr, layout })
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut c_void {
        self.ptr.as_ptr().cast()
    }

    pub(crate) fn len(&self) -> usize {
        self.layout.size()
    }
}

impl Drop for StateMem {
    fn drop(&mut self) {
        // SAFETY: ptr was allocated with this layout in `new`.
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) };
    }
}

// Safety: the block is exclusively owned.
unsafe impl Send for StateMem {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_aligned_and_zeroed() {
        let mut mem = StateMem::new(100).unwrap();
        assert_eq!(mem.len(), 100);
        let p = mem.as_mut_ptr() as *const u8;
        assert_eq!(p as usize % ALIGN, 0);
        let bytes = unsafe { std::slice::from_raw_parts(p, 100) };
        assert!(bytes.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(StateMem::new(0), Err(Lc3Error::InvalidParams(_))));
    }

    #[test]
    fn test_repeated_alloc_release() {
        for _ in 0..1000 {
            let _mem = StateMem::new(4096).unwrap();
        }
    }
}
