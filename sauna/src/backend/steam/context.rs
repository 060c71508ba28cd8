use super::check;
use crate::error::InitFailure;

/// A Steam Audio context, released when the last clone is dropped.
#[derive(Debug)]
pub struct Context(audionimbus_sys::IPLContext);

impl Context {
    pub fn try_new() -> Result<Self, InitFailure> {
        let mut context = Self(std::ptr::null_mut());

        let mut settings = audionimbus_sys::IPLContextSettings {
            version: audionimbus_sys::STEAMAUDIO_VERSION as u32,
            logCallback: None,
            allocateCallback: None,
            freeCallback: None,
            simdLevel: audionimbus_sys::IPLSIMDLevel::IPL_SIMDLEVEL_AVX512,
            flags: audionimbus_sys::IPLContextFlags(0),
        };

        check(unsafe { audionimbus_sys::iplContextCreate(&mut settings, &mut context.0) })?;

        Ok(context)
    }

    pub fn raw_ptr(&self) -> audionimbus_sys::IPLContext {
        self.0
    }
}

impl Clone for Context {
    fn clone(&self) -> Self {
        unsafe {
            audionimbus_sys::iplContextRetain(self.0);
        }
        Self(self.0)
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        unsafe { audionimbus_sys::iplContextRelease(&mut self.0) }
    }
}

unsafe impl Send for Context {}
unsafe impl Sync for Context {}
