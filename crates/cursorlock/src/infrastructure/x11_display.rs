//! Owned Xlib display connection.

use std::ptr::NonNull;

use x11::xlib;

/// An open `Display*` that is closed on drop.
///
/// Not `Send`: Xlib connections are used from the thread that opened them.
pub struct XDisplay {
    raw: NonNull<xlib::Display>,
}

impl XDisplay {
    /// Opens the display named by the `DISPLAY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure, including the `DISPLAY` value.
    pub fn open() -> Result<Self, String> {
        // SAFETY: a null name tells Xlib to read `DISPLAY`.  The returned
        // pointer is released exactly once in `Drop`.
        let raw = unsafe { xlib::XOpenDisplay(std::ptr::null()) };
        NonNull::new(raw).map(|raw| Self { raw }).ok_or_else(|| {
            let display_env = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
            format!("XOpenDisplay failed; DISPLAY={display_env}")
        })
    }

    pub fn as_ptr(&self) -> *mut xlib::Display {
        self.raw.as_ptr()
    }

    /// Root window of the default screen.
    pub fn default_root(&self) -> xlib::Window {
        // SAFETY: `self.raw` is a live connection.
        unsafe { xlib::XDefaultRootWindow(self.raw.as_ptr()) }
    }
}

impl Drop for XDisplay {
    fn drop(&mut self) {
        // SAFETY: opened in `open`, not used after this point.
        unsafe {
            xlib::XCloseDisplay(self.raw.as_ptr());
        }
    }
}
