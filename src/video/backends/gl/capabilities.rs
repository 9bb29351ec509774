use std::ffi;

use crate::errors::*;
use crate::settings::Version;

/// Obtains the OpenGL version of the current context using the loaded functions.
///
/// # Unsafe
///
/// You must ensure that the functions belong to the current context, otherwise you will get
/// an undefined behavior.
pub unsafe fn version() -> Result<Version> {
    let desc = gl::GetString(gl::VERSION);
    if desc.is_null() {
        bail!("[GL] Failed to query the version of context.");
    }

    let desc = ffi::CStr::from_ptr(desc as *const _).to_string_lossy();
    Version::parse(&desc).ok_or_else(|| Error::Backend(format!("[GL] `{}` is malformed.", desc)))
}

/// Checks that the current context provides at least `required`. The same
/// API family is expected, no other family is accepted in place.
pub unsafe fn check_version(required: Version) -> Result<Version> {
    let version = version()?;
    if version >= required {
        Ok(version)
    } else {
        Err(Error::ContextUnsupported(
            required.to_string(),
            format!("The context only provides {}.", version),
        ))
    }
}
