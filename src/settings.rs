//! Functions for loading settings.

use std::cmp;
use std::fmt;

use cgmath::Vector2;

use crate::utils::prelude::Color;

/// A structure containing configuration data, which are used to specify the
/// surface to draw on and the context requested from it.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Identifier of the drawing surface. In browsers this is a selector
    /// passed to `document.querySelector`.
    pub surface: String,
    /// The API version of the rendering context. No other version is tried
    /// if this one is not available.
    pub version: Version,
    pub window: WindowParams,
    pub clear_color: Color,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            surface: "#canvas".to_owned(),
            version: Version::default(),
            window: WindowParams::default(),
            clear_color: Color::black(),
        }
    }
}

/// Window creation parameters, only used where the program owns its window.
#[derive(Debug, Clone)]
pub struct WindowParams {
    /// Sets the title of window.
    pub title: String,
    /// Sets the size in *points* of the client area of the window.
    pub size: Vector2<u32>,
}

impl Default for WindowParams {
    fn default() -> Self {
        WindowParams {
            title: "Triangle".to_owned(),
            size: Vector2::new(640, 480),
        }
    }
}

/// Describes a version.
///
/// A version can only be compared to another version if they belong to the same API.
/// For example, both `Version::GL(3, 0) >= Version::ES(3, 0)` and `Version::ES(3, 0) >=
/// Version::GL(3, 0)` return `false`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    /// Regular OpenGL.
    GL(u8, u8),
    /// OpenGL embedded system, which is what WebGL exposes.
    ES(u8, u8),
}

impl Default for Version {
    #[cfg(target_arch = "wasm32")]
    fn default() -> Self {
        Version::ES(3, 0)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn default() -> Self {
        Version::GL(3, 3)
    }
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        let (es1, major1, minor1) = match *self {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        let (es2, major2, minor2) = match *other {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        if es1 != es2 {
            None
        } else {
            match major1.cmp(&major2) {
                cmp::Ordering::Equal => Some(minor1.cmp(&minor2)),
                v => Some(v),
            }
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Version::GL(major, minor) => write!(f, "OpenGL {}.{}", major, minor),
            Version::ES(major, minor) => write!(f, "OpenGL ES {}.{}", major, minor),
        }
    }
}

impl Version {
    /// Parses the string returned by `glGetString(GL_VERSION)`.
    pub fn parse(desc: &str) -> Option<Version> {
        let (es, desc) = if desc.starts_with("OpenGL ES ") {
            (true, desc.get(10..)?)
        } else if desc.starts_with("OpenGL ES-") {
            // Profile suffix, e.g. `OpenGL ES-CM 1.1`.
            (true, desc.get(13..)?)
        } else {
            (false, desc)
        };

        let desc = desc.split(' ').next()?;
        let mut iter = desc.split('.');
        let major = iter.next()?.parse().ok()?;
        let minor = iter.next()?.parse().ok()?;

        if es {
            Some(Version::ES(major, minor))
        } else {
            Some(Version::GL(major, minor))
        }
    }

    /// The `contextType` that `HtmlCanvasElement::getContext` expects for
    /// this version.
    pub fn web_context_name(self) -> Option<&'static str> {
        match self {
            Version::ES(3, 0) => Some("webgl2"),
            _ => None,
        }
    }
}
