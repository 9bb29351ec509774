use std::fmt;

/// `HandleIndex` type is arbitrary. Keeping it 32-bits allows a `Handle` to be
/// passed around by value everywhere.
pub type HandleIndex = u32;

/// `Handle` addresses an object owned by a backend. Objects are never freed,
/// so the index alone identifies them for the lifetime of the backend.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle {
    index: HandleIndex,
}

impl Handle {
    /// Constructs a new `Handle`.
    #[inline]
    pub fn new(index: HandleIndex) -> Self {
        Handle { index }
    }

    /// Returns index value.
    #[inline]
    pub fn index(self) -> HandleIndex {
        self.index
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Handle ({})", self.index)
    }
}

#[macro_export]
macro_rules! impl_handle {
    ($name:ident) => {
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name($crate::utils::handle::Handle);

        impl From<$name> for $crate::utils::handle::Handle {
            fn from(handle: $name) -> Self {
                handle.0
            }
        }

        impl From<$crate::utils::handle::Handle> for $name {
            fn from(handle: $crate::utils::handle::Handle) -> Self {
                $name(handle)
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::utils::handle::Handle;
            fn deref(&self) -> &$crate::utils::handle::Handle {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0.index())
            }
        }
    };
}

/// Append-only storage of backend objects addressed by `Handle`.
#[derive(Debug)]
pub struct ObjectVec<T> {
    buf: Vec<T>,
}

impl<T> ObjectVec<T> {
    pub fn new() -> Self {
        ObjectVec { buf: Vec::new() }
    }

    pub fn create<H>(&mut self, value: T) -> H
    where
        H: From<Handle>,
    {
        self.buf.push(value);
        Handle::new((self.buf.len() - 1) as HandleIndex).into()
    }

    pub fn get<H>(&self, handle: H) -> Option<&T>
    where
        H: Into<Handle>,
    {
        self.buf.get(handle.into().index() as usize)
    }
}

impl<T> Default for ObjectVec<T> {
    fn default() -> Self {
        ObjectVec::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    impl_handle!(TestHandle);

    #[test]
    fn create_and_get() {
        let mut objects = ObjectVec::new();
        let a: TestHandle = objects.create("a");
        let b: TestHandle = objects.create("b");

        assert_ne!(a, b);
        assert_eq!(objects.get(a), Some(&"a"));
        assert_eq!(objects.get(b), Some(&"b"));

        let stale = TestHandle::from(Handle::new(7));
        assert_eq!(objects.get(stale), None);
    }
}
