//! Descriptions of the GPU objects created by the pipeline.

use std::fmt;

impl_handle!(ShaderHandle);
impl_handle!(ProgramHandle);
impl_handle!(BufferHandle);

/// The programmable stages of the pipeline.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}
/// Hint abouts the intended update strategy of the data.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BufferHint {
    /// The resource is initialized with data and cannot be changed later.
    Immutable,
}

/// Defines how the input vertex data is used to assemble primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Triangle strips, every vertex after the second closes a triangle.
    TriangleStrip,
}

impl Primitive {
    /// Returns the number of primitives assembled from `vertices` vertices.
    pub fn assemble(self, vertices: u32) -> u32 {
        match self {
            Primitive::TriangleStrip => vertices.saturating_sub(2),
        }
    }
}

/// The data type of a single component of a vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexFormat {
    Float,
}

impl VertexFormat {
    /// Size in bytes of one component.
    pub fn stride(self) -> u8 {
        match self {
            VertexFormat::Float => 4,
        }
    }
}

/// Describes how raw buffer bytes map to a shader input attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Number of components per vertex.
    pub size: u8,
    pub format: VertexFormat,
    pub normalized: bool,
    /// Byte distance between consecutive vertices, 0 means tightly packed.
    pub stride: u32,
    /// Byte offset of the first component.
    pub offset: u32,
}

impl VertexAttribute {
    /// Tightly packed, not normalized `size` x f32.
    pub fn floats(size: u8) -> Self {
        VertexAttribute {
            size,
            format: VertexFormat::Float,
            normalized: false,
            stride: 0,
            offset: 0,
        }
    }

    /// Bytes read for one vertex.
    #[inline]
    pub fn element(&self) -> u32 {
        u32::from(self.size) * u32::from(self.format.stride())
    }

    /// Bytes between the starts of two consecutive vertices.
    #[inline]
    pub fn pitch(&self) -> u32 {
        if self.stride == 0 {
            self.element()
        } else {
            self.stride
        }
    }

    /// Bytes a buffer must hold to feed vertices `first..first + count`.
    pub fn span(&self, first: u32, count: u32) -> u64 {
        if count == 0 {
            return 0;
        }

        let last = u64::from(first) + u64::from(count) - 1;
        u64::from(self.offset) + last * u64::from(self.pitch()) + u64::from(self.element())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn triangle_strip() {
        assert_eq!(Primitive::TriangleStrip.assemble(3), 1);
        assert_eq!(Primitive::TriangleStrip.assemble(4), 2);
        assert_eq!(Primitive::TriangleStrip.assemble(2), 0);
    }

    #[test]
    fn float_attribute() {
        let attribute = VertexAttribute::floats(3);
        assert_eq!(attribute.format.stride(), 4);
        assert!(!attribute.normalized);
        assert_eq!(attribute.stride, 0);
        assert_eq!(attribute.offset, 0);
        assert_eq!(attribute.pitch(), 12);
    }

    #[test]
    fn span() {
        let mut attribute = VertexAttribute::floats(3);
        assert_eq!(attribute.span(0, 3), 36);
        assert_eq!(attribute.span(1, 2), 36);
        assert_eq!(attribute.span(0, 0), 0);

        attribute.stride = 16;
        attribute.offset = 4;
        assert_eq!(attribute.span(0, 3), 4 + 2 * 16 + 12);
    }
}
