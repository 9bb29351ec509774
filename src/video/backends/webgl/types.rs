use web_sys::WebGl2RenderingContext as WebGL;

use super::super::super::assets::*;

impl From<ShaderStage> for u32 {
    fn from(stage: ShaderStage) -> Self {
        match stage {
            ShaderStage::Vertex => WebGL::VERTEX_SHADER,
            ShaderStage::Fragment => WebGL::FRAGMENT_SHADER,
        }
    }
}

impl From<BufferHint> for u32 {
    fn from(hint: BufferHint) -> Self {
        match hint {
            BufferHint::Immutable => WebGL::STATIC_DRAW,
        }
    }
}

impl From<VertexFormat> for u32 {
    fn from(format: VertexFormat) -> Self {
        match format {
            VertexFormat::Float => WebGL::FLOAT,
        }
    }
}

impl From<Primitive> for u32 {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::TriangleStrip => WebGL::TRIANGLE_STRIP,
        }
    }
}
