use byteorder::{ByteOrder, NativeEndian};
use cgmath::Vector3;

use crate::errors::*;

use super::assets::{BufferHandle, BufferHint};
use super::backends::Visitor;

/// The vertices of the triangle, in clip space.
pub const TRIANGLE: [Vector3<f32>; 3] = [
    Vector3 {
        x: -0.5,
        y: -0.5,
        z: 0.0,
    },
    Vector3 {
        x: 0.5,
        y: -0.5,
        z: 0.0,
    },
    Vector3 {
        x: 0.0,
        y: 0.5,
        z: 0.8,
    },
];

/// The vertex buffers uploaded for the frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Buffers {
    pub position: BufferHandle,
}

/// Flattens `vertices` into tightly packed components.
pub fn positions(vertices: &[Vector3<f32>]) -> Vec<f32> {
    vertices.iter().flat_map(|v| vec![v.x, v.y, v.z]).collect()
}

/// Encodes `floats` the way the GPU reads them.
pub fn encode(floats: &[f32]) -> Vec<u8> {
    let mut bytes = vec![0; floats.len() * 4];
    NativeEndian::write_f32_into(floats, &mut bytes);
    bytes
}

/// Uploads `TRIANGLE` into an immutable vertex buffer.
pub fn init_buffers(visitor: &mut dyn Visitor) -> Result<Buffers> {
    let bytes = encode(&positions(&TRIANGLE));
    let position = unsafe { visitor.create_vertex_buffer(BufferHint::Immutable, &bytes)? };

    debug!("Uploaded {} bytes of positions into {}.", bytes.len(), position);
    Ok(Buffers { position })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn flatten() {
        assert_eq!(
            positions(&TRIANGLE),
            vec![-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.8]
        );
    }

    #[test]
    fn encode_native() {
        let bytes = encode(&[1.0, -0.5]);
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[..4], &1.0f32.to_bits().to_ne_bytes()[..]);
        assert_eq!(&bytes[4..], &(-0.5f32).to_bits().to_ne_bytes()[..]);
    }
}
