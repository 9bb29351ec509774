use tristrip::prelude::*;
use tristrip::video::assets::{BufferHint, Primitive, ShaderStage, VertexAttribute};
use tristrip::video::{buffer, FRAGMENT_SHADER, VERTEX_SHADER};

#[test]
fn surface_not_found() {
    let env = HeadlessEnvironment::new().with_surface("#other");

    match env.acquire(&Settings::default()) {
        Err(Error::SurfaceNotFound(id)) => assert_eq!(id, "#canvas"),
        Err(err) => panic!("unexpected {}", err),
        Ok(_) => panic!("acquired a missing surface"),
    }

    assert!(env.commands().is_empty());
    assert!(env.clear_color().is_none());
}

#[test]
fn context_unsupported() {
    let env = HeadlessEnvironment::new()
        .with_surface("#canvas")
        .with_versions(&[Version::ES(3, 0)]);

    let mut settings = Settings::default();
    settings.version = Version::GL(4, 5);

    match env.acquire(&settings) {
        Err(Error::ContextUnsupported(version, _)) => assert_eq!(version, "OpenGL 4.5"),
        Err(err) => panic!("unexpected {}", err),
        Ok(_) => panic!("acquired an unsupported context"),
    }

    settings.version = Version::ES(3, 0);
    assert!(env.acquire(&settings).is_ok());
}

#[test]
fn shared_device() {
    let env = HeadlessEnvironment::new().with_surface("#canvas");
    let mut visitor = env.acquire(&Settings::default()).unwrap();

    let bytes = buffer::encode(&[1.0, 2.0, 3.0]);
    let handle = unsafe {
        visitor
            .create_vertex_buffer(BufferHint::Immutable, &bytes)
            .unwrap()
    };

    assert_eq!(env.buffer_contents(handle), Some(vec![1.0, 2.0, 3.0]));
    assert_eq!(
        env.commands(),
        vec![Command::CreateBuffer(handle, BufferHint::Immutable, 12)]
    );
}

#[test]
fn attribute_out_of_bounds() {
    let env = HeadlessEnvironment::new().with_surface("#canvas");
    let mut visitor = env.acquire(&Settings::default()).unwrap();

    unsafe {
        let handle = visitor
            .create_vertex_buffer(BufferHint::Immutable, &buffer::encode(&[0.0, 1.0]))
            .unwrap();

        assert!(visitor
            .bind_vertex_attribute(handle, 0, VertexAttribute::floats(3))
            .is_err());
        assert!(visitor
            .bind_vertex_attribute(handle, 0, VertexAttribute::floats(2))
            .is_ok());
    }
}

#[test]
fn draw_without_program() {
    let env = HeadlessEnvironment::new().with_surface("#canvas");
    let mut visitor = env.acquire(&Settings::default()).unwrap();

    unsafe {
        assert!(visitor.draw(Primitive::TriangleStrip, 0, 3).is_err());
    }

    assert!(env.commands().is_empty());
}

#[test]
fn draw_out_of_bounds() {
    let env = HeadlessEnvironment::new().with_surface("#canvas");
    let mut visitor = env.acquire(&Settings::default()).unwrap();

    unsafe {
        let vs = visitor
            .create_shader(ShaderStage::Vertex, VERTEX_SHADER)
            .unwrap();
        let fs = visitor
            .create_shader(ShaderStage::Fragment, FRAGMENT_SHADER)
            .unwrap();
        let program = visitor.create_program(vs, fs).unwrap();
        visitor.use_program(program).unwrap();

        // Two vertices only.
        let bytes = buffer::encode(&[0.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
        let handle = visitor
            .create_vertex_buffer(BufferHint::Immutable, &bytes)
            .unwrap();
        visitor
            .bind_vertex_attribute(handle, 0, VertexAttribute::floats(3))
            .unwrap();

        assert!(visitor.draw(Primitive::TriangleStrip, 0, 3).is_err());
        assert!(visitor.draw(Primitive::TriangleStrip, 1, 2).is_err());
        assert_eq!(visitor.draw(Primitive::TriangleStrip, 0, 2).unwrap(), 0);
    }

    let draws = env
        .commands()
        .into_iter()
        .filter(|v| match *v {
            Command::Draw(..) => true,
            _ => false,
        })
        .count();
    assert_eq!(draws, 1);
}
