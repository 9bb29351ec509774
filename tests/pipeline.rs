use tristrip::prelude::*;
use tristrip::video::assets::{BufferHint, Primitive, ShaderStage, VertexAttribute};
use tristrip::video::{FRAGMENT_SHADER, VERTEX_SHADER};

fn setup() -> (HeadlessEnvironment, Renderer) {
    let _ = env_logger::try_init();

    let env = HeadlessEnvironment::new().with_surface("#canvas");
    let visitor = env.acquire(&Settings::default()).unwrap();
    (env, Renderer::new(Box::new(visitor)))
}

#[test]
fn end_to_end() {
    let (env, renderer) = setup();
    let renderer = renderer.run(Color::black()).unwrap();

    assert_eq!(renderer.stage(), Stage::Drawn);
    assert_eq!(env.clear_color(), Some(Color(0.0, 0.0, 0.0, 1.0)));

    let info = renderer.program_info().unwrap();
    assert_eq!(env.binded_program(), Some(info.program()));

    let draws: Vec<_> = env
        .commands()
        .into_iter()
        .filter(|v| match *v {
            Command::Draw(..) => true,
            _ => false,
        })
        .collect();

    assert_eq!(draws, vec![Command::Draw(Primitive::TriangleStrip, 0, 3)]);
    assert_eq!(env.commands().last(), Some(&Command::Flush));
}

#[test]
fn command_order() {
    let (env, renderer) = setup();
    let renderer = renderer.run(Color::white()).unwrap();

    let info = renderer.program_info().unwrap();
    let buffers = renderer.buffers().unwrap();
    let commands = env.commands();

    assert_eq!(commands.len(), 9);
    match commands[0] {
        Command::CreateShader(ShaderStage::Vertex, _) => {}
        ref v => panic!("unexpected {:?}", v),
    }
    match commands[1] {
        Command::CreateShader(ShaderStage::Fragment, _) => {}
        ref v => panic!("unexpected {:?}", v),
    }

    assert_eq!(commands[2], Command::CreateProgram(info.program()));
    assert_eq!(
        commands[3],
        Command::CreateBuffer(buffers.position, BufferHint::Immutable, 36)
    );
    assert_eq!(
        commands[4],
        Command::BindVertexAttribute(buffers.position, 0, VertexAttribute::floats(3))
    );
    assert_eq!(commands[5], Command::Clear(Color::white()));
    assert_eq!(commands[6], Command::UseProgram(info.program()));
    assert_eq!(commands[7], Command::Draw(Primitive::TriangleStrip, 0, 3));
    assert_eq!(commands[8], Command::Flush);
}

#[test]
fn link_program() {
    let (env, mut renderer) = setup();

    let info = renderer
        .link_program(VERTEX_SHADER, FRAGMENT_SHADER)
        .unwrap()
        .clone();

    assert_eq!(renderer.stage(), Stage::ProgramLinked);
    assert_eq!(info.attribute("vertexPosition"), Some(0));
    assert_eq!(info.attribute("a_position"), None);
    assert_eq!(env.commands().len(), 3);
}

#[test]
fn vertex_syntax_error() {
    let (env, mut renderer) = setup();

    let vs = "in vec3 a_position;\nvoid main() {\n    gl_Position = vec4(a_position, 1.0;\n}";
    match renderer.link_program(vs, FRAGMENT_SHADER) {
        Err(Error::CompileFailure { stage, source, .. }) => {
            assert_eq!(stage, ShaderStage::Vertex);
            assert_eq!(source, vs);
        }
        v => panic!("unexpected {:?}", v.map(|_| ())),
    }

    assert_eq!(renderer.stage(), Stage::ContextAcquired);
    assert!(renderer.program_info().is_none());
    assert_eq!(env.commands(), vec![Command::DeleteShader(ShaderStage::Vertex)]);
}

#[test]
fn fragment_syntax_error() {
    let (env, mut renderer) = setup();

    let fs = "out vec4 frag_color;\nvoid main() {\n    frag_color = vec4(1.0);\n";
    match renderer.link_program(VERTEX_SHADER, fs) {
        Err(Error::CompileFailure { stage, .. }) => assert_eq!(stage, ShaderStage::Fragment),
        v => panic!("unexpected {:?}", v.map(|_| ())),
    }

    let commands = env.commands();
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[1], Command::DeleteShader(ShaderStage::Fragment));
}

#[test]
fn link_failure() {
    let (env, mut renderer) = setup();

    let fs = "in vec3 v_color;\nout vec4 frag_color;\nvoid main() {\n    frag_color = vec4(v_color, 1.0);\n}";
    match renderer.link_program(VERTEX_SHADER, fs) {
        Err(Error::LinkFailure(log)) => assert!(log.contains("v_color")),
        v => panic!("unexpected {:?}", v.map(|_| ())),
    }

    assert!(env.commands().iter().all(|v| match *v {
        Command::CreateProgram(_) => false,
        _ => true,
    }));
}

#[test]
fn attribute_undefined() {
    let (_, mut renderer) = setup();

    let vs = "in vec3 position;\nout vec3 v_position;\nvoid main() {\n    v_position = position;\n}";
    match renderer.link_program(vs, FRAGMENT_SHADER) {
        Err(Error::AttributeUndefined(name)) => assert_eq!(name, "a_position"),
        v => panic!("unexpected {:?}", v.map(|_| ())),
    }

    assert_eq!(renderer.stage(), Stage::ContextAcquired);
}

#[test]
fn buffer_contents() {
    let (env, mut renderer) = setup();

    renderer.link_program(VERTEX_SHADER, FRAGMENT_SHADER).unwrap();
    let buffers = renderer.upload_buffers().unwrap();

    assert_eq!(
        env.buffer_contents(buffers.position).unwrap(),
        vec![-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.8]
    );
}

#[test]
fn stage_mismatch() {
    let (_, mut renderer) = setup();

    match renderer.upload_buffers() {
        Err(Error::StageMismatch { actual, .. }) => assert_eq!(actual, "ContextAcquired"),
        v => panic!("unexpected {:?}", v),
    }

    match renderer.draw(Color::black()) {
        Err(Error::StageMismatch { to, expected, .. }) => {
            assert_eq!(to, "Drawn");
            assert_eq!(expected, "AttributesBound");
        }
        v => panic!("unexpected {:?}", v),
    }

    renderer.link_program(VERTEX_SHADER, FRAGMENT_SHADER).unwrap();
    assert!(renderer.link_program(VERTEX_SHADER, FRAGMENT_SHADER).is_err());
    assert!(renderer.bind_attributes().is_err());
    assert_eq!(renderer.stage(), Stage::ProgramLinked);
}

#[test]
fn draw_once() {
    let (env, mut renderer) = setup();

    renderer.link_program(VERTEX_SHADER, FRAGMENT_SHADER).unwrap();
    renderer.upload_buffers().unwrap();
    renderer.bind_attributes().unwrap();
    assert_eq!(renderer.draw(Color::black()).unwrap(), 1);

    assert!(renderer.draw(Color::black()).is_err());
    assert_eq!(env.commands().len(), 9);
}

#[test]
fn clear_color_clipped() {
    let (env, renderer) = setup();
    renderer.run(Color(2.0, -1.0, 0.5, 1.0)).unwrap();

    assert_eq!(env.clear_color(), Some(Color(1.0, 0.0, 0.5, 1.0)));
}
