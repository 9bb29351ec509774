//! A device without GPU. It records every command it receives and keeps the
//! uploaded bytes around, so the pipeline can be inspected by tests or run
//! on machines without a display.

use std::cell::RefCell;
use std::rc::Rc;

use byteorder::{ByteOrder, NativeEndian};

use super::super::assets::*;
use super::Visitor;

use crate::errors::*;
use crate::settings::{Settings, Version};
use crate::utils::prelude::{Color, ObjectVec};

/// A command received by the headless device, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateShader(ShaderStage, ShaderHandle),
    DeleteShader(ShaderStage),
    CreateProgram(ProgramHandle),
    CreateBuffer(BufferHandle, BufferHint, usize),
    BindVertexAttribute(BufferHandle, u32, VertexAttribute),
    Clear(Color),
    UseProgram(ProgramHandle),
    Draw(Primitive, u32, u32),
    Flush,
}

#[derive(Debug, Clone)]
struct HeadlessShader {
    stage: ShaderStage,
    inputs: Vec<(Option<u32>, String)>,
    outputs: Vec<String>,
}

#[derive(Debug, Clone)]
struct HeadlessProgram {
    /// Input names indexed by location, `None` for unused locations.
    attributes: Vec<Option<String>>,
}

#[derive(Debug, Default)]
struct HeadlessDevice {
    commands: Vec<Command>,
    shaders: ObjectVec<HeadlessShader>,
    programs: ObjectVec<HeadlessProgram>,
    buffers: ObjectVec<Vec<u8>>,
    clear_color: Option<Color>,
    binded_program: Option<ProgramHandle>,
    binded_attributes: Vec<(u32, BufferHandle, VertexAttribute)>,
}

/// The environment a `HeadlessVisitor` is acquired from. It decides which
/// surfaces exist and which context versions they support.
#[derive(Debug, Clone)]
pub struct HeadlessEnvironment {
    surfaces: Vec<String>,
    versions: Vec<Version>,
    device: Rc<RefCell<HeadlessDevice>>,
}

impl Default for HeadlessEnvironment {
    fn default() -> Self {
        HeadlessEnvironment {
            surfaces: Vec::new(),
            versions: vec![Version::ES(3, 0), Version::GL(3, 3)],
            device: Rc::new(RefCell::new(HeadlessDevice::default())),
        }
    }
}

impl HeadlessEnvironment {
    /// Creates an environment without any surface.
    pub fn new() -> Self {
        HeadlessEnvironment::default()
    }

    pub fn with_surface<T: Into<String>>(mut self, id: T) -> Self {
        self.surfaces.push(id.into());
        self
    }

    pub fn with_versions(mut self, versions: &[Version]) -> Self {
        self.versions = versions.to_vec();
        self
    }

    /// Locates the surface and creates a context of the requested version.
    pub fn acquire(&self, settings: &Settings) -> Result<HeadlessVisitor> {
        if !self.surfaces.iter().any(|v| *v == settings.surface) {
            return Err(Error::SurfaceNotFound(settings.surface.clone()));
        }

        if !self.versions.contains(&settings.version) {
            return Err(Error::ContextUnsupported(
                settings.version.to_string(),
                "The headless environment does not provide it.".into(),
            ));
        }

        Ok(HeadlessVisitor {
            device: self.device.clone(),
        })
    }

    /// Returns all the commands submitted to the device so far.
    pub fn commands(&self) -> Vec<Command> {
        self.device.borrow().commands.clone()
    }

    /// Returns the color of the last clear.
    pub fn clear_color(&self) -> Option<Color> {
        self.device.borrow().clear_color
    }

    /// Returns the program in use.
    pub fn binded_program(&self) -> Option<ProgramHandle> {
        self.device.borrow().binded_program
    }

    /// Reads back the contents of a buffer as 32-bit floats.
    pub fn buffer_contents(&self, handle: BufferHandle) -> Option<Vec<f32>> {
        let device = self.device.borrow();
        let bytes = device.buffers.get(handle)?;

        let mut floats = vec![0.0; bytes.len() / 4];
        NativeEndian::read_f32_into(&bytes[..floats.len() * 4], &mut floats);
        Some(floats)
    }
}

/// The `Visitor` of a `HeadlessEnvironment`.
pub struct HeadlessVisitor {
    device: Rc<RefCell<HeadlessDevice>>,
}

impl Visitor for HeadlessVisitor {
    unsafe fn create_shader(&mut self, stage: ShaderStage, src: &str) -> Result<ShaderHandle> {
        let mut device = self.device.borrow_mut();

        match reflect(stage, src) {
            Ok(shader) => {
                let handle = device.shaders.create(shader);
                device.commands.push(Command::CreateShader(stage, handle));
                Ok(handle)
            }
            Err(log) => {
                device.commands.push(Command::DeleteShader(stage));
                Err(Error::CompileFailure {
                    stage,
                    source: src.to_owned(),
                    log,
                })
            }
        }
    }

    unsafe fn create_program(
        &mut self,
        vs: ShaderHandle,
        fs: ShaderHandle,
    ) -> Result<ProgramHandle> {
        let mut device = self.device.borrow_mut();

        let program = {
            let vs = device
                .shaders
                .get(vs)
                .ok_or_else(|| Error::HandleInvalid(vs.to_string()))?;
            let fs = device
                .shaders
                .get(fs)
                .ok_or_else(|| Error::HandleInvalid(fs.to_string()))?;

            link(vs, fs).map_err(Error::LinkFailure)?
        };

        let handle = device.programs.create(program);
        device.commands.push(Command::CreateProgram(handle));
        Ok(handle)
    }

    unsafe fn attribute_location(&mut self, program: ProgramHandle, name: &str) -> Result<u32> {
        let device = self.device.borrow();
        let program = device
            .programs
            .get(program)
            .ok_or_else(|| Error::HandleInvalid(program.to_string()))?;

        program
            .attributes
            .iter()
            .position(|v| v.as_ref().map(|v| v == name).unwrap_or(false))
            .map(|v| v as u32)
            .ok_or_else(|| Error::AttributeUndefined(name.into()))
    }

    unsafe fn create_vertex_buffer(
        &mut self,
        hint: BufferHint,
        bytes: &[u8],
    ) -> Result<BufferHandle> {
        let mut device = self.device.borrow_mut();
        let handle = device.buffers.create(bytes.to_vec());
        device
            .commands
            .push(Command::CreateBuffer(handle, hint, bytes.len()));
        Ok(handle)
    }

    unsafe fn bind_vertex_attribute(
        &mut self,
        buffer: BufferHandle,
        location: u32,
        attribute: VertexAttribute,
    ) -> Result<()> {
        let mut device = self.device.borrow_mut();
        let len = device
            .buffers
            .get(buffer)
            .map(|v| v.len())
            .ok_or_else(|| Error::HandleInvalid(buffer.to_string()))?;

        if attribute.span(0, 1) > len as u64 {
            bail!("Vertex attribute reads out of the bounds of {}.", buffer);
        }

        device.binded_attributes.retain(|v| v.0 != location);
        device.binded_attributes.push((location, buffer, attribute));
        device
            .commands
            .push(Command::BindVertexAttribute(buffer, location, attribute));
        Ok(())
    }

    unsafe fn clear(&mut self, color: Color) -> Result<()> {
        let mut device = self.device.borrow_mut();
        device.clear_color = Some(color);
        device.commands.push(Command::Clear(color));
        Ok(())
    }

    unsafe fn use_program(&mut self, program: ProgramHandle) -> Result<()> {
        let mut device = self.device.borrow_mut();
        if device.programs.get(program).is_none() {
            return Err(Error::HandleInvalid(program.to_string()));
        }

        device.binded_program = Some(program);
        device.commands.push(Command::UseProgram(program));
        Ok(())
    }

    unsafe fn draw(&mut self, primitive: Primitive, first: u32, count: u32) -> Result<u32> {
        let mut device = self.device.borrow_mut();
        if device.binded_program.is_none() {
            bail!("Draw call is submitted without any program in use.");
        }

        for &(location, buffer, attribute) in &device.binded_attributes {
            let len = device.buffers.get(buffer).map(|v| v.len()).unwrap_or(0);
            if attribute.span(first, count) > len as u64 {
                bail!(
                    "Drawing {} vertices from {} reads attribute {} out of the bounds of {}.",
                    count,
                    first,
                    location,
                    buffer
                );
            }
        }

        device.commands.push(Command::Draw(primitive, first, count));
        Ok(primitive.assemble(count))
    }

    unsafe fn flush(&mut self) -> Result<()> {
        self.device.borrow_mut().commands.push(Command::Flush);
        Ok(())
    }
}

/// Performs the checks a GLSL front-end would reject first: balanced
/// delimiters, an entry point, and well-formed interface declarations.
fn reflect(stage: ShaderStage, src: &str) -> ::std::result::Result<HeadlessShader, String> {
    // Preprocessor lines are blanked rather than dropped to keep line numbers.
    let code: String = src
        .lines()
        .map(|line| line.split("//").next().unwrap_or(""))
        .map(|line| if line.trim_start().starts_with('#') { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n");

    let mut stack = Vec::new();
    for (n, line) in code.lines().enumerate() {
        for c in line.chars() {
            match c {
                '(' | '{' | '[' => stack.push(c),
                ')' | '}' | ']' => {
                    let open = match c {
                        ')' => '(',
                        '}' => '{',
                        _ => '[',
                    };

                    if stack.pop() != Some(open) {
                        return Err(format!("ERROR: 0:{}: '{}' : syntax error", n + 1, c));
                    }
                }
                _ => {}
            }
        }
    }

    if let Some(c) = stack.pop() {
        return Err(format!("ERROR: unexpected end of file, unclosed '{}'", c));
    }

    if !code.contains("void main") {
        return Err("ERROR: missing entry point 'main'".into());
    }

    let mut shader = HeadlessShader {
        stage,
        inputs: Vec::new(),
        outputs: Vec::new(),
    };

    for statement in top_level_statements(&code) {
        let (location, statement) = strip_layout(&statement)?;
        let tokens: Vec<&str> = statement.split_whitespace().collect();
        let qualifier = match tokens.first() {
            Some(&v) => v,
            None => continue,
        };

        let input = match (stage, qualifier) {
            (ShaderStage::Vertex, "in") | (ShaderStage::Vertex, "attribute") => true,
            (ShaderStage::Fragment, "in") | (ShaderStage::Fragment, "varying") => true,
            (ShaderStage::Vertex, "out") | (ShaderStage::Vertex, "varying") => false,
            (ShaderStage::Fragment, "out") => false,
            _ => continue,
        };

        if tokens.len() < 3 {
            return Err(format!("ERROR: '{}' : syntax error", statement.trim()));
        }

        let name = tokens[tokens.len() - 1]
            .split('[')
            .next()
            .unwrap_or("")
            .to_owned();

        if input {
            shader.inputs.push((location, name));
        } else {
            shader.outputs.push(name);
        }
    }

    Ok(shader)
}

/// Splits the code outside of any block into `;` terminated statements.
fn top_level_statements(code: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut depth = 0;

    for c in code.chars() {
        match c {
            '{' => {
                depth += 1;
                current.clear();
            }
            '}' => depth -= 1,
            ';' if depth == 0 => {
                statements.push(current.trim().to_owned());
                current.clear();
            }
            _ if depth == 0 => current.push(c),
            _ => {}
        }
    }

    statements
}

fn strip_layout(statement: &str) -> ::std::result::Result<(Option<u32>, &str), String> {
    let statement = statement.trim();
    if !statement.starts_with("layout") {
        return Ok((None, statement));
    }

    let (open, close) = match (statement.find('('), statement.find(')')) {
        (Some(open), Some(close)) if open < close => (open, close),
        _ => return Err(format!("ERROR: '{}' : syntax error", statement)),
    };

    let location = statement[open + 1..close]
        .split(',')
        .filter_map(|v| {
            let mut kv = v.split('=');
            match (kv.next(), kv.next()) {
                (Some(k), Some(v)) if k.trim() == "location" => v.trim().parse().ok(),
                _ => None,
            }
        })
        .next();

    Ok((location, &statement[close + 1..]))
}

fn link(
    vs: &HeadlessShader,
    fs: &HeadlessShader,
) -> ::std::result::Result<HeadlessProgram, String> {
    if vs.stage != ShaderStage::Vertex || fs.stage != ShaderStage::Fragment {
        return Err("Program requires one vertex and one fragment shader.".into());
    }

    for (_, name) in &fs.inputs {
        if !vs.outputs.contains(name) {
            return Err(format!(
                "Fragment input `{}` is not written by the vertex shader.",
                name
            ));
        }
    }

    // Explicit locations are placed first, the others fill the free slots in
    // declaration order.
    let mut slots: Vec<Option<String>> = Vec::new();
    for (location, name) in &vs.inputs {
        if let Some(location) = *location {
            let location = location as usize;
            if slots.len() <= location {
                slots.resize(location + 1, None);
            }

            if let Some(ref other) = slots[location] {
                return Err(format!(
                    "Attributes `{}` and `{}` are bound to the same location {}.",
                    other, name, location
                ));
            }

            slots[location] = Some(name.clone());
        }
    }

    for (_, name) in vs.inputs.iter().filter(|v| v.0.is_none()) {
        match slots.iter().position(Option::is_none) {
            Some(free) => slots[free] = Some(name.clone()),
            None => slots.push(Some(name.clone())),
        }
    }

    Ok(HeadlessProgram { attributes: slots })
}

#[cfg(test)]
mod test {
    use super::*;

    const VS: &str = "
in vec3 a_position;
out vec3 v_position;

void main() {
    v_position = a_position;
    gl_Position = vec4(a_position, 1.0);
}
";

    const FS: &str = "
in vec3 v_position;
out vec4 frag_color;

void main() {
    frag_color = vec4(v_position, 1.0);
}
";

    #[test]
    fn reflect_interface() {
        let vs = reflect(ShaderStage::Vertex, VS).unwrap();
        assert_eq!(vs.inputs, vec![(None, "a_position".to_owned())]);
        assert_eq!(vs.outputs, vec!["v_position".to_owned()]);

        let fs = reflect(ShaderStage::Fragment, FS).unwrap();
        assert_eq!(fs.inputs, vec![(None, "v_position".to_owned())]);
        assert_eq!(fs.outputs, vec!["frag_color".to_owned()]);
    }

    #[test]
    fn reflect_layout_location() {
        let src = "layout(location = 2) in vec3 a_position;\nvoid main() {}";
        let vs = reflect(ShaderStage::Vertex, src).unwrap();
        assert_eq!(vs.inputs, vec![(Some(2), "a_position".to_owned())]);

        let fs = reflect(ShaderStage::Fragment, "out vec4 c;\nvoid main() {}").unwrap();
        let program = link(&vs, &fs).unwrap();
        assert_eq!(program.attributes[2], Some("a_position".to_owned()));
        assert_eq!(program.attributes[0], None);

        let src = "layout(location = 1) in vec3 a_position;\n\
                   layout(location = 0) in vec3 a_color;\n\
                   in vec2 a_texcoord;\n\
                   void main() {}";
        let vs = reflect(ShaderStage::Vertex, src).unwrap();
        let program = link(&vs, &fs).unwrap();
        assert_eq!(
            program.attributes,
            vec![
                Some("a_color".to_owned()),
                Some("a_position".to_owned()),
                Some("a_texcoord".to_owned()),
            ]
        );

        let src = "layout(location = 0) in vec3 a;\nlayout(location = 0) in vec3 b;\nvoid main() {}";
        let vs = reflect(ShaderStage::Vertex, src).unwrap();
        assert!(link(&vs, &fs).is_err());
    }

    #[test]
    fn reflect_syntax_errors() {
        assert!(reflect(ShaderStage::Vertex, "void main() {").is_err());
        assert!(reflect(ShaderStage::Vertex, "void main() )").is_err());
        assert!(reflect(ShaderStage::Vertex, "in vec3 a;").is_err());
        assert!(reflect(ShaderStage::Vertex, "in a;\nvoid main() {}").is_err());

        let src = "#define N 1\nvoid main() {\n    float v = (1.0;\n}";
        let log = reflect(ShaderStage::Vertex, src).unwrap_err();
        assert!(log.starts_with("ERROR: 0:4:"), "{}", log);
    }

    #[test]
    fn link_mismatched_interface() {
        let vs = reflect(ShaderStage::Vertex, "in vec3 a;\nvoid main() {}").unwrap();
        let fs = reflect(ShaderStage::Fragment, FS).unwrap();
        assert!(link(&vs, &fs).is_err());
        assert!(link(&fs, &vs).is_err());
    }
}
