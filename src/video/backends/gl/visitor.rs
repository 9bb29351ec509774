use std::ffi::CString;
use std::ptr;

use gl::types::*;

use crate::errors::*;
use crate::utils::prelude::{Color, ObjectVec};
use crate::video::assets::*;

use super::super::Visitor;

/// Prepended to every shader source. The stage bodies are written against
/// GLSL 3.30, which desktop core profiles accept.
const SHADER_HEADER: &str = "#version 330 core\n";

pub struct GLVisitor {
    shaders: ObjectVec<GLuint>,
    programs: ObjectVec<GLuint>,
    buffers: ObjectVec<GLuint>,
    vao: Option<GLuint>,
}

impl GLVisitor {
    /// Creates a visitor that submits commands to the current context.
    ///
    /// # Unsafe
    ///
    /// The GL functions must have been loaded from a context that is current
    /// on this thread.
    pub unsafe fn new() -> Result<Self> {
        check()?;

        Ok(GLVisitor {
            shaders: ObjectVec::new(),
            programs: ObjectVec::new(),
            buffers: ObjectVec::new(),
            vao: None,
        })
    }
}

impl Visitor for GLVisitor {
    unsafe fn create_shader(&mut self, stage: ShaderStage, src: &str) -> Result<ShaderHandle> {
        let id = Self::compile(stage, src)?;
        Ok(self.shaders.create(id))
    }

    unsafe fn create_program(
        &mut self,
        vs: ShaderHandle,
        fs: ShaderHandle,
    ) -> Result<ProgramHandle> {
        let vs = *self
            .shaders
            .get(vs)
            .ok_or_else(|| Error::HandleInvalid(vs.to_string()))?;
        let fs = *self
            .shaders
            .get(fs)
            .ok_or_else(|| Error::HandleInvalid(fs.to_string()))?;

        let id = Self::link(&[vs, fs])?;
        Ok(self.programs.create(id))
    }

    unsafe fn attribute_location(&mut self, program: ProgramHandle, name: &str) -> Result<u32> {
        let id = *self
            .programs
            .get(program)
            .ok_or_else(|| Error::HandleInvalid(program.to_string()))?;

        let c_name =
            CString::new(name.as_bytes()).map_err(|_| Error::AttributeUndefined(name.into()))?;
        let location = gl::GetAttribLocation(id, c_name.as_ptr());
        check()?;

        if location >= 0 {
            Ok(location as u32)
        } else {
            Err(Error::AttributeUndefined(name.into()))
        }
    }

    unsafe fn create_vertex_buffer(
        &mut self,
        hint: BufferHint,
        bytes: &[u8],
    ) -> Result<BufferHandle> {
        let mut id = 0;
        gl::GenBuffers(1, &mut id);
        if id == 0 {
            return Err(Error::NullResourceHandle(Resource::Buffer));
        }

        gl::BindBuffer(gl::ARRAY_BUFFER, id);
        gl::BufferData(
            gl::ARRAY_BUFFER,
            bytes.len() as GLsizeiptr,
            bytes.as_ptr() as *const _,
            hint.into(),
        );
        check()?;

        Ok(self.buffers.create(id))
    }

    unsafe fn bind_vertex_attribute(
        &mut self,
        buffer: BufferHandle,
        location: u32,
        attribute: VertexAttribute,
    ) -> Result<()> {
        let id = *self
            .buffers
            .get(buffer)
            .ok_or_else(|| Error::HandleInvalid(buffer.to_string()))?;

        // Core profiles refuse attribute pointers without a bound vertex array.
        if self.vao.is_none() {
            let mut vao = 0;
            gl::GenVertexArrays(1, &mut vao);
            if vao == 0 {
                return Err(Error::NullResourceHandle(Resource::VertexArray));
            }

            gl::BindVertexArray(vao);
            self.vao = Some(vao);
        }

        gl::BindBuffer(gl::ARRAY_BUFFER, id);
        gl::VertexAttribPointer(
            location as GLuint,
            GLint::from(attribute.size),
            attribute.format.into(),
            if attribute.normalized {
                gl::TRUE
            } else {
                gl::FALSE
            },
            attribute.stride as GLsizei,
            attribute.offset as usize as *const _,
        );
        gl::EnableVertexAttribArray(location as GLuint);
        check()
    }

    unsafe fn clear(&mut self, color: Color) -> Result<()> {
        gl::ClearColor(color.0, color.1, color.2, color.3);
        gl::Clear(gl::COLOR_BUFFER_BIT);
        check()
    }

    unsafe fn use_program(&mut self, program: ProgramHandle) -> Result<()> {
        let id = *self
            .programs
            .get(program)
            .ok_or_else(|| Error::HandleInvalid(program.to_string()))?;

        gl::UseProgram(id);
        check()
    }

    unsafe fn draw(&mut self, primitive: Primitive, first: u32, count: u32) -> Result<u32> {
        gl::DrawArrays(primitive.into(), first as GLint, count as GLsizei);
        check()?;
        Ok(primitive.assemble(count))
    }

    unsafe fn flush(&mut self) -> Result<()> {
        gl::Finish();
        Ok(())
    }
}

impl GLVisitor {
    unsafe fn compile(stage: ShaderStage, src: &str) -> Result<GLuint> {
        let source = format!("{}{}", SHADER_HEADER, src);
        let c_str = CString::new(source.as_bytes()).map_err(|_| Error::CompileFailure {
            stage,
            source: source.clone(),
            log: "Shader source contains an interior nul byte.".into(),
        })?;

        let shader = gl::CreateShader(stage.into());
        if shader == 0 {
            return Err(Error::NullResourceHandle(Resource::Shader(stage)));
        }

        gl::ShaderSource(shader, 1, &c_str.as_ptr(), ptr::null());
        gl::CompileShader(shader);

        let mut status = GLint::from(gl::FALSE);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);

        if status != GLint::from(gl::TRUE) {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let log = info_log(len, |len, buf| {
                gl::GetShaderInfoLog(shader, len, ptr::null_mut(), buf)
            });

            gl::DeleteShader(shader);
            Err(Error::CompileFailure { stage, source, log })
        } else {
            Ok(shader)
        }
    }

    unsafe fn link(shaders: &[GLuint]) -> Result<GLuint> {
        let program = gl::CreateProgram();
        if program == 0 {
            return Err(Error::NullResourceHandle(Resource::Program));
        }

        for &shader in shaders {
            gl::AttachShader(program, shader)
        }

        gl::LinkProgram(program);

        let mut status = GLint::from(gl::FALSE);
        gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);

        if status != GLint::from(gl::TRUE) {
            let mut len: GLint = 0;
            gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
            let log = info_log(len, |len, buf| {
                gl::GetProgramInfoLog(program, len, ptr::null_mut(), buf)
            });

            gl::DeleteProgram(program);
            Err(Error::LinkFailure(log))
        } else {
            Ok(program)
        }
    }
}

/// Reads an info log of `len` bytes, including the trailing nul character.
unsafe fn info_log<F>(len: GLint, read: F) -> String
where
    F: FnOnce(GLsizei, *mut GLchar),
{
    if len <= 1 {
        return "Unknown error.".into();
    }

    let mut buf = vec![0u8; len as usize];
    read(len, buf.as_mut_ptr() as *mut GLchar);
    buf.truncate(len as usize - 1);
    String::from_utf8_lossy(&buf).into_owned()
}

unsafe fn check() -> Result<()> {
    match gl::GetError() {
        gl::NO_ERROR => Ok(()),

        gl::INVALID_ENUM => {
            bail!("[GL] An unacceptable value is specified for an enumerated argument.")
        }

        gl::INVALID_VALUE => bail!("[GL] A numeric argument is out of range."),

        gl::INVALID_OPERATION => {
            bail!("[GL] The specified operation is not allowed in the current state.")
        }

        gl::INVALID_FRAMEBUFFER_OPERATION => bail!(
            "[GL] The command is trying to render to or read from the framebuffer while the \
             currently bound framebuffer is not framebuffer complete."
        ),

        gl::OUT_OF_MEMORY => bail!("[GL] There is not enough memory left to execute the command."),
        _ => bail!("[GL] Oops, Unknown OpenGL error."),
    }
}
