use wasm_bindgen::JsCast;
use web_sys::WebGl2RenderingContext as WebGL;
use web_sys::{self, HtmlCanvasElement, WebGlBuffer, WebGlProgram, WebGlShader};

use crate::errors::*;
use crate::settings::Settings;
use crate::utils::prelude::{Color, ObjectVec};
use crate::video::assets::*;

use super::super::Visitor;

/// Prepended to every shader source, WebGL2 only accepts GLSL ES 3.00 with an
/// explicit default float precision in fragment shaders.
const SHADER_HEADER: &str = "#version 300 es\nprecision mediump float;\n";

pub struct WebGLVisitor {
    ctx: WebGL,
    shaders: ObjectVec<WebGlShader>,
    programs: ObjectVec<WebGlProgram>,
    buffers: ObjectVec<WebGlBuffer>,
}

impl WebGLVisitor {
    /// Locates the canvas `settings.surface` and creates the rendering
    /// context of `settings.version` on it.
    pub unsafe fn new(settings: &Settings) -> Result<Self> {
        let window =
            web_sys::window().ok_or_else(|| Error::Backend("No global `window` exists.".into()))?;
        let document = window
            .document()
            .ok_or_else(|| Error::Backend("Should have a document on window.".into()))?;

        let canvas = document
            .query_selector(&settings.surface)
            .ok()
            .and_then(|v| v)
            .ok_or_else(|| Error::SurfaceNotFound(settings.surface.clone()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::SurfaceNotFound(settings.surface.clone()))?;

        let name = settings.version.web_context_name().ok_or_else(|| {
            Error::ContextUnsupported(
                settings.version.to_string(),
                "Browsers only expose it as WebGL2.".into(),
            )
        })?;

        let unsupported = || {
            Error::ContextUnsupported(
                settings.version.to_string(),
                format!("`getContext(\"{}\")` returns nothing.", name),
            )
        };

        let ctx = canvas
            .get_context(name)
            .map_err(|_| unsupported())?
            .ok_or_else(unsupported)?
            .dyn_into::<WebGL>()
            .map_err(|_| unsupported())?;

        info!("Acquired {} context on `{}`.", name, settings.surface);

        Ok(WebGLVisitor {
            ctx,
            shaders: ObjectVec::new(),
            programs: ObjectVec::new(),
            buffers: ObjectVec::new(),
        })
    }
}

impl Visitor for WebGLVisitor {
    unsafe fn create_shader(&mut self, stage: ShaderStage, src: &str) -> Result<ShaderHandle> {
        let shader = Self::compile(&self.ctx, stage, src)?;
        Ok(self.shaders.create(shader))
    }

    unsafe fn create_program(
        &mut self,
        vs: ShaderHandle,
        fs: ShaderHandle,
    ) -> Result<ProgramHandle> {
        let vs = self
            .shaders
            .get(vs)
            .ok_or_else(|| Error::HandleInvalid(vs.to_string()))?;
        let fs = self
            .shaders
            .get(fs)
            .ok_or_else(|| Error::HandleInvalid(fs.to_string()))?;

        let program = Self::link(&self.ctx, &[vs, fs])?;
        Ok(self.programs.create(program))
    }

    unsafe fn attribute_location(&mut self, program: ProgramHandle, name: &str) -> Result<u32> {
        let program = self
            .programs
            .get(program)
            .ok_or_else(|| Error::HandleInvalid(program.to_string()))?;

        let location = self.ctx.get_attrib_location(program, name);
        check(&self.ctx)?;

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
        let id = self
            .ctx
            .create_buffer()
            .ok_or(Error::NullResourceHandle(Resource::Buffer))?;

        self.ctx.bind_buffer(WebGL::ARRAY_BUFFER, Some(&id));
        self.ctx
            .buffer_data_with_u8_array(WebGL::ARRAY_BUFFER, bytes, hint.into());
        check(&self.ctx)?;

        Ok(self.buffers.create(id))
    }

    unsafe fn bind_vertex_attribute(
        &mut self,
        buffer: BufferHandle,
        location: u32,
        attribute: VertexAttribute,
    ) -> Result<()> {
        let id = self
            .buffers
            .get(buffer)
            .ok_or_else(|| Error::HandleInvalid(buffer.to_string()))?;

        self.ctx.bind_buffer(WebGL::ARRAY_BUFFER, Some(id));
        self.ctx.vertex_attrib_pointer_with_i32(
            location,
            i32::from(attribute.size),
            attribute.format.into(),
            attribute.normalized,
            attribute.stride as i32,
            attribute.offset as i32,
        );
        self.ctx.enable_vertex_attrib_array(location);
        check(&self.ctx)
    }

    unsafe fn clear(&mut self, color: Color) -> Result<()> {
        self.ctx.clear_color(color.0, color.1, color.2, color.3);
        self.ctx.clear(WebGL::COLOR_BUFFER_BIT);
        check(&self.ctx)
    }

    unsafe fn use_program(&mut self, program: ProgramHandle) -> Result<()> {
        let id = self
            .programs
            .get(program)
            .ok_or_else(|| Error::HandleInvalid(program.to_string()))?;

        self.ctx.use_program(Some(id));
        check(&self.ctx)
    }

    unsafe fn draw(&mut self, primitive: Primitive, first: u32, count: u32) -> Result<u32> {
        self.ctx
            .draw_arrays(primitive.into(), first as i32, count as i32);
        check(&self.ctx)?;
        Ok(primitive.assemble(count))
    }

    unsafe fn flush(&mut self) -> Result<()> {
        self.ctx.finish();
        Ok(())
    }
}

impl WebGLVisitor {
    unsafe fn compile(ctx: &WebGL, stage: ShaderStage, src: &str) -> Result<WebGlShader> {
        let shader = ctx
            .create_shader(stage.into())
            .ok_or(Error::NullResourceHandle(Resource::Shader(stage)))?;

        let source = format!("{}{}", SHADER_HEADER, src);
        ctx.shader_source(&shader, &source);
        ctx.compile_shader(&shader);

        if ctx
            .get_shader_parameter(&shader, WebGL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            Ok(shader)
        } else {
            let log = ctx
                .get_shader_info_log(&shader)
                .unwrap_or_else(|| "Unknown error creating shader".into());

            ctx.delete_shader(Some(&shader));
            Err(Error::CompileFailure { stage, source, log })
        }
    }

    unsafe fn link(ctx: &WebGL, shaders: &[&WebGlShader]) -> Result<WebGlProgram> {
        let program = ctx
            .create_program()
            .ok_or(Error::NullResourceHandle(Resource::Program))?;

        for shader in shaders {
            ctx.attach_shader(&program, shader)
        }
        ctx.link_program(&program);

        if ctx
            .get_program_parameter(&program, WebGL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            Ok(program)
        } else {
            let err = ctx
                .get_program_info_log(&program)
                .unwrap_or_else(|| "Unknown error creating program object".into());

            ctx.delete_program(Some(&program));
            Err(Error::LinkFailure(err))
        }
    }
}

unsafe fn check(ctx: &WebGL) -> Result<()> {
    match ctx.get_error() {
        WebGL::NO_ERROR => Ok(()),

        WebGL::INVALID_ENUM => {
            bail!("[WebGL] An unacceptable value is specified for an enumerated argument.")
        }

        WebGL::INVALID_VALUE => bail!("[WebGL] A numeric argument is out of range."),

        WebGL::INVALID_OPERATION => {
            bail!("[WebGL] The specified operation is not allowed in the current state.")
        }

        WebGL::INVALID_FRAMEBUFFER_OPERATION => bail!(
            "[WebGL] The command is trying to render to or read from the framebuffer while the \
             currently bound framebuffer is not framebuffer complete."
        ),

        WebGL::OUT_OF_MEMORY => {
            bail!("[WebGL] There is not enough memory left to execute the command.")
        }

        WebGL::CONTEXT_LOST_WEBGL => bail!("[WebGL] The context has been lost."),

        _ => bail!("[WebGL] Oops, Unknown OpenGL error."),
    }
}
