use std::fmt;

use failure::Fail;

use crate::video::assets::ShaderStage;

/// The kinds of GPU objects a backend may fail to allocate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Resource {
    Shader(ShaderStage),
    Program,
    Buffer,
    VertexArray,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Resource::Shader(stage) => write!(f, "{} shader", stage),
            Resource::Program => write!(f, "program"),
            Resource::Buffer => write!(f, "buffer"),
            Resource::VertexArray => write!(f, "vertex array"),
        }
    }
}

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "Surface `{}` does not exist.", _0)]
    SurfaceNotFound(String),
    #[fail(display = "Context {} is not supported. {}", _0, _1)]
    ContextUnsupported(String, String),
    #[fail(display = "Unable to create {} object.", _0)]
    NullResourceHandle(Resource),
    #[fail(
        display = "Failed to compile {} shader, errors: \n{}\nsource: \n{}",
        stage, log, source
    )]
    CompileFailure {
        stage: ShaderStage,
        source: String,
        log: String,
    },
    #[fail(display = "Failed to link shader program, errors: \n{}.", _0)]
    LinkFailure(String),
    #[fail(display = "Attribute({:?}) is undefined in shader sources.", _0)]
    AttributeUndefined(String),
    #[fail(display = "{} is invalid.", _0)]
    HandleInvalid(String),
    #[fail(display = "Can not enter {} from {}, expects {}.", to, actual, expected)]
    StageMismatch {
        to: String,
        expected: String,
        actual: String,
    },
    #[fail(display = "{}", _0)]
    Backend(String),
    #[fail(display = "Glutin: {}", _0)]
    Glutin(String),
}

pub type Result<T> = ::std::result::Result<T, Error>;

#[cfg(not(target_arch = "wasm32"))]
impl From<glutin::ContextError> for Error {
    fn from(err: glutin::ContextError) -> Error {
        Error::Glutin(format!("{}", err))
    }
}

macro_rules! bail {
    ($e:expr) => {
        return Err($crate::errors::Error::Backend(format!("{}", $e)))
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::errors::Error::Backend(format!($fmt, $($arg)+)))
    };
}
