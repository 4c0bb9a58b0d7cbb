//! 统一错误处理模块
//!
//! ## 错误类型分层
//!
//! - `HandleError`: 句柄表层面的错误（过期、类型不符、已卸载、容量耗尽）
//! - `ArgError`: 单个脚本参数的解码错误
//! - `BridgeError`: 一次脚本调用的错误，携带函数名与参数位置
//! - `ScriptError`: 脚本引擎错误（求值、异常）
//! - `RayscriptError`: 运行器顶层错误
//!
//! 所有 `BridgeError` 都在原生调用之前抛出，唯一例外是
//! `BridgeError::Allocation`，它发生在原生调用之后、包装结果时。

use crate::bridge::handle::{HandleId, TypeTag};
use crate::config::ConfigError;
use thiserror::Error;

/// 句柄表错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    #[error("stale handle {0}")]
    Stale(HandleId),

    #[error("expected a {expected} handle, found a {found} handle")]
    TypeMismatch { expected: TypeTag, found: TypeTag },

    #[error("{0} handle used after unload")]
    Closed(TypeTag),

    #[error("handle table is full ({0} live handles)")]
    Exhausted(usize),
}

/// 参数解码错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgError {
    #[error("missing argument")]
    Missing,

    #[error("expected a number, found {0}")]
    NotNumeric(&'static str),

    #[error("expected a string, found {0}")]
    NotString(&'static str),

    #[error("expected an array, found {0}")]
    NotArray(&'static str),

    #[error("expected a Color handle or a number, found {0}")]
    NotColor(&'static str),

    #[error("expected a {expected} handle, found {found}")]
    NotHandle { expected: TypeTag, found: &'static str },

    #[error("expected a handle, found {0}")]
    NotAnyHandle(&'static str),

    #[error("null {0} handle")]
    Null(TypeTag),

    #[error("expected at least {expected} elements, found {found}")]
    TooShort { expected: usize, found: usize },

    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<ArgError>,
    },

    #[error(transparent)]
    Handle(#[from] HandleError),
}

impl ArgError {
    /// 是否属于句柄检查失败（空句柄、类型不符、过期、已卸载）
    pub fn is_handle_error(&self) -> bool {
        match self {
            ArgError::NotHandle { .. }
            | ArgError::NotAnyHandle(_)
            | ArgError::Null(_)
            | ArgError::Handle(_) => true,
            ArgError::Element { source, .. } => source.is_handle_error(),
            _ => false,
        }
    }
}

/// 错误种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 参数个数不足或类型无法转换
    Decode,
    /// 句柄为空、类型不符、过期或已卸载
    Handle,
    /// 原生调用之后无法包装结果
    Allocation,
    /// 函数已注册但未实现
    NotImplemented,
    /// 未知函数或字段
    Lookup,
}

/// 脚本调用错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BridgeError {
    #[error("{function}: expected at least {expected} arguments, found {found}")]
    Arity {
        function: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{function}: argument {index}: {source}")]
    Argument {
        function: &'static str,
        index: usize,
        #[source]
        source: ArgError,
    },

    #[error("{function}: cannot wrap result: {source}")]
    Allocation {
        function: &'static str,
        #[source]
        source: HandleError,
    },

    #[error("{0}: not implemented")]
    NotImplemented(&'static str),

    #[error("{0} is not a function")]
    UnknownFunction(String),

    #[error("{tag} has no field '{field}'")]
    UnknownField { tag: TypeTag, field: String },

    #[error("{tag}.{field} is read-only")]
    ReadOnlyField { tag: TypeTag, field: String },
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::Arity { .. } => ErrorKind::Decode,
            BridgeError::Argument { source, .. } if source.is_handle_error() => ErrorKind::Handle,
            BridgeError::Argument { .. } => ErrorKind::Decode,
            BridgeError::Allocation { .. } => ErrorKind::Allocation,
            BridgeError::NotImplemented(_) => ErrorKind::NotImplemented,
            BridgeError::UnknownFunction(_)
            | BridgeError::UnknownField { .. }
            | BridgeError::ReadOnlyField { .. } => ErrorKind::Lookup,
        }
    }
}

/// 脚本引擎错误
#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Script runtime error: {0}")]
    Runtime(String),

    #[error("Uncaught exception: {0}")]
    Exception(String),

    #[error("Script not found: {0}")]
    NotFound(String),
}

/// 运行器顶层错误
#[derive(Error, Debug)]
pub enum RayscriptError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Usage: {0}")]
    Usage(String),
}

pub type BridgeResult<T> = Result<T, BridgeError>;
pub type ArgResult<T> = Result<T, ArgError>;
pub type HandleResult<T> = Result<T, HandleError>;
pub type ScriptResult<T> = Result<T, ScriptError>;
pub type RayscriptResult<T> = Result<T, RayscriptError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        let err = BridgeError::Argument {
            function: "drawPixelV",
            index: 0,
            source: ArgError::Handle(HandleError::TypeMismatch {
                expected: TypeTag::Vector2,
                found: TypeTag::Color,
            }),
        };
        assert_eq!(err.kind(), ErrorKind::Handle);

        let err = BridgeError::Argument {
            function: "initWindow",
            index: 0,
            source: ArgError::NotNumeric("string"),
        };
        assert_eq!(err.kind(), ErrorKind::Decode);

        let nested = ArgError::Element {
            index: 2,
            source: Box::new(ArgError::NotHandle {
                expected: TypeTag::Vector2,
                found: "number",
            }),
        };
        assert!(nested.is_handle_error());
    }

    #[test]
    fn test_error_display() {
        let err = BridgeError::Argument {
            function: "drawLineStrip",
            index: 0,
            source: ArgError::Element {
                index: 3,
                source: Box::new(ArgError::Null(TypeTag::Vector2)),
            },
        };
        assert_eq!(
            err.to_string(),
            "drawLineStrip: argument 0: element 3: null Vector2 handle"
        );
        assert_eq!(
            BridgeError::NotImplemented("loadImagePro").to_string(),
            "loadImagePro: not implemented"
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let err: RayscriptError = ConfigError::ValidationError("bad".to_string()).into();
        assert!(matches!(err, RayscriptError::Config(_)));
    }
}
