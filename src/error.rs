//! # 编辑器错误类型
//!
//! 文档核心的所有失败都局限于单次操作：操作要么完整生效，要么不产生任何影响，
//! 不存在导致会话终止的错误。IPC 层通过 `Display` 将其转换为字符串返回给前端。
//!
//! 数值字段的宽松解析（非法文本取 0）不属于错误，见 `utils::numeric`。

use thiserror::Error;

use crate::models::implementation::{ImplementationField, ImplementationId, ImplementationKind};

#[derive(Debug, Error)]
pub enum EditorError {
    /// 标识不存在：删除时为无效操作，更新时为前置条件违规
    #[error("未找到实现条目 {0}")]
    NotFound(ImplementationId),

    /// 字段不属于条目当前的类型
    #[error("{kind} 实现不包含字段 {field}（条目 {id}）")]
    FieldNotInVariant {
        id: ImplementationId,
        kind: ImplementationKind,
        field: ImplementationField,
    },

    /// 字段名或字段路径无法识别
    #[error("未知字段: {0}")]
    UnknownField(String),

    /// 取值的 JSON 类型与字段不匹配
    #[error("字段 {field} 的取值无效: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("序列化配置失败: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("配置文本编码失败: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// 会话状态锁在持有期间发生了 panic
    #[error("会话状态锁已损坏")]
    StatePoisoned,
}
