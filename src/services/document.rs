//! # 基础配置文档服务
//!
//! 以写时复制的方式维护当前的 `ConfigDocument`：
//! 每次编辑都从旧快照生成一个仅目标字段不同的新文档，旧快照保持不变。
//! 当前快照存放在 `Arc` 中，前端层可以通过 `Arc::ptr_eq` 廉价地判断文档是否发生变化。

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::EditorError;
use crate::models::document::{ConfigDocument, DocumentEdit};

/// 当前会话的基础配置文档状态
#[derive(Debug, Clone)]
pub struct DocumentState {
    current: Arc<ConfigDocument>,
}

impl DocumentState {
    /// 以默认值创建文档
    pub fn new() -> Self {
        Self {
            current: Arc::new(ConfigDocument::default()),
        }
    }

    /// 返回当前快照（共享引用，克隆开销为一次引用计数）
    pub fn get(&self) -> Arc<ConfigDocument> {
        Arc::clone(&self.current)
    }

    pub fn current(&self) -> &ConfigDocument {
        &self.current
    }

    /// 应用一次字段编辑
    ///
    /// # 返回值
    /// 文档是否发生了变化。取值与当前相同时不会替换快照。
    pub fn update(&mut self, edit: DocumentEdit) -> bool {
        let path = edit.path();
        let next = apply_edit(&self.current, edit);
        if next == *self.current {
            return false;
        }

        self.current = Arc::new(next);
        log::debug!("配置字段已更新: {}", path);
        true
    }
}

impl Default for DocumentState {
    fn default() -> Self {
        Self::new()
    }
}

/// 生成一个仅目标字段被替换的新文档
///
/// 此函数不会失败：编辑指令的类型已保证取值与字段匹配，
/// 数值字段按宽松约定解析。
pub fn apply_edit(document: &ConfigDocument, edit: DocumentEdit) -> ConfigDocument {
    let mut next = document.clone();
    match edit {
        DocumentEdit::DefaultLogLevel(level) => next.logging.log_level.default = level,
        DocumentEdit::SignServerUrl(url) => next.sign_server_url = url,
        DocumentEdit::SignProxyUrl(url) => next.sign_proxy_url = url,
        DocumentEdit::MusicSignServerUrl(url) => next.music_sign_server_url = url,
        DocumentEdit::Uin(input) => next.account.uin = input.to_u64(),
        DocumentEdit::Password(password) => next.account.password = password,
        DocumentEdit::Protocol(protocol) => next.account.protocol = protocol,
        DocumentEdit::AutoReconnect(enabled) => next.account.auto_reconnect = enabled,
        DocumentEdit::GetOptimumServer(enabled) => next.account.get_optimum_server = enabled,
        DocumentEdit::IgnoreSelf(enabled) => next.message.ignore_self = enabled,
        DocumentEdit::StringPost(enabled) => next.message.string_post = enabled,
        DocumentEdit::ConsoleCompatibilityMode(enabled) => {
            next.qr_code.console_compatibility_mode = enabled
        }
    }
    next
}

/// 由字段路径和原始 JSON 取值构造编辑指令
///
/// 供以字符串寻址字段的调用方（IPC 层）使用。
///
/// # 错误
/// - 路径不在 `DocumentEdit::PATHS` 中时返回 `UnknownField`
/// - 取值的 JSON 类型与字段不匹配时返回 `InvalidValue`
pub fn edit_from_parts(path: &str, value: Value) -> Result<DocumentEdit, EditorError> {
    if !DocumentEdit::PATHS.contains(&path) {
        return Err(EditorError::UnknownField(path.to_string()));
    }

    serde_json::from_value(json!({ "path": path, "value": value })).map_err(|e| {
        EditorError::InvalidValue {
            field: path.to_string(),
            reason: e.to_string(),
        }
    })
}
