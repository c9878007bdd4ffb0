//! # 基础配置与会话 Tauri Commands
//!
//! - `get_session` - 获取当前会话快照（表单数据、实现面板、预览文本）
//! - `update_document_field` - 按字段路径更新基础配置
//! - `render_config` - 获取当前配置文本
//! - `reset_session` - 丢弃当前会话并恢复默认值

use serde_json::Value;
use tauri::State;

use crate::services::document;
use crate::services::session::{SessionSnapshot, SessionState};

/// 获取当前会话快照
///
/// 前端在窗口加载完成后调用一次，用于初始化表单。
#[tauri::command]
pub fn get_session(state: State<'_, SessionState>) -> Result<SessionSnapshot, String> {
    state
        .read(|session| session.snapshot())
        .map_err(|e| e.to_string())
}

/// 更新基础配置中的单个字段
///
/// # 参数
/// - `path` - 字段路径（如 `account.uin`、`logging.defaultLevel`）
/// - `value` - 新取值；数值字段可以直接传输入框中的原始文本，无法解析时取 0
///
/// # 返回值
/// 更新后的会话快照
///
/// # 错误
/// 字段路径未知或取值的 JSON 类型与字段不匹配时返回错误，会话保持不变
#[tauri::command]
pub fn update_document_field(
    path: String,
    value: Value,
    state: State<'_, SessionState>,
) -> Result<SessionSnapshot, String> {
    let edit = document::edit_from_parts(&path, value).map_err(|e| e.to_string())?;

    state
        .write(|session| {
            session.update_document(edit);
            session.snapshot()
        })
        .map_err(|e| e.to_string())
}

/// 获取当前配置文本（4 空格缩进），供前端复制到剪贴板
#[tauri::command]
pub fn render_config(state: State<'_, SessionState>) -> Result<String, String> {
    state
        .read(|session| session.render())
        .map_err(|e| e.to_string())
}

/// 丢弃当前会话，恢复默认配置和初始实现条目
#[tauri::command]
pub fn reset_session(state: State<'_, SessionState>) -> Result<SessionSnapshot, String> {
    state.reset().map_err(|e| e.to_string())?;
    state
        .read(|session| session.snapshot())
        .map_err(|e| e.to_string())
}
