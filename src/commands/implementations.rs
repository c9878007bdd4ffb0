//! # 网络服务实现 Tauri Commands
//!
//! - `append_implementation` - 追加指定类型的默认实现
//! - `remove_implementation` - 按标识移除实现
//! - `update_implementation_field` - 按标识更新实现的单个字段
//! - `list_implementations` - 获取实现面板列表
//!
//! 前端必须使用快照中的 `id` 引用条目，而不是数组下标。

use serde_json::Value;
use tauri::State;

use crate::models::implementation::{ImplementationId, ImplementationKind};
use crate::services::registry;
use crate::services::session::{EntryView, SessionSnapshot, SessionState};

/// 追加一个指定类型的实现，使用该类型的默认值
///
/// # 参数
/// - `kind` - 实现类型（`ReverseWebSocket` / `ForwardWebSocket` / `HttpPost` / `Http`）
///
/// # 返回值
/// 更新后的会话快照，新条目位于 `implementations` 末尾
#[tauri::command]
pub fn append_implementation(
    kind: ImplementationKind,
    state: State<'_, SessionState>,
) -> Result<SessionSnapshot, String> {
    state
        .write(|session| {
            session.append(kind);
            session.snapshot()
        })
        .map_err(|e| e.to_string())
}

/// 按标识移除实现
///
/// # 错误
/// 标识不存在（例如重复点击移除按钮）时返回错误，会话保持不变
#[tauri::command]
pub fn remove_implementation(
    id: ImplementationId,
    state: State<'_, SessionState>,
) -> Result<SessionSnapshot, String> {
    state
        .write(|session| {
            session.remove(id)?;
            session.snapshot()
        })
        .map_err(|e| e.to_string())
}

/// 更新实现的单个字段
///
/// # 参数
/// - `id` - 条目标识
/// - `field` - 外部字段名（如 `Port`、`HeartBeatEnable`）
/// - `value` - 新取值；数值字段可以直接传输入框中的原始文本，无法解析时取 0
///
/// # 错误
/// 标识不存在、字段名未知、字段不属于该条目的类型或取值类型不匹配时返回错误，会话保持不变
#[tauri::command]
pub fn update_implementation_field(
    id: ImplementationId,
    field: String,
    value: Value,
    state: State<'_, SessionState>,
) -> Result<SessionSnapshot, String> {
    let edit = registry::edit_from_parts(&field, value).map_err(|e| e.to_string())?;

    state
        .write(|session| {
            session.update_field(id, edit)?;
            session.snapshot()
        })
        .map_err(|e| e.to_string())
}

/// 获取实现面板列表（按输出顺序）
#[tauri::command]
pub fn list_implementations(state: State<'_, SessionState>) -> Result<Vec<EntryView>, String> {
    state
        .read(|session| Ok(session.entry_views()))
        .map_err(|e| e.to_string())
}
