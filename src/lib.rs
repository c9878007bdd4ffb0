//! # Lagrange Config Generator - 应用核心
//!
//! 以表单的方式逐步编辑 Lagrange.OneBot 的 `appsettings.json`，
//! 并保证任何时刻生成的 JSON 都是完整、合法且稳定的。
//!
//! ## 模块结构
//! - `models/` - 数据模型（配置文档、网络服务实现、编辑指令）
//! - `services/` - 核心业务逻辑（文档状态、实现注册表、序列化、编辑会话）
//! - `utils/` - 通用工具函数（宽松数值解析）
//! - `error` - 核心错误类型
//! - `commands/` - Tauri command 处理函数（IPC 接口层，仅 `desktop` feature）
//!
//! ## 架构说明
//! 文档核心不依赖 Tauri；桌面外壳位于 `desktop` feature 之后，
//! 通过将初始化逻辑放在 `lib.rs` 而非 `main.rs` 中，桌面端与移动端入口可以共享它。

#[cfg(feature = "desktop")]
mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(feature = "desktop")]
use services::session::SessionState;

/// Tauri 应用启动函数
///
/// 1. 注册编辑会话为全局状态（`SessionState`）
/// 2. 注册所有自定义 Tauri commands
/// 3. 在 `setup` 钩子中按需注册调试专用的日志插件
/// 4. 生成应用上下文并启动主事件循环
///
/// # Panics
/// 如果 Tauri 应用启动失败（例如配置文件缺失或窗口创建失败），
/// 将通过 `.expect()` 触发 panic 并输出错误信息。
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        // 每个窗口进程一个编辑会话，所有 command 通过 `State<SessionState>` 访问
        .manage(SessionState::new())
        .invoke_handler(tauri::generate_handler![
            // 基础配置与会话 commands
            commands::document::get_session,
            commands::document::update_document_field,
            commands::document::render_config,
            commands::document::reset_session,
            // 网络服务实现 commands
            commands::implementations::append_implementation,
            commands::implementations::remove_implementation,
            commands::implementations::update_implementation_field,
            commands::implementations::list_implementations,
        ])
        .setup(|app| {
            // 仅在开发调试模式下启用日志插件
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            log::info!("编辑会话已创建");
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
