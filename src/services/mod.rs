//! # 业务逻辑服务模块
//!
//! 包含文档核心的全部逻辑，与 Tauri command 层解耦，可在无图形环境下测试：
//! - `document` - 基础配置文档的写时复制状态与字段编辑
//! - `registry` - 网络服务实现注册表：稳定标识分配、按标识增删改
//! - `serializer` - 将文档与实现列表合并为最终配置文本
//! - `session` - 编辑会话与 Tauri managed state 容器

pub mod document;
pub mod registry;
pub mod serializer;
pub mod session;
