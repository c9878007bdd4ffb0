//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数，是前端表单与文档核心之间的 IPC 接口层。
//! 每个子模块对应一个功能域：
//! - `document` - 基础配置字段编辑、预览渲染与会话重置
//! - `implementations` - 网络服务实现的增删改查
//!
//! 核心错误在此层统一转换为字符串返回给前端。

pub mod document;
pub mod implementations;
