//! # 数据模型模块
//!
//! 定义与 Lagrange.OneBot 配置文件结构一一对应的 Rust 数据结构，
//! 以及前端表单发出的编辑指令。
//! - `document` - 基础配置文档（日志、签名、账号、消息、二维码）
//! - `implementation` - 网络服务实现（四种互斥类型）及其条目标识

pub mod document;
pub mod implementation;
