//! # 通用工具函数
//!
//! - `numeric` - 表单数值输入的宽松解析

pub mod numeric;
