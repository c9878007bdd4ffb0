//! # Lagrange Config Generator - Cargo 构建脚本
//!
//! 启用 `desktop` feature 时，由 Tauri 在编译主项目前完成构建准备工作：
//! - 生成 Tauri 运行时所需的资源绑定代码
//! - 处理应用图标、权限清单等静态资源
//! - 在 Windows 平台上生成应用程序清单（manifest）和资源文件（.rc）
//!
//! 未启用 `desktop` 时（仅构建文档核心），构建脚本不做任何事情。

/// 构建脚本入口函数
fn main() {
    #[cfg(feature = "desktop")]
    tauri_build::build()
}
