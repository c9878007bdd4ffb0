//! # 基础配置文档数据模型
//!
//! 定义 Lagrange.OneBot `appsettings.json` 中除网络服务实现列表以外的全部固定字段，
//! 以及前端表单发出的字段级编辑指令（`DocumentEdit`）。
//!
//! 序列化时使用运行时要求的外部字段名（PascalCase，如 `SignServerUrl`），
//! 字段声明顺序即输出顺序，保证生成的 JSON 在多次渲染之间逐字节一致。

use serde::{Deserialize, Serialize};

use crate::utils::numeric::NumericInput;

/// 配置文档 `$schema` 字段的固定取值
///
/// Lagrange.OneBot 基于 .NET 通用主机，配置文件沿用 ASP.NET Core `appsettings.json` 的结构，
/// 因此引用 SchemaStore 中对应的公共 schema，便于编辑器提供补全。运行时本身忽略此字段。
pub const DEFAULT_SCHEMA_REF: &str = "https://json.schemastore.org/appsettings.json";

/// 默认签名服务器地址
pub const DEFAULT_SIGN_SERVER_URL: &str = "https://sign.lagrangecore.org/api/sign";

/// 完整的基础配置文档
///
/// 所有字段都是必填的：外部 schema 要求任何时刻都是一份完整文档，
/// 因此这里不存在 `Option` 字段，编辑过程中也不会出现半成品状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConfigDocument {
    /// 外部 schema 引用
    #[serde(rename = "$schema")]
    pub schema_ref: String,

    /// 日志设定
    pub logging: LoggingSettings,

    /// 签名服务器地址
    pub sign_server_url: String,

    /// 签名代理服务器地址（仅支持 HTTP 代理），为空表示直连
    pub sign_proxy_url: String,

    /// 音乐卡片签名服务器地址
    pub music_sign_server_url: String,

    /// 账号设定
    pub account: AccountSettings,

    /// 消息上报设定
    pub message: MessageSettings,

    /// 登录二维码显示设定
    pub qr_code: QrCodeSettings,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            schema_ref: DEFAULT_SCHEMA_REF.to_string(),
            logging: LoggingSettings::default(),
            sign_server_url: DEFAULT_SIGN_SERVER_URL.to_string(),
            sign_proxy_url: String::new(),
            music_sign_server_url: String::new(),
            account: AccountSettings::default(),
            message: MessageSettings::default(),
            qr_code: QrCodeSettings::default(),
        }
    }
}

/// `Logging` 节点
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LoggingSettings {
    pub log_level: LogLevelSettings,
}

/// `Logging.LogLevel` 节点
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogLevelSettings {
    /// 默认日志等级，上报 Issue 时应设置为 `Trace`
    pub default: LogLevel,
}

/// .NET 日志等级
///
/// 变体名即运行时接受的字符串取值。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Information,
    Warning,
    Error,
    Critical,
    None,
}

/// `Account` 节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountSettings {
    /// QQ 号
    pub uin: u64,

    /// 密码，留空时运行时使用扫码登录
    pub password: String,

    /// 登录协议
    pub protocol: Protocol,

    /// 掉线后是否自动重连
    pub auto_reconnect: bool,

    /// 是否自动选择最优服务器
    pub get_optimum_server: bool,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            uin: 0,
            password: String::new(),
            protocol: Protocol::default(),
            auto_reconnect: true,
            get_optimum_server: true,
        }
    }
}

/// 登录协议
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    #[default]
    Linux,
    MacOs,
    Windows,
}

/// `Message` 节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageSettings {
    /// 忽略自身发送的消息
    pub ignore_self: bool,

    /// 以 CQ 码字符串形式上报消息
    pub string_post: bool,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            ignore_self: true,
            string_post: false,
        }
    }
}

/// `QrCode` 节点
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QrCodeSettings {
    /// 控制台兼容模式：二维码显示异常时可尝试启用
    pub console_compatibility_mode: bool,
}

/// 针对基础配置文档的单字段编辑指令
///
/// 每个变体对应一条字段路径，并携带该字段语义类型的取值，
/// 因此“路径与取值类型不匹配”在类型层面就无法构造。
///
/// 前端通过 IPC 以相邻标签的形式传入：
/// ```json
/// { "path": "account.uin", "value": "10001" }
/// ```
/// 数值字段既可以接收 JSON 数字，也可以接收输入框中的原始文本（见 `NumericInput`）。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "path", content = "value")]
pub enum DocumentEdit {
    #[serde(rename = "logging.defaultLevel")]
    DefaultLogLevel(LogLevel),
    #[serde(rename = "signServerUrl")]
    SignServerUrl(String),
    #[serde(rename = "signProxyUrl")]
    SignProxyUrl(String),
    #[serde(rename = "musicSignServerUrl")]
    MusicSignServerUrl(String),
    #[serde(rename = "account.uin")]
    Uin(NumericInput),
    #[serde(rename = "account.password")]
    Password(String),
    #[serde(rename = "account.protocol")]
    Protocol(Protocol),
    #[serde(rename = "account.autoReconnect")]
    AutoReconnect(bool),
    #[serde(rename = "account.getOptimumServer")]
    GetOptimumServer(bool),
    #[serde(rename = "message.ignoreSelf")]
    IgnoreSelf(bool),
    #[serde(rename = "message.stringPost")]
    StringPost(bool),
    #[serde(rename = "qrCode.consoleCompatibilityMode")]
    ConsoleCompatibilityMode(bool),
}

impl DocumentEdit {
    /// 所有可编辑的字段路径，顺序与表单中的出现顺序一致
    pub const PATHS: [&'static str; 12] = [
        "logging.defaultLevel",
        "signServerUrl",
        "signProxyUrl",
        "musicSignServerUrl",
        "account.uin",
        "account.password",
        "account.protocol",
        "account.autoReconnect",
        "account.getOptimumServer",
        "message.ignoreSelf",
        "message.stringPost",
        "qrCode.consoleCompatibilityMode",
    ];

    /// 该编辑指令作用的字段路径
    pub fn path(&self) -> &'static str {
        match self {
            Self::DefaultLogLevel(_) => "logging.defaultLevel",
            Self::SignServerUrl(_) => "signServerUrl",
            Self::SignProxyUrl(_) => "signProxyUrl",
            Self::MusicSignServerUrl(_) => "musicSignServerUrl",
            Self::Uin(_) => "account.uin",
            Self::Password(_) => "account.password",
            Self::Protocol(_) => "account.protocol",
            Self::AutoReconnect(_) => "account.autoReconnect",
            Self::GetOptimumServer(_) => "account.getOptimumServer",
            Self::IgnoreSelf(_) => "message.ignoreSelf",
            Self::StringPost(_) => "message.stringPost",
            Self::ConsoleCompatibilityMode(_) => "qrCode.consoleCompatibilityMode",
        }
    }
}
