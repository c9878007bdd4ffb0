//! # 网络服务实现数据模型
//!
//! Lagrange.OneBot 的 `Implementations` 数组由四种互斥的服务实现组成，
//! 每个元素通过 `Type` 字段区分：
//!
//! | Type | 字段 |
//! |------|------|
//! | `ReverseWebSocket` | Host, Port, Suffix, ReconnectInterval, HeartBeatInterval, AccessToken |
//! | `ForwardWebSocket` | Host, Port, HeartBeatInterval, HeartBeatEnable, AccessToken |
//! | `HttpPost` | Host, Port, Suffix, HeartBeatInterval, HeartBeatEnable, AccessToken, Secret |
//! | `Http` | Host, Port, AccessToken |
//!
//! 每个变体拥有独立的配置结构体，不存在跨变体共享的可变基类，
//! 所以一个条目的字段集合永远恰好等于其类型所规定的集合。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::utils::numeric::NumericInput;

const LOOPBACK_HOST: &str = "127.0.0.1";
const DEFAULT_HEARTBEAT_INTERVAL_MS: u64 = 5000;

/// 单个网络服务实现的配置载荷（即输出 JSON 中的数组元素）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum Implementation {
    ReverseWebSocket(ReverseWebSocketConfig),
    ForwardWebSocket(ForwardWebSocketConfig),
    HttpPost(HttpPostConfig),
    Http(HttpConfig),
}

impl Implementation {
    /// 构造指定类型的默认配置
    ///
    /// 默认值与前端“增加实现”按钮插入的内容一致。
    pub fn with_defaults(kind: ImplementationKind) -> Self {
        match kind {
            ImplementationKind::ReverseWebSocket => {
                Self::ReverseWebSocket(ReverseWebSocketConfig::default())
            }
            ImplementationKind::ForwardWebSocket => {
                Self::ForwardWebSocket(ForwardWebSocketConfig::default())
            }
            ImplementationKind::HttpPost => Self::HttpPost(HttpPostConfig::default()),
            ImplementationKind::Http => Self::Http(HttpConfig::default()),
        }
    }

    /// 该配置的类型标签
    pub fn kind(&self) -> ImplementationKind {
        match self {
            Self::ReverseWebSocket(_) => ImplementationKind::ReverseWebSocket,
            Self::ForwardWebSocket(_) => ImplementationKind::ForwardWebSocket,
            Self::HttpPost(_) => ImplementationKind::HttpPost,
            Self::Http(_) => ImplementationKind::Http,
        }
    }

    /// 面板标题下方显示的一行摘要
    ///
    /// - 反向 WebSocket：`{Host}{Suffix}`
    /// - 正向 WebSocket / HTTP：`{Host}:{Port}`
    /// - HTTP Post：`{Host}:{Port}{Suffix}`
    pub fn summary(&self) -> String {
        match self {
            Self::ReverseWebSocket(c) => format!("{}{}", c.host, c.suffix),
            Self::ForwardWebSocket(c) => format!("{}:{}", c.host, c.port),
            Self::HttpPost(c) => format!("{}:{}{}", c.host, c.port, c.suffix),
            Self::Http(c) => format!("{}:{}", c.host, c.port),
        }
    }
}

/// 反向 WebSocket：由 Lagrange 主动连接到应用端
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReverseWebSocketConfig {
    pub host: String,
    pub port: u32,
    pub suffix: String,
    pub reconnect_interval: u64,
    pub heart_beat_interval: u64,
    pub access_token: String,
}

impl Default for ReverseWebSocketConfig {
    fn default() -> Self {
        Self {
            host: LOOPBACK_HOST.to_string(),
            port: 8080,
            suffix: "/onebot/v11/ws".to_string(),
            reconnect_interval: 5000,
            heart_beat_interval: DEFAULT_HEARTBEAT_INTERVAL_MS,
            access_token: String::new(),
        }
    }
}

/// 正向 WebSocket：Lagrange 监听端口，等待应用端连接
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ForwardWebSocketConfig {
    /// 监听地址：需要绑定的网卡 IP
    pub host: String,
    pub port: u32,
    pub heart_beat_interval: u64,
    pub heart_beat_enable: bool,
    pub access_token: String,
}

impl Default for ForwardWebSocketConfig {
    fn default() -> Self {
        Self {
            host: LOOPBACK_HOST.to_string(),
            port: 8081,
            heart_beat_interval: DEFAULT_HEARTBEAT_INTERVAL_MS,
            heart_beat_enable: true,
            access_token: String::new(),
        }
    }
}

/// HTTP Post：Lagrange 将事件以 POST 请求推送到应用端
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HttpPostConfig {
    /// 目标主机，需要 HTTPS 时可带 `https://` 前缀
    pub host: String,
    pub port: u32,
    pub suffix: String,
    pub heart_beat_interval: u64,
    pub heart_beat_enable: bool,
    pub access_token: String,
    /// 用于给 POST 请求签名的密钥
    pub secret: String,
}

impl Default for HttpPostConfig {
    fn default() -> Self {
        Self {
            host: LOOPBACK_HOST.to_string(),
            port: 8082,
            suffix: "/".to_string(),
            heart_beat_interval: DEFAULT_HEARTBEAT_INTERVAL_MS,
            heart_beat_enable: true,
            access_token: String::new(),
            secret: String::new(),
        }
    }
}

/// HTTP：Lagrange 监听端口提供 HTTP API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HttpConfig {
    /// `*` 表示监听所有网卡
    pub host: String,
    pub port: u32,
    pub access_token: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "*".to_string(),
            port: 8083,
            access_token: String::new(),
        }
    }
}

/// 实现类型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImplementationKind {
    ReverseWebSocket,
    ForwardWebSocket,
    HttpPost,
    Http,
}

impl ImplementationKind {
    pub const ALL: [ImplementationKind; 4] = [
        Self::ReverseWebSocket,
        Self::ForwardWebSocket,
        Self::HttpPost,
        Self::Http,
    ];

    /// 该类型合法的字段集合，顺序与输出 JSON 中的字段顺序一致
    pub fn fields(self) -> &'static [ImplementationField] {
        use ImplementationField::*;
        match self {
            Self::ReverseWebSocket => &[
                Host,
                Port,
                Suffix,
                ReconnectInterval,
                HeartBeatInterval,
                AccessToken,
            ],
            Self::ForwardWebSocket => &[
                Host,
                Port,
                HeartBeatInterval,
                HeartBeatEnable,
                AccessToken,
            ],
            Self::HttpPost => &[
                Host,
                Port,
                Suffix,
                HeartBeatInterval,
                HeartBeatEnable,
                AccessToken,
                Secret,
            ],
            Self::Http => &[Host, Port, AccessToken],
        }
    }

    pub fn supports(self, field: ImplementationField) -> bool {
        self.fields().contains(&field)
    }

    /// 面板标题
    pub fn title(self) -> &'static str {
        match self {
            Self::ReverseWebSocket => "反向 WebSocket 实现",
            Self::ForwardWebSocket => "正向 WebSocket 实现",
            Self::HttpPost => "HTTP Post 实现",
            Self::Http => "HTTP 实现",
        }
    }

    /// 外部 `Type` 字段的取值
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReverseWebSocket => "ReverseWebSocket",
            Self::ForwardWebSocket => "ForwardWebSocket",
            Self::HttpPost => "HttpPost",
            Self::Http => "Http",
        }
    }
}

impl fmt::Display for ImplementationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 实现配置中的字段名（外部名称）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImplementationField {
    Host,
    Port,
    Suffix,
    ReconnectInterval,
    HeartBeatInterval,
    HeartBeatEnable,
    AccessToken,
    Secret,
}

impl ImplementationField {
    pub const ALL: [ImplementationField; 8] = [
        Self::Host,
        Self::Port,
        Self::Suffix,
        Self::ReconnectInterval,
        Self::HeartBeatInterval,
        Self::HeartBeatEnable,
        Self::AccessToken,
        Self::Secret,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Host => "Host",
            Self::Port => "Port",
            Self::Suffix => "Suffix",
            Self::ReconnectInterval => "ReconnectInterval",
            Self::HeartBeatInterval => "HeartBeatInterval",
            Self::HeartBeatEnable => "HeartBeatEnable",
            Self::AccessToken => "AccessToken",
            Self::Secret => "Secret",
        }
    }
}

impl fmt::Display for ImplementationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImplementationField {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| EditorError::UnknownField(s.to_string()))
    }
}

/// 针对单个实现条目的字段编辑指令
///
/// 变体名即外部字段名，携带该字段语义类型的取值。
/// 指令是否适用于某个条目取决于条目的类型，由注册表在执行时校验。
///
/// 前端通过 IPC 以相邻标签的形式传入：
/// ```json
/// { "field": "Port", "value": "9000" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "field", content = "value")]
pub enum ImplementationEdit {
    Host(String),
    Port(NumericInput),
    Suffix(String),
    ReconnectInterval(NumericInput),
    HeartBeatInterval(NumericInput),
    HeartBeatEnable(bool),
    AccessToken(String),
    Secret(String),
}

impl ImplementationEdit {
    /// 该编辑指令作用的字段
    pub fn field(&self) -> ImplementationField {
        match self {
            Self::Host(_) => ImplementationField::Host,
            Self::Port(_) => ImplementationField::Port,
            Self::Suffix(_) => ImplementationField::Suffix,
            Self::ReconnectInterval(_) => ImplementationField::ReconnectInterval,
            Self::HeartBeatInterval(_) => ImplementationField::HeartBeatInterval,
            Self::HeartBeatEnable(_) => ImplementationField::HeartBeatEnable,
            Self::AccessToken(_) => ImplementationField::AccessToken,
            Self::Secret(_) => ImplementationField::Secret,
        }
    }
}

/// 实现条目的稳定标识
///
/// 由注册表单调分配，与条目在数组中的位置无关，删除后也不会被复用。
/// 前端只能通过它来引用条目，数组下标仅用于渲染。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplementationId(i64);

impl ImplementationId {
    /// 会话初始条目使用的哨兵标识，位于计数器的取值范围之外
    pub const SENTINEL: ImplementationId = ImplementationId(-1);

    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ImplementationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 注册表中的一个条目：稳定标识 + 配置载荷
///
/// 标识在构造后不可修改；载荷只能由注册表在保持类型不变的前提下替换。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationEntry {
    id: ImplementationId,
    config: Implementation,
}

impl ImplementationEntry {
    pub(crate) fn new(id: ImplementationId, config: Implementation) -> Self {
        Self { id, config }
    }

    pub fn id(&self) -> ImplementationId {
        self.id
    }

    pub fn kind(&self) -> ImplementationKind {
        self.config.kind()
    }

    pub fn implementation(&self) -> &Implementation {
        &self.config
    }

    /// 替换载荷，调用方需保证新载荷与原载荷类型相同
    pub(crate) fn replace_config(&mut self, config: Implementation) {
        debug_assert_eq!(self.config.kind(), config.kind());
        self.config = config;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_carries_type_tag_first() {
        let value = serde_json::to_value(Implementation::with_defaults(ImplementationKind::Http))
            .unwrap();
        assert_eq!(
            value,
            json!({ "Type": "Http", "Host": "*", "Port": 8083, "AccessToken": "" })
        );

        let text =
            serde_json::to_string(&Implementation::with_defaults(ImplementationKind::HttpPost))
                .unwrap();
        assert!(text.starts_with(r#"{"Type":"HttpPost","Host":"127.0.0.1","Port":8082"#));
    }

    #[test]
    fn test_default_payloads_have_exactly_their_fields() {
        for kind in ImplementationKind::ALL {
            let value = serde_json::to_value(Implementation::with_defaults(kind)).unwrap();
            let mut actual: Vec<&str> = value
                .as_object()
                .unwrap()
                .keys()
                .map(String::as_str)
                .filter(|key| *key != "Type")
                .collect();
            let mut expected: Vec<&str> = kind.fields().iter().map(|f| f.as_str()).collect();
            expected.sort_unstable();
            actual.sort_unstable();
            assert_eq!(actual, expected, "{kind}");
        }
    }

    #[test]
    fn test_summary_follows_panel_format() {
        let reverse = Implementation::with_defaults(ImplementationKind::ReverseWebSocket);
        assert_eq!(reverse.summary(), "127.0.0.1/onebot/v11/ws");
        let post = Implementation::with_defaults(ImplementationKind::HttpPost);
        assert_eq!(post.summary(), "127.0.0.1:8082/");
        let http = Implementation::with_defaults(ImplementationKind::Http);
        assert_eq!(http.summary(), "*:8083");
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!(
            "HeartBeatEnable".parse::<ImplementationField>().unwrap(),
            ImplementationField::HeartBeatEnable
        );
        assert!(matches!(
            "heartbeat".parse::<ImplementationField>(),
            Err(EditorError::UnknownField(name)) if name == "heartbeat"
        ));
    }

    #[test]
    fn test_edit_deserializes_from_adjacent_tag() {
        let edit: ImplementationEdit =
            serde_json::from_value(json!({ "field": "Port", "value": "9000" })).unwrap();
        assert_eq!(edit.field(), ImplementationField::Port);

        let edit: ImplementationEdit =
            serde_json::from_value(json!({ "field": "HeartBeatEnable", "value": false }))
                .unwrap();
        assert_eq!(edit, ImplementationEdit::HeartBeatEnable(false));
    }
}
