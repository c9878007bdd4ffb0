//! # 配置序列化服务
//!
//! 将基础配置文档与实现条目列表合并为 Lagrange.OneBot 读取的单个 JSON 文档。
//! 纯函数，无内部状态：相同输入总是产生逐字节相同的输出。
//!
//! 输出格式：
//! - 字段顺序固定为结构体声明顺序，`Implementations` 位于最后
//! - 4 空格缩进，与前端 `JSON.stringify(config, null, 4)` 的排版一致
//! - 条目标识只用于编辑期寻址，不会出现在输出中

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::EditorError;
use crate::models::document::ConfigDocument;
use crate::models::implementation::{Implementation, ImplementationEntry};

const INDENT: &[u8] = b"    ";

/// 输出文档的顶层结构
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct ExportedConfig<'a> {
    #[serde(flatten)]
    document: &'a ConfigDocument,
    implementations: Vec<&'a Implementation>,
}

/// 生成完整的配置文本
///
/// # 参数
/// - `document` - 基础配置文档
/// - `entries` - 按输出顺序排列的实现条目
///
/// # 错误
/// 仅在序列化器内部失败时返回错误，对任何可达的编辑状态都不会发生
pub fn serialize(
    document: &ConfigDocument,
    entries: &[ImplementationEntry],
) -> Result<String, EditorError> {
    let exported = ExportedConfig {
        document,
        implementations: entries
            .iter()
            .map(ImplementationEntry::implementation)
            .collect(),
    };

    let mut buffer = Vec::with_capacity(1024);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    exported.serialize(&mut serializer)?;

    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::registry::ImplementationRegistry;
    use crate::models::implementation::ImplementationKind;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn test_default_session_output() {
        let document = ConfigDocument::default();
        let registry = ImplementationRegistry::new();

        let text = serialize(&document, &registry.list_entries()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(
            value,
            json!({
                "$schema": "https://json.schemastore.org/appsettings.json",
                "Logging": { "LogLevel": { "Default": "Information" } },
                "SignServerUrl": "https://sign.lagrangecore.org/api/sign",
                "SignProxyUrl": "",
                "MusicSignServerUrl": "",
                "Account": {
                    "Uin": 0,
                    "Password": "",
                    "Protocol": "Linux",
                    "AutoReconnect": true,
                    "GetOptimumServer": true
                },
                "Message": { "IgnoreSelf": true, "StringPost": false },
                "QrCode": { "ConsoleCompatibilityMode": false },
                "Implementations": [
                    {
                        "Type": "ReverseWebSocket",
                        "Host": "127.0.0.1",
                        "Port": 8080,
                        "Suffix": "/onebot/v11/ws",
                        "ReconnectInterval": 5000,
                        "HeartBeatInterval": 5000,
                        "AccessToken": ""
                    }
                ]
            })
        );
    }

    #[test]
    fn test_layout_uses_four_space_indent_and_fixed_order() {
        let text = serialize(&ConfigDocument::default(), &[]).unwrap();
        let expected = r#"{
    "$schema": "https://json.schemastore.org/appsettings.json",
    "Logging": {
        "LogLevel": {
            "Default": "Information"
        }
    },
    "SignServerUrl": "https://sign.lagrangecore.org/api/sign",
    "SignProxyUrl": "",
    "MusicSignServerUrl": "",
    "Account": {
        "Uin": 0,
        "Password": "",
        "Protocol": "Linux",
        "AutoReconnect": true,
        "GetOptimumServer": true
    },
    "Message": {
        "IgnoreSelf": true,
        "StringPost": false
    },
    "QrCode": {
        "ConsoleCompatibilityMode": false
    },
    "Implementations": []
}"#;
        assert_eq!(text, expected);
    }

    #[test]
    fn test_output_is_deterministic() {
        let document = ConfigDocument::default();
        let mut registry = ImplementationRegistry::new();
        for kind in ImplementationKind::ALL {
            registry.append(kind);
        }
        let entries = registry.list_entries();

        let first = serialize(&document, &entries).unwrap();
        let second = serialize(&document, &entries).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_payloads_follow_registry_order_without_identity() {
        let document = ConfigDocument::default();
        let mut registry = ImplementationRegistry::new();
        registry.append(ImplementationKind::Http);
        registry.append(ImplementationKind::ForwardWebSocket);
        registry.append(ImplementationKind::HttpPost);

        let text = serialize(&document, &registry.list_entries()).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        let implementations = value["Implementations"].as_array().unwrap();

        let types: Vec<&str> = implementations
            .iter()
            .map(|payload| payload["Type"].as_str().unwrap())
            .collect();
        assert_eq!(
            types,
            vec!["ReverseWebSocket", "Http", "ForwardWebSocket", "HttpPost"]
        );
        for payload in implementations {
            let object = payload.as_object().unwrap();
            assert!(!object.contains_key("id"));
            assert!(!object.contains_key("Id"));
        }
    }
}
