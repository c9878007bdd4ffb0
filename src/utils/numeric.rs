//! # 宽松数值解析
//!
//! 表单中的数值输入框随输入实时提交，用户随时可能输入半截内容（如空串、`"12a"`）。
//! 为保证实时预览不被打断，数值字段从不拒绝编辑：
//! - 跳过前导空白，接受一个可选的正负号，取最长的前导十进制数字串（`"12abc"` → 12）
//! - 没有任何数字时取 0
//! - 负数取 0（所有数值字段都是非负的）
//! - 超出字段类型范围时饱和到该类型的最大值
//!
//! 这是刻意保留的宽松约定，而不是缺陷。

use serde::Deserialize;

/// 数值字段的输入：JSON 数字或输入框中的原始文本
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

impl NumericInput {
    /// 按宽松约定解析为 `u64`
    pub fn to_u64(&self) -> u64 {
        match self {
            Self::Number(number) => {
                if let Some(value) = number.as_u64() {
                    value
                } else if let Some(value) = number.as_f64() {
                    // `as` 对 NaN 取 0，对越界值饱和；小数部分截断
                    if value > 0.0 { value as u64 } else { 0 }
                } else {
                    0
                }
            }
            Self::Text(text) => parse_lenient(text),
        }
    }

    /// 按宽松约定解析为 `u32`
    pub fn to_u32(&self) -> u32 {
        u32::try_from(self.to_u64()).unwrap_or(u32::MAX)
    }
}

impl From<u64> for NumericInput {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// 从文本开头解析非负整数，解析不出任何数字时返回 0
pub fn parse_lenient(input: &str) -> u64 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if negative || digits.is_empty() {
        return 0;
    }

    digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_plain_digits() {
        assert_eq!(parse_lenient("10001"), 10001);
        assert_eq!(parse_lenient("  42"), 42);
        assert_eq!(parse_lenient("+7"), 7);
    }

    #[test]
    fn test_parse_lenient_takes_leading_digits() {
        assert_eq!(parse_lenient("12abc"), 12);
        assert_eq!(parse_lenient("1e3"), 1);
        assert_eq!(parse_lenient("0x1f"), 0);
    }

    #[test]
    fn test_parse_lenient_degrades_to_zero() {
        assert_eq!(parse_lenient(""), 0);
        assert_eq!(parse_lenient("abc"), 0);
        assert_eq!(parse_lenient("-"), 0);
        assert_eq!(parse_lenient("-15"), 0);
    }

    #[test]
    fn test_parse_lenient_saturates() {
        assert_eq!(parse_lenient("99999999999999999999999"), u64::MAX);
        assert_eq!(NumericInput::from("99999999999").to_u32(), u32::MAX);
    }

    #[test]
    fn test_numeric_input_from_json() {
        let input: NumericInput = serde_json::from_str("9000").unwrap();
        assert_eq!(input.to_u32(), 9000);

        let input: NumericInput = serde_json::from_str("-3").unwrap();
        assert_eq!(input.to_u64(), 0);

        let input: NumericInput = serde_json::from_str("12.9").unwrap();
        assert_eq!(input.to_u64(), 12);

        let input: NumericInput = serde_json::from_str(r#""8080/""#).unwrap();
        assert_eq!(input.to_u32(), 8080);
    }
}
