//! # 网络服务实现注册表
//!
//! 维护 `Implementations` 数组对应的有序条目列表。
//!
//! ## 标识与位置解耦
//! 每个条目在创建时从会话内单调递增的计数器获得标识，此后永不改变，
//! 删除后也不会被复用。所有增删改操作都通过标识定位条目，数组下标只决定输出顺序。
//! 若以下标代替标识，删除一个条目后后续条目的下标整体前移，编辑就会落到错误的条目上。
//!
//! ## 初始条目
//! 会话以一个默认的反向 WebSocket 条目开始，其标识为哨兵值 `-1`，
//! 计数器从 0 开始，因此两者永远不会冲突。
//!
//! ## 写时复制
//! 条目列表存放在 `Arc<Vec<_>>` 中，修改通过 `Arc::make_mut` 进行：
//! 已交给调用方的快照不会被后续修改影响，失败的操作也不会留下任何痕迹。

use std::sync::Arc;

use serde_json::{json, Value};

use crate::error::EditorError;
use crate::models::implementation::{
    Implementation, ImplementationEdit, ImplementationEntry, ImplementationField,
    ImplementationId, ImplementationKind,
};

/// 实现条目注册表
#[derive(Debug, Clone)]
pub struct ImplementationRegistry {
    /// 按输出顺序排列的条目
    entries: Arc<Vec<ImplementationEntry>>,
    /// 下一个待分配的标识
    next_id: i64,
}

impl ImplementationRegistry {
    /// 创建包含一个默认反向 WebSocket 条目的注册表
    pub fn new() -> Self {
        let initial = ImplementationEntry::new(
            ImplementationId::SENTINEL,
            Implementation::with_defaults(ImplementationKind::ReverseWebSocket),
        );
        Self {
            entries: Arc::new(vec![initial]),
            next_id: 0,
        }
    }

    /// 追加一个指定类型的默认条目
    ///
    /// # 返回值
    /// 新条目的标识，在整个会话内唯一。新条目总是位于列表末尾。
    pub fn append(&mut self, kind: ImplementationKind) -> ImplementationId {
        let id = ImplementationId::new(self.next_id);
        self.next_id += 1;

        Arc::make_mut(&mut self.entries)
            .push(ImplementationEntry::new(id, Implementation::with_defaults(kind)));
        log::debug!("已追加 {} 实现 {}", kind, id);
        id
    }

    /// 删除指定标识的条目，无论它当前位于何处
    ///
    /// 其余条目保留各自的标识和相对顺序。
    ///
    /// # 返回值
    /// 被删除的条目
    ///
    /// # 错误
    /// 标识不存在时返回 `NotFound`，注册表保持不变
    pub fn remove(&mut self, id: ImplementationId) -> Result<ImplementationEntry, EditorError> {
        let position = self.position_of(id)?;
        let removed = Arc::make_mut(&mut self.entries).remove(position);
        log::debug!("已移除 {} 实现 {}", removed.kind(), id);
        Ok(removed)
    }

    /// 更新指定条目的单个字段
    ///
    /// # 错误
    /// - 标识不存在时返回 `NotFound`
    /// - 字段不属于该条目的类型时返回 `FieldNotInVariant`
    ///
    /// 出错时注册表保持不变。
    pub fn update_field(
        &mut self,
        id: ImplementationId,
        edit: ImplementationEdit,
    ) -> Result<(), EditorError> {
        let position = self.position_of(id)?;
        let current = self.entries[position].implementation();

        let updated = apply_edit(current, edit).map_err(|field| {
            log::warn!("拒绝更新: {} 实现不包含字段 {}（条目 {}）", current.kind(), field, id);
            EditorError::FieldNotInVariant {
                id,
                kind: current.kind(),
                field,
            }
        })?;

        if updated == *current {
            return Ok(());
        }

        Arc::make_mut(&mut self.entries)[position].replace_config(updated);
        log::debug!("已更新实现 {} 的字段", id);
        Ok(())
    }

    pub fn get(&self, id: ImplementationId) -> Option<&ImplementationEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// 按当前顺序返回所有条目的独立副本
    pub fn list_entries(&self) -> Vec<ImplementationEntry> {
        self.entries.as_ref().clone()
    }

    /// 返回当前条目列表的共享快照
    ///
    /// 后续修改会写入新的列表，不影响已返回的快照。
    pub fn snapshot(&self) -> Arc<Vec<ImplementationEntry>> {
        Arc::clone(&self.entries)
    }

    /// 按当前顺序返回所有条目的标识
    pub fn identities(&self) -> Vec<ImplementationId> {
        self.entries.iter().map(ImplementationEntry::id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position_of(&self, id: ImplementationId) -> Result<usize, EditorError> {
        self.entries
            .iter()
            .position(|entry| entry.id() == id)
            .ok_or_else(|| {
                log::warn!("实现条目 {} 不存在", id);
                EditorError::NotFound(id)
            })
    }
}

impl Default for ImplementationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// 在保持类型不变的前提下生成字段被替换后的新载荷
///
/// 每个类型都对全部编辑指令做穷尽匹配，新增字段时编译器会强制检查每个类型。
///
/// # 错误
/// 字段不属于该类型时返回该字段
pub fn apply_edit(
    implementation: &Implementation,
    edit: ImplementationEdit,
) -> Result<Implementation, ImplementationField> {
    use ImplementationEdit as E;

    let field = edit.field();
    let mut next = implementation.clone();
    match &mut next {
        Implementation::ReverseWebSocket(config) => match edit {
            E::Host(value) => config.host = value,
            E::Port(value) => config.port = value.to_u32(),
            E::Suffix(value) => config.suffix = value,
            E::ReconnectInterval(value) => config.reconnect_interval = value.to_u64(),
            E::HeartBeatInterval(value) => config.heart_beat_interval = value.to_u64(),
            E::AccessToken(value) => config.access_token = value,
            E::HeartBeatEnable(_) | E::Secret(_) => return Err(field),
        },
        Implementation::ForwardWebSocket(config) => match edit {
            E::Host(value) => config.host = value,
            E::Port(value) => config.port = value.to_u32(),
            E::HeartBeatInterval(value) => config.heart_beat_interval = value.to_u64(),
            E::HeartBeatEnable(value) => config.heart_beat_enable = value,
            E::AccessToken(value) => config.access_token = value,
            E::Suffix(_) | E::ReconnectInterval(_) | E::Secret(_) => return Err(field),
        },
        Implementation::HttpPost(config) => match edit {
            E::Host(value) => config.host = value,
            E::Port(value) => config.port = value.to_u32(),
            E::Suffix(value) => config.suffix = value,
            E::HeartBeatInterval(value) => config.heart_beat_interval = value.to_u64(),
            E::HeartBeatEnable(value) => config.heart_beat_enable = value,
            E::AccessToken(value) => config.access_token = value,
            E::Secret(value) => config.secret = value,
            E::ReconnectInterval(_) => return Err(field),
        },
        Implementation::Http(config) => match edit {
            E::Host(value) => config.host = value,
            E::Port(value) => config.port = value.to_u32(),
            E::AccessToken(value) => config.access_token = value,
            E::Suffix(_)
            | E::ReconnectInterval(_)
            | E::HeartBeatInterval(_)
            | E::HeartBeatEnable(_)
            | E::Secret(_) => return Err(field),
        },
    }
    Ok(next)
}

/// 由外部字段名和原始 JSON 取值构造编辑指令
///
/// # 错误
/// - 字段名无法识别时返回 `UnknownField`
/// - 取值的 JSON 类型与字段不匹配时返回 `InvalidValue`
pub fn edit_from_parts(field: &str, value: Value) -> Result<ImplementationEdit, EditorError> {
    let field: ImplementationField = field.parse()?;

    serde_json::from_value(json!({ "field": field.as_str(), "value": value })).map_err(|e| {
        EditorError::InvalidValue {
            field: field.to_string(),
            reason: e.to_string(),
        }
    })
}
