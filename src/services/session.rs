//! # 编辑会话服务
//!
//! 一个编辑会话持有一份基础配置文档和一个实现注册表，从窗口打开持续到窗口关闭。
//! 所有修改都由离散的用户操作同步触发，执行完毕后前端重新渲染。
//!
//! `SessionState` 是注册为 Tauri managed state 的外层包装，
//! 内部使用 `RwLock` 满足 managed state 的 `Sync` 要求；会话本身只有一个写入者。

use std::sync::RwLock;

use serde::Serialize;

use crate::error::EditorError;
use crate::models::document::{ConfigDocument, DocumentEdit};
use crate::models::implementation::{
    Implementation, ImplementationEdit, ImplementationEntry, ImplementationId,
    ImplementationKind,
};
use crate::services::document::DocumentState;
use crate::services::registry::ImplementationRegistry;
use crate::services::serializer;

/// 单个编辑会话
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    document: DocumentState,
    registry: ImplementationRegistry,
}

/// 前端渲染一个实现面板所需的全部信息
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    /// 稳定标识，前端的所有操作都应使用它而非数组下标
    pub id: ImplementationId,
    pub kind: ImplementationKind,
    /// 面板标题（如 "HTTP 实现"）
    pub title: &'static str,
    /// 标题下方的摘要（如 "*:8083"）
    pub summary: String,
    pub config: Implementation,
}

impl From<&ImplementationEntry> for EntryView {
    fn from(entry: &ImplementationEntry) -> Self {
        let config = entry.implementation();
        Self {
            id: entry.id(),
            kind: entry.kind(),
            title: entry.kind().title(),
            summary: config.summary(),
            config: config.clone(),
        }
    }
}

/// 会话的完整快照：表单数据 + 实现面板列表 + 预览文本
///
/// 每次修改类 command 都返回一份新快照，前端据此整体重新渲染。
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub document: ConfigDocument,
    pub implementations: Vec<EntryView>,
    pub preview: String,
}

impl EditorSession {
    /// 以默认文档和一个默认反向 WebSocket 条目开始新会话
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &ConfigDocument {
        self.document.current()
    }

    pub fn document_state(&self) -> &DocumentState {
        &self.document
    }

    pub fn registry(&self) -> &ImplementationRegistry {
        &self.registry
    }

    /// 应用一次基础配置字段编辑，返回文档是否发生变化
    pub fn update_document(&mut self, edit: DocumentEdit) -> bool {
        self.document.update(edit)
    }

    pub fn append(&mut self, kind: ImplementationKind) -> ImplementationId {
        self.registry.append(kind)
    }

    pub fn remove(&mut self, id: ImplementationId) -> Result<ImplementationEntry, EditorError> {
        self.registry.remove(id)
    }

    pub fn update_field(
        &mut self,
        id: ImplementationId,
        edit: ImplementationEdit,
    ) -> Result<(), EditorError> {
        self.registry.update_field(id, edit)
    }

    pub fn entries(&self) -> Vec<ImplementationEntry> {
        self.registry.list_entries()
    }

    pub fn entry_views(&self) -> Vec<EntryView> {
        self.registry.snapshot().iter().map(EntryView::from).collect()
    }

    /// 渲染当前状态对应的配置文本
    pub fn render(&self) -> Result<String, EditorError> {
        serializer::serialize(self.document.current(), &self.registry.snapshot())
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, EditorError> {
        Ok(SessionSnapshot {
            document: self.document.current().clone(),
            implementations: self.entry_views(),
            preview: self.render()?,
        })
    }
}

/// 注册为 Tauri managed state 的会话容器
#[derive(Debug, Default)]
pub struct SessionState {
    session: RwLock<EditorSession>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 在读锁下访问会话
    pub fn read<T>(
        &self,
        f: impl FnOnce(&EditorSession) -> Result<T, EditorError>,
    ) -> Result<T, EditorError> {
        let session = self.session.read().map_err(|_| EditorError::StatePoisoned)?;
        f(&session)
    }

    /// 在写锁下修改会话
    pub fn write<T>(
        &self,
        f: impl FnOnce(&mut EditorSession) -> Result<T, EditorError>,
    ) -> Result<T, EditorError> {
        let mut session = self.session.write().map_err(|_| EditorError::StatePoisoned)?;
        f(&mut session)
    }

    /// 丢弃当前会话并以默认值重新开始
    ///
    /// 新会话拥有独立的标识计数器，因此旧会话的标识不会泄漏到新会话中继续生效。
    pub fn reset(&self) -> Result<(), EditorError> {
        self.write(|session| {
            *session = EditorSession::new();
            log::info!("编辑会话已重置");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::numeric::NumericInput;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn test_end_to_end_scenario() {
        let mut session = EditorSession::new();
        let i0 = session.registry().identities()[0];

        let i1 = session.append(ImplementationKind::Http);
        assert_eq!(session.registry().identities(), vec![i0, i1]);

        session.remove(i0).unwrap();
        assert_eq!(session.registry().identities(), vec![i1]);
        assert!(matches!(session.remove(i0), Err(EditorError::NotFound(_))));
        assert_eq!(session.registry().identities(), vec![i1]);

        let i2 = session.append(ImplementationKind::HttpPost);
        assert_ne!(i2, i0);
        assert_eq!(session.registry().identities(), vec![i1, i2]);

        session
            .update_field(i1, ImplementationEdit::Port(NumericInput::from(9000)))
            .unwrap();

        let value: Value = serde_json::from_str(&session.render().unwrap()).unwrap();
        assert_eq!(
            value["Implementations"],
            json!([
                { "Type": "Http", "Host": "*", "Port": 9000, "AccessToken": "" },
                {
                    "Type": "HttpPost",
                    "Host": "127.0.0.1",
                    "Port": 8082,
                    "Suffix": "/",
                    "HeartBeatInterval": 5000,
                    "HeartBeatEnable": true,
                    "AccessToken": "",
                    "Secret": ""
                }
            ])
        );
    }

    #[test]
    fn test_document_edit_shows_in_preview() {
        let mut session = EditorSession::new();
        session.update_document(DocumentEdit::Uin(NumericInput::from("12345678")));
        session.update_document(DocumentEdit::StringPost(true));

        let value: Value = serde_json::from_str(&session.render().unwrap()).unwrap();
        assert_eq!(value["Account"]["Uin"], json!(12345678));
        assert_eq!(value["Message"]["StringPost"], json!(true));

        session.update_document(DocumentEdit::Uin(NumericInput::from("qq")));
        let value: Value = serde_json::from_str(&session.render().unwrap()).unwrap();
        assert_eq!(value["Account"]["Uin"], json!(0));
    }

    #[test]
    fn test_snapshot_views() {
        let mut session = EditorSession::new();
        let id = session.append(ImplementationKind::ForwardWebSocket);

        let snapshot = session.snapshot().unwrap();
        assert_eq!(snapshot.implementations.len(), 2);
        assert_eq!(snapshot.implementations[1].id, id);
        assert_eq!(snapshot.implementations[1].title, "正向 WebSocket 实现");
        assert_eq!(snapshot.implementations[1].summary, "127.0.0.1:8081");
        assert_eq!(snapshot.preview, session.render().unwrap());

        let value = serde_json::to_value(&snapshot.implementations[0]).unwrap();
        assert_eq!(value["id"], json!(-1));
        assert_eq!(value["kind"], json!("ReverseWebSocket"));
        assert_eq!(value["config"]["Type"], json!("ReverseWebSocket"));
    }

    #[test]
    fn test_state_reset_starts_fresh_counter() {
        let state = SessionState::new();
        let id = state
            .write(|session| Ok(session.append(ImplementationKind::Http)))
            .unwrap();
        assert_eq!(state.read(|session| Ok(session.entries().len())).unwrap(), 2);

        state.reset().unwrap();
        let ids = state.read(|session| Ok(session.registry().identities())).unwrap();
        assert_eq!(ids, vec![ImplementationId::SENTINEL]);
        assert!(matches!(
            state.write(|session| session.remove(id)),
            Err(EditorError::NotFound(_))
        ));
    }
}
