// 规范文档模型
// 所有版本的教材 JSON 最终都规范化为 meta + sections[].items[].lines[]

use serde::{Deserialize, Serialize};

pub mod meta;
pub mod normalizer;
pub mod source;

pub use meta::{BookMeta, BookStructure, Label};
pub use normalizer::{concat_sections, next_section_id, SchemaNormalizer};
pub use source::{SourceDocument, SourceEntry, SourceLine, SourceUnit, UnitEntries};

/// 条目类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ItemType {
    /// 对话
    #[default]
    Dialogue,
    /// 课文
    Text,
}

impl ItemType {
    /// 解析类型标签，兼容旧版的法语标签 "texte"
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "dialogue" => ItemType::Dialogue,
            "text" | "texte" => ItemType::Text,
            other => {
                log::warn!("未知的条目类型 {:?}，按 dialogue 处理", other);
                ItemType::Dialogue
            }
        }
    }

    /// 规范标签
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Dialogue => "dialogue",
            ItemType::Text => "text",
        }
    }
}

impl From<String> for ItemType {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

/// 对照行：说话人 + 阿拉伯文 + 法文
///
/// 三个字段总是存在，缺省为空串
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Line {
    pub speaker: String,
    pub ar: String,
    pub fr: String,
}

impl Line {
    pub fn new(speaker: impl Into<String>, ar: impl Into<String>, fr: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            ar: ar.into(),
            fr: fr.into(),
        }
    }
}

/// 条目（对话或课文）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Item {
    /// `"<单元ID>.<位置序号>"`，每次规范化时重新计算
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title_ar: String,
    pub title_fr: String,
    pub youtube: String,
    pub pdf_page: Option<u32>,
    pub lines: Vec<Line>,
}

impl Item {
    /// 生成条目 ID
    ///
    /// # 参数
    /// - `section_id`: 所属单元 ID
    /// - `position`: 从 1 开始的位置序号
    pub fn derive_id(section_id: u32, position: usize) -> String {
        format!("{}.{}", section_id, position)
    }
}

/// 单元
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// 来自源数据，从不推导
    pub id: u32,
    #[serde(default)]
    pub title_ar: String,
    #[serde(default)]
    pub title_fr: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Section {
    /// 按当前顺序重新编号所有条目
    pub fn renumber_items(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.id = Item::derive_id(self.id, index + 1);
        }
    }

    /// 本单元所有行数
    pub fn line_count(&self) -> usize {
        self.items.iter().map(|item| item.lines.len()).sum()
    }
}

/// 规范化后的整本书
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDocument {
    pub meta: BookMeta,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl BookDocument {
    pub fn new(meta: BookMeta) -> Self {
        Self {
            meta,
            sections: Vec::new(),
        }
    }

    /// 序列化为带缩进的 JSON（保留阿拉伯字符原样）
    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 条目总数
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_type_labels() {
        assert_eq!(ItemType::from_label("dialogue"), ItemType::Dialogue);
        assert_eq!(ItemType::from_label("texte"), ItemType::Text);
        assert_eq!(ItemType::from_label("Text"), ItemType::Text);
        assert_eq!(ItemType::from_label("exercice"), ItemType::Dialogue);
    }

    #[test]
    fn test_item_type_serialization() {
        assert_eq!(serde_json::to_value(ItemType::Text).unwrap(), json!("text"));
        let parsed: ItemType = serde_json::from_value(json!("texte")).unwrap();
        assert_eq!(parsed, ItemType::Text);
    }

    #[test]
    fn test_line_always_has_three_keys() {
        let line: Line = serde_json::from_value(json!({"ar": "س"})).unwrap();
        let value = serde_json::to_value(&line).unwrap();
        assert_eq!(value, json!({"speaker": "", "ar": "س", "fr": ""}));
    }

    #[test]
    fn test_item_serializes_null_pdf_page() {
        let item = Item {
            id: "1.1".to_string(),
            ..Item::default()
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["pdfPage"], serde_json::Value::Null);
        assert_eq!(value["type"], "dialogue");
        assert_eq!(value["lines"], json!([]));
    }

    #[test]
    fn test_section_line_count() {
        let section = Section {
            id: 1,
            items: vec![
                Item { lines: vec![Line::default(), Line::default()], ..Item::default() },
                Item::default(),
                Item { lines: vec![Line::default()], ..Item::default() },
            ],
            ..Section::default()
        };
        assert_eq!(section.line_count(), 3);
    }

    #[test]
    fn test_section_keeps_empty_items() {
        let section = Section {
            id: 4,
            ..Section::default()
        };
        let value = serde_json::to_value(&section).unwrap();
        assert_eq!(value["items"], json!([]));
    }

    #[test]
    fn test_renumber_items() {
        let mut section = Section {
            id: 7,
            items: vec![
                Item { id: "x".to_string(), ..Item::default() },
                Item { id: "7.9".to_string(), ..Item::default() },
            ],
            ..Section::default()
        };
        section.renumber_items();

        let ids: Vec<&str> = section.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["7.1", "7.2"]);
    }
}
