use crate::error::Result;
use crate::schema::ItemType;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 双语标签
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Label {
    pub ar: String,
    pub fr: String,
}

impl Label {
    pub fn new(ar: impl Into<String>, fr: impl Into<String>) -> Self {
        Self {
            ar: ar.into(),
            fr: fr.into(),
        }
    }
}

/// 书籍结构标签
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookStructure {
    /// 单元标签，如 الوحدة / Unité
    pub section_label: Label,
    /// 条目类型 → 标签
    pub item_labels: IndexMap<String, Label>,
}

/// 书籍元数据
///
/// 由调用方提供，不从源文档推导
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookMeta {
    pub id: String,
    pub title: String,
    pub structure: BookStructure,
    /// 资源名 → 路径
    pub resources: IndexMap<String, String>,
}

impl BookMeta {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_section_label(mut self, label: Label) -> Self {
        self.structure.section_label = label;
        self
    }

    pub fn with_item_label(mut self, item_type: ItemType, label: Label) -> Self {
        self.structure
            .item_labels
            .insert(item_type.as_str().to_string(), label);
        self
    }

    pub fn with_resource(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.resources.insert(name.into(), path.into());
        self
    }

    /// 《Al-Arabiya Bayna Yadayk》各册的元数据
    ///
    /// # 参数
    /// - `tome`: 册号（1–3）
    pub fn aby(tome: u8) -> Self {
        Self::new(
            format!("aby-t{}", tome),
            format!("Al-Arabiya Bayna Yadayk - Tome {}", tome),
        )
        .with_section_label(Label::new("الوحدة", "Unité"))
        .with_item_label(ItemType::Dialogue, Label::new("حوار", "Dialogue"))
        .with_item_label(ItemType::Text, Label::new("نص", "Texte"))
        .with_resource("pdf", format!("/arabic/pdf/ABY-T{}.pdf", tome))
        .with_resource("vocabulary", format!("/arabic/pdf/ABY-T{}-VOC.pdf", tome))
    }

    /// 从 JSON 文本解析元数据
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// 从文件加载元数据
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_aby_preset() {
        let meta = BookMeta::aby(2);
        assert_eq!(meta.id, "aby-t2");
        assert_eq!(meta.title, "Al-Arabiya Bayna Yadayk - Tome 2");
        assert_eq!(meta.structure.section_label, Label::new("الوحدة", "Unité"));
        assert_eq!(meta.resources["pdf"], "/arabic/pdf/ABY-T2.pdf");
        assert_eq!(meta.resources["vocabulary"], "/arabic/pdf/ABY-T2-VOC.pdf");
    }

    #[test]
    fn test_serialized_shape() {
        let value = serde_json::to_value(BookMeta::aby(1)).unwrap();
        assert_eq!(value["structure"]["sectionLabel"], json!({"ar": "الوحدة", "fr": "Unité"}));
        assert_eq!(
            value["structure"]["itemLabels"]["dialogue"],
            json!({"ar": "حوار", "fr": "Dialogue"})
        );

        let keys: Vec<&String> = value["resources"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["pdf", "vocabulary"]);
    }

    #[test]
    fn test_item_label_order_preserved() {
        let meta = BookMeta::aby(3);
        let keys: Vec<&str> = meta.structure.item_labels.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["dialogue", "text"]);
    }

    #[test]
    fn test_load_partial_meta() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"id": "custom", "resources": {{"pdf": "/x.pdf"}}}}"#).unwrap();

        let meta = BookMeta::load(file.path()).unwrap();
        assert_eq!(meta.id, "custom");
        assert_eq!(meta.title, "");
        assert!(meta.structure.item_labels.is_empty());
        assert_eq!(meta.resources["pdf"], "/x.pdf");
    }
}
