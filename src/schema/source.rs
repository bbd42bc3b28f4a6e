// 源文档结构
// 各版本的 JSON 在这里一次性解析为标签联合，下游只看到统一的 SourceUnit

use crate::error::{IngestError, Result};
use crate::schema::{BookMeta, ItemType};
use serde::Deserialize;
use serde_json::Value;

/// 源文档中的一行
///
/// 旧版使用 `arabic`/`french`，规范版使用 `ar`/`fr`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawLine")]
pub struct SourceLine {
    pub speaker: String,
    pub arabic: String,
    pub french: String,
}

/// 行的原始 JSON 形态，字段缺失或为 null 时取默认值
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawLine {
    speaker: Option<String>,
    arabic: Option<String>,
    ar: Option<String>,
    french: Option<String>,
    fr: Option<String>,
}

impl From<RawLine> for SourceLine {
    fn from(raw: RawLine) -> Self {
        Self {
            speaker: raw.speaker.unwrap_or_default(),
            arabic: raw.arabic.or(raw.ar).unwrap_or_default(),
            french: raw.french.or(raw.fr).unwrap_or_default(),
        }
    }
}

/// 源文档中的一个条目
///
/// 源数据里的 `id` 字段被忽略
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawEntry")]
pub struct SourceEntry {
    pub item_type: Option<ItemType>,
    pub title_ar: String,
    pub title_fr: String,
    pub youtube_url: String,
    pub pdf_page: Option<u32>,
    pub lines: Vec<SourceLine>,
}

/// 条目的原始 JSON 形态
#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawEntry {
    #[serde(rename = "type")]
    item_type: Option<ItemType>,
    title_ar: Option<String>,
    title_fr: Option<String>,
    youtube_url: Option<String>,
    youtube: Option<String>,
    pdf_page: Option<u32>,
    lines: Option<Vec<SourceLine>>,
}

impl From<RawEntry> for SourceEntry {
    fn from(raw: RawEntry) -> Self {
        Self {
            item_type: raw.item_type,
            title_ar: raw.title_ar.unwrap_or_default(),
            title_fr: raw.title_fr.unwrap_or_default(),
            youtube_url: raw.youtube_url.or(raw.youtube).unwrap_or_default(),
            pdf_page: raw.pdf_page,
            lines: raw.lines.unwrap_or_default(),
        }
    }
}

/// 单元的条目列表
#[derive(Debug, Clone, PartialEq)]
pub enum UnitEntries {
    /// 第一册：`dialogues`，条目通常不带类型
    Dialogues(Vec<SourceEntry>),
    /// 第二、三册：`lessons`，条目带显式类型
    Lessons(Vec<SourceEntry>),
    /// 规范文档：`items`
    Items(Vec<SourceEntry>),
    /// 没有条目列表
    Empty,
}

impl UnitEntries {
    pub fn entries(&self) -> &[SourceEntry] {
        match self {
            UnitEntries::Dialogues(entries)
            | UnitEntries::Lessons(entries)
            | UnitEntries::Items(entries) => entries,
            UnitEntries::Empty => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// 单元的原始 JSON 形态
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawUnit {
    id: u32,
    #[serde(default)]
    title_ar: Option<String>,
    #[serde(default)]
    title_fr: Option<String>,
    dialogues: Option<Vec<SourceEntry>>,
    lessons: Option<Vec<SourceEntry>>,
    items: Option<Vec<SourceEntry>>,
}

/// 源文档中的一个单元
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawUnit")]
pub struct SourceUnit {
    pub id: u32,
    pub title_ar: String,
    pub title_fr: String,
    pub entries: UnitEntries,
}

impl From<RawUnit> for SourceUnit {
    fn from(raw: RawUnit) -> Self {
        let entries = match (raw.lessons, raw.dialogues, raw.items) {
            (Some(lessons), dialogues, _) => {
                if dialogues.is_some() {
                    log::warn!("单元 {} 同时含有 lessons 与 dialogues，忽略 dialogues", raw.id);
                }
                UnitEntries::Lessons(lessons)
            }
            (None, Some(dialogues), _) => UnitEntries::Dialogues(dialogues),
            (None, None, Some(items)) => UnitEntries::Items(items),
            (None, None, None) => UnitEntries::Empty,
        };

        Self {
            id: raw.id,
            title_ar: raw.title_ar.unwrap_or_default(),
            title_fr: raw.title_fr.unwrap_or_default(),
            entries,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLegacy {
    #[serde(default)]
    book_id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    units: Option<Vec<SourceUnit>>,
}

#[derive(Deserialize)]
struct RawCanonical {
    #[serde(default)]
    meta: Option<BookMeta>,
    #[serde(default)]
    sections: Option<Vec<SourceUnit>>,
}

/// 源文档
#[derive(Debug, Clone, PartialEq)]
pub enum SourceDocument {
    /// 旧版：顶层 `units`
    Legacy {
        book_id: Option<String>,
        title: Option<String>,
        units: Vec<SourceUnit>,
    },
    /// 规范版：顶层 `sections`
    Canonical {
        meta: Option<BookMeta>,
        units: Vec<SourceUnit>,
    },
}

impl SourceDocument {
    /// 从 JSON 文本解析并识别结构
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// 从 JSON 值识别结构
    ///
    /// 含 `units` 视为旧版，含 `sections` 视为规范版
    pub fn from_value(value: Value) -> Result<Self> {
        let Some(object) = value.as_object() else {
            return Err(IngestError::UnrecognizedShape(
                "顶层必须是 JSON 对象".to_string(),
            ));
        };

        if object.contains_key("units") {
            let raw: RawLegacy = serde_json::from_value(value)?;
            let units = raw.units.unwrap_or_default();
            log::debug!("识别为旧版文档，{} 个单元", units.len());
            Ok(SourceDocument::Legacy {
                book_id: raw.book_id,
                title: raw.title,
                units,
            })
        } else if object.contains_key("sections") {
            let raw: RawCanonical = serde_json::from_value(value)?;
            let units = raw.sections.unwrap_or_default();
            log::debug!("识别为规范文档，{} 个单元", units.len());
            Ok(SourceDocument::Canonical {
                meta: raw.meta,
                units,
            })
        } else {
            let keys: Vec<&str> = object.keys().map(String::as_str).collect();
            Err(IngestError::UnrecognizedShape(format!(
                "缺少 units 或 sections，顶层键: {:?}",
                keys
            )))
        }
    }

    /// 所有单元（按源顺序）
    pub fn units(&self) -> &[SourceUnit] {
        match self {
            SourceDocument::Legacy { units, .. } | SourceDocument::Canonical { units, .. } => units,
        }
    }

    /// 规范文档自带的元数据
    pub fn embedded_meta(&self) -> Option<&BookMeta> {
        match self {
            SourceDocument::Canonical { meta, .. } => meta.as_ref(),
            SourceDocument::Legacy { .. } => None,
        }
    }
}
