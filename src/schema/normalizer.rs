use crate::error::{IngestError, Result};
use crate::schema::source::{SourceDocument, SourceEntry, SourceLine, SourceUnit};
use crate::schema::{BookDocument, BookMeta, Item, ItemType, Line, Section};
use std::collections::HashSet;

/// Schema Normalizer
///
/// 将任一版本的源文档转换为规范的 sections/items/lines 文档。
/// 单元 ID 与标题原样保留，条目 ID 总是按位置重新计算。
#[derive(Debug, Clone)]
pub struct SchemaNormalizer {
    meta: BookMeta,
}

impl SchemaNormalizer {
    /// 创建规范化器
    ///
    /// # 参数
    /// - `meta`: 调用方提供的书籍元数据
    pub fn new(meta: BookMeta) -> Self {
        Self { meta }
    }

    /// 规范化整个文档
    pub fn normalize(&self, source: &SourceDocument) -> BookDocument {
        let sections = self.normalize_sections(source);
        log::info!(
            "{}: 规范化 {} 个单元，{} 个条目，{} 行",
            self.meta.id,
            sections.len(),
            sections.iter().map(|s| s.items.len()).sum::<usize>(),
            sections.iter().map(Section::line_count).sum::<usize>()
        );

        BookDocument {
            meta: self.meta.clone(),
            sections,
        }
    }

    /// 只规范化单元列表，供调用方拼接多个源文档
    pub fn normalize_sections(&self, source: &SourceDocument) -> Vec<Section> {
        source.units().iter().map(normalize_unit).collect()
    }
}

/// 规范化单个单元
pub fn normalize_unit(unit: &SourceUnit) -> Section {
    let items = unit
        .entries
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| normalize_entry(unit.id, index + 1, entry))
        .collect();

    Section {
        id: unit.id,
        title_ar: unit.title_ar.clone(),
        title_fr: unit.title_fr.clone(),
        items,
    }
}

pub(crate) fn normalize_entry(section_id: u32, position: usize, entry: &SourceEntry) -> Item {
    Item {
        id: Item::derive_id(section_id, position),
        item_type: entry.item_type.unwrap_or(ItemType::Dialogue),
        title_ar: entry.title_ar.clone(),
        title_fr: entry.title_fr.clone(),
        youtube: entry.youtube_url.clone(),
        pdf_page: entry.pdf_page,
        lines: entry.lines.iter().map(normalize_line).collect(),
    }
}

fn normalize_line(line: &SourceLine) -> Line {
    Line::new(&line.speaker, &line.arabic, &line.french)
}

/// 拼接多个部分的单元列表，拒绝重复的单元 ID
///
/// # 参数
/// - `parts`: 按顺序排列的各部分单元
///
/// # 返回
/// 拼接后的单元列表；存在重复 ID 时返回错误
pub fn concat_sections(parts: Vec<Vec<Section>>) -> Result<Vec<Section>> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for part in parts {
        for section in part {
            if !seen.insert(section.id) {
                return Err(IngestError::DuplicateSectionId(section.id));
            }
            merged.push(section);
        }
    }

    Ok(merged)
}

/// 下一部分的起始单元 ID：最后一个单元 ID + 1，没有单元时为 1
///
/// 最后一个 ID 已是 `u32::MAX` 时返回 `None`
pub fn next_section_id(sections: &[Section]) -> Option<u32> {
    sections.last().map_or(Some(1), |s| s.id.checked_add(1))
}
