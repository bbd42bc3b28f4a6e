// 条目组装：把分段结果或识别服务的结构化页面组装为规范条目

use crate::cleaner::SectionStripper;
use crate::error::Result;
use crate::parser::numerals::to_arabic_indic;
use crate::parser::Paragraph;
use crate::schema::normalizer::normalize_entry;
use crate::schema::{Item, ItemType, Line, Section, SourceEntry};

/// 翻译服务接口
///
/// 实际的网络调用、重试和限流由调用方负责
pub trait Translator {
    /// 将阿拉伯文翻译为法文，失败时返回空串
    fn translate(&self, arabic: &str) -> String;
}

impl<F> Translator for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, arabic: &str) -> String {
        self(arabic)
    }
}

/// 条目组装器
#[derive(Debug, Clone, Default)]
pub struct ItemAssembler {
    stripper: Option<SectionStripper>,
    number_prefix: bool,
}

impl ItemAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 组装前先剥离标记小节
    pub fn with_stripper(mut self, stripper: SectionStripper) -> Self {
        self.stripper = Some(stripper);
        self
    }

    /// 在阿拉伯文前保留段落编号，如 "١- "
    pub fn with_number_prefix(mut self, enable: bool) -> Self {
        self.number_prefix = enable;
        self
    }

    fn arabic_text(&self, paragraph: &Paragraph) -> String {
        let text = paragraph.text.trim();
        if self.number_prefix && paragraph.has_number() {
            format!("{}- {}", to_arabic_indic(paragraph.num), text)
        } else {
            text.to_string()
        }
    }

    /// 由分段结果组装课文条目
    ///
    /// # 参数
    /// - `section_id`: 所属单元 ID
    /// - `position`: 在单元中的位置（从 1 开始）
    /// - `title_ar` / `title_fr`: 条目标题
    /// - `paragraphs`: 分段器输出
    /// - `translator`: 翻译服务
    pub fn text_item<T: Translator + ?Sized>(
        &self,
        section_id: u32,
        position: usize,
        title_ar: &str,
        title_fr: &str,
        paragraphs: Vec<Paragraph>,
        translator: &T,
    ) -> Item {
        let paragraphs = match &self.stripper {
            Some(stripper) => stripper.strip(paragraphs),
            None => paragraphs,
        };

        let lines = paragraphs
            .iter()
            .map(|paragraph| {
                let ar = self.arabic_text(paragraph);
                let fr = translator.translate(paragraph.text.trim());
                Line::new("", ar, fr)
            })
            .collect::<Vec<_>>();

        log::debug!("条目 {}.{}：{} 行", section_id, position, lines.len());

        Item {
            id: Item::derive_id(section_id, position),
            item_type: ItemType::Text,
            title_ar: title_ar.to_string(),
            title_fr: title_fr.to_string(),
            youtube: String::new(),
            pdf_page: None,
            lines,
        }
    }

    /// 由识别服务返回的结构化页面组装条目
    ///
    /// 页面形如 `{type, titleAr, titleFr, lines: [{speaker, arabic, french}]}`
    pub fn structured_page_item(&self, section_id: u32, position: usize, page: &SourceEntry) -> Item {
        let mut item = normalize_entry(section_id, position, page);
        if let Some(stripper) = &self.stripper {
            item.lines = stripper.strip(std::mem::take(&mut item.lines));
        }
        item
    }
}

/// 解析识别服务返回的结构化页面 JSON
pub fn parse_structured_page(json: &str) -> Result<SourceEntry> {
    Ok(serde_json::from_str(json)?)
}

/// 用组装好的条目构造单元，并按顺序重新编号
pub fn build_section(id: u32, title_ar: &str, title_fr: &str, items: Vec<Item>) -> Section {
    let mut section = Section {
        id,
        title_ar: title_ar.to_string(),
        title_fr: title_fr.to_string(),
        items,
    };
    section.renumber_items();
    section
}
