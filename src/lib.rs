//! 教材 OCR 文本的分段与 JSON 规范化核心
//!
//! 识别服务输出的原始文本 → 段落分段 → （可选）小节剥离 → 条目组装，
//! 各版本的旧 JSON → 规范文档（meta + sections/items/lines）。
//! 所有变换都是同步的纯函数，不做任何网络调用。

pub mod assembly;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod layout;
pub mod parser;
pub mod schema;


// 重新导出主要类型
pub use assembly::{build_section, parse_structured_page, ItemAssembler, Translator};
pub use cleaner::{clean_book, CleanReport, SectionStripper, StripState};
pub use config::{IngestConfig, SegmenterConfig, StripperConfig};
pub use error::{IngestError, Result};
pub use layout::{plan_units, UnitPagePlan};
pub use parser::{decode_ocr_bytes, Paragraph, ParagraphSegmenter, SegmenterState};
pub use schema::{
    concat_sections, next_section_id, BookDocument, BookMeta, Item, ItemType, Line,
    SchemaNormalizer, Section, SourceDocument,
};

/// 按配置创建分段器和剥离器
pub fn build_pipeline(config: &IngestConfig) -> (ParagraphSegmenter, SectionStripper) {
    (
        ParagraphSegmenter::with_config(config.segmenter.clone()),
        SectionStripper::with_config(config.stripper.clone()),
    )
}
