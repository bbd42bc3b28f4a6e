use super::section_stripper::SectionStripper;
use crate::schema::BookDocument;

/// 单个条目的删除记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedLines {
    pub section_id: u32,
    pub item_id: String,
    pub removed: usize,
    /// 标记小节延续到条目末尾
    pub ended_in_section: bool,
}

/// 整本书的清理报告
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// 只包含确有删除的条目
    pub items: Vec<RemovedLines>,
    pub total_removed: usize,
}

/// 对书中每个条目的行执行小节剥离
///
/// # 参数
/// - `book`: 规范化后的文档，原地修改
/// - `stripper`: 小节剥离器
///
/// # 返回
/// 删除统计
pub fn clean_book(book: &mut BookDocument, stripper: &SectionStripper) -> CleanReport {
    let mut report = CleanReport::default();

    for section in &mut book.sections {
        for item in &mut section.items {
            let lines = std::mem::take(&mut item.lines);
            let outcome = stripper.strip_with_report(lines);
            item.lines = outcome.kept;

            if outcome.removed > 0 {
                log::info!(
                    "单元 {}，条目 {}：删除 {} 行",
                    section.id,
                    item.id,
                    outcome.removed
                );
                report.total_removed += outcome.removed;
                report.items.push(RemovedLines {
                    section_id: section.id,
                    item_id: item.id.clone(),
                    removed: outcome.removed,
                    ended_in_section: outcome.ended_in_section,
                });
            }
        }
    }

    log::info!("{}：共删除 {} 行", book.meta.id, report.total_removed);
    report
}
