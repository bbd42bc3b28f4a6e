use serde::{Deserialize, Serialize};

/// 单元的页面规划：一页标题 + 若干内容页
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitPagePlan {
    pub unit: u32,
    pub title_page: u32,
    pub content_pages: Vec<u32>,
}

/// 按固定节奏规划各单元的页面
///
/// 从 `first_title_page` 开始，每个单元占用 1 页标题和
/// `content_pages_per_unit` 页内容；超出总页数的内容页被截断，
/// 没有内容页的单元不输出。
///
/// # 参数
/// - `total_pages`: PDF 总页数
/// - `first_title_page`: 第一个单元标题所在页（从 1 开始）
/// - `content_pages_per_unit`: 每个单元的内容页数
/// - `start_unit`: 第一个单元的编号
pub fn plan_units(
    total_pages: u32,
    first_title_page: u32,
    content_pages_per_unit: u32,
    start_unit: u32,
) -> Vec<UnitPagePlan> {
    let mut plans = Vec::new();
    if content_pages_per_unit == 0 {
        return plans;
    }

    let mut unit = start_unit;
    let mut page = first_title_page.max(1);

    while page <= total_pages {
        let content_pages: Vec<u32> = (1..=content_pages_per_unit)
            .map_while(|offset| page.checked_add(offset))
            .filter(|p| *p <= total_pages)
            .collect();

        if !content_pages.is_empty() {
            plans.push(UnitPagePlan {
                unit,
                title_page: page,
                content_pages,
            });
        }

        unit = unit.saturating_add(1);
        match content_pages_per_unit
            .checked_add(1)
            .and_then(|stride| page.checked_add(stride))
        {
            Some(next) => page = next,
            None => break,
        }
    }

    log::debug!("规划 {} 个单元（共 {} 页）", plans.len(), total_pages);
    plans
}
