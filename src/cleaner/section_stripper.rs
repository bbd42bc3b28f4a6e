use crate::config::StripperConfig;
use crate::parser::{Paragraph, QUESTION_PREFIX};
use crate::schema::Line;

/// 可被剥离器检查的记录
pub trait TextRecord {
    /// 用于判断的文本
    fn text(&self) -> &str;
}

impl TextRecord for Line {
    fn text(&self) -> &str {
        &self.ar
    }
}

impl TextRecord for Paragraph {
    fn text(&self) -> &str {
        &self.text
    }
}

impl TextRecord for String {
    fn text(&self) -> &str {
        self
    }
}

impl TextRecord for &str {
    fn text(&self) -> &str {
        self
    }
}

/// 剥离器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripState {
    /// 小节之外
    Outside,
    /// 小节之内
    InSection,
}

/// 对当前记录的处理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripAction {
    Emit,
    Drop,
}

/// 剥离结果
#[derive(Debug, Clone, PartialEq)]
pub struct StripOutcome<T> {
    /// 保留的记录
    pub kept: Vec<T>,
    /// 删除的记录数
    pub removed: usize,
    /// 输入结束时仍处于小节内（后续内容全部被删除）
    pub ended_in_section: bool,
}

/// 小节剥离器
///
/// 单遍线性扫描，删除从标记标题开始、到第一段实质性非问题内容之前的所有记录。
/// 标记出现后若始终没有满足退出条件的记录，则其后的记录全部删除。
#[derive(Debug, Clone, Default)]
pub struct SectionStripper {
    config: StripperConfig,
}

impl SectionStripper {
    /// 使用默认的 تَهيئة 标记创建剥离器
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: StripperConfig) -> Self {
        Self { config }
    }

    /// 文本是否包含小节标题标记
    pub fn is_marker(&self, text: &str) -> bool {
        self.config
            .target_markers
            .iter()
            .filter(|m| !m.is_empty())
            .any(|m| text.contains(m.as_str()))
    }

    /// 状态转移
    ///
    /// # 参数
    /// - `state`: 当前状态
    /// - `text`: 当前记录的文本
    ///
    /// # 返回
    /// `(下一状态, 对当前记录的处理)`
    pub fn transition(&self, state: StripState, text: &str) -> (StripState, StripAction) {
        match state {
            StripState::Outside => {
                if self.is_marker(text) {
                    (StripState::InSection, StripAction::Drop)
                } else {
                    (StripState::Outside, StripAction::Emit)
                }
            }
            StripState::InSection => {
                let trimmed = text.trim();

                // 小节内再次出现标题标记也一并删除
                if self.is_marker(trimmed)
                    || QUESTION_PREFIX.is_match(trimmed)
                    || (!self.config.secondary_marker.is_empty()
                        && trimmed.contains(self.config.secondary_marker.as_str()))
                {
                    return (StripState::InSection, StripAction::Drop);
                }

                if trimmed.chars().count() > self.config.exit_min_chars
                    && !trimmed.ends_with(self.config.question_mark)
                {
                    (StripState::Outside, StripAction::Emit)
                } else {
                    (StripState::InSection, StripAction::Drop)
                }
            }
        }
    }

    /// 剥离小节并返回统计信息
    pub fn strip_with_report<T, I>(&self, records: I) -> StripOutcome<T>
    where
        T: TextRecord,
        I: IntoIterator<Item = T>,
    {
        let mut state = StripState::Outside;
        let mut kept = Vec::new();
        let mut removed = 0;

        for record in records {
            let (next, action) = self.transition(state, record.text());
            if next != state {
                log::debug!("剥离器状态 {:?} -> {:?}", state, next);
            }
            state = next;

            match action {
                StripAction::Emit => kept.push(record),
                StripAction::Drop => removed += 1,
            }
        }

        let ended_in_section = state == StripState::InSection;
        if ended_in_section {
            log::warn!("标记小节延续到输入末尾，共删除 {} 条记录", removed);
        }

        StripOutcome {
            kept,
            removed,
            ended_in_section,
        }
    }

    /// 剥离小节
    ///
    /// # 返回
    /// 按原顺序保留的记录
    pub fn strip<T, I>(&self, records: I) -> Vec<T>
    where
        T: TextRecord,
        I: IntoIterator<Item = T>,
    {
        self.strip_with_report(records).kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const LONG_TEXT: &str = "هذا نص طويل يوضح الفكرة بشكل كامل وواضح.";

    #[test]
    fn test_removes_tahyia_block() {
        let stripper = SectionStripper::new();
        let records = vec!["مرحبا", "تَهيئة", "١- سؤال", LONG_TEXT];

        assert_eq!(stripper.strip(records), vec!["مرحبا", LONG_TEXT]);
    }

    #[test]
    fn test_undiacritized_marker() {
        let stripper = SectionStripper::new();
        let records = vec!["تهيئة", "٢- ما رأيك؟", LONG_TEXT];
        assert_eq!(stripper.strip(records), vec![LONG_TEXT]);
    }

    #[test]
    fn test_marker_absent_returns_input() {
        let stripper = SectionStripper::new();
        let records = vec!["أ", "١- ب", "فكر في ذلك"];
        assert_eq!(stripper.strip(records.clone()), records);
    }

    #[test]
    fn test_secondary_marker_dropped() {
        let stripper = SectionStripper::new();
        let records = vec![
            "تَهيئة",
            "فكر في الأسئلة التالية قبل قراءة النص الطويل",
            LONG_TEXT,
        ];
        assert_eq!(stripper.strip(records), vec![LONG_TEXT]);
    }

    #[test]
    fn test_long_question_stays_in_section() {
        let stripper = SectionStripper::new();
        let records = vec!["تَهيئة", "هل تحب أن تسافر إلى بلاد بعيدة جدا؟", LONG_TEXT];
        assert_eq!(stripper.strip(records), vec![LONG_TEXT]);
    }

    #[test]
    fn test_short_text_stays_in_section() {
        let stripper = SectionStripper::new();
        let records = vec!["تَهيئة", "نص قصير", LONG_TEXT];
        assert_eq!(stripper.strip(records), vec![LONG_TEXT]);
    }

    #[test]
    fn test_section_until_end_drops_rest() {
        let stripper = SectionStripper::new();
        let outcome = stripper.strip_with_report(vec!["أول", "تَهيئة", "١- سؤال", "قصير"]);

        assert_eq!(outcome.kept, vec!["أول"]);
        assert_eq!(outcome.removed, 3);
        assert!(outcome.ended_in_section);
    }

    #[test]
    fn test_reentry_after_exit() {
        let stripper = SectionStripper::new();
        let records = vec!["تَهيئة", LONG_TEXT, "تهيئة", "١- سؤال", LONG_TEXT];
        let outcome = stripper.strip_with_report(records);

        assert_eq!(outcome.kept, vec![LONG_TEXT, LONG_TEXT]);
        assert_eq!(outcome.removed, 3);
        assert!(!outcome.ended_in_section);
    }

    #[test]
    fn test_repeated_marker_inside_section() {
        let stripper = SectionStripper::new();
        let records = vec!["تَهيئة", "تَهيئة: اقرأ النص التالي ثم أجب عن الأسئلة.", LONG_TEXT];
        assert_eq!(stripper.strip(records), vec![LONG_TEXT]);
    }

    #[test]
    fn test_transitions() {
        let stripper = SectionStripper::new();
        assert_eq!(
            stripper.transition(StripState::Outside, "نص"),
            (StripState::Outside, StripAction::Emit)
        );
        assert_eq!(
            stripper.transition(StripState::Outside, "تَهيئة:"),
            (StripState::InSection, StripAction::Drop)
        );
        assert_eq!(
            stripper.transition(StripState::InSection, "  ٣- سؤال طويل جدا لا ينتهي بعلامة استفهام"),
            (StripState::InSection, StripAction::Drop)
        );
        assert_eq!(
            stripper.transition(StripState::InSection, LONG_TEXT),
            (StripState::Outside, StripAction::Emit)
        );
    }

    #[test]
    fn test_strips_lines_by_arabic_field() {
        let stripper = SectionStripper::new();
        let lines = vec![
            Line::new("", "تَهيئة", "Préparation"),
            Line::new("", "١- سؤال", "1- question"),
            Line::new("", LONG_TEXT, "Un long texte"),
        ];
        let kept = stripper.strip(lines);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].fr, "Un long texte");
    }

    #[test]
    fn test_strips_paragraphs() {
        let stripper = SectionStripper::new();
        let paragraphs = vec![
            Paragraph::numbered(0, "تَهيئة"),
            Paragraph::numbered(1, LONG_TEXT),
        ];
        assert_eq!(stripper.strip(paragraphs), vec![Paragraph::numbered(1, LONG_TEXT)]);
    }

    #[test]
    fn test_output_never_longer_and_prefix_preserved() {
        let stripper = SectionStripper::new();
        let records = vec!["أ", "ب", "ج", "تَهيئة", "د"];
        let kept = stripper.strip(records.clone());

        assert!(kept.len() <= records.len());
        assert_eq!(&kept[..3], &records[..3]);
    }

    fn record_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("تَهيئة".to_string()),
            Just("تهيئة:".to_string()),
            Just("١- سؤال".to_string()),
            Just("فكر في النص".to_string()),
            Just("هل تحب القراءة في المساء كل يوم؟".to_string()),
            Just("نص قصير".to_string()),
            Just(LONG_TEXT.to_string()),
            "[a-z ]{0,30}",
        ]
    }

    proptest! {
        #[test]
        fn prop_never_longer_and_keeps_prefix(records in proptest::collection::vec(record_strategy(), 0..25)) {
            let stripper = SectionStripper::new();
            let outcome = stripper.strip_with_report(records.clone());

            prop_assert!(outcome.kept.len() <= records.len());
            prop_assert_eq!(outcome.kept.len() + outcome.removed, records.len());

            let prefix = records
                .iter()
                .position(|r| stripper.is_marker(r))
                .unwrap_or(records.len());
            prop_assert_eq!(&outcome.kept[..prefix], &records[..prefix]);
        }
    }
}
