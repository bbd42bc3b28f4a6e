use super::*;
use crate::config::SegmenterConfig;

/// 分段器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmenterState {
    /// 跳过识别模型输出的开场白
    SkippingPreamble,
    /// 正文段落累积中
    InParagraph,
}

/// 段落分段器
///
/// 将一个条目的完整识别文本切分为有序的编号段落：
/// 1. 跳过开场白，直到遇到编号行或一段足够长的阿拉伯文字
/// 2. 编号行开始新段落，其余非空行接续当前段落
/// 3. 结束时输出最后一个段落
#[derive(Debug, Clone, Default)]
pub struct ParagraphSegmenter {
    config: SegmenterConfig,
}

/// 段落累积器
#[derive(Default)]
struct Accumulator {
    current: Paragraph,
    output: Vec<Paragraph>,
}

impl Accumulator {
    fn start(&mut self, next: Paragraph) {
        let previous = std::mem::replace(&mut self.current, next);
        if !previous.is_empty() {
            self.output.push(previous);
        }
    }

    fn finish(mut self) -> Vec<Paragraph> {
        if !self.current.is_empty() {
            self.output.push(self.current);
        }
        self.output
    }
}

impl ParagraphSegmenter {
    /// 使用默认阈值创建分段器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用自定义阈值创建分段器
    pub fn with_config(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// 判断某行是否为正文开始
    ///
    /// 以“数字串 + 分隔符”开头，或含有足够长的连续阿拉伯字母
    pub fn is_content_start(&self, line: &str) -> bool {
        NUMBERED_PREFIX.is_match(line) || longest_arabic_run(line) >= self.config.min_arabic_run
    }

    /// 解析编号行
    ///
    /// # 参数
    /// - `line`: 已去除首尾空白的行
    ///
    /// # 返回
    /// `(编号, 余下文本)`；不是编号行时返回 None
    pub fn parse_numbered_line<'a>(&self, line: &'a str) -> Option<(u32, &'a str)> {
        let caps = NUMBERED_LINE.captures(line)?;
        let num = numerals::to_int(caps.get(1)?.as_str());
        let rest = caps.get(2).map_or("", |m| m.as_str());
        Some((num, rest))
    }

    /// 短标题判断：少于阈值字符且包含冒号
    pub fn is_header_line(&self, line: &str) -> bool {
        line.chars().count() < self.config.header_max_chars
            && line.contains(self.config.header_marker)
    }

    /// 将整段识别文本切分为段落
    ///
    /// # 参数
    /// - `text`: 同一条目所有页面拼接后的识别文本
    ///
    /// # 返回
    /// 有序段落列表（可能为空）
    pub fn segment(&self, text: &str) -> Vec<Paragraph> {
        let mut state = SegmenterState::SkippingPreamble;
        let mut preamble: Vec<&str> = Vec::new();
        let mut acc = Accumulator::default();

        for line in text.lines() {
            match state {
                SegmenterState::SkippingPreamble => {
                    if self.is_content_start(line) {
                        if !preamble.is_empty() {
                            log::debug!("跳过开场白 {} 行", preamble.len());
                            preamble.clear();
                        }
                        state = SegmenterState::InParagraph;
                        self.feed(&mut acc, line);
                    } else {
                        preamble.push(line);
                    }
                }
                SegmenterState::InParagraph => self.feed(&mut acc, line),
            }
        }

        // 没有任何行满足正文开始条件，保留全部内容
        if state == SegmenterState::SkippingPreamble {
            for line in preamble {
                self.feed(&mut acc, line);
            }
        }

        let paragraphs = acc.finish();
        log::debug!("分段完成：{} 个段落", paragraphs.len());
        paragraphs
    }

    /// 解码原始字节后分段
    pub fn segment_bytes(&self, bytes: &[u8]) -> Vec<Paragraph> {
        self.segment(&decode_ocr_bytes(bytes))
    }

    fn feed(&self, acc: &mut Accumulator, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }

        if let Some((num, rest)) = self.parse_numbered_line(trimmed) {
            acc.start(Paragraph::numbered(num, rest));
        } else if !acc.current.is_empty() {
            // 换行续接
            acc.current.text.push(' ');
            acc.current.text.push_str(trimmed);
        } else {
            acc.current.text = trimmed.to_string();
            acc.current.is_header = self.is_header_line(trimmed);
        }
    }
}
