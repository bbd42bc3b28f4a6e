use encoding_rs::{Encoding, UTF_8, WINDOWS_1256};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

// 子模块声明
pub mod numerals;
pub mod paragraph_segmenter;

pub use paragraph_segmenter::{ParagraphSegmenter, SegmenterState};

lazy_static! {
    /// 编号段落行：数字串 + 分隔符（- – :）+ 余下文本
    pub(crate) static ref NUMBERED_LINE: Regex =
        Regex::new(r"^([٠-٩]+)\s*[-–:]\s*(.*)$").unwrap();

    /// 以编号开头的行（只检查开头部分）
    pub(crate) static ref NUMBERED_PREFIX: Regex =
        Regex::new(r"^\s*[٠-٩]+\s*[-–:]").unwrap();

    /// 问题编号行：数字串 + 连字符
    pub(crate) static ref QUESTION_PREFIX: Regex =
        Regex::new(r"^[٠-٩]+-").unwrap();
}

/// 段落记录
///
/// 由分段器产生，`num == 0` 表示无编号段落
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// 段落编号，0 表示无编号
    pub num: u32,
    /// 段落正文
    pub text: String,
    /// 是否为短标题行
    pub is_header: bool,
}

impl Paragraph {
    /// 创建编号段落
    pub fn numbered(num: u32, text: impl Into<String>) -> Self {
        Self {
            num,
            text: text.into(),
            is_header: false,
        }
    }

    /// 是否有显式编号
    pub fn has_number(&self) -> bool {
        self.num != 0
    }

    /// 段落是否尚无内容
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// 统计字符串中最长的连续阿拉伯字母（U+0600–U+06FF）数量
pub fn longest_arabic_run(text: &str) -> usize {
    let mut longest = 0;
    let mut current = 0;

    for c in text.chars() {
        if ('\u{0600}'..='\u{06FF}').contains(&c) {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }

    longest
}

/// 检测识别结果的字符编码
///
/// 1. 检查 BOM
/// 2. 尝试 UTF-8
/// 3. 回退到 Windows-1256（阿拉伯语旧代码页）
fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_length)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    if std::str::from_utf8(bytes).is_ok() {
        return UTF_8;
    }

    WINDOWS_1256
}

/// 将识别服务返回的原始字节解码为文本
///
/// # 参数
/// - `bytes`: 原始字节
///
/// # 返回
/// 解码后的文本（已去掉 BOM）
pub fn decode_ocr_bytes(bytes: &[u8]) -> String {
    let encoding = detect_encoding(bytes);
    let (content, encoding_used, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::warn!("识别文本解码时出现错误 ({})，可能存在乱码", encoding_used.name());
    }
    content.into_owned()
}
