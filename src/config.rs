//! 分段与剥离的可调参数

use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 段落分段器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SegmenterConfig {
    /// 判定正文开始所需的连续阿拉伯字母数量
    pub min_arabic_run: usize,
    /// 标题行的最大字符数（不含）
    pub header_max_chars: usize,
    /// 标题行必须包含的标记字符
    pub header_marker: char,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_arabic_run: 10,
            header_max_chars: 60,
            header_marker: ':',
        }
    }
}

/// 小节剥离器配置
///
/// 默认值针对 تَهيئة（课前热身问题）小节
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StripperConfig {
    /// 小节标题标记（含带音符与不带音符的写法）
    pub target_markers: Vec<String>,
    /// 小节内部反复出现的提示语
    pub secondary_marker: String,
    /// 离开小节所需的最少字符数（不含）
    pub exit_min_chars: usize,
    /// 阿拉伯问号
    pub question_mark: char,
}

impl Default for StripperConfig {
    fn default() -> Self {
        Self {
            target_markers: vec!["تَهيئة".to_string(), "تهيئة".to_string()],
            secondary_marker: "فكر في".to_string(),
            exit_min_chars: 20,
            question_mark: '؟',
        }
    }
}

/// 整体配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub segmenter: SegmenterConfig,
    pub stripper: StripperConfig,
}

impl IngestConfig {
    /// 创建默认配置
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_segmenter(mut self, segmenter: SegmenterConfig) -> Self {
        self.segmenter = segmenter;
        self
    }

    pub fn with_stripper(mut self, stripper: StripperConfig) -> Self {
        self.stripper = stripper;
        self
    }

    /// 从 JSON 文本解析配置，缺失的字段使用默认值
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 从文件加载配置
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<()> {
        if self.stripper.target_markers.iter().all(|m| m.trim().is_empty()) {
            return Err(IngestError::InvalidConfig(
                "stripper.targetMarkers 不能为空".to_string(),
            ));
        }
        if self.segmenter.min_arabic_run == 0 {
            return Err(IngestError::InvalidConfig(
                "segmenter.minArabicRun 必须大于 0".to_string(),
            ));
        }
        Ok(())
    }
}
