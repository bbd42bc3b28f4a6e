/// 阿拉伯-印度数字字形，按数值排列
const ARABIC_INDIC_DIGITS: [char; 10] = ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'];

/// 判断字符是否为阿拉伯-印度数字（٠–٩）
pub fn is_arabic_indic_digit(c: char) -> bool {
    ('\u{0660}'..='\u{0669}').contains(&c)
}

/// 单个字形对应的数值，ASCII 数字映射为自身
fn digit_value(c: char) -> Option<u32> {
    if is_arabic_indic_digit(c) {
        Some(c as u32 - 0x0660)
    } else {
        c.to_digit(10)
    }
}

/// 将阿拉伯-印度数字串转换为整数
///
/// 调用方只会传入已经分离出来的数字串。结果 `0` 是哨兵值，
/// 表示“没有显式编号”，不代表第零段。
///
/// # 参数
/// - `run`: 数字串，例如 `"٢٣"`
///
/// # 返回
/// 对应的整数；空串、含非数字字符或超出 `u32` 范围时返回 `0`
pub fn to_int(run: &str) -> u32 {
    let mut value: u32 = 0;
    let mut seen = false;

    for c in run.chars() {
        let Some(d) = digit_value(c) else {
            return 0;
        };
        value = match value.checked_mul(10).and_then(|v| v.checked_add(d)) {
            Some(v) => v,
            None => {
                log::debug!("数字串超出范围: {}", run);
                return 0;
            }
        };
        seen = true;
    }

    if seen {
        value
    } else {
        0
    }
}

/// 将整数编码为阿拉伯-印度数字串
///
/// 例如 `23` → `"٢٣"`
pub fn to_arabic_indic(n: u32) -> String {
    n.to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| ARABIC_INDIC_DIGITS[d as usize])
        .collect()
}
