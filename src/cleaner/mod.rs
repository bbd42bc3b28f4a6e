// 记录清理：按内容启发式删除教材中的特定小节

pub mod book_cleaner;
pub mod section_stripper;

pub use book_cleaner::{clean_book, CleanReport, RemovedLines};
pub use section_stripper::{SectionStripper, StripAction, StripOutcome, StripState, TextRecord};
