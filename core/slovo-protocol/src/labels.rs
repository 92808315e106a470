//! Display labels shared by every producer of constituent trees.

// Constituent roles
pub const SUBJECT: &str = "主语";
pub const PREDICATE: &str = "谓语";
pub const OBJECT: &str = "宾语";
pub const ADVERBIAL: &str = "状语";
pub const HEAD_WORD: &str = "中心词";
pub const PREPOSITION: &str = "介词";

// Degraded trees
pub const EXPLANATION: &str = "说明";
pub const ERROR: &str = "Error";
pub const ERROR_TEXT: &str = "无法分析此句子";
pub const ERROR_TRANSLATION: &str = "错误";
pub const ANALYSIS_FAILED: &str = "分析失败";
pub const ANALYSIS_FAILED_TRANSLATION: &str = "无法完成分析";
pub const RETRY_HINT: &str = "请尝试重新分析或简化句子";
pub const HINT: &str = "提示";
pub const MORPHOLOGY_UNAVAILABLE: &str = "形态信息不可用";

/// Stored in place of a translation the service could not provide.
pub const TRANSLATION_FAILED: &str = "翻译失败";
