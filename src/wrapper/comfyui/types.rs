//! ComfyUI 数据类型

/// 字符串
pub const NODE_STRING: &str = "STRING";
