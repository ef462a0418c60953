//! 预设解析
//!
//! 把界面上的选项标签解析为预设表中的键, 按以下顺序尝试, 命中即返回:
//! 1. 与键完全相同
//! 2. 含有 `" - "` 分隔符时, 分隔符之前的部分是键
//! 3. 纯数字, 且本身就是一个键
//! 4. 与某个预设的 `name` 相同, 重名时按兜底规则的键顺序取第一个
//! 5. 兜底: 数字键按数值排序、非数字键排在所有数字键之后, 取最小的键;
//!    集合为空时返回 [`DEFAULT_PRESET_KEY`]
//!
//! 选项列表中的标签总是 `"{id} - {name}"` 形式, 其余规则用于兼容旧工作流中保存的 id 或名称。

use tracing::debug;

use super::table::PresetCollection;

/// 空集合时的默认键
pub const DEFAULT_PRESET_KEY: &str = "1";

/// 选项标签中 id 与名称的分隔符
pub const LABEL_SEPARATOR: &str = " - ";

/// 命中的解析规则
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    ExactKey,
    LabelPrefix,
    NumericId,
    Name,
    Fallback,
    Default,
}

/// 拆分 `"{id} - {name}"` 形式的标签
pub fn split_label(selection: &str) -> Option<(&str, &str)> {
    selection.split_once(LABEL_SEPARATOR)
}

/// 解析选项标签, 总能返回一个键
pub fn resolve(selection: &str, presets: &PresetCollection) -> String {
    resolve_with_rule(selection, presets).0
}

/// 解析选项标签, 同时返回命中的规则
pub fn resolve_with_rule(selection: &str, presets: &PresetCollection) -> (String, Resolution) {
    if let Some((key, rule)) = resolve_strict(selection, presets) {
        return (key.to_string(), rule);
    }

    match fallback_key(presets) {
        Some(key) => {
            debug!("no preset matches '{selection}', falling back to '{key}'");
            (key.to_string(), Resolution::Fallback)
        }
        None => (DEFAULT_PRESET_KEY.to_string(), Resolution::Default),
    }
}

/// 只使用前四条规则, 未命中时返回 None
pub fn resolve_strict<'a>(
    selection: &str,
    presets: &'a PresetCollection,
) -> Option<(&'a str, Resolution)> {
    if let Some((key, _)) = presets.presets.get_key_value(selection) {
        return Some((key.as_str(), Resolution::ExactKey));
    }

    if let Some((id, _)) = split_label(selection) {
        if let Some((key, _)) = presets.presets.get_key_value(id) {
            return Some((key.as_str(), Resolution::LabelPrefix));
        }
    }

    if parse_numeric(selection).is_some() {
        if let Some((key, _)) = presets.presets.get_key_value(selection) {
            return Some((key.as_str(), Resolution::NumericId));
        }
    }

    presets
        .iter()
        .filter(|(_, preset)| preset.name == selection)
        .map(|(key, _)| key.as_str())
        .min_by_key(|key| key_order(*key))
        .map(|key| (key, Resolution::Name))
}

/// 纯数字字符串
fn parse_numeric(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

/// 键的排序: 数字键按数值在前, 其余按字符串在后
fn key_order(key: &str) -> (u8, u64, &str) {
    match parse_numeric(key) {
        Some(n) => (0, n, key),
        None => (1, 0, key),
    }
}

/// 排序后最小的键
fn fallback_key(presets: &PresetCollection) -> Option<&str> {
    presets.keys().map(String::as_str).min_by_key(|key| key_order(*key))
}
