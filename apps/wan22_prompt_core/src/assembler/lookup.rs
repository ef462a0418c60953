//! 描述查找策略
//!
//! 情绪与动作的描述可能存放在新旧两种位置, 依次尝试策略列表中的每一项, 第一个非空结果即为答案。
//!
//! - 情绪: 扁平映射 `emotional expression presets` -> 预设库 `emotional expression library`
//! - 动作: 合并后的动作库 `character action library` -> 动作文件原始条目 -> 旧版扁平映射
//!   `character action presets`

use tracing::debug;

use crate::preset::{
    resolver::{resolve_strict, split_label},
    table::PresetTable,
};

/// 查找策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionLookup {
    /// 标签 -> `{description}` 的扁平情绪映射
    EmotionPresets,
    /// `presets` 下以 id 为键的情绪库
    EmotionLibrary,
    /// 以 `"{id} - {name}"` 为键的动作库
    ActionLibrary,
    /// 动作文件中的原始条目
    ActionEntries,
    /// 标签 -> `{description}` 的旧版动作映射
    ActionPresets,
}

/// 情绪查找顺序
pub const EMOTION_LOOKUPS: &[DescriptionLookup] = &[
    DescriptionLookup::EmotionPresets,
    DescriptionLookup::EmotionLibrary,
];

/// 动作查找顺序
pub const ACTION_LOOKUPS: &[DescriptionLookup] = &[
    DescriptionLookup::ActionLibrary,
    DescriptionLookup::ActionEntries,
    DescriptionLookup::ActionPresets,
];

impl DescriptionLookup {
    /// 按当前策略查找描述
    pub fn find<'a>(self, table: &'a PresetTable, selection: &str) -> Option<&'a str> {
        let description = match self {
            DescriptionLookup::EmotionPresets => table
                .emotion_presets
                .get(selection)
                .map(|entry| entry.description.as_str()),
            DescriptionLookup::EmotionLibrary => {
                resolve_strict(selection, &table.emotion_library).and_then(|(key, _)| {
                    table
                        .emotion_library
                        .get(key)
                        .and_then(|preset| preset.description.as_deref())
                })
            }
            DescriptionLookup::ActionLibrary => {
                resolve_strict(selection, &table.action_library).and_then(|(key, _)| {
                    table
                        .action_library
                        .get(key)
                        .and_then(|preset| preset.description.as_deref())
                })
            }
            DescriptionLookup::ActionEntries => find_action_entry(table, selection),
            DescriptionLookup::ActionPresets => table
                .action_presets
                .actions
                .get(selection)
                .map(|entry| entry.description.as_str()),
        };

        description.filter(|d| !d.trim().is_empty())
    }
}

/// 依次尝试各策略
pub fn find_description<'a>(
    lookups: &[DescriptionLookup],
    table: &'a PresetTable,
    selection: &str,
) -> Option<&'a str> {
    lookups.iter().find_map(|lookup| {
        let description = lookup.find(table, selection)?;
        debug!("'{selection}' matched by {lookup:?}");
        Some(description)
    })
}

/// 在动作文件条目中查找: 完整标签 -> 名称 -> id -> 标签中的 id 前缀
fn find_action_entry<'a>(table: &'a PresetTable, selection: &str) -> Option<&'a str> {
    let entries = &table.action_entries;
    let selection_id = split_label(selection).map(|(id, _)| id);

    entries
        .iter()
        .find(|entry| entry.label() == selection)
        .or_else(|| entries.iter().find(|entry| entry.name == selection))
        .or_else(|| entries.iter().find(|entry| entry.id == selection))
        .or_else(|| {
            let id = selection_id?;
            entries.iter().find(|entry| entry.id == id)
        })
        .map(|entry| entry.description.as_str())
}
