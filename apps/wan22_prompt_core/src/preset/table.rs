//! 预设表

use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{
    locale::Locale,
    types::{ParameterKind, SubjectType},
};

pub const CHARACTER_CAMERA_PRESETS: &str = "character camera presets";
pub const OBJECT_CAMERA_PRESETS: &str = "object camera presets";
pub const LIGHTING_EFFECTS_LIBRARY: &str = "lighting effects library";
pub const EMOTIONAL_EXPRESSION_PRESETS: &str = "emotional expression presets";
pub const EMOTIONAL_EXPRESSION_LIBRARY: &str = "emotional expression library";
pub const CHARACTER_ACTION_PRESETS: &str = "character action presets";
pub const CHARACTER_ACTION_LIBRARY: &str = "character action library";

/// 单个预设
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// 以 id 为键的预设集合
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PresetCollection {
    #[serde(default)]
    pub presets: BTreeMap<String, Preset>,
}

impl PresetCollection {
    pub fn get(&self, key: &str) -> Option<&Preset> {
        self.presets.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.presets.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.presets.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Preset)> {
        self.presets.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn insert(&mut self, key: impl Into<String>, preset: Preset) {
        self.presets.insert(key.into(), preset);
    }
}

impl FromIterator<(String, Preset)> for PresetCollection {
    fn from_iter<T: IntoIterator<Item = (String, Preset)>>(iter: T) -> Self {
        Self {
            presets: iter.into_iter().collect(),
        }
    }
}

/// 只有描述的扁平条目
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DescriptionEntry {
    #[serde(default)]
    pub description: String,
}

/// 灯光效果库, 标签 -> 文本
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LightingLibrary {
    #[serde(default)]
    pub effects: BTreeMap<String, String>,
}

/// 旧版人物动作, 标签 -> 描述
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ActionPresets {
    #[serde(default)]
    pub actions: BTreeMap<String, DescriptionEntry>,
}

/// 人物动作文件中的单个动作
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEntry {
    #[serde(deserialize_with = "id_from_value")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ActionEntry {
    /// 选项标签 "{id} - {name}"
    pub fn label(&self) -> String {
        format!("{} - {}", self.id, self.name)
    }
}

/// 人物动作文件
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ActionDocument {
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

/// id 允许写成数字或字符串
fn id_from_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "action id must be a string or number, got {other}"
        ))),
    }
}

/// 预设表
///
/// 加载后只读, 组装过程中不会被修改。
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct PresetTable {
    /// 各输入参数的可选项
    #[serde(default)]
    pub parameter_options: BTreeMap<String, Vec<String>>,
    #[serde(rename = "character camera presets", default)]
    pub character_camera: PresetCollection,
    #[serde(rename = "object camera presets", default)]
    pub object_camera: PresetCollection,
    #[serde(rename = "lighting effects library", default)]
    pub lighting: LightingLibrary,
    #[serde(rename = "emotional expression presets", default)]
    pub emotion_presets: BTreeMap<String, DescriptionEntry>,
    #[serde(rename = "emotional expression library", default)]
    pub emotion_library: PresetCollection,
    #[serde(rename = "character action presets", default)]
    pub action_presets: ActionPresets,
    #[serde(rename = "character action library", default)]
    pub action_library: PresetCollection,
    /// 人物动作文件中的原始条目
    #[serde(skip)]
    pub action_entries: Vec<ActionEntry>,
}

impl PresetTable {
    /// 最小默认预设表, 模板文件无法读取时使用
    pub fn minimal(locale: Locale) -> Self {
        let strings = locale.strings();
        let camera: PresetCollection = [(
            "1".to_string(),
            Preset {
                name: strings.fallback_camera_name.to_string(),
                template: Some(strings.fallback_camera_template.to_string()),
                description: None,
            },
        )]
        .into_iter()
        .collect();
        let camera_label = format!("1 - {}", strings.fallback_camera_name);

        let parameter_options = BTreeMap::from([
            (
                ParameterKind::SubjectType.to_string(),
                strings
                    .subject_type_labels
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
            (
                ParameterKind::CharacterCamera.to_string(),
                vec![camera_label.clone()],
            ),
            (ParameterKind::ObjectCamera.to_string(), vec![camera_label]),
            (
                ParameterKind::Lighting.to_string(),
                vec![strings.sentinels.lighting.to_string()],
            ),
            (
                ParameterKind::CharacterAction.to_string(),
                vec![strings.sentinels.action.to_string()],
            ),
            (
                ParameterKind::EmotionalExpression.to_string(),
                vec![strings.sentinels.emotion.to_string()],
            ),
        ]);

        Self {
            parameter_options,
            character_camera: camera.clone(),
            object_camera: camera,
            ..Default::default()
        }
    }

    /// 输入参数的可选项
    pub fn options(&self, kind: ParameterKind) -> &[String] {
        self.parameter_options
            .get(kind.as_ref())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 按主体类型选择运镜预设集合, 同时返回类别名称
    pub fn camera(&self, subject_type: SubjectType) -> (&PresetCollection, &'static str) {
        match subject_type {
            SubjectType::Character => (&self.character_camera, CHARACTER_CAMERA_PRESETS),
            SubjectType::Object => (&self.object_camera, OBJECT_CAMERA_PRESETS),
        }
    }

    /// 合并人物动作文件
    ///
    /// 改写 `character_action` 的可选项为 `[sentinel, "{id} - {name}", ...]`,
    /// 并生成以 `"{id} - {name}"` 为键的动作库。
    pub fn merge_actions(&mut self, document: ActionDocument, sentinel: &str) {
        let mut options = Vec::with_capacity(document.actions.len() + 1);
        options.push(sentinel.to_string());

        for entry in &document.actions {
            let label = entry.label();
            options.push(label.clone());
            self.action_library.insert(
                label,
                Preset {
                    name: entry.name.clone(),
                    template: None,
                    description: Some(entry.description.clone()),
                },
            );
        }

        self.parameter_options
            .insert(ParameterKind::CharacterAction.to_string(), options);
        self.action_entries = document.actions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections() -> anyhow::Result<()> {
        let table: PresetTable = serde_json::from_str(
            r#"{
                "parameter_options": {"lighting_type": ["No Lighting Effect", "Rim Light"]},
                "object camera presets": {"presets": {
                    "1": {"name": "Orbit", "template": "The camera orbits the subject."}
                }},
                "lighting effects library": {"effects": {"Rim Light": "A rim light outlines the subject."}},
                "emotional expression presets": {"Happy": {"description": "smiling"}}
            }"#,
        )?;

        assert_eq!(
            table.options(ParameterKind::Lighting),
            ["No Lighting Effect", "Rim Light"]
        );
        assert!(table.options(ParameterKind::CharacterAction).is_empty());
        assert_eq!(table.object_camera.len(), 1);
        assert!(table.character_camera.is_empty());
        assert_eq!(table.emotion_presets["Happy"].description, "smiling");
        assert!(table.lighting.effects.contains_key("Rim Light"));
        Ok(())
    }

    #[test]
    fn test_merge_actions() -> anyhow::Result<()> {
        let document: ActionDocument = serde_json::from_str(
            r#"{"actions": [
                {"id": 1, "name": "Walking", "description": "The subject walks."},
                {"id": "2", "name": "Waving", "description": "The subject waves."}
            ]}"#,
        )?;

        let mut table = PresetTable::default();
        table.merge_actions(document, "No Specific Action");

        assert_eq!(
            table.options(ParameterKind::CharacterAction),
            ["No Specific Action", "1 - Walking", "2 - Waving"]
        );
        let walking = table.action_library.get("1 - Walking");
        assert_eq!(
            walking.and_then(|p| p.description.as_deref()),
            Some("The subject walks.")
        );
        assert_eq!(table.action_entries.len(), 2);
        Ok(())
    }

    #[test]
    fn test_action_id_must_be_scalar() {
        let result: Result<ActionDocument, _> =
            serde_json::from_str(r#"{"actions": [{"id": [1], "name": "Bad"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_minimal_table() {
        for locale in [Locale::En, Locale::Zh] {
            let table = PresetTable::minimal(locale);
            let strings = locale.strings();
            assert_eq!(table.options(ParameterKind::SubjectType).len(), 2);
            assert_eq!(
                table.options(ParameterKind::Lighting),
                [strings.sentinels.lighting]
            );
            let (camera, _) = table.camera(SubjectType::Object);
            assert!(camera.get("1").and_then(|p| p.template.as_ref()).is_some());
        }
    }
}
