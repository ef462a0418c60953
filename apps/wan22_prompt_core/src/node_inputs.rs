//! 节点输入声明
//!
//! 由预设表生成节点的输入参数列表, 节点层再把它转换为 ComfyUI 的 `INPUT_TYPES`。

use crate::{
    assembler::PromptRequest,
    error::{Error, Result},
    locale::Locale,
    preset::table::PresetTable,
    types::ParameterKind,
};

/// 主体文本输入名称
pub const CUSTOM_SUBJECT: &str = "custom_subject";

/// 输入类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// 下拉选项
    Choice(Vec<String>),
    /// 文本框
    Text { multiline: bool },
}

/// 单个输入参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputSpec {
    pub name: String,
    pub kind: InputKind,
    pub default: String,
    pub tooltip: &'static str,
}

/// 按节点参数顺序生成输入声明
pub fn input_specs(table: &PresetTable, locale: Locale) -> Vec<InputSpec> {
    let sentinels = locale.strings().sentinels;

    let choice = |kind: ParameterKind, default: Option<&str>, tooltip: &'static str| {
        let options = table.options(kind).to_vec();
        let default = default
            .map(str::to_string)
            .or_else(|| options.first().cloned())
            .unwrap_or_default();
        let mut options = options;
        if !default.is_empty() && !options.contains(&default) {
            options.insert(0, default.clone());
        }
        InputSpec {
            name: kind.to_string(),
            kind: InputKind::Choice(options),
            default,
            tooltip,
        }
    };

    vec![
        choice(
            ParameterKind::SubjectType,
            None,
            "Subject type, selects the subject sentence and the camera preset group",
        ),
        InputSpec {
            name: CUSTOM_SUBJECT.to_string(),
            kind: InputKind::Text { multiline: false },
            default: String::new(),
            tooltip: "Subject description, replaces the generic subject in every template",
        },
        choice(
            ParameterKind::CharacterCamera,
            None,
            "Camera movement used when the subject type is a character",
        ),
        choice(
            ParameterKind::ObjectCamera,
            None,
            "Camera movement used when the subject type is an object",
        ),
        choice(
            ParameterKind::Lighting,
            Some(sentinels.lighting),
            "Lighting effect",
        ),
        choice(
            ParameterKind::CharacterAction,
            Some(sentinels.action),
            "Character action",
        ),
        choice(
            ParameterKind::EmotionalExpression,
            Some(sentinels.emotion),
            "Emotional expression",
        ),
    ]
}

/// 检查必填的文本输入, 一次列出全部空值
pub fn validate_inputs(request: &PromptRequest) -> Result<()> {
    let empty = [
        (ParameterKind::SubjectType.to_string(), &request.subject_type),
        (CUSTOM_SUBJECT.to_string(), &request.subject),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(name, _)| name)
    .collect::<Vec<_>>();

    if empty.is_empty() {
        return Ok(());
    }
    Err(Error::InvalidInput(format!(
        "required inputs are empty: {}",
        empty.join(", ")
    )))
}
