//! 类型定义

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// 主体类型
///
/// 决定主体描述句、主体替换词表以及使用哪一组运镜预设。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
pub enum SubjectType {
    #[strum(
        to_string = "Character",
        serialize = "character",
        serialize = "角色",
        ascii_case_insensitive
    )]
    Character,
    #[strum(
        to_string = "Object",
        serialize = "object",
        serialize = "物体",
        ascii_case_insensitive
    )]
    Object,
}

/// 节点输入参数, 同时也是 `parameter_options` 中的键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ParameterKind {
    SubjectType,
    #[strum(to_string = "character_camera_type")]
    CharacterCamera,
    #[strum(to_string = "object_camera_type")]
    ObjectCamera,
    #[strum(to_string = "lighting_type")]
    Lighting,
    CharacterAction,
    EmotionalExpression,
}
