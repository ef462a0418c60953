//! 语言字符串表
//!
//! 英文与中文共用同一套组装逻辑, 差异全部收敛在 [`StringTable`] 中:
//! 主体描述句、主体替换词、需要剥离的固定前缀、"无" 选项以及内置模板。

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::types::SubjectType;

/// 替换后主体的书写形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenForm {
    /// 原样
    Plain,
    /// 首字母大写
    Capitalized,
    /// 所有格
    Possessive,
    /// 首字母大写 + 所有格
    CapitalizedPossessive,
}

/// 主体替换词表, 按优先级排列, 较长的词必须排在其前缀之前
pub type SubjectTokens = &'static [(&'static str, TokenForm)];

/// "无" 选项, 选中时该类别不输出任何子句
#[derive(Debug, Clone, Copy)]
pub struct Sentinels {
    pub lighting: &'static str,
    pub action: &'static str,
    pub emotion: &'static str,
}

/// 通用 "无" 选项
pub const NONE: &str = "none";

/// 语言相关的字符串表
#[derive(Debug)]
pub struct StringTable {
    pub sentinels: Sentinels,
    pub character_clause: &'static str,
    pub object_clause: &'static str,
    pub character_tokens: SubjectTokens,
    pub object_tokens: SubjectTokens,
    pub possessive_suffix: &'static str,
    /// 是否按单词边界匹配替换词
    pub word_boundaries: bool,
    /// 运镜模板开头的固定主体描述, 按顺序匹配, 命中第一个即停止
    pub boilerplate_prefixes: &'static [&'static str],
    pub error_prefix: &'static str,
    pub subject_type_labels: [&'static str; 2],
    pub fallback_camera_name: &'static str,
    pub fallback_camera_template: &'static str,
    pub templates_file: &'static str,
    pub actions_file: &'static str,
    pub builtin_templates: &'static str,
    pub builtin_actions: &'static str,
}

impl StringTable {
    /// 主体描述句模板
    pub fn subject_clause(&self, subject_type: SubjectType) -> &'static str {
        match subject_type {
            SubjectType::Character => self.character_clause,
            SubjectType::Object => self.object_clause,
        }
    }

    /// 主体替换词表
    pub fn subject_tokens(&self, subject_type: SubjectType) -> SubjectTokens {
        match subject_type {
            SubjectType::Character => self.character_tokens,
            SubjectType::Object => self.object_tokens,
        }
    }
}

/// 模板语言
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    pub fn strings(self) -> &'static StringTable {
        match self {
            Locale::En => &EN,
            Locale::Zh => &ZH,
        }
    }
}

static EN: StringTable = StringTable {
    sentinels: Sentinels {
        lighting: "No Lighting Effect",
        action: "No Specific Action",
        emotion: "No Specific Emotion",
    },
    character_clause:
        "Subject stands in the center of the frame, with a clear full-body silhouette and natural posture.",
    object_clause:
        "Subject is located in the center of the frame, with a complete and clear structure, and a stable base touching the ground.",
    character_tokens: &[
        ("The subject's", TokenForm::CapitalizedPossessive),
        ("the subject's", TokenForm::Possessive),
        ("The subject", TokenForm::Capitalized),
        ("the subject", TokenForm::Plain),
        ("The character's", TokenForm::CapitalizedPossessive),
        ("the character's", TokenForm::Possessive),
        ("The character", TokenForm::Capitalized),
        ("the character", TokenForm::Plain),
        ("Subject's", TokenForm::CapitalizedPossessive),
        ("Subject", TokenForm::Capitalized),
        ("subject's", TokenForm::Possessive),
        ("subject", TokenForm::Plain),
        ("His or her", TokenForm::CapitalizedPossessive),
        ("his or her", TokenForm::Possessive),
        ("him or her", TokenForm::Plain),
        ("He or she", TokenForm::Capitalized),
        ("he or she", TokenForm::Plain),
    ],
    object_tokens: &[
        ("The subject's", TokenForm::CapitalizedPossessive),
        ("the subject's", TokenForm::Possessive),
        ("The subject", TokenForm::Capitalized),
        ("the subject", TokenForm::Plain),
        ("The object's", TokenForm::CapitalizedPossessive),
        ("the object's", TokenForm::Possessive),
        ("The object", TokenForm::Capitalized),
        ("the object", TokenForm::Plain),
        ("Subject's", TokenForm::CapitalizedPossessive),
        ("Subject", TokenForm::Capitalized),
        ("subject's", TokenForm::Possessive),
        ("subject", TokenForm::Plain),
        ("Its", TokenForm::CapitalizedPossessive),
        ("its", TokenForm::Possessive),
    ],
    possessive_suffix: "'s",
    word_boundaries: true,
    boilerplate_prefixes: &[
        "Subject is located in the center of the frame, with a complete and clear structure, and a stable base touching the ground.",
        "Subject stands in the center of the frame, with a clear full-body silhouette and natural posture.",
        "Subject is located in the center of the frame, with a complete and clear structure.",
        "Subject stands in the center of the frame.",
        "Subject is in the center of the frame.",
    ],
    error_prefix: "Error: ",
    subject_type_labels: ["Character", "Object"],
    fallback_camera_name: "Static Shot",
    fallback_camera_template: "The camera remains static, framing the subject steadily.",
    templates_file: "wan22_templates.json",
    actions_file: "character_actions.json",
    builtin_templates: include_str!("../resources/wan22_templates.json"),
    builtin_actions: include_str!("../resources/character_actions.json"),
};

static ZH: StringTable = StringTable {
    sentinels: Sentinels {
        lighting: "无灯光效果",
        action: "无特定动作",
        emotion: "无特定情绪",
    },
    character_clause: "主体站在画面中央，全身轮廓清晰，姿态自然。",
    object_clause: "主体位于画面中央，结构完整清晰，底座稳定接触地面。",
    character_tokens: &[
        ("主体的", TokenForm::Possessive),
        ("主体", TokenForm::Plain),
        ("角色的", TokenForm::Possessive),
        ("角色", TokenForm::Plain),
        ("他/她的", TokenForm::Possessive),
        ("他/她", TokenForm::Plain),
    ],
    object_tokens: &[
        ("主体的", TokenForm::Possessive),
        ("主体", TokenForm::Plain),
        ("物体的", TokenForm::Possessive),
        ("物体", TokenForm::Plain),
        ("它的", TokenForm::Possessive),
    ],
    possessive_suffix: "的",
    word_boundaries: false,
    boilerplate_prefixes: &[
        "主体位于画面中央，结构完整清晰，底座稳定接触地面。",
        "主体站在画面中央，全身轮廓清晰，姿态自然。",
        "主体位于画面中央，结构完整清晰。",
        "主体站在画面中央。",
        "主体在画面中央。",
    ],
    error_prefix: "错误: ",
    subject_type_labels: ["角色", "物体"],
    fallback_camera_name: "固定镜头",
    fallback_camera_template: "镜头保持固定，稳定地框住主体。",
    templates_file: "wan22_templates_zh.json",
    actions_file: "character_actions_zh.json",
    builtin_templates: include_str!("../resources/wan22_templates_zh.json"),
    builtin_actions: include_str!("../resources/character_actions_zh.json"),
};
