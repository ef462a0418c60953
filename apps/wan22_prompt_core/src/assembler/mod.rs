//! 提示词组装
//!
//! 按固定顺序拼接子句: 主体 -> 情绪 -> 动作 -> 运镜 -> 灯光, 以单个空格连接。
//! 每次调用只依赖输入与只读的预设表, 不保存任何跨调用状态。

pub mod lookup;
pub mod substitute;

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    str::FromStr,
    sync::Arc,
};

use tracing::{debug, info, Dispatch};

use crate::{
    error::{Error, Result},
    locale::{Locale, StringTable, NONE},
    preset::{resolver::resolve_with_rule, table::PresetTable},
    types::SubjectType,
};

pub use lookup::{find_description, DescriptionLookup, ACTION_LOOKUPS, EMOTION_LOOKUPS};
pub use substitute::{capitalize, SubjectSubstituter};

/// 日志中预览的提示词长度
const PREVIEW_CHARS: usize = 100;

/// 单次组装的输入
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub subject_type: String,
    pub subject: String,
    pub character_camera: String,
    pub object_camera: String,
    pub lighting: String,
    pub action: String,
    pub emotion: String,
}

impl PromptRequest {
    pub fn new(subject_type: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            subject_type: subject_type.into(),
            subject: subject.into(),
            ..Default::default()
        }
    }

    pub fn with_character_camera(mut self, selection: impl Into<String>) -> Self {
        self.character_camera = selection.into();
        self
    }

    pub fn with_object_camera(mut self, selection: impl Into<String>) -> Self {
        self.object_camera = selection.into();
        self
    }

    pub fn with_lighting(mut self, selection: impl Into<String>) -> Self {
        self.lighting = selection.into();
        self
    }

    pub fn with_action(mut self, selection: impl Into<String>) -> Self {
        self.action = selection.into();
        self
    }

    pub fn with_emotion(mut self, selection: impl Into<String>) -> Self {
        self.emotion = selection.into();
        self
    }
}

/// 提示词组装器
///
/// 预设表只读共享, 组装器本身可以跨线程使用。
#[derive(Debug, Clone)]
pub struct PromptAssembler {
    table: Arc<PresetTable>,
    locale: Locale,
    character: SubjectSubstituter,
    object: SubjectSubstituter,
    dispatch: Option<Dispatch>,
}

impl PromptAssembler {
    pub fn new(table: Arc<PresetTable>, locale: Locale) -> Result<Self> {
        let strings = locale.strings();
        Ok(Self {
            table,
            locale,
            character: SubjectSubstituter::new(strings.character_tokens, strings)?,
            object: SubjectSubstituter::new(strings.object_tokens, strings)?,
            dispatch: None,
        })
    }

    /// 指定日志输出, 组装过程中的日志只发送给该 dispatcher
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn table(&self) -> &PresetTable {
        &self.table
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn strings(&self) -> &'static StringTable {
        self.locale.strings()
    }

    fn substituter(&self, subject_type: SubjectType) -> &SubjectSubstituter {
        match subject_type {
            SubjectType::Character => &self.character,
            SubjectType::Object => &self.object,
        }
    }

    /// 组装提示词
    pub fn assemble(&self, request: &PromptRequest) -> Result<String> {
        match &self.dispatch {
            Some(dispatch) => {
                tracing::dispatcher::with_default(dispatch, || self.assemble_clauses(request))
            }
            None => self.assemble_clauses(request),
        }
    }

    /// 组装提示词, 组装过程中的 panic 也转换为错误
    pub fn assemble_guarded(&self, request: &PromptRequest) -> Result<String> {
        panic::catch_unwind(AssertUnwindSafe(|| self.assemble(request)))
            .unwrap_or_else(|payload| Err(Error::Assembly(panic_message(payload.as_ref()))))
    }

    /// 组装提示词, 失败时返回带错误前缀的文本
    pub fn render(&self, request: &PromptRequest) -> String {
        self.assemble_guarded(request)
            .unwrap_or_else(|e| self.error_output(&e))
    }

    /// 错误输出文本
    pub fn error_output(&self, error: &Error) -> String {
        format!("{}{error}", self.strings().error_prefix)
    }

    fn assemble_clauses(&self, request: &PromptRequest) -> Result<String> {
        let subject = request.subject.trim();
        if subject.is_empty() {
            return Err(Error::EmptySubject);
        }

        let subject_type = SubjectType::from_str(request.subject_type.trim())
            .map_err(|_| Error::UnknownSubjectType(request.subject_type.clone()))?;
        let substituter = self.substituter(subject_type);

        let camera_selection = match subject_type {
            SubjectType::Character => &request.character_camera,
            SubjectType::Object => &request.object_camera,
        };

        let clauses = [
            Some(substituter.apply(self.strings().subject_clause(subject_type), subject)),
            self.emotion_clause(&request.emotion),
            self.action_clause(&request.action, substituter, subject),
            Some(self.camera_clause(subject_type, camera_selection, subject)?),
            self.lighting_clause(&request.lighting, substituter, subject),
        ];

        let prompt = clauses
            .into_iter()
            .flatten()
            .filter(|clause| !clause.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        info!("generated prompt length: {}", prompt.chars().count());
        info!(
            "prompt: {}...",
            prompt.chars().take(PREVIEW_CHARS).collect::<String>()
        );
        Ok(prompt)
    }

    fn emotion_clause(&self, selection: &str) -> Option<String> {
        if is_disabled(selection, self.strings().sentinels.emotion) {
            return None;
        }
        find_description(EMOTION_LOOKUPS, &self.table, selection).map(str::to_string)
    }

    fn action_clause(
        &self,
        selection: &str,
        substituter: &SubjectSubstituter,
        subject: &str,
    ) -> Option<String> {
        if is_disabled(selection, self.strings().sentinels.action) {
            return None;
        }
        find_description(ACTION_LOOKUPS, &self.table, selection)
            .map(|description| substituter.apply(description, subject))
    }

    /// 运镜子句
    ///
    /// 解析到的预设没有模板时返回错误; 否则替换主体并剥离开头的固定主体描述。
    pub fn camera_clause(
        &self,
        subject_type: SubjectType,
        selection: &str,
        subject: &str,
    ) -> Result<String> {
        let (presets, category) = self.table.camera(subject_type);
        let (key, rule) = resolve_with_rule(selection, presets);
        debug!("camera '{selection}' resolved to '{key}' by {rule:?}");

        let template = presets
            .get(&key)
            .and_then(|preset| preset.template.as_deref())
            .filter(|template| !template.trim().is_empty())
            .ok_or_else(|| Error::TemplateNotFound {
                category: category.to_string(),
                key: key.clone(),
                available: presets.keys().cloned().collect(),
            })?;

        let substituter = self.substituter(subject_type);
        let camera = substituter.apply(template, subject);

        for prefix in self.strings().boilerplate_prefixes {
            let prefix = substituter.apply(prefix, subject);
            if let Some(rest) = camera.strip_prefix(prefix.as_str()) {
                return Ok(rest.trim_start().to_string());
            }
        }
        Ok(camera)
    }

    fn lighting_clause(
        &self,
        selection: &str,
        substituter: &SubjectSubstituter,
        subject: &str,
    ) -> Option<String> {
        if is_disabled(selection, self.strings().sentinels.lighting) {
            return None;
        }
        self.table
            .lighting
            .effects
            .get(selection)
            .filter(|text| !text.trim().is_empty())
            .map(|text| substituter.apply(text, subject))
    }
}

/// 选中 "无" 或未选择
fn is_disabled(selection: &str, sentinel: &str) -> bool {
    let selection = selection.trim();
    selection.is_empty() || selection == sentinel || selection.eq_ignore_ascii_case(NONE)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic".to_string()
    }
}
