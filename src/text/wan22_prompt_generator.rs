//! Wan2.2 提示词预设生成器
//!
//! 根据主体类型、运镜、灯光、动作与情绪的预设组合生成一条视频提示词。
//! 英文与中文节点共用同一套实现, 仅语言不同。

use std::sync::Arc;

use log::error;
use pyo3::{
    pyclass, pymethods,
    types::{PyDict, PyDictMethods, PyType},
    Bound, Py, PyResult, Python,
};
use wan22_prompt_core::{
    node_inputs::{input_specs, validate_inputs, InputKind},
    Locale, PresetStore, PromptAssembler, PromptRequest, StoreConfig,
};

use crate::{
    core::category::CATEGORY_PROMPT,
    error::Error,
    wrapper::comfyui::{types::NODE_STRING, PromptServer},
};

/// 按语言构建组装器
fn build_assembler(locale: Locale) -> Result<PromptAssembler, Error> {
    let table = PresetStore::load_or_fallback(&StoreConfig::from_env(locale));
    Ok(PromptAssembler::new(Arc::new(table), locale)?)
}

/// 按预设表构建 INPUT_TYPES
fn build_input_types(py: Python<'_>, locale: Locale) -> PyResult<Py<PyDict>> {
    let table = PresetStore::load_or_fallback(&StoreConfig::from_env(locale));

    let dict = PyDict::new(py);
    dict.set_item("required", {
        let required = PyDict::new(py);

        for spec in input_specs(&table, locale) {
            let attribute = PyDict::new(py);
            attribute.set_item("default", &spec.default)?;
            attribute.set_item("tooltip", spec.tooltip)?;

            match spec.kind {
                InputKind::Choice(options) => {
                    required.set_item(&spec.name, (options, attribute))?;
                }
                InputKind::Text { multiline } => {
                    attribute.set_item("multiline", multiline)?;
                    required.set_item(&spec.name, (NODE_STRING, attribute))?;
                }
            }
        }

        required
    })?;
    Ok(dict.into())
}

/// 配置的模板文件能否正常加载
fn is_valid_node(locale: Locale) -> bool {
    PresetStore::load(&StoreConfig::from_env(locale)).is_ok()
}

/// 英文与中文节点的公共执行流程
trait PromptGenerator: PromptServer {
    const NODE_NAME: &'static str;

    fn assembler(&self) -> &PromptAssembler;

    /// 组装失败时返回错误文本, 节点本身不抛出异常
    #[allow(clippy::too_many_arguments)]
    fn generate(
        &self,
        py: Python<'_>,
        subject_type: &str,
        custom_subject: &str,
        character_camera_type: &str,
        object_camera_type: &str,
        lighting_type: &str,
        character_action: &str,
        emotional_expression: &str,
    ) -> PyResult<(String,)> {
        let request = PromptRequest::new(subject_type, custom_subject)
            .with_character_camera(character_camera_type)
            .with_object_camera(object_camera_type)
            .with_lighting(lighting_type)
            .with_action(character_action)
            .with_emotion(emotional_expression);

        let assembler = self.assembler();
        let results = validate_inputs(&request).and_then(|_| assembler.assemble_guarded(&request));

        match results {
            Ok(prompt) => Ok((prompt,)),
            Err(e) => {
                error!("{} error, {e}", Self::NODE_NAME);
                if let Err(e) = self.send_error(py, Self::NODE_NAME.to_string(), e.to_string()) {
                    error!("send error failed, {e}");
                };
                Ok((assembler.error_output(&e),))
            }
        }
    }
}

/// Wan2.2 提示词预设生成器
#[pyclass(subclass)]
pub struct Wan22PromptGenerator {
    assembler: PromptAssembler,
}

impl PromptServer for Wan22PromptGenerator {}

impl PromptGenerator for Wan22PromptGenerator {
    const NODE_NAME: &'static str = "Wan22PromptGenerator";

    fn assembler(&self) -> &PromptAssembler {
        &self.assembler
    }
}

#[pymethods]
impl Wan22PromptGenerator {
    #[new]
    fn new() -> PyResult<Self> {
        let assembler = build_assembler(Locale::En)?;
        Ok(Self { assembler })
    }

    #[classattr]
    #[pyo3(name = "RETURN_TYPES")]
    fn return_types() -> (&'static str,) {
        (NODE_STRING,)
    }

    #[classattr]
    #[pyo3(name = "RETURN_NAMES")]
    fn return_names() -> (&'static str,) {
        ("prompt",)
    }

    #[classattr]
    #[pyo3(name = "CATEGORY")]
    const CATEGORY: &'static str = CATEGORY_PROMPT;

    #[classattr]
    #[pyo3(name = "DESCRIPTION")]
    fn description() -> &'static str {
        "Generate a Wan2.2 video prompt from subject, camera, lighting, action and emotion presets."
    }

    #[classattr]
    #[pyo3(name = "FUNCTION")]
    const FUNCTION: &'static str = "execute";

    #[classmethod]
    #[pyo3(name = "INPUT_TYPES")]
    fn input_types(_cls: &Bound<'_, PyType>) -> PyResult<Py<PyDict>> {
        Python::with_gil(|py| build_input_types(py, Locale::En))
    }

    #[classmethod]
    #[pyo3(name = "IS_CHANGED", signature = (**_kwargs))]
    fn is_changed(_cls: &Bound<'_, PyType>, _kwargs: Option<Bound<'_, PyDict>>) -> f64 {
        f64::NAN
    }

    #[classmethod]
    #[pyo3(name = "IS_A_VALID_NODE")]
    fn is_a_valid_node(_cls: &Bound<'_, PyType>) -> bool {
        is_valid_node(Locale::En)
    }

    #[allow(clippy::too_many_arguments)]
    #[pyo3(name = "execute")]
    fn execute<'py>(
        &mut self,
        py: Python<'py>,
        subject_type: &str,
        custom_subject: &str,
        character_camera_type: &str,
        object_camera_type: &str,
        lighting_type: &str,
        character_action: &str,
        emotional_expression: &str,
    ) -> PyResult<(String,)> {
        self.generate(
            py,
            subject_type,
            custom_subject,
            character_camera_type,
            object_camera_type,
            lighting_type,
            character_action,
            emotional_expression,
        )
    }
}

/// Wan2.2 提示词预设生成器 (中文)
#[pyclass(subclass)]
pub struct Wan22PromptGeneratorZh {
    assembler: PromptAssembler,
}

impl PromptServer for Wan22PromptGeneratorZh {}

impl PromptGenerator for Wan22PromptGeneratorZh {
    const NODE_NAME: &'static str = "Wan22PromptGeneratorZh";

    fn assembler(&self) -> &PromptAssembler {
        &self.assembler
    }
}

#[pymethods]
impl Wan22PromptGeneratorZh {
    #[new]
    fn new() -> PyResult<Self> {
        let assembler = build_assembler(Locale::Zh)?;
        Ok(Self { assembler })
    }

    #[classattr]
    #[pyo3(name = "RETURN_TYPES")]
    fn return_types() -> (&'static str,) {
        (NODE_STRING,)
    }

    #[classattr]
    #[pyo3(name = "RETURN_NAMES")]
    fn return_names() -> (&'static str,) {
        ("prompt",)
    }

    #[classattr]
    #[pyo3(name = "CATEGORY")]
    const CATEGORY: &'static str = CATEGORY_PROMPT;

    #[classattr]
    #[pyo3(name = "DESCRIPTION")]
    fn description() -> &'static str {
        "根据主体、运镜、灯光、动作与情绪预设生成 Wan2.2 视频提示词。"
    }

    #[classattr]
    #[pyo3(name = "FUNCTION")]
    const FUNCTION: &'static str = "execute";

    #[classmethod]
    #[pyo3(name = "INPUT_TYPES")]
    fn input_types(_cls: &Bound<'_, PyType>) -> PyResult<Py<PyDict>> {
        Python::with_gil(|py| build_input_types(py, Locale::Zh))
    }

    #[classmethod]
    #[pyo3(name = "IS_CHANGED", signature = (**_kwargs))]
    fn is_changed(_cls: &Bound<'_, PyType>, _kwargs: Option<Bound<'_, PyDict>>) -> f64 {
        f64::NAN
    }

    #[classmethod]
    #[pyo3(name = "IS_A_VALID_NODE")]
    fn is_a_valid_node(_cls: &Bound<'_, PyType>) -> bool {
        is_valid_node(Locale::Zh)
    }

    #[allow(clippy::too_many_arguments)]
    #[pyo3(name = "execute")]
    fn execute<'py>(
        &mut self,
        py: Python<'py>,
        subject_type: &str,
        custom_subject: &str,
        character_camera_type: &str,
        object_camera_type: &str,
        lighting_type: &str,
        character_action: &str,
        emotional_expression: &str,
    ) -> PyResult<(String,)> {
        self.generate(
            py,
            subject_type,
            custom_subject,
            character_camera_type,
            object_camera_type,
            lighting_type,
            character_action,
            emotional_expression,
        )
    }
}
