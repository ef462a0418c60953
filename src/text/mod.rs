//! 文本相关的节点
use pyo3::{
    types::{PyModule, PyModuleMethods},
    Bound, PyResult, Python,
};

use crate::core::node::NodeRegister;

mod wan22_prompt_generator;
pub use wan22_prompt_generator::{Wan22PromptGenerator, Wan22PromptGeneratorZh};

/// 文本模块
pub fn submodule(py: Python<'_>) -> PyResult<Bound<'_, PyModule>> {
    let submodule = PyModule::new(py, "text")?;
    submodule.add_class::<Wan22PromptGenerator>()?;
    submodule.add_class::<Wan22PromptGeneratorZh>()?;
    Ok(submodule)
}

/// Text node register
pub fn node_register(py: Python<'_>) -> PyResult<Vec<NodeRegister<'_>>> {
    let nodes: Vec<NodeRegister> = vec![
        NodeRegister(
            "Wan22PromptGenerator",
            py.get_type::<Wan22PromptGenerator>(),
            "Wan2.2 Prompt Preset Generator",
        ),
        NodeRegister(
            "Wan22PromptGeneratorZh",
            py.get_type::<Wan22PromptGeneratorZh>(),
            "Wan2.2 提示词预设生成器",
        ),
    ];
    Ok(nodes)
}
