//! Wan2.2 Prompt Core - 提示词预设组装
//!
//! 从预设表中选取主体、情绪、动作、运镜与灯光片段, 替换主体后拼接为一条生成提示词。

pub mod assembler;
pub mod error;
pub mod locale;
pub mod node_inputs;
pub mod preset;
pub mod types;
pub mod utils;

pub use assembler::{PromptAssembler, PromptRequest};
pub use error::{Error, Result};
pub use locale::Locale;
pub use preset::{LoadFailure, PresetStore, PresetTable, StoreConfig};
pub use types::{ParameterKind, SubjectType};
