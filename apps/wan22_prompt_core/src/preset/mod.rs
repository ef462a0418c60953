//! 预设表的加载与解析

pub mod resolver;
pub mod store;
pub mod table;

pub use resolver::{resolve, resolve_strict, Resolution, DEFAULT_PRESET_KEY, LABEL_SEPARATOR};
pub use store::{LoadFailure, PresetStore, StoreConfig, TEMPLATES_DIR_ENV};
pub use table::{ActionDocument, ActionEntry, Preset, PresetCollection, PresetTable};
