//! 预设加载
//!
//! 默认使用编译时内嵌的模板, 设置了模板目录时从磁盘读取。
//! 主模板不可用时返回错误, 同时附带一份最小默认预设表, 调用方永远拿得到可用的表。

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::{
    error::{Error, Result},
    locale::Locale,
    preset::table::{ActionDocument, PresetTable},
};

/// 模板目录环境变量
pub const TEMPLATES_DIR_ENV: &str = "WAN22_PROMPT_TEMPLATES_DIR";

const BUILTIN_SOURCE: &str = "<builtin>";

/// 加载配置
#[derive(Debug, Default, Clone)]
pub struct StoreConfig {
    /// 模板目录, 为空时使用内嵌模板
    pub templates_dir: Option<PathBuf>,
    pub locale: Locale,
}

impl StoreConfig {
    pub fn new(locale: Locale) -> Self {
        Self {
            templates_dir: None,
            locale,
        }
    }

    /// 从环境变量读取模板目录
    pub fn from_env(locale: Locale) -> Self {
        let templates_dir = env::var_os(TEMPLATES_DIR_ENV)
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from);
        Self {
            templates_dir,
            locale,
        }
    }

    pub fn with_templates_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.templates_dir = Some(dir.into());
        self
    }

    /// 主模板文件路径
    pub fn templates_path(&self) -> Option<PathBuf> {
        self.templates_dir
            .as_ref()
            .map(|dir| dir.join(self.locale.strings().templates_file))
    }

    /// 人物动作文件路径
    pub fn actions_path(&self) -> Option<PathBuf> {
        self.templates_dir
            .as_ref()
            .map(|dir| dir.join(self.locale.strings().actions_file))
    }
}

/// 主模板加载失败, 附带最小默认预设表
#[derive(Debug)]
pub struct LoadFailure {
    pub error: Error,
    pub fallback: PresetTable,
}

/// 预设仓库
pub struct PresetStore;

impl PresetStore {
    /// 加载预设表
    pub fn load(config: &StoreConfig) -> std::result::Result<PresetTable, LoadFailure> {
        let locale = config.locale;
        let strings = locale.strings();

        let table = match config.templates_dir {
            Some(_) => Self::load_from_disk(config),
            None => Self::from_documents(
                BUILTIN_SOURCE,
                strings.builtin_templates,
                Some(strings.builtin_actions),
                locale,
            ),
        };

        table.map_err(|error| LoadFailure {
            error,
            fallback: PresetTable::minimal(locale),
        })
    }

    /// 加载预设表, 失败时记录日志并返回最小默认预设表
    pub fn load_or_fallback(config: &StoreConfig) -> PresetTable {
        match Self::load(config) {
            Ok(table) => table,
            Err(LoadFailure { error, fallback }) => {
                warn!("using minimal default presets, {error}");
                fallback
            }
        }
    }

    /// 从 JSON 文本构建预设表
    ///
    /// 人物动作文件是可选的, 解析失败时忽略并保留主模板中的动作配置。
    pub fn from_documents(
        source: &str,
        templates: &str,
        actions: Option<&str>,
        locale: Locale,
    ) -> Result<PresetTable> {
        let mut table: PresetTable =
            serde_json::from_str(templates).map_err(|e| Error::ConfigLoad {
                path: source.to_string(),
                reason: e.to_string(),
            })?;

        if let Some(actions) = actions {
            match serde_json::from_str::<ActionDocument>(actions) {
                Ok(document) => {
                    table.merge_actions(document, locale.strings().sentinels.action);
                }
                Err(e) => warn!("ignoring character actions from {source}, {e}"),
            }
        }

        info!(
            "loaded parameter options: {:?}",
            table.parameter_options.keys().collect::<Vec<_>>()
        );
        for (name, options) in &table.parameter_options {
            info!("{name}: {} options", options.len());
        }

        Ok(table)
    }

    fn load_from_disk(config: &StoreConfig) -> Result<PresetTable> {
        let templates_path = config
            .templates_path()
            .ok_or_else(|| Error::InvalidInput("templates directory is not set".to_string()))?;
        let templates = Self::read(&templates_path)?;

        let actions = config
            .actions_path()
            .filter(|path| path.is_file())
            .and_then(|path| match Self::read(&path) {
                Ok(content) => Some(content),
                Err(e) => {
                    warn!("{e}");
                    None
                }
            });

        Self::from_documents(
            &templates_path.to_string_lossy(),
            &templates,
            actions.as_deref(),
            config.locale,
        )
    }

    fn read(path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
            path: path.to_string_lossy().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParameterKind;

    const TEMPLATES: &str = r#"{
        "parameter_options": {
            "subject_type": ["Character", "Object"],
            "character_action": ["No Specific Action", "Walking"]
        },
        "character action presets": {"actions": {"Walking": {"description": "The subject walks."}}}
    }"#;

    const ACTIONS: &str = r#"{"actions": [{"id": 1, "name": "Running", "description": "The subject runs."}]}"#;

    #[test]
    fn test_builtin_tables_load() {
        for locale in [Locale::En, Locale::Zh] {
            let table = PresetStore::load(&StoreConfig::new(locale));
            assert!(table.is_ok(), "{locale} builtin templates failed to load");
        }
    }

    #[test]
    fn test_load_from_dir_merges_actions() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("wan22_templates.json"), TEMPLATES)?;
        fs::write(dir.path().join("character_actions.json"), ACTIONS)?;

        let config = StoreConfig::new(Locale::En).with_templates_dir(dir.path());
        let table = PresetStore::load(&config).map_err(|f| f.error)?;

        assert_eq!(
            table.options(ParameterKind::CharacterAction),
            ["No Specific Action", "1 - Running"]
        );
        assert!(table.action_library.contains_key("1 - Running"));
        Ok(())
    }

    #[test]
    fn test_missing_actions_file_keeps_base_options() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("wan22_templates.json"), TEMPLATES)?;

        let config = StoreConfig::new(Locale::En).with_templates_dir(dir.path());
        let table = PresetStore::load(&config).map_err(|f| f.error)?;

        assert_eq!(
            table.options(ParameterKind::CharacterAction),
            ["No Specific Action", "Walking"]
        );
        assert!(table.action_library.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_actions_file_is_ignored() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("wan22_templates.json"), TEMPLATES)?;
        fs::write(dir.path().join("character_actions.json"), "{ not json")?;

        let config = StoreConfig::new(Locale::En).with_templates_dir(dir.path());
        let table = PresetStore::load(&config).map_err(|f| f.error)?;
        assert_eq!(table.options(ParameterKind::CharacterAction).len(), 2);
        Ok(())
    }

    #[test]
    fn test_missing_primary_returns_fallback() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let config = StoreConfig::new(Locale::Zh).with_templates_dir(dir.path());

        let failure = match PresetStore::load(&config) {
            Ok(_) => anyhow::bail!("expected a load failure"),
            Err(failure) => failure,
        };
        assert!(matches!(failure.error, Error::ConfigLoad { .. }));
        assert_eq!(
            failure.fallback.options(ParameterKind::SubjectType),
            ["角色", "物体"]
        );
        Ok(())
    }

    #[test]
    fn test_malformed_primary_returns_fallback() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("wan22_templates.json"), "[1, 2")?;
        let config = StoreConfig::new(Locale::En).with_templates_dir(dir.path());

        match PresetStore::load(&config) {
            Err(LoadFailure {
                error: Error::ConfigLoad { path, .. },
                ..
            }) => assert!(path.ends_with("wan22_templates.json"), "{path}"),
            other => anyhow::bail!("expected a config load error, got {other:?}"),
        }

        let table = PresetStore::load_or_fallback(&config);
        assert_eq!(table.character_camera.len(), 1);
        assert_eq!(
            table.options(ParameterKind::Lighting),
            ["No Lighting Effect"]
        );
        Ok(())
    }
}
