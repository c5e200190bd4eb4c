use crate::diagnostics::DiagnosticMode;
use crate::error::{CheckError, CheckResult};
use serde::Deserialize;

/// 诊断输出默认使用的前缀
pub const DEFAULT_LABEL: &str = "[checkModel]";

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

/// `CheckModel` 的构建选项
///
/// ```toml
/// diagnostics = "warn"
/// label = "[signup]"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckOptions {
    /// 校验失败时的诊断输出（默认：off）
    #[serde(default)]
    pub diagnostics: DiagnosticMode,

    /// 诊断输出的前缀（默认：`[checkModel]`）
    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            diagnostics: DiagnosticMode::Off,
            label: default_label(),
        }
    }
}

impl CheckOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(mut self, mode: DiagnosticMode) -> Self {
        self.diagnostics = mode;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn from_toml_str(content: &str) -> CheckResult<Self> {
        toml::from_str(content).map_err(|e| CheckError::Config(e.to_string()))
    }
}
