//! 校验失败时的诊断输出
//!
//! 默认什么都不做；可以改成通过 `tracing` 输出，或者注入自定义的 hook。

use crate::field::FieldKey;
use crate::state::ErrorState;
use serde::Deserialize;
use std::fmt;

/// 内置诊断输出的级别
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticMode {
    #[default]
    Off,
    Warn,
    Debug,
}

/// 自定义诊断 hook：参数为完整的错误状态和本次失败信息列表
pub type FailureHook<K> = Box<dyn Fn(&ErrorState<K>, &[String])>;

pub(crate) enum Diagnostics<K> {
    Off,
    Log { mode: DiagnosticMode, label: String },
    Hook(FailureHook<K>),
}

impl<K: FieldKey> Diagnostics<K> {
    pub(crate) fn from_mode(mode: DiagnosticMode, label: &str) -> Self {
        match mode {
            DiagnosticMode::Off => Self::Off,
            mode => Self::Log {
                mode,
                label: label.to_string(),
            },
        }
    }

    /// 只在有失败的校验之后调用
    pub(crate) fn emit(&self, state: &ErrorState<K>, failures: &[String]) {
        match self {
            Self::Off => {}
            Self::Log { mode, label } => match mode {
                DiagnosticMode::Warn => {
                    tracing::warn!(target: "checkmodel", ?state, ?failures, "{}#####state", label)
                }
                DiagnosticMode::Debug => {
                    tracing::debug!(target: "checkmodel", ?state, ?failures, "{}#####state", label)
                }
                DiagnosticMode::Off => {}
            },
            Self::Hook(hook) => hook(state, failures),
        }
    }
}

impl<K> fmt::Debug for Diagnostics<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("Off"),
            Self::Log { mode, label } => f
                .debug_struct("Log")
                .field("mode", mode)
                .field("label", label)
                .finish(),
            Self::Hook(_) => f.write_str("Hook(..)"),
        }
    }
}
