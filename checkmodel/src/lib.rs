//! checkmodel - 表单字段校验模型
//!
//! 根据"字段 -> 校验方法"的映射创建校验模型：
//! - 单独调用某个字段的校验方法（例如 blur/change 事件），立即得到可展示的错误原因
//! - 提交时调用 `validate` 得到是否存在错误，并通过 `state` 读取每个字段的详细信息
//! - `clear_validate` 清空记录的错误信息
//!
//! ```
//! use checkmodel::{CheckModel, Record, ValidatorMap, Verdict};
//!
//! #[derive(Record)]
//! struct Profile {
//!     name: String,
//! }
//!
//! let model: CheckModel<Profile> = CheckModel::new(
//!     ValidatorMap::new().with(ProfileField::Name, |_, source: Option<&Profile>, _| {
//!         Verdict::when(source.map_or(true, |s| s.name.is_empty()), "required")
//!     }),
//! );
//!
//! assert!(model.validate(&Profile { name: String::new() }, None, None));
//! assert_eq!(model.error(ProfileField::Name), Some(Verdict::from("required")));
//!
//! assert!(!model.validate(&Profile { name: "Bob".into() }, None, None));
//! assert_eq!(model.error(ProfileField::Name), Some(Verdict::Valid));
//! ```

pub mod check_config;
pub mod check_model;
pub mod diagnostics;
pub mod error;
pub mod field;
pub mod logging;
pub mod options;
pub mod rules;
pub mod state;
pub mod value;
pub mod verdict;

pub use check_config::CheckConfig;
pub use check_model::{create_check_model, CheckModel, FieldValidator, ValidatorMap};
pub use diagnostics::{DiagnosticMode, FailureHook};
pub use error::{CheckError, CheckResult};
pub use field::{FieldKey, Record};
pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use options::{CheckOptions, DEFAULT_LABEL};
pub use state::ErrorState;
pub use value::current_value;
pub use verdict::Verdict;

// 重新导出宏
pub use checkmodel_macros::Record;
