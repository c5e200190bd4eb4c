use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 单个字段的校验结果
///
/// - `false` / `""` / 无返回值 视为没有错误（[`Verdict::Valid`]）
/// - `true` 表示有错误但没有原因（[`Verdict::Invalid`]），需要展示原因时不要返回 `true`
/// - 非空字符串表示错误原因（[`Verdict::Reason`]）
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Verdict {
    #[default]
    Valid,
    Invalid,
    Reason(String),
}

impl Verdict {
    /// 条件成立时返回错误原因，相当于 `cond && 'reason'`
    pub fn when(condition: bool, reason: impl Into<String>) -> Self {
        if condition {
            Self::from(reason.into())
        } else {
            Self::Valid
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Valid)
    }

    pub fn is_valid(&self) -> bool {
        !self.is_error()
    }

    /// 可直接展示的内容：错误原因，其余情况为空字符串
    pub fn message(&self) -> &str {
        match self {
            Self::Reason(reason) => reason,
            Self::Valid | Self::Invalid => "",
        }
    }

    /// 原始值的文本形式，`Invalid` 写作 `true`
    pub(crate) fn raw_text(&self) -> &str {
        match self {
            Self::Valid => "",
            Self::Invalid => "true",
            Self::Reason(reason) => reason,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<bool> for Verdict {
    fn from(flag: bool) -> Self {
        if flag {
            Self::Invalid
        } else {
            Self::Valid
        }
    }
}

impl From<String> for Verdict {
    fn from(reason: String) -> Self {
        if reason.is_empty() {
            Self::Valid
        } else {
            Self::Reason(reason)
        }
    }
}

impl From<&str> for Verdict {
    fn from(reason: &str) -> Self {
        Self::from(reason.to_string())
    }
}

impl From<()> for Verdict {
    fn from(_: ()) -> Self {
        Self::Valid
    }
}

impl<T: Into<Verdict>> From<Option<T>> for Verdict {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl Serialize for Verdict {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        match self {
            Self::Invalid => serializer.serialize_bool(true),
            Self::Valid => serializer.serialize_str(""),
            Self::Reason(reason) => serializer.serialize_str(reason),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawVerdict {
    Flag(bool),
    Text(String),
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawVerdict::deserialize(deserializer)? {
            RawVerdict::Flag(flag) => flag.into(),
            RawVerdict::Text(text) => text.into(),
        })
    }
}
