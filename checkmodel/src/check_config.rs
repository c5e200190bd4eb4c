use crate::error::{CheckError, CheckResult};
use crate::field::FieldKey;
use serde::de::{Deserialize, Deserializer, Error as _};
use std::collections::HashMap;

/// 单次 `validate` 需要校验的字段
///
/// 没有列出或者标记为 `false` 的字段会被跳过，同时删除它记录的错误信息。
/// 适用于多个 tab 字段不同、但共用一个 `CheckModel` 的场景。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig<K: FieldKey> {
    flags: HashMap<K, bool>,
}

impl<K: FieldKey> CheckConfig<K> {
    pub fn new() -> Self {
        Self {
            flags: HashMap::new(),
        }
    }

    pub fn include(mut self, key: K) -> Self {
        self.flags.insert(key, true);
        self
    }

    pub fn exclude(mut self, key: K) -> Self {
        self.flags.insert(key, false);
        self
    }

    pub fn set(&mut self, key: K, included: bool) {
        self.flags.insert(key, included);
    }

    /// 未设置的字段视为不校验
    pub fn is_included(&self, key: K) -> bool {
        self.flags.get(&key).copied().unwrap_or(false)
    }

    /// 从字段名构建，名称必须对应某个字段
    pub fn from_names<'a, I>(flags: I) -> CheckResult<Self>
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut config = Self::new();
        for (name, included) in flags {
            let key = K::from_name(name).ok_or_else(|| CheckError::unknown_field(name))?;
            config.set(key, included);
        }
        Ok(config)
    }
}

impl<K: FieldKey> Default for CheckConfig<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: FieldKey> FromIterator<K> for CheckConfig<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().map(|key| (key, true)).collect(),
        }
    }
}

impl<K: FieldKey> FromIterator<(K, bool)> for CheckConfig<K> {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}

impl<'de, K: FieldKey> Deserialize<'de> for CheckConfig<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, bool>::deserialize(deserializer)?;
        Self::from_names(raw.iter().map(|(name, included)| (name.as_str(), *included)))
            .map_err(D::Error::custom)
    }
}
