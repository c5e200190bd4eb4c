use crate::field::FieldKey;
use crate::verdict::Verdict;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// 上次校验之后每个字段记录下来的结果
///
/// 按字段第一次被记录的顺序保存。只有 `CheckModel` 能修改它，
/// 外部通过 [`CheckModel::state`](crate::CheckModel::state) 只读访问。
#[derive(Clone)]
pub struct ErrorState<K> {
    entries: Vec<(K, Verdict)>,
}

impl<K: FieldKey> ErrorState<K> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn get(&self, key: K) -> Option<&Verdict> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, verdict)| verdict)
    }

    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 是否有任意字段记录了错误
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|(_, verdict)| verdict.is_error())
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &Verdict)> + '_ {
        self.entries.iter().map(|(k, verdict)| (*k, verdict))
    }

    pub(crate) fn set(&mut self, key: K, verdict: Verdict) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = verdict,
            None => self.entries.push((key, verdict)),
        }
    }

    pub(crate) fn remove(&mut self, key: K) -> Option<Verdict> {
        let index = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// 所有已记录字段重置为空，不删除字段
    pub(crate) fn reset(&mut self) {
        for (_, verdict) in &mut self.entries {
            *verdict = Verdict::Valid;
        }
    }
}

impl<K: FieldKey> fmt::Debug for ErrorState<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, verdict)| (k.name(), verdict.raw_text())))
            .finish()
    }
}

impl<K: FieldKey> Serialize for ErrorState<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, verdict) in &self.entries {
            map.serialize_entry(k.name(), verdict)?;
        }
        map.end()
    }
}
