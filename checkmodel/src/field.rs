use std::fmt::Debug;
use std::hash::Hash;

/// 字段键
///
/// 一般由 `#[derive(Record)]` 为数据结构自动生成，每个变体对应一个字段。
pub trait FieldKey: Copy + Eq + Hash + Debug + 'static {
    /// 全部字段，按声明顺序
    const ALL: &'static [Self];

    /// 字段对外的名称
    fn name(&self) -> &'static str;

    /// 按名称查找字段
    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|key| key.name() == name)
    }
}

/// 可被校验的数据记录
///
/// 把记录类型和它的字段枚举绑定在一起，`CheckModel<S>` 只接受 `S::Field`
/// 作为校验器的键。
pub trait Record {
    type Field: FieldKey;
}
