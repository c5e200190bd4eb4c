/// 返回当前应该取值的数据来源
///
/// 显式传入的 `value` 优先；否则从 `source` 中取字段；两者都没有时返回 `None`。
///
/// ```
/// use checkmodel::current_value;
///
/// struct Form {
///     a: i32,
/// }
///
/// let form = Form { a: 1 };
/// assert_eq!(current_value(Some(&5), Some(&form), |f| &f.a), Some(&5));
/// assert_eq!(current_value(None, Some(&form), |f| &f.a), Some(&1));
/// assert_eq!(current_value(None, None::<&Form>, |f| &f.a), None);
/// ```
pub fn current_value<'a, S, T, F>(value: Option<&'a T>, source: Option<&'a S>, get: F) -> Option<&'a T>
where
    S: ?Sized,
    T: ?Sized,
    F: FnOnce(&'a S) -> &'a T,
{
    match value {
        Some(value) => Some(value),
        None => source.map(get),
    }
}
