use crate::check_config::CheckConfig;
use crate::diagnostics::{Diagnostics, FailureHook};
use crate::field::{FieldKey, Record};
use crate::options::CheckOptions;
use crate::state::ErrorState;
use crate::verdict::Verdict;
use std::cell::{Ref, RefCell};
use std::fmt;

type BoxedValidator<S, V, E> = Box<dyn Fn(Option<&V>, Option<&S>, Option<&E>) -> Verdict>;

/// 字段 -> 校验方法
///
/// 校验方法接收 `(value, source, extras)`，返回任何能转换成 [`Verdict`] 的值。
/// 整体校验时 `value` 为 `None`，校验方法需要自己从 `source` 里取值，
/// 一般配合 [`current_value`](crate::current_value) 使用。
pub struct ValidatorMap<S: Record, V = String, E = ()> {
    entries: Vec<(S::Field, BoxedValidator<S, V, E>)>,
}

impl<S: Record, V, E> ValidatorMap<S, V, E> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// 注册字段的校验方法；字段已存在时原位替换
    pub fn insert<F, R>(&mut self, key: S::Field, validator: F)
    where
        F: Fn(Option<&V>, Option<&S>, Option<&E>) -> R + 'static,
        R: Into<Verdict>,
    {
        let boxed: BoxedValidator<S, V, E> =
            Box::new(move |value: Option<&V>, source: Option<&S>, extras: Option<&E>| {
                validator(value, source, extras).into()
            });

        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = boxed,
            None => self.entries.push((key, boxed)),
        }
    }

    pub fn with<F, R>(mut self, key: S::Field, validator: F) -> Self
    where
        F: Fn(Option<&V>, Option<&S>, Option<&E>) -> R + 'static,
        R: Into<Verdict>,
    {
        self.insert(key, validator);
        self
    }

    pub fn contains(&self, key: S::Field) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = S::Field> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    fn get(&self, key: S::Field) -> Option<&BoxedValidator<S, V, E>> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, validator)| validator)
    }
}

impl<S: Record, V, E> Default for ValidatorMap<S, V, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// 字段错误校验模型
///
/// 每次调用字段的校验方法（单独调用或在 `validate` 中）都会把结果记录到
/// 共享的 [`ErrorState`] 中。
///
/// 只在单线程中使用：`validate` 没有任何同步，重入调用会交错写入同一份状态。
/// 持有 [`state`](Self::state) 返回的 `Ref` 时调用会修改状态的方法会 panic。
pub struct CheckModel<S: Record, V = String, E = ()> {
    validators: ValidatorMap<S, V, E>,
    state: RefCell<ErrorState<S::Field>>,
    diagnostics: Diagnostics<S::Field>,
}

/// 创建校验模型，等价于 [`CheckModel::new`]
pub fn create_check_model<S: Record, V, E>(validators: ValidatorMap<S, V, E>) -> CheckModel<S, V, E> {
    CheckModel::new(validators)
}

impl<S: Record, V, E> CheckModel<S, V, E> {
    pub fn new(validators: ValidatorMap<S, V, E>) -> Self {
        Self {
            validators,
            state: RefCell::new(ErrorState::new()),
            diagnostics: Diagnostics::Off,
        }
    }

    pub fn with_options(validators: ValidatorMap<S, V, E>, options: &CheckOptions) -> Self {
        Self {
            diagnostics: Diagnostics::from_mode(options.diagnostics, &options.label),
            ..Self::new(validators)
        }
    }

    /// 校验失败时调用的诊断 hook，会替换掉已有的诊断输出
    pub fn on_failure<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ErrorState<S::Field>, &[String]) + 'static,
    {
        let hook: FailureHook<S::Field> = Box::new(hook);
        self.diagnostics = Diagnostics::Hook(hook);
        self
    }

    /// 错误信息（只读）
    pub fn state(&self) -> Ref<'_, ErrorState<S::Field>> {
        self.state.borrow()
    }

    /// 错误信息的拷贝，可以长期持有而不影响后续校验
    pub fn snapshot(&self) -> ErrorState<S::Field> {
        self.state.borrow().clone()
    }

    /// 字段当前记录的结果
    pub fn error(&self, key: S::Field) -> Option<Verdict> {
        self.state.borrow().get(key).cloned()
    }

    /// 注册了校验方法的字段，按注册顺序
    pub fn fields(&self) -> impl Iterator<Item = S::Field> + '_ {
        self.validators.keys()
    }

    /// 取出字段的校验方法，可以直接作为事件回调使用
    pub fn field(&self, key: S::Field) -> Option<FieldValidator<'_, S, V, E>> {
        let validator = self.validators.get(key)?;
        Some(FieldValidator {
            model: self,
            key,
            validator,
        })
    }

    /// 单独校验一个字段并记录结果
    ///
    /// 字段没有校验方法时返回 `None`，不记录任何内容。
    pub fn check(
        &self,
        key: S::Field,
        value: Option<&V>,
        source: Option<&S>,
        extras: Option<&E>,
    ) -> Option<Verdict> {
        self.field(key).map(|field| field.call(value, source, extras))
    }

    /// 校验是否存在错误
    ///
    /// 返回 `true` 表示**有错误**。传入 `config` 时只校验其中标记为 `true`
    /// 的字段，其余字段跳过并删除已记录的错误信息。
    pub fn validate(&self, source: &S, config: Option<&CheckConfig<S::Field>>, extras: Option<&E>) -> bool {
        !self.failures(source, config, extras).is_empty()
    }

    /// 与 [`validate`](Self::validate) 相同，返回 `"<field>: <reason>"` 形式的失败列表
    pub fn failures(
        &self,
        source: &S,
        config: Option<&CheckConfig<S::Field>>,
        extras: Option<&E>,
    ) -> Vec<String> {
        let mut failures = Vec::new();

        for (key, validator) in &self.validators.entries {
            if let Some(config) = config {
                if !config.is_included(*key) {
                    self.state.borrow_mut().remove(*key);
                    continue;
                }
            }

            let verdict = self.run(*key, validator, None, Some(source), extras);
            if verdict.is_error() {
                failures.push(format!("{}: {}", key.name(), verdict.raw_text()));
            }
        }

        tracing::debug!(
            target: "checkmodel",
            fields = self.validators.len(),
            failed = failures.len(),
            "validation pass finished"
        );

        if !failures.is_empty() {
            self.diagnostics.emit(&self.state.borrow(), &failures);
        }

        failures
    }

    /// 清空记录的错误信息，已记录的字段保留为空值
    pub fn clear_validate(&self) {
        self.state.borrow_mut().reset();
    }

    fn run(
        &self,
        key: S::Field,
        validator: &BoxedValidator<S, V, E>,
        value: Option<&V>,
        source: Option<&S>,
        extras: Option<&E>,
    ) -> Verdict {
        let verdict = validator(value, source, extras);
        tracing::trace!(target: "checkmodel", field = key.name(), result = verdict.raw_text(), "field checked");
        self.state.borrow_mut().set(key, verdict.clone());
        verdict
    }
}

impl<S: Record, V, E> fmt::Debug for CheckModel<S, V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<_> = self.validators.keys().map(|k| k.name()).collect();
        f.debug_struct("CheckModel")
            .field("fields", &fields)
            .field("state", &*self.state.borrow())
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

/// 绑定到 `CheckModel` 的单个字段校验方法
pub struct FieldValidator<'a, S: Record, V, E> {
    model: &'a CheckModel<S, V, E>,
    key: S::Field,
    validator: &'a BoxedValidator<S, V, E>,
}

impl<S: Record, V, E> FieldValidator<'_, S, V, E> {
    pub fn key(&self) -> S::Field {
        self.key
    }

    /// 执行校验并记录结果；返回值可直接展示（无错误时为空）
    pub fn call(&self, value: Option<&V>, source: Option<&S>, extras: Option<&E>) -> Verdict {
        self.model.run(self.key, self.validator, value, source, extras)
    }
}

impl<S: Record, V, E> Clone for FieldValidator<'_, S, V, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Record, V, E> Copy for FieldValidator<'_, S, V, E> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticMode;
    use crate::field::tests::{Login, LoginField};
    use crate::value::current_value;
    use std::rc::Rc;

    fn login(user: &str, password: &str, code: &str) -> Login {
        Login {
            user: user.to_string(),
            password: password.to_string(),
            code: code.to_string(),
        }
    }

    fn login_model() -> CheckModel<Login> {
        let validators = ValidatorMap::<Login>::new()
            .with(LoginField::User, |value: Option<&String>, source: Option<&Login>, _| {
                let user = current_value(value, source, |s| &s.user);
                Verdict::when(user.map_or(true, |u| u.is_empty()), "required")
            })
            .with(LoginField::Password, |value, source, _| {
                let password = current_value(value, source, |s: &Login| &s.password);
                Verdict::when(password.map_or(true, |p| p.len() < 6), "too short")
            })
            .with(LoginField::Code, |_, source: Option<&Login>, _| {
                source.map_or(false, |s| s.code.len() != 4)
            });
        CheckModel::new(validators)
    }

    #[test]
    fn test_check_records_and_returns_verdict() {
        let model = login_model();

        let verdict = model.check(LoginField::Password, Some(&"abc".to_string()), None, None);
        assert_eq!(verdict, Some(Verdict::from("too short")));
        assert_eq!(model.error(LoginField::Password), Some(Verdict::from("too short")));

        let verdict = model.check(LoginField::Password, Some(&"abcdefg".to_string()), None, None);
        assert_eq!(verdict.unwrap().to_string(), "");
        assert_eq!(model.error(LoginField::Password), Some(Verdict::Valid));
        assert!(!model.state().contains(LoginField::User));
    }

    #[test]
    fn test_check_without_validator_records_nothing() {
        let model: CheckModel<Login> =
            CheckModel::new(ValidatorMap::new().with(LoginField::User, |_, _, _| true));

        assert_eq!(model.check(LoginField::Code, None, None, None), None);
        assert!(model.field(LoginField::Code).is_none());
        assert!(model.state().is_empty());
    }

    #[test]
    fn test_field_handle_acts_as_handler() {
        let model = login_model();
        let on_blur = model.field(LoginField::User).unwrap();

        assert_eq!(on_blur.key(), LoginField::User);
        assert_eq!(on_blur.call(None, Some(&login("", "", "")), None), Verdict::from("required"));
        assert_eq!(on_blur.call(Some(&"bob".to_string()), None, None), Verdict::Valid);
        assert_eq!(model.error(LoginField::User), Some(Verdict::Valid));
    }

    #[test]
    fn test_validate_reports_has_error() {
        let model = login_model();

        assert!(model.validate(&login("", "abc", "12"), None, None));
        assert_eq!(
            model.failures(&login("", "abc", "12"), None, None),
            vec!["user: required", "password: too short", "code: true"]
        );
        assert_eq!(model.error(LoginField::Code), Some(Verdict::Invalid));

        assert!(!model.validate(&login("bob", "secret", "1234"), None, None));
        assert!(!model.state().has_errors());
        assert_eq!(model.state().len(), 3);
    }

    #[test]
    fn test_validate_runs_in_insertion_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut validators = ValidatorMap::<Login>::new();
        for key in [LoginField::Code, LoginField::User, LoginField::Password] {
            let order = Rc::clone(&order);
            validators.insert(key, move |value, _, _| {
                assert!(value.is_none());
                order.borrow_mut().push(key);
            });
        }
        let model = CheckModel::new(validators);

        assert!(!model.validate(&Login::default(), None, None));
        assert_eq!(
            *order.borrow(),
            vec![LoginField::Code, LoginField::User, LoginField::Password]
        );
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let validators = ValidatorMap::<Login>::new()
            .with(LoginField::User, |_, _, _| "first")
            .with(LoginField::Code, |_, _, _| false)
            .with(LoginField::User, |_, _, _| "second");

        assert_eq!(validators.len(), 2);
        let model = create_check_model(validators);
        assert_eq!(model.fields().collect::<Vec<_>>(), vec![LoginField::User, LoginField::Code]);
        assert_eq!(model.failures(&Login::default(), None, None), vec!["user: second"]);
    }

    #[test]
    fn test_config_skips_and_deletes_state() {
        let model = login_model();
        let source = login("", "abc", "12");

        assert!(model.validate(&source, None, None));
        assert_eq!(model.state().len(), 3);

        let config = CheckConfig::new().include(LoginField::Password);
        assert_eq!(model.failures(&source, Some(&config), None), vec!["password: too short"]);
        assert!(!model.state().contains(LoginField::User));
        assert!(!model.state().contains(LoginField::Code));
        assert_eq!(model.error(LoginField::Password), Some(Verdict::from("too short")));

        let nothing = CheckConfig::new();
        assert!(!model.validate(&source, Some(&nothing), None));
        assert!(model.state().is_empty());
    }

    #[test]
    fn test_extras_reach_validators() {
        struct Limits {
            min_password: usize,
        }

        let validators = ValidatorMap::<Login, String, Limits>::new().with(
            LoginField::Password,
            |value, source, extras| {
                let min = extras.map_or(6, |e| e.min_password);
                let password = current_value(value, source, |s: &Login| &s.password);
                Verdict::when(password.map_or(true, |p| p.len() < min), format!("at least {}", min))
            },
        );
        let model = CheckModel::new(validators);
        let source = login("bob", "abcd", "");

        assert!(model.validate(&source, None, None));
        assert!(!model.validate(&source, None, Some(&Limits { min_password: 4 })));
        assert_eq!(
            model.failures(&source, None, Some(&Limits { min_password: 8 })),
            vec!["password: at least 8"]
        );
    }

    #[test]
    fn test_clear_validate_is_idempotent() {
        let model = login_model();
        model.check(LoginField::User, None, Some(&Login::default()), None);
        model.check(LoginField::Code, None, Some(&Login::default()), None);

        model.clear_validate();
        let once: Vec<_> = model.state().iter().map(|(k, v)| (k, v.clone())).collect();
        model.clear_validate();
        let twice: Vec<_> = model.state().iter().map(|(k, v)| (k, v.clone())).collect();

        assert_eq!(once, twice);
        assert_eq!(once, vec![(LoginField::User, Verdict::Valid), (LoginField::Code, Verdict::Valid)]);
        assert!(!model.state().contains(LoginField::Password));
    }

    #[test]
    fn test_failure_hook_only_on_failure() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let model = login_model().on_failure(move |state, failures| {
            sink.borrow_mut().push((format!("{:?}", state), failures.to_vec()));
        });

        model.validate(&login("bob", "secret", "1234"), None, None);
        assert!(calls.borrow().is_empty());

        let config = CheckConfig::new().include(LoginField::User);
        model.validate(&login("", "secret", "1234"), Some(&config), None);
        assert_eq!(
            *calls.borrow(),
            vec![(r#"{"user": "required"}"#.to_string(), vec!["user: required".to_string()])]
        );
    }

    #[test]
    fn test_config_field_without_validator_is_noop() {
        let model: CheckModel<Login> = CheckModel::new(
            ValidatorMap::new().with(LoginField::User, |_, _, _| "required"),
        );
        let config = CheckConfig::new().include(LoginField::Code);

        assert!(!model.validate(&Login::default(), Some(&config), None));
        assert!(!model.state().contains(LoginField::Code));
        assert!(model.state().is_empty());
    }

    #[test]
    fn test_validator_panic_reaches_caller() {
        let model: CheckModel<Login> = CheckModel::new(
            ValidatorMap::new()
                .with(LoginField::User, |_, _, _| "required")
                .with(LoginField::Password, |_, _, _| -> Verdict { panic!("broken validator") })
                .with(LoginField::Code, |_, _, _| true),
        );

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            model.validate(&Login::default(), None, None)
        }));

        assert!(result.is_err());
        assert_eq!(model.error(LoginField::User), Some(Verdict::from("required")));
        assert!(!model.state().contains(LoginField::Password));
        assert!(!model.state().contains(LoginField::Code));
    }

    #[test]
    fn test_snapshot_outlives_later_passes() {
        let model = login_model();
        model.validate(&login("", "abc", "12"), None, None);

        let before = model.snapshot();
        assert!(!model.validate(&login("bob", "secret", "1234"), None, None));
        model.clear_validate();

        assert_eq!(before.get(LoginField::User), Some(&Verdict::from("required")));
        assert_eq!(before.len(), 3);
        assert_eq!(model.error(LoginField::User), Some(Verdict::Valid));
    }

    #[test]
    fn test_with_options_logs_without_changing_result() {
        let options = CheckOptions::new().diagnostics(DiagnosticMode::Warn);
        let model = CheckModel::with_options(
            ValidatorMap::<Login>::new().with(LoginField::User, |_, _, _| "required"),
            &options,
        );

        assert!(model.validate(&Login::default(), None, None));
        assert!(format!("{:?}", model).contains("Warn"));
    }
}
