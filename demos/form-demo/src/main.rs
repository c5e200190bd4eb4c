use checkmodel::{
    current_value, rules, CheckConfig, CheckModel, CheckOptions, LoggingConfig, Record, ValidatorMap,
    Verdict,
};

// ==================== 表单定义 ====================

/// 注册表单，分两个 tab 填写
#[derive(Record, Debug, Clone, Default)]
struct SignUpForm {
    user_name: String,
    email: String,
    password: String,
    #[check(rename = "inviteCode")]
    invite_code: String,
}

/// 校验时额外传入的上下文
struct SignUpExtras {
    invite_required: bool,
}

fn sign_up_validators() -> ValidatorMap<SignUpForm, String, SignUpExtras> {
    ValidatorMap::new()
        .with(SignUpFormField::UserName, |value, source, _| {
            let name = current_value(value, source, |s: &SignUpForm| &s.user_name);
            rules::length(name.map_or("", String::as_str), Some(2), Some(16), "2 to 16 characters")
        })
        .with(SignUpFormField::Email, |value, source, _| {
            let email = current_value(value, source, |s: &SignUpForm| &s.email);
            rules::email(email.map_or("", String::as_str), "invalid email")
        })
        .with(SignUpFormField::Password, |value, source, _| {
            let password = current_value(value, source, |s: &SignUpForm| &s.password);
            let password = password.map_or("", String::as_str);
            match rules::not_blank(password, "required") {
                Verdict::Valid => rules::length(password, Some(8), None, "at least 8 characters"),
                verdict => verdict,
            }
        })
        .with(SignUpFormField::InviteCode, |value, source, extras| {
            let required = extras.map_or(false, |e: &SignUpExtras| e.invite_required);
            let code = current_value(value, source, |s: &SignUpForm| &s.invite_code);
            Verdict::when(required && code.map_or(true, |c| c.is_empty()), "invite code required")
        })
}

fn main() -> anyhow::Result<()> {
    LoggingConfig::from_env()?.init()?;

    let options = CheckOptions::from_toml_str(
        r#"
        diagnostics = "warn"
        label = "[signup]"
        "#,
    )?;
    let model = CheckModel::with_options(sign_up_validators(), &options);

    // 失焦时单独校验字段
    let on_blur = model
        .field(SignUpFormField::Email)
        .ok_or_else(|| anyhow::anyhow!("email has no validator"))?;
    let typed = "bob@".to_string();
    tracing::info!("email blur: {:?}", on_blur.call(Some(&typed), None, None).to_string());

    // 第一个 tab 只校验账号信息
    let form = SignUpForm {
        user_name: "b".to_string(),
        email: "bob@".to_string(),
        ..Default::default()
    };
    let account_tab: CheckConfig<_> = [SignUpFormField::UserName, SignUpFormField::Email]
        .into_iter()
        .collect();
    let extras = SignUpExtras { invite_required: true };
    let has_error = model.validate(&form, Some(&account_tab), Some(&extras));
    tracing::info!(has_error, state = ?*model.state(), "account tab submitted");

    // 提交整个表单
    let form = SignUpForm {
        user_name: "bob".to_string(),
        email: "bob@example.com".to_string(),
        password: "correct horse".to_string(),
        invite_code: "XYZ".to_string(),
    };
    let has_error = model.validate(&form, None, Some(&extras));
    tracing::info!(has_error, state = ?*model.state(), "form submitted");

    // 重置表单
    model.clear_validate();
    tracing::info!(state = ?*model.state(), "form reset");

    Ok(())
}
