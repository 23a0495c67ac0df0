use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+()\- ]+$").expect("Invalid phone regex"));

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_PHONE_LEN: usize = 20;
pub const MAX_TEXT_LEN: usize = 200;

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if phone.chars().count() > MAX_PHONE_LEN {
        return Err("Phone must be at most 20 characters");
    }
    if !PHONE_RE.is_match(phone) {
        return Err("Phone may only contain digits, spaces, '+', '-', '(' and ')'");
    }
    Ok(())
}

/// 必填文本字段：去掉首尾空白后非空，且不超过 `max` 个字符
pub fn validate_required(field: &str, value: &str, max: usize) -> Result<(), String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field} is required"));
    }
    if trimmed.chars().count() > max {
        return Err(format!("{field} must be at most {max} characters"));
    }
    Ok(())
}

/// 选填文本字段：填写时不超过 `max` 个字符
pub fn validate_optional(field: &str, value: &Option<String>, max: usize) -> Result<(), String> {
    match normalize_optional(value) {
        Some(v) if v.chars().count() > max => {
            Err(format!("{field} must be at most {max} characters"))
        }
        _ => Ok(()),
    }
}

/// 空白字符串视为未填写
pub fn normalize_optional(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// 学生与教师共有的联系方式校验
pub fn validate_contact(
    errors: &mut Vec<String>,
    name: &str,
    email: &Option<String>,
    phone: &Option<String>,
) {
    if let Err(msg) = validate_required("Name", name, MAX_NAME_LEN) {
        errors.push(msg);
    }
    if let Some(email) = normalize_optional(email)
        && let Err(msg) = validate_email(&email)
    {
        errors.push(msg.to_string());
    }
    if let Some(phone) = normalize_optional(phone)
        && let Err(msg) = validate_phone(&phone)
    {
        errors.push(msg.to_string());
    }
}
