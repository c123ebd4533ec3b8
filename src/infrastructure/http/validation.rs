//! Request Validation
//!
//! 每个路由声明一组有序的字段规则（谓词 + 消息）。
//! 所有规则都会执行，不会在第一个失败处中断；失败项按声明顺序收集。
//!
//! 检查作用于字段的字符串形式：缺失和 null 视为 ""，
//! 数字取十进制表示，布尔值取 "true"/"false"。

use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

/// 校验失败消息
pub mod messages {
    pub const ID_NUMERIC: &str = "El id debe ser numérico";
    pub const NAME_REQUIRED: &str = "El nombre es obligatorio";
    pub const PRICE_NUMERIC: &str = "El precio debe ser numérico";
    pub const PRICE_REQUIRED: &str = "El precio es obligatorio";
    pub const PRICE_POSITIVE: &str = "Precio debe ser mayor a 0";
    pub const AVAILABILITY_INVALID: &str = "Valor para la disponibilidad no válido";
}

/// 字段来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

/// 单个字段校验错误
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FieldError {
    /// 固定为 "field"
    #[serde(rename = "type")]
    pub kind: String,
    /// 原始值，字段缺失时省略
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub value: Option<Value>,
    pub msg: String,
    pub path: String,
    pub location: Location,
}

/// 字段谓词
pub type Check = fn(Option<&Value>) -> bool;

#[derive(Clone, Copy)]
struct Rule {
    location: Location,
    field: &'static str,
    check: Check,
    message: &'static str,
    optional: bool,
}

/// 有序规则集合
#[derive(Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 路径参数规则
    pub fn param(self, field: &'static str, check: Check, message: &'static str) -> Self {
        self.push(Location::Params, field, check, message, false)
    }

    /// 请求体字段规则
    pub fn body(self, field: &'static str, check: Check, message: &'static str) -> Self {
        self.push(Location::Body, field, check, message, false)
    }

    /// 请求体可选字段规则：字段缺失时跳过
    pub fn optional_body(self, field: &'static str, check: Check, message: &'static str) -> Self {
        self.push(Location::Body, field, check, message, true)
    }

    fn push(
        mut self,
        location: Location,
        field: &'static str,
        check: Check,
        message: &'static str,
        optional: bool,
    ) -> Self {
        self.rules.push(Rule {
            location,
            field,
            check,
            message,
            optional,
        });
        self
    }

    /// 执行全部规则
    ///
    /// `params` 与 `body` 都按 JSON 对象取字段，非对象视为没有任何字段
    pub fn validate(&self, params: &Value, body: &Value) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = self
            .rules
            .iter()
            .filter_map(|rule| {
                let value = match rule.location {
                    Location::Params => params.get(rule.field),
                    Location::Body => body.get(rule.field),
                };

                if rule.optional && value.is_none() {
                    return None;
                }
                if (rule.check)(value) {
                    return None;
                }

                Some(FieldError {
                    kind: "field".to_string(),
                    value: value.cloned(),
                    msg: rule.message.to_string(),
                    path: rule.field.to_string(),
                    location: rule.location,
                })
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// 将路径中的 id 包装成规则可读取的参数对象
pub fn id_params(id: &str) -> Value {
    json!({ "id": id })
}

// ============================================================================
// Coercions
// ============================================================================

/// 字段的字符串形式
pub fn as_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => number_text(n),
        Some(other) => other.to_string(),
    }
}

fn number_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(float_text).unwrap_or_default()
    }
}

/// 与 JavaScript 的数字转字符串一致：
/// 绝对值小于 1e-6 或不小于 1e21 时使用指数形式（`1e-7`、`1.5e+21`），
/// 其余为不带多余 ".0" 的十进制形式
fn float_text(f: f64) -> String {
    let magnitude = f.abs();
    if f == 0.0 || (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }

    let text = format!("{:e}", f);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

/// 宽松的数值转换：缺失为 NaN，null 为 0，空串为 0，无法解析为 NaN
pub fn as_number(value: Option<&Value>) -> f64 {
    match value {
        None => f64::NAN,
        Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else if s
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
            {
                s.parse().unwrap_or(f64::NAN)
            } else {
                f64::NAN
            }
        }
        Some(_) => f64::NAN,
    }
}

/// 布尔值转换：接受 true/false、"true"/"false"、"1"/"0"、1/0
pub fn as_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

// ============================================================================
// Checks
// ============================================================================

/// 十进制数字：可选符号、可选整数部分、可选小数点，至少一位数字
pub fn is_numeric(value: Option<&Value>) -> bool {
    let text = as_text(value);
    let digits = text.strip_prefix(['+', '-']).unwrap_or(&text);

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => ("", digits),
    };

    !frac_part.is_empty()
        && int_part.chars().all(|c| c.is_ascii_digit())
        && frac_part.chars().all(|c| c.is_ascii_digit())
}

/// 字符串形式非空
pub fn not_empty(value: Option<&Value>) -> bool {
    !as_text(value).is_empty()
}

/// 数值大于 0
pub fn greater_than_zero(value: Option<&Value>) -> bool {
    as_number(value) > 0.0
}

/// 可解释为布尔值
pub fn boolean_like(value: Option<&Value>) -> bool {
    as_bool(value).is_some()
}

// ============================================================================
// Product route rule sets
// ============================================================================

/// GET/PATCH/DELETE /:id
pub fn product_id_rules() -> RuleSet {
    RuleSet::new().param("id", is_numeric, messages::ID_NUMERIC)
}

fn with_name_and_price(rules: RuleSet) -> RuleSet {
    rules
        .body("name", not_empty, messages::NAME_REQUIRED)
        .body("price", is_numeric, messages::PRICE_NUMERIC)
        .body("price", not_empty, messages::PRICE_REQUIRED)
        .body("price", greater_than_zero, messages::PRICE_POSITIVE)
}

/// POST /
pub fn create_product_rules() -> RuleSet {
    with_name_and_price(RuleSet::new()).optional_body(
        "availability",
        boolean_like,
        messages::AVAILABILITY_INVALID,
    )
}

/// PUT /:id
pub fn update_product_rules() -> RuleSet {
    with_name_and_price(product_id_rules()).body(
        "availability",
        boolean_like,
        messages::AVAILABILITY_INVALID,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_errors(rules: &RuleSet, body: Value) -> Vec<FieldError> {
        rules.validate(&Value::Null, &body).err().unwrap_or_default()
    }

    #[test]
    fn test_is_numeric() {
        for ok in [json!(50), json!("50"), json!("-1.5"), json!(".5"), json!(0), json!(2.25)] {
            assert!(is_numeric(Some(&ok)), "{ok} should be numeric");
        }
        for bad in [json!("hola"), json!(""), json!("5."), json!("1e5"), json!(true), json!(null)] {
            assert!(!is_numeric(Some(&bad)), "{bad} should not be numeric");
        }
        assert!(!is_numeric(None));
    }

    #[test]
    fn test_as_number_coercion() {
        assert!(as_number(None).is_nan());
        assert_eq!(as_number(Some(&json!(null))), 0.0);
        assert_eq!(as_number(Some(&json!(""))), 0.0);
        assert_eq!(as_number(Some(&json!(" 12 "))), 12.0);
        assert_eq!(as_number(Some(&json!(true))), 1.0);
        assert!(as_number(Some(&json!("hola"))).is_nan());
        assert!(as_number(Some(&json!("inf"))).is_nan());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(as_text(None), "");
        assert_eq!(as_text(Some(&json!(50))), "50");
        assert_eq!(as_text(Some(&json!(50.0))), "50");
        assert_eq!(as_text(Some(&json!(false))), "false");
        assert_eq!(as_text(Some(&json!("Mouse"))), "Mouse");
        assert_eq!(as_text(Some(&json!(0.000001))), "0.000001");
        assert_eq!(as_text(Some(&json!(1e-7))), "1e-7");
        assert_eq!(as_text(Some(&json!(1.5e21))), "1.5e+21");
    }

    #[test]
    fn test_exponent_form_numbers_are_not_numeric() {
        let rules = create_product_rules();
        for price in [json!(1e-7), json!(2.5e21)] {
            let errors = body_errors(&rules, json!({ "name": "Mouse", "price": price }));
            assert_eq!(errors.len(), 1, "price {}", price);
            assert_eq!(errors[0].msg, messages::PRICE_NUMERIC);
        }
        assert!(body_errors(&rules, json!({ "name": "Mouse", "price": 0.5 })).is_empty());
    }

    #[test]
    fn test_as_bool() {
        assert_eq!(as_bool(Some(&json!(true))), Some(true));
        assert_eq!(as_bool(Some(&json!("false"))), Some(false));
        assert_eq!(as_bool(Some(&json!(1))), Some(true));
        assert_eq!(as_bool(Some(&json!("yes"))), None);
        assert_eq!(as_bool(Some(&json!(null))), None);
        assert_eq!(as_bool(None), None);
    }

    #[test]
    fn test_create_empty_body_reports_four_errors() {
        let errors = body_errors(&create_product_rules(), json!({}));
        let messages: Vec<&str> = errors.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                messages::NAME_REQUIRED,
                messages::PRICE_NUMERIC,
                messages::PRICE_REQUIRED,
                messages::PRICE_POSITIVE,
            ]
        );
        assert!(errors.iter().all(|e| e.value.is_none()));
    }

    #[test]
    fn test_create_zero_price_reports_one_error() {
        let errors = body_errors(
            &create_product_rules(),
            json!({ "name": "Monitor Curvo", "price": 0 }),
        );
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].msg, messages::PRICE_POSITIVE);
        assert_eq!(errors[0].path, "price");
        assert_eq!(errors[0].value, Some(json!(0)));
    }

    #[test]
    fn test_create_text_price_reports_two_errors() {
        let errors = body_errors(
            &create_product_rules(),
            json!({ "name": "Monitor Curvo", "price": "hola" }),
        );
        let messages: Vec<&str> = errors.iter().map(|e| e.msg.as_str()).collect();
        assert_eq!(messages, vec![messages::PRICE_NUMERIC, messages::PRICE_POSITIVE]);
    }

    #[test]
    fn test_create_optional_availability_is_checked_when_present() {
        let rules = create_product_rules();
        assert!(body_errors(&rules, json!({ "name": "Mouse", "price": 50 })).is_empty());
        assert!(body_errors(&rules, json!({ "name": "Mouse", "price": "50", "availability": false })).is_empty());

        let errors = body_errors(&rules, json!({ "name": "Mouse", "price": 50, "availability": "maybe" }));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].msg, messages::AVAILABILITY_INVALID);
    }

    #[test]
    fn test_update_empty_body_reports_five_errors() {
        let errors = update_product_rules()
            .validate(&id_params("1"), &json!({}))
            .unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors[4].path, "availability");
    }

    #[test]
    fn test_invalid_id_reports_single_params_error() {
        let errors = update_product_rules()
            .validate(
                &id_params("not-valid-url"),
                &json!({ "name": "Mouse", "price": 50, "availability": true }),
            )
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].msg, messages::ID_NUMERIC);
        assert_eq!(errors[0].location, Location::Params);
        assert_eq!(errors[0].value, Some(json!("not-valid-url")));
    }

    #[test]
    fn test_non_object_body_has_no_fields() {
        let errors = body_errors(&create_product_rules(), json!([1, 2, 3]));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_field_error_wire_shape() {
        let errors = product_id_rules()
            .validate(&id_params("abc"), &Value::Null)
            .unwrap_err();
        let wire = serde_json::to_value(&errors[0]).unwrap();
        assert_eq!(
            wire,
            json!({
                "type": "field",
                "value": "abc",
                "msg": "El id debe ser numérico",
                "path": "id",
                "location": "params"
            })
        );
    }
}
