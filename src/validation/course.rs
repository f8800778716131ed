use crate::core::error::ValidationErrors;
use crate::models::course::CourseForm;

pub const MIN_CREDITS: i64 = 1;
pub const MAX_CREDITS: i64 = 9;
pub const MAX_CODE_LEN: usize = 20;

/// Validate a course form. Returns the trimmed form ready to send.
pub fn validate_course(form: &CourseForm) -> Result<CourseForm, ValidationErrors> {
    let form = form.trimmed();
    let mut errors = ValidationErrors::new();

    if form.code.is_empty() {
        errors.add("code", "El código es obligatorio");
    } else if form.code.chars().count() > MAX_CODE_LEN {
        errors.add("code", format!("El código admite como máximo {} caracteres", MAX_CODE_LEN));
    } else if form.code.chars().any(char::is_whitespace) {
        errors.add("code", "El código no puede contener espacios");
    }

    if form.name.is_empty() {
        errors.add("name", "El nombre es obligatorio");
    }

    if !(MIN_CREDITS..=MAX_CREDITS).contains(&form.credits) {
        errors.add(
            "credits",
            format!("Los créditos deben estar entre {} y {}", MIN_CREDITS, MAX_CREDITS),
        );
    }

    errors.into_result().map(|()| form)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(code: &str, name: &str, credits: i64) -> CourseForm {
        CourseForm {
            code: code.to_string(),
            name: name.to_string(),
            credits,
            description: None,
        }
    }

    #[test]
    fn test_valid_form_is_trimmed() {
        let valid = validate_course(&form(" MAT101 ", " Cálculo I ", 4)).unwrap();
        assert_eq!(valid.code, "MAT101");
        assert_eq!(valid.name, "Cálculo I");
    }

    #[test]
    fn test_blank_fields_rejected() {
        let errors = validate_course(&form("   ", "", 4)).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.get("code").is_some());
        assert!(errors.get("name").is_some());
    }

    #[test]
    fn test_credit_bounds() {
        assert!(validate_course(&form("MAT101", "Cálculo", 1)).is_ok());
        assert!(validate_course(&form("MAT101", "Cálculo", 9)).is_ok());
        for credits in [0, 10, -3] {
            let errors = validate_course(&form("MAT101", "Cálculo", credits)).unwrap_err();
            assert!(errors.get("credits").is_some(), "credits {} accepted", credits);
        }
    }

    #[test]
    fn test_code_with_inner_space_rejected() {
        let errors = validate_course(&form("MAT 101", "Cálculo", 4)).unwrap_err();
        assert!(errors.get("code").is_some());
    }
}
