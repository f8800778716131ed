use crate::core::error::ValidationErrors;
use crate::models::user::{PasswordChangeForm, ProfileForm};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Validate the editable profile fields. Returns the trimmed form.
pub fn validate_profile(form: &ProfileForm) -> Result<ProfileForm, ValidationErrors> {
    let trimmed = ProfileForm {
        first_name: form.first_name.trim().to_string(),
        last_name1: form.last_name1.trim().to_string(),
        last_name2: form
            .last_name2
            .as_ref()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        identification: form.identification.trim().to_string(),
        program: form.program.trim().to_string(),
    };

    let mut errors = ValidationErrors::new();
    for (field, value, message) in [
        ("firstName", &trimmed.first_name, "El nombre es obligatorio"),
        ("lastName1", &trimmed.last_name1, "El primer apellido es obligatorio"),
        ("identification", &trimmed.identification, "La identificación es obligatoria"),
        ("program", &trimmed.program, "El programa es obligatorio"),
    ] {
        if value.is_empty() {
            errors.add(field, message);
        }
    }

    errors.into_result().map(|()| trimmed)
}

/// Passwords are compared as typed, without trimming
pub fn validate_password_change(form: &PasswordChangeForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if form.current_password.is_empty() {
        errors.add("currentPassword", "La contraseña actual es obligatoria");
    }

    if form.new_password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "newPassword",
            format!("La nueva contraseña debe tener al menos {} caracteres", MIN_PASSWORD_LEN),
        );
    } else if form.new_password == form.current_password {
        errors.add("newPassword", "La nueva contraseña debe ser distinta de la actual");
    }

    if form.confirm_password != form.new_password {
        errors.add("confirmPassword", "Las contraseñas no coinciden");
    }

    errors.into_result()
}
