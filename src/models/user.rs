use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Estudiante", alias = "Student", alias = "ESTUDIANTE")]
    Student,
    #[serde(rename = "Profesor", alias = "Professor", alias = "PROFESOR")]
    Professor,
    #[serde(rename = "Administrador", alias = "Administrator", alias = "ADMINISTRADOR")]
    Administrator,
    #[serde(other)]
    Unknown,
}

impl Role {
    /// Spanish or English role name, any case
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "estudiante" | "student" => Some(Role::Student),
            "profesor" | "professor" => Some(Role::Professor),
            "administrador" | "administrator" => Some(Role::Administrator),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Estudiante",
            Role::Professor => "Profesor",
            Role::Administrator => "Administrador",
            Role::Unknown => "Desconocido",
        }
    }
}

/// A user account as returned by the backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub first_name: String,
    pub last_name1: String,
    #[serde(default)]
    pub last_name2: Option<String>,
    pub email: String,
    #[serde(default)]
    pub identification: String,
    pub role: Role,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub pending_verification: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        let mut name = format!("{} {}", self.first_name, self.last_name1);
        if let Some(last) = self.last_name2.as_deref().filter(|s| !s.is_empty()) {
            name.push(' ');
            name.push_str(last);
        }
        name
    }

    /// "pending", "active" or "inactive"
    pub fn status(&self) -> &'static str {
        if self.pending_verification {
            "pending"
        } else if self.active {
            "active"
        } else {
            "inactive"
        }
    }
}

/// Editable profile fields. Email is immutable once the account exists.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name1: String,
    #[serde(default)]
    pub last_name2: Option<String>,
    #[serde(default)]
    pub identification: String,
    #[serde(default)]
    pub program: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeForm {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// Envelope returned by the password endpoint; `estado == 1` is success
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PasswordChangeReply {
    pub estado: i32,
    #[serde(default)]
    pub mensaje: Option<String>,
}

impl PasswordChangeReply {
    pub fn is_success(&self) -> bool {
        self.estado == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json(role: &str) -> String {
        format!(
            r#"{{"id":5,"firstName":"Ana","lastName1":"Rojas","lastName2":null,
            "email":"ana@uni.edu","identification":"1-234","role":"{}",
            "program":"Ingeniería","active":true,"pendingVerification":false}}"#,
            role
        )
    }

    #[test]
    fn test_role_labels_deserialize() {
        let user: User = serde_json::from_str(&sample_json("Profesor")).unwrap();
        assert_eq!(user.role, Role::Professor);

        let user: User = serde_json::from_str(&sample_json("Student")).unwrap();
        assert_eq!(user.role, Role::Student);
    }

    #[test]
    fn test_role_from_label() {
        assert_eq!(Role::from_label("Student"), Some(Role::Student));
        assert_eq!(Role::from_label(" PROFESOR "), Some(Role::Professor));
        assert_eq!(Role::from_label("administrator"), Some(Role::Administrator));
        assert_eq!(Role::from_label("Invitado"), None);
    }

    #[test]
    fn test_unknown_role_falls_back() {
        let user: User = serde_json::from_str(&sample_json("Invitado")).unwrap();
        assert_eq!(user.role, Role::Unknown);
    }

    #[test]
    fn test_full_name_and_status() {
        let mut user: User = serde_json::from_str(&sample_json("Estudiante")).unwrap();
        assert_eq!(user.full_name(), "Ana Rojas");
        assert_eq!(user.status(), "active");

        user.last_name2 = Some("Mora".to_string());
        user.pending_verification = true;
        assert_eq!(user.full_name(), "Ana Rojas Mora");
        assert_eq!(user.status(), "pending");
    }

    #[test]
    fn test_password_reply() {
        let ok: PasswordChangeReply = serde_json::from_str(r#"{"estado":1,"mensaje":"ok"}"#).unwrap();
        assert!(ok.is_success());
        let failed: PasswordChangeReply = serde_json::from_str(r#"{"estado":0}"#).unwrap();
        assert!(!failed.is_success());
    }
}
