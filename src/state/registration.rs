//! Registration form model and the checks that run before any network call.

#[cfg(test)]
#[path = "registration_test.rs"]
mod registration_test;

use crate::net::error::{AuthError, FieldError};
use crate::net::types::{RegisterRequest, Role, join_technologies, non_blank, split_technologies};

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

/// Raw registration form input, one string per input element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationForm {
    pub role: Role,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    // Student
    pub technologies: String,
    pub bio: String,
    pub github: String,
    // Company
    pub website: String,
    pub address: String,
    pub tax_id: String,
}

impl RegistrationForm {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            phone: String::new(),
            technologies: String::new(),
            bio: String::new(),
            github: String::new(),
            website: String::new(),
            address: String::new(),
            tax_id: String::new(),
        }
    }

    /// Check the form and build the API payload.
    ///
    /// Only fields belonging to the selected role are sent.
    ///
    /// # Errors
    ///
    /// `Validation` with one entry per offending field.
    pub fn validate(&self) -> Result<RegisterRequest, AuthError> {
        let mut errors = Vec::new();
        let name = self.name.trim();
        let email = self.email.trim();

        if name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }
        if email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !email.contains('@') {
            errors.push(FieldError::new("email", "Enter a valid email address"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "Password is required"));
        } else if self.password != self.confirm_password {
            errors.push(FieldError::new("confirm_password", PASSWORDS_DO_NOT_MATCH));
        }
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let mut request = RegisterRequest {
            nombre: name.to_owned(),
            email: email.to_owned(),
            password: self.password.clone(),
            id_rol: self.role.code(),
            telefono: non_blank(Some(self.phone.clone())),
            bio: None,
            tecnologias: None,
            sitio_web: None,
            github: None,
            direccion: None,
            identificador_fiscal: None,
        };
        match self.role {
            Role::Student => {
                request.bio = non_blank(Some(self.bio.clone()));
                request.github = non_blank(Some(self.github.clone()));
                request.tecnologias = join_technologies(&split_technologies(Some(&self.technologies)));
            }
            Role::Company => {
                request.sitio_web = non_blank(Some(self.website.clone()));
                request.direccion = non_blank(Some(self.address.clone()));
                request.identificador_fiscal = non_blank(Some(self.tax_id.clone()));
            }
            Role::Coordinator => {}
        }
        Ok(request)
    }
}
