//! Wire DTOs for the SoftLink REST API and the domain profile built from them.
//!
//! DESIGN
//! ======
//! The API returns one flat user record whose optional columns only make
//! sense for some roles. `ApiUser` mirrors that record; `UserProfile` is the
//! validated shape the rest of the client uses, with role-specific fields
//! grouped under [`RoleProfile`]. Blank strings and missing values are the
//! same thing on this side of the boundary: both become `None`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Closed set of account roles, identified on the wire by a small integer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Coordinator,
    Student,
    Company,
}

impl Role {
    /// Wire code used by `id_rol`.
    pub fn code(self) -> i64 {
        match self {
            Self::Coordinator => 1,
            Self::Student => 2,
            Self::Company => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Coordinator),
            2 => Some(Self::Student),
            3 => Some(Self::Company),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Coordinator => "Coordinator",
            Self::Student => "Student",
            Self::Company => "Company",
        }
    }
}

/// User record as returned by `/auth/login`, `/auth/register` and `/users/me`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiUser {
    pub id_usuario: i64,
    pub nombre: String,
    pub email: String,
    #[serde(default)]
    pub id_rol: Option<i64>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub tecnologias: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub sitio_web: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub identificador_fiscal: Option<String>,
    #[serde(default)]
    pub foto: Option<String>,
    #[serde(default)]
    pub hoja_vida: Option<String>,
    #[serde(default)]
    pub fecha_registro: Option<String>,
}

/// Body of a successful `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: ApiUser,
}

/// JSON payload for `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub nombre: String,
    pub email: String,
    pub password: String,
    pub id_rol: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tecnologias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitio_web: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identificador_fiscal: Option<String>,
}

/// JSON payload for `PUT /users/me`. Fields left as `None` are not sent.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tecnologias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitio_web: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identificador_fiscal: Option<String>,
}

/// Body of a successful `POST /upload/{image,document}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub url: String,
}

/// Validated user profile held by the auth context and cached in the session store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub photo_url: Option<String>,
    /// Registration timestamp exactly as the API reported it.
    pub registered_at: Option<String>,
    pub role: RoleProfile,
}

/// Role-specific part of a [`UserProfile`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoleProfile {
    Coordinator,
    Student(StudentProfile),
    Company(CompanyProfile),
    /// Role code missing or not one the client knows.
    Other { code: Option<i64> },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub technologies: Vec<String>,
    pub bio: Option<String>,
    pub github: Option<String>,
    pub cv_url: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub website: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
}

impl RoleProfile {
    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Coordinator => Some(Role::Coordinator),
            Self::Student(_) => Some(Role::Student),
            Self::Company(_) => Some(Role::Company),
            Self::Other { .. } => None,
        }
    }

    /// Raw wire code, including unrecognised ones.
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::Other { code } => *code,
            known => known.role().map(Role::code),
        }
    }
}

impl UserProfile {
    pub fn role(&self) -> Option<Role> {
        self.role.role()
    }

    #[must_use]
    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = non_blank(Some(url.into()));
        self
    }

    /// Replace the CV link. Profiles without a student record are returned unchanged.
    #[must_use]
    pub fn with_cv_url(mut self, url: impl Into<String>) -> Self {
        if let RoleProfile::Student(student) = &mut self.role {
            student.cv_url = non_blank(Some(url.into()));
        }
        self
    }
}

impl From<ApiUser> for UserProfile {
    fn from(user: ApiUser) -> Self {
        let role = match user.id_rol.and_then(Role::from_code) {
            Some(Role::Coordinator) => RoleProfile::Coordinator,
            Some(Role::Student) => RoleProfile::Student(StudentProfile {
                technologies: split_technologies(user.tecnologias.as_deref()),
                bio: non_blank(user.bio),
                github: non_blank(user.github),
                cv_url: non_blank(user.hoja_vida),
            }),
            Some(Role::Company) => RoleProfile::Company(CompanyProfile {
                website: non_blank(user.sitio_web),
                address: non_blank(user.direccion),
                tax_id: non_blank(user.identificador_fiscal),
            }),
            None => RoleProfile::Other { code: user.id_rol },
        };
        Self {
            id: user.id_usuario,
            name: user.nombre.trim().to_owned(),
            email: user.email.trim().to_owned(),
            phone: non_blank(user.telefono),
            photo_url: non_blank(user.foto),
            registered_at: non_blank(user.fecha_registro),
            role,
        }
    }
}

impl ProfileUpdate {
    /// Editable fields of `profile`, in wire form, as a starting point for the edit form.
    pub fn from_profile(profile: &UserProfile) -> Self {
        let mut update = Self {
            nombre: Some(profile.name.clone()),
            telefono: profile.phone.clone(),
            ..Self::default()
        };
        match &profile.role {
            RoleProfile::Student(student) => {
                update.github.clone_from(&student.github);
                update.bio.clone_from(&student.bio);
                update.tecnologias = join_technologies(&student.technologies);
            }
            RoleProfile::Company(company) => {
                update.sitio_web.clone_from(&company.website);
                update.direccion.clone_from(&company.address);
                update.identificador_fiscal.clone_from(&company.tax_id);
            }
            RoleProfile::Coordinator | RoleProfile::Other { .. } => {}
        }
        update
    }

    /// Trim every value. A cleared field is sent as `""` so the server drops
    /// the stored value; only the name, which cannot be blank, is omitted.
    #[must_use]
    pub fn normalized(self) -> Self {
        let trim = |v: Option<String>| v.map(|v| v.trim().to_owned());
        Self {
            nombre: non_blank(self.nombre),
            telefono: trim(self.telefono),
            github: trim(self.github),
            tecnologias: trim(self.tecnologias),
            bio: trim(self.bio),
            sitio_web: trim(self.sitio_web),
            direccion: trim(self.direccion),
            identificador_fiscal: trim(self.identificador_fiscal),
        }
    }
}

/// Trimmed value, or `None` when absent or blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Split the API's comma-separated technology column.
pub fn split_technologies(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Inverse of [`split_technologies`]; `None` for an empty list.
pub fn join_technologies(technologies: &[String]) -> Option<String> {
    if technologies.is_empty() {
        None
    } else {
        Some(technologies.join(", "))
    }
}
