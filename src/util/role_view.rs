//! Role-conditional view selection.
//!
//! Maps a role code to the dashboard/profile variant the user gets, which
//! profile fields that variant edits, and which actions it offers. Unknown or
//! missing codes fall back to [`ViewVariant::Minimal`] instead of failing.

#[cfg(test)]
#[path = "role_view_test.rs"]
mod role_view_test;

use crate::net::types::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewVariant {
    Coordinator,
    Student,
    Company,
    Minimal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Phone,
    Technologies,
    Bio,
    Github,
    Website,
    Address,
    TaxId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoleAction {
    ViewStatistics,
    ReviewInitiatives,
    ReviewPostulations,
    BrowseProjects,
    ApplyToProjects,
    UploadCv,
    CreateInitiative,
    TrackInitiatives,
}

const COMMON_FIELDS: &[ProfileField] = &[ProfileField::Name, ProfileField::Phone];
const STUDENT_FIELDS: &[ProfileField] = &[
    ProfileField::Name,
    ProfileField::Phone,
    ProfileField::Technologies,
    ProfileField::Github,
    ProfileField::Bio,
];
const COMPANY_FIELDS: &[ProfileField] = &[
    ProfileField::Name,
    ProfileField::Phone,
    ProfileField::Website,
    ProfileField::Address,
    ProfileField::TaxId,
];

impl ViewVariant {
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(Role::Coordinator) => Self::Coordinator,
            Some(Role::Student) => Self::Student,
            Some(Role::Company) => Self::Company,
            None => Self::Minimal,
        }
    }

    pub fn for_code(code: Option<i64>) -> Self {
        Self::for_role(code.and_then(Role::from_code))
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Coordinator => "Coordination panel",
            Self::Student => "Student dashboard",
            Self::Company => "Company dashboard",
            Self::Minimal => "Dashboard",
        }
    }

    pub fn editable_fields(self) -> &'static [ProfileField] {
        match self {
            Self::Student => STUDENT_FIELDS,
            Self::Company => COMPANY_FIELDS,
            Self::Coordinator | Self::Minimal => COMMON_FIELDS,
        }
    }

    pub fn actions(self) -> &'static [RoleAction] {
        match self {
            Self::Coordinator => &[
                RoleAction::ViewStatistics,
                RoleAction::ReviewInitiatives,
                RoleAction::ReviewPostulations,
            ],
            Self::Student => &[
                RoleAction::BrowseProjects,
                RoleAction::ApplyToProjects,
                RoleAction::UploadCv,
            ],
            Self::Company => &[RoleAction::CreateInitiative, RoleAction::TrackInitiatives],
            Self::Minimal => &[],
        }
    }

    pub fn allows(self, action: RoleAction) -> bool {
        self.actions().contains(&action)
    }

    pub fn offers_photo_upload(self) -> bool {
        matches!(self, Self::Coordinator | Self::Company)
    }

    pub fn offers_cv_upload(self) -> bool {
        self.allows(RoleAction::UploadCv)
    }
}

impl ProfileField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Full name",
            Self::Phone => "Phone",
            Self::Technologies => "Technologies (comma separated)",
            Self::Bio => "About you",
            Self::Github => "GitHub",
            Self::Website => "Website",
            Self::Address => "Address",
            Self::TaxId => "Tax identifier",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, Self::Bio)
    }
}

impl RoleAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::ViewStatistics => "Platform statistics",
            Self::ReviewInitiatives => "Approve or reject pending initiatives",
            Self::ReviewPostulations => "Accept or reject pending applications",
            Self::BrowseProjects => "Browse open projects",
            Self::ApplyToProjects => "Apply to projects",
            Self::UploadCv => "Upload your CV",
            Self::CreateInitiative => "Propose a new initiative",
            Self::TrackInitiatives => "Track your initiatives",
        }
    }
}
