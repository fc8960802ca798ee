use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_domain::pagination::Sort;
use campus_domain::user::{UserStatus, UserType};

/// Lifecycle status of a boarding assignment. Transitions are free-form
/// status edits; the only enforced invariant is at most one active
/// assignment per `(user_id, user_type)` at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Active,
    Inactive,
    Pending,
}

impl AssignmentStatus {
    pub fn from_kebab(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

/// Type-specific attributes of a directory record. The variant must match
/// the record's `user_type` and cannot change to a different variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UserProfile {
    Student {
        roll_number: String,
    },
    Teacher {
        subjects: Vec<String>,
        years_of_experience: u16,
        designation: Option<String>,
    },
    Staff {
        designation: String,
        years_of_experience: u16,
    },
}

impl UserProfile {
    pub fn matches_user_type(&self, user_type: UserType) -> bool {
        matches!(
            (self, user_type),
            (Self::Student { .. }, UserType::Student)
                | (Self::Teacher { .. }, UserType::Teacher)
                | (Self::Staff { .. }, UserType::Staff)
        )
    }
}

/// A directory record for a student, teacher, or staff member.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub user_type: UserType,
    pub status: UserStatus,
    pub profile: UserProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// "First Last" display name, snapshotted onto assignments.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A directory record annotated with whether the user currently holds an
/// active boarding assignment. Derived, never stored.
#[derive(Debug, Clone)]
pub struct AssignableUser {
    pub user: UserRecord,
    pub is_assigned: bool,
}

/// Top level of the package hierarchy.
#[derive(Debug, Clone)]
pub struct PackageType {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A package under a package type.
#[derive(Debug, Clone)]
pub struct Package {
    pub id: Uuid,
    pub package_type_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A priced catalog item assignable to a user. `package_type_id` is copied
/// from the parent package at creation.
#[derive(Debug, Clone)]
pub struct MealPackage {
    pub id: Uuid,
    pub package_id: Uuid,
    pub package_type_id: Uuid,
    pub name: String,
    pub price: f64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Links one user to one meal package with a derived price breakdown.
///
/// `user_name` and `meal_package_name` are snapshots taken when the
/// assignment is created or its package changes; they are not kept in
/// sync with later directory/catalog renames.
#[derive(Debug, Clone)]
pub struct BoardingAssignment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_type: UserType,
    pub user_name: String,
    pub meal_package_id: Uuid,
    pub meal_package_name: String,
    pub discount_percentage: f64,
    pub original_price: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
    pub assigned_date: DateTime<Utc>,
    pub assigned_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Aggregate over the assignment set, recomputed on demand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssignmentSummary {
    pub total_active: u64,
    pub active_students: u64,
    pub active_teachers: u64,
    pub active_staff: u64,
    pub total_revenue: f64,
    pub average_discount: f64,
}

/// Filters accepted by the directory list endpoint.
#[derive(Debug, Clone, Default)]
pub struct UserListFilter {
    pub user_type: Option<UserType>,
    pub status: Option<UserStatus>,
    /// Case-insensitive substring over first/last name and email.
    pub search: Option<String>,
}

impl UserListFilter {
    pub fn matches(&self, user: &UserRecord) -> bool {
        if let Some(t) = self.user_type {
            if user.user_type != t {
                return false;
            }
        }
        if let Some(s) = self.status {
            if user.status != s {
                return false;
            }
        }
        if let Some(ref needle) = self.search {
            let needle = needle.to_lowercase();
            let haystack = format!(
                "{} {} {}",
                user.first_name,
                user.last_name,
                user.email.as_deref().unwrap_or_default()
            )
            .to_lowercase();
            if !haystack.contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Filters accepted by the assignment list endpoint.
#[derive(Debug, Clone, Default)]
pub struct AssignmentListFilter {
    pub user_type: Option<UserType>,
    pub status: Option<AssignmentStatus>,
    pub meal_package_id: Option<Uuid>,
    /// Case-insensitive substring over the user-name snapshot.
    pub search: Option<String>,
}

impl AssignmentListFilter {
    pub fn matches(&self, assignment: &BoardingAssignment) -> bool {
        if let Some(t) = self.user_type {
            if assignment.user_type != t {
                return false;
            }
        }
        if let Some(s) = self.status {
            if assignment.status != s {
                return false;
            }
        }
        if let Some(id) = self.meal_package_id {
            if assignment.meal_package_id != id {
                return false;
            }
        }
        if let Some(ref needle) = self.search {
            if !assignment
                .user_name
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

/// Sort options for directory list queries.
#[derive(Debug, Clone, Copy)]
pub enum UserSortBy {
    CreatedAt(Sort),
    Name(Sort),
}

impl Default for UserSortBy {
    fn default() -> Self {
        Self::CreatedAt(Sort::Desc)
    }
}

impl UserSortBy {
    pub fn from_kebab(s: &str) -> Option<Self> {
        match s {
            "created-at-desc" => Some(Self::CreatedAt(Sort::Desc)),
            "created-at-asc" => Some(Self::CreatedAt(Sort::Asc)),
            "name-desc" => Some(Self::Name(Sort::Desc)),
            "name-asc" => Some(Self::Name(Sort::Asc)),
            _ => None,
        }
    }
}

/// Sort options for assignment list queries.
#[derive(Debug, Clone, Copy)]
pub enum AssignmentSortBy {
    AssignedDate(Sort),
    CreatedAt(Sort),
}

impl Default for AssignmentSortBy {
    fn default() -> Self {
        Self::AssignedDate(Sort::Desc)
    }
}

impl AssignmentSortBy {
    pub fn from_kebab(s: &str) -> Option<Self> {
        match s {
            "assigned-date-desc" => Some(Self::AssignedDate(Sort::Desc)),
            "assigned-date-asc" => Some(Self::AssignedDate(Sort::Asc)),
            "created-at-desc" => Some(Self::CreatedAt(Sort::Desc)),
            "created-at-asc" => Some(Self::CreatedAt(Sort::Asc)),
            _ => None,
        }
    }
}
