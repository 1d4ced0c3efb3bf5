//! Authenticated user and login token.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Role of a dashboard user.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    ChiefJustice,
    PresidingJudge,
    CourtAdministrator,
    Scheduler,
    Lawyer,
    PublicProsecutor,
    Litigant,
    Public,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::ChiefJustice => "chief_justice",
            UserRole::PresidingJudge => "presiding_judge",
            UserRole::CourtAdministrator => "court_administrator",
            UserRole::Scheduler => "scheduler",
            UserRole::Lawyer => "lawyer",
            UserRole::PublicProsecutor => "public_prosecutor",
            UserRole::Litigant => "litigant",
            UserRole::Public => "public",
        }
    }

    /// Role as shown in the header, e.g. "presiding judge".
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

/// The current user as returned by `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(default)]
    pub court_id: Option<i64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

impl User {
    /// Public users only read; every other role may create records.
    pub fn can_create_cases(&self) -> bool {
        self.role != UserRole::Public
    }
}

fn default_true() -> bool {
    true
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_id: Option<i64>,
    pub password: String,
}

/// Response of `POST /auth/token`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}
