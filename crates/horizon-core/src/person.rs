//! People: the supporting cast around the year's plan

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::{Resource, ResourceKind};

/// Relationship of a person to the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonRole {
    Mentor,
    Partner,
    Supporter,
    Advisor,
    #[default]
    Other,
}

impl std::fmt::Display for PersonRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PersonRole::Mentor => "mentor",
            PersonRole::Partner => "partner",
            PersonRole::Supporter => "supporter",
            PersonRole::Advisor => "advisor",
            PersonRole::Other => "other",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for PersonRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mentor" => Ok(PersonRole::Mentor),
            "partner" => Ok(PersonRole::Partner),
            "supporter" => Ok(PersonRole::Supporter),
            "advisor" => Ok(PersonRole::Advisor),
            "other" => Ok(PersonRole::Other),
            unknown => Err(format!("unknown role '{unknown}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub role: PersonRole,
    #[serde(default)]
    pub role_description: String,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewPerson {
    pub name: String,
    pub role: PersonRole,
    pub role_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<PersonRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Resource for Person {
    type Draft = NewPerson;
    type Patch = PersonPatch;

    const KIND: ResourceKind = ResourceKind::Person;

    fn id(&self) -> i64 {
        self.id
    }

    fn synthesize(draft: &NewPerson, id: i64, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            role: draft.role,
            role_description: draft.role_description.clone(),
            contact_info: draft.contact_info.clone(),
            notes: draft.notes.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: &PersonPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(role_description) = &patch.role_description {
            self.role_description = role_description.clone();
        }
        if let Some(contact_info) = &patch.contact_info {
            self.contact_info = Some(contact_info.clone());
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
    }
}
