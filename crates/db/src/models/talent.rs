//! Talent entity model and DTOs.

use castlist_core::error::CoreError;
use castlist_core::naming::full_name;
use castlist_core::types::DbId;
use castlist_core::validation::{
    normalized_text, validate_age, MAX_GENDER_LEN, MAX_NAME_LEN,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{patched, present};

/// A row from the `talents` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Talent {
    pub id: DbId,
    pub first_name: String,
    pub second_name: String,
    pub age: i32,
    pub gender: String,
}

/// Short listing projection: id plus full display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TalentSummary {
    pub id: DbId,
    pub name: String,
}

impl From<Talent> for TalentSummary {
    fn from(talent: Talent) -> Self {
        Self {
            name: full_name(&talent.first_name, &talent.second_name),
            id: talent.id,
        }
    }
}

/// A work the talent is cast in, as shown on the talent detail view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TalentCredit {
    pub work_id: DbId,
    pub work_title: String,
}

/// DTO for creating a talent. Every field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTalent {
    pub first_name: String,
    pub second_name: String,
    pub gender: String,
    pub age: i64,
}

/// Validated, title-cased talent ready for insertion.
#[derive(Debug, Clone)]
pub struct NewTalent {
    pub first_name: String,
    pub second_name: String,
    pub gender: String,
    pub age: i32,
}

impl CreateTalent {
    pub fn validated(&self) -> Result<NewTalent, CoreError> {
        Ok(NewTalent {
            first_name: normalized_text("first_name", &self.first_name, MAX_NAME_LEN)?,
            second_name: normalized_text("second_name", &self.second_name, MAX_NAME_LEN)?,
            gender: normalized_text("gender", &self.gender, MAX_GENDER_LEN)?,
            age: validate_age(self.age)?,
        })
    }
}

/// DTO for patching a talent. Absent keys leave the stored value untouched;
/// a key sent as `null` is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTalent {
    #[serde(default, deserialize_with = "present")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub second_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub gender: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub age: Option<Option<i64>>,
}

/// Validated patch. `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct TalentChanges {
    pub first_name: Option<String>,
    pub second_name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
}

impl UpdateTalent {
    pub fn validated(&self) -> Result<TalentChanges, CoreError> {
        let text = |field: &str, value: &Option<Option<String>>, max_len: usize| {
            patched(field, value)?
                .map(|v| normalized_text(field, v, max_len))
                .transpose()
        };
        Ok(TalentChanges {
            first_name: text("first_name", &self.first_name, MAX_NAME_LEN)?,
            second_name: text("second_name", &self.second_name, MAX_NAME_LEN)?,
            gender: text("gender", &self.gender, MAX_GENDER_LEN)?,
            age: patched("age", &self.age)?
                .copied()
                .map(validate_age)
                .transpose()?,
        })
    }
}
