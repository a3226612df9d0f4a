//! Work entity model and DTOs.

use castlist_core::error::CoreError;
use castlist_core::types::DbId;
use castlist_core::validation::{normalized_title, parse_release_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{patched, present};

/// A row from the `works` table. `release_date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Work {
    pub id: DbId,
    pub title: String,
    pub release_date: NaiveDate,
}

/// A talent cast in the work, as shown on the work detail view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CastMember {
    pub talent_id: DbId,
    pub talent_name: String,
}

/// DTO for creating a work.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWork {
    pub title: String,
    pub release_date: String,
}

#[derive(Debug, Clone)]
pub struct NewWork {
    pub title: String,
    pub release_date: NaiveDate,
}

impl CreateWork {
    pub fn validated(&self) -> Result<NewWork, CoreError> {
        Ok(NewWork {
            title: normalized_title(&self.title)?,
            release_date: parse_release_date(&self.release_date)?,
        })
    }
}

/// DTO for patching a work. A key sent as `null` is rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWork {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub release_date: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct WorkChanges {
    pub title: Option<String>,
    pub release_date: Option<NaiveDate>,
}

impl UpdateWork {
    pub fn validated(&self) -> Result<WorkChanges, CoreError> {
        Ok(WorkChanges {
            title: patched("title", &self.title)?
                .map(|v| normalized_title(v))
                .transpose()?,
            release_date: patched("release_date", &self.release_date)?
                .map(|v| parse_release_date(v))
                .transpose()?,
        })
    }
}
