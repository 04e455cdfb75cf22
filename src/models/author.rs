//! Author model and related types

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::validation::{FieldRules, Outcome, Pipeline, ISO_DATE};

/// Maximum length of any author text field
pub const NAME_MAX_LEN: u64 = 100;

/// Full author record from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub nationality: Option<String>,
}

/// Validated author fields, written whole by create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorData {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub nationality: Option<String>,
}

impl Author {
    pub fn from_data(id: Uuid, data: AuthorData) -> Self {
        Self {
            id,
            first_name: data.first_name,
            family_name: data.family_name,
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
            nationality: data.nationality,
        }
    }

    /// "Family, First"; empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Whole-year difference between death and birth, when both are known
    pub fn lifespan(&self) -> Option<i32> {
        match (self.date_of_birth, self.date_of_death) {
            (Some(birth), Some(death)) => Some(death.year() - birth.year()),
            _ => None,
        }
    }

    pub fn url(&self) -> String {
        author_url(self.id)
    }
}

pub fn author_url(id: Uuid) -> String {
    format!("/catalog/author/{}", id)
}

/// "Dec 16, 1775", empty when absent
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Form prefill value, empty when absent
pub fn format_date_input(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(ISO_DATE).to_string())
        .unwrap_or_default()
}

/// Author as handed to templates: stored fields plus derived values
#[derive(Debug, Clone, Serialize)]
pub struct AuthorView {
    pub id: Option<Uuid>,
    pub first_name: String,
    pub family_name: String,
    pub nationality: String,
    pub name: String,
    pub lifespan: Option<i32>,
    pub url: String,
    pub date_of_birth_formatted: String,
    pub date_of_death_formatted: String,
    pub date_of_birth_yyyy_mm_dd: String,
    pub date_of_death_yyyy_mm_dd: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: Some(author.id),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            nationality: author.nationality.clone().unwrap_or_default(),
            name: author.name(),
            lifespan: author.lifespan(),
            url: author.url(),
            date_of_birth_formatted: format_date(author.date_of_birth),
            date_of_death_formatted: format_date(author.date_of_death),
            date_of_birth_yyyy_mm_dd: format_date_input(author.date_of_birth),
            date_of_death_yyyy_mm_dd: format_date_input(author.date_of_death),
        }
    }
}

impl From<&AuthorData> for AuthorView {
    /// A not-yet-stored draft, used to refill a rejected form
    fn from(data: &AuthorData) -> Self {
        let draft = Author::from_data(Uuid::nil(), data.clone());
        Self {
            id: None,
            url: String::new(),
            ..AuthorView::from(&draft)
        }
    }
}

impl AuthorData {
    /// Rules for the author create/update form
    pub fn pipeline() -> Pipeline {
        Pipeline::new()
            .field(FieldRules::required_name("first_name", "First name", NAME_MAX_LEN))
            .field(FieldRules::required_name("family_name", "Family name", NAME_MAX_LEN))
            .field(FieldRules::optional_date("date_of_birth", "Invalid date of birth"))
            .field(FieldRules::optional_date("date_of_death", "Invalid date of death"))
            .field(FieldRules::optional_text("nationality", "Nationality", NAME_MAX_LEN))
    }
}

impl From<&Outcome> for AuthorData {
    fn from(outcome: &Outcome) -> Self {
        Self {
            first_name: outcome.text("first_name"),
            family_name: outcome.text("family_name"),
            date_of_birth: outcome.date("date_of_birth"),
            date_of_death: outcome.date("date_of_death"),
            nationality: outcome.text_opt("nationality"),
        }
    }
}

/// Delete form body; the identifier comes from here, not from the path
#[derive(Debug, Deserialize)]
pub struct DeleteAuthor {
    pub authorid: Uuid,
}
