//! Patient records kept in the JSON file store.
//!
//! `bmi` and `verdict` are projections of `height` and `weight`: they are
//! computed whenever a patient is rendered and never written to storage.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    errors::ModelError,
    record::{self, KeyedRecord, Record},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Others,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: i32,
    pub gender: Gender,
    /// Metres.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
}

/// Stored form of a patient: every field except the id, which is the map key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub name: String,
    pub city: String,
    pub age: i32,
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl Verdict {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Verdict::Underweight
        } else if bmi < 25.0 {
            Verdict::Normal
        } else if bmi < 30.0 {
            Verdict::Overweight
        } else {
            Verdict::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Underweight => "underweight",
            Verdict::Normal => "normal",
            Verdict::Overweight => "overweight",
            Verdict::Obese => "obese",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `weight / height²` rounded half away from zero to two decimals.
pub fn bmi(height: f64, weight: f64) -> f64 {
    let raw = weight / height / height;
    (raw * 100.0).round() / 100.0
}

impl Patient {
    pub fn bmi(&self) -> f64 {
        bmi(self.height, self.weight)
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_bmi(self.bmi())
    }

    pub fn view(self) -> PatientView {
        let bmi = self.bmi();
        PatientView { verdict: Verdict::from_bmi(bmi), bmi, patient: self }
    }
}

impl Record for Patient {
    type Id = String;

    const KIND: &'static str = "patient";

    fn id(&self) -> &String {
        &self.id
    }

    fn validate(&self) -> Result<(), ModelError> {
        record::require_text("id", &self.id)?;
        record::require_text("name", &self.name)?;
        record::require_text("city", &self.city)?;
        if self.age <= 0 || self.age >= 120 {
            return Err(ModelError::invalid_field("age", "must be greater than 0 and less than 120"));
        }
        record::require_positive("height", self.height)?;
        record::require_positive("weight", self.weight)?;
        if !self.bmi().is_finite() {
            return Err(ModelError::invalid_field("height", "is too small to derive a bmi"));
        }
        Ok(())
    }
}

impl KeyedRecord for Patient {
    type Body = PatientRecord;

    fn into_entry(self) -> (String, PatientRecord) {
        let body = PatientRecord {
            name: self.name,
            city: self.city,
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
        };
        (self.id, body)
    }

    fn from_entry(id: String, body: PatientRecord) -> Self {
        Self {
            id,
            name: body.name,
            city: body.city,
            age: body.age,
            gender: body.gender,
            height: body.height,
            weight: body.weight,
        }
    }
}

/// Response shape: the stored fields plus the derived ones.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PatientView {
    #[serde(flatten)]
    pub patient: Patient,
    pub bmi: f64,
    pub verdict: Verdict,
}

/// Sparse patch for a patient; absent fields keep their stored values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub weight: Option<f64>,
}

impl PatientUpdate {
    /// Overwrite every field present in the patch. The id is never touched.
    pub fn apply(self, mut patient: Patient) -> Patient {
        if let Some(name) = self.name {
            patient.name = name;
        }
        if let Some(city) = self.city {
            patient.city = city;
        }
        if let Some(age) = self.age {
            patient.age = age;
        }
        if let Some(gender) = self.gender {
            patient.gender = gender;
        }
        if let Some(height) = self.height {
            patient.height = height;
        }
        if let Some(weight) = self.weight {
            patient.weight = weight;
        }
        patient
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortField {
    Height,
    Weight,
    Bmi,
}

impl SortField {
    pub const ALL: [&'static str; 3] = ["height", "weight", "bmi"];

    pub fn key(&self, patient: &Patient) -> f64 {
        match self {
            SortField::Height => patient.height,
            SortField::Weight => patient.weight,
            SortField::Bmi => patient.bmi(),
        }
    }
}

impl FromStr for SortField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "height" => Ok(SortField::Height),
            "weight" => Ok(SortField::Weight),
            "bmi" => Ok(SortField::Bmi),
            other => Err(ModelError::InvalidArgument(format!(
                "invalid sort field '{other}'; select from {:?}",
                Self::ALL
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ModelError::InvalidArgument(format!(
                "invalid order '{other}'; select between asc and desc"
            ))),
        }
    }
}

/// Stable sort: patients with equal keys keep their relative order in both directions.
pub fn sort_patients(patients: &mut [Patient], field: SortField, order: SortOrder) {
    patients.sort_by(|a, b| {
        let ord: Ordering = field.key(a).total_cmp(&field.key(b));
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}
