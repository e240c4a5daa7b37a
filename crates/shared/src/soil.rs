use serde::Serialize;
use thiserror::Error;

use crate::models::Location;

/// One of the five soil inputs on the recommendation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoilField {
    Nitrogen,
    Phosphorus,
    Potassium,
    Ph,
    Rainfall,
}

impl SoilField {
    pub const ALL: [SoilField; 5] = [
        SoilField::Nitrogen,
        SoilField::Phosphorus,
        SoilField::Potassium,
        SoilField::Ph,
        SoilField::Rainfall,
    ];

    /// Input name, identical to the request key.
    pub fn name(self) -> &'static str {
        match self {
            SoilField::Nitrogen => "N",
            SoilField::Phosphorus => "P",
            SoilField::Potassium => "K",
            SoilField::Ph => "ph",
            SoilField::Rainfall => "rainfall",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            SoilField::Nitrogen => "Nitrogen (N)",
            SoilField::Phosphorus => "Phosphorus (P)",
            SoilField::Potassium => "Potassium (K)",
            SoilField::Ph => "pH Level",
            SoilField::Rainfall => "Rainfall (mm)",
        }
    }

    /// HTML `step` attribute; pH takes two decimals.
    pub fn step(self) -> &'static str {
        match self {
            SoilField::Ph => "0.01",
            _ => "any",
        }
    }
}

impl std::fmt::Display for SoilField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.placeholder())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required.")]
    Missing(SoilField),
    #[error("{0} must be a number.")]
    NotNumeric(SoilField),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Unable to fetch geolocation. Please allow location access.")]
    NoLocation,
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Raw form state: the text of each input as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoilForm {
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
    pub ph: String,
    pub rainfall: String,
}

impl SoilForm {
    pub fn get(&self, field: SoilField) -> &str {
        match field {
            SoilField::Nitrogen => &self.nitrogen,
            SoilField::Phosphorus => &self.phosphorus,
            SoilField::Potassium => &self.potassium,
            SoilField::Ph => &self.ph,
            SoilField::Rainfall => &self.rainfall,
        }
    }

    pub fn set(&mut self, field: SoilField, value: impl Into<String>) {
        let slot = match field {
            SoilField::Nitrogen => &mut self.nitrogen,
            SoilField::Phosphorus => &mut self.phosphorus,
            SoilField::Potassium => &mut self.potassium,
            SoilField::Ph => &mut self.ph,
            SoilField::Rainfall => &mut self.rainfall,
        };
        *slot = value.into();
    }

    fn number(&self, field: SoilField) -> Result<f64, FormError> {
        let raw = self.get(field).trim();
        if raw.is_empty() {
            return Err(FormError::Missing(field));
        }
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(FormError::NotNumeric(field))
    }

    /// Build the recommendation request body. The location is checked
    /// before any field.
    pub fn to_request(
        &self,
        location: Option<Location>,
    ) -> Result<RecommendationRequest, SubmitError> {
        let location = location.ok_or(SubmitError::NoLocation)?;
        Ok(RecommendationRequest {
            n: self.number(SoilField::Nitrogen)?,
            p: self.number(SoilField::Phosphorus)?,
            k: self.number(SoilField::Potassium)?,
            ph: self.number(SoilField::Ph)?,
            rainfall: self.number(SoilField::Rainfall)?,
            lat: location.lat,
            lon: location.lon,
        })
    }
}

/// JSON body posted to the recommendation service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRequest {
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "P")]
    pub p: f64,
    #[serde(rename = "K")]
    pub k: f64,
    pub ph: f64,
    pub rainfall: f64,
    pub lat: f64,
    pub lon: f64,
}
