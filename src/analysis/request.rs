//! Submitted analysis parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::{AnalysisError, AnalysisResult};

/// Default sampling temperature, tuned for strictly factual analysis.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Governing jurisdiction for the analysis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Jurisdiction {
    /// New York state law.
    #[default]
    #[serde(rename = "New York")]
    NewYork,
    /// California state law.
    #[serde(rename = "California")]
    California,
    /// Delaware state law.
    #[serde(rename = "Delaware")]
    Delaware,
    /// Texas state law.
    #[serde(rename = "Texas")]
    Texas,
    /// United States federal law.
    #[serde(rename = "Federal (USA)")]
    FederalUsa,
    /// Law of England and Wales, Scotland and Northern Ireland.
    #[serde(rename = "United Kingdom")]
    UnitedKingdom,
    /// European Union law.
    #[serde(rename = "EU Law")]
    EuLaw,
}

impl Jurisdiction {
    /// Every selectable jurisdiction, in display order.
    pub const ALL: [Self; 7] = [
        Self::NewYork,
        Self::California,
        Self::Delaware,
        Self::Texas,
        Self::FederalUsa,
        Self::UnitedKingdom,
        Self::EuLaw,
    ];

    /// Display and wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewYork => "New York",
            Self::California => "California",
            Self::Delaware => "Delaware",
            Self::Texas => "Texas",
            Self::FederalUsa => "Federal (USA)",
            Self::UnitedKingdom => "United Kingdom",
            Self::EuLaw => "EU Law",
        }
    }
}

impl fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Area of practice the associate specializes in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PracticeArea {
    /// Contract law.
    #[default]
    #[serde(rename = "Contract Law")]
    ContractLaw,
    /// Intellectual property.
    #[serde(rename = "Intellectual Property")]
    IntellectualProperty,
    /// Tort law.
    #[serde(rename = "Tort Law")]
    TortLaw,
    /// Criminal defense.
    #[serde(rename = "Criminal Defense")]
    CriminalDefense,
    /// Corporate governance.
    #[serde(rename = "Corporate Governance")]
    CorporateGovernance,
}

impl PracticeArea {
    /// Every selectable practice area, in display order.
    pub const ALL: [Self; 5] = [
        Self::ContractLaw,
        Self::IntellectualProperty,
        Self::TortLaw,
        Self::CriminalDefense,
        Self::CorporateGovernance,
    ];

    /// Display and wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContractLaw => "Contract Law",
            Self::IntellectualProperty => "Intellectual Property",
            Self::TortLaw => "Tort Law",
            Self::CriminalDefense => "Criminal Defense",
            Self::CorporateGovernance => "Corporate Governance",
        }
    }
}

impl fmt::Display for PracticeArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submitted "Analyze" action. Built once from the form and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Governing jurisdiction.
    pub jurisdiction: Jurisdiction,
    /// Practice area.
    pub practice_area: PracticeArea,
    /// Sampling temperature in `[0, 1]`.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Free-text fact pattern.
    #[serde(default)]
    pub fact_pattern: String,
}

const fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            jurisdiction: Jurisdiction::default(),
            practice_area: PracticeArea::default(),
            temperature: DEFAULT_TEMPERATURE,
            fact_pattern: String::new(),
        }
    }
}

impl AnalysisRequest {
    /// Create a request with the default temperature.
    #[must_use]
    pub fn new(
        jurisdiction: Jurisdiction,
        practice_area: PracticeArea,
        fact_pattern: impl Into<String>,
    ) -> Self {
        Self {
            jurisdiction,
            practice_area,
            temperature: DEFAULT_TEMPERATURE,
            fact_pattern: fact_pattern.into(),
        }
    }

    /// Set the sampling temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Check the input gates that must pass before any provider call.
    ///
    /// # Errors
    /// Returns [`AnalysisError::EmptyInput`] for a blank fact pattern and
    /// [`AnalysisError::InvalidTemperature`] outside `[0, 1]`.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.fact_pattern.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(AnalysisError::InvalidTemperature(self.temperature));
        }

        Ok(())
    }
}
