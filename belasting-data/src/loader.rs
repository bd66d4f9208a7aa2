use std::io::Read;

use belasting_core::models::is_valid_percentage;
use belasting_core::{AdviceRepository, BusinessType, NewDeductionRule, RepositoryError};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading deduction rule data.
#[derive(Debug, Error)]
pub enum DeductionRuleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid business type '{business_type}' for item '{item}' (expected zzp, bv or both)")]
    InvalidBusinessType { item: String, business_type: String },

    #[error("Invalid percentage {percentage} for item '{item}' (expected 0 to 100)")]
    InvalidPercentage { item: String, percentage: Decimal },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for DeductionRuleLoaderError {
    fn from(err: csv::Error) -> Self {
        DeductionRuleLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from the deduction rules CSV file.
///
/// Columns: `category,item,description,conditions,percentage,business_type,sector`.
/// An empty `percentage` means fully deductible; an empty `sector` means the
/// rule applies to every sector.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DeductionRuleRecord {
    pub category: String,
    pub item: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub conditions: String,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub percentage: Option<Decimal>,
    pub business_type: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sector: Option<String>,
}

impl DeductionRuleRecord {
    fn to_new_rule(&self) -> Result<NewDeductionRule, DeductionRuleLoaderError> {
        let business_type = BusinessType::parse(&self.business_type).ok_or_else(|| {
            DeductionRuleLoaderError::InvalidBusinessType {
                item: self.item.clone(),
                business_type: self.business_type.clone(),
            }
        })?;

        if let Some(percentage) = self.percentage {
            if !is_valid_percentage(Some(percentage)) {
                return Err(DeductionRuleLoaderError::InvalidPercentage {
                    item: self.item.clone(),
                    percentage,
                });
            }
        }

        Ok(NewDeductionRule {
            category: self.category.trim().to_string(),
            item: self.item.trim().to_string(),
            description: self.description.trim().to_string(),
            conditions: self.conditions.trim().to_string(),
            percentage: self.percentage,
            business_type,
            sector: self.sector.clone(),
        })
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .trim_end_matches('%')
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()))
}

/// Loader for deduction rules from CSV files.
///
/// Reads CSV data and writes it through the [`AdviceRepository`] trait, so
/// it works with any registered backend.
pub struct DeductionRuleLoader;

impl DeductionRuleLoader {
    /// Parse deduction rule records from any `Read` source.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<DeductionRuleRecord>, DeductionRuleLoaderError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: DeductionRuleRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Load records into the repository, one category at a time.
    ///
    /// Every record is validated before anything is written. Each category
    /// present in the input is replaced as one unit by the rules of that
    /// category in CSV order, so loading the same file twice yields the same
    /// catalogue and a failed write leaves the category as it was.
    /// Categories absent from the file are left untouched.
    pub async fn load<R: AdviceRepository + ?Sized>(
        repo: &R,
        records: &[DeductionRuleRecord],
    ) -> Result<usize, DeductionRuleLoaderError> {
        let rules = records
            .iter()
            .map(DeductionRuleRecord::to_new_rule)
            .collect::<Result<Vec<_>, _>>()?;

        let mut groups: Vec<(String, Vec<NewDeductionRule>)> = Vec::new();
        for rule in rules {
            match groups.iter_mut().find(|(category, _)| *category == rule.category) {
                Some((_, group)) => group.push(rule),
                None => groups.push((rule.category.clone(), vec![rule])),
            }
        }

        let mut inserted = 0;
        for (category, group) in groups {
            let deleted = repo
                .replace_deduction_rules_in_category(&category, &group)
                .await?;
            debug!(category = %category, deleted, added = group.len(), "replaced category");
            inserted += group.len();
        }

        info!(inserted, "deduction rules loaded");
        Ok(inserted)
    }
}
