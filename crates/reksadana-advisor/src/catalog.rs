//! Fund Catalog
//!
//! Read-only, in-memory view of the precomputed ranking files:
//!
//! | File | Columns |
//! |------|---------|
//! | `funds_<code>.csv` | `mfName`, `score_0_100`, `rank`, optional `score_raw` |
//! | `funds_master_clean.csv` | `mfName`, `MFType`, `score_0_100`, optional `rank`/`score_raw`, numeric features |
//! | `weights.csv` | `feature`, `weight` |
//! | `oos_reliability.csv` | `MFType`, `outofsample_<window>` |
//!
//! Loading never fails as a whole. A missing or malformed file only removes
//! that piece from the catalog and is logged.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};
use crate::model::{finite_or_zero, FeatureWeights, FundCategory, FundRecord, ReliabilityTable};

pub const MASTER_FILE: &str = "funds_master_clean.csv";
pub const WEIGHTS_FILE: &str = "weights.csv";
pub const RELIABILITY_FILE: &str = "oos_reliability.csv";

const COL_NAME: &str = "mfName";
const COL_TYPE: &str = "MFType";
const COL_SCORE: &str = "score_0_100";
const COL_RANK: &str = "rank";
const COL_RAW: &str = "score_raw";

#[derive(Clone, Debug, Default)]
pub struct FundCatalog {
    partitions: BTreeMap<FundCategory, Vec<FundRecord>>,
    master: Option<Vec<FundRecord>>,
    weights: FeatureWeights,
    reliability: ReliabilityTable,
}

/// Counts reported by the health endpoint
#[derive(Clone, Debug, Serialize)]
pub struct CatalogSummary {
    pub partitions: BTreeMap<FundCategory, usize>,
    pub master_rows: Option<usize>,
    pub weights: usize,
    pub reliability: usize,
}

impl FundCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every catalog file found in `dir`
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut catalog = Self::empty();

        for category in FundCategory::ALL {
            let path = dir.join(category.ranking_file());
            match read_fund_table(&path, CategorySource::Fixed(category)) {
                Ok(funds) => {
                    tracing::info!(category = category.code(), funds = funds.len(), "Loaded ranking partition");
                    catalog = catalog.with_partition(category, funds);
                }
                Err(e) => {
                    tracing::warn!(category = category.code(), path = %path.display(), error = %e, "Skipping ranking partition");
                }
            }
        }

        match read_fund_table(&dir.join(MASTER_FILE), CategorySource::Column) {
            Ok(funds) => {
                tracing::info!(funds = funds.len(), "Loaded master table");
                catalog.master = Some(funds);
            }
            Err(e) => tracing::warn!(error = %e, "Master table unavailable; analysis disabled"),
        }

        match read_weights(&dir.join(WEIGHTS_FILE)) {
            Ok(weights) => catalog.weights = weights,
            Err(e) => tracing::warn!(error = %e, "Feature weights unavailable"),
        }

        match read_reliability(&dir.join(RELIABILITY_FILE)) {
            Ok(reliability) => catalog.reliability = reliability,
            Err(e) => tracing::warn!(error = %e, "Reliability table unavailable"),
        }

        catalog
    }

    /// Install a partition, ordering it by rank (unranked rows last)
    pub fn with_partition(mut self, category: FundCategory, mut funds: Vec<FundRecord>) -> Self {
        funds.sort_by_key(|f| (f.rank == 0, f.rank));
        self.partitions.insert(category, funds);
        self
    }

    pub fn with_master(mut self, funds: Vec<FundRecord>) -> Self {
        self.master = Some(funds);
        self
    }

    pub fn with_weight(mut self, feature: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(feature.into(), finite_or_zero(weight));
        self
    }

    pub fn with_reliability(mut self, category: FundCategory, alpha: f64) -> Self {
        self.reliability.insert(category.code().to_string(), finite_or_zero(alpha));
        self
    }

    /// Ranked funds of one category
    pub fn partition(&self, category: FundCategory) -> Option<&[FundRecord]> {
        self.partitions.get(&category).map(Vec::as_slice)
    }

    pub fn master(&self) -> Option<&[FundRecord]> {
        self.master.as_deref()
    }

    /// First master row whose name contains `query`, case-insensitively
    pub fn find_first(&self, query: &str) -> Result<&FundRecord> {
        let master = self
            .master()
            .ok_or_else(|| AdvisorError::DataUnavailable("master table not loaded".into()))?;

        master
            .iter()
            .find(|fund| fund.matches(query))
            .ok_or_else(|| AdvisorError::FundNotFound(query.to_string()))
    }

    pub const fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    pub const fn reliability(&self) -> &ReliabilityTable {
        &self.reliability
    }

    /// Historical alpha for a category, `0.0` when not on record
    pub fn alpha_for(&self, category: FundCategory) -> f64 {
        self.reliability.get(category.code()).copied().unwrap_or(0.0)
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            partitions: self.partitions.iter().map(|(c, f)| (*c, f.len())).collect(),
            master_rows: self.master.as_ref().map(Vec::len),
            weights: self.weights.len(),
            reliability: self.reliability.len(),
        }
    }
}

#[derive(Clone, Copy)]
enum CategorySource {
    Fixed(FundCategory),
    /// Read from the `MFType` column
    Column,
}

/// Header positions of a fund table
struct Columns {
    name: usize,
    category: Option<usize>,
    score: Option<usize>,
    rank: Option<usize>,
    raw: Option<usize>,
    features: Vec<(usize, String)>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord, source: CategorySource, path: &Path) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let missing = |column: &str| {
            AdvisorError::DataUnavailable(format!("{}: missing column '{column}'", path.display()))
        };

        let name = find(COL_NAME).ok_or_else(|| missing(COL_NAME))?;
        let score = find(COL_SCORE);
        let rank = find(COL_RANK);
        let category = match source {
            CategorySource::Fixed(_) => {
                score.ok_or_else(|| missing(COL_SCORE))?;
                rank.ok_or_else(|| missing(COL_RANK))?;
                None
            }
            CategorySource::Column => Some(find(COL_TYPE).ok_or_else(|| missing(COL_TYPE))?),
        };

        let known = [COL_NAME, COL_TYPE, COL_SCORE, COL_RANK, COL_RAW];
        let features = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.trim().is_empty() && !known.contains(&h.trim()))
            .map(|(i, h)| (i, h.trim().to_string()))
            .collect();

        Ok(Self {
            name,
            category,
            score,
            rank,
            raw: find(COL_RAW),
            features,
        })
    }
}

fn read_fund_table(path: &Path, source: CategorySource) -> Result<Vec<FundRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let columns = Columns::locate(reader.headers()?, source, path)?;

    let mut funds = Vec::new();
    for record in reader.records() {
        let record = record?;
        let name = record.get(columns.name).unwrap_or_default().trim();
        if name.is_empty() {
            continue;
        }

        let category = match source {
            CategorySource::Fixed(category) => category,
            CategorySource::Column => {
                let code = columns.category.and_then(|i| record.get(i)).unwrap_or_default();
                let Some(category) = FundCategory::from_code(code) else {
                    tracing::debug!(fund = name, code, "Skipping row with unknown MFType");
                    continue;
                };
                category
            }
        };

        let cell = |index: Option<usize>| index.and_then(|i| record.get(i)).and_then(parse_number);

        let mut fund = FundRecord::new(
            name,
            category,
            cell(columns.score).unwrap_or(0.0),
            cell(columns.rank).map_or(0, to_rank),
        );
        fund.raw_score = cell(columns.raw);

        for (index, feature) in &columns.features {
            if let Some(value) = cell(Some(*index)) {
                fund.features.insert(feature.clone(), value);
            }
        }

        funds.push(fund);
    }

    Ok(funds)
}

/// Numeric cell: blank and NaN become `0.0`; text that is not a number is `None`
fn parse_number(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Some(0.0);
    }
    cell.parse::<f64>().ok().map(finite_or_zero)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_rank(value: f64) -> u32 {
    if value >= 1.0 && value <= f64::from(u32::MAX) {
        value.round() as u32
    } else {
        0
    }
}

#[derive(Deserialize)]
struct WeightRow {
    feature: String,
    #[serde(deserialize_with = "csv::invalid_option")]
    weight: Option<f64>,
}

fn read_weights(path: &Path) -> Result<FeatureWeights> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut weights = FeatureWeights::new();
    for row in reader.deserialize::<WeightRow>() {
        let row = row?;
        weights.insert(row.feature.trim().to_string(), row.weight.map_or(0.0, finite_or_zero));
    }
    Ok(weights)
}

fn read_reliability(path: &Path) -> Result<ReliabilityTable> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let key = headers
        .iter()
        .position(|h| matches!(h.trim(), COL_TYPE | "category"))
        .ok_or_else(|| AdvisorError::DataUnavailable(format!("{}: missing column '{COL_TYPE}'", path.display())))?;
    let value = headers
        .iter()
        .position(|h| {
            let h = h.trim();
            h.starts_with("outofsample") || h == "historical_alpha"
        })
        .ok_or_else(|| {
            AdvisorError::DataUnavailable(format!("{}: missing out-of-sample column", path.display()))
        })?;

    let mut table = ReliabilityTable::new();
    for record in reader.records() {
        let record = record?;
        let code = record.get(key).unwrap_or_default().trim().to_uppercase();
        if code.is_empty() {
            continue;
        }
        let alpha = record.get(value).and_then(parse_number).unwrap_or(0.0);
        table.insert(code, alpha);
    }
    Ok(table)
}
