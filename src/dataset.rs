use serde::Serialize;
use std::{io, path::Path};

/// The sixteen type columns the per-country share table is expected to carry.
pub const MBTI_TYPES: [&str; 16] = [
    "INTJ", "INTP", "ENTJ", "ENTP", "INFJ", "INFP", "ENFJ", "ENFP", "ISTJ", "ISFJ", "ESTJ",
    "ESFJ", "ISTP", "ISFP", "ESTP", "ESFP",
];

pub const COUNTRY_COLUMN: &str = "Country";
pub const HOME_COUNTRY: &str = "South Korea";
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("dataset has no {0:?} column")]
    MissingColumn(String),
    #[error("{country}: {column} is not a share ({value:?})")]
    InvalidShare {
        country: String,
        column: String,
        value: String,
    },
    #[error("dataset has no rows")]
    Empty,
    #[error("unknown type {0:?}")]
    UnknownType(String),
}

#[derive(Debug, Clone, PartialEq)]
struct CountryRow {
    country: String,
    shares: [f64; 16],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryShare {
    pub country: String,
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeInsight {
    pub mbti: String,
    pub top_country: String,
    pub top_share: f64,
    pub top_countries: Vec<CountryShare>,
    pub home_country: String,
    pub home_share: Option<f64>,
    /// 1-based position in the descending ranking.
    pub home_rank: Option<usize>,
    pub countries_ranked: usize,
}

/// Read-only share table: one row per country, one column per type.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<CountryRow>,
}

impl Dataset {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let reader = csv::Reader::from_path(path)?;
        Self::from_csv(reader)
    }

    pub fn from_reader(reader: impl io::Read) -> Result<Self, DatasetError> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Self, DatasetError> {
        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        let country_idx = column(COUNTRY_COLUMN)?;
        let mut type_idx = [0usize; 16];
        for (slot, mbti) in type_idx.iter_mut().zip(MBTI_TYPES) {
            *slot = column(mbti)?;
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let country = record.get(country_idx).unwrap_or("").trim().to_string();
            let mut shares = [0.0; 16];
            for ((share, &idx), mbti) in shares.iter_mut().zip(&type_idx).zip(MBTI_TYPES) {
                let raw = record.get(idx).unwrap_or("").trim();
                *share = raw
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| DatasetError::InvalidShare {
                        country: country.clone(),
                        column: mbti.to_string(),
                        value: raw.to_string(),
                    })?;
            }
            rows.push(CountryRow { country, shares });
        }

        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Countries ordered by descending share of `mbti`. Ties keep file order.
    pub fn ranking(&self, mbti: &str) -> Result<Vec<CountryShare>, DatasetError> {
        let column = type_column(mbti)?;
        let mut ranked: Vec<CountryShare> = self
            .rows
            .iter()
            .map(|row| CountryShare {
                country: row.country.clone(),
                share: row.shares[column],
            })
            .collect();
        ranked.sort_by(|a, b| b.share.total_cmp(&a.share));
        Ok(ranked)
    }

    pub fn insight(&self, mbti: &str, home: &str, top_n: usize) -> Result<TypeInsight, DatasetError> {
        let ranked = self.ranking(mbti)?;
        let top = ranked.first().ok_or(DatasetError::Empty)?.clone();

        let home_position = ranked
            .iter()
            .position(|entry| entry.country.eq_ignore_ascii_case(home));

        Ok(TypeInsight {
            mbti: mbti.trim().to_ascii_uppercase(),
            top_country: top.country,
            top_share: top.share,
            home_country: home.to_string(),
            home_share: home_position.map(|idx| ranked[idx].share),
            home_rank: home_position.map(|idx| idx + 1),
            countries_ranked: ranked.len(),
            top_countries: ranked.into_iter().take(top_n.max(1)).collect(),
        })
    }
}

fn type_column(mbti: &str) -> Result<usize, DatasetError> {
    let wanted = mbti.trim().to_ascii_uppercase();
    MBTI_TYPES
        .iter()
        .position(|known| *known == wanted)
        .ok_or_else(|| DatasetError::UnknownType(mbti.to_string()))
}
