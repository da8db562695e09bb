use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single compensation record.
///
/// Field names on the wire follow the column headers of the source CSV
/// (`ano`, `senioridade`, ...). Records are validated once by the loader and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "ano")]
    pub year: i32,
    #[serde(rename = "senioridade")]
    pub seniority: String,
    #[serde(rename = "contrato")]
    pub contract: String,
    #[serde(rename = "tamanho_empresa")]
    pub company_size: String,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "remoto")]
    pub remote: String,
    /// Annual salary converted to USD.
    #[serde(rename = "usd")]
    pub salary_usd: f64,
    #[serde(rename = "residencia_iso3")]
    pub residence_iso3: String,
}

/// Column headers every input file must provide, in display order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "ano",
    "senioridade",
    "contrato",
    "tamanho_empresa",
    "cargo",
    "remoto",
    "usd",
    "residencia_iso3",
];

// ---------------------------------------------------------------------------
// Dimension – the four filterable columns
// ---------------------------------------------------------------------------

/// A filterable column of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Year,
    Seniority,
    Contract,
    CompanySize,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Year,
        Dimension::Seniority,
        Dimension::Contract,
        Dimension::CompanySize,
    ];

    /// Label shown above the picker.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Year => "Year",
            Dimension::Seniority => "Seniority",
            Dimension::Contract => "Contract type",
            Dimension::CompanySize => "Company size",
        }
    }

    /// Source column backing this dimension.
    pub fn column(self) -> &'static str {
        match self {
            Dimension::Year => "ano",
            Dimension::Seniority => "senioridade",
            Dimension::Contract => "contrato",
            Dimension::CompanySize => "tamanho_empresa",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct values per dimension.
#[derive(Debug, Clone, Default)]
pub struct SalaryDataset {
    /// All records, in file order.
    pub records: Vec<SalaryRecord>,
    pub years: BTreeSet<i32>,
    pub seniorities: BTreeSet<String>,
    pub contracts: BTreeSet<String>,
    pub company_sizes: BTreeSet<String>,
}

impl SalaryDataset {
    /// Build the dimension indices from the loaded records.
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut years = BTreeSet::new();
        let mut seniorities = BTreeSet::new();
        let mut contracts = BTreeSet::new();
        let mut company_sizes = BTreeSet::new();

        for rec in &records {
            years.insert(rec.year);
            seniorities.insert(rec.seniority.clone());
            contracts.insert(rec.contract.clone());
            company_sizes.insert(rec.company_size.clone());
        }

        SalaryDataset {
            records,
            years,
            seniorities,
            contracts,
            company_sizes,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of distinct values observed for a dimension.
    pub fn distinct_count(&self, dimension: Dimension) -> usize {
        match dimension {
            Dimension::Year => self.years.len(),
            Dimension::Seniority => self.seniorities.len(),
            Dimension::Contract => self.contracts.len(),
            Dimension::CompanySize => self.company_sizes.len(),
        }
    }
}
