//! Static compound corpora used across harnesses.
//!
//! `CATALOG` mirrors a handful of real MetaNetX chemicals so that exact,
//! partial and expression searches all have something to find.

use super::builders::RecordBuilder;
use mnxq_core::{CatalogProvider, MatchRecord};
use std::path::{Path, PathBuf};

/// Compound names as they appear in the catalog, in catalog order.
pub const CATALOG_NAMES: &[&str] = &[
    "glucose",
    "D-glucose",
    "glucose 6-phosphate",
    "fructose",
    "H2O",
    "water",
    "hydrogen peroxide",
    "carbon dioxide",
    "CO2",
    "H2CO3",
    "O2",
    "ethanol",
    "NaCl",
];

/// The catalog records with MetaNetX-style attributes.
pub fn catalog_records() -> Vec<MatchRecord> {
    vec![
        RecordBuilder::new("glucose").mnx_id("MNXM1364061").formula("C6H12O6").charge(0).build(),
        RecordBuilder::new("D-glucose").mnx_id("MNXM1137670").formula("C6H12O6").charge(0).build(),
        RecordBuilder::new("glucose 6-phosphate").mnx_id("MNXM1364021").formula("C6H11O9P").charge(-2).build(),
        RecordBuilder::new("fructose").mnx_id("MNXM1102128").formula("C6H12O6").build(),
        RecordBuilder::new("H2O").mnx_id("WATER").formula("H2O").charge(0).reference("chebi:15377").build(),
        RecordBuilder::new("water").mnx_id("WATER").formula("H2O").charge(0).build(),
        RecordBuilder::new("hydrogen peroxide").mnx_id("MNXM22").formula("H2O2").build(),
        RecordBuilder::new("carbon dioxide").mnx_id("MNXM13").formula("CO2").build(),
        RecordBuilder::new("CO2").mnx_id("MNXM13").formula("CO2").build(),
        RecordBuilder::new("H2CO3").mnx_id("MNXM1107708").formula("CH2O3").build(),
        RecordBuilder::new("O2").mnx_id("MNXM4").formula("O2").build(),
        RecordBuilder::new("ethanol").mnx_id("MNXM303").formula("C2H6O").build(),
        RecordBuilder::new("NaCl").mnx_id("MNXM1108411").formula("ClNa").build(),
    ]
}

pub fn catalog() -> CatalogProvider {
    CatalogProvider::new(catalog_records())
}

/// Write the catalog as JSON into `dir` and return the file path.
pub fn write_catalog(dir: &Path) -> PathBuf {
    let path = dir.join("catalog.json");
    let json = serde_json::to_string_pretty(&catalog_records()).unwrap();
    std::fs::write(&path, json).unwrap();
    path
}

/// `(input, extracted compounds)` pairs covering each separator family.
pub const EXPRESSIONS: &[(&str, &[&str])] = &[
    ("2 H2O + CO2 -> H2CO3", &["H2O", "CO2", "H2CO3"]),
    ("glucose + O2 → CO2 + H2O", &["glucose", "O2", "CO2", "H2O"]),
    ("ATP ⇌ ADP + Pi", &["ATP", "ADP", "Pi"]),
    ("NaCl(aq)", &["NaCl"]),
    ("ethanol, water; glucose", &["ethanol", "water", "glucose"]),
    ("[Fe] / Fe2+ \\ Fe3+", &["Fe", "Fe2", "Fe3"]),
    ("CO2 + H2O ⟶ H2CO3 + H2O", &["CO2", "H2O", "H2CO3"]),
    ("3 O2 + 2 C2H5OH ⇒ 4 CO2 + 6 H2O", &["O2", "C2H5OH", "CO2", "H2O"]),
];
