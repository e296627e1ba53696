//! Normalized export record

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// Destination table for loaded records
pub const EXPORTS_TABLE: &str = "exportaciones";

/// One customs declaration line after normalization.
///
/// Field names follow the Rust side; the destination columns keep the
/// lower-case Spanish names (`anio`, `mes`, `nombre_region`, `pais_destino`,
/// `codigo_hs`, `valor_fob`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExportRecord {
    /// Declaration year
    #[sqlx(rename = "anio")]
    pub year: i32,
    /// Declaration month, always 1-12
    #[sqlx(rename = "mes")]
    pub month: i32,
    /// Region display name, "Other" for unknown codes
    #[sqlx(rename = "nombre_region")]
    pub region_name: String,
    /// Destination country code as found in the source
    #[sqlx(rename = "pais_destino")]
    pub destination_country: String,
    /// HS product code, digits only
    #[sqlx(rename = "codigo_hs")]
    pub product_code: String,
    /// Free-on-board value in source currency units
    #[sqlx(rename = "valor_fob")]
    pub fob_value: BigDecimal,
}

impl ExportRecord {
    /// Column list in insert order
    pub const COLUMNS: [&'static str; 6] = [
        "anio",
        "mes",
        "nombre_region",
        "pais_destino",
        "codigo_hs",
        "valor_fob",
    ];
}
