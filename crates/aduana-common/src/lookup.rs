//! Static reference data
//!
//! Region codes, product (HS) codes, and month names. Every lookup has an
//! explicit fallback so a miss never fails a row.

use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::warn;

/// Label used for region codes absent from [`REGIONS`]
pub const UNKNOWN_REGION: &str = "Other";

/// Customs region codes and their display names
pub const REGIONS: &[(&str, &str)] = &[
    ("1", "Tarapacá"),
    ("2", "Antofagasta"),
    ("3", "Atacama"),
    ("4", "Coquimbo"),
    ("5", "Valparaíso"),
    ("6", "O'Higgins"),
    ("7", "Maule"),
    ("8", "Biobío"),
    ("9", "Araucanía"),
    ("10", "Los Lagos"),
    ("11", "Aysén"),
    ("12", "Magallanes"),
    ("13", "Metropolitana"),
    ("14", "Los Ríos"),
    ("15", "Arica y Parinacota"),
    ("16", "Ñuble"),
    ("20", "Indeterminado"),
];

/// HS product codes with curated display names.
///
/// Codes must be unique; `03044100` appeared twice in the legacy table and
/// only its first label is kept.
pub const PRODUCTS: &[(&str, &str)] = &[
    // Mining and chemicals
    ("26030000", "Minerales de Cobre y concentrados"),
    ("74031100", "Cátodos de Cobre refinado"),
    ("74020010", "Cobre sin refinar (Blister)"),
    ("74020012", "Cobre sin refinar (Ánodos)"),
    ("74020013", "Cobre sin refinar (Blister/Otros)"),
    ("26131010", "Concentrados de Molibdeno"),
    ("26011110", "Minerales de Hierro"),
    ("71081200", "Oro en bruto"),
    ("71081219", "Oro semilabrado (Dore)"),
    ("28369100", "Carbonato de Litio"),
    ("28369130", "Carbonato de Litio (Grado Batería)"),
    ("28369190", "Carbonato de Litio (Otros)"),
    ("28012000", "Yodo"),
    ("28342100", "Nitratos de Potasio"),
    // Salmon and fisheries
    ("03021400", "Salmón del Atlántico (Fresco)"),
    ("03021410", "Salmón del Atlántico (Fresco/Entero)"),
    ("03031300", "Salmón del Atlántico (Congelado)"),
    ("03031310", "Salmón del Atlántico (Congelado/Entero)"),
    ("03031220", "Salmón del Pacífico (Congelado)"),
    ("03044100", "Filetes de Salmón (Fresco)"),
    ("03044120", "Filetes de Salmón del Atlántico (Fresco)"),
    ("03048100", "Filetes de Salmón (Congelado)"),
    ("03048110", "Filetes de Salmón del Pacífico (Congelado)"),
    ("03048120", "Filetes de Salmón del Atlántico (Congelado)"),
    ("03048200", "Filetes de Trucha (Congelado)"),
    ("03049946", "Carne de Salmón (Picada/Recortes)"),
    ("03035511", "Jurel (Congelado)"),
    ("16055300", "Mejillones (Choritos) preparados"),
    ("23012010", "Harina de Pescado"),
    // Fruit and forestry
    ("47032910", "Celulosa (Pino/Eucalipto)"),
    ("44071110", "Madera de Pino Insigne aserrada"),
    ("47079000", "Papel y Cartón (Reciclaje)"),
    ("08092900", "Cerezas Frescas"),
    ("08092919", "Cerezas Frescas (Otras)"),
    ("08061010", "Uvas Frescas"),
    // Fuels and other
    ("27101991", "Aceites combustibles"),
    // Customs special code, usually services or adjustments
    ("00259900", "Servicios / Ajustes varios"),
];

/// Spanish month names, index 0 is January
pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Map a region code to its display name, [`UNKNOWN_REGION`] on a miss
pub fn region_name(code: &str) -> &'static str {
    let code = code.trim();
    REGIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_REGION)
}

static BUILTIN_CATALOG: LazyLock<ProductCatalog> =
    LazyLock::new(|| ProductCatalog::from_entries(PRODUCTS.iter().copied()));

/// Display name for a product code from the built-in catalog
pub fn product_name(code: &str) -> String {
    ProductCatalog::shared().name(code)
}

/// Spanish month name for a month number, `None` outside 1-12
pub fn month_name(month: i32) -> Option<&'static str> {
    if (1..=12).contains(&month) {
        Some(MONTH_NAMES[(month - 1) as usize])
    } else {
        None
    }
}

/// Product code to display name mapping with a "Product <code>" fallback
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    names: HashMap<String, String>,
    duplicates: Vec<String>,
}

impl ProductCatalog {
    /// Build a catalog from `(code, name)` pairs.
    ///
    /// The first definition of a code wins. Later definitions are recorded in
    /// [`ProductCatalog::duplicates`] and reported with a warning.
    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut catalog = Self::default();

        for (code, name) in entries {
            if let Some(existing) = catalog.names.get(code) {
                warn!(
                    code = %code,
                    kept = %existing,
                    ignored = %name,
                    "Duplicate product code in catalog"
                );
                catalog.duplicates.push(code.to_string());
                continue;
            }
            catalog.names.insert(code.to_string(), name.to_string());
        }

        catalog
    }

    /// Catalog built from [`PRODUCTS`]
    pub fn builtin() -> Self {
        Self::shared().clone()
    }

    /// The process-wide catalog built from [`PRODUCTS`], constructed once
    pub fn shared() -> &'static ProductCatalog {
        &BUILTIN_CATALOG
    }

    /// Display name for a code, falling back to `Product <code>`
    pub fn name(&self, code: &str) -> String {
        match self.names.get(code) {
            Some(name) => name.clone(),
            None => format!("Product {}", code),
        }
    }

    /// Whether the catalog has a curated name for this code
    pub fn contains(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }

    /// Codes that were defined more than once in the input entries
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_regions() {
        assert_eq!(region_name("5"), "Valparaíso");
        assert_eq!(region_name("13"), "Metropolitana");
        assert_eq!(region_name("20"), "Indeterminado");
        assert_eq!(region_name(" 16 "), "Ñuble");
    }

    #[test]
    fn test_unknown_region_falls_back() {
        assert_eq!(region_name("17"), UNKNOWN_REGION);
        assert_eq!(region_name(""), UNKNOWN_REGION);
        assert_eq!(region_name("05"), UNKNOWN_REGION);
    }

    #[test]
    fn test_builtin_products_have_unique_codes() {
        let mut seen = HashSet::new();
        for (code, _) in PRODUCTS {
            assert!(seen.insert(*code), "duplicate product code {}", code);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
        assert!(ProductCatalog::builtin().duplicates().is_empty());
    }

    #[test]
    fn test_product_fallback() {
        let catalog = ProductCatalog::builtin();
        assert_eq!(catalog.name("74031100"), "Cátodos de Cobre refinado");
        assert_eq!(catalog.name("99999999"), "Product 99999999");
        assert!(!catalog.contains("99999999"));
    }

    #[test]
    fn test_builtin_catalog_is_built_once() {
        assert!(std::ptr::eq(ProductCatalog::shared(), ProductCatalog::shared()));
        assert_eq!(product_name("74031100"), "Cátodos de Cobre refinado");
        assert_eq!(product_name("12345678"), "Product 12345678");
        assert_eq!(ProductCatalog::builtin().len(), ProductCatalog::shared().len());
    }

    #[test]
    fn test_duplicate_entries_keep_first() {
        let catalog = ProductCatalog::from_entries(vec![
            ("03044100", "Filetes de Salmón (Fresco)"),
            ("03044100", "Filetes de Salmón"),
            ("08061010", "Uvas Frescas"),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.name("03044100"), "Filetes de Salmón (Fresco)");
        assert_eq!(catalog.duplicates(), &["03044100".to_string()]);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), Some("Enero"));
        assert_eq!(month_name(12), Some("Diciembre"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    proptest! {
        #[test]
        fn prop_table_codes_map_to_table_names(idx in 0..REGIONS.len()) {
            let (code, name) = REGIONS[idx];
            prop_assert_eq!(region_name(code), name);
        }

        #[test]
        fn prop_other_codes_map_to_fallback(code in "[0-9]{1,3}") {
            prop_assume!(!REGIONS.iter().any(|(c, _)| *c == code));
            prop_assert_eq!(region_name(&code), UNKNOWN_REGION);
        }
    }
}
