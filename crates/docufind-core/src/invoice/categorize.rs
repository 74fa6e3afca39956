//! Keyword-driven spend categorization.

use crate::models::Category;

/// One category with its trigger keywords, all lowercase.
type CategoryRow = (Category, &'static [&'static str]);

/// Default category table. Row order is match priority.
const DEFAULT_TABLE: &[CategoryRow] = &[
    (
        Category::Utilities,
        &[
            "electric",
            "gas natural",
            "water",
            "internet",
            "phone",
            "mobile",
            "el\u{e9}ctric",
            "electricidad",
            "energ\u{ed}a",
            "agua",
            "acueducto",
            "tel\u{e9}fono",
            "m\u{f3}vil",
            "celular",
        ],
    ),
    (
        Category::OfficeSupplies,
        &[
            "staples",
            "office",
            "depot",
            "supplies",
            "paper",
            "printer",
            "suministros",
            "oficina",
            "papel",
            "impresora",
            "\u{fa}tiles",
        ],
    ),
    (
        Category::Software,
        &[
            "microsoft",
            "adobe",
            "google",
            "aws",
            "azure",
            "license",
            "software",
            "subscription",
            "saas",
            "licencia",
            "suscripci\u{f3}n",
        ],
    ),
    (
        Category::Services,
        &[
            "consulting",
            "legal",
            "accounting",
            "marketing",
            "design",
            "development",
            "consultor\u{ed}a",
            "contabilidad",
            "mercadeo",
            "dise\u{f1}o",
            "desarrollo",
        ],
    ),
    (
        Category::Hosting,
        &[
            "hosting",
            "domain",
            "server",
            "cloud",
            "vps",
            "dedicated",
            "dominio",
            "servidor",
            "nube",
            "alojamiento",
        ],
    ),
    (
        Category::Transportation,
        &[
            "uber",
            "taxi",
            "transport",
            "fuel",
            "parking",
            "transporte",
            "combustible",
            "gasolina",
            "estacionamiento",
            "peaje",
        ],
    ),
    (
        Category::Telecommunications,
        &[
            "verizon",
            "sprint",
            "t-mobile",
            "tmobile",
            "claro",
            "movistar",
            "tigo",
            "telef\u{f3}nica",
            "telecom",
        ],
    ),
    (
        Category::Financial,
        &["bank", "banco", "credit", "paypal", "stripe", "seguro", "insurance"],
    ),
];

/// Assigns a spend category by keyword lookup.
///
/// A single ordered pass: the first category with any keyword present in
/// the vendor, concept or full text wins.
#[derive(Debug, Clone)]
pub struct Categorizer {
    table: Vec<CategoryRow>,
}

impl Categorizer {
    pub fn new() -> Self {
        Self {
            table: DEFAULT_TABLE.to_vec(),
        }
    }

    /// Use a custom category table instead of the default one.
    pub fn with_table(table: Vec<CategoryRow>) -> Self {
        Self { table }
    }

    pub fn categorize(&self, vendor: &str, concept: &str, full_text: &str) -> Category {
        let haystack = format!("{} {} {}", vendor, concept, full_text).to_lowercase();

        for (category, keywords) in &self.table {
            if keywords.iter().any(|kw| haystack.contains(kw)) {
                return *category;
            }
        }

        Category::Miscellaneous
    }
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_utilities_from_vendor() {
        let categorizer = Categorizer::new();
        assert_eq!(
            categorizer.categorize("CFE electricidad", "", ""),
            Category::Utilities
        );
    }

    #[test]
    fn test_category_from_concept_and_text() {
        let categorizer = Categorizer::new();
        assert_eq!(
            categorizer.categorize("", "Monthly hosting service", ""),
            Category::Hosting
        );
        assert_eq!(
            categorizer.categorize("", "", "su factura de taxi adjunta"),
            Category::Transportation
        );
    }

    #[test]
    fn test_row_order_breaks_ties() {
        let categorizer = Categorizer::new();
        // "office" appears before the software row ever gets a look
        assert_eq!(
            categorizer.categorize("Office Depot", "software subscription", ""),
            Category::OfficeSupplies
        );
    }

    #[test]
    fn test_default_is_miscellaneous() {
        let categorizer = Categorizer::new();
        assert_eq!(
            categorizer.categorize("Acme", "widgets", "nothing matches"),
            Category::Miscellaneous
        );
        assert_eq!(categorizer.categorize("", "", ""), Category::Miscellaneous);
    }

    #[test]
    fn test_custom_table() {
        let categorizer =
            Categorizer::with_table(vec![(Category::Financial, &["fiducia"] as &[&str])]);
        assert_eq!(
            categorizer.categorize("Fiducia Central", "", ""),
            Category::Financial
        );
        assert_eq!(
            categorizer.categorize("CFE electricidad", "", ""),
            Category::Miscellaneous
        );
    }
}
