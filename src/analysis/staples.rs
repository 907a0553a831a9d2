//! Pantry staples: the reference list and the user's ticked set.

use crate::config::StaplesConfig;
use crate::models::Category;
use tracing::warn;

/// Staples recognized out of the box.
pub const DEFAULT_STAPLES: &[&str] = &[
    // Oils & sauces
    "olive oil",
    "worcestershire sauce",
    "sriracha hot sauce",
    "harissa oil",
    // Seasonings & spices
    "salt and pepper",
    "black pepper",
    "salt",
    "mexican seasoning",
    "garlic granules",
    "paprika",
    "smoked paprika",
    "ground cumin",
    "cumin",
    "nutmeg",
    "mustard powder",
    "dried oregano",
    "oregano",
    "dried thyme",
    "thyme",
    "basil",
    "dried basil",
    "cayenne pepper",
    "five-spice powder",
    "chilli powder",
    "seasoning",
    "mixed herbs",
    // Herbs
    "fresh parsley",
    "fresh coriander",
    "fresh basil",
    // Baking & pantry
    "plain flour",
    "cornflour",
    "butter",
    "unsalted butter",
    "sugar",
    "caster sugar",
    "muscovado sugar",
    "parmesan",
    "cheddar cheese",
    "milk",
    "eggs",
    // Stock & tinned goods
    "beef stock cube",
    "stock cube",
    "chicken stock",
    "beef stock",
    "vegetable stock",
    "tomato purée",
    "chopped tomatoes",
    "tinned tomatoes",
    "passata",
    // Carbs & sides
    "spaghetti",
    "penne pasta",
    "tagliatelle",
    "short pasta",
    "macaroni",
    "risotto rice",
    "paella rice",
    "long grain rice",
    "jasmine rice",
    "white rice",
    "sticky rice",
    "microwave rice",
    "packet rice",
    "easy-cook rice",
    "chips",
    "mashed potatoes",
    "crusty bread",
    "brioche buns",
    "tortilla wraps",
    "flatbreads",
    "pitta breads",
    // Condiments & extras
    "guacamole",
    "sour cream",
    "tzatziki",
    "salad ingredients",
    "jacket potato toppings",
];

/// Substrings that fold an item into the seasoning staple.
pub const DEFAULT_SEASONING_TERMS: &[&str] = &["salt", "pepper"];

/// Staple name seasoning items fold into.
pub const DEFAULT_SEASONING_NAME: &str = "salt and pepper";

/// Categories whose items may fold into the seasoning staple.
pub const DEFAULT_SEASONING_CATEGORIES: &[Category] = &[Category::TinnedCupboard];

/// Lower-cases and trims an item name into its grouping form.
pub fn normalize_item(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The reference list of staples a user may tick.
#[derive(Debug, Clone, PartialEq)]
pub struct StapleCatalog {
    items: Vec<String>,
    seasoning_terms: Vec<String>,
    seasoning_name: String,
    seasoning_categories: Vec<Category>,
}

impl StapleCatalog {
    /// Creates a catalog. Names are normalized and deduplicated.
    pub fn new<I, T, S, U>(items: I, seasoning_terms: T, seasoning_name: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        T: IntoIterator<Item = U>,
        S: AsRef<str>,
        U: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for item in items {
            let item = normalize_item(item.as_ref());
            if !item.is_empty() && !normalized.contains(&item) {
                normalized.push(item);
            }
        }

        let seasoning_terms = seasoning_terms
            .into_iter()
            .map(|t| normalize_item(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();

        Self {
            items: normalized,
            seasoning_terms,
            seasoning_name: normalize_item(seasoning_name),
            seasoning_categories: DEFAULT_SEASONING_CATEGORIES.to_vec(),
        }
    }

    /// Restricts seasoning folding to items filed under these categories.
    pub fn with_seasoning_categories(mut self, categories: &[Category]) -> Self {
        self.seasoning_categories = categories.to_vec();
        self
    }

    /// Whether a normalized name is a recognized staple.
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|i| i == name)
    }

    /// Maps an item to the staple name it is offered under.
    ///
    /// A seasoning-category item mentioning a seasoning term ("sea salt",
    /// "cracked black pepper") becomes the seasoning staple. Everything else,
    /// "red pepper" in the vegetables included, is just normalized.
    pub fn canonical_name(&self, item: &str, category: Category) -> String {
        let normalized = normalize_item(item);
        if self.seasoning_categories.contains(&category)
            && self
                .seasoning_terms
                .iter()
                .any(|term| normalized.contains(term.as_str()))
        {
            self.seasoning_name.clone()
        } else {
            normalized
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }
}

impl Default for StapleCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_STAPLES.iter().copied(),
            DEFAULT_SEASONING_TERMS.iter().copied(),
            DEFAULT_SEASONING_NAME,
        )
    }
}

impl From<&StaplesConfig> for StapleCatalog {
    fn from(config: &StaplesConfig) -> Self {
        Self::new(&config.items, &config.seasoning_terms, &config.seasoning_name)
            .with_seasoning_categories(&config.seasoning_categories)
    }
}

/// Staples the user already has at home.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StapleSet {
    names: Vec<String>,
}

impl StapleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from user input, dropping names the catalog doesn't know.
    pub fn from_names<I, S>(names: I, catalog: &StapleCatalog) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            set.tick(name.as_ref(), catalog);
        }
        set
    }

    /// Marks a staple as owned. Returns false if the catalog rejected it.
    pub fn tick(&mut self, name: &str, catalog: &StapleCatalog) -> bool {
        let name = normalize_item(name);
        if !catalog.contains(&name) {
            warn!("Ignoring unknown staple: {}", name);
            return false;
        }
        if !self.names.contains(&name) {
            self.names.push(name);
        }
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        let name = normalize_item(name);
        self.names.iter().any(|n| *n == name)
    }

    /// Whether an item should be left off the shopping list.
    ///
    /// Matches the item itself or the staple it folds into.
    pub fn excludes(&self, item: &str, category: Category, catalog: &StapleCatalog) -> bool {
        self.contains(item) || self.contains(&catalog.canonical_name(item, category))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_catalog() -> StapleCatalog {
        StapleCatalog::new(
            ["Olive Oil", "salt and pepper", "olive oil"],
            ["salt", "pepper"],
            "salt and pepper",
        )
    }

    #[test]
    fn test_catalog_normalizes_and_dedupes() {
        let catalog = small_catalog();
        assert_eq!(catalog.items(), &["olive oil", "salt and pepper"]);
        assert!(catalog.contains("olive oil"));
        assert!(!catalog.contains("Olive Oil"));
    }

    #[test]
    fn test_canonical_name_collapses_seasoning() {
        let catalog = StapleCatalog::default();
        let cupboard = Category::TinnedCupboard;
        assert_eq!(catalog.canonical_name("Sea Salt", cupboard), "salt and pepper");
        assert_eq!(
            catalog.canonical_name("cracked black pepper", cupboard),
            "salt and pepper"
        );
        assert_eq!(catalog.canonical_name("Olive Oil", cupboard), "olive oil");
    }

    #[test]
    fn test_canonical_name_keeps_fresh_produce() {
        let catalog = StapleCatalog::default();
        assert_eq!(
            catalog.canonical_name("Red Pepper", Category::FruitAndVegetables),
            "red pepper"
        );
        assert_eq!(
            catalog.canonical_name("unsalted butter", Category::Dairy),
            "unsalted butter"
        );
    }

    #[test]
    fn test_seasoning_categories_are_configurable() {
        let catalog = StapleCatalog::default()
            .with_seasoning_categories(&[Category::TinnedCupboard, Category::FruitAndVegetables]);
        assert_eq!(
            catalog.canonical_name("red pepper", Category::FruitAndVegetables),
            "salt and pepper"
        );
    }

    #[test]
    fn test_empty_seasoning_terms_are_ignored() {
        let catalog = StapleCatalog::new(["butter"], [""], "salt and pepper");
        assert_eq!(catalog.canonical_name("butter", Category::TinnedCupboard), "butter");
    }

    #[test]
    fn test_staple_set_rejects_unknown_names() {
        let catalog = small_catalog();
        let mut set = StapleSet::new();

        assert!(set.tick("OLIVE OIL", &catalog));
        assert!(!set.tick("saffron", &catalog));
        assert!(set.tick("olive oil", &catalog));

        assert_eq!(set.names(), &["olive oil"]);
        assert!(set.contains("Olive oil"));
    }

    #[test]
    fn test_staple_set_excludes_collapsed_items() {
        let catalog = small_catalog();
        let set = StapleSet::from_names(["salt and pepper"], &catalog);

        let cupboard = Category::TinnedCupboard;
        assert!(set.excludes("sea salt", cupboard, &catalog));
        assert!(set.excludes("cracked black pepper", cupboard, &catalog));
        assert!(set.excludes("salt and pepper", Category::Dairy, &catalog));
        assert!(!set.excludes("olive oil", cupboard, &catalog));
        assert!(!set.excludes("red pepper", Category::FruitAndVegetables, &catalog));
        assert!(!set.excludes("unsalted butter", Category::Dairy, &catalog));
    }

    #[test]
    fn test_default_catalog_matches_builtin_list() {
        let catalog = StapleCatalog::default();
        assert_eq!(catalog.items().len(), DEFAULT_STAPLES.len());
        assert!(catalog.contains("tomato purée"));
    }
}
