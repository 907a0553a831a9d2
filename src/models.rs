//! Data models for the meal planner.
//!
//! This module contains the core data structures used throughout
//! the application: recipes as loaded from the store, the user's
//! selection, and the aggregated shopping list produced from them.

use crate::analysis::round_hundredths;
use crate::error::PlannerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grocery-aisle category of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Fruit and Vegetables")]
    FruitAndVegetables,
    Meat,
    Dairy,
    #[serde(rename = "Tinned/Cupboard")]
    TinnedCupboard,
    Bakery,
    Frozen,
}

impl Category {
    /// All categories in shopping-list order.
    pub const ALL: [Category; 6] = [
        Category::FruitAndVegetables,
        Category::Meat,
        Category::Dairy,
        Category::TinnedCupboard,
        Category::Bakery,
        Category::Frozen,
    ];

    /// Returns the label used in recipe files and rendered lists.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FruitAndVegetables => "Fruit and Vegetables",
            Category::Meat => "Meat",
            Category::Dairy => "Dairy",
            Category::TinnedCupboard => "Tinned/Cupboard",
            Category::Bakery => "Bakery",
            Category::Frozen => "Frozen",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// How amounts are combined when several lines share a grouping key.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum SumMode {
    /// Sum every amount that is present, whichever line came first.
    #[default]
    Available,
    /// Compatibility mode: a group seeded by a line without an amount
    /// never gets one, even when later lines carry amounts.
    FirstSeen,
}

impl fmt::Display for SumMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SumMode::Available => write!(f, "available"),
            SumMode::FirstSeen => write!(f, "first-seen"),
        }
    }
}

/// A single ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Item name as written by the recipe author. Absent in malformed data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    /// Quantity for the recipe's default portions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// Unit of the amount (g, ml, tbsp...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Aisle the item is bought from.
    pub category: Category,
    /// Preparation note, e.g. "finely chopped".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep: Option<String>,
}

impl Ingredient {
    /// Returns the line as shown in a recipe card: `400 g spaghetti (dried)`.
    pub fn label(&self) -> String {
        format_line(
            self.amount,
            self.unit.as_deref(),
            self.item.as_deref().unwrap_or(""),
            self.prep.as_deref(),
        )
    }
}

/// A recipe from the recipe store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe name.
    pub name: String,
    /// Number of portions the ingredient amounts are written for.
    pub portions: u32,
    /// Ingredients in the order the author listed them.
    pub ingredients: Vec<Ingredient>,
    /// Free-form cooking method.
    #[serde(default)]
    pub method: String,
}

/// The full recipe document: `{ "recipes": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeBook {
    pub recipes: Vec<Recipe>,
}

impl RecipeBook {
    /// Finds a recipe by exact name. The first match wins on duplicates.
    pub fn find(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.name == name)
    }

    /// Like [`RecipeBook::find`], but a missing recipe is an error.
    pub fn get(&self, name: &str) -> Result<&Recipe, PlannerError> {
        self.find(name)
            .ok_or_else(|| PlannerError::RecipeNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

/// One recipe picked by the user, with an optional portions override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipePick {
    pub name: String,
    /// Desired portions. `None` means the recipe's default.
    pub portions: Option<f64>,
}

impl FromStr for RecipePick {
    type Err = String;

    /// Parses `NAME` or `NAME=PORTIONS`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, portions) = match s.rsplit_once('=') {
            Some((name, value)) => match value.trim().parse::<f64>() {
                Ok(portions) => (name, Some(portions)),
                Err(_) => (s, None),
            },
            None => (s, None),
        };

        let name = name.trim();
        if name.is_empty() {
            return Err("Recipe name cannot be empty".to_string());
        }

        Ok(Self {
            name: name.to_string(),
            portions,
        })
    }
}

/// Recipes chosen by the user, in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Selection {
    picks: Vec<RecipePick>,
}

/// A pick matched against the recipe store.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedPick<'a> {
    pub recipe: &'a Recipe,
    pub portions: f64,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recipe. Picking the same recipe again keeps its position
    /// and replaces the portions.
    pub fn add(&mut self, name: impl Into<String>, portions: Option<f64>) {
        let name = name.into();
        match self.picks.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.portions = portions,
            None => self.picks.push(RecipePick { name, portions }),
        }
    }

    /// Builder-style variant of [`Selection::add`].
    #[allow(dead_code)] // Builder utility
    pub fn with(mut self, name: impl Into<String>, portions: Option<f64>) -> Self {
        self.add(name, portions);
        self
    }

    #[allow(dead_code)] // Accessor utility
    pub fn picks(&self) -> &[RecipePick] {
        &self.picks
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    /// Looks up every pick in the recipe book, filling in default portions.
    pub fn resolve<'a>(&self, book: &'a RecipeBook) -> Result<Vec<ResolvedPick<'a>>, PlannerError> {
        self.picks
            .iter()
            .map(|pick| {
                let recipe = book.get(&pick.name)?;
                Ok(ResolvedPick {
                    recipe,
                    portions: pick.portions.unwrap_or(f64::from(recipe.portions)),
                })
            })
            .collect()
    }
}

impl FromIterator<RecipePick> for Selection {
    fn from_iter<I: IntoIterator<Item = RecipePick>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for pick in iter {
            selection.add(pick.name, pick.portions);
        }
        selection
    }
}

/// An ingredient after portion scaling.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledIngredient {
    /// Lower-cased item name used for grouping. `None` when the source had no item.
    pub key: Option<String>,
    /// Item name in its original casing.
    pub display_name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub category: Category,
    pub prep: Option<String>,
}

/// Grouping identity of a shopping-list line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LineKey {
    pub item: String,
    pub unit: Option<String>,
    pub category: Category,
}

/// A merged line of the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedLine {
    #[serde(skip_serializing)]
    pub key: LineKey,
    /// Item name as first seen.
    #[serde(rename = "item")]
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub category: Category,
    /// Summed amount. `None` when no contributing line had one.
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep: Option<String>,
}

impl AggregatedLine {
    /// Returns the rendered line, e.g. `500 g spaghetti (dried)`.
    pub fn label(&self, include_prep: bool) -> String {
        let prep = if include_prep { self.prep.as_deref() } else { None };
        format_line(self.amount, self.unit.as_deref(), &self.display_name, prep)
    }
}

/// All lines of one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingSection {
    pub category: Category,
    pub lines: Vec<AggregatedLine>,
}

/// The grouped shopping list. Sections are never empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShoppingList {
    pub sections: Vec<ShoppingSection>,
}

impl ShoppingList {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of lines across all sections.
    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.lines.len()).sum()
    }

    /// Iterates over every line in display order.
    pub fn lines(&self) -> impl Iterator<Item = &AggregatedLine> {
        self.sections.iter().flat_map(|s| s.lines.iter())
    }

    /// Returns the section for a category, if it has any lines.
    #[allow(dead_code)] // Lookup utility
    pub fn section(&self, category: Category) -> Option<&ShoppingSection> {
        self.sections.iter().find(|s| s.category == category)
    }
}

/// A selected recipe as recorded in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedRecipe {
    pub name: String,
    pub portions: f64,
    pub default_portions: u32,
}

/// Metadata about a generated shopping list.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    /// Path or URL the recipes were loaded from.
    pub recipe_source: String,
    /// When the list was generated.
    pub generated_at: DateTime<Utc>,
    /// Recipes that went into the list.
    pub selection: Vec<SelectedRecipe>,
    /// Staples the user already has.
    pub staples_excluded: Vec<String>,
    pub sum_mode: SumMode,
    /// Number of lines on the list.
    pub total_items: usize,
}

/// The complete shopping list report.
#[derive(Debug, Clone, Serialize)]
pub struct ShoppingReport {
    pub metadata: ReportMetadata,
    pub list: ShoppingList,
}

/// Formats a quantity the way lists show it: rounded to 2 decimals,
/// without trailing zeros.
pub fn format_amount(amount: f64) -> String {
    format!("{}", round_hundredths(amount))
}

fn format_line(amount: Option<f64>, unit: Option<&str>, name: &str, prep: Option<&str>) -> String {
    let mut line = String::new();

    if let Some(amount) = amount.filter(|a| *a != 0.0) {
        line.push_str(&format_amount(amount));
        line.push(' ');
        if let Some(unit) = unit.filter(|u| !u.trim().is_empty()) {
            line.push_str(unit);
            line.push(' ');
        }
    }

    line.push_str(name);

    if let Some(prep) = prep.filter(|p| !p.trim().is_empty()) {
        line.push_str(&format!(" ({})", prep));
    }

    line
}
