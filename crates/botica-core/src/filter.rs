//! # Filter State Engine
//!
//! Keeps the three discriminator dimensions of the product detail overlay
//! consistent: which option values exist, which are currently selectable,
//! which variant a full selection resolves to, and how to recover when a
//! click produces a combination no variant satisfies.
//!
//! ## Dimension Priority
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  presentation  →  dosage  →  quantity     (fixed priority)              │
//! │                                                                         │
//! │  Availability of a dimension is judged against the dimensions of       │
//! │  HIGHER priority only:                                                  │
//! │    - presentation options: always available if any variant has them    │
//! │    - dosage options: constrained by the selected presentation          │
//! │    - quantity options: constrained by presentation and dosage          │
//! │                                                                         │
//! │  A click can therefore legally produce a selection with no matching    │
//! │  variant (e.g. switching presentation while a dosage that only exists  │
//! │  under the old presentation stays selected). The fallback policy in    │
//! │  [`VariantPicker::select`] repairs that state instead of surfacing an  │
//! │  error: hold the just-changed dimension, drop the rest, land on the    │
//! │  first variant that carries the held value, and resynchronize every    │
//! │  filter to that variant's actual attributes.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The dimension set is closed and known, so it is a fixed enum with typed
//! accessors rather than string-keyed attribute lookup.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{Product, Variant};

// =============================================================================
// Dimension
// =============================================================================

/// A discriminator axis used to disambiguate variants within a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Presentation,
    Dosage,
    Quantity,
}

impl Dimension {
    /// All dimensions in priority order.
    pub const ALL: [Dimension; 3] = [Dimension::Presentation, Dimension::Dosage, Dimension::Quantity];

    /// The filter group label shown in the overlay.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Presentation => "Presentación",
            Dimension::Dosage => "Dosificación",
            Dimension::Quantity => "Cantidad",
        }
    }

    /// Unit suffix appended to option labels in the UI ("30" renders as
    /// "30 unidades"). Only the quantity dimension carries one.
    pub fn unit_suffix(&self) -> Option<&'static str> {
        match self {
            Dimension::Quantity => Some(" unidades"),
            _ => None,
        }
    }

    /// Normalizes an incoming option value: the UI may hand back the
    /// suffixed label, which must compare equal to the stored value.
    /// Normalization happens once here; everything downstream uses strict
    /// string equality.
    pub fn normalize<'a>(&self, value: &'a str) -> &'a str {
        match self.unit_suffix() {
            Some(suffix) => value.strip_suffix(suffix).unwrap_or(value),
            None => value,
        }
    }

    /// Dimensions of strictly higher priority than this one.
    fn higher_priority(&self) -> &'static [Dimension] {
        match self {
            Dimension::Presentation => &[],
            Dimension::Dosage => &[Dimension::Presentation],
            Dimension::Quantity => &[Dimension::Presentation, Dimension::Dosage],
        }
    }
}

impl Variant {
    /// Typed accessor for a variant's value on a dimension. `None` means
    /// the dimension is absent for this variant (cleaned dosage).
    pub fn dimension_value(&self, dim: Dimension) -> Option<&str> {
        match dim {
            Dimension::Presentation => Some(&self.presentation),
            Dimension::Dosage => self.dosage.as_deref(),
            Dimension::Quantity => Some(&self.quantity_label),
        }
    }
}

// =============================================================================
// Filter Selection
// =============================================================================

/// A partial mapping from dimension to chosen value.
///
/// Reconstructed from picker state each time a filter changes; never
/// persisted. Values are stored normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    pub presentation: Option<String>,
    pub dosage: Option<String>,
    pub quantity: Option<String>,
}

impl FilterSelection {
    /// The chosen value for a dimension, if any.
    pub fn get(&self, dim: Dimension) -> Option<&str> {
        match dim {
            Dimension::Presentation => self.presentation.as_deref(),
            Dimension::Dosage => self.dosage.as_deref(),
            Dimension::Quantity => self.quantity.as_deref(),
        }
    }

    /// Sets a dimension to a value, normalizing the unit suffix.
    pub fn set(&mut self, dim: Dimension, value: &str) {
        let value = Some(dim.normalize(value).to_string());
        match dim {
            Dimension::Presentation => self.presentation = value,
            Dimension::Dosage => self.dosage = value,
            Dimension::Quantity => self.quantity = value,
        }
    }

    /// Clears a dimension.
    pub fn clear(&mut self, dim: Dimension) {
        match dim {
            Dimension::Presentation => self.presentation = None,
            Dimension::Dosage => self.dosage = None,
            Dimension::Quantity => self.quantity = None,
        }
    }

    /// Builds a selection from a variant's attributes, restricted to the
    /// given dimensions. A variant without a dosage leaves that dimension
    /// unset.
    pub fn from_variant(variant: &Variant, dims: &[Dimension]) -> Self {
        let mut selection = FilterSelection::default();
        for &dim in dims {
            if let Some(value) = variant.dimension_value(dim) {
                selection.set(dim, value);
            }
        }
        selection
    }

    /// True if a variant agrees with every dimension set in this selection.
    fn is_match(&self, variant: &Variant) -> bool {
        Dimension::ALL.iter().all(|&dim| match self.get(dim) {
            Some(chosen) => variant.dimension_value(dim) == Some(chosen),
            None => true,
        })
    }
}

// =============================================================================
// Engine Queries
// =============================================================================

/// Distinct values for a dimension across all of a product's variants,
/// in first-seen order. Variants where the dimension is absent contribute
/// nothing.
pub fn distinct_values(product: &Product, dim: Dimension) -> Vec<&str> {
    let mut values: Vec<&str> = Vec::new();
    for variant in &product.variants {
        if let Some(value) = variant.dimension_value(dim) {
            if !values.contains(&value) {
                values.push(value);
            }
        }
    }
    values
}

/// Values for `dim` that appear in at least one variant consistent with the
/// higher-priority dimensions fixed in `selection`. The dimension's own
/// current value never constrains its own availability.
pub fn available_values<'a>(
    product: &'a Product,
    dim: Dimension,
    selection: &FilterSelection,
) -> Vec<&'a str> {
    let constraints: Vec<(Dimension, &str)> = dim
        .higher_priority()
        .iter()
        .filter_map(|&higher| selection.get(higher).map(|v| (higher, v)))
        .collect();

    let mut values: Vec<&str> = Vec::new();
    for variant in &product.variants {
        let consistent = constraints
            .iter()
            .all(|&(c_dim, c_value)| variant.dimension_value(c_dim) == Some(c_value));
        if !consistent {
            continue;
        }
        if let Some(value) = variant.dimension_value(dim) {
            if !values.contains(&value) {
                values.push(value);
            }
        }
    }
    values
}

/// True iff `value` cannot currently be selected for `dim`. Disabled options
/// stay visible in the overlay but are not clickable.
pub fn is_disabled(
    product: &Product,
    dim: Dimension,
    value: &str,
    selection: &FilterSelection,
) -> bool {
    let value = dim.normalize(value);
    !available_values(product, dim, selection).contains(&value)
}

/// The first variant satisfying every dimension set in `selection`, or
/// `None` when the combination has no match. This function never invents a
/// partial match; recovery is the picker's job.
pub fn match_variant<'a>(product: &'a Product, selection: &FilterSelection) -> Option<&'a Variant> {
    product.variants.iter().find(|v| selection.is_match(v))
}

// =============================================================================
// Variant Picker (overlay controller)
// =============================================================================

/// One option button in a filter group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FilterOption {
    /// Normalized option value.
    pub value: String,
    /// Display label (value plus unit suffix where the dimension has one).
    pub label: String,
    /// Whether this option is the active selection.
    pub active: bool,
    /// Whether this option is currently unselectable.
    pub disabled: bool,
}

/// Controller for the product detail overlay's variant filters.
///
/// ## Lifecycle
/// ```text
/// open(product) ──► selection = first variant's attributes
///       │
///       ▼
/// select(dim, value) ──► match? ──yes──► that variant
///       │                  │
///       │                  no
///       │                  ▼
///       │           fallback: hold `dim`, drop the rest,
///       │           first variant carrying the held value,
///       │           resync selection to its attributes
///       ▼
/// resolved_variant() drives image carousel, specs and pricing table
/// ```
#[derive(Debug, Clone)]
pub struct VariantPicker<'a> {
    product: &'a Product,
    visible: Vec<Dimension>,
    selection: FilterSelection,
}

impl<'a> VariantPicker<'a> {
    /// Opens the picker on a product: every rendered dimension defaults to
    /// the first variant's attribute value.
    ///
    /// A dimension with fewer than two distinct values across the variants
    /// is not rendered at all (there is no ambiguity to resolve).
    pub fn open(product: &'a Product) -> Self {
        let visible: Vec<Dimension> = Dimension::ALL
            .into_iter()
            .filter(|&dim| distinct_values(product, dim).len() > 1)
            .collect();

        let selection = match product.variants.first() {
            Some(first) => FilterSelection::from_variant(first, &visible),
            None => FilterSelection::default(),
        };

        VariantPicker {
            product,
            visible,
            selection,
        }
    }

    /// The product this picker operates on.
    pub fn product(&self) -> &'a Product {
        self.product
    }

    /// Dimensions rendered as filter groups, in priority order.
    pub fn visible_dimensions(&self) -> &[Dimension] {
        &self.visible
    }

    /// The current (always consistent) selection.
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// The variant the current selection resolves to.
    ///
    /// The picker only ever leaves `select` in a matching state, so this
    /// falls back to the first variant purely for the degenerate case of a
    /// selection never having been made.
    pub fn resolved_variant(&self) -> Option<&'a Variant> {
        match_variant(self.product, &self.selection).or_else(|| self.product.variants.first())
    }

    /// Option buttons for one filter group, with active/disabled state.
    pub fn options(&self, dim: Dimension) -> Vec<FilterOption> {
        let available = available_values(self.product, dim, &self.selection);
        distinct_values(self.product, dim)
            .into_iter()
            .map(|value| FilterOption {
                value: value.to_string(),
                label: match dim.unit_suffix() {
                    Some(suffix) => format!("{value}{suffix}"),
                    None => value.to_string(),
                },
                active: self.selection.get(dim) == Some(value),
                disabled: !available.contains(&value),
            })
            .collect()
    }

    /// Applies a filter click and returns the variant the overlay should now
    /// display.
    ///
    /// Returns `None` without changing state when the value is disabled or
    /// unknown (the UI renders such buttons non-clickable, so this is the
    /// guard for programmatic callers).
    ///
    /// ## Fallback policy
    /// When the literal combination after the click matches no variant, the
    /// just-changed dimension is held fixed, the other dimensions dropped,
    /// and the first variant carrying the held value wins; the whole
    /// selection is then resynchronized to that variant's attributes. A
    /// dead-end state is never observable from outside.
    pub fn select(&mut self, dim: Dimension, value: &str) -> Option<&'a Variant> {
        let value = dim.normalize(value);
        if !self.visible.contains(&dim) || is_disabled(self.product, dim, value, &self.selection) {
            return None;
        }

        self.selection.set(dim, value);
        if let Some(variant) = match_variant(self.product, &self.selection) {
            return Some(variant);
        }

        // Fallback: hold the changed dimension, drop the rest.
        let variant = self
            .product
            .variants
            .iter()
            .find(|v| v.dimension_value(dim) == Some(value))?;
        self.selection = FilterSelection::from_variant(variant, &self.visible);
        Some(variant)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::catalog_fixture;

    fn fixture_product() -> crate::catalog::Product {
        // Product 1: Caja/5mg/30, Caja/10mg/30, Blister/5mg/10
        catalog_fixture().product(1).unwrap().clone()
    }

    #[test]
    fn test_normalize_strips_unit_suffix() {
        assert_eq!(Dimension::Quantity.normalize("30 unidades"), "30");
        assert_eq!(Dimension::Quantity.normalize("30"), "30");
        // Other dimensions pass values through untouched
        assert_eq!(Dimension::Presentation.normalize("Caja"), "Caja");
    }

    #[test]
    fn test_distinct_values_first_seen_order() {
        let product = fixture_product();
        assert_eq!(
            distinct_values(&product, Dimension::Presentation),
            vec!["Caja", "Blister"]
        );
        assert_eq!(distinct_values(&product, Dimension::Dosage), vec!["5mg", "10mg"]);
        assert_eq!(distinct_values(&product, Dimension::Quantity), vec!["30", "10"]);
    }

    #[test]
    fn test_absent_dosage_contributes_no_value() {
        let catalog = catalog_fixture();
        // Product 2's only variant has dosage None
        let product = catalog.product(2).unwrap();
        assert!(distinct_values(product, Dimension::Dosage).is_empty());
    }

    #[test]
    fn test_availability_constrained_by_higher_priority_only() {
        let product = fixture_product();
        let mut selection = FilterSelection::default();
        selection.set(Dimension::Presentation, "Blister");

        // Dosage narrows to what Blister offers
        assert_eq!(
            available_values(&product, Dimension::Dosage, &selection),
            vec!["5mg"]
        );
        assert!(is_disabled(&product, Dimension::Dosage, "10mg", &selection));

        // Presentation availability ignores the lower-priority dosage:
        // with 10mg selected, Blister stays clickable (the fallback will
        // repair the dosage afterwards)
        let mut selection = FilterSelection::default();
        selection.set(Dimension::Dosage, "10mg");
        assert!(!is_disabled(&product, Dimension::Presentation, "Blister", &selection));
    }

    #[test]
    fn test_quantity_availability_under_both_higher_dims() {
        let product = fixture_product();
        let mut selection = FilterSelection::default();
        selection.set(Dimension::Presentation, "Caja");
        selection.set(Dimension::Dosage, "5mg");

        assert_eq!(
            available_values(&product, Dimension::Quantity, &selection),
            vec!["30"]
        );
        assert!(is_disabled(&product, Dimension::Quantity, "10 unidades", &selection));
    }

    #[test]
    fn test_match_variant_full_conjunction() {
        let product = fixture_product();
        let mut selection = FilterSelection::default();
        selection.set(Dimension::Presentation, "Caja");
        selection.set(Dimension::Dosage, "10mg");
        selection.set(Dimension::Quantity, "30 unidades");

        let variant = match_variant(&product, &selection).expect("full selection matches");
        assert_eq!(variant.id, 102);

        // An impossible combination is None, never a best-effort guess
        selection.set(Dimension::Presentation, "Blister");
        assert!(match_variant(&product, &selection).is_none());
    }

    #[test]
    fn test_open_defaults_to_first_variant() {
        let product = fixture_product();
        let picker = VariantPicker::open(&product);

        assert_eq!(picker.selection().get(Dimension::Presentation), Some("Caja"));
        assert_eq!(picker.selection().get(Dimension::Dosage), Some("5mg"));
        assert_eq!(picker.selection().get(Dimension::Quantity), Some("30"));
        assert_eq!(picker.resolved_variant().unwrap().id, 101);
    }

    #[test]
    fn test_single_valued_dimensions_not_rendered() {
        let catalog = catalog_fixture();
        let picker = VariantPicker::open(catalog.product(2).unwrap());
        assert!(picker.visible_dimensions().is_empty());
        assert_eq!(picker.resolved_variant().unwrap().id, 201);
    }

    #[test]
    fn test_select_straightforward_change() {
        let product = fixture_product();
        let mut picker = VariantPicker::open(&product);

        let variant = picker.select(Dimension::Dosage, "10mg").expect("valid click");
        assert_eq!(variant.id, 102);
        assert_eq!(picker.selection().get(Dimension::Dosage), Some("10mg"));
    }

    #[test]
    fn test_select_disabled_value_is_a_no_op() {
        let product = fixture_product();
        let mut picker = VariantPicker::open(&product);
        picker.select(Dimension::Presentation, "Blister").unwrap();

        let before = picker.selection().clone();
        assert!(picker.select(Dimension::Dosage, "10mg").is_none());
        assert_eq!(picker.selection(), &before);
    }

    #[test]
    fn test_scenario_e_presentation_switch_triggers_fallback() {
        let product = fixture_product();
        let mut picker = VariantPicker::open(&product);
        picker.select(Dimension::Dosage, "10mg").unwrap();

        // 10mg only exists under Caja; switching to Blister must land on a
        // valid Blister variant, not an empty state
        let variant = picker.select(Dimension::Presentation, "Blister").expect("fallback");
        assert_eq!(variant.id, 103);

        // All filter states resynchronized to the landed variant
        assert_eq!(picker.selection().get(Dimension::Presentation), Some("Blister"));
        assert_eq!(picker.selection().get(Dimension::Dosage), Some("5mg"));
        assert_eq!(picker.selection().get(Dimension::Quantity), Some("10"));
        assert_eq!(picker.resolved_variant().unwrap().id, 103);
    }

    #[test]
    fn test_no_dead_end_through_enabled_options() {
        // Every option the UI leaves clickable must resolve to a variant
        let product = fixture_product();
        for &dim in VariantPicker::open(&product).visible_dimensions() {
            for option in VariantPicker::open(&product).options(dim) {
                if option.disabled {
                    continue;
                }
                let mut picker = VariantPicker::open(&product);
                assert!(
                    picker.select(dim, &option.value).is_some(),
                    "enabled option {:?}={} hit a dead end",
                    dim,
                    option.value
                );
            }
        }
    }

    #[test]
    fn test_options_carry_labels_and_states() {
        let product = fixture_product();
        let picker = VariantPicker::open(&product);

        let options = picker.options(Dimension::Quantity);
        assert_eq!(options[0].label, "30 unidades");
        assert!(options[0].active);
        // "10" only exists under Blister, so it is visible but disabled
        assert_eq!(options[1].label, "10 unidades");
        assert!(options[1].disabled);
    }
}
