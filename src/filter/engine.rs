//! Filter Engine
//!
//! Pure derivations over the loaded catalog: the visible product set for a
//! [`FilterCriteria`], the facet lists, and the result count label.

use super::models::FilterCriteria;
use crate::catalog::models::{Facets, Product};

/// Returns the products matching every criterion, in catalog order.
///
/// Empty selections mean "no filter", not "match nothing".
pub fn filter_products<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    let needle = criteria.search_text.to_lowercase();

    products
        .iter()
        .filter(|product| matches_search(product, &needle))
        .filter(|product| selected(criteria.selected_categories(), &product.category))
        .filter(|product| selected(criteria.selected_brands(), &product.brand))
        .filter(|product| criteria.price_range.contains(product.price))
        .collect()
}

fn matches_search(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.title.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
}

fn selected(selection: &[String], value: &str) -> bool {
    selection.is_empty() || selection.iter().any(|s| s == value)
}

/// Distinct categories (catalog order) and brands (sorted) across the full,
/// unfiltered catalog.
pub fn facets(products: &[Product]) -> Facets {
    let mut categories: Vec<String> = Vec::new();
    for product in products {
        if !categories.contains(&product.category) {
            categories.push(product.category.clone());
        }
    }

    let mut brands: Vec<String> = products.iter().map(|p| p.brand.clone()).collect();
    brands.sort();
    brands.dedup();

    Facets { categories, brands }
}

/// Heading for the listing, e.g. `"1 Product Found"` or `"3 Products Found"`.
pub fn results_label(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{} Product{} Found", count, plural)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: i64, title: &str, category: &str, brand: &str, price: i64) -> Product {
        Product {
            id,
            title: title.to_string(),
            description: format!("{} description", title),
            category: category.to_string(),
            brand: brand.to_string(),
            price: Decimal::from(price),
            rating: 4.0,
            image: format!("/images/{}.jpg", id),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Laptop", "Electronics", "Zenith", 1200),
            product(2, "Desk Lamp", "Home", "Acme", 40),
            product(3, "Phone", "Electronics", "Globex", 800),
        ]
    }

    fn ids(products: &[&Product]) -> Vec<i64> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn default_criteria_returns_full_catalog_in_order() {
        let products = catalog();
        let visible = filter_products(&products, &FilterCriteria::default());
        assert_eq!(ids(&visible), vec![1, 2, 3]);
    }

    #[test]
    fn brand_selection_narrows_to_matching_products() {
        let products = catalog();
        let mut criteria = FilterCriteria::default();
        criteria.toggle_brand("Acme");

        let visible = filter_products(&products, &criteria);
        assert_eq!(ids(&visible), vec![2]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_description_and_category() {
        let products = catalog();
        let mut criteria = FilterCriteria::default();

        criteria.set_search("LAPTOP");
        assert_eq!(ids(&filter_products(&products, &criteria)), vec![1]);

        criteria.set_search("lamp desc");
        assert_eq!(ids(&filter_products(&products, &criteria)), vec![2]);

        criteria.set_search("electro");
        assert_eq!(ids(&filter_products(&products, &criteria)), vec![1, 3]);

        criteria.set_search("Zenith");
        assert!(filter_products(&products, &criteria).is_empty());
    }

    #[test]
    fn criteria_combine_with_and() {
        let products = catalog();
        let mut criteria = FilterCriteria::default();
        criteria.toggle_category("Electronics");
        criteria.set_max_price(Decimal::from(1000));

        assert_eq!(ids(&filter_products(&products, &criteria)), vec![3]);

        criteria.toggle_brand("Zenith");
        assert!(filter_products(&products, &criteria).is_empty());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let products = catalog();
        let mut criteria = FilterCriteria::default();
        criteria.set_min_price(Decimal::from(40));
        criteria.set_max_price(Decimal::from(800));

        assert_eq!(ids(&filter_products(&products, &criteria)), vec![2, 3]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let products = catalog();
        let mut criteria = FilterCriteria::default();
        criteria.toggle_category("Electronics");

        let once: Vec<Product> = filter_products(&products, &criteria)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_products(&once, &criteria);

        assert_eq!(ids(&twice), vec![1, 3]);
        assert_eq!(twice.len(), once.len());
    }

    #[test]
    fn facets_keep_category_order_and_sort_brands() {
        let mut products = catalog();
        products.push(product(4, "Tablet", "Electronics", "Acme", 300));

        let facets = facets(&products);
        assert_eq!(facets.categories, vec!["Electronics", "Home"]);
        assert_eq!(facets.brands, vec!["Acme", "Globex", "Zenith"]);
    }

    #[test]
    fn label_pluralizes() {
        assert_eq!(results_label(0), "0 Products Found");
        assert_eq!(results_label(1), "1 Product Found");
        assert_eq!(results_label(3), "3 Products Found");
    }
}
