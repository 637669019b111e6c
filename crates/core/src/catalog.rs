//! Static food catalog.
//!
//! The catalog is a fixed set of read-only tables: categories, food items and
//! restaurants. Nothing in the application mutates it; screens read it and
//! the cart copies display fields out of it.

use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, FoodItemId, Price, RestaurantId};

/// Category name that matches every item when filtering.
pub const ALL_CATEGORIES: &str = "All";

/// A menu category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub icon: String,
}

/// A food item that can be added to the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    pub id: FoodItemId,
    pub name: String,
    /// Category name (matches [`Category::name`]).
    pub category: String,
    pub price: Price,
    pub rating: f32,
    pub image: String,
    pub description: String,
    /// Restaurant name (matches [`Restaurant::name`]).
    pub restaurant: String,
    pub cook_time: String,
    pub ingredients: Vec<String>,
}

/// A restaurant serving catalog items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub rating: f32,
    pub delivery_time: String,
    pub delivery_fee: Price,
    pub image: String,
}

/// Filter applied to the item list on the home screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogFilter {
    /// Case-insensitive substring of the item name.
    pub search: Option<String>,
    /// Exact category name, or `"All"`.
    pub category: Option<String>,
}

impl CatalogFilter {
    /// Returns `true` if the item passes both the search and category filters.
    #[must_use]
    pub fn matches(&self, item: &FoodItem) -> bool {
        let matches_search = self.search.as_deref().is_none_or(|needle| {
            item.name
                .to_lowercase()
                .contains(&needle.to_lowercase())
        });
        let matches_category = self
            .category
            .as_deref()
            .is_none_or(|category| category == ALL_CATEGORIES || item.category == category);

        matches_search && matches_category
    }
}

/// The read-only catalog tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
    items: Vec<FoodItem>,
    restaurants: Vec<Restaurant>,
}

impl Catalog {
    /// Build a catalog from explicit tables.
    #[must_use]
    pub const fn new(
        categories: Vec<Category>,
        items: Vec<FoodItem>,
        restaurants: Vec<Restaurant>,
    ) -> Self {
        Self {
            categories,
            items,
            restaurants,
        }
    }

    /// The built-in demo catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(builtin_categories(), builtin_items(), builtin_restaurants())
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    #[must_use]
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Look up a food item by ID.
    #[must_use]
    pub fn item(&self, id: FoodItemId) -> Option<&FoodItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items passing `filter`, in catalog order.
    pub fn filter<'a>(&'a self, filter: &'a CatalogFilter) -> impl Iterator<Item = &'a FoodItem> {
        self.items.iter().filter(move |item| filter.matches(item))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

// =============================================================================
// Built-in Tables
// =============================================================================

fn category(id: i32, name: &str, icon: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        icon: icon.to_string(),
    }
}

fn builtin_categories() -> Vec<Category> {
    vec![
        category(1, "Pizza", "🍕"),
        category(2, "Burgers", "🍔"),
        category(3, "Sushi", "🍣"),
        category(4, "Tacos", "🌮"),
        category(5, "Desserts", "🍰"),
        category(6, "Drinks", "🥤"),
    ]
}

#[allow(clippy::too_many_arguments)]
fn food_item(
    id: i32,
    name: &str,
    category: &str,
    cents: i64,
    rating: f32,
    image: &str,
    description: &str,
    restaurant: &str,
    cook_time: &str,
    ingredients: &[&str],
) -> FoodItem {
    FoodItem {
        id: FoodItemId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price: Price::from_cents(cents),
        rating,
        image: image.to_string(),
        description: description.to_string(),
        restaurant: restaurant.to_string(),
        cook_time: cook_time.to_string(),
        ingredients: ingredients.iter().map(|s| (*s).to_string()).collect(),
    }
}

fn builtin_items() -> Vec<FoodItem> {
    vec![
        food_item(
            1,
            "Margherita Pizza",
            "Pizza",
            1899,
            4.8,
            "https://images.unsplash.com/photo-1604068549290-dea0e4a305ca?w=400&h=300&fit=crop",
            "Fresh mozzarella, tomato sauce, and basil on a crispy crust.",
            "Tony's Pizzeria",
            "25-30 min",
            &["Fresh Mozzarella", "Tomato Sauce", "Fresh Basil", "Olive Oil"],
        ),
        food_item(
            2,
            "Classic Cheeseburger",
            "Burgers",
            1599,
            4.6,
            "https://images.unsplash.com/photo-1568901346375-23c9450c58cd?w=400&h=300&fit=crop",
            "Juicy beef patty with melted cheese, lettuce, tomato, and pickles.",
            "Burger Palace",
            "15-20 min",
            &[
                "Beef Patty",
                "Cheddar Cheese",
                "Lettuce",
                "Tomato",
                "Pickles",
                "Special Sauce",
            ],
        ),
        food_item(
            3,
            "Salmon Nigiri Set",
            "Sushi",
            2499,
            4.9,
            "https://images.unsplash.com/photo-1579584425555-c3ce17fd4351?w=400&h=300&fit=crop",
            "Fresh salmon nigiri with wasabi and pickled ginger.",
            "Sakura Sushi",
            "10-15 min",
            &[
                "Fresh Salmon",
                "Sushi Rice",
                "Wasabi",
                "Pickled Ginger",
                "Soy Sauce",
            ],
        ),
        food_item(
            4,
            "Beef Tacos",
            "Tacos",
            1299,
            4.7,
            "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=400&h=300&fit=crop",
            "Seasoned beef with fresh salsa, cheese, and crisp lettuce.",
            "Casa de Tacos",
            "12-18 min",
            &[
                "Seasoned Beef",
                "Corn Tortilla",
                "Cheese",
                "Lettuce",
                "Salsa",
                "Sour Cream",
            ],
        ),
        food_item(
            5,
            "Chocolate Lava Cake",
            "Desserts",
            899,
            4.8,
            "https://images.unsplash.com/photo-1541599468348-e96984315921?w=400&h=300&fit=crop",
            "Warm chocolate cake with a molten center, served with vanilla ice cream.",
            "Sweet Dreams",
            "8-12 min",
            &[
                "Dark Chocolate",
                "Butter",
                "Eggs",
                "Sugar",
                "Flour",
                "Vanilla Ice Cream",
            ],
        ),
        food_item(
            6,
            "Pepperoni Pizza",
            "Pizza",
            1999,
            4.7,
            "https://images.unsplash.com/photo-1565299624946-b28f40a0ca4b?w=400&h=300&fit=crop",
            "Classic pepperoni pizza with mozzarella cheese and tomato sauce.",
            "Tony's Pizzeria",
            "25-30 min",
            &[
                "Pepperoni",
                "Mozzarella Cheese",
                "Tomato Sauce",
                "Italian Herbs",
            ],
        ),
        food_item(
            7,
            "BBQ Bacon Burger",
            "Burgers",
            1799,
            4.5,
            "https://images.unsplash.com/photo-1553979459-d2229ba7433a?w=400&h=300&fit=crop",
            "Smoky BBQ burger with crispy bacon and onion rings.",
            "Burger Palace",
            "18-25 min",
            &["Beef Patty", "Bacon", "BBQ Sauce", "Onion Rings", "Cheese"],
        ),
        food_item(
            8,
            "Fresh Smoothie",
            "Drinks",
            699,
            4.4,
            "https://images.unsplash.com/photo-1553530666-ba11a7da3888?w=400&h=300&fit=crop",
            "Refreshing blend of fresh fruits and yogurt.",
            "Healthy Bites",
            "5-8 min",
            &["Mixed Berries", "Banana", "Greek Yogurt", "Honey", "Mint"],
        ),
    ]
}

fn builtin_restaurants() -> Vec<Restaurant> {
    let restaurant = |id, name: &str, rating, delivery_time: &str, fee_cents, image: &str| {
        Restaurant {
            id: RestaurantId::new(id),
            name: name.to_string(),
            rating,
            delivery_time: delivery_time.to_string(),
            delivery_fee: Price::from_cents(fee_cents),
            image: image.to_string(),
        }
    };

    vec![
        restaurant(
            1,
            "Tony's Pizzeria",
            4.8,
            "25-30 min",
            299,
            "https://images.unsplash.com/photo-1555396273-367ea4eb4db5?w=400&h=200&fit=crop",
        ),
        restaurant(
            2,
            "Burger Palace",
            4.6,
            "15-20 min",
            199,
            "https://images.unsplash.com/photo-1571091718767-18b5b1457add?w=400&h=200&fit=crop",
        ),
        restaurant(
            3,
            "Sakura Sushi",
            4.9,
            "20-25 min",
            399,
            "https://images.unsplash.com/photo-1579027989536-b7b1f875659b?w=400&h=200&fit=crop",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(items: impl Iterator<Item = &'a FoodItem>) -> Vec<&'a str> {
        items.map(|item| item.name.as_str()).collect()
    }

    #[test]
    fn test_builtin_tables() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.categories().len(), 6);
        assert_eq!(catalog.items().len(), 8);
        assert_eq!(catalog.restaurants().len(), 3);
    }

    #[test]
    fn test_item_lookup() {
        let catalog = Catalog::builtin();
        let pizza = catalog.item(FoodItemId::new(1)).unwrap();
        assert_eq!(pizza.name, "Margherita Pizza");
        assert_eq!(pizza.price, Price::from_cents(1899));
        assert!(catalog.item(FoodItemId::new(99)).is_none());
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let catalog = Catalog::builtin();
        let filter = CatalogFilter::default();
        assert_eq!(catalog.filter(&filter).count(), 8);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = Catalog::builtin();
        let filter = CatalogFilter {
            search: Some("PIZZA".to_string()),
            category: None,
        };
        assert_eq!(
            names(catalog.filter(&filter)),
            ["Margherita Pizza", "Pepperoni Pizza"]
        );
    }

    #[test]
    fn test_category_filter() {
        let catalog = Catalog::builtin();
        let filter = CatalogFilter {
            search: None,
            category: Some("Burgers".to_string()),
        };
        assert_eq!(
            names(catalog.filter(&filter)),
            ["Classic Cheeseburger", "BBQ Bacon Burger"]
        );

        let all = CatalogFilter {
            search: None,
            category: Some(ALL_CATEGORIES.to_string()),
        };
        assert_eq!(catalog.filter(&all).count(), 8);
    }

    #[test]
    fn test_search_and_category_combine() {
        let catalog = Catalog::builtin();
        let filter = CatalogFilter {
            search: Some("bacon".to_string()),
            category: Some("Pizza".to_string()),
        };
        assert_eq!(catalog.filter(&filter).count(), 0);
    }
}
