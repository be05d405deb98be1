use crate::core::sql::{comment_text, format_price, optional_literal, quote_literal};
use crate::domain::model::{Catalog, CategoryRecord, ProductRecord};

const OWNER_VAR: &str = "owner_id";
const CATEGORY_VAR: &str = "cat_id";
const ORDER_VAR: &str = "category_order";
const INDENT: &str = "    ";
const BODY_TAG: &str = "seed";

/// A category paired with the order it will be persisted with.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCategory<'a> {
    /// 1-based position in the catalog.
    pub display_order: usize,
    pub record: &'a CategoryRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeedPlan<'a> {
    pub owner_email: &'a str,
    pub categories: Vec<PlannedCategory<'a>>,
}

impl SeedPlan<'_> {
    pub fn product_count(&self) -> usize {
        self.categories.iter().map(|c| c.record.products.len()).sum()
    }
}

struct ScriptBuilder {
    out: String,
}

impl ScriptBuilder {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn finish(mut self) -> String {
        // The caller decides what follows the final statement.
        if self.out.ends_with('\n') {
            self.out.pop();
        }
        self.out
    }
}

/// Renders a catalog into a single `DO $seed$ ... $seed$` block that seeds categories
/// and products for one owner.
///
/// Categories are inserted with `ON CONFLICT DO NOTHING`; products are only
/// inserted on the run that created their category. Products added to the
/// catalog after a category already exists in the database are therefore not
/// picked up by later runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SeedScriptGenerator;

impl SeedScriptGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn plan<'a>(&self, catalog: &'a Catalog) -> SeedPlan<'a> {
        let categories = catalog
            .categories
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let display_order = index + 1;
                if let Some(authored) = record.display_order {
                    if authored != display_order as i64 {
                        tracing::debug!(
                            "Category '{}' authored order {} replaced by position {}",
                            record.name,
                            authored,
                            display_order
                        );
                    }
                }
                PlannedCategory {
                    display_order,
                    record,
                }
            })
            .collect();

        SeedPlan {
            owner_email: &catalog.owner.email,
            categories,
        }
    }

    pub fn generate(&self, catalog: &Catalog) -> String {
        self.render(&self.plan(catalog))
    }

    pub fn render(&self, plan: &SeedPlan<'_>) -> String {
        let mut script = ScriptBuilder::new();
        let delimiter = body_delimiter(plan);

        self.render_prologue(&mut script, plan.owner_email, &delimiter);
        for category in &plan.categories {
            self.render_category(&mut script, category);
        }
        script.line(0, format!("END {};", delimiter));

        script.finish()
    }

    fn render_prologue(&self, script: &mut ScriptBuilder, owner_email: &str, delimiter: &str) {
        script.line(0, "-- Generated seeding script");
        script.line(0, "-- Edit the catalog and regenerate instead of editing this file");
        script.blank();
        script.line(0, format!("DO {}", delimiter));
        script.line(0, "DECLARE");
        script.line(1, format!("{} UUID;", OWNER_VAR));
        script.line(1, format!("{} UUID;", CATEGORY_VAR));
        script.line(1, format!("{} INTEGER := 0;", ORDER_VAR));
        script.line(0, "BEGIN");
        script.line(1, format!("SELECT id INTO {}", OWNER_VAR));
        script.line(1, "FROM auth.users");
        script.line(1, format!("WHERE email = {};", quote_literal(owner_email)));
        script.blank();
        script.line(1, format!("IF {} IS NULL THEN", OWNER_VAR));
        script.line(
            2,
            format!("RAISE EXCEPTION 'User not found: %', {};", quote_literal(owner_email)),
        );
        script.line(1, "END IF;");
        script.blank();
    }

    fn render_category(&self, script: &mut ScriptBuilder, category: &PlannedCategory<'_>) {
        let record = category.record;
        let name = quote_literal(&record.name);

        script.line(
            1,
            format!(
                "-- Category {}: {}",
                category.display_order,
                comment_text(&record.name)
            ),
        );
        script.line(1, format!("{0} := {0} + 1;", ORDER_VAR));
        script.line(
            1,
            "INSERT INTO categories (restaurant_id, name, image, \"order\")",
        );
        script.line(
            1,
            format!(
                "VALUES ({}, {}, {}, {})",
                OWNER_VAR,
                name,
                optional_literal(record.image.as_deref()),
                ORDER_VAR
            ),
        );
        script.line(1, "ON CONFLICT DO NOTHING");
        script.line(1, format!("RETURNING id INTO {};", CATEGORY_VAR));
        script.blank();
        script.line(1, format!("IF {} IS NOT NULL THEN", CATEGORY_VAR));
        script.line(2, format!("RAISE NOTICE 'Category created: %', {};", name));
        script.blank();

        if record.products.is_empty() {
            tracing::warn!(
                "Category '{}' has no products; only the category will be inserted",
                record.name
            );
        } else {
            script.line(
                2,
                "INSERT INTO products (restaurant_id, category_id, name, description, price, image, available)",
            );
            script.line(2, "VALUES");
            let last = record.products.len() - 1;
            for (index, product) in record.products.iter().enumerate() {
                let terminator = if index < last { "," } else { ";" };
                script.line(3, format!("{}{}", product_row(product), terminator));
            }
            script.blank();
        }

        script.line(
            2,
            format!(
                "RAISE NOTICE '   Products added: %', {};",
                record.products.len()
            ),
        );
        script.line(1, "END IF;");
        script.blank();
    }
}

/// Dollar-quote delimiter for the block body. Never occurs in any catalog text.
fn body_delimiter(plan: &SeedPlan<'_>) -> String {
    let mut texts: Vec<&str> = vec![plan.owner_email];
    for category in &plan.categories {
        let record = category.record;
        texts.push(&record.name);
        texts.extend(record.image.as_deref());
        for product in &record.products {
            texts.push(&product.name);
            texts.push(&product.description);
            texts.extend(product.image.as_deref());
        }
    }

    let mut delimiter = format!("${}$", BODY_TAG);
    let mut suffix = 0;
    while texts.iter().any(|text| text.contains(&delimiter)) {
        suffix += 1;
        delimiter = format!("${}{}$", BODY_TAG, suffix);
    }
    delimiter
}

fn product_row(product: &ProductRecord) -> String {
    format!(
        "({}, {}, {}, {}, {}, {}, {})",
        OWNER_VAR,
        CATEGORY_VAR,
        quote_literal(&product.name),
        quote_literal(&product.description),
        format_price(product.price),
        optional_literal(product.image.as_deref()),
        product.available
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::OwnerConfig;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn product(name: &str, price: &str) -> ProductRecord {
        ProductRecord {
            name: name.to_string(),
            description: format!("{} description", name),
            price: Decimal::from_str(price).unwrap(),
            image: None,
            available: true,
        }
    }

    fn category(name: &str, order: Option<i64>, products: Vec<ProductRecord>) -> CategoryRecord {
        CategoryRecord {
            name: name.to_string(),
            display_order: order,
            image: None,
            products,
        }
    }

    fn catalog(categories: Vec<CategoryRecord>) -> Catalog {
        Catalog {
            owner: OwnerConfig::default(),
            categories,
        }
    }

    #[test]
    fn test_plan_assigns_positions_ignoring_authored_order() {
        let catalog = catalog(vec![
            category("Bebidas", Some(7), vec![product("Suco", "6")]),
            category("Pizzas", Some(1), vec![]),
            category("Doces", None, vec![]),
        ]);

        let plan = SeedScriptGenerator::new().plan(&catalog);
        let orders: Vec<usize> = plan.categories.iter().map(|c| c.display_order).collect();
        let names: Vec<&str> = plan.categories.iter().map(|c| c.record.name.as_str()).collect();

        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(names, vec!["Bebidas", "Pizzas", "Doces"]);
        assert_eq!(plan.product_count(), 1);
    }

    #[test]
    fn test_two_products_are_comma_then_semicolon_terminated() {
        let catalog = catalog(vec![category(
            "Pizzas",
            Some(1),
            vec![product("Pizza Calabresa", "35.00"), product("Pizza Margherita", "32.00")],
        )]);

        let script = SeedScriptGenerator::new().generate(&catalog);

        assert_eq!(script.matches("INSERT INTO categories").count(), 1);
        assert_eq!(script.matches("INSERT INTO products").count(), 1);
        assert!(script.contains(
            "            (owner_id, cat_id, 'Pizza Calabresa', 'Pizza Calabresa description', 35.00, NULL, true),\n"
        ));
        assert!(script.contains(
            "            (owner_id, cat_id, 'Pizza Margherita', 'Pizza Margherita description', 32.00, NULL, true);\n"
        ));
        assert!(script.contains("RAISE NOTICE '   Products added: %', 2;"));
    }

    #[test]
    fn test_empty_category_omits_products_insert() {
        let catalog = catalog(vec![category("Sobremesas", None, vec![])]);

        let script = SeedScriptGenerator::new().generate(&catalog);

        assert_eq!(script.matches("INSERT INTO categories").count(), 1);
        assert!(!script.contains("INSERT INTO products"));
        assert!(script.contains("RAISE NOTICE '   Products added: %', 0;"));
    }

    #[test]
    fn test_quotes_are_doubled_everywhere() {
        let mut pizza = product("Pizza d'Oro", "40");
        pizza.description = "Chef's special".to_string();
        let mut catalog = catalog(vec![category("Mamma's", None, vec![pizza])]);
        catalog.owner.email = "o'brien@example.com".to_string();

        let script = SeedScriptGenerator::new().generate(&catalog);

        assert!(script.contains("WHERE email = 'o''brien@example.com';"));
        assert!(script.contains("VALUES (owner_id, 'Mamma''s', NULL, category_order)"));
        assert!(script.contains("RAISE NOTICE 'Category created: %', 'Mamma''s';"));
        assert!(script.contains("'Pizza d''Oro', 'Chef''s special', 40.00"));
    }

    #[test]
    fn test_script_structure() {
        let catalog = catalog(vec![category("Pizzas", None, vec![product("A", "1")])]);

        let script = SeedScriptGenerator::new().generate(&catalog);

        assert!(script.starts_with("-- Generated seeding script\n"));
        assert!(script.contains("\nDO $seed$\nDECLARE\n"));
        assert!(script.ends_with("END $seed$;"));
        assert!(script.contains("    category_order INTEGER := 0;\n"));
        assert!(script.contains("    WHERE email = 'tomjerry@gmail.com';\n"));
        assert!(script.contains("        RAISE EXCEPTION 'User not found: %', 'tomjerry@gmail.com';\n"));
        assert!(script.contains("    category_order := category_order + 1;\n"));
        assert!(script.contains("    ON CONFLICT DO NOTHING\n    RETURNING id INTO cat_id;\n"));
        assert!(script.contains("    IF cat_id IS NOT NULL THEN\n"));
    }

    #[test]
    fn test_dollar_quotes_in_names_keep_the_body_closed() {
        let mut combo = product("Combo $$ x", "20");
        combo.description = "Leve $seed$ junto".to_string();
        let script = SeedScriptGenerator::new().generate(&catalog(vec![category(
            "Promo $$",
            None,
            vec![combo],
        )]));

        assert!(script.contains("\nDO $seed1$\n"));
        assert!(script.ends_with("END $seed1$;"));
        assert!(script.contains("'Combo $$ x', 'Leve $seed$ junto'"));
        assert_eq!(script.matches("$seed1$").count(), 2);
    }

    #[test]
    fn test_images_and_availability_are_rendered() {
        let mut soda = product("Refrigerante 2L", "8");
        soda.image = Some("https://cdn.example.com/soda.png".to_string());
        soda.available = false;
        let mut drinks = category("Bebidas", None, vec![soda]);
        drinks.image = Some("https://cdn.example.com/drinks.png".to_string());

        let script = SeedScriptGenerator::new().generate(&catalog(vec![drinks]));

        assert!(script.contains(
            "VALUES (owner_id, 'Bebidas', 'https://cdn.example.com/drinks.png', category_order)"
        ));
        assert!(script.contains("8.00, 'https://cdn.example.com/soda.png', false);"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let catalog = catalog(vec![category("Pizzas", None, vec![product("A", "1.5")])]);
        let generator = SeedScriptGenerator::new();
        assert_eq!(generator.generate(&catalog), generator.generate(&catalog));
    }
}
