//! Category display formatting

use crate::models::{Category, CategoryKind};

/// Categories grouped by type, expense first
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = String::new();
    for kind in [CategoryKind::Expense, CategoryKind::Income] {
        let of_kind: Vec<&Category> = categories.iter().filter(|c| c.kind == kind).collect();
        if of_kind.is_empty() {
            continue;
        }

        output.push_str(&format!("{}\n", kind.as_str().to_uppercase()));
        for category in of_kind {
            output.push_str(&format!("  {:>7}  {}\n", category.id.to_string(), category.name));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;

    #[test]
    fn test_grouped_by_kind() {
        let mut food = Category::new("Food", CategoryKind::Expense);
        food.id = CategoryId::new(1);
        let mut salary = Category::new("Salary", CategoryKind::Income);
        salary.id = CategoryId::new(2);

        let output = format_category_list(&[salary, food]);
        assert!(output.find("EXPENSE").unwrap() < output.find("INCOME").unwrap());
        assert!(output.contains("cat-1  Food"));
    }
}
