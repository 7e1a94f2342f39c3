// src/services/package_service.rs

use rust_decimal::Decimal;

use crate::models::package::Package;

fn package(name: &str, price: i64, employee_limit: i32, features: [&str; 3]) -> Package {
    Package {
        name: name.to_string(),
        price: Decimal::from(price),
        employee_limit,
        features: features.iter().map(|f| f.to_string()).collect(),
    }
}

/// O catálogo fixo de planos, servido como está.
pub fn catalog() -> Vec<Package> {
    vec![
        package("Basic", 5, 5, ["Asset Tracking", "Employee Management", "Basic Support"]),
        package("Standard", 8, 10, ["All Basic features", "Advanced Analytics", "Priority Support"]),
        package("Premium", 15, 20, ["All Standard features", "Custom Branding", "24/7 Support"]),
    ]
}

/// Busca um plano pelo nome, sem diferenciar maiúsculas.
pub fn find_package(name: &str) -> Option<Package> {
    catalog()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_three_tiers_with_growing_limits() {
        let limits: Vec<i32> = catalog().iter().map(|p| p.employee_limit).collect();
        assert_eq!(limits, vec![5, 10, 20]);
        let prices: Vec<Decimal> = catalog().iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![Decimal::from(5), Decimal::from(8), Decimal::from(15)]);
    }

    #[test]
    fn find_package_ignores_case() {
        assert_eq!(find_package("standard").map(|p| p.employee_limit), Some(10));
        assert_eq!(find_package(" PREMIUM ").map(|p| p.employee_limit), Some(20));
        assert!(find_package("Enterprise").is_none());
    }

    #[test]
    fn catalog_serializes_with_camel_case_fields() {
        let json = serde_json::to_value(catalog()).unwrap();
        assert_eq!(json[0]["name"], "Basic");
        assert_eq!(json[0]["employeeLimit"], 5);
        assert_eq!(json[0]["price"], 5.0);
        assert_eq!(json[2]["features"][2], "24/7 Support");
    }
}
