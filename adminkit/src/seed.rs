// adminkit/src/seed.rs
//
// Hard-coded data sets the simulated fetches resolve with
//

use chrono::NaiveDate;

use crate::types::{
    AnalyticsOverview, Customer, Order, OrderItem, OrderStatus, Product, ProductStatus, Role,
    SalesPoint, User, UserStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

pub fn users() -> Vec<User> {
    let rows = [
        ("1", "John Doe", "john@example.com", Role::Admin, UserStatus::Active, date(2024, 1, 15)),
        ("2", "Jane Smith", "jane@example.com", Role::Manager, UserStatus::Active, date(2024, 2, 3)),
        ("3", "Bob Johnson", "bob@example.com", Role::Customer, UserStatus::Inactive, date(2024, 2, 20)),
        ("4", "Alice Brown", "alice@example.com", Role::Editor, UserStatus::Active, date(2024, 3, 8)),
        ("5", "Charlie Wilson", "charlie@example.com", Role::Customer, UserStatus::Active, date(2024, 3, 27)),
    ];

    rows.into_iter()
        .map(|(id, name, email, role, status, joined)| User {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            status,
            joined,
        })
        .collect()
}

pub fn products() -> Vec<Product> {
    let rows = [
        ("1", "Wireless Headphones", 99.99, 45, "Electronics", ProductStatus::Active),
        ("2", "Smart Watch", 249.99, 12, "Electronics", ProductStatus::Active),
        ("3", "Laptop Stand", 39.99, 0, "Accessories", ProductStatus::OutOfStock),
        ("4", "Mechanical Keyboard", 129.99, 28, "Accessories", ProductStatus::Active),
        ("5", "USB-C Hub", 59.99, 64, "Accessories", ProductStatus::Inactive),
    ];

    rows.into_iter()
        .map(|(id, name, price, stock, category, status)| Product {
            id: id.to_string(),
            name: name.to_string(),
            price,
            stock,
            category: category.to_string(),
            status,
        })
        .collect()
}

fn item(product_id: &str, name: &str, quantity: u32, price: f64) -> OrderItem {
    OrderItem {
        product_id: product_id.to_string(),
        name: name.to_string(),
        quantity,
        price,
    }
}

fn order(id: &str, name: &str, email: &str, items: Vec<OrderItem>, status: OrderStatus, placed: NaiveDate) -> Order {
    let total = items
        .iter()
        .map(|i| i.price * f64::from(i.quantity))
        .sum::<f64>();

    Order {
        id: id.to_string(),
        customer: Customer {
            name: name.to_string(),
            email: email.to_string(),
        },
        items,
        total: (total * 100.0).round() / 100.0,
        status,
        placed,
    }
}

pub fn orders() -> Vec<Order> {
    vec![
        order(
            "1",
            "John Doe",
            "john@example.com",
            vec![item("1", "Wireless Headphones", 2, 99.99)],
            OrderStatus::Delivered,
            date(2024, 4, 2),
        ),
        order(
            "2",
            "Jane Smith",
            "jane@example.com",
            vec![
                item("2", "Smart Watch", 1, 249.99),
                item("5", "USB-C Hub", 1, 59.99),
            ],
            OrderStatus::Processing,
            date(2024, 4, 5),
        ),
        order(
            "3",
            "Bob Johnson",
            "bob@example.com",
            vec![item("4", "Mechanical Keyboard", 1, 129.99)],
            OrderStatus::Pending,
            date(2024, 4, 7),
        ),
        order(
            "4",
            "Alice Brown",
            "alice@example.com",
            vec![
                item("3", "Laptop Stand", 2, 39.99),
                item("1", "Wireless Headphones", 1, 99.99),
            ],
            OrderStatus::Shipped,
            date(2024, 4, 9),
        ),
        order(
            "5",
            "Charlie Wilson",
            "charlie@example.com",
            vec![item("5", "USB-C Hub", 3, 59.99)],
            OrderStatus::Cancelled,
            date(2024, 4, 11),
        ),
    ]
}

pub fn analytics() -> AnalyticsOverview {
    let sales: Vec<SalesPoint> = [
        ("Jan", 12_400.0, 124),
        ("Feb", 15_800.0, 152),
        ("Mar", 14_200.0, 138),
        ("Apr", 18_900.0, 181),
        ("May", 21_300.0, 204),
        ("Jun", 24_750.0, 236),
    ]
    .into_iter()
    .map(|(month, revenue, orders)| SalesPoint {
        month: month.to_string(),
        revenue,
        orders,
    })
    .collect();

    AnalyticsOverview {
        total_revenue: sales.iter().map(|p| p.revenue).sum(),
        total_orders: sales.iter().map(|p| p.orders).sum(),
        total_users: 2_847,
        conversion_rate: 3.24,
        sales,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_totals_match_items() {
        for o in orders() {
            let sum: f64 = o.items.iter().map(|i| i.price * f64::from(i.quantity)).sum();
            assert!((o.total - sum).abs() < 0.01, "order {} total drifted", o.id);
        }
    }

    #[test]
    fn seeded_ids_are_unique() {
        let mut ids: Vec<_> = users().into_iter().map(|u| u.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), users().len());
    }
}
