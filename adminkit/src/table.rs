// adminkit/src/table.rs
//
// Typed rows for the commerce tables. Each entity has its own column set and
// `render_cell` is exhaustive over every (row, column) pair.
//

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{Order, OrderStatus, Product, ProductStatus, Role, User, UserStatus};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableRow<'a> {
    User(&'a User),
    Product(&'a Product),
    Order(&'a Order),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UserColumn {
    Name,
    Email,
    Role,
    Status,
    Joined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProductColumn {
    Name,
    Category,
    Price,
    Stock,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderColumn {
    Id,
    Customer,
    Items,
    Total,
    Status,
    Placed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Column {
    User(UserColumn),
    Product(ProductColumn),
    Order(OrderColumn),
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::User(c) => match c {
                UserColumn::Name => "Name",
                UserColumn::Email => "Email",
                UserColumn::Role => "Role",
                UserColumn::Status => "Status",
                UserColumn::Joined => "Joined",
            },
            Column::Product(c) => match c {
                ProductColumn::Name => "Product",
                ProductColumn::Category => "Category",
                ProductColumn::Price => "Price",
                ProductColumn::Stock => "Stock",
                ProductColumn::Status => "Status",
            },
            Column::Order(c) => match c {
                OrderColumn::Id => "Order",
                OrderColumn::Customer => "Customer",
                OrderColumn::Items => "Items",
                OrderColumn::Total => "Total",
                OrderColumn::Status => "Status",
                OrderColumn::Placed => "Date",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Neutral,
    Warning,
    Negative,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Cell {
    Text { value: String },
    Money { value: f64 },
    Count { value: u32 },
    Badge { label: String, tone: Tone },
    Date { value: NaiveDate },
}

impl Cell {
    fn text(value: impl Into<String>) -> Self {
        Cell::Text { value: value.into() }
    }

    fn badge(label: &str, tone: Tone) -> Self {
        Cell::Badge {
            label: label.to_string(),
            tone,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Cell::Text { value } => value.clone(),
            Cell::Money { value } => format!("${:.2}", value),
            Cell::Count { value } => value.to_string(),
            Cell::Badge { label, .. } => label.clone(),
            Cell::Date { value } => value.format("%Y-%m-%d").to_string(),
        }
    }
}

impl<'a> TableRow<'a> {
    pub fn id(&self) -> &'a str {
        match *self {
            TableRow::User(u) => &u.id,
            TableRow::Product(p) => &p.id,
            TableRow::Order(o) => &o.id,
        }
    }

    pub fn columns(&self) -> Vec<Column> {
        match self {
            TableRow::User(_) => [
                UserColumn::Name,
                UserColumn::Email,
                UserColumn::Role,
                UserColumn::Status,
                UserColumn::Joined,
            ]
            .into_iter()
            .map(Column::User)
            .collect(),
            TableRow::Product(_) => [
                ProductColumn::Name,
                ProductColumn::Category,
                ProductColumn::Price,
                ProductColumn::Stock,
                ProductColumn::Status,
            ]
            .into_iter()
            .map(Column::Product)
            .collect(),
            TableRow::Order(_) => [
                OrderColumn::Id,
                OrderColumn::Customer,
                OrderColumn::Items,
                OrderColumn::Total,
                OrderColumn::Status,
                OrderColumn::Placed,
            ]
            .into_iter()
            .map(Column::Order)
            .collect(),
        }
    }

    pub fn cells(&self) -> Vec<Cell> {
        self.columns()
            .into_iter()
            .filter_map(|column| render_cell(*self, column))
            .collect()
    }
}

/// `None` when the column belongs to a different entity than the row.
pub fn render_cell(row: TableRow<'_>, column: Column) -> Option<Cell> {
    let cell = match (row, column) {
        (TableRow::User(user), Column::User(c)) => match c {
            UserColumn::Name => Cell::text(&user.name),
            UserColumn::Email => Cell::text(&user.email),
            UserColumn::Role => Cell::badge(role_label(user.role), Tone::Info),
            UserColumn::Status => match user.status {
                UserStatus::Active => Cell::badge("Active", Tone::Positive),
                UserStatus::Inactive => Cell::badge("Inactive", Tone::Neutral),
            },
            UserColumn::Joined => Cell::Date { value: user.joined },
        },
        (TableRow::Product(product), Column::Product(c)) => match c {
            ProductColumn::Name => Cell::text(&product.name),
            ProductColumn::Category => Cell::text(&product.category),
            ProductColumn::Price => Cell::Money {
                value: product.price,
            },
            ProductColumn::Stock => Cell::Count {
                value: product.stock,
            },
            ProductColumn::Status => match product.status {
                ProductStatus::Active => Cell::badge("Active", Tone::Positive),
                ProductStatus::Inactive => Cell::badge("Inactive", Tone::Neutral),
                ProductStatus::OutOfStock => Cell::badge("Out of stock", Tone::Negative),
            },
        },
        (TableRow::Order(order), Column::Order(c)) => match c {
            OrderColumn::Id => Cell::text(format!("#{}", order.id)),
            OrderColumn::Customer => Cell::text(&order.customer.name),
            OrderColumn::Items => Cell::Count {
                value: order.item_count(),
            },
            OrderColumn::Total => Cell::Money { value: order.total },
            OrderColumn::Status => Cell::badge(status_label(order.status), status_tone(order.status)),
            OrderColumn::Placed => Cell::Date {
                value: order.placed,
            },
        },
        _ => return None,
    };
    Some(cell)
}

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Admin",
        Role::Manager => "Manager",
        Role::Editor => "Editor",
        Role::Customer => "Customer",
    }
}

fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "Pending",
        OrderStatus::Processing => "Processing",
        OrderStatus::Shipped => "Shipped",
        OrderStatus::Delivered => "Delivered",
        OrderStatus::Cancelled => "Cancelled",
    }
}

pub fn status_tone(status: OrderStatus) -> Tone {
    match status {
        OrderStatus::Pending => Tone::Warning,
        OrderStatus::Processing => Tone::Info,
        OrderStatus::Shipped => Tone::Info,
        OrderStatus::Delivered => Tone::Positive,
        OrderStatus::Cancelled => Tone::Negative,
    }
}
