//! Mock back-office models.
//!
//! Customers and orders are demonstration data: seeded lists that live for
//! the process lifetime and are mutated in memory only. The product table is
//! the only durably persisted entity in the system.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use resonant_harmony_core::{CustomerId, Email, OrderId, Price};

/// A mock storefront customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: Email,
    pub join_date: NaiveDate,
    pub total_orders: u32,
    pub total_spent: Decimal,
}

/// One line of a mock order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub price: Price,
}

/// Fulfillment status of a mock order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// Human-readable label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
        }
    }
}

/// A mock order with its line items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub items: Vec<OrderLine>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub placed_on: NaiveDate,
}

impl Order {
    /// Total units across the order's lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn price(s: &str) -> Price {
    Price::parse(s).unwrap_or(Price::ZERO)
}

/// Seed customers shown in the back-office on first boot.
#[must_use]
pub fn seed_customers() -> Vec<Customer> {
    vec![
        Customer {
            id: CustomerId::generate(),
            name: "John Doe".to_owned(),
            email: Email::parse("john@example.com").unwrap_or_else(|_| unreachable!()),
            join_date: date(2024, 1, 15),
            total_orders: 5,
            total_spent: Decimal::new(49_995, 2),
        },
        Customer {
            id: CustomerId::generate(),
            name: "Jane Smith".to_owned(),
            email: Email::parse("jane@example.com").unwrap_or_else(|_| unreachable!()),
            join_date: date(2024, 2, 20),
            total_orders: 3,
            total_spent: Decimal::new(32_997, 2),
        },
        Customer {
            id: CustomerId::generate(),
            name: "Bob Johnson".to_owned(),
            email: Email::parse("bob@example.com").unwrap_or_else(|_| unreachable!()),
            join_date: date(2024, 3, 10),
            total_orders: 8,
            total_spent: Decimal::new(89_992, 2),
        },
    ]
}

/// Seed orders shown in the back-office on first boot.
#[must_use]
pub fn seed_orders() -> Vec<Order> {
    vec![
        Order {
            id: OrderId::generate(),
            customer_name: "John Doe".to_owned(),
            items: vec![
                OrderLine {
                    name: "Zen Harmony Bowl".to_owned(),
                    quantity: 1,
                    price: price("99.99"),
                },
                OrderLine {
                    name: "Serenity Now Bowl".to_owned(),
                    quantity: 2,
                    price: price("59.99"),
                },
            ],
            total: Decimal::new(21_997, 2),
            status: OrderStatus::Delivered,
            placed_on: date(2024, 4, 2),
        },
        Order {
            id: OrderId::generate(),
            customer_name: "Jane Smith".to_owned(),
            items: vec![OrderLine {
                name: "Resonance Master Bowl".to_owned(),
                quantity: 1,
                price: price("249.99"),
            }],
            total: Decimal::new(24_999, 2),
            status: OrderStatus::Shipped,
            placed_on: date(2024, 4, 18),
        },
        Order {
            id: OrderId::generate(),
            customer_name: "Bob Johnson".to_owned(),
            items: vec![
                OrderLine {
                    name: "Tibetan Thunder Bowl".to_owned(),
                    quantity: 1,
                    price: price("179.99"),
                },
                OrderLine {
                    name: "Crystal Chakra Bowl".to_owned(),
                    quantity: 1,
                    price: price("199.99"),
                },
            ],
            total: Decimal::new(37_998, 2),
            status: OrderStatus::Pending,
            placed_on: date(2024, 5, 1),
        },
    ]
}
