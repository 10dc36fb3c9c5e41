//! Demo dataset loaded on startup when `KITZZ_SEED_DEMO_DATA` is set.
//!
//! One Pro seller with four products (three published, one draft) and five
//! completed orders spread over the last two days. All timestamps are
//! relative to `now` so the dashboard always shows fresh activity.

use chrono::{DateTime, Duration, Utc};

use kitzz_core::{
    Email, OrderId, OrderStatus, Plan, Price, ProductId, ProductKind, ProductStatus, Username,
};

use super::{RepositoryError, Tables};
use crate::models::{Order, Product, User};

/// Username of the demo seller.
pub const DEMO_SELLER: &str = "producerboy";

fn username(value: &str) -> Result<Username, RepositoryError> {
    Username::parse(value).map_err(|e| RepositoryError::DataCorruption(e.to_string()))
}

fn email(value: &str) -> Result<Email, RepositoryError> {
    Email::parse(value).map_err(|e| RepositoryError::DataCorruption(e.to_string()))
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|&t| t.to_owned()).collect()
}

/// Build the demo tables.
///
/// # Errors
///
/// Returns `RepositoryError::DataCorruption` if a seed literal fails
/// validation.
pub fn demo_tables(now: DateTime<Utc>) -> Result<Tables, RepositoryError> {
    let seller = username(DEMO_SELLER)?;

    let users = vec![User {
        username: seller.clone(),
        email: email("producerboy@example.com")?,
        verified: true,
        plan: Plan::Pro,
        payment_account_id: Some("acct_xxxxx".to_owned()),
        created_at: now - Duration::days(90),
    }];

    let products = vec![
        Product {
            id: ProductId::new("1"),
            title: "Dark Melody Loop".to_owned(),
            kind: ProductKind::Loop,
            price: Price::from_cents(499),
            bpm: Some("140".to_owned()),
            key: Some("Cm".to_owned()),
            format: "WAV".to_owned(),
            file_size: "4.2 MB".to_owned(),
            description: "Haunting melody perfect for dark trap beats".to_owned(),
            image: None,
            tags: tags(&["metro boomin", "ambient", "dark"]),
            owner: seller.clone(),
            status: ProductStatus::Published,
            slug: "dark-melody-loop".to_owned(),
            created_at: now - Duration::days(15),
        },
        Product {
            id: ProductId::new("2"),
            title: "Hard 808".to_owned(),
            kind: ProductKind::Sample,
            price: Price::from_cents(199),
            bpm: None,
            key: Some("C".to_owned()),
            format: "WAV".to_owned(),
            file_size: "0.3 MB".to_owned(),
            description: "Hardest 808 (not spinz tho)".to_owned(),
            image: None,
            tags: tags(&["808", "hard", "one shot"]),
            owner: seller.clone(),
            status: ProductStatus::Published,
            slug: "hard-808".to_owned(),
            created_at: now - Duration::days(8),
        },
        Product {
            id: ProductId::new("3"),
            title: "Trap Drums Vol.1".to_owned(),
            kind: ProductKind::Kit,
            price: Price::from_cents(1999),
            bpm: None,
            key: None,
            format: "WAV".to_owned(),
            file_size: "19.3 MB".to_owned(),
            description: "Top industry quality drumzzz".to_owned(),
            image: Some(
                "https://images.unsplash.com/photo-1598488035139-bdbb2231ce04?w=400".to_owned(),
            ),
            tags: tags(&["hard", "trap", "drum kit"]),
            owner: seller.clone(),
            status: ProductStatus::Published,
            slug: "trap-drums-vol1".to_owned(),
            created_at: now - Duration::days(22),
        },
        Product {
            id: ProductId::new("4"),
            title: "Chill Guitar Loop".to_owned(),
            kind: ProductKind::Loop,
            price: Price::from_cents(599),
            bpm: Some("85".to_owned()),
            key: Some("Am".to_owned()),
            format: "WAV".to_owned(),
            file_size: "5.3 MB".to_owned(),
            description: "Cool ass guitar loop".to_owned(),
            image: None,
            tags: tags(&["chill", "guitar", "melody", "atmospheric"]),
            owner: seller,
            status: ProductStatus::Draft,
            slug: "chill-guitar-loop".to_owned(),
            created_at: now - Duration::days(5),
        },
    ];

    let sales = [
        ("ORD-001", "1", "customer1@example.com", 499, Duration::minutes(2)),
        ("ORD-002", "2", "customer2@example.com", 199, Duration::hours(8)),
        ("ORD-003", "4", "customer3@example.com", 599, Duration::hours(15)),
        ("ORD-004", "3", "customer4@example.com", 1999, Duration::days(1)),
        ("ORD-005", "1", "customer5@example.com", 499, Duration::days(2)),
    ];
    let orders = sales
        .into_iter()
        .map(|(id, product_id, buyer, cents, age)| {
            Ok(Order {
                id: OrderId::new(id),
                product_id: ProductId::new(product_id),
                buyer_email: email(buyer)?,
                amount: Price::from_cents(cents),
                status: OrderStatus::Completed,
                created_at: now - age,
            })
        })
        .collect::<Result<Vec<_>, RepositoryError>>()?;

    Ok(Tables {
        users,
        products,
        orders,
    })
}
