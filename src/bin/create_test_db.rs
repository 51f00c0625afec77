use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::{Connection, params};
use serde_json::json;
use time::{Duration, OffsetDateTime};

use storefront_admin::initialize_db;

/// A utility for creating a demo database for the storefront admin server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let now = OffsetDateTime::now_utc();

    println!("Creating demo store...");
    conn.execute("INSERT INTO store (name) VALUES ('Falafel Express')", ())?;
    let store_id = conn.last_insert_rowid();

    conn.execute(
        "INSERT INTO billboard (store_id, label, image_url, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            store_id,
            "Summer Sale",
            "https://picsum.photos/seed/summer/1200/400",
            now
        ],
    )?;
    let billboard_id = conn.last_insert_rowid();

    println!("Creating categories and products...");
    for category in ["Drinks", "Food"] {
        conn.execute(
            "INSERT INTO category (store_id, billboard_id, name, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![store_id, billboard_id, category, now],
        )?;
    }

    let products = [
        ("Lemonade", 12.0, "Drinks", true),
        ("Mint Tea", 9.0, "Drinks", false),
        ("Falafel Pita", 25.0, "Food", true),
        ("Hummus Plate", 32.0, "Food", false),
    ];

    for (name, price, category, is_featured) in products {
        let images = json!([format!("https://picsum.photos/seed/{name}/400/400")]).to_string();
        conn.execute(
            "INSERT INTO product (store_id, name, price, category, images, is_featured, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![store_id, name, price, category, images, is_featured, now],
        )?;
    }

    println!("Creating orders...");
    let statuses = ["Processing", "Delivering", "Delivered", "Canceled"];

    for index in 0..24_i64 {
        let (name, price, category, _) = products[index as usize % products.len()];
        let items = json!([
            {"name": name, "category": category, "price": price, "qty": index % 3 + 1},
            {"name": "Mint Tea", "category": "Drinks", "price": 9.0},
        ]);
        let total = price * (index % 3 + 1) as f64 + 9.0;
        let created_at = now - Duration::days(index * 15);

        conn.execute(
            "INSERT INTO customer_order
                (id, store_id, order_items, is_paid, order_status, phone, address, user_id,
                total_amount, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
            params![
                format!("demo-order-{index}"),
                store_id,
                items.to_string(),
                index % 2 == 0,
                statuses[index as usize % statuses.len()],
                format!("050-000{index:04}"),
                format!("{} Demo Street", index + 1),
                "demo-user",
                total,
                created_at,
            ],
        )?;
    }

    println!("Success!");

    Ok(())
}
