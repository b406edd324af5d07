//! # Seed Data Generator
//!
//! Fills a fresh database with a small shop for development.
//!
//! ## Usage
//! ```bash
//! cargo run -p laundry-db --bin seed
//!
//! # Specify database path
//! cargo run -p laundry-db --bin seed -- --db ./data/laundry.db
//! ```
//!
//! ## Generated Data
//! - A price list of common services
//! - Counter staff, all with password `laundry123`
//! - Regular customers
//! - A handful of transactions spread across every status

use laundry_core::{Money, NewCustomer, NewEmployee, NewService, NewTransaction, TransactionStatus, Weight};
use laundry_db::{Database, DbConfig};
use std::env;

/// (name, price per kg in whole currency units)
const SERVICES: &[(&str, i64)] = &[
    ("Cuci Kering", 6000),
    ("Cuci Setrika", 8000),
    ("Setrika Saja", 5000),
    ("Express 6 Jam", 15000),
    ("Bed Cover", 12000),
];

/// (name, username)
const EMPLOYEES: &[(&str, &str)] = &[
    ("Sari Wulandari", "sari"),
    ("Agus Prasetyo", "agus"),
    ("Dewi Lestari", "dewi"),
];

const SEED_PASSWORD: &str = "laundry123";

/// (name, address, phone)
const CUSTOMERS: &[(&str, &str, &str)] = &[
    ("Budi Santoso", "Jl. Melati No. 3", "081234567890"),
    ("Siti Aminah", "Jl. Kenanga No. 12", "081398765432"),
    ("Rudi Hartono", "Perum Griya Asri B-7", "085711223344"),
    ("Ani Yudhoyono", "Jl. Mawar No. 21", "082155667788"),
    ("Joko Widodo", "Jl. Cempaka No. 5", "087812340000"),
    ("Rina Marlina", "", "081122334455"),
];

/// (customer, employee, service, grams, status)
const TRANSACTIONS: &[(usize, usize, usize, i64, TransactionStatus)] = &[
    (0, 0, 1, 3500, TransactionStatus::PickedUp),
    (1, 1, 0, 5000, TransactionStatus::Ready),
    (2, 0, 3, 2000, TransactionStatus::Washing),
    (3, 2, 4, 4250, TransactionStatus::Received),
    (4, 1, 2, 1500, TransactionStatus::Received),
    (0, 2, 1, 2750, TransactionStatus::Washing),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./laundry_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Laundry Shop Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./laundry_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Laundry Shop Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    if db.has_records().await? {
        println!("⚠ Database already has data");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating data...");
    let start = std::time::Instant::now();

    let mut services = Vec::with_capacity(SERVICES.len());
    for (name, price) in SERVICES {
        let service = db
            .services()
            .create(&NewService {
                name: name.to_string(),
                price_per_kg: Money::from_major(*price),
            })
            .await?;
        services.push(service);
    }
    println!("  {} services", services.len());

    let mut employees = Vec::with_capacity(EMPLOYEES.len());
    for (name, username) in EMPLOYEES {
        let employee = db
            .employees()
            .create(&NewEmployee {
                name: name.to_string(),
                username: username.to_string(),
                password: SEED_PASSWORD.to_string(),
            })
            .await?;
        employees.push(employee);
    }
    println!("  {} employees (password: {})", employees.len(), SEED_PASSWORD);

    let mut customers = Vec::with_capacity(CUSTOMERS.len());
    for (name, address, phone) in CUSTOMERS {
        let customer = db
            .customers()
            .create(&NewCustomer {
                name: name.to_string(),
                address: address.to_string(),
                phone_number: phone.to_string(),
            })
            .await?;
        customers.push(customer);
    }
    println!("  {} customers", customers.len());

    let mut generated = 0;
    for (customer, employee, service, grams, status) in TRANSACTIONS {
        let weight = Weight::from_grams(*grams);
        let total = laundry_core::pricing::quote(services[*service].price(), weight)?;
        // Round the payment up to the next 5000 so most loads get change back
        let step = Money::from_major(5000).minor();
        let paid = Money::from_minor((total.minor() + step - 1) / step * step);

        let form = NewTransaction {
            customer_id: customers[*customer].id.clone(),
            employee_id: employees[*employee].id.clone(),
            service_id: services[*service].id.clone(),
            weight,
            paid,
        };

        let transaction = match db.transactions().create(&form).await {
            Ok(t) => t,
            Err(e) => {
                eprintln!("Failed to insert transaction for {}: {}", customers[*customer].name, e);
                continue;
            }
        };

        db.transactions().update_status(&transaction.id, *status).await?;
        generated += 1;
    }
    println!("  {} transactions", generated);

    println!();
    println!("✓ Seed complete in {:?}", start.elapsed());

    Ok(())
}
