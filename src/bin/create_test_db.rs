use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use time::OffsetDateTime;

use budget_items::{
    ItemTable, Month, NewItem, Scope, initialize_db,
    stores::{ItemStore, sqlite::SQLiteItemStore},
};

/// A utility for creating a test database for the budget_items server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The user to create preferences for.
    #[arg(long, short)]
    user: String,
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

    println!("Creating accounts...");
    conn.execute(
        "INSERT INTO account (id, name) VALUES (1, 'Everyday'), (2, 'Savings')",
        (),
    )?;

    let today = OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date();
    let this_month = Month::from(today.month());
    let last_month = Month::from(today.month().previous());
    let last_month_year = if this_month == Month::January {
        today.year() - 1
    } else {
        today.year()
    };

    println!(
        "Creating preferences for {} ({} {})...",
        args.user,
        this_month,
        today.year()
    );
    conn.execute(
        "INSERT INTO preferences (user, current_month, current_year, current_account)
        VALUES (?1, ?2, ?3, 1)",
        (&args.user, this_month.name(), today.year()),
    )?;

    println!("Creating budget items and transactions...");
    let store = SQLiteItemStore::new(Arc::new(Mutex::new(conn)));
    let scope = |account, year, month: Month| Scope {
        account: Some(account),
        year,
        month: month.to_string(),
    };

    let this_scope = scope(1, today.year(), this_month);
    for (name, amount) in [
        ("Rent", 450.0),
        ("Groceries", 160.0),
        ("Power", 45.5),
        ("Internet", 19.99),
    ] {
        store.create(
            ItemTable::BudgetItems,
            NewItem::build(name, amount, this_scope.clone()),
        )?;
    }
    store.create(
        ItemTable::BudgetItems,
        NewItem::build("Gym (cancelled)", 30.0, this_scope.clone()).rank(-1),
    )?;

    for (name, amount) in [
        ("Supermarket", 82.37),
        ("Coffee", 4.5),
        ("Power bill", 47.12),
    ] {
        store.create(
            ItemTable::Transactions,
            NewItem::build(name, amount, this_scope.clone()),
        )?;
    }

    let last_scope = scope(1, last_month_year, last_month);
    for (name, amount) in [("Rent", 450.0), ("Groceries", 150.0)] {
        store.create(
            ItemTable::BudgetItems,
            NewItem::build(name, amount, last_scope.clone()),
        )?;
    }
    store.create(
        ItemTable::Transactions,
        NewItem::build("Supermarket", 143.9, last_scope),
    )?;

    store.create(
        ItemTable::BudgetItems,
        NewItem::build("Emergency fund", 100.0, scope(2, today.year(), this_month)),
    )?;

    println!("Success!");

    Ok(())
}
