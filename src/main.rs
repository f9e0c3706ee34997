use anyhow::{bail, Result};
use std::env;
use std::path::Path;

use tuition_ledger::{
    list_bank_accounts, list_courses, list_installments, list_payments, list_products,
    list_students, list_teachers, open_database, setup_database, EntityKind, Sheet,
};

const DEFAULT_DB: &str = "tuition.db";

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("init") => run_init(args.get(2).map(|s| s.as_str()).unwrap_or(DEFAULT_DB)),
        Some("import") => {
            let (entity, file) = match (args.get(2), args.get(3)) {
                (Some(entity), Some(file)) => (entity.as_str(), file.as_str()),
                _ => {
                    print_usage();
                    std::process::exit(2);
                }
            };
            let db = args.get(4).map(|s| s.as_str()).unwrap_or(DEFAULT_DB);
            run_import(entity, file, db)
        }
        Some("list") => {
            let entity = match args.get(2) {
                Some(entity) => entity.as_str(),
                None => {
                    print_usage();
                    std::process::exit(2);
                }
            };
            let db = args.get(3).map(|s| s.as_str()).unwrap_or(DEFAULT_DB);
            run_list(entity, db)
        }
        _ => {
            print_usage();
            std::process::exit(2);
        }
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  tuition-ledger init [db]");
    eprintln!("  tuition-ledger import <entity> <file.csv> [db]");
    eprintln!("  tuition-ledger list <entity> [db]");
    eprintln!();
    eprintln!("Entities:");
    for kind in EntityKind::ALL {
        eprintln!("  {}", kind);
    }
}

fn run_init(db: &str) -> Result<()> {
    let conn = open_database(Path::new(db))?;
    setup_database(&conn)?;
    println!("✓ Database initialized at {}", db);
    Ok(())
}

fn run_import(entity: &str, file: &str, db: &str) -> Result<()> {
    let kind: EntityKind = entity.parse()?;

    let conn = open_database(Path::new(db))?;
    setup_database(&conn)?;

    println!("Importing {} rows from {}...", kind, file);
    let outcome = match Sheet::from_path(Path::new(file)) {
        Ok(sheet) => tuition_ledger::reconcile(&conn, kind, &sheet),
        Err(e) => tuition_ledger::ImportOutcome::failure(format!("{:#}", e)),
    };

    if outcome.success {
        println!("✓ {}", outcome.message);
        Ok(())
    } else {
        eprintln!("✗ {}", outcome.message);
        std::process::exit(1);
    }
}

fn run_list(entity: &str, db: &str) -> Result<()> {
    let kind: EntityKind = entity.parse()?;

    let conn = open_database(Path::new(db))?;
    setup_database(&conn)?;

    let json = match kind {
        EntityKind::Payment => serde_json::to_string_pretty(&list_payments(&conn)?)?,
        EntityKind::Student => serde_json::to_string_pretty(&list_students(&conn)?)?,
        EntityKind::Teacher => serde_json::to_string_pretty(&list_teachers(&conn)?)?,
        EntityKind::Course => serde_json::to_string_pretty(&list_courses(&conn)?)?,
        EntityKind::Product => serde_json::to_string_pretty(&list_products(&conn)?)?,
        EntityKind::BankAccount => serde_json::to_string_pretty(&list_bank_accounts(&conn)?)?,
        EntityKind::Installment => serde_json::to_string_pretty(&list_installments(&conn)?)?,
        other => bail!("No list view for entity type: {}", other),
    };
    println!("{}", json);
    Ok(())
}
