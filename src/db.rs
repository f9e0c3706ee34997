use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

/// Open (or create) a file-backed database with WAL enabled.
pub fn open_database(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open database at {:?}", path))?;

    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    Ok(conn)
}

/// Create every table and index. Safe to call repeatedly.
pub fn setup_database(conn: &Connection) -> Result<()> {
    // ==========================================================================
    // People and their roles
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS people (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            national_id TEXT NOT NULL UNIQUE
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            person INTEGER NOT NULL REFERENCES people(id),
            name TEXT NOT NULL,
            national_id TEXT NOT NULL UNIQUE
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS teachers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            person INTEGER NOT NULL REFERENCES people(id),
            name TEXT NOT NULL,
            national_id TEXT NOT NULL UNIQUE
        )",
        [],
    )?;

    // ==========================================================================
    // Payment reference data
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS bank_accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            bank_number TEXT NOT NULL UNIQUE,
            description TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS payment_methods (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS payment_types (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS statuses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS payment_categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            type TEXT
        )",
        [],
    )?;

    // ==========================================================================
    // Payments
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS payments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            amount REAL NOT NULL,
            datetime TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            related_person INTEGER REFERENCES people(id),
            payment_method INTEGER REFERENCES payment_methods(id),
            status INTEGER REFERENCES statuses(id),
            info_text TEXT,
            category INTEGER REFERENCES payment_categories(id),
            payment_type INTEGER NOT NULL REFERENCES payment_types(id),
            related_bank_account INTEGER REFERENCES bank_accounts(id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS payment_files (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            payment INTEGER NOT NULL REFERENCES payments(id),
            file TEXT NOT NULL
        )",
        [],
    )?;

    // ==========================================================================
    // Courses and products
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS olympiads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT,
            amount REAL,
            teacher INTEGER NOT NULL REFERENCES teachers(id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS courses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            session_time TEXT,
            start_date TEXT,
            end_date TEXT,
            teacher INTEGER NOT NULL REFERENCES teachers(id),
            olympiad INTEGER REFERENCES olympiads(id)
        )",
        [],
    )?;

    // ==========================================================================
    // Agreements and installments
    // ==========================================================================
    conn.execute(
        "CREATE TABLE IF NOT EXISTS student_agreements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student INTEGER NOT NULL REFERENCES students(id),
            course INTEGER NOT NULL REFERENCES courses(id),
            agreement_date TEXT NOT NULL DEFAULT CURRENT_DATE,
            amount REAL,
            attrs TEXT
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS teacher_agreements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            teacher INTEGER NOT NULL REFERENCES teachers(id),
            product INTEGER NOT NULL REFERENCES products(id),
            agreement_date TEXT NOT NULL DEFAULT CURRENT_DATE,
            amount REAL,
            attrs TEXT
        )",
        [],
    )?;

    // One payment agreement per student/teacher agreement
    conn.execute(
        "CREATE TABLE IF NOT EXISTS payment_agreements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_agreement INTEGER UNIQUE REFERENCES student_agreements(id),
            teacher_agreement INTEGER UNIQUE REFERENCES teacher_agreements(id),
            payment_direction TEXT NOT NULL DEFAULT 'in',
            total_amount INTEGER
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS installment_statuses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS installments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            payment_agreement INTEGER NOT NULL REFERENCES payment_agreements(id),
            amount REAL NOT NULL,
            due_date TEXT NOT NULL,
            received_date TEXT,
            status INTEGER REFERENCES installment_statuses(id)
        )",
        [],
    )?;

    // ==========================================================================
    // Indexes
    // ==========================================================================
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_payments_name ON payments(name)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_payments_datetime ON payments(datetime)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_payments_category ON payments(category)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_payments_status ON payments(status)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_payments_person ON payments(related_person)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_payments_bank_account ON payments(related_bank_account)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_courses_teacher ON courses(teacher)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_products_teacher ON products(teacher)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_installments_agreement ON installments(payment_agreement)",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get::<_, String>(0))
            .unwrap()
            .map(|r| r.unwrap())
            .collect()
    }

    #[test]
    fn test_setup_creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();

        let names = table_names(&conn);
        for table in [
            "people",
            "students",
            "teachers",
            "bank_accounts",
            "payment_methods",
            "payment_types",
            "statuses",
            "payment_categories",
            "payments",
            "payment_files",
            "olympiads",
            "products",
            "courses",
            "student_agreements",
            "teacher_agreements",
            "payment_agreements",
            "installment_statuses",
            "installments",
        ] {
            assert!(names.iter().any(|n| n == table), "missing table {}", table);
        }
    }

    #[test]
    fn test_setup_is_repeatable() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();
        setup_database(&conn).unwrap();
    }

    #[test]
    fn test_national_id_is_unique() {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();

        conn.execute(
            "INSERT INTO people (name, national_id) VALUES ('Ada', '100')",
            [],
        )
        .unwrap();
        let dup = conn.execute(
            "INSERT INTO people (name, national_id) VALUES ('Other Ada', '100')",
            [],
        );
        assert!(dup.is_err());
    }
}
