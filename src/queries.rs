use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

// ============================================================================
// PAYMENTS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PaymentRow {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub datetime: String,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub category: Option<String>,
    pub payment_type: String,
    pub related_person: Option<String>,
    pub related_bank_account: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentDetail {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub datetime: String,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub category: Option<String>,
    pub payment_type: String,
    pub related_person: Option<String>,
    pub related_bank_account: Option<String>,
    pub info_text: Option<String>,
}

const PAYMENT_SELECT: &str = "\
    SELECT p.id, p.name, p.amount, p.datetime,
           s.title, m.title, c.name, t.title, per.name, b.name, p.info_text
    FROM payments p
    LEFT JOIN statuses s ON s.id = p.status
    LEFT JOIN payment_methods m ON m.id = p.payment_method
    LEFT JOIN payment_categories c ON c.id = p.category
    JOIN payment_types t ON t.id = p.payment_type
    LEFT JOIN people per ON per.id = p.related_person
    LEFT JOIN bank_accounts b ON b.id = p.related_bank_account";

fn payment_detail_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PaymentDetail> {
    Ok(PaymentDetail {
        id: row.get(0)?,
        name: row.get(1)?,
        amount: row.get(2)?,
        datetime: row.get(3)?,
        status: row.get(4)?,
        payment_method: row.get(5)?,
        category: row.get(6)?,
        payment_type: row.get(7)?,
        related_person: row.get(8)?,
        related_bank_account: row.get(9)?,
        info_text: row.get(10)?,
    })
}

fn payment_row_from_detail(detail: PaymentDetail) -> PaymentRow {
    PaymentRow {
        id: detail.id,
        name: detail.name,
        amount: detail.amount,
        datetime: detail.datetime,
        status: detail.status,
        payment_method: detail.payment_method,
        category: detail.category,
        payment_type: detail.payment_type,
        related_person: detail.related_person,
        related_bank_account: detail.related_bank_account,
    }
}

pub fn list_payments(conn: &Connection) -> Result<Vec<PaymentRow>> {
    filter_payments(conn, None, None)
}

/// Payments restricted by optional category and status identifiers.
pub fn filter_payments(
    conn: &Connection,
    category_id: Option<i64>,
    status_id: Option<i64>,
) -> Result<Vec<PaymentRow>> {
    let mut sql = format!("{} WHERE 1 = 1", PAYMENT_SELECT);
    let mut bound: Vec<i64> = Vec::new();
    if let Some(category_id) = category_id {
        bound.push(category_id);
        sql.push_str(&format!(" AND p.category = ?{}", bound.len()));
    }
    if let Some(status_id) = status_id {
        bound.push(status_id);
        sql.push_str(&format!(" AND p.status = ?{}", bound.len()));
    }
    sql.push_str(" ORDER BY p.id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params_from_iter(bound.iter()), payment_detail_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows.into_iter().map(payment_row_from_detail).collect())
}

pub fn payment_detail(conn: &Connection, payment_id: i64) -> Result<Option<PaymentDetail>> {
    let sql = format!("{} WHERE p.id = ?1", PAYMENT_SELECT);
    Ok(conn
        .query_row(&sql, params![payment_id], payment_detail_from_row)
        .optional()?)
}

// ============================================================================
// PAYMENTS LISTED UNDER A PERSON OR ACCOUNT
// ============================================================================

/// Payment as shown on a student/teacher page.
#[derive(Debug, Clone, Serialize)]
pub struct PersonPayment {
    pub name: String,
    pub amount: f64,
    pub datetime: String,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub category: Option<String>,
    pub payment_type: String,
    pub related_bank_account: Option<String>,
}

/// Payment as shown on a bank-account page.
#[derive(Debug, Clone, Serialize)]
pub struct AccountPayment {
    pub name: String,
    pub amount: f64,
    pub datetime: String,
    pub status: Option<String>,
    pub payment_method: Option<String>,
    pub category: Option<String>,
    pub payment_type: String,
    pub related_person: Option<String>,
}

fn payments_for_person(conn: &Connection, person_id: i64) -> Result<Vec<PersonPayment>> {
    let sql = format!("{} WHERE p.related_person = ?1 ORDER BY p.id", PAYMENT_SELECT);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![person_id], payment_detail_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows
        .into_iter()
        .map(|p| PersonPayment {
            name: p.name,
            amount: p.amount,
            datetime: p.datetime,
            status: p.status,
            payment_method: p.payment_method,
            category: p.category,
            payment_type: p.payment_type,
            related_bank_account: p.related_bank_account,
        })
        .collect())
}

fn payments_for_bank_account(conn: &Connection, account_id: i64) -> Result<Vec<AccountPayment>> {
    let sql = format!("{} WHERE p.related_bank_account = ?1 ORDER BY p.id", PAYMENT_SELECT);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![account_id], payment_detail_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows
        .into_iter()
        .map(|p| AccountPayment {
            name: p.name,
            amount: p.amount,
            datetime: p.datetime,
            status: p.status,
            payment_method: p.payment_method,
            category: p.category,
            payment_type: p.payment_type,
            related_person: p.related_person,
        })
        .collect())
}

// ============================================================================
// STUDENTS AND TEACHERS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PersonRow {
    pub id: i64,
    pub name: String,
    pub national_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentDetail {
    pub name: String,
    pub national_id: String,
    pub payments: Vec<PersonPayment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeacherDetail {
    pub name: String,
    pub national_id: String,
    pub payments: Vec<PersonPayment>,
    pub courses: Vec<CourseSummary>,
    pub products: Vec<ProductSummary>,
}

pub fn list_students(conn: &Connection) -> Result<Vec<PersonRow>> {
    list_person_rows(conn, "students")
}

pub fn list_teachers(conn: &Connection) -> Result<Vec<PersonRow>> {
    list_person_rows(conn, "teachers")
}

fn list_person_rows(conn: &Connection, table: &str) -> Result<Vec<PersonRow>> {
    let mut stmt =
        conn.prepare(&format!("SELECT id, name, national_id FROM {} ORDER BY id", table))?;
    let rows = stmt
        .query_map([], |r| {
            Ok(PersonRow {
                id: r.get(0)?,
                name: r.get(1)?,
                national_id: r.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn student_detail(conn: &Connection, student_id: i64) -> Result<Option<StudentDetail>> {
    let found: Option<(String, String, i64)> = conn
        .query_row(
            "SELECT name, national_id, person FROM students WHERE id = ?1",
            params![student_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .optional()?;

    let (name, national_id, person) = match found {
        Some(row) => row,
        None => return Ok(None),
    };

    Ok(Some(StudentDetail {
        name,
        national_id,
        payments: payments_for_person(conn, person)?,
    }))
}

pub fn teacher_detail(conn: &Connection, teacher_id: i64) -> Result<Option<TeacherDetail>> {
    let found: Option<(String, String, i64)> = conn
        .query_row(
            "SELECT name, national_id, person FROM teachers WHERE id = ?1",
            params![teacher_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .optional()?;

    let (name, national_id, person) = match found {
        Some(row) => row,
        None => return Ok(None),
    };

    Ok(Some(TeacherDetail {
        name,
        national_id,
        payments: payments_for_person(conn, person)?,
        courses: courses_for_teacher(conn, teacher_id)?,
        products: products_for_teacher(conn, teacher_id)?,
    }))
}

// ============================================================================
// COURSES AND PRODUCTS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CourseRow {
    pub id: i64,
    pub title: String,
    pub session_time: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub teacher: String,
    pub olympiad: Option<String>,
}

/// Course as listed under a teacher or product.
#[derive(Debug, Clone, Serialize)]
pub struct CourseSummary {
    pub title: String,
    pub session_time: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub olympiad: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    pub title: String,
    pub session_time: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub teacher: String,
    pub olympiad: Option<String>,
    pub products: Vec<ProductSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductRow {
    pub id: i64,
    pub title: String,
    pub amount: Option<f64>,
    pub teacher: String,
}

/// Product as listed under a teacher or course.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub title: String,
    pub amount: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    pub title: String,
    pub amount: Option<f64>,
    pub teacher: String,
    pub courses: Vec<CourseSummary>,
}

pub fn list_courses(conn: &Connection) -> Result<Vec<CourseRow>> {
    let mut stmt = conn.prepare(
        "SELECT c.id, c.title, c.session_time, c.start_date, c.end_date, t.name, o.title
         FROM courses c
         JOIN teachers t ON t.id = c.teacher
         LEFT JOIN olympiads o ON o.id = c.olympiad
         ORDER BY c.id",
    )?;
    let rows = stmt
        .query_map([], |r| {
            Ok(CourseRow {
                id: r.get(0)?,
                title: r.get(1)?,
                session_time: r.get(2)?,
                start_date: r.get(3)?,
                end_date: r.get(4)?,
                teacher: r.get(5)?,
                olympiad: r.get(6)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn course_detail(conn: &Connection, course_id: i64) -> Result<Option<CourseDetail>> {
    let found: Option<(String, Option<String>, Option<String>, Option<String>, i64, String, Option<String>)> =
        conn.query_row(
            "SELECT c.title, c.session_time, c.start_date, c.end_date, c.teacher, t.name, o.title
             FROM courses c
             JOIN teachers t ON t.id = c.teacher
             LEFT JOIN olympiads o ON o.id = c.olympiad
             WHERE c.id = ?1",
            params![course_id],
            |r| {
                Ok((
                    r.get(0)?,
                    r.get(1)?,
                    r.get(2)?,
                    r.get(3)?,
                    r.get(4)?,
                    r.get(5)?,
                    r.get(6)?,
                ))
            },
        )
        .optional()?;

    let (title, session_time, start_date, end_date, teacher_id, teacher, olympiad) = match found {
        Some(row) => row,
        None => return Ok(None),
    };

    Ok(Some(CourseDetail {
        title,
        session_time,
        start_date,
        end_date,
        teacher,
        olympiad,
        products: products_for_teacher(conn, teacher_id)?,
    }))
}

pub fn list_products(conn: &Connection) -> Result<Vec<ProductRow>> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.title, p.amount, t.name
         FROM products p
         JOIN teachers t ON t.id = p.teacher
         ORDER BY p.id",
    )?;
    let rows = stmt
        .query_map([], |r| {
            Ok(ProductRow {
                id: r.get(0)?,
                title: r.get(1)?,
                amount: r.get(2)?,
                teacher: r.get(3)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn product_detail(conn: &Connection, product_id: i64) -> Result<Option<ProductDetail>> {
    let found: Option<(String, Option<f64>, i64, String)> = conn
        .query_row(
            "SELECT p.title, p.amount, p.teacher, t.name
             FROM products p
             JOIN teachers t ON t.id = p.teacher
             WHERE p.id = ?1",
            params![product_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
        )
        .optional()?;

    let (title, amount, teacher_id, teacher) = match found {
        Some(row) => row,
        None => return Ok(None),
    };

    Ok(Some(ProductDetail {
        title,
        amount,
        teacher,
        courses: courses_for_teacher(conn, teacher_id)?,
    }))
}

fn courses_for_teacher(conn: &Connection, teacher_id: i64) -> Result<Vec<CourseSummary>> {
    let mut stmt = conn.prepare(
        "SELECT c.title, c.session_time, c.start_date, c.end_date, o.title
         FROM courses c
         LEFT JOIN olympiads o ON o.id = c.olympiad
         WHERE c.teacher = ?1
         ORDER BY c.id",
    )?;
    let rows = stmt
        .query_map(params![teacher_id], |r| {
            Ok(CourseSummary {
                title: r.get(0)?,
                session_time: r.get(1)?,
                start_date: r.get(2)?,
                end_date: r.get(3)?,
                olympiad: r.get(4)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

fn products_for_teacher(conn: &Connection, teacher_id: i64) -> Result<Vec<ProductSummary>> {
    let mut stmt = conn.prepare(
        "SELECT title, amount, description FROM products WHERE teacher = ?1 ORDER BY id",
    )?;
    let rows = stmt
        .query_map(params![teacher_id], |r| {
            Ok(ProductSummary {
                title: r.get(0)?,
                amount: r.get(1)?,
                description: r.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

// ============================================================================
// BANK ACCOUNTS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct BankAccountRow {
    pub id: i64,
    pub name: String,
    pub bank_number: String,
    pub payments: Vec<AccountPayment>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BankAccountDetail {
    pub name: String,
    pub bank_number: String,
    pub payments: Vec<AccountPayment>,
}

pub fn list_bank_accounts(conn: &Connection) -> Result<Vec<BankAccountRow>> {
    let mut stmt =
        conn.prepare("SELECT id, name, bank_number FROM bank_accounts ORDER BY id")?;
    let accounts = stmt
        .query_map([], |r| {
            Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?, r.get::<_, String>(2)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut rows = Vec::with_capacity(accounts.len());
    for (id, name, bank_number) in accounts {
        rows.push(BankAccountRow {
            id,
            name,
            bank_number,
            payments: payments_for_bank_account(conn, id)?,
        });
    }
    Ok(rows)
}

pub fn bank_account_detail(conn: &Connection, account_id: i64) -> Result<Option<BankAccountDetail>> {
    let found: Option<(String, String)> = conn
        .query_row(
            "SELECT name, bank_number FROM bank_accounts WHERE id = ?1",
            params![account_id],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;

    let (name, bank_number) = match found {
        Some(row) => row,
        None => return Ok(None),
    };

    Ok(Some(BankAccountDetail {
        name,
        bank_number,
        payments: payments_for_bank_account(conn, account_id)?,
    }))
}

// ============================================================================
// INSTALLMENTS
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct InstallmentRow {
    pub id: i64,
    pub amount: f64,
    pub due_date: String,
    pub received_date: Option<String>,
    pub status: Option<String>,
    pub payment_agreement: i64,
}

pub fn list_installments(conn: &Connection) -> Result<Vec<InstallmentRow>> {
    let mut stmt = conn.prepare(
        "SELECT i.id, i.amount, i.due_date, i.received_date, s.title, i.payment_agreement
         FROM installments i
         LEFT JOIN installment_statuses s ON s.id = i.status
         ORDER BY i.id",
    )?;
    let rows = stmt
        .query_map([], installment_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

pub fn installment_detail(conn: &Connection, installment_id: i64) -> Result<Option<InstallmentRow>> {
    Ok(conn
        .query_row(
            "SELECT i.id, i.amount, i.due_date, i.received_date, s.title, i.payment_agreement
             FROM installments i
             LEFT JOIN installment_statuses s ON s.id = i.status
             WHERE i.id = ?1",
            params![installment_id],
            installment_from_row,
        )
        .optional()?)
}

fn installment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<InstallmentRow> {
    Ok(InstallmentRow {
        id: row.get(0)?,
        amount: row.get(1)?,
        due_date: row.get(2)?,
        received_date: row.get(3)?,
        status: row.get(4)?,
        payment_agreement: row.get(5)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::setup_database;

    /// Small seeded world: two people, one of each role, a category/status/
    /// method/type, one payment, a course, a product, an installment chain.
    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        setup_database(&conn).unwrap();

        conn.execute_batch(
            "INSERT INTO people (name, national_id) VALUES ('Ada', '111'), ('Emmy', '222');
             INSERT INTO students (person, name, national_id) VALUES (1, 'Ada', '111');
             INSERT INTO teachers (person, name, national_id) VALUES (2, 'Emmy', '222');
             INSERT INTO bank_accounts (name, bank_number) VALUES ('Main', '4242');
             INSERT INTO payment_methods (title) VALUES ('cash');
             INSERT INTO payment_types (title) VALUES ('tuition');
             INSERT INTO statuses (title) VALUES ('pending');
             INSERT INTO payment_categories (name) VALUES ('fees');
             INSERT INTO payments
                 (name, amount, related_person, payment_method, status, category,
                  payment_type, related_bank_account)
                 VALUES ('Fee', 50.0, 1, 1, 1, 1, 1, 1);
             INSERT INTO olympiads (title) VALUES ('Regional');
             INSERT INTO courses (title, session_time, teacher, olympiad)
                 VALUES ('Algebra', '16:30:00', 1, 1);
             INSERT INTO products (title, amount, teacher) VALUES ('Tutoring', 80.0, 1);
             INSERT INTO student_agreements (student, course) VALUES (1, 1);
             INSERT INTO payment_agreements (student_agreement) VALUES (1);
             INSERT INTO installment_statuses (title) VALUES ('due');
             INSERT INTO installments (payment_agreement, amount, due_date, status)
                 VALUES (1, 25.0, '2026-09-01 00:00:00', 1);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_payment_list_resolves_titles() {
        let conn = seeded();
        let payments = list_payments(&conn).unwrap();
        assert_eq!(payments.len(), 1);

        let p = &payments[0];
        assert_eq!(p.name, "Fee");
        assert_eq!(p.payment_type, "tuition");
        assert_eq!(p.status.as_deref(), Some("pending"));
        assert_eq!(p.related_person.as_deref(), Some("Ada"));
        assert_eq!(p.related_bank_account.as_deref(), Some("Main"));
    }

    #[test]
    fn test_payment_with_dangling_references_lists_nulls() {
        let conn = seeded();
        conn.execute(
            "INSERT INTO payments (name, amount, payment_type) VALUES ('Bare', 10.0, 1)",
            [],
        )
        .unwrap();

        let payments = list_payments(&conn).unwrap();
        let bare = payments.iter().find(|p| p.name == "Bare").unwrap();
        assert_eq!(bare.status, None);
        assert_eq!(bare.related_person, None);
    }

    #[test]
    fn test_filter_payments_by_category_and_status() {
        let conn = seeded();
        conn.execute("INSERT INTO payment_categories (name) VALUES ('books')", []).unwrap();
        conn.execute(
            "INSERT INTO payments (name, amount, category, payment_type) VALUES ('Book', 15.0, 2, 1)",
            [],
        )
        .unwrap();

        assert_eq!(filter_payments(&conn, Some(1), None).unwrap().len(), 1);
        assert_eq!(filter_payments(&conn, Some(2), None).unwrap().len(), 1);
        assert_eq!(filter_payments(&conn, None, Some(1)).unwrap().len(), 1);
        assert_eq!(filter_payments(&conn, None, None).unwrap().len(), 2);
        assert_eq!(filter_payments(&conn, Some(2), Some(1)).unwrap().len(), 0);
    }

    #[test]
    fn test_payment_detail_includes_info_text() {
        let conn = seeded();
        conn.execute("UPDATE payments SET info_text = 'wired' WHERE id = 1", []).unwrap();

        let detail = payment_detail(&conn, 1).unwrap().unwrap();
        assert_eq!(detail.info_text.as_deref(), Some("wired"));
        assert!(payment_detail(&conn, 99).unwrap().is_none());
    }

    #[test]
    fn test_student_detail_lists_person_payments() {
        let conn = seeded();
        let detail = student_detail(&conn, 1).unwrap().unwrap();
        assert_eq!(detail.name, "Ada");
        assert_eq!(detail.payments.len(), 1);
        assert_eq!(detail.payments[0].name, "Fee");
        assert!(student_detail(&conn, 99).unwrap().is_none());
    }

    #[test]
    fn test_teacher_detail_lists_courses_and_products() {
        let conn = seeded();
        let detail = teacher_detail(&conn, 1).unwrap().unwrap();
        assert_eq!(detail.name, "Emmy");
        assert_eq!(detail.courses.len(), 1);
        assert_eq!(detail.courses[0].title, "Algebra");
        assert_eq!(detail.products.len(), 1);
        // the payment belongs to Ada's person, not Emmy's
        assert!(detail.payments.is_empty());
    }

    #[test]
    fn test_course_list_and_detail() {
        let conn = seeded();
        let courses = list_courses(&conn).unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].teacher, "Emmy");
        assert_eq!(courses[0].olympiad.as_deref(), Some("Regional"));

        let detail = course_detail(&conn, 1).unwrap().unwrap();
        assert_eq!(detail.products.len(), 1);
        assert_eq!(detail.products[0].title, "Tutoring");
        assert!(course_detail(&conn, 99).unwrap().is_none());
    }

    #[test]
    fn test_product_detail_lists_teacher_courses() {
        let conn = seeded();
        let detail = product_detail(&conn, 1).unwrap().unwrap();
        assert_eq!(detail.teacher, "Emmy");
        assert_eq!(detail.courses.len(), 1);
        assert_eq!(detail.courses[0].title, "Algebra");
    }

    #[test]
    fn test_bank_accounts_carry_their_payments() {
        let conn = seeded();
        let accounts = list_bank_accounts(&conn).unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].payments.len(), 1);
        assert_eq!(accounts[0].payments[0].related_person.as_deref(), Some("Ada"));

        let detail = bank_account_detail(&conn, 1).unwrap().unwrap();
        assert_eq!(detail.bank_number, "4242");
        assert_eq!(detail.payments.len(), 1);
    }

    #[test]
    fn test_installments_resolve_status_title() {
        let conn = seeded();
        let rows = list_installments(&conn).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status.as_deref(), Some("due"));
        assert_eq!(rows[0].payment_agreement, 1);

        let detail = installment_detail(&conn, 1).unwrap().unwrap();
        assert_eq!(detail.amount, 25.0);
        assert!(installment_detail(&conn, 99).unwrap().is_none());
    }

    #[test]
    fn test_rows_serialize_to_json() {
        let conn = seeded();
        let payments = list_payments(&conn).unwrap();
        let json = serde_json::to_value(&payments).unwrap();
        assert_eq!(json[0]["payment_type"], "tuition");
        assert_eq!(json[0]["related_person"], "Ada");
    }
}
