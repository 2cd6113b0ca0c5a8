// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use crate::models::{Business, Cashbook, Category, Staff, Transaction};
use crate::store::Store;
use anyhow::Context;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Cashbook", "cashbook"));

pub fn default_db_path() -> anyhow::Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("cashbook.sqlite"))
}

/// [`Store`] backed by a SQLite database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "opening sqlite store");
        let mut conn = Connection::open(path)?;
        init_schema(&mut conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        init_schema(&mut conn)?;
        Ok(Self { conn })
    }
}

fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS businesses(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        name TEXT NOT NULL,
        tax_id TEXT,
        address TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS cashbooks(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        business_id TEXT NOT NULL,
        name TEXT NOT NULL,
        default_mode TEXT NOT NULL,
        opening_balance TEXT NOT NULL DEFAULT '0',
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(business_id) REFERENCES businesses(id)
    );

    CREATE TABLE IF NOT EXISTS categories(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        business_id TEXT NOT NULL,
        name TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        FOREIGN KEY(business_id) REFERENCES businesses(id)
    );

    CREATE TABLE IF NOT EXISTS staff(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        business_id TEXT NOT NULL,
        name TEXT NOT NULL,
        role TEXT NOT NULL CHECK(role IN ('staff','manager')),
        phone TEXT,
        FOREIGN KEY(business_id) REFERENCES businesses(id)
    );

    CREATE TABLE IF NOT EXISTS transactions(
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        cashbook_id TEXT NOT NULL,
        date TEXT NOT NULL,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        mode TEXT NOT NULL,
        amount TEXT NOT NULL,
        party TEXT,
        category_id TEXT,
        note TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(cashbook_id) REFERENCES cashbooks(id),
        FOREIGN KEY(category_id) REFERENCES categories(id)
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_cashbook ON transactions(cashbook_id);
    "#,
    )?;
    Ok(())
}

// Text columns holding enums, dates and decimals.
fn parse_col<T>(r: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = r.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn business_from_row(r: &Row) -> rusqlite::Result<Business> {
    Ok(Business {
        id: r.get(0)?,
        name: r.get(1)?,
        tax_id: r.get(2)?,
        address: r.get(3)?,
    })
}

fn cashbook_from_row(r: &Row) -> rusqlite::Result<Cashbook> {
    Ok(Cashbook {
        id: r.get(0)?,
        business_id: r.get(1)?,
        name: r.get(2)?,
        default_mode: parse_col(r, 3)?,
        opening_balance: parse_col(r, 4)?,
    })
}

fn category_from_row(r: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: r.get(0)?,
        business_id: r.get(1)?,
        name: r.get(2)?,
        tx_type: parse_col(r, 3)?,
    })
}

fn staff_from_row(r: &Row) -> rusqlite::Result<Staff> {
    Ok(Staff {
        id: r.get(0)?,
        business_id: r.get(1)?,
        name: r.get(2)?,
        role: parse_col(r, 3)?,
        phone: r.get(4)?,
    })
}

fn transaction_from_row(r: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        cashbook_id: r.get(1)?,
        date: parse_col(r, 2)?,
        tx_type: parse_col(r, 3)?,
        mode: parse_col(r, 4)?,
        amount: parse_col(r, 5)?,
        party: r.get(6)?,
        category_id: r.get(7)?,
        note: r.get(8)?,
    })
}

const CASHBOOK_COLS: &str = "id, business_id, name, default_mode, opening_balance";
const CATEGORY_COLS: &str = "id, business_id, name, type";
const TRANSACTION_COLS: &str =
    "id, cashbook_id, date, type, mode, amount, party, category_id, note";

fn insert_cashbook_row(conn: &Connection, c: &Cashbook) -> Result<()> {
    conn.execute(
        "INSERT INTO cashbooks(id, business_id, name, default_mode, opening_balance)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            c.id,
            c.business_id,
            c.name,
            c.default_mode.as_key(),
            c.opening_balance.to_string()
        ],
    )?;
    Ok(())
}

impl Store for SqliteStore {
    fn insert_business(&mut self, b: &Business, first_cashbook: &Cashbook) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO businesses(id, name, tax_id, address) VALUES (?1, ?2, ?3, ?4)",
            params![b.id, b.name, b.tax_id, b.address],
        )?;
        insert_cashbook_row(&tx, first_cashbook)?;
        tx.commit()?;
        Ok(())
    }

    fn businesses(&self) -> Result<Vec<Business>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, tax_id, address FROM businesses ORDER BY seq")?;
        let rows = stmt.query_map([], business_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn business(&self, id: &str) -> Result<Option<Business>> {
        Ok(self
            .conn
            .query_row(
                "SELECT id, name, tax_id, address FROM businesses WHERE id=?1",
                params![id],
                business_from_row,
            )
            .optional()?)
    }

    fn insert_cashbook(&mut self, c: &Cashbook) -> Result<()> {
        insert_cashbook_row(&self.conn, c)
    }

    fn cashbooks(&self, business_id: &str) -> Result<Vec<Cashbook>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CASHBOOK_COLS} FROM cashbooks WHERE business_id=?1 ORDER BY seq"
        ))?;
        let rows = stmt.query_map(params![business_id], cashbook_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn cashbook(&self, id: &str) -> Result<Option<Cashbook>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {CASHBOOK_COLS} FROM cashbooks WHERE id=?1"),
                params![id],
                cashbook_from_row,
            )
            .optional()?)
    }

    fn insert_category(&mut self, c: &Category) -> Result<()> {
        self.conn.execute(
            "INSERT INTO categories(id, business_id, name, type) VALUES (?1, ?2, ?3, ?4)",
            params![c.id, c.business_id, c.name, c.tx_type.as_key()],
        )?;
        Ok(())
    }

    fn categories(&self, business_id: &str) -> Result<Vec<Category>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CATEGORY_COLS} FROM categories WHERE business_id=?1 ORDER BY seq"
        ))?;
        let rows = stmt.query_map(params![business_id], category_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn category(&self, id: &str) -> Result<Option<Category>> {
        Ok(self
            .conn
            .query_row(
                &format!("SELECT {CATEGORY_COLS} FROM categories WHERE id=?1"),
                params![id],
                category_from_row,
            )
            .optional()?)
    }

    fn insert_staff(&mut self, s: &Staff) -> Result<()> {
        self.conn.execute(
            "INSERT INTO staff(id, business_id, name, role, phone) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![s.id, s.business_id, s.name, s.role.as_key(), s.phone],
        )?;
        Ok(())
    }

    fn staff(&self, business_id: &str) -> Result<Vec<Staff>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, business_id, name, role, phone FROM staff WHERE business_id=?1 ORDER BY seq",
        )?;
        let rows = stmt.query_map(params![business_id], staff_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn insert_transaction(&mut self, t: &Transaction) -> Result<()> {
        self.conn.execute(
            "INSERT INTO transactions(id, cashbook_id, date, type, mode, amount, party, category_id, note)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                t.id,
                t.cashbook_id,
                t.date.to_string(),
                t.tx_type.as_key(),
                t.mode.as_key(),
                t.amount.to_string(),
                t.party,
                t.category_id,
                t.note
            ],
        )?;
        Ok(())
    }

    fn transactions(&self, cashbook_id: &str) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TRANSACTION_COLS} FROM transactions WHERE cashbook_id=?1 ORDER BY seq DESC"
        ))?;
        let rows = stmt.query_map(params![cashbook_id], transaction_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn setting(&self, key: &str) -> Result<Option<String>> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?)
    }

    fn set_setting(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn clear_setting(&mut self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM settings WHERE key=?1", params![key])?;
        Ok(())
    }
}
