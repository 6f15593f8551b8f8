// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Durable record of every withdrawal the relay has put on the wire.
//!
//! One row per key image. A row in any status but `reverted` blocks another
//! submission for that key image.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use hc_types::{Address, TxHash, WithdrawCall};
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Broadcast,
    Uncertain,
    Mined,
    Reverted,
}

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubmissionStatus::Broadcast => "broadcast",
            SubmissionStatus::Uncertain => "uncertain",
            SubmissionStatus::Mined => "mined",
            SubmissionStatus::Reverted => "reverted",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "broadcast" => SubmissionStatus::Broadcast,
            "uncertain" => SubmissionStatus::Uncertain,
            "mined" => SubmissionStatus::Mined,
            "reverted" => SubmissionStatus::Reverted,
            _ => return None,
        })
    }

    /// Only a mined revert leaves the key image unspent.
    pub fn blocks_resubmission(self) -> bool {
        self != SubmissionStatus::Reverted
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub key_image: String,
    pub destination: Address,
    pub amount: String,
    pub ring_index: u64,
    pub nonce: u64,
    pub tx_hash: Option<TxHash>,
    pub status: SubmissionStatus,
    pub reason: Option<String>,
    pub updated_at: u64,
}

pub struct Journal {
    conn: Mutex<Connection>,
}

impl Journal {
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        Self::init(Connection::open(path)?)
    }

    pub fn in_memory() -> rusqlite::Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> rusqlite::Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS submissions (
                key_image TEXT PRIMARY KEY,
                destination TEXT NOT NULL,
                amount TEXT NOT NULL,
                ring_index INTEGER NOT NULL,
                nonce INTEGER NOT NULL,
                tx_hash TEXT,
                status TEXT NOT NULL,
                reason TEXT,
                updated_at INTEGER NOT NULL
            );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    // a panic while holding the lock cannot leave a half-written row
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert or replace the row for `key_image`.
    pub fn record(
        &self,
        key_image: &str,
        call: &WithdrawCall,
        nonce: u64,
        tx_hash: Option<&TxHash>,
        status: SubmissionStatus,
    ) -> rusqlite::Result<()> {
        self.conn().execute(
            "INSERT INTO submissions
                (key_image, destination, amount, ring_index, nonce, tx_hash, status, reason, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, NULL, ?8)
             ON CONFLICT(key_image) DO UPDATE SET
                destination = ?2, amount = ?3, ring_index = ?4, nonce = ?5,
                tx_hash = ?6, status = ?7, reason = NULL, updated_at = ?8",
            params![
                key_image,
                call.receiver.to_string(),
                call.bucket.amount.to_string(),
                call.bucket.ring_index as i64,
                nonce as i64,
                tx_hash.map(TxHash::to_string),
                status.as_str(),
                now_secs() as i64,
            ],
        )?;
        Ok(())
    }

    /// Move a broadcast row to its final status.
    pub fn resolve(
        &self,
        key_image: &str,
        status: SubmissionStatus,
        reason: Option<&str>,
    ) -> rusqlite::Result<()> {
        self.conn().execute(
            "UPDATE submissions SET status = ?2, reason = ?3, updated_at = ?4 WHERE key_image = ?1",
            params![key_image, status.as_str(), reason, now_secs() as i64],
        )?;
        Ok(())
    }

    /// Drop the row for `key_image`, freeing it for another attempt.
    pub fn forget(&self, key_image: &str) -> rusqlite::Result<()> {
        self.conn()
            .execute("DELETE FROM submissions WHERE key_image = ?1", params![key_image])?;
        Ok(())
    }

    pub fn find(&self, key_image: &str) -> rusqlite::Result<Option<Submission>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT key_image, destination, amount, ring_index, nonce, tx_hash, status, reason, updated_at
             FROM submissions WHERE key_image = ?1",
        )?;
        let found = stmt
            .query_row(params![key_image], |row| {
                let destination: String = row.get(1)?;
                let tx_hash: Option<String> = row.get(5)?;
                let status: String = row.get(6)?;
                let ring_index: i64 = row.get(3)?;
                let nonce: i64 = row.get(4)?;
                let updated_at: i64 = row.get(8)?;
                Ok(Submission {
                    key_image: row.get(0)?,
                    destination: destination.parse::<Address>().map_err(|e| corrupt(1, e))?,
                    amount: row.get(2)?,
                    ring_index: ring_index as u64,
                    nonce: nonce as u64,
                    tx_hash: tx_hash
                        .map(|h| h.parse::<TxHash>())
                        .transpose()
                        .map_err(|e| corrupt(5, e))?,
                    status: SubmissionStatus::parse(&status)
                        .ok_or_else(|| corrupt(6, format!("unknown status {status}")))?,
                    reason: row.get(7)?,
                    updated_at: updated_at as u64,
                })
            })
            .optional()?;
        Ok(found)
    }
}

fn corrupt(column: usize, e: impl ToString) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        rusqlite::types::Type::Text,
        e.to_string().into(),
    )
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
