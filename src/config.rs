// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Runtime settings resolved from flags, then environment, then defaults.

use crate::api::DEFAULT_API_URL;
use crate::db::{SqliteStore, default_db_path};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub api_url: String,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_matches(m: &clap::ArgMatches) -> Result<Self> {
        let db_path = match m.get_one::<PathBuf>("db") {
            Some(p) => p.clone(),
            None => default_db_path()?,
        };
        let api_url = m
            .get_one::<String>("api_url")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let log_level = m
            .get_one::<String>("log_level")
            .map(|s| LevelFilter::from_str(s))
            .transpose()
            .context("Invalid log level")?
            .unwrap_or(LevelFilter::WARN);
        Ok(Self {
            db_path,
            api_url,
            log_level,
        })
    }

    pub fn open_store(&self) -> Result<SqliteStore> {
        SqliteStore::open(&self.db_path)
            .with_context(|| format!("Open DB at {}", self.db_path.display()))
    }
}
