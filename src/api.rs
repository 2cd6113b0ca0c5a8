// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking client for the hosted cashbook REST API.
//!
//! Every create call returns the record the server sent back; nothing is
//! re-fetched afterwards. There is no retry: a failed call surfaces as an
//! error and the caller's state is left as it was.

use crate::error::{Error, Result};
use crate::models::{
    Business, Cashbook, Category, NewBusiness, NewCashbook, NewCategory, NewTransaction,
    PaymentMode, Staff, StaffRole, Transaction, TxType,
};
use crate::utils::http_client;
use chrono::NaiveDate;
use reqwest::blocking::{RequestBuilder, Response};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

const REQUEST_FAILED: &str = "Request failed";

/// Token plus the user profile returned by `/auth/login` and `/auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user: serde_json::Value,
}

impl Session {
    pub fn display_name(&self) -> String {
        ["name", "email"]
            .iter()
            .find_map(|k| self.user.get(*k).and_then(|v| v.as_str()))
            .unwrap_or("unknown user")
            .to_string()
    }
}

#[derive(Debug, Deserialize)]
pub struct WireBusiness {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub gstin: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireCashbook {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub default_mode: Option<PaymentMode>,
    #[serde(default)]
    pub opening_balance: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
pub struct WireCategory {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
}

#[derive(Debug, Deserialize)]
pub struct WireStaff {
    #[serde(rename = "_id")]
    pub id: String,
    pub email: Option<String>,
    pub user_id: Option<String>,
    #[serde(default)]
    pub role: StaffRole,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireTransaction {
    #[serde(rename = "_id")]
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub tx_type: TxType,
    #[serde(default)]
    pub mode: Option<PaymentMode>,
    pub amount: Decimal,
    pub party: Option<String>,
    pub category_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
struct TransactionBody<'a> {
    date: String,
    #[serde(rename = "type")]
    tx_type: TxType,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    mode: PaymentMode,
    party: Option<&'a str>,
    category_id: Option<&'a str>,
    notes: &'a str,
}

fn blank_to_none(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

/// Accepts both `2025-01-02` and full ISO-8601 timestamps; only the calendar
/// date is kept.
pub fn parse_wire_date(raw: &str) -> Result<NaiveDate> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| Error::invalid("date", format!("'{}' from server: {}", raw, e)))
}

impl WireBusiness {
    pub fn into_model(self) -> Business {
        Business {
            id: self.id,
            name: self.name,
            tax_id: blank_to_none(self.gstin),
            address: blank_to_none(self.address),
        }
    }
}

impl WireCashbook {
    pub fn into_model(self, business_id: &str) -> Cashbook {
        Cashbook {
            id: self.id,
            business_id: business_id.to_string(),
            name: self.name,
            default_mode: self.default_mode.unwrap_or_default(),
            opening_balance: self.opening_balance.unwrap_or_default(),
        }
    }
}

impl WireCategory {
    pub fn into_model(self, business_id: &str) -> Category {
        Category {
            id: self.id,
            business_id: business_id.to_string(),
            name: self.name,
            tx_type: self.tx_type,
        }
    }
}

impl WireStaff {
    pub fn into_model(self, business_id: &str) -> Staff {
        Staff {
            id: self.id,
            business_id: business_id.to_string(),
            name: self.email.or(self.user_id).unwrap_or_default(),
            role: self.role,
            phone: blank_to_none(self.phone),
        }
    }
}

impl WireTransaction {
    pub fn into_model(self, cashbook_id: &str) -> Result<Transaction> {
        Ok(Transaction {
            date: parse_wire_date(&self.date)?,
            id: self.id,
            cashbook_id: cashbook_id.to_string(),
            tx_type: self.tx_type,
            mode: self.mode.unwrap_or_default(),
            amount: self.amount,
            party: blank_to_none(self.party),
            category_id: blank_to_none(self.category_id),
            note: blank_to_none(self.notes),
        })
    }
}

/// The message to show for a failed response: its `detail` field when
/// present, otherwise a generic one.
pub fn error_detail(body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned());
    match detail {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => REQUEST_FAILED.to_string(),
        Some(other) => other.to_string(),
    }
}

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self::with_http(base_url, http_client()?))
    }

    pub fn with_http(base_url: &str, http: reqwest::blocking::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            http,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token.as_deref().ok_or(Error::NotAuthenticated)?;
        Ok(req.bearer_auth(token))
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "GET");
        let req = self.authed(self.http.get(self.url(path)))?;
        read_json(req.send()?)
    }

    fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T> {
        debug!(path, "POST");
        let req = self.authed(self.http.post(self.url(path)).json(body))?;
        read_json(req.send()?)
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<Session> {
        let body = json!({ "email": email, "password": password });
        self.authenticate("/auth/login", &body)
    }

    pub fn register(&mut self, name: &str, email: &str, password: &str) -> Result<Session> {
        let body = json!({ "name": name, "email": email, "password": password });
        self.authenticate("/auth/register", &body)
    }

    fn authenticate(&mut self, path: &str, body: &serde_json::Value) -> Result<Session> {
        debug!(path, "POST");
        let resp = self.http.post(self.url(path)).json(body).send()?;
        let session: Session = read_json(resp)?;
        self.token = Some(session.token.clone());
        Ok(session)
    }

    /// Invalidates the token server-side. The local token is dropped even
    /// when the server rejects the call.
    pub fn logout(&mut self) -> Result<()> {
        let req = self.authed(self.http.post(self.url("/auth/logout")))?;
        self.token = None;
        let resp = req.send()?;
        if !resp.status().is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(Error::Api(error_detail(&body)));
        }
        Ok(())
    }

    pub fn list_businesses(&self) -> Result<Vec<Business>> {
        let list: Vec<WireBusiness> = self.get("/businesses")?;
        Ok(list.into_iter().map(WireBusiness::into_model).collect())
    }

    pub fn create_business(&self, input: &NewBusiness) -> Result<Business> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(Error::invalid("name", "must not be empty"));
        }
        let body = json!({
            "name": name,
            "gstin": input.tax_id.as_deref().unwrap_or(""),
            "address": input.address.as_deref().unwrap_or(""),
        });
        let created: WireBusiness = self.post("/businesses", &body)?;
        Ok(created.into_model())
    }

    pub fn list_cashbooks(&self, business_id: &str) -> Result<Vec<Cashbook>> {
        let list: Vec<WireCashbook> = self.get(&format!("/businesses/{business_id}/cashbooks"))?;
        Ok(list
            .into_iter()
            .map(|c| c.into_model(business_id))
            .collect())
    }

    pub fn create_cashbook(&self, business_id: &str, input: &NewCashbook) -> Result<Cashbook> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(Error::invalid("name", "must not be empty"));
        }
        let body = json!({
            "name": name,
            "default_mode": input.default_mode,
            "opening_balance": decimal_to_f64(input.opening_balance),
        });
        let created: WireCashbook =
            self.post(&format!("/businesses/{business_id}/cashbooks"), &body)?;
        Ok(created.into_model(business_id))
    }

    pub fn list_categories(&self, business_id: &str) -> Result<Vec<Category>> {
        let list: Vec<WireCategory> = self.get(&format!("/businesses/{business_id}/categories"))?;
        Ok(list
            .into_iter()
            .map(|c| c.into_model(business_id))
            .collect())
    }

    pub fn create_category(&self, business_id: &str, input: &NewCategory) -> Result<Category> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(Error::invalid("name", "must not be empty"));
        }
        let body = json!({ "name": name, "type": input.tx_type });
        let created: WireCategory =
            self.post(&format!("/businesses/{business_id}/categories"), &body)?;
        Ok(created.into_model(business_id))
    }

    pub fn list_staff(&self, business_id: &str) -> Result<Vec<Staff>> {
        let list: Vec<WireStaff> = self.get(&format!("/businesses/{business_id}/staff"))?;
        Ok(list
            .into_iter()
            .map(|s| s.into_model(business_id))
            .collect())
    }

    /// Invites an already registered account by e-mail.
    pub fn create_staff(&self, business_id: &str, email: &str, role: StaffRole) -> Result<Staff> {
        let email = email.trim();
        if email.is_empty() {
            return Err(Error::invalid("email", "must not be empty"));
        }
        let body = json!({ "email": email, "role": role });
        let created: WireStaff = self.post(&format!("/businesses/{business_id}/staff"), &body)?;
        Ok(created.into_model(business_id))
    }

    pub fn list_transactions(&self, cashbook_id: &str) -> Result<Vec<Transaction>> {
        let list: Vec<WireTransaction> =
            self.get(&format!("/cashbooks/{cashbook_id}/transactions"))?;
        list.into_iter()
            .map(|t| t.into_model(cashbook_id))
            .collect()
    }

    /// Validates like the local ledger, then posts. Nothing is sent for
    /// invalid input.
    pub fn create_transaction(
        &self,
        cashbook_id: &str,
        input: &NewTransaction,
    ) -> Result<Transaction> {
        let amount = match input.amount {
            Some(a) if a > Decimal::ZERO => a,
            Some(a) => return Err(Error::invalid("amount", format!("{} is not positive", a))),
            None => return Err(Error::invalid("amount", "is required")),
        };
        let tx_type = input
            .tx_type
            .ok_or_else(|| Error::invalid("type", "is required"))?;
        let date = input
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let body = TransactionBody {
            date: format!("{}T00:00:00.000Z", date),
            tx_type,
            amount,
            mode: input.mode.unwrap_or_default(),
            party: input.party.as_deref().map(str::trim).filter(|p| !p.is_empty()),
            category_id: input.category_id.as_deref(),
            notes: input.note.as_deref().unwrap_or(""),
        };
        let created: WireTransaction =
            self.post(&format!("/cashbooks/{cashbook_id}/transactions"), &body)?;
        created.into_model(cashbook_id)
    }
}

fn decimal_to_f64(d: Decimal) -> f64 {
    use rust_decimal::prelude::ToPrimitive;
    d.to_f64().unwrap_or_default()
}

fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    let body = resp.text()?;
    if !status.is_success() {
        let detail = error_detail(&body);
        warn!(%status, %detail, "request rejected");
        return Err(Error::Api(detail));
    }
    Ok(serde_json::from_str(&body)?)
}
