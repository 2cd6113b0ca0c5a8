// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keeps the remote API session (token and user profile) in the local store
//! between invocations.

use crate::api::{ApiClient, Session};
use crate::error::{Error, Result};
use crate::store::{Store, TOKEN, USER};

pub fn save(store: &mut dyn Store, session: &Session) -> Result<()> {
    store.set_setting(TOKEN, &session.token)?;
    store.set_setting(USER, &serde_json::to_string(&session.user)?)?;
    Ok(())
}

pub fn load(store: &dyn Store) -> Result<Option<Session>> {
    let Some(token) = store.setting(TOKEN)? else {
        return Ok(None);
    };
    let user = match store.setting(USER)? {
        Some(raw) => serde_json::from_str(&raw)?,
        None => serde_json::Value::Null,
    };
    Ok(Some(Session { token, user }))
}

pub fn clear(store: &mut dyn Store) -> Result<()> {
    store.clear_setting(TOKEN)?;
    store.clear_setting(USER)?;
    Ok(())
}

/// A client carrying the stored token.
pub fn client(store: &dyn Store, base_url: &str) -> Result<ApiClient> {
    let session = load(store)?.ok_or(Error::NotAuthenticated)?;
    Ok(ApiClient::new(base_url)?.with_token(session.token))
}
