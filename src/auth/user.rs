//! SQL statements and row conversion for the user table.
//!
//! Statements use `?` placeholders; callers bind the returned arguments with
//! whatever driver they use. Boolean columns come back from SQLite as
//! integers, so [`user_row_to_map`] coerces them.
//!
//! # Example
//!
//! ```
//! use verbview::auth::user::{construct_update_sql, SQL_USER_UPDATE};
//! use serde_json::json;
//!
//! let (sql, args) = construct_update_sql([("first_name", json!("Ada")), ("is_staff", json!(true))]).unwrap();
//! assert!(sql.contains("SET first_name=?, is_staff=?"));
//! assert_eq!(args, vec![json!("Ada"), json!(true)]);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ViewError};
use crate::request::is_truthy;

pub const SQL_CREATE_USER_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS aiorest_auth_user
    (id INTEGER PRIMARY KEY NOT NULL,
     username CHAR(255) NOT NULL,
     password CHAR(255) NOT NULL,
     last_name CHAR(255),
     first_name CHAR(255),
     is_active BOOL DEFAULT TRUE NOT NULL,
     is_superuser BOOL DEFAULT FALSE NOT NULL,
     is_staff BOOL DEFAULT FALSE NOT NULL,
     is_user BOOL DEFAULT TRUE NOT NULL
    );
";

pub const SQL_CREATE_TOKEN_FOREIGN_KEY: &str = "
    ALTER TABLE aiorest_auth_token
    ADD COLUMN user_id INTEGER REFERENCES aiorest_auth_user(id);
";

pub const SQL_USER_ADD: &str = "
    INSERT INTO aiorest_auth_user (`username`, `password`, `first_name`,
    `last_name`, `is_superuser`, `is_staff`, `is_user`, `is_active`)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?);
";

pub const SQL_USER_GET: &str = "
    SELECT `username`, `password`, `first_name`, `last_name`, `is_superuser`,
    `is_staff`, `is_user`, `is_active`
    FROM aiorest_auth_user
    WHERE id=?;
";

pub const SQL_USER_GET_WITH_ID: &str = "
    SELECT `id`, `username`, `password`, `first_name`, `last_name`,
    `is_superuser`, `is_staff`, `is_user`, `is_active`
    FROM aiorest_auth_user
    WHERE username=?;
";

pub const SQL_USER_GET_BY_USERNAME: &str = "
    SELECT `username`, `password`, `first_name`, `last_name`, `is_superuser`,
    `is_staff`, `is_user`, `is_active`
    FROM aiorest_auth_user
    WHERE username=?;
";

/// Update statement; `{}` is replaced by the SET assignments.
pub const SQL_USER_UPDATE: &str = "
    UPDATE aiorest_auth_user
    SET {}
    WHERE username=?;
";

/// Column order of rows selected with the primary key.
pub const USER_MODEL_FIELDS: [&str; 9] = [
    "id",
    "username",
    "password",
    "first_name",
    "last_name",
    "is_superuser",
    "is_staff",
    "is_user",
    "is_active",
];

/// Column order of rows selected without the primary key.
pub const USER_MODEL_FIELDS_WITHOUT_PK: [&str; 8] = [
    "username",
    "password",
    "first_name",
    "last_name",
    "is_superuser",
    "is_staff",
    "is_user",
    "is_active",
];

/// Columns stored as integers that must be read back as booleans.
pub const USER_BOOL_FIELDS: [&str; 4] = ["is_superuser", "is_staff", "is_user", "is_active"];

/// Build an UPDATE statement for the given fields.
///
/// Returns the SQL and the values to bind, in order. The trailing
/// `username=?` placeholder of the WHERE clause is left for the caller to
/// bind.
///
/// # Errors
///
/// `ViewError::Protocol` when no fields are given or a field is not a user
/// column (the primary key cannot be updated).
pub fn construct_update_sql<I, K>(parameters: I) -> Result<(String, Vec<Value>)>
where
    I: IntoIterator<Item = (K, Value)>,
    K: AsRef<str>,
{
    let mut assignments = Vec::new();
    let mut query_args = Vec::new();

    for (field, value) in parameters {
        let field = field.as_ref();
        if !USER_MODEL_FIELDS_WITHOUT_PK.contains(&field) {
            return Err(ViewError::Protocol(format!(
                "unknown user field: {}",
                field
            )));
        }
        assignments.push(format!("{}=?", field));
        query_args.push(value);
    }

    if assignments.is_empty() {
        return Err(ViewError::Protocol("no user fields to update".to_string()));
    }

    let sql = SQL_USER_UPDATE.replacen("{}", &assignments.join(", "), 1);
    Ok((sql, query_args))
}

/// Convert a raw user row into a field map.
///
/// `with_id` selects [`USER_MODEL_FIELDS`] (row starts with `id`) or
/// [`USER_MODEL_FIELDS_WITHOUT_PK`]. Boolean columns are coerced by
/// truthiness, so `0`/`1` become `false`/`true`.
pub fn user_row_to_map(row: &[Value], with_id: bool) -> Result<Map<String, Value>> {
    let fields: &[&str] = if with_id {
        &USER_MODEL_FIELDS
    } else {
        &USER_MODEL_FIELDS_WITHOUT_PK
    };

    if row.len() != fields.len() {
        return Err(ViewError::Protocol(format!(
            "user row has {} columns, expected {}",
            row.len(),
            fields.len()
        )));
    }

    let mut user = Map::new();
    for (field, value) in fields.iter().zip(row) {
        let value = if USER_BOOL_FIELDS.contains(field) {
            Value::Bool(is_truthy(value))
        } else {
            value.clone()
        };
        user.insert(field.to_string(), value);
    }
    Ok(user)
}

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key; absent for rows selected without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_superuser: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default = "default_true")]
    pub is_user: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl User {
    /// Create an active regular user.
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            id: None,
            username: username.to_string(),
            password: password.to_string(),
            first_name: None,
            last_name: None,
            is_superuser: false,
            is_staff: false,
            is_user: true,
            is_active: true,
        }
    }

    /// Build a user from a raw row (see [`user_row_to_map`]).
    pub fn from_row(row: &[Value], with_id: bool) -> Result<Self> {
        let map = user_row_to_map(row, with_id)?;
        Ok(serde_json::from_value(Value::Object(map))?)
    }

    /// Arguments for [`SQL_USER_ADD`], in column order.
    pub fn insert_args(&self) -> Vec<Value> {
        vec![
            Value::from(self.username.clone()),
            Value::from(self.password.clone()),
            Value::from(self.first_name.clone()),
            Value::from(self.last_name.clone()),
            Value::from(self.is_superuser),
            Value::from(self.is_staff),
            Value::from(self.is_user),
            Value::from(self.is_active),
        ]
    }
}
