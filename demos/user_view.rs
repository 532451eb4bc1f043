//! User View - async handlers over an in-memory user table.
//!
//! This example demonstrates:
//! - Handlers that return futures (`BoxFuture`)
//! - Building user-table SQL and converting raw rows
//!
//! Rows are kept the way SQLite returns them (booleans as integers), so
//! every read goes through `User::from_row`.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use verbview::auth::user::{construct_update_sql, SQL_USER_ADD, SQL_USER_GET_WITH_ID};
use verbview::auth::User;
use verbview::stdio::write_json_line;
use verbview::view::BoxFuture;
use verbview::{Args, Request, View, ViewDescriptor};

type Rows = Arc<Mutex<Vec<Vec<Value>>>>;

struct UserView {
    rows: Rows,
}

/// Store a user as a raw row: id first, booleans as 0/1.
fn to_row(id: i64, user: &User) -> Vec<Value> {
    let mut row = vec![json!(id)];
    row.extend(user.insert_args().into_iter().map(|v| match v {
        Value::Bool(b) => json!(b as i64),
        other => other,
    }));
    row
}

fn get_user(view: &UserView, req: &mut Request, _args: &Args) -> BoxFuture<'static, Value> {
    let rows = view.rows.clone();
    let username = req.get("username").cloned().unwrap_or(Value::Null);
    Box::pin(async move {
        tracing::info!("{}", SQL_USER_GET_WITH_ID.trim());
        let rows = rows.lock().await;
        match rows.iter().find(|row| row[1] == username) {
            Some(row) => match User::from_row(row, true) {
                Ok(user) => json!({"status": 200, "user": user}),
                Err(e) => json!({"status": 500, "detail": e.to_string()}),
            },
            None => json!({"status": 404, "detail": "user not found"}),
        }
    })
}

fn create_user(view: &UserView, req: &mut Request, _args: &Args) -> BoxFuture<'static, Value> {
    let rows = view.rows.clone();
    let parsed: Result<User, _> = req.parse();
    Box::pin(async move {
        let user = match parsed {
            Ok(user) => user,
            Err(e) => return json!({"status": 400, "detail": e.to_string()}),
        };
        tracing::info!("{} {:?}", SQL_USER_ADD.trim(), user.insert_args());
        let mut rows = rows.lock().await;
        let id = rows.len() as i64 + 1;
        rows.push(to_row(id, &user));
        json!({"status": 201, "id": id})
    })
}

fn update_user(_view: &UserView, req: &mut Request, _args: &Args) -> BoxFuture<'static, Value> {
    let username = req.remove("username");
    let fields: Vec<(String, Value)> = req.as_map().clone().into_iter().collect();
    Box::pin(async move {
        match construct_update_sql(fields) {
            Ok((sql, mut args)) => {
                args.push(username.unwrap_or(Value::Null));
                json!({"status": 200, "sql": sql.trim(), "args": args})
            }
            Err(e) => json!({"status": 400, "detail": e.to_string()}),
        }
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let descriptor = Arc::new(
        ViewDescriptor::<UserView, BoxFuture<'static, Value>>::builder("users")
            .handle("get", get_user)
            .handle("post", create_user)
            .handle("patch", update_user)
            .build(),
    );
    let view = View::new(
        UserView {
            rows: Arc::new(Mutex::new(Vec::new())),
        },
        descriptor,
    );

    let script = [
        json!({"method": "post", "username": "ada", "password": "hash", "is_staff": true}),
        json!({"method": "GET", "username": "ada"}),
        json!({"method": "patch", "username": "ada", "first_name": "Ada", "is_active": false}),
        json!({"method": "delete", "username": "ada"}),
    ];

    for step in script {
        let mut request: Request = serde_json::from_value(step)?;
        match view.dispatch(&mut request, &Args::new()) {
            Ok(pending) => write_stdout_json(&pending.await)?,
            Err(e) => write_stdout_json(&json!({"status": e.status_hint(), "detail": e.to_string()}))?,
        }
    }

    Ok(())
}

/// Write one JSON response line to stdout.
fn write_stdout_json<T: Serialize>(value: &T) -> verbview::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_json_line(&mut handle, value)
}
