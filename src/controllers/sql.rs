mod cases;
pub use cases::Cases;

mod ticket_blacklist;
pub use ticket_blacklist::TicketBlacklist;

mod tickets;
pub use tickets::Tickets;

use {
  regex::Regex,
  std::fs
};

static ALM_SQL: &str = "AlmSql";
static QUERY_FAILED: &str = "Failed to query the database";

const SCHEMA_DIR: &str = "schemas";

/// Execute all SQL statements in the `schemas` directory.
/// ### Errors
/// The function will return an error if:
/// - Directory does not exist in root-level
/// - Improper SQL syntaxes
///   - Guides you to which file it failed on and the error returned from database
pub async fn execute_schemas(pool: &sqlx::PgPool) -> Result<(), crate::BotError> {
  let comments = remove_sql_comments();
  let mut paths: Vec<_> = fs::read_dir(SCHEMA_DIR)?
    .filter_map(|p| p.ok().map(|p| p.path()))
    .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "sql"))
    .collect();
  paths.sort();

  let mut executed_schemas = Vec::new();

  for path in paths {
    let fmt_path = path.display().to_string().replace(&format!("{SCHEMA_DIR}/"), "");
    let sql = {
      let file = fs::read_to_string(&path)?;
      comments.replace_all(&file, "").to_string()
    };

    for query in sql.split(';').map(str::trim).filter(|q| !q.is_empty()) {
      if let Err(e) = sqlx::query(query).execute(pool).await {
        eprintln!("{ALM_SQL}[Database:Schemas:Error] Failed to execute {fmt_path}\n{e}");
        return Err(e.into());
      }
    }

    executed_schemas.push(fmt_path);
  }

  if !executed_schemas.is_empty() {
    println!("{ALM_SQL}[Database:Schemas:Info] Successfully executed: {}", executed_schemas.join(", "));
  }

  Ok(())
}

fn remove_sql_comments() -> Regex { Regex::new(r"--.*").unwrap() }
