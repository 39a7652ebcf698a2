use super::{
  ALM_SQL,
  QUERY_FAILED
};

use sqlx::{
  FromRow,
  PgPool,
  Result
};

#[derive(Clone, FromRow)]
pub struct TicketBlacklist {
  pub user_id:  i64,
  pub added_by: i64,
  pub timestamp: i64 // Unix epoch
}

impl TicketBlacklist {
  pub async fn contains(
    pool: &PgPool,
    user_id: i64
  ) -> Result<bool> {
    let q: Result<bool> = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM ticket_blacklist WHERE user_id = $1)")
      .bind(user_id)
      .fetch_one(pool)
      .await;

    if let Err(e) = &q {
      eprintln!("{ALM_SQL}[Database:TicketBlacklist:contains:Error] {QUERY_FAILED}\n{e}");
    }

    q
  }

  pub async fn add(
    &self,
    pool: &PgPool
  ) -> Result<()> {
    sqlx::query("INSERT INTO ticket_blacklist (user_id, added_by, timestamp) VALUES ($1, $2, $3) ON CONFLICT (user_id) DO NOTHING")
      .bind(self.user_id)
      .bind(self.added_by)
      .bind(self.timestamp)
      .execute(pool)
      .await?;

    Ok(())
  }

  pub async fn remove(
    pool: &PgPool,
    user_id: i64
  ) -> Result<bool> {
    let q = sqlx::query("DELETE FROM ticket_blacklist WHERE user_id = $1")
      .bind(user_id)
      .execute(pool)
      .await?;

    Ok(q.rows_affected() > 0)
  }
}
