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
pub struct Tickets {
  pub channel_id: i64,
  pub owner_id:   i64,
  pub owner_name: String,
  pub reason:     String,
  pub claimed_by: Option<i64>,
  pub is_open:    bool,
  pub opened_at:  i64 // Unix epoch
}

impl Tickets {
  pub async fn create(
    &self,
    pool: &PgPool
  ) -> Result<()> {
    let q = sqlx::query(
      "INSERT INTO tickets (
        channel_id, owner_id, owner_name,
        reason, claimed_by, is_open, opened_at
      ) VALUES ($1, $2, $3, $4, $5, $6, $7)"
    )
    .bind(self.channel_id)
    .bind(self.owner_id)
    .bind(self.owner_name.clone())
    .bind(self.reason.clone())
    .bind(self.claimed_by)
    .bind(self.is_open)
    .bind(self.opened_at)
    .execute(pool)
    .await;

    if let Err(e) = q {
      eprintln!("{ALM_SQL}[Database:Tickets:create:Error] {QUERY_FAILED}\n{e}");
      return Err(e);
    }

    Ok(())
  }

  pub async fn load_by_channel(
    pool: &PgPool,
    channel_id: i64
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>("SELECT * FROM tickets WHERE channel_id = $1")
      .bind(channel_id)
      .fetch_optional(pool)
      .await
  }

  pub async fn find_open_by_owner(
    pool: &PgPool,
    owner_id: i64
  ) -> Result<Option<Self>> {
    sqlx::query_as::<_, Self>("SELECT * FROM tickets WHERE owner_id = $1 AND is_open LIMIT 1")
      .bind(owner_id)
      .fetch_optional(pool)
      .await
  }

  pub async fn get_open(pool: &PgPool) -> Result<Vec<Self>> {
    let q = sqlx::query_as::<_, Self>("SELECT * FROM tickets WHERE is_open ORDER BY opened_at")
      .fetch_all(pool)
      .await;

    if let Err(e) = &q {
      eprintln!("{ALM_SQL}[Database:Tickets:get_open:Error] {QUERY_FAILED}\n{e}");
    }

    q
  }

  pub async fn claim(
    pool: &PgPool,
    channel_id: i64,
    staff_id: i64
  ) -> Result<bool> {
    let q = sqlx::query("UPDATE tickets SET claimed_by = $1 WHERE channel_id = $2 AND is_open")
      .bind(staff_id)
      .bind(channel_id)
      .execute(pool)
      .await?;

    Ok(q.rows_affected() > 0)
  }

  pub async fn close(
    pool: &PgPool,
    channel_id: i64
  ) -> Result<bool> {
    let q = sqlx::query("UPDATE tickets SET is_open = FALSE WHERE channel_id = $1 AND is_open")
      .bind(channel_id)
      .execute(pool)
      .await?;

    Ok(q.rows_affected() > 0)
  }
}
