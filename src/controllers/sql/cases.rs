use super::{
  ALM_SQL,
  QUERY_FAILED
};

use sqlx::{
  FromRow,
  PgPool,
  Result,
  Row
};

#[derive(Clone, FromRow)]
pub struct Cases {
  pub case_id:        i32,
  pub case_type:      String,
  pub member_name:    String,
  pub member_id:      String,
  pub moderator_name: String,
  pub moderator_id:   String,
  pub timestamp:      i64,         // Unix epoch
  pub duration:       Option<i64>, // for mutes
  pub reason:         String,      // 255 characters max
  pub active:         bool         // warnings can be revoked without losing the record
}

pub struct ReturnedCase {
  pub case_id:     i32,
  pub case_type:   String,
  pub member_id:   String,
  pub member_name: String
}

impl Cases {
  pub async fn load_data(
    pool: &PgPool,
    case_id: i32
  ) -> Result<Option<Self>> {
    let q = sqlx::query("SELECT * FROM cases WHERE case_id = $1")
      .bind(case_id)
      .fetch_optional(pool)
      .await?;

    if let Some(r) = q {
      Ok(Some(Self {
        case_id:        r.get("case_id"),
        case_type:      r.get("case_type"),
        member_name:    r.get("member_name"),
        member_id:      r.get("member_id"),
        moderator_name: r.get("moderator_name"),
        moderator_id:   r.get("moderator_id"),
        timestamp:      r.get("timestamp"),
        duration:       r.try_get("duration").ok(),
        reason:         r.get("reason"),
        active:         r.get("active")
      }))
    } else {
      Ok(None)
    }
  }

  pub async fn create(
    &self,
    pool: &PgPool
  ) -> Result<Self> {
    let q = sqlx::query(
      "INSERT INTO cases (
        case_id, case_type,
        member_name, member_id,
        moderator_name, moderator_id,
        timestamp, duration,
        reason, active
      ) VALUES (
        $1, $2, $3, $4,
        $5, $6, $7,
        $8, $9, $10
      ) RETURNING case_id"
    )
    .bind(self.case_id)
    .bind(self.case_type.clone())
    .bind(self.member_name.clone())
    .bind(self.member_id.clone())
    .bind(self.moderator_name.clone())
    .bind(self.moderator_id.clone())
    .bind(self.timestamp)
    .bind(self.duration)
    .bind(self.reason.clone())
    .bind(self.active)
    .fetch_one(pool)
    .await;

    match q {
      Ok(r) => Ok(Self {
        case_id: r.get("case_id"),
        ..self.clone()
      }),
      Err(e) => {
        eprintln!("{ALM_SQL}[Database:Cases:create:Error] {QUERY_FAILED}\n{e}");
        Err(e)
      }
    }
  }

  pub async fn get_cases(pool: &PgPool) -> Result<Vec<ReturnedCase>> {
    let q = sqlx::query("SELECT case_id, case_type, member_id, member_name FROM cases")
      .fetch_all(pool)
      .await;

    match q {
      Ok(r) => {
        let cases = r
          .into_iter()
          .map(|row| ReturnedCase {
            case_id:     row.get("case_id"),
            case_type:   row.get("case_type"),
            member_id:   row.get("member_id"),
            member_name: row.get("member_name")
          })
          .collect();

        Ok(cases)
      },
      Err(e) => {
        eprintln!("{ALM_SQL}[Database:Cases:get_cases:Error] {QUERY_FAILED}\n{e}");
        Err(e)
      }
    }
  }

  pub async fn get_active_warnings(
    pool: &PgPool,
    member_id: &str
  ) -> Result<Vec<Self>> {
    let q = sqlx::query_as::<_, Self>(
      "SELECT * FROM cases WHERE member_id = $1 AND case_type = 'Warn' AND active ORDER BY case_id"
    )
    .bind(member_id)
    .fetch_all(pool)
    .await;

    if let Err(e) = &q {
      eprintln!("{ALM_SQL}[Database:Cases:get_active_warnings:Error] {QUERY_FAILED}\n{e}");
    }

    q
  }

  pub async fn count_active_warnings(
    pool: &PgPool,
    member_id: &str
  ) -> Result<i64> {
    sqlx::query_scalar("SELECT COUNT(*) FROM cases WHERE member_id = $1 AND case_type = 'Warn' AND active")
      .bind(member_id)
      .fetch_one(pool)
      .await
  }

  /// Returns false when the case does not exist or is not an active warning.
  pub async fn deactivate_warning(
    pool: &PgPool,
    case_id: i32
  ) -> Result<bool> {
    let q = sqlx::query("UPDATE cases SET active = FALSE WHERE case_id = $1 AND case_type = 'Warn' AND active")
      .bind(case_id)
      .execute(pool)
      .await;

    match q {
      Ok(r) => Ok(r.rows_affected() > 0),
      Err(e) => {
        eprintln!("{ALM_SQL}[Database:Cases:deactivate_warning:Error] {QUERY_FAILED}\n{e}");
        Err(e)
      }
    }
  }
}
