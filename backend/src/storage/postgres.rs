use shared::models::Entry;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::{error, info};
use super::{Backend, BackendError, BackendKind};

const MAX_CONNECTIONS: u32 = 5;

/// One row per entry. `id` only exists to remember insertion order, an
/// upsert keeps the row and therefore the entry's position.
#[derive(Debug, sqlx::FromRow)]
struct EntryRow {
    name: String,
    choices: Json<Vec<String>>,
    updated_at: OffsetDateTime,
}

impl From<EntryRow> for Entry {
    fn from(row: EntryRow) -> Self {
        Entry::new(row.name, row.choices.0).stamped(row.updated_at)
    }
}

pub struct PostgresBackend {
    pool: Option<PgPool>,
}

impl PostgresBackend {
    /// Builds a lazy pool and runs the embedded migrations. Neither an
    /// unreachable server nor a failed migration stops startup; the error is
    /// logged and each later operation reports its own failure.
    pub async fn connect(url: &str) -> Self {
        let pool = match PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_lazy(url)
        {
            Ok(pool) => pool,
            Err(e) => {
                error!(error = %e, "Invalid DATABASE_URL");
                return Self::unconfigured();
            }
        };

        match migrate(&pool).await {
            Ok(()) => info!("📋 Migrations complete"),
            Err(e) => error!(error = %e, "Failed to run migrations"),
        }

        Self { pool: Some(pool) }
    }

    pub fn unconfigured() -> Self {
        Self { pool: None }
    }

    fn pool(&self) -> Result<&PgPool, BackendError> {
        self.pool
            .as_ref()
            .ok_or_else(|| BackendError::NotConfigured("no usable DATABASE_URL".into()))
    }
}

async fn migrate(pool: &PgPool) -> Result<(), BackendError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[rocket::async_trait]
impl Backend for PostgresBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Postgres
    }

    async fn load(&self) -> Result<Vec<Entry>, BackendError> {
        let rows = sqlx::query_as::<_, EntryRow>(
            "SELECT name, choices, updated_at FROM roster_entries ORDER BY id"
        )
        .fetch_all(self.pool()?)
        .await?;

        Ok(rows.into_iter().map(Entry::from).collect())
    }

    async fn save(&self, _roster: &[Entry], changed: &Entry) -> Result<(), BackendError> {
        let updated_at = changed.timestamp.unwrap_or_else(OffsetDateTime::now_utc);
        sqlx::query(
            "INSERT INTO roster_entries (name, choices, updated_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (name) DO UPDATE
             SET choices = EXCLUDED.choices, updated_at = EXCLUDED.updated_at"
        )
        .bind(&changed.name)
        .bind(Json(&changed.choices))
        .bind(updated_at)
        .execute(self.pool()?)
        .await?;

        Ok(())
    }

    async fn clear(&self) -> Result<(), BackendError> {
        sqlx::query("DELETE FROM roster_entries")
            .execute(self.pool()?)
            .await?;
        Ok(())
    }

    fn reads_through(&self) -> bool {
        true
    }

    fn stamps_entries(&self) -> bool {
        true
    }
}
