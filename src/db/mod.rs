use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::Config;
use crate::models::{ClientFieldsPatch, ClientRecord};

/// Storage for client records.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<ClientRecord>>;

    /// Insert when `record.id` is `None`, otherwise overwrite every column of
    /// the existing row with that id. Saving with an unknown id is an error.
    /// Returns the record carrying its id.
    async fn save(&self, record: &ClientRecord) -> Result<ClientRecord>;

    async fn update_fields(&self, id: i32, fields: &ClientFieldsPatch) -> Result<()>;
}

const CLIENT_COLUMNS: &str = "id, name, identity_number, status, email, cellphone, postal_code, \
    state, city, district, street, number, birth_date";

/// PostgreSQL-backed repository. The pool is created on first use and every
/// call waits for it.
pub struct Database {
    database_url: String,
    pool: OnceCell<PgPool>,
}

impl Database {
    pub fn new(config: &Config) -> Self {
        Self {
            database_url: config.database_url().to_string(),
            pool: OnceCell::new(),
        }
    }

    /// Get a reference to the connection pool, connecting if needed
    pub async fn get_pool(&self) -> Result<&PgPool> {
        self.pool
            .get_or_try_init(|| async {
                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .connect(&self.database_url)
                    .await?;

                sqlx::migrate!().run(&pool).await?;
                info!("database connection established");

                Ok::<_, anyhow::Error>(pool)
            })
            .await
    }
}

#[async_trait]
impl ClientRepository for Database {
    async fn find_by_id(&self, id: i32) -> Result<Option<ClientRecord>> {
        let query = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = $1");
        let client = sqlx::query_as::<_, ClientRecord>(&query)
            .bind(id)
            .fetch_optional(self.get_pool().await?)
            .await?;

        Ok(client)
    }

    async fn save(&self, record: &ClientRecord) -> Result<ClientRecord> {
        let pool = self.get_pool().await?;

        let id: i32 = match record.id {
            None => {
                sqlx::query_scalar(
                    r#"
                    INSERT INTO clients (name, identity_number, status, email, cellphone,
                        postal_code, state, city, district, street, number, birth_date)
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                    RETURNING id
                    "#,
                )
                .bind(&record.name)
                .bind(&record.identity_number)
                .bind(record.status)
                .bind(&record.email)
                .bind(&record.cellphone)
                .bind(&record.postal_code)
                .bind(&record.state)
                .bind(&record.city)
                .bind(&record.district)
                .bind(&record.street)
                .bind(&record.number)
                .bind(record.birth_date)
                .fetch_one(pool)
                .await?
            }
            Some(id) => {
                let updated: Option<i32> = sqlx::query_scalar(
                    r#"
                    UPDATE clients
                    SET name = $2, identity_number = $3, status = $4, email = $5,
                        cellphone = $6, postal_code = $7, state = $8, city = $9,
                        district = $10, street = $11, number = $12, birth_date = $13
                    WHERE id = $1
                    RETURNING id
                    "#,
                )
                .bind(id)
                .bind(&record.name)
                .bind(&record.identity_number)
                .bind(record.status)
                .bind(&record.email)
                .bind(&record.cellphone)
                .bind(&record.postal_code)
                .bind(&record.state)
                .bind(&record.city)
                .bind(&record.district)
                .bind(&record.street)
                .bind(&record.number)
                .bind(record.birth_date)
                .fetch_optional(pool)
                .await?;

                match updated {
                    Some(id) => id,
                    None => bail!("client {} not found", id),
                }
            }
        };

        Ok(ClientRecord {
            id: Some(id),
            ..record.clone()
        })
    }

    async fn update_fields(&self, id: i32, fields: &ClientFieldsPatch) -> Result<()> {
        if fields.is_empty() {
            return Ok(());
        }

        let result = sqlx::query("UPDATE clients SET status = COALESCE($1, status) WHERE id = $2")
            .bind(fields.status)
            .bind(id)
            .execute(self.get_pool().await?)
            .await?;

        if result.rows_affected() == 0 {
            bail!("client {} not found", id);
        }

        Ok(())
    }
}

/// Initialize the database connection pool
pub async fn init(config: &Config) -> Result<Database> {
    let db = Database::new(config);
    db.get_pool()
        .await
        .map_err(|e| anyhow!("could not connect to the database: {e}"))?;

    Ok(db)
}
