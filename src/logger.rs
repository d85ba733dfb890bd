use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::models::{ConversationLogEntry, LogQuery, LogResponse};

/// Conversation audit log backed by Postgres. The server keeps running
/// without it when the database is unreachable; only the document store is
/// required to be in memory.
pub struct ConversationLogger {
    pool: PgPool,
}

impl ConversationLogger {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS conversation_logs (
                id UUID PRIMARY KEY,
                timestamp TIMESTAMPTZ NOT NULL,
                user_message TEXT NOT NULL,
                route TEXT NOT NULL,
                retrieved_count INT NOT NULL,
                reply_text TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_conversation_timestamp
            ON conversation_logs(timestamp DESC)
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn log_conversation(&self, entry: ConversationLogEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO conversation_logs
            (id, timestamp, user_message, route, retrieved_count, reply_text)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id)
        .bind(entry.timestamp)
        .bind(&entry.user_message)
        .bind(&entry.route)
        .bind(entry.retrieved_count)
        .bind(&entry.reply_text)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn query_logs(&self, query: LogQuery) -> Result<LogResponse> {
        let limit = query.limit.unwrap_or(50);
        let offset = query.offset.unwrap_or(0);

        let mut where_clauses = vec!["1=1".to_string()];

        if let Some(start) = &query.start_date {
            where_clauses.push(format!("timestamp >= '{}'", start.replace('\'', "''")));
        }

        if let Some(end) = &query.end_date {
            where_clauses.push(format!("timestamp <= '{}'", end.replace('\'', "''")));
        }

        if let Some(search) = &query.search_term {
            let escaped = search.replace('\'', "''");
            where_clauses.push(format!(
                "(user_message ILIKE '%{}%' OR reply_text ILIKE '%{}%')",
                escaped, escaped
            ));
        }

        let where_clause = where_clauses.join(" AND ");

        let sql = format!(
            "SELECT * FROM conversation_logs WHERE {} ORDER BY timestamp DESC LIMIT {} OFFSET {}",
            where_clause, limit, offset
        );

        let count_sql = format!(
            "SELECT COUNT(*) FROM conversation_logs WHERE {}",
            where_clause
        );

        let logs = sqlx::query_as::<_, ConversationLogEntry>(&sql)
            .fetch_all(&self.pool)
            .await?;

        let total: (i64,) = sqlx::query_as(&count_sql).fetch_one(&self.pool).await?;

        Ok(LogResponse {
            logs,
            total: total.0,
        })
    }
}
