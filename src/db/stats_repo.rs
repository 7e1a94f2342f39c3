// src/db/stats_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::stats::{HrStats, TopRequestEntry},
};

const HR_STATS_QUERY: &str = r#"
    SELECT
        a.returnable,
        a.non_returnable,
        r.pending,
        r.approved
    FROM
        (
            SELECT
                COUNT(*) FILTER (WHERE product_type = 'RETURNABLE') AS returnable,
                COUNT(*) FILTER (WHERE product_type = 'NON_RETURNABLE') AS non_returnable
            FROM assets
            WHERE hr_email = $1
        ) a,
        (
            SELECT
                COUNT(*) FILTER (WHERE status = 'pending') AS pending,
                COUNT(*) FILTER (WHERE status = 'approved') AS approved
            FROM requests
            WHERE hr_email = $1
        ) r
"#;

#[derive(Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Cards do painel: ativos por tipo e solicitações por status.
    // Uma única instrução, logo um único snapshot para os quatro contadores.
    pub async fn hr_stats(&self, hr_email: &str) -> Result<HrStats, AppError> {
        let (returnable, non_returnable, pending, approved): (i64, i64, i64, i64) =
            sqlx::query_as(HR_STATS_QUERY)
                .bind(hr_email)
                .fetch_one(&self.pool)
                .await?;

        Ok(HrStats { returnable, non_returnable, pending, approved })
    }

    // Os cinco ativos mais solicitados ao HR
    pub async fn top_requests(&self, hr_email: &str) -> Result<Vec<TopRequestEntry>, AppError> {
        let entries = sqlx::query_as::<_, TopRequestEntry>(
            r#"
            SELECT asset_name, COUNT(*) AS count
            FROM requests
            WHERE hr_email = $1
            GROUP BY asset_name
            ORDER BY count DESC, asset_name ASC
            LIMIT 5
            "#,
        )
        .bind(hr_email)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hr_stats_reads_both_tables_in_one_statement() {
        assert!(HR_STATS_QUERY.contains("FROM assets"));
        assert!(HR_STATS_QUERY.contains("FROM requests"));
        assert!(!HR_STATS_QUERY.trim().trim_end_matches(';').contains(';'));
    }
}
