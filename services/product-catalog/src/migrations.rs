//! 内嵌的数据库迁移

use catalog_adapter_postgres::Migration;

/// 本服务的全部迁移，按版本升序
pub fn all() -> Vec<Migration> {
    vec![
        Migration::new(
            20250101000000,
            "create_catalog_schema",
            include_str!("../migrations/20250101000000_create_catalog_schema.up.sql"),
        )
        .with_down(include_str!(
            "../migrations/20250101000000_create_catalog_schema.down.sql"
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_ordered_and_reversible() {
        let migrations = all();
        assert!(migrations.windows(2).all(|w| w[0].version < w[1].version));
        assert!(migrations.iter().all(|m| m.down_sql.is_some()));
    }
}
