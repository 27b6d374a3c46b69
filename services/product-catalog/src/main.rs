//! product-catalog HTTP 服务

use std::sync::Arc;

use catalog_adapter_postgres::MigrationManager;
use catalog_bootstrap::{Infrastructure, run_http};
use tracing::info;

use product_catalog::api::http::{AppState, HttpSettings, router};
use product_catalog::application::{CategoryService, ProductService};
use product_catalog::infrastructure::persistence::{
    PostgresCategoryRepository, PostgresProductRepository,
};
use product_catalog::infrastructure::storage::LocalImageStorage;
use product_catalog::migrations;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    run_http("config", |infra: Infrastructure| async move {
        let config = infra.config().clone();
        let pool = infra.postgres_pool();

        let result = MigrationManager::new(pool.clone())
            .migrate(&migrations::all())
            .await?;
        info!(
            applied = ?result.applied,
            skipped = result.skipped.len(),
            "Migrations checked"
        );

        let product_repo = Arc::new(PostgresProductRepository::new(pool.clone()));
        let category_repo = Arc::new(PostgresCategoryRepository::new(pool));
        info!("Repositories initialized");

        let storage = LocalImageStorage::new(&config.storage.root, &config.storage.public_prefix);
        info!(
            root = %config.storage.root,
            prefix = %storage.public_prefix(),
            "Image storage initialized"
        );

        let state = AppState {
            products: Arc::new(
                ProductService::new(product_repo)
                    .with_archived_hidden_by_default(config.catalog.exclude_archived_by_default),
            ),
            categories: Arc::new(CategoryService::new(category_repo)),
            images: Arc::new(storage),
        };

        Ok(router(state, &HttpSettings::from_config(&config)))
    })
    .await
}
