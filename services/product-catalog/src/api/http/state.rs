//! 路由共享状态

use std::sync::Arc;

use crate::application::{CategoryService, ProductService};
use crate::domain::storage::ImageStorage;

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService>,
    pub categories: Arc<CategoryService>,
    pub images: Arc<dyn ImageStorage>,
}
