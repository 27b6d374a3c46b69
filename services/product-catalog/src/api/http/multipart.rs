//! multipart 字段读取

use std::io;
use std::pin::pin;

use axum::extract::multipart::{Field, MultipartError};
use catalog_errors::{AppError, AppResult};
use futures::TryStreamExt;
use tokio_util::io::StreamReader;
use tracing::warn;

use crate::domain::storage::ImageStorage;

pub fn malformed(err: MultipartError) -> AppError {
    AppError::bad_request(format!("Invalid multipart request: {}", err.body_text()))
}

/// 读取文本字段
pub async fn text(field: Field<'_>) -> AppResult<String> {
    field.text().await.map_err(malformed)
}

/// 把文件字段以流的方式写入图片存储，返回对外路径
pub async fn store_file(images: &dyn ImageStorage, field: Field<'_>) -> AppResult<String> {
    let original_name = field.file_name().unwrap_or_default().to_string();
    let stream = pin!(field.map_err(io::Error::other));
    let mut reader = StreamReader::new(stream);
    images.upload(&original_name, &mut reader).await
}

/// 删除本次请求已上传的图片，失败只记录日志
pub async fn discard_uploads(images: &dyn ImageStorage, urls: &[String]) {
    for url in urls {
        if let Err(e) = images.delete(url).await {
            warn!(path = %url, error = %e, "Failed to discard uploaded image");
        }
    }
}
