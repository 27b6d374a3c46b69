//! 图片存储接口

use async_trait::async_trait;
use catalog_errors::AppResult;
use tokio::io::AsyncRead;

/// 图片存储
///
/// 上传返回对外路径 `{public_prefix}/{filename}`，与物理存储根目录解耦。
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// 以流的方式写入图片，文件名由时间戳加原扩展名生成
    async fn upload(
        &self,
        original_name: &str,
        content: &mut (dyn AsyncRead + Unpin + Send),
    ) -> AppResult<String>;

    /// 按对外路径删除图片
    async fn delete(&self, public_path: &str) -> AppResult<()>;
}
