//! 数据库错误映射
//!
//! 所有 sqlx 调用点都经由这里把驱动错误归类为 `AppError`

use catalog_errors::AppError;

/// 将 SQLx 错误转换为 AppError
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err
                .constraint()
                .map(|c| format!(" ({})", c))
                .unwrap_or_default();
            match db_err.code().as_deref() {
                Some("23505") => AppError::conflict(format!(
                    "Duplicate entry violates unique constraint{}",
                    constraint
                )),
                Some("23503") => AppError::bad_request(format!(
                    "Foreign key constraint violation{}",
                    constraint
                )),
                Some("23514") => {
                    AppError::bad_request(format!("Check constraint violation{}", constraint))
                }
                Some("23502") => AppError::bad_request("Not null constraint violation"),
                Some("22001") => AppError::bad_request("String data too long"),
                Some("22P02") => AppError::bad_request("Invalid input syntax"),
                Some(code) => AppError::internal(format!("Database error ({}): {}", code, db_err)),
                None => AppError::internal(format!("Database error: {}", db_err)),
            }
        }
        sqlx::Error::PoolTimedOut => AppError::internal("Database connection pool timeout"),
        sqlx::Error::PoolClosed => AppError::internal("Database connection pool is closed"),
        other => AppError::internal(format!("Database error: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct CodedError(&'static str);

    impl fmt::Display for CodedError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "error with code {}", self.0)
        }
    }

    impl StdError for CodedError {}

    impl DatabaseError for CodedError {
        fn message(&self) -> &str {
            "coded error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    fn coded(code: &'static str) -> AppError {
        map_sqlx_error(sqlx::Error::Database(Box::new(CodedError(code))))
    }

    #[test]
    fn test_row_not_found() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_unique_violation_is_conflict() {
        assert!(matches!(coded("23505"), AppError::Conflict(_)));
    }

    #[test]
    fn test_constraint_violations_are_bad_request() {
        for code in ["23502", "23503", "23514", "22001", "22P02"] {
            assert!(matches!(coded(code), AppError::BadRequest(_)), "code {}", code);
        }
    }

    #[test]
    fn test_unclassified_errors_are_internal() {
        assert!(matches!(coded("40001"), AppError::Internal(_)));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            AppError::Internal(_)
        ));
    }
}
