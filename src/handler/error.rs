use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// 请求级错误，渲染为统一信封 {code, message, data: null}
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    /// 唯一键冲突（重复持仓/收藏/用户名），信封 code 用 400
    Conflict(String),
    BadRequest(String),
    Unauthorized(String),
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::BadRequest(msg)
            | AppError::Unauthorized(msg)
            | AppError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "code": status.as_u16(),
            "message": self.message(),
            "data": null,
        });
        (status, Json(body)).into_response()
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::NotFound => AppError::NotFound("记录不存在".to_string()),
            diesel::result::Error::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                _,
            ) => AppError::Conflict("记录已存在".to_string()),
            other => {
                tracing::error!("Database error: {}", other);
                AppError::Internal("服务器错误".to_string())
            }
        }
    }
}

impl From<diesel::r2d2::PoolError> for AppError {
    fn from(e: diesel::r2d2::PoolError) -> Self {
        tracing::error!("Failed to get DB connection from pool: {}", e);
        AppError::Internal("服务器错误".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_renders_404_envelope() {
        let (status, json) = body_json(AppError::NotFound("股票不存在".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], 404);
        assert_eq!(json["message"], "股票不存在");
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn conflict_renders_400_envelope() {
        let (status, json) = body_json(AppError::Conflict("该股票已在持股列表中".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], 400);
    }

    #[tokio::test]
    async fn unique_violation_maps_to_conflict() {
        let err: AppError = diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_string()),
        )
        .into();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn diesel_not_found_maps_to_not_found() {
        let err: AppError = diesel::result::Error::NotFound.into();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
