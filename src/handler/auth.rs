use axum::{
    async_trait,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::api_models::auth::{LoginRequest, RegisterRequest, TokenResponse, UserInfoResponse};
use crate::api_models::ApiResponse;
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::models::NewUser;
use crate::repositories::user as user_repo;
use crate::utils::{jwt, password};

/// 从 Authorization: Bearer 头解出当前登录用户
pub struct AuthUser(pub crate::models::User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("缺少认证凭证".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("无效的认证凭证".to_string()))?;

        let claims = jwt::decode_token(token, &state.config.jwt.secret)
            .map_err(|_| AppError::Unauthorized("无效的认证凭证".to_string()))?;

        let mut conn = state.db_pool.get()?;
        let user = user_repo::find_by_id(&mut conn, claims.sub)?
            .ok_or_else(|| AppError::Unauthorized("无效的认证凭证".to_string()))?;

        if user.status != "active" {
            return Err(AppError::Unauthorized("账户已被禁用或锁定".to_string()));
        }

        Ok(AuthUser(user))
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserInfoResponse>>), AppError> {
    let username = payload.username.trim().to_string();
    if username.is_empty() {
        return Err(AppError::BadRequest("用户名不能为空".to_string()));
    }
    password::validate_password_strength(&payload.password)
        .map_err(|msg| AppError::BadRequest(msg.to_string()))?;

    let mut conn = state.db_pool.get()?;

    if user_repo::find_by_username(&mut conn, &username)?.is_some() {
        return Err(AppError::Conflict("用户名已存在".to_string()));
    }
    if let Some(ref email) = payload.email {
        if user_repo::find_by_email(&mut conn, email)?.is_some() {
            return Err(AppError::Conflict("邮箱已被注册".to_string()));
        }
    }

    let password_hash = password::hash_password(&payload.password).map_err(|e| {
        tracing::error!("Failed to hash password: {}", e);
        AppError::Internal("服务器错误".to_string())
    })?;

    let new_user = NewUser {
        username,
        password_hash,
        email: payload.email,
        status: "active".to_string(),
    };
    let created = user_repo::create(&mut conn, &new_user)?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created.into()))))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, AppError> {
    let mut conn = state.db_pool.get()?;

    let user = user_repo::find_by_username(&mut conn, &payload.username)?
        .ok_or_else(|| AppError::Unauthorized("用户名或密码错误".to_string()))?;

    let ok = password::verify_password(&payload.password, &user.password_hash).map_err(|e| {
        tracing::error!("Stored password hash is unreadable: {}", e);
        AppError::Internal("服务器错误".to_string())
    })?;
    if !ok {
        return Err(AppError::Unauthorized("用户名或密码错误".to_string()));
    }
    if user.status != "active" {
        return Err(AppError::Unauthorized("账户已被禁用或锁定".to_string()));
    }

    if let Err(e) = user_repo::record_login(&mut conn, user.user_id, Utc::now().naive_utc()) {
        tracing::warn!("Failed to record login for user {}: {}", user.user_id, e);
    }

    let access_token = jwt::create_token(user.user_id, &user.username, &state.config.jwt)
        .map_err(|e| {
            tracing::error!("Failed to issue token: {}", e);
            AppError::Internal("服务器错误".to_string())
        })?;

    Ok(Json(ApiResponse::ok(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    })))
}

pub async fn me(AuthUser(user): AuthUser) -> Json<ApiResponse<UserInfoResponse>> {
    Json(ApiResponse::ok(user.into()))
}

/// 登出由客户端丢弃 token 即可，这里只返回确认
pub async fn logout(AuthUser(_user): AuthUser) -> Json<ApiResponse<Value>> {
    Json(ApiResponse::ok(json!({"message": "登出成功"})))
}
