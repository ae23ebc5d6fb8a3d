//! Argon2 密码哈希与校验

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed")]
    HashingFailed,
    #[error("invalid hash format")]
    InvalidHashFormat,
}

/// 哈希结果为 PHC 格式字符串，盐自动生成
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| PasswordError::HashingFailed)?;

    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// 注册时的最低密码要求：至少 8 位，包含字母和数字
pub fn validate_password_strength(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("密码长度至少 8 位");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("密码需要至少包含 1 个数字");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        return Err("密码需要至少包含 1 个字母");
    }
    Ok(())
}
