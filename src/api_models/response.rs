use serde::Serialize;

/// 统一响应信封：{code, message, data}
/// code 与 HTTP 状态一致：200 成功，400 参数/冲突，404 不存在，500 服务器错误
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 200,
            message: "success".to_string(),
            data: Some(data),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let resp = ApiResponse::ok(vec![1, 2, 3]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 200);
        assert_eq!(json["message"], "success");
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }
}
