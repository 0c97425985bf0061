/// 题目存储客户端
///
/// 封装所有与存储端 API 相关的调用逻辑
use crate::config::Config;
use crate::error::{AppError, AppResult, StoreError};
use crate::models::question::StoredQuestion;
use crate::models::sync_plan::SyncPlan;
use serde_json::{json, Value};
use std::future::Future;
use tracing::debug;

/// 题目存储抽象
///
/// 存储端的传输、查询与持久化保证都在本系统之外，
/// 这里只约定两个能力：按考试拉取题目、原子提交一批操作
pub trait QuestionStore: Send + Sync {
    /// 拉取某场考试下的全部题目
    fn list(
        &self,
        exam_id: &str,
    ) -> impl Future<Output = AppResult<Vec<StoredQuestion>>> + Send;

    /// 原子提交一批增/改/删操作
    ///
    /// 要么全部生效，要么全部不生效；失败时调用方只会收到
    /// 一个整体失败信号，没有部分成功的中间状态
    fn batch_apply(
        &self,
        exam_id: &str,
        plan: &SyncPlan,
    ) -> impl Future<Output = AppResult<()>> + Send;
}

/// HTTP 存储客户端
#[derive(Clone)]
pub struct HttpQuestionStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpQuestionStore {
    /// 创建新的存储客户端
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.store_api_base_url.clone(),
            token: config.store_token.clone(),
        }
    }

    /// 构建考试题目接口地址
    fn endpoint(&self, exam_id: &str, action: &str) -> String {
        format!("{}/exams/{}/questions/{}", self.base_url, exam_id, action)
    }

    /// 发送 POST 请求并取回 JSON 响应
    async fn post_json(&self, endpoint: &str, body: &Value) -> AppResult<Value> {
        let response = self
            .client
            .post(endpoint)
            .header("canvastoken", &self.token)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::store_request_failed(endpoint, e))?;

        let result: Value = response
            .json()
            .await
            .map_err(|e| AppError::store_request_failed(endpoint, e))?;

        Ok(result)
    }

    /// 检查响应信封是否成功
    ///
    /// 存储端统一返回 {code, message, data}，code == 200 视为成功
    fn check_envelope(endpoint: &str, result: &Value) -> AppResult<()> {
        let code = result.get("code").and_then(|v| v.as_u64());
        if code == Some(200) {
            return Ok(());
        }

        Err(AppError::Store(StoreError::BadResponse {
            endpoint: endpoint.to_string(),
            code,
            message: result
                .get("message")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
        }))
    }
}

impl QuestionStore for HttpQuestionStore {
    async fn list(&self, exam_id: &str) -> AppResult<Vec<StoredQuestion>> {
        let endpoint = self.endpoint(exam_id, "query");

        let result = self.post_json(&endpoint, &json!({})).await?;
        Self::check_envelope(&endpoint, &result)?;

        let data = result.get("data").cloned().unwrap_or(Value::Array(vec![]));
        let questions: Vec<StoredQuestion> = serde_json::from_value(data)?;

        debug!("拉取到 {} 道题目 (考试: {})", questions.len(), exam_id);

        Ok(questions)
    }

    async fn batch_apply(&self, exam_id: &str, plan: &SyncPlan) -> AppResult<()> {
        let endpoint = self.endpoint(exam_id, "batch");
        let body = serde_json::to_value(plan)?;

        debug!("批量提交 Payload: {}", body);

        let result = self.post_json(&endpoint, &body).await?;

        debug!("批量提交结果: {}", result);

        Self::check_envelope(&endpoint, &result)
    }
}
