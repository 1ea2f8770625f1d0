use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// 生成服务凭证 - 不透明句柄
///
/// 凭证的采集与落盘缓存属于外部协作方，核心只接收一个有效句柄，
/// 过期检查是纯函数，由调用方在派发前执行。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    /// API密钥
    pub api_key: String,
    /// 过期时间点，单调递增检查
    pub expires_at: DateTime<Utc>,
}

impl Credential {
    /// 以指定有效期（分钟）构造新凭证
    pub fn with_ttl_minutes(api_key: impl Into<String>, ttl_minutes: i64) -> Self {
        Self {
            api_key: api_key.into(),
            expires_at: Utc::now() + Duration::minutes(ttl_minutes),
        }
    }

    /// 判断凭证在给定时刻是否已过期
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
