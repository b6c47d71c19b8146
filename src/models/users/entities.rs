/// 发起请求的用户
///
/// 用户体系不在本 crate 内，这里只保留缓存和存储层需要的身份信息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestUser {
    Anonymous,
    Authenticated { id: i64, username: String },
}

impl RequestUser {
    pub fn authenticated<T: Into<String>>(id: i64, username: T) -> Self {
        RequestUser::Authenticated {
            id,
            username: username.into(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, RequestUser::Authenticated { .. })
    }

    /// 已认证用户的 ID，匿名用户返回 None
    pub fn id(&self) -> Option<i64> {
        match self {
            RequestUser::Authenticated { id, .. } => Some(*id),
            RequestUser::Anonymous => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            RequestUser::Authenticated { username, .. } => Some(username),
            RequestUser::Anonymous => None,
        }
    }
}
