use thiserror::Error;

/// 基础设施错误（文件、序列化、配置）
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// 用户输入校验错误，Display 文本即为警告通知内容
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a comment! ⚠️")]
    EmptyComment,

    #[error("Please enter username and password! ⚠️")]
    MissingCredentials,

    #[error("Password must be at least {min_len} characters! ⚠️")]
    PasswordTooShort { min_len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::PasswordTooShort { min_len: 6 }.to_string(),
            "Password must be at least 6 characters! ⚠️"
        );
        assert_eq!(
            ValidationError::EmptyComment.to_string(),
            "Please enter a comment! ⚠️"
        );
    }
}
