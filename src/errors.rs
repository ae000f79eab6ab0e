//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_tutorease_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum TutorEaseError {
            $($variant(String),)*
        }

        impl TutorEaseError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(TutorEaseError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(TutorEaseError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(TutorEaseError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl TutorEaseError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        TutorEaseError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_tutorease_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    Validation("E006", "Validation Error"),
    NotFound("E007", "Resource Not Found"),
    Serialization("E008", "Serialization Error"),
    StoragePluginNotFound("E009", "Storage Plugin Not Found"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    Scheduling("E013", "Scheduling Rule Violation"),
    StateTransition("E014", "State Transition Error"),
    VersionConflict("E015", "Version Conflict"),
}

impl TutorEaseError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 是否属于可安全重试的基础设施错误
    ///
    /// 校验类错误重试毫无意义（输入不会变），只有存储/缓存连接类错误
    /// 才应该由调用方按退避策略重试。
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            TutorEaseError::CacheConnection(_)
                | TutorEaseError::DatabaseConnection(_)
                | TutorEaseError::DatabaseOperation(_)
        )
    }
}

impl fmt::Display for TutorEaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TutorEaseError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for TutorEaseError {
    fn from(err: sea_orm::DbErr) -> Self {
        TutorEaseError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TutorEaseError {
    fn from(err: serde_json::Error) -> Self {
        TutorEaseError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for TutorEaseError {
    fn from(err: chrono::ParseError) -> Self {
        TutorEaseError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TutorEaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TutorEaseError::cache_connection("test").code(), "E001");
        assert_eq!(TutorEaseError::validation("test").code(), "E006");
        assert_eq!(TutorEaseError::scheduling("test").code(), "E013");
        assert_eq!(TutorEaseError::version_conflict("test").code(), "E015");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            TutorEaseError::scheduling("test").error_type(),
            "Scheduling Rule Violation"
        );
        assert_eq!(
            TutorEaseError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = TutorEaseError::validation("Invalid input");
        assert_eq!(err.message(), "Invalid input");
    }

    #[test]
    fn test_transient_classification() {
        assert!(TutorEaseError::database_connection("down").is_transient());
        assert!(!TutorEaseError::validation("bad fee").is_transient());
        assert!(!TutorEaseError::scheduling("overlap").is_transient());
    }
}
