use std::fmt;

#[derive(Debug, Clone)]
pub enum TinylinkError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    Duplicate(String),
    NotFound(String),
    Serialization(String),
}

impl TinylinkError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            TinylinkError::DatabaseConfig(_) => "E001",
            TinylinkError::DatabaseConnection(_) => "E002",
            TinylinkError::DatabaseOperation(_) => "E003",
            TinylinkError::Validation(_) => "E004",
            TinylinkError::Duplicate(_) => "E005",
            TinylinkError::NotFound(_) => "E006",
            TinylinkError::Serialization(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            TinylinkError::DatabaseConfig(_) => "Database Configuration Error",
            TinylinkError::DatabaseConnection(_) => "Database Connection Error",
            TinylinkError::DatabaseOperation(_) => "Database Operation Error",
            TinylinkError::Validation(_) => "Validation Error",
            TinylinkError::Duplicate(_) => "Duplicate Code",
            TinylinkError::NotFound(_) => "Resource Not Found",
            TinylinkError::Serialization(_) => "Serialization Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            TinylinkError::DatabaseConfig(msg) => msg,
            TinylinkError::DatabaseConnection(msg) => msg,
            TinylinkError::DatabaseOperation(msg) => msg,
            TinylinkError::Validation(msg) => msg,
            TinylinkError::Duplicate(msg) => msg,
            TinylinkError::NotFound(msg) => msg,
            TinylinkError::Serialization(msg) => msg,
        }
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for TinylinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for TinylinkError {}

// 便捷的构造函数
impl TinylinkError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        TinylinkError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        TinylinkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        TinylinkError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Validation(msg.into())
    }

    pub fn duplicate<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Duplicate(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        TinylinkError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        TinylinkError::Serialization(msg.into())
    }
}

impl From<sea_orm::DbErr> for TinylinkError {
    fn from(err: sea_orm::DbErr) -> Self {
        TinylinkError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for TinylinkError {
    fn from(err: serde_json::Error) -> Self {
        TinylinkError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TinylinkError>;
