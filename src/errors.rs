use std::fmt;

#[derive(Debug, Clone)]
pub enum AivisorError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    StoragePluginNotFound(String),
    FileOperation(String),
}

impl AivisorError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            AivisorError::DatabaseConfig(_) => "E001",
            AivisorError::DatabaseConnection(_) => "E002",
            AivisorError::DatabaseOperation(_) => "E003",
            AivisorError::Validation(_) => "E004",
            AivisorError::NotFound(_) => "E005",
            AivisorError::Serialization(_) => "E006",
            AivisorError::StoragePluginNotFound(_) => "E007",
            AivisorError::FileOperation(_) => "E008",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            AivisorError::DatabaseConfig(_) => "Database Configuration Error",
            AivisorError::DatabaseConnection(_) => "Database Connection Error",
            AivisorError::DatabaseOperation(_) => "Database Operation Error",
            AivisorError::Validation(_) => "Validation Error",
            AivisorError::NotFound(_) => "Resource Not Found",
            AivisorError::Serialization(_) => "Serialization Error",
            AivisorError::StoragePluginNotFound(_) => "Storage Plugin Not Found",
            AivisorError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            AivisorError::DatabaseConfig(msg) => msg,
            AivisorError::DatabaseConnection(msg) => msg,
            AivisorError::DatabaseOperation(msg) => msg,
            AivisorError::Validation(msg) => msg,
            AivisorError::NotFound(msg) => msg,
            AivisorError::Serialization(msg) => msg,
            AivisorError::StoragePluginNotFound(msg) => msg,
            AivisorError::FileOperation(msg) => msg,
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AivisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AivisorError {}

// 便捷的构造函数
impl AivisorError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        AivisorError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        AivisorError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        AivisorError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        AivisorError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        AivisorError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        AivisorError::Serialization(msg.into())
    }

    pub fn storage_plugin_not_found<T: Into<String>>(msg: T) -> Self {
        AivisorError::StoragePluginNotFound(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        AivisorError::FileOperation(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for AivisorError {
    fn from(err: sea_orm::DbErr) -> Self {
        AivisorError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AivisorError {
    fn from(err: std::io::Error) -> Self {
        AivisorError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AivisorError {
    fn from(err: serde_json::Error) -> Self {
        AivisorError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AivisorError>;
