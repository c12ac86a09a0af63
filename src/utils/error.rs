use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 程式結束碼，任何錯誤都不會回傳 0
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low | ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ApiError(_) => ErrorCategory::Network,
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            EtlError::CsvError(_)
            | EtlError::SerializationError(_)
            | EtlError::ProcessingError { .. } => ErrorCategory::Data,
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常可以重跑
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::ApiError(e) if e.is_timeout() => {
                "Places API request timed out".to_string()
            }
            EtlError::ApiError(e) if e.is_decode() => {
                "Places API returned a response that could not be decoded".to_string()
            }
            EtlError::ApiError(_) => "Could not reach the Places API".to_string(),
            EtlError::MissingConfigError { field } => {
                format!("Required setting {} is not set", field)
            }
            EtlError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting {} is invalid: {}", field, reason)
            }
            EtlError::ConfigError { message }
            | EtlError::ConfigValidationError { message, .. } => {
                format!("Configuration problem: {}", message)
            }
            EtlError::CsvError(_) => "Failed to write the leads CSV".to_string(),
            EtlError::SerializationError(_) => {
                "Places API returned malformed JSON".to_string()
            }
            EtlError::ProcessingError { message } => format!("Processing failed: {}", message),
            EtlError::IoError(e) => format!("File system error: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::MissingConfigError { field } if field == "GOOGLE_MAPS_API_KEY" => {
                "在環境變數或 .env 檔案中設定 GOOGLE_MAPS_API_KEY".to_string()
            }
            EtlError::MissingConfigError { field } => format!("請提供 {}", field),
            EtlError::InvalidConfigValueError { field, .. } => {
                format!("檢查 {} 的設定值", field)
            }
            EtlError::ConfigError { .. } | EtlError::ConfigValidationError { .. } => {
                "檢查 TOML 設定檔格式與內容".to_string()
            }
            EtlError::ApiError(_) | EtlError::SerializationError(_) => {
                "確認網路連線與 API 金鑰權限後重新執行".to_string()
            }
            EtlError::CsvError(_) | EtlError::IoError(_) => {
                "確認輸出目錄存在且可寫入".to_string()
            }
            EtlError::ProcessingError { .. } => "使用 --verbose 重新執行以取得更多資訊".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
