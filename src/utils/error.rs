use thiserror::Error;

/// 表單與點餐操作的驗證錯誤，只影響畫面狀態，不會中斷流程
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Restaurant is closed on {weekday}, please pick another date")]
    ClosedOnDate { date: String, weekday: String },

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Unknown time slot '{value}'")]
    InvalidTimeSlot { value: String },

    #[error("Booking information incomplete, missing: {}", missing.join(", "))]
    IncompleteBooking { missing: Vec<String> },

    #[error("Login information incomplete, missing: {}", missing.join(", "))]
    IncompleteLogin { missing: Vec<String> },

    #[error("Please choose a drink for the combo")]
    DrinkRequired,

    #[error("A drink can only be chosen together with a combo")]
    DrinkWithoutCombo,

    #[error("Unknown {kind} option '{value}'")]
    UnknownOption { kind: String, value: String },

    #[error("No menu item is open for composition")]
    NoItemOpen,

    #[error("Menu item '{id}' not found")]
    UnknownItem { id: String },

    #[error("Reservation with id '{id}' not found")]
    UnknownReservation { id: String },

    #[error("Action '{action}' is not available while the flow is {state}")]
    InvalidState { action: String, state: String },

    #[error("A reservation is already being submitted")]
    SubmissionInFlight,

    #[error("Online reservation is for members only, please log in first")]
    MembershipRequired,

    #[error("Admin rights required")]
    AdminRequired,
}

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Backend rejected the request: {message}")]
    BackendRejection { message: String },

    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from '{endpoint}': {message}")]
    Decode { endpoint: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Backend,
    Network,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl OrderError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::BackendRejection {
            message: message.into(),
        }
    }

    pub fn decode(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            OrderError::Validation(_) => ErrorCategory::Validation,
            OrderError::BackendRejection { .. } => ErrorCategory::Backend,
            OrderError::Transport(_) => ErrorCategory::Network,
            OrderError::Decode { .. } | OrderError::Serialization(_) => ErrorCategory::Data,
            OrderError::Io(_) => ErrorCategory::System,
            OrderError::ConfigError { .. }
            | OrderError::ConfigValidationError { .. }
            | OrderError::InvalidConfigValueError { .. }
            | OrderError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Backend | ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 網路錯誤與後端拒絕都可以讓使用者重新送出
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Backend | ErrorCategory::Network | ErrorCategory::Data
        )
    }

    /// 顯示給使用者的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            OrderError::Validation(e) => e.to_string(),
            OrderError::BackendRejection { message } => format!("訂位失敗: {}", message),
            OrderError::Transport(_) | OrderError::Decode { .. } => {
                "網路錯誤，請稍後再試".to_string()
            }
            OrderError::Serialization(e) => format!("資料格式錯誤: {}", e),
            OrderError::Io(e) => format!("檔案讀寫失敗: {}", e),
            OrderError::ConfigError { .. }
            | OrderError::ConfigValidationError { .. }
            | OrderError::InvalidConfigValueError { .. }
            | OrderError::MissingConfigError { .. } => format!("設定錯誤: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Check the highlighted field and try again",
            ErrorCategory::Backend => "Adjust the reservation and submit again",
            ErrorCategory::Network => "Check the network connection and retry",
            ErrorCategory::Data => "The backend answered with an unexpected format, retry later",
            ErrorCategory::Configuration => "Check the configuration file and environment variables",
            ErrorCategory::System => "Check file permissions of the data directory",
        }
    }
}

pub type Result<T> = std::result::Result<T, OrderError>;
