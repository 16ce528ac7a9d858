use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Postcode not found: {postcode}")]
    PostcodeNotFound { postcode: String },

    #[error("{service} returned status {status}")]
    UpstreamStatus { service: String, status: u16 },

    #[error("Malformed response from {service}: {message}")]
    MalformedResponse { service: String, message: String },

    #[error("Notification failed: {message}")]
    NotificationError { message: String },
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

impl AlertError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AlertError::ApiError(_)
            | AlertError::UpstreamStatus { .. }
            | AlertError::NotificationError { .. } => ErrorCategory::Network,
            AlertError::ConfigError { .. }
            | AlertError::ConfigValidationError { .. }
            | AlertError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AlertError::PostcodeNotFound { .. } | AlertError::MalformedResponse { .. } => {
                ErrorCategory::Data
            }
            AlertError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AlertError::NotificationError { .. } => ErrorSeverity::Low,
            AlertError::ApiError(_)
            | AlertError::UpstreamStatus { .. }
            | AlertError::MalformedResponse { .. } => ErrorSeverity::Medium,
            AlertError::ConfigError { .. }
            | AlertError::ConfigValidationError { .. }
            | AlertError::InvalidConfigValueError { .. }
            | AlertError::PostcodeNotFound { .. } => ErrorSeverity::High,
            AlertError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Whether retrying the same request on the next cycle may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self.category(), ErrorCategory::Network) || matches!(self, AlertError::MalformedResponse { .. })
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AlertError::ApiError(_) => "Check your network connection; the request will be retried next cycle",
            AlertError::UpstreamStatus { status: 401, .. } | AlertError::UpstreamStatus { status: 403, .. } => {
                "Check OPENSKY_USERNAME / OPENSKY_PASSWORD"
            }
            AlertError::UpstreamStatus { status: 429, .. } => {
                "Rate limited; increase --interval or configure OpenSky credentials"
            }
            AlertError::UpstreamStatus { .. } => "The upstream service is unavailable; it will be retried next cycle",
            AlertError::MalformedResponse { .. } => {
                "The upstream API changed shape or returned garbage; check the endpoint URL"
            }
            AlertError::PostcodeNotFound { .. } => "Check the postcode spelling, e.g. 'SW1A 1AA'",
            AlertError::NotificationError { .. } => "Check PUSHOVER_USER / PUSHOVER_TOKEN",
            AlertError::ConfigError { .. }
            | AlertError::ConfigValidationError { .. }
            | AlertError::InvalidConfigValueError { .. } => "Fix the configuration value and run again",
            AlertError::IoError(_) => "Check file paths and permissions",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AlertError::PostcodeNotFound { postcode } => {
                format!("Could not find coordinates for {}", postcode)
            }
            AlertError::UpstreamStatus { service, status } => {
                format!("{} is not answering properly (HTTP {})", service, status)
            }
            other => other.to_string(),
        }
    }

    /// Process exit code for a fatal error of this kind.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AlertError>;
