//! Error types for the role-strategy engine.

/// Engine errors.
#[derive(Debug, thiserror::Error)]
pub enum RbacError {
    /// Missing or invalid base URL, missing or conflicting credentials.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Network failure reaching Jenkins.
    #[error("transport error contacting {endpoint}: {message}")]
    Transport { endpoint: String, message: String },

    /// Jenkins answered with an unexpected status.
    #[error("upstream returned HTTP {status} for {endpoint}: {summary}")]
    Upstream {
        endpoint: String,
        status: u16,
        summary: String,
    },

    /// Response body did not have the expected shape.
    #[error("decode error for {endpoint}: {message}")]
    Decode { endpoint: String, message: String },

    /// Deadline expired or the HTTP request timed out.
    #[error("timed out: {message}")]
    Timeout { message: String },

    /// Only users and groups can hold roles.
    #[error("invalid principal type: {principal_type} (only users or groups can be granted roles)")]
    InvalidPrincipalType { principal_type: String },

    /// Grant rejected because the principal already holds the role.
    #[error("{principal} already has role {role}")]
    AlreadyGranted { role: String, principal: String },

    /// Revoke rejected because the principal does not hold the role.
    #[error("{principal} does not have role {role}")]
    NotGranted { role: String, principal: String },

    /// The assign call failed after the precondition check passed.
    #[error("grant of {role} to {principal} failed at {endpoint}: {source}")]
    GrantFailed {
        role: String,
        principal: String,
        endpoint: String,
        #[source]
        source: Box<RbacError>,
    },

    /// The unassign call failed after the precondition check passed.
    #[error("revoke of {role} from {principal} failed at {endpoint}: {source}")]
    RevokeFailed {
        role: String,
        principal: String,
        endpoint: String,
        #[source]
        source: Box<RbacError>,
    },

    /// Malformed entitlement or grant identifier handed in by the host.
    #[error("invalid identifier: {id}")]
    InvalidId { id: String },
}

impl RbacError {
    /// Exit code for CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            // Config / usage
            Self::Config { .. } => 1,
            Self::InvalidId { .. } => 1,

            // Auth rejected upstream
            Self::Upstream { status, .. } if *status == 401 || *status == 403 => 2,

            // Precondition rejections
            Self::InvalidPrincipalType { .. } => 3,
            Self::AlreadyGranted { .. } => 3,
            Self::NotGranted { .. } => 3,

            // Network/transient
            Self::Transport { .. } => 5,
            Self::Timeout { .. } => 5,

            // Upstream data
            Self::Upstream { .. } => 6,
            Self::Decode { .. } => 6,

            // Mutation failures
            Self::GrantFailed { .. } => 7,
            Self::RevokeFailed { .. } => 7,
        }
    }

    /// Endpoint contacted when the error happened, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Transport { endpoint, .. }
            | Self::Upstream { endpoint, .. }
            | Self::Decode { endpoint, .. }
            | Self::GrantFailed { endpoint, .. }
            | Self::RevokeFailed { endpoint, .. } => Some(endpoint.as_str()),
            _ => None,
        }
    }

    /// Whether this is a Grant/Revoke precondition rejection (no mutation issued).
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidPrincipalType { .. } | Self::AlreadyGranted { .. } | Self::NotGranted { .. }
        )
    }

    pub(crate) fn from_reqwest(err: reqwest::Error, endpoint: &str) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                message: format!("request to {} timed out", endpoint),
            }
        } else {
            Self::Transport {
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for RbacError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Self::from_reqwest(err, &endpoint)
    }
}

/// Result type for engine operations.
pub type RbacResult<T> = Result<T, RbacError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let unauthorized = RbacError::Upstream {
            endpoint: "http://jenkins/x".into(),
            status: 401,
            summary: String::new(),
        };
        let server_error = RbacError::Upstream {
            endpoint: "http://jenkins/x".into(),
            status: 500,
            summary: String::new(),
        };
        assert_eq!(unauthorized.exit_code(), 2);
        assert_eq!(server_error.exit_code(), 6);
        assert_eq!(
            RbacError::Config {
                message: "x".into()
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn test_grant_failed_keeps_endpoint_and_cause() {
        let cause = RbacError::Upstream {
            endpoint: "http://jenkins/role-strategy/strategy/assignUserRole".into(),
            status: 500,
            summary: "boom".into(),
        };
        let err = RbacError::GrantFailed {
            role: "reviewer".into(),
            principal: "alice".into(),
            endpoint: cause.endpoint().unwrap().to_string(),
            source: Box::new(cause),
        };

        assert_eq!(
            err.endpoint(),
            Some("http://jenkins/role-strategy/strategy/assignUserRole")
        );
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn test_precondition_classification() {
        assert!(RbacError::NotGranted {
            role: "r".into(),
            principal: "p".into()
        }
        .is_precondition());
        assert!(!RbacError::Timeout {
            message: "t".into()
        }
        .is_precondition());
    }
}
