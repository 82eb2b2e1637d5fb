// SPDX-FileCopyrightText: 2026 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use log::warn;
use serde_json::Value;
use thiserror::Error;

/// Error code the backend uses when the user has not finished the diagnosis
/// questionnaire.
pub(crate) const DIAGNOSIS_NOT_COMPLETED: &str = "DIAGNOSIS_NOT_COMPLETED";

/// Message fragments ("diagnosis", "profile") that older backend versions use
/// for the same condition without sending a code.
const DIAGNOSIS_KEYWORDS: [&str; 2] = ["진단", "프로필"];

pub(crate) const NETWORK_MESSAGE: &str = "네트워크 연결을 확인해주세요.";
pub(crate) const GENERIC_MESSAGE: &str = "알 수 없는 오류가 발생했습니다.";
pub(crate) const UNREADABLE_RESPONSE_MESSAGE: &str = "서버 응답을 해석할 수 없습니다.";

/// The single shape every failed backend call is reported as.
///
/// A status of 0 means no response was received.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub(crate) struct ApiError {
    status: u16,
    message: String,
    code: Option<String>,
    data: Option<Value>,
    diagnosis_not_completed: bool,
}

impl ApiError {
    /// The server answered with an error status.
    pub(crate) fn from_response(
        status: u16,
        data: Option<Value>,
        transport_message: Option<&str>,
        legacy_keyword_detection: bool,
    ) -> Self {
        let field = |name: &str| {
            data.as_ref()
                .and_then(|value| value.get(name))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };

        let code = field("error").or_else(|| field("code"));
        let message = field("message")
            .or_else(|| transport_message.map(str::to_owned))
            .unwrap_or_else(|| GENERIC_MESSAGE.to_owned());
        let diagnosis_not_completed =
            detect_diagnosis_not_completed(code.as_deref(), &message, legacy_keyword_detection);

        Self {
            status,
            message,
            code,
            data,
            diagnosis_not_completed,
        }
    }

    /// The request went out but nothing came back.
    pub(crate) fn no_response() -> Self {
        Self {
            status: 0,
            message: NETWORK_MESSAGE.to_owned(),
            code: None,
            data: None,
            diagnosis_not_completed: false,
        }
    }

    /// The request could not be constructed.
    pub(crate) fn not_sent(transport_message: Option<&str>) -> Self {
        Self {
            status: 0,
            message: transport_message
                .filter(|s| !s.is_empty())
                .unwrap_or(GENERIC_MESSAGE)
                .to_owned(),
            code: None,
            data: None,
            diagnosis_not_completed: false,
        }
    }

    /// A successful status whose body did not match the endpoint's contract.
    pub(crate) fn unreadable(status: u16) -> Self {
        Self {
            status,
            message: UNREADABLE_RESPONSE_MESSAGE.to_owned(),
            code: None,
            data: None,
            diagnosis_not_completed: false,
        }
    }

    pub(crate) const fn status(&self) -> u16 {
        self.status
    }

    pub(crate) fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub(crate) const fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    pub(crate) const fn is_diagnosis_not_completed(&self) -> bool {
        self.diagnosis_not_completed
    }

    pub(crate) const fn is_auth_failure(&self) -> bool {
        matches!(self.status, 401 | 403)
    }
}

fn detect_diagnosis_not_completed(
    code: Option<&str>,
    message: &str,
    legacy_keyword_detection: bool,
) -> bool {
    if code == Some(DIAGNOSIS_NOT_COMPLETED) {
        return true;
    }

    if legacy_keyword_detection && DIAGNOSIS_KEYWORDS.iter().any(|kw| message.contains(kw)) {
        warn!(
            "Treating an error as diagnosis-not-completed from its message text alone; the backend should send the {} code",
            DIAGNOSIS_NOT_COMPLETED
        );
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn uses_payload_message_and_code() {
        let err = ApiError::from_response(
            403,
            Some(json!({"error": "FORBIDDEN", "message": "세션이 만료되었습니다"})),
            Some("Forbidden"),
            true,
        );

        assert_eq!(err.status(), 403);
        assert_eq!(err.message(), "세션이 만료되었습니다");
        assert_eq!(err.code(), Some("FORBIDDEN"));
        assert!(err.is_auth_failure());
        assert!(!err.is_diagnosis_not_completed());
    }

    #[test]
    fn falls_back_to_transport_then_generic_message() {
        let err = ApiError::from_response(500, Some(json!({"error": "BOOM"})), Some("Internal Server Error"), true);
        assert_eq!(err.message(), "Internal Server Error");

        let err = ApiError::from_response(599, None, None, true);
        assert_eq!(err.message(), GENERIC_MESSAGE);
        assert_eq!(err.code(), None);
        assert_eq!(err.data(), None);
    }

    #[test]
    fn code_field_is_used_when_error_is_absent() {
        let err = ApiError::from_response(400, Some(json!({"code": "BAD_INPUT"})), None, true);
        assert_eq!(err.code(), Some("BAD_INPUT"));
    }

    #[test]
    fn diagnosis_sentinel_code() {
        let err = ApiError::from_response(
            400,
            Some(json!({"error": "DIAGNOSIS_NOT_COMPLETED", "message": "진단이 필요합니다"})),
            None,
            false,
        );
        assert!(err.is_diagnosis_not_completed());
    }

    #[test]
    fn diagnosis_keywords_without_code() {
        for message in ["먼저 진단을 완료해주세요", "프로필이 없습니다"] {
            let err = ApiError::from_response(400, Some(json!({"message": message})), None, true);
            assert!(err.is_diagnosis_not_completed(), "{message}");
        }
    }

    #[test]
    fn keyword_detection_can_be_disabled() {
        let err = ApiError::from_response(
            400,
            Some(json!({"message": "먼저 진단을 완료해주세요"})),
            None,
            false,
        );
        assert!(!err.is_diagnosis_not_completed());
    }

    #[test]
    fn network_and_construction_failures() {
        let err = ApiError::no_response();
        assert_eq!((err.status(), err.message()), (0, NETWORK_MESSAGE));
        assert_eq!(err.data(), None);

        let err = ApiError::not_sent(Some("relative URL without a base"));
        assert_eq!((err.status(), err.message()), (0, "relative URL without a base"));

        assert_eq!(ApiError::not_sent(None).message(), GENERIC_MESSAGE);
    }
}
