//! Wire messages exchanged with the background process

use quell_core::{ChannelError, FilterContent, SettingName, SettingValue};
use serde::{Deserialize, Serialize};

/// Request from a UI context to the background process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelRequest {
    /// Full settings snapshot
    GetSettings,
    SetSetting {
        name: SettingName,
        value: SettingValue,
    },
    /// Download a filter list
    GetFilterContentByUrl {
        url: String,
    },
    /// Parse filter text; `title` labels where it came from
    GetFilterInfoByContent {
        content: FilterContent,
        title: String,
    },
}

impl ChannelRequest {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            ChannelRequest::GetSettings => "get_settings",
            ChannelRequest::SetSetting { .. } => "set_setting",
            ChannelRequest::GetFilterContentByUrl { .. } => "get_filter_content_by_url",
            ChannelRequest::GetFilterInfoByContent { .. } => "get_filter_info_by_content",
        }
    }
}

/// Reply from the background process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChannelResponse {
    Success { data: serde_json::Value },
    Error { message: String },
}

impl ChannelResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        ChannelResponse::Success {
            data: serde_json::to_value(data).unwrap_or(serde_json::Value::Null),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ChannelResponse::Error {
            message: message.into(),
        }
    }

    /// Reply with no payload
    pub fn ok() -> Self {
        ChannelResponse::Success {
            data: serde_json::Value::Null,
        }
    }

    /// Payload of a success reply, or the background's error message
    pub fn into_result(self) -> Result<serde_json::Value, ChannelError> {
        match self {
            ChannelResponse::Success { data } => Ok(data),
            ChannelResponse::Error { message } => Err(ChannelError::Background(message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let request = ChannelRequest::SetSetting {
            name: SettingName::PopupV3WizardEnabled,
            value: SettingValue::Bool(false),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"type": "set_setting", "name": "popup-v3-wizard-enabled", "value": false})
        );

        let request: ChannelRequest = serde_json::from_value(json!({
            "type": "get_filter_info_by_content",
            "content": "||example.com^",
            "title": "custom.txt"
        }))
        .unwrap();
        assert_eq!(request.kind(), "get_filter_info_by_content");
    }

    #[test]
    fn test_response_into_result() {
        let data = ChannelResponse::success(42).into_result().unwrap();
        assert_eq!(data, json!(42));

        let err = ChannelResponse::error("boom").into_result().unwrap_err();
        assert_eq!(err, ChannelError::Background("boom".to_string()));
    }

    #[test]
    fn test_response_wire_format() {
        assert_eq!(
            serde_json::to_value(ChannelResponse::ok()).unwrap(),
            json!({"type": "success", "data": null})
        );
    }
}
