//! Typed RPC stub over a [`Transport`]

use crate::message::ChannelRequest;
use crate::transport::Transport;
use async_trait::async_trait;
use quell_core::{ChannelError, FilterContent, FilterInfo, SettingName, SettingValue};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use url::Url;

/// Operations the UI may request from the background process.
///
/// Every call is one round trip; nothing is retried here.
#[async_trait(?Send)]
pub trait MessageChannel {
    /// Snapshot of every recognized setting
    async fn get_settings(&self) -> Result<HashMap<SettingName, SettingValue>, ChannelError>;

    async fn set_setting(&self, name: SettingName, value: SettingValue)
        -> Result<(), ChannelError>;

    /// Download filter list text
    async fn get_filter_content_by_url(&self, url: &str) -> Result<FilterContent, ChannelError>;

    /// Parse filter text. `Ok(None)` means the background found nothing it
    /// could use.
    async fn get_filter_info_by_content(
        &self,
        content: &FilterContent,
        title: &str,
    ) -> Result<Option<FilterInfo>, ChannelError>;
}

/// Production [`MessageChannel`] backed by a transport
pub struct Sender<T> {
    transport: T,
}

impl<T: Transport> Sender<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    async fn call<R: DeserializeOwned>(&self, request: ChannelRequest) -> Result<R, ChannelError> {
        let kind = request.kind();
        log::trace!("Sending {} request", kind);

        let data = self.transport.request(request).await?.into_result()?;
        serde_json::from_value(data)
            .map_err(|e| ChannelError::protocol(format!("{} reply: {}", kind, e)))
    }
}

#[async_trait(?Send)]
impl<T: Transport> MessageChannel for Sender<T> {
    async fn get_settings(&self) -> Result<HashMap<SettingName, SettingValue>, ChannelError> {
        let raw: HashMap<String, SettingValue> = self.call(ChannelRequest::GetSettings).await?;

        let mut settings = HashMap::with_capacity(raw.len());
        for (name, value) in raw {
            match name.parse::<SettingName>() {
                Ok(name) => {
                    settings.insert(name, value);
                }
                Err(_) => log::warn!("Ignoring unknown setting from background: {}", name),
            }
        }
        Ok(settings)
    }

    async fn set_setting(
        &self,
        name: SettingName,
        value: SettingValue,
    ) -> Result<(), ChannelError> {
        self.call(ChannelRequest::SetSetting { name, value }).await
    }

    async fn get_filter_content_by_url(&self, url: &str) -> Result<FilterContent, ChannelError> {
        // Validate only; the background gets the URL as the user typed it
        Url::parse(url).map_err(|e| ChannelError::InvalidUrl(format!("{}: {}", url, e)))?;

        self.call(ChannelRequest::GetFilterContentByUrl {
            url: url.to_string(),
        })
        .await
    }

    async fn get_filter_info_by_content(
        &self,
        content: &FilterContent,
        title: &str,
    ) -> Result<Option<FilterInfo>, ChannelError> {
        self.call(ChannelRequest::GetFilterInfoByContent {
            content: content.clone(),
            title: title.to_string(),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ChannelResponse;
    use crate::transport::local_channel;
    use serde_json::json;

    fn background(request: &ChannelRequest) -> ChannelResponse {
        match request {
            ChannelRequest::GetSettings => ChannelResponse::success(json!({
                "protection-pause-expires": 0,
                "popup-v3-wizard-enabled": true,
                "legacy-setting": "x"
            })),
            ChannelRequest::SetSetting { .. } => ChannelResponse::ok(),
            ChannelRequest::GetFilterContentByUrl { url } if url.ends_with("list.txt") => {
                ChannelResponse::success("||example.com^")
            }
            ChannelRequest::GetFilterContentByUrl { url } => {
                ChannelResponse::error(format!("Failed to fetch {}", url))
            }
            ChannelRequest::GetFilterInfoByContent { content, .. } if content.is_empty() => {
                ChannelResponse::ok()
            }
            ChannelRequest::GetFilterInfoByContent { title, .. } => {
                ChannelResponse::success(json!({"title": title, "rulesCount": 1}))
            }
        }
    }

    fn connect() -> Sender<crate::transport::LocalTransport> {
        let (transport, port) = local_channel(8);
        tokio::spawn(port.serve(background));
        Sender::new(transport)
    }

    #[tokio::test]
    async fn test_get_settings_skips_unknown_names() {
        let sender = connect();
        let settings = sender.get_settings().await.unwrap();

        assert_eq!(settings.len(), 2);
        assert_eq!(
            settings[&SettingName::ProtectionPauseExpires],
            SettingValue::Number(0.0)
        );
    }

    #[tokio::test]
    async fn test_set_setting() {
        let sender = connect();
        sender
            .set_setting(SettingName::NoticeHidden, SettingValue::Bool(true))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_content_by_url() {
        let sender = connect();
        let content = sender
            .get_filter_content_by_url("https://example.org/list.txt")
            .await
            .unwrap();
        assert_eq!(content.as_str(), "||example.com^");

        let err = sender
            .get_filter_content_by_url("https://example.org/missing")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ChannelError::Background("Failed to fetch https://example.org/missing".to_string())
        );
    }

    #[tokio::test]
    async fn test_url_sent_verbatim() {
        let (transport, port) = local_channel(1);
        tokio::spawn(port.serve(|request| match request {
            ChannelRequest::GetFilterContentByUrl { url } => ChannelResponse::success(url),
            _ => ChannelResponse::error("unsupported"),
        }));
        let sender = Sender::new(transport);

        let content = sender
            .get_filter_content_by_url("https://example.org")
            .await
            .unwrap();
        assert_eq!(content.as_str(), "https://example.org");
    }

    #[tokio::test]
    async fn test_malformed_url_never_sent() {
        let (transport, port) = local_channel(1);
        drop(port);
        let sender = Sender::new(transport);

        // A sent request would fail with Disconnected instead
        let err = sender.get_filter_content_by_url("not a url").await.unwrap_err();
        assert!(matches!(err, ChannelError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_filter_info_null_is_none() {
        let sender = connect();
        let info = sender
            .get_filter_info_by_content(&FilterContent::new(""), "empty.txt")
            .await
            .unwrap();
        assert!(info.is_none());

        let info = sender
            .get_filter_info_by_content(&FilterContent::new("||example.com^"), "custom.txt")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(info.title.as_deref(), Some("custom.txt"));
        assert_eq!(info.rules_count, 1);
    }

    #[tokio::test]
    async fn test_unexpected_payload_is_protocol_error() {
        let (transport, port) = local_channel(1);
        tokio::spawn(port.serve(|_| ChannelResponse::success(json!([1, 2, 3]))));
        let sender = Sender::new(transport);

        let err = sender.get_settings().await.unwrap_err();
        assert!(matches!(err, ChannelError::Protocol(_)));
    }
}
