//! Mock message channel for unit testing.
//!
//! Records every call and answers from pre-configured state.

use crate::sender::MessageChannel;
use async_trait::async_trait;
use quell_core::{ChannelError, FilterContent, FilterInfo, SettingName, SettingValue};
use std::cell::RefCell;
use std::collections::HashMap;

/// A recorded call to the mock channel.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    GetSettings,
    SetSetting(SettingName, SettingValue),
    GetFilterContentByUrl(String),
    GetFilterInfoByContent(FilterContent, String),
}

/// Mock implementation of [`MessageChannel`] for testing.
#[derive(Default)]
pub struct MockChannel {
    settings: RefCell<HashMap<SettingName, SettingValue>>,
    contents: RefCell<HashMap<String, FilterContent>>,
    filter_info: RefCell<Option<Result<Option<FilterInfo>, ChannelError>>>,
    set_error: RefCell<Option<ChannelError>>,
    calls: RefCell<Vec<MockCall>>,
}

impl MockChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a background setting.
    pub fn with_setting(self, name: SettingName, value: impl Into<SettingValue>) -> Self {
        self.settings.borrow_mut().insert(name, value.into());
        self
    }

    /// Serve `content` for `url`; other URLs fail with a network error.
    pub fn with_url_content(self, url: &str, content: &str) -> Self {
        self.contents
            .borrow_mut()
            .insert(url.to_string(), FilterContent::new(content));
        self
    }

    /// Answer every parse request with `info`.
    pub fn with_filter_info(self, info: Option<FilterInfo>) -> Self {
        *self.filter_info.borrow_mut() = Some(Ok(info));
        self
    }

    /// Fail every parse request with `err`.
    pub fn with_filter_info_error(self, err: ChannelError) -> Self {
        *self.filter_info.borrow_mut() = Some(Err(err));
        self
    }

    /// Fail setting writes with `err` until cleared.
    pub fn fail_set_setting(&self, err: Option<ChannelError>) {
        *self.set_error.borrow_mut() = err;
    }

    /// Current background-side value of a setting.
    pub fn setting(&self, name: SettingName) -> Option<SettingValue> {
        self.settings.borrow().get(&name).cloned()
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: MockCall) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl MessageChannel for MockChannel {
    async fn get_settings(&self) -> Result<HashMap<SettingName, SettingValue>, ChannelError> {
        self.record(MockCall::GetSettings);
        Ok(self.settings.borrow().clone())
    }

    async fn set_setting(
        &self,
        name: SettingName,
        value: SettingValue,
    ) -> Result<(), ChannelError> {
        self.record(MockCall::SetSetting(name, value.clone()));
        if let Some(err) = self.set_error.borrow().clone() {
            return Err(err);
        }
        self.settings.borrow_mut().insert(name, value);
        Ok(())
    }

    async fn get_filter_content_by_url(&self, url: &str) -> Result<FilterContent, ChannelError> {
        self.record(MockCall::GetFilterContentByUrl(url.to_string()));
        self.contents
            .borrow()
            .get(url)
            .cloned()
            .ok_or_else(|| ChannelError::network(format!("Failed to fetch {}", url)))
    }

    async fn get_filter_info_by_content(
        &self,
        content: &FilterContent,
        title: &str,
    ) -> Result<Option<FilterInfo>, ChannelError> {
        self.record(MockCall::GetFilterInfoByContent(
            content.clone(),
            title.to_string(),
        ));
        match self.filter_info.borrow().clone() {
            Some(result) => result,
            None => Ok(Some(FilterInfo {
                title: Some(title.to_string()),
                source: Some(title.to_string()),
                rules_count: content.rule_lines(),
                ..Default::default()
            })),
        }
    }
}
