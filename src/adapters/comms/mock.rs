//! In-memory communications provider for development and tests.
//!
//! Tracks which calls and channels exist and which members each
//! channel holds, enforcing the same create/delete pairing the hosted
//! provider would.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::CallId;
use crate::ports::{CallMetadata, CommsError, CommsProvider};

/// In-memory `CommsProvider`.
#[derive(Default)]
pub struct MockCommsProvider {
    calls: Mutex<HashSet<String>>,
    channels: Mutex<HashMap<String, HashSet<String>>>,
}

impl MockCommsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the call for this id currently exists.
    pub fn has_call(&self, call_id: &CallId) -> bool {
        self.calls.lock().unwrap().contains(call_id.as_str())
    }

    /// Returns the members of a channel, if it exists.
    pub fn channel_members(&self, call_id: &CallId) -> Option<Vec<String>> {
        self.channels
            .lock()
            .unwrap()
            .get(call_id.as_str())
            .map(|members| {
                let mut members: Vec<String> = members.iter().cloned().collect();
                members.sort();
                members
            })
    }

    fn missing(kind: &str, call_id: &CallId) -> CommsError {
        CommsError::Api {
            status: 404,
            message: format!("{} not found: {}", kind, call_id),
        }
    }
}

#[async_trait]
impl CommsProvider for MockCommsProvider {
    async fn create_call(
        &self,
        call_id: &CallId,
        _creator_external_id: &str,
        _metadata: CallMetadata,
    ) -> Result<(), CommsError> {
        // get-or-create semantics
        self.calls.lock().unwrap().insert(call_id.as_str().to_string());
        Ok(())
    }

    async fn create_channel(
        &self,
        call_id: &CallId,
        _name: &str,
        creator_external_id: &str,
        members: &[String],
    ) -> Result<(), CommsError> {
        let mut initial: HashSet<String> = members.iter().cloned().collect();
        initial.insert(creator_external_id.to_string());
        self.channels
            .lock()
            .unwrap()
            .insert(call_id.as_str().to_string(), initial);
        Ok(())
    }

    async fn add_channel_member(
        &self,
        call_id: &CallId,
        external_id: &str,
    ) -> Result<(), CommsError> {
        let mut channels = self.channels.lock().unwrap();
        let members = channels
            .get_mut(call_id.as_str())
            .ok_or_else(|| Self::missing("Channel", call_id))?;
        members.insert(external_id.to_string());
        Ok(())
    }

    async fn delete_call(&self, call_id: &CallId) -> Result<(), CommsError> {
        if !self.calls.lock().unwrap().remove(call_id.as_str()) {
            return Err(Self::missing("Call", call_id));
        }
        Ok(())
    }

    async fn delete_channel(&self, call_id: &CallId) -> Result<(), CommsError> {
        if self
            .channels
            .lock()
            .unwrap()
            .remove(call_id.as_str())
            .is_none()
        {
            return Err(Self::missing("Channel", call_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> CallMetadata {
        CallMetadata {
            session_id: "s-1".to_string(),
            problem: "Two Sum".to_string(),
            difficulty: "easy".to_string(),
        }
    }

    #[tokio::test]
    async fn call_lifecycle_roundtrips() {
        let provider = MockCommsProvider::new();
        let call_id = CallId::generate();

        provider.create_call(&call_id, "ext-1", metadata()).await.unwrap();
        assert!(provider.has_call(&call_id));

        provider.delete_call(&call_id).await.unwrap();
        assert!(!provider.has_call(&call_id));
    }

    #[tokio::test]
    async fn channel_tracks_members() {
        let provider = MockCommsProvider::new();
        let call_id = CallId::generate();

        provider
            .create_channel(&call_id, "Two Sum Session", "ext-host", &["ext-host".to_string()])
            .await
            .unwrap();
        provider.add_channel_member(&call_id, "ext-guest").await.unwrap();

        assert_eq!(
            provider.channel_members(&call_id).unwrap(),
            vec!["ext-guest".to_string(), "ext-host".to_string()]
        );
    }

    #[tokio::test]
    async fn adding_member_to_missing_channel_fails() {
        let provider = MockCommsProvider::new();
        let result = provider
            .add_channel_member(&CallId::generate(), "ext-guest")
            .await;
        assert!(matches!(result, Err(CommsError::Api { status: 404, .. })));
    }
}
