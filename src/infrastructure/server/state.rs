use crate::application::conversation::ConversationLoop;
use crate::infrastructure::model::ModelClient;
use std::time::Duration;

pub struct ServerState<M: ModelClient> {
    conversation: ConversationLoop<M>,
    request_timeout: Duration,
}

impl<M: ModelClient> ServerState<M> {
    pub fn new(conversation: ConversationLoop<M>, request_timeout: Duration) -> Self {
        Self {
            conversation,
            request_timeout,
        }
    }

    pub(crate) fn conversation(&self) -> &ConversationLoop<M> {
        &self.conversation
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
