use std::{
    collections::VecDeque,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use crate::domain::llm::{
    entities::{CompletionRequest, GatewayError, RawModelResponse},
    ports::LLMGateway,
};

pub(crate) enum Reply {
    Content(String),
    Fail(GatewayError),
    /// Never resolves.
    Stall,
}

/// Gateway replaying canned replies in order and recording every request.
#[derive(Default)]
pub(crate) struct ScriptedGateway {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
}

impl ScriptedGateway {
    pub(crate) fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            ..Default::default()
        }
    }

    pub(crate) fn contents<S: Into<String>>(contents: impl IntoIterator<Item = S>) -> Self {
        Self::new(contents.into_iter().map(|c| Reply::Content(c.into())))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl LLMGateway for ScriptedGateway {
    fn complete(
        &self,
        request: CompletionRequest,
    ) -> impl Future<Output = Result<RawModelResponse, GatewayError>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        let reply = self.replies.lock().unwrap().pop_front();

        async move {
            match reply {
                Some(Reply::Content(content)) => Ok(RawModelResponse::new(content)),
                Some(Reply::Fail(error)) => Err(error),
                Some(Reply::Stall) => std::future::pending().await,
                None => Err(GatewayError::EmptyResponse),
            }
        }
    }
}
