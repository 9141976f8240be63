use async_trait::async_trait;

use crate::error::ApiClientResult;

/// A running headless browser owned by the client.
#[async_trait]
pub trait BrowserHandle: Send + Sync {
    /// OS process id, when the browser runs as a local child process
    fn id(&self) -> Option<u32>;

    /// Terminate the browser. Called at most once per handle.
    async fn close(&mut self) -> ApiClientResult<()>;
}

/// Starts headless browser instances.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> ApiClientResult<Box<dyn BrowserHandle>>;
}
