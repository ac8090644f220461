use async_trait::async_trait;
use reqwest::{Request, Response};

/// Anything that can send a prepared request; lets auth wrappers stack.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
