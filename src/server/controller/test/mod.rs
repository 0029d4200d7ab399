use reqwest::{Client, Method, RequestBuilder};
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory::channel::ChannelFactory};
use tokio::net::TcpListener;

use crate::{
    model::{api::ErrorDto, request::RequestDto},
    server::{
        middleware::auth::{MODERATOR_ROLE, USER_ID_HEADER, USER_ROLE_HEADER},
        router,
        service::{image::ObjectStorage, notifier::HttpAnalysisDispatcher},
        state::AppState,
    },
};


/// Serves the full router on an ephemeral local port.
struct TestServer {
    base: String,
    client: Client,
    db: DatabaseConnection,
}

impl TestServer {
    async fn start() -> Self {
        let test = TestBuilder::new().with_request_tables().build().await.unwrap();
        let db = test.db.clone().unwrap();

        let client = Client::new();
        let state = AppState::new(
            db.clone(),
            HttpAnalysisDispatcher::new(client.clone(), None),
            ObjectStorage::new(client.clone(), "http://127.0.0.1:9", "images").unwrap(),
            "s3cret".to_string(),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let app = router::router(state);
        tokio::spawn(async move { axum::serve(listener, app).await });

        Self { base, client, db }
    }

    fn request(&self, method: Method, path: &str, user_id: i32) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base, path))
            .header(USER_ID_HEADER, user_id.to_string())
    }

    fn moderator(&self, method: Method, path: &str, user_id: i32) -> RequestBuilder {
        self.request(method, path, user_id)
            .header(USER_ROLE_HEADER, MODERATOR_ROLE)
    }
}
