use axum::Router;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

use api_error_response::infrastructure::http::create_app;

pub mod api_client;

use api_client::TestClient;

pub struct TestContext {
    pub client: TestClient,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let client = spawn_app(create_app()).await;
            Self { client }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Server task is dropped with the runtime
        }
    }
}

/// Serve `app` on an ephemeral port and return a client pointed at it
pub async fn spawn_app(app: Router) -> TestClient {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Wait for server to be ready
    tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

    TestClient::new(&base_url)
}
